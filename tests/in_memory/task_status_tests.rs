//! Status derivation across successive saves through the task service.

use super::helpers::{Harness, date, harness, planned, project};
use eyre::ensure;
use rstest::rstest;
use tasklane::task::{
    domain::{ProgressRate, ProjectId, TaskStatus},
    services::UpdateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn status_follows_actual_dates_through_lifecycle(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let created = service.create(planned(project, "Install roof")).await?;
    ensure!(created.status() == TaskStatus::NotStarted);

    let started = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_actual_start(Some(date(2025, 2, 3))),
        )
        .await?;
    ensure!(started.status() == TaskStatus::InProgress);

    let finished = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_actual_end(Some(date(2025, 2, 9))),
        )
        .await?;
    ensure!(finished.status() == TaskStatus::Completed);
    ensure!(finished.progress() == ProgressRate::COMPLETE);

    let reopened = service
        .update(
            created.id(),
            UpdateTaskRequest::new()
                .with_actual_end(None)
                .with_progress(ProgressRate::from_percent(80)?),
        )
        .await?;
    ensure!(reopened.status() == TaskStatus::InProgress);
    ensure!(reopened.progress() == ProgressRate::from_percent(80)?);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_task_without_actuals_reopens_as_not_started(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let created = service
        .create(planned(project, "Snag list").with_actual_end(date(2025, 2, 4)))
        .await?;

    let reopened = service
        .update(
            created.id(),
            UpdateTaskRequest::new()
                .with_actual_end(None)
                .with_status(TaskStatus::Completed),
        )
        .await?;

    ensure!(reopened.status() == TaskStatus::NotStarted);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn on_hold_is_not_overridden_by_actual_start(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let created = service
        .create(planned(project, "Await permit").with_status(TaskStatus::OnHold))
        .await?;

    let updated = service
        .update(
            created.id(),
            UpdateTaskRequest::new().with_actual_start(Some(date(2025, 2, 2))),
        )
        .await?;

    ensure!(updated.status() == TaskStatus::OnHold);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resaving_unchanged_task_is_stable(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let created = service
        .create(
            planned(project, "Commission")
                .with_actual_start(date(2025, 2, 2))
                .with_actual_end(date(2025, 2, 6)),
        )
        .await?;

    let first = service.update(created.id(), UpdateTaskRequest::new()).await?;
    let second = service.update(created.id(), UpdateTaskRequest::new()).await?;

    ensure!(first.status() == second.status());
    ensure!(first.progress() == second.progress());
    ensure!(second.status() == TaskStatus::Completed);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_without_actual_end_settles_after_first_update(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    // Saving is idempotent only from the second save on: the stored
    // COMPLETED status with no actual end reopens once, then holds.
    let service = &harness.service;
    let created = service
        .create(planned(project, "Handover").with_status(TaskStatus::Completed))
        .await?;
    ensure!(created.status() == TaskStatus::Completed);

    let first = service.update(created.id(), UpdateTaskRequest::new()).await?;
    let second = service.update(created.id(), UpdateTaskRequest::new()).await?;

    ensure!(first.status() == TaskStatus::NotStarted);
    ensure!(second.status() == TaskStatus::NotStarted);
    Ok(())
}
