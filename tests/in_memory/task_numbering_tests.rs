//! Numbering behaviour of tasks stored through the in-memory adapters.

use std::collections::HashSet;

use super::helpers::{Harness, date, harness, planned, project};
use eyre::ensure;
use mockable::DefaultClock;
use rstest::rstest;
use tasklane::task::{
    domain::{NumberingPolicy, ProjectId, Schedule, Task, TaskNumber, TaskTitle},
    ports::{TaskRepository, TaskRepositoryError},
};
use tokio::task::JoinSet;

fn numbers(tasks: &[Task]) -> Vec<String> {
    tasks
        .iter()
        .filter_map(|task| task.number().map(|number| number.as_str().to_owned()))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_creates_receive_distinct_sequential_numbers(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let mut creates = JoinSet::new();
    for index in 0..20 {
        let service = harness.service.clone();
        creates.spawn(async move {
            service
                .create(planned(project, &format!("Parallel task {index}")))
                .await
        });
    }

    let mut assigned = HashSet::new();
    while let Some(joined) = creates.join_next().await {
        let task = joined??;
        let number = task
            .number()
            .ok_or_else(|| eyre::eyre!("created task has no number"))?;
        ensure!(assigned.insert(number.as_str().to_owned()), "duplicate {number}");
    }

    let expected: HashSet<String> = (1..=20).map(|value| format!("{value:03}")).collect();
    ensure!(assigned == expected);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sequence_continues_past_padding_width(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    harness
        .service
        .create(planned(project, "Late entry").with_number("999"))
        .await?;

    let next = harness.service.create(planned(project, "Overflow")).await?;
    let after = harness.service.create(planned(project, "Beyond")).await?;

    ensure!(next.number().map(TaskNumber::as_str) == Some("1000"));
    ensure!(after.number().map(TaskNumber::as_str) == Some("1001"));
    let listed = harness.service.list_by_project(project).await?;
    ensure!(numbers(&listed) == ["999", "1000", "1001"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_numeric_maximum_restarts_sequence(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    harness
        .service
        .create(planned(project, "Imported").with_number("ZZ-9"))
        .await?;

    let generated = harness.service.create(planned(project, "Fresh")).await?;

    ensure!(generated.number().map(TaskNumber::as_str) == Some("001"));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_number_can_be_reused_explicitly(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let original = harness
        .service
        .create(planned(project, "Draft").with_number("042"))
        .await?;
    harness.service.delete(original.id()).await?;

    let replacement = harness
        .service
        .create(planned(project, "Final").with_number("042"))
        .await?;

    let found = harness
        .service
        .find_by_number(project, &TaskNumber::new("042")?)
        .await?;
    ensure!(found.map(|task| task.id()) == Some(replacement.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_rejects_unnumbered_explicit_store(harness: Harness, project: ProjectId) {
    let task = Task::new(
        project,
        TaskTitle::new("Unnumbered").expect("valid title"),
        Schedule::planned(date(2025, 3, 1), date(2025, 3, 2)),
        &DefaultClock,
    );

    let result = harness.repository.store(&task).await;

    assert!(matches!(
        result,
        Err(TaskRepositoryError::MissingTaskNumber(id)) if id == task.id()
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repository_numbering_uses_supplied_policy(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let task = Task::new(
        project,
        TaskTitle::new("Wide numbering")?,
        Schedule::planned(date(2025, 3, 1), date(2025, 3, 2)),
        &DefaultClock,
    );

    let stored = harness
        .repository
        .store_numbered(task, NumberingPolicy::new(5)?)
        .await?;

    ensure!(stored.number().map(TaskNumber::as_str) == Some("00001"));
    Ok(())
}
