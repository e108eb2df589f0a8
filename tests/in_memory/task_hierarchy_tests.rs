//! Parent chains and category masters through the in-memory adapters.

use super::helpers::{Harness, date, harness, planned, project};
use eyre::{bail, ensure};
use rstest::rstest;
use tasklane::task::{
    domain::{CategoryAssignment, ProjectId, TaskStatus, TaskValidationError},
    ports::{CategoryRepositoryError, TaskRepository},
    services::{TaskServiceError, UpdateTaskRequest},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn nested_tasks_can_be_reparented_within_a_tree(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let root = service.create(planned(project, "Building")).await?;
    let floor = service
        .create(planned(project, "Ground floor").with_parent(root.id()))
        .await?;
    let room = service
        .create(planned(project, "Kitchen").with_parent(floor.id()))
        .await?;

    let moved = service
        .update(room.id(), UpdateTaskRequest::new().with_parent(Some(root.id())))
        .await?;

    ensure!(moved.parent_id() == Some(root.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn child_of_deleted_parent_can_still_be_completed(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let parent = service.create(planned(project, "Demolition")).await?;
    let child = service
        .create(planned(project, "Strip plaster").with_parent(parent.id()))
        .await?;
    service.delete(parent.id()).await?;

    let completed = service
        .update(
            child.id(),
            UpdateTaskRequest::new().with_actual_end(Some(date(2025, 2, 5))),
        )
        .await?;

    ensure!(completed.status() == TaskStatus::Completed);
    ensure!(completed.parent_id() == Some(parent.id()));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_cannot_be_chosen_as_new_parent(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let retired = service.create(planned(project, "Retired scope")).await?;
    let task = service.create(planned(project, "Paint hall")).await?;
    service.delete(retired.id()).await?;

    let result = service
        .update(
            task.id(),
            UpdateTaskRequest::new().with_parent(Some(retired.id())),
        )
        .await;

    ensure!(matches!(
        result,
        Err(TaskServiceError::ParentNotFound(id)) if id == retired.id()
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_loop_is_detected_without_hanging(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let mut first = service.create(planned(project, "First")).await?;
    let mut second = service.create(planned(project, "Second")).await?;
    first.set_parent(Some(second.id()));
    second.set_parent(Some(first.id()));
    harness.repository.update(&first).await?;
    harness.repository.update(&second).await?;

    let links = harness.repository.parent_links(first.id()).await?;
    ensure!(links.len() == 2);

    let result = service
        .create(planned(project, "Third").with_parent(first.id()))
        .await;

    let Err(TaskServiceError::Validation(TaskValidationError::ParentCycle { revisited, .. })) =
        result
    else {
        bail!("expected parent cycle, got {result:?}");
    };
    ensure!(revisited == first.id());
    ensure!(service.list_by_project(project).await?.len() == 2);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn consistent_category_chain_is_persisted(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let system = service
        .register_system_category(project, "MECH", "Mechanical")
        .await?;
    let major = service
        .register_major_category(system.id(), "HVAC", "Heating and ventilation")
        .await?;
    let minor = service
        .register_minor_category(major.id(), "DUCT", "Ductwork")
        .await?;
    let assignment = CategoryAssignment {
        system: Some(system.id()),
        major: Some(major.id()),
        minor: Some(minor.id()),
    };

    let created = service
        .create(planned(project, "Run ducts").with_categories(assignment))
        .await?;

    let stored = service.find_by_id(created.id()).await?;
    ensure!(stored.map(|task| task.categories()) == Some(assignment));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn category_codes_are_unique_per_parent(
    harness: Harness,
    project: ProjectId,
) -> eyre::Result<()> {
    let service = &harness.service;
    let mech = service
        .register_system_category(project, "MECH", "Mechanical")
        .await?;
    let elec = service
        .register_system_category(project, "ELEC", "Electrical")
        .await?;
    service
        .register_major_category(mech.id(), "GEN", "General")
        .await?;

    let sibling = service
        .register_major_category(elec.id(), "GEN", "General")
        .await;
    let duplicate = service
        .register_major_category(mech.id(), "GEN", "General again")
        .await;

    ensure!(sibling.is_ok());
    ensure!(matches!(
        duplicate,
        Err(TaskServiceError::CategoryRepository(
            CategoryRepositoryError::DuplicateCode(ref code)
        )) if code == "GEN"
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn system_category_of_another_project_is_rejected(harness: Harness) -> eyre::Result<()> {
    let service = &harness.service;
    let owner = ProjectId::new();
    let other = ProjectId::new();
    let system = service
        .register_system_category(owner, "CIVIL", "Civil")
        .await?;

    let result = service
        .create(planned(other, "Borrowed category").with_categories(CategoryAssignment {
            system: Some(system.id()),
            ..CategoryAssignment::default()
        }))
        .await;

    ensure!(matches!(
        result,
        Err(TaskServiceError::Validation(
            TaskValidationError::HierarchyMismatch(_)
        ))
    ));
    Ok(())
}
