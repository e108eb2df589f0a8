//! Column mapping and hierarchy queries of the `PostgreSQL` task repository.

use super::helpers::{TestDatabase, date, planned, service_over, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasklane::task::{
    adapters::postgres::PostgresTaskRepository,
    domain::{ProjectId, TaskStatus, TaskValidationError, UserId, WbsCode, WorkHours},
    ports::{TaskRepository, TaskRepositoryError},
    services::{AddDependencyRequest, TaskServiceError, UpdateTaskRequest},
};

#[rstest]
fn stored_fields_survive_a_round_trip(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "storage_fields").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let assignee = UserId::new();
    let rt = test_runtime();

    let created = rt
        .block_on(
            service.create(
                planned(project, "Fit windows")
                    .with_description("South elevation")
                    .with_assignee(assignee)
                    .with_actual_start(date(2025, 2, 3))
                    .with_hours(
                        WorkHours::from_hundredths(1_250).expect("hours"),
                        WorkHours::from_hours(4).expect("hours"),
                    )
                    .with_wbs("3.2", 2),
            ),
        )
        .expect("create");
    let stored = rt
        .block_on(service.find_by_id(created.id()))
        .expect("find")
        .expect("task exists");

    assert_eq!(stored.number(), created.number());
    assert_eq!(stored.description(), "South elevation");
    assert_eq!(stored.assignee(), Some(assignee));
    assert_eq!(stored.status(), TaskStatus::InProgress);
    assert_eq!(stored.schedule(), created.schedule());
    assert_eq!(stored.effort(), created.effort());
    assert_eq!(stored.wbs_code().map(WbsCode::as_str), Some("3.2"));
    assert_eq!(stored.level(), 2);
}

#[rstest]
fn cleared_actual_end_is_written_as_null(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "storage_null").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let stored = rt.block_on(async {
        let created = service
            .create(
                planned(project, "Glaze")
                    .with_actual_start(date(2025, 2, 2))
                    .with_actual_end(date(2025, 2, 6)),
            )
            .await
            .expect("create");
        service
            .update(created.id(), UpdateTaskRequest::new().with_actual_end(None))
            .await
            .expect("reopen");
        service
            .find_by_id(created.id())
            .await
            .expect("find")
            .expect("task exists")
    });

    assert_eq!(stored.schedule().actual_end(), None);
    assert_eq!(stored.status(), TaskStatus::InProgress);
}

#[rstest]
fn parent_query_terminates_on_stored_loop(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "storage_loop").expect("database");
    let pool = db.pool(2).expect("pool");
    let service = service_over(pool.clone());
    let repository = PostgresTaskRepository::new(pool);
    let project = ProjectId::new();
    let rt = test_runtime();

    rt.block_on(async {
        let mut first = service.create(planned(project, "First")).await.expect("first");
        let mut second = service
            .create(planned(project, "Second"))
            .await
            .expect("second");
        first.set_parent(Some(second.id()));
        second.set_parent(Some(first.id()));
        repository.update(&first).await.expect("link first");
        repository.update(&second).await.expect("link second");

        let links = repository.parent_links(first.id()).await.expect("links");
        assert_eq!(links.len(), 2);

        let result = service
            .create(planned(project, "Third").with_parent(first.id()))
            .await;
        assert!(matches!(
            result,
            Err(TaskServiceError::Validation(TaskValidationError::ParentCycle { .. }))
        ));
    });
}

#[rstest]
fn child_of_deleted_parent_stays_editable(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "storage_orphan").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let completed = rt.block_on(async {
        let parent = service
            .create(planned(project, "Scaffold"))
            .await
            .expect("parent");
        let child = service
            .create(planned(project, "Strike scaffold").with_parent(parent.id()))
            .await
            .expect("child");
        service.delete(parent.id()).await.expect("delete parent");
        service
            .update(
                child.id(),
                UpdateTaskRequest::new().with_actual_end(Some(date(2025, 2, 7))),
            )
            .await
            .expect("complete child")
    });

    assert_eq!(completed.status(), TaskStatus::Completed);
}

#[rstest]
fn dependency_pair_is_stored_once(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "storage_deps").expect("database");
    let pool = db.pool(1).expect("pool");
    let service = service_over(pool.clone());
    let repository = PostgresTaskRepository::new(pool);
    let project = ProjectId::new();
    let rt = test_runtime();

    rt.block_on(async {
        let before = service.create(planned(project, "Frame")).await.expect("frame");
        let after = service.create(planned(project, "Clad")).await.expect("clad");
        let request = AddDependencyRequest::new(before.id(), after.id()).with_lag_days(2);

        service.add_dependency(request).await.expect("first link");
        let again = service.add_dependency(request).await;

        assert!(matches!(
            again,
            Err(TaskServiceError::Repository(
                TaskRepositoryError::DuplicateDependency { .. }
            ))
        ));
        let stored = repository
            .find_dependencies(after.id())
            .await
            .expect("dependencies");
        assert_eq!(stored.len(), 1);
        assert!(stored.iter().all(|dependency| dependency.lag_days() == 2));
    });
}
