//! Category masters through the `PostgreSQL` category repository.

use super::helpers::{TestDatabase, planned, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use tasklane::task::{
    domain::{CategoryAssignment, HierarchyMismatch, ProjectId, TaskValidationError},
    ports::CategoryRepositoryError,
    services::TaskServiceError,
};

#[rstest]
fn category_chain_is_stored_and_assigned(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "category_chain").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let (assignment, stored) = rt.block_on(async {
        let system = service
            .register_system_category(project, "ELEC", "Electrical")
            .await
            .expect("system");
        let major = service
            .register_major_category(system.id(), "LIGHT", "Lighting")
            .await
            .expect("major");
        let minor = service
            .register_minor_category(major.id(), "LED", "LED fittings")
            .await
            .expect("minor");
        let assignment = CategoryAssignment {
            system: Some(system.id()),
            major: Some(major.id()),
            minor: Some(minor.id()),
        };
        let task = service
            .create(planned(project, "Hang fittings").with_categories(assignment))
            .await
            .expect("create");
        let stored = service
            .find_by_id(task.id())
            .await
            .expect("find")
            .expect("task exists");
        (assignment, stored)
    });

    assert_eq!(stored.categories(), assignment);
}

#[rstest]
fn duplicate_code_under_same_parent_is_rejected(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "category_dup").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let (other_project, duplicate) = rt.block_on(async {
        service
            .register_system_category(project, "MECH", "Mechanical")
            .await
            .expect("first");
        let other_project = service
            .register_system_category(ProjectId::new(), "MECH", "Mechanical")
            .await;
        let duplicate = service
            .register_system_category(project, "MECH", "Mechanical again")
            .await;
        (other_project, duplicate)
    });

    assert!(other_project.is_ok());
    assert!(matches!(
        duplicate,
        Err(TaskServiceError::CategoryRepository(
            CategoryRepositoryError::DuplicateCode(ref code)
        )) if code == "MECH"
    ));
}

#[rstest]
fn minor_under_another_major_is_rejected(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "category_mismatch").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let result = rt.block_on(async {
        let system = service
            .register_system_category(project, "CIVIL", "Civil")
            .await
            .expect("system");
        let roads = service
            .register_major_category(system.id(), "ROAD", "Roads")
            .await
            .expect("roads");
        let drains = service
            .register_major_category(system.id(), "DRAIN", "Drainage")
            .await
            .expect("drains");
        let kerbs = service
            .register_minor_category(roads.id(), "KERB", "Kerbs")
            .await
            .expect("kerbs");
        service
            .create(planned(project, "Set kerbs").with_categories(CategoryAssignment {
                system: Some(system.id()),
                major: Some(drains.id()),
                minor: Some(kerbs.id()),
            }))
            .await
    });

    assert!(matches!(
        result,
        Err(TaskServiceError::Validation(TaskValidationError::HierarchyMismatch(
            HierarchyMismatch::MinorOutsideMajor { .. }
        )))
    ));
}
