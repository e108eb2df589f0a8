//! Numbering through the `PostgreSQL` task repository.

use super::helpers::{TestDatabase, planned, service_over, test_runtime};
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::Arc;
use tasklane::task::{
    domain::{ProjectId, Task, TaskNumber},
    ports::TaskRepositoryError,
    services::TaskServiceError,
};
use tokio::task::JoinSet;

fn number_of(task: &Task) -> String {
    task.number()
        .map(TaskNumber::as_str)
        .expect("stored task is numbered")
        .to_owned()
}

#[rstest]
fn sequential_creates_count_up_from_one(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "numbering_seq").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let numbers: Vec<String> = ["Excavate", "Pour", "Cure"]
        .into_iter()
        .map(|title| {
            let task = rt
                .block_on(service.create(planned(project, title)))
                .expect("create");
            number_of(&task)
        })
        .collect();
    let listed = rt
        .block_on(service.list_by_project(project))
        .expect("list");

    assert_eq!(numbers, ["001", "002", "003"]);
    assert_eq!(
        listed.iter().map(number_of).collect::<Vec<_>>(),
        ["001", "002", "003"]
    );
}

#[rstest]
fn concurrent_creates_across_pools_never_collide(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "numbering_race").expect("database");
    let project = ProjectId::new();
    let services: Vec<_> = (0..4)
        .map(|_| Arc::new(service_over(db.pool(2).expect("pool"))))
        .collect();
    let rt = test_runtime();

    let assigned = rt.block_on(async {
        let mut creates = JoinSet::new();
        for (index, service) in services.iter().cycle().take(16).enumerate() {
            let service = Arc::clone(service);
            creates.spawn(async move {
                service
                    .create(planned(project, &format!("Parallel task {index}")))
                    .await
            });
        }
        let mut numbers = BTreeSet::new();
        while let Some(joined) = creates.join_next().await {
            let task = joined.expect("join").expect("create");
            assert!(numbers.insert(number_of(&task)), "duplicate number");
        }
        numbers
    });

    let expected: BTreeSet<String> = (1..=16).map(|value| format!("{value:03}")).collect();
    assert_eq!(assigned, expected);
}

#[rstest]
fn numbering_resumes_from_live_maximum_after_soft_delete(
    shared_test_cluster: &'static TestCluster,
) {
    let db = TestDatabase::create(shared_test_cluster, "numbering_gap").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    rt.block_on(async {
        service.create(planned(project, "One")).await.expect("one");
        let two = service.create(planned(project, "Two")).await.expect("two");
        let three = service
            .create(planned(project, "Three"))
            .await
            .expect("three");

        service.delete(two.id()).await.expect("delete two");
        let four = service.create(planned(project, "Four")).await.expect("four");
        assert_eq!(number_of(&four), "004");

        service.delete(four.id()).await.expect("delete four");
        service.delete(three.id()).await.expect("delete three");
        let reused = service
            .create(planned(project, "Again"))
            .await
            .expect("again");
        assert_eq!(number_of(&reused), "002");
    });
}

#[rstest]
fn duplicate_explicit_number_maps_to_domain_error(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "numbering_dup").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    let result = rt.block_on(async {
        service
            .create(planned(project, "First").with_number("010"))
            .await
            .expect("first");
        service
            .create(planned(project, "Second").with_number("010"))
            .await
    });

    let Err(TaskServiceError::Repository(TaskRepositoryError::DuplicateTaskNumber {
        project_id,
        number,
    })) = result
    else {
        panic!("expected duplicate task number, got {result:?}");
    };
    assert_eq!(project_id, project);
    assert_eq!(number.as_str(), "010");
}

#[rstest]
fn deleted_number_may_be_reused_explicitly(shared_test_cluster: &'static TestCluster) {
    let db = TestDatabase::create(shared_test_cluster, "numbering_reuse").expect("database");
    let service = db.service().expect("service");
    let project = ProjectId::new();
    let rt = test_runtime();

    rt.block_on(async {
        let first = service
            .create(planned(project, "Original").with_number("042"))
            .await
            .expect("original");
        service.delete(first.id()).await.expect("delete");

        let replacement = service
            .create(planned(project, "Replacement").with_number("042"))
            .await
            .expect("replacement");
        assert_eq!(number_of(&replacement), "042");
    });
}
