//! Workspace state persistence against `PostgreSQL`.

use std::sync::Arc;

use crate::postgres::helpers::{
    CleanupGuard, concurrent_runtime, email, scope, setup_state_repository, test_runtime,
    unique_db_name,
};
use atelier::role::domain::{Caller, Role, WorkspaceScope};
use atelier::state::domain::{StateDocument, WorkspaceState};
use atelier::state::ports::StateRepository;
use atelier::state::services::StateService;
use chrono::Utc;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
fn upsert_round_trips_the_document(
    scope: WorkspaceScope,
    shared_test_cluster: &'static TestCluster,
) {
    let db_name = unique_db_name("test_state_round_trip");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_state_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    assert!(
        rt.block_on(repo.find(&scope))
            .expect("find should succeed")
            .is_none()
    );

    let payload = json!({
        "view": "board",
        "filters": {"done": false, "labels": ["a", "b"]},
        "tasks": [{"id": 1, "assigneeEmail": "ann@x.com"}]
    });
    for document in [json!({"view": "list"}), payload.clone()] {
        rt.block_on(repo.upsert(&WorkspaceState {
            scope: scope.clone(),
            document: StateDocument::try_from(document).expect("document should be valid"),
            updated_at: Utc::now(),
        }))
        .expect("upsert should succeed");
    }

    let stored = rt
        .block_on(repo.find(&scope))
        .expect("find should succeed")
        .expect("state should exist");
    assert_eq!(stored.scope, scope);
    assert_eq!(stored.document.into_value(), payload);
}

#[rstest]
fn concurrent_member_writes_keep_every_members_tasks(
    scope: WorkspaceScope,
    shared_test_cluster: &'static TestCluster,
) {
    let db_name = unique_db_name("test_state_merge");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_state_repository(shared_test_cluster, &db_name).expect("repository setup");
    let service = StateService::new(Arc::new(repo), Arc::new(DefaultClock));
    let members: Vec<String> = (0..8).map(|index| format!("user{index}@x.com")).collect();
    let rt = concurrent_runtime();

    let admin = Caller::new(None, Role::Admin);
    rt.block_on(service.put(
        &scope,
        json!({"view": "board", "tasks": [{"assigneeEmail": "boss@x.com"}]}),
        &admin,
    ))
    .expect("seed write should succeed");

    let writes: Vec<_> = members
        .iter()
        .map(|member| {
            let writer = service.clone();
            let workspace = scope.clone();
            let caller = Caller::new(Some(email(member)), Role::Member);
            let state = json!({"tasks": [{"assigneeEmail": member}]});
            rt.spawn(async move { writer.put(&workspace, state, &caller).await })
        })
        .collect();
    for handle in writes {
        rt.block_on(handle)
            .expect("task should join")
            .expect("member write should succeed");
    }

    let snapshot = rt
        .block_on(service.get(&scope, &admin))
        .expect("read should succeed");
    let mut owners: Vec<String> = snapshot
        .document
        .and_then(|document| document.tasks().and_then(Value::as_array).cloned())
        .expect("tasks should be stored")
        .iter()
        .filter_map(|task| task.get("assigneeEmail").and_then(Value::as_str))
        .map(str::to_owned)
        .collect();
    owners.sort();

    let mut expected = members;
    expected.push("boss@x.com".to_owned());
    expected.sort();
    assert_eq!(owners, expected);
}
