//! Role assignment persistence against `PostgreSQL`.

use crate::postgres::helpers::{
    CleanupGuard, email, scope, setup_role_repository, test_runtime, unique_db_name,
};
use atelier::role::domain::{Role, RoleAssignment, WorkspaceScope};
use atelier::role::ports::RoleRepository;
use mockable::DefaultClock;
use pg_embedded_setup_unpriv::TestCluster;
use pg_embedded_setup_unpriv::test_support::shared_test_cluster;
use rstest::rstest;

#[rstest]
fn repeat_upsert_keeps_id_and_created_at(
    scope: WorkspaceScope,
    shared_test_cluster: &'static TestCluster,
) {
    let db_name = unique_db_name("test_role_upsert");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_role_repository(shared_test_cluster, &db_name).expect("repository setup");
    let clock = DefaultClock;
    let rt = test_runtime();

    let first = rt
        .block_on(repo.upsert(&RoleAssignment::new(
            scope.clone(),
            email("ann@x.com"),
            Role::Member,
            &clock,
        )))
        .expect("first upsert should succeed");
    let second = rt
        .block_on(repo.upsert(&RoleAssignment::new(
            scope.clone(),
            email("ann@x.com"),
            Role::Manager,
            &clock,
        )))
        .expect("second upsert should succeed");

    assert_eq!(second.id(), first.id());
    assert_eq!(second.created_at(), first.created_at());
    assert_eq!(second.role(), Role::Manager);
    assert!(second.updated_at() >= first.updated_at());

    let rows = rt.block_on(repo.list(&scope)).expect("list should succeed");
    assert_eq!(rows.len(), 1);
}

#[rstest]
fn list_orders_rows_by_role_then_email(
    scope: WorkspaceScope,
    shared_test_cluster: &'static TestCluster,
) {
    let db_name = unique_db_name("test_role_order");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_role_repository(shared_test_cluster, &db_name).expect("repository setup");
    let clock = DefaultClock;
    let rt = test_runtime();

    for (address, role) in [
        ("zed@x.com", Role::Member),
        ("bob@x.com", Role::Manager),
        ("amy@x.com", Role::Member),
        ("yan@x.com", Role::Admin),
    ] {
        rt.block_on(repo.upsert(&RoleAssignment::new(
            scope.clone(),
            email(address),
            role,
            &clock,
        )))
        .expect("upsert should succeed");
    }
    let other = WorkspaceScope::from_parts("loc-1", "ws-2").expect("valid scope");
    rt.block_on(repo.upsert(&RoleAssignment::new(
        other,
        email("abe@x.com"),
        Role::Admin,
        &clock,
    )))
    .expect("upsert should succeed");

    let listed: Vec<(Role, String)> = rt
        .block_on(repo.list(&scope))
        .expect("list should succeed")
        .iter()
        .map(|row| (row.role(), row.user_email().as_str().to_owned()))
        .collect();

    assert_eq!(
        listed,
        vec![
            (Role::Admin, "yan@x.com".to_owned()),
            (Role::Manager, "bob@x.com".to_owned()),
            (Role::Member, "amy@x.com".to_owned()),
            (Role::Member, "zed@x.com".to_owned()),
        ]
    );
}

#[rstest]
fn remove_reports_whether_a_row_was_deleted(
    scope: WorkspaceScope,
    shared_test_cluster: &'static TestCluster,
) {
    let db_name = unique_db_name("test_role_remove");
    let _guard = CleanupGuard::new(shared_test_cluster, db_name.clone());
    let repo = setup_role_repository(shared_test_cluster, &db_name).expect("repository setup");
    let rt = test_runtime();

    rt.block_on(repo.upsert(&RoleAssignment::new(
        scope.clone(),
        email("ann@x.com"),
        Role::Admin,
        &DefaultClock,
    )))
    .expect("upsert should succeed");

    assert!(
        rt.block_on(repo.remove(&scope, &email("ann@x.com")))
            .expect("remove should succeed")
    );
    assert!(
        !rt.block_on(repo.remove(&scope, &email("ann@x.com")))
            .expect("second remove should succeed")
    );
    assert!(
        rt.block_on(repo.find(&scope, &email("ann@x.com")))
            .expect("find should succeed")
            .is_none()
    );
}
