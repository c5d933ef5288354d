//! Scope persistence and resolution tests

mod common;

use wd_iam::{Reader, Scope, ScopeKind, ScopeOptions, Writer};

#[tokio::test]
async fn test_create_organization() {
    let mut store = common::store().await;
    let org = common::organization(&mut store).await;

    assert!(org.id != 0);
    assert_eq!(org.owner_id, 0);

    let loaded: Scope = store.lookup_by_id(org.id).await.unwrap().unwrap();
    assert_eq!(loaded.kind, ScopeKind::Organization);
    assert_eq!(loaded.public_id, org.public_id);
    assert_eq!(loaded.name.as_deref(), Some("acme"));
}

#[tokio::test]
async fn test_organization_has_no_owner() {
    let mut store = common::store().await;
    let org = common::organization(&mut store).await;

    let err = org.owner(&mut store).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_project_owner_is_persisted_user() {
    let mut store = common::store().await;
    let org = common::organization(&mut store).await;
    let root = common::root_user(&mut store, &org).await;
    let project = common::project(&mut store, &root).await;

    let owner = project.owner(&mut store).await.unwrap();
    assert_eq!(owner.id, root.id);
    assert!(owner.is_root_user());
}

#[tokio::test]
async fn test_project_with_missing_owner_is_constraint_error() {
    let mut store = common::store().await;
    let mut project =
        Scope::new(ScopeKind::Project, ScopeOptions::new().with_owner_id(999)).unwrap();

    let err = store.create(&mut project).await.unwrap_err();
    assert!(err.is_constraint(), "unexpected error: {err}");
    assert_eq!(project.id, 0);
}

#[tokio::test]
async fn test_project_owner_cannot_be_cleared() {
    let mut store = common::store().await;
    let org = common::organization(&mut store).await;
    let root = common::root_user(&mut store, &org).await;
    let mut project = common::project(&mut store, &root).await;

    project.owner_id = 0;
    let err = store.update(&mut project, &["owner_id"]).await.unwrap_err();
    assert!(err.is_constraint());
}

#[tokio::test]
async fn test_kind_is_immutable() {
    let mut store = common::store().await;
    let mut org = common::organization(&mut store).await;

    let err = store.update(&mut org, &["kind"]).await.unwrap_err();
    assert_eq!(err.code(), "INVALID_FIELD_MASK");
}

#[tokio::test]
async fn test_users_homed_in_scope() {
    let mut store = common::store().await;
    let org = common::organization(&mut store).await;
    let root = common::root_user(&mut store, &org).await;
    let user = common::owned_user(&mut store, &org, &root).await;

    let ids: Vec<u32> = org.users(&mut store).await.unwrap().iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![root.id, user.id]);
}
