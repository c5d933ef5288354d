//! End-to-end ownership graph

mod common;

use wd_iam::{
    Group, GroupMember, GroupOptions, Scope, ScopeKind, ScopeOptions, User, UserOptions, Writer,
};

#[tokio::test]
async fn test_organization_project_group_membership() {
    let mut store = common::store().await;

    let mut org = Scope::new(ScopeKind::Organization, ScopeOptions::new()).unwrap();
    store.create(&mut org).await.unwrap();
    assert!(org.owner(&mut store).await.unwrap_err().is_not_found());

    let mut root = User::new(&org, UserOptions::new().as_root_user(true)).unwrap();
    store.create(&mut root).await.unwrap();
    assert_eq!(root.owner_id, 0);
    assert_eq!(root.primary_scope_id, org.id);

    let mut project =
        Scope::new(ScopeKind::Project, ScopeOptions::new().with_owner_id(root.id)).unwrap();
    store.create(&mut project).await.unwrap();
    assert_eq!(project.owner(&mut store).await.unwrap().id, root.id);

    let mut user = User::new(&org, UserOptions::new().with_owner_id(root.id)).unwrap();
    store.create(&mut user).await.unwrap();

    let mut group = Group::new(
        &org,
        &root,
        GroupOptions::new().with_description("this is a test group"),
    )
    .unwrap();
    store.create(&mut group).await.unwrap();
    assert_eq!(group.owner_id, root.id);
    assert_eq!(group.primary_scope_id, org.id);

    let mut member = GroupMember::new(&org, &group, &user).unwrap();
    store.create(&mut member).await.unwrap();

    let groups = user.groups(&mut store).await.unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id, group.id);
    assert_eq!(groups[0].description.as_deref(), Some("this is a test group"));
}
