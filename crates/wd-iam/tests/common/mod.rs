//! Shared fixtures for the IAM integration tests.

#![allow(dead_code)]

use wd_iam::{
    AuthMethod, AuthMethodKind, Group, GroupOptions, Scope, ScopeKind, ScopeOptions, Store,
    User, UserOptions, Writer,
};

pub async fn store() -> Store {
    Store::in_memory().await.expect("in-memory store")
}

pub async fn organization(store: &mut Store) -> Scope {
    let mut scope = Scope::new(ScopeKind::Organization, ScopeOptions::new().with_name("acme")).unwrap();
    store.create(&mut scope).await.unwrap();
    scope
}

pub async fn project(store: &mut Store, owner: &User) -> Scope {
    let mut scope = Scope::new(ScopeKind::Project, ScopeOptions::new().with_owner_id(owner.id)).unwrap();
    store.create(&mut scope).await.unwrap();
    scope
}

pub async fn root_user(store: &mut Store, scope: &Scope) -> User {
    let mut user = User::new(scope, UserOptions::new().as_root_user(true)).unwrap();
    store.create(&mut user).await.unwrap();
    user
}

pub async fn owned_user(store: &mut Store, scope: &Scope, owner: &User) -> User {
    let mut user = User::new(scope, UserOptions::new().with_owner_id(owner.id)).unwrap();
    store.create(&mut user).await.unwrap();
    user
}

pub async fn group(store: &mut Store, scope: &Scope, owner: &User) -> Group {
    let mut group = Group::new(scope, owner, GroupOptions::new()).unwrap();
    store.create(&mut group).await.unwrap();
    group
}

pub async fn auth_method(store: &mut Store, scope: &Scope, owner: &User) -> AuthMethod {
    let mut method = AuthMethod::new(scope, owner, AuthMethodKind::UserPass).unwrap();
    store.create(&mut method).await.unwrap();
    method
}

/// An external id no other test will collide with.
pub fn unique_external_id() -> String {
    format!("ext-{}", uuid::Uuid::new_v4().simple())
}
