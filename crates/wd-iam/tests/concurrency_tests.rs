//! Concurrent writers against a file-backed store
//!
//! Races are settled by the database: of several writers claiming the same
//! slot, one commits and the rest see a constraint violation.

use wd_config::DatabaseConfig;
use wd_iam::{Scope, ScopeKind, ScopeOptions, Store, User, UserOptions, Writer};

const WRITERS: usize = 8;

async fn file_store(dir: &tempfile::TempDir) -> Store {
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("warden.db").display()),
        max_connections: WRITERS as u32,
        create_schema: true,
    };
    Store::connect(&config).await.expect("file-backed store")
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_root_users_single_winner() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(&dir).await;

    let mut org = Scope::new(ScopeKind::Organization, ScopeOptions::new()).unwrap();
    store.create(&mut org).await.unwrap();

    let mut handles = Vec::with_capacity(WRITERS);
    for i in 0..WRITERS {
        let mut store = store.clone();
        let mut root = User::new(
            &org,
            UserOptions::new().as_root_user(true).with_name(format!("root-{i}")),
        )
        .unwrap();
        handles.push(tokio::spawn(async move { store.create(&mut root).await }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => created += 1,
            Err(err) => assert!(err.is_constraint(), "unexpected error: {err}"),
        }
    }
    assert_eq!(created, 1);

    let users = org.users(&mut store).await.unwrap();
    assert_eq!(users.len(), 1);
    assert!(users[0].is_root_user());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_writers_referencing_missing_owner() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = file_store(&dir).await;

    let mut org = Scope::new(ScopeKind::Organization, ScopeOptions::new()).unwrap();
    store.create(&mut org).await.unwrap();

    // Owner id that was never written.
    let missing_owner = 31_337;
    let mut handles = Vec::with_capacity(WRITERS);
    for _ in 0..WRITERS {
        let mut store = store.clone();
        let mut user = User::new(&org, UserOptions::new().with_owner_id(missing_owner)).unwrap();
        handles.push(tokio::spawn(async move { store.create(&mut user).await }));
    }

    for handle in handles {
        let err = handle.await.unwrap().unwrap_err();
        assert!(err.is_constraint(), "unexpected error: {err}");
    }
    assert!(org.users(&mut store).await.unwrap().is_empty());
}
