//! Repository tests against a migrated in-memory SQLite database.

use todo_api::infra::{UserRepository, UserStore};
use todo_api::{AppError, Config, Database};

const SECRET: &str = "test-secret-key-for-testing-only-32chars";

async fn user_store() -> UserStore {
    let config = Config::new("sqlite::memory:", SECRET)
        .expect("valid test config")
        .with_max_connections(1);
    let database = Database::connect(&config).await.expect("database connects");

    UserStore::new(database.connection().clone())
}

#[tokio::test]
async fn test_create_then_find_by_login() {
    let store = user_store().await;

    let created = store
        .create("alice".to_string(), "$argon2id$hash".to_string())
        .await
        .unwrap();
    let found = store.find_by_login("alice").await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.password_hash, "$argon2id$hash");
    assert!(store.find_by_login("bob").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_insert_maps_unique_violation_to_conflict() {
    let store = user_store().await;

    // Bypasses the service's existence check, as two racing registrations would
    store
        .create("alice".to_string(), "first-hash".to_string())
        .await
        .unwrap();
    let second = store
        .create("alice".to_string(), "second-hash".to_string())
        .await;

    assert!(matches!(second, Err(AppError::Conflict(_))), "{:?}", second);

    let kept = store.find_by_login("alice").await.unwrap().unwrap();
    assert_eq!(kept.password_hash, "first-hash");
}
