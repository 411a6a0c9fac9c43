use crate::{DbError, UserRepository};

use sqlx::{SqlitePool, migrate};
use tm_core::Role;

async fn setup_db() -> SqlitePool {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

#[tokio::test]
async fn given_created_user_when_found_by_email_then_round_trips() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let created = repo
        .create("a@example.com", "alice", "$2b$04$hash", Role::User)
        .await
        .unwrap();
    let found = repo.find_by_email("a@example.com").await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.username, "alice");
    assert_eq!(found.role, Role::User);
    assert!(found.is_active);
    assert!(!found.is_verified);
}

#[tokio::test]
async fn given_unknown_email_when_found_then_none() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let found = repo.find_by_email("nobody@example.com").await.unwrap();

    assert!(found.is_none());
}

#[tokio::test]
async fn given_duplicate_email_when_created_then_error() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    repo.create("a@example.com", "alice", "$2b$04$hash", Role::User)
        .await
        .unwrap();
    let result = repo
        .create("a@example.com", "alice2", "$2b$04$hash", Role::User)
        .await;

    assert!(matches!(result, Err(DbError::Sqlx { .. })));
}

#[tokio::test]
async fn given_updated_password_hash_when_reloaded_then_new_hash_returned() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let user = repo
        .create("a@example.com", "alice", "$2b$04$old", Role::User)
        .await
        .unwrap();
    repo.update_password_hash(user.id, "$2b$05$new").await.unwrap();

    let reloaded = repo.find_by_id(user.id).await.unwrap().unwrap();
    assert_eq!(reloaded.password_hash, "$2b$05$new");
}

#[tokio::test]
async fn given_admin_role_when_round_tripped_then_preserved() {
    let pool = setup_db().await;
    let repo = UserRepository::new(pool);

    let admin = repo
        .create("root@example.com", "root", "$2b$04$hash", Role::Admin)
        .await
        .unwrap();

    let reloaded = repo.find_by_id(admin.id).await.unwrap().unwrap();
    assert_eq!(reloaded.role, Role::Admin);
    assert!(reloaded.role.can_administer());
}
