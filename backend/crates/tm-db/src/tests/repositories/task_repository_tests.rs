use crate::{TaskRepository, UserRepository};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};
use sqlx::{SqlitePool, migrate};
use tm_core::Role;

async fn setup_db() -> (SqlitePool, i64) {
    let pool = SqlitePool::connect(":memory:")
        .await
        .expect("Failed to create test database");

    migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    // Seed owner (FK)
    let users = UserRepository::new(pool.clone());
    let owner = users
        .create("owner@example.com", "owner", "$2b$04$hash", Role::User)
        .await
        .expect("Failed to seed owner");

    (pool, owner.id)
}

#[tokio::test]
async fn given_created_task_when_found_by_id_then_round_trips() {
    let (pool, owner_id) = setup_db().await;
    let repo = TaskRepository::new(pool);

    let created = repo
        .create(owner_id, "Write report", Some("quarterly numbers"))
        .await
        .unwrap();
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_that!(found.title.as_str(), eq("Write report"));
    assert_that!(found.description.as_deref(), some(eq("quarterly numbers")));
    assert_that!(found.done, eq(false));
    assert_that!(found.owner_id, eq(owner_id));
}

#[tokio::test]
async fn given_five_tasks_when_paginated_then_returns_page_in_id_order() {
    let (pool, owner_id) = setup_db().await;
    let repo = TaskRepository::new(pool);

    for i in 0..5 {
        repo.create(owner_id, &format!("task {}", i), None)
            .await
            .unwrap();
    }

    let page = repo.find_all(2, 2).await.unwrap();

    assert_that!(page.len(), eq(2));
    assert_that!(page[0].title.as_str(), eq("task 2"));
    assert_that!(page[1].title.as_str(), eq("task 3"));
}

#[tokio::test]
async fn given_updated_task_when_reloaded_then_changes_persisted() {
    let (pool, owner_id) = setup_db().await;
    let repo = TaskRepository::new(pool);

    let mut task = repo.create(owner_id, "Draft", None).await.unwrap();
    task.title = "Final".to_string();
    task.done = true;
    repo.update(&task).await.unwrap();

    let reloaded = repo.find_by_id(task.id).await.unwrap().unwrap();
    assert_that!(reloaded.title.as_str(), eq("Final"));
    assert_that!(reloaded.done, eq(true));
}

#[tokio::test]
async fn given_deleted_task_when_found_then_none() {
    let (pool, owner_id) = setup_db().await;
    let repo = TaskRepository::new(pool);

    let task = repo.create(owner_id, "Ephemeral", None).await.unwrap();
    let deleted = repo.delete(task.id).await.unwrap();

    assert_that!(deleted, eq(true));
    assert_that!(repo.find_by_id(task.id).await.unwrap(), none());
}

#[tokio::test]
async fn given_missing_task_when_deleted_then_reports_nothing_removed() {
    let (pool, _owner_id) = setup_db().await;
    let repo = TaskRepository::new(pool);

    let deleted = repo.delete(9999).await.unwrap();

    assert_that!(deleted, eq(false));
}
