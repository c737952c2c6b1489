//! Integration tests for the users crate with a real SQLite document store

use natter_database::{connect, DatabaseConfig, DocumentStore};
use natter_users::{CreateUserRequest, UpdateUserRequest, UserError, UserService};
use tempfile::TempDir;

/// Helper function to create a file-backed test store
async fn create_test_store() -> (DocumentStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test_users.db");
    let config = DatabaseConfig::with_url(format!("sqlite://{}", db_path.display()));

    let store = connect(&config).await.expect("Failed to create test database");
    (store, temp_dir)
}

/// Helper function to create a valid user request
fn create_test_user_request() -> CreateUserRequest {
    CreateUserRequest {
        username: "testuser".to_string(),
        email: Some("test@example.com".to_string()),
        display_name: Some("Test User".to_string()),
        avatar_url: Some("https://example.com/avatar.jpg".to_string()),
        bio: Some("Test bio".to_string()),
    }
}

#[tokio::test]
async fn test_user_crud_operations_integration() {
    let (store, _temp_dir) = create_test_store().await;
    let service = UserService::new(store);

    // CREATE
    let created_user = service.create_user(create_test_user_request()).await.unwrap();

    assert!(!created_user.id.is_empty());
    assert_eq!(created_user.username, "testuser");
    assert_eq!(created_user.email, Some("test@example.com".to_string()));
    assert_eq!(created_user.display_name, Some("Test User".to_string()));

    // READ returns an identical document
    let found_user = service.get_user(&created_user.id).await.unwrap();
    assert_eq!(found_user, created_user);

    // UPDATE merges into the stored document
    let update_request = UpdateUserRequest {
        display_name: Some("Updated Test User".to_string()),
        bio: Some("Updated bio".to_string()),
        ..Default::default()
    };
    let updated_user = service
        .update_user(&created_user.id, update_request)
        .await
        .unwrap();

    assert_eq!(updated_user.id, created_user.id);
    assert_eq!(updated_user.username, "testuser");
    assert_eq!(updated_user.email, created_user.email);
    assert_eq!(updated_user.avatar_url, created_user.avatar_url);
    assert_eq!(updated_user.display_name, Some("Updated Test User".to_string()));
    assert_eq!(updated_user.bio, Some("Updated bio".to_string()));
    assert_eq!(updated_user.created_at, created_user.created_at);

    // DELETE
    service.delete_user(&created_user.id).await.unwrap();

    let delete_result = service.get_user(&created_user.id).await;
    assert!(matches!(delete_result, Err(UserError::UserNotFound(_))));
}

#[tokio::test]
async fn test_list_cardinality_after_creates_and_deletes() {
    let (store, _temp_dir) = create_test_store().await;
    let service = UserService::new(store);

    let mut created_user_ids = Vec::new();
    for username in ["alice", "bob", "charlie", "dave", "erin"] {
        let user = service
            .create_user(CreateUserRequest::new(username))
            .await
            .unwrap();
        created_user_ids.push(user.id);
    }

    for user_id in &created_user_ids[..2] {
        service.delete_user(user_id).await.unwrap();
    }

    let users = service.list_users().await.unwrap();
    assert_eq!(users.len(), 3);
    assert_eq!(service.count_users().await.unwrap(), 3);

    let remaining: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
    assert!(remaining.contains(&"charlie"));
    assert!(!remaining.contains(&"alice"));
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let (store, _temp_dir) = create_test_store().await;
    let service = UserService::new(store);

    let update = UpdateUserRequest {
        bio: Some("nobody".to_string()),
        ..Default::default()
    };

    assert!(matches!(
        service.update_user("does-not-exist", update).await,
        Err(UserError::UserNotFound(_))
    ));
    assert!(matches!(
        service.delete_user("does-not-exist").await,
        Err(UserError::UserNotFound(_))
    ));
    assert!(service.list_users().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_validation_integration() {
    let (store, _temp_dir) = create_test_store().await;
    let service = UserService::new(store);

    let invalid_email_request = CreateUserRequest {
        email: Some("invalid-email".to_string()),
        ..create_test_user_request()
    };
    assert!(matches!(
        service.create_user(invalid_email_request).await,
        Err(UserError::ValidationFailed(_))
    ));

    let user = service.create_user(create_test_user_request()).await.unwrap();
    let invalid_update = UpdateUserRequest {
        display_name: Some("   ".to_string()),
        ..Default::default()
    };
    assert!(matches!(
        service.update_user(&user.id, invalid_update).await,
        Err(UserError::ValidationFailed(_))
    ));

    // The failed update left the document untouched
    let unchanged = service.get_user(&user.id).await.unwrap();
    assert_eq!(unchanged, user);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_updates_do_not_fail_each_other() {
    let (store, _temp_dir) = create_test_store().await;
    let service = UserService::new(store);

    let mut user_ids = Vec::new();
    for n in 0..40 {
        let user = service
            .create_user(CreateUserRequest::new(format!("user_{n}")))
            .await
            .unwrap();
        user_ids.push(user.id);
    }

    let mut handles = Vec::new();
    for round in 0..5 {
        for user_id in &user_ids {
            let service = service.clone();
            let user_id = user_id.clone();
            handles.push(tokio::spawn(async move {
                let update = UpdateUserRequest {
                    bio: Some(format!("round {round}")),
                    ..Default::default()
                };
                service.update_user(&user_id, update).await
            }));
        }
    }

    let mut failures = Vec::new();
    for handle in handles {
        if let Err(error) = handle.await.unwrap() {
            failures.push(error.to_string());
        }
    }
    assert!(
        failures.is_empty(),
        "{} of 200 updates failed, first: {:?}",
        failures.len(),
        failures.first()
    );

    for user in service.list_users().await.unwrap() {
        assert!(user.bio.as_deref().is_some_and(|bio| bio.starts_with("round ")));
    }
}
