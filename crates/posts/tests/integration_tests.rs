//! Integration tests for the posts crate

use natter_database::{connect, DatabaseConfig, DocumentStore};
use natter_posts::{CreatePostRequest, PostError, PostService, UpdatePostRequest};
use tempfile::TempDir;

async fn create_test_store() -> (DocumentStore, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test_posts.db");
    let config = DatabaseConfig::with_url(format!("sqlite://{}", db_path.display()));

    let store = connect(&config).await.expect("Failed to create test database");
    (store, temp_dir)
}

fn sample_post(author_id: &str) -> CreatePostRequest {
    CreatePostRequest {
        author_id: author_id.to_string(),
        title: Some("First!".to_string()),
        content: "Hello, everyone".to_string(),
    }
}

#[tokio::test]
async fn test_post_crud_round_trip() {
    let (store, _temp_dir) = create_test_store().await;
    let service = PostService::new(store);

    let created = service.create_post(sample_post("author-1")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.author_id, "author-1");

    let fetched = service.get_post(&created.id).await.unwrap();
    assert_eq!(fetched, created);

    let updated = service
        .update_post(
            &created.id,
            UpdatePostRequest {
                content: Some("Edited".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.content, "Edited");
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.author_id, created.author_id);

    service.delete_post(&created.id).await.unwrap();
    assert!(matches!(
        service.get_post(&created.id).await,
        Err(PostError::PostNotFound(_))
    ));
}

#[tokio::test]
async fn test_author_reference_is_not_resolved() {
    let (store, _temp_dir) = create_test_store().await;
    let service = PostService::new(store);

    // No user with this id exists; the post is still accepted.
    let post = service
        .create_post(CreatePostRequest::new("no-such-user", "orphaned"))
        .await
        .unwrap();
    assert_eq!(post.author_id, "no-such-user");
    assert!(post.title.is_none());
}

#[tokio::test]
async fn test_list_cardinality() {
    let (store, _temp_dir) = create_test_store().await;
    let service = PostService::new(store);

    let mut ids = Vec::new();
    for n in 0..4 {
        let post = service
            .create_post(CreatePostRequest::new("author-1", format!("post {n}")))
            .await
            .unwrap();
        ids.push(post.id);
    }
    service.delete_post(&ids[1]).await.unwrap();

    let posts = service.list_posts().await.unwrap();
    assert_eq!(posts.len(), 3);
    assert!(posts.iter().all(|p| p.id != ids[1]));
}

#[tokio::test]
async fn test_validation_and_not_found() {
    let (store, _temp_dir) = create_test_store().await;
    let service = PostService::new(store);

    assert!(matches!(
        service.create_post(CreatePostRequest::new("", "content")).await,
        Err(PostError::ValidationFailed(_))
    ));
    assert!(matches!(
        service.create_post(CreatePostRequest::new("author-1", "   ")).await,
        Err(PostError::ValidationFailed(_))
    ));

    let post = service.create_post(sample_post("author-1")).await.unwrap();
    assert!(matches!(
        service
            .update_post(
                &post.id,
                UpdatePostRequest {
                    author_id: Some(String::new()),
                    ..Default::default()
                },
            )
            .await,
        Err(PostError::ValidationFailed(_))
    ));

    assert!(matches!(
        service
            .update_post(
                "missing",
                UpdatePostRequest {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await,
        Err(PostError::PostNotFound(id)) if id == "missing"
    ));
    assert!(matches!(
        service.delete_post("missing").await,
        Err(PostError::PostNotFound(_))
    ));
}
