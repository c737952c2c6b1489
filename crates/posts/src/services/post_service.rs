use natter_database::{DatabaseError, DocumentStore, Repository};
use tracing::{info, warn};

use crate::entities::{CreatePostRequest, Post, UpdatePostRequest};
use crate::types::{PostError, PostResult};

/// CRUD over the `posts` collection
#[derive(Clone)]
pub struct PostService {
    repository: Repository<Post>,
}

impl PostService {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            repository: Repository::new(store),
        }
    }

    pub async fn list_posts(&self) -> PostResult<Vec<Post>> {
        Ok(self.repository.list().await?)
    }

    pub async fn get_post(&self, post_id: &str) -> PostResult<Post> {
        self.repository
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| PostError::PostNotFound(post_id.to_string()))
    }

    pub async fn create_post(&self, request: CreatePostRequest) -> PostResult<Post> {
        request.validate()?;

        let post = self.repository.create(&request).await?;

        info!(post_id = %post.id, author_id = %post.author_id, "created post");
        Ok(post)
    }

    pub async fn update_post(&self, post_id: &str, request: UpdatePostRequest) -> PostResult<Post> {
        request.validate()?;

        if request.is_empty() {
            return self.get_post(post_id).await;
        }

        let post = self
            .repository
            .update(post_id, &request)
            .await
            .map_err(|e| with_id(post_id, e))?;

        info!(post_id = %post.id, "updated post");
        Ok(post)
    }

    pub async fn delete_post(&self, post_id: &str) -> PostResult<()> {
        self.repository
            .delete(post_id)
            .await
            .map_err(|e| with_id(post_id, e))?;

        warn!(post_id, "deleted post");
        Ok(())
    }

    pub async fn count_posts(&self) -> PostResult<usize> {
        Ok(self.repository.count().await?)
    }
}

fn with_id(post_id: &str, error: DatabaseError) -> PostError {
    match PostError::from(error) {
        PostError::PostNotFound(_) => PostError::PostNotFound(post_id.to_string()),
        other => other,
    }
}
