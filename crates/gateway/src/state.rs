//! Shared application state for the gateway

use natter_database::DocumentStore;
use natter_posts::PostService;
use natter_users::UserService;

/// Services shared by every request handler
#[derive(Clone)]
pub struct GatewayState {
    pub store: DocumentStore,
    pub user_service: UserService,
    pub post_service: PostService,
}

impl GatewayState {
    pub fn new(store: DocumentStore) -> Self {
        Self {
            user_service: UserService::new(store.clone()),
            post_service: PostService::new(store.clone()),
            store,
        }
    }
}
