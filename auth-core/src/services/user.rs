use std::sync::Arc;

use crate::{
    models::User,
    services::{store::UserStore, ServiceError, ServiceResult},
    utils::validation::is_valid_uuid,
};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn get_by_id(&self, id: &str) -> ServiceResult<User> {
        if !is_valid_uuid(id) {
            return Err(ServiceError::InvalidId(id.to_string()));
        }

        self.users.find_by_id(id).await.map_err(|e| {
            if e.is_not_found() {
                ServiceError::NotFound
            } else {
                ServiceError::Storage(e)
            }
        })
    }
}
