//! `/users` endpoints.

use serde_json::Value;
use store::models::ProfileResponse;
use store::requests::UpdateProfileRequest;
use store::User;

use crate::{ApiClient, Result};

impl ApiClient {
    pub async fn profile(&self) -> Result<User> {
        self.get("/users/profile").await
    }

    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<ProfileResponse> {
        self.put("/users/profile", request).await
    }

    /// `POST /users/give-consent`; records consent for the signed-in user.
    pub async fn give_consent(&self) -> Result<Value> {
        self.post_empty("/users/give-consent").await
    }

    /// Every registered patient, assigned or not. Provider only.
    pub async fn all_patients(&self) -> Result<Vec<User>> {
        self.get("/users/all-patients").await
    }
}
