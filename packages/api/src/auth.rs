//! `/auth` endpoints.

use store::requests::{LoginRequest, RegisterRequest};
use store::AuthResponse;

use crate::{ApiClient, Result};

impl ApiClient {
    /// `POST /auth/login`. Does not touch the session; callers decide when to `init` it.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        self.post("/auth/login", credentials).await
    }

    /// `POST /auth/register`.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        self.post("/auth/register", request).await
    }

    /// `POST /auth/logout`. The body of the answer is ignored.
    pub async fn logout(&self) -> Result<()> {
        let _: serde_json::Value = self.post_empty("/auth/logout").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;
    use store::requests::{LoginRequest, RegisterRequest};
    use store::Role;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use crate::test_support::{patient_json, sign_in, start_api_mock};

    #[tokio::test]
    async fn test_login_sends_credentials_once() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"email": "pat@example.org", "password": "hunter22"})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"token": "jwt-1", "user": patient_json()})),
            )
            .expect(1)])
        .await;

        let auth = client
            .login(&LoginRequest {
                email: "pat@example.org".to_string(),
                password: "hunter22".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(auth.token, "jwt-1");
        assert_eq!(auth.user.role, Role::Patient);
        assert!(client.session().token().is_none());
    }

    #[tokio::test]
    async fn test_register_payload_shape() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/auth/register"))
            .and(body_json(json!({
                "email": "pat@example.org",
                "password": "hunter22",
                "role": "patient",
                "firstName": "Pat",
                "lastName": "Doe",
                "dateOfBirth": "1990-04-12",
                "phone": "555-0100",
                "consentGiven": true
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!({"token": "jwt-2", "user": patient_json()})),
            )
            .expect(1)])
        .await;

        let auth = client
            .register(&RegisterRequest {
                email: "pat@example.org".to_string(),
                password: "hunter22".to_string(),
                role: Role::Patient,
                first_name: "Pat".to_string(),
                last_name: "Doe".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
                phone: "555-0100".to_string(),
                consent_given: true,
            })
            .await
            .unwrap();
        assert_eq!(auth.token, "jwt-2");
    }

    #[tokio::test]
    async fn test_register_conflict_message() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"error": "User already exists"})),
            )])
        .await;

        let err = client
            .register(&RegisterRequest {
                email: "pat@example.org".to_string(),
                password: "hunter22".to_string(),
                role: Role::Provider,
                first_name: "Pat".to_string(),
                last_name: "Doe".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
                phone: String::new(),
                consent_given: true,
            })
            .await
            .unwrap_err();
        assert_eq!(err.user_message("Registration failed"), "User already exists");
    }

    #[tokio::test]
    async fn test_logout_accepts_any_body() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Logged out"})),
            )
            .expect(1)])
        .await;
        sign_in(&client, "jwt-1");

        client.logout().await.unwrap();
    }
}
