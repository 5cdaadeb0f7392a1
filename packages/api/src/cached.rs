//! Cache-aware facade over [`ApiClient`].
//!
//! | Query | Provides | Mutation | Invalidates |
//! |-------|----------|----------|-------------|
//! | profile | User | update profile, give consent | User |
//! | dashboard | Dashboard | log progress | Goal, Dashboard |
//! | active goals, progress history, streaks | Goal | assign patient | Patient |
//! | patients, all patients | Patient | assign goal | Goal, Patient |
//! | patient goals (per patient) | Goal | modify / delete goal | Goal |
//! | care schedule, overdue care | PreventiveCare | book care, reschedule | PreventiveCare, Dashboard |
//! | | | mark completed | PreventiveCare |
//!
//! Only successful mutations invalidate. Signing in or out clears everything.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;
use store::models::ProfileResponse;
use store::requests::{
    AssignGoalRequest, AssignPatientRequest, BookCareRequest, CompleteCareRequest,
    LogProgressRequest, LoginRequest, ModifyGoalRequest, ProgressHistoryQuery, RegisterRequest,
    RescheduleRequest, UpdateProfileRequest,
};
use store::{AuthResponse, DailyProgress, DashboardData, PreventiveCare, User, WellnessGoal};

use crate::cache::{QueryCache, Tag};
use crate::{ApiClient, ApiError, Result};

#[derive(Clone, Debug)]
pub struct CachedApi {
    client: ApiClient,
    cache: Arc<QueryCache>,
}

impl CachedApi {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// The uncached client, for calls that must always hit the network.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn query<T, F>(&self, key: &str, tags: &'static [Tag], fetch: F) -> Result<T>
    where
        T: Clone + Send + Sync + 'static,
        F: Future<Output = Result<T>>,
    {
        if let Some(hit) = self.cache.get::<T>(key) {
            tracing::trace!(key, "cache hit");
            return Ok(hit);
        }
        let seen = self.cache.generation(tags);
        let value = fetch.await.inspect_err(|e| self.drop_rejected_session(e))?;
        self.cache.insert_if_fresh(key, tags, value.clone(), seen);
        Ok(value)
    }

    async fn mutate<T, F>(&self, tags: &[Tag], request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let value = request.await.inspect_err(|e| self.drop_rejected_session(e))?;
        self.cache.invalidate(tags);
        Ok(value)
    }

    /// A 401 on an authenticated request means the token is no longer
    /// accepted: forget it along with everything fetched under it.
    fn drop_rejected_session(&self, err: &ApiError) {
        if !err.is_unauthorized() || !self.client.session().is_authenticated() {
            return;
        }
        tracing::warn!("Session rejected by the backend, signing out");
        self.cache.clear();
        if let Err(e) = self.client.session().clear() {
            tracing::warn!("Failed to clear session: {}", e);
        }
    }

    /// Sign in and start a fresh session.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let auth = self.client.login(credentials).await?;
        self.start_session(&auth)?;
        Ok(auth)
    }

    /// Create an account and sign straight into it.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let auth = self.client.register(request).await?;
        self.start_session(&auth)?;
        Ok(auth)
    }

    fn start_session(&self, auth: &AuthResponse) -> Result<()> {
        self.cache.clear();
        self.client.session().init(&auth.token, &auth.user)?;
        tracing::info!(role = auth.user.role.as_str(), "signed in");
        Ok(())
    }

    /// Tell the backend, then drop the local session whatever it answered.
    pub async fn logout(&self) -> Result<()> {
        if self.client.session().is_authenticated() {
            if let Err(e) = self.client.logout().await {
                tracing::warn!("logout request failed: {}", e);
            }
        }
        self.cache.clear();
        self.client.session().clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    pub async fn profile(&self) -> Result<User> {
        self.query("profile", &[Tag::User], self.client.profile())
            .await
    }

    /// Save the profile and refresh the stored user with what the backend returned.
    pub async fn update_profile(&self, request: &UpdateProfileRequest) -> Result<ProfileResponse> {
        let response = self
            .mutate(&[Tag::User], self.client.update_profile(request))
            .await?;
        self.client.session().update_user(&response.user)?;
        Ok(response)
    }

    pub async fn give_consent(&self) -> Result<Value> {
        self.mutate(&[Tag::User], self.client.give_consent()).await
    }

    pub async fn all_patients(&self) -> Result<Vec<User>> {
        self.query("all-patients", &[Tag::Patient], self.client.all_patients())
            .await
    }

    pub async fn dashboard(&self) -> Result<DashboardData> {
        self.query("dashboard", &[Tag::Dashboard], self.client.dashboard())
            .await
    }

    pub async fn active_goals(&self) -> Result<Vec<WellnessGoal>> {
        self.query("active-goals", &[Tag::Goal], self.client.active_goals())
            .await
    }

    pub async fn log_progress(&self, request: &LogProgressRequest) -> Result<Value> {
        self.mutate(&[Tag::Goal, Tag::Dashboard], self.client.log_progress(request))
            .await
    }

    pub async fn progress_history(
        &self,
        query: &ProgressHistoryQuery,
    ) -> Result<Vec<DailyProgress>> {
        let key = format!(
            "progress-history:{}:{}:{}",
            query.goal_id.as_deref().unwrap_or("*"),
            query.from.map(|d| d.to_string()).unwrap_or_default(),
            query.to.map(|d| d.to_string()).unwrap_or_default(),
        );
        self.query(&key, &[Tag::Goal], self.client.progress_history(query))
            .await
    }

    pub async fn streaks(&self) -> Result<Value> {
        self.query("streaks", &[Tag::Goal], self.client.streaks())
            .await
    }

    pub async fn patients(&self) -> Result<Vec<User>> {
        self.query("patients", &[Tag::Patient], self.client.patients())
            .await
    }

    pub async fn assign_patient(&self, request: &AssignPatientRequest) -> Result<Value> {
        self.mutate(&[Tag::Patient], self.client.assign_patient(request))
            .await
    }

    pub async fn assign_goal(&self, request: &AssignGoalRequest) -> Result<Value> {
        self.mutate(&[Tag::Goal, Tag::Patient], self.client.assign_goal(request))
            .await
    }

    pub async fn patient_goals(&self, patient_id: &str) -> Result<Vec<WellnessGoal>> {
        let key = format!("patient-goals:{patient_id}");
        self.query(&key, &[Tag::Goal], self.client.patient_goals(patient_id))
            .await
    }

    pub async fn modify_goal(&self, goal_id: &str, request: &ModifyGoalRequest) -> Result<Value> {
        self.mutate(&[Tag::Goal], self.client.modify_goal(goal_id, request))
            .await
    }

    pub async fn delete_goal(&self, goal_id: &str) -> Result<Value> {
        self.mutate(&[Tag::Goal], self.client.delete_goal(goal_id))
            .await
    }

    pub async fn care_schedule(&self) -> Result<Vec<PreventiveCare>> {
        self.query("care-schedule", &[Tag::PreventiveCare], self.client.care_schedule())
            .await
    }

    pub async fn overdue_care(&self) -> Result<Vec<PreventiveCare>> {
        self.query("care-overdue", &[Tag::PreventiveCare], self.client.overdue_care())
            .await
    }

    pub async fn book_care(&self, request: &BookCareRequest) -> Result<Value> {
        self.mutate(
            &[Tag::PreventiveCare, Tag::Dashboard],
            self.client.book_care(request),
        )
        .await
    }

    pub async fn mark_care_completed(
        &self,
        care_id: &str,
        request: &CompleteCareRequest,
    ) -> Result<Value> {
        self.mutate(
            &[Tag::PreventiveCare],
            self.client.mark_care_completed(care_id, request),
        )
        .await
    }

    pub async fn reschedule_care(&self, request: &RescheduleRequest) -> Result<Value> {
        self.mutate(
            &[Tag::PreventiveCare, Tag::Dashboard],
            self.client.reschedule_care(request),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::NaiveDate;
    use serde_json::json;
    use store::requests::{LogProgressRequest, LoginRequest, UpdateProfileRequest};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    use super::CachedApi;
    use crate::test_support::{goal_json, patient_json, sign_in, start_api_mock};

    fn log(goal_id: &str) -> LogProgressRequest {
        LogProgressRequest {
            goal_id: goal_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            actual_value: 4.0,
        }
    }

    #[tokio::test]
    async fn test_cached_read_hits_network_once() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("GET"))
            .and(path("/patients/active-goals"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([goal_json("g1")])))
            .expect(1)])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        let first = api.active_goals().await.unwrap();
        let second = api.active_goals().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_successful_mutation_refetches_tagged_reads() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/patients/active-goals"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([goal_json("g1")])))
                .expect(2),
            Mock::given(method("GET"))
                .and(path("/preventive-care/schedule"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .expect(1),
            Mock::given(method("POST"))
                .and(path("/patients/log-progress"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
                .expect(1),
        ])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        api.active_goals().await.unwrap();
        api.care_schedule().await.unwrap();
        api.log_progress(&log("g1")).await.unwrap();
        api.active_goals().await.unwrap();
        api.care_schedule().await.unwrap();
    }

    #[tokio::test]
    async fn test_read_racing_a_mutation_is_not_cached() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/patients/active-goals"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!([goal_json("g1")]))
                        .set_delay(Duration::from_millis(300)),
                )
                .expect(2),
            Mock::given(method("POST"))
                .and(path("/patients/log-progress"))
                .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
                .expect(1),
        ])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        let entry = log("g1");
        let (goals, logged) = tokio::join!(api.active_goals(), api.log_progress(&entry));
        goals.unwrap();
        logged.unwrap();
        assert!(api.cache().is_empty());

        api.active_goals().await.unwrap();
        assert_eq!(api.cache().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_mutation_keeps_cache() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/patients/active-goals"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([goal_json("g1")])))
                .expect(1),
            Mock::given(method("POST"))
                .and(path("/patients/log-progress"))
                .respond_with(
                    ResponseTemplate::new(400).set_body_json(json!({"error": "Goal is not active"})),
                ),
        ])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        api.active_goals().await.unwrap();
        let err = api.log_progress(&log("g1")).await.unwrap_err();
        assert_eq!(err.user_message("Failed to log progress"), "Goal is not active");
        assert_eq!(api.cache().len(), 1);
        api.active_goals().await.unwrap();
    }

    #[tokio::test]
    async fn test_patient_goals_cached_per_patient() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/providers/patients/p1/goals"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([goal_json("g1")])))
                .expect(1),
            Mock::given(method("GET"))
                .and(path("/providers/patients/p2/goals"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
                .expect(1),
        ])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        assert_eq!(api.patient_goals("p1").await.unwrap().len(), 1);
        assert!(api.patient_goals("p2").await.unwrap().is_empty());
        assert_eq!(api.patient_goals("p1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_login_starts_session_and_clears_cache() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/users/profile"))
                .respond_with(ResponseTemplate::new(200).set_body_json(patient_json()))
                .expect(2),
            Mock::given(method("POST"))
                .and(path("/auth/login"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(json!({"token": "fresh", "user": patient_json()})),
                ),
        ])
        .await;
        let api = CachedApi::new(client);

        api.profile().await.unwrap();
        api.login(&LoginRequest {
            email: "pat@example.org".to_string(),
            password: "hunter22".to_string(),
        })
        .await
        .unwrap();

        assert_eq!(api.client().session().token().as_deref(), Some("fresh"));
        assert!(api.cache().is_empty());
        api.profile().await.unwrap();
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_empty() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid credentials"})),
            )])
        .await;
        let api = CachedApi::new(client);

        let err = api
            .login(&LoginRequest {
                email: "pat@example.org".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!api.client().session().is_authenticated());
    }

    #[tokio::test]
    async fn test_rejected_token_signs_out() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/patients/dashboard"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
                .expect(1),
            Mock::given(method("GET"))
                .and(path("/patients/active-goals"))
                .respond_with(
                    ResponseTemplate::new(401).set_body_json(json!({"error": "Token expired"})),
                )
                .expect(1),
        ])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);
        api.dashboard().await.unwrap();

        let err = api.active_goals().await.unwrap_err();
        assert!(err.is_unauthorized());
        assert!(!api.client().session().is_authenticated());
        assert!(api.client().session().user().is_none());
        assert!(api.cache().is_empty());
    }

    #[tokio::test]
    async fn test_other_errors_keep_session() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/patients/log-progress"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden"})))
            .expect(1)])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        api.log_progress(&log("g1")).await.unwrap_err();
        assert!(api.client().session().is_authenticated());
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_backend_fails() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);
        let seen = api.cache().generation(&[crate::Tag::User]);
        api.cache()
            .insert_if_fresh("profile", &[crate::Tag::User], 1u32, seen);

        api.logout().await.unwrap();
        assert!(!api.client().session().is_authenticated());
        assert!(api.cache().is_empty());
    }

    #[tokio::test]
    async fn test_update_profile_refreshes_stored_user() {
        let mut updated = patient_json();
        updated["profile"]["firstName"] = json!("Patricia");
        let (_server, client) = start_api_mock(vec![Mock::given(method("PUT"))
            .and(path("/users/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"user": updated})))
            .expect(1)])
        .await;
        sign_in(&client, "t");
        let api = CachedApi::new(client);

        api.update_profile(&UpdateProfileRequest {
            first_name: "Patricia".to_string(),
            last_name: "Doe".to_string(),
            phone: String::new(),
            allergies: vec![],
            medications: vec![],
            emergency_contact: Default::default(),
        })
        .await
        .unwrap();

        let stored = api.client().session().user().unwrap();
        assert_eq!(stored.profile.first_name, "Patricia");
        assert_eq!(api.client().session().token().as_deref(), Some("t"));
    }
}
