//! `/patients` endpoints, scoped to the signed-in patient.

use serde_json::Value;
use store::requests::{LogProgressRequest, ProgressHistoryQuery};
use store::{DailyProgress, DashboardData, WellnessGoal};

use crate::{ApiClient, Result};

impl ApiClient {
    pub async fn dashboard(&self) -> Result<DashboardData> {
        self.get("/patients/dashboard").await
    }

    pub async fn active_goals(&self) -> Result<Vec<WellnessGoal>> {
        self.get("/patients/active-goals").await
    }

    pub async fn log_progress(&self, request: &LogProgressRequest) -> Result<Value> {
        self.post("/patients/log-progress", request).await
    }

    /// Logged days, optionally narrowed to one goal and a date range.
    pub async fn progress_history(
        &self,
        query: &ProgressHistoryQuery,
    ) -> Result<Vec<DailyProgress>> {
        self.get_with_query("/patients/progress-history", query)
            .await
    }

    pub async fn streaks(&self) -> Result<Value> {
        self.get("/patients/streaks").await
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;
    use store::requests::{LogProgressRequest, ProgressHistoryQuery};
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, Request, ResponseTemplate};

    use crate::test_support::{goal_json, sign_in, start_api_mock};

    #[tokio::test]
    async fn test_dashboard_decodes() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("GET"))
            .and(path("/patients/dashboard"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "activeGoals": 2,
                "todayProgress": [{
                    "_id": "p1",
                    "goalId": { "_id": "g1", "goalType": "steps", "unit": "steps" },
                    "date": "2024-03-05T00:00:00.000Z",
                    "targetValue": 10000,
                    "actualValue": 8500,
                    "achieved": false,
                    "completionPercentage": 85
                }],
                "upcomingCare": [],
                "healthTip": { "_id": "tip", "title": "Hydrate", "content": "Drink water", "category": "nutrition" }
            })))
            .expect(1)])
        .await;
        sign_in(&client, "t");

        let dashboard = client.dashboard().await.unwrap();
        assert_eq!(dashboard.active_goals, 2);
        assert_eq!(dashboard.today_progress[0].goal_id.id(), "g1");
        assert_eq!(dashboard.health_tip.unwrap().title, "Hydrate");
    }

    #[tokio::test]
    async fn test_log_progress_posts_exactly_once() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/patients/log-progress"))
            .and(body_json(json!({"goalId": "g1", "date": "2024-03-05", "actualValue": 8500.0})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"achieved": false})))
            .expect(1)])
        .await;
        sign_in(&client, "t");

        client
            .log_progress(&LogProgressRequest {
                goal_id: "g1".to_string(),
                date: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
                actual_value: 8500.0,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_progress_history_query_string() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("GET"))
            .and(path("/patients/progress-history"))
            .and(query_param("goalId", "g1"))
            .and(query_param("from", "2024-03-01"))
            .and(|req: &Request| !req.url.query().unwrap_or_default().contains("to="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)])
        .await;
        sign_in(&client, "t");

        let history = client
            .progress_history(&ProgressHistoryQuery {
                goal_id: Some("g1".to_string()),
                from: NaiveDate::from_ymd_opt(2024, 3, 1),
                to: None,
            })
            .await
            .unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_active_goals_and_streaks() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/patients/active-goals"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([goal_json("g1")]))),
            Mock::given(method("GET"))
                .and(path("/patients/streaks"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!([{"goalId": "g1", "currentStreak": 2}])),
                ),
        ])
        .await;
        sign_in(&client, "t");

        let goals = client.active_goals().await.unwrap();
        assert_eq!(goals[0].id, "g1");
        assert!(goals[0].accepts_progress());

        let streaks = client.streaks().await.unwrap();
        assert_eq!(streaks[0]["currentStreak"], 2);
    }
}
