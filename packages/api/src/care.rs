//! `/preventive-care` endpoints.

use serde_json::Value;
use store::requests::{BookCareRequest, CompleteCareRequest, RescheduleRequest};
use store::PreventiveCare;

use crate::{ApiClient, Result};

impl ApiClient {
    pub async fn care_schedule(&self) -> Result<Vec<PreventiveCare>> {
        self.get("/preventive-care/schedule").await
    }

    pub async fn book_care(&self, request: &BookCareRequest) -> Result<Value> {
        self.post("/preventive-care/book", request).await
    }

    pub async fn mark_care_completed(
        &self,
        care_id: &str,
        request: &CompleteCareRequest,
    ) -> Result<Value> {
        self.put(&format!("/preventive-care/{care_id}/complete"), request)
            .await
    }

    pub async fn overdue_care(&self) -> Result<Vec<PreventiveCare>> {
        self.get("/preventive-care/overdue").await
    }

    pub async fn reschedule_care(&self, request: &RescheduleRequest) -> Result<Value> {
        self.post("/preventive-care/reschedule", request).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use store::requests::{BookCareRequest, CompleteCareRequest, RescheduleRequest};
    use store::{CareStatus, Priority};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    use crate::test_support::{care_json, sign_in, start_api_mock};

    #[tokio::test]
    async fn test_book_care_posts_exactly_once() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("POST"))
            .and(path("/preventive-care/book"))
            .and(body_json(json!({
                "careType": "blood_test",
                "scheduledDate": "2024-05-01T09:00:00Z",
                "priority": "high",
                "notes": "fasting"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(care_json("c1", "scheduled")))
            .expect(1)])
        .await;
        sign_in(&client, "t");

        client
            .book_care(&BookCareRequest {
                care_type: "blood_test".to_string(),
                scheduled_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
                priority: Priority::High,
                notes: "fasting".to_string(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_mark_completed_body() {
        let (_server, client) = start_api_mock(vec![Mock::given(method("PUT"))
            .and(path("/preventive-care/c1/complete"))
            .and(body_json(json!({
                "completedDate": "2024-05-01T10:30:00Z",
                "notes": "Completed successfully"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(care_json("c1", "completed")))
            .expect(1)])
        .await;
        sign_in(&client, "t");

        let when = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();
        client
            .mark_care_completed("c1", &CompleteCareRequest::completed_at(when))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_schedule_overdue_and_reschedule() {
        let (_server, client) = start_api_mock(vec![
            Mock::given(method("GET"))
                .and(path("/preventive-care/schedule"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                    care_json("c1", "scheduled"),
                    care_json("c2", "completed")
                ]))),
            Mock::given(method("GET"))
                .and(path("/preventive-care/overdue"))
                .respond_with(
                    ResponseTemplate::new(200).set_body_json(json!([care_json("c3", "overdue")])),
                ),
            Mock::given(method("POST"))
                .and(path("/preventive-care/reschedule"))
                .and(body_json(json!({"careId": "c3", "scheduledDate": "2024-06-01T08:00:00Z"})))
                .respond_with(ResponseTemplate::new(200).set_body_json(care_json("c3", "scheduled")))
                .expect(1),
        ])
        .await;
        sign_in(&client, "t");

        let schedule = client.care_schedule().await.unwrap();
        assert_eq!(schedule[1].status, CareStatus::Completed);

        let overdue = client.overdue_care().await.unwrap();
        assert_eq!(overdue[0].status, CareStatus::Overdue);

        client
            .reschedule_care(&RescheduleRequest {
                care_id: "c3".to_string(),
                scheduled_date: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            })
            .await
            .unwrap();
    }
}
