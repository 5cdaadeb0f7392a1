//! Helpers for testing endpoints against a wiremock server.

use serde_json::{json, Value};
use store::{MemoryStore, Session, User};
use wiremock::{Mock, MockServer};

use crate::ApiClient;

/// Start a mock backend with `mocks` registered and a signed-out client for it.
///
/// Keep the returned server alive until the test ends, otherwise `Mock::expect`
/// is never verified.
pub(crate) async fn start_api_mock(mocks: Vec<Mock>) -> (MockServer, ApiClient) {
    let server = MockServer::start().await;

    for mock in mocks {
        server.register(mock).await;
    }

    let client = ApiClient::new(&server.uri(), Session::load(MemoryStore::new()));
    (server, client)
}

/// Put a patient session with `token` into the client's session.
pub(crate) fn sign_in(client: &ApiClient, token: &str) {
    let user: User = serde_json::from_value(patient_json()).expect("fixture decodes");
    client
        .session()
        .init(token, &user)
        .expect("memory store never fails");
}

pub(crate) fn patient_json() -> Value {
    json!({
        "id": "pat-1",
        "email": "pat@example.org",
        "role": "patient",
        "profile": { "firstName": "Pat", "lastName": "Doe", "phone": "555-0100" },
        "patientInfo": { "allergies": ["Peanuts"], "medications": [] }
    })
}

pub(crate) fn provider_json() -> Value {
    json!({
        "_id": "doc-1",
        "email": "dr@example.org",
        "role": "provider",
        "profile": { "firstName": "Grey", "lastName": "House" },
        "providerInfo": { "licenseNumber": "MD-42", "specialization": "Internal", "patients": ["pat-1"] }
    })
}

pub(crate) fn goal_json(id: &str) -> Value {
    json!({
        "_id": id,
        "patientId": "pat-1",
        "assignedBy": "doc-1",
        "goalType": "steps",
        "targets": { "daily": 10000 },
        "unit": "steps",
        "duration": {
            "startDate": "2024-03-01T00:00:00.000Z",
            "endDate": "2024-04-01T00:00:00.000Z",
            "periodType": "1_month"
        },
        "progress": {
            "currentStreak": 2,
            "longestStreak": 5,
            "daysCompleted": 6,
            "totalDays": 10,
            "completionRate": 60
        },
        "status": "active"
    })
}

pub(crate) fn care_json(id: &str, status: &str) -> Value {
    json!({
        "_id": id,
        "careType": "blood_test",
        "scheduledDate": "2024-05-01T09:00:00.000Z",
        "status": status,
        "priority": "medium"
    })
}
