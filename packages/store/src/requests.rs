//! Request bodies sent to the backend.
//!
//! Built by the form models in [`crate::forms`]; the API client only serializes
//! them. Field names follow the backend's camelCase convention.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{EmergencyContact, GoalStatus, GoalType, Priority, Role};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub phone: String,
    pub consent_given: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub emergency_contact: EmergencyContact,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogProgressRequest {
    pub goal_id: String,
    pub date: NaiveDate,
    pub actual_value: f64,
}

/// Query string for `GET /patients/progress-history`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressHistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignPatientRequest {
    pub patient_id: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DailyTarget {
    pub daily: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationRequest {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub period_type: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignGoalRequest {
    pub patient_id: String,
    pub goal_type: GoalType,
    pub targets: DailyTarget,
    pub unit: String,
    pub duration: DurationRequest,
    pub notes: String,
}

/// Partial update for `PUT /providers/goals/:id/modify`; absent fields are kept.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifyGoalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets: Option<DailyTarget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCareRequest {
    pub care_type: String,
    pub scheduled_date: DateTime<Utc>,
    pub priority: Priority,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteCareRequest {
    pub completed_date: DateTime<Utc>,
    pub notes: String,
}

impl CompleteCareRequest {
    /// Body sent by the "mark completed" button.
    pub fn completed_at(when: DateTime<Utc>) -> Self {
        Self {
            completed_date: when,
            notes: "Completed successfully".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescheduleRequest {
    pub care_id: String,
    pub scheduled_date: DateTime<Utc>,
}
