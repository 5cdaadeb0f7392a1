//! # Domain models mirroring the wellness backend
//!
//! Every struct here is a read-only copy of a backend resource. They are
//! `Serialize + Deserialize` with camelCase field names so they can be decoded
//! straight from the REST API and cached in local storage.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`User`] | An account, discriminated by [`Role`], with an embedded [`Profile`] and role-specific [`PatientInfo`] / [`ProviderInfo`]. |
//! | [`WellnessGoal`] | A patient target with [`Targets`], a [`GoalDuration`] and server-computed [`GoalProgress`]. |
//! | [`DailyProgress`] | One day of logged progress against a goal. |
//! | [`PreventiveCare`] | A scheduled or completed checkup with [`CareStatus`] and [`Priority`]. |
//! | [`DashboardData`] | The patient dashboard bundle, including a [`HealthTip`]. |
//! | [`AuthResponse`] | `{ token, user }` returned by login and registration. |
//!
//! The backend sometimes populates references (a progress entry's `goalId` may be
//! the goal document itself), which is what [`GoalRef`] and [`DocumentRef`] absorb.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Provider,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Provider => "provider",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Patient => "Patient",
            Role::Provider => "Healthcare Provider",
        }
    }

    /// Parse the value of a role `<select>`.
    pub fn from_form(value: &str) -> Option<Role> {
        match value {
            "patient" => Some(Role::Patient),
            "provider" => Some(Role::Provider),
            _ => None,
        }
    }
}

/// A user account as returned by the backend.
///
/// Depending on the endpoint the identifier arrives as `id` or `_id`; use
/// [`User::id`] rather than either field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, rename = "id", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, rename = "_id", skip_serializing_if = "Option::is_none")]
    pub object_id: Option<String>,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_info: Option<PatientInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_info: Option<ProviderInfo>,
}

impl User {
    /// The backend identifier, preferring `_id`.
    pub fn id(&self) -> Option<&str> {
        self.object_id.as_deref().or(self.user_id.as_deref())
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.profile.first_name, self.profile.last_name)
            .trim()
            .to_string()
    }

    pub fn is_patient(&self) -> bool {
        self.role == Role::Patient
    }

    pub fn is_provider(&self) -> bool {
        self.role == Role::Provider
    }

    pub fn allergies(&self) -> &[String] {
        self.patient_info
            .as_ref()
            .map(|info| info.allergies.as_slice())
            .unwrap_or_default()
    }

    pub fn medications(&self) -> &[String] {
        self.patient_info
            .as_ref()
            .map(|info| info.medications.as_slice())
            .unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_provider: Option<DocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmergencyContact {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    #[serde(default)]
    pub license_number: String,
    #[serde(default)]
    pub specialization: String,
    #[serde(default)]
    pub patients: Vec<DocumentRef>,
}

/// A reference to another document: a bare id, or the populated document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DocumentRef {
    Id(String),
    Document {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl DocumentRef {
    pub fn id(&self) -> &str {
        match self {
            DocumentRef::Id(id) => id,
            DocumentRef::Document { id } => id,
        }
    }
}

/// Kind of wellness goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Steps,
    WaterIntake,
    SleepHours,
    ExerciseMinutes,
    WeightLoss,
}

impl GoalType {
    pub const ALL: [GoalType; 5] = [
        GoalType::Steps,
        GoalType::WaterIntake,
        GoalType::SleepHours,
        GoalType::ExerciseMinutes,
        GoalType::WeightLoss,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Steps => "steps",
            GoalType::WaterIntake => "water_intake",
            GoalType::SleepHours => "sleep_hours",
            GoalType::ExerciseMinutes => "exercise_minutes",
            GoalType::WeightLoss => "weight_loss",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Steps => "Steps",
            GoalType::WaterIntake => "Water Intake",
            GoalType::SleepHours => "Sleep Hours",
            GoalType::ExerciseMinutes => "Exercise Minutes",
            GoalType::WeightLoss => "Weight Loss",
        }
    }

    /// Unit preselected in the assign-goal form.
    pub fn default_unit(&self) -> &'static str {
        match self {
            GoalType::Steps => "steps",
            GoalType::WaterIntake => "liters",
            GoalType::SleepHours => "hours",
            GoalType::ExerciseMinutes => "minutes",
            GoalType::WeightLoss => "kg",
        }
    }

    pub fn from_form(value: &str) -> Option<GoalType> {
        GoalType::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Paused,
    Expired,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Completed => "completed",
            GoalStatus::Paused => "paused",
            GoalStatus::Expired => "expired",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub daily: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekly: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDuration {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub period_type: String,
}

/// Streak and completion statistics maintained by the backend.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    pub days_completed: u32,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub completion_rate: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellnessGoal {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<DocumentRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_by: Option<DocumentRef>,
    pub goal_type: GoalType,
    pub targets: Targets,
    pub unit: String,
    pub duration: GoalDuration,
    #[serde(default)]
    pub progress: GoalProgress,
    pub status: GoalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl WellnessGoal {
    /// Only active goals accept progress logs.
    pub fn accepts_progress(&self) -> bool {
        self.status == GoalStatus::Active
    }
}

/// The goal a progress entry belongs to, as an id or the populated goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GoalRef {
    Id(String),
    Populated(GoalSummary),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub goal_type: GoalType,
    #[serde(default)]
    pub unit: String,
}

impl GoalRef {
    pub fn id(&self) -> &str {
        match self {
            GoalRef::Id(id) => id,
            GoalRef::Populated(goal) => &goal.id,
        }
    }

    pub fn summary(&self) -> Option<&GoalSummary> {
        match self {
            GoalRef::Id(_) => None,
            GoalRef::Populated(goal) => Some(goal),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyProgress {
    #[serde(rename = "_id")]
    pub id: String,
    pub goal_id: GoalRef,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub target_value: f64,
    #[serde(default)]
    pub actual_value: f64,
    #[serde(default)]
    pub achieved: bool,
    #[serde(default)]
    pub completion_percentage: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareStatus {
    Scheduled,
    Completed,
    Missed,
    Overdue,
}

impl CareStatus {
    pub const ALL: [CareStatus; 4] = [
        CareStatus::Scheduled,
        CareStatus::Completed,
        CareStatus::Overdue,
        CareStatus::Missed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareStatus::Scheduled => "scheduled",
            CareStatus::Completed => "completed",
            CareStatus::Missed => "missed",
            CareStatus::Overdue => "overdue",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CareStatus::Scheduled => "Scheduled",
            CareStatus::Completed => "Completed",
            CareStatus::Missed => "Missed",
            CareStatus::Overdue => "Overdue",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }

    pub fn from_form(value: &str) -> Option<Priority> {
        Priority::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

/// Care types offered by the booking form, as `(value, label)`.
pub const CARE_TYPES: [(&str, &str); 5] = [
    ("annual_checkup", "Annual Checkup"),
    ("blood_test", "Blood Test"),
    ("vaccination", "Vaccination"),
    ("mammogram", "Mammogram"),
    ("colonoscopy", "Colonoscopy"),
];

/// Human label for a care type; unknown types keep their value with spaces.
pub fn care_type_label(care_type: &str) -> Cow<'_, str> {
    CARE_TYPES
        .iter()
        .find(|(value, _)| *value == care_type)
        .map(|(_, label)| Cow::Borrowed(*label))
        .unwrap_or_else(|| Cow::Owned(care_type.replace('_', " ")))
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreventiveCare {
    #[serde(rename = "_id")]
    pub id: String,
    pub care_type: String,
    pub scheduled_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
    pub status: CareStatus,
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HealthTip {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(default)]
    pub active_goals: u32,
    #[serde(default)]
    pub today_progress: Vec<DailyProgress>,
    #[serde(default)]
    pub upcoming_care: Vec<PreventiveCare>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_tip: Option<HealthTip>,
}

/// Body of a successful login or registration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

/// Body of a successful profile update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub user: User,
}
