//! # Form models and validation
//!
//! Each form keeps its inputs as the raw strings the DOM hands back, and
//! `submit` turns them into a typed request from [`crate::requests`] or the
//! first [`FormError`] found. Validation is deliberately shallow: required
//! fields, numeric parsing, and date ordering. Everything else is the
//! backend's call.
//!
//! Functions that depend on "now" take it as an argument so they stay pure.

use chrono::{
    DateTime, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};

use crate::models::{EmergencyContact, GoalType, Priority, Role, User};
use crate::requests::{
    AssignGoalRequest, BookCareRequest, DailyTarget, DurationRequest, LogProgressRequest,
    LoginRequest, ProgressHistoryQuery, RegisterRequest, RescheduleRequest,
    UpdateProfileRequest,
};

/// Validation failure; the `Display` text is what the error banner shows.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("Please enter a valid email")]
    InvalidEmail,
    #[error("You must agree to the terms and conditions")]
    ConsentRequired,
    #[error("{0} must be a number")]
    NotANumber(&'static str),
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{0} is not a valid date")]
    InvalidDate(&'static str),
    #[error("End date must be after the start date")]
    EndBeforeStart,
    #[error("Scheduled date cannot be in the past")]
    InThePast,
    #[error("Patient ID is missing")]
    MissingPatient,
}

fn required(value: &str, field: &'static str) -> Result<String, FormError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(value.to_string())
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, FormError> {
    let value = required(value, field)?;
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|_| FormError::InvalidDate(field))
}

/// Parse a `datetime-local` input, with or without seconds.
fn parse_date_time(value: &str, field: &'static str) -> Result<NaiveDateTime, FormError> {
    let value = required(value, field)?;
    NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| FormError::InvalidDate(field))
}

fn parse_number(value: &str, field: &'static str) -> Result<f64, FormError> {
    let value = required(value, field)?;
    value
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .ok_or(FormError::NotANumber(field))
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Append a trimmed tag unless it is blank or already present.
pub fn add_tag(tags: &mut Vec<String>, value: &str) -> bool {
    let value = value.trim();
    if value.is_empty() || tags.iter().any(|t| t == value) {
        return false;
    }
    tags.push(value.to_string());
    true
}

pub fn remove_tag(tags: &mut Vec<String>, value: &str) {
    tags.retain(|t| t != value);
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn submit(&self) -> Result<LoginRequest, FormError> {
        Ok(LoginRequest {
            email: required(&self.email, "Email")?,
            password: required(&self.password, "Password")?,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub phone: String,
    pub consent_given: bool,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role: Role::Patient,
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            phone: String::new(),
            consent_given: false,
        }
    }
}

impl RegisterForm {
    pub fn submit(&self) -> Result<RegisterRequest, FormError> {
        let email = required(&self.email, "Email")?;
        if !email.contains('@') {
            return Err(FormError::InvalidEmail);
        }
        let password = required(&self.password, "Password")?;
        let first_name = required(&self.first_name, "First name")?;
        let last_name = required(&self.last_name, "Last name")?;
        let date_of_birth = parse_date(&self.date_of_birth, "Date of birth")?;
        let phone = required(&self.phone, "Phone")?;
        if !self.consent_given {
            return Err(FormError::ConsentRequired);
        }

        Ok(RegisterRequest {
            email,
            password,
            role: self.role,
            first_name,
            last_name,
            date_of_birth,
            phone,
            consent_given: true,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub allergies: Vec<String>,
    pub medications: Vec<String>,
    pub emergency_contact: EmergencyContact,
}

impl ProfileForm {
    /// Prefill from the signed-in user.
    pub fn from_user(user: &User) -> Self {
        let info = user.patient_info.clone().unwrap_or_default();
        Self {
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            phone: user.profile.phone.clone().unwrap_or_default(),
            allergies: info.allergies,
            medications: info.medications,
            emergency_contact: info.emergency_contact.unwrap_or_default(),
        }
    }

    pub fn submit(&self) -> Result<UpdateProfileRequest, FormError> {
        Ok(UpdateProfileRequest {
            first_name: required(&self.first_name, "First name")?,
            last_name: required(&self.last_name, "Last name")?,
            phone: self.phone.trim().to_string(),
            allergies: self.allergies.clone(),
            medications: self.medications.clone(),
            emergency_contact: EmergencyContact {
                name: self.emergency_contact.name.trim().to_string(),
                phone: self.emergency_contact.phone.trim().to_string(),
            },
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogProgressForm {
    pub date: String,
    pub actual_value: String,
}

impl LogProgressForm {
    /// Empty form dated `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            actual_value: "0".to_string(),
        }
    }

    pub fn submit(&self, goal_id: &str) -> Result<LogProgressRequest, FormError> {
        let date = parse_date(&self.date, "Date")?;
        let actual_value = parse_number(&self.actual_value, "Actual value")?;
        if actual_value < 0.0 {
            return Err(FormError::Negative("Actual value"));
        }
        Ok(LogProgressRequest {
            goal_id: goal_id.to_string(),
            date,
            actual_value,
        })
    }
}

/// Length of an assigned goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GoalPeriod {
    OneMonth,
    ThreeMonths,
    /// End date entered explicitly.
    Custom,
}

impl GoalPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalPeriod::OneMonth => "1_month",
            GoalPeriod::ThreeMonths => "3_months",
            GoalPeriod::Custom => "custom",
        }
    }

    pub fn from_form(value: &str) -> Option<GoalPeriod> {
        match value {
            "1_month" => Some(GoalPeriod::OneMonth),
            "3_months" => Some(GoalPeriod::ThreeMonths),
            "custom" => Some(GoalPeriod::Custom),
            _ => None,
        }
    }

    fn months(&self) -> Option<u32> {
        match self {
            GoalPeriod::OneMonth => Some(1),
            GoalPeriod::ThreeMonths => Some(3),
            GoalPeriod::Custom => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AssignGoalForm {
    pub goal_type: GoalType,
    pub daily_target: String,
    pub unit: String,
    pub start_date: String,
    pub period: GoalPeriod,
    /// Only read when `period` is [`GoalPeriod::Custom`].
    pub end_date: String,
    pub notes: String,
}

impl AssignGoalForm {
    /// Fixed-length goal starting `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            goal_type: GoalType::Steps,
            daily_target: String::new(),
            unit: GoalType::Steps.default_unit().to_string(),
            start_date: today.format("%Y-%m-%d").to_string(),
            period: GoalPeriod::OneMonth,
            end_date: String::new(),
            notes: String::new(),
        }
    }

    /// Goal with an explicit end date and no start prefilled.
    pub fn custom() -> Self {
        Self {
            goal_type: GoalType::Steps,
            daily_target: String::new(),
            unit: GoalType::Steps.default_unit().to_string(),
            start_date: String::new(),
            period: GoalPeriod::Custom,
            end_date: String::new(),
            notes: String::new(),
        }
    }

    /// Switch the goal type and reset the unit to its default.
    pub fn set_goal_type(&mut self, goal_type: GoalType) {
        self.goal_type = goal_type;
        self.unit = goal_type.default_unit().to_string();
    }

    pub fn submit(&self, patient_id: Option<&str>) -> Result<AssignGoalRequest, FormError> {
        let patient_id = patient_id
            .filter(|id| !id.is_empty())
            .ok_or(FormError::MissingPatient)?;
        let daily = parse_number(&self.daily_target, "Daily target")?;
        if daily <= 0.0 {
            return Err(FormError::NotPositive("Daily target"));
        }
        let unit = required(&self.unit, "Unit")?;
        let start = parse_date(&self.start_date, "Start date")?;
        let end = match self.period.months() {
            Some(months) => start
                .checked_add_months(Months::new(months))
                .ok_or(FormError::InvalidDate("End date"))?,
            None => parse_date(&self.end_date, "End date")?,
        };
        if end <= start {
            return Err(FormError::EndBeforeStart);
        }

        Ok(AssignGoalRequest {
            patient_id: patient_id.to_string(),
            goal_type: self.goal_type,
            targets: DailyTarget { daily },
            unit,
            duration: DurationRequest {
                start_date: start_of_day(start),
                end_date: start_of_day(end),
                period_type: self.period.as_str().to_string(),
            },
            notes: self.notes.trim().to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BookCareForm {
    pub care_type: String,
    /// Value of a `datetime-local` input, in the user's local time.
    pub scheduled_at: String,
    pub priority: Priority,
    pub notes: String,
}

impl Default for BookCareForm {
    fn default() -> Self {
        Self {
            care_type: "annual_checkup".to_string(),
            scheduled_at: String::new(),
            priority: Priority::Medium,
            notes: String::new(),
        }
    }
}

/// `now` as local wall-clock time, cut to the minute a `datetime-local`
/// input can express.
fn current_minute(now: &DateTime<FixedOffset>) -> NaiveDateTime {
    let local = now.naive_local();
    local
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(local)
}

/// Interpret a local wall-clock time in the offset of `now`.
fn to_utc(local: NaiveDateTime, now: &DateTime<FixedOffset>) -> Result<DateTime<Utc>, FormError> {
    now.offset()
        .from_local_datetime(&local)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or(FormError::InvalidDate("Scheduled date"))
}

impl BookCareForm {
    /// The submit button stays disabled until a date is picked.
    pub fn is_ready(&self) -> bool {
        !self.scheduled_at.trim().is_empty()
    }

    pub fn submit(&self, now: DateTime<FixedOffset>) -> Result<BookCareRequest, FormError> {
        let care_type = required(&self.care_type, "Care type")?;
        let local = parse_date_time(&self.scheduled_at, "Scheduled date")?;
        if local < current_minute(&now) {
            return Err(FormError::InThePast);
        }
        Ok(BookCareRequest {
            care_type,
            scheduled_date: to_utc(local, &now)?,
            priority: self.priority,
            notes: self.notes.trim().to_string(),
        })
    }
}

/// Move an existing care event to a new local date-time.
pub fn reschedule(
    care_id: &str,
    scheduled_at: &str,
    now: DateTime<FixedOffset>,
) -> Result<RescheduleRequest, FormError> {
    let local = parse_date_time(scheduled_at, "Scheduled date")?;
    if local < current_minute(&now) {
        return Err(FormError::InThePast);
    }
    Ok(RescheduleRequest {
        care_id: care_id.to_string(),
        scheduled_date: to_utc(local, &now)?,
    })
}

/// Build a progress-history query from optional `YYYY-MM-DD` bounds.
pub fn history_query(
    goal_id: Option<&str>,
    from: &str,
    to: &str,
) -> Result<ProgressHistoryQuery, FormError> {
    let from = (!from.trim().is_empty())
        .then(|| parse_date(from, "From"))
        .transpose()?;
    let to = (!to.trim().is_empty())
        .then(|| parse_date(to, "To"))
        .transpose()?;
    if let (Some(from), Some(to)) = (from, to) {
        if to < from {
            return Err(FormError::EndBeforeStart);
        }
    }
    Ok(ProgressHistoryQuery {
        goal_id: goal_id.map(str::to_string),
        from,
        to,
    })
}
