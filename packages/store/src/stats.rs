//! Summaries derived from fetched data for stat cards and badges.

use std::collections::HashMap;

use crate::models::{CareStatus, DailyProgress, DashboardData, PreventiveCare};

/// Coarse bucket for a completion percentage, used to colour progress bars.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressLevel {
    Good,
    Fair,
    Poor,
}

impl ProgressLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 80.0 {
            ProgressLevel::Good
        } else if percentage >= 50.0 {
            ProgressLevel::Fair
        } else {
            ProgressLevel::Poor
        }
    }
}

/// Counts shown on the patient dashboard.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TodaySummary {
    pub achieved: usize,
    pub in_progress: usize,
    pub not_started: usize,
    /// Mean completion percentage, rounded.
    pub average_percentage: u32,
}

impl TodaySummary {
    pub fn from_progress(progress: &[DailyProgress]) -> Self {
        let achieved = progress.iter().filter(|p| p.achieved).count();
        let in_progress = progress
            .iter()
            .filter(|p| !p.achieved && p.actual_value > 0.0)
            .count();
        let not_started = progress.iter().filter(|p| p.actual_value == 0.0).count();
        let total: f64 = progress.iter().map(|p| p.completion_percentage).sum();
        let average = total / progress.len().max(1) as f64;

        Self {
            achieved,
            in_progress,
            not_started,
            average_percentage: average.round().max(0.0) as u32,
        }
    }
}

impl DashboardData {
    pub fn today_summary(&self) -> TodaySummary {
        TodaySummary::from_progress(&self.today_progress)
    }
}

/// Number of care events per status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CareSummary {
    counts: HashMap<CareStatus, usize>,
}

impl CareSummary {
    pub fn from_schedule(schedule: &[PreventiveCare]) -> Self {
        let mut counts = HashMap::new();
        for care in schedule {
            *counts.entry(care.status).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn count(&self, status: CareStatus) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalRef, Priority};
    use chrono::{TimeZone, Utc};

    fn progress(actual: f64, achieved: bool, percentage: f64) -> DailyProgress {
        DailyProgress {
            id: format!("p-{actual}"),
            goal_id: GoalRef::Id("g".to_string()),
            date: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            target_value: 100.0,
            actual_value: actual,
            achieved,
            completion_percentage: percentage,
        }
    }

    #[test]
    fn test_today_summary_counts() {
        let entries = vec![
            progress(120.0, true, 100.0),
            progress(40.0, false, 40.0),
            progress(0.0, false, 0.0),
            progress(55.0, false, 55.0),
        ];
        let summary = TodaySummary::from_progress(&entries);
        assert_eq!(summary.achieved, 1);
        assert_eq!(summary.in_progress, 2);
        assert_eq!(summary.not_started, 1);
        // (100 + 40 + 0 + 55) / 4 = 48.75
        assert_eq!(summary.average_percentage, 49);
    }

    #[test]
    fn test_today_summary_empty() {
        assert_eq!(TodaySummary::from_progress(&[]), TodaySummary::default());
    }

    #[test]
    fn test_progress_levels() {
        assert_eq!(ProgressLevel::from_percentage(80.0), ProgressLevel::Good);
        assert_eq!(ProgressLevel::from_percentage(79.9), ProgressLevel::Fair);
        assert_eq!(ProgressLevel::from_percentage(50.0), ProgressLevel::Fair);
        assert_eq!(ProgressLevel::from_percentage(12.0), ProgressLevel::Poor);
    }

    #[test]
    fn test_care_summary() {
        let care = |id: &str, status| PreventiveCare {
            id: id.to_string(),
            care_type: "blood_test".to_string(),
            scheduled_date: Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap(),
            completed_date: None,
            status,
            priority: Priority::Medium,
            notes: None,
        };
        let summary = CareSummary::from_schedule(&[
            care("a", CareStatus::Scheduled),
            care("b", CareStatus::Scheduled),
            care("c", CareStatus::Missed),
        ]);
        assert_eq!(summary.count(CareStatus::Scheduled), 2);
        assert_eq!(summary.count(CareStatus::Missed), 1);
        assert_eq!(summary.count(CareStatus::Completed), 0);
    }
}
