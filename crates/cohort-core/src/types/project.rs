use crate::types::enums::{MilestoneStatus, ProjectStatus};
use crate::types::ids::{CheckInId, FresherId, MilestoneId, ProjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub fresher_id: FresherId,
    pub assignment_branch: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: ProjectStatus,
    /// Percentage in `0.0..=100.0`, derived from milestone weights.
    pub progress: f64,
    pub milestones: Vec<Milestone>,
    pub check_ins: Vec<CheckIn>,
}

impl Project {
    pub fn completed_milestones(&self) -> usize {
        self.milestones
            .iter()
            .filter(|milestone| milestone.status == MilestoneStatus::Completed)
            .count()
    }

    /// Weighted completion percentage, or `None` when the milestones carry no weight.
    pub fn weighted_progress(&self) -> Option<f64> {
        let total: f64 = self.milestones.iter().map(|m| m.weight).sum();
        if total <= 0.0 {
            return None;
        }
        let completed: f64 = self
            .milestones
            .iter()
            .filter(|m| m.status == MilestoneStatus::Completed)
            .map(|m| m.weight)
            .sum();
        Some(completed / total * 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProject {
    pub id: ProjectId,
    pub fresher_id: FresherId,
    pub assignment_branch: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Milestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub weight: f64,
    pub status: MilestoneStatus,
    pub completed_date: Option<DateTime<Utc>>,
}

impl Milestone {
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == MilestoneStatus::Pending && self.due_date < now
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub id: MilestoneId,
    pub title: String,
    pub description: String,
    pub due_date: DateTime<Utc>,
    pub weight: f64,
}

impl From<NewMilestone> for Milestone {
    fn from(value: NewMilestone) -> Self {
        Self {
            id: value.id,
            title: value.title,
            description: value.description,
            due_date: value.due_date,
            weight: value.weight,
            status: MilestoneStatus::Pending,
            completed_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    pub id: CheckInId,
    pub date: DateTime<Utc>,
    /// Self-reported, not checked against milestone progress.
    pub progress: f64,
    pub notes: String,
    pub blockers: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectProgress<'a> {
    pub project: &'a Project,
    pub milestones: &'a [Milestone],
    pub recent_check_ins: &'a [CheckIn],
    pub overdue_milestones: Vec<&'a Milestone>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressReport<'a> {
    pub fresher_id: FresherId,
    pub total_projects: usize,
    pub average_progress: f64,
    pub milestones_completed: usize,
    pub total_milestones: usize,
    pub completion_rate: f64,
    pub projects: Vec<&'a Project>,
}
