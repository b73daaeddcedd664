//! Weighted milestone progress for fresher projects.

use crate::types::{
    CheckIn, FresherId, Milestone, MilestoneId, MilestoneStatus, NewMilestone, NewProject,
    ProgressReport, Project, ProjectId, ProjectProgress, ProjectStatus,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// How many check-ins `get_project_progress` reports, newest last.
pub const RECENT_CHECK_INS: usize = 5;

#[derive(Debug, Clone, Default)]
pub struct ProgressTracker {
    projects: Vec<Project>,
    /// Milestone id to the project that owns it.
    milestone_index: HashMap<MilestoneId, ProjectId>,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking a project. An existing project with the same id is
    /// replaced in place.
    pub fn create_project(&mut self, input: NewProject) -> &Project {
        let project = Project {
            id: input.id,
            fresher_id: input.fresher_id,
            assignment_branch: input.assignment_branch,
            start_date: input.start_date,
            end_date: input.end_date,
            status: ProjectStatus::InProgress,
            progress: 0.0,
            milestones: Vec::new(),
            check_ins: Vec::new(),
        };
        let index = match self.projects.iter().position(|p| p.id == project.id) {
            Some(index) => {
                for milestone in &self.projects[index].milestones {
                    self.milestone_index.remove(&milestone.id);
                }
                self.projects[index] = project;
                index
            }
            None => {
                self.projects.push(project);
                self.projects.len() - 1
            }
        };
        &self.projects[index]
    }

    pub fn project(&self, id: &ProjectId) -> Option<&Project> {
        self.projects.iter().find(|p| &p.id == id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn milestone(&self, id: &MilestoneId) -> Option<&Milestone> {
        let project_id = self.milestone_index.get(id)?;
        self.project(project_id)?
            .milestones
            .iter()
            .rev()
            .find(|m| &m.id == id)
    }

    /// Appends a pending milestone to `project_id`. Returns `None` and changes
    /// nothing when the project is unknown.
    pub fn add_milestone(&mut self, project_id: &ProjectId, input: NewMilestone) -> Option<&Milestone> {
        let Some(project) = self.projects.iter_mut().find(|p| &p.id == project_id) else {
            tracing::debug!(%project_id, milestone_id = %input.id, "add_milestone ignored unknown project");
            return None;
        };
        self.milestone_index
            .insert(input.id.clone(), project_id.clone());
        project.milestones.push(Milestone::from(input));
        project.milestones.last()
    }

    /// Marks a milestone completed now and recomputes its project's progress.
    pub fn complete_milestone(&mut self, milestone_id: &MilestoneId) -> Option<&Project> {
        self.complete_milestone_at(milestone_id, Utc::now())
    }

    pub fn complete_milestone_at(
        &mut self,
        milestone_id: &MilestoneId,
        now: DateTime<Utc>,
    ) -> Option<&Project> {
        let Some(project_id) = self.milestone_index.get(milestone_id) else {
            tracing::debug!(%milestone_id, "complete_milestone ignored unknown milestone");
            return None;
        };
        let project = self.projects.iter_mut().find(|p| &p.id == project_id)?;
        // A repeated id resolves to its latest registration.
        let milestone = project
            .milestones
            .iter_mut()
            .rev()
            .find(|m| &m.id == milestone_id)?;
        milestone.status = MilestoneStatus::Completed;
        milestone.completed_date = Some(now);

        match project.weighted_progress() {
            Some(progress) => project.progress = progress,
            None => tracing::warn!(
                project_id = %project.id,
                "milestones carry no weight; progress left unchanged"
            ),
        }
        tracing::info!(
            project_id = %project.id,
            %milestone_id,
            progress = project.progress,
            "milestone completed"
        );
        Some(&*project)
    }

    /// Appends a check-in to `project_id`. Returns `None` and changes nothing
    /// when the project is unknown.
    pub fn add_check_in(&mut self, project_id: &ProjectId, check_in: CheckIn) -> Option<&CheckIn> {
        let Some(project) = self.projects.iter_mut().find(|p| &p.id == project_id) else {
            tracing::debug!(%project_id, check_in_id = %check_in.id, "add_check_in ignored unknown project");
            return None;
        };
        project.check_ins.push(check_in);
        project.check_ins.last()
    }

    pub fn get_project_progress(&self, project_id: &ProjectId) -> Option<ProjectProgress<'_>> {
        self.get_project_progress_at(project_id, Utc::now())
    }

    /// Progress snapshot as seen at `now`. Overdue milestones are pending ones
    /// due strictly before `now`.
    pub fn get_project_progress_at(
        &self,
        project_id: &ProjectId,
        now: DateTime<Utc>,
    ) -> Option<ProjectProgress<'_>> {
        let project = self.project(project_id)?;
        let recent_start = project.check_ins.len().saturating_sub(RECENT_CHECK_INS);
        Some(ProjectProgress {
            project,
            milestones: &project.milestones,
            recent_check_ins: &project.check_ins[recent_start..],
            overdue_milestones: project
                .milestones
                .iter()
                .filter(|m| m.is_overdue(now))
                .collect(),
        })
    }

    /// Aggregates every project owned by `fresher_id`, or `None` if there are
    /// none. The average is over projects, not weighted by milestone count.
    pub fn generate_progress_report(&self, fresher_id: &FresherId) -> Option<ProgressReport<'_>> {
        let projects: Vec<&Project> = self
            .projects
            .iter()
            .filter(|p| &p.fresher_id == fresher_id)
            .collect();
        if projects.is_empty() {
            return None;
        }

        let average_progress =
            projects.iter().map(|p| p.progress).sum::<f64>() / projects.len() as f64;
        let milestones_completed: usize = projects.iter().map(|p| p.completed_milestones()).sum();
        let total_milestones: usize = projects.iter().map(|p| p.milestones.len()).sum();
        let completion_rate = if total_milestones > 0 {
            milestones_completed as f64 / total_milestones as f64 * 100.0
        } else {
            0.0
        };

        Some(ProgressReport {
            fresher_id: fresher_id.clone(),
            total_projects: projects.len(),
            average_progress,
            milestones_completed,
            total_milestones,
            completion_rate,
            projects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::parse_timestamp;
    use crate::types::CheckInId;
    use chrono::Duration;

    fn pid(id: &str) -> ProjectId {
        ProjectId::new(id).unwrap()
    }

    fn mid(id: &str) -> MilestoneId {
        MilestoneId::new(id).unwrap()
    }

    fn fid(id: &str) -> FresherId {
        FresherId::new(id).unwrap()
    }

    fn new_project(id: &str, fresher: &str) -> NewProject {
        NewProject {
            id: pid(id),
            fresher_id: fid(fresher),
            assignment_branch: "frontend-development".to_string(),
            start_date: parse_timestamp("2024-01-15").unwrap(),
            end_date: parse_timestamp("2024-02-15").unwrap(),
        }
    }

    fn new_milestone(id: &str, due: &str, weight: f64) -> NewMilestone {
        NewMilestone {
            id: mid(id),
            title: id.to_string(),
            description: String::new(),
            due_date: parse_timestamp(due).unwrap(),
            weight,
        }
    }

    fn check_in(n: usize) -> CheckIn {
        CheckIn {
            id: CheckInId::new(format!("check_in_{n}")).unwrap(),
            date: Utc::now(),
            progress: n as f64,
            notes: String::new(),
            blockers: String::new(),
        }
    }

    fn weighted_tracker() -> ProgressTracker {
        let mut tracker = ProgressTracker::new();
        tracker.create_project(new_project("project_1", "fresher_1"));
        for (n, weight) in [10.0, 15.0, 25.0, 20.0, 30.0].into_iter().enumerate() {
            tracker
                .add_milestone(
                    &pid("project_1"),
                    new_milestone(&format!("milestone_{}", n + 1), "2024-01-20", weight),
                )
                .unwrap();
        }
        tracker
    }

    #[test]
    fn new_project_starts_empty() {
        let mut tracker = ProgressTracker::new();
        let project = tracker.create_project(new_project("p", "f"));
        assert_eq!(project.progress, 0.0);
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert!(project.milestones.is_empty());
        assert!(project.check_ins.is_empty());
    }

    #[test]
    fn progress_follows_completed_weight() {
        let mut tracker = weighted_tracker();
        tracker.complete_milestone(&mid("milestone_1")).unwrap();
        let project = tracker.complete_milestone(&mid("milestone_2")).unwrap();
        assert_eq!(project.progress, 25.0);

        for id in ["milestone_3", "milestone_4", "milestone_5"] {
            tracker.complete_milestone(&mid(id)).unwrap();
        }
        assert_eq!(tracker.project(&pid("project_1")).unwrap().progress, 100.0);
    }

    #[test]
    fn completion_stamps_date() {
        let mut tracker = weighted_tracker();
        let now = parse_timestamp("2024-01-19T08:00:00").unwrap();
        tracker.complete_milestone_at(&mid("milestone_1"), now);
        let milestone = tracker.milestone(&mid("milestone_1")).unwrap();
        assert_eq!(milestone.status, MilestoneStatus::Completed);
        assert_eq!(milestone.completed_date, Some(now));
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut tracker = weighted_tracker();
        assert!(tracker
            .add_milestone(&pid("nope"), new_milestone("m", "2024-01-01", 1.0))
            .is_none());
        assert!(tracker.milestone(&mid("m")).is_none());
        assert!(tracker.complete_milestone(&mid("nope")).is_none());
        assert!(tracker.add_check_in(&pid("nope"), check_in(1)).is_none());
        assert!(tracker.get_project_progress(&pid("nope")).is_none());
        assert_eq!(tracker.project(&pid("project_1")).unwrap().progress, 0.0);
    }

    #[test]
    fn zero_weight_leaves_progress_unchanged() {
        let mut tracker = ProgressTracker::new();
        tracker.create_project(new_project("p", "f"));
        tracker.add_milestone(&pid("p"), new_milestone("m", "2024-01-01", 0.0));
        let project = tracker.complete_milestone(&mid("m")).unwrap();
        assert_eq!(project.progress, 0.0);
        assert!(!project.progress.is_nan());
    }

    #[test]
    fn only_last_five_check_ins_are_recent() {
        let mut tracker = weighted_tracker();
        for n in 1..=7 {
            tracker.add_check_in(&pid("project_1"), check_in(n));
        }
        let progress = tracker.get_project_progress(&pid("project_1")).unwrap();
        let ids: Vec<&str> = progress
            .recent_check_ins
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(
            ids,
            vec!["check_in_3", "check_in_4", "check_in_5", "check_in_6", "check_in_7"]
        );
        assert_eq!(progress.project.check_ins.len(), 7);
    }

    #[test]
    fn overdue_lists_only_pending_past_due() {
        let now = Utc::now();
        let past = (now - Duration::days(2)).to_rfc3339();
        let future = (now + Duration::days(2)).to_rfc3339();

        let mut tracker = ProgressTracker::new();
        tracker.create_project(new_project("p", "f"));
        tracker.add_milestone(&pid("p"), new_milestone("late", &past, 1.0));
        tracker.add_milestone(&pid("p"), new_milestone("done", &past, 1.0));
        tracker.add_milestone(&pid("p"), new_milestone("upcoming", &future, 1.0));
        tracker.complete_milestone(&mid("done"));

        let progress = tracker.get_project_progress_at(&pid("p"), now).unwrap();
        let overdue: Vec<&str> = progress
            .overdue_milestones
            .iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(overdue, vec!["late"]);
        assert_eq!(progress.milestones.len(), 3);
    }

    #[test]
    fn due_exactly_now_is_not_overdue() {
        let due = parse_timestamp("2024-01-20").unwrap();
        let mut tracker = ProgressTracker::new();
        tracker.create_project(new_project("p", "f"));
        tracker.add_milestone(&pid("p"), new_milestone("m", "2024-01-20", 1.0));
        let progress = tracker.get_project_progress_at(&pid("p"), due).unwrap();
        assert!(progress.overdue_milestones.is_empty());
    }

    #[test]
    fn report_is_absent_without_projects() {
        let tracker = weighted_tracker();
        assert!(tracker.generate_progress_report(&fid("fresher_9")).is_none());
    }

    #[test]
    fn report_averages_over_projects() {
        let mut tracker = weighted_tracker();
        tracker.complete_milestone(&mid("milestone_1"));
        tracker.complete_milestone(&mid("milestone_2"));
        tracker.create_project(new_project("project_2", "fresher_1"));
        tracker.add_milestone(&pid("project_2"), new_milestone("solo", "2024-03-01", 5.0));
        tracker.complete_milestone(&mid("solo"));
        tracker.create_project(new_project("project_3", "fresher_2"));

        let report = tracker.generate_progress_report(&fid("fresher_1")).unwrap();
        assert_eq!(report.total_projects, 2);
        assert_eq!(report.average_progress, 62.5);
        assert_eq!(report.milestones_completed, 3);
        assert_eq!(report.total_milestones, 6);
        assert_eq!(report.completion_rate, 50.0);
        assert_eq!(report.projects.len(), 2);
    }

    #[test]
    fn report_rate_is_zero_without_milestones() {
        let mut tracker = ProgressTracker::new();
        tracker.create_project(new_project("p", "f"));
        let report = tracker.generate_progress_report(&fid("f")).unwrap();
        assert_eq!(report.total_milestones, 0);
        assert_eq!(report.completion_rate, 0.0);
        assert_eq!(report.average_progress, 0.0);
    }

    #[test]
    fn repeated_milestone_id_resolves_to_latest() {
        let mut tracker = ProgressTracker::new();
        tracker.create_project(new_project("p", "f"));
        tracker.add_milestone(&pid("p"), new_milestone("m", "2024-01-01", 10.0));
        tracker.add_milestone(&pid("p"), new_milestone("m", "2024-01-01", 90.0));

        assert_eq!(tracker.milestone(&mid("m")).unwrap().weight, 90.0);
        let project = tracker.complete_milestone(&mid("m")).unwrap();
        assert_eq!(project.progress, 90.0);
        assert_eq!(project.milestones[0].status, MilestoneStatus::Pending);
        assert_eq!(project.milestones[1].status, MilestoneStatus::Completed);
    }

    #[test]
    fn recreating_project_drops_old_milestones_from_index() {
        let mut tracker = weighted_tracker();
        tracker.create_project(new_project("project_1", "fresher_1"));
        assert!(tracker.milestone(&mid("milestone_1")).is_none());
        assert!(tracker.complete_milestone(&mid("milestone_1")).is_none());
    }
}
