//! The sample cohort used by the `mentors` and `progress` commands.

use anyhow::Result;
use chrono::{DateTime, Utc};
use cohort_core::time::parse_timestamp;
use cohort_core::types::{
    CheckIn, CheckInId, Fresher, FresherId, Mentor, MentorId, MilestoneId, NewMilestone,
    NewProject, ProjectId,
};
use cohort_core::{MentorMatcher, ProgressTracker};

pub const SAMPLE_FRESHER: &str = "fresher_1";
const SAMPLE_PROJECT: &str = "project_1";

/// (id, title, description, due date, weight)
const TASK_TRACKER_MILESTONES: &[(&str, &str, &str, &str, f64)] = &[
    (
        "milestone_1",
        "Project Setup",
        "Set up Next.js project with TypeScript and Tailwind CSS",
        "2024-01-20",
        10.0,
    ),
    (
        "milestone_2",
        "Basic UI Components",
        "Create layout, navigation, and basic components",
        "2024-01-25",
        15.0,
    ),
    (
        "milestone_3",
        "Task Management",
        "Implement task creation, editing, and deletion",
        "2024-02-01",
        25.0,
    ),
    (
        "milestone_4",
        "State Management",
        "Add task filtering, search, and statistics",
        "2024-02-08",
        20.0,
    ),
    (
        "milestone_5",
        "Polish & Deploy",
        "Add animations, responsive design, and deploy to Vercel",
        "2024-02-15",
        30.0,
    ),
];

fn skills(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_string()).collect()
}

pub fn mentor_matcher() -> Result<MentorMatcher> {
    let mut matcher = MentorMatcher::new();
    matcher.add_mentor(Mentor {
        id: MentorId::new("mentor_1")?,
        name: "Sarah Johnson".to_string(),
        skills: skills(&["javascript", "react", "typescript"]),
        max_freshers: 3,
        current_freshers: 1,
    });
    matcher.add_mentor(Mentor {
        id: MentorId::new("mentor_2")?,
        name: "Mike Chen".to_string(),
        skills: skills(&["python", "flask", "sql"]),
        max_freshers: 2,
        current_freshers: 0,
    });
    matcher.add_fresher(Fresher {
        id: FresherId::new(SAMPLE_FRESHER)?,
        name: "Alex Kumar".to_string(),
        skills: skills(&["javascript", "html"]),
        assignment_branch: "frontend-development".to_string(),
    });
    matcher.add_fresher(Fresher {
        id: FresherId::new("fresher_2")?,
        name: "Priya Singh".to_string(),
        skills: skills(&["python", "sql"]),
        assignment_branch: "backend-development".to_string(),
    });
    Ok(matcher)
}

/// Builds the task-tracker project with its first two milestones done.
pub fn progress_tracker(now: DateTime<Utc>) -> Result<ProgressTracker> {
    let mut tracker = ProgressTracker::new();
    let project_id = ProjectId::new(SAMPLE_PROJECT)?;
    tracker.create_project(NewProject {
        id: project_id.clone(),
        fresher_id: FresherId::new(SAMPLE_FRESHER)?,
        assignment_branch: "frontend-development".to_string(),
        start_date: parse_timestamp("2024-01-15")?,
        end_date: parse_timestamp("2024-02-15")?,
    });

    for &(id, title, description, due_date, weight) in TASK_TRACKER_MILESTONES {
        tracker.add_milestone(
            &project_id,
            NewMilestone {
                id: MilestoneId::new(id)?,
                title: title.to_string(),
                description: description.to_string(),
                due_date: parse_timestamp(due_date)?,
                weight,
            },
        );
    }

    tracker.complete_milestone_at(&MilestoneId::new("milestone_1")?, now);
    tracker.complete_milestone_at(&MilestoneId::new("milestone_2")?, now);

    tracker.add_check_in(
        &project_id,
        CheckIn {
            id: CheckInId::new("check_in_1")?,
            date: now,
            progress: 25.0,
            notes: "Completed project setup and basic UI components. Starting task management features."
                .to_string(),
            blockers: "Need clarification on task priority system design.".to_string(),
        },
    );
    Ok(tracker)
}
