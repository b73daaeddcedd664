use crate::types::enums::AssignmentStatus;
use crate::types::ids::{AssignmentId, FresherId, MentorId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mentor {
    pub id: MentorId,
    pub name: String,
    pub skills: Vec<String>,
    pub max_freshers: u32,
    /// Consumed capacity. Assignments only ever add to it.
    pub current_freshers: u32,
}

impl Mentor {
    pub fn has_capacity(&self) -> bool {
        self.current_freshers < self.max_freshers
    }

    /// Number of distinct skills shared with `fresher`.
    pub fn skill_overlap(&self, fresher: &Fresher) -> usize {
        let ours: HashSet<&str> = self.skills.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = fresher.skills.iter().map(String::as_str).collect();
        ours.intersection(&theirs).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fresher {
    pub id: FresherId,
    pub name: String,
    pub skills: Vec<String>,
    pub assignment_branch: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignment {
    pub id: AssignmentId,
    pub fresher_id: FresherId,
    pub mentor_id: MentorId,
    pub status: AssignmentStatus,
    pub assigned_date: DateTime<Utc>,
    pub progress: f64,
}
