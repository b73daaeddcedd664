//! Greedy mentor-to-fresher matching by skill overlap.
//!
//! Mentors are scanned in insertion order. A mentor at capacity is skipped; the
//! rest are scored by the number of distinct skills they share with the
//! fresher, and the first mentor with the strictly highest score wins. The best
//! score starts at zero, so a fresher who shares no skill with any mentor is
//! left unassigned even when capacity is available.

use crate::types::{
    Assignment, AssignmentId, AssignmentStatus, Fresher, FresherId, Mentor, MentorId,
};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentMatch {
    pub assignment_id: AssignmentId,
    pub fresher_id: FresherId,
    pub mentor_id: MentorId,
}

#[derive(Debug, Clone, Default)]
pub struct MentorMatcher {
    mentors: Vec<Mentor>,
    freshers: Vec<Fresher>,
    assignments: Vec<Assignment>,
}

impl MentorMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `mentor`, replacing any mentor with the same id in place.
    pub fn add_mentor(&mut self, mentor: Mentor) {
        match self.mentors.iter_mut().find(|m| m.id == mentor.id) {
            Some(existing) => *existing = mentor,
            None => self.mentors.push(mentor),
        }
    }

    /// Adds `fresher`, replacing any fresher with the same id in place.
    pub fn add_fresher(&mut self, fresher: Fresher) {
        match self.freshers.iter_mut().find(|f| f.id == fresher.id) {
            Some(existing) => *existing = fresher,
            None => self.freshers.push(fresher),
        }
    }

    pub fn mentor(&self, id: &MentorId) -> Option<&Mentor> {
        self.mentors.iter().find(|m| &m.id == id)
    }

    pub fn fresher(&self, id: &FresherId) -> Option<&Fresher> {
        self.freshers.iter().find(|f| &f.id == id)
    }

    pub fn assignment(&self, id: &AssignmentId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| &a.id == id)
    }

    pub fn mentors(&self) -> &[Mentor] {
        &self.mentors
    }

    pub fn freshers(&self) -> &[Fresher] {
        &self.freshers
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// Picks the best mentor for `fresher_id` and consumes one unit of their
    /// capacity. Returns `None` for an unknown fresher or when no mentor with
    /// capacity shares a skill.
    pub fn assign_mentor(&mut self, fresher_id: &FresherId) -> Option<MentorId> {
        let Some(fresher) = self.freshers.iter().find(|f| &f.id == fresher_id) else {
            tracing::debug!(%fresher_id, "assign_mentor ignored unknown fresher");
            return None;
        };

        let mut best: Option<usize> = None;
        let mut best_score = 0;
        for (index, mentor) in self.mentors.iter().enumerate() {
            if !mentor.has_capacity() {
                continue;
            }
            let score = mentor.skill_overlap(fresher);
            if score > best_score {
                best_score = score;
                best = Some(index);
            }
        }

        let mentor = &mut self.mentors[best?];
        mentor.current_freshers += 1;
        tracing::debug!(
            %fresher_id,
            mentor_id = %mentor.id,
            score = best_score,
            "mentor selected"
        );
        Some(mentor.id.clone())
    }

    /// Records an assignment. Neither id is checked against known mentors or
    /// freshers.
    pub fn create_assignment(&mut self, fresher_id: FresherId, mentor_id: MentorId) -> AssignmentId {
        let id = AssignmentId::sequential(self.assignments.len() + 1);
        self.assignments.push(Assignment {
            id: id.clone(),
            fresher_id,
            mentor_id,
            status: AssignmentStatus::Pending,
            assigned_date: Utc::now(),
            progress: 0.0,
        });
        id
    }

    /// Runs matching for every fresher in insertion order and records an
    /// assignment for each match.
    pub fn assign_all(&mut self) -> Vec<AssignmentMatch> {
        let fresher_ids: Vec<FresherId> = self.freshers.iter().map(|f| f.id.clone()).collect();
        let mut matches = Vec::new();
        for fresher_id in fresher_ids {
            let Some(mentor_id) = self.assign_mentor(&fresher_id) else {
                continue;
            };
            let assignment_id = self.create_assignment(fresher_id.clone(), mentor_id.clone());
            tracing::info!(%assignment_id, %fresher_id, %mentor_id, "mentor assigned");
            matches.push(AssignmentMatch {
                assignment_id,
                fresher_id,
                mentor_id,
            });
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn mentor(id: &str, skills: &[&str], max: u32, current: u32) -> Mentor {
        Mentor {
            id: MentorId::new(id).unwrap(),
            name: id.to_uppercase(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            max_freshers: max,
            current_freshers: current,
        }
    }

    fn fresher(id: &str, skills: &[&str]) -> Fresher {
        Fresher {
            id: FresherId::new(id).unwrap(),
            name: id.to_uppercase(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            assignment_branch: "backend-development".to_string(),
        }
    }

    fn fid(id: &str) -> FresherId {
        FresherId::new(id).unwrap()
    }

    fn mid(id: &str) -> MentorId {
        MentorId::new(id).unwrap()
    }

    #[test]
    fn larger_intersection_wins() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("partial", &["python", "go"], 3, 0));
        matcher.add_mentor(mentor("exact", &["python", "sql", "flask"], 3, 0));
        matcher.add_fresher(fresher("f1", &["python", "sql", "flask"]));

        assert_eq!(matcher.assign_mentor(&fid("f1")), Some(mid("exact")));
    }

    #[test]
    fn full_mentor_is_never_selected() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("perfect", &["python", "sql"], 2, 2));
        matcher.add_mentor(mentor("weak", &["python"], 2, 0));
        matcher.add_fresher(fresher("f1", &["python", "sql"]));

        assert_eq!(matcher.assign_mentor(&fid("f1")), Some(mid("weak")));
        assert_eq!(matcher.mentor(&mid("perfect")).unwrap().current_freshers, 2);
    }

    #[test]
    fn assignment_consumes_exactly_one_slot() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("m1", &["react"], 3, 1));
        matcher.add_mentor(mentor("m2", &["sql"], 3, 0));
        matcher.add_fresher(fresher("f1", &["react"]));

        matcher.assign_mentor(&fid("f1"));
        assert_eq!(matcher.mentor(&mid("m1")).unwrap().current_freshers, 2);
        assert_eq!(matcher.mentor(&mid("m2")).unwrap().current_freshers, 0);
    }

    #[test]
    fn first_seen_wins_ties() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("first", &["rust"], 1, 0));
        matcher.add_mentor(mentor("second", &["rust"], 1, 0));
        matcher.add_fresher(fresher("f1", &["rust"]));
        matcher.add_fresher(fresher("f2", &["rust"]));

        assert_eq!(matcher.assign_mentor(&fid("f1")), Some(mid("first")));
        assert_eq!(matcher.assign_mentor(&fid("f2")), Some(mid("second")));
    }

    #[test]
    fn no_overlap_means_no_assignment() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("m1", &["java"], 5, 0));
        matcher.add_fresher(fresher("f1", &["haskell"]));

        assert_eq!(matcher.assign_mentor(&fid("f1")), None);
        assert_eq!(matcher.mentor(&mid("m1")).unwrap().current_freshers, 0);
    }

    #[test]
    fn duplicate_skills_count_once() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("dupes", &["sql", "sql", "sql"], 5, 0));
        matcher.add_mentor(mentor("broad", &["sql", "python"], 5, 0));
        matcher.add_fresher(fresher("f1", &["sql", "sql", "python"]));

        assert_eq!(matcher.assign_mentor(&fid("f1")), Some(mid("broad")));
    }

    #[test]
    fn unknown_fresher_is_ignored() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("m1", &["go"], 5, 0));
        assert_eq!(matcher.assign_mentor(&fid("ghost")), None);
    }

    #[test]
    fn create_assignment_numbers_sequentially_without_validation() {
        let mut matcher = MentorMatcher::new();
        let first = matcher.create_assignment(fid("nobody"), mid("nowhere"));
        let second = matcher.create_assignment(fid("f2"), mid("m2"));
        assert_eq!(first.as_str(), "assignment_1");
        assert_eq!(second.as_str(), "assignment_2");

        let stored = matcher.assignment(&first).unwrap();
        assert_eq!(stored.status, AssignmentStatus::Pending);
        assert_eq!(stored.progress, 0.0);
    }

    #[test]
    fn assign_all_matches_sample_cohort() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("mentor_1", &["javascript", "react", "typescript"], 3, 1));
        matcher.add_mentor(mentor("mentor_2", &["python", "flask", "sql"], 2, 0));
        matcher.add_fresher(fresher("fresher_1", &["javascript", "html"]));
        matcher.add_fresher(fresher("fresher_2", &["python", "sql"]));

        let matches = matcher.assign_all();
        let pairs: Vec<(&str, &str, &str)> = matches
            .iter()
            .map(|m| (m.assignment_id.as_str(), m.fresher_id.as_str(), m.mentor_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("assignment_1", "fresher_1", "mentor_1"),
                ("assignment_2", "fresher_2", "mentor_2"),
            ]
        );
        assert_eq!(matcher.assignments().len(), 2);
    }

    #[test]
    fn re_adding_mentor_keeps_position() {
        let mut matcher = MentorMatcher::new();
        matcher.add_mentor(mentor("a", &["x"], 1, 0));
        matcher.add_mentor(mentor("b", &["x"], 1, 0));
        matcher.add_mentor(mentor("a", &["x", "y"], 1, 0));
        let ids: Vec<&str> = matcher.mentors().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(matcher.mentor(&mid("a")).unwrap().skills.len(), 2);
    }
}
