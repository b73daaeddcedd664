pub mod cohort;
pub mod error;
pub mod mentors;
pub mod progress;
pub mod store;
pub mod tasks;
pub mod time;
pub mod validation;

pub mod types;

pub use crate::cohort::Cohort;
pub use crate::error::CohortError;
pub use crate::mentors::MentorMatcher;
pub use crate::progress::ProgressTracker;
pub use crate::store::Store;
