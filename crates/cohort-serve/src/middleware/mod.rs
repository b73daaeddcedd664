pub mod correlation;
pub mod panic;
