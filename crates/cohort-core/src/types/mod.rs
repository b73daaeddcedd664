pub mod enums;
pub mod ids;
pub mod io;
pub mod mentor;
pub mod project;
pub mod task;

pub use enums::*;
pub use ids::*;
pub use io::*;
pub use mentor::*;
pub use project::*;
pub use task::*;
