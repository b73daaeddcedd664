pub mod schema;
pub mod store;
pub mod task_repo;
pub mod util;

pub use store::DbStore;
