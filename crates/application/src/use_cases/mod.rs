//! Application use cases (business logic orchestration).

mod update_resumes;

pub use update_resumes::*;
