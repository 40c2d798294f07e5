pub mod checklist;
pub mod config;
pub mod coverage;
pub mod effort;
pub mod error;
pub mod followup;
pub mod gap;
pub mod io;
pub mod model;
pub mod readiness;
pub mod score;
pub mod snapshot;
pub mod summary;
pub mod timeline;
pub mod types;

pub use error::{ReadinessError, Result};
