//! Poise Core - project tracking for a structural engineering firm
//!
//! This library holds the data models, the SQLite-backed project store and the
//! interactive input validator used by the `poise` command-line tool.
//!
//! # Features
//!
//! - **Single-connection store**: one synchronous `rusqlite` connection per session
//! - **Typed people**: customers, architects and project managers share one layout
//! - **Fixed-point money**: fees and payments are `rust_decimal::Decimal`
//! - **Re-prompting input**: [`Prompter`] never surfaces malformed input as an error
//!
//! # Quick Start
//!
//! ```no_run
//! use poise_core::{PoiseConfig, PoiseError, ProjectDatabase};
//!
//! # fn example() -> Result<(), PoiseError> {
//! let db = ProjectDatabase::open(&PoiseConfig::from_env())?;
//!
//! for details in db.list_overdue()? {
//!     println!("{} is overdue", details.project.name);
//! }
//!
//! let finalised = db.finalise_project(1, None)?;
//! println!("{finalised} project(s) finalized");
//! # Ok(())
//! # }
//! ```
//!
//! # Crate Features
//!
//! - `test-utils`: Enable test utilities (for testing only)

pub mod config;
pub mod database;
pub mod error;
pub mod input;
pub mod models;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::PoiseConfig;
pub use database::ProjectDatabase;
pub use error::{PoiseError, Result};
pub use input::Prompter;
pub use models::*;
