//! Poise Common - Shared constants and helpers for the Poise project tracker
//!
//! # Examples
//!
//! ```
//! use poise_common::{format_date, parse_date, DATABASE_FILENAME};
//!
//! assert_eq!(DATABASE_FILENAME, "PoisePMS.sqlite");
//!
//! let date = parse_date("2024-03-01").unwrap();
//! assert_eq!(format_date(&date), "2024-03-01");
//! assert!(parse_date("2024-3-1").is_none());
//! ```

pub mod constants;
pub mod utils;

pub use constants::*;
pub use utils::*;
