//! Database module - connection provider and repository operations

pub(crate) mod core;
pub mod mappers;
mod people;
pub mod query_builders;
pub mod validators;

pub use self::core::{ProjectDatabase, SCHEMA};

pub use mappers::{map_person_row, map_project_details_row, map_project_row};
pub use query_builders::ProjectFilter;
