//! Data models for projects and the people attached to them

use crate::error::{PoiseError, Result};
use chrono::NaiveDate;
use poise_common::{is_storable_money, NEW_PERSON_KEYWORD};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-generated identity of a person row
pub type PersonId = i64;

/// Store-generated identity of a project row
pub type ProjectId = i64;

/// The roles a person can play on a project
///
/// Each role is backed by its own table with an identical layout. This is the
/// only source of table names that are spliced into SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonRole {
    #[serde(rename = "customer")]
    Customer,
    #[serde(rename = "architect")]
    Architect,
    /// Also known as the contractor
    #[serde(rename = "project_manager")]
    ProjectManager,
}

impl PersonRole {
    /// Every role, in the order they are requested during project creation
    pub const ALL: [PersonRole; 3] = [
        PersonRole::Customer,
        PersonRole::Architect,
        PersonRole::ProjectManager,
    ];

    /// Backing table name
    #[must_use]
    pub fn table_name(self) -> &'static str {
        match self {
            PersonRole::Customer => "customer",
            PersonRole::Architect => "architect",
            PersonRole::ProjectManager => "project_manager",
        }
    }

    /// Human-readable label
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            PersonRole::Customer => "Customer",
            PersonRole::Architect => "Architect",
            PersonRole::ProjectManager => "Project Manager",
        }
    }
}

impl fmt::Display for PersonRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A customer, architect or project manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Store-generated identifier
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Person {
    /// First and last name joined by a space
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields for a person that does not exist yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPerson {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// The slice of a person shown next to a project listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonSummary {
    pub id: PersonId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl PersonSummary {
    /// First and last name joined by a space
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// What the user asked for when selecting a person for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonChoice {
    /// Use the person with this id
    Existing(PersonId),
    /// Capture a new person
    CreateNew,
}

impl PersonChoice {
    /// Interpret a selection line: the `new` keyword (any case) or a numeric id
    ///
    /// # Errors
    /// Returns `PoiseError::InvalidPersonId` if the input is neither
    pub fn parse(role: PersonRole, input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.eq_ignore_ascii_case(NEW_PERSON_KEYWORD) {
            return Ok(PersonChoice::CreateNew);
        }
        trimmed
            .parse::<PersonId>()
            .map(PersonChoice::Existing)
            .map_err(|_| PoiseError::InvalidPersonId {
                role,
                input: trimmed.to_string(),
            })
    }
}

/// A tracked construction project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-generated identifier
    pub id: ProjectId,
    /// Optional human-assigned project number, unique when present
    pub project_number: Option<String>,
    pub name: String,
    pub building_type: String,
    pub address: String,
    pub erf_number: String,
    pub total_fee: Decimal,
    pub amount_paid: Decimal,
    pub deadline: NaiveDate,
    /// Set exactly when the project is finalised
    pub completion_date: Option<NaiveDate>,
    pub finalised: bool,
    pub customer_id: PersonId,
    pub architect_id: PersonId,
    pub manager_id: PersonId,
    pub structural_engineer: Option<String>,
}

/// A project joined with the people it references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetails {
    pub project: Project,
    pub customer: Option<PersonSummary>,
    pub architect: Option<PersonSummary>,
    pub manager: Option<PersonSummary>,
}

/// Project creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProject {
    /// Optional human-assigned project number
    pub project_number: Option<String>,
    /// Project name; generated from building type and customer surname when blank
    pub name: Option<String>,
    pub building_type: String,
    pub address: String,
    pub erf_number: String,
    pub total_fee: Decimal,
    pub amount_paid: Decimal,
    pub deadline: NaiveDate,
    pub customer_id: PersonId,
    pub architect_id: PersonId,
    pub manager_id: PersonId,
    pub structural_engineer: Option<String>,
}

impl NewProject {
    /// Check the constraints the store cannot express
    ///
    /// Amount paid exceeding the total fee is accepted.
    ///
    /// # Errors
    /// Returns `PoiseError::Validation` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.building_type.trim().is_empty() {
            return Err(PoiseError::validation("Building type cannot be blank"));
        }
        if self.address.trim().is_empty() {
            return Err(PoiseError::validation("Address cannot be blank"));
        }
        if self.erf_number.trim().is_empty() {
            return Err(PoiseError::validation("ERF number cannot be blank"));
        }
        if self.total_fee < Decimal::ZERO {
            return Err(PoiseError::validation("Total fee cannot be negative"));
        }
        if self.amount_paid < Decimal::ZERO {
            return Err(PoiseError::validation("Amount paid cannot be negative"));
        }
        if !is_storable_money(&self.total_fee) {
            return Err(PoiseError::validation("Total fee is too large"));
        }
        if !is_storable_money(&self.amount_paid) {
            return Err(PoiseError::validation("Amount paid is too large"));
        }
        Ok(())
    }
}

/// Project update request; `None` keeps the stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProjectRequest {
    pub id: ProjectId,
    pub name: Option<String>,
    pub deadline: Option<NaiveDate>,
}

/// Outcome of a project insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedProject {
    pub id: ProjectId,
    /// The stored name, generated or as supplied
    pub name: String,
    /// Whether the name was generated
    pub name_generated: bool,
    pub rows_affected: usize,
}
