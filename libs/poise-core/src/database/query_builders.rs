//! SQL text construction for project listings and person tables
//!
//! Values never appear in the generated text: filters contribute placeholders
//! and the caller binds the parameters. Table names come only from
//! [`PersonRole::table_name`].

use crate::models::PersonRole;

/// Columns selected for every project listing, with the joined person summaries
const PROJECT_DETAILS_SELECT: &str = "SELECT \
        p.id, p.project_number, p.name, p.building_type, p.address, p.erf_number, \
        p.total_fee, p.amount_paid, p.deadline, p.completion_date, p.finalised, \
        p.customer_id, p.architect_id, p.manager_id, p.structural_engineer, \
        c.id AS customer_ref, c.first_name AS customer_first_name, \
        c.last_name AS customer_last_name, c.email AS customer_email, \
        a.id AS architect_ref, a.first_name AS architect_first_name, \
        a.last_name AS architect_last_name, a.email AS architect_email, \
        m.id AS manager_ref, m.first_name AS manager_first_name, \
        m.last_name AS manager_last_name, m.email AS manager_email \
    FROM project p \
    LEFT JOIN customer c ON c.id = p.customer_id \
    LEFT JOIN architect a ON a.id = p.architect_id \
    LEFT JOIN project_manager m ON m.id = p.manager_id";

/// Which projects a listing query returns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectFilter {
    /// Every project
    All,
    /// One project by id; binds `?1` to the id
    ById,
    /// Projects not yet finalised
    Incomplete,
    /// Not finalised with a deadline before `?1`
    OverdueAsOf,
    /// Exact id or project number match on `?1`, or name `LIKE ?2`
    Search,
}

impl ProjectFilter {
    fn where_clause(self) -> Option<&'static str> {
        match self {
            ProjectFilter::All => None,
            ProjectFilter::ById => Some("p.id = ?1"),
            ProjectFilter::Incomplete => Some("p.finalised = 0"),
            ProjectFilter::OverdueAsOf => Some("p.finalised = 0 AND p.deadline < ?1"),
            ProjectFilter::Search => Some(
                "CAST(p.id AS TEXT) = ?1 OR p.project_number = ?1 OR p.name LIKE ?2 ESCAPE '\\'",
            ),
        }
    }

    /// Full `SELECT` statement for this filter, in storage order
    #[must_use]
    pub fn to_sql(self) -> String {
        match self.where_clause() {
            Some(clause) => format!("{PROJECT_DETAILS_SELECT} WHERE {clause} ORDER BY p.id"),
            None => format!("{PROJECT_DETAILS_SELECT} ORDER BY p.id"),
        }
    }
}

/// Column list shared by every person table
pub const PERSON_COLUMNS: &str = "id, first_name, last_name, email, phone, address";

/// `SELECT` of every person in a role, ordered by id
#[must_use]
pub fn select_people(role: PersonRole) -> String {
    format!(
        "SELECT {PERSON_COLUMNS} FROM {} ORDER BY id",
        role.table_name()
    )
}

/// `SELECT` of one person in a role; binds `?1` to the id
#[must_use]
pub fn select_person(role: PersonRole) -> String {
    format!("SELECT {PERSON_COLUMNS} FROM {} WHERE id = ?1", role.table_name())
}

/// `INSERT` of a person into a role's table; binds `?1..?5`
#[must_use]
pub fn insert_person(role: PersonRole) -> String {
    format!(
        "INSERT INTO {} (first_name, last_name, email, phone, address) VALUES (?1, ?2, ?3, ?4, ?5)",
        role.table_name()
    )
}

/// `SELECT` of a person's last name; binds `?1` to the id
#[must_use]
pub fn select_last_name(role: PersonRole) -> String {
    format!("SELECT last_name FROM {} WHERE id = ?1", role.table_name())
}
