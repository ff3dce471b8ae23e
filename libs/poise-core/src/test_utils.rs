//! Test utilities and mock data for the project store

use crate::database::SCHEMA;
use crate::models::{NewPerson, NewProject, PersonId};
use chrono::{Duration, Local, NaiveDate};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;

/// Ids of the people seeded by [`create_test_database`]
pub const MOCK_CUSTOMER_ID: PersonId = 1;
pub const MOCK_ARCHITECT_ID: PersonId = 1;
pub const MOCK_MANAGER_ID: PersonId = 1;

/// Create a test database with the schema and mock data
///
/// Seeds one person per role and three projects: one in progress with a
/// future deadline, one overdue, and one finalised.
///
/// # Errors
/// Returns `PoiseError::Database` if the database cannot be created
pub fn create_test_database<P: AsRef<Path>>(db_path: P) -> crate::Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.pragma_update(None, "foreign_keys", "ON")?;
    conn.execute_batch(SCHEMA)?;

    let people = [
        ("customer", "Jane", "Smith", "jane@example.com"),
        ("architect", "Pieter", "van Wyk", "pieter@example.com"),
        ("project_manager", "Lindiwe", "Zungu", "lindiwe@example.com"),
    ];
    for (table, first, last, email) in people {
        conn.execute(
            &format!(
                "INSERT INTO {table} (first_name, last_name, email, phone, address) \
                 VALUES (?1, ?2, ?3, '021 555 0000', '1 Dock Road')"
            ),
            params![first, last, email],
        )?;
    }

    let today = Local::now().date_naive();
    let projects = [
        (
            Some("P-001"),
            "House Smith",
            "House",
            "150000.00",
            "20000.00",
            today + Duration::days(30),
            None,
        ),
        (
            Some("P-002"),
            "Office Block 7",
            "Office",
            "900000.00",
            "900000.00",
            today - Duration::days(10),
            None,
        ),
        (
            None,
            "Warehouse_North",
            "Warehouse",
            "400000.00",
            "400000.00",
            today - Duration::days(90),
            Some(today - Duration::days(60)),
        ),
    ];
    for (number, name, building_type, fee, paid, deadline, completed) in projects {
        conn.execute(
            "INSERT INTO project (
                project_number, name, building_type, address, erf_number,
                total_fee, amount_paid, deadline, completion_date, finalised,
                customer_id, architect_id, manager_id
            ) VALUES (?1, ?2, ?3, '1 Dock Road', 'ERF-77', ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                number,
                name,
                building_type,
                fee,
                paid,
                deadline,
                completed,
                completed.is_some(),
                MOCK_CUSTOMER_ID,
                MOCK_ARCHITECT_ID,
                MOCK_MANAGER_ID,
            ],
        )?;
    }

    Ok(conn)
}

/// A person with every field filled in
#[must_use]
pub fn create_mock_person(first_name: &str, last_name: &str) -> NewPerson {
    NewPerson {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!(
            "{}.{}@example.com",
            first_name.to_lowercase(),
            last_name.to_lowercase()
        ),
        phone: "021 555 0199".to_string(),
        address: "10 Loop Street".to_string(),
    }
}

/// A valid project request without a name, referencing the given people
#[must_use]
pub fn create_mock_project(
    customer_id: PersonId,
    architect_id: PersonId,
    manager_id: PersonId,
    deadline: NaiveDate,
) -> NewProject {
    NewProject {
        project_number: None,
        name: None,
        building_type: "House".to_string(),
        address: "4 Kloof Nek Road".to_string(),
        erf_number: "ERF-2048".to_string(),
        total_fee: Decimal::new(15_000_000, 2),
        amount_paid: Decimal::new(2_500_000, 2),
        deadline,
        customer_id,
        architect_id,
        manager_id,
        structural_engineer: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::ProjectDatabase;
    use tempfile::NamedTempFile;

    #[test]
    fn test_create_test_database_is_readable() {
        let temp_file = NamedTempFile::new().unwrap();
        create_test_database(temp_file.path()).unwrap();

        let db = ProjectDatabase::open_path(temp_file.path()).unwrap();
        let projects = db.list_all().unwrap();
        assert_eq!(projects.len(), 3);
        assert_eq!(db.list_incomplete().unwrap().len(), 2);
        assert_eq!(db.list_overdue().unwrap().len(), 1);
    }

    #[test]
    fn test_mock_project_is_valid() {
        let project = create_mock_project(1, 1, 1, NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());
        assert!(project.validate().is_ok());
        assert_eq!(create_mock_person("A", "B").email, "a.b@example.com");
    }
}
