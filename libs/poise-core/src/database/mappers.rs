//! Row mapping utilities for converting database rows to domain models

use crate::models::{Person, PersonId, PersonSummary, Project, ProjectDetails};
use rusqlite::types::Type;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Read a fixed-point amount stored as text
///
/// # Errors
///
/// Returns a conversion error if the column does not hold a decimal number
pub fn get_money(row: &Row<'_>, column: &str) -> rusqlite::Result<Decimal> {
    let text: String = row.get(column)?;
    Decimal::from_str(&text).map_err(|e| {
        let index = row.as_ref().column_index(column).unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
    })
}

/// Map a row of a person table
///
/// # Errors
///
/// Returns an error if a column is missing or has the wrong type
pub fn map_person_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        email: row.get("email")?,
        phone: row.get("phone")?,
        address: row.get("address")?,
    })
}

/// Map the `<prefix>_ref/_first_name/_last_name/_email` columns of a LEFT JOIN
///
/// A missing referenced row yields `None`.
fn map_person_summary(row: &Row<'_>, prefix: &str) -> rusqlite::Result<Option<PersonSummary>> {
    let Some(id) = row.get::<_, Option<PersonId>>(format!("{prefix}_ref").as_str())? else {
        return Ok(None);
    };
    Ok(Some(PersonSummary {
        id,
        first_name: row.get(format!("{prefix}_first_name").as_str())?,
        last_name: row.get(format!("{prefix}_last_name").as_str())?,
        email: row.get(format!("{prefix}_email").as_str())?,
    }))
}

/// Map a project row without its joins
///
/// # Errors
///
/// Returns an error if a column is missing or cannot be converted
pub fn map_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: row.get("id")?,
        project_number: row.get("project_number")?,
        name: row.get("name")?,
        building_type: row.get("building_type")?,
        address: row.get("address")?,
        erf_number: row.get("erf_number")?,
        total_fee: get_money(row, "total_fee")?,
        amount_paid: get_money(row, "amount_paid")?,
        deadline: row.get("deadline")?,
        completion_date: row.get("completion_date")?,
        finalised: row.get("finalised")?,
        customer_id: row.get("customer_id")?,
        architect_id: row.get("architect_id")?,
        manager_id: row.get("manager_id")?,
        structural_engineer: row.get("structural_engineer")?,
    })
}

/// Map a row produced by a project listing query
///
/// # Errors
///
/// Returns an error if a column is missing or cannot be converted
pub fn map_project_details_row(row: &Row<'_>) -> rusqlite::Result<ProjectDetails> {
    Ok(ProjectDetails {
        project: map_project_row(row)?,
        customer: map_person_summary(row, "customer")?,
        architect: map_person_summary(row, "architect")?,
        manager: map_person_summary(row, "manager")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rusqlite::Connection;

    #[test]
    fn test_get_money_parses_text() {
        let conn = Connection::open_in_memory().unwrap();
        let value = conn
            .query_row("SELECT '1500.50' AS fee", [], |row| get_money(row, "fee"))
            .unwrap();
        assert_eq!(value, Decimal::new(150_050, 2));
    }

    #[test]
    fn test_get_money_rejects_garbage() {
        let conn = Connection::open_in_memory().unwrap();
        let result = conn.query_row("SELECT 'lots' AS fee", [], |row| get_money(row, "fee"));
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(0, Type::Text, _))
        ));
    }

    #[test]
    fn test_map_person_row() {
        let conn = Connection::open_in_memory().unwrap();
        let person = conn
            .query_row(
                "SELECT 3 AS id, 'Ada' AS first_name, 'Lovelace' AS last_name, \
                 'ada@example.com' AS email, '555' AS phone, 'London' AS address",
                [],
                map_person_row,
            )
            .unwrap();
        assert_eq!(person.id, 3);
        assert_eq!(person.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_map_person_summary_missing_join() {
        let conn = Connection::open_in_memory().unwrap();
        let summary = conn
            .query_row(
                "SELECT NULL AS customer_ref, NULL AS customer_first_name, \
                 NULL AS customer_last_name, NULL AS customer_email",
                [],
                |row| map_person_summary(row, "customer"),
            )
            .unwrap();
        assert!(summary.is_none());
    }

    #[test]
    fn test_map_project_row_dates() {
        let conn = Connection::open_in_memory().unwrap();
        let project = conn
            .query_row(
                "SELECT 1 AS id, NULL AS project_number, 'House B' AS name, \
                 'House' AS building_type, '1 Main Road' AS address, 'ERF-1' AS erf_number, \
                 '1000.00' AS total_fee, '0.00' AS amount_paid, '2024-06-30' AS deadline, \
                 '2024-03-01' AS completion_date, 1 AS finalised, 1 AS customer_id, \
                 2 AS architect_id, 3 AS manager_id, NULL AS structural_engineer",
                [],
                map_project_row,
            )
            .unwrap();
        assert_eq!(project.deadline, NaiveDate::from_ymd_opt(2024, 6, 30).unwrap());
        assert_eq!(project.completion_date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(project.finalised);
        assert_eq!(project.total_fee, Decimal::new(1000, 0));
    }
}
