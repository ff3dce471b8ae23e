//! Entity validation utilities for database operations
//!
//! Referenced people must exist before a project row can point at them.

use crate::error::{PoiseError, Result};
use crate::models::{PersonId, PersonRole};
use rusqlite::{Connection, OptionalExtension};
use tracing::instrument;

/// Validate that a person exists in the table of the given role
///
/// # Errors
///
/// Returns `PersonNotFound` if no such row exists, or a database error if the query fails
#[instrument(skip(conn))]
pub fn validate_person_exists(conn: &Connection, role: PersonRole, id: PersonId) -> Result<()> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?1", role.table_name());
    let exists = conn
        .query_row(&sql, [id], |_| Ok(()))
        .optional()?
        .is_some();

    if !exists {
        return Err(PoiseError::PersonNotFound { role, id });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::core::SCHEMA;

    fn schema_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        conn
    }

    #[test]
    fn test_validate_missing_person() {
        let conn = schema_connection();
        let result = validate_person_exists(&conn, PersonRole::Architect, 99);
        assert!(matches!(
            result,
            Err(PoiseError::PersonNotFound {
                role: PersonRole::Architect,
                id: 99
            })
        ));
    }

    #[test]
    fn test_validate_existing_person() {
        let conn = schema_connection();
        conn.execute(
            "INSERT INTO project_manager (first_name, last_name) VALUES ('Sam', 'Mokoena')",
            [],
        )
        .unwrap();
        let id = conn.last_insert_rowid();

        assert!(validate_person_exists(&conn, PersonRole::ProjectManager, id).is_ok());
        assert!(validate_person_exists(&conn, PersonRole::Customer, id).is_err());
    }
}
