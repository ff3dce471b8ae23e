//! Person tables: one per role, identical layout

use super::core::ProjectDatabase;
use crate::{
    database::{mappers::map_person_row, query_builders, validators},
    error::{PoiseError, Result},
    models::{NewPerson, Person, PersonChoice, PersonId, PersonRole},
};
use rusqlite::{params, OptionalExtension};
use tracing::{debug, info, instrument};

impl ProjectDatabase {
    /// Everyone in a role, ordered by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn list_people(&self, role: PersonRole) -> Result<Vec<Person>> {
        let mut stmt = self
            .connection()
            .prepare(&query_builders::select_people(role))?;
        let people = stmt
            .query_map([], map_person_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!("Fetched {} {} record(s)", people.len(), role);
        Ok(people)
    }

    /// One person in a role
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn get_person(&self, role: PersonRole, id: PersonId) -> Result<Option<Person>> {
        let person = self
            .connection()
            .query_row(&query_builders::select_person(role), [id], map_person_row)
            .optional()?;
        Ok(person)
    }

    /// Insert a person into a role's table and return the new id
    ///
    /// # Errors
    ///
    /// Returns a validation error if either name is blank, or a database error
    #[instrument(skip(self, person))]
    pub fn create_person(&self, role: PersonRole, person: &NewPerson) -> Result<PersonId> {
        if person.first_name.trim().is_empty() || person.last_name.trim().is_empty() {
            return Err(PoiseError::validation(format!(
                "{role} first and last name are required"
            )));
        }

        let conn = self.connection();
        conn.execute(
            &query_builders::insert_person(role),
            params![
                person.first_name.trim(),
                person.last_name.trim(),
                person.email.trim(),
                person.phone.trim(),
                person.address.trim(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        info!("Created {} {}", role, id);
        Ok(id)
    }

    /// Last name of a person in a role, if present
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub fn last_name(&self, role: PersonRole, id: PersonId) -> Result<Option<String>> {
        let last_name = self
            .connection()
            .query_row(&query_builders::select_last_name(role), [id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(last_name)
    }

    /// Last name of a customer, if present
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub fn customer_last_name(&self, id: PersonId) -> Result<Option<String>> {
        self.last_name(PersonRole::Customer, id)
    }

    /// Confirm that `id` names an existing person in `role`
    ///
    /// # Errors
    ///
    /// Returns `PersonNotFound` or a database error
    pub fn resolve_person(&self, role: PersonRole, id: PersonId) -> Result<PersonId> {
        validators::validate_person_exists(self.connection(), role, id)?;
        Ok(id)
    }

    /// Turn a selection line into a person id
    ///
    /// The `new` keyword calls `capture` for the new person's fields and
    /// inserts them; anything else must be the id of an existing person. The
    /// insert is committed on its own, before any project that refers to it.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPersonId` for text that is neither, `PersonNotFound`
    /// for an unknown id, or whatever `capture` or the store reports
    #[instrument(skip(self, capture))]
    pub fn resolve_or_create_person<F>(
        &self,
        role: PersonRole,
        input: &str,
        capture: F,
    ) -> Result<PersonId>
    where
        F: FnOnce() -> Result<NewPerson>,
    {
        match PersonChoice::parse(role, input)? {
            PersonChoice::Existing(id) => self.resolve_person(role, id),
            PersonChoice::CreateNew => {
                let person = capture()?;
                self.create_person(role, &person)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_person(first: &str, last: &str) -> NewPerson {
        NewPerson {
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: format!("{}@example.com", first.to_lowercase()),
            phone: "021 555 0100".to_string(),
            address: "3 Bree Street".to_string(),
        }
    }

    #[test]
    fn test_create_and_get_person() {
        let db = ProjectDatabase::open_in_memory().unwrap();
        let id = db
            .create_person(PersonRole::Architect, &new_person(" Thandi ", "Khumalo"))
            .unwrap();

        let person = db.get_person(PersonRole::Architect, id).unwrap().unwrap();
        assert_eq!(person.first_name, "Thandi");
        assert_eq!(person.full_name(), "Thandi Khumalo");
        assert!(db.get_person(PersonRole::Customer, id).unwrap().is_none());
    }

    #[test]
    fn test_create_person_requires_names() {
        let db = ProjectDatabase::open_in_memory().unwrap();
        let err = db
            .create_person(PersonRole::Customer, &new_person("Ann", "  "))
            .unwrap_err();
        assert!(matches!(err, PoiseError::Validation { .. }));
    }

    #[test]
    fn test_list_people_in_id_order() {
        let db = ProjectDatabase::open_in_memory().unwrap();
        db.create_person(PersonRole::Customer, &new_person("Zed", "Adams"))
            .unwrap();
        db.create_person(PersonRole::Customer, &new_person("Amy", "Zulu"))
            .unwrap();
        db.create_person(PersonRole::Architect, &new_person("Other", "Role"))
            .unwrap();

        let customers = db.list_people(PersonRole::Customer).unwrap();
        let names: Vec<String> = customers.iter().map(Person::full_name).collect();
        assert_eq!(names, vec!["Zed Adams", "Amy Zulu"]);
    }

    #[test]
    fn test_customer_last_name_lookup() {
        let db = ProjectDatabase::open_in_memory().unwrap();
        let id = db
            .create_person(PersonRole::Customer, &new_person("A", "B"))
            .unwrap();
        assert_eq!(db.customer_last_name(id).unwrap(), Some("B".to_string()));
        assert_eq!(db.customer_last_name(id + 10).unwrap(), None);
    }

    #[test]
    fn test_resolve_existing_person() {
        let db = ProjectDatabase::open_in_memory().unwrap();
        let id = db
            .create_person(PersonRole::ProjectManager, &new_person("Lee", "Petersen"))
            .unwrap();

        let resolved = db
            .resolve_or_create_person(PersonRole::ProjectManager, &id.to_string(), || {
                panic!("capture must not run for an existing id")
            })
            .unwrap();
        assert_eq!(resolved, id);
    }

    #[test]
    fn test_resolve_creates_on_keyword() {
        let db = ProjectDatabase::open_in_memory().unwrap();
        let id = db
            .resolve_or_create_person(PersonRole::Customer, "NEW", || {
                Ok(new_person("Nomsa", "Mthembu"))
            })
            .unwrap();

        assert_eq!(db.customer_last_name(id).unwrap().as_deref(), Some("Mthembu"));
    }

    #[test]
    fn test_resolve_distinguishes_failures() {
        let db = ProjectDatabase::open_in_memory().unwrap();

        let invalid = db
            .resolve_or_create_person(PersonRole::Architect, "abc", || Ok(NewPerson::default()))
            .unwrap_err();
        assert!(matches!(invalid, PoiseError::InvalidPersonId { .. }));

        let missing = db
            .resolve_or_create_person(PersonRole::Architect, "7", || Ok(NewPerson::default()))
            .unwrap_err();
        assert!(matches!(missing, PoiseError::PersonNotFound { id: 7, .. }));
    }
}
