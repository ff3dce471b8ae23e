//! Shared fixtures for the integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use poise_core::{NewPerson, NewProject, PersonId, PersonRole, ProjectDatabase};
use rust_decimal::Decimal;

pub struct People {
    pub customer: PersonId,
    pub architect: PersonId,
    pub manager: PersonId,
}

pub fn person(first_name: &str, last_name: &str) -> NewPerson {
    NewPerson {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        phone: "011 555 0123".to_string(),
        address: "8 Main Road".to_string(),
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// An in-memory store with one person per role
pub fn store_with_people() -> (ProjectDatabase, People) {
    let db = ProjectDatabase::open_in_memory().unwrap();
    let people = People {
        customer: db
            .create_person(PersonRole::Customer, &person("A", "B"))
            .unwrap(),
        architect: db
            .create_person(PersonRole::Architect, &person("Ruth", "Abrahams"))
            .unwrap(),
        manager: db
            .create_person(PersonRole::ProjectManager, &person("Kagiso", "Moloi"))
            .unwrap(),
    };
    (db, people)
}

pub fn project(people: &People, deadline: NaiveDate) -> NewProject {
    NewProject {
        project_number: None,
        name: None,
        building_type: "House".to_string(),
        address: "22 Beach Road".to_string(),
        erf_number: "ERF-3301".to_string(),
        total_fee: Decimal::new(15_000_000, 2),
        amount_paid: Decimal::new(1_000_000, 2),
        deadline,
        customer_id: people.customer,
        architect_id: people.architect,
        manager_id: people.manager,
        structural_engineer: None,
    }
}

pub fn named(people: &People, name: &str, deadline: NaiveDate) -> NewProject {
    NewProject {
        name: Some(name.to_string()),
        ..project(people, deadline)
    }
}
