//! Project lifecycle tests (create, update, finalise, delete)

mod common;

use common::{date, named, person, project, store_with_people};
use poise_core::{PersonRole, UpdateProjectRequest};
use rust_decimal::Decimal;

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_house_b_end_to_end() {
    let (db, people) = store_with_people();
    let customer = db.get_person(PersonRole::Customer, people.customer).unwrap().unwrap();
    assert_eq!(customer.full_name(), "A B");

    let created = db.create_project(&project(&people, date(2024, 6, 30))).unwrap();
    assert_eq!(created.rows_affected, 1);
    assert_eq!(created.name, "House B");

    let completion = date(2024, 3, 1);
    assert_eq!(db.finalise_project(created.id, Some(completion)).unwrap(), 1);

    let details = db.get_project(created.id).unwrap().unwrap();
    assert!(details.project.finalised);
    assert_eq!(details.project.completion_date, Some(completion));

    assert_eq!(
        db.finalise_project(created.id, Some(date(2024, 9, 9))).unwrap(),
        0,
        "Finalising twice must affect no rows"
    );
    let details = db.get_project(created.id).unwrap().unwrap();
    assert_eq!(details.project.completion_date, Some(completion));

    assert_eq!(db.delete_project(created.id).unwrap(), 1);
    assert!(db.get_project(created.id).unwrap().is_none());

    let customer = db.get_person(PersonRole::Customer, people.customer).unwrap();
    assert_eq!(customer.map(|c| c.full_name()).as_deref(), Some("A B"));
}

// ============================================================================
// Create
// ============================================================================

#[test]
fn test_create_then_search_by_id_returns_inputs() {
    let (db, people) = store_with_people();
    let mut request = named(&people, "Sea Point Flats", date(2026, 2, 14));
    request.project_number = Some("PN-0042".to_string());
    request.structural_engineer = Some("Mandla Sithole".to_string());

    let created = db.create_project(&request).unwrap();
    let results = db.search(&created.id.to_string()).unwrap();
    assert_eq!(results.len(), 1);

    let stored = &results[0].project;
    assert_eq!(stored.id, created.id);
    assert_eq!(stored.project_number.as_deref(), Some("PN-0042"));
    assert_eq!(stored.name, "Sea Point Flats");
    assert_eq!(stored.building_type, request.building_type);
    assert_eq!(stored.address, request.address);
    assert_eq!(stored.erf_number, request.erf_number);
    assert_eq!(stored.total_fee, request.total_fee);
    assert_eq!(stored.amount_paid, request.amount_paid);
    assert_eq!(stored.deadline, request.deadline);
    assert_eq!(stored.customer_id, people.customer);
    assert_eq!(stored.architect_id, people.architect);
    assert_eq!(stored.manager_id, people.manager);
    assert_eq!(stored.structural_engineer.as_deref(), Some("Mandla Sithole"));
    assert!(!stored.finalised);
    assert!(stored.completion_date.is_none());
}

#[test]
fn test_blank_name_uses_customer_last_name_at_creation() {
    let (db, people) = store_with_people();
    let mut request = project(&people, date(2026, 1, 1));
    request.name = Some("   ".to_string());
    request.building_type = "Barn".to_string();

    let created = db.create_project(&request).unwrap();
    assert!(created.name_generated);
    assert_eq!(created.name, "Barn B");
}

#[test]
fn test_overpayment_is_accepted() {
    let (db, people) = store_with_people();
    let mut request = project(&people, date(2026, 1, 1));
    request.amount_paid = request.total_fee + Decimal::ONE;

    let created = db.create_project(&request).unwrap();
    let stored = db.get_project(created.id).unwrap().unwrap().project;
    assert!(stored.amount_paid > stored.total_fee);
}

#[test]
fn test_person_created_on_the_fly_is_kept_when_project_insert_fails() {
    let (db, people) = store_with_people();
    let mut first = named(&people, "First", date(2026, 1, 1));
    first.project_number = Some("DUP".to_string());
    db.create_project(&first).unwrap();

    let customer_id = db
        .resolve_or_create_person(PersonRole::Customer, "new", || Ok(person("Late", "Comer")))
        .unwrap();
    let mut second = named(&people, "Second", date(2026, 1, 1));
    second.project_number = Some("DUP".to_string());
    second.customer_id = customer_id;

    assert!(db.create_project(&second).is_err());
    assert!(db.get_person(PersonRole::Customer, customer_id).unwrap().is_some());
    assert_eq!(db.list_all().unwrap().len(), 1);
}

// ============================================================================
// Update
// ============================================================================

#[test]
fn test_update_with_blank_fields_keeps_values() {
    let (db, people) = store_with_people();
    let created = db
        .create_project(&named(&people, "Keep Me", date(2025, 5, 5)))
        .unwrap();

    let rows = db
        .update_project(&UpdateProjectRequest {
            id: created.id,
            name: Some(String::new()),
            deadline: None,
        })
        .unwrap();
    assert_eq!(rows, 1);

    let stored = db.get_project(created.id).unwrap().unwrap().project;
    assert_eq!(stored.name, "Keep Me");
    assert_eq!(stored.deadline, date(2025, 5, 5));
}

#[test]
fn test_update_changes_only_supplied_fields() {
    let (db, people) = store_with_people();
    let created = db
        .create_project(&named(&people, "Old Name", date(2025, 5, 5)))
        .unwrap();

    db.update_project(&UpdateProjectRequest {
        id: created.id,
        name: None,
        deadline: Some(date(2025, 12, 1)),
    })
    .unwrap();
    let stored = db.get_project(created.id).unwrap().unwrap().project;
    assert_eq!(stored.name, "Old Name");
    assert_eq!(stored.deadline, date(2025, 12, 1));

    db.update_project(&UpdateProjectRequest {
        id: created.id,
        name: Some("New Name".to_string()),
        deadline: None,
    })
    .unwrap();
    let stored = db.get_project(created.id).unwrap().unwrap().project;
    assert_eq!(stored.name, "New Name");
    assert_eq!(stored.deadline, date(2025, 12, 1));
}

#[test]
fn test_update_unknown_id_affects_no_rows() {
    let (db, _people) = store_with_people();
    let rows = db
        .update_project(&UpdateProjectRequest {
            id: 12_345,
            name: Some("Ghost".to_string()),
            deadline: None,
        })
        .unwrap();
    assert_eq!(rows, 0);
}

// ============================================================================
// Finalise and delete
// ============================================================================

#[test]
fn test_finalise_unknown_id_affects_no_rows() {
    let (db, _people) = store_with_people();
    assert_eq!(db.finalise_project(77, Some(date(2024, 1, 1))).unwrap(), 0);
}

#[test]
fn test_delete_unknown_id_is_noop() {
    let (db, people) = store_with_people();
    db.create_project(&project(&people, date(2026, 1, 1))).unwrap();

    assert_eq!(db.delete_project(999).unwrap(), 0);
    assert_eq!(db.list_all().unwrap().len(), 1);
}

#[test]
fn test_delete_never_touches_person_tables() {
    let (db, people) = store_with_people();
    for i in 0..3 {
        let created = db
            .create_project(&named(&people, &format!("Project {i}"), date(2026, 1, 1)))
            .unwrap();
        db.delete_project(created.id).unwrap();
    }

    for role in PersonRole::ALL {
        assert_eq!(db.list_people(role).unwrap().len(), 1, "{role} rows changed");
    }
}
