//! Interactive menu loop
//!
//! One numbered selection per iteration, dispatched to exactly one store
//! operation. Store and validation failures are reported and the loop carries
//! on; running out of input ends the session like choosing `0`.

use crate::{print_people, print_projects};
use poise_core::{
    NewPerson, NewProject, PersonId, PersonRole, PoiseError, ProjectDatabase, ProjectId, Prompter,
    Result, UpdateProjectRequest,
};
use rust_decimal::Decimal;
use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, error, info, warn};

const MENU_TEXT: &str = "
=== PoisePMS Menu ===
1. View All Projects
2. Add New Project
3. Update Existing Project
4. Delete Project
5. Finalise Project
6. View Incomplete Projects
7. View Overdue Projects
8. Search Project by ID, Number or Name
0. Exit";

const INVALID_CHOICE_MESSAGE: &str = "Invalid choice. Please try again.";
const EXIT_MESSAGE: &str = "Exiting application.";
const NEGATIVE_AMOUNT_MESSAGE: &str = "Amount cannot be negative. Please try again.";
const NO_PROJECT_MESSAGE: &str = "No project found with the given ID.";
const NO_SEARCH_MATCH_MESSAGE: &str = "No project found with the given ID or name.";

/// A menu selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    Exit,
    ViewAll,
    AddProject,
    UpdateProject,
    DeleteProject,
    FinaliseProject,
    ViewIncomplete,
    ViewOverdue,
    Search,
}

impl MenuCommand {
    /// Prefix for a failure report
    fn failure_context(self) -> &'static str {
        match self {
            MenuCommand::Exit => "Error exiting",
            MenuCommand::ViewAll => "Error fetching projects",
            MenuCommand::AddProject => "Error adding project",
            MenuCommand::UpdateProject => "Error updating project",
            MenuCommand::DeleteProject => "Error deleting project",
            MenuCommand::FinaliseProject => "Error finalizing project",
            MenuCommand::ViewIncomplete => "Error fetching incomplete projects",
            MenuCommand::ViewOverdue => "Error fetching overdue projects",
            MenuCommand::Search => "Error searching projects",
        }
    }
}

impl TryFrom<i64> for MenuCommand {
    type Error = i64;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        Ok(match value {
            0 => MenuCommand::Exit,
            1 => MenuCommand::ViewAll,
            2 => MenuCommand::AddProject,
            3 => MenuCommand::UpdateProject,
            4 => MenuCommand::DeleteProject,
            5 => MenuCommand::FinaliseProject,
            6 => MenuCommand::ViewIncomplete,
            7 => MenuCommand::ViewOverdue,
            8 => MenuCommand::Search,
            other => return Err(other),
        })
    }
}

/// Error for a selection that is not on the menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidChoice(pub String);

impl fmt::Display for InvalidChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "not a menu option: '{}'", self.0)
    }
}

impl std::error::Error for InvalidChoice {}

impl FromStr for MenuCommand {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .ok()
            .and_then(|n| MenuCommand::try_from(n).ok())
            .ok_or_else(|| InvalidChoice(s.trim().to_string()))
    }
}

/// Run the menu until the user exits or the input ends
///
/// # Errors
/// Returns an error only when the output cannot be written or the input
/// cannot be read for a reason other than reaching its end
pub fn run_menu<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    loop {
        prompter.say(MENU_TEXT)?;
        let choice = match prompter.read_line("Enter your choice") {
            Ok(choice) => choice,
            Err(e) if e.is_end_of_input() => {
                info!("Input closed, leaving menu");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let command = match choice.parse::<MenuCommand>() {
            Ok(command) => command,
            Err(e) => {
                debug!("Rejected selection: {}", e);
                prompter.say(INVALID_CHOICE_MESSAGE)?;
                continue;
            }
        };

        if command == MenuCommand::Exit {
            prompter.say(EXIT_MESSAGE)?;
            return Ok(());
        }

        match run_command(db, prompter, command) {
            Ok(()) => {}
            Err(e) if e.is_end_of_input() => {
                info!("Input closed during {:?}, leaving menu", command);
                return Ok(());
            }
            Err(e @ PoiseError::Io(_)) => return Err(e),
            Err(e) => {
                if e.is_store_error() {
                    error!("{:?} failed: {}", command, e);
                } else {
                    warn!("{:?} rejected: {}", command, e);
                }
                prompter.say(format!("{}: {e}", command.failure_context()))?;
            }
        }
    }
}

/// Run one menu selection against the store
///
/// # Errors
/// Returns whatever the store or the prompter reports
pub fn run_command<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
    command: MenuCommand,
) -> Result<()> {
    debug!("Running {:?}", command);
    match command {
        MenuCommand::Exit => Ok(()),
        MenuCommand::ViewAll => print_projects(&db.list_all()?, prompter.output()),
        MenuCommand::AddProject => add_project(db, prompter),
        MenuCommand::UpdateProject => update_project(db, prompter),
        MenuCommand::DeleteProject => delete_project(db, prompter),
        MenuCommand::FinaliseProject => finalise_project(db, prompter),
        MenuCommand::ViewIncomplete => print_projects(&db.list_incomplete()?, prompter.output()),
        MenuCommand::ViewOverdue => print_projects(&db.list_overdue()?, prompter.output()),
        MenuCommand::Search => search_projects(db, prompter),
    }
}

fn read_amount<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>, prompt: &str) -> Result<Decimal> {
    loop {
        let amount = prompter.read_decimal(prompt)?;
        if amount >= Decimal::ZERO {
            return Ok(amount);
        }
        prompter.say(NEGATIVE_AMOUNT_MESSAGE)?;
    }
}

/// Like `read_amount`, with a blank line meaning "keep the current amount"
fn read_optional_amount<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    prompt: &str,
) -> Result<Option<Decimal>> {
    loop {
        match prompter.read_optional_decimal(prompt)? {
            Some(amount) if amount < Decimal::ZERO => prompter.say(NEGATIVE_AMOUNT_MESSAGE)?,
            amount => return Ok(amount),
        }
    }
}

fn add_project<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let project_number = prompter.read_optional_string("Enter Project Number (leave blank for none)")?;
    let building_type = prompter.read_string("Enter Building Type", false)?;
    let name = prompter.read_optional_string("Enter Project Name (leave blank to auto-generate)")?;
    let address = prompter.read_string("Enter Address", false)?;
    let erf_number = prompter.read_string("Enter ERF Number", false)?;
    let total_fee = read_amount(prompter, "Enter Total Fee")?;
    let amount_paid = read_amount(prompter, "Enter Amount Paid")?;
    let deadline = prompter.read_required_date("Enter Deadline")?;
    let structural_engineer =
        prompter.read_optional_string("Enter Structural Engineer's Name (leave blank if none)")?;

    let customer_id = select_person(db, prompter, PersonRole::Customer)?;
    let architect_id = select_person(db, prompter, PersonRole::Architect)?;
    let manager_id = select_person(db, prompter, PersonRole::ProjectManager)?;

    let created = db.create_project(&NewProject {
        project_number,
        name,
        building_type,
        address,
        erf_number,
        total_fee,
        amount_paid,
        deadline,
        customer_id,
        architect_id,
        manager_id,
        structural_engineer,
    })?;

    if created.name_generated {
        prompter.say(format!("Generated Project Name: {}", created.name))?;
    }
    prompter.say(format!(
        "{} project(s) added successfully.",
        created.rows_affected
    ))
}

/// List a role's people and read a selection until it names one or creates one
fn select_person<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
    role: PersonRole,
) -> Result<PersonId> {
    loop {
        let people = db.list_people(role)?;
        print_people(role, &people, prompter.output())?;

        let input = prompter.read_string(&format!("Enter {role} ID or type 'new' to create"), false)?;
        let mut created = false;
        let result = db.resolve_or_create_person(role, &input, || {
            created = true;
            capture_person(prompter)
        });

        match result {
            Ok(id) => {
                if created {
                    prompter.say(format!("{role} created successfully with ID: {id}"))?;
                }
                return Ok(id);
            }
            Err(e @ (PoiseError::InvalidPersonId { .. } | PoiseError::PersonNotFound { .. })) => {
                prompter.say(format!("{e}. Please try again."))?;
            }
            Err(e) => return Err(e),
        }
    }
}

fn capture_person<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<NewPerson> {
    Ok(NewPerson {
        first_name: prompter.read_string("Enter First Name", false)?,
        last_name: prompter.read_string("Enter Last Name", false)?,
        email: prompter.read_string("Enter Email", true)?,
        phone: prompter.read_string("Enter Phone", true)?,
        address: prompter.read_string("Enter Address", true)?,
    })
}

fn update_project<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let id: ProjectId = prompter.read_integer("Enter Project ID to update")?;
    let name = prompter.read_optional_string("Enter New Name (or leave blank to keep current)")?;
    let deadline = prompter.read_date("Enter New Deadline, blank to keep current", true)?;
    let amount_paid =
        read_optional_amount(prompter, "Enter New Amount Paid (or leave blank to keep current)")?;

    let mut rows = db.update_project(&UpdateProjectRequest { id, name, deadline })?;
    if let Some(amount_paid) = amount_paid {
        rows = rows.max(db.update_amount_paid(id, amount_paid)?);
    }

    if rows > 0 {
        prompter.say("Project updated successfully.")
    } else {
        prompter.say(NO_PROJECT_MESSAGE)
    }
}

fn delete_project<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let id: ProjectId = prompter.read_integer("Enter Project ID to delete")?;
    let rows = db.delete_project(id)?;

    if rows > 0 {
        prompter.say(format!("{rows} project(s) deleted successfully."))
    } else {
        prompter.say(NO_PROJECT_MESSAGE)
    }
}

fn finalise_project<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let id: ProjectId = prompter.read_integer("Enter Project ID to finalize")?;
    let completion_date = prompter.read_date("Enter Completion Date, blank for today", true)?;
    let rows = db.finalise_project(id, completion_date)?;

    if rows > 0 {
        prompter.say(format!("{rows} project(s) finalized successfully."))
    } else {
        prompter.say("No unfinalised project found with the given ID.")
    }
}

fn search_projects<R: BufRead, W: Write>(
    db: &ProjectDatabase,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let term = prompter.read_string("Enter Project ID, Number or Name to search", false)?;
    let results = db.search(&term)?;

    if results.is_empty() {
        prompter.say(NO_SEARCH_MATCH_MESSAGE)
    } else {
        print_projects(&results, prompter.output())
    }
}
