//! Poise CLI library
//!
//! Argument parsing, listing output and the interactive menu for the `poise` binary.

pub mod logging;
pub mod menu;

use clap::Parser;
use poise_common::{format_date, format_money};
use poise_core::{Person, PersonRole, PoiseConfig, ProjectDetails, Result};
use std::io::Write;
use std::path::PathBuf;

pub use menu::{run_menu, MenuCommand};

#[derive(Parser, Debug)]
#[command(name = "poise")]
#[command(about = "Project tracker for the Poised structural engineering firm")]
#[command(version)]
pub struct Cli {
    /// Database path (defaults to PoisePMS.sqlite in the working directory)
    #[arg(long, short, env = "POISE_DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Fail instead of creating the database or its tables when missing
    #[arg(long)]
    pub no_create_schema: bool,

    /// Verbose output
    #[arg(long, short)]
    pub verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Store configuration: environment first, then flags on top
    #[must_use]
    pub fn config(&self) -> PoiseConfig {
        let mut config = PoiseConfig::from_env();
        if let Some(path) = &self.database {
            config.database_path.clone_from(path);
        }
        if self.no_create_schema {
            config.create_schema = false;
        }
        config
    }

    #[must_use]
    pub fn log_options(&self) -> logging::LogOptions {
        logging::LogOptions {
            verbose: self.verbose,
            log_file: self.log_file.clone(),
            json: self.log_json,
        }
    }
}

/// Print projects to the given writer
///
/// # Examples
///
/// ```no_run
/// use poise_cli::print_projects;
/// use poise_core::{PoiseConfig, ProjectDatabase};
/// use std::io;
///
/// # fn example() -> poise_core::Result<()> {
/// let db = ProjectDatabase::open(&PoiseConfig::from_env())?;
/// let projects = db.list_incomplete()?;
/// print_projects(&projects, &mut io::stdout())?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
/// Returns an error if writing fails
pub fn print_projects<W: Write>(projects: &[ProjectDetails], writer: &mut W) -> Result<()> {
    if projects.is_empty() {
        writeln!(writer, "No projects found.")?;
        return Ok(());
    }

    writeln!(writer, "Found {} project(s):", projects.len())?;
    for details in projects {
        let project = &details.project;
        writeln!(writer)?;
        writeln!(writer, "Project ID: {}", project.id)?;
        if let Some(number) = &project.project_number {
            writeln!(writer, "Project Number: {number}")?;
        }
        writeln!(writer, "Project Name: {}", project.name)?;
        writeln!(writer, "Building Type: {}", project.building_type)?;
        writeln!(writer, "Address: {}", project.address)?;
        writeln!(writer, "ERF Number: {}", project.erf_number)?;
        writeln!(writer, "Total Fee: {}", format_money(&project.total_fee))?;
        writeln!(writer, "Amount Paid: {}", format_money(&project.amount_paid))?;
        writeln!(writer, "Deadline: {}", format_date(&project.deadline))?;
        writeln!(writer, "Finalised: {}", project.finalised)?;
        if let Some(completed) = &project.completion_date {
            writeln!(writer, "Completion Date: {}", format_date(completed))?;
        }
        if let Some(customer) = &details.customer {
            writeln!(writer, "Customer: {}", customer.full_name())?;
        }
        if let Some(architect) = &details.architect {
            writeln!(writer, "Architect: {}", architect.full_name())?;
        }
        if let Some(manager) = &details.manager {
            writeln!(writer, "Project Manager: {}", manager.full_name())?;
            writeln!(writer, "Manager Email: {}", manager.email)?;
        }
        if let Some(engineer) = &project.structural_engineer {
            writeln!(writer, "Structural Engineer: {engineer}")?;
        }
    }
    Ok(())
}

/// Print the people of one role as `id: first last` lines
///
/// # Errors
/// Returns an error if writing fails
pub fn print_people<W: Write>(role: PersonRole, people: &[Person], writer: &mut W) -> Result<()> {
    writeln!(writer)?;
    writeln!(writer, "Available {role}s:")?;
    if people.is_empty() {
        writeln!(writer, "  (none yet)")?;
    }
    for person in people {
        writeln!(writer, "{}: {}", person.id, person.full_name())?;
    }
    Ok(())
}
