use crate::{
    config::PoiseConfig,
    database::{mappers::map_project_details_row, query_builders::ProjectFilter, validators},
    error::{PoiseError, Result},
    models::{
        CreatedProject, NewProject, PersonRole, ProjectDetails, ProjectId, UpdateProjectRequest,
    },
};
use chrono::NaiveDate;
use poise_common::{format_money, is_storable_money, like_pattern};
use rusqlite::{params, Connection, OptionalExtension, Params};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

/// Tables and constraints of the project store
///
/// Every statement is idempotent, so running the batch against an existing
/// store leaves it untouched.
pub const SCHEMA: &str = r"
    CREATE TABLE IF NOT EXISTS customer (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS architect (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS project_manager (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT '',
        phone TEXT NOT NULL DEFAULT '',
        address TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS project (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        project_number TEXT UNIQUE,
        name TEXT NOT NULL,
        building_type TEXT NOT NULL,
        address TEXT NOT NULL,
        erf_number TEXT NOT NULL,
        total_fee TEXT NOT NULL,
        amount_paid TEXT NOT NULL,
        deadline TEXT NOT NULL,
        completion_date TEXT,
        finalised INTEGER NOT NULL DEFAULT 0,
        customer_id INTEGER NOT NULL REFERENCES customer (id),
        architect_id INTEGER NOT NULL REFERENCES architect (id),
        manager_id INTEGER NOT NULL REFERENCES project_manager (id),
        structural_engineer TEXT,
        CHECK (finalised = 0 OR completion_date IS NOT NULL)
    );
";

const REQUIRED_TABLES: [&str; 4] = ["customer", "architect", "project_manager", "project"];

/// Synchronous access to the project store over a single connection
///
/// The connection lives as long as this value and is closed when it is dropped.
pub struct ProjectDatabase {
    conn: Connection,
}

impl std::fmt::Debug for ProjectDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectDatabase")
            .field("path", &self.conn.path())
            .finish()
    }
}

impl ProjectDatabase {
    /// Open the store described by `config`
    ///
    /// With `create_schema` set, a missing file is created and missing tables
    /// are bootstrapped. Without it, the file and all four tables must exist.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the store is missing and may not be
    /// created, or a database error if the connection cannot be established
    #[instrument]
    pub fn open(config: &PoiseConfig) -> Result<Self> {
        let path = config.get_effective_database_path()?;
        info!("Opening project store at {}", path.display());

        let conn = Connection::open(&path)?;
        let db = Self::from_connection(conn)?;

        if config.create_schema {
            db.initialize_schema()?;
        } else if !db.has_schema()? {
            return Err(PoiseError::configuration(format!(
                "Database at {} is missing project tables and schema creation is disabled",
                path.display()
            )));
        }

        Ok(db)
    }

    /// Open a fresh in-memory store with the schema in place
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created
    pub fn open_in_memory() -> Result<Self> {
        let db = Self::from_connection(Connection::open_in_memory()?)?;
        db.initialize_schema()?;
        Ok(db)
    }

    /// Open the store at `path`, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema bootstrap fails
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open(&PoiseConfig::new(path, true))
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// The underlying connection
    #[must_use]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create any missing tables
    ///
    /// # Errors
    ///
    /// Returns an error if a statement fails
    pub fn initialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        debug!("Project store schema is in place");
        Ok(())
    }

    fn has_schema(&self) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
        for table in REQUIRED_TABLES {
            let count: i64 = stmt.query_row([table], |row| row.get(0))?;
            if count == 0 {
                warn!("Project store is missing table {}", table);
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn query_projects<P: Params>(
        &self,
        filter: ProjectFilter,
        params: P,
    ) -> Result<Vec<ProjectDetails>> {
        let mut stmt = self.conn.prepare(&filter.to_sql())?;
        let rows = stmt.query_map(params, map_project_details_row)?;
        let projects = rows
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                error!("Failed to read projects: {}", e);
                e
            })?;

        debug!("Fetched {} projects ({:?})", projects.len(), filter);
        Ok(projects)
    }

    /// Every project with its people, in storage order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<ProjectDetails>> {
        self.query_projects(ProjectFilter::All, [])
    }

    /// Projects that have not been finalised
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn list_incomplete(&self) -> Result<Vec<ProjectDetails>> {
        self.query_projects(ProjectFilter::Incomplete, [])
    }

    /// Unfinalised projects whose deadline is before today's local date
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn list_overdue(&self) -> Result<Vec<ProjectDetails>> {
        self.list_overdue_as_of(chrono::Local::now().date_naive())
    }

    /// Unfinalised projects whose deadline is strictly before `today`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn list_overdue_as_of(&self, today: NaiveDate) -> Result<Vec<ProjectDetails>> {
        self.query_projects(ProjectFilter::OverdueAsOf, [today])
    }

    /// Projects whose id or project number equals `term`, or whose name
    /// contains it ignoring ASCII case
    ///
    /// SQLite's `LIKE` folds ASCII letters only, so `é` does not match `É`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn search(&self, term: &str) -> Result<Vec<ProjectDetails>> {
        let term = term.trim();
        self.query_projects(ProjectFilter::Search, params![term, like_pattern(term)])
    }

    /// One project with its people
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    #[instrument(skip(self))]
    pub fn get_project(&self, id: ProjectId) -> Result<Option<ProjectDetails>> {
        let project = self
            .conn
            .query_row(&ProjectFilter::ById.to_sql(), [id], map_project_details_row)
            .optional()?;
        Ok(project)
    }

    /// Insert a project
    ///
    /// The three people must already exist. A blank name is replaced by the
    /// building type followed by the customer's last name; if that lookup
    /// misses, the last name is taken as empty.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, `PersonNotFound` for a
    /// dangling reference, or a database error such as a duplicate project number
    #[instrument(skip(self, project), fields(building_type = %project.building_type))]
    pub fn create_project(&self, project: &NewProject) -> Result<CreatedProject> {
        project.validate()?;

        if project.amount_paid > project.total_fee {
            warn!(
                "Amount paid {} exceeds total fee {}",
                project.amount_paid, project.total_fee
            );
        }

        validators::validate_person_exists(&self.conn, PersonRole::Customer, project.customer_id)?;
        validators::validate_person_exists(
            &self.conn,
            PersonRole::Architect,
            project.architect_id,
        )?;
        validators::validate_person_exists(
            &self.conn,
            PersonRole::ProjectManager,
            project.manager_id,
        )?;

        let supplied_name = project
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        let (name, name_generated) = match supplied_name {
            Some(name) => (name.to_string(), false),
            None => (self.generate_project_name(project), true),
        };

        let project_number = project
            .project_number
            .as_deref()
            .map(str::trim)
            .filter(|number| !number.is_empty());
        let structural_engineer = project
            .structural_engineer
            .as_deref()
            .map(str::trim)
            .filter(|engineer| !engineer.is_empty());

        let rows_affected = self
            .conn
            .execute(
                "INSERT INTO project (
                    project_number, name, building_type, address, erf_number,
                    total_fee, amount_paid, deadline, finalised,
                    customer_id, architect_id, manager_id, structural_engineer
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 0, ?9, ?10, ?11, ?12)",
                params![
                    project_number,
                    name,
                    project.building_type.trim(),
                    project.address.trim(),
                    project.erf_number.trim(),
                    format_money(&project.total_fee),
                    format_money(&project.amount_paid),
                    project.deadline,
                    project.customer_id,
                    project.architect_id,
                    project.manager_id,
                    structural_engineer,
                ],
            )
            .map_err(|e| {
                error!("Failed to create project: {}", e);
                e
            })?;

        let id = self.conn.last_insert_rowid();
        info!("Created project {} ({})", id, name);

        Ok(CreatedProject {
            id,
            name,
            name_generated,
            rows_affected,
        })
    }

    fn generate_project_name(&self, project: &NewProject) -> String {
        let last_name = match self.customer_last_name(project.customer_id) {
            Ok(Some(last_name)) => last_name,
            Ok(None) => String::new(),
            Err(e) => {
                debug!("Customer last name lookup failed: {}", e);
                String::new()
            }
        };
        format!("{} {}", project.building_type.trim(), last_name)
    }

    /// Change a project's name and/or deadline; `None` or a blank name keeps the stored value
    ///
    /// Returns the number of rows updated, 0 when the id is unknown.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    #[instrument(skip(self))]
    pub fn update_project(&self, request: &UpdateProjectRequest) -> Result<usize> {
        let name = request
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());

        let rows = self.conn.execute(
            "UPDATE project SET
                name = COALESCE(?2, name),
                deadline = COALESCE(?3, deadline)
             WHERE id = ?1",
            params![request.id, name, request.deadline],
        )?;

        debug!("Updated {} project row(s) for id {}", rows, request.id);
        Ok(rows)
    }

    /// Record a new amount paid
    ///
    /// # Errors
    ///
    /// Returns a validation error for a negative or oversized amount, or a
    /// database error
    #[instrument(skip(self))]
    pub fn update_amount_paid(&self, id: ProjectId, amount_paid: Decimal) -> Result<usize> {
        if amount_paid < Decimal::ZERO {
            return Err(PoiseError::validation("Amount paid cannot be negative"));
        }
        if !is_storable_money(&amount_paid) {
            return Err(PoiseError::validation("Amount paid is too large"));
        }

        let rows = self.conn.execute(
            "UPDATE project SET amount_paid = ?2 WHERE id = ?1",
            params![id, format_money(&amount_paid)],
        )?;

        debug!("Updated amount paid on {} project row(s)", rows);
        Ok(rows)
    }

    /// Remove a project; the people it references are kept
    ///
    /// An unknown id removes nothing and returns 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    #[instrument(skip(self))]
    pub fn delete_project(&self, id: ProjectId) -> Result<usize> {
        let rows = self
            .conn
            .execute("DELETE FROM project WHERE id = ?1", [id])?;

        if rows > 0 {
            info!("Deleted project {}", id);
        } else {
            debug!("No project with id {} to delete", id);
        }
        Ok(rows)
    }

    /// Mark a project finalised with the given completion date, or today's local date
    ///
    /// Only an unfinalised project is touched, so finalising twice affects 0
    /// rows and keeps the first completion date.
    ///
    /// # Errors
    ///
    /// Returns an error if the statement fails
    #[instrument(skip(self))]
    pub fn finalise_project(
        &self,
        id: ProjectId,
        completion_date: Option<NaiveDate>,
    ) -> Result<usize> {
        let completion_date = completion_date.unwrap_or_else(|| chrono::Local::now().date_naive());

        let rows = self.conn.execute(
            "UPDATE project SET finalised = 1, completion_date = ?2
             WHERE id = ?1 AND finalised = 0",
            params![id, completion_date],
        )?;

        if rows > 0 {
            info!("Finalised project {} on {}", id, completion_date);
        } else {
            debug!("Project {} not found or already finalised", id);
        }
        Ok(rows)
    }
}
