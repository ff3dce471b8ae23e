//! Constants for the Poise project tracker

/// Default database filename, created in the working directory
pub const DATABASE_FILENAME: &str = "PoisePMS.sqlite";

/// Environment variable overriding the database path
pub const ENV_DATABASE_PATH: &str = "POISE_DATABASE_PATH";

/// Environment variable controlling schema bootstrap on open
pub const ENV_CREATE_SCHEMA: &str = "POISE_CREATE_SCHEMA";

/// The one accepted calendar date format (ISO 8601 `YYYY-MM-DD`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Keyword that selects the "create a new person" path during selection
pub const NEW_PERSON_KEYWORD: &str = "new";

/// Decimal places kept for monetary amounts
pub const MONEY_SCALE: u32 = 2;

/// Exclusive upper bound on the magnitude of a monetary amount, in whole units
pub const MAX_MONEY_UNITS: i64 = 1_000_000_000_000_000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_filename() {
        assert_eq!(DATABASE_FILENAME, "PoisePMS.sqlite");
    }

    #[test]
    fn test_env_var_names() {
        assert_eq!(ENV_DATABASE_PATH, "POISE_DATABASE_PATH");
        assert_eq!(ENV_CREATE_SCHEMA, "POISE_CREATE_SCHEMA");
    }

    #[test]
    fn test_date_format() {
        assert_eq!(DATE_FORMAT, "%Y-%m-%d");
    }

    #[test]
    fn test_new_person_keyword() {
        assert_eq!(NEW_PERSON_KEYWORD, "new");
    }

    #[test]
    fn test_money_scale() {
        assert_eq!(MONEY_SCALE, 2);
        assert_eq!(MAX_MONEY_UNITS, 10_i64.pow(15));
    }
}
