use anyhow::Result;
use migration_core::{
    convert::CsvColumn, csv_row, parameter_set, CsvRow, ParameterLevel, ParameterResolver,
};

use crate::entry_types::{is_yes, Database};

parameter_set! {
    /// Parameters that can be set on a database.
    pub struct DatabaseParameters {
        catalog: String,
        data_retention_time_in_days: i64,
        default_ddl_collation: String,
        enable_console_output: bool,
        external_volume: String,
        log_level: String,
        max_data_extension_time_in_days: i64,
        quoted_identifiers_ignore_case: bool,
        replace_invalid_characters: bool,
        storage_serialization_policy: String,
        suspend_task_after_num_failures: i64,
        task_auto_retry_attempts: i64,
        trace_level: String,
        user_task_managed_initial_warehouse_size: String,
        user_task_minimum_trigger_interval_in_seconds: i64,
        user_task_timeout_ms: i64,
    }
}

csv_row! {
    /// A line of `SHOW DATABASES`, joined with the database's parameters.
    pub struct DatabaseRow {
        created_on: String => "created_on",
        name: String => "name",
        is_default: String => "is_default",
        is_current: String => "is_current",
        origin: String => "origin",
        owner: String => "owner",
        comment: String => "comment",
        options: String => "options",
        retention_time: String => "retention_time",
        kind: String => "kind",
        owner_role_type: String => "owner_role_type",
        resource_group: String => "resource_group",
        dropped_on: String => "dropped_on",
    }
    parameters: DatabaseParameters
}

/// A database with the parameters set on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseRepresentation {
    pub database: Database,
    pub parameters: DatabaseParameters,
}

impl CsvRow for DatabaseRow {
    type Representation = DatabaseRepresentation;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<DatabaseRepresentation> {
        let database = Database {
            name: self.name.clone(),
            created_on: self.created_on.clone(),
            is_default: is_yes(&self.is_default),
            is_current: is_yes(&self.is_current),
            origin: self.origin.clone(),
            owner: self.owner.clone(),
            comment: self.comment.clone(),
            options: self.options.clone(),
            retention_time: self.retention_time.clone(),
            kind: self.kind.clone(),
            owner_role_type: self.owner_role_type.clone(),
            resource_group: self.resource_group.clone(),
            dropped_on: self.dropped_on.clone(),
        };

        let mut resolver = ParameterResolver::new(ParameterLevel::Database);
        let parameters = DatabaseParameters::resolve(&mut resolver, &self.parameters);
        resolver.finish()?;

        Ok(DatabaseRepresentation {
            database,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use migration_core::convert_csv_input;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rows::test_util::{grid, reversed};

    #[test]
    fn converts_show_databases_output() -> Result<()> {
        let input = grid(&[
            &["name", "is_default", "comment", "options", "kind"],
            &["DB", "N", "first\\nsecond", "TRANSIENT", "STANDARD"],
        ]);
        let result = convert_csv_input::<DatabaseRow>(&input)?;
        assert_eq!(result.len(), 1);
        let database = &result[0].database;
        assert_eq!(database.name, "DB");
        assert!(!database.is_default);
        assert_eq!(database.comment, "first\nsecond");
        assert!(database.is_transient());
        assert!(result[0].parameters.is_empty());
        Ok(())
    }

    #[test]
    fn keeps_only_database_level_parameters() -> Result<()> {
        let input = grid(&[
            &[
                "name",
                "data_retention_time_in_days_value",
                "data_retention_time_in_days_level",
                "log_level_value",
                "log_level_level",
                "enable_console_output_value",
                "enable_console_output_level",
                "catalog_value",
                "catalog_level",
            ],
            &["DB", "3", "DATABASE", "INFO", "ACCOUNT", "true", "DATABASE", "X", ""],
        ]);
        let result = convert_csv_input::<DatabaseRow>(&input)?;
        assert_eq!(
            result[0].parameters,
            DatabaseParameters {
                data_retention_time_in_days: Some(3),
                enable_console_output: Some(true),
                ..Default::default()
            }
        );
        assert_eq!(result, convert_csv_input::<DatabaseRow>(&reversed(&input))?);
        Ok(())
    }

    #[test]
    fn parameter_errors_are_reported_together() {
        let input = grid(&[
            &[
                "name",
                "data_retention_time_in_days_value",
                "data_retention_time_in_days_level",
                "enable_console_output_value",
                "enable_console_output_level",
            ],
            &["DB", "three", "DATABASE", "sometimes", "DATABASE"],
        ]);
        let err = convert_csv_input::<DatabaseRow>(&input).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("data_retention_time_in_days"));
        assert!(message.contains("enable_console_output"));
    }
}
