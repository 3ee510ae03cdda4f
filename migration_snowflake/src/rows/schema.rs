use anyhow::Result;
use migration_core::{
    convert::CsvColumn, csv_row, parameter_set, CsvRow, ParameterLevel, ParameterResolver,
};

use crate::entry_types::{is_yes, Schema};

parameter_set! {
    /// Parameters that can be set on a schema.
    pub struct SchemaParameters {
        catalog: String,
        data_retention_time_in_days: i64,
        default_ddl_collation: String,
        enable_console_output: bool,
        external_volume: String,
        log_level: String,
        max_data_extension_time_in_days: i64,
        pipe_execution_paused: bool,
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
    /// A line of `SHOW SCHEMAS`, joined with the schema's parameters.
    pub struct SchemaRow {
        created_on: String => "created_on",
        name: String => "name",
        is_default: String => "is_default",
        is_current: String => "is_current",
        database_name: String => "database_name",
        owner: String => "owner",
        comment: String => "comment",
        options: String => "options",
        retention_time: String => "retention_time",
        owner_role_type: String => "owner_role_type",
    }
    parameters: SchemaParameters
}

/// A schema with the parameters set on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRepresentation {
    pub schema: Schema,
    pub parameters: SchemaParameters,
}

impl CsvRow for SchemaRow {
    type Representation = SchemaRepresentation;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<SchemaRepresentation> {
        let schema = Schema {
            name: self.name.clone(),
            database_name: self.database_name.clone(),
            created_on: self.created_on.clone(),
            is_default: is_yes(&self.is_default),
            is_current: is_yes(&self.is_current),
            owner: self.owner.clone(),
            comment: self.comment.clone(),
            options: self.options.clone(),
            retention_time: self.retention_time.clone(),
            owner_role_type: self.owner_role_type.clone(),
        };

        let mut resolver = ParameterResolver::new(ParameterLevel::Schema);
        let parameters = SchemaParameters::resolve(&mut resolver, &self.parameters);
        resolver.finish()?;

        Ok(SchemaRepresentation { schema, parameters })
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
    fn schema_parameters_are_filtered_by_level() -> Result<()> {
        let input = grid(&[
            &[
                "database_name",
                "name",
                "options",
                "pipe_execution_paused_value",
                "pipe_execution_paused_level",
                "data_retention_time_in_days_value",
                "data_retention_time_in_days_level",
            ],
            &["DB", "S", "MANAGED ACCESS", "true", "SCHEMA", "1", "DATABASE"],
        ]);
        let result = convert_csv_input::<SchemaRow>(&input)?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].schema.database_name, "DB");
        assert!(result[0].schema.is_managed_access());
        assert!(!result[0].schema.is_transient());
        assert_eq!(
            result[0].parameters,
            SchemaParameters {
                pipe_execution_paused: Some(true),
                ..Default::default()
            }
        );
        assert_eq!(result, convert_csv_input::<SchemaRow>(&reversed(&input))?);
        Ok(())
    }

    #[test]
    fn unknown_parameter_level_fails_the_row() {
        let input = grid(&[
            &["name", "log_level_value", "log_level_level"],
            &["S", "INFO", "GALAXY"],
        ]);
        assert!(convert_csv_input::<SchemaRow>(&input).is_err());
    }
}
