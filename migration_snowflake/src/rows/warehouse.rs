use anyhow::{bail, Context, Result};
use migration_core::{
    convert::CsvColumn, csv_row, parameter_set, CsvRow, ParameterLevel, ParameterResolver,
};

use crate::entry_types::{Warehouse, WarehouseSize};

parameter_set! {
    /// Parameters that can be set on a warehouse.
    pub struct WarehouseParameters {
        max_concurrency_level: i64,
        statement_queued_timeout_in_seconds: i64,
        statement_timeout_in_seconds: i64,
    }
}

csv_row! {
    /// A line of `SHOW WAREHOUSES`, joined with the warehouse's parameters.
    pub struct WarehouseRow {
        name: String => "name",
        state: String => "state",
        warehouse_type: String => "type",
        size: String => "size",
        min_cluster_count: String => "min_cluster_count",
        max_cluster_count: String => "max_cluster_count",
        started_clusters: String => "started_clusters",
        running: String => "running",
        queued: String => "queued",
        is_default: String => "is_default",
        is_current: String => "is_current",
        auto_suspend: String => "auto_suspend",
        auto_resume: bool => "auto_resume",
        available: String => "available",
        provisioning: String => "provisioning",
        quiescing: String => "quiescing",
        other: String => "other",
        created_on: String => "created_on",
        resumed_on: String => "resumed_on",
        updated_on: String => "updated_on",
        owner: String => "owner",
        comment: String => "comment",
        enable_query_acceleration: bool => "enable_query_acceleration",
        query_acceleration_max_scale_factor: String => "query_acceleration_max_scale_factor",
        resource_monitor: String => "resource_monitor",
        scaling_policy: String => "scaling_policy",
        owner_role_type: String => "owner_role_type",
        resource_constraint: String => "resource_constraint",
    }
    parameters: WarehouseParameters
}

/// A warehouse with the parameters set on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseRepresentation {
    pub warehouse: Warehouse,
    pub parameters: WarehouseParameters,
}

fn parse_int(column: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("invalid {column} value {value:?}"))
}

/// Settings the warehouse resource always carries can't be blank.
fn required(column: &str, value: &str) -> Result<String> {
    match value.trim() {
        "" => bail!("missing {column} value"),
        v => Ok(v.to_owned()),
    }
}

/// `SHOW WAREHOUSES` prints `null` when a warehouse never suspends.
fn parse_auto_suspend(value: &str) -> Result<i64> {
    match value.trim() {
        "" => Ok(0),
        v if v.eq_ignore_ascii_case("null") => Ok(0),
        v => parse_int("auto_suspend", v),
    }
}

impl CsvRow for WarehouseRow {
    type Representation = WarehouseRepresentation;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<WarehouseRepresentation> {
        let mut resolver = ParameterResolver::new(ParameterLevel::Warehouse);
        let size = resolver.collect(self.size.parse::<WarehouseSize>());
        let warehouse_type = resolver.collect(required("type", &self.warehouse_type));
        let scaling_policy = resolver.collect(required("scaling_policy", &self.scaling_policy));
        let min_cluster_count =
            resolver.collect(parse_int("min_cluster_count", &self.min_cluster_count));
        let max_cluster_count =
            resolver.collect(parse_int("max_cluster_count", &self.max_cluster_count));
        let auto_suspend = resolver.collect(parse_auto_suspend(&self.auto_suspend));
        let query_acceleration_max_scale_factor = resolver.collect(parse_int(
            "query_acceleration_max_scale_factor",
            &self.query_acceleration_max_scale_factor,
        ));
        let parameters = WarehouseParameters::resolve(&mut resolver, &self.parameters);
        // Every missing value above left an error behind.
        resolver.finish()?;

        Ok(WarehouseRepresentation {
            warehouse: Warehouse {
                name: self.name.clone(),
                state: self.state.clone(),
                warehouse_type: warehouse_type.context("type")?,
                size: size.context("size")?,
                min_cluster_count: min_cluster_count.context("min_cluster_count")?,
                max_cluster_count: max_cluster_count.context("max_cluster_count")?,
                auto_suspend: auto_suspend.context("auto_suspend")?,
                auto_resume: self.auto_resume,
                comment: self.comment.clone(),
                enable_query_acceleration: self.enable_query_acceleration,
                query_acceleration_max_scale_factor: query_acceleration_max_scale_factor
                    .context("query_acceleration_max_scale_factor")?,
                resource_monitor: self.resource_monitor.clone(),
                scaling_policy: scaling_policy.context("scaling_policy")?,
                owner: self.owner.clone(),
                owner_role_type: self.owner_role_type.clone(),
                resource_constraint: self.resource_constraint.clone(),
            },
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

    const HEADER: &[&str] = &[
        "name",
        "type",
        "size",
        "min_cluster_count",
        "max_cluster_count",
        "auto_suspend",
        "auto_resume",
        "enable_query_acceleration",
        "query_acceleration_max_scale_factor",
        "resource_monitor",
        "scaling_policy",
        "statement_timeout_in_seconds_value",
        "statement_timeout_in_seconds_level",
        "max_concurrency_level_value",
        "max_concurrency_level_level",
    ];

    #[test]
    fn converts_show_warehouses_output() -> Result<()> {
        let input = grid(&[
            HEADER,
            &[
                "WH", "STANDARD", "X-Small", "1", "2", "null", "true", "false", "8", "null",
                "STANDARD", "3600", "WAREHOUSE", "8", "ACCOUNT",
            ],
        ]);
        let result = convert_csv_input::<WarehouseRow>(&input)?;
        assert_eq!(result.len(), 1);
        let warehouse = &result[0].warehouse;
        assert_eq!(warehouse.size, WarehouseSize::XSmall);
        assert_eq!(warehouse.auto_suspend, 0);
        assert_eq!(warehouse.max_cluster_count, 2);
        assert!(warehouse.auto_resume);
        assert_eq!(warehouse.resource_monitor(), None);
        assert_eq!(
            result[0].parameters,
            WarehouseParameters {
                statement_timeout_in_seconds: Some(3600),
                ..Default::default()
            }
        );
        assert_eq!(result, convert_csv_input::<WarehouseRow>(&reversed(&input))?);
        Ok(())
    }

    #[test]
    fn invalid_bools_skip_the_row() -> Result<()> {
        let input = grid(&[
            HEADER,
            &[
                "WH", "STANDARD", "X-Small", "1", "1", "600", "maybe", "false", "8", "", "STANDARD",
                "", "", "", "",
            ],
        ]);
        assert!(convert_csv_input::<WarehouseRow>(&input)?.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_numbers_are_reported_together() {
        let input = grid(&[
            HEADER,
            &[
                "WH", "STANDARD", "Galactic", "one", "1", "600", "true", "false", "8", "",
                "STANDARD", "", "", "", "",
            ],
        ]);
        let err = convert_csv_input::<WarehouseRow>(&input).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("Galactic"));
        assert!(message.contains("min_cluster_count"));
    }

    #[test]
    fn blank_type_and_scaling_policy_are_errors() {
        let input = grid(&[
            HEADER,
            &[
                "WH", "", "X-Small", "1", "1", "600", "true", "false", "8", "", " ", "", "", "",
                "",
            ],
        ]);
        let err = convert_csv_input::<WarehouseRow>(&input).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("missing type value"), "{message}");
        assert!(message.contains("missing scaling_policy value"), "{message}");
    }
}
