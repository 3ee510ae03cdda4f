use anyhow::Result;
use migration_core::{ImportModel, ResourceModel};

use super::{bool_string, resource_name, Mapped};
use crate::consts::WAREHOUSE_RESOURCE;
use crate::identifier::ObjectIdentifier;
use crate::rows::WarehouseRepresentation;

/// Map a warehouse to a `snowflake_warehouse`.
///
/// `SHOW WAREHOUSES` doesn't tell whether a setting still has its default
/// value, so the sizing and scheduling settings are always written out.
pub fn map_warehouse(representation: &WarehouseRepresentation) -> Result<Mapped> {
    let warehouse = &representation.warehouse;
    let id = warehouse.id();

    let mut resource = ResourceModel::new(WAREHOUSE_RESOURCE, resource_name("warehouse", &id));
    resource
        .set("auto_resume", bool_string(warehouse.auto_resume))
        .set("auto_suspend", warehouse.auto_suspend)
        .set("max_cluster_count", warehouse.max_cluster_count)
        .set("min_cluster_count", warehouse.min_cluster_count)
        .set(
            "query_acceleration_max_scale_factor",
            warehouse.query_acceleration_max_scale_factor,
        )
        .set("scaling_policy", &warehouse.scaling_policy)
        .set("warehouse_size", warehouse.size.as_str())
        .set("warehouse_type", &warehouse.warehouse_type)
        .set_if_not_empty("name", &warehouse.name)
        .set_if_not_empty("comment", &warehouse.comment)
        .set_optional("resource_monitor", warehouse.resource_monitor());
    if warehouse.enable_query_acceleration {
        resource.set("enable_query_acceleration", "true");
    }
    if !warehouse.resource_constraint.eq_ignore_ascii_case("null") {
        resource.set_if_not_empty("resource_constraint", &warehouse.resource_constraint);
    }
    representation.parameters.apply(&mut resource);

    let import = ImportModel::new(&resource, id.fully_qualified_name());
    Ok((resource, import))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use migration_core::HclValue;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::test_util::convert_one;
    use crate::rows::WarehouseRow;

    const HEADER: &[&str] = &[
        "name",
        "state",
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
        "comment",
    ];

    #[test]
    fn default_settings_are_always_written() -> Result<()> {
        let representation = convert_one::<WarehouseRow>(&[
            HEADER,
            &[
                "WH", "SUSPENDED", "STANDARD", "X-Small", "1", "1", "600", "true", "false", "8",
                "null", "STANDARD", "",
            ],
        ])?;
        let (resource, import) = map_warehouse(&representation)?;
        assert_eq!(
            resource.render(),
            r#"resource "snowflake_warehouse" "snowflake_generated_warehouse_WH" {
  auto_resume = "true"
  auto_suspend = 600
  max_cluster_count = 1
  min_cluster_count = 1
  name = "WH"
  query_acceleration_max_scale_factor = 8
  scaling_policy = "STANDARD"
  warehouse_size = "XSMALL"
  warehouse_type = "STANDARD"
}
"#
        );
        assert_eq!(import.id(), "\"WH\"");
        Ok(())
    }

    #[test]
    fn optional_settings_are_written_when_set() -> Result<()> {
        let representation = convert_one::<WarehouseRow>(&[
            HEADER,
            &[
                "WH", "STARTED", "SNOWPARK-OPTIMIZED", "2X-Large", "1", "3", "null", "false",
                "true", "4", "MONITOR", "ECONOMY", "batch jobs",
            ],
        ])?;
        let (resource, _) = map_warehouse(&representation)?;
        let attributes: Vec<_> = resource.body().attribute_names().collect();
        assert_eq!(
            attributes,
            vec![
                "auto_resume",
                "auto_suspend",
                "comment",
                "enable_query_acceleration",
                "max_cluster_count",
                "min_cluster_count",
                "name",
                "query_acceleration_max_scale_factor",
                "resource_monitor",
                "scaling_policy",
                "warehouse_size",
                "warehouse_type",
            ]
        );
        assert_eq!(
            resource.attribute("warehouse_size"),
            Some(&HclValue::from("XXLARGE"))
        );
        assert_eq!(resource.attribute("auto_suspend"), Some(&HclValue::from(0i64)));
        Ok(())
    }
}
