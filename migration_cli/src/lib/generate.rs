//! The per-object-type generation pipeline.

use anyhow::Result;

use migration_core::{
    convert_csv_input,
    logging::{debug, warn},
    resource_id::ResourceIdRegistry,
    CsvGrid, CsvRow, ImportRenderer, ImportStatementType,
};
use migration_snowflake::{
    grants::group_grants,
    model::{self, Mapped},
    rows::{
        AccountRoleRow, DatabaseRoleRow, DatabaseRow, GrantRow, SchemaRow, UserRow, WarehouseRow,
    },
};

use crate::cmd::ObjectType;

fn map_rows<T: CsvRow>(
    grid: &CsvGrid,
    map: impl Fn(&T::Representation) -> Result<Mapped>,
) -> Result<Vec<Mapped>> {
    convert_csv_input::<T>(grid)?.iter().map(map).collect()
}

/// Grant groups no resource can express are logged and skipped.
fn map_grants(grid: &CsvGrid) -> Result<Vec<Mapped>> {
    let grants = convert_csv_input::<GrantRow>(grid)?;
    let groups = group_grants(grants);
    debug!("{} grant groups", groups.len());
    Ok(groups
        .iter()
        .filter_map(|(key, group)| match model::map_grant_group(group) {
            Ok(mapped) => Some(mapped),
            Err(e) => {
                warn!("skipping grant group {key}: {e:#}");
                None
            }
        })
        .collect())
}

/// Map every object of the input to resources with unique local names.
pub(crate) fn map_objects(object_type: ObjectType, grid: &CsvGrid) -> Result<Vec<Mapped>> {
    let mut mapped = match object_type {
        ObjectType::Grants => map_grants(grid)?,
        ObjectType::Schemas => map_rows::<SchemaRow>(grid, model::map_schema)?,
        ObjectType::Databases => map_rows::<DatabaseRow>(grid, model::map_database)?,
        ObjectType::Warehouses => map_rows::<WarehouseRow>(grid, model::map_warehouse)?,
        ObjectType::AccountRoles => map_rows::<AccountRoleRow>(grid, model::map_account_role)?,
        ObjectType::DatabaseRoles => map_rows::<DatabaseRoleRow>(grid, model::map_database_role)?,
        ObjectType::Users => map_rows::<UserRow>(grid, model::map_user)?,
    };

    let mut registry = ResourceIdRegistry::new();
    for (resource, import) in &mut mapped {
        let name = registry.claim(resource.name());
        if name != resource.name() {
            resource.rename(&name);
            import.rename(&name);
        }
    }
    Ok(mapped)
}

/// Render all resources, then all import directives.
pub(crate) fn render(mapped: &[Mapped], statement_type: ImportStatementType) -> Result<String> {
    let renderer = ImportRenderer::new(statement_type)?;
    let mut out = String::new();
    for (resource, _) in mapped {
        out.push_str(&resource.render());
    }
    for (_, import) in mapped {
        out.push_str(&renderer.render(import)?);
    }
    Ok(out)
}

/// Generate the configuration for the objects in `grid`.
pub fn generate(
    object_type: ObjectType,
    grid: &CsvGrid,
    statement_type: ImportStatementType,
) -> Result<String> {
    migration_core::log_runtime!(format!("generating {object_type}"), {
        let mapped = map_objects(object_type, grid)?;
        debug!("generated {} {object_type} resources", mapped.len());
        render(&mapped, statement_type)
    })
}
