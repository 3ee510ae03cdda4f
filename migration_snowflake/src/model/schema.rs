use anyhow::Result;
use migration_core::{ImportModel, ResourceModel};

use super::{resource_name, Mapped};
use crate::consts::SCHEMA_RESOURCE;
use crate::identifier::ObjectIdentifier;
use crate::rows::SchemaRepresentation;

/// Map a schema to a `snowflake_schema`.
pub fn map_schema(representation: &SchemaRepresentation) -> Result<Mapped> {
    let schema = &representation.schema;
    let id = schema.id();

    let mut resource = ResourceModel::new(SCHEMA_RESOURCE, resource_name("schema", &id));
    resource
        .set("database", &schema.database_name)
        .set("name", &schema.name)
        .set_if_not_empty("comment", &schema.comment);
    if schema.is_transient() {
        resource.set("is_transient", "true");
    }
    if schema.is_managed_access() {
        resource.set("with_managed_access", "true");
    }
    representation.parameters.apply(&mut resource);

    let import = ImportModel::new(&resource, id.fully_qualified_name());
    Ok((resource, import))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::test_util::convert_one;
    use crate::rows::SchemaRow;

    #[test]
    fn maps_schemas() -> Result<()> {
        let representation = convert_one::<SchemaRow>(&[
            &[
                "database_name",
                "name",
                "options",
                "pipe_execution_paused_value",
                "pipe_execution_paused_level",
            ],
            &["DB", "S", "TRANSIENT, MANAGED ACCESS", "false", "SCHEMA"],
        ])?;
        let (resource, import) = map_schema(&representation)?;
        assert_eq!(
            resource.render(),
            r#"resource "snowflake_schema" "snowflake_generated_schema_DB_S" {
  database = "DB"
  is_transient = "true"
  name = "S"
  pipe_execution_paused = false
  with_managed_access = "true"
}
"#
        );
        assert_eq!(import.id(), "\"DB\".\"S\"");
        Ok(())
    }
}
