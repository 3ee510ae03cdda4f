use anyhow::Result;
use migration_core::{ImportModel, ResourceModel};

use super::{resource_name, Mapped};
use crate::consts::DATABASE_RESOURCE;
use crate::identifier::ObjectIdentifier;
use crate::rows::DatabaseRepresentation;

/// Map a database to a `snowflake_database`.
pub fn map_database(representation: &DatabaseRepresentation) -> Result<Mapped> {
    let database = &representation.database;
    let id = database.id();

    let mut resource = ResourceModel::new(DATABASE_RESOURCE, resource_name("database", &id));
    resource
        .set("name", &database.name)
        .set_if_not_empty("comment", &database.comment);
    if database.is_transient() {
        resource.set("is_transient", true);
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
    use crate::rows::DatabaseRow;

    #[test]
    fn maps_databases_with_their_parameters() -> Result<()> {
        let representation = convert_one::<DatabaseRow>(&[
            &[
                "name",
                "comment",
                "options",
                "data_retention_time_in_days_value",
                "data_retention_time_in_days_level",
                "log_level_value",
                "log_level_level",
            ],
            &["DB", "analytics", "TRANSIENT", "1", "DATABASE", "INFO", "ACCOUNT"],
        ])?;
        let (resource, import) = map_database(&representation)?;
        assert_eq!(
            resource.render(),
            r#"resource "snowflake_database" "snowflake_generated_database_DB" {
  comment = "analytics"
  data_retention_time_in_days = 1
  is_transient = true
  name = "DB"
}
"#
        );
        assert_eq!(import.id(), "\"DB\"");
        Ok(())
    }
}
