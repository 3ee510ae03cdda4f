//! Mapping representations to Terraform resources and their imports.
//!
//! Optional attributes are only set when the export has a value for them,
//! so the generated configuration stays close to what a person would write.

mod database;
mod grant;
mod role;
mod schema;
mod user;
mod warehouse;

use migration_core::{resource_id::normalize_resource_id, ImportModel, ResourceModel};

use crate::identifier::ObjectIdentifier;

pub use database::map_database;
pub use grant::map_grant_group;
pub use role::{map_account_role, map_database_role};
pub use schema::map_schema;
pub use user::map_user;
pub use warehouse::map_warehouse;

/// A resource and the import adopting the existing object into it.
pub type Mapped = (ResourceModel, ImportModel);

/// `snowflake_generated_<kind>_<qualified name>`.
fn resource_name(kind: &str, id: &impl ObjectIdentifier) -> String {
    normalize_resource_id(&format!("{kind}_{}", id.fully_qualified_name()))
}

/// Flags some resources take as strings, to tell "false" from "unset".
fn bool_string(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use anyhow::{anyhow, Result};
    use migration_core::{convert_csv_input, CsvRow};

    use crate::rows::test_util::grid;

    /// Convert a single-row grid.
    pub(crate) fn convert_one<T: CsvRow>(rows: &[&[&str]]) -> Result<T::Representation> {
        convert_csv_input::<T>(&grid(rows))?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("no row converted"))
    }
}
