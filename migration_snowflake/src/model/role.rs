use anyhow::Result;
use migration_core::{ImportModel, ResourceModel};

use super::{resource_name, Mapped};
use crate::consts::{ACCOUNT_ROLE_RESOURCE, DATABASE_ROLE_RESOURCE};
use crate::entry_types::{DatabaseRole, Role};
use crate::identifier::ObjectIdentifier;

/// Map an account role to a `snowflake_account_role`.
pub fn map_account_role(role: &Role) -> Result<Mapped> {
    let id = role.id();

    let mut resource =
        ResourceModel::new(ACCOUNT_ROLE_RESOURCE, resource_name("account_role", &id));
    resource
        .set("name", &role.name)
        .set_if_not_empty("comment", &role.comment);

    let import = ImportModel::new(&resource, id.fully_qualified_name());
    Ok((resource, import))
}

/// Map a database role to a `snowflake_database_role`.
pub fn map_database_role(role: &DatabaseRole) -> Result<Mapped> {
    let id = role.id();

    let mut resource =
        ResourceModel::new(DATABASE_ROLE_RESOURCE, resource_name("database_role", &id));
    resource
        .set("database", &role.database_name)
        .set("name", &role.name)
        .set_if_not_empty("comment", &role.comment);

    let import = ImportModel::new(&resource, id.fully_qualified_name());
    Ok((resource, import))
}
