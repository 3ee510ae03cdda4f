use crate::identifier::{AccountObjectIdentifier, DatabaseObjectIdentifier};

/// Snowflake Role entry.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Role {
    /// The role name in Snowflake.
    pub name: String,
    pub created_on: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub assigned_to_users: String,
    pub granted_to_roles: String,
    pub granted_roles: String,
    pub owner: String,
    pub comment: String,
}

impl Role {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }
}

/// Snowflake Database Role entry.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct DatabaseRole {
    /// The role name in Snowflake.
    pub name: String,
    pub database_name: String,
    pub created_on: String,
    pub is_default: bool,
    pub is_current: bool,
    pub is_inherited: bool,
    pub granted_to_roles: String,
    pub granted_to_database_roles: String,
    pub granted_database_roles: String,
    pub owner: String,
    pub comment: String,
    pub owner_role_type: String,
}

impl DatabaseRole {
    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.name)
    }
}
