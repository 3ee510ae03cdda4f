use crate::identifier::DatabaseObjectIdentifier;

/// Snowflake Schema entry.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Schema {
    /// The schema name in Snowflake.
    pub name: String,
    /// The database the schema belongs to.
    pub database_name: String,
    pub created_on: String,
    pub is_default: bool,
    pub is_current: bool,
    pub owner: String,
    pub comment: String,
    pub options: String,
    pub retention_time: String,
    pub owner_role_type: String,
}

impl Schema {
    pub fn id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database_name, &self.name)
    }

    pub fn is_transient(&self) -> bool {
        self.options.to_uppercase().contains("TRANSIENT")
    }

    pub fn is_managed_access(&self) -> bool {
        self.options.to_uppercase().contains("MANAGED ACCESS")
    }
}
