use crate::identifier::AccountObjectIdentifier;

/// Snowflake Database entry.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct Database {
    /// The Database name in Snowflake.
    pub name: String,
    pub created_on: String,
    pub is_default: bool,
    pub is_current: bool,
    pub origin: String,
    pub owner: String,
    pub comment: String,
    pub options: String,
    pub retention_time: String,
    pub kind: String,
    pub owner_role_type: String,
    pub resource_group: String,
    pub dropped_on: String,
}

impl Database {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    pub fn is_transient(&self) -> bool {
        self.options.to_uppercase().contains("TRANSIENT") || self.kind.eq_ignore_ascii_case("TRANSIENT")
    }
}
