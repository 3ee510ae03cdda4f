use crate::identifier::{
    AccountObjectIdentifier, DatabaseObjectIdentifier, GrantObjectIdentifier, ObjectIdentifier,
};
use crate::object_type::ObjectType;

/// Snowflake Grant entry.
///
/// One privilege on one object, held by one grantee. Future grants carry
/// the type of the objects they will apply to in `grant_on`; grants of a
/// role (from `SHOW GRANTS OF ROLE` or `SHOW GRANTS TO USER`) carry the
/// granted role in `role` or `database_role`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub created_on: String,
    pub privilege: String,
    /// The type of the object the privilege is on, as printed.
    pub granted_on: String,
    /// For future grants: the type of the objects to come, as printed.
    pub grant_on: String,
    /// The object the privilege is on (or, for future grants, its container).
    pub name: GrantObjectIdentifier,
    /// The type of the grantee, as printed.
    pub granted_to: String,
    pub grantee_name: GrantObjectIdentifier,
    pub grant_option: bool,
    pub granted_by: String,
    pub role: Option<AccountObjectIdentifier>,
    pub database_role: Option<DatabaseObjectIdentifier>,
}

impl Grant {
    pub fn granted_on_type(&self) -> Option<ObjectType> {
        self.granted_on.parse().ok()
    }

    pub fn grant_on_type(&self) -> Option<ObjectType> {
        self.grant_on.parse().ok()
    }

    pub fn granted_to_type(&self) -> Option<ObjectType> {
        self.granted_to.parse().ok()
    }

    pub fn is_future(&self) -> bool {
        !self.grant_on.is_empty()
    }

    /// Key of the grant group this grant belongs to.
    ///
    /// Grants that only differ by privilege share a key. The grant option is
    /// part of the key: a group renders a single `with_grant_option`.
    pub fn group_key(&self) -> String {
        let on = if self.is_future() {
            format!("{}_FUTURE_{}", self.granted_on, self.grant_on)
        } else {
            self.granted_on.clone()
        };
        format!(
            "{}_{}_{}_{}_{}",
            on,
            self.name.fully_qualified_name(),
            self.granted_to,
            self.grantee_name.fully_qualified_name(),
            self.grant_option
        )
    }
}
