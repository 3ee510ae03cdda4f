use std::str::FromStr;

use anyhow::{anyhow, Result};

use crate::identifier::AccountObjectIdentifier;

/// The kind of a user, which decides what can be configured on it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserType {
    /// A human user.
    #[default]
    Person,
    /// A service that authenticates with keys or tokens only.
    Service,
    /// A service that may still authenticate with a password.
    LegacyService,
}

impl FromStr for UserType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_uppercase().as_str() {
            // Users created before user types existed have no type.
            "" | "NULL" | "PERSON" => UserType::Person,
            "SERVICE" => UserType::Service,
            "LEGACY_SERVICE" => UserType::LegacyService,
            _ => return Err(anyhow!("unknown user type: {s:?}")),
        })
    }
}

/// Snowflake User entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub created_on: String,
    pub login_name: String,
    pub display_name: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mins_to_unlock: String,
    pub days_to_expiry: String,
    pub comment: String,
    /// `None` when the export had no value.
    pub disabled: Option<bool>,
    pub must_change_password: Option<bool>,
    pub snowflake_lock: bool,
    pub default_warehouse: String,
    pub default_namespace: String,
    pub default_role: String,
    pub default_secondary_roles: String,
    pub ext_authn_duo: bool,
    pub ext_authn_uid: String,
    pub mins_to_bypass_mfa: String,
    pub owner: String,
    pub last_success_login: String,
    pub expires_at_time: String,
    pub locked_until_time: String,
    pub has_password: bool,
    pub has_rsa_public_key: bool,
    pub user_type: UserType,
    pub has_mfa: bool,
}

impl User {
    pub fn id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.name)
    }

    /// `SHOW USERS` prints `null` for an unset bypass.
    pub fn mins_to_bypass_mfa(&self) -> Option<&str> {
        match self.mins_to_bypass_mfa.trim() {
            "" => None,
            m if m.eq_ignore_ascii_case("null") => None,
            m => Some(m),
        }
    }

    /// The provider's `default_secondary_roles_option` for the
    /// `default_secondary_roles` column (`["ALL"]` or `[]`).
    pub fn default_secondary_roles_option(&self) -> Option<&'static str> {
        let roles: String = self
            .default_secondary_roles
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '"')
            .collect();
        match roles.to_uppercase().as_str() {
            "" => None,
            "[ALL]" => Some("ALL"),
            "[]" => Some("NONE"),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn parses_user_types() -> Result<()> {
        assert_eq!("".parse::<UserType>()?, UserType::Person);
        assert_eq!("PERSON".parse::<UserType>()?, UserType::Person);
        assert_eq!("SERVICE".parse::<UserType>()?, UserType::Service);
        assert_eq!("legacy_service".parse::<UserType>()?, UserType::LegacyService);
        assert!("ROBOT".parse::<UserType>().is_err());
        Ok(())
    }

    #[test]
    fn secondary_roles_option() {
        let mut user = User {
            default_secondary_roles: "[\"ALL\"]".to_owned(),
            ..Default::default()
        };
        assert_eq!(user.default_secondary_roles_option(), Some("ALL"));
        user.default_secondary_roles = "[]".to_owned();
        assert_eq!(user.default_secondary_roles_option(), Some("NONE"));
        user.default_secondary_roles = "".to_owned();
        assert_eq!(user.default_secondary_roles_option(), None);
    }
}
