//! Grouping grants into resources and deciding which resource they become.

use indexmap::IndexMap;
use thiserror::Error;

use crate::entry_types::Grant;
use crate::object_type::ObjectType;

/// Group grants that differ only by privilege, keeping input order.
pub fn group_grants(grants: Vec<Grant>) -> IndexMap<String, Vec<Grant>> {
    let mut groups: IndexMap<String, Vec<Grant>> = IndexMap::new();
    for grant in grants {
        groups.entry(grant.group_key()).or_default().push(grant);
    }
    groups
}

/// A grant group that no resource can express.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnsupportedGrant {
    #[error("OWNERSHIP cannot be managed through privilege grants")]
    Ownership,
    #[error("grants on {granted_on:?} to {granted_to:?} are not supported")]
    Combination {
        granted_on: String,
        granted_to: String,
    },
    #[error("{0:?} is not a valid target for future grants")]
    FutureTarget(String),
    #[error("grant group is empty")]
    Empty,
}

/// Where the future objects of a future grant will live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FutureContainer {
    Database,
    Schema,
}

/// What a privilege grant is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrivilegeTarget {
    Account,
    /// A database, for grants to database roles.
    Database,
    AccountObject(ObjectType),
    Schema,
    SchemaObject(ObjectType),
    Future {
        object_type: ObjectType,
        container: FutureContainer,
    },
}

/// The resource a grant group becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantClassification {
    /// An account role granted to a user or another role.
    AccountRole,
    /// A database role granted to a role or another database role.
    DatabaseRole,
    PrivilegesToAccountRole(PrivilegeTarget),
    PrivilegesToDatabaseRole(PrivilegeTarget),
}

fn is_account_role_grantee(granted_to: Option<ObjectType>) -> bool {
    matches!(granted_to, Some(ObjectType::Role | ObjectType::User))
}

fn is_database_role_grantee(granted_to: Option<ObjectType>) -> bool {
    matches!(granted_to, Some(ObjectType::Role | ObjectType::DatabaseRole))
}

fn future_target(grant: &Grant) -> Result<PrivilegeTarget, UnsupportedGrant> {
    let object_type = grant
        .grant_on_type()
        .filter(ObjectType::is_valid_schema_object_grant_target)
        .ok_or_else(|| UnsupportedGrant::FutureTarget(grant.grant_on.clone()))?;
    let container = match grant.granted_on_type() {
        Some(ObjectType::Database) => FutureContainer::Database,
        Some(ObjectType::Schema) => FutureContainer::Schema,
        _ => return Err(unsupported(grant)),
    };
    Ok(PrivilegeTarget::Future {
        object_type,
        container,
    })
}

fn unsupported(grant: &Grant) -> UnsupportedGrant {
    UnsupportedGrant::Combination {
        granted_on: grant.granted_on.clone(),
        granted_to: grant.granted_to.clone(),
    }
}

fn is_ownership(grant: &Grant) -> bool {
    grant.privilege.eq_ignore_ascii_case("OWNERSHIP")
}

/// Classify a grant group by its first grant.
pub fn classify(grants: &[Grant]) -> Result<GrantClassification, UnsupportedGrant> {
    let grant = grants.first().ok_or(UnsupportedGrant::Empty)?;
    if grants.iter().all(is_ownership) {
        return Err(UnsupportedGrant::Ownership);
    }

    let granted_on = grant.granted_on_type();
    let granted_to = grant.granted_to_type();

    if grant.role.is_some()
        || (granted_on == Some(ObjectType::Role) && is_account_role_grantee(granted_to))
    {
        return Ok(GrantClassification::AccountRole);
    }
    if grant.database_role.is_some()
        || (granted_on == Some(ObjectType::DatabaseRole) && is_database_role_grantee(granted_to))
    {
        return Ok(GrantClassification::DatabaseRole);
    }

    match granted_to {
        Some(ObjectType::Role) => {
            let target = if grant.is_future() {
                future_target(grant)?
            } else {
                match granted_on {
                    Some(ObjectType::Account) => PrivilegeTarget::Account,
                    Some(t) if t.is_valid_account_object_grant_target() => {
                        PrivilegeTarget::AccountObject(t)
                    }
                    Some(ObjectType::Schema) => PrivilegeTarget::Schema,
                    Some(t) if t.is_valid_schema_object_grant_target() => {
                        PrivilegeTarget::SchemaObject(t)
                    }
                    _ => return Err(unsupported(grant)),
                }
            };
            Ok(GrantClassification::PrivilegesToAccountRole(target))
        }
        Some(ObjectType::DatabaseRole) => {
            let target = if grant.is_future() {
                future_target(grant)?
            } else {
                match granted_on {
                    Some(ObjectType::Database) => PrivilegeTarget::Database,
                    Some(ObjectType::Schema) => PrivilegeTarget::Schema,
                    Some(t) if t.is_valid_schema_object_grant_target() => {
                        PrivilegeTarget::SchemaObject(t)
                    }
                    _ => return Err(unsupported(grant)),
                }
            };
            Ok(GrantClassification::PrivilegesToDatabaseRole(target))
        }
        _ => Err(unsupported(grant)),
    }
}

/// The privileges of a group, without duplicates, in first-seen order.
///
/// OWNERSHIP is left out.
pub fn privileges(grants: &[Grant]) -> Vec<String> {
    let mut privileges: Vec<String> = vec![];
    for grant in grants.iter().filter(|g| !is_ownership(g)) {
        if !privileges.contains(&grant.privilege) {
            privileges.push(grant.privilege.clone());
        }
    }
    privileges
}
