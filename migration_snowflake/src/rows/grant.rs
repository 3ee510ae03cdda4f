use anyhow::{anyhow, Context, Result};
use migration_core::{
    convert::CsvColumn,
    csv_row,
    logging::{debug, warn},
    CsvRow,
};

use crate::entry_types::Grant;
use crate::identifier::{
    parse_account_object_identifier, parse_database_object_identifier, parse_identifier_parts,
    parse_schema_object_identifier, AccountObjectIdentifier, DatabaseObjectIdentifier,
    GrantObjectIdentifier, IdentifierParseError,
};
use crate::object_type::ObjectType;

csv_row! {
    /// A line of `SHOW GRANTS` (`TO ROLE`, `OF ROLE`, `TO USER`, `FUTURE`).
    pub struct GrantRow {
        created_on: String => "created_on",
        privilege: String => "privilege",
        granted_on: String => "granted_on",
        grant_on: String => "grant_on",
        name: String => "name",
        granted_to: String => "granted_to",
        grant_to: String => "grant_to",
        grantee_name: String => "grantee_name",
        grant_option: bool => "grant_option",
        granted_by: String => "granted_by",
        role: String => "role",
    }
}

/// Parse `name` as an identifier of `object_type`, falling back to the raw
/// name when it does not have the expected shape.
fn parse_grant_object(object_type: Option<ObjectType>, name: &str) -> GrantObjectIdentifier {
    let parsed = match object_type.map(|t| t.name_parts()) {
        Some(1) => parse_account_object_identifier(name).map(GrantObjectIdentifier::Account),
        Some(2) => parse_database_object_identifier(name).map(GrantObjectIdentifier::Database),
        Some(3) => parse_schema_object_identifier(name).map(GrantObjectIdentifier::Schema),
        _ => return GrantObjectIdentifier::Raw(name.to_owned()),
    };
    parsed.unwrap_or_else(|e: IdentifierParseError| {
        debug!("keeping {name:?} as a raw identifier: {e}");
        GrantObjectIdentifier::Raw(name.to_owned())
    })
}

/// `SHOW FUTURE GRANTS` names the container followed by `<TYPE>`, e.g.
/// `DB.SCHEMA.<TABLE>`.
fn future_grant_container(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((container, last)) if last.starts_with('<') && last.ends_with('>') => container,
        _ => name,
    }
}

/// A future grant's container is a database or a schema. Anything else is
/// kept raw without a type, so the grant can't be classified later on.
fn future_grant_target(container: &str) -> (String, GrantObjectIdentifier) {
    let container_type = match parse_identifier_parts(container) {
        Ok(parts) if parts.len() == 1 => ObjectType::Database,
        Ok(parts) if parts.len() == 2 => ObjectType::Schema,
        Ok(parts) => {
            warn!(
                "future grant container {container:?} has {} parts, keeping it raw",
                parts.len()
            );
            return (String::new(), GrantObjectIdentifier::Raw(container.to_owned()));
        }
        Err(e) => {
            warn!("future grant container {container:?}: {e}, keeping it raw");
            return (String::new(), GrantObjectIdentifier::Raw(container.to_owned()));
        }
    };
    (
        container_type.to_string(),
        parse_grant_object(Some(container_type), container),
    )
}

impl CsvRow for GrantRow {
    type Representation = Grant;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<Grant> {
        let granted_to = if self.granted_to.is_empty() {
            self.grant_to.clone()
        } else {
            self.granted_to.clone()
        };

        let (granted_on, name) = if self.grant_on.is_empty() {
            let granted_on = self.granted_on.clone();
            let name = parse_grant_object(granted_on.parse().ok(), &self.name);
            (granted_on, name)
        } else {
            future_grant_target(future_grant_container(&self.name))
        };

        let grantee_name = parse_grant_object(granted_to.parse().ok(), &self.grantee_name);

        Ok(Grant {
            created_on: self.created_on.clone(),
            privilege: self.privilege.clone(),
            granted_on,
            grant_on: self.grant_on.clone(),
            name,
            granted_to,
            grantee_name,
            grant_option: self.grant_option,
            granted_by: self.granted_by.clone(),
            role: None,
            database_role: None,
        })
    }

    /// Grants of a role name the granted role in the `role` column.
    fn post_convert(&self, grant: &mut Grant) -> Result<()> {
        if self.role.is_empty() {
            return Ok(());
        }

        let parts = parse_identifier_parts(&self.role)
            .with_context(|| format!("granted role {:?}", self.role))?;
        match parts.as_slice() {
            [role] => {
                let role = AccountObjectIdentifier::new(role);
                grant.granted_on = ObjectType::Role.to_string();
                grant.name = GrantObjectIdentifier::Account(role.clone());
                grant.role = Some(role);
            }
            [database, role] => {
                let role = DatabaseObjectIdentifier::new(database, role);
                grant.granted_on = ObjectType::DatabaseRole.to_string();
                grant.name = GrantObjectIdentifier::Database(role.clone());
                grant.database_role = Some(role);
            }
            _ => return Err(anyhow!("granted role {:?} has too many parts", self.role)),
        }
        if grant.privilege.is_empty() {
            grant.privilege = "USAGE".to_owned();
        }
        Ok(())
    }
}
