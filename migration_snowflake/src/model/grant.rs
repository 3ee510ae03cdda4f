use anyhow::{anyhow, Result};
use migration_core::{
    resource_id::normalize_resource_id, HclBlock, HclValue, ImportModel, ResourceModel,
};

use super::{bool_string, Mapped};
use crate::consts::{
    GRANT_ACCOUNT_ROLE_RESOURCE, GRANT_DATABASE_ROLE_RESOURCE,
    GRANT_PRIVILEGES_TO_ACCOUNT_ROLE_RESOURCE, GRANT_PRIVILEGES_TO_DATABASE_ROLE_RESOURCE,
};
use crate::entry_types::Grant;
use crate::grants::{classify, privileges, FutureContainer, GrantClassification, PrivilegeTarget};
use crate::identifier::ObjectIdentifier;
use crate::object_type::ObjectType;

/// Map a grant group to the resource granting all of its privileges.
///
/// Groups no resource can express come back as errors; callers are expected
/// to skip them.
pub fn map_grant_group(grants: &[Grant]) -> Result<Mapped> {
    let classification = classify(grants)?;
    let grant = grants.first().ok_or_else(|| anyhow!("grant group is empty"))?;
    match classification {
        GrantClassification::AccountRole => map_account_role_grant(grant),
        GrantClassification::DatabaseRole => map_database_role_grant(grant),
        GrantClassification::PrivilegesToAccountRole(target) => map_privileges(
            GRANT_PRIVILEGES_TO_ACCOUNT_ROLE_RESOURCE,
            "account_role",
            grants,
            &target,
        ),
        GrantClassification::PrivilegesToDatabaseRole(target) => map_privileges(
            GRANT_PRIVILEGES_TO_DATABASE_ROLE_RESOURCE,
            "database_role",
            grants,
            &target,
        ),
    }
}

/// `DATABASE ROLE` -> `database_role`, for local names.
fn snake(object_type: &str) -> String {
    object_type.to_lowercase().replace(' ', "_")
}

fn map_account_role_grant(grant: &Grant) -> Result<Mapped> {
    let role = grant.name.fully_qualified_name();
    let grantee = grant.grantee_name.fully_qualified_name();
    let (grantee_attribute, grantee_kind) = match grant.granted_to_type() {
        Some(ObjectType::User) => ("user_name", ObjectType::User),
        Some(ObjectType::Role) => ("parent_role_name", ObjectType::Role),
        _ => {
            return Err(anyhow!(
                "roles can't be granted to {:?}",
                grant.granted_to
            ))
        }
    };

    let name = normalize_resource_id(&format!(
        "grant_account_role_{role}_to_{}_{grantee}",
        snake(grantee_kind.as_str())
    ));
    let mut resource = ResourceModel::new(GRANT_ACCOUNT_ROLE_RESOURCE, name);
    resource
        .set("role_name", &role)
        .set(grantee_attribute, &grantee);

    let import = ImportModel::new(&resource, format!("{role}|{grantee_kind}|{grantee}"));
    Ok((resource, import))
}

fn map_database_role_grant(grant: &Grant) -> Result<Mapped> {
    let role = grant.name.fully_qualified_name();
    let grantee = grant.grantee_name.fully_qualified_name();
    let (grantee_attribute, grantee_kind) = match grant.granted_to_type() {
        Some(ObjectType::Role) => ("parent_role_name", ObjectType::Role),
        Some(ObjectType::DatabaseRole) => ("parent_database_role_name", ObjectType::DatabaseRole),
        _ => {
            return Err(anyhow!(
                "database roles can't be granted to {:?}",
                grant.granted_to
            ))
        }
    };

    let name = normalize_resource_id(&format!(
        "grant_database_role_{role}_to_{}_{grantee}",
        snake(grantee_kind.as_str())
    ));
    let mut resource = ResourceModel::new(GRANT_DATABASE_ROLE_RESOURCE, name);
    resource
        .set("database_role_name", &role)
        .set(grantee_attribute, &grantee);

    let import = ImportModel::new(&resource, format!("{role}|{grantee_kind}|{grantee}"));
    Ok((resource, import))
}

/// The target attribute, the import id suffix and the local name suffix.
fn target_parts(target: &PrivilegeTarget, object: &str) -> (&'static str, HclValue, String, String) {
    match target {
        PrivilegeTarget::Account => (
            "on_account",
            true.into(),
            "OnAccount".to_owned(),
            "account".to_owned(),
        ),
        PrivilegeTarget::Database => (
            "on_database",
            object.into(),
            format!("OnDatabase|{object}"),
            format!("database_{object}"),
        ),
        PrivilegeTarget::AccountObject(object_type) => (
            "on_account_object",
            HclBlock::new()
                .with("object_type", object_type.as_str())
                .with("object_name", object)
                .into(),
            format!("OnAccountObject|{object_type}|{object}"),
            format!("{}_{object}", snake(object_type.as_str())),
        ),
        PrivilegeTarget::Schema => (
            "on_schema",
            HclBlock::new().with("schema_name", object).into(),
            format!("OnSchema|OnSchema|{object}"),
            format!("schema_{object}"),
        ),
        PrivilegeTarget::SchemaObject(object_type) => (
            "on_schema_object",
            HclBlock::new()
                .with("object_type", object_type.as_str())
                .with("object_name", object)
                .into(),
            format!("OnSchemaObject|OnObject|{object_type}|{object}"),
            format!("{}_{object}", snake(object_type.as_str())),
        ),
        PrivilegeTarget::Future {
            object_type,
            container,
        } => {
            let plural = object_type.plural();
            let (attribute, id_part, name_part) = match container {
                FutureContainer::Database => ("in_database", "InDatabase", "database"),
                FutureContainer::Schema => ("in_schema", "InSchema", "schema"),
            };
            let future = HclBlock::new()
                .with("object_type_plural", plural.as_str())
                .with(attribute, object);
            (
                "on_schema_object",
                HclBlock::new().with("future", future).into(),
                format!("OnSchemaObject|OnFuture|{plural}|{id_part}|{object}"),
                format!("future_{}_in_{name_part}_{object}", snake(&plural)),
            )
        }
    }
}

fn map_privileges(
    resource_type: &str,
    grantee_kind: &str,
    grants: &[Grant],
    target: &PrivilegeTarget,
) -> Result<Mapped> {
    let grant = grants.first().ok_or_else(|| anyhow!("grant group is empty"))?;
    let grantee = grant.grantee_name.fully_qualified_name();
    let object = grant.name.fully_qualified_name();
    let privileges = privileges(grants);
    let (target_attribute, target_value, target_id, target_name) = target_parts(target, &object);

    let mut name = format!("grant_privileges_to_{grantee_kind}_{grantee}_on_{target_name}");
    if grant.grant_option {
        name.push_str("_with_grant_option");
    }
    let mut resource = ResourceModel::new(resource_type, normalize_resource_id(&name));
    resource
        .set(format!("{grantee_kind}_name"), &grantee)
        .set("privileges", privileges.clone())
        .set(target_attribute, target_value);
    if grant.grant_option {
        resource.set("with_grant_option", true);
    }

    let import = ImportModel::new(
        &resource,
        format!(
            "{grantee}|{}|false|{}|{target_id}",
            bool_string(grant.grant_option),
            privileges.join(",")
        ),
    );
    Ok((resource, import))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use migration_core::convert_csv_input;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::grants::group_grants;
    use crate::rows::{test_util::grid, GrantRow};

    fn map_all(rows: &[&[&str]]) -> Result<Vec<Mapped>> {
        let grants = convert_csv_input::<GrantRow>(&grid(rows))?;
        group_grants(grants)
            .values()
            .map(|group| map_grant_group(group))
            .collect()
    }

    const HEADER: &[&str] = &[
        "privilege",
        "granted_on",
        "name",
        "granted_to",
        "grantee_name",
        "grant_option",
    ];

    #[test]
    fn privileges_on_account_objects() -> Result<()> {
        let mapped = map_all(&[
            HEADER,
            &["CREATE SCHEMA", "DATABASE", "DB", "ROLE", "R", "false"],
            &["USAGE", "DATABASE", "DB", "ROLE", "R", "false"],
        ])?;
        assert_eq!(mapped.len(), 1);
        let (resource, import) = &mapped[0];
        assert_eq!(
            resource.render(),
            r#"resource "snowflake_grant_privileges_to_account_role" "snowflake_generated_grant_privileges_to_account_role_R_on_database_DB" {
  account_role_name = "\"R\""
  on_account_object {
    object_name = "\"DB\""
    object_type = "DATABASE"
  }
  privileges = ["CREATE SCHEMA", "USAGE"]
}
"#
        );
        assert_eq!(
            import.id(),
            r#""R"|false|false|CREATE SCHEMA,USAGE|OnAccountObject|DATABASE|"DB""#
        );
        Ok(())
    }

    #[test]
    fn grant_option_yields_separate_resources() -> Result<()> {
        let mapped = map_all(&[
            HEADER,
            &["CREATE ROLE", "DATABASE", "TEST_DATABASE", "ROLE", "TEST_ROLE", "true"],
            &["CREATE ROLE", "DATABASE", "TEST_DATABASE", "ROLE", "TEST_ROLE", "false"],
        ])?;
        assert_eq!(mapped.len(), 2);
        let (with_option, import) = &mapped[0];
        assert_eq!(
            with_option.name(),
            "snowflake_generated_grant_privileges_to_account_role_TEST_ROLE_on_database_TEST_DATABASE_with_grant_option"
        );
        assert_eq!(with_option.attribute("with_grant_option"), Some(&HclValue::from(true)));
        assert!(import.id().starts_with(r#""TEST_ROLE"|true|false|"#));
        assert_eq!(mapped[1].0.attribute("with_grant_option"), None);
        Ok(())
    }

    #[test]
    fn privileges_on_account_and_schema_objects() -> Result<()> {
        let mapped = map_all(&[
            HEADER,
            &["MONITOR USAGE", "ACCOUNT", "ACC", "ROLE", "R", "false"],
            &["USAGE", "SCHEMA", "DB.S", "ROLE", "R", "false"],
            &["SELECT", "TABLE", "DB.S.T", "ROLE", "R", "false"],
        ])?;
        let ids: Vec<_> = mapped.iter().map(|(_, i)| i.id().to_owned()).collect();
        assert_eq!(
            ids,
            vec![
                r#""R"|false|false|MONITOR USAGE|OnAccount"#,
                r#""R"|false|false|USAGE|OnSchema|OnSchema|"DB"."S""#,
                r#""R"|false|false|SELECT|OnSchemaObject|OnObject|TABLE|"DB"."S"."T""#,
            ]
        );
        assert_eq!(mapped[0].0.attribute("on_account"), Some(&HclValue::from(true)));
        assert_eq!(
            mapped[2].0.render(),
            r#"resource "snowflake_grant_privileges_to_account_role" "snowflake_generated_grant_privileges_to_account_role_R_on_table_DB_S_T" {
  account_role_name = "\"R\""
  on_schema_object {
    object_name = "\"DB\".\"S\".\"T\""
    object_type = "TABLE"
  }
  privileges = ["SELECT"]
}
"#
        );
        Ok(())
    }

    #[test]
    fn future_grants() -> Result<()> {
        let mapped = map_all(&[
            &["privilege", "grant_on", "name", "grant_to", "grantee_name"],
            &["SELECT", "TABLE", "DB.<TABLE>", "ROLE", "R"],
            &["USAGE", "FUNCTION", "DB.S.<FUNCTION>", "DATABASE_ROLE", "DB.DR"],
        ])?;
        assert_eq!(
            mapped[0].0.render(),
            r#"resource "snowflake_grant_privileges_to_account_role" "snowflake_generated_grant_privileges_to_account_role_R_on_future_tables_in_database_DB" {
  account_role_name = "\"R\""
  on_schema_object {
    future {
      in_database = "\"DB\""
      object_type_plural = "TABLES"
    }
  }
  privileges = ["SELECT"]
}
"#
        );
        assert_eq!(
            mapped[0].1.id(),
            r#""R"|false|false|SELECT|OnSchemaObject|OnFuture|TABLES|InDatabase|"DB""#
        );
        assert_eq!(
            mapped[1].1.id(),
            r#""DB"."DR"|false|false|USAGE|OnSchemaObject|OnFuture|FUNCTIONS|InSchema|"DB"."S""#
        );
        assert_eq!(
            mapped[1].0.resource_type(),
            "snowflake_grant_privileges_to_database_role"
        );
        Ok(())
    }

    #[test]
    fn privileges_to_database_roles() -> Result<()> {
        let mapped = map_all(&[
            HEADER,
            &["USAGE", "DATABASE", "DB", "DATABASE_ROLE", "DB.DR", "false"],
        ])?;
        let (resource, import) = &mapped[0];
        assert_eq!(
            resource.render(),
            r#"resource "snowflake_grant_privileges_to_database_role" "snowflake_generated_grant_privileges_to_database_role_DB_DR_on_database_DB" {
  database_role_name = "\"DB\".\"DR\""
  on_database = "\"DB\""
  privileges = ["USAGE"]
}
"#
        );
        assert_eq!(import.id(), r#""DB"."DR"|false|false|USAGE|OnDatabase|"DB""#);
        Ok(())
    }

    #[test]
    fn role_grants() -> Result<()> {
        let mapped = map_all(&[
            &["role", "granted_to", "grantee_name"],
            &["ANALYST", "USER", "JANE"],
            &["ANALYST", "ROLE", "SYSADMIN"],
            &["DB.READER", "DATABASE_ROLE", "DB.WRITER"],
        ])?;
        assert_eq!(
            mapped[0].0.render(),
            r#"resource "snowflake_grant_account_role" "snowflake_generated_grant_account_role_ANALYST_to_user_JANE" {
  role_name = "\"ANALYST\""
  user_name = "\"JANE\""
}
"#
        );
        assert_eq!(mapped[0].1.id(), r#""ANALYST"|USER|"JANE""#);
        assert_eq!(
            mapped[1].0.attribute("parent_role_name"),
            Some(&HclValue::from("\"SYSADMIN\""))
        );
        assert_eq!(mapped[1].1.id(), r#""ANALYST"|ROLE|"SYSADMIN""#);
        assert_eq!(mapped[2].0.resource_type(), "snowflake_grant_database_role");
        assert_eq!(
            mapped[2].1.id(),
            r#""DB"."READER"|DATABASE ROLE|"DB"."WRITER""#
        );
        Ok(())
    }

    #[test]
    fn unsupported_groups_fail() -> Result<()> {
        let grants = convert_csv_input::<GrantRow>(&grid(&[
            HEADER,
            &["OWNERSHIP", "DATABASE", "DB", "ROLE", "R", "false"],
        ]))?;
        assert!(map_grant_group(&grants).is_err());
        Ok(())
    }
}
