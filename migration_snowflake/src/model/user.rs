use anyhow::{Context, Result};
use migration_core::{ImportModel, ResourceModel};

use super::{bool_string, resource_name, Mapped};
use crate::consts::{LEGACY_SERVICE_USER_RESOURCE, SERVICE_USER_RESOURCE, USER_RESOURCE};
use crate::entry_types::UserType;
use crate::identifier::ObjectIdentifier;
use crate::rows::UserRepresentation;

/// Map a user to the resource matching its type.
///
/// Service users can't have person names, a password or an MFA bypass.
/// Legacy service users may still have to change their password.
pub fn map_user(representation: &UserRepresentation) -> Result<Mapped> {
    let user = &representation.user;
    let id = user.id();

    let (resource_type, kind) = match user.user_type {
        UserType::Person => (USER_RESOURCE, "user"),
        UserType::Service => (SERVICE_USER_RESOURCE, "service_user"),
        UserType::LegacyService => (LEGACY_SERVICE_USER_RESOURCE, "legacy_service_user"),
    };

    let mut resource = ResourceModel::new(resource_type, resource_name(kind, &id));
    resource
        .set("name", &user.name)
        .set_if_not_empty("login_name", &user.login_name)
        .set_if_not_empty("display_name", &user.display_name)
        .set_if_not_empty("email", &user.email)
        .set_if_not_empty("comment", &user.comment)
        .set_if_not_empty("default_warehouse", &user.default_warehouse)
        .set_if_not_empty("default_namespace", &user.default_namespace)
        .set_if_not_empty("default_role", &user.default_role)
        .set_optional(
            "default_secondary_roles_option",
            user.default_secondary_roles_option(),
        )
        .set_optional("disabled", user.disabled.map(bool_string));

    match user.user_type {
        UserType::Person => {
            resource
                .set_if_not_empty("first_name", &user.first_name)
                .set_if_not_empty("last_name", &user.last_name)
                .set_optional(
                    "must_change_password",
                    user.must_change_password.map(bool_string),
                );
            if let Some(mins) = user.mins_to_bypass_mfa() {
                let mins: i64 = mins
                    .parse()
                    .with_context(|| format!("user {}: mins_to_bypass_mfa {mins:?}", user.name))?;
                resource.set("mins_to_bypass_mfa", mins);
            }
        }
        UserType::LegacyService => {
            resource.set_optional(
                "must_change_password",
                user.must_change_password.map(bool_string),
            );
        }
        UserType::Service => {}
    }
    representation.parameters.apply(&mut resource);

    let import = ImportModel::new(&resource, id.fully_qualified_name());
    Ok((resource, import))
}
