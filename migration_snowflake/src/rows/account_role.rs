use anyhow::Result;
use migration_core::{convert::CsvColumn, csv_row, CsvRow};

use crate::entry_types::{is_yes, Role};

csv_row! {
    /// A line of `SHOW ROLES`.
    pub struct AccountRoleRow {
        created_on: String => "created_on",
        name: String => "name",
        is_default: String => "is_default",
        is_current: String => "is_current",
        is_inherited: String => "is_inherited",
        assigned_to_users: String => "assigned_to_users",
        granted_to_roles: String => "granted_to_roles",
        granted_roles: String => "granted_roles",
        owner: String => "owner",
        comment: String => "comment",
    }
}

impl CsvRow for AccountRoleRow {
    type Representation = Role;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<Role> {
        Ok(Role {
            name: self.name.clone(),
            created_on: self.created_on.clone(),
            is_default: is_yes(&self.is_default),
            is_current: is_yes(&self.is_current),
            is_inherited: is_yes(&self.is_inherited),
            assigned_to_users: self.assigned_to_users.clone(),
            granted_to_roles: self.granted_to_roles.clone(),
            granted_roles: self.granted_roles.clone(),
            owner: self.owner.clone(),
            comment: self.comment.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use migration_core::convert_csv_input;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::rows::test_util::{grid, reversed};

    #[test]
    fn converts_show_roles_output() -> Result<()> {
        let input = grid(&[
            &["created_on", "name", "is_default", "is_current", "owner", "comment"],
            &["2024-06-06", "TEST_ROLE", "N", "Y", "ACCOUNTADMIN", "a role"],
        ]);
        let result = convert_csv_input::<AccountRoleRow>(&input)?;
        assert_eq!(
            result,
            vec![Role {
                name: "TEST_ROLE".to_owned(),
                created_on: "2024-06-06".to_owned(),
                is_current: true,
                owner: "ACCOUNTADMIN".to_owned(),
                comment: "a role".to_owned(),
                ..Default::default()
            }]
        );
        assert_eq!(result, convert_csv_input::<AccountRoleRow>(&reversed(&input))?);
        Ok(())
    }
}
