use anyhow::Result;
use migration_core::{convert::CsvColumn, csv_row, CsvRow};

use crate::entry_types::{is_yes, DatabaseRole};

csv_row! {
    /// A line of `SHOW DATABASE ROLES`, with the database it was run in.
    pub struct DatabaseRoleRow {
        created_on: String => "created_on",
        name: String => "name",
        is_default: String => "is_default",
        is_current: String => "is_current",
        is_inherited: String => "is_inherited",
        granted_to_roles: String => "granted_to_roles",
        granted_to_database_roles: String => "granted_to_database_roles",
        granted_database_roles: String => "granted_database_roles",
        owner: String => "owner",
        comment: String => "comment",
        owner_role_type: String => "owner_role_type",
        database_name: String => "database_name",
    }
}

impl CsvRow for DatabaseRoleRow {
    type Representation = DatabaseRole;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<DatabaseRole> {
        Ok(DatabaseRole {
            name: self.name.clone(),
            database_name: self.database_name.clone(),
            created_on: self.created_on.clone(),
            is_default: is_yes(&self.is_default),
            is_current: is_yes(&self.is_current),
            is_inherited: is_yes(&self.is_inherited),
            granted_to_roles: self.granted_to_roles.clone(),
            granted_to_database_roles: self.granted_to_database_roles.clone(),
            granted_database_roles: self.granted_database_roles.clone(),
            owner: self.owner.clone(),
            comment: self.comment.clone(),
            owner_role_type: self.owner_role_type.clone(),
        })
    }
}
