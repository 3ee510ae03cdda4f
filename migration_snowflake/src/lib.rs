//! Snowflake side of the migration
//!
//! Turns CSV exports of Snowflake `SHOW` commands into Terraform resources
//! of the Snowflake provider.
//!
//! ```
//! use migration_core::convert_csv_input;
//! use migration_snowflake::{model, rows::AccountRoleRow};
//!
//! let grid = vec![vec!["name".to_owned()], vec!["ANALYST".to_owned()]];
//! let roles = convert_csv_input::<AccountRoleRow>(&grid).unwrap();
//! let (resource, _import) = model::map_account_role(&roles[0]).unwrap();
//! assert_eq!(resource.resource_type(), "snowflake_account_role");
//! ```

pub mod consts;
mod entry_types;
pub mod grants;
pub mod identifier;
pub mod model;
pub mod object_type;
pub mod rows;

pub use entry_types::*;
