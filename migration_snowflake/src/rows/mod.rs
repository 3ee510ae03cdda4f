//! CSV rows of every supported object type and their representations.
//!
//! Each row lists the columns of the matching `SHOW` command. Parameter
//! columns (`<name>_value`/`<name>_level`, from `SHOW PARAMETERS IN ...`)
//! come from the object type's parameter set.

mod account_role;
mod database;
mod database_role;
mod grant;
mod schema;
mod user;
mod warehouse;

pub use account_role::AccountRoleRow;
pub use database::{DatabaseParameters, DatabaseRepresentation, DatabaseRow};
pub use database_role::DatabaseRoleRow;
pub use grant::GrantRow;
pub use schema::{SchemaParameters, SchemaRepresentation, SchemaRow};
pub use user::{UserParameters, UserRepresentation, UserRow};
pub use warehouse::{WarehouseParameters, WarehouseRepresentation, WarehouseRow};
