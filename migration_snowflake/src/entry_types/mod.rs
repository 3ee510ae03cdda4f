//! Snowflake objects as reported by `SHOW` commands.

mod database;
mod grant;
mod role;
mod schema;
mod user;
mod warehouse;

pub use database::Database;
pub use grant::Grant;
pub use role::{DatabaseRole, Role};
pub use schema::Schema;
pub use user::{User, UserType};
pub use warehouse::{Warehouse, WarehouseSize};

/// `SHOW` commands print flags as `Y`/`N`.
pub(crate) fn is_yes(value: &str) -> bool {
    value.eq_ignore_ascii_case("Y") || value.eq_ignore_ascii_case("TRUE")
}
