//! Command line arguments of the migration script
//!

use std::fmt::Display;

use clap::{self, Parser, ValueEnum};

use migration_core::{logging::LevelFilter, ImportStatementType};

/// Generate Terraform configuration for existing Snowflake objects from CSV
/// exports of `SHOW` commands read on standard input.
#[derive(Parser, Debug)]
#[clap(name = "migration_script", version, long_about = None)]
pub struct Args {
    /// How import information is written: `statement` or `block`
    #[clap(long, default_value_t = ImportStatementType::Statement)]
    pub import: ImportStatementType,
    /// Most verbose diagnostics written to standard error
    #[clap(long)]
    pub log_level: Option<LevelFilter>,
    /// The type of objects in the input
    #[arg(value_enum)]
    pub object_type: ObjectType,
}

/// The object types the script can migrate.
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ObjectType {
    /// `SHOW GRANTS` output
    Grants,
    /// `SHOW SCHEMAS` output
    Schemas,
    /// `SHOW DATABASES` output
    Databases,
    /// `SHOW WAREHOUSES` output
    Warehouses,
    /// `SHOW ROLES` output
    #[value(name = "account_roles")]
    AccountRoles,
    /// `SHOW DATABASE ROLES` output
    #[value(name = "database_roles")]
    DatabaseRoles,
    /// `SHOW USERS` output
    Users,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectType::Grants => "grants",
            ObjectType::Schemas => "schemas",
            ObjectType::Databases => "databases",
            ObjectType::Warehouses => "warehouses",
            ObjectType::AccountRoles => "account_roles",
            ObjectType::DatabaseRoles => "database_roles",
            ObjectType::Users => "users",
        };
        write!(f, "{name}")
    }
}

/// Long flags that may be spelled with a single dash.
const SINGLE_DASH_FLAGS: [&str; 3] = ["import", "help", "log-level"];

/// Rewrite `-import=block`-style flags to `--import=block`.
pub(crate) fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    args.into_iter()
        .map(|arg| {
            let Some(flag) = arg.strip_prefix('-').filter(|f| !f.starts_with('-')) else {
                return arg;
            };
            let name = flag.split_once('=').map_or(flag, |(name, _)| name);
            if SINGLE_DASH_FLAGS.contains(&name) {
                format!("-{arg}")
            } else {
                arg
            }
        })
        .collect()
}
