//! Snowflake object types as they appear in `SHOW GRANTS` output.

use std::{fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};

macro_rules! object_types {
    ($($variant:ident => $name:literal),* $(,)?) => {
        /// A kind of Snowflake object.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum ObjectType {
            $($variant),*
        }

        impl ObjectType {
            /// The type as Snowflake spells it in SQL.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(ObjectType::$variant => $name),*
                }
            }

            fn from_normalized(s: &str) -> Option<Self> {
                match s {
                    $($name => Some(ObjectType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

object_types! {
    Account => "ACCOUNT",
    User => "USER",
    Role => "ROLE",
    DatabaseRole => "DATABASE ROLE",
    ApplicationRole => "APPLICATION ROLE",
    Application => "APPLICATION",
    ResourceMonitor => "RESOURCE MONITOR",
    Warehouse => "WAREHOUSE",
    ComputePool => "COMPUTE POOL",
    Database => "DATABASE",
    Integration => "INTEGRATION",
    Connection => "CONNECTION",
    FailoverGroup => "FAILOVER GROUP",
    ReplicationGroup => "REPLICATION GROUP",
    ExternalVolume => "EXTERNAL VOLUME",
    Share => "SHARE",
    Schema => "SCHEMA",
    AggregationPolicy => "AGGREGATION POLICY",
    Alert => "ALERT",
    AuthenticationPolicy => "AUTHENTICATION POLICY",
    DynamicTable => "DYNAMIC TABLE",
    EventTable => "EVENT TABLE",
    ExternalTable => "EXTERNAL TABLE",
    FileFormat => "FILE FORMAT",
    Function => "FUNCTION",
    GitRepository => "GIT REPOSITORY",
    HybridTable => "HYBRID TABLE",
    IcebergTable => "ICEBERG TABLE",
    ImageRepository => "IMAGE REPOSITORY",
    MaskingPolicy => "MASKING POLICY",
    MaterializedView => "MATERIALIZED VIEW",
    Model => "MODEL",
    NetworkRule => "NETWORK RULE",
    Notebook => "NOTEBOOK",
    PackagesPolicy => "PACKAGES POLICY",
    PasswordPolicy => "PASSWORD POLICY",
    Pipe => "PIPE",
    Procedure => "PROCEDURE",
    ProjectionPolicy => "PROJECTION POLICY",
    RowAccessPolicy => "ROW ACCESS POLICY",
    Secret => "SECRET",
    SemanticView => "SEMANTIC VIEW",
    Sequence => "SEQUENCE",
    Service => "SERVICE",
    SessionPolicy => "SESSION POLICY",
    Stage => "STAGE",
    Stream => "STREAM",
    Streamlit => "STREAMLIT",
    Table => "TABLE",
    Tag => "TAG",
    Task => "TASK",
    View => "VIEW",
}

impl ObjectType {
    /// Types `GRANT ... ON <type> <name>` accepts for account-level objects.
    pub fn is_valid_account_object_grant_target(&self) -> bool {
        matches!(
            self,
            ObjectType::User
                | ObjectType::ResourceMonitor
                | ObjectType::Warehouse
                | ObjectType::ComputePool
                | ObjectType::Database
                | ObjectType::Integration
                | ObjectType::Connection
                | ObjectType::FailoverGroup
                | ObjectType::ReplicationGroup
                | ObjectType::ExternalVolume
        )
    }

    /// Types `GRANT ... ON <type> <name>` accepts for objects inside a schema.
    pub fn is_valid_schema_object_grant_target(&self) -> bool {
        matches!(
            self,
            ObjectType::AggregationPolicy
                | ObjectType::Alert
                | ObjectType::AuthenticationPolicy
                | ObjectType::DynamicTable
                | ObjectType::EventTable
                | ObjectType::ExternalTable
                | ObjectType::FileFormat
                | ObjectType::Function
                | ObjectType::GitRepository
                | ObjectType::HybridTable
                | ObjectType::IcebergTable
                | ObjectType::ImageRepository
                | ObjectType::MaskingPolicy
                | ObjectType::MaterializedView
                | ObjectType::Model
                | ObjectType::NetworkRule
                | ObjectType::Notebook
                | ObjectType::PackagesPolicy
                | ObjectType::PasswordPolicy
                | ObjectType::Pipe
                | ObjectType::Procedure
                | ObjectType::ProjectionPolicy
                | ObjectType::RowAccessPolicy
                | ObjectType::Secret
                | ObjectType::SemanticView
                | ObjectType::Sequence
                | ObjectType::Service
                | ObjectType::SessionPolicy
                | ObjectType::Stage
                | ObjectType::Stream
                | ObjectType::Streamlit
                | ObjectType::Table
                | ObjectType::Tag
                | ObjectType::Task
                | ObjectType::View
        )
    }

    /// How many dot-separated parts a name of this type has.
    pub fn name_parts(&self) -> usize {
        if *self == ObjectType::Account {
            0
        } else if *self == ObjectType::Schema || *self == ObjectType::DatabaseRole {
            2
        } else if self.is_valid_schema_object_grant_target() {
            3
        } else {
            1
        }
    }

    /// The plural form used by future grants, e.g. `TABLES`, `MASKING POLICIES`.
    pub fn plural(&self) -> String {
        let name = self.as_str();
        match name.strip_suffix('Y') {
            Some(stem) => format!("{stem}IES"),
            None => format!("{name}S"),
        }
    }
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ObjectType {
    type Err = anyhow::Error;

    /// Accepts both `DATABASE_ROLE` and `DATABASE ROLE` spellings.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_uppercase().replace('_', " ");
        match normalized.as_str() {
            // SHOW GRANTS reports these under their short names.
            "VOLUME" => Ok(ObjectType::ExternalVolume),
            "MODULE" => Ok(ObjectType::Model),
            other => ObjectType::from_normalized(other)
                .ok_or_else(|| anyhow!("unsupported object type: {s:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn parses_spaced_and_underscored_types() -> Result<()> {
        assert_eq!("DATABASE_ROLE".parse::<ObjectType>()?, ObjectType::DatabaseRole);
        assert_eq!("database role".parse::<ObjectType>()?, ObjectType::DatabaseRole);
        assert_eq!("TABLE".parse::<ObjectType>()?, ObjectType::Table);
        assert!("SPACESHIP".parse::<ObjectType>().is_err());
        Ok(())
    }

    #[test]
    fn special_cases_short_names() -> Result<()> {
        assert_eq!("VOLUME".parse::<ObjectType>()?, ObjectType::ExternalVolume);
        assert_eq!("MODULE".parse::<ObjectType>()?, ObjectType::Model);
        Ok(())
    }

    #[test]
    fn grant_target_sets_are_disjoint() {
        assert!(ObjectType::Warehouse.is_valid_account_object_grant_target());
        assert!(!ObjectType::Warehouse.is_valid_schema_object_grant_target());
        assert!(ObjectType::Table.is_valid_schema_object_grant_target());
        assert!(!ObjectType::Table.is_valid_account_object_grant_target());
        assert!(!ObjectType::Schema.is_valid_account_object_grant_target());
        assert!(!ObjectType::Schema.is_valid_schema_object_grant_target());
    }

    #[test]
    fn plurals() {
        assert_eq!(ObjectType::Table.plural(), "TABLES");
        assert_eq!(ObjectType::MaskingPolicy.plural(), "MASKING POLICIES");
        assert_eq!(ObjectType::GitRepository.plural(), "GIT REPOSITORIES");
        assert_eq!(ObjectType::MaterializedView.plural(), "MATERIALIZED VIEWS");
    }
}
