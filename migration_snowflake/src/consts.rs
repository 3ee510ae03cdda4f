pub const DATABASE_RESOURCE: &str = "snowflake_database";
pub const SCHEMA_RESOURCE: &str = "snowflake_schema";
pub const WAREHOUSE_RESOURCE: &str = "snowflake_warehouse";
pub const USER_RESOURCE: &str = "snowflake_user";
pub const SERVICE_USER_RESOURCE: &str = "snowflake_service_user";
pub const LEGACY_SERVICE_USER_RESOURCE: &str = "snowflake_legacy_service_user";
pub const ACCOUNT_ROLE_RESOURCE: &str = "snowflake_account_role";
pub const DATABASE_ROLE_RESOURCE: &str = "snowflake_database_role";
pub const GRANT_ACCOUNT_ROLE_RESOURCE: &str = "snowflake_grant_account_role";
pub const GRANT_DATABASE_ROLE_RESOURCE: &str = "snowflake_grant_database_role";
pub const GRANT_PRIVILEGES_TO_ACCOUNT_ROLE_RESOURCE: &str =
    "snowflake_grant_privileges_to_account_role";
pub const GRANT_PRIVILEGES_TO_DATABASE_ROLE_RESOURCE: &str =
    "snowflake_grant_privileges_to_database_role";
