use anyhow::{Context, Result};
use migration_core::{
    convert::{parse_bool, CsvColumn},
    csv_row, parameter_set, CsvRow, ParameterLevel, ParameterResolver,
};

use crate::entry_types::{is_yes, User, UserType};

parameter_set! {
    /// Session parameters that can be set on a user.
    pub struct UserParameters {
        abort_detached_query: bool,
        autocommit: bool,
        binary_input_format: String,
        binary_output_format: String,
        client_memory_limit: i64,
        client_metadata_request_use_connection_ctx: bool,
        client_prefetch_threads: i64,
        client_result_chunk_size: i64,
        client_result_column_case_insensitive: bool,
        client_session_keep_alive: bool,
        client_session_keep_alive_heartbeat_frequency: i64,
        client_timestamp_type_mapping: String,
        date_input_format: String,
        date_output_format: String,
        enable_unload_physical_type_optimization: bool,
        enable_unredacted_query_syntax_error: bool,
        error_on_nondeterministic_merge: bool,
        error_on_nondeterministic_update: bool,
        geography_output_format: String,
        geometry_output_format: String,
        jdbc_treat_decimal_as_int: bool,
        jdbc_treat_timestamp_ntz_as_utc: bool,
        jdbc_use_session_timezone: bool,
        json_indent: i64,
        lock_timeout: i64,
        log_level: String,
        multi_statement_count: i64,
        network_policy: String,
        noorder_sequence_as_default: bool,
        odbc_treat_decimal_as_int: bool,
        prevent_unload_to_internal_stages: bool,
        query_tag: String,
        quoted_identifiers_ignore_case: bool,
        rows_per_resultset: i64,
        s3_stage_vpce_dns_name: String,
        search_path: String,
        simulated_data_sharing_consumer: String,
        statement_queued_timeout_in_seconds: i64,
        statement_timeout_in_seconds: i64,
        strict_json_output: bool,
        time_input_format: String,
        time_output_format: String,
        timestamp_day_is_always_24h: bool,
        timestamp_input_format: String,
        timestamp_ltz_output_format: String,
        timestamp_ntz_output_format: String,
        timestamp_output_format: String,
        timestamp_type_mapping: String,
        timestamp_tz_output_format: String,
        timezone: String,
        trace_level: String,
        transaction_abort_on_error: bool,
        transaction_default_isolation_level: String,
        two_digit_century_start: i64,
        unsupported_ddl_action: String,
        use_cached_result: bool,
        week_of_year_policy: i64,
        week_start: i64,
    }
}

csv_row! {
    /// A line of `SHOW USERS`, joined with the user's parameters.
    pub struct UserRow {
        name: String => "name",
        created_on: String => "created_on",
        login_name: String => "login_name",
        display_name: String => "display_name",
        first_name: String => "first_name",
        last_name: String => "last_name",
        email: String => "email",
        mins_to_unlock: String => "mins_to_unlock",
        days_to_expiry: String => "days_to_expiry",
        comment: String => "comment",
        disabled: String => "disabled",
        must_change_password: String => "must_change_password",
        snowflake_lock: String => "snowflake_lock",
        default_warehouse: String => "default_warehouse",
        default_namespace: String => "default_namespace",
        default_role: String => "default_role",
        default_secondary_roles: String => "default_secondary_roles",
        ext_authn_duo: String => "ext_authn_duo",
        ext_authn_uid: String => "ext_authn_uid",
        mins_to_bypass_mfa: String => "mins_to_bypass_mfa",
        owner: String => "owner",
        last_success_login: String => "last_success_login",
        expires_at_time: String => "expires_at_time",
        locked_until_time: String => "locked_until_time",
        has_password: String => "has_password",
        has_rsa_public_key: String => "has_rsa_public_key",
        user_type: String => "type",
        has_mfa: String => "has_mfa",
    }
    parameters: UserParameters
}

/// A user with the parameters set on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRepresentation {
    pub user: User,
    pub parameters: UserParameters,
}

/// Flags the user resources take as `"true"`/`"false"` are only known when
/// the export has a value for them.
fn parse_optional_bool(column: &str, value: &str) -> Result<Option<bool>> {
    match value.trim() {
        "" => Ok(None),
        v => parse_bool(v)
            .map(Some)
            .with_context(|| format!("column {column}")),
    }
}

impl CsvRow for UserRow {
    type Representation = UserRepresentation;

    fn columns() -> Vec<CsvColumn<Self>> {
        Self::csv_columns()
    }

    fn convert(&self) -> Result<UserRepresentation> {
        let user_type: UserType = self
            .user_type
            .parse()
            .with_context(|| format!("user {}", self.name))?;

        let mut resolver = ParameterResolver::new(ParameterLevel::User);
        let disabled = resolver
            .collect(parse_optional_bool("disabled", &self.disabled))
            .flatten();
        let must_change_password = resolver
            .collect(parse_optional_bool(
                "must_change_password",
                &self.must_change_password,
            ))
            .flatten();
        let parameters = UserParameters::resolve(&mut resolver, &self.parameters);
        resolver.finish()?;

        let user = User {
            name: self.name.clone(),
            created_on: self.created_on.clone(),
            login_name: self.login_name.clone(),
            display_name: self.display_name.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            mins_to_unlock: self.mins_to_unlock.clone(),
            days_to_expiry: self.days_to_expiry.clone(),
            comment: self.comment.clone(),
            disabled,
            must_change_password,
            snowflake_lock: is_yes(&self.snowflake_lock),
            default_warehouse: self.default_warehouse.clone(),
            default_namespace: self.default_namespace.clone(),
            default_role: self.default_role.clone(),
            default_secondary_roles: self.default_secondary_roles.clone(),
            ext_authn_duo: is_yes(&self.ext_authn_duo),
            ext_authn_uid: self.ext_authn_uid.clone(),
            mins_to_bypass_mfa: self.mins_to_bypass_mfa.clone(),
            owner: self.owner.clone(),
            last_success_login: self.last_success_login.clone(),
            expires_at_time: self.expires_at_time.clone(),
            locked_until_time: self.locked_until_time.clone(),
            has_password: is_yes(&self.has_password),
            has_rsa_public_key: is_yes(&self.has_rsa_public_key),
            user_type,
            has_mfa: is_yes(&self.has_mfa),
        };

        Ok(UserRepresentation { user, parameters })
    }
}
