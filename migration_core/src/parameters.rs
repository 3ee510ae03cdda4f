//! Parameter levels and the inheritance filter.
//!
//! `SHOW PARAMETERS` reports, for every parameter, the level its effective
//! value was set at. Only values set at the object's own level are carried
//! into generated configuration; anything inherited from a broader scope is
//! left out.

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

use anyhow::{anyhow, Context, Result};

use crate::convert::{parse_bool, CsvCell, CsvColumn};
use crate::errors::{ErrorJoiner, JoinedError};

/// The scope a parameter value was set at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLevel {
    /// Set for the whole organization.
    Organization,
    /// Set on the account.
    Account,
    /// Set on a user.
    User,
    /// Set for the session.
    Session,
    /// Set on an object without a more specific level.
    Object,
    /// Set on a database.
    Database,
    /// Set on a schema.
    Schema,
    /// Set on a warehouse.
    Warehouse,
    /// Set on a task.
    Task,
    /// Set on a table.
    Table,
    /// Set on a pipe.
    Pipe,
}

impl ParameterLevel {
    /// The level as Snowflake spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLevel::Organization => "ORGANIZATION",
            ParameterLevel::Account => "ACCOUNT",
            ParameterLevel::User => "USER",
            ParameterLevel::Session => "SESSION",
            ParameterLevel::Object => "OBJECT",
            ParameterLevel::Database => "DATABASE",
            ParameterLevel::Schema => "SCHEMA",
            ParameterLevel::Warehouse => "WAREHOUSE",
            ParameterLevel::Task => "TASK",
            ParameterLevel::Table => "TABLE",
            ParameterLevel::Pipe => "PIPE",
        }
    }
}

impl Display for ParameterLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ParameterLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_uppercase().as_str() {
            "ORGANIZATION" => ParameterLevel::Organization,
            "ACCOUNT" => ParameterLevel::Account,
            "USER" => ParameterLevel::User,
            "SESSION" => ParameterLevel::Session,
            "OBJECT" => ParameterLevel::Object,
            "DATABASE" => ParameterLevel::Database,
            "SCHEMA" => ParameterLevel::Schema,
            "WAREHOUSE" => ParameterLevel::Warehouse,
            "TASK" => ParameterLevel::Task,
            "TABLE" => ParameterLevel::Table,
            "PIPE" => ParameterLevel::Pipe,
            o => return Err(anyhow!("unknown parameter level: {o:?}")),
        })
    }
}

/// The raw value and level of one parameter, as exported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterCell {
    /// The `<name>_value` cell.
    pub value: String,
    /// The `<name>_level` cell.
    pub level: String,
}

/// Raw parameter cells of a row, by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterCells {
    cells: BTreeMap<&'static str, ParameterCell>,
}

impl ParameterCells {
    /// Store the value cell of `name`.
    pub fn set_value(&mut self, name: &'static str, value: String) {
        self.cells.entry(name).or_default().value = value;
    }

    /// Store the level cell of `name`.
    pub fn set_level(&mut self, name: &'static str, level: String) {
        self.cells.entry(name).or_default().level = level;
    }

    /// The cells of `name`, if the input had any of its columns.
    pub fn get(&self, name: &str) -> Option<&ParameterCell> {
        self.cells.get(name)
    }
}

/// The `<name>_value` and `<name>_level` columns of every parameter in `names`.
pub fn parameter_columns<T: 'static>(
    names: &'static [&'static str],
    cells: fn(&mut T) -> &mut ParameterCells,
) -> Vec<CsvColumn<T>> {
    names
        .iter()
        .copied()
        .flat_map(|name| {
            [
                CsvColumn::new(format!("{name}_value"), move |row: &mut T, raw: &str| {
                    cells(row).set_value(name, String::from_cell(raw)?);
                    Ok(())
                }),
                CsvColumn::new(format!("{name}_level"), move |row: &mut T, raw: &str| {
                    cells(row).set_level(name, String::from_cell(raw)?);
                    Ok(())
                }),
            ]
        })
        .collect()
}

/// Scalar kinds a parameter can hold.
pub trait ParameterValue: Sized {
    /// Resolve the parameter `name` with `resolver`.
    fn resolve(resolver: &mut ParameterResolver, name: &str, level: &str, value: &str) -> Option<Self>;
}

impl ParameterValue for String {
    fn resolve(resolver: &mut ParameterResolver, name: &str, level: &str, value: &str) -> Option<Self> {
        resolver.handle_string_parameter(name, level, value)
    }
}

impl ParameterValue for i64 {
    fn resolve(resolver: &mut ParameterResolver, name: &str, level: &str, value: &str) -> Option<Self> {
        resolver.handle_int_parameter(name, level, value)
    }
}

impl ParameterValue for bool {
    fn resolve(resolver: &mut ParameterResolver, name: &str, level: &str, value: &str) -> Option<Self> {
        resolver.handle_bool_parameter(name, level, value)
    }
}

/// Parse `value` when `level` is `object_level`; `None` otherwise.
///
/// An empty level means the parameter still has its default value.
pub fn handle_parameter<T>(
    object_level: ParameterLevel,
    level: &str,
    value: &str,
    parse: impl FnOnce(&str) -> Result<T>,
) -> Result<Option<T>> {
    if level.trim().is_empty() {
        return Ok(None);
    }
    let level: ParameterLevel = level.parse()?;
    if level != object_level {
        return Ok(None);
    }
    parse(value).map(Some)
}

/// Resolves every parameter of one object, collecting errors along the way.
#[derive(Debug)]
pub struct ParameterResolver {
    object_level: ParameterLevel,
    errors: ErrorJoiner,
}

impl ParameterResolver {
    /// A resolver for objects living at `object_level`.
    pub fn new(object_level: ParameterLevel) -> Self {
        Self {
            object_level,
            errors: ErrorJoiner::new(),
        }
    }

    /// The level values must have been set at to be kept.
    pub fn object_level(&self) -> ParameterLevel {
        self.object_level
    }

    /// Resolve a text parameter.
    pub fn handle_string_parameter(&mut self, name: &str, level: &str, value: &str) -> Option<String> {
        self.handle(name, level, value, |v| Ok(v.to_owned()))
    }

    /// Resolve an integer parameter.
    pub fn handle_int_parameter(&mut self, name: &str, level: &str, value: &str) -> Option<i64> {
        self.handle(name, level, value, |v| {
            v.trim()
                .parse::<i64>()
                .with_context(|| format!("invalid integer value {v:?}"))
        })
    }

    /// Resolve a boolean parameter.
    pub fn handle_bool_parameter(&mut self, name: &str, level: &str, value: &str) -> Option<bool> {
        self.handle(name, level, value, |v| Ok(parse_bool(v.trim())?))
    }

    /// Resolve the parameter `name` from a row's raw cells.
    pub fn resolve<T: ParameterValue>(&mut self, cells: &ParameterCells, name: &str) -> Option<T> {
        let cell = cells.get(name)?;
        T::resolve(self, name, &cell.level, &cell.value)
    }

    /// Keep the value of `result`, or remember its error alongside the
    /// parameter errors.
    pub fn collect<T>(&mut self, result: Result<T>) -> Option<T> {
        self.errors.collect(result)
    }

    /// Every error seen while resolving, joined.
    pub fn finish(self) -> Result<(), JoinedError> {
        self.errors.finish()
    }

    fn handle<T>(
        &mut self,
        name: &str,
        level: &str,
        value: &str,
        parse: impl FnOnce(&str) -> Result<T>,
    ) -> Option<T> {
        let result = handle_parameter(self.object_level, level, value, parse)
            .with_context(|| format!("parameter {name}"));
        self.errors.collect(result).flatten()
    }
}

/// Declare the parameters an object type supports.
///
/// Generates a struct with one `Option` field per parameter, resolved from
/// [`ParameterCells`] and applied to a resource model under the same
/// attribute name.
#[macro_export]
macro_rules! parameter_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $param:ident: $ty:ty ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        $vis struct $name {
            $( pub $param: Option<$ty>, )*
        }

        #[allow(dead_code)]
        impl $name {
            /// Names of every parameter in the set.
            pub fn names() -> &'static [&'static str] {
                &[$(stringify!($param)),*]
            }

            /// Keep the parameters set at the resolver's level.
            pub fn resolve(
                resolver: &mut $crate::parameters::ParameterResolver,
                cells: &$crate::parameters::ParameterCells,
            ) -> Self {
                Self {
                    $( $param: resolver.resolve::<$ty>(cells, stringify!($param)), )*
                }
            }

            /// Whether no parameter was explicitly set.
            pub fn is_empty(&self) -> bool {
                true $( && self.$param.is_none() )*
            }

            /// Add every explicitly set parameter to `model`.
            pub fn apply(&self, model: &mut $crate::hcl::ResourceModel) {
                $( model.set_optional(stringify!($param), self.$param.clone()); )*
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use anyhow::Result;

    use super::*;

    #[test]
    fn levels_parse_case_insensitively() -> Result<()> {
        assert_eq!("database".parse::<ParameterLevel>()?, ParameterLevel::Database);
        assert_eq!(" ACCOUNT ".parse::<ParameterLevel>()?, ParameterLevel::Account);
        assert!("GALAXY".parse::<ParameterLevel>().is_err());
        Ok(())
    }

    #[test]
    fn matching_level_keeps_value() {
        let mut resolver = ParameterResolver::new(ParameterLevel::Database);
        assert_eq!(resolver.handle_int_parameter("p", "DATABASE", "7"), Some(7));
        assert_eq!(resolver.handle_bool_parameter("p", "DATABASE", "true"), Some(true));
        assert_eq!(
            resolver.handle_string_parameter("p", "DATABASE", "INFO"),
            Some("INFO".to_owned())
        );
        assert!(resolver.finish().is_ok());
    }

    #[test]
    fn inherited_level_is_dropped_whatever_the_value() {
        let mut resolver = ParameterResolver::new(ParameterLevel::Schema);
        assert_eq!(resolver.handle_int_parameter("p", "ACCOUNT", "7"), None);
        assert_eq!(resolver.handle_int_parameter("p", "DATABASE", "not a number"), None);
        assert_eq!(resolver.handle_string_parameter("p", "", "INFO"), None);
        assert!(resolver.finish().is_ok());
    }

    #[test]
    fn errors_are_joined_not_short_circuited() {
        let mut resolver = ParameterResolver::new(ParameterLevel::Warehouse);
        assert_eq!(resolver.handle_int_parameter("first", "WAREHOUSE", "x"), None);
        assert_eq!(resolver.handle_bool_parameter("second", "WAREHOUSE", "maybe"), None);
        assert_eq!(resolver.handle_string_parameter("third", "NOWHERE", "v"), None);
        assert_eq!(resolver.handle_int_parameter("fourth", "WAREHOUSE", "4"), Some(4));

        let err = resolver.finish().unwrap_err();
        assert_eq!(err.errors().len(), 3);
        let message = err.to_string();
        assert!(message.contains("parameter first"));
        assert!(message.contains("parameter second"));
        assert!(message.contains("parameter third"));
    }

    crate::parameter_set! {
        struct TestParameters {
            log_level: String,
            retention: i64,
            paused: bool,
        }
    }

    crate::csv_row! {
        struct TestRow {
            name: String => "name",
        }
        parameters: TestParameters
    }

    #[test]
    fn parameter_columns_are_generated_from_the_set() {
        let names: Vec<_> = TestRow::csv_columns()
            .iter()
            .map(|c| c.name().to_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "name",
                "log_level_value",
                "log_level_level",
                "retention_value",
                "retention_level",
                "paused_value",
                "paused_level",
            ]
        );
    }

    #[test]
    fn parameter_sets_resolve_and_apply() {
        let mut row = TestRow::default();
        row.parameters.set_value("log_level", "INFO".to_owned());
        row.parameters.set_level("log_level", "SCHEMA".to_owned());
        row.parameters.set_value("retention", "3".to_owned());
        row.parameters.set_level("retention", "ACCOUNT".to_owned());

        let mut resolver = ParameterResolver::new(ParameterLevel::Schema);
        let parameters = TestParameters::resolve(&mut resolver, &row.parameters);
        assert!(resolver.finish().is_ok());
        assert_eq!(
            parameters,
            TestParameters {
                log_level: Some("INFO".to_owned()),
                retention: None,
                paused: None,
            }
        );
        assert!(!parameters.is_empty());

        let mut model = crate::hcl::ResourceModel::new("t", "n");
        parameters.apply(&mut model);
        let attributes: Vec<_> = model.body().attribute_names().collect();
        assert_eq!(attributes, vec!["log_level"]);
    }
}
