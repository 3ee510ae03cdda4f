//! Projecting a CSV grid into typed rows.
//!
//! Each object type declares a flat row struct with the [`csv_row!`] macro.
//! The macro records which column feeds which field, so the converter can
//! populate only the columns present in the header, in header order, and
//! without inspecting types at runtime.

use anyhow::{bail, Context, Result};
use thiserror::Error;

use crate::input::unescape_csv_value;
use crate::logging::{debug, warn};

/// A cell could not be coerced into the field it feeds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoercionError {
    /// The cell of a boolean field does not hold a boolean.
    #[error("invalid boolean value {value:?}")]
    InvalidBool {
        /// The raw cell.
        value: String,
    },
}

/// Value types a CSV cell can be coerced into.
///
/// Only text and booleans are supported; row structs using any other type
/// fail to compile.
pub trait CsvCell: Sized {
    /// Coerce the raw cell.
    fn from_cell(raw: &str) -> Result<Self, CoercionError>;
}

impl CsvCell for String {
    fn from_cell(raw: &str) -> Result<Self, CoercionError> {
        Ok(unescape_csv_value(raw))
    }
}

impl CsvCell for bool {
    fn from_cell(raw: &str) -> Result<Self, CoercionError> {
        parse_bool(raw)
    }
}

/// Parse a boolean the way Snowflake exports (and most tooling) spell them.
pub fn parse_bool(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CoercionError::InvalidBool {
            value: raw.to_owned(),
        }),
    }
}

/// Setter storing a coerced cell into a row.
type Assign<T> = Box<dyn Fn(&mut T, &str) -> Result<(), CoercionError>>;

/// One column a row struct knows how to read.
pub struct CsvColumn<T> {
    name: String,
    assign: Assign<T>,
}

impl<T> CsvColumn<T> {
    /// Bind a column name to the setter of the field it feeds.
    pub fn new(
        name: impl Into<String>,
        assign: impl Fn(&mut T, &str) -> Result<(), CoercionError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            assign: Box::new(assign),
        }
    }

    /// The header name of the column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Coerce `raw` and store it in `row`.
    pub fn assign(&self, row: &mut T, raw: &str) -> Result<(), CoercionError> {
        (self.assign)(row, raw)
    }
}

/// A typed line of a CSV export that converts into a representation.
pub trait CsvRow: Default {
    /// What one row converts into.
    type Representation;

    /// Every column this row can read.
    fn columns() -> Vec<CsvColumn<Self>>;

    /// Build the representation of this row.
    fn convert(&self) -> Result<Self::Representation>;

    /// Cross-field adjustments made after [`CsvRow::convert`] succeeded.
    fn post_convert(&self, _representation: &mut Self::Representation) -> Result<()> {
        Ok(())
    }
}

/// Convert a CSV grid (header first) into representations.
///
/// Rows whose cells can't be coerced are logged and skipped. A failing
/// [`CsvRow::convert`] aborts the whole conversion.
pub fn convert_csv_input<T: CsvRow>(grid: &[Vec<String>]) -> Result<Vec<T::Representation>> {
    let Some((header, rows)) = grid.split_first() else {
        bail!("csv input is empty");
    };

    let mut columns: Vec<(usize, CsvColumn<T>)> = T::columns()
        .into_iter()
        .filter_map(|column| {
            header
                .iter()
                .position(|h| h == column.name())
                .map(|index| (index, column))
        })
        .collect();
    columns.sort_by_key(|(index, _)| *index);
    debug!(
        "reading columns: {:?}",
        columns.iter().map(|(_, c)| c.name()).collect::<Vec<_>>()
    );

    let mut result = Vec::with_capacity(rows.len());
    'rows: for (row_index, row) in rows.iter().enumerate() {
        let mut csv_row = T::default();
        for (column_index, column) in &columns {
            let raw = row.get(*column_index).map(String::as_str).unwrap_or_default();
            if let Err(e) = column.assign(&mut csv_row, raw) {
                warn!(
                    "skipping row {}: field {} with value {:?}: {}",
                    row_index + 1,
                    column.name(),
                    raw,
                    e
                );
                continue 'rows;
            }
        }

        let mut representation = csv_row
            .convert()
            .with_context(|| format!("failed to convert row {}", row_index + 1))?;
        csv_row
            .post_convert(&mut representation)
            .with_context(|| format!("failed to post-process row {}", row_index + 1))?;
        result.push(representation);
    }

    Ok(result)
}

/// Declare a CSV row struct and the columns feeding its fields.
///
/// An optional `parameters: <set>` clause adds a `parameters` field holding
/// the `<name>_value`/`<name>_level` cells of every parameter declared in
/// the [`parameter_set!`](crate::parameter_set) `<set>`.
///
/// ```
/// migration_core::csv_row! {
///     /// A role from `SHOW ROLES`.
///     pub struct RoleRow {
///         name: String => "name",
///         is_default: bool => "is_default",
///     }
/// }
/// assert_eq!(RoleRow::column_names(), &["name", "is_default"]);
/// ```
#[macro_export]
macro_rules! csv_row {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_meta:meta])* $field:ident: $ty:ty => $column:literal ),* $(,)?
        }
        $( parameters: $parameters:ty )?
    ) => {
        $(#[$meta])*
        #[derive(Default, Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $( $(#[$field_meta])* pub $field: $ty, )*
            $(
                #[doc = concat!("Raw cells of the ", stringify!($parameters), ".")]
                pub parameters: $crate::parameters::ParameterCells,
            )?
        }

        #[allow(dead_code)]
        impl $name {
            /// Header names of the plain fields, in declaration order.
            pub fn column_names() -> &'static [&'static str] {
                &[$($column),*]
            }

            fn csv_columns() -> Vec<$crate::convert::CsvColumn<Self>> {
                #[allow(unused_mut)]
                let mut columns = vec![
                    $(
                        $crate::convert::CsvColumn::new($column, |row: &mut Self, raw: &str| {
                            row.$field = <$ty as $crate::convert::CsvCell>::from_cell(raw)?;
                            Ok(())
                        }),
                    )*
                ];
                $(
                    fn parameter_cells(row: &mut $name) -> &mut $crate::parameters::ParameterCells {
                        &mut row.parameters
                    }
                    columns.extend($crate::parameters::parameter_columns::<Self>(
                        <$parameters>::names(),
                        parameter_cells,
                    ));
                )?
                columns
            }
        }
    };
}
