//!
//! Core of the Snowflake migration tooling
//!
//! Object-agnostic pieces shared by every supported object type: reading
//! CSV exports, projecting them into typed rows, resolving parameter
//! levels, and rendering Terraform configuration.
#![deny(missing_docs)]

pub mod convert;
pub mod errors;
pub mod hcl;
pub mod import;
pub mod input;
pub mod logging;
pub mod parameters;
pub mod resource_id;

pub use convert::{convert_csv_input, CsvRow};
pub use hcl::{HclBlock, HclValue, ResourceModel};
pub use import::{ImportModel, ImportRenderer, ImportStatementType};
pub use input::CsvGrid;
pub use parameters::{ParameterLevel, ParameterResolver};

#[macro_export]
/// Time the code inside the macro. Write the elapsed time to debug logs.
/// Derived from https://notes.iveselov.info/programming/time_it-a-case-study-in-rust-macros
macro_rules! log_runtime {
    ($context:expr, $($tt:tt)+) => {
        {
            $crate::logging::debug!("{}: starting", $context);
            let timer = std::time::Instant::now();
            let x =
            $(
                $tt
            )+;
            $crate::logging::debug!("{}: {:?}", $context, timer.elapsed());
            x
        }
    }
}
