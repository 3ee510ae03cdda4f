//! Full CLI library for the migration script
//!
//! Reads a CSV export of Snowflake `SHOW` output from standard input and
//! writes Terraform resources and import directives for it to standard
//! output. Diagnostics go to standard error.

#![deny(missing_docs)]

pub mod cmd;
pub mod generate;

use std::io::{Read, Write};

use clap::{error::ErrorKind, Parser};
use thiserror::Error;

use migration_core::{input::read_csv, logging};

use crate::cmd::{normalize_args, Args};

/// The script ran to completion.
pub const EXIT_SUCCESS: i32 = 0;
/// The arguments could not be parsed.
pub const EXIT_ARGS: i32 = 1;
/// The input is not valid CSV.
pub const EXIT_CSV: i32 = 2;
/// Generating or writing the configuration failed.
pub const EXIT_GENERATE: i32 = 3;

/// Why a run failed.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// Invalid command line.
    #[error(transparent)]
    Args(#[from] clap::Error),
    /// Unreadable input.
    #[error("failed to read CSV input: {0:#}")]
    Csv(anyhow::Error),
    /// Conversion, rendering or output failure.
    #[error("failed to generate configuration: {0:#}")]
    Generate(anyhow::Error),
}

impl ProgramError {
    /// The process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProgramError::Args(_) => EXIT_ARGS,
            ProgramError::Csv(_) => EXIT_CSV,
            ProgramError::Generate(_) => EXIT_GENERATE,
        }
    }
}

/// One run of the script over its arguments and standard streams.
///
/// `stderr` receives usage and the error ending a failed run. Diagnostics
/// (skipped rows and grant groups, renamed resources) are logged through
/// [`logging::setup`], which writes to the process's standard error.
pub struct Program<I, O, E> {
    args: Vec<String>,
    stdin: I,
    stdout: O,
    stderr: E,
}

impl<I: Read, O: Write, E: Write> Program<I, O, E> {
    /// A run with the given arguments (program name first) and streams.
    pub fn new(args: impl IntoIterator<Item = String>, stdin: I, stdout: O, stderr: E) -> Self {
        Self {
            args: args.into_iter().collect(),
            stdin,
            stdout,
            stderr,
        }
    }

    /// Run the script and return the process exit code.
    pub fn run(mut self) -> i32 {
        match self.try_run() {
            Ok(()) => EXIT_SUCCESS,
            Err(ProgramError::Args(e))
                if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                // Usage goes to standard error so stdout only ever holds configuration.
                let _ = write!(self.stderr, "{e}");
                EXIT_SUCCESS
            }
            Err(ProgramError::Args(e)) => {
                let _ = write!(self.stderr, "{e}");
                EXIT_ARGS
            }
            Err(e) => {
                let _ = writeln!(self.stderr, "error: {e}");
                e.exit_code()
            }
        }
    }

    fn try_run(&mut self) -> Result<(), ProgramError> {
        let args = Args::try_parse_from(normalize_args(self.args.drain(..)))?;
        logging::setup(args.log_level);
        logging::debug!("migrating {} with {} imports", args.object_type, args.import);

        let grid = read_csv(&mut self.stdin).map_err(ProgramError::Csv)?;
        let output = generate::generate(args.object_type, &grid, args.import)
            .map_err(ProgramError::Generate)?;
        self.stdout
            .write_all(output.as_bytes())
            .and_then(|_| self.stdout.flush())
            .map_err(|e| ProgramError::Generate(e.into()))?;
        Ok(())
    }
}
