//! Error accumulation.
//!
//! Some steps (resolving every parameter of a row, for example) should
//! report all of their problems at once rather than stopping at the first.

use thiserror::Error;

/// Several errors collected while processing one unit of work.
#[derive(Debug, Error)]
#[error("{}", display_joined(.0))]
pub struct JoinedError(Vec<anyhow::Error>);

impl JoinedError {
    /// The individual errors, in the order they were collected.
    pub fn errors(&self) -> &[anyhow::Error] {
        &self.0
    }
}

fn display_joined(errors: &[anyhow::Error]) -> String {
    errors
        .iter()
        .map(|e| format!("{e:#}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collects errors instead of short-circuiting on them.
#[derive(Debug, Default)]
pub struct ErrorJoiner {
    errors: Vec<anyhow::Error>,
}

impl ErrorJoiner {
    /// Create an empty joiner.
    pub fn new() -> Self {
        Default::default()
    }

    /// Keep the value of a successful result; remember the error otherwise.
    pub fn collect<T, E>(&mut self, result: Result<T, E>) -> Option<T>
    where
        E: Into<anyhow::Error>,
    {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.errors.push(e.into());
                None
            }
        }
    }

    /// Remember an error.
    pub fn push(&mut self, error: impl Into<anyhow::Error>) {
        self.errors.push(error.into());
    }

    /// Whether no error has been collected so far.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Ok` if nothing went wrong, every collected error joined otherwise.
    pub fn finish(self) -> Result<(), JoinedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(JoinedError(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::anyhow;

    use super::*;

    #[test]
    fn empty_joiner_finishes_ok() {
        assert!(ErrorJoiner::new().finish().is_ok());
    }

    #[test]
    fn collect_keeps_values_and_errors() {
        let mut joiner = ErrorJoiner::new();
        assert_eq!(joiner.collect::<_, anyhow::Error>(Ok(3)), Some(3));
        assert_eq!(joiner.collect::<i32, _>(Err(anyhow!("first"))), None);
        joiner.push(anyhow!("second"));

        let err = joiner.finish().unwrap_err();
        assert_eq!(err.errors().len(), 2);
        assert_eq!(err.to_string(), "first\nsecond");
    }
}
