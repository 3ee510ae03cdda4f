//! Local names for generated resources.

use std::collections::HashSet;

use crate::logging::warn;

/// Prefix shared by every generated local name.
pub const RESOURCE_ID_PREFIX: &str = "snowflake_generated_";

/// Derive a Terraform local name from a Snowflake identifier.
///
/// Dots become underscores, everything outside `[A-Za-z0-9_-]` is dropped
/// and the result is prefixed with [`RESOURCE_ID_PREFIX`].
pub fn normalize_resource_id(id: &str) -> String {
    let normalized: String = id
        .replace('.', "_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    format!("{RESOURCE_ID_PREFIX}{normalized}")
}

/// Hands out unique local names.
///
/// Distinct identifiers can normalize to the same name (`"a.b"` and
/// `"a"."b"`, for instance). The first claim keeps the name, later ones get
/// a numeric suffix.
#[derive(Debug, Default)]
pub struct ResourceIdRegistry {
    used: HashSet<String>,
}

impl ResourceIdRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Default::default()
    }

    /// Reserve `id`, or the first free `<id>_<n>` if it is taken.
    pub fn claim(&mut self, id: &str) -> String {
        if self.used.insert(id.to_owned()) {
            return id.to_owned();
        }
        let mut suffix = 1;
        loop {
            let candidate = format!("{id}_{suffix}");
            if self.used.insert(candidate.clone()) {
                warn!("resource name {id} is already in use, renamed to {candidate}");
                return candidate;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_quoted_identifiers() {
        assert_eq!(normalize_resource_id("\"abc123\""), "snowflake_generated_abc123");
        assert_eq!(
            normalize_resource_id("\"1a1\".\"2b2\".\"3c3\""),
            "snowflake_generated_1a1_2b2_3c3"
        );
    }

    #[test]
    fn drops_unsupported_characters() {
        assert_eq!(
            normalize_resource_id("role_\"my role!\"-x"),
            "snowflake_generated_role_myrole-x"
        );
        assert_eq!(normalize_resource_id(""), "snowflake_generated_");
    }

    #[test]
    fn normalization_is_deterministic() {
        let id = "\"DB\".\"SCHEMA\"";
        assert_eq!(normalize_resource_id(id), normalize_resource_id(id));
    }

    #[test]
    fn registry_suffixes_duplicates() {
        let mut registry = ResourceIdRegistry::new();
        assert_eq!(registry.claim("a"), "a");
        assert_eq!(registry.claim("a"), "a_1");
        assert_eq!(registry.claim("a_2"), "a_2");
        assert_eq!(registry.claim("a"), "a_3");
        assert_eq!(registry.claim("b"), "b");
    }
}
