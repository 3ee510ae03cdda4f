//! Snowflake object identifiers.
//!
//! Identifiers render as their fully-qualified name: every part double
//! quoted, parts joined by dots. That string is what the Terraform provider
//! expects as an import id and in name references.

use std::fmt::Display;

use thiserror::Error;

/// A structured identifier could not be read from a name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentifierParseError {
    #[error("identifier is empty")]
    Empty,
    #[error("identifier {0:?} has an empty part")]
    EmptyPart(String),
    #[error("identifier {0:?} has an unterminated quote")]
    UnterminatedQuote(String),
    #[error("identifier {0:?} has unexpected characters after a quoted part")]
    TrailingCharacters(String),
    #[error("identifier {identifier:?} has {found} parts, expected {expected}")]
    UnexpectedPartCount {
        identifier: String,
        expected: usize,
        found: usize,
    },
}

/// Anything that can be written as a fully-qualified name.
pub trait ObjectIdentifier {
    /// The parts, quoted and dot-joined.
    fn fully_qualified_name(&self) -> String;
    /// The unqualified object name.
    fn name(&self) -> &str;
}

fn quote(part: &str) -> String {
    format!("\"{}\"", part.replace('"', "\"\""))
}

/// An object living directly in the account (database, warehouse, role, user...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AccountObjectIdentifier {
    name: String,
}

impl AccountObjectIdentifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl ObjectIdentifier for AccountObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        quote(&self.name)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An object living in a database (schema, database role).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatabaseObjectIdentifier {
    database: String,
    name: String,
}

impl DatabaseObjectIdentifier {
    pub fn new(database: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            name: name.into(),
        }
    }

    pub fn database_name(&self) -> &str {
        &self.database
    }

    pub fn database_id(&self) -> AccountObjectIdentifier {
        AccountObjectIdentifier::new(&self.database)
    }
}

impl ObjectIdentifier for DatabaseObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        format!("{}.{}", quote(&self.database), quote(&self.name))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// An object living in a schema (table, view, stage...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SchemaObjectIdentifier {
    database: String,
    schema: String,
    name: String,
}

impl SchemaObjectIdentifier {
    pub fn new(
        database: impl Into<String>,
        schema: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            database: database.into(),
            schema: schema.into(),
            name: name.into(),
        }
    }

    pub fn schema_id(&self) -> DatabaseObjectIdentifier {
        DatabaseObjectIdentifier::new(&self.database, &self.schema)
    }
}

impl ObjectIdentifier for SchemaObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        format!(
            "{}.{}.{}",
            quote(&self.database),
            quote(&self.schema),
            quote(&self.name)
        )
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The identifier of whatever a grant is on.
///
/// `Raw` keeps a name we could not split into parts; it is used verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GrantObjectIdentifier {
    Account(AccountObjectIdentifier),
    Database(DatabaseObjectIdentifier),
    Schema(SchemaObjectIdentifier),
    Raw(String),
}

impl ObjectIdentifier for GrantObjectIdentifier {
    fn fully_qualified_name(&self) -> String {
        match self {
            GrantObjectIdentifier::Account(id) => id.fully_qualified_name(),
            GrantObjectIdentifier::Database(id) => id.fully_qualified_name(),
            GrantObjectIdentifier::Schema(id) => id.fully_qualified_name(),
            GrantObjectIdentifier::Raw(raw) => raw.clone(),
        }
    }

    fn name(&self) -> &str {
        match self {
            GrantObjectIdentifier::Account(id) => id.name(),
            GrantObjectIdentifier::Database(id) => id.name(),
            GrantObjectIdentifier::Schema(id) => id.name(),
            GrantObjectIdentifier::Raw(raw) => raw.as_str(),
        }
    }
}

impl Display for GrantObjectIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fully_qualified_name())
    }
}

/// Split a (possibly quoted) dotted name into its parts.
///
/// Quoted parts may contain dots and doubled quotes; unquoted parts are
/// taken as they are.
pub fn parse_identifier_parts(identifier: &str) -> Result<Vec<String>, IdentifierParseError> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Err(IdentifierParseError::Empty);
    }

    let mut parts = vec![];
    let mut chars = identifier.chars().peekable();
    loop {
        let mut part = String::new();
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        part.push('"');
                    }
                    Some('"') => break,
                    Some(c) => part.push(c),
                    None => {
                        return Err(IdentifierParseError::UnterminatedQuote(
                            identifier.to_owned(),
                        ))
                    }
                }
            }
            if !matches!(chars.peek(), None | Some('.')) {
                return Err(IdentifierParseError::TrailingCharacters(
                    identifier.to_owned(),
                ));
            }
        } else {
            while let Some(c) = chars.next_if(|c| *c != '.') {
                if c == '"' {
                    return Err(IdentifierParseError::UnterminatedQuote(
                        identifier.to_owned(),
                    ));
                }
                part.push(c);
            }
        }

        if part.is_empty() {
            return Err(IdentifierParseError::EmptyPart(identifier.to_owned()));
        }
        parts.push(part);

        match chars.next() {
            Some('.') => continue,
            _ => break,
        }
    }
    Ok(parts)
}

fn parse_exact<const N: usize>(identifier: &str) -> Result<[String; N], IdentifierParseError> {
    let parts = parse_identifier_parts(identifier)?;
    let found = parts.len();
    parts
        .try_into()
        .map_err(|_| IdentifierParseError::UnexpectedPartCount {
            identifier: identifier.to_owned(),
            expected: N,
            found,
        })
}

pub fn parse_account_object_identifier(
    identifier: &str,
) -> Result<AccountObjectIdentifier, IdentifierParseError> {
    let [name] = parse_exact::<1>(identifier)?;
    Ok(AccountObjectIdentifier::new(name))
}

pub fn parse_database_object_identifier(
    identifier: &str,
) -> Result<DatabaseObjectIdentifier, IdentifierParseError> {
    let [database, name] = parse_exact::<2>(identifier)?;
    Ok(DatabaseObjectIdentifier::new(database, name))
}

pub fn parse_schema_object_identifier(
    identifier: &str,
) -> Result<SchemaObjectIdentifier, IdentifierParseError> {
    let [database, schema, name] = parse_exact::<3>(identifier)?;
    Ok(SchemaObjectIdentifier::new(database, schema, name))
}
