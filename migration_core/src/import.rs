//! Import directives for generated resources.
//!
//! Every generated resource is paired with an [`ImportModel`] so existing
//! objects can be adopted by Terraform instead of being recreated.

use std::{fmt::Display, str::FromStr};

use anyhow::{Context, Result};
use serde::Serialize;
use thiserror::Error;
use tinytemplate::TinyTemplate;

use crate::hcl::{escape_string, ResourceModel};

const IMPORT_BLOCK_TEMPLATE_NAME: &str = "import_block";
const IMPORT_BLOCK_TEMPLATE: &str = "import \\{\n  to = {resource_address}\n  id = \"{id}\"\n}\n";

const IMPORT_STATEMENT_TEMPLATE_NAME: &str = "import_statement";
const IMPORT_STATEMENT_TEMPLATE: &str = "# terraform import {resource_address} '{id}'\n";

/// How import information is written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImportStatementType {
    /// `# terraform import ...` comment lines.
    #[default]
    Statement,
    /// `import {}` blocks.
    Block,
}

/// The import type string is not one we know.
#[derive(Debug, Error)]
#[error("unknown import type {0:?}, expected one of: statement, block")]
pub struct UnknownImportType(String);

impl FromStr for ImportStatementType {
    type Err = UnknownImportType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "statement" => Ok(ImportStatementType::Statement),
            "block" => Ok(ImportStatementType::Block),
            o => Err(UnknownImportType(o.to_owned())),
        }
    }
}

impl Display for ImportStatementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportStatementType::Statement => write!(f, "statement"),
            ImportStatementType::Block => write!(f, "block"),
        }
    }
}

/// A resource address paired with the identifier of the object it adopts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportModel {
    resource_type: String,
    resource_name: String,
    id: String,
}

impl ImportModel {
    /// Import `id` into `resource`.
    pub fn new(resource: &ResourceModel, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource.resource_type().to_owned(),
            resource_name: resource.name().to_owned(),
            id: id.into(),
        }
    }

    /// `<type>.<name>` of the target resource.
    pub fn resource_address(&self) -> String {
        format!("{}.{}", self.resource_type, self.resource_name)
    }

    /// The Snowflake identifier, as the provider expects it on import.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Point the import at a renamed resource.
    pub fn rename(&mut self, resource_name: impl Into<String>) {
        self.resource_name = resource_name.into();
    }
}

#[derive(Serialize)]
struct ImportContext {
    resource_address: String,
    id: String,
}

/// Renders [`ImportModel`]s in one [`ImportStatementType`].
pub struct ImportRenderer {
    templates: TinyTemplate<'static>,
    statement_type: ImportStatementType,
}

impl ImportRenderer {
    /// Compile the templates for `statement_type`.
    pub fn new(statement_type: ImportStatementType) -> Result<Self> {
        let mut templates = TinyTemplate::new();
        templates.set_default_formatter(&tinytemplate::format_unescaped);
        templates
            .add_template(IMPORT_BLOCK_TEMPLATE_NAME, IMPORT_BLOCK_TEMPLATE)
            .context("compiling import block template")?;
        templates
            .add_template(IMPORT_STATEMENT_TEMPLATE_NAME, IMPORT_STATEMENT_TEMPLATE)
            .context("compiling import statement template")?;
        Ok(Self {
            templates,
            statement_type,
        })
    }

    /// The type this renderer produces.
    pub fn statement_type(&self) -> ImportStatementType {
        self.statement_type
    }

    /// Render one import directive.
    pub fn render(&self, import: &ImportModel) -> Result<String> {
        let (template, id) = match self.statement_type {
            ImportStatementType::Block => (IMPORT_BLOCK_TEMPLATE_NAME, escape_string(import.id())),
            ImportStatementType::Statement => (IMPORT_STATEMENT_TEMPLATE_NAME, import.id().to_owned()),
        };
        self.templates
            .render(
                template,
                &ImportContext {
                    resource_address: import.resource_address(),
                    id,
                },
            )
            .with_context(|| format!("rendering import for {}", import.resource_address()))
    }
}
