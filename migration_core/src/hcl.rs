//! Terraform resource models and their HCL rendering.
//!
//! A [`ResourceModel`] is built up attribute by attribute and rendered in
//! one go. Attributes are kept sorted by name so the output is stable from
//! run to run.

use std::collections::BTreeMap;

/// Prefix of two spaces per nesting level.
const INDENT: &str = "  ";

/// A value assigned to an attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HclValue {
    /// A quoted string.
    String(String),
    /// A whole number.
    Number(i64),
    /// `true` or `false`.
    Bool(bool),
    /// A list of values, rendered inline.
    List(Vec<HclValue>),
    /// A nested block.
    Block(HclBlock),
}

impl From<String> for HclValue {
    fn from(value: String) -> Self {
        HclValue::String(value)
    }
}

impl From<&str> for HclValue {
    fn from(value: &str) -> Self {
        HclValue::String(value.to_owned())
    }
}

impl From<&String> for HclValue {
    fn from(value: &String) -> Self {
        HclValue::String(value.clone())
    }
}

impl From<i64> for HclValue {
    fn from(value: i64) -> Self {
        HclValue::Number(value)
    }
}

impl From<bool> for HclValue {
    fn from(value: bool) -> Self {
        HclValue::Bool(value)
    }
}

impl From<HclBlock> for HclValue {
    fn from(value: HclBlock) -> Self {
        HclValue::Block(value)
    }
}

impl<T: Into<HclValue>> From<Vec<T>> for HclValue {
    fn from(values: Vec<T>) -> Self {
        HclValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// The body of a block: attribute assignments and nested blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HclBlock {
    attributes: BTreeMap<String, HclValue>,
}

impl HclBlock {
    /// An empty body.
    pub fn new() -> Self {
        Default::default()
    }

    /// Add an attribute, consuming and returning the block.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HclValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Add (or replace) an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<HclValue>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Look an attribute up.
    pub fn get(&self, name: &str) -> Option<&HclValue> {
        self.attributes.get(name)
    }

    /// Attribute names, sorted.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.keys().map(String::as_str)
    }

    /// Whether nothing was assigned.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let indent = INDENT.repeat(depth);
        for (name, value) in &self.attributes {
            match value {
                HclValue::Block(block) => {
                    out.push_str(&format!("{indent}{name} {{\n"));
                    block.render_into(out, depth + 1);
                    out.push_str(&format!("{indent}}}\n"));
                }
                value => out.push_str(&format!("{indent}{name} = {}\n", render_value(value))),
            }
        }
    }
}

/// One Terraform resource block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceModel {
    resource_type: String,
    name: String,
    body: HclBlock,
}

impl ResourceModel {
    /// An empty resource of the given type and local name.
    pub fn new(resource_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            name: name.into(),
            body: HclBlock::new(),
        }
    }

    /// The Terraform resource type, e.g. `snowflake_database`.
    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    /// The local name of the resource.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the local name of the resource.
    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// `<type>.<name>`, the way other configuration refers to the resource.
    pub fn address(&self) -> String {
        format!("{}.{}", self.resource_type, self.name)
    }

    /// The resource body.
    pub fn body(&self) -> &HclBlock {
        &self.body
    }

    /// Look an attribute up.
    pub fn attribute(&self, name: &str) -> Option<&HclValue> {
        self.body.get(name)
    }

    /// Add an attribute, consuming and returning the model.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<HclValue>) -> Self {
        self.body.set(name, value);
        self
    }

    /// Add (or replace) an attribute.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<HclValue>) -> &mut Self {
        self.body.set(name, value);
        self
    }

    /// Add an attribute when `value` is present.
    pub fn set_optional<V: Into<HclValue>>(
        &mut self,
        name: impl Into<String>,
        value: Option<V>,
    ) -> &mut Self {
        if let Some(value) = value {
            self.body.set(name, value);
        }
        self
    }

    /// Add a string attribute when `value` is not empty.
    pub fn set_if_not_empty(&mut self, name: impl Into<String>, value: &str) -> &mut Self {
        if !value.is_empty() {
            self.body.set(name, value);
        }
        self
    }

    /// Render the resource as an HCL block.
    pub fn render(&self) -> String {
        let mut out = format!(
            "resource \"{}\" \"{}\" {{\n",
            escape_string(&self.resource_type),
            escape_string(&self.name)
        );
        self.body.render_into(&mut out, 1);
        out.push_str("}\n");
        out
    }
}

fn render_value(value: &HclValue) -> String {
    match value {
        HclValue::String(s) => format!("\"{}\"", escape_string(s)),
        HclValue::Number(n) => n.to_string(),
        HclValue::Bool(b) => b.to_string(),
        HclValue::List(values) => format!(
            "[{}]",
            values.iter().map(render_value).collect::<Vec<_>>().join(", ")
        ),
        // Blocks only appear as attribute values; inside a list they are
        // rendered as an object.
        HclValue::Block(block) => format!(
            "{{ {} }}",
            block
                .attributes
                .iter()
                .map(|(k, v)| format!("{k} = {}", render_value(v)))
                .collect::<Vec<_>>()
                .join(", ")
        ),
    }
}

/// Escape a string so it can be placed between double quotes in HCL.
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '$' | '%' if chars.peek() == Some(&'{') => {
                // Template sequences are doubled to stay literal.
                out.push(c);
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
