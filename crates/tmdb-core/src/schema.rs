//! Static schema declarations for provider and data source configuration.
//!
//! A [`Schema`] lists the attributes a data source accepts and produces.
//! Each [`Attribute`] is required, optional, or computed (or optional and
//! computed), with a scalar or nested-list shape. Schemas are built once at
//! startup and never mutated.
//!
//! ```
//! use tmdb_core::schema::{Attribute, Schema};
//!
//! let schema = Schema::new()
//!     .with_attribute("id", Attribute::required_int64())
//!     .with_attribute("title", Attribute::computed_string());
//! assert!(schema.check_consistency().is_empty());
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::diagnostics::{AttributePath, Diagnostics};
use crate::error::Error;

// ---------------------------------------------------------------------------
// Attribute shapes
// ---------------------------------------------------------------------------

/// The shape of an attribute's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "attributes", rename_all = "snake_case")]
pub enum AttributeKind {
    Int64,
    String,
    /// An ordered list of objects, each with the given attributes.
    ListNested(BTreeMap<String, Attribute>),
}

impl AttributeKind {
    fn type_name(&self) -> &'static str {
        match self {
            AttributeKind::Int64 => "number",
            AttributeKind::String => "string",
            AttributeKind::ListNested(_) => "list of objects",
        }
    }

    fn matches(&self, value: &serde_json::Value) -> bool {
        match self {
            AttributeKind::Int64 => value.is_i64(),
            AttributeKind::String => value.is_string(),
            AttributeKind::ListNested(_) => value
                .as_array()
                .is_some_and(|items| items.iter().all(serde_json::Value::is_object)),
        }
    }
}

/// A single attribute declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    #[serde(flatten)]
    pub kind: AttributeKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub computed: bool,
    /// The host must redact this value in plan output and logs.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub sensitive: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Attribute {
    fn new(kind: AttributeKind) -> Self {
        Self {
            kind,
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            description: None,
        }
    }

    pub fn required(kind: AttributeKind) -> Self {
        Self {
            required: true,
            ..Self::new(kind)
        }
    }

    pub fn optional(kind: AttributeKind) -> Self {
        Self {
            optional: true,
            ..Self::new(kind)
        }
    }

    pub fn computed(kind: AttributeKind) -> Self {
        Self {
            computed: true,
            ..Self::new(kind)
        }
    }

    pub fn required_int64() -> Self {
        Self::required(AttributeKind::Int64)
    }

    pub fn required_string() -> Self {
        Self::required(AttributeKind::String)
    }

    pub fn optional_string() -> Self {
        Self::optional(AttributeKind::String)
    }

    pub fn computed_int64() -> Self {
        Self::computed(AttributeKind::Int64)
    }

    pub fn computed_string() -> Self {
        Self::computed(AttributeKind::String)
    }

    /// A computed list of nested objects.
    pub fn computed_list_nested(attributes: BTreeMap<String, Attribute>) -> Self {
        Self::computed(AttributeKind::ListNested(attributes))
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Attach documentation text shown by the host.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// `true` when configuration may never set this attribute.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.required && !self.optional
    }
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Attribute declarations for one provider or data source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Schema {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.attributes.insert(name.into(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Report declarations that contradict themselves: an attribute that is
    /// both required and computed, required and optional, or none of the
    /// three. Nested attributes of a computed list must be computed.
    pub fn check_consistency(&self) -> Diagnostics {
        let mut diags = Diagnostics::new();
        for (name, attribute) in &self.attributes {
            check_attribute(AttributePath::root(name.clone()), attribute, false, &mut diags);
        }
        diags
    }

    /// Validate a declared configuration document against this schema.
    ///
    /// A `null` document is treated as an empty object. Every problem is
    /// reported; validation does not stop at the first one.
    pub fn validate_config(&self, config: &serde_json::Value) -> Diagnostics {
        let mut diags = Diagnostics::new();

        let empty = serde_json::Map::new();
        let object = match config {
            serde_json::Value::Null => &empty,
            serde_json::Value::Object(map) => map,
            other => {
                diags.push(
                    Error::invalid_config(
                        "Invalid Configuration",
                        format!("Expected an object of attributes, got: {other}"),
                    )
                    .into_diagnostic(),
                );
                return diags;
            }
        };

        for name in object.keys() {
            if !self.attributes.contains_key(name) {
                diags.push(
                    Error::invalid_attribute(
                        AttributePath::root(name.clone()),
                        "Unsupported Attribute",
                        format!("An attribute named `{name}` is not expected here."),
                    )
                    .into_diagnostic(),
                );
            }
        }

        for (name, attribute) in &self.attributes {
            let path = AttributePath::root(name.clone());
            let value = object.get(name).filter(|v| !v.is_null());

            match value {
                None if attribute.required => diags.push(
                    Error::invalid_attribute(
                        path,
                        "Missing Required Attribute",
                        format!("The argument `{name}` is required, but no definition was found."),
                    )
                    .into_diagnostic(),
                ),
                None => {}
                Some(_) if attribute.is_read_only() => diags.push(
                    Error::invalid_attribute(
                        path,
                        "Invalid Configuration for Read-Only Attribute",
                        format!("Cannot set value for `{name}`: it is computed by the provider."),
                    )
                    .into_diagnostic(),
                ),
                Some(v) if !attribute.kind.matches(v) => diags.push(
                    Error::invalid_attribute(
                        path,
                        "Incorrect Attribute Value Type",
                        format!(
                            "Inappropriate value for attribute `{name}`: {} required, got {v}.",
                            attribute.kind.type_name()
                        ),
                    )
                    .into_diagnostic(),
                ),
                Some(_) => {}
            }
        }

        diags
    }

    /// Check a state document produced by a read against this schema.
    ///
    /// Every declared attribute must be present with its declared type
    /// (`null` is accepted) and nothing undeclared may appear. Elements of
    /// nested lists are checked too and reported with indexed paths such as
    /// `movies[0].title`.
    pub fn validate_state(&self, state: &serde_json::Value) -> Diagnostics {
        let mut diags = Diagnostics::new();
        match state.as_object() {
            Some(object) => check_state_object(&self.attributes, object, None, &mut diags),
            None => diags.add_error(
                "Invalid Provider State",
                format!("The read produced a non-object state: {state}"),
            ),
        }
        diags
    }
}

fn check_state_object(
    attributes: &BTreeMap<String, Attribute>,
    object: &serde_json::Map<String, serde_json::Value>,
    parent: Option<&AttributePath>,
    diags: &mut Diagnostics,
) {
    let path_to = |name: &str| match parent {
        Some(parent) => parent.clone().attribute(name),
        None => AttributePath::root(name),
    };

    for name in object.keys() {
        if !attributes.contains_key(name) {
            let path = path_to(name.as_str());
            let detail = format!("The read produced `{path}`, which the schema does not declare.");
            diags.add_attribute_error(path, "Invalid Provider State", detail);
        }
    }

    for (name, attribute) in attributes {
        let path = path_to(name.as_str());
        let value = match object.get(name) {
            Some(serde_json::Value::Null) => continue,
            Some(value) => value,
            None => {
                let detail = format!("The read did not produce a value for `{path}`.");
                diags.add_attribute_error(path, "Invalid Provider State", detail);
                continue;
            }
        };

        if !attribute.kind.matches(value) {
            let detail = format!(
                "`{path}` must be a {}, got {value}.",
                attribute.kind.type_name()
            );
            diags.add_attribute_error(path, "Invalid Provider State", detail);
            continue;
        }

        if let (AttributeKind::ListNested(nested), Some(items)) = (&attribute.kind, value.as_array()) {
            for (i, item) in items.iter().enumerate() {
                if let Some(element) = item.as_object() {
                    check_state_object(nested, element, Some(&path.clone().index(i)), diags);
                }
            }
        }
    }
}

fn check_attribute(
    path: AttributePath,
    attribute: &Attribute,
    parent_computed: bool,
    diags: &mut Diagnostics,
) {
    let inconsistent = |diags: &mut Diagnostics, detail: String| {
        diags.push(
            Error::invalid_attribute(path.clone(), "Invalid Schema Declaration", detail)
                .into_diagnostic(),
        );
    };

    if attribute.required && attribute.computed {
        inconsistent(diags, format!("`{path}` is declared both required and computed."));
    }
    if attribute.required && attribute.optional {
        inconsistent(diags, format!("`{path}` is declared both required and optional."));
    }
    if !attribute.required && !attribute.optional && !attribute.computed {
        inconsistent(
            diags,
            format!("`{path}` must be at least one of required, optional, or computed."),
        );
    }
    if parent_computed && !attribute.is_read_only() {
        inconsistent(
            diags,
            format!("`{path}` is nested in a computed attribute and must be computed only."),
        );
    }

    if let AttributeKind::ListNested(nested) = &attribute.kind {
        for (name, child) in nested {
            check_attribute(
                path.clone().attribute(name.clone()),
                child,
                attribute.is_read_only(),
                diags,
            );
        }
    }
}
