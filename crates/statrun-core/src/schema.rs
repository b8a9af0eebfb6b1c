//! Parameter schemas and the description companions they are resolved from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::value::ParamKind;

/// A single declared parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Name, unique within its schema.
    pub name: String,

    /// Type the raw input is parsed into.
    #[serde(rename(serialize = "type", deserialize = "parse"), alias = "type")]
    pub kind: ParamKind,

    /// Absent input binds `None` instead of failing.
    #[serde(default)]
    pub optional: bool,
}

impl ParameterSpec {
    /// A required parameter.
    pub fn required(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
        }
    }

    /// An optional parameter.
    pub fn optional(name: impl Into<String>, kind: ParamKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: true,
        }
    }

    /// `name: kind`, with a `?` after the name when optional.
    pub fn signature(&self) -> String {
        let marker = if self.optional { "?" } else { "" };
        format!("{}{}: {}", self.name, marker, self.kind)
    }
}

/// Which of the two schema shapes an operation was resolved into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaForm {
    Positional,
    Structured,
}

/// The resolved, ordered parameter list of an operation.
///
/// Parameter order is the order values are collected in and passed to the formula.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "form", content = "params", rename_all = "lowercase")]
pub enum ParameterSchema {
    /// All parameters required, aligned by position.
    Positional(Vec<ParameterSpec>),
    /// Named parameters, each possibly optional.
    Structured(Vec<ParameterSpec>),
}

impl ParameterSchema {
    pub fn form(&self) -> SchemaForm {
        match self {
            Self::Positional(_) => SchemaForm::Positional,
            Self::Structured(_) => SchemaForm::Structured,
        }
    }

    pub fn params(&self) -> &[ParameterSpec] {
        match self {
            Self::Positional(params) | Self::Structured(params) => params,
        }
    }

    pub fn len(&self) -> usize {
        self.params().len()
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }

    /// Index of the parameter called `name`.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.params().iter().position(|p| p.name == name)
    }

    /// Render as `operation(a: int, b?: float)`.
    pub fn signature(&self, operation: &str) -> String {
        let params: Vec<String> = self.params().iter().map(ParameterSpec::signature).collect();
        format!("{}({})", operation, params.join(", "))
    }
}

/// An explicit description of a formula's parameters.
///
/// Deserializes from either shape a provider may declare:
/// - a sequence of `[name, type]` pairs (positional form, all required)
/// - a mapping `{"inputs": [{"name": .., "parse": .., "optional": ..}]}`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Description {
    Positional(Vec<(String, ParamKind)>),
    Structured { inputs: Vec<ParameterSpec> },
}

impl Description {
    /// Positional description from `(name, kind)` pairs.
    pub fn positional(pairs: &[(&str, ParamKind)]) -> Self {
        Self::Positional(
            pairs
                .iter()
                .map(|(name, kind)| (name.to_string(), *kind))
                .collect(),
        )
    }

    /// Structured description from explicit specs.
    pub fn structured(inputs: Vec<ParameterSpec>) -> Self {
        Self::Structured { inputs }
    }

    /// Number of parameters described.
    pub fn len(&self) -> usize {
        match self {
            Self::Positional(pairs) => pairs.len(),
            Self::Structured { inputs } => inputs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Convert into a schema, rejecting empty or duplicate parameter names.
    pub fn into_schema(self) -> Result<ParameterSchema, String> {
        let schema = match self {
            Self::Positional(pairs) => ParameterSchema::Positional(
                pairs
                    .into_iter()
                    .map(|(name, kind)| ParameterSpec::required(name, kind))
                    .collect(),
            ),
            Self::Structured { inputs } => ParameterSchema::Structured(inputs),
        };
        check_names(schema.params())?;
        Ok(schema)
    }
}

/// Every parameter needs a non-empty name, unique within the schema.
pub(crate) fn check_names(params: &[ParameterSpec]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for param in params {
        if param.name.trim().is_empty() {
            return Err("parameter with an empty name".to_string());
        }
        if !seen.insert(param.name.as_str()) {
            return Err(format!("duplicate parameter name '{}'", param.name));
        }
    }
    Ok(())
}
