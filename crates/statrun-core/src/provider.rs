//! Providers: the declared set of formulas a catalog is built from.
//!
//! A provider lists its members in declaration order. Each member carries its
//! own signature (parameter names, with types where they are known) and a
//! plain function pointer. Separately, a provider may attach a
//! [`Description`] companion to any member; a companion takes precedence over
//! the member's signature during schema resolution.

use std::collections::HashMap;

use crate::error::FormulaError;
use crate::schema::Description;
use crate::value::{ParamKind, Value};

/// Signature of a formula body: arguments arrive in schema order.
pub type FormulaFn = fn(&Arguments) -> Result<Value, FormulaError>;

/// A parameter as the formula itself declares it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredParam {
    pub name: String,
    /// `None` when the type cannot be inferred from the declaration.
    pub kind: Option<ParamKind>,
}

/// One named, callable member of a provider.
#[derive(Debug, Clone)]
pub struct Member {
    pub name: String,
    pub params: Vec<DeclaredParam>,
    pub formula: FormulaFn,
}

/// A source of formulas.
pub trait Provider {
    /// Human-readable name of the provider.
    fn name(&self) -> &str;

    /// Members in declaration order.
    fn members(&self) -> &[Member];

    /// The description companion declared for `operation`, if any.
    fn description(&self, operation: &str) -> Option<Description>;
}

/// Declarative, builder-style [`Provider`].
///
/// ```
/// use statrun_core::{Arguments, Description, FormulaError, ParamKind, Registry, Value};
///
/// fn double(args: &Arguments) -> Result<Value, FormulaError> {
///     Ok(Value::Float(args.float(0)? * 2.0))
/// }
///
/// fn add(args: &Arguments) -> Result<Value, FormulaError> {
///     Ok(Value::Int(args.int(0)? + args.int(1)?))
/// }
///
/// let registry = Registry::new("demo")
///     .formula("double", &[("x", ParamKind::Float)], double)
///     .untyped("add", &["a", "b"], add)
///     .describe("add", Description::positional(&[("a", ParamKind::Int), ("b", ParamKind::Int)]));
/// # let _ = registry;
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    name: String,
    members: Vec<Member>,
    descriptions: HashMap<String, Description>,
}

impl Registry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Register a formula whose parameter types are declared.
    pub fn formula(self, name: &str, params: &[(&str, ParamKind)], formula: FormulaFn) -> Self {
        let params = params
            .iter()
            .map(|(name, kind)| DeclaredParam {
                name: name.to_string(),
                kind: Some(*kind),
            })
            .collect();
        self.member(Member {
            name: name.to_string(),
            params,
            formula,
        })
    }

    /// Register a formula that only declares parameter names.
    ///
    /// Such a formula resolves only if a description companion is attached.
    pub fn untyped(self, name: &str, params: &[&str], formula: FormulaFn) -> Self {
        let params = params
            .iter()
            .map(|name| DeclaredParam {
                name: name.to_string(),
                kind: None,
            })
            .collect();
        self.member(Member {
            name: name.to_string(),
            params,
            formula,
        })
    }

    /// Register a prebuilt member.
    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    /// Attach a description companion to `operation`.
    pub fn describe(mut self, operation: &str, description: Description) -> Self {
        self.descriptions.insert(operation.to_string(), description);
        self
    }
}

impl Provider for Registry {
    fn name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> &[Member] {
        &self.members
    }

    fn description(&self, operation: &str) -> Option<Description> {
        self.descriptions.get(operation).cloned()
    }
}

/// Bound arguments handed to a formula, in schema order.
///
/// `None` is the "no value" sentinel of an absent optional parameter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    values: Vec<Option<Value>>,
}

impl Arguments {
    pub fn new(values: Vec<Option<Value>>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    pub fn int(&self, index: usize) -> Result<i64, FormulaError> {
        match self.get(index) {
            Some(Value::Int(v)) => Ok(*v),
            _ => Err(mismatch(index, ParamKind::Int)),
        }
    }

    /// Integers are widened to floats.
    pub fn float(&self, index: usize) -> Result<f64, FormulaError> {
        self.optional_float(index)?
            .ok_or_else(|| mismatch(index, ParamKind::Float))
    }

    pub fn optional_float(&self, index: usize) -> Result<Option<f64>, FormulaError> {
        match self.values.get(index) {
            Some(None) => Ok(None),
            Some(Some(Value::Float(v))) => Ok(Some(*v)),
            Some(Some(Value::Int(v))) => Ok(Some(*v as f64)),
            _ => Err(mismatch(index, ParamKind::Float)),
        }
    }

    pub fn list(&self, index: usize) -> Result<&[f64], FormulaError> {
        match self.get(index) {
            Some(Value::List(values)) => Ok(values),
            _ => Err(mismatch(index, ParamKind::List)),
        }
    }
}

fn mismatch(index: usize, expected: ParamKind) -> FormulaError {
    FormulaError::ArgumentMismatch { index, expected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn noop(_: &Arguments) -> Result<Value, FormulaError> {
        Ok(Value::Int(0))
    }

    #[test]
    fn registry_keeps_declaration_order() {
        let registry = Registry::new("t")
            .formula("b", &[], noop)
            .formula("a", &[], noop)
            .untyped("c", &["x"], noop);
        let names: Vec<&str> = registry.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(registry.members()[2].params[0].kind, None);
    }

    #[test]
    fn registry_descriptions() {
        let registry = Registry::new("t")
            .untyped("c", &["x"], noop)
            .describe("c", Description::positional(&[("x", ParamKind::Int)]));
        assert!(registry.description("c").is_some());
        assert!(registry.description("missing").is_none());
    }

    #[test]
    fn arguments_accessors() {
        let args = Arguments::new(vec![
            Some(Value::Int(3)),
            None,
            Some(Value::List(vec![1.0, 2.0])),
        ]);
        assert_eq!(args.int(0).unwrap(), 3);
        assert_eq!(args.float(0).unwrap(), 3.0);
        assert_eq!(args.optional_float(1).unwrap(), None);
        assert_eq!(args.list(2).unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn arguments_mismatch() {
        let args = Arguments::new(vec![None]);
        assert_eq!(
            args.float(0).unwrap_err(),
            FormulaError::ArgumentMismatch {
                index: 0,
                expected: ParamKind::Float
            }
        );
        assert!(args.int(5).is_err());
    }
}
