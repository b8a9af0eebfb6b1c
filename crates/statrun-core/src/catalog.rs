//! Catalog construction: one resolved schema per eligible provider member.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CatalogError, FormulaError};
use crate::provider::{Arguments, FormulaFn, Member, Provider};
use crate::schema::{check_names, ParameterSchema, ParameterSpec};
use crate::value::Value;

/// What to do with a member whose schema cannot be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolutionPolicy {
    /// Leave the member out of the catalog.
    #[default]
    DropUnresolvable,
    /// Abort the build with [`CatalogError::SchemaResolution`].
    FailFast,
}

/// A formula with its resolved schema.
#[derive(Debug, Clone)]
pub struct Operation {
    name: String,
    schema: ParameterSchema,
    formula: FormulaFn,
}

impl Operation {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// `name(param: kind, ...)`.
    pub fn signature(&self) -> String {
        self.schema.signature(&self.name)
    }

    /// Run the formula on already-bound arguments.
    pub fn call(&self, args: &Arguments) -> Result<Value, FormulaError> {
        (self.formula)(args)
    }
}

/// A member left out of the catalog, with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unresolved {
    pub operation: String,
    pub reason: String,
}

/// The immutable mapping from operation name to [`Operation`].
///
/// Iteration follows the provider's declaration order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    operations: Vec<Operation>,
    index: HashMap<String, usize>,
    dropped: Vec<Unresolved>,
}

impl Catalog {
    /// Resolve a schema for every eligible member of `provider`.
    ///
    /// Members whose names start with `_` are never operations. A member's
    /// description companion wins over its own signature; without one, every
    /// declared parameter must carry a type and is required.
    pub fn build(provider: &dyn Provider, policy: ResolutionPolicy) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();

        for member in provider.members() {
            if member.name.starts_with('_') {
                debug!(provider = provider.name(), member = %member.name, "skipping private member");
                continue;
            }

            let resolved = if catalog.index.contains_key(&member.name) {
                Err("duplicate operation name".to_string())
            } else {
                resolve(provider, member)
            };

            match resolved {
                Ok(schema) => {
                    debug!(
                        provider = provider.name(),
                        operation = %member.name,
                        form = ?schema.form(),
                        params = schema.len(),
                        "resolved schema"
                    );
                    catalog.index.insert(member.name.clone(), catalog.operations.len());
                    catalog.operations.push(Operation {
                        name: member.name.clone(),
                        schema,
                        formula: member.formula,
                    });
                }
                Err(reason) => match policy {
                    ResolutionPolicy::DropUnresolvable => {
                        debug!(operation = %member.name, %reason, "dropping unresolvable operation");
                        catalog.dropped.push(Unresolved {
                            operation: member.name.clone(),
                            reason,
                        });
                    }
                    ResolutionPolicy::FailFast => {
                        warn!(operation = %member.name, %reason, "schema resolution failed");
                        return Err(CatalogError::SchemaResolution {
                            operation: member.name.clone(),
                            reason,
                        });
                    }
                },
            }
        }

        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.index.get(name).map(|&i| &self.operations[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Operations in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Operation> {
        self.operations.iter()
    }

    /// Operation names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.iter().map(Operation::name)
    }

    /// Members dropped under [`ResolutionPolicy::DropUnresolvable`].
    pub fn dropped(&self) -> &[Unresolved] {
        &self.dropped
    }
}

fn resolve(provider: &dyn Provider, member: &Member) -> Result<ParameterSchema, String> {
    let Some(description) = provider.description(&member.name) else {
        return infer(member);
    };

    if description.len() != member.params.len() {
        return Err(format!(
            "description declares {} parameter(s) but the formula takes {}",
            description.len(),
            member.params.len()
        ));
    }
    description.into_schema()
}

fn infer(member: &Member) -> Result<ParameterSchema, String> {
    let params = member
        .params
        .iter()
        .map(|param| {
            param
                .kind
                .map(|kind| ParameterSpec::required(param.name.clone(), kind))
                .ok_or_else(|| format!("cannot infer a type for parameter '{}'", param.name))
        })
        .collect::<Result<Vec<_>, _>>()?;
    check_names(&params)?;
    Ok(ParameterSchema::Positional(params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::Registry;
    use crate::schema::{Description, SchemaForm};
    use crate::value::ParamKind;
    use pretty_assertions::assert_eq;

    fn zero(_: &Arguments) -> Result<Value, FormulaError> {
        Ok(Value::Float(0.0))
    }

    /// Four resolvable operations and one whose types cannot be inferred.
    fn mixed_provider() -> Registry {
        Registry::new("mixed")
            .formula("mean", &[("values", ParamKind::List)], zero)
            .untyped("mystery", &["a", "b"], zero)
            .untyped("binomial_dist", &["x", "n", "p"], zero)
            .describe(
                "binomial_dist",
                Description::positional(&[("x", ParamKind::Int), ("n", ParamKind::Int), ("p", ParamKind::Float)]),
            )
            .formula("poisson_dist", &[("x", ParamKind::Int), ("mu", ParamKind::Float)], zero)
            .untyped("std_normal_dist_cuml", &["z_low", "z_end"], zero)
            .describe(
                "std_normal_dist_cuml",
                Description::structured(vec![
                    ParameterSpec::optional("z_lower", ParamKind::Float),
                    ParameterSpec::optional("z_upper", ParamKind::Float),
                ]),
            )
    }

    #[test]
    fn drop_unresolvable_keeps_the_rest() {
        let catalog = Catalog::build(&mixed_provider(), ResolutionPolicy::DropUnresolvable).unwrap();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.contains("mystery"));
        assert_eq!(catalog.dropped().len(), 1);
        assert_eq!(catalog.dropped()[0].operation, "mystery");
    }

    #[test]
    fn fail_fast_names_the_operation() {
        let err = Catalog::build(&mixed_provider(), ResolutionPolicy::FailFast).unwrap_err();
        let CatalogError::SchemaResolution { operation, reason } = err;
        assert_eq!(operation, "mystery");
        assert_eq!(reason, "cannot infer a type for parameter 'a'");
    }

    #[test]
    fn names_follow_declaration_order() {
        let catalog = Catalog::build(&mixed_provider(), ResolutionPolicy::DropUnresolvable).unwrap();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            vec!["mean", "binomial_dist", "poisson_dist", "std_normal_dist_cuml"]
        );
    }

    #[test]
    fn description_wins_over_signature() {
        let provider = Registry::new("p")
            .formula("poisson_dist", &[("x", ParamKind::Int), ("m", ParamKind::Float)], zero)
            .describe(
                "poisson_dist",
                Description::positional(&[("x", ParamKind::Int), ("mu", ParamKind::Float)]),
            );
        let catalog = Catalog::build(&provider, ResolutionPolicy::FailFast).unwrap();
        let schema = catalog.get("poisson_dist").unwrap().schema();
        assert_eq!(schema.params()[1].name, "mu");
    }

    #[test]
    fn structured_schema_keeps_optionals() {
        let catalog = Catalog::build(&mixed_provider(), ResolutionPolicy::DropUnresolvable).unwrap();
        let op = catalog.get("std_normal_dist_cuml").unwrap();
        assert_eq!(op.schema().form(), SchemaForm::Structured);
        assert!(op.schema().params().iter().all(|p| p.optional));
        insta::assert_snapshot!(op.signature(), @"std_normal_dist_cuml(z_lower?: float, z_upper?: float)");
    }

    #[test]
    fn inferred_schema_is_positional_and_required() {
        let catalog = Catalog::build(&mixed_provider(), ResolutionPolicy::DropUnresolvable).unwrap();
        let schema = catalog.get("mean").unwrap().schema();
        assert_eq!(schema.form(), SchemaForm::Positional);
        assert_eq!(schema.params(), &[ParameterSpec::required("values", ParamKind::List)]);
    }

    #[test]
    fn private_members_are_not_operations() {
        let provider = Registry::new("p")
            .formula("_helper", &[], zero)
            .formula("visible", &[], zero);
        let catalog = Catalog::build(&provider, ResolutionPolicy::FailFast).unwrap();
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["visible"]);
        assert!(catalog.dropped().is_empty());
    }

    #[test]
    fn arity_mismatch_is_unresolvable() {
        let provider = Registry::new("p")
            .untyped("f", &["a", "b"], zero)
            .describe("f", Description::positional(&[("a", ParamKind::Int)]));
        let err = Catalog::build(&provider, ResolutionPolicy::FailFast).unwrap_err();
        assert!(err.to_string().contains("declares 1 parameter(s) but the formula takes 2"));
    }

    #[test]
    fn duplicate_operation_is_unresolvable() {
        let provider = Registry::new("p")
            .formula("f", &[], zero)
            .formula("f", &[("x", ParamKind::Int)], zero);
        let catalog = Catalog::build(&provider, ResolutionPolicy::DropUnresolvable).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.get("f").unwrap().schema().is_empty());
        assert_eq!(catalog.dropped()[0].reason, "duplicate operation name");
    }

    #[test]
    fn catalog_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Catalog>();
    }
}
