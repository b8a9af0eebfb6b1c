//! Registration table for the statistics provider.
//!
//! The descriptive formulas declare typed signatures and are resolved by
//! inference. The distribution formulas declare bare parameter names and
//! carry description companions instead.

use statrun_core::ParamKind::{Float, Int, List};
use statrun_core::{Arguments, Description, FormulaError, ParameterSpec, Registry, Value};

use crate::{descriptive, discrete, normal};

/// The statistics provider, in menu order.
pub fn stats() -> Registry {
    Registry::new("stats")
        .formula("mean", &[("values", List)], mean)
        .formula("median", &[("values", List)], median)
        .formula("sample_variance", &[("values", List)], sample_variance)
        .formula("sample_std", &[("values", List)], sample_std)
        .formula("sort", &[("values", List)], sort)
        .untyped("binomial_dist", &["x", "n", "p"], binomial_dist)
        .describe(
            "binomial_dist",
            Description::positional(&[("x", Int), ("n", Int), ("p", Float)]),
        )
        .untyped("binomial_dist_cuml", &["x", "n", "p"], binomial_dist_cuml)
        .describe(
            "binomial_dist_cuml",
            Description::positional(&[("x", Int), ("n", Int), ("p", Float)]),
        )
        .untyped("hypergeo_dist", &["x", "N", "n", "k"], hypergeo_dist)
        .describe(
            "hypergeo_dist",
            Description::positional(&[("x", Int), ("N", Int), ("n", Int), ("k", Int)]),
        )
        .untyped("inv_binomial", &["x", "k", "p"], inv_binomial)
        .describe(
            "inv_binomial",
            Description::positional(&[("x", Int), ("k", Int), ("p", Float)]),
        )
        .untyped("poisson_dist", &["x", "m"], poisson_dist)
        .describe(
            "poisson_dist",
            Description::positional(&[("x", Int), ("mu", Float)]),
        )
        .untyped("poisson_dist_cuml", &["x", "m"], poisson_dist_cuml)
        .describe(
            "poisson_dist_cuml",
            Description::positional(&[("x", Int), ("mu", Float)]),
        )
        .untyped("std_normal_dist_cuml", &["z_low", "z_end"], std_normal_dist_cuml)
        .describe(
            "std_normal_dist_cuml",
            Description::structured(vec![
                ParameterSpec::optional("z_lower", Float),
                ParameterSpec::optional("z_upper", Float),
            ]),
        )
}

fn mean(args: &Arguments) -> Result<Value, FormulaError> {
    descriptive::mean(args.list(0)?).map(Value::Float)
}

fn median(args: &Arguments) -> Result<Value, FormulaError> {
    descriptive::median(args.list(0)?).map(Value::Float)
}

fn sample_variance(args: &Arguments) -> Result<Value, FormulaError> {
    descriptive::sample_variance(args.list(0)?).map(Value::Float)
}

fn sample_std(args: &Arguments) -> Result<Value, FormulaError> {
    descriptive::sample_std(args.list(0)?).map(Value::Float)
}

fn sort(args: &Arguments) -> Result<Value, FormulaError> {
    Ok(Value::List(descriptive::sort(args.list(0)?)))
}

fn binomial_dist(args: &Arguments) -> Result<Value, FormulaError> {
    discrete::binomial_dist(args.int(0)?, args.int(1)?, args.float(2)?).map(Value::Float)
}

fn binomial_dist_cuml(args: &Arguments) -> Result<Value, FormulaError> {
    discrete::binomial_dist_cuml(args.int(0)?, args.int(1)?, args.float(2)?).map(Value::Float)
}

fn hypergeo_dist(args: &Arguments) -> Result<Value, FormulaError> {
    discrete::hypergeo_dist(args.int(0)?, args.int(1)?, args.int(2)?, args.int(3)?)
        .map(Value::Float)
}

fn inv_binomial(args: &Arguments) -> Result<Value, FormulaError> {
    discrete::inv_binomial(args.int(0)?, args.int(1)?, args.float(2)?).map(Value::Float)
}

fn poisson_dist(args: &Arguments) -> Result<Value, FormulaError> {
    discrete::poisson_dist(args.int(0)?, args.float(1)?).map(Value::Float)
}

fn poisson_dist_cuml(args: &Arguments) -> Result<Value, FormulaError> {
    discrete::poisson_dist_cuml(args.int(0)?, args.float(1)?).map(Value::Float)
}

fn std_normal_dist_cuml(args: &Arguments) -> Result<Value, FormulaError> {
    normal::std_normal_dist_cuml(args.optional_float(0)?, args.optional_float(1)?)
        .map(Value::Float)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use statrun_core::{Catalog, FormulaRunner, InvokeError, RawArguments, ResolutionPolicy};

    fn catalog() -> Catalog {
        Catalog::build(&stats(), ResolutionPolicy::FailFast).unwrap()
    }

    fn float(value: Value) -> f64 {
        match value {
            Value::Float(v) => v,
            other => panic!("expected a float, got {other:?}"),
        }
    }

    #[test]
    fn every_formula_resolves() {
        let catalog = catalog();
        let names: Vec<&str> = catalog.names().collect();
        assert_eq!(
            names,
            vec![
                "mean",
                "median",
                "sample_variance",
                "sample_std",
                "sort",
                "binomial_dist",
                "binomial_dist_cuml",
                "hypergeo_dist",
                "inv_binomial",
                "poisson_dist",
                "poisson_dist_cuml",
                "std_normal_dist_cuml",
            ]
        );
    }

    #[test]
    fn companion_names_replace_declared_names() {
        let catalog = catalog();
        let schema = catalog.get("poisson_dist").unwrap().schema();
        let names: Vec<&str> = schema.params().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["x", "mu"]);
    }

    #[test]
    fn invoke_descriptive() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let mean = runner.invoke("mean", RawArguments::positional(["4", "4", "4"])).unwrap();
        assert_eq!(mean, Value::Float(4.0));
        let median = runner.invoke("median", RawArguments::positional(["[1, 2, 3, 4]"])).unwrap();
        assert_eq!(median, Value::Float(2.5));
        let sorted = runner.invoke("sort", RawArguments::positional(["3,1,2"])).unwrap();
        assert_eq!(sorted, Value::List(vec![1.0, 2.0, 3.0]));
    }

    #[test]
    fn invoke_mean_of_nothing_is_invalid_combination() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner.invoke("mean", RawArguments::positional(["[]"])).unwrap_err();
        assert_eq!(
            err,
            InvokeError::InvalidCombination {
                operation: "mean".into(),
                reason: "at least one value is required".into()
            }
        );
    }

    #[test]
    fn invoke_binomial_by_name() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let p = runner
            .invoke("binomial_dist", RawArguments::named([("x", "2"), ("n", "5"), ("p", "0.5")]))
            .unwrap();
        assert!((float(p) - 0.3125).abs() < 1e-12);
    }

    #[test]
    fn invoke_normal_interval() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);

        let upper_only = runner
            .invoke("std_normal_dist_cuml", RawArguments::named([("z_upper", "0.0")]))
            .unwrap();
        assert!((float(upper_only) - 0.5).abs() < 1e-6);

        let both = runner
            .invoke("std_normal_dist_cuml", RawArguments::positional(["-1.0", "1.0"]))
            .unwrap();
        assert!((float(both) - 0.6827).abs() < 1e-4);

        let neither = runner
            .invoke("std_normal_dist_cuml", RawArguments::none())
            .unwrap_err();
        assert_eq!(neither.kind(), "invalid_combination");
    }

    #[test]
    fn mean_without_values_is_an_empty_list() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        for raw in [RawArguments::none(), RawArguments::positional(["[]"])] {
            let err = runner.invoke("mean", raw).unwrap_err();
            assert_eq!(err.kind(), "invalid_combination");
        }
    }

    #[test]
    fn invoke_rejects_float_for_int_parameter() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("poisson_dist", RawArguments::positional(["1.5", "2"]))
            .unwrap_err();
        assert_eq!(err.kind(), "parameter_type");
    }
}
