//! Argument collection, validation and invocation against a [`Catalog`].
//!
//! One invocation walks `Idle -> CollectingArguments -> Validating ->
//! Invoking -> Reporting -> Idle`. Any failure jumps straight to `Reporting`
//! as an [`InvokeError`]; nothing about a failed cycle survives into the next.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::catalog::{Catalog, Operation};
use crate::error::InvokeError;
use crate::provider::Arguments;
use crate::schema::ParameterSchema;
use crate::value::{ParamKind, Value};

/// Stage of a single invocation cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    CollectingArguments,
    Validating,
    Invoking,
    Reporting,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::CollectingArguments => "collecting_arguments",
            Self::Validating => "validating",
            Self::Invoking => "invoking",
            Self::Reporting => "reporting",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unparsed argument text for one invocation.
///
/// A blank value (empty after trimming) counts as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawArguments {
    /// Aligned to the schema by position.
    Positional(Vec<String>),
    /// Matched to the schema by parameter name.
    Named(BTreeMap<String, String>),
}

impl RawArguments {
    pub fn none() -> Self {
        Self::Positional(Vec::new())
    }

    pub fn positional<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Positional(values.into_iter().map(Into::into).collect())
    }

    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Named(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Options for the interactive loop.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Inputs that end the loop at the selection prompt.
    pub exit_words: Vec<String>,
    /// Decimal places for float results.
    pub precision: Option<usize>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            exit_words: vec!["quit".into(), "exit".into(), "q".into()],
            precision: None,
        }
    }
}

/// Totals for a finished interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub invocations: usize,
    pub failures: usize,
}

/// Drives selection, argument collection and invocation over a catalog.
///
/// Holds only a shared reference; all per-call state lives on the stack of
/// [`FormulaRunner::invoke`].
#[derive(Debug, Clone, Copy)]
pub struct FormulaRunner<'c> {
    catalog: &'c Catalog,
}

impl<'c> FormulaRunner<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    /// Operation names in declaration order.
    pub fn list_operations(&self) -> Vec<&'c str> {
        self.catalog.names().collect()
    }

    pub fn describe(&self, name: &str) -> Result<&'c ParameterSchema, InvokeError> {
        self.operation(name).map(Operation::schema)
    }

    /// Parse `raw` against the schema of `name` and run the formula.
    pub fn invoke(&self, name: &str, raw: RawArguments) -> Result<Value, InvokeError> {
        let op = self.operation(name)?;

        debug!(operation = name, phase = %Phase::CollectingArguments);
        let slots = align(op, raw)?;

        debug!(operation = name, phase = %Phase::Validating);
        let args = bind(op, slots)?;

        debug!(operation = name, phase = %Phase::Invoking);
        op.call(&args).map_err(|e| InvokeError::InvalidCombination {
            operation: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Interactive loop: list, select, prompt for each parameter, invoke, report.
    ///
    /// Ends on an exit word at the selection prompt or at end of input. Every
    /// [`InvokeError`] is written to `output` and the loop continues.
    pub fn run<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut output: W,
        options: &RunOptions,
    ) -> io::Result<RunSummary> {
        let mut summary = RunSummary::default();

        loop {
            debug!(phase = %Phase::Idle);
            self.write_menu(&mut output)?;
            write!(output, "Select a formula (number or name, '{}' to exit): ", exit_hint(options))?;
            output.flush()?;

            let Some(line) = read_line(&mut input)? else {
                break;
            };
            let selection = line.trim();
            if selection.is_empty() {
                continue;
            }
            if options.exit_words.iter().any(|w| w.eq_ignore_ascii_case(selection)) {
                break;
            }

            let name = self.resolve_selection(selection);
            let outcome = match self.operation(&name) {
                Ok(op) => {
                    let Some(raw) = prompt_arguments(op, &mut input, &mut output)? else {
                        break;
                    };
                    self.invoke(&name, raw)
                }
                Err(e) => Err(e),
            };

            debug!(operation = %name, phase = %Phase::Reporting);
            summary.invocations += 1;
            match outcome {
                Ok(value) => writeln!(output, "  result: {}", value.format(options.precision))?,
                Err(e) => {
                    summary.failures += 1;
                    writeln!(output, "  error: {}", e)?;
                }
            }
            writeln!(output)?;
        }

        Ok(summary)
    }

    fn operation(&self, name: &str) -> Result<&'c Operation, InvokeError> {
        self.catalog
            .get(name)
            .ok_or_else(|| InvokeError::UnknownOperation(name.to_string()))
    }

    /// A 1-based menu number maps to that operation; anything else is a name.
    fn resolve_selection(&self, selection: &str) -> String {
        selection
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.catalog.iter().nth(i))
            .map(|op| op.name().to_string())
            .unwrap_or_else(|| selection.to_string())
    }

    fn write_menu<W: Write>(&self, output: &mut W) -> io::Result<()> {
        writeln!(output, "Available formulas:")?;
        for (i, op) in self.catalog.iter().enumerate() {
            writeln!(output, "  {:>2}. {}", i + 1, op.signature())?;
        }
        Ok(())
    }
}

/// Map raw arguments onto schema slots; `None` marks an absent value.
///
/// When the final parameter is a list, surplus positional values are folded
/// into it, so `1 2 3` fills a single `values` parameter, and no positional
/// values at all bind it to the empty list.
fn align(op: &Operation, raw: RawArguments) -> Result<Vec<Option<String>>, InvokeError> {
    let params = op.schema().params();
    let mut slots: Vec<Option<String>> = vec![None; params.len()];
    let tail_is_list = params.last().is_some_and(|p| p.kind == ParamKind::List);
    let tail_is_required_list = tail_is_list && params.last().is_some_and(|p| !p.optional);

    match raw {
        RawArguments::Positional(values) if values.is_empty() => {
            if let Some(last) = slots.last_mut().filter(|_| tail_is_required_list) {
                *last = Some("[]".to_string());
            }
        }
        RawArguments::Positional(mut values) => {
            if values.len() > params.len() {
                if !tail_is_list {
                    return Err(InvokeError::TooManyArguments {
                        operation: op.name().to_string(),
                        expected: params.len(),
                        got: values.len(),
                    });
                }
                let tail = values.split_off(params.len() - 1);
                let elements: Vec<&str> = tail.iter().map(|v| strip_brackets(v)).collect();
                values.push(elements.join(" "));
            }
            for (slot, value) in slots.iter_mut().zip(values) {
                *slot = present(value);
            }
        }
        RawArguments::Named(pairs) => {
            for (name, value) in pairs {
                let index = op.schema().position(&name).ok_or_else(|| {
                    InvokeError::UnknownParameter {
                        operation: op.name().to_string(),
                        parameter: name.clone(),
                    }
                })?;
                slots[index] = present(value);
            }
        }
    }

    Ok(slots)
}

/// Parse each slot in schema order; the first failure aborts the call.
fn bind(op: &Operation, slots: Vec<Option<String>>) -> Result<Arguments, InvokeError> {
    let mut values = Vec::with_capacity(slots.len());
    for (spec, slot) in op.schema().params().iter().zip(slots) {
        let bound = match slot {
            None if spec.optional => None,
            None => {
                return Err(InvokeError::MissingParameter {
                    operation: op.name().to_string(),
                    parameter: spec.name.clone(),
                });
            }
            Some(raw) => Some(spec.kind.parse(&raw).map_err(|source| {
                InvokeError::ParameterType {
                    operation: op.name().to_string(),
                    parameter: spec.name.clone(),
                    raw,
                    source,
                }
            })?),
        };
        values.push(bound);
    }
    Ok(Arguments::new(values))
}

/// `[1, 2]` -> `1, 2`, so bracketed values can be folded together.
fn strip_brackets(value: &str) -> &str {
    let value = value.trim();
    value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value)
}

fn present(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Prompt once per parameter. `None` means input ended mid-collection.
fn prompt_arguments<R: BufRead, W: Write>(
    op: &Operation,
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<RawArguments>> {
    let mut pairs = BTreeMap::new();
    for spec in op.schema().params() {
        let suffix = if spec.optional { ", optional" } else { "" };
        write!(output, "  {} ({}{}): ", spec.name, spec.kind, suffix)?;
        output.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        pairs.insert(spec.name.clone(), line.trim().to_string());
    }
    Ok(Some(RawArguments::Named(pairs)))
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

fn exit_hint(options: &RunOptions) -> &str {
    options.exit_words.first().map(String::as_str).unwrap_or("Ctrl+D")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ResolutionPolicy;
    use crate::error::FormulaError;
    use crate::provider::Registry;
    use crate::schema::{Description, ParameterSpec};
    use pretty_assertions::assert_eq;

    fn sum(args: &Arguments) -> Result<Value, FormulaError> {
        let values = args.list(0)?;
        if values.is_empty() {
            return Err(FormulaError::EmptyInput);
        }
        Ok(Value::Float(values.iter().sum()))
    }

    fn scale(args: &Arguments) -> Result<Value, FormulaError> {
        Ok(Value::Float(args.int(0)? as f64 * args.float(1)?))
    }

    fn bounds(args: &Arguments) -> Result<Value, FormulaError> {
        match (args.optional_float(0)?, args.optional_float(1)?) {
            (None, None) => Err(FormulaError::InvalidCombination(
                "at least one bound is required".into(),
            )),
            (lo, hi) => Ok(Value::Float(hi.unwrap_or(0.0) - lo.unwrap_or(0.0))),
        }
    }

    fn catalog() -> Catalog {
        let provider = Registry::new("test")
            .formula("sum", &[("values", ParamKind::List)], sum)
            .untyped("scale", &["n", "factor"], scale)
            .describe(
                "scale",
                Description::positional(&[("n", ParamKind::Int), ("factor", ParamKind::Float)]),
            )
            .untyped("bounds", &["lo", "hi"], bounds)
            .describe(
                "bounds",
                Description::structured(vec![
                    ParameterSpec::optional("lo", ParamKind::Float),
                    ParameterSpec::optional("hi", ParamKind::Float),
                ]),
            );
        Catalog::build(&provider, ResolutionPolicy::FailFast).unwrap()
    }

    #[test]
    fn list_operations_in_order() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        assert_eq!(runner.list_operations(), vec!["sum", "scale", "bounds"]);
    }

    #[test]
    fn describe_unknown() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        assert_eq!(
            runner.describe("nope").unwrap_err(),
            InvokeError::UnknownOperation("nope".into())
        );
        assert_eq!(runner.describe("scale").unwrap().len(), 2);
    }

    #[test]
    fn invoke_positional() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let value = runner
            .invoke("scale", RawArguments::positional(["3", "0.5"]))
            .unwrap();
        assert_eq!(value, Value::Float(1.5));
    }

    #[test]
    fn invoke_folds_surplus_values_into_trailing_list() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let value = runner
            .invoke("sum", RawArguments::positional(["1", "2", "3.5"]))
            .unwrap();
        assert_eq!(value, Value::Float(6.5));
    }

    #[test]
    fn invoke_too_many_arguments() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("scale", RawArguments::positional(["1", "2", "3"]))
            .unwrap_err();
        assert_eq!(err.kind(), "too_many_arguments");
    }

    #[test]
    fn invoke_missing_required() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("scale", RawArguments::positional(["3"]))
            .unwrap_err();
        assert_eq!(
            err,
            InvokeError::MissingParameter {
                operation: "scale".into(),
                parameter: "factor".into()
            }
        );
    }

    #[test]
    fn blank_value_counts_as_absent() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("scale", RawArguments::positional(["  ", "2"]))
            .unwrap_err();
        assert_eq!(err.kind(), "missing_parameter");
    }

    #[test]
    fn invoke_parse_failure_reports_raw_value() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("scale", RawArguments::positional(["three", "2"]))
            .unwrap_err();
        match err {
            InvokeError::ParameterType { parameter, raw, .. } => {
                assert_eq!(parameter, "n");
                assert_eq!(raw, "three");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn optional_parameters_bind_none() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let value = runner
            .invoke("bounds", RawArguments::named([("hi", "2.5")]))
            .unwrap();
        assert_eq!(value, Value::Float(2.5));
    }

    #[test]
    fn all_absent_optionals_is_invalid_combination() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner.invoke("bounds", RawArguments::none()).unwrap_err();
        assert_eq!(
            err,
            InvokeError::InvalidCombination {
                operation: "bounds".into(),
                reason: "at least one bound is required".into()
            }
        );
    }

    #[test]
    fn no_values_bind_an_empty_trailing_list() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("sum", RawArguments::Positional(vec![]))
            .unwrap_err();
        assert_eq!(
            err,
            InvokeError::InvalidCombination {
                operation: "sum".into(),
                reason: "at least one value is required".into()
            }
        );
        // without a trailing list the parameters are simply missing
        let err = runner.invoke("scale", RawArguments::none()).unwrap_err();
        assert_eq!(err.kind(), "missing_parameter");
    }

    #[test]
    fn folding_strips_brackets_per_value() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let value = runner
            .invoke("sum", RawArguments::positional(["[1,2]", "[3]", "4"]))
            .unwrap();
        assert_eq!(value, Value::Float(10.0));
    }

    #[test]
    fn empty_list_is_invalid_combination() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("sum", RawArguments::positional(["[]"]))
            .unwrap_err();
        assert_eq!(err.kind(), "invalid_combination");
    }

    #[test]
    fn unknown_named_parameter() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("bounds", RawArguments::named([("middle", "1")]))
            .unwrap_err();
        assert_eq!(
            err,
            InvokeError::UnknownParameter {
                operation: "bounds".into(),
                parameter: "middle".into()
            }
        );
    }

    #[test]
    fn invoke_unknown_operation() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let err = runner
            .invoke("median", RawArguments::positional(["garbage"]))
            .unwrap_err();
        assert_eq!(err, InvokeError::UnknownOperation("median".into()));
    }

    #[test]
    fn run_loop_reports_and_continues() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        // bounds with both blank, then scale by menu number, then quit
        let input = "bounds\n\n\n2\n4\n0.25\nquit\n";
        let mut output = Vec::new();
        let summary = runner
            .run(input.as_bytes(), &mut output, &RunOptions::default())
            .unwrap();
        let text = String::from_utf8(output).unwrap();

        assert_eq!(
            summary,
            RunSummary {
                invocations: 2,
                failures: 1
            }
        );
        assert!(text.contains("  error: invalid input for bounds: at least one bound is required"));
        assert!(text.contains("  result: 1"));
        assert!(text.contains("   1. sum(values: list)"));
    }

    #[test]
    fn run_loop_unknown_selection() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let mut output = Vec::new();
        let summary = runner
            .run("99\nexit\n".as_bytes(), &mut output, &RunOptions::default())
            .unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(summary.failures, 1);
        assert!(text.contains("error: unknown operation: 99"));
    }

    #[test]
    fn run_loop_ends_at_eof() {
        let catalog = catalog();
        let runner = FormulaRunner::new(&catalog);
        let mut output = Vec::new();
        let summary = runner
            .run("scale\n3\n".as_bytes(), &mut output, &RunOptions::default())
            .unwrap();
        assert_eq!(summary, RunSummary::default());
    }
}
