//! Formula catalog and runner for the statrun system.
//!
//! A [`provider::Provider`] declares named formulas together with their
//! signatures and, optionally, an explicit description of their parameters.
//! [`catalog::Catalog::build`] resolves one parameter schema per formula, and
//! [`runner::FormulaRunner`] parses raw text arguments against those schemas
//! and invokes the formulas, turning every failure into a reportable
//! [`error::InvokeError`].

pub mod catalog;
pub mod error;
pub mod provider;
pub mod runner;
pub mod schema;
pub mod value;

pub use catalog::{Catalog, Operation, ResolutionPolicy};
pub use error::{CatalogError, FormulaError, InvokeError};
pub use provider::{Arguments, Provider, Registry};
pub use runner::{FormulaRunner, RawArguments};
pub use schema::{Description, ParameterSchema, ParameterSpec};
pub use value::{ParamKind, Value};
