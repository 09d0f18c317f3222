//! Validate query templates and dump their syntax tree

use log::info;

use super::CliError;
use crate::{optimize, output, parse};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Template source
    pub template: String,
    /// Return the syntax tree instead of just validating
    pub ast: bool,
    /// Pretty-print the syntax tree
    pub pretty: bool,
    /// Run the optimizer before returning the tree
    pub optimize: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// The template parsed successfully
    Valid,
    /// Rendered syntax tree
    Ast(String),
}

/// Execute a gqt check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    if options.template.trim().is_empty() {
        return Err(CliError::NoInput);
    }

    let mut operation = parse(&options.template)?;
    info!(
        "{} with {} selections is valid",
        operation.kind.keyword(),
        operation.selections.len()
    );

    if !options.ast {
        return Ok(CheckResult::Valid);
    }
    if options.optimize {
        operation = optimize(operation);
    }

    let tree = output::to_value(&operation);
    let rendered = if options.pretty {
        serde_json::to_string_pretty(&tree)?
    } else {
        serde_json::to_string(&tree)?
    };
    Ok(CheckResult::Ast(rendered))
}
