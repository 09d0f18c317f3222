pub mod ast;
pub mod error;
pub mod optimizer;
pub mod output;
pub mod parser;
pub mod scanner;
mod variables;

#[cfg(feature = "cli")]
pub mod cli;

pub use ast::{Expr, ExprKind, Location, Operation, OperationKind, Selection};
pub use error::{ErrorKind, ParseError};
pub use optimizer::optimize;
pub use output::{to_json, to_json_pretty};
pub use parser::parse;
