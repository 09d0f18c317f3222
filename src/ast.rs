//! # Query Templates - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for query templates: a
//! constrained GraphQL-like query grammar where every argument may carry a value
//! constraint, bind a variable, or compute a value from arithmetic and logical
//! expressions.
//!
//! ## Architecture Overview
//!
//! The AST module is organized into focused submodules:
//!
//! - **[location]** - Source positions attached to every node
//! - **[operation]** - The root operation and its variable registry
//! - **[selections]** - Fields, inline fragments, `max` blocks and arguments
//! - **[expressions]** - Values, operators and constraints
//! - **[operators]** - Binary and constraint operators
//!
//! ## Quick Start
//!
//! ```text
//! query {
//!   users(limit: > 0 && <= 100, role: ADMIN || OWNER) {
//!     id
//!     name
//!   }
//! }
//! ```
//!
//! This template matches any `users` query asking for at most 100 admins or owners.
//!
//! ## Core Concepts
//!
//! ### Constraints
//!
//! The right-hand side of an argument is a constraint. A bare value is an implicit
//! equality check, a leading operator turns it into an ordering check:
//!
//! ```text
//! a(x: 5)           // Equals 5
//! a(x: != 5)        // NotEquals 5
//! a(x: len > 3)     // LenGreater 3, compares the length of the input
//! a(x: *)           // Any value
//! a(x: [... > 0])   // Map, every item must be positive
//! ```
//!
//! ### Variables
//!
//! An argument can bind its value to a variable that other constraints refer to:
//!
//! ```text
//! query {
//!   a(from=$from: > 0, to: > $from)
//! }
//! ```
//!
//! Variables are resolved through [`Operation::variables`], never through
//! pointers inside the tree.
//!
//! ### Numeric Kinds
//!
//! `1` is an [`ExprKind::Int`] and `1.0` is an [`ExprKind::Float`]. The distinction
//! survives constant folding except where an operation mixes both kinds, in which
//! case the result is a float.
pub mod location;
pub mod operation;
pub mod selections;
pub mod expressions;
pub mod operators;

pub use location::Location;
pub use operation::{Declarer, Operation, OperationKind, VariableDecl};
pub use selections::{Argument, Binding, Field, InlineFragment, Max, ObjectField, Selection};
pub use expressions::{Expr, ExprKind};
pub use operators::{BinOp, ConstraintOp};
