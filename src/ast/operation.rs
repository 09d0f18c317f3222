use indexmap::IndexMap;

use crate::ast::{Location, Selection};

/// Kind of the root operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Keyword introducing the operation in the source.
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
            OperationKind::Subscription => "subscription",
        }
    }

    pub(crate) fn from_keyword(keyword: &[u8]) -> Option<Self> {
        match keyword {
            b"query" => Some(OperationKind::Query),
            b"mutation" => Some(OperationKind::Mutation),
            b"subscription" => Some(OperationKind::Subscription),
            _ => None,
        }
    }
}

/// Complete query template.
///
/// The root of the tree. Owns every selection; variables are looked up in
/// [`Operation::variables`] by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub kind: OperationKind,

    /// Top-level selections, never empty
    pub selections: Vec<Selection>,

    /// Declared variables in declaration order
    pub variables: IndexMap<String, VariableDecl>,

    pub location: Location,
}

impl Operation {
    /// Look up the declaration of `$name`.
    pub fn variable(&self, name: &str) -> Option<&VariableDecl> {
        self.variables.get(name)
    }
}

/// Where a variable was declared.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    /// Location of the `$name` binding
    pub location: Location,

    pub declared_by: Declarer,
}

/// The node binding a variable, named through the field that owns it.
///
/// # Examples
/// ```text
/// a(x=$x: > 0)             // Argument { field: "a", argument: "x" }
/// a(x: {y: {z=$z: *}})     // ObjectField { field: "a", argument: "x", name: "z" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declarer {
    Argument { field: String, argument: String },

    /// `argument` is the field argument whose value contains the object
    ObjectField {
        field: String,
        argument: String,
        name: String,
    },
}
