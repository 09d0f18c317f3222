use crate::ast::{Expr, Location};

/// Entry of a selection set.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// Requested field
    ///
    /// # Examples
    /// ```text
    /// id
    /// user(id: 5) { name }
    /// ```
    Field(Field),

    /// Type-conditioned fragment
    ///
    /// # Example
    /// ```text
    /// ... on User { name }
    /// ```
    InlineFragment(InlineFragment),

    /// At most `limit` of the options may be selected
    ///
    /// # Example
    /// ```text
    /// max 2 { id name email }
    /// ```
    Max(Max),
}

impl Selection {
    pub fn location(&self) -> Location {
        match self {
            Selection::Field(field) => field.location,
            Selection::InlineFragment(fragment) => fragment.location,
            Selection::Max(max) => max.location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,

    /// `None` when the field has no argument list
    pub arguments: Option<Vec<Argument>>,

    /// `None` for leaf fields
    pub selections: Option<Vec<Selection>>,

    /// Reserved for schema-aware type checking, never set by the parser
    pub declared_type: Option<String>,

    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InlineFragment {
    pub type_condition: String,
    pub selections: Vec<Selection>,
    pub location: Location,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Max {
    pub limit: u64,
    pub options: Vec<Selection>,
    pub location: Location,
}

/// Argument of a field.
///
/// # Examples
/// ```text
/// limit                 // accepts any value
/// limit: <= 100         // constrained
/// limit=$l: <= 100      // constrained and bound to $l
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub variable: Option<Binding>,

    /// `None` accepts any value
    pub constraint: Option<Expr>,

    pub location: Location,
}

/// Field of an object value.
///
/// Unlike an argument, the constraint is mandatory.
///
/// # Example
/// ```text
/// filter: {name: "x", age=$age: > 18}
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    pub name: String,
    pub variable: Option<Binding>,
    pub constraint: Expr,
    pub location: Location,
}

/// A `$name` declaration attached to an argument or object field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: String,
    pub location: Location,
}
