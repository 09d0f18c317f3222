use crate::ast::{BinOp, ConstraintOp, Location, ObjectField};

/// Expression node with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub location: Location,

    /// Reserved for schema-aware type checking, never set by the parser
    pub declared_type: Option<String>,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Self {
        Expr {
            kind,
            location,
            declared_type: None,
        }
    }

    /// Boolean literal, `None` for anything else.
    pub fn as_bool(&self) -> Option<bool> {
        match self.kind {
            ExprKind::True => Some(true),
            ExprKind::False => Some(false),
            _ => None,
        }
    }

    /// Numeric literal widened to a float, `None` for anything else.
    pub fn as_float(&self) -> Option<f64> {
        match self.kind {
            ExprKind::Int(n) => Some(n as f64),
            ExprKind::Float(n) => Some(n),
            _ => None,
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(
            self.kind,
            ExprKind::Constraint { .. } | ExprKind::Any | ExprKind::Map(_)
        )
    }
}

/// Expression variants.
///
/// Values and operators may appear anywhere; constraint variants only appear
/// at the root of an argument, object field, array item or map constraint,
/// possibly below `&&` and `||`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    // Literals
    /// Literal integer
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    Int(i64),

    /// Literal floating point number
    ///
    /// # Examples
    /// ```text
    /// 42.0
    /// 1e3
    /// ```
    Float(f64),

    /// String literal, escape sequences resolved
    String(String),

    True,
    False,
    Null,

    /// Bare identifier other than `true`, `false` and `null`
    Enum(String),

    /// Array literal, every item is a constraint
    ///
    /// # Example
    /// ```text
    /// [1, > 2, len 3]
    /// ```
    Array(Vec<Expr>),

    /// Object literal
    ///
    /// # Example
    /// ```text
    /// {name: "x", age: > 18}
    /// ```
    Object(Vec<ObjectField>),

    /// Variable reference (`$name`), resolved through the operation's registry
    Variable(String),

    // Operations
    /// Arithmetic, relational or equality operation
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Logical AND (`&&`), at least two operands
    And(Vec<Expr>),

    /// Logical OR (`||`), at least two operands
    Or(Vec<Expr>),

    /// Logical negation (`!`)
    Not(Box<Expr>),

    /// Numeric negation (`-`)
    Negate(Box<Expr>),

    /// Grouping, removed by the optimizer
    Parentheses(Box<Expr>),

    // Constraints
    /// Comparison of the input against `value`
    Constraint {
        op: ConstraintOp,
        value: Box<Expr>,
    },

    /// Wildcard (`*`)
    Any,

    /// Applies the inner constraint to every item (`[... c]`)
    Map(Box<Expr>),
}
