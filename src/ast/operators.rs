/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Subtract,
    /// Multiplication (`*`)
    Multiply,
    /// Division (`/`)
    Divide,
    /// Modulo (`%`)
    Modulo,

    // Relational
    /// Less than (`<`)
    LessThan,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than (`>`)
    GreaterThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,

    // Equality
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
}

impl BinOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Subtract => "-",
            BinOp::Multiply => "*",
            BinOp::Divide => "/",
            BinOp::Modulo => "%",
            BinOp::LessThan => "<",
            BinOp::LessEqual => "<=",
            BinOp::GreaterThan => ">",
            BinOp::GreaterEqual => ">=",
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
        }
    }

    pub fn is_arithmetic(self) -> bool {
        matches!(
            self,
            BinOp::Add | BinOp::Subtract | BinOp::Multiply | BinOp::Divide | BinOp::Modulo
        )
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinOp::LessThan | BinOp::LessEqual | BinOp::GreaterThan | BinOp::GreaterEqual
        )
    }
}

/// Constraint operators.
///
/// The `Len*` variants compare the length of the input instead of its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    /// Implicit, a bare value
    Equals,
    /// `!=`
    NotEquals,
    /// `<`
    Less,
    /// `<=`
    LessOrEqual,
    /// `>`
    Greater,
    /// `>=`
    GreaterOrEqual,

    /// `len`
    LenEquals,
    /// `len !=`
    LenNotEquals,
    /// `len <`
    LenLess,
    /// `len <=`
    LenLessOrEqual,
    /// `len >`
    LenGreater,
    /// `len >=`
    LenGreaterOrEqual,
}

impl ConstraintOp {
    /// Operator for a constraint prefix, `len` applied when `length` is set.
    /// Anything but `!=`, `<`, `<=`, `>` and `>=` is the implicit equality.
    pub(crate) fn from_prefix(prefix: &str, length: bool) -> Self {
        use ConstraintOp::*;
        match (prefix, length) {
            ("!=", false) => NotEquals,
            ("<", false) => Less,
            ("<=", false) => LessOrEqual,
            (">", false) => Greater,
            (">=", false) => GreaterOrEqual,
            (_, false) => Equals,
            ("!=", true) => LenNotEquals,
            ("<", true) => LenLess,
            ("<=", true) => LenLessOrEqual,
            (">", true) => LenGreater,
            (">=", true) => LenGreaterOrEqual,
            (_, true) => LenEquals,
        }
    }

    pub fn is_length(self) -> bool {
        use ConstraintOp::*;
        matches!(
            self,
            LenEquals | LenNotEquals | LenLess | LenLessOrEqual | LenGreater | LenGreaterOrEqual
        )
    }

    /// Name used when rendering the tree.
    pub fn name(self) -> &'static str {
        use ConstraintOp::*;
        match self {
            Equals => "equals",
            NotEquals => "not_equals",
            Less => "less",
            LessOrEqual => "less_or_equal",
            Greater => "greater",
            GreaterOrEqual => "greater_or_equal",
            LenEquals => "len_equals",
            LenNotEquals => "len_not_equals",
            LenLess => "len_less",
            LenLessOrEqual => "len_less_or_equal",
            LenGreater => "len_greater",
            LenGreaterOrEqual => "len_greater_or_equal",
        }
    }
}
