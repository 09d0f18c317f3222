//! Constant folding over a parsed operation.
//!
//! The optimizer rewrites the tree in place and never fails: anything it
//! cannot fold is left as it is. Folded nodes keep the location of the node
//! they replace.

use std::{collections::HashMap, mem};

use log::trace;

use crate::{
    ast::{BinOp, ConstraintOp, Expr, ExprKind, Location, Operation, Selection},
    variables,
};

/// Fold constant subexpressions, unwrap parentheses and inline variables
/// whose value folds to a scalar literal.
///
/// # Examples
///
/// ```
/// use gqt_lang::{optimize, parse, ast::{ExprKind, Selection}};
///
/// let operation = optimize(parse("query { a(x: 2 + 2) }").unwrap());
/// let Selection::Field(field) = &operation.selections[0] else { unreachable!() };
/// let constraint = field.arguments.as_ref().unwrap()[0].constraint.as_ref().unwrap();
/// let ExprKind::Constraint { value, .. } = &constraint.kind else { unreachable!() };
/// assert_eq!(value.kind, ExprKind::Int(4));
/// ```
pub fn optimize(mut operation: Operation) -> Operation {
    let mut optimizer = Optimizer {
        constraints: variables::declared_constraints(&operation.selections),
        resolving: Vec::new(),
        resolved: HashMap::new(),
    };
    optimizer.selections(&mut operation.selections);
    operation
}

struct Optimizer {
    /// Declaration constraints as written, before any folding
    constraints: HashMap<String, Option<Expr>>,

    /// Variables currently being inlined, outermost first
    resolving: Vec<String>,

    /// Inlining outcome per variable, computed once
    resolved: HashMap<String, Option<ExprKind>>,
}

/// Longest chain of variables followed while inlining.
const MAX_INLINE_DEPTH: usize = 64;

impl Optimizer {
    fn selections(&mut self, selections: &mut [Selection]) {
        for selection in selections {
            match selection {
                Selection::Field(field) => {
                    for argument in field.arguments.iter_mut().flatten() {
                        if let Some(constraint) = &mut argument.constraint {
                            self.expr(constraint);
                        }
                    }
                    if let Some(selections) = &mut field.selections {
                        self.selections(selections);
                    }
                }
                Selection::InlineFragment(fragment) => self.selections(&mut fragment.selections),
                Selection::Max(max) => self.selections(&mut max.options),
            }
        }
    }

    fn expr(&mut self, expr: &mut Expr) {
        let kind = mem::replace(&mut expr.kind, ExprKind::Null);
        expr.kind = self.fold(kind, expr.location);
    }

    fn fold(&mut self, kind: ExprKind, location: Location) -> ExprKind {
        match kind {
            ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::String(_)
            | ExprKind::True
            | ExprKind::False
            | ExprKind::Null
            | ExprKind::Enum(_)
            | ExprKind::Any => kind,

            ExprKind::Variable(name) => match self.inline(&name) {
                Some(value) => {
                    trace!("inlined ${name} at {location}");
                    value
                }
                None => ExprKind::Variable(name),
            },

            ExprKind::Parentheses(inner) => {
                let mut inner = *inner;
                self.expr(&mut inner);
                inner.kind
            }

            ExprKind::Array(mut items) => {
                for item in &mut items {
                    self.expr(item);
                }
                ExprKind::Array(items)
            }

            ExprKind::Object(mut fields) => {
                for field in &mut fields {
                    self.expr(&mut field.constraint);
                }
                ExprKind::Object(fields)
            }

            ExprKind::Map(mut inner) => {
                self.expr(&mut inner);
                ExprKind::Map(inner)
            }

            ExprKind::Constraint { op, mut value } => {
                self.expr(&mut value);
                ExprKind::Constraint { op, value }
            }

            ExprKind::Not(mut inner) => {
                self.expr(&mut inner);
                match inner.as_bool() {
                    Some(b) => {
                        trace!("folded ! at {location}");
                        boolean(!b)
                    }
                    None => ExprKind::Not(inner),
                }
            }

            ExprKind::Negate(mut inner) => {
                self.expr(&mut inner);
                let folded = match inner.kind {
                    ExprKind::Int(n) => n.checked_neg().map(ExprKind::Int),
                    ExprKind::Float(n) => Some(ExprKind::Float(-n)),
                    _ => None,
                };
                match folded {
                    Some(value) => {
                        trace!("folded - at {location}");
                        value
                    }
                    None => ExprKind::Negate(inner),
                }
            }

            ExprKind::And(operands) => self.logical(operands, false, location),
            ExprKind::Or(operands) => self.logical(operands, true, location),

            ExprKind::Binary {
                op,
                mut left,
                mut right,
            } => {
                self.expr(&mut left);
                self.expr(&mut right);
                match fold_binary(op, &left, &right) {
                    Some(value) => {
                        trace!("folded {} at {location}", op.symbol());
                        value
                    }
                    None => ExprKind::Binary { op, left, right },
                }
            }
        }
    }

    /// `&&` when `short` is false, `||` when it is true.
    ///
    /// Folds only when every operand up to the deciding one is a boolean
    /// literal, evaluating left to right.
    fn logical(&mut self, mut operands: Vec<Expr>, short: bool, location: Location) -> ExprKind {
        for operand in &mut operands {
            self.expr(operand);
        }

        if operands.first().and_then(Expr::as_bool).is_some() {
            let mut result = Some(!short);
            for operand in &operands {
                match operand.as_bool() {
                    Some(b) if b == short => {
                        result = Some(short);
                        break;
                    }
                    Some(_) => {}
                    None => {
                        result = None;
                        break;
                    }
                }
            }
            if let Some(b) = result {
                trace!("folded {} at {location}", if short { "||" } else { "&&" });
                return boolean(b);
            }
        }

        if operands.len() == 1 {
            return operands.remove(0).kind;
        }
        if short {
            ExprKind::Or(operands)
        } else {
            ExprKind::And(operands)
        }
    }

    /// Scalar literal a variable's declared value folds to, if any.
    ///
    /// Outcomes are cached, so each declaration is optimized at most once no
    /// matter how often it is referenced.
    fn inline(&mut self, name: &str) -> Option<ExprKind> {
        if let Some(result) = self.resolved.get(name) {
            return result.clone();
        }
        // Cycles and overly long chains stay as variables.
        if self.resolving.len() >= MAX_INLINE_DEPTH || self.resolving.iter().any(|n| n == name) {
            return None;
        }

        let mut value = match self.constraints.get(name) {
            Some(Some(Expr {
                kind:
                    ExprKind::Constraint {
                        op: ConstraintOp::Equals,
                        value,
                    },
                ..
            })) => value.as_ref().clone(),
            _ => return None,
        };

        self.resolving.push(name.to_string());
        self.expr(&mut value);
        self.resolving.pop();

        let result = Some(value.kind).filter(is_scalar);
        self.resolved.insert(name.to_string(), result.clone());
        result
    }
}

fn is_scalar(kind: &ExprKind) -> bool {
    matches!(
        kind,
        ExprKind::Int(_)
            | ExprKind::Float(_)
            | ExprKind::String(_)
            | ExprKind::True
            | ExprKind::False
            | ExprKind::Null
            | ExprKind::Enum(_)
    )
}

fn boolean(b: bool) -> ExprKind {
    if b { ExprKind::True } else { ExprKind::False }
}

fn fold_binary(op: BinOp, left: &Expr, right: &Expr) -> Option<ExprKind> {
    if op.is_arithmetic() {
        return fold_arithmetic(op, left, right);
    }
    if op.is_relational() {
        let (a, b) = (left.as_float()?, right.as_float()?);
        let result = match op {
            BinOp::LessThan => a < b,
            BinOp::LessEqual => a <= b,
            BinOp::GreaterThan => a > b,
            _ => a >= b,
        };
        return Some(boolean(result));
    }

    let equal = literal_eq(left, right)?;
    Some(boolean(if op == BinOp::Equal { equal } else { !equal }))
}

fn fold_arithmetic(op: BinOp, left: &Expr, right: &Expr) -> Option<ExprKind> {
    if let (ExprKind::Int(a), ExprKind::Int(b)) = (&left.kind, &right.kind) {
        let (a, b) = (*a, *b);
        let value = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Subtract => a.checked_sub(b),
            BinOp::Multiply => a.checked_mul(b),
            BinOp::Divide => a.checked_div(b),
            BinOp::Modulo => a.checked_rem(b),
            _ => None,
        };
        return value.map(ExprKind::Int);
    }

    let (a, b) = (left.as_float()?, right.as_float()?);
    let value = match op {
        BinOp::Add => a + b,
        BinOp::Subtract => a - b,
        BinOp::Multiply => a * b,
        BinOp::Divide | BinOp::Modulo if b == 0.0 => return None,
        BinOp::Divide => a / b,
        BinOp::Modulo => a % b,
        _ => return None,
    };
    Some(ExprKind::Float(value))
}

/// Structural equality of two literals, `None` when they are not comparable.
fn literal_eq(left: &Expr, right: &Expr) -> Option<bool> {
    use ExprKind::*;
    match (&left.kind, &right.kind) {
        (String(a), String(b)) | (Enum(a), Enum(b)) => Some(a == b),
        (True | False | Null, True | False | Null) => {
            Some(mem::discriminant(&left.kind) == mem::discriminant(&right.kind))
        }
        (Array(a), Array(b)) => {
            if a.len() != b.len() {
                return Some(false);
            }
            let mut equal = true;
            for (x, y) in a.iter().zip(b) {
                equal &= literal_eq(equals_value(x)?, equals_value(y)?)?;
            }
            Some(equal)
        }
        _ => Some(left.as_float()? == right.as_float()?),
    }
}

/// The value of an implicit equality constraint, as found in array items.
fn equals_value(item: &Expr) -> Option<&Expr> {
    match &item.kind {
        ExprKind::Constraint {
            op: ConstraintOp::Equals,
            value,
        } => Some(value),
        _ => None,
    }
}
