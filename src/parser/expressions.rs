//! Expression and constraint productions.
//!
//! Precedence, loosest first:
//!
//! ```text
//! or             = and ("||" and)*
//! and            = operand ("&&" operand)*
//! operand        = constraint | equality         (depends on the mode)
//! constraint     = "*"
//!                | ["len"] ("!=" | "<=" | ">=" | "<" | ">") equality
//!                | ["len"] equality
//! equality       = relational [("==" | "!=") relational]
//! relational     = additive [("<=" | ">=" | "<" | ">") additive]
//! additive       = multiplicative (("+" | "-") multiplicative)*
//! multiplicative = unary (("*" | "/" | "%") unary)*
//! unary          = "!" unary | "-" unary | value
//! ```

use crate::{
    ast::{BinOp, ConstraintOp, Expr, ExprKind, Location, ObjectField},
    error::{ErrorKind, ParseError},
    scanner::{Cursor, Number},
};

use super::{PResult, enter, expect, parse_list, unexpected};

const CONSTRAINT_PREFIXES: &[&str] = &["!=", "<=", ">=", "<", ">"];

/// Input that cannot start the operand of a `len` prefix.
const NOT_AN_OPERAND: &[&str] = &[")", ",", "]", "}", "&&", "||", "==", "+", "*", "/", "%"];

/// Whether `&&`/`||` operands are constraints or plain expressions.
///
/// Constraint prefixes are only recognized at the root of an argument, object
/// field, array item or map; inside parentheses the plain grammar applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Constraint,
    Expression,
}

pub(super) fn parse_constraint_or(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    parse_or(cursor, Mode::Constraint)
}

fn parse_or(cursor: Cursor<'_>, mode: Mode) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (mut cursor, first) = parse_and(cursor, mode)?;

    let mut operands = vec![first];
    while let Some(after) = cursor.skip_ignored().match_literal("||") {
        let (next, operand) = parse_and(after, mode)?;
        operands.push(operand);
        cursor = next;
    }
    Ok((cursor, logical(operands, location, ExprKind::Or)))
}

fn parse_and(cursor: Cursor<'_>, mode: Mode) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (mut cursor, first) = parse_operand(cursor, mode)?;

    let mut operands = vec![first];
    while let Some(after) = cursor.skip_ignored().match_literal("&&") {
        let (next, operand) = parse_operand(after, mode)?;
        operands.push(operand);
        cursor = next;
    }
    Ok((cursor, logical(operands, location, ExprKind::And)))
}

/// A single operand stands for itself, it is never wrapped.
fn logical(mut operands: Vec<Expr>, location: Location, wrap: fn(Vec<Expr>) -> ExprKind) -> Expr {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        Expr::new(wrap(operands), location)
    }
}

fn parse_operand(cursor: Cursor<'_>, mode: Mode) -> PResult<'_, Expr> {
    match mode {
        Mode::Constraint => parse_constraint(cursor),
        Mode::Expression => parse_equality(cursor),
    }
}

fn parse_constraint(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();

    if let Some(after) = cursor.match_literal("*") {
        return Ok((after, Expr::new(ExprKind::Any, location)));
    }

    // A bare `len` is an enum value.
    let (cursor, length) = match cursor.match_keyword("len").map(Cursor::skip_ignored) {
        Some(after) if !after.is_eof() && after.match_one_of(NOT_AN_OPERAND).is_none() => {
            (after, true)
        }
        _ => (cursor, false),
    };
    let (after, prefix) = cursor
        .match_one_of(CONSTRAINT_PREFIXES)
        .unwrap_or((cursor, ""));

    let (after, value) = parse_equality(after)?;
    let op = ConstraintOp::from_prefix(prefix, length);
    Ok((
        after,
        Expr::new(
            ExprKind::Constraint {
                op,
                value: Box::new(value),
            },
            location,
        ),
    ))
}

fn binary(op: BinOp, left: Expr, right: Expr, location: Location) -> Expr {
    Expr::new(
        ExprKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        location,
    )
}

fn parse_equality(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (after, left) = parse_relational(cursor)?;

    let Some((next, symbol)) = after.skip_ignored().match_one_of(&["==", "!="]) else {
        return Ok((after, left));
    };
    let op = match symbol {
        "==" => BinOp::Equal,
        _ => BinOp::NotEqual,
    };
    let (after, right) = parse_relational(next)?;
    Ok((after, binary(op, left, right, location)))
}

fn parse_relational(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (after, left) = parse_additive(cursor)?;

    let Some((next, symbol)) = after
        .skip_ignored()
        .match_one_of(&["<=", ">=", "<", ">"])
    else {
        return Ok((after, left));
    };
    let op = match symbol {
        "<=" => BinOp::LessEqual,
        ">=" => BinOp::GreaterEqual,
        "<" => BinOp::LessThan,
        _ => BinOp::GreaterThan,
    };
    let (after, right) = parse_additive(next)?;
    Ok((after, binary(op, left, right, location)))
}

fn parse_additive(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (mut cursor, mut left) = parse_multiplicative(cursor)?;

    // Every chained operator nests the tree one level deeper.
    let mut chained = 0;
    while let Some((next, symbol)) = cursor.skip_ignored().match_one_of(&["+", "-"]) {
        let op = match symbol {
            "+" => BinOp::Add,
            _ => BinOp::Subtract,
        };
        let next = enter(next, cursor.skip_ignored().location())?;
        chained += 1;
        let (after, right) = parse_multiplicative(next)?;
        left = binary(op, left, right, location);
        cursor = after;
    }
    Ok((cursor.exit(chained), left))
}

fn parse_multiplicative(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (mut cursor, mut left) = parse_unary(cursor)?;

    let mut chained = 0;
    while let Some((next, symbol)) = cursor.skip_ignored().match_one_of(&["*", "/", "%"]) {
        let op = match symbol {
            "*" => BinOp::Multiply,
            "/" => BinOp::Divide,
            _ => BinOp::Modulo,
        };
        let next = enter(next, cursor.skip_ignored().location())?;
        chained += 1;
        let (after, right) = parse_unary(next)?;
        left = binary(op, left, right, location);
        cursor = after;
    }
    Ok((cursor.exit(chained), left))
}

fn parse_unary(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();

    if let Some(after) = cursor.match_literal("!") {
        let (after, operand) = parse_unary(enter(after, location)?)?;
        return Ok((
            after.exit(1),
            Expr::new(ExprKind::Not(Box::new(operand)), location),
        ));
    }
    // `-5` is a literal, `-$x` and `-(1 + 2)` are negations.
    if !cursor.at_number() {
        if let Some(after) = cursor.match_literal("-") {
            let (after, operand) = parse_unary(enter(after, location)?)?;
            return Ok((
                after.exit(1),
                Expr::new(ExprKind::Negate(Box::new(operand)), location),
            ));
        }
    }
    parse_value(cursor)
}

fn parse_value(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();

    match cursor.peek() {
        Some(b'(') => parse_parentheses(cursor),
        Some(b'$') => parse_variable(cursor),
        Some(b'"') => parse_string(cursor),
        Some(b'[') => parse_array(cursor),
        Some(b'{') => {
            let (after, fields) = parse_list::<ObjectField>(cursor)?;
            Ok((after, Expr::new(ExprKind::Object(fields), location)))
        }
        _ if cursor.at_number() => {
            let (after, number) = cursor
                .take_number()
                .map_err(|m| ParseError::spanning(ErrorKind::InvalidNumber, m.start, m.end))?;
            let kind = match number {
                Number::Int(n) => ExprKind::Int(n),
                Number::Float(n) => ExprKind::Float(n),
            };
            Ok((after, Expr::new(kind, location)))
        }
        _ => {
            let (after, name) = cursor.take_identifier();
            let kind = match name {
                "" => return Err(unexpected(cursor, "value")),
                "true" => ExprKind::True,
                "false" => ExprKind::False,
                "null" => ExprKind::Null,
                _ => ExprKind::Enum(name.to_string()),
            };
            Ok((after, Expr::new(kind, location)))
        }
    }
}

fn parse_parentheses(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let location = cursor.location();
    let after_open = enter(expect(cursor, "(", "'('")?, location)?;
    let (after, inner) = parse_or(after_open, Mode::Expression)?;
    let after = expect(after, ")", "')'")?;
    Ok((
        after.exit(1),
        Expr::new(ExprKind::Parentheses(Box::new(inner)), location),
    ))
}

fn parse_variable(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let location = cursor.location();
    let after_dollar = expect(cursor, "$", "'$'")?;
    let (after, name) = after_dollar.take_identifier();
    if name.is_empty() {
        return Err(unexpected(after_dollar, "variable name"));
    }
    Ok((
        after,
        Expr::new(ExprKind::Variable(name.to_string()), location),
    ))
}

fn parse_string(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let location = cursor.location();
    let (after, raw) = cursor
        .take_quoted_string()
        .map_err(|at| unexpected(at, "end of string"))?;
    let value = unescape(raw, location)?;
    Ok((after, Expr::new(ExprKind::String(value), location)))
}

/// Resolve escape sequences of a string starting at `start` (the opening quote).
///
/// Strings never span lines, so byte positions map directly to columns.
fn unescape(raw: &[u8], start: Location) -> Result<String, ParseError> {
    let at = |i: usize| Location::new(start.offset + 1 + i, start.line, start.column + 1 + i);
    if let Err(e) = std::str::from_utf8(raw) {
        return Err(ParseError::new(ErrorKind::InvalidUtf8, at(e.valid_up_to())));
    }

    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] != b'\\' {
            out.push(raw[i]);
            i += 1;
            continue;
        }

        let backslash = at(i);
        let invalid = || ParseError::new(ErrorKind::InvalidEscape, backslash);
        let unescaped = match raw.get(i + 1) {
            Some(b'"') => b'"',
            Some(b'\\') => b'\\',
            Some(b'/') => b'/',
            Some(b'b') => 0x08,
            Some(b'f') => 0x0c,
            Some(b'n') => b'\n',
            Some(b'r') => b'\r',
            Some(b't') => b'\t',
            Some(b'u') => {
                let hex = raw
                    .get(i + 2..i + 6)
                    .filter(|hex| hex.iter().all(u8::is_ascii_hexdigit))
                    .ok_or_else(invalid)?;
                let code = hex
                    .iter()
                    .fold(0u32, |code, &b| code * 16 + (b as char).to_digit(16).unwrap_or(0));
                let ch = char::from_u32(code).ok_or_else(invalid)?;
                let mut buf = [0; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                i += 6;
                continue;
            }
            _ => return Err(invalid()),
        };
        out.push(unescaped);
        i += 2;
    }
    // Escapes only ever add whole characters to valid input.
    String::from_utf8(out).map_err(|_| ParseError::new(ErrorKind::InvalidUtf8, start))
}

/// Array literal `[a, b]` or map constraint `[... c]`.
///
/// Commas between items are optional.
fn parse_array(cursor: Cursor<'_>) -> PResult<'_, Expr> {
    let location = cursor.location();
    let mut cursor = enter(expect(cursor, "[", "'['")?, location)?;

    if let Some(after_dots) = cursor.skip_ignored().match_literal("...") {
        let (after, inner) = parse_or(after_dots, Mode::Constraint)?;
        let after = expect(after, "]", "']'")?;
        return Ok((
            after.exit(1),
            Expr::new(ExprKind::Map(Box::new(inner)), location),
        ));
    }

    let mut items = Vec::new();
    loop {
        let next = cursor.skip_ignored();
        if let Some(after) = next.match_literal("]") {
            return Ok((after.exit(1), Expr::new(ExprKind::Array(items), location)));
        }
        let (after, item) = parse_or(next, Mode::Constraint)?;
        items.push(item);
        cursor = after.skip_ignored().match_literal(",").unwrap_or(after);
    }
}
