//! Recursive-descent parser for query templates.
//!
//! Every production is a function from a [`Cursor`] to the cursor after the
//! production plus the parsed node. Cursors are values: a failing production
//! leaves its caller's cursor untouched, so trying an alternative is just a
//! matter of calling another function with the same cursor.
//!
//! # Grammar
//!
//! ```text
//! operation     = ("query" | "mutation" | "subscription") selection_set EOF
//! selection_set = "{" selection+ "}"
//! selection     = "..." "on" NAME selection_set
//!               | "max" UINT selection_set
//!               | NAME [argument_list] [selection_set]
//! argument_list = "(" (argument ("," | &")"))+ ")"
//! argument      = NAME ["=" "$" NAME] [":" constraint_or]
//! ```
//!
//! Expressions are handled in [`expressions`].

mod expressions;

use log::debug;

use crate::{
    ast::{
        Argument, Binding, Field, InlineFragment, Location, Max, ObjectField, Operation,
        OperationKind, Selection,
    },
    error::{ErrorKind, ParseError},
    scanner::Cursor,
    variables,
};

type PResult<'a, T> = Result<(Cursor<'a>, T), ParseError>;

/// Parse a complete template.
///
/// # Examples
///
/// ```
/// use gqt_lang::{parse, ast::{OperationKind, Selection}};
///
/// let operation = parse("query { a }").unwrap();
/// assert_eq!(operation.kind, OperationKind::Query);
/// assert!(matches!(&operation.selections[0], Selection::Field(f) if f.name == "a"));
/// ```
pub fn parse<S: AsRef<[u8]> + ?Sized>(source: &S) -> Result<Operation, ParseError> {
    let cursor = Cursor::new(source.as_ref()).skip_ignored();
    let location = cursor.location();

    let (after_kind, keyword) = cursor.take_token();
    let kind = OperationKind::from_keyword(keyword)
        .ok_or_else(|| unexpected(cursor, "operation kind"))?;

    let (after, selections) = parse_selection_set(after_kind)?;
    let end = after.skip_ignored();
    if !end.is_eof() {
        return Err(unexpected(end, "end of file"));
    }

    let variables = variables::resolve(&selections)?;
    debug!(
        "parsed {} with {} selections and {} variables",
        kind.keyword(),
        selections.len(),
        variables.len()
    );

    Ok(Operation {
        kind,
        selections,
        variables,
        location,
    })
}

/// Token-level mismatch at `at`, which must already be past ignored input.
fn unexpected(at: Cursor<'_>, expected: &'static str) -> ParseError {
    let kind = if at.is_eof() {
        ErrorKind::UnexpectedEof(expected)
    } else {
        ErrorKind::UnexpectedToken(expected)
    };
    ParseError::new(kind, at.location())
}

fn expect<'a>(
    cursor: Cursor<'a>,
    literal: &str,
    expected: &'static str,
) -> Result<Cursor<'a>, ParseError> {
    let cursor = cursor.skip_ignored();
    cursor
        .match_literal(literal)
        .ok_or_else(|| unexpected(cursor, expected))
}

/// One nesting level down from `cursor`, failing at `at` when too deep.
fn enter(cursor: Cursor<'_>, at: Location) -> Result<Cursor<'_>, ParseError> {
    cursor
        .enter()
        .ok_or_else(|| ParseError::new(ErrorKind::NestingTooDeep, at))
}

fn parse_selection_set(cursor: Cursor<'_>) -> PResult<'_, Vec<Selection>> {
    let cursor = cursor.skip_ignored();
    let open = cursor.location();
    let after_open = cursor
        .match_literal("{")
        .ok_or_else(|| unexpected(cursor, "selection set"))?;
    let mut cursor = enter(after_open, open)?;

    let mut selections = Vec::new();
    loop {
        let next = cursor.skip_ignored();
        if let Some(after) = next.match_literal("}") {
            if selections.is_empty() {
                return Err(ParseError::new(ErrorKind::EmptySelectionSet, open));
            }
            return Ok((after.exit(1), selections));
        }
        let (after, selection) = parse_selection(next)?;
        selections.push(selection);
        cursor = after;
    }
}

fn parse_selection(cursor: Cursor<'_>) -> PResult<'_, Selection> {
    if let Some(after_dots) = cursor.match_literal("...") {
        return parse_inline_fragment(cursor.location(), after_dots);
    }
    // `max` is only a keyword when a limit follows, otherwise it names a field.
    if let Some(after_max) = cursor.match_keyword("max") {
        if after_max.skip_ignored().peek().is_some_and(|b| b.is_ascii_digit()) {
            return parse_max(cursor.location(), after_max);
        }
    }
    parse_field(cursor)
}

fn parse_inline_fragment(location: Location, after_dots: Cursor<'_>) -> PResult<'_, Selection> {
    let next = after_dots.skip_ignored();
    let Some(after_on) = next.match_keyword("on") else {
        let kind = if next.is_eof() {
            ErrorKind::UnexpectedEof("keyword 'on'")
        } else {
            ErrorKind::UnexpectedToken("keyword 'on'")
        };
        return Err(ParseError::new(kind, after_dots.location()));
    };

    let next = after_on.skip_ignored();
    let (after_name, type_condition) = next.take_identifier();
    if type_condition.is_empty() {
        return Err(unexpected(next, "type condition"));
    }

    let (after, selections) = parse_selection_set(after_name)?;
    Ok((
        after,
        Selection::InlineFragment(InlineFragment {
            type_condition: type_condition.to_string(),
            selections,
            location,
        }),
    ))
}

fn parse_max(location: Location, after_max: Cursor<'_>) -> PResult<'_, Selection> {
    let next = after_max.skip_ignored();
    let (after_limit, limit) = next
        .take_unsigned_int()
        .map_err(|m| ParseError::spanning(ErrorKind::InvalidNumber, m.start, m.end))?;
    if limit == 0 {
        return Err(ParseError::new(ErrorKind::InvalidMaxLimit, next.location()));
    }

    let (after, options) = parse_selection_set(after_limit)?;
    Ok((
        after,
        Selection::Max(Max {
            limit,
            options,
            location,
        }),
    ))
}

fn parse_field(cursor: Cursor<'_>) -> PResult<'_, Selection> {
    let location = cursor.location();
    let (mut after, name) = cursor.take_identifier();
    if name.is_empty() {
        return Err(unexpected(cursor, "selection"));
    }

    let mut arguments = None;
    if after.skip_ignored().peek() == Some(b'(') {
        let (next, list) = parse_list::<Argument>(after)?;
        arguments = Some(list);
        after = next;
    }

    let mut selections = None;
    if after.skip_ignored().peek() == Some(b'{') {
        let (next, set) = parse_selection_set(after)?;
        selections = Some(set);
        after = next;
    }

    Ok((
        after,
        Selection::Field(Field {
            name: name.to_string(),
            arguments,
            selections,
            declared_type: None,
            location,
        }),
    ))
}

/// A named entry of a delimited list: an argument or an object field.
trait Entry: Sized {
    const OPEN: &'static str;
    const CLOSE: &'static str;
    const SEPARATOR: &'static str;
    const EMPTY: ErrorKind;

    fn parse(cursor: Cursor<'_>) -> PResult<'_, Self>;
    fn name(&self) -> &str;
    fn location(&self) -> Location;
    fn redeclared(name: String) -> ErrorKind;
}

impl Entry for Argument {
    const OPEN: &'static str = "(";
    const CLOSE: &'static str = ")";
    const SEPARATOR: &'static str = "',' or ')'";
    const EMPTY: ErrorKind = ErrorKind::EmptyArgumentList;

    fn parse(cursor: Cursor<'_>) -> PResult<'_, Self> {
        let (after, (name, variable, location)) = parse_entry_head(cursor, "argument name")?;
        let next = after.skip_ignored();
        let (after, constraint) = match next.match_literal(":") {
            Some(after_colon) => {
                let (after, constraint) = expressions::parse_constraint_or(after_colon)?;
                (after, Some(constraint))
            }
            None => (after, None),
        };
        Ok((
            after,
            Argument {
                name,
                variable,
                constraint,
                location,
            },
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Location {
        self.location
    }

    fn redeclared(name: String) -> ErrorKind {
        ErrorKind::RedeclaredArgument(name)
    }
}

impl Entry for ObjectField {
    const OPEN: &'static str = "{";
    const CLOSE: &'static str = "}";
    const SEPARATOR: &'static str = "',' or '}'";
    const EMPTY: ErrorKind = ErrorKind::EmptyObject;

    fn parse(cursor: Cursor<'_>) -> PResult<'_, Self> {
        let (after, (name, variable, location)) = parse_entry_head(cursor, "object field name")?;
        let after_colon = expect(after, ":", "':'")?;
        let (after, constraint) = expressions::parse_constraint_or(after_colon)?;
        Ok((
            after,
            ObjectField {
                name,
                variable,
                constraint,
                location,
            },
        ))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> Location {
        self.location
    }

    fn redeclared(name: String) -> ErrorKind {
        ErrorKind::RedeclaredObjectField(name)
    }
}

/// Name and optional `=$variable` binding of an entry.
fn parse_entry_head<'a>(
    cursor: Cursor<'a>,
    expected: &'static str,
) -> PResult<'a, (String, Option<Binding>, Location)> {
    let cursor = cursor.skip_ignored();
    let location = cursor.location();
    let (after, name) = cursor.take_identifier();
    if name.is_empty() {
        return Err(unexpected(cursor, expected));
    }

    let next = after.skip_ignored();
    let Some(after_eq) = next.match_literal("=") else {
        return Ok((after, (name.to_string(), None, location)));
    };

    let dollar = after_eq.skip_ignored();
    let after_dollar = dollar
        .match_literal("$")
        .ok_or_else(|| unexpected(dollar, "variable"))?;
    let (after_var, variable) = after_dollar.take_identifier();
    if variable.is_empty() {
        return Err(unexpected(after_dollar, "variable name"));
    }

    let binding = Binding {
        name: variable.to_string(),
        location: dollar.location(),
    };
    Ok((after_var, (name.to_string(), Some(binding), location)))
}

/// Parse a non-empty delimited list of entries with unique names.
///
/// Entries are separated by commas; a trailing comma before the closing
/// delimiter is accepted.
fn parse_list<T: Entry>(cursor: Cursor<'_>) -> PResult<'_, Vec<T>> {
    let cursor = cursor.skip_ignored();
    let open = cursor.location();
    let after_open = cursor
        .match_literal(T::OPEN)
        .ok_or_else(|| unexpected(cursor, T::OPEN))?;
    let mut cursor = enter(after_open, open)?;

    let mut entries: Vec<T> = Vec::new();
    loop {
        let next = cursor.skip_ignored();
        if let Some(after) = next.match_literal(T::CLOSE) {
            if entries.is_empty() {
                return Err(ParseError::new(T::EMPTY, open));
            }
            return Ok((after.exit(1), entries));
        }

        let (after, entry) = T::parse(next)?;
        if entries.iter().any(|e| e.name() == entry.name()) {
            return Err(ParseError::new(
                T::redeclared(entry.name().to_string()),
                entry.location(),
            ));
        }
        entries.push(entry);

        let next = after.skip_ignored();
        cursor = if let Some(after_comma) = next.match_literal(",") {
            after_comma
        } else if next.match_literal(T::CLOSE).is_some() {
            next
        } else {
            return Err(unexpected(next, T::SEPARATOR));
        };
    }
}
