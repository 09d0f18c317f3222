//! JSON rendering of the syntax tree.
//!
//! Every node becomes an object with a `"kind"` tag and a `"location"` of the
//! form `"line:column"`. Absent optional parts are omitted rather than
//! rendered as `null`, so a field without arguments has no `"arguments"` key.
//!
//! # Examples
//!
//! ```
//! use gqt_lang::{parse, output::to_json};
//!
//! let operation = parse("query { a }").unwrap();
//! assert_eq!(
//!     to_json(&operation),
//!     r#"{"kind":"query","location":"1:1","selections":[{"kind":"field","location":"1:9","name":"a"}],"variables":{}}"#
//! );
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{
    Argument, Binding, Declarer, Expr, ExprKind, Location, ObjectField, Operation, Selection,
};

/// Compact JSON text.
pub fn to_json(operation: &Operation) -> String {
    to_value(operation).to_string()
}

/// JSON text indented by two spaces.
pub fn to_json_pretty(operation: &Operation) -> String {
    // Rendering a `Value` cannot fail.
    serde_json::to_string_pretty(&to_value(operation)).unwrap_or_default()
}

pub fn to_value(operation: &Operation) -> Value {
    let variables: Map<String, Value> = operation
        .variables
        .iter()
        .map(|(name, decl)| {
            let declared_by = match &decl.declared_by {
                Declarer::Argument { field, argument } => json!({
                    "kind": "argument",
                    "field": field,
                    "argument": argument,
                }),
                Declarer::ObjectField {
                    field,
                    argument,
                    name,
                } => json!({
                    "kind": "object_field",
                    "field": field,
                    "argument": argument,
                    "name": name,
                }),
            };
            (
                name.clone(),
                json!({
                    "location": location(decl.location),
                    "declared_by": declared_by,
                }),
            )
        })
        .collect();

    json!({
        "kind": operation.kind.keyword(),
        "location": location(operation.location),
        "selections": selections(&operation.selections),
        "variables": variables,
    })
}

fn location(location: Location) -> Value {
    Value::String(location.to_string())
}

fn node(kind: &str, at: Location) -> Map<String, Value> {
    let mut map = Map::new();
    map.insert("kind".to_string(), Value::from(kind));
    map.insert("location".to_string(), location(at));
    map
}

fn selections(selections: &[Selection]) -> Value {
    Value::Array(selections.iter().map(selection).collect())
}

fn selection(selection: &Selection) -> Value {
    let map = match selection {
        Selection::Field(field) => {
            let mut map = node("field", field.location);
            map.insert("name".to_string(), Value::from(field.name.as_str()));
            if let Some(arguments) = &field.arguments {
                map.insert(
                    "arguments".to_string(),
                    Value::Array(arguments.iter().map(argument).collect()),
                );
            }
            if let Some(set) = &field.selections {
                map.insert("selections".to_string(), selections(set));
            }
            map
        }
        Selection::InlineFragment(fragment) => {
            let mut map = node("inline_fragment", fragment.location);
            map.insert(
                "type_condition".to_string(),
                Value::from(fragment.type_condition.as_str()),
            );
            map.insert("selections".to_string(), selections(&fragment.selections));
            map
        }
        Selection::Max(max) => {
            let mut map = node("max", max.location);
            map.insert("limit".to_string(), Value::from(max.limit));
            map.insert("options".to_string(), selections(&max.options));
            map
        }
    };
    Value::Object(map)
}

fn binding(map: &mut Map<String, Value>, binding: Option<&Binding>) {
    if let Some(binding) = binding {
        map.insert("variable".to_string(), Value::from(binding.name.as_str()));
    }
}

fn argument(argument: &Argument) -> Value {
    let mut map = node("argument", argument.location);
    map.insert("name".to_string(), Value::from(argument.name.as_str()));
    binding(&mut map, argument.variable.as_ref());
    if let Some(constraint) = &argument.constraint {
        map.insert("constraint".to_string(), expr(constraint));
    }
    Value::Object(map)
}

fn object_field(field: &ObjectField) -> Value {
    let mut map = node("object_field", field.location);
    map.insert("name".to_string(), Value::from(field.name.as_str()));
    binding(&mut map, field.variable.as_ref());
    map.insert("constraint".to_string(), expr(&field.constraint));
    Value::Object(map)
}

fn exprs(items: &[Expr]) -> Value {
    Value::Array(items.iter().map(expr).collect())
}

fn expr(e: &Expr) -> Value {
    let (kind, extra): (&str, Vec<(&str, Value)>) = match &e.kind {
        ExprKind::Int(n) => ("int", vec![("value", Value::from(*n))]),
        // Non-finite floats have no JSON form and render as null.
        ExprKind::Float(n) => ("float", vec![("value", Value::from(*n))]),
        ExprKind::String(s) => ("string", vec![("value", Value::from(s.as_str()))]),
        ExprKind::True => ("true", vec![]),
        ExprKind::False => ("false", vec![]),
        ExprKind::Null => ("null", vec![]),
        ExprKind::Enum(name) => ("enum", vec![("value", Value::from(name.as_str()))]),
        ExprKind::Array(items) => ("array", vec![("items", exprs(items))]),
        ExprKind::Object(fields) => (
            "object",
            vec![("fields", Value::Array(fields.iter().map(object_field).collect()))],
        ),
        ExprKind::Variable(name) => ("variable", vec![("name", Value::from(name.as_str()))]),
        ExprKind::Binary { op, left, right } => (
            "binary",
            vec![
                ("op", Value::from(op.symbol())),
                ("left", expr(left)),
                ("right", expr(right)),
            ],
        ),
        ExprKind::And(operands) => ("and", vec![("operands", exprs(operands))]),
        ExprKind::Or(operands) => ("or", vec![("operands", exprs(operands))]),
        ExprKind::Not(inner) => ("not", vec![("operand", expr(inner))]),
        ExprKind::Negate(inner) => ("negate", vec![("operand", expr(inner))]),
        ExprKind::Parentheses(inner) => ("parentheses", vec![("inner", expr(inner))]),
        ExprKind::Constraint { op, value } => (
            "constraint",
            vec![("op", Value::from(op.name())), ("value", expr(value))],
        ),
        ExprKind::Any => ("any", vec![]),
        ExprKind::Map(inner) => ("map", vec![("constraint", expr(inner))]),
    };

    let mut map = node(kind, e.location);
    for (key, value) in extra {
        map.insert(key.to_string(), value);
    }
    Value::Object(map)
}
