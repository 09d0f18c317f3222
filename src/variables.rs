//! Variable registry.
//!
//! Variables are declared by binding an argument or object field
//! (`name=$var`) and referenced as `$var` anywhere in an expression. A
//! reference may precede its declaration in source order, so the tree is
//! walked once to collect every declaration and reference before the
//! references are checked.

use std::collections::HashMap;

use indexmap::IndexMap;
use log::trace;

use crate::{
    ast::{Binding, Declarer, Expr, ExprKind, Location, Selection, VariableDecl},
    error::{ErrorKind, ParseError},
};

/// Callbacks for [`walk_selections`].
trait Visitor {
    fn declaration(
        &mut self,
        binding: &Binding,
        declarer: Declarer,
        constraint: Option<&Expr>,
    ) -> Result<(), ParseError>;

    fn reference(&mut self, name: &str, location: Location);
}

fn walk_selections<V: Visitor>(
    selections: &[Selection],
    visitor: &mut V,
) -> Result<(), ParseError> {
    for selection in selections {
        match selection {
            Selection::Field(field) => {
                for argument in field.arguments.iter().flatten() {
                    if let Some(binding) = &argument.variable {
                        visitor.declaration(
                            binding,
                            Declarer::Argument {
                                field: field.name.clone(),
                                argument: argument.name.clone(),
                            },
                            argument.constraint.as_ref(),
                        )?;
                    }
                    if let Some(constraint) = &argument.constraint {
                        walk_expr(constraint, (&field.name, &argument.name), visitor)?;
                    }
                }
                if let Some(selections) = &field.selections {
                    walk_selections(selections, visitor)?;
                }
            }
            Selection::InlineFragment(fragment) => walk_selections(&fragment.selections, visitor)?,
            Selection::Max(max) => walk_selections(&max.options, visitor)?,
        }
    }
    Ok(())
}

/// `owner` is the field and argument whose constraint contains `expr`.
fn walk_expr<V: Visitor>(
    expr: &Expr,
    owner: (&str, &str),
    visitor: &mut V,
) -> Result<(), ParseError> {
    match &expr.kind {
        ExprKind::Variable(name) => visitor.reference(name, expr.location),
        ExprKind::Object(fields) => {
            for object_field in fields {
                if let Some(binding) = &object_field.variable {
                    visitor.declaration(
                        binding,
                        Declarer::ObjectField {
                            field: owner.0.to_string(),
                            argument: owner.1.to_string(),
                            name: object_field.name.clone(),
                        },
                        Some(&object_field.constraint),
                    )?;
                }
                walk_expr(&object_field.constraint, owner, visitor)?;
            }
        }
        ExprKind::Array(items) | ExprKind::And(items) | ExprKind::Or(items) => {
            for item in items {
                walk_expr(item, owner, visitor)?;
            }
        }
        ExprKind::Binary { left, right, .. } => {
            walk_expr(left, owner, visitor)?;
            walk_expr(right, owner, visitor)?;
        }
        ExprKind::Not(inner)
        | ExprKind::Negate(inner)
        | ExprKind::Parentheses(inner)
        | ExprKind::Map(inner)
        | ExprKind::Constraint { value: inner, .. } => walk_expr(inner, owner, visitor)?,
        ExprKind::Int(_)
        | ExprKind::Float(_)
        | ExprKind::String(_)
        | ExprKind::True
        | ExprKind::False
        | ExprKind::Null
        | ExprKind::Enum(_)
        | ExprKind::Any => {}
    }
    Ok(())
}

#[derive(Default)]
struct Registry {
    declarations: IndexMap<String, VariableDecl>,
    references: Vec<(String, Location)>,
}

impl Visitor for Registry {
    fn declaration(
        &mut self,
        binding: &Binding,
        declarer: Declarer,
        _constraint: Option<&Expr>,
    ) -> Result<(), ParseError> {
        if self.declarations.contains_key(&binding.name) {
            return Err(ParseError::new(
                ErrorKind::RedeclaredVariable(binding.name.clone()),
                binding.location,
            ));
        }
        trace!("declared ${} at {} by {:?}", binding.name, binding.location, declarer);
        self.declarations.insert(
            binding.name.clone(),
            VariableDecl {
                location: binding.location,
                declared_by: declarer,
            },
        );
        Ok(())
    }

    fn reference(&mut self, name: &str, location: Location) {
        self.references.push((name.to_string(), location));
    }
}

/// Build the declaration registry and check every reference against it.
pub(crate) fn resolve(
    selections: &[Selection],
) -> Result<IndexMap<String, VariableDecl>, ParseError> {
    let mut registry = Registry::default();
    walk_selections(selections, &mut registry)?;

    if let Some((name, location)) = registry
        .references
        .into_iter()
        .find(|(name, _)| !registry.declarations.contains_key(name))
    {
        return Err(ParseError::new(ErrorKind::UndefinedVariable(name), location));
    }
    Ok(registry.declarations)
}

#[derive(Default)]
struct Constraints(HashMap<String, Option<Expr>>);

impl Visitor for Constraints {
    fn declaration(
        &mut self,
        binding: &Binding,
        _declarer: Declarer,
        constraint: Option<&Expr>,
    ) -> Result<(), ParseError> {
        self.0
            .entry(binding.name.clone())
            .or_insert_with(|| constraint.cloned());
        Ok(())
    }

    fn reference(&mut self, _name: &str, _location: Location) {}
}

/// Constraint attached to each variable's declaration, if any.
pub(crate) fn declared_constraints(selections: &[Selection]) -> HashMap<String, Option<Expr>> {
    let mut constraints = Constraints::default();
    // Collecting never fails.
    let _ = walk_selections(selections, &mut constraints);
    constraints.0
}
