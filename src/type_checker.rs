//! A shallow, single-pass compatibility check run before evaluation.
//!
//! Only application heads and bare names carry types. Numeric literals take
//! their meaning from the surrounding scope and are accepted anywhere.

use crate::resolver::Abt;
use crate::syntax::Node;
use crate::types::Type;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("type error: {name} has type {found}, expected {expected}")]
    Mismatch {
        name: String,
        expected: Type,
        found: Type,
    },
    #[error("type error: too many arguments: expected just one")]
    TooManyArguments,
    #[error("type error: {0} cannot be applied to arguments")]
    NotAFunction(String),
}

/// Checks that `node` evaluates to a value of type `expected`.
pub fn check(node: &Abt, expected: &Type) -> Result<(), TypeError> {
    match node {
        Node::Paren { child, .. } => check(child, expected),
        Node::NumLit { .. } => Ok(()),
        Node::Name { value, payload, .. } => match payload.ty() {
            Some(found) if found != expected => Err(TypeError::Mismatch {
                name: value.clone(),
                expected: expected.clone(),
                found: found.clone(),
            }),
            _ => Ok(()),
        },
        Node::HApp { children, .. } | Node::VApp { children, .. } => {
            check_application(children, expected)
        }
    }
}

fn check_application(children: &[Abt], expected: &Type) -> Result<(), TypeError> {
    let Some((head, arguments)) = children.split_first() else {
        return Ok(());
    };
    match head_type(head)? {
        Some(Type::ListProcessor { input, output }) => {
            expect_output(head, &output, expected)?;
            arguments.iter().try_for_each(|argument| check(argument, &input))
        }
        Some(Type::Func { input, output }) => {
            expect_output(head, &output, expected)?;
            match arguments {
                [argument] => check(argument, &input),
                _ => Err(TypeError::TooManyArguments),
            }
        }
        Some(other) => Err(TypeError::NotAFunction(other.to_string())),
        // Untyped bindings opt out of checking.
        None => Ok(()),
    }
}

fn head_type(head: &Abt) -> Result<Option<Type>, TypeError> {
    match head {
        Node::Name { payload, .. } => Ok(payload.ty().cloned()),
        Node::Paren { child, .. } => head_type(child),
        Node::NumLit { raw, .. } => Err(TypeError::NotAFunction(format!("literal {}", raw))),
        Node::HApp { children, .. } | Node::VApp { children, .. } => {
            // An application's type is its head's output.
            match children.first().map(head_type).transpose()?.flatten() {
                Some(Type::Func { output, .. } | Type::ListProcessor { output, .. }) => {
                    Ok(Some(*output))
                }
                _ => Ok(None),
            }
        }
    }
}

fn expect_output(head: &Abt, output: &Type, expected: &Type) -> Result<(), TypeError> {
    if output == expected {
        return Ok(());
    }
    let name = match head {
        Node::Name { value, .. } => value.clone(),
        other => other.strip().to_string(),
    };
    Err(TypeError::Mismatch {
        name: format!("{} applied", name),
        expected: expected.clone(),
        found: output.clone(),
    })
}
