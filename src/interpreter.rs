//! Evaluation of resolved trees.
//!
//! Evaluation is depth first and strictly left to right. Numeric literals
//! have no meaning of their own: the innermost scope decides what they stand
//! for (a pitch, a time factor, a plain number...). Every application opens a
//! scope for its arguments, so whatever an argument changes stays inside the
//! argument list it appears in.

mod context;
mod value;

pub use context::{IContext, NumLitInterpreter, State};
pub use value::{Function, Value};

use crate::resolver::Abt;
use crate::syntax::Node;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("a {0} cannot be applied to arguments")]
    NotCallable(String),
    #[error("expected a {expected}, found a {found}")]
    UnexpectedValue {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{function} expects {expected} argument(s), got {found}")]
    WrongArity {
        function: String,
        expected: usize,
        found: usize,
    },
    #[error("non exhaustive match: a node was read before it was evaluated")]
    Unevaluated,
}

pub fn interpret(node: &Abt, ctx: &mut IContext) -> Result<Value, EvalError> {
    match node {
        Node::Paren { child, payload, .. } => payload.force_with(ctx, |ctx| interpret(child, ctx)),
        Node::NumLit { payload, .. } => {
            let literal = payload.force(ctx)?.into_number()?;
            let state = ctx.state();
            Ok(state.literals.read(literal, state))
        }
        Node::Name { payload, .. } => payload.force(ctx),
        Node::HApp {
            children, payload, ..
        }
        | Node::VApp {
            children, payload, ..
        } => payload.force_with(ctx, |ctx| apply(children, ctx)),
    }
}

fn apply(children: &[Abt], ctx: &mut IContext) -> Result<Value, EvalError> {
    let Some((head, arguments)) = children.split_first() else {
        return Err(EvalError::NotCallable("empty application".to_owned()));
    };
    let function = interpret(head, ctx)?.into_function()?;
    let frame = function.argument_frame(ctx.state());
    let values = ctx.scoped(frame, |ctx| {
        arguments
            .iter()
            .map(|argument| interpret(argument, ctx))
            .collect::<Result<Vec<_>, _>>()
    })?;
    function.call(values, ctx.state_mut())
}
