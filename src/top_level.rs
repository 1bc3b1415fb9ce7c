//! The program environment: the names every program can use, and the
//! entry points from source text to a pattern of note parameters.

mod builtins;

pub use builtins::{global_context, note, note_literals};

use tracing::debug;

use crate::error::Result;
use crate::interpreter::{self, IContext, State, Value};
use crate::parameters::Parameters;
use crate::resolver::{Abt, resolve};
use crate::semantics::{Pattern, periodic};
use crate::syntax::parse_top_level;
use crate::type_checker::check;
use crate::types::Type;

/// Bare literals are notes on channel 0.
pub fn default_state() -> State {
    State::new(note_literals())
}

/// One default event per cycle. Programs transform this pulse, so time
/// flows before any note is set.
pub fn pulse() -> Pattern<Parameters> {
    periodic(1.0, 1.0, 0.0, Parameters::default())
}

/// Parses, resolves and type-checks a program. Nothing is evaluated.
pub fn parse_and_resolve(code: &str) -> Result<Abt> {
    let document = parse_top_level(code)?;
    let abt = resolve(&global_context(), &document.tree)?;
    check(&abt, &Type::Transformer)?;
    debug!("Program of {} line(s) resolved", code.lines().count());
    Ok(abt)
}

/// Evaluates a resolved program and applies it to the pulse.
pub fn interpret(abt: &Abt) -> Result<Pattern<Parameters>> {
    let mut ctx = IContext::new(default_state());
    let transformer = interpreter::interpret(abt, &mut ctx).and_then(Value::into_transformer)?;
    Ok(transformer.apply(pulse()))
}

/// Source text to pattern in one step.
pub fn evaluate(code: &str) -> Result<Pattern<Parameters>> {
    interpret(&parse_and_resolve(code)?)
}
