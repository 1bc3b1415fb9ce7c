use std::rc::Rc;

use crate::interpreter::{EvalError, Function, NumLitInterpreter, State, Value};
use crate::parameters::{Parameters, wrap_channel, wrap_pitch};
use crate::resolver::BindingContext;
use crate::semantics::{self, Transformer};
use crate::term::Term;
use crate::types::Type;

type T = Transformer<Parameters>;

const MIN_SLOW: f64 = 1.0 / 128.0;
const MAX_FAST: f64 = 128.0;

fn transformers(args: Vec<Value>) -> Result<Vec<T>, EvalError> {
    args.into_iter().map(Value::into_transformer).collect()
}

fn list_type() -> Type {
    Type::list_processor(Type::Transformer, Type::Transformer)
}

/// Sets pitch and channel on every event.
pub fn note(pitch: f64, channel: u8) -> T {
    let pitch = wrap_pitch(pitch);
    semantics::fmap(move |value: Parameters| Parameters {
        pitch: Some(pitch),
        channel,
        ..value
    })
}

/// Reads literals as notes on the scope's channel.
pub fn note_literals() -> NumLitInterpreter {
    NumLitInterpreter::new("note", |n, state| Value::Transformer(note(n, state.channel)))
}

fn pitch_map(f: impl Fn(f64) -> f64 + Send + Sync + 'static) -> T {
    semantics::fmap(move |value: Parameters| Parameters {
        pitch: value.pitch.map(|pitch| wrap_pitch(f(pitch as f64))),
        ..value
    })
}

fn channel_map(channel: f64) -> T {
    let channel = wrap_channel(channel);
    semantics::fmap(move |value: Parameters| Parameters { channel, ..value })
}

fn length_map(length: f64) -> T {
    semantics::fmap(move |value: Parameters| Parameters { length, ..value })
}

fn mute() -> T {
    semantics::fmap(|value: Parameters| Parameters {
        mute: true,
        ..value
    })
}

/// A list processor over transformers that leaves literals alone.
fn combinator(name: &'static str, combine: fn(Vec<T>) -> T) -> Term {
    let function = Function::pure(name, move |args| Ok(combine(transformers(args)?).into()));
    Term::value(Some(list_type()), function)
}

/// Alternates between its arguments, one per cycle, reading literal
/// arguments with `read`.
fn literal_alt(name: &'static str, read: impl Fn(f64, &State) -> T + 'static) -> Term {
    let read = Rc::new(read);
    Term::impure(Some(list_type()), move |ctx| {
        let read = Rc::clone(&read);
        let literals =
            NumLitInterpreter::new(name, move |n, state| Value::Transformer(read(n, state)));
        let function = Function::pure(name, |args| Ok(semantics::alt(transformers(args)?).into()))
            .with_arguments(ctx.state().with_literals(literals));
        Ok(function.into())
    })
}

/// `alt` with each cycle's choice played `factor` times faster and the
/// whole alternation `factor` times slower, so that every choice lasts
/// `factor` cycles.
fn alt_with_period(name: &'static str, factor: f64) -> Term {
    let function = Function::pure(name, move |args| {
        let children = transformers(args)?
            .into_iter()
            .map(|t| semantics::compose(vec![t, semantics::fast(factor)]))
            .collect();
        let alternation = semantics::compose(vec![semantics::alt(children), semantics::slow(factor)]);
        Ok(alternation.into())
    });
    Term::value(Some(list_type()), function)
}

/// `alt` run on a time scale `factor` times coarser than the input.
fn alt_with_zoom(name: &'static str, factor: f64) -> Term {
    let function = Function::pure(name, move |args| {
        let zoomed = semantics::compose(vec![
            semantics::fast(factor),
            semantics::alt(transformers(args)?),
            semantics::slow(factor),
        ]);
        Ok(zoomed.into())
    });
    Term::value(Some(list_type()), function)
}

/// Sets the channel for the rest of the enclosing block.
fn channel() -> Term {
    let ty = Type::func(Type::Number, Type::Transformer);
    Term::impure(Some(ty), |ctx| {
        let function = Function::new("channel", |args, caller| {
            let [channel] = <[Value; 1]>::try_from(args).map_err(|args| EvalError::WrongArity {
                function: "channel".to_owned(),
                expected: 1,
                found: args.len(),
            })?;
            caller.channel = wrap_channel(channel.into_number()?);
            Ok(T::identity().into())
        })
        .with_arguments(ctx.state().with_literals(NumLitInterpreter::number()));
        Ok(function.into())
    })
}

const ALT_NAMES: [&str; 7] = ["alt0", "alt1", "alt2", "alt3", "alt4", "alt5", "alt6"];
const OUT_NAMES: [&str; 7] = ["out0", "out1", "out2", "out3", "out4", "out5", "out6"];
const IN_NAMES: [&str; 7] = ["in0", "in1", "in2", "in3", "in4", "in5", "in6"];

pub fn global_context() -> BindingContext {
    let mut terms: Vec<(&'static str, Term)> = vec![
        ("i", Term::value(Some(Type::Transformer), T::identity())),
        ("m", Term::value(Some(Type::Transformer), mute())),
        ("do", combinator("do", semantics::compose)),
        ("compose", combinator("compose", semantics::compose)),
        ("stack", combinator("stack", semantics::stack)),
        ("alt", combinator("alt", semantics::alt)),
        ("note", literal_alt("note", |n, state| note(n, state.channel))),
        ("slow", literal_alt("slow", |n, _| semantics::slow(n.max(MIN_SLOW)))),
        ("fast", literal_alt("fast", |n, _| semantics::fast(n.min(MAX_FAST)))),
        ("add", literal_alt("add", |n, _| pitch_map(move |p| p + n))),
        ("sub", literal_alt("sub", |n, _| pitch_map(move |p| p - n))),
        ("chan", literal_alt("chan", |n, _| channel_map(n))),
        ("len", literal_alt("len", |n, _| length_map(n))),
        ("shift", literal_alt("shift", |n, _| semantics::shift(n))),
        ("channel", channel()),
    ];
    for (k, name) in ALT_NAMES.into_iter().enumerate() {
        terms.push((name, alt_with_period(name, 2f64.powi(k as i32))));
    }
    for (k, name) in OUT_NAMES.into_iter().enumerate() {
        terms.push((name, alt_with_zoom(name, 2f64.powi(k as i32))));
    }
    for (k, name) in IN_NAMES.into_iter().enumerate() {
        terms.push((name, alt_with_zoom(name, 2f64.powi(-(k as i32)))));
    }
    terms
        .into_iter()
        .map(|(name, term)| (name.to_owned(), Rc::new(term)))
        .collect()
}
