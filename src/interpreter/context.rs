use std::fmt;
use std::mem;
use std::rc::Rc;

use super::value::Value;

/// Gives numeric literals their meaning in the current scope.
#[derive(Clone)]
pub struct NumLitInterpreter {
    name: &'static str,
    read: Rc<dyn Fn(f64, &State) -> Value>,
}

impl NumLitInterpreter {
    pub fn new(name: &'static str, read: impl Fn(f64, &State) -> Value + 'static) -> Self {
        NumLitInterpreter {
            name,
            read: Rc::new(read),
        }
    }

    /// Literals stand for themselves.
    pub fn number() -> Self {
        NumLitInterpreter::new("number", |n, _| Value::Number(n))
    }

    pub fn read(&self, literal: f64, state: &State) -> Value {
        (self.read)(literal, state)
    }
}

impl fmt::Debug for NumLitInterpreter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NumLitInterpreter({})", self.name)
    }
}

/// The ambient configuration of one scope.
#[derive(Debug, Clone)]
pub struct State {
    pub literals: NumLitInterpreter,
    pub channel: u8,
}

impl State {
    pub fn new(literals: NumLitInterpreter) -> Self {
        State {
            literals,
            channel: 0,
        }
    }

    pub fn with_literals(&self, literals: NumLitInterpreter) -> Self {
        State {
            literals,
            ..self.clone()
        }
    }
}

/// A stack of scope frames. Only the innermost frame is visible.
///
/// An `IContext` belongs to a single interpretation pass.
#[derive(Debug)]
pub struct IContext {
    current: State,
    outer: Vec<State>,
}

impl IContext {
    pub fn new(state: State) -> Self {
        IContext {
            current: state,
            outer: Vec::new(),
        }
    }

    pub fn state(&self) -> &State {
        &self.current
    }

    pub fn state_mut(&mut self) -> &mut State {
        &mut self.current
    }

    /// Number of frames below the current one.
    pub fn depth(&self) -> usize {
        self.outer.len()
    }

    /// Runs `f` with `frame` pushed, then drops whatever `f` left in it.
    pub fn scoped<T>(&mut self, frame: State, f: impl FnOnce(&mut IContext) -> T) -> T {
        let outer = mem::replace(&mut self.current, frame);
        self.outer.push(outer);
        let result = f(self);
        if let Some(outer) = self.outer.pop() {
            self.current = outer;
        }
        result
    }
}
