use std::fmt;
use std::rc::Rc;

use crate::parameters::Parameters;
use crate::semantics::Transformer;

use super::EvalError;
use super::context::State;

type Body = dyn Fn(Vec<Value>, &mut State) -> Result<Value, EvalError>;

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Number(f64),
    Transformer(Transformer<Parameters>),
    Function(Function),
}

impl Value {
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Number(_) => "number",
            Value::Transformer(_) => "transformer",
            Value::Function(_) => "function",
        }
    }

    pub fn into_number(self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(n),
            other => Err(EvalError::UnexpectedValue {
                expected: "number",
                found: other.kind(),
            }),
        }
    }

    pub fn into_transformer(self) -> Result<Transformer<Parameters>, EvalError> {
        match self {
            Value::Transformer(transformer) => Ok(transformer),
            other => Err(EvalError::UnexpectedValue {
                expected: "transformer",
                found: other.kind(),
            }),
        }
    }

    pub fn into_function(self) -> Result<Function, EvalError> {
        match self {
            Value::Function(function) => Ok(function),
            other => Err(EvalError::NotCallable(other.kind().to_owned())),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<Transformer<Parameters>> for Value {
    fn from(transformer: Transformer<Parameters>) -> Self {
        Value::Transformer(transformer)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Value::Function(function)
    }
}

/// A callable value.
///
/// The arguments of an application are evaluated in a frame of their own:
/// the function's `arguments` state when it has one, a copy of the caller's
/// state otherwise. The body then runs against the caller's state, which it
/// may update for the rest of the caller's argument list.
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    arguments: Option<State>,
    body: Rc<Body>,
}

impl Function {
    pub fn new(
        name: &str,
        body: impl Fn(Vec<Value>, &mut State) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        Function {
            name: Rc::from(name),
            arguments: None,
            body: Rc::new(body),
        }
    }

    /// A function that leaves the caller's state alone.
    pub fn pure(name: &str, body: impl Fn(Vec<Value>) -> Result<Value, EvalError> + 'static) -> Self {
        Function::new(name, move |args, _| body(args))
    }

    pub fn with_arguments(mut self, state: State) -> Self {
        self.arguments = Some(state);
        self
    }

    pub fn argument_frame(&self, caller: &State) -> State {
        self.arguments.clone().unwrap_or_else(|| caller.clone())
    }

    pub fn call(&self, args: Vec<Value>, caller: &mut State) -> Result<Value, EvalError> {
        (self.body)(args, caller)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish()
    }
}
