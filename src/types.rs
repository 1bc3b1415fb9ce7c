use std::fmt;

/// The static type of a bound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Number,
    Transformer,
    /// Takes exactly one argument.
    Func { input: Box<Type>, output: Box<Type> },
    /// Takes one or more arguments, all of the same type.
    ListProcessor { input: Box<Type>, output: Box<Type> },
}

impl Type {
    pub fn func(input: Type, output: Type) -> Self {
        Type::Func {
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    pub fn list_processor(input: Type, output: Type) -> Self {
        Type::ListProcessor {
            input: Box::new(input),
            output: Box::new(output),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Number => write!(f, "number"),
            Type::Transformer => write!(f, "transformer"),
            Type::Func { input, output } => write!(f, "func({} -> {})", input, output),
            Type::ListProcessor { input, output } => {
                write!(f, "listProcessor({} -> {})", input, output)
            }
        }
    }
}
