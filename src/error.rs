use crate::interpreter::EvalError;
use crate::resolver::ResolveError;
use crate::syntax::ParseError;
use crate::type_checker::TypeError;

/// Any failure between program text and pattern.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error(transparent)]
    Type(#[from] TypeError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub type Result<T> = std::result::Result<T, Error>;
