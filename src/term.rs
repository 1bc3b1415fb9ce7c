//! Runtime representation of resolved names and tree nodes.

use std::cell::OnceCell;
use std::fmt;
use std::rc::Rc;

use crate::interpreter::{EvalError, IContext, Value};
use crate::types::Type;

type ImpureFn = dyn Fn(&mut IContext) -> Result<Value, EvalError>;

enum Lazy {
    Ready(Value),
    /// Filled the first time the owning node is evaluated.
    Thunk(OnceCell<Value>),
    /// Recomputed against the context on every use.
    Impure(Rc<ImpureFn>),
}

/// A possibly typed, possibly not yet computed value.
///
/// Thunks are evaluated at most once; the result is shared by every node
/// that holds the same `Rc<Term>`.
pub struct Term {
    ty: Option<Type>,
    lazy: Lazy,
}

impl Term {
    pub fn value(ty: Option<Type>, value: impl Into<Value>) -> Self {
        Term {
            ty,
            lazy: Lazy::Ready(value.into()),
        }
    }

    pub fn number(n: f64) -> Self {
        Term::value(None, n)
    }

    pub fn deferred() -> Self {
        Term {
            ty: None,
            lazy: Lazy::Thunk(OnceCell::new()),
        }
    }

    pub fn impure(
        ty: Option<Type>,
        compute: impl Fn(&mut IContext) -> Result<Value, EvalError> + 'static,
    ) -> Self {
        Term {
            ty,
            lazy: Lazy::Impure(Rc::new(compute)),
        }
    }

    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_ref()
    }

    pub fn is_evaluated(&self) -> bool {
        match &self.lazy {
            Lazy::Ready(_) => true,
            Lazy::Thunk(cell) => cell.get().is_some(),
            Lazy::Impure(_) => false,
        }
    }

    pub fn force(&self, ctx: &mut IContext) -> Result<Value, EvalError> {
        match &self.lazy {
            Lazy::Ready(value) => Ok(value.clone()),
            Lazy::Thunk(cell) => cell.get().cloned().ok_or(EvalError::Unevaluated),
            Lazy::Impure(compute) => compute(ctx),
        }
    }

    /// Like [`Term::force`], but an empty thunk is filled by running
    /// `compute` first.
    pub fn force_with(
        &self,
        ctx: &mut IContext,
        compute: impl FnOnce(&mut IContext) -> Result<Value, EvalError>,
    ) -> Result<Value, EvalError> {
        match &self.lazy {
            Lazy::Thunk(cell) => {
                if let Some(value) = cell.get() {
                    return Ok(value.clone());
                }
                let value = compute(ctx)?;
                Ok(cell.get_or_init(|| value).clone())
            }
            _ => self.force(ctx),
        }
    }
}

impl fmt::Debug for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.lazy {
            Lazy::Ready(_) => "ready",
            Lazy::Thunk(cell) if cell.get().is_some() => "evaluated",
            Lazy::Thunk(_) => "deferred",
            Lazy::Impure(_) => "impure",
        };
        f.debug_struct("Term")
            .field("ty", &self.ty)
            .field("state", &state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::{NumLitInterpreter, State};
    use std::cell::Cell;

    fn context() -> IContext {
        IContext::new(State::new(NumLitInterpreter::number()))
    }

    #[test]
    fn ready_terms_are_evaluated() {
        let term = Term::number(3.0);
        assert!(term.is_evaluated());
        let value = term.force(&mut context()).unwrap();
        assert_eq!(value.into_number().unwrap(), 3.0);
    }

    #[test]
    fn thunks_run_at_most_once() {
        let term = Term::deferred();
        let runs = Cell::new(0);
        let mut ctx = context();
        for _ in 0..3 {
            let value = term
                .force_with(&mut ctx, |_| {
                    runs.set(runs.get() + 1);
                    Ok(Value::Number(7.0))
                })
                .unwrap();
            assert_eq!(value.into_number().unwrap(), 7.0);
        }
        assert_eq!(runs.get(), 1);
        assert!(term.is_evaluated());
    }

    #[test]
    fn failed_thunks_stay_empty() {
        let term = Term::deferred();
        let mut ctx = context();
        let err = term
            .force_with(&mut ctx, |_| Err(EvalError::NotCallable("number".into())))
            .unwrap_err();
        assert_eq!(err, EvalError::NotCallable("number".into()));
        assert!(!term.is_evaluated());
        assert_eq!(term.force(&mut ctx).unwrap_err(), EvalError::Unevaluated);
    }

    #[test]
    fn impure_terms_rerun_against_the_context() {
        let term = Term::impure(None, |ctx| Ok(Value::Number(ctx.state().channel as f64)));
        let mut ctx = context();
        assert_eq!(term.force(&mut ctx).unwrap().into_number().unwrap(), 0.0);
        ctx.state_mut().channel = 5;
        assert_eq!(term.force(&mut ctx).unwrap().into_number().unwrap(), 5.0);
        assert!(!term.is_evaluated());
    }
}
