use std::collections::HashMap;
use std::rc::Rc;

use crate::syntax::{Cst, Node};
use crate::term::Term;

/// The names visible to a program.
pub type BindingContext = HashMap<String, Rc<Term>>;

/// A syntax tree whose nodes carry their runtime terms.
pub type Abt = Node<Rc<Term>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("Could not resolve variable {0}")]
    UnboundVariable(String),
}

/// Attaches a term to every node of `node`. Names share the term they are
/// bound to; literals get their number; every other node gets an empty thunk
/// that evaluation fills in. Nothing is evaluated here.
pub fn resolve(context: &BindingContext, node: &Cst) -> Result<Abt, ResolveError> {
    node.try_map_payload(&mut |node: &Cst| match node {
        Node::Name { value, .. } => context
            .get(value)
            .cloned()
            .ok_or_else(|| ResolveError::UnboundVariable(value.clone())),
        Node::NumLit { value, .. } => Ok(Rc::new(Term::number(*value))),
        Node::Paren { .. } | Node::HApp { .. } | Node::VApp { .. } => Ok(Rc::new(Term::deferred())),
    })
}
