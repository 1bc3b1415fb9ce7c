//! Concrete syntax tree.
//!
//! A [`Node`] keeps every piece of whitespace the parser consumed, so that
//! printing a parsed tree gives back the exact source text. The payload slot
//! `P` starts out empty ([`Cst`]) and is filled with terms by the resolver.

/// A syntax tree node carrying a payload of type `P`.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<P> {
    /// An identifier.
    Name { value: String, payload: P },
    /// A numeric literal. `raw` is the lexeme as written in the source.
    NumLit { value: f64, raw: String, payload: P },
    /// A parenthesized term. `spaces` hold the text right after `(` and right
    /// before `)`.
    Paren {
        child: Box<Node<P>>,
        spaces: [String; 2],
        payload: P,
    },
    /// Horizontal application: `f a b`. `spaces[i]` sits between
    /// `children[i]` and `children[i + 1]`.
    HApp {
        children: Vec<Node<P>>,
        spaces: Vec<String>,
        payload: P,
    },
    /// Vertical application: the head on one line, the arguments below it at
    /// column `indent`. `extra_spaces[i]` is the text between `children[i]`
    /// and the newline that starts `children[i + 1]`'s line.
    VApp {
        children: Vec<Node<P>>,
        indent: usize,
        extra_spaces: Vec<String>,
        payload: P,
    },
}

/// A freshly parsed tree, before resolution.
pub type Cst = Node<()>;

/// A whole parsed input: the tree plus the whitespace and comments that
/// follow its last token.
#[derive(Debug, Clone, PartialEq)]
pub struct Document<P = ()> {
    pub tree: Node<P>,
    pub trailing: String,
}

impl<P> Document<P> {
    /// A document that ends right after its tree.
    pub fn new(tree: Node<P>) -> Self {
        Document {
            tree,
            trailing: String::new(),
        }
    }
}

impl Node<()> {
    pub fn name(value: impl Into<String>) -> Self {
        Node::Name {
            value: value.into(),
            payload: (),
        }
    }

    pub fn num(value: f64) -> Self {
        Node::NumLit {
            value,
            raw: value.to_string(),
            payload: (),
        }
    }

    pub fn paren(child: Cst) -> Self {
        Node::Paren {
            child: Box::new(child),
            spaces: [String::new(), String::new()],
            payload: (),
        }
    }

    pub fn happ(children: Vec<Cst>) -> Self {
        let spaces = vec![" ".to_owned(); children.len().saturating_sub(1)];
        Node::HApp {
            children,
            spaces,
            payload: (),
        }
    }

    pub fn vapp(children: Vec<Cst>, indent: usize) -> Self {
        let extra_spaces = vec![String::new(); children.len().saturating_sub(1)];
        Node::VApp {
            children,
            indent,
            extra_spaces,
            payload: (),
        }
    }
}

impl<P> Node<P> {
    pub fn payload(&self) -> &P {
        match self {
            Node::Name { payload, .. }
            | Node::NumLit { payload, .. }
            | Node::Paren { payload, .. }
            | Node::HApp { payload, .. }
            | Node::VApp { payload, .. } => payload,
        }
    }

    /// The ordered children of this node. Leaves have none.
    pub fn children(&self) -> &[Node<P>] {
        match self {
            Node::Name { .. } | Node::NumLit { .. } => &[],
            Node::Paren { child, .. } => std::slice::from_ref(child.as_ref()),
            Node::HApp { children, .. } | Node::VApp { children, .. } => children,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Node::Name { .. } => "Name",
            Node::NumLit { .. } => "NumLit",
            Node::Paren { .. } => "Paren",
            Node::HApp { .. } => "HApp",
            Node::VApp { .. } => "VApp",
        }
    }

    /// Rebuilds the tree top-down, computing each node's new payload with
    /// `step` before descending into its children. Shape and whitespace are
    /// kept; the first error aborts the traversal.
    pub fn try_map_payload<Q, E, F>(&self, step: &mut F) -> Result<Node<Q>, E>
    where
        F: FnMut(&Node<P>) -> Result<Q, E>,
    {
        let payload = step(self)?;
        let node = match self {
            Node::Name { value, .. } => Node::Name {
                value: value.clone(),
                payload,
            },
            Node::NumLit { value, raw, .. } => Node::NumLit {
                value: *value,
                raw: raw.clone(),
                payload,
            },
            Node::Paren { child, spaces, .. } => Node::Paren {
                child: Box::new(child.try_map_payload(step)?),
                spaces: spaces.clone(),
                payload,
            },
            Node::HApp {
                children, spaces, ..
            } => Node::HApp {
                children: children
                    .iter()
                    .map(|child| child.try_map_payload(step))
                    .collect::<Result<_, _>>()?,
                spaces: spaces.clone(),
                payload,
            },
            Node::VApp {
                children,
                indent,
                extra_spaces,
                ..
            } => Node::VApp {
                children: children
                    .iter()
                    .map(|child| child.try_map_payload(step))
                    .collect::<Result<_, _>>()?,
                indent: *indent,
                extra_spaces: extra_spaces.clone(),
                payload,
            },
        };
        Ok(node)
    }

    /// Infallible version of [`Node::try_map_payload`].
    pub fn map_payload<Q>(&self, mut step: impl FnMut(&Node<P>) -> Q) -> Node<Q> {
        match self.try_map_payload(&mut |node| Ok::<_, std::convert::Infallible>(step(node))) {
            Ok(node) => node,
            Err(never) => match never {},
        }
    }

    /// Drops the payloads, keeping only the syntax.
    pub fn strip(&self) -> Cst {
        self.map_payload(|_| ())
    }
}
