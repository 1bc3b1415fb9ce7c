use super::ast::Node;

const INDENT_STEP: usize = 2;

/// Rewrites a tree with canonical spacing: single spaces between
/// horizontal arguments, nothing padding the inside of parentheses, two
/// columns per block level and no blank lines. Names, literals and the shape
/// of the tree are untouched.
pub fn pretty<P: Clone>(node: &Node<P>) -> Node<P> {
    pretty_at(node, 0)
}

/// Same as [`pretty`] for a program from `parse_top_level`, whose implicit
/// block stays at column zero.
pub fn pretty_top_level<P: Clone>(node: &Node<P>) -> Node<P> {
    match node {
        Node::VApp {
            children, payload, ..
        } => Node::VApp {
            children: children.iter().map(|child| pretty_at(child, 0)).collect(),
            indent: 0,
            extra_spaces: vec![String::new(); children.len().saturating_sub(1)],
            payload: payload.clone(),
        },
        other => pretty(other),
    }
}

/// `base` is the column of the line `node` starts on.
fn pretty_at<P: Clone>(node: &Node<P>, base: usize) -> Node<P> {
    match node {
        Node::Name { .. } | Node::NumLit { .. } => node.clone(),
        Node::Paren { child, payload, .. } => Node::Paren {
            child: Box::new(pretty_at(child, base)),
            spaces: [String::new(), String::new()],
            payload: payload.clone(),
        },
        Node::HApp {
            children, payload, ..
        } => Node::HApp {
            children: children.iter().map(|child| pretty_at(child, base)).collect(),
            spaces: vec![" ".to_owned(); children.len().saturating_sub(1)],
            payload: payload.clone(),
        },
        Node::VApp {
            children, payload, ..
        } => {
            let indent = base + INDENT_STEP;
            let children = children
                .iter()
                .enumerate()
                .map(|(i, child)| pretty_at(child, if i == 0 { base } else { indent }))
                .collect::<Vec<_>>();
            Node::VApp {
                extra_spaces: vec![String::new(); children.len().saturating_sub(1)],
                children,
                indent,
                payload: payload.clone(),
            }
        }
    }
}
