use std::fmt;

use super::ast::{Document, Node};

/// Writes the node back as source text, whitespace included.
impl<P> fmt::Display for Node<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Name { value, .. } => f.write_str(value),
            Node::NumLit { raw, .. } => f.write_str(raw),
            Node::Paren { child, spaces, .. } => {
                write!(f, "({}{}{})", spaces[0], child, spaces[1])
            }
            Node::HApp {
                children, spaces, ..
            } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(spaces.get(i - 1).map_or(" ", String::as_str))?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Node::VApp {
                children,
                indent,
                extra_spaces,
                ..
            } => {
                let mut children = children.iter();
                if let Some(head) = children.next() {
                    write!(f, "{}", head)?;
                }
                for (i, child) in children.enumerate() {
                    let extra = extra_spaces.get(i).map_or("", String::as_str);
                    write!(f, "{}\n{:indent$}{}", extra, "", child, indent = *indent)?;
                }
                Ok(())
            }
        }
    }
}

impl<P> fmt::Display for Document<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tree, self.trailing)
    }
}

pub fn print<P>(document: &Document<P>) -> String {
    document.to_string()
}

/// Prints a program parsed with `parse_top_level`: the implicit `do` head is
/// left out and the first extra space is the text before the first line.
pub fn print_top_level<P>(document: &Document<P>) -> String {
    let Node::VApp {
        children,
        indent,
        extra_spaces,
        ..
    } = &document.tree
    else {
        return document.to_string();
    };
    let mut out = String::new();
    for (i, child) in children.iter().enumerate().skip(1) {
        out.push_str(extra_spaces.get(i - 1).map_or("", String::as_str));
        if i > 1 {
            out.push('\n');
            out.push_str(&" ".repeat(*indent));
        }
        out.push_str(&child.to_string());
    }
    out.push_str(&document.trailing);
    out
}
