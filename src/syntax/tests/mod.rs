use super::*;


fn name(value: &str) -> Cst {
    Node::name(value)
}

fn num(value: f64) -> Cst {
    Node::num(value)
}

fn vapp(children: Vec<Cst>, indent: usize, extra_spaces: &[&str]) -> Cst {
    Node::VApp {
        children,
        indent,
        extra_spaces: extra_spaces.iter().map(|s| s.to_string()).collect(),
        payload: (),
    }
}

/// Runs a single grammar rule on `text` with a fresh cursor.
fn run_rule(
    rule: fn(&mut ParseState) -> Result<Cst, ParseError>,
    text: &str,
) -> Result<Cst, ParseError> {
    let mut state = ParseState::new(text);
    rule(&mut state)
}
