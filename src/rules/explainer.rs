use crate::engines::generation::ast::Node;
use crate::rules::rule::Rule;

/// Render a tree as a plain-language sentence.
///
/// Walks the tree shape only; nothing is evaluated and no snapshot is needed.
pub fn explain(node: &Node) -> String {
    match node {
        Node::Constant(c) => match c.label() {
            Some(label) => label.to_string(),
            None => format_literal(c.value()),
        },
        Node::Variable(v) => v.description().to_string(),
        Node::Operator(o) => {
            let args: Vec<String> = o.children().map(explain).collect();
            o.primitive().explain(&args)
        }
    }
}

/// One line naming the rule and its purpose, followed by the explained tree
pub fn explain_rule(rule: &Rule) -> String {
    format!(
        "{} ({}): {}",
        rule.name(),
        rule.purpose(),
        explain(rule.root())
    )
}

fn format_literal(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
