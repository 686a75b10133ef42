use std::fmt::Display;

use termtree::Tree as TermTree;

use crate::parse::{Node, Op, Tree};

impl Display for Op {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Prefix notation, e.g. `(+ 1 (* 2 3))`.
impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Operand(digit) => write!(f, "{digit}"),
            Node::Operator { op, left, right } => write!(f, "({op} {left} {right})"),
        }
    }
}

impl Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self.root(), f)
    }
}

pub trait TreeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl TreeConvert for Node {
    fn to_tree_string(&self) -> TermTree<String> {
        match self {
            Node::Operand(digit) => TermTree::new(digit.to_string()),
            Node::Operator { op, left, right } => TermTree::new(op.to_string())
                .with_leaves([left.to_tree_string(), right.to_tree_string()]),
        }
    }
}

impl TreeConvert for Tree {
    fn to_tree_string(&self) -> TermTree<String> {
        self.root().to_tree_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::build;

    #[test]
    fn prefix_notation() {
        let tree = build("(4 + 5 * (7 - 3)) - 2").unwrap();
        assert_eq!(tree.to_string(), "(- (+ 4 (* 5 (- 7 3))) 2)");
        assert_eq!(build("3").unwrap().to_string(), "3");
    }

    #[test]
    fn term_tree_lists_left_before_right() {
        let rendered = build("1+2*3").unwrap().to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "+");
        assert!(lines[1].ends_with("1"));
        assert!(lines[2].ends_with("*"));
        assert!(lines[3].ends_with("2"));
        assert!(lines[4].ends_with("3"));
        assert_eq!(lines.len(), 5);
    }
}
