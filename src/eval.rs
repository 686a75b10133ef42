use tracing::{debug, trace};

use crate::parse::{Node, Op, Tree};

impl Op {
    /// Plain `f64` arithmetic. Division by zero follows IEEE 754 and yields
    /// an infinity or NaN instead of an error.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Op::Plus => lhs + rhs,
            Op::Minus => lhs - rhs,
            Op::Star => lhs * rhs,
            Op::Slash => lhs / rhs,
        }
    }
}

pub fn evaluate(tree: &Tree) -> f64 {
    debug!("evaluating tree");
    let value = evaluate_subtree(Some(tree.root()));
    debug!(value, "tree evaluated");
    value
}

/// Post-order evaluation of a subtree; an absent subtree counts as zero.
pub fn evaluate_subtree(node: Option<&Node>) -> f64 {
    let Some(node) = node else {
        trace!("absent subtree, returning zero");
        return 0.0;
    };

    match node {
        Node::Operand(digit) => f64::from(*digit),
        Node::Operator { op, left, right } => {
            let lhs = evaluate_subtree(Some(left.as_ref()));
            let rhs = evaluate_subtree(Some(right.as_ref()));
            let value = op.apply(lhs, rhs);
            trace!(%op, lhs, rhs, value, "applied operator");
            value
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::build;

    fn eval(expression: &str) -> f64 {
        evaluate(&build(expression).expect("valid expression"))
    }

    #[test]
    fn operand_is_its_digit() {
        assert_eq!(evaluate_subtree(Some(&Node::Operand(9))), 9.0);
    }

    #[test]
    fn absent_subtree_is_zero() {
        assert_eq!(evaluate_subtree(None), 0.0);
    }

    #[test]
    fn applies_each_operator() {
        assert_eq!(eval("7+2"), 9.0);
        assert_eq!(eval("7-2"), 5.0);
        assert_eq!(eval("7*2"), 14.0);
        assert_eq!(eval("7/2"), 3.5);
    }

    #[test]
    fn respects_the_tree_shape() {
        assert_eq!(eval("(4 + 5 * (7 - 3)) - 2"), 22.0);
        assert_eq!(eval("4+5+7/2"), 12.5);
        assert_eq!(eval("9-3-2"), 4.0);
        assert_eq!(eval("8/2/2"), 2.0);
        assert_eq!(eval("2*(3+4)*5"), 70.0);
    }

    #[test]
    fn hand_built_tree() {
        let node = Node::operator(
            Op::Slash,
            Node::operator(Op::Minus, Node::Operand(1), Node::Operand(7)),
            Node::Operand(4),
        );
        assert_eq!(evaluate_subtree(Some(&node)), -1.5);
    }

    #[test]
    fn division_by_zero_follows_ieee() {
        assert_eq!(eval("1/0"), f64::INFINITY);
        assert_eq!(eval("(0-1)/0"), f64::NEG_INFINITY);
        assert!(eval("0/0").is_nan());
        assert!(eval("1/(2-2)").is_infinite());
    }
}
