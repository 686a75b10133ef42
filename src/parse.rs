use miette::SourceSpan;
use tracing::{debug, trace};

use crate::{
    Config, Lexer,
    error::{Malformed, ParseError},
    lex::{Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Plus,
    Minus,
    Star,
    Slash,
}

/// Binding strength of a binary operator. Later variants bind tighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    AddSub,
    MulDiv,
}

impl Op {
    pub fn precedence(self) -> Precedence {
        match self {
            Op::Plus | Op::Minus => Precedence::AddSub,
            Op::Star | Op::Slash => Precedence::MulDiv,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Minus => '-',
            Op::Star => '*',
            Op::Slash => '/',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Operand(u8),
    Operator {
        op: Op,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    pub fn operator(op: Op, left: Node, right: Node) -> Self {
        Node::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Number of nodes on the longest path from this node to a leaf.
    pub fn height(&self) -> usize {
        match self {
            Node::Operand(_) => 1,
            Node::Operator { left, right, .. } => 1 + left.height().max(right.height()),
        }
    }
}

/// A finished expression tree. Only [`TreeBuilder`] creates one, so it never
/// holds a group marker or a missing child.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    root: Node,
}

impl Tree {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn height(&self) -> usize {
        self.root.height()
    }
}

/// An entry of the operator stack.
#[derive(Debug, Clone, Copy)]
enum Pending {
    Operator { op: Op, offset: usize },
    /// An open parenthesis. Stops reductions, never becomes a node.
    Group { offset: usize },
}

#[derive(Debug)]
struct Subtree {
    node: Node,
    height: usize,
}

/// Operator-precedence parser that builds a [`Tree`] with two explicit
/// stacks: completed subtrees and pending operators.
pub struct TreeBuilder<'de> {
    lexer: Lexer<'de>,
    config: Config,
    operands: Vec<Subtree>,
    operators: Vec<Pending>,
}

impl<'de> TreeBuilder<'de> {
    pub fn new(filename: Option<&'de str>, whole: &'de str) -> Self {
        TreeBuilder {
            lexer: Lexer::new(filename, whole),
            config: Config::default(),
            operands: Vec::new(),
            operators: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(mut self) -> Result<Tree, ParseError> {
        let whole = self.lexer.whole();
        debug!(expression = whole, "building tree");

        if whole.chars().all(char::is_whitespace) {
            return Err(self.malformed(Malformed::Empty, 0..whole.len()));
        }

        let mut previous: Option<Token> = None;
        while let Some(token) = self.lexer.next() {
            let token = token?;
            trace!(%token, "parser saw");

            match token.kind {
                TokenKind::LeftParen => self.operators.push(Pending::Group {
                    offset: token.offset,
                }),
                TokenKind::Digit(digit) => {
                    if let Some(prev @ Token {
                        kind: TokenKind::Digit(_),
                        ..
                    }) = previous
                    {
                        return Err(ParseError::MultiDigitNotSupported {
                            src: self.lexer.named_source(),
                            bad_bit: SourceSpan::from(prev.offset..token.offset + 1),
                        });
                    }
                    self.operands.push(Subtree {
                        node: Node::Operand(digit),
                        height: 1,
                    });
                }
                TokenKind::RightParen => {
                    while let Some(&Pending::Operator { op, offset }) = self.operators.last() {
                        self.operators.pop();
                        self.reduce(op, offset)?;
                    }
                    // an unmatched `)` has no marker to discard
                    if let Some(Pending::Group { .. }) = self.operators.last() {
                        self.operators.pop();
                    }
                }
                TokenKind::Plus => self.push_operator(Op::Plus, token, previous)?,
                TokenKind::Minus => self.push_operator(Op::Minus, token, previous)?,
                TokenKind::Star => self.push_operator(Op::Star, token, previous)?,
                TokenKind::Slash => self.push_operator(Op::Slash, token, previous)?,
            }

            previous = Some(token);
        }

        debug!(
            pending = self.operators.len(),
            "input consumed, draining the operator stack"
        );

        while let Some(pending) = self.operators.pop() {
            match pending {
                Pending::Operator { op, offset } => self.reduce(op, offset)?,
                Pending::Group { offset } => {
                    return Err(self.malformed(Malformed::UnclosedGroup, offset..offset + 1));
                }
            }
        }

        let leftover = self.operands.len();
        match (self.operands.pop(), leftover) {
            (Some(root), 1) => Ok(Tree { root: root.node }),
            (None, _) => Err(self.malformed(Malformed::NoOperands, 0..whole.len())),
            (Some(_), n) => Err(self.malformed(Malformed::LeftoverOperands(n), 0..whole.len())),
        }
    }

    fn push_operator(
        &mut self,
        op: Op,
        token: Token,
        previous: Option<Token>,
    ) -> Result<(), ParseError> {
        // a binary operator must follow a complete operand
        if !matches!(
            previous.map(|t| t.kind),
            Some(TokenKind::Digit(_) | TokenKind::RightParen)
        ) {
            return Err(self.insufficient(op, token.offset));
        }

        // ties reduce the left operator first
        while let Some(&Pending::Operator { op: top, offset }) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.operators.pop();
            self.reduce(top, offset)?;
        }

        self.operators.push(Pending::Operator {
            op,
            offset: token.offset,
        });
        Ok(())
    }

    fn reduce(&mut self, op: Op, offset: usize) -> Result<(), ParseError> {
        let (Some(right), Some(left)) = (self.operands.pop(), self.operands.pop()) else {
            return Err(self.insufficient(op, offset));
        };

        let height = 1 + left.height.max(right.height);
        if height > self.config.max_depth {
            return Err(ParseError::TooDeep {
                src: self.lexer.named_source(),
                bad_bit: SourceSpan::from(offset..offset + 1),
                limit: self.config.max_depth,
            });
        }

        trace!(%op, height, "reduce");
        self.operands.push(Subtree {
            node: Node::operator(op, left.node, right.node),
            height,
        });
        Ok(())
    }

    fn insufficient(&self, op: Op, offset: usize) -> ParseError {
        ParseError::InsufficientOperands {
            src: self.lexer.named_source(),
            bad_bit: SourceSpan::from(offset..offset + 1),
            op: op.symbol(),
        }
    }

    fn malformed(&self, reason: Malformed, span: std::ops::Range<usize>) -> ParseError {
        ParseError::MalformedExpression {
            src: self.lexer.named_source(),
            bad_bit: SourceSpan::from(span),
            reason,
        }
    }
}

/// Builds the tree of `expression` with the default [`Config`].
pub fn build(expression: &str) -> Result<Tree, ParseError> {
    TreeBuilder::new(None, expression).build()
}
