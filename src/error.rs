use std::fmt::Display;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Everything that makes the tree builder reject an expression.
///
/// Each variant carries the text it was built from so that `miette` can
/// point at the offending character.
#[derive(Error, Debug, Diagnostic)]
pub enum ParseError {
    #[error("Unexpected character '{token}'")]
    #[diagnostic(
        code(expreval::invalid_character),
        help("only the digits 0-9, `+ - * /` and parentheses are allowed")
    )]
    InvalidCharacter {
        #[source_code]
        src: NamedSource<String>,

        #[label("this character")]
        bad_bit: SourceSpan,

        token: char,
    },

    #[error("multi-digit number found in the expression")]
    #[diagnostic(
        code(expreval::multi_digit),
        help("only single digit values (0, 1, 2, .., 8, 9) are allowed")
    )]
    MultiDigitNotSupported {
        #[source_code]
        src: NamedSource<String>,

        #[label("these digits are adjacent")]
        bad_bit: SourceSpan,
    },

    #[error("operator '{op}' needs two operands")]
    #[diagnostic(
        code(expreval::insufficient_operands),
        help("every `+ - * /` needs a value on both sides; unary operators are not supported")
    )]
    InsufficientOperands {
        #[source_code]
        src: NamedSource<String>,

        #[label("this operator")]
        bad_bit: SourceSpan,

        op: char,
    },

    #[error("malformed expression: {reason}")]
    #[diagnostic(code(expreval::malformed))]
    MalformedExpression {
        #[source_code]
        src: NamedSource<String>,

        #[label("here")]
        bad_bit: SourceSpan,

        reason: Malformed,
    },

    #[error("expression nests deeper than {limit} levels")]
    #[diagnostic(
        code(expreval::too_deep),
        help("split the expression or raise `Config::max_depth`")
    )]
    TooDeep {
        #[source_code]
        src: NamedSource<String>,

        #[label("the limit is crossed by this operator")]
        bad_bit: SourceSpan,

        limit: usize,
    },
}

/// Why an expression was classified as malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    Empty,
    UnclosedGroup,
    NoOperands,
    LeftoverOperands(usize),
}

impl Display for Malformed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Malformed::Empty => write!(f, "the expression is empty"),
            Malformed::UnclosedGroup => write!(f, "opening parenthesis is never closed"),
            Malformed::NoOperands => write!(f, "the expression contains no operands"),
            Malformed::LeftoverOperands(n) => {
                write!(f, "{n} operands are left without an operator joining them")
            }
        }
    }
}

/// The category of a [`ParseError`], without its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidCharacter,
    MultiDigitNotSupported,
    InsufficientOperands,
    MalformedExpression,
    TooDeep,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::InvalidCharacter => write!(f, "InvalidCharacter"),
            ErrorKind::MultiDigitNotSupported => write!(f, "MultiDigitNotSupported"),
            ErrorKind::InsufficientOperands => write!(f, "InsufficientOperands"),
            ErrorKind::MalformedExpression => write!(f, "MalformedExpression"),
            ErrorKind::TooDeep => write!(f, "TooDeep"),
        }
    }
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            ParseError::MultiDigitNotSupported { .. } => ErrorKind::MultiDigitNotSupported,
            ParseError::InsufficientOperands { .. } => ErrorKind::InsufficientOperands,
            ParseError::MalformedExpression { .. } => ErrorKind::MalformedExpression,
            ParseError::TooDeep { .. } => ErrorKind::TooDeep,
        }
    }

    /// Byte offset into the expression where the error was detected.
    pub fn offset(&self) -> usize {
        self.span().offset()
    }

    /// 1-based column of [`ParseError::offset`], counted in characters.
    pub fn column(&self) -> usize {
        let src = self.src().inner();
        src[..self.offset().min(src.len())].chars().count() + 1
    }

    fn span(&self) -> SourceSpan {
        match self {
            ParseError::InvalidCharacter { bad_bit, .. }
            | ParseError::MultiDigitNotSupported { bad_bit, .. }
            | ParseError::InsufficientOperands { bad_bit, .. }
            | ParseError::MalformedExpression { bad_bit, .. }
            | ParseError::TooDeep { bad_bit, .. } => *bad_bit,
        }
    }

    fn src(&self) -> &NamedSource<String> {
        match self {
            ParseError::InvalidCharacter { src, .. }
            | ParseError::MultiDigitNotSupported { src, .. }
            | ParseError::InsufficientOperands { src, .. }
            | ParseError::MalformedExpression { src, .. }
            | ParseError::TooDeep { src, .. } => src,
        }
    }
}
