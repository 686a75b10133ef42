use std::fmt::Display;

use miette::{NamedSource, SourceSpan};

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token in the original, unstripped input.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    LeftParen,
    RightParen,
    Minus,
    Plus,
    Star,
    Slash,
    Digit(u8),
}

impl TokenKind {
    pub fn symbol(&self) -> char {
        match self {
            TokenKind::LeftParen => '(',
            TokenKind::RightParen => ')',
            TokenKind::Minus => '-',
            TokenKind::Plus => '+',
            TokenKind::Star => '*',
            TokenKind::Slash => '/',
            TokenKind::Digit(d) => char::from(b'0' + d),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.kind.symbol();
        match self.kind {
            TokenKind::LeftParen => write!(f, "LEFT_PAREN {lit}"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN {lit}"),
            TokenKind::Minus => write!(f, "MINUS {lit}"),
            TokenKind::Plus => write!(f, "PLUS {lit}"),
            TokenKind::Star => write!(f, "STAR {lit}"),
            TokenKind::Slash => write!(f, "SLASH {lit}"),
            TokenKind::Digit(d) => write!(f, "DIGIT {lit} {d}"),
        }
    }
}

/// Splits an expression into single character tokens.
///
/// Whitespace is skipped, so the token stream is the same as the one of the
/// expression with all whitespace removed. Offsets still refer to the
/// original text.
pub struct Lexer<'de> {
    filename: Option<&'de str>,
    whole: &'de str,
    rest: &'de str,
    byte: usize,
}

impl<'de> Lexer<'de> {
    pub fn new(filename: Option<&'de str>, input: &'de str) -> Self {
        Lexer {
            filename,
            whole: input,
            rest: input,
            byte: 0,
        }
    }

    pub fn whole(&self) -> &'de str {
        self.whole
    }

    pub(crate) fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.filename.unwrap_or("<input>"), self.whole.to_string())
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let c = chars.next()?;
            let offset = self.byte;
            self.rest = chars.as_str();
            self.byte += c.len_utf8();

            let kind = match c {
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '-' => TokenKind::Minus,
                '+' => TokenKind::Plus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '0'..='9' => TokenKind::Digit(c as u8 - b'0'),
                c if c.is_whitespace() => continue,
                c => {
                    return Some(Err(ParseError::InvalidCharacter {
                        src: self.named_source(),
                        bad_bit: SourceSpan::from(offset..self.byte),
                        token: c,
                    }));
                }
            };

            return Some(Ok(Token { kind, offset }));
        }
    }
}
