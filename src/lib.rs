pub mod config;
pub mod display;
pub mod error;
pub mod eval;
pub mod lex;
pub mod parse;
pub mod selftest;

pub use config::Config;
pub use error::{ErrorKind, ParseError};
pub use lex::Lexer;
pub use parse::{Node, Op, Tree, TreeBuilder};

use tracing::instrument;

/// Builds the tree of `expression` without evaluating it.
pub fn compile(expression: &str, config: &Config) -> Result<Tree, ParseError> {
    TreeBuilder::new(None, expression)
        .with_config(*config)
        .build()
}

/// Builds the tree of `expression` and evaluates it.
///
/// ```
/// assert_eq!(expreval::compile_and_evaluate("4+5+7/2").unwrap(), 12.5);
/// assert_eq!(
///     expreval::compile_and_evaluate("10+1").unwrap_err().kind(),
///     expreval::ErrorKind::MultiDigitNotSupported,
/// );
/// ```
pub fn compile_and_evaluate(expression: &str) -> Result<f64, ParseError> {
    compile_and_evaluate_with(expression, &Config::default())
}

#[instrument(level = "debug", skip(config))]
pub fn compile_and_evaluate_with(expression: &str, config: &Config) -> Result<f64, ParseError> {
    let tree = compile(expression, config)?;
    Ok(eval::evaluate(&tree))
}
