pub use parser::{precedence, RPNExpr, ShuntingParser, SyntaxError};
pub use rpneval::{evaluate, EvalErr};
pub use error::CalcError;
pub use lexers::{ArithToken, LexError};

pub mod batch;
mod error;
mod parser;
#[cfg(test)]
mod parser_test;

mod rpnprint;
mod rpneval;

/// Tokenize, convert to postfix and evaluate `input` in one go.
///
/// Each call builds its own token sequence and stacks, so repeated or
/// concurrent calls never influence each other.
pub fn evaluate_expression(input: &str) -> Result<f64, CalcError> {
    let rpn = ShuntingParser::parse_str(input)?;
    let value = evaluate(&rpn)?;
    tracing::debug!(input, value, "evaluated");
    Ok(value)
}
