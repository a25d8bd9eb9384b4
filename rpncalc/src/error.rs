use lexers::LexError;

use crate::parser::SyntaxError;
use crate::rpneval::EvalErr;

/// Failure of one evaluation, tagged with the pipeline stage that gave up.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum CalcError {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),
    #[error("eval error: {0}")]
    Eval(#[from] EvalErr),
}

impl CalcError {
    pub fn stage(&self) -> &'static str {
        match *self {
            CalcError::Lex(_) => "lex",
            CalcError::Syntax(_) => "syntax",
            CalcError::Eval(_) => "eval",
        }
    }
}
