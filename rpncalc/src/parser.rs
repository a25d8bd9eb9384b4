use std::ops::Deref;

use lexers::{is_unary, tokenize, ArithToken, LexError};

use crate::error::CalcError;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("missing operand after unary operator: {0}")]
    MissingUnaryOperand(char),
    #[error("mismatched parentheses detected")]
    MismatchedParens,
    #[error("could not convert infix to postfix notation")]
    EmptyExpression,
}

/// Binding strength of an operator. Signs bind tighter than anything else;
/// among binary operators `^` > `* / %` > `+ -`. All binary operators are
/// treated as left-associative, `^` included, so `2^3^2` is `(2^3)^2`.
pub fn precedence(op: char, unary: bool) -> usize {
    if unary {
        return 4;
    }
    match op {
        '+' | '-' => 1,
        '*' | '/' | '%' => 2,
        '^' => 3,
        _ => 0,
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct RPNExpr(pub Vec<ArithToken>);

impl Deref for RPNExpr {
    type Target = [ArithToken];
    fn deref(&self) -> &[ArithToken] {
        &self.0
    }
}

pub struct ShuntingParser;

impl ShuntingParser {
    pub fn parse_str(expr: &str) -> Result<RPNExpr, CalcError> {
        let tokens = tokenize(expr)?;
        if tokens.is_empty() {
            return Err(LexError::NoTokens.into());
        }
        Ok(Self::parse(&tokens)?)
    }

    pub fn parse(tokens: &[ArithToken]) -> Result<RPNExpr, SyntaxError> {
        let mut out = Vec::new();
        let mut stack: Vec<ArithToken> = Vec::new();
        let mut prev = None;

        for (idx, token) in tokens.iter().enumerate() {
            match *token {
                ArithToken::Number(_) => out.push(token.clone()),
                ArithToken::OParen => stack.push(token.clone()),
                ArithToken::CParen => {
                    // an unmatched ')' empties the stack, the final drain decides
                    while let Some(top) = stack.pop() {
                        if top == ArithToken::OParen {
                            break;
                        }
                        out.push(top);
                    }
                }
                ArithToken::Operator(op) => {
                    let unary = is_unary(op, prev);
                    if unary {
                        match tokens.get(idx + 1) {
                            None | Some(ArithToken::Operator(_)) | Some(ArithToken::CParen) => {
                                return Err(SyntaxError::MissingUnaryOperand(op))
                            }
                            _ => (),
                        }
                    }
                    // operators already stacked are ranked as binary
                    let prec = precedence(op, unary);
                    while let Some(&ArithToken::Operator(top)) = stack.last() {
                        if precedence(top, false) < prec {
                            break;
                        }
                        stack.pop();
                        out.push(ArithToken::Operator(top));
                    }
                    stack.push(token.clone());
                }
            }
            prev = Some(token);
        }
        while let Some(top) = stack.pop() {
            match top {
                ArithToken::OParen | ArithToken::CParen => {
                    return Err(SyntaxError::MismatchedParens)
                }
                token => out.push(token),
            }
        }
        if out.is_empty() {
            return Err(SyntaxError::EmptyExpression);
        }
        let rpn = RPNExpr(out);
        tracing::debug!(%rpn, "converted to postfix");
        Ok(rpn)
    }
}
