use lexers::ArithToken;
use crate::parser::RPNExpr;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErr {
    #[error("missing operand for unary operator: {0}")]
    MissingUnaryOperand(char),
    #[error("insufficient operands for binary operator: {0}")]
    InsufficientOperands(char),
    #[error("division by zero")]
    DivisionByZero,
    #[error("modulo by zero")]
    ModuloByZero,
    #[error("invalid numeric token: {0}")]
    BadNumber(String),
    #[error("unexpected token in postfix expression: {0}")]
    BadToken(String),
    #[error("evaluation left an unexpected number of values on the stack: {0}")]
    StackSize(usize),
}

// Length of the run of ASCII digits at the start of bytes
fn digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

// Longest prefix of the literal that reads as a number, so "1.2.3" is 1.2.
// Scanned once: [+-]? digits* (. digits*)? ([eE] [+-]? digits+)?
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let int_len = digits(&bytes[end..]);
    end += int_len;
    let mut frac_len = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_len = digits(&bytes[end + 1..]);
        end += 1 + frac_len;
    }
    if int_len + frac_len == 0 {
        return "";
    }
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let sign = usize::from(matches!(bytes.get(end + 1), Some(b'+') | Some(b'-')));
        let exp_len = digits(bytes.get(end + 1 + sign..).unwrap_or(&[]));
        if exp_len > 0 {
            end += 1 + sign + exp_len;
        }
    }
    &text[..end]
}

fn parse_number(text: &str) -> Option<f64> {
    match numeric_prefix(text) {
        "" => None,
        prefix => prefix.parse::<f64>().ok(),
    }
}

fn apply(op: char, l: f64, r: f64) -> Result<f64, EvalErr> {
    match op {
        '+' => Ok(l + r),
        '-' => Ok(l - r),
        '*' => Ok(l * r),
        '/' if r == 0.0 => Err(EvalErr::DivisionByZero),
        '/' => Ok(l / r),
        '%' => {
            // integer modulo, fractional parts are dropped first
            let (l, r) = (l.trunc() as i64, r.trunc() as i64);
            if r == 0 {
                return Err(EvalErr::ModuloByZero);
            }
            Ok(l.wrapping_rem(r) as f64)
        }
        '^' => Ok(l.powf(r)),
        _ => Err(EvalErr::BadToken(op.to_string())),
    }
}

/// Run a postfix expression over a value stack.
///
/// Whether `+`/`-` are signs is decided here by how many values are
/// available: with a single value on the stack they act as identity and
/// negation, with two or more they are binary.
pub fn evaluate(rpn: &RPNExpr) -> Result<f64, EvalErr> {
    let mut operands: Vec<f64> = Vec::new();

    for token in rpn.iter() {
        match *token {
            ArithToken::Number(ref text) => {
                let value = parse_number(text).ok_or_else(|| EvalErr::BadNumber(text.clone()))?;
                operands.push(value);
            }
            ArithToken::Operator(op) => {
                let value = match (operands.pop(), operands.pop()) {
                    (Some(r), Some(l)) => apply(op, l, r)?,
                    (Some(v), None) if op == '+' => v,
                    (Some(v), None) if op == '-' => -v,
                    (None, _) if op == '+' || op == '-' => {
                        return Err(EvalErr::MissingUnaryOperand(op))
                    }
                    _ => return Err(EvalErr::InsufficientOperands(op)),
                };
                operands.push(value);
            }
            ArithToken::OParen | ArithToken::CParen => {
                return Err(EvalErr::BadToken(token.to_string()))
            }
        }
        tracing::trace!(%token, ?operands, "stack");
    }
    match operands[..] {
        [value] => Ok(value),
        _ => Err(EvalErr::StackSize(operands.len())),
    }
}

impl RPNExpr {
    pub fn eval(&self) -> Result<f64, EvalErr> {
        evaluate(self)
    }
}
