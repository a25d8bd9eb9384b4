#![deny(warnings)]

use crate::scanner::Scanner;
use std::fmt;
use std::iter::Filter;

static NUMERIC: &[char] = &['0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '.'];
static OPERATORS: &[char] = &['+', '-', '*', '/', '%', '^'];

#[derive(Clone, PartialEq, Debug)]
pub enum ArithToken {
    Number(String), // raw literal text, may carry a leading sign
    Operator(char),
    OParen, CParen,
}

impl fmt::Display for ArithToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArithToken::Number(ref n) => write!(f, "{}", n),
            ArithToken::Operator(op) => write!(f, "{}", op),
            ArithToken::OParen => write!(f, "("),
            ArithToken::CParen => write!(f, ")"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("invalid character detected: '{0}'")]
    InvalidChar(char),
    #[error("missing operand after operator {0}")]
    MissingOperand(char),
    #[error("no valid tokens found in expression")]
    NoTokens,
}

pub fn is_operator(c: char) -> bool {
    OPERATORS.contains(&c)
}

/// Decides whether `op` is a sign rather than a binary operator, based on the
/// token that precedes it. Only `+` and `-` can be unary, and only at the
/// start of input, after `(` or after another operator.
pub fn is_unary(op: char, prev: Option<&ArithToken>) -> bool {
    if op != '+' && op != '-' {
        return false;
    }
    match prev {
        None | Some(ArithToken::OParen) | Some(ArithToken::Operator(_)) => true,
        Some(ArithToken::Number(_)) | Some(ArithToken::CParen) => false,
    }
}

fn visible(c: &char) -> bool {
    !c.is_whitespace()
}

type Visible<I> = Filter<I, fn(&char) -> bool>;

/// Splits arithmetic text into `ArithToken`s. Whitespace is dropped before
/// scanning so it never separates a number.
pub struct ArithTokenizer<I: Iterator<Item=char>> {
    src: Scanner<Visible<I>>,
    prev: Option<ArithToken>,
}

impl<I: Iterator<Item=char>> ArithTokenizer<I> {
    pub fn new(source: I) -> Self {
        let source = source.filter(visible as fn(&char) -> bool);
        ArithTokenizer{src: Scanner::new(source), prev: None}
    }

    // A sign directly in front of a literal is folded into it. In front of
    // '(' or at the end of input it stands alone and the parser checks it.
    fn signed(&mut self, sign: char) -> Result<ArithToken, LexError> {
        if self.src.skip_all(NUMERIC) {
            return Ok(ArithToken::Number(self.src.extract_string()));
        }
        match self.src.peek() {
            Some(c) if is_operator(c) || c == ')' => Err(LexError::MissingOperand(sign)),
            _ => Ok(ArithToken::Operator(sign)),
        }
    }

    fn get_token(&mut self) -> Option<Result<ArithToken, LexError>> {
        let token = match self.src.next()? {
            '(' => Ok(ArithToken::OParen),
            ')' => Ok(ArithToken::CParen),
            c if NUMERIC.contains(&c) => {
                self.src.skip_all(NUMERIC);
                Ok(ArithToken::Number(self.src.extract_string()))
            }
            c if is_unary(c, self.prev.as_ref()) => self.signed(c),
            c if is_operator(c) => Ok(ArithToken::Operator(c)),
            c => Err(LexError::InvalidChar(c)),
        };
        self.src.extract();
        Some(token)
    }
}

impl<I: Iterator<Item=char>> Iterator for ArithTokenizer<I> {
    type Item = Result<ArithToken, LexError>;
    fn next(&mut self) -> Option<Self::Item> {
        let token = self.get_token()?;
        if let Ok(ref t) = token {
            self.prev = Some(t.clone());
        }
        Some(token)
    }
}

/// Tokenize a whole expression, stopping at the first lexical error.
pub fn tokenize(expr: &str) -> Result<Vec<ArithToken>, LexError> {
    let tokens = ArithTokenizer::new(expr.chars()).collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(?tokens, "tokenized {:?}", expr);
    Ok(tokens)
}

///////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{is_unary, tokenize, ArithToken, ArithTokenizer, LexError};

    fn num(n: &str) -> ArithToken { ArithToken::Number(n.to_string()) }
    fn op(o: char) -> ArithToken { ArithToken::Operator(o) }

    #[test]
    fn basic_ops() {
        let tokens = tokenize("3+4*2/(1-5)^2%7").unwrap();
        let expect = vec![
            num("3"), op('+'), num("4"), op('*'), num("2"), op('/'),
            ArithToken::OParen, num("1"), op('-'), num("5"), ArithToken::CParen,
            op('^'), num("2"), op('%'), num("7"),
        ];
        assert_eq!(tokens, expect);
    }

    #[test]
    fn whitespace_is_dropped() {
        assert_eq!(tokenize(" 3 +\t4 ").unwrap(), vec![num("3"), op('+'), num("4")]);
        assert_eq!(tokenize("1 2. 3").unwrap(), vec![num("12.3")]);
        assert_eq!(tokenize("- 5").unwrap(), vec![num("-5")]);
        assert_eq!(tokenize("   ").unwrap(), vec![]);
        assert_eq!(tokenize("").unwrap(), vec![]);
    }

    #[test]
    fn lenient_decimal_points() {
        assert_eq!(tokenize("1.2.3").unwrap(), vec![num("1.2.3")]);
        assert_eq!(tokenize(".5+.").unwrap(), vec![num(".5"), op('+'), num(".")]);
    }

    #[test]
    fn unary_signs() {
        assert_eq!(tokenize("-5").unwrap(), vec![num("-5")]);
        assert_eq!(tokenize("2*-3").unwrap(), vec![num("2"), op('*'), num("-3")]);
        assert_eq!(tokenize("5-3").unwrap(), vec![num("5"), op('-'), num("3")]);
        assert_eq!(tokenize("(3)-2").unwrap(), vec![
            ArithToken::OParen, num("3"), ArithToken::CParen, op('-'), num("2")]);
        let expect = vec![
            op('+'), ArithToken::OParen, num("-2"), ArithToken::CParen,
            op('*'), ArithToken::OParen, num("-3"), ArithToken::CParen,
        ];
        assert_eq!(tokenize("+(-2) * (-3)").unwrap(), expect);
    }

    #[test]
    fn dangling_sign_is_left_for_the_parser() {
        assert_eq!(tokenize("3*-").unwrap(), vec![num("3"), op('*'), op('-')]);
        assert_eq!(tokenize("-").unwrap(), vec![op('-')]);
    }

    #[test]
    fn bad_input() {
        assert_eq!(tokenize("7 & 3"), Err(LexError::InvalidChar('&')));
        assert_eq!(tokenize("x + 1"), Err(LexError::InvalidChar('x')));
        assert_eq!(tokenize("--5"), Err(LexError::MissingOperand('-')));
        assert_eq!(tokenize("2*+*3"), Err(LexError::MissingOperand('+')));
        assert_eq!(tokenize("(-)"), Err(LexError::MissingOperand('-')));
        assert_eq!(tokenize("-&"), Err(LexError::InvalidChar('&')));
    }

    #[test]
    fn iterator_yields_errors_in_order() {
        let mut lx = ArithTokenizer::new("1 # 2".chars());
        assert_eq!(lx.next(), Some(Ok(num("1"))));
        assert_eq!(lx.next(), Some(Err(LexError::InvalidChar('#'))));
    }

    #[test]
    fn unary_context() {
        assert!(is_unary('-', None));
        assert!(is_unary('+', Some(&ArithToken::OParen)));
        assert!(is_unary('-', Some(&op('^'))));
        assert!(!is_unary('-', Some(&num("-3"))));
        assert!(!is_unary('+', Some(&ArithToken::CParen)));
        assert!(!is_unary('*', None));
    }

    #[test]
    fn display() {
        let text = tokenize("-(2.5)").unwrap().iter()
            .map(|t| t.to_string()).collect::<Vec<_>>().join(" ");
        assert_eq!(text, "- ( 2.5 )");
    }
}
