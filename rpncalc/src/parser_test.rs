use crate::error::CalcError;
use crate::parser::{precedence, ShuntingParser, SyntaxError};
use lexers::{ArithToken, LexError};

fn num(n: &str) -> ArithToken { ArithToken::Number(n.to_string()) }
fn op(o: char) -> ArithToken { ArithToken::Operator(o) }

#[test]
fn test_parse1() {
    let rpn = ShuntingParser::parse_str("3+4*2/(1-5)^2^3").unwrap();
    let expect = [
        num("3"),
        num("4"),
        num("2"),
        op('*'),
        num("1"),
        num("5"),
        op('-'),
        num("2"),
        op('^'),
        num("3"),
        op('^'),
        op('/'),
        op('+'),
    ];
    assert_eq!(rpn.len(), expect.len());
    for (i, token) in expect.iter().enumerate() {
        assert_eq!(rpn[i], *token);
    }
}

#[test]
fn test_parse2() {
    let rpn = ShuntingParser::parse_str("8 - (5 - 2) % 3").unwrap();
    assert_eq!(rpn.to_string(), "8 5 2 - 3 % -");
}

#[test]
fn power_is_left_associative() {
    let rpn = ShuntingParser::parse_str("2 ^ 3 ^ 2").unwrap();
    assert_eq!(rpn.to_string(), "2 3 ^ 2 ^");
}

#[test]
fn unary_operators() {
    let rpn = ShuntingParser::parse_str("+(-2) * (-3)").unwrap();
    assert_eq!(rpn.to_string(), "-2 -3 * +");

    let rpn = ShuntingParser::parse_str("-(2)^2").unwrap();
    assert_eq!(rpn.to_string(), "2 2 ^ -");

    let rpn = ShuntingParser::parse_str("-(1)+3").unwrap();
    assert_eq!(rpn.to_string(), "1 - 3 +");

    // signed literals never look like operators
    let rpn = ShuntingParser::parse_str("2 * -3 - 1").unwrap();
    assert_eq!(rpn.to_string(), "2 -3 * 1 -");
}

#[test]
fn unary_rule_matches_tokenizer() {
    // token sequences that the tokenizer would not produce still go
    // through the same unary checks
    let tokens = [op('-'), op('-'), num("3")];
    assert_eq!(ShuntingParser::parse(&tokens), Err(SyntaxError::MissingUnaryOperand('-')));

    let tokens = [ArithToken::OParen, op('+'), ArithToken::CParen];
    assert_eq!(ShuntingParser::parse(&tokens), Err(SyntaxError::MissingUnaryOperand('+')));

    let tokens = [num("1"), op('-'), num("3")];
    assert_eq!(ShuntingParser::parse(&tokens).unwrap().to_string(), "1 3 -");
}

#[test]
fn bad_parse() {
    let rpn = ShuntingParser::parse_str("2 * (4 + 3 - 1");
    assert_eq!(rpn, Err(CalcError::Syntax(SyntaxError::MismatchedParens)));

    let rpn = ShuntingParser::parse_str("((1)");
    assert_eq!(rpn, Err(CalcError::Syntax(SyntaxError::MismatchedParens)));

    let rpn = ShuntingParser::parse_str("3*-");
    assert_eq!(rpn, Err(CalcError::Syntax(SyntaxError::MissingUnaryOperand('-'))));

    let rpn = ShuntingParser::parse_str("()");
    assert_eq!(rpn, Err(CalcError::Syntax(SyntaxError::EmptyExpression)));

    let rpn = ShuntingParser::parse_str("  ");
    assert_eq!(rpn, Err(CalcError::Lex(LexError::NoTokens)));
}

#[test]
fn stray_closing_paren_is_tolerated() {
    let rpn = ShuntingParser::parse_str("1 + 2)").unwrap();
    assert_eq!(rpn.to_string(), "1 2 +");
}

#[test]
fn check_precedence() {
    assert_eq!(precedence('+', false), precedence('-', false));
    assert!(precedence('*', false) > precedence('+', false));
    assert_eq!(precedence('%', false), precedence('/', false));
    assert!(precedence('^', false) > precedence('*', false));
    assert!(precedence('-', true) > precedence('^', false));
    assert_eq!(precedence('+', true), 4);
}
