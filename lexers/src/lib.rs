mod scanner;
mod arith_tokenizer;

pub use scanner::Scanner;
pub use arith_tokenizer::{ArithTokenizer, ArithToken, LexError};
pub use arith_tokenizer::{is_operator, is_unary, tokenize};
