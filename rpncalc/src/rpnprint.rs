use crate::parser::RPNExpr;
use std::fmt;

// postfix form, one space between tokens: "3 4 2 * +"
impl fmt::Display for RPNExpr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (idx, token) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}
