//! Arithmetic tool over a whitelisted expression grammar.
//!
//! Accepts only digits and `+ - * /` (no spaces, no parentheses). The
//! expression is tokenized and parsed with ordinary precedence rather than
//! handed to any general-purpose evaluator.

use async_trait::async_trait;

use super::{Tool, ToolError};

const ALLOWED: &str = "0123456789+-*/";

/// Evaluates simple arithmetic expressions.
pub struct MathTool {
    name: String,
    description: String,
    instructions: String,
}

impl MathTool {
    pub fn new() -> Self {
        Self {
            name: "Math".into(),
            description:
                "Evaluate a math expression. Note: only numbers and basic operators (e.g. +-*/) are allowed."
                    .into(),
            instructions: "Enter a math expression.".into(),
        }
    }
}

impl Default for MathTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MathTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn instructions(&self) -> &str {
        &self.instructions
    }

    async fn invoke(&self, argument: &str) -> Result<String, ToolError> {
        let value = evaluate(argument)?;
        Ok(format_number(value))
    }
}

/// Render whole results without a fractional part: `4`, not `4.0`.
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Validate, tokenize, parse, and evaluate an expression.
pub fn evaluate(input: &str) -> Result<f64, ToolError> {
    for c in input.chars() {
        if !ALLOWED.contains(c) {
            return Err(ToolError::InvalidArgument(
                "Invalid input. Only numbers and math operators (+-*/) are allowed.".into(),
            ));
        }
    }
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let value = parser.expression()?;
    if parser.pos != parser.tokens.len() {
        return Err(ToolError::InvalidArgument(
            "Invalid expression: trailing input.".into(),
        ));
    }
    Ok(value)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
}

fn tokenize(input: &str) -> Result<Vec<Token>, ToolError> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                tokens.push(Token::Plus);
                i += 1;
            }
            b'-' => {
                tokens.push(Token::Minus);
                i += 1;
            }
            b'*' => {
                tokens.push(Token::Star);
                i += 1;
            }
            b'/' => {
                tokens.push(Token::Slash);
                i += 1;
            }
            b'0'..=b'9' => {
                let start = i;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
                let literal = &input[start..i];
                let value = literal.parse::<f64>().map_err(|_| {
                    ToolError::InvalidArgument(format!("Invalid number: {literal}"))
                })?;
                tokens.push(Token::Number(value));
            }
            other => {
                // Charset check makes this unreachable, but fail closed.
                return Err(ToolError::InvalidArgument(format!(
                    "Unexpected character: {}",
                    other as char
                )));
            }
        }
    }
    if tokens.is_empty() {
        return Err(ToolError::InvalidArgument("Empty expression.".into()));
    }
    Ok(tokens)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    // expression := term (('+' | '-') term)*
    fn expression(&mut self) -> Result<f64, ToolError> {
        let mut value = self.term()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Plus => {
                    self.pos += 1;
                    value += self.term()?;
                }
                Token::Minus => {
                    self.pos += 1;
                    value -= self.term()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // term := factor (('*' | '/') factor)*
    fn term(&mut self) -> Result<f64, ToolError> {
        let mut value = self.factor()?;
        while let Some(op) = self.peek() {
            match op {
                Token::Star => {
                    self.pos += 1;
                    value *= self.factor()?;
                }
                Token::Slash => {
                    self.pos += 1;
                    let divisor = self.factor()?;
                    if divisor == 0.0 {
                        return Err(ToolError::InvalidArgument("Division by zero.".into()));
                    }
                    value /= divisor;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    // factor := '-'* number
    fn factor(&mut self) -> Result<f64, ToolError> {
        match self.peek() {
            Some(Token::Minus) => {
                self.pos += 1;
                Ok(-self.factor()?)
            }
            Some(Token::Number(value)) => {
                self.pos += 1;
                Ok(value)
            }
            _ => Err(ToolError::InvalidArgument(
                "Invalid expression: expected a number.".into(),
            )),
        }
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn evaluates_addition() {
        let tool = MathTool::new();
        assert_eq!(tool.invoke("2+2").await.unwrap(), "4");
    }

    #[tokio::test]
    async fn division_keeps_fractions() {
        let tool = MathTool::new();
        assert_eq!(tool.invoke("7/2").await.unwrap(), "3.5");
    }

    #[test]
    fn multiplication_binds_tighter() {
        assert_eq!(evaluate("2+3*4").unwrap(), 14.0);
        assert_eq!(evaluate("20-6/3").unwrap(), 18.0);
    }

    #[test]
    fn unary_minus() {
        assert_eq!(evaluate("-3+5").unwrap(), 2.0);
        assert_eq!(evaluate("2*-3").unwrap(), -6.0);
    }

    #[test]
    fn left_to_right_same_precedence() {
        assert_eq!(evaluate("8/2/2").unwrap(), 2.0);
        assert_eq!(evaluate("10-3-2").unwrap(), 5.0);
    }

    #[tokio::test]
    async fn rejects_disallowed_characters() {
        let tool = MathTool::new();
        for bad in ["2 + 2", "import", "(1+2)", "2^3"] {
            let err = tool.invoke(bad).await.unwrap_err();
            assert!(err.to_string().contains("Only numbers"), "input {bad:?}");
        }
    }

    #[test]
    fn rejects_division_by_zero() {
        let err = evaluate("1/0").unwrap_err();
        assert!(err.to_string().contains("zero"));
    }

    #[test]
    fn rejects_dangling_operator() {
        assert!(evaluate("2+").is_err());
        assert!(evaluate("*2").is_err());
        assert!(evaluate("").is_err());
    }

    #[test]
    fn whole_results_render_as_integers() {
        assert_eq!(format_number(4.0), "4");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(3.5), "3.5");
    }
}
