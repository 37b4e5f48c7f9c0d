//! Fibonacci sequence tool.

use async_trait::async_trait;

use super::{Tool, ToolError};

/// Returns the Fibonacci numbers up to `f_n` as a rendered list.
pub struct FibonacciTool {
    name: String,
    description: String,
    instructions: String,
}

impl FibonacciTool {
    pub fn new() -> Self {
        Self {
            name: "Fibonacci".into(),
            description: "Get the Fibonacci numbers up to f_n.".into(),
            instructions: "Enter a number n.".into(),
        }
    }
}

impl Default for FibonacciTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FibonacciTool {
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
        let n: usize = argument.trim().parse().map_err(|_| {
            ToolError::InvalidArgument("Invalid input. Only numbers are allowed.".into())
        })?;
        let numbers = sequence(n)?;
        let rendered: Vec<String> = numbers.iter().map(u64::to_string).collect();
        Ok(format!("[{}]", rendered.join(", ")))
    }
}

/// The seed pair plus successors up to index `n` (the seed is always
/// present, so `n <= 2` still yields `[0, 1]`).
fn sequence(n: usize) -> Result<Vec<u64>, ToolError> {
    let mut numbers: Vec<u64> = vec![0, 1];
    for i in 2..n {
        let next = numbers[i - 1]
            .checked_add(numbers[i - 2])
            .ok_or_else(|| ToolError::InvalidArgument(format!("n={n} overflows u64")))?;
        numbers.push(next);
    }
    Ok(numbers)
}
