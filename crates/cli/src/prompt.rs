//! Interactive delete confirmation

use std::io::{BufRead, Write};
use thiserror::Error;
use tr_core::DeleteRequest;

#[derive(Debug, Error)]
pub enum PromptError {
    /// The user declined, or input ended without an answer
    #[error("{0}")]
    Canceled(String),

    #[error("failed to read confirmation: {0}")]
    Io(#[from] std::io::Error),
}

/// Ask for confirmation until the user answers `y` or `n`
pub fn confirm<R, W>(
    request: &DeleteRequest,
    namespace: &str,
    input: &mut R,
    out: &mut W,
) -> Result<(), PromptError>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{}", request.confirmation_prompt(namespace))?;
    out.flush()?;

    let mut line = String::new();
    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "y" => return Ok(()),
            "n" => break,
            _ => {
                write!(out, "Please enter (y/n): ")?;
                out.flush()?;
            }
        }
    }

    Err(PromptError::Canceled(request.cancel_message()))
}
