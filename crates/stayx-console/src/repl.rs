//! Interactive read-loop
//!
//! Strictly request/response: one line in, zero or more lines out, until a
//! terminal outcome or end-of-input.

use std::io::{BufRead, Write};

use crate::console::Console;

/// Prompt printed before each input line
pub const PROMPT: &str = "(stayx) ";

/// Drive the console until `quit`/`EOF` or end-of-input
///
/// Generic over input and output so tests run against in-memory buffers.
/// End-of-input and `quit` both terminate the loop normally.
///
/// # Errors
///
/// Returns I/O failures on the streams and storage failures from the
/// dispatcher; both are fatal to the session.
pub fn run(
    console: &mut Console,
    mut input: impl BufRead,
    mut output: impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let outcome = console.handle_line(&line)?;
        for printed in &outcome.lines {
            writeln!(output, "{}", printed)?;
        }
        if outcome.quit {
            break;
        }
    }
    Ok(())
}
