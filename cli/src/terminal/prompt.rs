use std::io::{self, BufRead, Write};

use anyhow::Context;

/// Asks for one line on stdin. The trailing newline is stripped.
pub fn ask(question: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout();
    write!(stdout, "{question}").context("writing prompt")?;
    stdout.flush().context("flushing prompt")?;

    let mut line = String::new();
    let read = io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading answer from stdin")?;
    if read == 0 {
        anyhow::bail!("stdin closed before '{}' was answered", question.trim_end());
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Returns `given` when present, otherwise prompts for it.
pub fn or_ask(given: Option<String>, question: &str) -> anyhow::Result<String> {
    match given {
        Some(value) => Ok(value),
        None => ask(question),
    }
}
