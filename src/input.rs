use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Line that ends an interactive paste.
pub const END_MARKER: &str = "END";

/// Text of `path`, or a block pasted on stdin when no path is given.
pub fn read_block(path: Option<&Path>, what: &str) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {} from {}", what, path.display())),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                eprintln!("Paste the {} text, then a line with {} (or Ctrl-D):", what, END_MARKER);
                io::stderr().flush().ok();
            }
            collect_lines(stdin.lock()).with_context(|| format!("reading {} from stdin", what))
        }
    }
}

/// Lines up to EOF or the first line that is exactly [`END_MARKER`].
pub fn collect_lines<R: BufRead>(reader: R) -> io::Result<String> {
    let mut text = String::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim() == END_MARKER {
            break;
        }
        text.push_str(&line);
        text.push('\n');
    }
    Ok(text)
}
