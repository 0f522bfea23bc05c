//! Line inspector: reads raw IRC lines on stdin and prints the parsed
//! structure, one row per line. Useful for poking at server logs or piped
//! captures without a live connection.

use anyhow::{Context, Result};
use crabwire::{ctcp, parse_line, Line};
use std::io::{self, BufRead, Write};

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for input in stdin.lock().lines() {
        let input = input.context("reading line from stdin")?;
        // Lines on the wire end in CRLF; tolerate a stray CR from raw captures
        let raw = input.strip_suffix('\r').unwrap_or(&input);

        let line = parse_line(raw);
        let line = match ctcp::decorate(&line) {
            Some(derived) => derived,
            None => line,
        };
        writeln!(out, "{}", render(&line)).context("writing to stdout")?;
    }

    Ok(())
}

/// One-row summary of a parsed line.
fn render(line: &Line) -> String {
    let stamp = line.timestamp.format("%H:%M:%S");
    if line.command.is_empty() {
        return format!("[{}] unparsed: {:?}", stamp, line.raw);
    }

    let mut parts = vec![format!("[{}] {}", stamp, line.command)];
    if !line.source.raw.is_empty() {
        let ident = line.source.ident();
        if ident.is_empty() {
            parts.push(format!("from {}", line.source.display()));
        } else {
            parts.push(format!("from {} ({})", line.source.display(), ident));
        }
    }
    if !line.destination.is_empty() {
        parts.push(format!("to {}", line.destination));
    }
    parts.push(format!("args {:?}", line.args));
    parts.join(" ")
}
