//! Line-oriented prompts on stdin for values not given as flags.

use std::io::{self, BufRead, Write};

use rust_decimal::Decimal;

/// Writes `label` and reads one line, without its trailing newline.
///
/// # Errors
///
/// Returns an error if writing the label or reading the line fails, or if
/// input ends before a line is read.
pub(crate) fn prompt_line<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> io::Result<String> {
    write!(writer, "{label}")?;
    writer.flush()?;

    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("no input for \"{}\"", label.trim_end_matches([':', ' '])),
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Prompts until the answer parses as a decimal.
///
/// # Errors
///
/// Returns an error on I/O failure or end of input.
pub(crate) fn prompt_decimal<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    label: &str,
) -> io::Result<Decimal> {
    loop {
        let answer = prompt_line(reader, writer, label)?;
        match answer.trim().parse::<Decimal>() {
            Ok(value) => return Ok(value),
            Err(_) => writeln!(writer, "\"{}\" is not a number, try again", answer.trim())?,
        }
    }
}

/// Uses `value` if present, otherwise prompts on stdin.
///
/// # Errors
///
/// Returns an error on I/O failure or end of input.
pub(crate) fn value_or_prompt(value: Option<String>, label: &str) -> io::Result<String> {
    match value {
        Some(v) => Ok(v),
        None => prompt_line(&mut io::stdin().lock(), &mut io::stdout(), label),
    }
}
