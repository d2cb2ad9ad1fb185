use std::io::{self, BufRead, Write};

use crate::error::{AppError, AppResult};

/// Prints `label` and reads one trimmed line from stdin.
///
/// The read happens on a blocking task so a pending Ctrl-C can still be observed.
pub async fn prompt_line(label: &str) -> AppResult<String> {
    let label = label.to_string();
    tokio::task::spawn_blocking(move || {
        let stdin = io::stdin();
        read_prompted(&label, &mut stdin.lock(), &mut io::stdout())
    })
    .await
    .map_err(|err| AppError::Input(format!("input task failed: {err}")))?
}

fn read_prompted<R, W>(label: &str, reader: &mut R, writer: &mut W) -> AppResult<String>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{label}")?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Err(AppError::Input("standard input closed".to_string()));
    }
    Ok(input.trim().to_string())
}
