use anyhow::{Context, Result, anyhow};
use std::path::Path;
use std::process::Command;

/// Open the written page. A configured command is split on whitespace
/// (`firefox --new-window`) and the path is appended as its last argument;
/// otherwise the system default handler is used.
pub fn open_page(path: &Path, open_command: Option<&str>) -> Result<()> {
    if let Some(cmd) = open_command {
        let (program, extra) = split_command(cmd)?;
        Command::new(program)
            .args(extra)
            .arg(path)
            .spawn()
            .with_context(|| format!("failed to run {}", cmd))?;
        return Ok(());
    }
    open::that(path).with_context(|| format!("failed to open {}", path.display()))
}

fn split_command(cmd: &str) -> Result<(&str, Vec<&str>)> {
    let mut parts = cmd.split_whitespace();
    let program = parts.next().ok_or_else(|| anyhow!("open_command is empty"))?;
    Ok((program, parts.collect()))
}
