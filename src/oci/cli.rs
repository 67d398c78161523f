//! OCI CLI command execution.
//!
//! Runs `oci` CLI commands and returns their stdout for JSON parsing.

use colored::Colorize;
use regex::Regex;
use std::error::Error;
use std::process::Command;
use std::sync::OnceLock;

/// Regex for splitting command strings while preserving quoted substrings.
static COMMAND_REGEX: OnceLock<Regex> = OnceLock::new();

fn command_regex() -> &'static Regex {
    COMMAND_REGEX.get_or_init(|| {
        Regex::new(r#"'([^']*)'\s*|\"([^\"]*)\"\s*|([^'\s]*)\s*"#).expect("Invalid Regex")
    })
}

/// Run a shell command and return its stdout.
///
/// The command string is split on spaces, with quoted substrings preserved.
///
/// # Returns
/// * `Ok(String)` - The stdout output on success
/// * `Err` - If the command fails or produces too much output
pub fn run(cmd: &str) -> Result<String, Box<dyn Error>> {
    log::debug!("run({cmd})", cmd = cmd.on_blue());

    let parts: Vec<&str> = split_and_strip(cmd);
    log::trace!("split parts={:?}", parts);

    let mut command = Command::new(parts[0]);
    for arg in parts.iter().skip(1) {
        command.arg(arg);
    }

    let output = command.output().map_err(|e| {
        log::error!("Command execution failed: {}", e);
        format!("Failed to execute command: {}", e)
    })?;

    if output.status.success() {
        log::debug!("Success cmd: {cmd}");
        log::debug!("Success output.stdout.len(): {}", output.stdout.len());

        if output.stdout.len() > 2_000_000 {
            return Err(format!(
                "Response too large: {} bytes for command: {:?}",
                output.stdout.len(),
                parts
            )
            .into());
        }
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::trace!(
            "code={code:?}, status={status}\nstderr=\n{stderr}",
            code = output.status.code(),
            status = output.status,
            stderr = stderr.red()
        );
        log::warn!(
            "{failed} to run {cmd}",
            failed = "failed".on_red(),
            cmd = cmd.on_blue()
        );
        return Err(format!("ERROR running: {stderr}").into());
    }

    let stdout = String::from_utf8(output.stdout).map_err(|e| format!("Invalid UTF-8: {}", e))?;

    Ok(stdout)
}

/// Split a command string on spaces, preserving quoted substrings.
fn split_and_strip(input: &str) -> Vec<&str> {
    command_regex()
        .find_iter(input)
        .map(|m| m.as_str().trim().trim_matches('\'').trim_matches('"'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_plain_args() {
        let input = "oci iam availability-domain list";
        assert_eq!(
            split_and_strip(input),
            vec!["oci", "iam", "availability-domain", "list"]
        );
    }

    #[test]
    fn test_split_keeps_quoted_values() {
        let input = "oci ce node-pool-options get --node-pool-option-id 'all'";
        assert_eq!(
            split_and_strip(input),
            vec![
                "oci",
                "ce",
                "node-pool-options",
                "get",
                "--node-pool-option-id",
                "all"
            ]
        );
    }

    #[test]
    fn test_split_double_quoted_with_spaces() {
        let input = r#"echo "two words" tail"#;
        assert_eq!(split_and_strip(input), vec!["echo", "two words", "tail"]);
    }

    #[test]
    fn test_split_empty_quotes() {
        let input = "a '' b";
        assert_eq!(split_and_strip(input), vec!["a", "", "b"]);
    }
}
