//! Opening image links outside the terminal

use anyhow::{Context, Result};
use std::process::{Command, Stdio};

/// Split an opener setting like `"firefox --new-window"` into program and args
fn opener_command(command_override: Option<&str>) -> (String, Vec<String>) {
    if let Some(custom) = command_override {
        let mut parts = custom.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            return (program, parts.collect());
        }
    }

    if cfg!(target_os = "macos") {
        ("open".to_string(), Vec::new())
    } else if cfg!(target_os = "windows") {
        // `start` treats the first quoted argument as a window title
        (
            "cmd".to_string(),
            vec!["/C".to_string(), "start".to_string(), String::new()],
        )
    } else {
        ("xdg-open".to_string(), Vec::new())
    }
}

/// Open `url` in the system browser without waiting for it
pub fn open_url(url: &str, command_override: Option<&str>) -> Result<()> {
    if url.is_empty() {
        anyhow::bail!("Record has no image link");
    }

    let (program, args) = opener_command(command_override);

    // Null stdio so the browser's output does not land on the TUI
    Command::new(&program)
        .args(&args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to launch '{}'", program))?;

    log::debug!("opened {} with {}", url, program);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_splits_arguments() {
        let (program, args) = opener_command(Some("firefox --new-window"));
        assert_eq!(program, "firefox");
        assert_eq!(args, vec!["--new-window".to_string()]);
    }

    #[test]
    fn test_blank_override_uses_platform_default() {
        let (program, _) = opener_command(Some("   "));
        assert!(!program.is_empty());
        assert_ne!(program, "   ");
    }

    #[test]
    fn test_empty_url_is_rejected() {
        assert!(open_url("", None).is_err());
    }

    #[test]
    fn test_missing_program_reports_error() {
        let result = open_url(
            "http://localhost:5000/img/1.jpg",
            Some("definitely-not-a-real-browser-binary"),
        );
        assert!(result.is_err());
    }
}
