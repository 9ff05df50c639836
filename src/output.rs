//! Step outputs for GitHub Actions.
//!
//! Outputs are appended to the file named by `GITHUB_OUTPUT`; outside of
//! Actions they are printed to stdout instead.

use crate::error::Result;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Where step outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutput {
    File(PathBuf),
    Stdout,
}

impl ActionOutput {
    /// Use `GITHUB_OUTPUT` when it is set and non-empty
    pub fn from_env() -> Self {
        match std::env::var_os(GITHUB_OUTPUT_ENV) {
            Some(path) if !path.is_empty() => ActionOutput::File(PathBuf::from(path)),
            _ => ActionOutput::Stdout,
        }
    }

    /// Write one output
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let line = format_output(key, value);
        match self {
            ActionOutput::File(path) => {
                let mut file = OpenOptions::new().create(true).append(true).open(path)?;
                file.write_all(line.as_bytes())?;
            }
            ActionOutput::Stdout => print!("{}", line),
        }
        Ok(())
    }

    /// Write several outputs in order
    pub fn set_all<K: AsRef<str>>(&self, outputs: &[(K, String)]) -> Result<()> {
        for (key, value) in outputs {
            self.set(key.as_ref(), value)?;
        }
        Ok(())
    }
}

/// Render `key=value`, or the heredoc form when the value spans lines.
pub fn format_output(key: &str, value: &str) -> String {
    if !value.contains('\n') && !value.contains('\r') {
        return format!("{}={}\n", key, value);
    }

    let mut delimiter = String::from("LEAN_UPDATE_EOF");
    while value.lines().any(|line| line == delimiter) {
        delimiter.push('_');
    }
    format!("{}<<{}\n{}\n{}\n", key, delimiter, value, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;

    #[test]
    fn test_single_line_output() {
        assert_eq!(format_output("do_update", "true"), "do_update=true\n");
    }

    #[test]
    fn test_multi_line_output_uses_delimiter() {
        assert_eq!(
            format_output("summary-text", "\n\nline"),
            "summary-text<<LEAN_UPDATE_EOF\n\n\nline\nLEAN_UPDATE_EOF\n"
        );
    }

    #[test]
    fn test_delimiter_avoids_value_lines() {
        let out = format_output("k", "a\nLEAN_UPDATE_EOF");
        assert!(out.starts_with("k<<LEAN_UPDATE_EOF_\n"));
    }

    #[test]
    fn test_file_output_appends() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("output");
        fs::write(&path, "earlier=1\n").unwrap();

        let output = ActionOutput::File(path.clone());
        output
            .set_all(&[("new-tags", "[\"v1.1\"]".to_string())])
            .unwrap();

        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "earlier=1\nnew-tags=[\"v1.1\"]\n"
        );
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var(GITHUB_OUTPUT_ENV, "/tmp/gh-output");
        assert_eq!(
            ActionOutput::from_env(),
            ActionOutput::File(PathBuf::from("/tmp/gh-output"))
        );

        std::env::remove_var(GITHUB_OUTPUT_ENV);
        assert_eq!(ActionOutput::from_env(), ActionOutput::Stdout);
    }
}
