//! Command output rendering.

use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    #[default]
    Yaml,
}

/// Writes `value` in the selected format, followed by a newline.
pub fn write<T: Serialize + ?Sized>(out: &mut dyn Write, format: Format, value: &T) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer(&mut *out, value)?;
            writeln!(out)?;
        }
        Format::Yaml => {
            let text = serde_yaml::to_string(value)?;
            out.write_all(text.as_bytes())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<T: Serialize + ?Sized>(format: Format, value: &T) -> String {
        let mut out = Vec::new();
        write(&mut out, format, value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_string() {
        assert_eq!(render(Format::Json, "test-term/1"), "\"test-term/1\"\n");
        assert_eq!(render(Format::Yaml, "test-term/1"), "test-term/1\n");
    }

    #[test]
    fn test_list() {
        let ids = vec!["a/b/1".to_string(), "a/c/2".to_string()];
        assert_eq!(render(Format::Json, &ids), "[\"a/b/1\",\"a/c/2\"]\n");
        assert_eq!(render(Format::Yaml, &ids), "- a/b/1\n- a/c/2\n");
    }
}
