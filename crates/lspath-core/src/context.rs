use crate::path::expand_tilde;
use serde::Serialize;
use std::fs;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContextLine {
    pub number: u32,
    pub text: String,
    pub is_target: bool,
}

/// A source line with its neighbours, as shown next to an attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineContext {
    pub file: String,
    pub line_number: u32,
    pub lines: Vec<ContextLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LineContext {
    pub fn target(&self) -> Option<&ContextLine> {
        self.lines.iter().find(|l| l.is_target)
    }

    fn failed(file: &str, line_number: u32, error: String) -> Self {
        Self {
            file: file.to_string(),
            line_number,
            lines: Vec::new(),
            error: Some(error),
        }
    }
}

/// Read `radius` lines on either side of `file:line_number`.
///
/// Failures are reported in `error` rather than returned, so callers can
/// render "could not read" inline.
pub fn line_context(file: &str, line_number: u32, radius: u32) -> LineContext {
    let content = match fs::read(expand_tilde(file)) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(err) => return LineContext::failed(file, line_number, format!("Could not read file: {}", err)),
    };

    let all: Vec<&str> = content.lines().collect();
    let total = all.len() as u32;
    if line_number < 1 || line_number > total {
        return LineContext::failed(
            file,
            line_number,
            format!("Line {} out of range (file has {} lines)", line_number, total),
        );
    }

    let first = line_number.saturating_sub(radius).max(1);
    let last = line_number.saturating_add(radius).min(total);
    let lines = (first..=last)
        .map(|number| ContextLine {
            number,
            text: all[(number - 1) as usize].to_string(),
            is_target: number == line_number,
        })
        .collect();

    LineContext {
        file: file.to_string(),
        line_number,
        lines,
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_context_is_clamped_to_file_bounds() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "one\ntwo\nthree\nfour").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let ctx = line_context(&path, 1, 2);
        assert!(ctx.error.is_none());
        assert_eq!(ctx.lines.len(), 3);
        assert_eq!(ctx.target().unwrap().text, "one");

        let ctx = line_context(&path, 4, 1);
        assert_eq!(ctx.lines.first().unwrap().number, 3);
        assert_eq!(ctx.lines.last().unwrap().number, 4);
    }

    #[test]
    fn test_out_of_range_and_missing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "only").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let ctx = line_context(&path, 9, 2);
        assert_eq!(ctx.error.as_deref(), Some("Line 9 out of range (file has 1 lines)"));

        let ctx = line_context("/definitely/not/here", 1, 2);
        assert!(ctx.error.unwrap().starts_with("Could not read file"));
    }
}
