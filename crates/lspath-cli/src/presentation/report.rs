use super::{Style, icons};
use lspath_core::{categorize, dir_stats, expand_tilde, line_context, probe_dir};
use lspath_types::{AnalysisResult, ConfigNode, PathEntry, StartupMode};
use std::fmt;

/// Longest quoted source line under a duplicate before it is cut.
const QUOTE_WIDTH: usize = 70;

// --------------------------------------------------------
// Analysis Report View
// --------------------------------------------------------

pub struct ReportView<'a> {
    result: &'a AnalysisResult,
    verbose: bool,
    style: Style,
    missing: Vec<bool>,
}

impl<'a> ReportView<'a> {
    pub fn new(result: &'a AnalysisResult, verbose: bool, style: Style) -> Self {
        let missing = result
            .path_entries
            .iter()
            .map(|e| probe_dir(&e.value).is_missing())
            .collect();

        Self {
            result,
            verbose,
            style,
            missing,
        }
    }

    fn entries(&self) -> &[PathEntry] {
        &self.result.path_entries
    }

    fn value_at(&self, index: usize) -> &str {
        self.entries().get(index).map(|e| e.value.as_str()).unwrap_or("?")
    }

    fn status_icon(&self, index: usize, entry: &PathEntry) -> String {
        if entry.is_session_only {
            self.style.accent(icons::SESSION)
        } else if entry.is_duplicate {
            self.style.warn(icons::DUPLICATE)
        } else if entry.symlink_points_to.is_some() {
            self.style.warn(icons::SYMLINK)
        } else if self.missing[index] {
            self.style.error(icons::MISSING)
        } else {
            icons::OK.to_string()
        }
    }

    fn status_suffix(&self, index: usize, entry: &PathEntry) -> String {
        let mut suffix = if let Some(of) = entry.duplicate_of {
            format!(" [duplicate {} #{}: {}]", icons::SYMLINK, of + 1, self.value_at(of))
        } else if let Some(to) = entry.symlink_points_to {
            format!(" [symlink {} #{}: {}]", icons::SYMLINK, to + 1, self.value_at(to))
        } else if self.missing[index] {
            " (missing)".to_string()
        } else {
            String::new()
        };

        let total = self.entries().len();
        if index == 0 {
            suffix.push_str(&format!(" (highest priority {})", icons::FIRST));
        } else if index + 1 == total {
            suffix.push_str(&format!(" (lowest priority {})", icons::LAST));
        }
        suffix
    }

    fn render_diagnostics(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.style.heading("GLOBAL DIAGNOSTICS"))?;
        writeln!(f, "------------------")?;
        if self.result.diagnostics.is_empty() {
            writeln!(f, "No global issues detected.")?;
        }
        for line in &self.result.diagnostics {
            writeln!(f, "• {}", line)?;
        }
        writeln!(f)
    }

    fn render_entries_compact(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.style.heading(&format!(
                "PATH ({} ENTRIES) - use --verbose for details",
                self.entries().len()
            ))
        )?;
        writeln!(f, "--------------------------------------------\n")?;

        for (i, entry) in self.entries().iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {} {}{}",
                i + 1,
                self.status_icon(i, entry),
                self.style.truncate(&entry.value),
                self.status_suffix(i, entry)
            )?;
        }
        writeln!(f)
    }

    fn render_entries_verbose(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}",
            self.style.heading(&format!(
                "PATH ENTRIES ({} ENTRIES) - PRIORITY ORDER",
                self.entries().len()
            ))
        )?;
        writeln!(f, "--------------------------------------------\n")?;

        for (i, entry) in self.entries().iter().enumerate() {
            writeln!(
                f,
                "{:>2}. {} {}{}",
                i + 1,
                self.status_icon(i, entry),
                entry.value,
                self.status_suffix(i, entry)
            )?;
            writeln!(f, "      - Source: {}", entry.location())?;

            let contents = if self.missing[i] {
                "does not exist".to_string()
            } else {
                dir_stats(&entry.value)
            };
            writeln!(f, "      - Contents: {}", contents)?;

            if entry.mode != StartupMode::Unknown {
                writeln!(f, "      - Startup Phase: {}", entry.mode)?;
            }
            writeln!(f, "      - Category: {}", categorize(&entry.value))?;

            if let Some(note) = &entry.session_note {
                writeln!(f, "      - Note: {}", note)?;
            }
            for diagnostic in entry.diagnostics.iter().filter(|_| !self.missing[i]) {
                writeln!(f, "      - {}", self.style.warn(diagnostic))?;
            }
        }
        writeln!(f)
    }

    fn render_summary(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let total = self.entries().len();
        let (ok, missing, redundant) = self.counts();

        writeln!(f, "{}", self.style.heading("SUMMARY"))?;
        writeln!(f, "-------")?;
        writeln!(f, "Total PATH Entries: {}", total)?;
        if total > 0 {
            let rows = [
                ("├─", "OK:".to_string(), ok),
                ("├─", format!("Missing {}:", icons::MISSING), missing),
                ("└─", format!("Duplicates {}:", icons::DUPLICATE), redundant),
            ];
            for (branch, label, count) in rows {
                writeln!(f, "{} {:<13} {:>2} ({:>3}%)", branch, label, count, count * 100 / total)?;
            }
        }
        writeln!(f)
    }

    fn counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for (i, entry) in self.entries().iter().enumerate() {
            if entry.is_redundant() {
                counts.2 += 1;
            } else if self.missing[i] {
                counts.1 += 1;
            } else {
                counts.0 += 1;
            }
        }
        counts
    }

    fn render_issues(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.style.heading("ISSUES FOUND"))?;
        writeln!(f, "------------")?;

        let (_, missing, redundant) = self.counts();
        if missing == 0 && redundant == 0 {
            return writeln!(f, "No specific issues found.\n");
        }

        if redundant > 0 {
            writeln!(
                f,
                "{} DUPLICATES ({}) [NOT SERIOUS]",
                self.style.warn(icons::DUPLICATE),
                redundant
            )?;
            for (i, entry) in self.entries().iter().enumerate() {
                if entry.is_duplicate {
                    self.render_duplicate(f, i, entry)?;
                } else if let Some(message) = &entry.symlink_message {
                    writeln!(f, "{:>2}. {}", i + 1, entry.value)?;
                    writeln!(f, "    » {}", message)?;
                    writeln!(f, "    » This is normal on modern Linux systems\n")?;
                }
            }
        }

        if missing > 0 {
            writeln!(
                f,
                "{} MISSING DIRECTORIES ({}) [NOT SERIOUS]",
                self.style.error(icons::MISSING),
                missing
            )?;
            for (i, entry) in self.entries().iter().enumerate() {
                if self.missing[i] && !entry.is_redundant() {
                    writeln!(f, "{:>2}. {} (from {})", i + 1, entry.value, entry.location())?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }

    fn render_duplicate(&self, f: &mut fmt::Formatter, index: usize, entry: &PathEntry) -> fmt::Result {
        writeln!(f, "{:>2}. {}", index + 1, entry.value)?;
        writeln!(f, "    » Added by {}", entry.location())?;

        if entry.line_number > 0
            && let Some(line) = line_context(&entry.source_file, entry.line_number, 0).target()
        {
            writeln!(f, "      {}", quote(line.text.trim()))?;
        }
        if let Some(message) = &entry.duplicate_message {
            writeln!(f, "    » {}", message)?;
        }
        if let Some(advice) = &entry.remediation {
            writeln!(f, "    » {}", advice)?;
        }
        writeln!(f)
    }

    fn node_header(&self, node: &ConfigNode) -> String {
        let indent = "  ".repeat(node.depth);
        let description = if node.description.is_empty() {
            String::new()
        } else {
            format!(" {}", node.description)
        };

        let status = if node.not_executed {
            if expand_tilde(&node.file_path).exists() {
                " [Not Executed - file exists]".to_string()
            } else {
                " [Not Executed - file does not exist]".to_string()
            }
        } else if node.entries.is_empty() {
            " [no change]".to_string()
        } else {
            format!(" [{} paths]", node.entries.len())
        };

        let total = self.result.flow_nodes.len();
        let executed = if node.order == 1 {
            format!(" (executed first {})", icons::FIRST)
        } else if node.order == total {
            format!(" (executed last {})", icons::LAST)
        } else {
            String::new()
        };

        let line = format!("{}{}{}{}", indent, node.file_path, description, status);
        let line = if node.not_executed { self.style.dim(&line) } else { line };
        format!("{:>2}. {}{}", node.order, line, executed)
    }

    fn render_flow(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.style.heading("CONFIGURATION FILES FLOW - SUMMARY"))?;
        writeln!(f, "----------------------------------")?;
        for node in &self.result.flow_nodes {
            writeln!(f, "{}", self.node_header(node))?;
        }

        if !self.verbose {
            return Ok(());
        }

        writeln!(f, "\n{}", self.style.heading("CONFIGURATION FILES FLOW - DETAIL"))?;
        writeln!(f, "---------------------------------")?;
        for node in &self.result.flow_nodes {
            writeln!(f, "{}", self.node_header(node))?;
            if node.not_executed {
                continue;
            }

            let indent = format!("      {}", "  ".repeat(node.depth));
            for entry in self.result.entries_of(node) {
                let marker = if entry.is_duplicate {
                    format!(" {}", icons::DUPLICATE)
                } else if entry.is_session_only {
                    format!(" {}", icons::SESSION)
                } else {
                    String::new()
                };
                writeln!(f, "{}» {}{}", indent, entry.value, marker)?;
            }
        }
        Ok(())
    }
}

fn quote(text: &str) -> String {
    if text.chars().count() <= QUOTE_WIDTH {
        return text.to_string();
    }
    let head: String = text.chars().take(QUOTE_WIDTH - 3).collect();
    format!("{}...", head)
}

impl<'a> fmt::Display for ReportView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}", self.style.heading("LSPATH ANALYSIS REPORT"))?;
        writeln!(f, "======================\n")?;

        self.render_diagnostics(f)?;
        if self.verbose {
            self.render_entries_verbose(f)?;
        } else {
            self.render_entries_compact(f)?;
        }
        self.render_summary(f)?;
        self.render_issues(f)?;
        self.render_flow(f)
    }
}
