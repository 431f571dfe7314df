use crate::heuristics::find_path_assignment;
use lspath_types::TraceEvent;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `<nesting markers><optional space><file>:<line>><command>`
///
/// Both supported PS4 formats (`+%x:%I>` and `+${BASH_SOURCE}:${LINENO}>`)
/// produce this shape; bash repeats the `+` once per nesting level.
/// Noise may precede the markers, see [`locate_marker`].
static TRACE_LINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\++ ?([^:>]+):(\d+)>(.*)$").unwrap());

/// Parse one line of trace output. Lines without the trace shape yield `None`.
pub fn parse_line(line: &str) -> Option<TraceEvent> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    let caps = locate_marker(line)?;

    let file = caps.get(1)?.as_str();
    // Out-of-range numbers are not fatal
    let line_number = caps[2].parse::<u32>().unwrap_or(0);
    // zsh separates the prompt from the command with a space, bash does not
    let command = caps.get(3).map_or("", |m| m.as_str()).trim_start();

    let mut event = TraceEvent::new(file, line_number, command);
    event.path_change = find_path_assignment(command);
    Some(event)
}

/// Try each run of `+` from left to right.
///
/// A `+` inside interleaved noise also starts a candidate, which then swallows
/// the real marker into its file name (`a+b +/etc/zshrc:4>`). The first
/// candidate without an embedded ` +` wins; `+` inside the command is never
/// reached because an earlier run already matched.
fn locate_marker(line: &str) -> Option<Captures<'_>> {
    let bytes = line.as_bytes();
    let mut fallback = None;

    for (start, _) in line.match_indices('+') {
        if start > 0 && bytes[start - 1] == b'+' {
            continue;
        }
        let Some(caps) = TRACE_LINE_REGEX.captures(&line[start..]) else {
            continue;
        };
        if !swallows_marker(&caps[1]) {
            return Some(caps);
        }
        fallback.get_or_insert(caps);
    }
    fallback
}

fn swallows_marker(file: &str) -> bool {
    file.as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_whitespace() && w[1] == b'+')
}

/// Parse a complete captured trace, skipping every non-trace line.
pub fn parse_trace(text: &str) -> Vec<TraceEvent> {
    text.lines().filter_map(parse_line).collect()
}

/// Split a PATH-style list, dropping empty segments.
pub fn split_path_list(value: &str) -> impl Iterator<Item = &str> {
    value.split(':').filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_zsh_line() {
        let event = parse_line("+/etc/zprofile:5>PATH=/usr/bin:/bin:/opt/tool").unwrap();
        assert_eq!(event.file, "/etc/zprofile");
        assert_eq!(event.line, 5);
        assert_eq!(event.raw_command, "PATH=/usr/bin:/bin:/opt/tool");
        assert_eq!(event.path_change.as_deref(), Some("/usr/bin:/bin:/opt/tool"));
    }

    #[test]
    fn test_zsh_prompt_space_is_not_part_of_the_command() {
        let event = parse_line("+/home/me/.zshrc:7> export PATH=/x:$PATH").unwrap();
        assert_eq!(event.raw_command, "export PATH=/x:$PATH");
    }

    #[test]
    fn test_parse_bash_nested_line() {
        let event = parse_line("+++/home/me/.bashrc:12>export PATH=/home/me/bin:/usr/bin").unwrap();
        assert_eq!(event.file, "/home/me/.bashrc");
        assert_eq!(event.line, 12);
        assert_eq!(event.path_change.as_deref(), Some("/home/me/bin:/usr/bin"));
    }

    #[test]
    fn test_parse_line_with_space_and_leading_noise() {
        let event = parse_line("garbage output+ /etc/zshrc:10>setopt no_beep").unwrap();
        assert_eq!(event.file, "/etc/zshrc");
        assert_eq!(event.line, 10);
        assert_eq!(event.path_change, None);
    }

    #[test]
    fn test_plus_inside_command_does_not_move_the_match() {
        let event = parse_line("+/etc/zshrc:3>(( count+1:2>0 ))").unwrap();
        assert_eq!(event.file, "/etc/zshrc");
        assert_eq!(event.line, 3);
    }

    #[test]
    fn test_plus_in_leading_noise_is_not_the_marker() {
        let event = parse_line("warning: a+b +/etc/zshrc:4>PATH=/x").unwrap();
        assert_eq!(event.file, "/etc/zshrc");
        assert_eq!(event.line, 4);
        assert_eq!(event.path_change.as_deref(), Some("/x"));

        let event = parse_line("c++ noise ++/home/me/.bashrc:2>export PATH=/y").unwrap();
        assert_eq!(event.file, "/home/me/.bashrc");
        assert_eq!(event.path_change.as_deref(), Some("/y"));
    }

    #[test]
    fn test_file_name_with_space_is_kept() {
        let event = parse_line("+/Users/Jo Doe/.zshrc:2>true").unwrap();
        assert_eq!(event.file, "/Users/Jo Doe/.zshrc");
    }

    #[test]
    fn test_non_trace_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("Last login: Mon Oct 12 on ttys001").is_none());
        assert!(parse_line("/etc/zshrc:10>no marker").is_none());
        assert!(parse_line("+/etc/zshrc:abc>bad line number").is_none());
    }

    #[test]
    fn test_overflowing_line_number_defaults_to_zero() {
        let event = parse_line("+/etc/zshrc:99999999999999>true").unwrap();
        assert_eq!(event.line, 0);
    }

    #[test]
    fn test_parse_trace_keeps_order() {
        let text = "noise\n+/etc/zshenv:1>true\r\n+/etc/zprofile:2>PATH=/a\n";
        let events = parse_trace(text);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].file, "/etc/zshenv");
        assert_eq!(events[1].path_change.as_deref(), Some("/a"));
    }

    #[test]
    fn test_split_path_list_drops_empty_segments() {
        let parts: Vec<_> = split_path_list(":/a::/b:").collect();
        assert_eq!(parts, vec!["/a", "/b"]);
    }
}
