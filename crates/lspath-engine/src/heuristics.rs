//! Named predicates encoding shell-specific domain knowledge.
//!
//! None of these are exact; each one has its own tests so a change in one
//! heuristic is visible on its own.

use lspath_types::SYSTEM_SOURCE;

/// Shell runtime library files whose execution is not interesting on its own.
const NOISY_PREFIXES: [&str; 6] = [
    "/usr/share/zsh",
    "/usr/local/share/zsh",
    "/opt/homebrew/share/zsh",
    "/etc/zshrc_Apple_Terminal",
    "/usr/share/bash-completion",
    "/etc/bash_completion.d",
];

/// Startup file names that are shown in the timeline even when they changed nothing.
const CANONICAL_NAMES: [&str; 11] = [
    "zshenv",
    ".zshenv",
    "zprofile",
    ".zprofile",
    "zshrc",
    ".zshrc",
    "zlogin",
    ".zlogin",
    ".bash_profile",
    ".bash_login",
    "bash.bashrc",
];

const CANONICAL_SHARED_NAMES: [&str; 4] = ["bashrc", ".bashrc", "profile", ".profile"];

/// Scripts that look top-level by name but are sourced by another startup file.
const CONTINUATION_MARKERS: [&str; 2] = ["cargo", "nvm"];

/// Well-known OS default directories.
const OS_DEFAULT_DIRS: [&str; 11] = [
    "/usr/local/sbin",
    "/usr/local/bin",
    "/usr/sbin",
    "/usr/bin",
    "/sbin",
    "/bin",
    "/usr/games",
    "/usr/local/games",
    "/snap/bin",
    "/opt/local/bin",
    "/opt/local/sbin",
];

pub fn is_noisy_internal_file(file: &str) -> bool {
    NOISY_PREFIXES.iter().any(|p| file.starts_with(p))
}

/// True for the standard startup files of either shell and the system sentinel.
pub fn is_canonical_config(path: &str) -> bool {
    if path == SYSTEM_SOURCE {
        return true;
    }
    CANONICAL_NAMES
        .iter()
        .chain(CANONICAL_SHARED_NAMES.iter())
        .any(|name| path == *name || (path.ends_with(name) && path[..path.len() - name.len()].ends_with('/')))
}

pub fn is_continuation_script(file: &str) -> bool {
    CONTINUATION_MARKERS.iter().any(|m| file.contains(m))
}

/// A canonical file that starts a fresh top-level context when first seen.
pub fn starts_top_level_context(file: &str) -> bool {
    is_canonical_config(file) && !is_continuation_script(file)
}

/// `eval` whose argument is produced by command substitution.
///
/// The PATH value such an eval produces surfaces several trace lines later.
pub fn is_eval_with_substitution(command: &str) -> bool {
    command.contains("eval ") && (command.contains("$(") || command.contains('`'))
}

pub fn is_os_default_dir(dir: &str) -> bool {
    OS_DEFAULT_DIRS.contains(&dir)
}

/// Extract the value of a true `PATH=` assignment from a traced command.
///
/// The `PATH` token must start a word: start of string, whitespace, or a
/// statement separator before it. `MYPATH=` does not count. A word that is
/// itself quoted (`export 'PATH=/a b'`, as bash prints it) ends at the
/// closing quote; otherwise one layer of quotes around the value is stripped.
pub fn find_path_assignment(command: &str) -> Option<String> {
    const TOKEN: &str = "PATH=";

    let mut from = 0;
    while let Some(rel) = command[from..].find(TOKEN) {
        let idx = from + rel;
        let rest = &command[idx + TOKEN.len()..];

        match word_opening(&command[..idx]) {
            WordStart::Bare => return non_empty(unquote_value(rest)),
            WordStart::Quoted(q) => {
                let end = rest.find(q).unwrap_or(rest.len());
                return non_empty(&rest[..end]);
            }
            WordStart::Inside => from = idx + TOKEN.len(),
        }
    }
    None
}

enum WordStart {
    Bare,
    Quoted(char),
    Inside,
}

fn is_word_boundary(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | '&' | '|' | '(' | '{')
}

fn word_opening(prefix: &str) -> WordStart {
    let mut chars = prefix.chars().rev();
    let last = chars.next();
    let before = chars.next();
    match last {
        None => WordStart::Bare,
        Some(c) if is_word_boundary(c) => WordStart::Bare,
        Some(q @ ('\'' | '"')) if before.is_none_or(is_word_boundary) => WordStart::Quoted(q),
        Some(_) => WordStart::Inside,
    }
}

fn unquote_value(rest: &str) -> &str {
    match rest.chars().next() {
        Some(q @ ('\'' | '"')) => {
            let inner = &rest[1..];
            match inner.find(q) {
                Some(end) => &inner[..end],
                None => inner,
            }
        }
        _ => rest
            .split(|c: char| c.is_whitespace() || c == ';')
            .next()
            .unwrap_or(""),
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noisy_files() {
        assert!(is_noisy_internal_file("/usr/share/zsh/5.9/functions/compinit"));
        assert!(is_noisy_internal_file("/etc/zshrc_Apple_Terminal"));
        assert!(!is_noisy_internal_file("/etc/zshrc"));
        assert!(!is_noisy_internal_file("/home/me/.zshrc"));
    }

    #[test]
    fn test_canonical_configs() {
        assert!(is_canonical_config(SYSTEM_SOURCE));
        assert!(is_canonical_config("/etc/zshenv"));
        assert!(is_canonical_config("/Users/me/.zprofile"));
        assert!(is_canonical_config("/etc/bash.bashrc"));
        assert!(is_canonical_config("/etc/profile"));
        assert!(is_canonical_config("/home/me/.profile"));
        assert!(is_canonical_config(".zshrc"));
        assert!(!is_canonical_config("/home/me/.nvm/nvm.sh"));
        assert!(!is_canonical_config("/home/me/myprofile"));
        assert!(!is_canonical_config("/etc/zshrc_Apple_Terminal"));
    }

    #[test]
    fn test_continuation_scripts_do_not_start_top_level_context() {
        assert!(is_continuation_script("/home/me/.cargo/env"));
        assert!(is_continuation_script("/home/me/.nvm/nvm.sh"));
        assert!(starts_top_level_context("/home/me/.zshrc"));
        assert!(!starts_top_level_context("/home/me/.nvm/nvm.sh"));
        assert!(!starts_top_level_context("/opt/cargo/.profile"));
    }

    #[test]
    fn test_eval_with_substitution() {
        assert!(is_eval_with_substitution("eval \"$(/opt/homebrew/bin/brew shellenv)\""));
        assert!(is_eval_with_substitution("eval `pyenv init -`"));
        assert!(!is_eval_with_substitution("eval export FOO=1"));
        assert!(!is_eval_with_substitution("echo $(date)"));
    }

    #[test]
    fn test_os_default_dirs() {
        assert!(is_os_default_dir("/usr/local/bin"));
        assert!(is_os_default_dir("/snap/bin"));
        assert!(!is_os_default_dir("/opt/homebrew/bin"));
        assert!(!is_os_default_dir("/usr/bin/"));
    }

    #[test]
    fn test_path_assignment_forms() {
        assert_eq!(find_path_assignment("PATH=/a:/b").as_deref(), Some("/a:/b"));
        assert_eq!(find_path_assignment("export PATH=/a:/b").as_deref(), Some("/a:/b"));
        assert_eq!(find_path_assignment("typeset -x PATH=/a").as_deref(), Some("/a"));
        assert_eq!(find_path_assignment("true;PATH=/a").as_deref(), Some("/a"));
        assert_eq!(find_path_assignment("PATH=/a:/b other=1").as_deref(), Some("/a:/b"));
    }

    #[test]
    fn test_path_assignment_strips_quotes() {
        assert_eq!(find_path_assignment("PATH='/a b:/c'").as_deref(), Some("/a b:/c"));
        assert_eq!(find_path_assignment("export PATH=\"/x:/y\"").as_deref(), Some("/x:/y"));
        assert_eq!(find_path_assignment("export 'PATH=/a b:/c'").as_deref(), Some("/a b:/c"));
        assert_eq!(find_path_assignment("PATH='/unterminated").as_deref(), Some("/unterminated"));
    }

    #[test]
    fn test_path_assignment_rejects_suffix_matches() {
        assert_eq!(find_path_assignment("MYPATH=/a"), None);
        assert_eq!(find_path_assignment("export MANPATH=/usr/share/man"), None);
        assert_eq!(find_path_assignment("echo $PATH"), None);
        assert_eq!(find_path_assignment("PATH="), None);
        // A later true assignment is still found
        assert_eq!(find_path_assignment("MYPATH=/x PATH=/y").as_deref(), Some("/y"));
    }
}
