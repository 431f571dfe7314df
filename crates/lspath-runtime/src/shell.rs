use lspath_types::ShellFamily;
use std::path::Path;

/// `file:line>` prefix for each traced command in zsh.
pub const ZSH_PS4: &str = "+%x:%I>";

/// `file:line>` prefix for each traced command in bash.
pub const BASH_PS4: &str = "+${BASH_SOURCE}:${LINENO}>";

/// Trace a login, interactive shell whose only command is `exit`.
const TRACE_ARGS: [&str; 5] = ["-x", "-l", "-i", "-c", "exit"];

pub fn ps4_for(family: ShellFamily) -> &'static str {
    match family {
        ShellFamily::Zsh => ZSH_PS4,
        ShellFamily::Bash => BASH_PS4,
    }
}

/// How to start the shell whose startup is traced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellProfile {
    pub family: ShellFamily,
    pub program: String,
    pub args: Vec<String>,
}

impl ShellProfile {
    pub fn new(family: ShellFamily, program: impl Into<String>) -> Self {
        Self {
            family,
            program: program.into(),
            args: TRACE_ARGS.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Pick the shell from an inherited `SHELL` value and an optional override.
    ///
    /// The `SHELL` binary is reused when it belongs to the chosen family;
    /// otherwise the family name is looked up on the baseline PATH.
    pub fn detect(shell_env: Option<&str>, requested: Option<ShellFamily>) -> Self {
        let shell_env = shell_env.filter(|s| !s.is_empty());
        let family = requested
            .or_else(|| shell_env.map(ShellFamily::from_shell_path))
            .unwrap_or_default();

        let program = shell_env
            .filter(|s| binary_is(s, family))
            .unwrap_or(family.name());

        Self::new(family, program)
    }

    /// [`Self::detect`] against this process's `SHELL`.
    pub fn from_env(requested: Option<ShellFamily>) -> Self {
        let shell_env = std::env::var("SHELL").ok();
        Self::detect(shell_env.as_deref(), requested)
    }

    pub fn ps4(&self) -> &'static str {
        ps4_for(self.family)
    }
}

fn binary_is(shell: &str, family: ShellFamily) -> bool {
    Path::new(shell)
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with(family.name()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_from_shell_env() {
        let profile = ShellProfile::detect(Some("/bin/zsh"), None);
        assert_eq!(profile.family, ShellFamily::Zsh);
        assert_eq!(profile.program, "/bin/zsh");
        assert_eq!(profile.ps4(), ZSH_PS4);

        let profile = ShellProfile::detect(Some("/opt/homebrew/bin/bash"), None);
        assert_eq!(profile.family, ShellFamily::Bash);
        assert_eq!(profile.program, "/opt/homebrew/bin/bash");
        assert_eq!(profile.ps4(), BASH_PS4);
    }

    #[test]
    fn test_override_ignores_mismatched_shell_binary() {
        let profile = ShellProfile::detect(Some("/bin/zsh"), Some(ShellFamily::Bash));
        assert_eq!(profile.family, ShellFamily::Bash);
        assert_eq!(profile.program, "bash");
    }

    #[test]
    fn test_unknown_or_missing_shell_falls_back_to_zsh() {
        let profile = ShellProfile::detect(Some("/usr/bin/fish"), None);
        assert_eq!(profile.family, ShellFamily::Zsh);
        assert_eq!(profile.program, "zsh");

        let profile = ShellProfile::detect(None, None);
        assert_eq!(profile.program, "zsh");
        assert_eq!(profile.args, vec!["-x", "-l", "-i", "-c", "exit"]);
    }
}
