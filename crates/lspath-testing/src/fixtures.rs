//! Trace text fixtures.
//!
//! Builds the stderr a shell would print under `set -x` with the PS4 strings
//! lspath installs, so tests can drive the parser and the CLI `--replay`
//! path without spawning a real shell.

use anyhow::Result;
use lspath_types::ShellFamily;
use std::fs;
use std::path::Path;

/// Builder for a captured startup trace.
///
/// # Example
/// ```
/// use lspath_testing::TraceScript;
///
/// let text = TraceScript::zsh()
///     .assign_path("/etc/zprofile", 5, "/usr/bin:/bin:/opt/tool")
///     .render();
/// assert_eq!(text, "+/etc/zprofile:5> export PATH=/usr/bin:/bin:/opt/tool\n");
/// ```
#[derive(Debug, Clone)]
pub struct TraceScript {
    family: ShellFamily,
    lines: Vec<String>,
}

impl TraceScript {
    pub fn new(family: ShellFamily) -> Self {
        Self {
            family,
            lines: Vec::new(),
        }
    }

    pub fn zsh() -> Self {
        Self::new(ShellFamily::Zsh)
    }

    pub fn bash() -> Self {
        Self::new(ShellFamily::Bash)
    }

    pub fn family(&self) -> ShellFamily {
        self.family
    }

    /// A traced command at nesting level 1.
    pub fn run(self, file: &str, line: u32, command: &str) -> Self {
        self.nested(1, file, line, command)
    }

    /// A traced command at the given nesting level.
    ///
    /// bash repeats the leading `+` per level; zsh does not.
    pub fn nested(mut self, depth: usize, file: &str, line: u32, command: &str) -> Self {
        let rendered = match self.family {
            ShellFamily::Zsh => format!("+{}:{}> {}", file, line, command),
            ShellFamily::Bash => format!("{}{}:{}>{}", "+".repeat(depth.max(1)), file, line, command),
        };
        self.lines.push(rendered);
        self
    }

    /// `export PATH=<value>`, as the shell prints it after expansion.
    pub fn assign_path(self, file: &str, line: u32, value: &str) -> Self {
        let command = match self.family {
            ShellFamily::Zsh => format!("export PATH={}", value),
            // bash quotes the whole word when the value needs it
            ShellFamily::Bash if value.contains(' ') => format!("export 'PATH={}'", value),
            ShellFamily::Bash => format!("export PATH={}", value),
        };
        self.run(file, line, &command)
    }

    /// `eval "$(<tool>)"`, the usual shape of a tool's shell integration.
    pub fn eval_substitution(self, file: &str, line: u32, tool: &str) -> Self {
        self.run(file, line, &format!("eval \"$({})\"", tool))
    }

    /// An untraced output line (banner, motd, tool chatter).
    pub fn noise(mut self, text: &str) -> Self {
        self.lines.push(text.to_string());
        self
    }

    pub fn render(&self) -> String {
        let mut text = self.lines.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        text
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        Ok(())
    }
}

/// A typical macOS zsh login: Homebrew via eval in `~/.zprofile`, a cargo
/// env file sourced from `~/.zshrc`, and a personal bin directory.
pub fn macos_zsh_login(home: &str) -> TraceScript {
    let zprofile = format!("{}/.zprofile", home);
    let zshrc = format!("{}/.zshrc", home);
    let cargo_env = format!("{}/.cargo/env", home);

    TraceScript::zsh()
        .noise("Last login: Sat Oct 17 09:12:44 on ttys003")
        .run("/etc/zshenv", 1, "true")
        .assign_path("/etc/zprofile", 2, "/usr/bin:/bin:/usr/sbin:/sbin:/usr/local/bin")
        .eval_substitution(&zprofile, 1, "/opt/homebrew/bin/brew shellenv")
        .run(&zprofile, 1, "/opt/homebrew/bin/brew shellenv")
        .assign_path(
            &zprofile,
            1,
            "/opt/homebrew/bin:/opt/homebrew/sbin:/usr/bin:/bin:/usr/sbin:/sbin:/usr/local/bin",
        )
        .run("/etc/zshrc", 4, "setopt BEEP")
        .run(&zshrc, 3, &format!(". {}", cargo_env))
        .assign_path(
            &cargo_env,
            4,
            &format!(
                "{}/.cargo/bin:/opt/homebrew/bin:/opt/homebrew/sbin:/usr/bin:/bin:/usr/sbin:/sbin:/usr/local/bin",
                home
            ),
        )
        .assign_path(
            &zshrc,
            9,
            &format!(
                "{h}/bin:{h}/.cargo/bin:/opt/homebrew/bin:/opt/homebrew/sbin:/usr/bin:/bin:/usr/sbin:/sbin:/usr/local/bin",
                h = home
            ),
        )
}
