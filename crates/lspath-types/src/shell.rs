use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A canonical startup file and its position in the shell's load order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonicalFile {
    /// Suffix matched against absolute file paths
    pub suffix: &'static str,
    pub rank: u8,
}

impl CanonicalFile {
    pub fn matches(&self, path: &str) -> bool {
        path.ends_with(self.suffix)
    }

    /// Path shown for a placeholder: personal files are written under `~`.
    pub fn display_path(&self) -> String {
        if self.suffix.starts_with("/.") {
            format!("~{}", self.suffix)
        } else {
            self.suffix.to_string()
        }
    }
}

const ZSH_STARTUP: [CanonicalFile; 8] = [
    CanonicalFile { suffix: "/etc/zshenv", rank: 1 },
    CanonicalFile { suffix: "/.zshenv", rank: 2 },
    CanonicalFile { suffix: "/etc/zprofile", rank: 3 },
    CanonicalFile { suffix: "/.zprofile", rank: 4 },
    CanonicalFile { suffix: "/etc/zshrc", rank: 5 },
    CanonicalFile { suffix: "/.zshrc", rank: 6 },
    CanonicalFile { suffix: "/etc/zlogin", rank: 7 },
    CanonicalFile { suffix: "/.zlogin", rank: 8 },
];

const BASH_STARTUP: [CanonicalFile; 7] = [
    CanonicalFile { suffix: "/etc/profile", rank: 1 },
    CanonicalFile { suffix: "/etc/bash.bashrc", rank: 2 },
    CanonicalFile { suffix: "/etc/bashrc", rank: 3 },
    CanonicalFile { suffix: "/.bash_profile", rank: 4 },
    CanonicalFile { suffix: "/.bash_login", rank: 5 },
    CanonicalFile { suffix: "/.profile", rank: 6 },
    CanonicalFile { suffix: "/.bashrc", rank: 7 },
];

/// The two shell families whose trace format is understood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShellFamily {
    #[default]
    Zsh,
    Bash,
}

impl ShellFamily {
    pub fn name(&self) -> &'static str {
        match self {
            ShellFamily::Zsh => "zsh",
            ShellFamily::Bash => "bash",
        }
    }

    /// Classify an inherited `SHELL` value. Anything not bash is treated as zsh.
    pub fn from_shell_path(shell: &str) -> Self {
        if shell.contains("bash") {
            ShellFamily::Bash
        } else {
            ShellFamily::Zsh
        }
    }

    /// Majority vote over executed file names; ties (and no votes) go to zsh.
    pub fn from_file_names<'a>(files: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut bash, mut zsh) = (0usize, 0usize);
        for file in files {
            let lower = file.to_lowercase();
            if lower.contains("bash") {
                bash += 1;
            }
            if lower.contains("zsh") {
                zsh += 1;
            }
        }
        if bash > zsh {
            ShellFamily::Bash
        } else {
            ShellFamily::Zsh
        }
    }

    /// Canonical startup files in load order.
    pub fn canonical_files(&self) -> &'static [CanonicalFile] {
        match self {
            ShellFamily::Zsh => &ZSH_STARTUP,
            ShellFamily::Bash => &BASH_STARTUP,
        }
    }

    /// Rank of `path` in this family's load order, if it is a canonical file.
    pub fn rank_of(&self, path: &str) -> Option<u8> {
        self.canonical_files()
            .iter()
            .find(|c| c.matches(path))
            .map(|c| c.rank)
    }
}

impl fmt::Display for ShellFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShellFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zsh" => Ok(ShellFamily::Zsh),
            "bash" => Ok(ShellFamily::Bash),
            other => Err(Error::UnknownShell(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_shell_path() {
        assert_eq!(ShellFamily::from_shell_path("/bin/bash"), ShellFamily::Bash);
        assert_eq!(ShellFamily::from_shell_path("/usr/local/bin/zsh"), ShellFamily::Zsh);
        assert_eq!(ShellFamily::from_shell_path("/usr/bin/fish"), ShellFamily::Zsh);
        assert_eq!(ShellFamily::from_shell_path(""), ShellFamily::Zsh);
    }

    #[test]
    fn test_majority_vote() {
        let bash = ["/etc/bash.bashrc", "/home/u/.bashrc", "/etc/zshenv"];
        assert_eq!(ShellFamily::from_file_names(bash), ShellFamily::Bash);

        let tie = ["/etc/bash.bashrc", "/etc/zshenv"];
        assert_eq!(ShellFamily::from_file_names(tie), ShellFamily::Zsh);

        assert_eq!(ShellFamily::from_file_names(Vec::<&str>::new()), ShellFamily::Zsh);
    }

    #[test]
    fn test_rank_lookup_distinguishes_system_and_personal_files() {
        assert_eq!(ShellFamily::Zsh.rank_of("/etc/zshrc"), Some(5));
        assert_eq!(ShellFamily::Zsh.rank_of("/Users/me/.zshrc"), Some(6));
        assert_eq!(ShellFamily::Bash.rank_of("/etc/bash.bashrc"), Some(2));
        assert_eq!(ShellFamily::Bash.rank_of("/home/me/.bashrc"), Some(7));
        assert_eq!(ShellFamily::Bash.rank_of("/home/me/.profile"), Some(6));
        assert_eq!(ShellFamily::Zsh.rank_of("/home/me/.nvm/nvm.sh"), None);
    }

    #[test]
    fn test_display_path_for_personal_files() {
        let files = ShellFamily::Zsh.canonical_files();
        assert_eq!(files[0].display_path(), "/etc/zshenv");
        assert_eq!(files[1].display_path(), "~/.zshenv");
    }

    #[test]
    fn test_parse_shell_name() {
        assert_eq!("BASH".parse::<ShellFamily>().unwrap(), ShellFamily::Bash);
        assert!("fish".parse::<ShellFamily>().is_err());
    }
}
