use serde::Serialize;
use std::fmt;

/// Broad grouping of a PATH directory, used in verbose reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PathCategory {
    UserTools,
    VersionManagers,
    PackageManagers,
    UserBinaries,
    SystemPaths,
    Applications,
    Other,
}

impl fmt::Display for PathCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PathCategory::UserTools => "User Tools & Languages",
            PathCategory::VersionManagers => "Version Managers",
            PathCategory::PackageManagers => "Package Managers",
            PathCategory::UserBinaries => "User Binaries",
            PathCategory::SystemPaths => "System Paths",
            PathCategory::Applications => "Applications",
            PathCategory::Other => "Other Paths",
        };
        f.write_str(label)
    }
}

const TOOL_MARKERS: [&str; 8] = [
    "flutter", "cargo", "go/bin", "dotnet", "dart", "rust", "bun", "deno",
];
const VERSION_MANAGER_MARKERS: [&str; 6] = ["nvm", "nodenv", "pyenv", "rbenv", "asdf", "mise"];
const SYSTEM_PREFIXES: [&str; 5] = ["/usr/bin", "/bin", "/usr/sbin", "/sbin", "/system"];

pub fn categorize(path: &str) -> PathCategory {
    let p = path.to_lowercase();

    if TOOL_MARKERS.iter().any(|m| p.contains(m)) {
        return PathCategory::UserTools;
    }
    if VERSION_MANAGER_MARKERS.iter().any(|m| p.contains(m)) {
        return PathCategory::VersionManagers;
    }
    if p.starts_with("/opt/homebrew")
        || p.starts_with("/usr/local")
        || p.contains("cellar")
        || p.contains("npm")
    {
        return PathCategory::PackageManagers;
    }
    let in_home = p.starts_with("/users/") || p.starts_with("/home/") || p.starts_with('~');
    if in_home && p.contains("/bin") {
        return PathCategory::UserBinaries;
    }
    if SYSTEM_PREFIXES.iter().any(|s| p.starts_with(s)) {
        return PathCategory::SystemPaths;
    }
    if p.contains("/applications/") || p.contains(".app/") {
        return PathCategory::Applications;
    }
    PathCategory::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert_eq!(categorize("/home/me/.cargo/bin"), PathCategory::UserTools);
        assert_eq!(categorize("/home/me/.nvm/versions/node/v20/bin"), PathCategory::VersionManagers);
        assert_eq!(categorize("/opt/homebrew/bin"), PathCategory::PackageManagers);
        assert_eq!(categorize("/usr/local/bin"), PathCategory::PackageManagers);
        assert_eq!(categorize("/Users/me/.local/bin"), PathCategory::UserBinaries);
        assert_eq!(categorize("/usr/bin"), PathCategory::SystemPaths);
        assert_eq!(categorize("/Applications/Foo.app/Contents/bin"), PathCategory::Applications);
        assert_eq!(categorize("/srv/tools"), PathCategory::Other);
        assert_eq!(PathCategory::UserTools.to_string(), "User Tools & Languages");
    }
}
