use lspath_core::{probe_dir, DirProbe, Existence};
use lspath_types::PathEntry;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::PathBuf;
use tracing::warn;

/// Filesystem access used by the post-processor.
pub trait DirProber {
    fn probe(&self, value: &str) -> DirProbe;
}

/// Probes the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProber;

impl DirProber for FsProber {
    fn probe(&self, value: &str) -> DirProbe {
        probe_dir(value)
    }
}

/// Recompute duplicate, symlink and existence findings over the final list.
pub fn reconcile(entries: &mut [PathEntry]) {
    reconcile_with(entries, &FsProber);
}

/// Single forward pass in priority order; the first occurrence always wins.
///
/// Duplicates compare the tilde-expanded value byte for byte, the same identity
/// unification uses, so `/usr/bin/` is not a repeat of `/usr/bin`.
///
/// Any previously derived flags are cleared first, so running this twice
/// gives the same result.
pub fn reconcile_with(entries: &mut [PathEntry], prober: &impl DirProber) {
    let probes: Vec<DirProbe> = entries.iter().map(|e| prober.probe(&e.value)).collect();

    let mut seen: HashMap<&OsStr, usize> = HashMap::new();
    let mut seen_resolved: HashMap<PathBuf, usize> = HashMap::new();

    for (i, probe) in probes.iter().enumerate() {
        entries[i].clear_derived();

        if let Some(target) = &probe.symlink_target {
            entries[i].is_symlink = true;
            entries[i].symlink_target = Some(target.display().to_string());
        }

        if let Some(&first) = seen.get(probe.normalized.as_os_str()) {
            let (message, remediation) = describe_duplicate(&entries[first], &entries[i], first);
            let entry = &mut entries[i];
            entry.is_duplicate = true;
            entry.duplicate_of = Some(first);
            entry.duplicate_message = Some(message);
            entry.remediation = remediation;
        } else if probe.is_symlink()
            && let Some(&first) = seen_resolved.get(probe.resolved())
        {
            let entry = &mut entries[i];
            entry.symlink_points_to = Some(first);
            entry.symlink_message = Some(format!(
                "Symlink resolves to PATH entry #{} ({})",
                first + 1,
                probe.resolved().display()
            ));
        }

        if !entries[i].is_duplicate {
            seen.insert(probe.normalized.as_os_str(), i);
            seen_resolved.entry(probe.resolved().to_path_buf()).or_insert(i);
        }

        if let Existence::Unknown(err) = &probe.existence {
            warn!(dir = %entries[i].value, error = %err, "could not inspect PATH directory");
        }
        if let Some(diagnostic) = probe.diagnostic() {
            entries[i].diagnostics.push(diagnostic);
        }
    }
}

fn describe_duplicate(original: &PathEntry, repeat: &PathEntry, first: usize) -> (String, Option<String>) {
    let message = if original.source_file == repeat.source_file && original.line_number == repeat.line_number {
        format!("Duplicates PATH entry #{} which was already in $PATH", first + 1)
    } else {
        format!("Duplicates PATH entry #{} (first added by {})", first + 1, original.location())
    };

    let remediation = (repeat.line_number > 0).then(|| {
        format!(
            "Advice: remove line {} from {} (tentative, shell tracing cannot always see the exact line)",
            repeat.line_number, repeat.source_file
        )
    });

    (message, remediation)
}
