//! Scenario file discovery

use std::fs;
use std::path::{Path, PathBuf};

/// All `.toml` scenarios under `base`, sorted, whose relative path contains `filter`
pub fn discover_scenarios(base: &Path, filter: Option<&str>) -> Vec<PathBuf> {
    let mut found = Vec::new();
    collect(base, base, filter, &mut found);
    found.sort();
    found
}

fn collect(base: &Path, dir: &Path, filter: Option<&str>, found: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for path in entries.flatten().map(|entry| entry.path()) {
        if path.is_dir() {
            collect(base, &path, filter, found);
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "toml") {
            continue;
        }
        if let Some(f) = filter
            && !scenario_name(base, &path).contains(f)
        {
            continue;
        }
        found.push(path);
    }
}

/// Path relative to the scenarios root, e.g. `shooting/charge_release.toml`
pub fn scenario_name(base: &Path, path: &Path) -> String {
    path.strip_prefix(base).unwrap_or(path).to_string_lossy().to_string()
}
