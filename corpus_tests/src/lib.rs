// Shared helpers for end-to-end corpus tests.
//
// The tests drive the real builders with the built-in engines, so every
// option set here pins the timestamp — byte-identical output across runs
// is the property under test, and wall-clock time is the one input the
// pipeline doesn't derive from the seed.

use chrono::{DateTime, Utc};
use glyphloom_corpus::{PoolOptions, SliceOptions, resolve_seed};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Fixed timestamp used by every pinned options set.
pub fn pinned_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_754_000_000, 0).expect("valid fixed timestamp")
}

/// Small, fast pool options with a pinned timestamp.
pub fn pinned_pool_options(dir: &Path, seed_text: &str) -> PoolOptions {
    let mut options = PoolOptions::with_seed(resolve_seed(Some(seed_text)));
    options.per_pool = 2;
    options.base_count = 40;
    options.out_dir = dir.to_path_buf();
    options.generated_at = Some(pinned_time());
    options
}

/// Small, fast slice options with a pinned timestamp.
pub fn pinned_slice_options(dir: &Path, seed_text: &str) -> SliceOptions {
    let mut options = SliceOptions::with_seed(resolve_seed(Some(seed_text)));
    options.count = 4;
    options.min_glyphs = 1;
    options.max_glyphs = 4;
    options.out_dir = dir.to_path_buf();
    options.generated_at = Some(pinned_time());
    options
}

/// Every regular file under `dir`, keyed by relative path.
pub fn snapshot_tree(dir: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut files = BTreeMap::new();
    collect_files(dir, dir, &mut files);
    files
}

fn collect_files(root: &Path, dir: &Path, files: &mut BTreeMap<String, Vec<u8>>) {
    let entries = fs::read_dir(dir).expect("readable directory");
    for entry in entries {
        let entry = entry.expect("readable directory entry");
        let path = entry.path();
        if path.is_dir() {
            collect_files(root, &path, files);
        } else {
            let relative = path
                .strip_prefix(root)
                .expect("path under root")
                .to_string_lossy()
                .into_owned();
            files.insert(relative, fs::read(&path).expect("readable file"));
        }
    }
}
