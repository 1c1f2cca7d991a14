// Validated builder options.
//
// Options are constructed by the CLI layer (or tests) and validated before
// any generation begins; every rejection is an `InvalidArgument` carrying
// the offending flag and value. Attempt budgets scale with how many
// filters are active, since stricter filters need proportionally more
// candidates to fill the same quotas.

use crate::error::BuildError;
use crate::filters::{CURLY_DIACRITIC_FILTER, DOT_DIACRITIC_FILTER, FilterSet};
use crate::seed::ResolvedSeed;
use chrono::{DateTime, SecondsFormat, Utc};
use std::path::PathBuf;

pub const DEFAULT_PER_POOL: usize = 200;
pub const DEFAULT_BASE_COUNT: usize = 1200;
pub const DEFAULT_POOL_OUT_DIR: &str = ".tmp/glyph-pools";
pub const DEFAULT_POOL_MANIFEST: &str = "glyph-pools-manifest.json";
/// The combined one-symbol-per-class sprite.
pub const COMBINED_SPRITE_FILE: &str = "glyph-pool.svg";

pub const DEFAULT_SLICE_COUNT: usize = 20;
pub const DEFAULT_MIN_GLYPHS: usize = 1;
pub const DEFAULT_MAX_GLYPHS: usize = 10;
pub const DEFAULT_SLICE_OUT_DIR: &str = ".tmp/glyph-phrases";
pub const DEFAULT_MIN_RAW_GLYPH_HEIGHT: f64 = 40.0;

pub const DEFAULT_BAN_CURLY: bool = true;
pub const DEFAULT_BAN_DOT: bool = false;

/// Reject non-positive numeric flag values, pre-generation.
pub fn positive_count(value: i64, flag: &str) -> Result<usize, BuildError> {
    if value <= 0 {
        return Err(BuildError::InvalidArgument(format!(
            "invalid {flag} value: {value}"
        )));
    }
    Ok(value as usize)
}

/// Options for the sprite-pool builder.
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub per_pool: usize,
    pub base_count: usize,
    pub seed: ResolvedSeed,
    pub out_dir: PathBuf,
    pub manifest_file: String,
    pub ban_curly: bool,
    /// Pinned timestamp for reproducible output; `None` means now.
    pub generated_at: Option<DateTime<Utc>>,
}

impl PoolOptions {
    /// Defaults with an explicit seed.
    pub fn with_seed(seed: ResolvedSeed) -> Self {
        PoolOptions {
            per_pool: DEFAULT_PER_POOL,
            base_count: DEFAULT_BASE_COUNT,
            seed,
            out_dir: PathBuf::from(DEFAULT_POOL_OUT_DIR),
            manifest_file: DEFAULT_POOL_MANIFEST.to_string(),
            ban_curly: DEFAULT_BAN_CURLY,
            generated_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.per_pool == 0 {
            return Err(BuildError::InvalidArgument(
                "invalid --per-pool value: 0".to_string(),
            ));
        }
        if self.base_count == 0 {
            return Err(BuildError::InvalidArgument(
                "invalid --base-count value: 0".to_string(),
            ));
        }
        if self.manifest_file.is_empty() {
            return Err(BuildError::InvalidArgument(
                "--manifest requires a file name".to_string(),
            ));
        }
        Ok(())
    }

    /// Initial candidate target: the base count, but never less than the
    /// five quotas combined.
    pub fn effective_base_count(&self) -> usize {
        self.base_count.max(self.per_pool * 5)
    }

    /// Total attempt budget, fixed up front. The multiplier grows with
    /// filter strictness.
    pub fn attempt_budget(&self) -> u64 {
        let multiplier: u64 = if self.ban_curly { 180 } else { 70 };
        self.effective_base_count() as u64 * multiplier * 5
    }

    pub fn filter_set(&self) -> FilterSet {
        let mut set = FilterSet::new();
        if self.ban_curly {
            set = set.with(CURLY_DIACRITIC_FILTER);
        }
        set
    }

    pub fn timestamp(&self) -> String {
        render_timestamp(self.generated_at)
    }
}

/// Options for the phrase/glyph-slice builder.
#[derive(Debug, Clone)]
pub struct SliceOptions {
    pub count: usize,
    pub min_glyphs: usize,
    pub max_glyphs: usize,
    pub seed: ResolvedSeed,
    pub out_dir: PathBuf,
    pub ban_curly: bool,
    pub ban_dot: bool,
    pub min_raw_glyph_height: f64,
    /// Pinned timestamp for reproducible output; `None` means now.
    pub generated_at: Option<DateTime<Utc>>,
}

impl SliceOptions {
    /// Defaults with an explicit seed.
    pub fn with_seed(seed: ResolvedSeed) -> Self {
        SliceOptions {
            count: DEFAULT_SLICE_COUNT,
            min_glyphs: DEFAULT_MIN_GLYPHS,
            max_glyphs: DEFAULT_MAX_GLYPHS,
            seed,
            out_dir: PathBuf::from(DEFAULT_SLICE_OUT_DIR),
            ban_curly: DEFAULT_BAN_CURLY,
            ban_dot: DEFAULT_BAN_DOT,
            min_raw_glyph_height: DEFAULT_MIN_RAW_GLYPH_HEIGHT,
            generated_at: None,
        }
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        if self.count == 0 {
            return Err(BuildError::InvalidArgument(
                "invalid --count value: 0".to_string(),
            ));
        }
        if self.min_glyphs == 0 {
            return Err(BuildError::InvalidArgument(
                "invalid --min-glyphs value: 0".to_string(),
            ));
        }
        if self.max_glyphs == 0 {
            return Err(BuildError::InvalidArgument(
                "invalid --max-glyphs value: 0".to_string(),
            ));
        }
        if self.min_glyphs > self.max_glyphs {
            return Err(BuildError::InvalidArgument(format!(
                "--min-glyphs ({}) must be <= --max-glyphs ({})",
                self.min_glyphs, self.max_glyphs
            )));
        }
        if !self.min_raw_glyph_height.is_finite() || self.min_raw_glyph_height <= 0.0 {
            return Err(BuildError::InvalidArgument(format!(
                "invalid --min-raw-glyph-height value: {}",
                self.min_raw_glyph_height
            )));
        }
        Ok(())
    }

    /// Total attempt budget: stricter filter combinations get larger
    /// multipliers.
    pub fn attempt_budget(&self) -> u64 {
        let multiplier: u64 = if self.ban_curly && self.ban_dot {
            9000
        } else if self.ban_curly || self.ban_dot {
            6500
        } else {
            3500
        };
        self.count as u64 * multiplier
    }

    pub fn filter_set(&self) -> FilterSet {
        let mut set = FilterSet::new();
        if self.ban_curly {
            set = set.with(CURLY_DIACRITIC_FILTER);
        }
        if self.ban_dot {
            set = set.with(DOT_DIACRITIC_FILTER);
        }
        set
    }

    pub fn timestamp(&self) -> String {
        render_timestamp(self.generated_at)
    }
}

fn render_timestamp(pinned: Option<DateTime<Utc>>) -> String {
    pinned
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::resolve_seed;

    #[test]
    fn positive_count_rejects_nonpositive() {
        assert!(positive_count(0, "--count").is_err());
        assert!(positive_count(-3, "--count").is_err());
        assert_eq!(positive_count(5, "--count").unwrap(), 5);
    }

    #[test]
    fn pool_base_count_never_undercuts_quotas() {
        let mut options = PoolOptions::with_seed(resolve_seed(Some("1")));
        options.per_pool = 300;
        options.base_count = 100;
        assert_eq!(options.effective_base_count(), 1500);
    }

    #[test]
    fn pool_budget_scales_with_the_curly_filter() {
        let mut options = PoolOptions::with_seed(resolve_seed(Some("1")));
        options.per_pool = 10;
        options.base_count = 50;
        options.ban_curly = false;
        let relaxed = options.attempt_budget();
        options.ban_curly = true;
        assert!(options.attempt_budget() > relaxed);
    }

    #[test]
    fn slice_validate_rejects_inverted_ranges() {
        let mut options = SliceOptions::with_seed(resolve_seed(Some("1")));
        options.min_glyphs = 5;
        options.max_glyphs = 3;
        let err = options.validate().unwrap_err();
        assert!(err.to_string().contains("--min-glyphs"));
    }

    #[test]
    fn slice_budget_tiers() {
        let mut options = SliceOptions::with_seed(resolve_seed(Some("1")));
        options.count = 2;
        options.ban_curly = false;
        options.ban_dot = false;
        assert_eq!(options.attempt_budget(), 7000);
        options.ban_curly = true;
        assert_eq!(options.attempt_budget(), 13_000);
        options.ban_dot = true;
        assert_eq!(options.attempt_budget(), 18_000);
    }

    #[test]
    fn filter_sets_follow_the_toggles() {
        let mut options = SliceOptions::with_seed(resolve_seed(Some("1")));
        options.ban_curly = true;
        options.ban_dot = true;
        assert_eq!(options.filter_set().len(), 2);
        options.ban_curly = false;
        options.ban_dot = false;
        assert!(options.filter_set().is_empty());
    }

    #[test]
    fn pinned_timestamps_render_as_rfc3339_millis() {
        use chrono::TimeZone;
        let mut options = PoolOptions::with_seed(resolve_seed(Some("1")));
        options.generated_at = Some(Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap());
        assert_eq!(options.timestamp(), "2026-08-06T12:00:00.000Z");
    }
}
