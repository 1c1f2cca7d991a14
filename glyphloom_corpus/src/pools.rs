// Sprite-pool builder: accumulate candidate symbols until every width
// class meets its quota, tight-window sample each class, equalize heights,
// and emit five per-class sprites, one combined sprite, and the manifest.
//
// The accumulation loop is bounded by a budget fixed up front from the
// initial target count and filter strictness. Each completed pass that
// leaves a class short grows the target; running out of budget aborts the
// run — never a short corpus.

use crate::classify::{WIDTH_CLASSES, WIDTH_RULE, WIDTH_THRESHOLDS, WidthPools, width_class};
use crate::collector::Collector;
use crate::error::BuildError;
use crate::geometry::normalize_to_frame;
use crate::hash::{content_hash, hash_hex};
use crate::manifest::{PoolItemRecord, PoolManifest};
use crate::options::{COMBINED_SPRITE_FILE, PoolOptions};
use crate::render::RenderAdapter;
use crate::sampler::sample_ids;
use crate::svg::{apply_scale, build_sprite, build_symbol, with_symbol_id};
use glyphloom_lang::{SynthProfile, WordEngine, WordSynthesizer};
use glyphloom_prng::StreamRng;
use glyphloom_script::ScriptEngine;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Bounding-box margin around a rendered word symbol.
const SYMBOL_MARGIN: f64 = 20.0;

/// Target-count growth per pass that leaves a class under quota.
const TARGET_GROWTH_FLOOR: usize = 250;

/// One admitted symbol in the accumulation pool.
#[derive(Debug, Clone)]
pub struct PoolItem {
    pub id: String,
    pub word: String,
    pub hash: u32,
    pub glyph_count: usize,
    pub width_class: u8,
    pub symbol: String,
    pub normalized_scale: f64,
    pub normalized_width: f64,
    pub normalized_height: f64,
    pub normalized_aspect: f64,
}

/// What a successful pool run produced.
#[derive(Debug)]
pub struct PoolReport {
    pub out_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub pool_files: BTreeMap<u8, String>,
    pub combined_file: String,
    pub per_pool: usize,
    pub attempts: u64,
}

/// Run the pool builder against injected word and script engines.
pub fn build_pools<W: WordEngine + ?Sized, S: ScriptEngine + ?Sized>(
    options: &PoolOptions,
    words: &W,
    script: &S,
) -> Result<PoolReport, BuildError> {
    options.validate()?;

    let synthesizer = WordSynthesizer::new(words, SynthProfile::Pool);
    if synthesizer.usable_roots().is_empty() {
        return Err(BuildError::MissingDependency(
            "word engine exposes no usable roots".to_string(),
        ));
    }

    let adapter = RenderAdapter::new(script);
    let filters = options.filter_set();
    let mut rng = StreamRng::new(options.seed.value);
    let mut collector: Collector<PoolItem> = Collector::new();

    let mut target_count = options.effective_base_count();
    let max_attempts = options.attempt_budget();

    while collector.attempts() < max_attempts {
        while collector.len() < target_count && collector.attempts() < max_attempts {
            collector.record_attempt();

            let candidate = synthesizer.next(&mut rng);
            let id = format!("g-{:04}", collector.len() + 1);

            // Expected failures (unrenderable candidates) retry silently.
            let Ok((glyphs, row)) = adapter.render_row(&candidate.text, false, SYMBOL_MARGIN)
            else {
                continue;
            };

            let normalized = normalize_to_frame(&row.content, row.view_box);
            if filters.rejects(&normalized.content).is_some() {
                continue;
            }

            let hash = content_hash(&format!("{}|{}", normalized.view_box, normalized.content));
            if collector.is_duplicate(hash) {
                continue;
            }

            let symbol = build_symbol(&id, &normalized.view_box, &normalized.content);
            collector.admit(
                hash,
                PoolItem {
                    id,
                    word: candidate.text,
                    hash,
                    glyph_count: glyphs.len(),
                    width_class: width_class(glyphs.len()),
                    symbol,
                    normalized_scale: normalized.scale,
                    normalized_width: normalized.width,
                    normalized_height: normalized.height,
                    normalized_aspect: normalized.aspect,
                },
            );
        }

        let pools = WidthPools::derive(
            collector
                .items()
                .iter()
                .map(|item| (item.id.as_str(), item.glyph_count)),
        );
        if pools.quotas_met(options.per_pool) {
            return write_pools(options, &pools, &collector);
        }
        target_count += (options.per_pool * 2).max(TARGET_GROWTH_FLOOR);
    }

    Err(BuildError::GenerationExhausted {
        attempts: collector.attempts(),
        hint: format!(
            "could not fill per-pool={} quotas; raise --base-count or relax filters",
            options.per_pool
        ),
    })
}

fn write_pools(
    options: &PoolOptions,
    pools: &WidthPools,
    collector: &Collector<PoolItem>,
) -> Result<PoolReport, BuildError> {
    let item_by_id: BTreeMap<&str, &PoolItem> = collector
        .items()
        .iter()
        .map(|item| (item.id.as_str(), item))
        .collect();

    // Sampling draws from the derived stream, never the generation stream.
    let mut sample_rng = StreamRng::sampling(options.seed.value);
    let mut sampled_pools: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for class in WIDTH_CLASSES {
        let candidates: Vec<(String, Option<f64>)> = pools
            .class_ids(class)
            .iter()
            .map(|id| {
                let height = item_by_id
                    .get(id.as_str())
                    .map(|item| item.normalized_height)
                    .filter(|h| h.is_finite());
                (id.clone(), height)
            })
            .collect();
        let picked = sample_ids(&candidates, options.per_pool, &mut sample_rng);
        sampled_pools.insert(class.to_string(), picked);
    }

    let mut global_target_height = f64::INFINITY;
    for ids in sampled_pools.values() {
        for id in ids {
            if let Some(item) = item_by_id.get(id.as_str()) {
                if item.normalized_height.is_finite() {
                    global_target_height = global_target_height.min(item.normalized_height);
                }
            }
        }
    }
    if !global_target_height.is_finite() || global_target_height <= 0.0 {
        return Err(BuildError::InvariantViolation(
            "no sampled item provides a usable global target height".to_string(),
        ));
    }

    fs::create_dir_all(&options.out_dir)?;
    let generated_at = options.timestamp();
    let seed_summary = options.seed.summary();

    let mut pool_files_by_class: BTreeMap<u8, String> = BTreeMap::new();
    let mut pool_files: BTreeMap<String, String> = BTreeMap::new();
    let mut pool_target_heights: BTreeMap<String, f64> = BTreeMap::new();
    let mut sampled_items: Vec<PoolItemRecord> = Vec::new();
    let mut combined_symbols: Vec<String> = Vec::new();

    for class in WIDTH_CLASSES {
        let key = class.to_string();
        let ids = sampled_pools
            .get(&key)
            .ok_or_else(|| BuildError::InvariantViolation(format!("missing pool {key}")))?;

        let mut pool_symbols = Vec::with_capacity(ids.len());
        for id in ids {
            let item = item_by_id.get(id.as_str()).ok_or_else(|| {
                BuildError::InvariantViolation(format!(
                    "missing sampled symbol {id:?} in pool {key}"
                ))
            })?;
            let item_height = if item.normalized_height.is_finite() {
                item.normalized_height
            } else {
                global_target_height
            };
            let factor = if item_height > 0.0 {
                global_target_height / item_height
            } else {
                1.0
            };
            pool_symbols.push(apply_scale(&item.symbol, factor));
            sampled_items.push(PoolItemRecord {
                id: item.id.clone(),
                word: item.word.clone(),
                hash: hash_hex(item.hash),
                glyph_count: item.glyph_count,
                width_unit: class,
                normalized_scale: item.normalized_scale * factor,
                normalized_width: item.normalized_width * factor,
                normalized_height: item.normalized_height * factor,
                normalized_aspect: item.normalized_aspect,
                height_normalize_scale: factor,
            });
        }
        pool_target_heights.insert(key.clone(), global_target_height);

        let filename = format!("glyph-pool-w{class}.svg");
        let sprite = build_sprite(
            &pool_symbols,
            &format!(
                "<!-- Generated by build_pools at {generated_at}; width=w{class}; count={}; \
                 seed={seed_summary}; banCurly={} -->",
                options.per_pool, options.ban_curly
            ),
        );
        fs::write(options.out_dir.join(&filename), sprite)?;

        if let Some(first) = pool_symbols.first() {
            combined_symbols.push(with_symbol_id(first, &format!("w{class}")));
        }
        pool_files.insert(key, filename.clone());
        pool_files_by_class.insert(class, filename);
    }

    let combined = build_sprite(
        &combined_symbols,
        &format!(
            "<!-- Generated by build_pools at {generated_at}; symbols=5; \
             one-per-width(w1..w5); seed={seed_summary}; banCurly={} -->",
            options.ban_curly
        ),
    );
    fs::write(options.out_dir.join(COMBINED_SPRITE_FILE), combined)?;

    let manifest = PoolManifest {
        generated_at,
        per_pool: options.per_pool,
        total: options.per_pool * WIDTH_CLASSES.len(),
        seed: options.seed.label.clone(),
        resolved_seed: options.seed.value,
        ban_curly_diacritics: options.ban_curly,
        width_units: WIDTH_CLASSES.to_vec(),
        width_thresholds: WIDTH_THRESHOLDS.to_vec(),
        width_rule: WIDTH_RULE.to_string(),
        pool_target_heights,
        single_sprite_file: COMBINED_SPRITE_FILE.to_string(),
        pool_files,
        pools: sampled_pools,
        items: sampled_items,
    };
    let manifest_path = options.out_dir.join(&options.manifest_file);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    Ok(PoolReport {
        out_dir: options.out_dir.clone(),
        manifest_path,
        pool_files: pool_files_by_class,
        combined_file: COMBINED_SPRITE_FILE.to_string(),
        per_pool: options.per_pool,
        attempts: collector.attempts(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::resolve_seed;
    use glyphloom_lang::default_roots;
    use glyphloom_script::{GlyphShape, RenderFailure, StrokeScript};

    fn small_options(dir: &std::path::Path) -> PoolOptions {
        let mut options = PoolOptions::with_seed(resolve_seed(Some("42")));
        options.per_pool = 2;
        options.base_count = 40;
        options.out_dir = dir.to_path_buf();
        options.generated_at = Some(chrono::DateTime::from_timestamp(1_754_000_000, 0).unwrap());
        options
    }

    #[test]
    fn small_run_fills_every_class_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let options = small_options(dir.path());
        let report = build_pools(&options, &default_roots(), &StrokeScript::new()).unwrap();

        assert_eq!(report.pool_files.len(), 5);
        for class in WIDTH_CLASSES {
            let path = dir.path().join(format!("glyph-pool-w{class}.svg"));
            assert!(path.exists(), "missing pool file for w{class}");
            let sprite = fs::read_to_string(path).unwrap();
            assert_eq!(sprite.matches("<symbol ").count(), options.per_pool);
        }

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report.manifest_path).unwrap()).unwrap();
        assert_eq!(manifest["perPool"], 2);
        assert_eq!(manifest["total"], 10);
        assert_eq!(manifest["resolvedSeed"], 42);
        assert_eq!(manifest["items"].as_array().unwrap().len(), 10);

        // Class assignment is the clamped glyph count for every item.
        for item in manifest["items"].as_array().unwrap() {
            let count = item["glyphCount"].as_u64().unwrap();
            let unit = item["widthUnit"].as_u64().unwrap();
            assert_eq!(unit, count.clamp(1, 5));
        }

        let combined = fs::read_to_string(dir.path().join(&report.combined_file)).unwrap();
        assert_eq!(combined.matches("<symbol ").count(), 5);
        for class in WIDTH_CLASSES {
            assert!(combined.contains(&format!("<symbol id=\"w{class}\"")));
        }
    }

    #[test]
    fn emitted_hashes_are_pairwise_distinct() {
        let dir = tempfile::tempdir().unwrap();
        let options = small_options(dir.path());
        let report = build_pools(&options, &default_roots(), &StrokeScript::new()).unwrap();
        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(report.manifest_path).unwrap()).unwrap();
        let hashes: Vec<&str> = manifest["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|item| item["hash"].as_str().unwrap())
            .collect();
        let unique: std::collections::BTreeSet<&str> = hashes.iter().copied().collect();
        assert_eq!(unique.len(), hashes.len());
    }

    struct NeverRenders;

    impl ScriptEngine for NeverRenders {
        fn parse(&self, _: &str, _: bool) -> Result<Vec<GlyphShape>, RenderFailure> {
            Err(RenderFailure::EmptyText)
        }
    }

    #[test]
    fn unfillable_quota_exhausts_the_budget() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = small_options(dir.path());
        options.per_pool = 1;
        options.base_count = 5;
        let err = build_pools(&options, &default_roots(), &NeverRenders).unwrap_err();
        match err {
            BuildError::GenerationExhausted { attempts, .. } => {
                assert_eq!(attempts, options.attempt_budget());
            }
            other => panic!("expected GenerationExhausted, got {other:?}"),
        }
        assert!(
            !dir.path().join(&options.manifest_file).exists(),
            "failed runs must not leave a manifest"
        );
    }

    struct EmptyLexicon;

    impl WordEngine for EmptyLexicon {
        fn root_inventory(&self) -> Vec<String> {
            Vec::new()
        }

        fn generate(
            &self,
            _: &glyphloom_lang::WordConstraints,
        ) -> Result<String, glyphloom_lang::InvalidCombination> {
            Err(glyphloom_lang::InvalidCombination::EmptyRoot)
        }
    }

    #[test]
    fn engine_without_roots_is_a_missing_dependency() {
        let dir = tempfile::tempdir().unwrap();
        let options = small_options(dir.path());
        let err = build_pools(&options, &EmptyLexicon, &StrokeScript::new()).unwrap_err();
        assert!(matches!(err, BuildError::MissingDependency(_)));
    }

    #[test]
    fn invalid_options_fail_before_any_work() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = small_options(dir.path());
        options.per_pool = 0;
        let err = build_pools(&options, &default_roots(), &StrokeScript::new()).unwrap_err();
        assert!(matches!(err, BuildError::InvalidArgument(_)));
    }
}
