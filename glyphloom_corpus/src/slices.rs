// Phrase/glyph-slice builder: generate phrases hitting exact glyph-count
// targets, slice each accepted phrase into individually rendered glyphs,
// equalize glyph heights pad-only, and emit one image per phrase plus one
// per glyph, with the manifest written last.
//
// Glyph-count targets cycle round-robin through [min, max] so the corpus
// covers the whole range evenly. A phrase is rejected wholesale when any
// of its glyphs falls below the minimum raw height — degenerate slivers
// never reach disk.

use crate::collector::Collector;
use crate::error::BuildError;
use crate::geometry::{ViewBox, fixed_height_svg, sanitize_paint, zero_origin_svg};
use crate::hash::{content_hash, hash_hex};
use crate::manifest::{GlyphRecord, PhraseRecord, SliceManifest};
use crate::options::SliceOptions;
use crate::phrase::select_phrase;
use crate::render::RenderAdapter;
use glyphloom_lang::{SynthProfile, WordEngine, WordSynthesizer};
use glyphloom_prng::StreamRng;
use glyphloom_script::ScriptEngine;
use std::fs;
use std::path::PathBuf;

/// The slice manifest always lives at this name inside the out dir.
pub const SLICE_MANIFEST_FILE: &str = "manifest.json";

/// A glyph slice awaiting final height equalization.
#[derive(Debug, Clone)]
struct PendingGlyph {
    index: usize,
    file: String,
    content: String,
    view_box: ViewBox,
}

/// One accepted phrase with its written file and pending glyph slices.
#[derive(Debug, Clone)]
struct PhraseItem {
    id: String,
    phrase: String,
    hash: u32,
    glyph_count: usize,
    phrase_file: String,
    phrase_width: f64,
    phrase_height: f64,
    phrase_view_box: String,
    glyphs: Vec<PendingGlyph>,
}

/// What a successful slice run produced.
#[derive(Debug)]
pub struct SliceReport {
    pub out_dir: PathBuf,
    pub manifest_path: PathBuf,
    pub count: usize,
    pub attempts: u64,
    pub glyph_target_height: f64,
}

/// Run the slice builder against injected word and script engines.
pub fn build_slices<W: WordEngine + ?Sized, S: ScriptEngine + ?Sized>(
    options: &SliceOptions,
    words: &W,
    script: &S,
) -> Result<SliceReport, BuildError> {
    options.validate()?;

    let synthesizer = WordSynthesizer::new(words, SynthProfile::Slice);
    if synthesizer.usable_roots().is_empty() {
        return Err(BuildError::MissingDependency(
            "word engine exposes no usable roots".to_string(),
        ));
    }

    let adapter = RenderAdapter::new(script);
    let filters = options.filter_set();
    let mut rng = StreamRng::new(options.seed.value);
    let mut collector: Collector<PhraseItem> = Collector::new();

    // Reset outputs so reruns never mix stale and fresh files.
    fs::create_dir_all(&options.out_dir)?;
    let phrases_dir = options.out_dir.join("phrases");
    if phrases_dir.exists() {
        fs::remove_dir_all(&phrases_dir)?;
    }
    let stale_manifest = options.out_dir.join(SLICE_MANIFEST_FILE);
    if stale_manifest.exists() {
        fs::remove_file(&stale_manifest)?;
    }
    fs::create_dir_all(&phrases_dir)?;

    let max_attempts = options.attempt_budget();
    let target_range_size = options.max_glyphs - options.min_glyphs + 1;

    while collector.len() < options.count && collector.attempts() < max_attempts {
        collector.record_attempt();
        let target_glyph_count = options.min_glyphs + (collector.len() % target_range_size);

        let Some(candidate) = select_phrase(&mut rng, &synthesizer, &adapter, target_glyph_count)
        else {
            continue;
        };

        let Ok(row) = adapter.layout_shapes(&candidate.glyphs, 0.0) else {
            continue;
        };
        let sanitized = sanitize_paint(&row.content);
        let doc = zero_origin_svg(&sanitized, row.view_box, 1.0);

        if filters.rejects(&doc.text).is_some() {
            continue;
        }
        let hash = content_hash(&doc.text);
        if collector.is_duplicate(hash) {
            continue;
        }

        let id = format!("phrase-{:03}", collector.len() + 1);
        let mut glyphs = Vec::with_capacity(candidate.glyphs.len());
        let mut reject_tiny_glyph = false;
        for (glyph_index, glyph) in candidate.glyphs.iter().enumerate() {
            let Ok(glyph_row) = adapter.layout_shapes(std::slice::from_ref(glyph), 0.0) else {
                reject_tiny_glyph = true;
                break;
            };
            if glyph_row.view_box.height < options.min_raw_glyph_height {
                reject_tiny_glyph = true;
                break;
            }
            glyphs.push(PendingGlyph {
                index: glyph_index + 1,
                file: format!("phrases/{id}/glyph-{:02}.svg", glyph_index + 1),
                content: sanitize_paint(&glyph_row.content),
                view_box: glyph_row.view_box,
            });
        }
        if reject_tiny_glyph {
            continue;
        }

        let phrase_dir = phrases_dir.join(&id);
        fs::create_dir_all(&phrase_dir)?;
        let phrase_file = format!("phrases/{id}/phrase.svg");
        fs::write(options.out_dir.join(&phrase_file), &doc.text)?;

        collector.admit(
            hash,
            PhraseItem {
                id,
                phrase: candidate.text,
                hash,
                glyph_count: candidate.glyphs.len(),
                phrase_file,
                phrase_width: doc.width,
                phrase_height: doc.height,
                phrase_view_box: doc.view_box,
                glyphs,
            },
        );
    }

    if collector.len() < options.count {
        return Err(BuildError::GenerationExhausted {
            attempts: collector.attempts(),
            hint: format!(
                "generated {}/{} phrases; reduce --count or widen the glyph range",
                collector.len(),
                options.count
            ),
        });
    }

    let glyph_target_height = collector
        .items()
        .iter()
        .flat_map(|item| item.glyphs.iter().map(|glyph| glyph.view_box.height))
        .fold(f64::NEG_INFINITY, f64::max);
    if !glyph_target_height.is_finite() || glyph_target_height <= 0.0 {
        return Err(BuildError::InvariantViolation(
            "failed to resolve a unified glyph target height".to_string(),
        ));
    }

    let mut manifest_items = Vec::with_capacity(collector.len());
    for item in collector.items() {
        let mut manifest_glyphs = Vec::with_capacity(item.glyphs.len());
        for glyph in &item.glyphs {
            let glyph_doc = fixed_height_svg(&glyph.content, glyph.view_box, glyph_target_height);
            fs::write(options.out_dir.join(&glyph.file), &glyph_doc.text)?;
            manifest_glyphs.push(GlyphRecord {
                index: glyph.index,
                file: glyph.file.clone(),
                raw_width: glyph.view_box.width,
                raw_height: glyph.view_box.height,
                width: glyph_doc.width,
                height: glyph_doc.height,
                view_box: glyph_doc.view_box,
            });
        }
        manifest_items.push(PhraseRecord {
            id: item.id.clone(),
            phrase: item.phrase.clone(),
            hash: hash_hex(item.hash),
            glyph_count: item.glyph_count,
            phrase_file: item.phrase_file.clone(),
            phrase_width: item.phrase_width,
            phrase_height: item.phrase_height,
            phrase_view_box: item.phrase_view_box.clone(),
            glyphs: manifest_glyphs,
        });
    }

    let manifest = SliceManifest {
        generated_at: options.timestamp(),
        count: options.count,
        min_glyphs: options.min_glyphs,
        max_glyphs: options.max_glyphs,
        seed: options.seed.label.clone(),
        resolved_seed: options.seed.value,
        seed_summary: options.seed.summary(),
        ban_curly_diacritics: options.ban_curly,
        ban_dot_diacritic: options.ban_dot,
        min_raw_glyph_height: options.min_raw_glyph_height,
        glyph_target_height,
        out_dir: options.out_dir.display().to_string(),
        items: manifest_items,
    };
    let manifest_path = options.out_dir.join(SLICE_MANIFEST_FILE);
    fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;

    Ok(SliceReport {
        out_dir: options.out_dir.clone(),
        manifest_path,
        count: options.count,
        attempts: collector.attempts(),
        glyph_target_height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::resolve_seed;
    use glyphloom_lang::default_roots;
    use glyphloom_script::StrokeScript;

    fn small_options(dir: &std::path::Path) -> SliceOptions {
        let mut options = SliceOptions::with_seed(resolve_seed(Some("7")));
        options.count = 4;
        options.min_glyphs = 1;
        options.max_glyphs = 4;
        options.out_dir = dir.to_path_buf();
        options.generated_at = Some(chrono::DateTime::from_timestamp(1_754_000_000, 0).unwrap());
        options
    }

    #[test]
    fn small_run_emits_phrases_glyphs_and_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let options = small_options(dir.path());
        let report = build_slices(&options, &default_roots(), &StrokeScript::new()).unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.manifest_path).unwrap()).unwrap();
        let items = manifest["items"].as_array().unwrap();
        assert_eq!(items.len(), 4);

        // Round-robin targets: 1, 2, 3, 4 glyphs.
        for (index, item) in items.iter().enumerate() {
            assert_eq!(item["glyphCount"].as_u64().unwrap() as usize, index + 1);
            let phrase_file = item["phraseFile"].as_str().unwrap();
            assert!(dir.path().join(phrase_file).exists());
            for glyph in item["glyphs"].as_array().unwrap() {
                assert!(dir.path().join(glyph["file"].as_str().unwrap()).exists());
            }
        }
    }

    #[test]
    fn equalization_is_pad_only_and_width_preserving() {
        let dir = tempfile::tempdir().unwrap();
        let options = small_options(dir.path());
        let report = build_slices(&options, &default_roots(), &StrokeScript::new()).unwrap();

        let manifest: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report.manifest_path).unwrap()).unwrap();
        let target = manifest["glyphTargetHeight"].as_f64().unwrap();
        assert_eq!(target, report.glyph_target_height);

        for item in manifest["items"].as_array().unwrap() {
            for glyph in item["glyphs"].as_array().unwrap() {
                let raw_height = glyph["rawHeight"].as_f64().unwrap();
                let height = glyph["height"].as_f64().unwrap();
                let raw_width = glyph["rawWidth"].as_f64().unwrap();
                let width = glyph["width"].as_f64().unwrap();
                assert!(height >= raw_height, "shrunk below natural height");
                assert_eq!(height, target.max(raw_height));
                assert_eq!(width, raw_width, "width must be untouched");
            }
        }
    }

    #[test]
    fn rerun_resets_the_phrases_tree() {
        let dir = tempfile::tempdir().unwrap();
        let options = small_options(dir.path());
        build_slices(&options, &default_roots(), &StrokeScript::new()).unwrap();

        // Plant a stale file where a rerun must clear it.
        let stale = dir.path().join("phrases/phrase-999");
        fs::create_dir_all(&stale).unwrap();
        fs::write(stale.join("phrase.svg"), "stale").unwrap();

        build_slices(&options, &default_roots(), &StrokeScript::new()).unwrap();
        assert!(!stale.exists(), "stale phrase directory must be removed");
    }

    #[test]
    fn strict_min_height_exhausts_rather_than_underfilling() {
        let dir = tempfile::tempdir().unwrap();
        let mut options = small_options(dir.path());
        options.count = 2;
        // No glyph the engine can draw reaches this height.
        options.min_raw_glyph_height = 10_000.0;
        let err = build_slices(&options, &default_roots(), &StrokeScript::new()).unwrap_err();
        assert!(matches!(err, BuildError::GenerationExhausted { .. }));
        assert!(!dir.path().join(SLICE_MANIFEST_FILE).exists());
    }
}
