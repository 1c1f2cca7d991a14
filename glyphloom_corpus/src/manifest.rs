// Manifest schemas.
//
// Field names are camelCase on the wire (the manifests are consumed by
// web tooling). Serialization order follows declaration order, and maps
// are BTreeMaps, so a manifest is byte-stable for a given run. Manifests
// are written exactly once, at the end of a successful run.

use serde::Serialize;
use std::collections::BTreeMap;

/// Per-item record in the pool manifest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolItemRecord {
    pub id: String,
    pub word: String,
    pub hash: String,
    pub glyph_count: usize,
    pub width_unit: u8,
    pub normalized_scale: f64,
    pub normalized_width: f64,
    pub normalized_height: f64,
    pub normalized_aspect: f64,
    pub height_normalize_scale: f64,
}

/// Manifest for a sprite-pool run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolManifest {
    pub generated_at: String,
    pub per_pool: usize,
    pub total: usize,
    pub seed: Option<String>,
    pub resolved_seed: u32,
    pub ban_curly_diacritics: bool,
    pub width_units: Vec<u8>,
    pub width_thresholds: Vec<u8>,
    pub width_rule: String,
    pub pool_target_heights: BTreeMap<String, f64>,
    pub single_sprite_file: String,
    pub pool_files: BTreeMap<String, String>,
    pub pools: BTreeMap<String, Vec<String>>,
    pub items: Vec<PoolItemRecord>,
}

/// Per-glyph record in the slice manifest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphRecord {
    pub index: usize,
    pub file: String,
    pub raw_width: f64,
    pub raw_height: f64,
    pub width: f64,
    pub height: f64,
    pub view_box: String,
}

/// Per-phrase record in the slice manifest.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseRecord {
    pub id: String,
    pub phrase: String,
    pub hash: String,
    pub glyph_count: usize,
    pub phrase_file: String,
    pub phrase_width: f64,
    pub phrase_height: f64,
    pub phrase_view_box: String,
    pub glyphs: Vec<GlyphRecord>,
}

/// Manifest for a phrase/glyph-slice run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliceManifest {
    pub generated_at: String,
    pub count: usize,
    pub min_glyphs: usize,
    pub max_glyphs: usize,
    pub seed: Option<String>,
    pub resolved_seed: u32,
    pub seed_summary: String,
    pub ban_curly_diacritics: bool,
    pub ban_dot_diacritic: bool,
    pub min_raw_glyph_height: f64,
    pub glyph_target_height: f64,
    pub out_dir: String,
    pub items: Vec<PhraseRecord>,
}
