// Width classification: glyph count to ordinal width class.

use std::collections::BTreeMap;

/// The five width classes, in order.
pub const WIDTH_CLASSES: [u8; 5] = [1, 2, 3, 4, 5];

/// Upper glyph-count bounds of classes 1-4 (class 5 is open-ended).
pub const WIDTH_THRESHOLDS: [u8; 4] = [1, 2, 3, 4];

/// Human-readable classification rule, recorded in the manifest.
pub const WIDTH_RULE: &str = "byGlyphCount: w1=1, w2=2, w3=3, w4=4, w5=5+";

/// Map a glyph count to its width class: `clamp(count, 1, 5)`.
pub fn width_class(glyph_count: usize) -> u8 {
    glyph_count.clamp(1, 5) as u8
}

/// Item ids bucketed by width class. Classes are exhaustive and mutually
/// exclusive; every class key is present even when empty.
#[derive(Debug, Clone)]
pub struct WidthPools {
    by_class: BTreeMap<u8, Vec<String>>,
}

impl WidthPools {
    /// Bucket `(id, glyph_count)` pairs, preserving input order per class.
    pub fn derive<'a>(items: impl Iterator<Item = (&'a str, usize)>) -> Self {
        let mut by_class: BTreeMap<u8, Vec<String>> =
            WIDTH_CLASSES.iter().map(|c| (*c, Vec::new())).collect();
        for (id, glyph_count) in items {
            if let Some(pool) = by_class.get_mut(&width_class(glyph_count)) {
                pool.push(id.to_string());
            }
        }
        WidthPools { by_class }
    }

    pub fn class_ids(&self, class: u8) -> &[String] {
        self.by_class.get(&class).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Does every class hold at least `quota` items?
    pub fn quotas_met(&self, quota: usize) -> bool {
        WIDTH_CLASSES
            .iter()
            .all(|c| self.class_ids(*c).len() >= quota)
    }
}
