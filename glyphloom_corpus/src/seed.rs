// Seed resolution.
//
// Three cases, in order: absent or blank input draws a fresh pseudo-random
// 32-bit value (no label recorded); numeric text floors to an integer and
// keeps the literal text as the label; any other text hashes to 32 bits
// with the same FNV-1a fold used for content hashing, again keeping the
// literal label. The resolved value is always written to the manifest, so
// even unlabeled runs stay reproducible after the fact.

use crate::hash::content_hash;
use std::time::{SystemTime, UNIX_EPOCH};

/// A resolved run seed: the numeric value feeding the streams, plus the
/// original textual label when one was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSeed {
    pub value: u32,
    pub label: Option<String>,
}

impl ResolvedSeed {
    /// Human-readable summary, as printed and recorded by the builders.
    pub fn summary(&self) -> String {
        match &self.label {
            None => format!("random (resolved={})", self.value),
            Some(label) => format!("{label} (resolved={})", self.value),
        }
    }
}

/// Resolve a seed from optional CLI text.
pub fn resolve_seed(input: Option<&str>) -> ResolvedSeed {
    let Some(raw) = input else {
        return ResolvedSeed {
            value: fresh_seed(),
            label: None,
        };
    };
    let normalized = raw.trim();
    if normalized.is_empty() {
        return ResolvedSeed {
            value: fresh_seed(),
            label: None,
        };
    }
    if let Ok(numeric) = normalized.parse::<f64>() {
        if numeric.is_finite() {
            return ResolvedSeed {
                value: numeric.floor() as i64 as u32,
                label: Some(normalized.to_string()),
            };
        }
    }
    ResolvedSeed {
        value: content_hash(normalized),
        label: Some(normalized.to_string()),
    }
}

/// Fresh 32-bit seed from system-clock nanoseconds, folded down.
/// Non-cryptographic by design; only unlabeled runs use it.
fn fresh_seed() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0x5eed_cafe);
    (nanos ^ (nanos >> 32) ^ (nanos >> 64)) as u32
}
