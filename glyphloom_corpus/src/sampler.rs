// Tight-window sampling: pick the most visually homogeneous size-K subset
// of a width class.
//
// Sort candidates by height (id as tie-break, for full determinism), then
// scan every contiguous window of exactly K entries. The chosen window
// minimizes the height range first and the distance between its own
// median and the global median second — the second criterion keeps the
// sample representative instead of degenerating to whichever dense
// cluster happens to sit at an extreme. First-found wins ties.
//
// The returned ids are shuffled with the sampling stream for display
// order only; shuffling never affects which K were chosen.

use glyphloom_prng::StreamRng;

/// Select K ids by tight height window. Returns empty when fewer than K
/// entries carry a usable (finite) height — callers then fall back.
pub fn tight_window_ids(
    candidates: &[(String, Option<f64>)],
    k: usize,
    rng: &mut StreamRng,
) -> Vec<String> {
    let mut entries: Vec<(&str, f64)> = candidates
        .iter()
        .filter_map(|(id, height)| {
            height
                .filter(|h| h.is_finite())
                .map(|h| (id.as_str(), h))
        })
        .collect();
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(b.0))
    });

    if k == 0 || entries.len() < k {
        return Vec::new();
    }

    let global_median = entries[(entries.len() - 1) / 2].1;
    let mut best_start = 0;
    let mut best_range = f64::INFINITY;
    let mut best_median_distance = f64::INFINITY;

    for start in 0..=entries.len() - k {
        let end = start + k - 1;
        let range = entries[end].1 - entries[start].1;
        let window_median = entries[start + (k - 1) / 2].1;
        let median_distance = (window_median - global_median).abs();

        if range < best_range || (range == best_range && median_distance < best_median_distance) {
            best_range = range;
            best_median_distance = median_distance;
            best_start = start;
        }
    }

    let mut chosen: Vec<String> = entries[best_start..best_start + k]
        .iter()
        .map(|(id, _)| id.to_string())
        .collect();
    rng.shuffle(&mut chosen);
    chosen
}

/// Sample K ids for one class: tight window when enough usable heights
/// exist, otherwise a deterministic shuffle of the full candidate list,
/// truncated to K.
pub fn sample_ids(
    candidates: &[(String, Option<f64>)],
    k: usize,
    rng: &mut StreamRng,
) -> Vec<String> {
    let picked = tight_window_ids(candidates, k, rng);
    if picked.len() >= k {
        return picked;
    }
    let mut fallback: Vec<String> = candidates.iter().map(|(id, _)| id.clone()).collect();
    rng.shuffle(&mut fallback);
    fallback.truncate(k);
    fallback
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(heights: &[f64]) -> Vec<(String, Option<f64>)> {
        heights
            .iter()
            .enumerate()
            .map(|(i, h)| (format!("g-{:04}", i + 1), Some(*h)))
            .collect()
    }

    fn heights_of(ids: &[String], source: &[(String, Option<f64>)]) -> Vec<f64> {
        ids.iter()
            .map(|id| {
                source
                    .iter()
                    .find(|(sid, _)| sid == id)
                    .and_then(|(_, h)| *h)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn window_never_spans_a_gap() {
        // Reference array: the chosen triple must stay inside one of the
        // two dense clusters and never reach across to 50.
        let source = candidates(&[1.0, 2.0, 2.0, 3.0, 9.0, 10.0, 10.0, 11.0, 50.0]);
        let mut rng = StreamRng::new(1);
        let chosen = tight_window_ids(&source, 3, &mut rng);
        let mut hs = heights_of(&chosen, &source);
        hs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let in_low = hs.iter().all(|h| *h <= 3.0);
        let in_high = hs.iter().all(|h| (9.0..=11.0).contains(h));
        assert!(in_low || in_high, "window spans a gap: {hs:?}");
    }

    #[test]
    fn window_range_is_minimal() {
        let source = candidates(&[4.0, 1.0, 9.0, 2.0, 2.5, 30.0, 8.0]);
        let mut rng = StreamRng::new(2);
        let chosen = tight_window_ids(&source, 3, &mut rng);
        let mut hs = heights_of(&chosen, &source);
        hs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let chosen_range = hs.last().unwrap() - hs.first().unwrap();

        // Brute-force: no size-3 contiguous window of the sorted array has
        // a smaller range.
        let mut sorted = [4.0, 1.0, 9.0, 2.0, 2.5, 30.0, 8.0];
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let min_range = sorted
            .windows(3)
            .map(|w| w[2] - w[0])
            .fold(f64::INFINITY, f64::min);
        assert!((chosen_range - min_range).abs() < 1e-12);
    }

    #[test]
    fn median_distance_breaks_range_ties() {
        // Two windows with range 1: [1,1.5,2] and [8,8.5,9]. The global
        // median is 8.5, so the upper window must win.
        let source = candidates(&[1.0, 1.5, 2.0, 8.0, 8.5, 9.0, 40.0]);
        let mut rng = StreamRng::new(3);
        let chosen = tight_window_ids(&source, 3, &mut rng);
        let hs = heights_of(&chosen, &source);
        assert!(hs.iter().all(|h| (8.0..=9.0).contains(h)), "got {hs:?}");
    }

    #[test]
    fn shuffle_affects_order_not_membership() {
        let source = candidates(&[5.0, 5.1, 5.2, 20.0]);
        let mut rng_a = StreamRng::new(10);
        let mut rng_b = StreamRng::new(11);
        let mut a = tight_window_ids(&source, 3, &mut rng_a);
        let mut b = tight_window_ids(&source, 3, &mut rng_b);
        a.sort();
        b.sort();
        assert_eq!(a, b, "different streams must pick the same members");
    }

    #[test]
    fn too_few_usable_heights_returns_empty() {
        let mut source = candidates(&[1.0, 2.0]);
        source.push(("g-0003".to_string(), None));
        let mut rng = StreamRng::new(4);
        assert!(tight_window_ids(&source, 3, &mut rng).is_empty());
    }

    #[test]
    fn sample_ids_falls_back_to_plain_shuffle() {
        let source: Vec<(String, Option<f64>)> = (0..5)
            .map(|i| (format!("g-{:04}", i + 1), None))
            .collect();
        let mut rng = StreamRng::new(5);
        let picked = sample_ids(&source, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        // Deterministic for a fixed stream.
        let mut rng2 = StreamRng::new(5);
        assert_eq!(picked, sample_ids(&source, 3, &mut rng2));
    }

    #[test]
    fn deterministic_tie_break_by_id() {
        // Equal heights everywhere: the window is decided purely by id
        // order, so membership is stable across runs.
        let source: Vec<(String, Option<f64>)> = (0..6)
            .map(|i| (format!("g-{:04}", i + 1), Some(2.0)))
            .collect();
        let mut rng = StreamRng::new(6);
        let mut chosen = tight_window_ids(&source, 4, &mut rng);
        chosen.sort();
        assert_eq!(chosen, ["g-0001", "g-0002", "g-0003", "g-0004"]);
    }
}
