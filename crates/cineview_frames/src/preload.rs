// SPDX-License-Identifier: MIT OR Apache-2.0
//! Preload planning.
//!
//! Cine playback moves forward, so the plan loads more frames ahead of
//! the cursor than behind it and orders requests nearest-first, with a
//! distance discount for forward frames.

/// A planned frame load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreloadRequest {
    /// Frame to decode
    pub index: usize,
    /// Should this jump the decode queue?
    pub high_priority: bool,
}

/// Forward frames count as 20% closer than they are
const FORWARD_DISTANCE_SCALE: f32 = 0.8;

/// Frames at most this far ahead of the cursor are high priority
const HIGH_PRIORITY_AHEAD: usize = 2;

/// Plan which frames to decode around the cursor
///
/// The window spans `radius / 3` frames behind the cursor and `radius`
/// ahead, clamped to the sequence. Frames for which `is_resident` returns
/// true are skipped. Requests come out nearest-first (forward frames
/// discounted), ties broken by index.
pub fn plan_preload(
    current: usize,
    total: usize,
    radius: usize,
    is_resident: impl Fn(usize) -> bool,
) -> Vec<PreloadRequest> {
    if total <= 1 {
        return Vec::new();
    }

    let backward_radius = radius / 3;
    let start = current.saturating_sub(backward_radius);
    let end = (current + radius).min(total - 1);

    let mut candidates: Vec<(f32, usize)> = (start..=end)
        .filter(|&i| i != current && !is_resident(i))
        .map(|i| {
            let distance = i.abs_diff(current) as f32;
            let scaled = if i > current {
                distance * FORWARD_DISTANCE_SCALE
            } else {
                distance
            };
            (scaled, i)
        })
        .collect();

    candidates.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

    candidates
        .into_iter()
        .map(|(_, index)| PreloadRequest {
            index,
            high_priority: index <= current + HIGH_PRIORITY_AHEAD,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(plan: &[PreloadRequest]) -> Vec<usize> {
        plan.iter().map(|r| r.index).collect()
    }

    #[test]
    fn test_forward_bias() {
        let plan = plan_preload(10, 100, 6, |_| false);
        let ahead = plan.iter().filter(|r| r.index > 10).count();
        let behind = plan.iter().filter(|r| r.index < 10).count();

        assert_eq!(ahead, 6);
        assert_eq!(behind, 2);
        assert!(!indices(&plan).contains(&10));
    }

    #[test]
    fn test_nearest_first_with_forward_discount() {
        let plan = plan_preload(10, 100, 6, |_| false);
        // Forward 11 scores 0.8, behind 9 scores 1.0, forward 12 scores 1.6.
        assert_eq!(indices(&plan)[..3], [11, 9, 12]);
    }

    #[test]
    fn test_skips_resident_frames() {
        let plan = plan_preload(10, 100, 6, |i| i % 2 == 0);
        assert!(indices(&plan).iter().all(|i| i % 2 == 1));
    }

    #[test]
    fn test_clamped_at_sequence_edges() {
        let plan = plan_preload(0, 5, 10, |_| false);
        assert_eq!(indices(&plan).len(), 4);
        assert!(indices(&plan).iter().all(|&i| i < 5));

        let plan = plan_preload(4, 5, 10, |_| false);
        assert!(indices(&plan).iter().all(|&i| i < 4));
    }

    #[test]
    fn test_high_priority_window() {
        let plan = plan_preload(10, 100, 6, |_| false);
        for request in &plan {
            assert_eq!(request.high_priority, request.index <= 12);
        }
    }

    #[test]
    fn test_single_frame_sequence_plans_nothing() {
        assert!(plan_preload(0, 1, 10, |_| false).is_empty());
        assert!(plan_preload(0, 0, 10, |_| false).is_empty());
    }
}
