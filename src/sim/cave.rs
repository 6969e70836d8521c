//! Cave path generation
//!
//! The tunnel is a sequence of samples at fixed horizontal spacing. Each
//! sample holds the centerline y and the gap height at that x; walls between
//! samples are linear. New samples are appended at the leading edge as the
//! camera advances and dropped once they fall behind it.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::lerp;
use crate::tuning::Tuning;

/// One sampled point of the tunnel profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CaveSegment {
    pub x: f32,
    pub center_y: f32,
    pub gap_height: f32,
}

/// Tunnel profile at an arbitrary x
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaveSample {
    pub center_y: f32,
    pub gap_height: f32,
}

impl CaveSample {
    /// y of the ceiling
    #[inline]
    pub fn top(&self) -> f32 {
        self.center_y - self.gap_height / 2.0
    }

    /// y of the floor
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center_y + self.gap_height / 2.0
    }
}

impl From<&CaveSegment> for CaveSample {
    fn from(segment: &CaveSegment) -> Self {
        Self {
            center_y: segment.center_y,
            gap_height: segment.gap_height,
        }
    }
}

/// Keep the whole gap inside `[0, play_height]`
fn clamp_center(center_y: f32, gap_height: f32, play_height: f32) -> f32 {
    let half_gap = gap_height / 2.0;
    center_y.clamp(half_gap, (play_height - half_gap).max(half_gap))
}

/// The active stretch of tunnel, sorted by ascending x
#[derive(Debug, Clone, Default)]
pub struct Cave {
    segments: VecDeque<CaveSegment>,
}

impl Cave {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> impl ExactSizeIterator<Item = &CaveSegment> + '_ {
        self.segments.iter()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&CaveSegment> {
        self.segments.front()
    }

    pub fn last(&self) -> Option<&CaveSegment> {
        self.segments.back()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Replace the cave with a fresh stretch starting at `camera_x`
    ///
    /// The initial profile is a slow wave around the screen middle plus
    /// jitter; it is not cumulative, so a run always opens near the middle.
    pub fn generate_initial(
        &mut self,
        rng: &mut RandomSource,
        tuning: &Tuning,
        camera_x: f32,
        gap_height: f32,
    ) {
        self.segments.clear();

        let count = (tuning.viewport_width / tuning.segment_width).ceil() as usize
            + tuning.initial_extra_segments;
        let middle = tuning.viewport_height / 2.0;

        for i in 0..count {
            let x = camera_x + i as f32 * tuning.segment_width;
            let variation = rng.signed_noise(tuning.initial_noise);
            let y = middle
                + (x * tuning.initial_wave_frequency).sin() * tuning.initial_wave_amplitude
                + variation;

            self.segments.push_back(CaveSegment {
                x,
                center_y: clamp_center(y, gap_height, tuning.viewport_height),
                gap_height,
            });
        }
    }

    /// Append segments until the cave reaches past the viewport plus lookahead
    ///
    /// Each new centerline is the previous one plus jitter plus a drift term
    /// that depends only on x. At most `max_segments_per_tick` are appended.
    /// Returns the number of segments added.
    pub fn extend(
        &mut self,
        rng: &mut RandomSource,
        tuning: &Tuning,
        camera_x: f32,
        gap_height: f32,
    ) -> usize {
        let target_x = camera_x + tuning.viewport_width + tuning.cave_lookahead;
        let mut added = 0;

        while added < tuning.max_segments_per_tick {
            let Some(last) = self.segments.back().copied() else {
                break;
            };
            if last.x >= target_x {
                break;
            }

            let x = last.x + tuning.segment_width;
            let center_y = last.center_y
                + rng.signed_noise(tuning.noise_amplitude)
                + (x * tuning.drift_frequency).sin() * tuning.drift_amplitude;

            self.segments.push_back(CaveSegment {
                x,
                center_y: clamp_center(center_y, gap_height, tuning.viewport_height),
                gap_height,
            });
            added += 1;
        }

        added
    }

    /// Drop segments more than `margin` behind the camera
    ///
    /// The newest segment is always kept so `extend` can continue from it.
    pub fn prune(&mut self, camera_x: f32, margin: f32) {
        let cutoff = camera_x - margin;
        while self.segments.len() > 1 && self.segments.front().is_some_and(|s| s.x <= cutoff) {
            self.segments.pop_front();
        }
    }

    /// Interpolated tunnel profile at `x`
    ///
    /// Between two samples the centerline and gap are linearly interpolated.
    /// Past either end the nearest sample is returned as-is. `None` only when
    /// the cave is empty.
    pub fn sample_at(&self, x: f32) -> Option<CaveSample> {
        let first = self.segments.front()?;
        // Number of samples with sample.x <= x
        let idx = self.segments.partition_point(|s| s.x <= x);

        if idx == 0 {
            return Some(first.into());
        }
        if idx >= self.segments.len() {
            return self.segments.back().map(CaveSample::from);
        }

        let current = &self.segments[idx - 1];
        let next = &self.segments[idx];
        let t = (x - current.x) / (next.x - current.x);

        Some(CaveSample {
            center_y: lerp(current.center_y, next.center_y, t),
            gap_height: lerp(current.gap_height, next.gap_height, t),
        })
    }

    /// True if samples are strictly ascending at `spacing` intervals
    pub fn is_contiguous(&self, spacing: f32) -> bool {
        self.segments
            .iter()
            .zip(self.segments.iter().skip(1))
            .all(|(a, b)| ((b.x - a.x) - spacing).abs() < 1e-3)
    }

    #[cfg(test)]
    pub(crate) fn push(&mut self, segment: CaveSegment) {
        self.segments.push_back(segment);
    }
}
