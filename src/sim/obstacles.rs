//! Pillar spawning and lifecycle
//!
//! Pillars are spawned at the right edge of the viewport, hang from the
//! ceiling or stand on the floor, and always reach a little past the wall
//! into the open gap.

use serde::{Deserialize, Serialize};

use super::cave::Cave;
use super::pool::{Pool, SlotId};
use super::random::RandomSource;
use crate::tuning::Tuning;

/// A rectangular pillar intruding into the gap
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Hangs from the ceiling (otherwise stands on the floor)
    pub from_top: bool,
}

fn reset_obstacle(obstacle: &mut Obstacle) {
    *obstacle = Obstacle::default();
}

/// Active pillars plus their backing pool
#[derive(Debug, Clone)]
pub struct ObstacleField {
    pool: Pool<Obstacle>,
    /// Live pillars in spawn order (ascending x)
    active: Vec<SlotId>,
    /// x of the most recent spawn; `None` means spacing is unconstrained
    last_spawn_x: Option<f32>,
}

impl Default for ObstacleField {
    fn default() -> Self {
        Self::new()
    }
}

impl ObstacleField {
    pub fn new() -> Self {
        Self {
            pool: Pool::new(Obstacle::default, reset_obstacle),
            active: Vec::new(),
            last_spawn_x: None,
        }
    }

    /// Live pillars in spawn order
    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> + '_ {
        self.active.iter().filter_map(|&id| self.pool.get(id))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn last_spawn_x(&self) -> Option<f32> {
        self.last_spawn_x
    }

    pub fn pool(&self) -> &Pool<Obstacle> {
        &self.pool
    }

    /// Release every live pillar and forget the spawn history
    pub fn clear(&mut self) {
        for id in self.active.drain(..) {
            self.pool.release(id);
        }
        self.last_spawn_x = None;
    }

    /// Possibly spawn one pillar at the viewport's right edge
    ///
    /// Spawning requires the distance since the previous spawn to exceed the
    /// spacing for `play_time`, then a random draw against
    /// `pillar_frequency * speed`. The draw is per tick and ignores `dt`.
    pub fn try_spawn(
        &mut self,
        rng: &mut RandomSource,
        tuning: &Tuning,
        cave: &Cave,
        camera_x: f32,
        speed: f32,
        play_time: f32,
    ) -> Option<Obstacle> {
        let spawn_x = camera_x + tuning.viewport_width;
        let required_spacing = tuning.pillar_spacing_at(play_time);

        if let Some(last_x) = self.last_spawn_x {
            if spawn_x - last_x <= required_spacing {
                return None;
            }
        }
        if !rng.chance(tuning.pillar_frequency * speed) {
            return None;
        }

        let sample = cave.sample_at(spawn_x)?;
        let from_top = rng.chance(0.5);
        let height = rng.range(tuning.pillar_min_height, tuning.pillar_max_height);
        let width = rng.range(tuning.pillar_min_width, tuning.pillar_max_width);
        let nudge = height * tuning.pillar_intrusion;

        let y = if from_top {
            sample.top() - height + nudge
        } else {
            sample.bottom() - nudge
        };

        let (id, obstacle) = self.pool.acquire();
        *obstacle = Obstacle {
            x: spawn_x,
            y,
            width,
            height,
            from_top,
        };
        let spawned = *obstacle;

        self.active.push(id);
        self.last_spawn_x = Some(spawn_x);

        log::debug!(
            "Pillar at x={:.0} ({}), {:.0}x{:.0}",
            spawn_x,
            if from_top { "top" } else { "bottom" },
            width,
            height
        );
        Some(spawned)
    }

    /// Release pillars more than `margin` behind the camera
    pub fn prune(&mut self, camera_x: f32, margin: f32) {
        let cutoff = camera_x - margin;
        self.active.retain(|&id| {
            let keep = self.pool.get(id).is_some_and(|o| o.x >= cutoff);
            if !keep {
                self.pool.release(id);
            }
            keep
        });
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, obstacle: Obstacle) {
        let (id, slot) = self.pool.acquire();
        *slot = obstacle;
        self.active.push(id);
    }
}
