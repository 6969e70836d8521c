//! Crash debris
//!
//! Purely cosmetic: particles never collide and keep animating in every
//! phase so the burst plays out on the game-over screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::{Pool, SlotId};
use super::random::RandomSource;
use crate::tuning::Tuning;

/// A single piece of debris
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds since spawn
    pub age: f32,
    /// Seconds until the particle expires
    pub max_life: f32,
}

impl Particle {
    /// Remaining life in `[0, 1]` (1 = just spawned)
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (1.0 - self.age / self.max_life).clamp(0.0, 1.0)
    }
}

/// Live particles plus their backing pool
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pool: Pool<Particle>,
    active: Vec<SlotId>,
}

impl Default for ParticleSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self {
            pool: Pool::new(Particle::default, |p| *p = Particle::default()),
            active: Vec::new(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.active.iter().filter_map(|&id| self.pool.get(id))
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn pool(&self) -> &Pool<Particle> {
        &self.pool
    }

    pub fn clear(&mut self) {
        for id in self.active.drain(..) {
            self.pool.release(id);
        }
    }

    /// Spray `particle_count` particles from `origin`
    pub fn burst(&mut self, rng: &mut RandomSource, tuning: &Tuning, origin: Vec2) {
        for _ in 0..tuning.particle_count {
            let vx = (rng.next() - 0.5) * tuning.particle_speed;
            let vy = (rng.next() - 0.5) * tuning.particle_speed;
            let max_life = rng.range(tuning.particle_min_life, tuning.particle_max_life);

            let (id, particle) = self.pool.acquire();
            *particle = Particle {
                pos: origin,
                vel: Vec2::new(vx, vy),
                age: 0.0,
                max_life,
            };
            self.active.push(id);
        }
    }

    /// Age, move and drop expired particles
    pub fn update(&mut self, dt: f32, gravity: f32) {
        self.active.retain(|&id| {
            let alive = match self.pool.get_mut(id) {
                Some(p) => {
                    p.age += dt;
                    p.pos += p.vel * dt;
                    p.vel.y += gravity * dt;
                    p.age < p.max_life
                }
                None => false,
            };
            if !alive {
                self.pool.release(id);
            }
            alive
        });
    }
}
