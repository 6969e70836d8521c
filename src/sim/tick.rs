//! Variable timestep simulation tick
//!
//! Core game loop: input edge detection, ship physics, scrolling, cave and
//! pillar generation, collisions.

use super::collision;
use super::state::{GamePhase, GameState};

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Thrust held (space/click/tap)
    pub thrust: bool,
    /// Idle/demo mode - the autopilot flies the ship
    pub idle_mode: bool,
}

/// How far ahead of the ship the autopilot reads the cave
const AUTOPILOT_LOOKAHEAD: f32 = 60.0;

/// Advance the game by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // React to the press, not the hold
    let pressed = input.thrust && !state.thrust_held;
    state.thrust_held = input.thrust;

    let started = pressed && matches!(state.phase, GamePhase::Menu | GamePhase::GameOver);
    if started {
        state.start_run();
    } else if state.phase == GamePhase::Playing {
        let thrust = if input.idle_mode {
            autopilot_thrust(state)
        } else {
            input.thrust
        };
        step_playing(state, thrust, dt);
    }

    // Debris keeps falling on the game-over screen
    let gravity = state.tuning.particle_gravity;
    state.particles.update(dt, gravity);
}

fn step_playing(state: &mut GameState, thrust: bool, dt: f32) {
    let tuning = state.tuning;

    // Difficulty
    state.play_time += dt;
    state.world.speed = tuning.speed_at(state.play_time);
    state.world.gap_height = tuning.gap_at(state.play_time);

    // Ship physics
    let ship = &mut state.ship;
    if thrust {
        ship.vy += tuning.thrust_impulse * dt;
    }
    ship.vy += tuning.gravity * dt;
    ship.vy = ship.vy.clamp(-tuning.max_velocity, tuning.max_velocity);
    ship.pos.y += ship.vy * dt;
    ship.record_trail(tuning.trail_length);

    // Scroll, keeping the ship anchored to the camera
    let advance = state.world.speed * dt;
    state.camera.x += advance;
    state.world.distance += advance;
    state.ship.pos.x = state.ship_x();

    // Generation
    let camera_x = state.camera.x;
    let world = &mut state.world;
    world
        .cave
        .extend(&mut state.rng, &tuning, camera_x, world.gap_height);
    world.cave.prune(camera_x, tuning.prune_margin);
    world.obstacles.try_spawn(
        &mut state.rng,
        &tuning,
        &world.cave,
        camera_x,
        world.speed,
        state.play_time,
    );
    world.obstacles.prune(camera_x, tuning.prune_margin);

    let hit = collision::check_ship(
        state.ship.pos,
        tuning.ship_radius,
        &state.world.cave,
        state.world.obstacles.iter(),
        tuning.viewport_height,
    );
    if let Some(hit) = hit {
        state.crash(hit);
    }
}

/// Demo pilot: hold thrust while below the upcoming centerline
///
/// Aims slightly above center to leave room for the fall, and brakes hard
/// descents early.
pub fn autopilot_thrust(state: &GameState) -> bool {
    let ship = &state.ship;
    let Some(ahead) = state
        .world
        .cave
        .sample_at(ship.pos.x + AUTOPILOT_LOOKAHEAD)
    else {
        return ship.pos.y > state.tuning.viewport_height / 2.0;
    };

    let target = ahead.center_y - ahead.gap_height * 0.1;
    let falling_fast = ship.vy > state.tuning.max_velocity * 0.4;
    ship.pos.y > target || falling_fast
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cave::CaveSegment;
    use crate::sim::obstacles::Obstacle;
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;
    use glam::Vec2;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn press() -> TickInput {
        TickInput {
            thrust: true,
            ..Default::default()
        }
    }

    fn release() -> TickInput {
        TickInput::default()
    }

    fn playing(seed: u32) -> GameState {
        let tuning = Tuning {
            seed,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 0);
        tick(&mut state, &press(), DT);
        tick(&mut state, &release(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        state
    }

    #[test]
    fn test_menu_to_playing_on_press() {
        let mut state = GameState::new(Tuning::default(), 0);
        tick(&mut state, &release(), DT);
        assert_eq!(state.phase, GamePhase::Menu);

        tick(&mut state, &press(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_holding_does_not_restart() {
        let mut state = playing(1);
        state.crash(crate::sim::Collision::Wall);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Thrust was released; holding it now is a fresh press only once
        tick(&mut state, &press(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        state.crash(crate::sim::Collision::Wall);
        tick(&mut state, &press(), DT);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_menu_does_not_simulate() {
        let mut state = GameState::new(Tuning::default(), 0);
        let before = state.ship.clone();
        for _ in 0..30 {
            tick(&mut state, &release(), DT);
        }
        assert_eq!(state.ship, before);
        assert_eq!(state.camera.x, 0.0);
    }

    #[test]
    fn test_gravity_and_thrust() {
        let mut state = playing(3);
        let vy = state.ship.vy;
        tick(&mut state, &release(), DT);
        assert!((state.ship.vy - (vy + 880.0 * DT)).abs() < 1e-3);

        let vy = state.ship.vy;
        tick(&mut state, &press(), DT);
        assert!((state.ship.vy - (vy + (880.0 - 1320.0) * DT)).abs() < 1e-3);
    }

    #[test]
    fn test_ship_tracks_camera() {
        let mut state = playing(4);
        for _ in 0..20 {
            tick(&mut state, &release(), DT);
            if state.phase != GamePhase::Playing {
                break;
            }
            assert!((state.ship.pos.x - (state.camera.x + 448.0)).abs() < 1e-2);
        }
        assert!(state.camera.x > 0.0);
        assert!(state.ship.trail.len() <= 10);
    }

    #[test]
    fn test_wall_collision_ends_run() {
        let mut state = playing(5);
        let sample = state.world.cave.sample_at(state.ship.pos.x).unwrap();
        state.ship.pos.y = sample.top() - 1.0;
        state.ship.vy = 0.0;
        state.drain_events();

        tick(&mut state, &release(), 0.001);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(!state.particles.is_empty());

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Crashed {
                cause: crate::sim::Collision::Wall,
                ..
            }
        )));
    }

    #[test]
    fn test_floor_collision_ends_run() {
        let mut state = playing(6);
        let sample = state.world.cave.sample_at(state.ship.pos.x).unwrap();
        state.ship.pos.y = sample.bottom() + 1.0;
        state.ship.vy = 0.0;

        tick(&mut state, &release(), 0.001);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_obstacle_collision_ends_run() {
        let mut state = playing(7);
        let x = state.ship.pos.x;
        let y = state.ship.pos.y;
        state.world.obstacles.insert(crate::sim::Obstacle {
            x: x - 5.0,
            y: y - 5.0,
            width: 40.0,
            height: 10.0,
            from_top: true,
        });

        tick(&mut state, &release(), 0.001);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_gameover_freezes_world() {
        let mut state = playing(8);
        state.crash(crate::sim::Collision::OutOfBounds);
        let camera = state.camera.x;
        let score = state.score();
        for _ in 0..30 {
            tick(&mut state, &release(), DT);
        }
        assert_eq!(state.camera.x, camera);
        assert_eq!(state.score(), score);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = playing(9);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..600 {
            tick(&mut state, &input, DT);
        }
        state.ship.vy = 123.0;
        state.crash(crate::sim::Collision::Wall);
        assert!(state.camera.x > 0.0);
        assert!(!state.particles.is_empty());

        tick(&mut state, &press(), DT);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.camera.x, 0.0);
        assert_eq!(state.world.distance, 0.0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.play_time, 0.0);
        assert_eq!(state.ship.vy, 0.0);
        assert!(state.ship.trail.is_empty());
        assert!((state.ship.pos.x - 448.0).abs() < 1e-3);
        assert!(state.world.obstacles.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.world.gap_height, 300.0);

        // Pooled entities survive the reset for reuse
        let pool = state.particles.pool();
        assert_eq!(pool.idle(), pool.constructed());
    }

    #[test]
    fn test_autopilot_survives_a_while() {
        let mut state = playing(10);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..300 {
            tick(&mut state, &input, DT);
        }
        assert!(state.score() > 0);
    }

    #[test]
    fn test_autopilot_thrusts_when_low() {
        let mut state = playing(11);
        state.ship.pos = Vec2::new(state.ship.pos.x, 700.0);
        assert!(autopilot_thrust(&state));
        state.ship.pos.y = 5.0;
        state.ship.vy = 0.0;
        assert!(!autopilot_thrust(&state));
    }

    #[test]
    fn test_huge_tick_keeps_cave() {
        let mut state = playing(12);
        let tuning = state.tuning;
        tick(&mut state, &TickInput::default(), 20.0);

        let cave = &state.world.cave;
        assert!(!cave.is_empty());
        assert!(cave.is_contiguous(tuning.segment_width));
        assert!(cave.sample_at(state.ship.pos.x).is_some());
    }

    fn run(
        seed: u32,
        inputs: &[(f32, bool)],
    ) -> Vec<(Vec2, GamePhase, Vec<CaveSegment>, Vec<Obstacle>)> {
        let tuning = Tuning {
            seed,
            ..Tuning::default()
        };
        let mut state = GameState::new(tuning, 0);
        inputs
            .iter()
            .map(|&(dt, thrust)| {
                tick(
                    &mut state,
                    &TickInput {
                        thrust,
                        ..Default::default()
                    },
                    dt,
                );
                (
                    state.ship.pos,
                    state.phase,
                    state.segments().copied().collect(),
                    state.obstacles().copied().collect(),
                )
            })
            .collect()
    }

    proptest! {
        #[test]
        fn same_seed_same_run(
            seed in any::<u32>(),
            inputs in proptest::collection::vec((0.001f32..0.05, any::<bool>()), 1..300),
        ) {
            prop_assert_eq!(run(seed, &inputs), run(seed, &inputs));
        }

        #[test]
        fn velocity_is_clamped(
            seed in any::<u32>(),
            inputs in proptest::collection::vec((0.001f32..0.1, any::<bool>()), 1..300),
        ) {
            let tuning = Tuning { seed, ..Tuning::default() };
            let mut state = GameState::new(tuning, 0);
            for (dt, thrust) in inputs {
                tick(&mut state, &TickInput { thrust, ..Default::default() }, dt);
                prop_assert!(state.ship.vy.abs() <= tuning.max_velocity);
            }
        }

        #[test]
        fn score_never_decreases_while_playing(
            seed in any::<u32>(),
            inputs in proptest::collection::vec((0.001f32..0.05, any::<bool>()), 1..300),
        ) {
            let tuning = Tuning { seed, ..Tuning::default() };
            let mut state = GameState::new(tuning, 0);
            let mut last = 0;
            for (dt, thrust) in inputs {
                let was_playing = state.phase == GamePhase::Playing;
                tick(&mut state, &TickInput { thrust, ..Default::default() }, dt);
                if was_playing && state.phase != GamePhase::Menu {
                    prop_assert!(state.score() >= last);
                }
                last = state.score();
            }
        }

        #[test]
        fn cave_covers_view_after_every_tick(
            seed in any::<u32>(),
            inputs in proptest::collection::vec((0.001f32..0.1, any::<bool>()), 1..300),
        ) {
            let tuning = Tuning { seed, ..Tuning::default() };
            let mut state = GameState::new(tuning, 0);
            for (dt, thrust) in inputs {
                tick(&mut state, &TickInput { thrust, idle_mode: true }, dt);
                let cave = &state.world.cave;
                prop_assert!(cave.is_contiguous(tuning.segment_width));
                let first = cave.first().map(|s| s.x).unwrap_or(f32::MAX);
                let last = cave.last().map(|s| s.x).unwrap_or(f32::MIN);
                prop_assert!(first <= state.camera.x);
                prop_assert!(last >= state.camera.x + tuning.viewport_width);
            }
        }

        #[test]
        fn pools_conserve_entities(
            seed in any::<u32>(),
            inputs in proptest::collection::vec((0.001f32..0.05, any::<bool>()), 1..400),
        ) {
            let tuning = Tuning { seed, ..Tuning::default() };
            let mut state = GameState::new(tuning, 0);
            let mut constructed = (0, 0);
            for (dt, thrust) in inputs {
                tick(&mut state, &TickInput { thrust, ..Default::default() }, dt);

                let obstacles = state.world.obstacles.pool();
                prop_assert_eq!(obstacles.live_count(), state.world.obstacles.len());
                prop_assert_eq!(obstacles.live_count() + obstacles.idle(), obstacles.constructed());

                let particles = state.particles.pool();
                prop_assert_eq!(particles.live_count(), state.particles.len());
                prop_assert_eq!(particles.live_count() + particles.idle(), particles.constructed());

                prop_assert!(obstacles.constructed() >= constructed.0);
                prop_assert!(particles.constructed() >= constructed.1);
                constructed = (obstacles.constructed(), particles.constructed());
            }
        }
    }
}
