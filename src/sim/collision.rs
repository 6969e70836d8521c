//! Collision detection for the ship
//!
//! The ship is a circle. Walls come from the interpolated cave profile at the
//! ship's x; pillars are tested against the circle's bounding box, which is
//! deliberately conservative near pillar corners.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::cave::{Cave, CaveSample};
use super::obstacles::Obstacle;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Ship touched the ceiling or floor
    Wall,
    /// Ship touched a pillar
    Obstacle,
    /// Ship left the vertical play area
    OutOfBounds,
}

/// Ship against the tunnel walls at its x
///
/// Without cave data no wall collision is possible.
pub fn ship_wall_collision(pos: Vec2, radius: f32, sample: Option<CaveSample>) -> bool {
    match sample {
        Some(sample) => pos.y - radius < sample.top() || pos.y + radius > sample.bottom(),
        None => false,
    }
}

/// Ship bounding box against a pillar rectangle
pub fn ship_obstacle_collision(pos: Vec2, radius: f32, obstacle: &Obstacle) -> bool {
    pos.x + radius > obstacle.x
        && pos.x - radius < obstacle.x + obstacle.width
        && pos.y + radius > obstacle.y
        && pos.y - radius < obstacle.y + obstacle.height
}

/// Ship center outside `[0, play_height]`
pub fn ship_out_of_bounds(pos: Vec2, play_height: f32) -> bool {
    pos.y < 0.0 || pos.y > play_height
}

/// Run every check in order: walls, pillars, bounds
pub fn check_ship<'a>(
    pos: Vec2,
    radius: f32,
    cave: &Cave,
    obstacles: impl IntoIterator<Item = &'a Obstacle>,
    play_height: f32,
) -> Option<Collision> {
    if ship_wall_collision(pos, radius, cave.sample_at(pos.x)) {
        return Some(Collision::Wall);
    }
    if obstacles
        .into_iter()
        .any(|o| ship_obstacle_collision(pos, radius, o))
    {
        return Some(Collision::Obstacle);
    }
    if ship_out_of_bounds(pos, play_height) {
        return Some(Collision::OutOfBounds);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::cave::CaveSegment;

    fn sample() -> CaveSample {
        CaveSample {
            center_y: 360.0,
            gap_height: 200.0,
        }
    }

    #[test]
    fn test_wall_clear_in_middle() {
        assert!(!ship_wall_collision(Vec2::new(0.0, 360.0), 8.0, Some(sample())));
    }

    #[test]
    fn test_wall_hit_top_and_bottom() {
        // Ceiling at 260, floor at 460
        assert!(ship_wall_collision(Vec2::new(0.0, 267.0), 8.0, Some(sample())));
        assert!(!ship_wall_collision(Vec2::new(0.0, 268.0), 8.0, Some(sample())));
        assert!(ship_wall_collision(Vec2::new(0.0, 453.0), 8.0, Some(sample())));
        assert!(!ship_wall_collision(Vec2::new(0.0, 452.0), 8.0, Some(sample())));
    }

    #[test]
    fn test_no_cave_no_wall_hit() {
        assert!(!ship_wall_collision(Vec2::new(0.0, -500.0), 8.0, None));
    }

    #[test]
    fn test_obstacle_overlap() {
        let pillar = Obstacle {
            x: 100.0,
            y: 0.0,
            width: 30.0,
            height: 200.0,
            from_top: true,
        };
        // Bounding box corner just overlapping
        assert!(ship_obstacle_collision(Vec2::new(93.0, 207.0), 8.0, &pillar));
        // Touching edges is not an overlap
        assert!(!ship_obstacle_collision(Vec2::new(92.0, 100.0), 8.0, &pillar));
        assert!(!ship_obstacle_collision(Vec2::new(110.0, 208.0), 8.0, &pillar));
        // Past the right edge
        assert!(!ship_obstacle_collision(Vec2::new(139.0, 100.0), 8.0, &pillar));
    }

    #[test]
    fn test_out_of_bounds() {
        assert!(ship_out_of_bounds(Vec2::new(0.0, -0.5), 720.0));
        assert!(ship_out_of_bounds(Vec2::new(0.0, 720.5), 720.0));
        assert!(!ship_out_of_bounds(Vec2::new(0.0, 360.0), 720.0));
    }

    #[test]
    fn test_check_ship_order() {
        let mut cave = Cave::new();
        cave.push(CaveSegment { x: 0.0, center_y: 360.0, gap_height: 200.0 });
        cave.push(CaveSegment { x: 20.0, center_y: 360.0, gap_height: 200.0 });

        let pillar = Obstacle {
            x: 0.0,
            y: 300.0,
            width: 40.0,
            height: 50.0,
            from_top: false,
        };

        assert_eq!(
            check_ship(Vec2::new(10.0, 360.0), 8.0, &cave, [&pillar], 720.0),
            None
        );
        assert_eq!(
            check_ship(Vec2::new(10.0, 320.0), 8.0, &cave, [&pillar], 720.0),
            Some(Collision::Obstacle)
        );
        assert_eq!(
            check_ship(Vec2::new(10.0, 255.0), 8.0, &cave, [&pillar], 720.0),
            Some(Collision::Wall)
        );

        // Empty cave: only the bounds check can fire
        let empty = Cave::new();
        assert_eq!(
            check_ship(Vec2::new(10.0, -4.0), 8.0, &empty, std::iter::empty(), 720.0),
            Some(Collision::OutOfBounds)
        );
    }
}
