//! Collision detection between the bird and the obstacle field
//!
//! The bird's box is shrunk by a forgiveness margin before testing, so
//! grazing a pipe corner does not end the round.

use glam::Vec2;

use super::state::{Bird, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned box in screen units (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn centered(center: Vec2, size: f32) -> Self {
        let half = Vec2::splat(size / 2.0);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Pull every side inward by `margin`
    pub fn shrink(&self, margin: f32) -> Self {
        Self {
            min: self.min + Vec2::splat(margin),
            max: self.max - Vec2::splat(margin),
        }
    }

    /// Whether the box overlaps the horizontal span `[lo, hi]`
    pub fn overlaps_x(&self, lo: f32, hi: f32) -> bool {
        self.max.x > lo && self.min.x < hi
    }

    pub fn top(&self) -> f32 {
        self.min.y
    }

    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// The bird's forgiving hitbox
pub fn bird_hitbox(bird: &Bird, forgiveness: f32) -> Aabb {
    Aabb::centered(Vec2::new(bird.x, bird.y), bird.size).shrink(bird.size * forgiveness)
}

/// Hitbox has left the screen vertically
pub fn out_of_bounds(hitbox: &Aabb, screen_height: f32) -> bool {
    hitbox.top() < 0.0 || hitbox.bottom() > screen_height
}

/// Hitbox is inside the pipe span but not fully inside the gap
pub fn hits_obstacle(hitbox: &Aabb, obstacle: &Obstacle) -> bool {
    hitbox.overlaps_x(obstacle.x, obstacle.trailing_edge())
        && (hitbox.top() < obstacle.gap_top || hitbox.bottom() > obstacle.gap_bottom)
}

/// Full collision test for one tick
pub fn check_collision(bird: &Bird, obstacles: &[Obstacle], tuning: &Tuning) -> bool {
    let hitbox = bird_hitbox(bird, tuning.hitbox_forgiveness);
    out_of_bounds(&hitbox, tuning.screen_height)
        || obstacles.iter().any(|o| hits_obstacle(&hitbox, o))
}
