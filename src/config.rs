use std::f64::consts::PI;

use crate::projector::Projector;

// dimensions of screen
pub const SCREEN_WIDTH: usize = 960;
pub const SCREEN_HEIGHT: usize = 640;

// dimensions of the map, in tiles
pub const MAP_WIDTH: usize = 24;
pub const MAP_HEIGHT: usize = 16;

/// Minimap pixels per tile.
pub const TILE_SIZE: f32 = 10.;

pub const FOV: f64 = PI / 3.;
/// Screen pixels per cast column.
pub const RESOLUTION: usize = 2;

pub const MOVE_SPEED: f64 = 0.05;
pub const PLAYER_RADIUS: f64 = 5.;
pub const TURN_SPEED: f64 = 0.02;

/// Rays report nothing beyond this many grid units.
pub const MAX_DISTANCE: f64 = 100.;
/// Walls are fully fogged at this perpendicular distance.
pub const FOG_DISTANCE: f64 = 24.;

pub const TARGET_FPS: u64 = 60;

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub screen_width: usize,
    pub screen_height: usize,
    pub map_width: usize,
    pub map_height: usize,
    pub tile_size: f32,
    pub fov: f64,
    pub resolution: usize,
    pub move_speed: f64,
    pub player_radius: f64,
    pub turn_speed: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            map_width: MAP_WIDTH,
            map_height: MAP_HEIGHT,
            tile_size: TILE_SIZE,
            fov: FOV,
            resolution: RESOLUTION,
            move_speed: MOVE_SPEED,
            player_radius: PLAYER_RADIUS,
            turn_speed: TURN_SPEED,
        }
    }
}

impl Config {
    /// Number of rays cast per frame.
    pub fn columns(&self) -> usize {
        self.screen_width / self.resolution.max(1)
    }

    pub fn projector(&self) -> Projector {
        Projector::new(
            self.fov,
            self.columns(),
            self.screen_width as f64,
            self.screen_height as f64,
        )
    }
}
