use glam::IVec2;

use crate::config::MAX_DISTANCE;
use crate::error::Result;
use crate::grid::{Grid, Tile, EMPTY};
use crate::vec2::{self, Vec2};

/// Grid axis whose boundary the ray crossed into the hit tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    /// crossed a vertical boundary (x = const)
    X,
    /// crossed a horizontal boundary (y = const)
    Y,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hit {
    pub tile: IVec2,
    pub material: Tile,
    pub point: Vec2,
    pub side: Side,
    /// Position along the hit face in `[0, 1)`, used as the texture column.
    pub wall_offset: f64,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct CastResult {
    /// `f64::INFINITY` when nothing was hit.
    pub distance: f64,
    pub hit: Option<Hit>,
}

impl CastResult {
    pub fn miss() -> Self {
        Self {
            distance: f64::INFINITY,
            hit: None,
        }
    }

    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

/// DDA traversal cursor (Amanatides & Woo). Lives for exactly one cast.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    origin: Vec2,
    direction: Vec2,
    /// ray length covered by one full cell along each axis
    unit_step: Vec2,
    map_check: IVec2,
    /// ray length to the next boundary on each axis
    length_1d: Vec2,
    step: IVec2,
}

impl Ray {
    pub fn new(origin: Vec2, direction: Vec2) -> Result<Self> {
        Ok(Self::from_unit(origin, vec2::normalize(direction)?))
    }

    pub fn towards(origin: Vec2, target: Vec2) -> Result<Self> {
        Self::new(origin, target - origin)
    }

    pub fn from_angle(origin: Vec2, angle: f64) -> Self {
        Self::from_unit(origin, vec2::from_angle(angle))
    }

    fn from_unit(origin: Vec2, direction: Vec2) -> Self {
        // a zero component divides to +/-inf, which hypot turns into +inf:
        // that axis is then never chosen to step
        let unit_step = Vec2::new(
            1f64.hypot(direction.y / direction.x),
            1f64.hypot(direction.x / direction.y),
        );

        let floor = origin.floor();
        let map_check = floor.as_ivec2();

        let (step_x, length_x) = if direction.x < 0. {
            (-1, (origin.x - floor.x) * unit_step.x)
        } else {
            (1, (floor.x + 1. - origin.x) * unit_step.x)
        };
        let (step_y, length_y) = if direction.y < 0. {
            (-1, (origin.y - floor.y) * unit_step.y)
        } else {
            (1, (floor.y + 1. - origin.y) * unit_step.y)
        };

        Self {
            origin,
            direction,
            unit_step,
            map_check,
            length_1d: Vec2::new(length_x, length_y),
            step: IVec2::new(step_x, step_y),
        }
    }

    /// Move into the next cell. Returns the axis crossed and the ray length at
    /// that boundary. Equal lengths step Y.
    fn advance(&mut self) -> (Side, f64) {
        if self.length_1d.x < self.length_1d.y {
            self.map_check.x += self.step.x;
            let distance = self.length_1d.x;
            self.length_1d.x += self.unit_step.x;
            (Side::X, distance)
        } else {
            self.map_check.y += self.step.y;
            let distance = self.length_1d.y;
            self.length_1d.y += self.unit_step.y;
            (Side::Y, distance)
        }
    }

    /// Walk the grid until a solid tile is entered or `MAX_DISTANCE` is passed.
    pub fn cast(mut self, grid: &Grid) -> CastResult {
        loop {
            let (side, distance) = self.advance();

            // also catches NaN, which would otherwise never terminate
            if !(distance <= MAX_DISTANCE) {
                log::trace!("ray from {} missed", self.origin);
                return CastResult::miss();
            }

            match grid.get(self.map_check) {
                Some(material) if material != EMPTY => {
                    return CastResult {
                        distance,
                        hit: Some(self.hit(side, distance, material)),
                    };
                }
                _ => {}
            }
        }
    }

    fn hit(&self, side: Side, distance: f64, material: Tile) -> Hit {
        let point = self.origin + self.direction * distance;
        let tile = self.map_check;

        let offset = match side {
            Side::X if self.step.y > 0 => point.y - tile.y as f64,
            Side::X => tile.y as f64 + 1. - point.y,
            Side::Y if self.step.x > 0 => point.x - tile.x as f64,
            Side::Y => tile.x as f64 + 1. - point.x,
        };

        log::trace!("ray from {} hit {tile} ({side:?}) at {distance}", self.origin);

        Hit {
            tile,
            material,
            point,
            side,
            wall_offset: clamp_unit(offset),
        }
    }
}

/// Keep `x` in `[0, 1)`. It only strays outside through rounding, so the
/// nearest edge is the right one.
fn clamp_unit(x: f64) -> f64 {
    x.clamp(0., 1. - f64::EPSILON)
}

pub fn cast(grid: &Grid, origin: Vec2, direction: Vec2) -> Result<CastResult> {
    Ok(Ray::new(origin, direction)?.cast(grid))
}

pub fn cast_to_target(grid: &Grid, origin: Vec2, target: Vec2) -> Result<CastResult> {
    Ok(Ray::towards(origin, target)?.cast(grid))
}

pub fn cast_at_angle(grid: &Grid, origin: Vec2, angle: f64) -> CastResult {
    Ray::from_angle(origin, angle).cast(grid)
}
