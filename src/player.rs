use std::f64::consts::{FRAC_PI_2, PI};

use glam::IVec2;

use crate::grid::Grid;
use crate::vec2::{self, Vec2};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
}

impl Direction {
    /// Offset from the facing angle.
    fn angle_offset(self) -> f64 {
        match self {
            Direction::Forward => 0.,
            Direction::Backward => PI,
            Direction::Left => -FRAC_PI_2,
            Direction::Right => FRAC_PI_2,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Player {
    pub pos: Vec2,
    /// Radians, never wrapped. Only read through `cos`/`sin`.
    pub angle: f64,
}

impl Player {
    pub fn new(pos: Vec2, angle: f64) -> Self {
        Self { pos, angle }
    }

    /// Unit vector the player is facing.
    pub fn dir(&self) -> Vec2 {
        vec2::from_angle(self.angle)
    }

    pub fn rotate(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Step `speed` units in `direction`, resolving each axis on its own so the
    /// player slides along walls.
    pub fn move_in(&mut self, direction: Direction, grid: &Grid, speed: f64, radius: f64) {
        let step = vec2::from_angle(self.angle + direction.angle_offset()) * speed;
        self.try_step(step, grid, radius);
    }

    /// Probe one point per axis, `hypot(dx, dy) * radius` ahead of the starting
    /// position, and apply that axis' displacement only if the probed tile is
    /// passable. Both probes are taken from the start, independently.
    fn try_step(&mut self, step: Vec2, grid: &Grid, radius: f64) {
        let start = self.pos;
        let reach = step.length() * radius;

        let mut dest = start;
        if step.x != 0. {
            let probe = Vec2::new(start.x + step.x.signum() * reach, start.y);
            if !grid.is_solid(tile_of(probe)) {
                dest.x += step.x;
            }
        }

        if step.y != 0. {
            let probe = Vec2::new(start.x, start.y + step.y.signum() * reach);
            // neither probe covers the diagonal tile when both axes change cell
            if !grid.is_solid(tile_of(probe))
                && !grid.is_solid(tile_of(Vec2::new(dest.x, start.y + step.y)))
            {
                dest.y += step.y;
            }
        }

        self.pos = dest;
    }

    pub fn tile(&self) -> IVec2 {
        tile_of(self.pos)
    }
}

fn tile_of(pos: Vec2) -> IVec2 {
    pos.floor().as_ivec2()
}
