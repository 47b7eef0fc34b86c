//! Perspective projection of cast results into screen-space wall slices.
//!
//! One ray per screen column is cast across the field of view. Hits become
//! [`WallSlice`]s with a fisheye-corrected distance, an on-screen height and a
//! [`Shade`]; misses leave the column to the background.

use crate::config::FOG_DISTANCE;
use crate::grid::{Grid, Tile};
use crate::player::Player;
use crate::ray::{cast_at_angle, Hit, Side};

/// Darkest a wall gets from distance fog.
const MIN_BRIGHTNESS: f64 = 0.15;
/// A ray starting on a cell boundary can hit at distance 0; walls never get
/// closer than this.
const MIN_PERP_DISTANCE: f64 = 1e-3;
/// Y-faces are drawn slightly darker for contrast between faces.
const Y_SIDE_BRIGHTNESS: f64 = 0.8;

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Shade {
    /// Horizontal texture coordinate in `[0, 1)`.
    pub texture_u: f64,
    /// Multiplier in `(0, 1]` applied to the sampled color.
    pub brightness: f64,
}

/// Derive a column's shade. Depends only on values carried by the cast, so the
/// grid is never consulted again.
pub fn shade(perp_distance: f64, wall_offset: f64, _material: Tile, side: Side) -> Shade {
    let fog = (perp_distance / FOG_DISTANCE).clamp(0., 1.);
    let side_factor = match side {
        Side::X => 1.,
        Side::Y => Y_SIDE_BRIGHTNESS,
    };

    Shade {
        texture_u: wall_offset,
        brightness: (1. - fog).max(MIN_BRIGHTNESS) * side_factor,
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct WallSlice {
    pub column: usize,
    pub ray_angle: f64,
    pub hit: Hit,
    /// Euclidean ray length.
    pub distance: f64,
    /// Distance to the wall plane along the facing direction.
    pub perp_distance: f64,
    pub height: f64,
    pub top: f64,
    pub shade: Shade,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Projector {
    fov: f64,
    columns: usize,
    screen_height: f64,
    /// distance from the eye to the projection plane, in pixels
    screen_distance: f64,
}

impl Projector {
    pub fn new(fov: f64, columns: usize, screen_width: f64, screen_height: f64) -> Self {
        Self {
            fov,
            columns,
            screen_height,
            screen_distance: (screen_width / 2.) / (fov / 2.).tan(),
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn screen_distance(&self) -> f64 {
        self.screen_distance
    }

    pub fn ray_angle(&self, player_angle: f64, column: usize) -> f64 {
        player_angle - self.fov / 2. + column as f64 * (self.fov / self.columns as f64)
    }

    pub fn project_column(&self, grid: &Grid, player: &Player, column: usize) -> Option<WallSlice> {
        let ray_angle = self.ray_angle(player.angle, column);
        let res = cast_at_angle(grid, player.pos, ray_angle);
        let hit = res.hit?;

        let perp_distance =
            (res.distance * (player.angle - ray_angle).cos()).max(MIN_PERP_DISTANCE);
        let height = self.screen_distance / perp_distance;

        Some(WallSlice {
            column,
            ray_angle,
            hit,
            distance: res.distance,
            perp_distance,
            height,
            top: self.screen_height / 2. - height / 2.,
            shade: shade(perp_distance, hit.wall_offset, hit.material, hit.side),
        })
    }

    /// Every column that hit a wall, left to right.
    pub fn project(&self, grid: &Grid, player: &Player) -> Vec<WallSlice> {
        (0..self.columns)
            .filter_map(|column| self.project_column(grid, player, column))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::vec2::Vec2;

    const EPS: f64 = 1e-9;

    fn wall_at_x(x: i32, size: usize) -> Grid {
        let mut grid = Grid::new(size, size);
        for row in 0..size as i32 {
            grid.set_solid(x, row, 1).expect("in bounds");
        }
        grid
    }

    #[test]
    fn screen_distance_from_fov() {
        let projector = Projector::new(PI / 2., 100, 200., 100.);
        assert!((projector.screen_distance() - 100.).abs() < EPS);
    }

    #[test]
    fn ray_angles_span_fov() {
        let projector = Projector::new(PI / 3., 480, 960., 640.);
        assert!((projector.ray_angle(1., 0) - (1. - PI / 6.)).abs() < EPS);
        assert!((projector.ray_angle(1., 240) - 1.).abs() < EPS);
    }

    #[test]
    fn flat_wall_has_constant_height() {
        let grid = wall_at_x(10, 16);
        let player = Player::new(Vec2::new(2.5, 8.5), 0.);
        let projector = Projector::new(PI / 3., 64, 640., 480.);

        let slices = projector.project(&grid, &player);
        assert_eq!(slices.len(), 64);

        // the wall plane is 7.5 units ahead for every column
        for slice in &slices {
            assert!((slice.perp_distance - 7.5).abs() < 1e-9);
            assert!((slice.height - projector.screen_distance() / 7.5).abs() < 1e-6);
            assert!((slice.top - (240. - slice.height / 2.)).abs() < 1e-9);
            assert!(slice.distance >= slice.perp_distance);
        }
    }

    #[test]
    fn hit_at_zero_distance_stays_finite() {
        // origin on the y = 8 boundary, wall directly above
        let mut grid = Grid::new(24, 16);
        grid.set_solid(12, 7, 1).expect("in bounds");
        let player = Player::new(Vec2::new(12., 8.), 0.);
        let projector = Projector::new(PI / 3., 480, 960., 640.);

        let slices = projector.project(&grid, &player);
        assert!(slices.iter().any(|slice| slice.distance == 0.));
        for slice in &slices {
            assert!(slice.perp_distance >= MIN_PERP_DISTANCE);
            assert!(slice.height.is_finite());
            assert!(slice.top.is_finite());
        }
    }

    #[test]
    fn misses_leave_column_empty() {
        let grid = Grid::new(8, 8);
        let player = Player::new(Vec2::new(4., 4.), 0.);
        let projector = Projector::new(PI / 3., 16, 160., 120.);
        assert!(projector.project(&grid, &player).is_empty());
        assert!(projector.project_column(&grid, &player, 3).is_none());
    }

    #[test]
    fn shade_darkens_with_distance_and_side() {
        let near = shade(1., 0.3, 1, Side::X);
        let far = shade(20., 0.3, 1, Side::X);
        let side = shade(1., 0.3, 1, Side::Y);

        assert_eq!(near.texture_u, 0.3);
        assert!(near.brightness > far.brightness);
        assert!(side.brightness < near.brightness);
        assert!(shade(1e6, 0., 1, Side::X).brightness >= MIN_BRIGHTNESS);
    }
}
