use glam::IVec2;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::grid::{Grid, Tile, EMPTY};
use crate::input::InputState;
use crate::player::{Direction, Player};
use crate::projector::{Projector, WallSlice};
use crate::render::{BrickTexture, Color, DrawCommand, TextureSource};
use crate::vec2::Vec2;

const PLAYER_COLOR: Color = Color::rgb(255, 100, 100);
const RAY_COLOR: Color = Color::rgba(0, 0xdd, 0, 0x55);
/// Facing indicator length on the minimap, in tiles.
const FACING_LENGTH: f64 = 5.;

/// One running game: the map, the player and everything needed to draw them.
pub struct Session {
    config: Config,
    projector: Projector,
    grid: Grid,
    player: Player,
    /// material placed by pointer edits
    brush: Tile,
    pub show_minimap: bool,
}

impl Session {
    /// Empty map with the player in the middle, facing +x.
    pub fn new(config: Config) -> Self {
        log::info!(
            "starting session on a {}x{} map, {} columns",
            config.map_width,
            config.map_height,
            config.columns()
        );

        let grid = Grid::new(config.map_width, config.map_height);
        let player = Player::new(
            Vec2::new((config.map_width / 2) as f64, (config.map_height / 2) as f64),
            0.,
        );

        Self {
            projector: config.projector(),
            config,
            grid,
            player,
            brush: 1,
            show_minimap: true,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn brush(&self) -> Tile {
        self.brush
    }

    /// Update pass: movement, turning, then edits.
    pub fn update(&mut self, input: &InputState) {
        if input.toggle_minimap {
            self.show_minimap = !self.show_minimap;
        }

        if let Some(material) = input.select_material.filter(|m| *m != EMPTY) {
            self.brush = material;
        }

        let moves = [
            (input.forward, Direction::Forward),
            (input.backward, Direction::Backward),
            (input.strafe_left, Direction::Left),
            (input.strafe_right, Direction::Right),
        ];
        for (held, direction) in moves {
            if held {
                self.player.move_in(
                    direction,
                    &self.grid,
                    self.config.move_speed,
                    self.config.player_radius,
                );
            }
        }

        if input.turn_left {
            self.player.rotate(-self.config.turn_speed);
        }
        if input.turn_right {
            self.player.rotate(self.config.turn_speed);
        }

        if let (true, Some(pointer)) = (input.primary_held, input.pointer) {
            if let Err(err) = self.paint(pointer) {
                log::debug!("edit rejected: {err}");
            }
        }
    }

    /// Place the current brush material on the minimap tile under `pointer`.
    pub fn paint(&mut self, pointer: IVec2) -> Result<()> {
        let col = (pointer.x as f32 / self.config.tile_size).floor() as i32;
        let row = (pointer.y as f32 / self.config.tile_size).floor() as i32;

        if self.player.tile() == IVec2::new(col, row) {
            return Err(Error::Occupied { col, row });
        }

        if self.grid.get(IVec2::new(col, row)) == Some(self.brush) {
            return Ok(());
        }

        self.grid.set_solid(col, row, self.brush)
    }

    /// Draw pass: wall columns, then the minimap on top.
    pub fn draw(&self, textures: &impl TextureSource) -> Vec<DrawCommand> {
        let slices = self.projector.project(&self.grid, &self.player);
        let mut commands = vec![];

        for slice in &slices {
            self.draw_slice(slice, textures, &mut commands);
        }

        if self.show_minimap {
            self.draw_minimap(&slices, &mut commands);
        }

        commands
    }

    fn draw_slice(
        &self,
        slice: &WallSlice,
        textures: &impl TextureSource,
        out: &mut Vec<DrawCommand>,
    ) {
        if !slice.height.is_finite() {
            return;
        }

        let rows = textures.rows().max(1);
        let x = (slice.column * self.config.resolution) as f32;
        let w = self.config.resolution as f32;
        let dy = slice.height / rows as f64;
        let screen_height = self.config.screen_height as f64;

        for row in 0..rows {
            let y = slice.top + row as f64 * dy;
            // clip texels that land off screen when standing close to a wall
            if y + dy < 0. || y > screen_height {
                continue;
            }

            let color = textures
                .sample(slice.hit.material, slice.shade.texture_u, row)
                .scale(slice.shade.brightness);
            out.push(DrawCommand::FillRect {
                x,
                y: y as f32,
                w,
                h: dy as f32,
                color,
            });
        }
    }

    fn draw_minimap(&self, slices: &[WallSlice], out: &mut Vec<DrawCommand>) {
        let size = self.config.tile_size;
        let to_screen = |v: Vec2| (v.x as f32 * size, v.y as f32 * size);

        for (cell, tile) in self.grid.iter() {
            let (x, y) = (cell.x as f32 * size, cell.y as f32 * size);
            if tile != EMPTY {
                out.push(DrawCommand::FillRect {
                    x,
                    y,
                    w: size,
                    h: size,
                    color: BrickTexture::base_color(tile),
                });
            }
            out.push(DrawCommand::StrokeRect {
                x,
                y,
                w: size,
                h: size,
                color: Color::GREY,
            });
        }

        let from = to_screen(self.player.pos);
        for slice in slices {
            out.push(DrawCommand::Line {
                from,
                to: to_screen(slice.hit.point),
                color: RAY_COLOR,
            });
        }

        out.push(DrawCommand::Line {
            from,
            to: to_screen(self.player.pos + self.player.dir() * FACING_LENGTH),
            color: Color::WHITE,
        });
        out.push(DrawCommand::FillCircle {
            x: from.0,
            y: from.1,
            radius: size / 4.,
            color: PLAYER_COLOR,
        });
        out.push(DrawCommand::StrokeCircle {
            x: from.0,
            y: from.1,
            radius: size / 4.,
            color: Color::BLACK,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputSource, Scripted};

    fn small_config() -> Config {
        Config {
            screen_width: 64,
            screen_height: 48,
            map_width: 8,
            map_height: 6,
            resolution: 2,
            ..Config::default()
        }
    }

    #[test]
    fn starts_in_the_middle() {
        let session = Session::new(Config::default());
        assert_eq!(session.player().pos, Vec2::new(12., 8.));
        assert_eq!(session.player().angle, 0.);
        assert_eq!(session.grid().width(), 24);
        assert_eq!(session.grid().height(), 16);
        assert!(session.grid().iter().all(|(_, tile)| tile == EMPTY));
    }

    #[test]
    fn held_keys_move_and_turn() {
        let mut session = Session::new(small_config());
        let start = session.player().pos;

        session.update(&InputState {
            forward: true,
            turn_right: true,
            ..Default::default()
        });

        let config = session.config().clone();
        assert!((session.player().pos.x - (start.x + config.move_speed)).abs() < 1e-12);
        assert_eq!(session.player().angle, config.turn_speed);
    }

    #[test]
    fn pointer_paints_tile_under_it() {
        let mut session = Session::new(small_config());
        session.update(&InputState {
            pointer: Some(IVec2::new(25, 15)),
            primary_held: true,
            select_material: Some(3),
            ..Default::default()
        });

        assert_eq!(session.brush(), 3);
        assert_eq!(session.grid().get(IVec2::new(2, 1)), Some(3));
    }

    #[test]
    fn pointer_without_button_does_nothing() {
        let mut session = Session::new(small_config());
        let before = session.grid().clone();
        session.update(&InputState {
            pointer: Some(IVec2::new(25, 15)),
            ..Default::default()
        });
        assert_eq!(session.grid(), &before);
    }

    #[test]
    fn edits_outside_map_rejected() {
        let mut session = Session::new(small_config());
        assert!(matches!(
            session.paint(IVec2::new(500, 10)),
            Err(Error::OutOfBounds { .. })
        ));
        assert!(session.paint(IVec2::new(-3, 10)).is_err());
    }

    #[test]
    fn cannot_wall_in_the_player() {
        let mut session = Session::new(small_config());
        // player stands on tile (4, 3)
        assert_eq!(
            session.paint(IVec2::new(45, 35)),
            Err(Error::Occupied { col: 4, row: 3 })
        );
        assert!(!session.grid().is_solid(IVec2::new(4, 3)));
    }

    #[test]
    fn toggles_minimap() {
        let mut session = Session::new(small_config());
        let toggle = InputState {
            toggle_minimap: true,
            ..Default::default()
        };
        session.update(&toggle);
        assert!(!session.show_minimap);
        session.update(&toggle);
        assert!(session.show_minimap);
    }

    #[test]
    fn empty_map_draws_only_minimap() {
        let mut session = Session::new(small_config());
        let commands = session.draw(&BrickTexture);
        // 48 tile outlines, facing line and the two player marker circles
        assert_eq!(commands.len(), 48 + 3);

        session.show_minimap = false;
        assert!(session.draw(&BrickTexture).is_empty());
    }

    #[test]
    fn wall_ahead_draws_textured_columns() {
        let mut session = Session::new(small_config());
        for row in 0..6 {
            session.paint(IVec2::new(65, row * 10)).expect("in bounds");
        }
        session.show_minimap = false;

        let commands = session.draw(&BrickTexture);
        let columns = session.config().columns();
        assert_eq!(commands.len(), columns * BrickTexture.rows());

        match commands[0] {
            DrawCommand::FillRect { x, w, .. } => {
                assert_eq!(x, 0.);
                assert_eq!(w, 2.);
            }
            other => panic!("expected a wall rect, got {other:?}"),
        }
    }

    #[test]
    fn wall_touching_spawn_point_draws_finite_rects() {
        // player spawns on the exact corner (12, 8); tile (12, 7) is flush with it
        let mut session = Session::new(Config::default());
        session.paint(IVec2::new(125, 75)).expect("in bounds");

        let commands = session.draw(&BrickTexture);
        let walls: Vec<_> = commands
            .iter()
            .filter_map(|command| match *command {
                DrawCommand::FillRect { x, y, w, h, .. } => Some([x, y, w, h]),
                _ => None,
            })
            .collect();

        assert!(walls.len() > 1);
        for rect in walls {
            assert!(rect.iter().all(|v| v.is_finite()), "non-finite rect {rect:?}");
            // clipped to the screen, give or take f32 rounding
            assert!(rect[1] + rect[3] >= -1. && rect[1] <= 640.);
        }
    }

    #[test]
    fn scripted_walk_stops_at_wall() {
        let mut session = Session::new(small_config());
        for row in 0..6 {
            session.paint(IVec2::new(65, row * 10)).expect("in bounds");
        }

        let walk = InputState {
            forward: true,
            ..Default::default()
        };
        let mut input = Scripted::new(std::iter::repeat(walk).take(200));
        for _ in 0..200 {
            session.update(&input.poll());
            assert!(!session.grid().is_solid(session.player().tile()));
        }
        assert!(session.player().pos.x < 6.);
        assert!(session.player().pos.x > 5.);
    }
}
