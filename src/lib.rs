//! Grid-based raycasting core: DDA ray casting over an occupancy grid, wall
//! projection for a 2.5D renderer and axis-separated player movement.
//!
//! Window, input and pixel drawing are left to the caller through the traits in
//! [`input`] and [`render`].

pub mod config;
pub mod error;
pub mod grid;
pub mod input;
pub mod player;
pub mod projector;
pub mod ray;
pub mod render;
pub mod session;
pub mod vec2;

pub use config::Config;
pub use error::{Error, Result};
pub use grid::{Grid, Tile};
pub use player::{Direction, Player};
pub use projector::{Projector, Shade, WallSlice};
pub use ray::{cast, cast_at_angle, cast_to_target, CastResult, Hit, Side};
pub use session::Session;
pub use vec2::Vec2;
