//! Boundary to whatever puts pixels on screen.

use crate::grid::Tile;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const GREY: Color = Color::rgb(200, 200, 200);
    pub const GREEN: Color = Color::rgb(0, 0xdd, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Multiply the color channels by `factor`, keeping alpha.
    pub fn scale(self, factor: f64) -> Self {
        let f = |c: u8| (c as f64 * factor).round().clamp(0., 255.) as u8;
        Self {
            r: f(self.r),
            g: f(self.g),
            b: f(self.b),
            a: self.a,
        }
    }
}

/// Screen-space primitive, coordinates in pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum DrawCommand {
    FillRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    StrokeRect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Color,
    },
    FillCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        x: f32,
        y: f32,
        radius: f32,
        color: Color,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Color,
    },
}

pub trait Renderer {
    /// Draw one frame's worth of commands, in order.
    fn draw(&mut self, commands: &[DrawCommand]) -> anyhow::Result<()>;
}

pub trait TextureSource {
    /// Texels per texture column.
    fn rows(&self) -> usize;

    /// Color of `material` at horizontal coordinate `u` in `[0, 1)` and texel
    /// row `row`.
    fn sample(&self, material: Tile, u: f64, row: usize) -> Color;
}

const BRICK_SIZE: usize = 64;
const BRICK_HEIGHT: usize = 16;
const BRICK_WIDTH: usize = 32;
const MORTAR: usize = 2;

/// Procedural brick wall, one base color per material.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrickTexture;

impl BrickTexture {
    pub fn base_color(material: Tile) -> Color {
        match material {
            0 => Color::BLACK,
            1 => Color::rgb(178, 34, 34),
            2 => Color::rgb(50, 50, 200),
            3 => Color::rgb(46, 139, 87),
            4 => Color::rgb(128, 128, 128),
            other => {
                // spread remaining ids over the palette
                let hue = (other.wrapping_mul(97) % 200) as u8;
                Color::rgb(55 + hue, 200 - hue / 2, 55 + hue / 3)
            }
        }
    }
}

impl TextureSource for BrickTexture {
    fn rows(&self) -> usize {
        BRICK_SIZE
    }

    fn sample(&self, material: Tile, u: f64, row: usize) -> Color {
        let x = ((u * BRICK_SIZE as f64) as usize).min(BRICK_SIZE - 1);
        let y = row % BRICK_SIZE;

        let course = y / BRICK_HEIGHT;
        // every other course is offset by half a brick
        let shifted = x + (course % 2) * (BRICK_WIDTH / 2);

        if y % BRICK_HEIGHT < MORTAR || shifted % BRICK_WIDTH < MORTAR {
            return Color::GREY;
        }

        let brick = course * 7 + shifted / BRICK_WIDTH;
        let variation = 0.85 + (brick % 4) as f64 * 0.05;
        Self::base_color(material).scale(variation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_keeps_alpha() {
        let c = Color::rgba(100, 200, 50, 77).scale(0.5);
        assert_eq!(c, Color::rgba(50, 100, 25, 77));
        assert_eq!(Color::WHITE.scale(2.), Color::WHITE);
    }

    #[test]
    fn mortar_lines() {
        let tex = BrickTexture;
        assert_eq!(tex.sample(1, 0.5, 0), Color::GREY);
        assert_eq!(tex.sample(1, 0., 5), Color::GREY);
        assert_ne!(tex.sample(1, 0.25, 5), Color::GREY);
    }

    #[test]
    fn materials_differ() {
        let tex = BrickTexture;
        assert_ne!(tex.sample(1, 0.25, 5), tex.sample(2, 0.25, 5));
        assert_eq!(tex.sample(1, 0.25, 5), tex.sample(1, 0.25, 5 + BRICK_SIZE));
    }

    #[test]
    fn u_at_edge_stays_in_texture() {
        let tex = BrickTexture;
        // last texel column, inside the fourth course's third brick
        let edge = tex.sample(3, 0.999_999, 63);
        assert_eq!(edge, tex.sample(3, 63.5 / 64., 63));
        assert_eq!(edge, BrickTexture::base_color(3));
    }
}
