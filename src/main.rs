use glam::IVec2;
use raycaster::config::{Config, TARGET_FPS};
use raycaster::input::{InputSource, InputState};
use raycaster::render::{BrickTexture, Color, DrawCommand, Renderer};
use raycaster::Session;
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::render::{BlendMode, Canvas};
use sdl2::video::Window;
use sdl2::EventPump;
use std::collections::HashSet;
use std::time::{Duration, Instant};

// helper trait to convert strings into std::error types
trait StringToAnyhow<T> {
    fn ah(self) -> anyhow::Result<T>;
}

impl<T> StringToAnyhow<T> for Result<T, String> {
    fn ah(self) -> anyhow::Result<T> {
        self.map_err(|err| anyhow::anyhow!("{err}"))
    }
}

const BACKGROUND: Color = Color::rgb(30, 30, 30);

/// Keyboard and mouse state, polled from the SDL event pump.
struct SdlInput {
    events: EventPump,
    keys: HashSet<Keycode>,
    quit: bool,
}

impl InputSource for SdlInput {
    fn poll(&mut self) -> InputState {
        let mut state = InputState::default();

        for ev in self.events.poll_iter() {
            match ev {
                Event::Quit { .. } => self.quit = true,
                Event::KeyDown {
                    keycode: Some(k),
                    repeat,
                    ..
                } => {
                    self.keys.insert(k);

                    if !repeat {
                        match k {
                            Keycode::M => state.toggle_minimap = true,
                            Keycode::Escape => self.quit = true,
                            Keycode::Num1 => state.select_material = Some(1),
                            Keycode::Num2 => state.select_material = Some(2),
                            Keycode::Num3 => state.select_material = Some(3),
                            Keycode::Num4 => state.select_material = Some(4),
                            _ => {}
                        }
                    }
                }
                Event::KeyUp {
                    keycode: Some(k), ..
                } => {
                    self.keys.remove(&k);
                }
                _ => {}
            }
        }

        // define controls
        state.forward = self.keys.contains(&Keycode::W);
        state.backward = self.keys.contains(&Keycode::S);
        state.strafe_left = self.keys.contains(&Keycode::A);
        state.strafe_right = self.keys.contains(&Keycode::D);
        state.turn_left = self.keys.contains(&Keycode::Left);
        state.turn_right = self.keys.contains(&Keycode::Right);

        let mouse = self.events.mouse_state();
        state.pointer = Some(IVec2::new(mouse.x(), mouse.y()));
        state.primary_held = mouse.left();

        state
    }
}

struct SdlRenderer {
    canvas: Canvas<Window>,
}

fn sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

fn sdl_rect(x: f32, y: f32, w: f32, h: f32) -> sdl2::rect::Rect {
    // texel strips are often under a pixel tall; never let them vanish
    sdl2::rect::Rect::new(
        x.floor() as i32,
        y.floor() as i32,
        w.ceil().max(1.) as u32,
        h.ceil().max(1.) as u32,
    )
}

impl SdlRenderer {
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32) -> anyhow::Result<()> {
        let r = radius.round() as i32;
        let (cx, cy) = (x.round() as i32, y.round() as i32);
        for dy in -r..=r {
            let half = (((r * r - dy * dy) as f32).sqrt()).round() as i32;
            self.canvas
                .draw_line((cx - half, cy + dy), (cx + half, cy + dy))
                .ah()?;
        }
        Ok(())
    }

    fn stroke_circle(&mut self, x: f32, y: f32, radius: f32) -> anyhow::Result<()> {
        // midpoint circle, mirrored into all eight octants
        let (cx, cy) = (x.round() as i32, y.round() as i32);
        let mut dx = radius.round() as i32;
        let mut dy = 0;
        let mut err = 1 - dx;
        let mut points = vec![];

        while dx >= dy {
            for (px, py) in [
                (dx, dy),
                (dy, dx),
                (-dy, dx),
                (-dx, dy),
                (-dx, -dy),
                (-dy, -dx),
                (dy, -dx),
                (dx, -dy),
            ] {
                points.push(sdl2::rect::Point::new(cx + px, cy + py));
            }

            dy += 1;
            if err < 0 {
                err += 2 * dy + 1;
            } else {
                dx -= 1;
                err += 2 * (dy - dx) + 1;
            }
        }

        self.canvas.draw_points(points.as_slice()).ah()
    }
}

impl Renderer for SdlRenderer {
    fn draw(&mut self, commands: &[DrawCommand]) -> anyhow::Result<()> {
        self.canvas.set_blend_mode(BlendMode::Blend);
        self.canvas.set_draw_color(sdl_color(BACKGROUND));
        self.canvas.clear();

        for command in commands {
            match *command {
                DrawCommand::FillRect { x, y, w, h, color } => {
                    self.canvas.set_draw_color(sdl_color(color));
                    self.canvas.fill_rect(sdl_rect(x, y, w, h)).ah()?;
                }
                DrawCommand::StrokeRect { x, y, w, h, color } => {
                    self.canvas.set_draw_color(sdl_color(color));
                    self.canvas.draw_rect(sdl_rect(x, y, w, h)).ah()?;
                }
                DrawCommand::FillCircle {
                    x,
                    y,
                    radius,
                    color,
                } => {
                    self.canvas.set_draw_color(sdl_color(color));
                    self.fill_circle(x, y, radius)?;
                }
                DrawCommand::StrokeCircle {
                    x,
                    y,
                    radius,
                    color,
                } => {
                    self.canvas.set_draw_color(sdl_color(color));
                    self.stroke_circle(x, y, radius)?;
                }
                DrawCommand::Line { from, to, color } => {
                    self.canvas.set_draw_color(sdl_color(color));
                    self.canvas
                        .draw_line(
                            (from.0.round() as i32, from.1.round() as i32),
                            (to.0.round() as i32, to.1.round() as i32),
                        )
                        .ah()?;
                }
            }
        }

        self.canvas.present();
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("RAYCASTER_LOG");
    let config = Config::default();

    // sdl boilerplate
    log::info!("initializing sdl2");
    let sdl_ctx = sdl2::init().ah()?;
    log::info!("initializing video");
    let video = sdl_ctx.video().ah()?;

    log::info!("initializing window");
    let mut window = video
        .window(
            "Raycaster",
            config.screen_width as u32,
            config.screen_height as u32,
        )
        .position_centered()
        .build()?;
    window.set_resizable(false);

    log::info!("creating canvas");
    let canvas = window.into_canvas().build()?;
    log::info!("pumping events");
    let events = sdl_ctx.event_pump().ah()?;

    let mut input = SdlInput {
        events,
        keys: HashSet::new(),
        quit: false,
    };
    let mut renderer = SdlRenderer { canvas };
    let mut session = Session::new(config);

    let delta = Duration::from_millis(1_000 / TARGET_FPS);
    let mut frames = 0u32;
    let mut fps_timer = Instant::now();

    loop {
        let prev = Instant::now();

        let state = input.poll();
        if input.quit {
            break;
        }
        session.update(&state);

        let commands = session.draw(&BrickTexture);
        if let Err(err) = renderer.draw(&commands) {
            log::error!("error while drawing frame: {err}");
            return Err(err);
        }

        frames += 1;
        if fps_timer.elapsed() >= Duration::from_secs(1) {
            let fps = frames as f64 / fps_timer.elapsed().as_secs_f64();
            renderer
                .canvas
                .window_mut()
                .set_title(&format!("Raycaster - {fps:.2} fps"))?;
            frames = 0;
            fps_timer = Instant::now();
        }

        let diff = prev.elapsed();
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    log::info!("exiting");
    Ok(())
}
