//! Canvas 2D renderer (browser only)
//!
//! Sprites are loaded once up front. A sprite that fails to load is logged
//! and simply skipped when drawing.

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{FrameView, Renderer};
use crate::consts::*;

const SPRITE_DIR: &str = "assets/flappy-bird/sprites";
const BIRD_SPRITES: [&str; 3] = ["downflap", "midflap", "upflap"];
/// Floor tiles drawn side by side (covers 2500px of width)
const FLOOR_TILES: usize = 6;

struct Sprites {
    background: HtmlImageElement,
    bird: [HtmlImageElement; 3],
    pipe_green: HtmlImageElement,
    pipe_red: HtmlImageElement,
    base: HtmlImageElement,
}

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    sprites: Sprites,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let sprites = Sprites {
            background: load_sprite("background-day")?,
            bird: [
                load_sprite(&format!("yellowbird-{}", BIRD_SPRITES[0]))?,
                load_sprite(&format!("yellowbird-{}", BIRD_SPRITES[1]))?,
                load_sprite(&format!("yellowbird-{}", BIRD_SPRITES[2]))?,
            ],
            pipe_green: load_sprite("pipe-green")?,
            pipe_red: load_sprite("pipe-red")?,
            base: load_sprite("base")?,
        };

        Ok(Self { ctx, sprites })
    }

    fn image(&self, img: &HtmlImageElement, x: f32, y: f32, w: f32, h: f32) {
        // Broken or still-loading images have no natural size
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img, x as f64, y as f64, w as f64, h as f64,
            );
    }

    fn draw_pipes(&self, frame: &FrameView) {
        let pipe_len = frame.height / 1.5;
        for pipe in &frame.pipes {
            let img = if pipe.moving {
                &self.sprites.pipe_red
            } else {
                &self.sprites.pipe_green
            };

            // Top pipe is the same sprite flipped upside down
            self.ctx.save();
            let _ = self.ctx.scale(1.0, -1.0);
            self.image(img, pipe.pos.x, -pipe.pos.y - pipe.height, pipe.width, pipe_len);
            self.ctx.restore();

            let bottom = pipe.pos.y + pipe.height + pipe.gap;
            self.image(img, pipe.pos.x, bottom, pipe.width, pipe_len);
        }
    }

    fn draw_ground(&self, frame: &FrameView) {
        for i in 0..FLOOR_TILES {
            let x = i as f32 * FLOOR_WIDTH - frame.floor_offset;
            self.image(
                &self.sprites.base,
                x,
                frame.height - FLOOR_HEIGHT,
                FLOOR_WIDTH,
                FLOOR_HEIGHT,
            );
        }
    }

    fn draw_lasers(&self, frame: &FrameView) {
        for laser in &frame.lasers {
            self.ctx.save();
            self.ctx
                .set_global_alpha((laser.life / LASER_LIFETIME).clamp(0.2, 1.0) as f64);
            self.ctx.set_stroke_style_str("red");
            self.ctx.set_line_width(laser.width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(laser.start.x as f64, laser.start.y as f64);
            self.ctx.line_to(laser.end.x as f64, laser.end.y as f64);
            self.ctx.stroke();
            self.ctx.restore();
        }
    }

    fn draw_score(&self, frame: &FrameView) {
        self.ctx.set_fill_style_str("black");
        self.ctx.set_font("24px Calibri");
        let _ = self.ctx.fill_text(&format!("Score: {}", frame.score), 10.0, 50.0);
        let _ = self
            .ctx
            .fill_text(&format!("High score: {}", frame.high_score), 10.0, 80.0);
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, frame: &FrameView) {
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.set_global_alpha(1.0);
        let _ = self.ctx.set_global_composite_operation("source-over");
        self.ctx
            .clear_rect(0.0, 0.0, frame.width as f64, frame.height as f64);

        self.image(&self.sprites.background, 0.0, 0.0, frame.width, frame.height);

        let bird = &self.sprites.bird[frame.bird_frame as usize % BIRD_SPRITES.len()];
        self.image(
            bird,
            frame.bird_pos.x,
            frame.bird_pos.y,
            frame.bird_size.x,
            frame.bird_size.y,
        );

        self.draw_pipes(frame);
        self.draw_ground(frame);
        self.draw_score(frame);
        self.draw_lasers(frame);

        if frame.game_over {
            self.ctx.set_fill_style_str("red");
            self.ctx.set_font("48px Arial");
            let _ = self.ctx.fill_text(
                "Game Over",
                (frame.width / 2.0 - 100.0) as f64,
                (frame.height / 2.0) as f64,
            );
        }
    }
}

fn load_sprite(name: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    let src = format!("{SPRITE_DIR}/{name}.png");

    let failed = src.clone();
    let on_error = Closure::<dyn FnMut()>::new(move || {
        log::warn!("Failed to load sprite {}", failed);
    });
    img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    on_error.forget();

    img.set_src(&src);
    Ok(img)
}
