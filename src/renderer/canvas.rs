//! HTML canvas 2D renderer (web only)

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::Renderer;
use crate::css_color;
use crate::error::{Error, Result};
use crate::sim::SimState;

/// Translucent fill drawn over the previous frame, leaving short trails
const TRAIL_FILL: &str = "rgba(17, 17, 17, 0.2)";
/// Extra radius of the glow halo around each ball
const GLOW: f64 = 20.0;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

fn js_err(e: JsValue) -> Error {
    Error::Render(format!("{:?}", e))
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        use wasm_bindgen::JsCast;

        let ctx = canvas
            .get_context("2d")
            .map_err(js_err)?
            .ok_or_else(|| Error::Render("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::Render("2d context has unexpected type".into()))?;
        Ok(Self { canvas, ctx })
    }

    /// Match the canvas backing store to the arena size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, state: &SimState) -> Result<()> {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(TRAIL_FILL);
        ctx.fill_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );

        for body in &state.bodies {
            let (x, y, r) = (body.pos.x as f64, body.pos.y as f64, body.radius as f64);
            let color = css_color(body.color);

            let glow = ctx
                .create_radial_gradient(x, y, r * 0.5, x, y, r + GLOW)
                .map_err(js_err)?;
            glow.add_color_stop(0.0, &color).map_err(js_err)?;
            glow.add_color_stop(0.4, &format!("{}88", color))
                .map_err(js_err)?;
            glow.add_color_stop(1.0, "transparent").map_err(js_err)?;

            ctx.begin_path();
            ctx.arc(x, y, r + GLOW, 0.0, TAU).map_err(js_err)?;
            ctx.set_fill_style_canvas_gradient(&glow);
            ctx.fill();

            ctx.begin_path();
            ctx.arc(x, y, r, 0.0, TAU).map_err(js_err)?;
            ctx.set_fill_style_str(&color);
            ctx.fill();
        }
        Ok(())
    }
}
