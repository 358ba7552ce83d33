//! Canvas 2D renderer
//!
//! Draws one frame from a `RenderSnapshot`. Owns the 2d context and the
//! backing-store scaling; never reads simulation state directly.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::sim::{CashKind, ObstacleShape, ObstacleTag, ObstacleView, RenderSnapshot};
use crate::tuning::Theme;

const PLAYER_COLOR: &str = "#ffd166";
const HUD_COLOR: &str = "#cbd5e1";
const HUD_FONT: &str = "14px Inter, Arial";
const COIN_COLOR: &str = "#ffd700";
const BILL_COLOR: &str = "#85bb65";

/// Canvas renderer state.
pub struct CanvasRenderState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasRenderState {
    /// Grab the 2d context. None when the element has no 2d context.
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas: canvas.clone(),
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Resize the backing store to `width` x `height` logical pixels,
    /// scaled by the device pixel ratio, and keep drawing in logical units.
    pub fn resize(&mut self, width: f64, height: f64, dpr: f64) {
        self.width = width;
        self.height = height;
        self.canvas.set_width((width * dpr) as u32);
        self.canvas.set_height((height * dpr) as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
    }

    /// Draw a full frame. Runs every animation frame regardless of phase;
    /// a paused or finished round just redraws its frozen state.
    pub fn render(&self, snap: &RenderSnapshot) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        self.draw_background(snap.theme);
        self.draw_baseline_dots();

        for view in &snap.obstacles {
            self.draw_obstacle(view);
        }

        ctx.set_fill_style_str(PLAYER_COLOR);
        ctx.fill_rect(
            snap.player_pos.x as f64,
            snap.player_pos.y as f64,
            snap.player_size.x as f64,
            snap.player_size.y as f64,
        );

        ctx.set_fill_style_str(HUD_COLOR);
        ctx.set_font(HUD_FONT);
        let _ = ctx.fill_text(&format!("Score: {}", snap.score), 14.0, 22.0);
        let _ = ctx.fill_text(&format!("Best: {}", snap.best), 14.0, 40.0);
    }

    fn draw_background(&self, theme: Theme) {
        let (top, bottom) = match theme {
            Theme::Beats => ("#07102a", "#05121b"),
            Theme::Money => ("#0a1f12", "#04130a"),
        };
        let gradient = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        let _ = gradient.add_color_stop(0.0, top);
        let _ = gradient.add_color_stop(1.0, bottom);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    /// Faint tick dots along the bottom edge, raised every third step.
    fn draw_baseline_dots(&self) {
        let ctx = &self.ctx;
        ctx.save();
        ctx.set_global_alpha(0.06);
        ctx.set_fill_style_str("#ffffff");
        let mut x = 0.0;
        while x < self.width {
            let lift = if (x as i64) % 90 == 0 { 6.0 } else { 0.0 };
            ctx.fill_rect(x, self.height - 2.0 - lift, 2.0, 2.0);
            x += 30.0;
        }
        ctx.restore();
    }

    fn draw_obstacle(&self, view: &ObstacleView) {
        let ctx = &self.ctx;
        let color = match view.tag {
            ObstacleTag::Hue(hue) => format!("hsl({}, 80%, 60%)", hue),
            ObstacleTag::Cash(CashKind::Coin) => COIN_COLOR.to_string(),
            ObstacleTag::Cash(CashKind::Bill) => BILL_COLOR.to_string(),
        };
        ctx.set_fill_style_str(&color);
        ctx.set_shadow_color(&color);
        ctx.set_shadow_blur(12.0);

        match view.shape {
            ObstacleShape::Circle { radius } => {
                let r = radius as f64;
                let cx = view.pos.x as f64 + r;
                let cy = view.pos.y as f64 + r;
                ctx.begin_path();
                let _ = ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU);
                ctx.fill();
            }
            ObstacleShape::Rect { size } => {
                ctx.fill_rect(
                    view.pos.x as f64,
                    view.pos.y as f64,
                    size.x as f64,
                    size.y as f64,
                );
            }
        }
        ctx.set_shadow_blur(0.0);
    }
}
