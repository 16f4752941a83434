// Renderer struct that wraps the canvas 2d context and draws the network
// state each frame: glowing nodes, distance-faded connection lines, and
// the transient packet/ripple overlays.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::effects::PacketEffect;
use crate::network::Network;
use crate::particle::PALETTE;

const NODE_GLOW_BLUR: f64 = 10.0;
const CONNECTION_WIDTH_SCALE: f64 = 1.5;

pub struct Renderer {
    pub context: CanvasRenderingContext2d,
}

impl Renderer {
    pub fn new(context: CanvasRenderingContext2d) -> Self {
        Renderer { context }
    }

    pub fn clear_screen(&self, network: &Network) {
        self.context
            .clear_rect(0.0, 0.0, network.width(), network.height());
    }

    pub fn render_particles(&self, network: &Network) -> Result<(), JsValue> {
        for particle in network.particles() {
            let style = particle.color.css();
            self.context.begin_path();
            self.context
                .arc(particle.pos[0], particle.pos[1], particle.radius, 0.0, TAU)?;
            self.context.set_fill_style(&JsValue::from_str(&style));
            self.context.fill();

            // Glow pass
            self.context.set_shadow_blur(NODE_GLOW_BLUR);
            self.context.set_shadow_color(&style);
            self.context.fill();
            self.context.set_shadow_blur(0.0);
        }
        Ok(())
    }

    pub fn render_connections(&self, network: &Network) {
        for connection in network.connections() {
            let style = connection.color.css_with_alpha(connection.opacity);
            self.context.begin_path();
            self.context.set_stroke_style(&JsValue::from_str(&style));
            self.context
                .set_line_width(connection.opacity * CONNECTION_WIDTH_SCALE);
            self.context.move_to(connection.from[0], connection.from[1]);
            self.context.line_to(connection.to[0], connection.to[1]);
            self.context.stroke();
        }
    }

    pub fn render_effects(&self, network: &Network) -> Result<(), JsValue> {
        for packet in network.packets() {
            let pos = packet.position();
            let style = packet.color.css_with_alpha(packet.opacity());
            self.context.begin_path();
            self.context
                .arc(pos[0], pos[1], PacketEffect::RADIUS, 0.0, TAU)?;
            self.context.set_fill_style(&JsValue::from_str(&style));
            self.context.set_shadow_blur(NODE_GLOW_BLUR);
            self.context.set_shadow_color(&style);
            self.context.fill();
            self.context.set_shadow_blur(0.0);
        }

        for ripple in network.ripples() {
            let style = PALETTE[0].css_with_alpha(ripple.opacity() * 0.5);
            self.context.begin_path();
            self.context
                .arc(ripple.center[0], ripple.center[1], ripple.radius(), 0.0, TAU)?;
            self.context.set_stroke_style(&JsValue::from_str(&style));
            self.context.set_line_width(1.0);
            self.context.stroke();
        }
        Ok(())
    }
}
