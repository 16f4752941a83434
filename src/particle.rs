// Simple particle struct to keep track of individual position, velocity,
// radius, and color

use crate::color::Color;

// The site palette: purple, teal, pink. Node base alpha is baked into the
// alpha channel (0.7 for purple/teal, 0.6 for pink).
pub const PALETTE: [Color; 3] = [
    Color {
        r: 124,
        g: 58,
        b: 237,
        a: 179,
    },
    Color {
        r: 54,
        g: 215,
        b: 183,
        a: 179,
    },
    Color {
        r: 255,
        g: 58,
        b: 140,
        a: 153,
    },
];

#[derive(Copy, Clone, Debug)]
pub struct Particle {
    pub pos: [f64; 2],
    pub vel: [f64; 2],
    pub radius: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(pos: [f64; 2], vel: [f64; 2], radius: f64, color: Color) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            color,
        }
    }
}
