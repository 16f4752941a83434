// Short-lived decorative overlays drawn on top of the particle network.
// A packet marker travels between position snapshots of two particles, a
// ripple expands outward from the pointer. Neither feeds back into the
// particle physics; each is removed once its progress reaches 1.

use crate::color::Color;

// Simulated data packet moving from one node's position to another's.
// Endpoints are snapshots taken at spawn time, so the effect survives the
// eviction of either particle.
#[derive(Copy, Clone, Debug)]
pub struct PacketEffect {
    pub origin: [f64; 2],
    pub destination: [f64; 2],
    pub color: Color,
    pub progress: f64,
}

impl PacketEffect {
    pub const DURATION_SECS: f64 = 1.5;
    pub const RADIUS: f64 = 2.0;
    pub const BASE_OPACITY: f64 = 0.8;

    pub fn new(origin: [f64; 2], destination: [f64; 2], color: Color) -> PacketEffect {
        PacketEffect {
            origin,
            destination,
            color,
            progress: 0.0,
        }
    }

    pub fn advance(&mut self, delta_secs: f64) {
        self.progress += delta_secs.max(0.0) / PacketEffect::DURATION_SECS;
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    // Current position, linearly interpolated origin -> destination
    pub fn position(&self) -> [f64; 2] {
        let t = self.progress.max(0.0).min(1.0);
        [
            self.origin[0] + (self.destination[0] - self.origin[0]) * t,
            self.origin[1] + (self.destination[1] - self.origin[1]) * t,
        ]
    }

    // Fades out over the flight
    pub fn opacity(&self) -> f64 {
        (PacketEffect::BASE_OPACITY * (1.0 - self.progress)).max(0.0)
    }
}

// Expanding ring spawned at the pointer position on mouse movement
#[derive(Copy, Clone, Debug)]
pub struct RippleEffect {
    pub center: [f64; 2],
    pub progress: f64,
}

impl RippleEffect {
    pub const DURATION_SECS: f64 = 1.0;
    pub const MIN_RADIUS: f64 = 2.5;
    pub const MAX_RADIUS: f64 = 50.0;

    pub fn new(center: [f64; 2]) -> RippleEffect {
        RippleEffect {
            center,
            progress: 0.0,
        }
    }

    pub fn advance(&mut self, delta_secs: f64) {
        self.progress += delta_secs.max(0.0) / RippleEffect::DURATION_SECS;
    }

    pub fn is_finished(&self) -> bool {
        self.progress >= 1.0
    }

    pub fn radius(&self) -> f64 {
        let t = self.progress.max(0.0).min(1.0);
        RippleEffect::MIN_RADIUS + (RippleEffect::MAX_RADIUS - RippleEffect::MIN_RADIUS) * t
    }

    pub fn opacity(&self) -> f64 {
        (1.0 - self.progress).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particle::PALETTE;

    #[test]
    fn packet_progress_is_linear_in_elapsed_time() {
        let mut packet = PacketEffect::new([0.0, 0.0], [300.0, 0.0], PALETTE[1]);
        packet.advance(PacketEffect::DURATION_SECS / 2.0);
        assert!((packet.progress - 0.5).abs() < 1e-9);
        assert!((packet.position()[0] - 150.0).abs() < 1e-9);
        assert!(!packet.is_finished());
    }

    #[test]
    fn packet_finishes_exactly_at_full_progress() {
        let mut packet = PacketEffect::new([0.0, 0.0], [100.0, 100.0], PALETTE[2]);
        packet.advance(PacketEffect::DURATION_SECS);
        assert!(packet.is_finished());
        // Past the end the draw position stays pinned to the destination and
        // opacity never goes negative
        packet.advance(1.0);
        assert_eq!(packet.position(), [100.0, 100.0]);
        assert!(packet.opacity() >= 0.0);
    }

    #[test]
    fn packet_progress_never_negative() {
        let mut packet = PacketEffect::new([0.0, 0.0], [10.0, 0.0], PALETTE[0]);
        packet.advance(-5.0);
        assert_eq!(packet.progress, 0.0);
        assert_eq!(packet.position(), [0.0, 0.0]);
    }

    #[test]
    fn ripple_expands_and_fades() {
        let mut ripple = RippleEffect::new([40.0, 40.0]);
        assert!((ripple.radius() - RippleEffect::MIN_RADIUS).abs() < 1e-9);
        assert!((ripple.opacity() - 1.0).abs() < 1e-9);
        ripple.advance(RippleEffect::DURATION_SECS);
        assert!(ripple.is_finished());
        assert!((ripple.radius() - RippleEffect::MAX_RADIUS).abs() < 1e-9);
        assert_eq!(ripple.opacity(), 0.0);
    }
}
