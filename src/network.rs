// Simulation state for the network background: owns the particle set, the
// surface extent, and the live transient effects. Population management,
// the physics step, proximity pair computation, and effect spawning all
// live here so they can be unit tested without a canvas. Drawing is done
// separately by the Renderer.

use std::collections::VecDeque;
use std::f64::consts::TAU;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vecmath;

use crate::color::Color;
use crate::effects::{PacketEffect, RippleEffect};
use crate::particle::{Particle, PALETTE};

// One particle per this many square pixels of surface area
const AREA_PER_PARTICLE: f64 = 15000.0;
// Upper bound on the resize-driven target count
const MAX_TARGET_COUNT: usize = 150;
// Absolute ceiling; pointer spawns evict the oldest particle past this.
// Keeps the O(n^2) connection pass within a 60 Hz frame budget.
pub const HARD_POPULATION_CAP: usize = 200;

const DEFAULT_CONNECTION_DISTANCE: f64 = 150.0;
const MIN_CONNECTION_DISTANCE: f64 = 100.0;

// Velocity magnitude range, px per second (0.1..0.6 px per frame at 60 Hz)
const MIN_SPEED: f64 = 6.0;
const MAX_SPEED: f64 = 36.0;

const POINTER_SPAWN_CHANCE: f64 = 0.1;
const POINTER_SPAWN_RADIUS: f64 = 50.0;
const PACKET_SPAWN_CHANCE: f64 = 0.03;
const RIPPLE_SPAWN_CHANCE: f64 = 0.08;

// A proximity edge between two particles, ready to draw
#[derive(Clone, Debug)]
pub struct Connection {
    pub from: [f64; 2],
    pub to: [f64; 2],
    pub color: Color,
    pub opacity: f64,
}

pub struct Network {
    width: f64,
    height: f64,
    connection_distance: f64,
    // Front of the deque is the oldest particle; eviction always pops from
    // the front (FIFO), both on resize shrink and on pointer overflow
    particles: VecDeque<Particle>,
    packets: Vec<PacketEffect>,
    ripples: Vec<RippleEffect>,
    pointer: Option<[f64; 2]>,
    rng: StdRng,
}

impl Network {
    pub fn new(width: u32, height: u32) -> Network {
        Network::with_rng(width, height, StdRng::from_entropy())
    }

    // Deterministic construction for tests
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Network {
        Network::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    fn with_rng(width: u32, height: u32, rng: StdRng) -> Network {
        let mut network = Network {
            width: width as f64,
            height: height as f64,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            particles: VecDeque::new(),
            packets: Vec::new(),
            ripples: Vec::new(),
            pointer: None,
            rng,
        };
        network.grow_to(Network::target_count(width, height));
        network
    }

    // How many particles a surface of the given size should hold. A zero
    // sized surface gets none.
    pub fn target_count(width: u32, height: u32) -> usize {
        let area = width as f64 * height as f64;
        let count = (area / AREA_PER_PARTICLE) as usize;
        count.min(MAX_TARGET_COUNT)
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn packets(&self) -> &[PacketEffect] {
        &self.packets
    }

    pub fn ripples(&self) -> &[RippleEffect] {
        &self.ripples
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn connection_distance(&self) -> f64 {
        self.connection_distance
    }

    // Adjust to a new surface extent: rescale the connection distance and
    // grow or shrink the population toward the new target. Shrinking evicts
    // the oldest particles first. Survivors outside the new bounds are
    // steered back by the normal bounce step rather than clamped.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
        self.connection_distance =
            (self.width.min(self.height) / 8.0).max(MIN_CONNECTION_DISTANCE);

        let target = Network::target_count(width, height);
        if target > self.particles.len() {
            self.grow_to(target);
        } else {
            while self.particles.len() > target {
                self.particles.pop_front();
            }
        }
    }

    // Pointer entered or moved within the surface. Coordinates outside the
    // surface are rejected outright rather than clamped.
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if x < 0.0 || x > self.width || y < 0.0 || y > self.height {
            self.pointer = None;
            return;
        }
        self.pointer = Some([x, y]);
        if self.rng.gen::<f64>() < RIPPLE_SPAWN_CHANCE {
            self.ripples.push(RippleEffect::new([x, y]));
        }
    }

    pub fn pointer_left(&mut self) {
        self.pointer = None;
    }

    // Advance the simulation one frame. Physics first, then the spawners,
    // then effect aging; rendering reads the state this leaves behind.
    pub fn update(&mut self, delta_secs: f64) {
        self.step_particles(delta_secs);
        self.spawn_near_pointer();
        self.spawn_packet();

        for packet in &mut self.packets {
            packet.advance(delta_secs);
        }
        self.packets.retain(|packet| !packet.is_finished());
        for ripple in &mut self.ripples {
            ripple.advance(delta_secs);
        }
        self.ripples.retain(|ripple| !ripple.is_finished());
    }

    // Integrate positions and bounce off the surface edges. The reflection
    // is a plain sign flip applied after the move, so a particle can end a
    // tick past the boundary by up to one tick's displacement; the next
    // tick brings it back. The velocity-direction check keeps particles
    // stranded outside by a shrinking resize from flip-flopping in place.
    fn step_particles(&mut self, delta_secs: f64) {
        for particle in &mut self.particles {
            particle.pos[0] += particle.vel[0] * delta_secs;
            particle.pos[1] += particle.vel[1] * delta_secs;

            let out_left = particle.pos[0] - particle.radius < 0.0 && particle.vel[0] < 0.0;
            let out_right =
                particle.pos[0] + particle.radius > self.width && particle.vel[0] > 0.0;
            if out_left || out_right {
                particle.vel[0] = -particle.vel[0];
            }

            let out_top = particle.pos[1] - particle.radius < 0.0 && particle.vel[1] < 0.0;
            let out_bottom =
                particle.pos[1] + particle.radius > self.height && particle.vel[1] > 0.0;
            if out_top || out_bottom {
                particle.vel[1] = -particle.vel[1];
            }
        }
    }

    // Every unordered pair closer than the connection distance becomes an
    // edge, fading linearly to zero at the threshold. O(n^2), bounded by
    // the population cap.
    pub fn connections(&self) -> Vec<Connection> {
        let mut connections = Vec::new();
        for i in 0..self.particles.len() {
            for j in (i + 1)..self.particles.len() {
                let delta = vecmath::vec2_sub(self.particles[j].pos, self.particles[i].pos);
                let distance = vecmath::vec2_len(delta);
                if distance < self.connection_distance {
                    connections.push(Connection {
                        from: self.particles[i].pos,
                        to: self.particles[j].pos,
                        color: self.particles[i].color,
                        opacity: 1.0 - distance / self.connection_distance,
                    });
                }
            }
        }
        connections
    }

    fn grow_to(&mut self, target: usize) {
        while self.particles.len() < target {
            let x = self.rng.gen::<f64>() * self.width;
            let y = self.rng.gen::<f64>() * self.height;
            let particle = self.make_particle([x, y]);
            self.particles.push_back(particle);
        }
    }

    fn make_particle(&mut self, pos: [f64; 2]) -> Particle {
        let radius = self.rng.gen::<f64>() * 2.0 + 1.0;
        let speed = self.rng.gen_range(MIN_SPEED, MAX_SPEED);
        let vel = [
            self.rng.gen_range(-1.0, 1.0) * speed,
            self.rng.gen_range(-1.0, 1.0) * speed,
        ];
        let color = PALETTE[self.rng.gen_range(0, PALETTE.len())];
        Particle::new(pos, vel, radius, color)
    }

    // Occasionally place a particle at a fixed radius and random angle from
    // the pointer. Positions falling outside the surface are dropped; an
    // insert past the hard cap evicts the oldest particle first so the
    // insert itself never fails.
    fn spawn_near_pointer(&mut self) {
        let pointer = match self.pointer {
            Some(pointer) => pointer,
            None => return,
        };
        if self.rng.gen::<f64>() >= POINTER_SPAWN_CHANCE {
            return;
        }
        let angle = self.rng.gen::<f64>() * TAU;
        let x = pointer[0] + POINTER_SPAWN_RADIUS * angle.cos();
        let y = pointer[1] + POINTER_SPAWN_RADIUS * angle.sin();
        if x <= 0.0 || x >= self.width || y <= 0.0 || y >= self.height {
            return;
        }
        while self.particles.len() >= HARD_POPULATION_CAP {
            self.particles.pop_front();
        }
        let particle = self.make_particle([x, y]);
        self.particles.push_back(particle);
    }

    // Pick two distinct particles for a packet flight. None when fewer than
    // two particles exist.
    fn pick_packet_endpoints(&mut self) -> Option<(usize, usize)> {
        if self.particles.len() < 2 {
            return None;
        }
        let source = self.rng.gen_range(0, self.particles.len());
        let mut target = self.rng.gen_range(0, self.particles.len());
        while target == source {
            target = self.rng.gen_range(0, self.particles.len());
        }
        Some((source, target))
    }

    fn spawn_packet(&mut self) {
        if self.rng.gen::<f64>() >= PACKET_SPAWN_CHANCE {
            return;
        }
        if let Some((source, target)) = self.pick_packet_endpoints() {
            let origin = self.particles[source].pos;
            let destination = self.particles[target].pos;
            // Mostly teal, occasionally pink
            let color = if self.rng.gen::<f64>() > 0.8 {
                PALETTE[2]
            } else {
                PALETTE[1]
            };
            self.packets.push(PacketEffect::new(origin, destination, color));
        }
    }
}
