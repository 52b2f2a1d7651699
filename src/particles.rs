//! Glowing particle field behind the card.
//!
//! Ambient particles trickle in anywhere on the surface in a cool blue/teal
//! band and fade slowly. Entering explosion mode bursts a fixed number of fast,
//! warm gold/red particles from the centre that fade three times faster.

use rand::Rng;

pub const SPAWN_CHANCE: f64 = 0.15;
pub const BURST_SIZE: usize = 150;
pub const AMBIENT_DECAY: f64 = 0.005;
pub const EXPLOSION_DECAY: f64 = 0.015;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ParticleMode {
    #[default]
    Off,
    Ambient,
    Explosion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Ambient,
    Explosion,
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub hue: f64,
    pub alpha: f64,
    pub life: f64,
    pub decay: f64,
    pub origin: Origin,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, x: f64, y: f64, origin: Origin) -> Self {
        let (max_size, spread, hue_base, hue_span, decay) = match origin {
            Origin::Ambient => (2.0, 1.5, 180.0, 40.0, AMBIENT_DECAY),
            Origin::Explosion => (4.0, 12.0, 10.0, 60.0, EXPLOSION_DECAY),
        };
        Self {
            x,
            y,
            vx: (rng.gen_range(0.0..1.0) - 0.5) * spread,
            vy: (rng.gen_range(0.0..1.0) - 0.5) * spread,
            size: rng.gen_range(0.0..1.0) * max_size + 1.0,
            hue: hue_base + rng.gen_range(0.0..1.0) * hue_span,
            alpha: rng.gen_range(0.0..1.0),
            life: 1.0,
            decay,
            origin,
        }
    }

    fn update(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
        self.life -= self.decay;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }

    /// CSS colour used for both the fill and the glow.
    pub fn color(&self) -> String {
        format!("hsla({:.1}, 100%, 75%, {:.3})", self.hue, self.alpha)
    }
}

pub struct ParticleField<R: Rng> {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
    mode: ParticleMode,
    spawn_chance: f64,
    burst_size: usize,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    pub fn new(width: f64, height: f64, rng: R) -> Self {
        Self::with_tuning(width, height, rng, SPAWN_CHANCE, BURST_SIZE)
    }

    pub fn with_tuning(width: f64, height: f64, rng: R, spawn_chance: f64, burst_size: usize) -> Self {
        Self {
            particles: Vec::with_capacity(burst_size * 2),
            width,
            height,
            mode: ParticleMode::Off,
            spawn_chance: spawn_chance.clamp(0.0, 1.0),
            burst_size,
            rng,
        }
    }

    pub fn mode(&self) -> ParticleMode {
        self.mode
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Switch mode. Entering explosion bursts immediately; particles already in
    /// flight keep animating in every mode.
    pub fn set_mode(&mut self, mode: ParticleMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        if mode == ParticleMode::Explosion {
            self.burst();
        }
    }

    fn burst(&mut self) {
        let (cx, cy) = (self.width / 2.0, self.height / 2.0);
        for _ in 0..self.burst_size {
            let p = Particle::spawn(&mut self.rng, cx, cy, Origin::Explosion);
            self.particles.push(p);
        }
    }

    /// One animation frame: maybe spawn, advance, then drop the dead.
    pub fn step(&mut self) {
        if self.mode != ParticleMode::Off && self.rng.gen_bool(self.spawn_chance) {
            let x = self.rng.gen_range(0.0..1.0) * self.width;
            let y = self.rng.gen_range(0.0..1.0) * self.height;
            let p = Particle::spawn(&mut self.rng, x, y, Origin::Ambient);
            self.particles.push(p);
        }
        for p in &mut self.particles {
            p.update();
        }
        self.particles.retain(Particle::is_alive);
    }
}
