use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Instant;

use crate::config::CelebrationConfig;

const GRAVITY: f64 = 15.0;
const FALLBACK_COLOR: (u8, u8, u8) = (255, 255, 255);

/// Confetti particle for the completion burst
#[derive(Debug, Clone)]
pub struct ConfettiParticle {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color: (u8, u8, u8),
    pub age: f64,
    pub max_age: f64,
}

impl ConfettiParticle {
    /// Launches a particle from (`x`, `y`) at `angle` radians off straight up.
    fn launch<R: Rng>(x: f64, y: f64, angle: f64, color: (u8, u8, u8), rng: &mut R) -> Self {
        let speed = rng.gen_range(6.0..14.0);
        Self {
            x,
            y,
            // terminal cells are roughly twice as tall as they are wide
            vel_x: angle.sin() * speed * 2.0,
            vel_y: -angle.cos() * speed,
            symbol: *['■', '▪', '●', '▲', '◆', '*']
                .choose(rng)
                .unwrap_or(&'*'),
            color,
            age: 0.0,
            max_age: rng.gen_range(1.5..3.0),
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.vel_x *= 0.97;

        self.age += dt;
        self.age < self.max_age
    }
}

/// Parses "#rrggbb" (leading '#' optional).
pub fn parse_hex_color(s: &str) -> Option<(u8, u8, u8)> {
    let hex = s.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// One-shot particle burst shown when a chain is completed
#[derive(Debug)]
pub struct CelebrationAnimation {
    pub particles: Vec<ConfettiParticle>,
    pub started_at: Option<Instant>,
    pub duration: f64, // seconds
    pub is_active: bool,
    pub width: f64,
    pub height: f64,
}

impl CelebrationAnimation {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            started_at: None,
            duration: 3.0,
            is_active: false,
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn start(&mut self, settings: &CelebrationConfig, width: u16, height: u16, now: Instant) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.started_at = Some(now);
        self.is_active = true;
        self.width = width as f64;
        self.height = height as f64;

        let palette: Vec<(u8, u8, u8)> = settings
            .colors
            .iter()
            .filter_map(|c| parse_hex_color(c))
            .collect();
        let origin_x = settings.origin_x.clamp(0.0, 1.0) * self.width;
        let origin_y = settings.origin_y.clamp(0.0, 1.0) * self.height;
        let half_spread = settings.spread_degrees.abs().to_radians() / 2.0;

        for _ in 0..settings.particle_count {
            let angle = if half_spread > 0.0 {
                rng.gen_range(-half_spread..=half_spread)
            } else {
                0.0
            };
            let color = palette.choose(&mut rng).copied().unwrap_or(FALLBACK_COLOR);
            self.particles
                .push(ConfettiParticle::launch(origin_x, origin_y, angle, color, &mut rng));
        }
        tracing::debug!(particles = self.particles.len(), "celebration started");
    }

    pub fn stop(&mut self) {
        self.is_active = false;
        self.started_at = None;
        self.particles.clear();
    }

    pub fn update(&mut self, now: Instant) {
        if !self.is_active {
            return;
        }

        let elapsed = self
            .started_at
            .map(|t| now.saturating_duration_since(t).as_secs_f64())
            .unwrap_or_default();
        if elapsed >= self.duration {
            self.stop();
            return;
        }

        let dt = 0.1; // fixed timestep, one step per frame
        let buffer = 5.0;
        let (width, height) = (self.width, self.height);
        self.particles.retain_mut(|particle| {
            let still_alive = particle.update(dt);
            let off_screen =
                particle.y > height + buffer || particle.x < -buffer || particle.x > width + buffer;
            still_alive && !off_screen
        });
    }
}

impl Default for CelebrationAnimation {
    fn default() -> Self {
        Self::new()
    }
}
