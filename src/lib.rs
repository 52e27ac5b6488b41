pub mod disc;
pub mod renderer;

use rand::Rng;

/// How many particles the field holds for the lifetime of the process.
pub const PARTICLE_COUNT: usize = 110;

/// One drifting disc. `x`, `radius` and `speed` are fixed at creation;
/// only `y` changes, once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
}

impl Particle {
    pub fn new(rng: &mut impl Rng, width: f32, height: f32) -> Self {
        Self {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            radius: rng.gen::<f32>() * 2.0 + 1.0,
            speed: rng.gen::<f32>() * 0.5,
        }
    }
}

/// The particle list together with the surface dimensions the motion rule
/// reads. Pure in-memory state so `advance` runs without a surface.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f32,
    height: f32,
}

impl ParticleField {
    /// Seeds `count` particles uniformly over a `width`×`height` surface.
    /// Runs once, at startup; a later resize does not re-seed.
    pub fn seed(rng: &mut impl Rng, count: usize, width: f32, height: f32) -> Self {
        let mut particles = Vec::with_capacity(count);
        for _ in 0..count {
            particles.push(Particle::new(rng, width, height));
        }
        Self {
            particles,
            width,
            height,
        }
    }

    /// Moves every particle up by its speed. A particle that reaches or
    /// passes the top edge wraps to the current surface height.
    pub fn advance(&mut self) {
        for particle in &mut self.particles {
            particle.y -= particle.speed;
            if particle.y <= 0.0 {
                particle.y = self.height;
            }
        }
    }

    /// Applies new surface dimensions. Existing particles keep their
    /// positions; only future wraps see the new height.
    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn field_with(particles: Vec<Particle>, width: f32, height: f32) -> ParticleField {
        ParticleField {
            particles,
            width,
            height,
        }
    }

    #[test]
    fn seed_produces_exact_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::seed(&mut rng, PARTICLE_COUNT, 1920.0, 1080.0);
        assert_eq!(field.particles().len(), PARTICLE_COUNT);
    }

    #[test]
    fn seed_stays_in_bounds_and_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        let field = ParticleField::seed(&mut rng, 500, 800.0, 600.0);
        for p in field.particles() {
            assert!(p.x >= 0.0 && p.x < 800.0);
            assert!(p.y >= 0.0 && p.y < 600.0);
            assert!(p.radius >= 1.0 && p.radius < 3.0);
            assert!(p.speed >= 0.0 && p.speed < 0.5);
        }
    }

    #[test]
    fn advance_keeps_y_within_surface() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = ParticleField::seed(&mut rng, 200, 640.0, 480.0);
        for _ in 0..10_000 {
            field.advance();
            for p in field.particles() {
                assert!(p.y > 0.0 && p.y <= 480.0, "y out of bounds: {}", p.y);
            }
        }
    }

    #[test]
    fn particle_past_top_wraps_to_current_height() {
        let mut field = field_with(
            vec![Particle {
                x: 10.0,
                y: 0.3,
                radius: 2.0,
                speed: 0.5,
            }],
            200.0,
            100.0,
        );
        field.advance();
        assert_eq!(field.particles()[0].y, 100.0);
    }

    #[test]
    fn wrap_reads_height_applied_after_resize() {
        let mut field = field_with(
            vec![Particle {
                x: 10.0,
                y: 0.3,
                radius: 2.0,
                speed: 0.5,
            }],
            200.0,
            100.0,
        );
        field.set_resolution(400.0, 300.0);
        field.advance();
        assert_eq!(field.particles()[0].y, 300.0);
    }

    #[test]
    fn advance_decreases_y_by_exactly_speed() {
        let mut field = field_with(
            vec![Particle {
                x: 5.0,
                y: 10.0,
                radius: 1.0,
                speed: 0.25,
            }],
            100.0,
            100.0,
        );
        field.advance();
        assert_eq!(field.particles()[0].y, 9.75);
    }

    #[test]
    fn resize_leaves_particles_untouched() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut field = ParticleField::seed(&mut rng, 50, 1024.0, 768.0);
        let before = field.particles().to_vec();
        field.set_resolution(640.0, 480.0);
        assert_eq!(field.particles(), before.as_slice());
        assert_eq!(field.width(), 640.0);
        assert_eq!(field.height(), 480.0);
    }

    #[test]
    fn single_particle_drift_and_wrap() {
        let mut field = field_with(
            vec![Particle {
                x: 50.0,
                y: 10.0,
                radius: 2.0,
                speed: 1.0,
            }],
            200.0,
            100.0,
        );
        field.advance();
        assert_eq!(field.particles()[0].y, 9.0);
        for _ in 0..8 {
            field.advance();
        }
        assert_eq!(field.particles()[0].y, 1.0);
        // Reaching exactly zero counts as leaving the top edge.
        field.advance();
        assert_eq!(field.particles()[0].y, 100.0);
    }
}
