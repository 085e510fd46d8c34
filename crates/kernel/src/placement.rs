use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Which display the player is using. Decides spawn placement and which
/// input sources are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayMode {
    /// Flat screen, aimed with pointer or touch.
    #[default]
    Flat,
    /// Head-mounted display, aimed with tracked controllers.
    Immersive,
}

/// Flat mode: uniform in a rectangle facing the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlatBand {
    pub x_min: f32,
    pub x_max: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub z: f32,
}

impl Default for FlatBand {
    fn default() -> Self {
        Self {
            x_min: -4.0,
            x_max: 4.0,
            y_min: 1.0,
            y_max: 5.0,
            z: 0.0,
        }
    }
}

/// Immersive mode: evenly spaced on a horizontal circle around the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub radius: f32,
    pub base_height: f32,
    /// Random extra height in `[0, height_jitter)`.
    pub height_jitter: f32,
}

impl Default for Ring {
    fn default() -> Self {
        Self {
            radius: 2.0,
            base_height: 1.5,
            height_jitter: 1.0,
        }
    }
}

/// Single placement abstraction covering both modes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementPolicy {
    pub flat: FlatBand,
    pub immersive: Ring,
}

impl PlacementPolicy {
    /// Spawn position of target `index` out of `count` in the given mode.
    pub fn place<R: Rng>(&self, mode: PlayMode, index: u32, count: u32, rng: &mut R) -> Vec3 {
        match mode {
            PlayMode::Flat => {
                let band = &self.flat;
                Vec3::new(
                    lerp(band.x_min, band.x_max, rng.random::<f32>()),
                    lerp(band.y_min, band.y_max, rng.random::<f32>()),
                    band.z,
                )
            }
            PlayMode::Immersive => {
                let ring = &self.immersive;
                let angle = index as f32 / count.max(1) as f32 * std::f32::consts::TAU;
                Vec3::new(
                    angle.cos() * ring.radius,
                    ring.base_height + rng.random::<f32>() * ring.height_jitter,
                    angle.sin() * ring.radius,
                )
            }
        }
    }

    /// Whether targets slowly drift in depth in this mode.
    pub fn drifts(mode: PlayMode) -> bool {
        mode == PlayMode::Immersive
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn flat_placement_stays_in_band() {
        let policy = PlacementPolicy::default();
        let mut rng = StdRng::seed_from_u64(1);
        for i in 0..200 {
            let p = policy.place(PlayMode::Flat, i % 3, 3, &mut rng);
            assert!((-4.0..=4.0).contains(&p.x));
            assert!((1.0..=5.0).contains(&p.y));
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn immersive_placement_on_ring() {
        let policy = PlacementPolicy::default();
        let mut rng = StdRng::seed_from_u64(2);
        for i in 0..4 {
            let p = policy.place(PlayMode::Immersive, i, 4, &mut rng);
            let horizontal = Vec3::new(p.x, 0.0, p.z).length();
            assert!((horizontal - 2.0).abs() < 1e-4);
            assert!((1.5..=2.5).contains(&p.y));
        }
    }

    #[test]
    fn immersive_placement_is_evenly_spaced() {
        let policy = PlacementPolicy::default();
        let mut rng = StdRng::seed_from_u64(3);
        let first = policy.place(PlayMode::Immersive, 0, 4, &mut rng);
        let second = policy.place(PlayMode::Immersive, 1, 4, &mut rng);
        assert!((first.x - 2.0).abs() < 1e-4 && first.z.abs() < 1e-4);
        assert!(second.x.abs() < 1e-4 && (second.z - 2.0).abs() < 1e-4);
    }

    #[test]
    fn same_seed_same_positions() {
        let policy = PlacementPolicy::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for i in 0..10 {
            assert_eq!(
                policy.place(PlayMode::Flat, i, 10, &mut a),
                policy.place(PlayMode::Flat, i, 10, &mut b)
            );
        }
    }

    #[test]
    fn only_immersive_drifts() {
        assert!(PlacementPolicy::drifts(PlayMode::Immersive));
        assert!(!PlacementPolicy::drifts(PlayMode::Flat));
    }
}
