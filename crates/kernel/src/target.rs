use cubehunt_common::{Aabb, Ray, TargetId};
use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::placement::{PlacementPolicy, PlayMode};

/// Largest frame step applied to motion. Longer gaps (tab switch, debugger)
/// are treated as this long so targets do not jump across the screen.
const MAX_FRAME_STEP_SECS: f64 = 0.1;

/// Lifecycle of a target: `Alive -> Hit -> Expired`, never backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetState {
    Alive,
    Hit,
    Expired,
}

/// One spawned cube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub id: TargetId,
    pub position: Vec3,
    pub state: TargetState,
    /// Host time at spawn, seconds.
    pub spawn_time: f64,
    /// Host time of the hit, set on `Alive -> Hit`.
    pub hit_time: Option<f64>,
}

impl Target {
    pub fn is_alive(&self) -> bool {
        self.state == TargetState::Alive
    }

    /// Seconds between spawn and `now`.
    pub fn reaction_time(&self, now: f64) -> f64 {
        (now - self.spawn_time).max(0.0)
    }

    /// Fade progress in `[0, 1]` for a hit target; `0` while alive.
    pub fn fade_progress(&self, now: f64, fade_secs: f64) -> f64 {
        match self.hit_time {
            Some(hit) if fade_secs > 0.0 => ((now - hit) / fade_secs).clamp(0.0, 1.0),
            Some(_) => 1.0,
            None => 0.0,
        }
    }
}

/// Per-frame motion parameters for the current round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Round speed multiplier.
    pub speed: f32,
    /// Wander amplitude, units per second.
    pub wander_rate: f32,
    /// Depth drift, units per second. Zero outside immersive mode.
    pub drift_rate: f32,
}

/// Owns every live target. The only place target state changes.
///
/// Targets are kept in spawn order, which is also the traversal order used to
/// break ray-test ties.
#[derive(Debug, Clone)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    next_id: u64,
    last_advance: Option<f64>,
    placement: PlacementPolicy,
    target_size: f32,
    fade_secs: f64,
}

impl TargetRegistry {
    pub fn new(placement: PlacementPolicy, target_size: f32, fade_secs: f64) -> Self {
        Self {
            targets: Vec::new(),
            next_id: 0,
            last_advance: None,
            placement,
            target_size,
            fade_secs,
        }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.targets.iter().filter(|t| t.is_alive()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn get(&self, id: TargetId) -> Option<&Target> {
        self.targets.iter().find(|t| t.id == id)
    }

    pub fn target_size(&self) -> f32 {
        self.target_size
    }

    pub fn fade_secs(&self) -> f64 {
        self.fade_secs
    }

    /// Place target `index` of `count` for `mode` and append it as `Alive`.
    pub fn spawn<R: Rng>(
        &mut self,
        index: u32,
        count: u32,
        mode: PlayMode,
        rng: &mut R,
        now: f64,
    ) -> &Target {
        let position = self.placement.place(mode, index, count, rng);
        self.insert(position, now)
    }

    /// Append an `Alive` target at an explicit position.
    pub fn insert(&mut self, position: Vec3, now: f64) -> &Target {
        let id = TargetId(self.next_id);
        self.next_id += 1;
        self.targets.push(Target {
            id,
            position,
            state: TargetState::Alive,
            spawn_time: now,
            hit_time: None,
        });
        &self.targets[self.targets.len() - 1]
    }

    /// `Alive -> Hit`. Returns `false` (and changes nothing) when the target
    /// is absent or already hit.
    pub fn mark_hit(&mut self, id: TargetId, now: f64) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) if target.is_alive() => {
                target.state = TargetState::Hit;
                target.hit_time = Some(now);
                true
            }
            _ => false,
        }
    }

    /// Nearest alive target intersected by `ray`, with its distance.
    /// Equal distances go to the earlier-spawned target.
    pub fn ray_test(&self, ray: &Ray) -> Option<(TargetId, f32)> {
        let mut best: Option<(TargetId, f32)> = None;
        for target in self.targets.iter().filter(|t| t.is_alive()) {
            let Some(distance) = Aabb::cube(target.position, self.target_size).intersect(ray) else {
                continue;
            };
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((target.id, distance));
            }
        }
        best
    }

    /// Move alive targets, fade hit ones and drop those whose fade finished.
    /// Returns the ids removed this frame.
    pub fn advance(&mut self, now: f64, motion: &Motion) -> Vec<TargetId> {
        let dt = match self.last_advance {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_STEP_SECS) as f32,
            None => 0.0,
        };
        self.last_advance = Some(now);

        for target in &mut self.targets {
            match target.state {
                TargetState::Alive => {
                    let t = (now - target.spawn_time) as f32;
                    let step = motion.wander_rate * motion.speed * dt;
                    let p = &mut target.position;
                    p.x += (t + p.x).sin() * step;
                    p.y += (t * 1.3 + p.y).cos() * step;
                    p.z += (t * 0.7).sin() * motion.drift_rate * motion.speed * dt;
                }
                TargetState::Hit => {
                    if target.fade_progress(now, self.fade_secs) >= 1.0 {
                        target.state = TargetState::Expired;
                    }
                }
                TargetState::Expired => {}
            }
        }

        let mut removed = Vec::new();
        self.targets.retain(|t| {
            if t.state == TargetState::Expired {
                removed.push(t.id);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Re-place alive targets for `mode`, keeping ids and spawn times.
    /// Used when the display mode changes mid-round.
    pub fn relocate_alive<R: Rng>(&mut self, mode: PlayMode, rng: &mut R) {
        let count = self.targets.len() as u32;
        for (index, target) in self.targets.iter_mut().enumerate() {
            if target.is_alive() {
                target.position = self.placement.place(mode, index as u32, count, rng);
            }
        }
    }

    /// Remove every target. Returns the removed ids in spawn order.
    pub fn clear(&mut self) -> Vec<TargetId> {
        self.last_advance = None;
        self.targets.drain(..).map(|t| t.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry() -> TargetRegistry {
        TargetRegistry::new(PlacementPolicy::default(), 0.3, 1.5)
    }

    fn still() -> Motion {
        Motion {
            speed: 1.0,
            wander_rate: 0.0,
            drift_rate: 0.0,
        }
    }

    fn ray_at(x: f32, y: f32) -> Ray {
        Ray::new(Vec3::new(x, y, 5.0), Vec3::NEG_Z)
    }

    #[test]
    fn spawn_assigns_sequential_ids() {
        let mut reg = registry();
        let mut rng = StdRng::seed_from_u64(1);
        let a = reg.spawn(0, 2, PlayMode::Flat, &mut rng, 0.0).id;
        let b = reg.spawn(1, 2, PlayMode::Flat, &mut rng, 0.0).id;
        assert_eq!(a, TargetId(0));
        assert_eq!(b, TargetId(1));
        assert_eq!(reg.alive_count(), 2);
    }

    #[test]
    fn mark_hit_is_idempotent() {
        let mut reg = registry();
        let id = reg.insert(Vec3::ZERO, 0.0).id;
        assert!(reg.mark_hit(id, 1.0));
        assert!(!reg.mark_hit(id, 2.0));
        assert_eq!(reg.get(id).unwrap().hit_time, Some(1.0));
        assert_eq!(reg.get(id).unwrap().state, TargetState::Hit);
    }

    #[test]
    fn mark_hit_absent_is_noop() {
        let mut reg = registry();
        assert!(!reg.mark_hit(TargetId(99), 0.0));
    }

    #[test]
    fn ray_test_finds_target() {
        let mut reg = registry();
        let id = reg.insert(Vec3::new(1.0, 2.0, 0.0), 0.0).id;
        let (hit, distance) = reg.ray_test(&ray_at(1.0, 2.0)).unwrap();
        assert_eq!(hit, id);
        assert!((distance - 4.85).abs() < 1e-4);
        assert!(reg.ray_test(&ray_at(-1.0, 2.0)).is_none());
    }

    #[test]
    fn ray_test_skips_hit_targets() {
        let mut reg = registry();
        let id = reg.insert(Vec3::ZERO, 0.0).id;
        reg.mark_hit(id, 0.5);
        assert!(reg.ray_test(&ray_at(0.0, 0.0)).is_none());
    }

    #[test]
    fn ray_test_prefers_nearest() {
        let mut reg = registry();
        let far = reg.insert(Vec3::new(0.0, 0.0, -2.0), 0.0).id;
        let near = reg.insert(Vec3::new(0.0, 0.0, 1.0), 0.0).id;
        assert_ne!(far, near);
        assert_eq!(reg.ray_test(&ray_at(0.0, 0.0)).unwrap().0, near);
    }

    #[test]
    fn ray_test_tie_goes_to_first_spawned() {
        let mut reg = registry();
        let first = reg.insert(Vec3::new(0.0, 0.0, 0.0), 0.0).id;
        let _second = reg.insert(Vec3::new(0.05, 0.0, 0.0), 0.0).id;
        assert_eq!(reg.ray_test(&ray_at(0.02, 0.0)).unwrap().0, first);
    }

    #[test]
    fn hit_targets_fade_then_expire() {
        let mut reg = registry();
        let id = reg.insert(Vec3::ZERO, 0.0).id;
        reg.mark_hit(id, 1.0);

        assert!(reg.advance(1.75, &still()).is_empty());
        let progress = reg.get(id).unwrap().fade_progress(1.75, reg.fade_secs());
        assert!((progress - 0.5).abs() < 1e-9);

        let removed = reg.advance(2.5, &still());
        assert_eq!(removed, vec![id]);
        assert!(reg.is_empty());
    }

    #[test]
    fn alive_targets_are_never_reaped() {
        let mut reg = registry();
        reg.insert(Vec3::ZERO, 0.0);
        for i in 0..100 {
            assert!(reg.advance(i as f64, &still()).is_empty());
        }
        assert_eq!(reg.alive_count(), 1);
    }

    #[test]
    fn alive_targets_wander() {
        let mut reg = registry();
        let id = reg.insert(Vec3::new(0.5, 2.0, 0.0), 0.0).id;
        let motion = Motion {
            speed: 1.0,
            wander_rate: 0.3,
            drift_rate: 0.0,
        };
        reg.advance(0.0, &motion);
        for frame in 1..=60 {
            reg.advance(frame as f64 / 60.0, &motion);
        }
        let p = reg.get(id).unwrap().position;
        assert_ne!(p, Vec3::new(0.5, 2.0, 0.0));
        assert_eq!(p.z, 0.0);
        assert!((p - Vec3::new(0.5, 2.0, 0.0)).length() < 0.6);
    }

    #[test]
    fn hit_targets_stop_moving() {
        let mut reg = registry();
        let id = reg.insert(Vec3::new(0.5, 2.0, 0.0), 0.0).id;
        let motion = Motion {
            speed: 2.0,
            wander_rate: 0.3,
            drift_rate: 0.2,
        };
        reg.advance(0.0, &motion);
        reg.mark_hit(id, 0.0);
        reg.advance(0.05, &motion);
        assert_eq!(reg.get(id).unwrap().position, Vec3::new(0.5, 2.0, 0.0));
    }

    #[test]
    fn long_frame_gap_is_clamped() {
        let mut reg = registry();
        let id = reg.insert(Vec3::new(0.0, 2.0, 0.0), 0.0).id;
        let motion = Motion {
            speed: 1.0,
            wander_rate: 1.0,
            drift_rate: 0.0,
        };
        reg.advance(0.0, &motion);
        reg.advance(100.0, &motion);
        let moved = (reg.get(id).unwrap().position - Vec3::new(0.0, 2.0, 0.0)).length();
        assert!(moved <= 0.1 * 2f32.sqrt() + 1e-4);
    }

    #[test]
    fn relocate_moves_only_alive_targets() {
        let mut reg = registry();
        let mut rng = StdRng::seed_from_u64(5);
        let hit = reg.insert(Vec3::new(9.0, 9.0, 9.0), 0.0).id;
        let alive = reg.insert(Vec3::new(9.0, 9.0, 9.0), 0.0).id;
        reg.mark_hit(hit, 0.0);
        reg.relocate_alive(PlayMode::Immersive, &mut rng);
        assert_eq!(reg.get(hit).unwrap().position, Vec3::new(9.0, 9.0, 9.0));
        let p = reg.get(alive).unwrap().position;
        assert!((Vec3::new(p.x, 0.0, p.z).length() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn clear_returns_ids_in_spawn_order() {
        let mut reg = registry();
        let a = reg.insert(Vec3::ZERO, 0.0).id;
        let b = reg.insert(Vec3::ONE, 0.0).id;
        assert_eq!(reg.clear(), vec![a, b]);
        assert!(reg.is_empty());
    }
}
