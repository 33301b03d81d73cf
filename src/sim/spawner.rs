//! Periodic virus creation on the play-field perimeter.

use rand::Rng;

use super::config::SimConfig;
use crate::model::{Vec2, Virus, VirusId, VirusState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];
}

/// Uniform point on `edge`: the fixed axis sits `spawn_edge_inset` inside the
/// field, the free axis ranges over the band `spawn_band_inset` in from each end.
pub fn spawn_point<R: Rng>(cfg: &SimConfig, edge: Edge, rng: &mut R) -> Vec2 {
    let band = cfg.spawn_band_inset;
    match edge {
        Edge::Top => Vec2::new(
            rng.gen_range(band..=cfg.field_width - band),
            cfg.spawn_edge_inset,
        ),
        Edge::Bottom => Vec2::new(
            rng.gen_range(band..=cfg.field_width - band),
            cfg.field_height - cfg.spawn_edge_inset,
        ),
        Edge::Right => Vec2::new(
            cfg.field_width - cfg.spawn_edge_inset,
            rng.gen_range(band..=cfg.field_height - band),
        ),
        Edge::Left => Vec2::new(
            cfg.spawn_edge_inset,
            rng.gen_range(band..=cfg.field_height - band),
        ),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct VirusSpawner {
    next_spawn_ms: f64,
    next_id: u64,
}

impl VirusSpawner {
    /// The first virus appears one interval after `start_ms`.
    pub fn new(start_ms: f64, cfg: &SimConfig) -> Self {
        Self {
            next_spawn_ms: start_ms + cfg.spawn_interval_ms,
            next_id: 0,
        }
    }

    #[cfg(test)]
    pub fn next_spawn_ms(&self) -> f64 {
        self.next_spawn_ms
    }

    pub(super) fn allocate_id(&mut self) -> VirusId {
        let id = VirusId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn at most one virus if the schedule says so.
    pub fn poll<R: Rng>(
        &mut self,
        now_ms: f64,
        cfg: &SimConfig,
        target: Vec2,
        rng: &mut R,
    ) -> Option<Virus> {
        if now_ms < self.next_spawn_ms {
            return None;
        }
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        let position = spawn_point(cfg, edge, rng);
        let velocity = position.direction_to(target).scale(cfg.virus_speed);
        self.next_spawn_ms = now_ms + cfg.spawn_interval_ms;
        Some(Virus {
            id: self.allocate_id(),
            position,
            velocity,
            state: VirusState::Alive,
            spawned_at_ms: now_ms,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn spawns_on_schedule_only() {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let mut sp = VirusSpawner::new(0.0, &cfg);
        let target = Vec2::new(400.0, 300.0);
        assert!(sp.poll(1499.0, &cfg, target, &mut rng).is_none());
        let v = sp.poll(1500.0, &cfg, target, &mut rng).unwrap();
        assert_eq!(v.id, VirusId(0));
        assert_eq!(sp.next_spawn_ms(), 3000.0);
        assert!(sp.poll(2000.0, &cfg, target, &mut rng).is_none());
        // Late frames still produce a single virus.
        let v2 = sp.poll(9000.0, &cfg, target, &mut rng).unwrap();
        assert_eq!(v2.id, VirusId(1));
        assert!(sp.poll(9000.0, &cfg, target, &mut rng).is_none());
    }

    #[test]
    fn velocity_aims_at_target_with_fixed_speed() {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut sp = VirusSpawner::new(-cfg.spawn_interval_ms, &cfg);
        let target = Vec2::new(400.0, 300.0);
        for t in 0..50 {
            let now = t as f64 * cfg.spawn_interval_ms;
            let v = sp.poll(now, &cfg, target, &mut rng).unwrap();
            let speed = (v.velocity.x.powi(2) + v.velocity.y.powi(2)).sqrt();
            assert!((speed - 100.0).abs() < 1e-9);
            let dir = v.position.direction_to(target);
            assert!((dir.x * 100.0 - v.velocity.x).abs() < 1e-9);
            assert!((dir.y * 100.0 - v.velocity.y).abs() < 1e-9);
        }
    }

    #[test]
    fn spawn_points_sit_on_the_perimeter_band() {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..200 {
            let p = spawn_point(&cfg, Edge::Top, &mut rng);
            assert_eq!(p.y, 50.0);
            assert!((100.0..=700.0).contains(&p.x));
            let p = spawn_point(&cfg, Edge::Right, &mut rng);
            assert_eq!(p.x, 750.0);
            assert!((100.0..=500.0).contains(&p.y));
            let p = spawn_point(&cfg, Edge::Bottom, &mut rng);
            assert_eq!(p.y, 550.0);
            let p = spawn_point(&cfg, Edge::Left, &mut rng);
            assert_eq!(p.x, 50.0);
        }
    }
}
