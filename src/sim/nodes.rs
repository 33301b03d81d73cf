//! Network nodes scattered around the computer, unlocked with Scripts.

use log::warn;
use rand::Rng;

use super::config::SimConfig;
use super::error::NodeError;
use super::ledger::ResourceLedger;
use crate::model::{NetworkNode, ResourceKind, Vec2};

const PLACEMENT_ATTEMPTS: usize = 500;

/// Trace anchors on the four sides of the computer: top, right, bottom, left.
pub fn connectors(computer: Vec2, computer_size: f64) -> [Vec2; 4] {
    let d = computer_size * 0.7;
    [
        Vec2::new(computer.x, computer.y - d),
        Vec2::new(computer.x + d, computer.y),
        Vec2::new(computer.x, computer.y + d),
        Vec2::new(computer.x - d, computer.y),
    ]
}

pub fn nearest_connector(point: Vec2, anchors: &[Vec2; 4]) -> Vec2 {
    let mut best = anchors[0];
    for a in &anchors[1..] {
        if point.distance(*a) < point.distance(best) {
            best = *a;
        }
    }
    best
}

/// Rejection-sample `node_count` positions that keep clear of the field
/// edges, the computer and each other.
pub fn place_nodes<R: Rng>(cfg: &SimConfig, computer: Vec2, rng: &mut R) -> Vec<NetworkNode> {
    let anchors = connectors(computer, cfg.computer_size);
    let margin = cfg.node_edge_margin;
    let mut nodes: Vec<NetworkNode> = Vec::with_capacity(cfg.node_count);
    if cfg.field_width <= 2.0 * margin || cfg.field_height <= 2.0 * margin {
        warn!("play field too small for network nodes");
        return nodes;
    }
    for id in 0..cfg.node_count {
        let mut placed = None;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let p = Vec2::new(
                rng.gen_range(margin..=cfg.field_width - margin),
                rng.gen_range(margin..=cfg.field_height - margin),
            );
            let clear_of_computer = p.distance(computer) >= cfg.node_min_distance_from_computer;
            let clear_of_nodes = nodes
                .iter()
                .all(|n| n.position.distance(p) >= cfg.node_min_spacing);
            if clear_of_computer && clear_of_nodes {
                placed = Some(p);
                break;
            }
        }
        match placed {
            Some(position) => nodes.push(NetworkNode {
                id,
                position,
                unlocked: false,
                connector: nearest_connector(position, &anchors),
            }),
            None => {
                warn!("placed {} of {} network nodes", nodes.len(), cfg.node_count);
                break;
            }
        }
    }
    nodes
}

pub fn unlock(
    nodes: &mut [NetworkNode],
    ledger: &mut ResourceLedger,
    cfg: &SimConfig,
    id: usize,
) -> Result<(), NodeError> {
    let node = nodes
        .iter_mut()
        .find(|n| n.id == id)
        .ok_or(NodeError::UnknownNode(id))?;
    if node.unlocked {
        return Err(NodeError::AlreadyUnlocked(id));
    }
    let cost = i64::try_from(cfg.node_unlock_cost).unwrap_or(i64::MAX);
    ledger.add_resource(ResourceKind::Scripts, -cost)?;
    node.unlocked = true;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Resources;
    use crate::sim::error::LedgerError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const COMPUTER: Vec2 = Vec2 { x: 400.0, y: 300.0 };

    #[test]
    fn placement_respects_spacing() {
        let cfg = SimConfig::default();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let nodes = place_nodes(&cfg, COMPUTER, &mut rng);
            assert!(!nodes.is_empty());
            for (i, a) in nodes.iter().enumerate() {
                assert!(a.position.distance(COMPUTER) >= 200.0);
                assert!((100.0..=700.0).contains(&a.position.x));
                assert!((100.0..=500.0).contains(&a.position.y));
                for b in &nodes[i + 1..] {
                    assert!(a.position.distance(b.position) >= 100.0);
                }
            }
        }
    }

    #[test]
    fn connector_is_nearest_side() {
        let anchors = connectors(COMPUTER, 150.0);
        assert_eq!(nearest_connector(Vec2::new(700.0, 320.0), &anchors), anchors[1]);
        assert_eq!(nearest_connector(Vec2::new(380.0, 20.0), &anchors), anchors[0]);
    }

    #[test]
    fn unlock_costs_scripts_once() {
        let cfg = SimConfig::default();
        let mut ledger = ResourceLedger::new(
            Resources {
                scripts: 450,
                ..Resources::default()
            },
            COMPUTER,
            150.0,
        );
        let mut rng = StdRng::seed_from_u64(3);
        let mut nodes = place_nodes(&cfg, COMPUTER, &mut rng);
        unlock(&mut nodes, &mut ledger, &cfg, 0).unwrap();
        assert!(nodes[0].unlocked);
        assert_eq!(ledger.resources().scripts, 250);
        assert_eq!(
            unlock(&mut nodes, &mut ledger, &cfg, 0),
            Err(NodeError::AlreadyUnlocked(0))
        );
        unlock(&mut nodes, &mut ledger, &cfg, 1).unwrap();
        assert_eq!(
            unlock(&mut nodes, &mut ledger, &cfg, 2),
            Err(NodeError::Ledger(LedgerError::Insufficient {
                kind: ResourceKind::Scripts,
                needed: 200,
                available: 50
            }))
        );
        assert!(!nodes[2].unlocked);
        assert_eq!(
            unlock(&mut nodes, &mut ledger, &cfg, 99),
            Err(NodeError::UnknownNode(99))
        );
    }
}
