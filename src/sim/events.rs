//! Notifications from the core to whoever draws it.
//!
//! The core never reaches outward: renderers and tests subscribe an observer
//! and receive every event after the state change it describes is committed.

use std::fmt;

use crate::model::{BuildingKind, ResourceKind, Resources, Vec2, VirusId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DestroyCause {
    /// Got within the hit radius of the computer.
    ReachedTarget,
    /// Beam from a firewall finished.
    Engaged,
    /// Destroy sequence outlived its timeout and was swept.
    Expired,
    /// Wandered past the field edge without hitting anything.
    LeftField,
}

#[derive(Clone, Debug, PartialEq)]
pub enum SimEvent {
    VirusSpawned {
        virus: VirusId,
        position: Vec2,
    },
    VirusDestroyed {
        virus: VirusId,
        position: Vec2,
        cause: DestroyCause,
    },
    FirewallEngaged {
        slot: usize,
        virus: VirusId,
        from: Vec2,
        to: Vec2,
    },
    FirewallReactivated {
        slot: usize,
    },
    ProductionTick {
        resource: ResourceKind,
        amount: u64,
    },
    ModuleChanged {
        slot: usize,
        kind: Option<BuildingKind>,
    },
    ProductionModeChanged(ResourceKind),
    /// Balances changed outside a production tick.
    ResourcesChanged(Resources),
    NodeUnlocked {
        node: usize,
    },
}

impl fmt::Display for SimEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimEvent::VirusSpawned { virus, position } => {
                write!(f, "{} spawned at ({:.0}, {:.0})", virus, position.x, position.y)
            }
            SimEvent::VirusDestroyed {
                virus,
                position,
                cause,
            } => write!(
                f,
                "{} destroyed at ({:.0}, {:.0}): {:?}",
                virus, position.x, position.y, cause
            ),
            SimEvent::FirewallEngaged {
                slot,
                virus,
                from,
                to,
            } => write!(
                f,
                "firewall {} at ({:.0}, {:.0}) engaged {} at ({:.0}, {:.0})",
                slot, from.x, from.y, virus, to.x, to.y
            ),
            SimEvent::FirewallReactivated { slot } => write!(f, "firewall {} ready", slot),
            SimEvent::ProductionTick { resource, amount } => {
                write!(f, "produced {} {}", amount, resource)
            }
            SimEvent::ModuleChanged { slot, kind } => match kind {
                Some(kind) => write!(f, "slot {} now holds {}", slot, kind),
                None => write!(f, "slot {} cleared", slot),
            },
            SimEvent::ProductionModeChanged(kind) => write!(f, "producing {}", kind),
            SimEvent::ResourcesChanged(r) => write!(
                f,
                "balances crypto={} research={} scripts={}",
                r.crypto, r.research, r.scripts
            ),
            SimEvent::NodeUnlocked { node } => write!(f, "node {} unlocked", node),
        }
    }
}

pub trait SimObserver {
    fn on_event(&mut self, event: &SimEvent);
}

impl<F> SimObserver for F
where
    F: FnMut(&SimEvent),
{
    fn on_event(&mut self, event: &SimEvent) {
        self(event)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
pub struct EventBus {
    observers: Vec<(SubscriptionId, Box<dyn SimObserver>)>,
    next_id: u64,
}

impl EventBus {
    pub fn subscribe(&mut self, observer: Box<dyn SimObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| sid.0 != id.0);
        self.observers.len() != before
    }

    pub fn emit(&mut self, event: &SimEvent) {
        for (_, obs) in self.observers.iter_mut() {
            obs.on_event(event);
        }
    }

    pub fn emit_all(&mut self, events: &[SimEvent]) {
        for e in events {
            self.emit(e);
        }
    }
}
