//! Browser-free game core. Everything here runs natively so it can be
//! driven headless from tests; the components only read snapshots and
//! issue commands.

pub mod capacity;
pub mod combat;
pub mod config;
pub mod economy;
pub mod engine;
pub mod error;
pub mod events;
pub mod ledger;
pub mod nodes;
pub mod production;
pub mod spawner;
pub mod timers;

pub use config::{BuildingSpec, SimConfig};
pub use economy::BuildQuote;
pub use engine::Simulation;
pub use events::{DestroyCause, SimEvent, SubscriptionId};
