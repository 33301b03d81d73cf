//! Fixed-interval income: each tick credits the production rate to the
//! balance named by the current mode.

use super::capacity;
use super::config::SimConfig;
use super::ledger::ResourceLedger;
use crate::model::ResourceKind;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductionScheduler {
    mode: ResourceKind,
    interval_ms: u64,
    elapsed_ms: f64,
}

impl ProductionScheduler {
    pub fn new(mode: ResourceKind, interval_ms: u64) -> Self {
        Self {
            mode,
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0.0,
        }
    }

    pub fn mode(&self) -> ResourceKind {
        self.mode
    }

    /// Takes effect from the next tick; nothing else changes.
    pub fn set_mode(&mut self, mode: ResourceKind) {
        self.mode = mode;
    }

    /// Accumulate wall time and report how many ticks fell due.
    pub fn advance(&mut self, dt_ms: f64) -> u32 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.elapsed_ms += dt_ms;
        let interval = self.interval_ms as f64;
        let mut due = 0;
        while self.elapsed_ms >= interval {
            self.elapsed_ms -= interval;
            due += 1;
        }
        due
    }

    /// Run one tick against the ledger. Returns the credited amount.
    pub fn produce(&self, ledger: &mut ResourceLedger, cfg: &SimConfig) -> u64 {
        let rate = u64::from(capacity::production_rate(ledger.slots(), cfg));
        ledger.credit(self.mode, rate);
        rate
    }
}
