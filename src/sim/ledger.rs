//! Balances plus the module grid. Pure state and mutators; every derived
//! number lives in `capacity`.

use super::error::LedgerError;
use crate::model::{BuildingKind, ModuleSlot, ResourceKind, Resources, SLOT_COUNT, Vec2};

/// Slot positions around a computer of side `size` centred on `center`:
/// two per side, clockwise from the top-left.
pub fn slot_positions(center: Vec2, size: f64) -> [Vec2; SLOT_COUNT] {
    let near = size / 4.0;
    let far = size * 0.7;
    [
        Vec2::new(center.x - near, center.y - far),
        Vec2::new(center.x + near, center.y - far),
        Vec2::new(center.x + far, center.y - near),
        Vec2::new(center.x + far, center.y + near),
        Vec2::new(center.x + near, center.y + far),
        Vec2::new(center.x - near, center.y + far),
        Vec2::new(center.x - far, center.y + near),
        Vec2::new(center.x - far, center.y - near),
    ]
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResourceLedger {
    resources: Resources,
    slots: Vec<ModuleSlot>,
}

impl ResourceLedger {
    pub fn new(initial: Resources, center: Vec2, computer_size: f64) -> Self {
        let slots = slot_positions(center, computer_size)
            .into_iter()
            .enumerate()
            .map(|(id, position)| ModuleSlot {
                id,
                kind: None,
                position,
                is_active: false,
            })
            .collect();
        Self {
            resources: initial,
            slots,
        }
    }

    pub fn resources(&self) -> &Resources {
        &self.resources
    }

    /// Apply a signed delta to one balance. A debit larger than the balance is
    /// refused and leaves the ledger unchanged.
    pub fn add_resource(&mut self, kind: ResourceKind, amount: i64) -> Result<u64, LedgerError> {
        let slot = self.resources.get_mut(kind);
        if amount >= 0 {
            *slot = slot.saturating_add(amount.unsigned_abs());
            return Ok(*slot);
        }
        let debit = amount.unsigned_abs();
        if debit > *slot {
            return Err(LedgerError::Insufficient {
                kind,
                needed: debit,
                available: *slot,
            });
        }
        *slot -= debit;
        Ok(*slot)
    }

    pub fn credit(&mut self, kind: ResourceKind, amount: u64) -> u64 {
        let slot = self.resources.get_mut(kind);
        *slot = slot.saturating_add(amount);
        *slot
    }

    pub fn slots(&self) -> &[ModuleSlot] {
        &self.slots
    }

    pub fn slot(&self, id: usize) -> Option<&ModuleSlot> {
        self.slots.get(id)
    }

    /// Commit a module change together with the new crypto balance. Only the
    /// module economy calls this, after it has checked feasibility.
    pub(super) fn commit_module(&mut self, id: usize, kind: Option<BuildingKind>, crypto: u64) {
        let slot = &mut self.slots[id];
        slot.kind = kind;
        slot.is_active = kind == Some(BuildingKind::Firewall);
        self.resources.crypto = crypto;
    }

    /// Flip a firewall's engage flag. Ignored for slots that hold anything else.
    pub(super) fn set_firewall_active(&mut self, id: usize, active: bool) -> bool {
        match self.slots.get_mut(id) {
            Some(slot) if slot.is_firewall() => {
                slot.is_active = active;
                true
            }
            _ => false,
        }
    }
}
