//! RAM and production figures derived from the module grid.
//!
//! Nothing here is cached: every call walks the eight slots, so the numbers
//! can never disagree with the grid.

use super::config::SimConfig;
use crate::model::{BuildingKind, ModuleSlot};

fn ram_effect(cfg: &SimConfig, kind: Option<BuildingKind>) -> (u32, u32) {
    match kind {
        Some(k) => {
            let spec = cfg.spec(k);
            (spec.provides_ram, spec.requires_ram)
        }
        None => (0, 0),
    }
}

pub fn total_ram(slots: &[ModuleSlot], cfg: &SimConfig) -> u32 {
    slots
        .iter()
        .map(|s| ram_effect(cfg, s.kind).0)
        .fold(cfg.base_ram, u32::saturating_add)
}

pub fn used_ram(slots: &[ModuleSlot], cfg: &SimConfig) -> u32 {
    slots
        .iter()
        .map(|s| ram_effect(cfg, s.kind).1)
        .fold(0, u32::saturating_add)
}

pub fn available_ram(slots: &[ModuleSlot], cfg: &SimConfig) -> i32 {
    total_ram(slots, cfg) as i32 - used_ram(slots, cfg) as i32
}

/// Units credited per production tick: `floor(available / divisor)`, never negative.
pub fn production_rate(slots: &[ModuleSlot], cfg: &SimConfig) -> u32 {
    let available = available_ram(slots, cfg).max(0) as u32;
    available / cfg.production_divisor.max(1)
}

/// Available RAM if slot `id` held `kind` instead of its current building.
pub fn available_ram_after(
    slots: &[ModuleSlot],
    cfg: &SimConfig,
    id: usize,
    kind: Option<BuildingKind>,
) -> i32 {
    let current = slots.get(id).and_then(|s| s.kind);
    let (old_provides, old_requires) = ram_effect(cfg, current);
    let (new_provides, new_requires) = ram_effect(cfg, kind);
    available_ram(slots, cfg) - old_provides as i32 + old_requires as i32 + new_provides as i32
        - new_requires as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SLOT_COUNT, Vec2};
    use proptest::prelude::*;

    fn grid(kinds: &[Option<BuildingKind>]) -> Vec<ModuleSlot> {
        kinds
            .iter()
            .enumerate()
            .map(|(id, kind)| ModuleSlot {
                id,
                kind: *kind,
                position: Vec2::ZERO,
                is_active: false,
            })
            .collect()
    }

    #[test]
    fn empty_grid() {
        let cfg = SimConfig::default();
        let g = grid(&[None; SLOT_COUNT]);
        assert_eq!(total_ram(&g, &cfg), 4);
        assert_eq!(used_ram(&g, &cfg), 0);
        assert_eq!(available_ram(&g, &cfg), 4);
        assert_eq!(production_rate(&g, &cfg), 2);
    }

    #[test]
    fn mixed_grid() {
        let cfg = SimConfig::default();
        let mut kinds = [None; SLOT_COUNT];
        kinds[0] = Some(BuildingKind::Ram);
        kinds[1] = Some(BuildingKind::Ram);
        kinds[2] = Some(BuildingKind::Firewall);
        let g = grid(&kinds);
        assert_eq!(total_ram(&g, &cfg), 8);
        assert_eq!(available_ram(&g, &cfg), 6);
        assert_eq!(production_rate(&g, &cfg), 3);
        assert!(available_ram_after(&g, &cfg, 3, Some(BuildingKind::Firewall)) >= 0);
    }

    #[test]
    fn hypothetical_replace() {
        let cfg = SimConfig::default();
        let mut kinds = [None; SLOT_COUNT];
        kinds[3] = Some(BuildingKind::Ram);
        let g = grid(&kinds);
        // Swapping the only RAM module for a firewall: 6 - 2 - 2.
        assert_eq!(
            available_ram_after(&g, &cfg, 3, Some(BuildingKind::Firewall)),
            2
        );
        assert_eq!(available_ram_after(&g, &cfg, 3, None), 4);
    }

    fn arb_kind() -> impl Strategy<Value = Option<BuildingKind>> {
        prop_oneof![
            Just(None),
            Just(Some(BuildingKind::Ram)),
            Just(Some(BuildingKind::Firewall)),
        ]
    }

    proptest! {
        #[test]
        fn available_ram_formula(kinds in proptest::collection::vec(arb_kind(), SLOT_COUNT)) {
            let cfg = SimConfig::default();
            let g = grid(&kinds);
            let rams = kinds.iter().filter(|k| **k == Some(BuildingKind::Ram)).count() as i32;
            let fws = kinds.iter().filter(|k| **k == Some(BuildingKind::Firewall)).count() as i32;
            prop_assert_eq!(available_ram(&g, &cfg), 4 + 2 * rams - 2 * fws);
            prop_assert_eq!(production_rate(&g, &cfg) as i32, (4 + 2 * rams - 2 * fws).max(0) / 2);
        }
    }
}
