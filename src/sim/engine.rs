//! The simulation context: one explicitly constructed object that owns the
//! ledger, the live virus set, the timer queue and the subscribers, and
//! exposes the commands and queries the presentation layer uses.

use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::capacity;
use super::combat;
use super::config::SimConfig;
use super::economy::{self, BuildQuote, BuildReceipt, RemovalReceipt};
use super::error::{ConfigError, EconomyError, LedgerError, NodeError};
use super::events::{EventBus, SimEvent, SimObserver, SubscriptionId};
use super::ledger::ResourceLedger;
use super::nodes;
use super::production::ProductionScheduler;
use super::spawner::VirusSpawner;
use super::timers::{TimerKey, TimerQueue};
use crate::model::{
    BuildingKind, CapacitySnapshot, CombatStats, ModuleSlot, NetworkNode, ResourceKind,
    Resources, SimSnapshot, Vec2, Virus,
};

/// Upper bound on one internal step, whatever the frame length.
const MAX_STEP_MS: f64 = 50.0;

pub struct Simulation {
    config: SimConfig,
    computer: Vec2,
    ledger: ResourceLedger,
    production: ProductionScheduler,
    spawner: VirusSpawner,
    viruses: Vec<Virus>,
    timers: TimerQueue,
    nodes: Vec<NetworkNode>,
    bus: EventBus,
    rng: StdRng,
    stats: CombatStats,
    now_ms: f64,
    paused: bool,
}

impl Default for Simulation {
    fn default() -> Self {
        Self::build(SimConfig::default())
    }
}

impl Simulation {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let computer = Vec2::new(config.field_width / 2.0, config.field_height / 2.0);
        let ledger = ResourceLedger::new(config.initial_resources, computer, config.computer_size);
        let nodes = nodes::place_nodes(&config, computer, &mut rng);
        info!(
            "session started: seed={} field={}x{} nodes={}",
            seed,
            config.field_width,
            config.field_height,
            nodes.len()
        );
        Self {
            computer,
            ledger,
            production: ProductionScheduler::new(
                ResourceKind::Scripts,
                config.production_interval_ms,
            ),
            spawner: VirusSpawner::new(0.0, &config),
            viruses: Vec::new(),
            timers: TimerQueue::new(),
            nodes,
            bus: EventBus::default(),
            rng,
            stats: CombatStats::default(),
            now_ms: 0.0,
            paused: false,
            config,
        }
    }

    // ---------------- Subscriptions -----------------

    pub fn subscribe(&mut self, observer: impl SimObserver + 'static) -> SubscriptionId {
        self.bus.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // ---------------- Queries -----------------

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn computer(&self) -> Vec2 {
        self.computer
    }

    pub fn resources(&self) -> &Resources {
        self.ledger.resources()
    }

    pub fn slots(&self) -> &[ModuleSlot] {
        self.ledger.slots()
    }

    pub fn slot(&self, id: usize) -> Option<&ModuleSlot> {
        self.ledger.slot(id)
    }

    pub fn viruses(&self) -> &[Virus] {
        &self.viruses
    }

    pub fn nodes(&self) -> &[NetworkNode] {
        &self.nodes
    }

    pub fn stats(&self) -> CombatStats {
        self.stats
    }

    pub fn production_mode(&self) -> ResourceKind {
        self.production.mode()
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn total_ram(&self) -> u32 {
        capacity::total_ram(self.ledger.slots(), &self.config)
    }

    pub fn available_ram(&self) -> i32 {
        capacity::available_ram(self.ledger.slots(), &self.config)
    }

    pub fn production_rate(&self) -> u32 {
        capacity::production_rate(self.ledger.slots(), &self.config)
    }

    pub fn capacity(&self) -> CapacitySnapshot {
        CapacitySnapshot {
            total_ram: self.total_ram(),
            used_ram: capacity::used_ram(self.ledger.slots(), &self.config),
            available_ram: self.available_ram(),
            production_rate: self.production_rate(),
        }
    }

    pub fn quote_build(&self, slot: usize, kind: BuildingKind) -> Result<BuildQuote, EconomyError> {
        economy::quote_build(&self.ledger, &self.config, slot, kind)
    }

    pub fn removal_refund(&self, slot: usize) -> Option<u64> {
        economy::removal_refund(&self.ledger, &self.config, slot)
    }

    /// Whether `slot` holds something that could be sold right now.
    pub fn can_remove(&self, slot: usize) -> bool {
        self.ledger.slot(slot).is_some_and(|s| s.occupied())
            && capacity::available_ram_after(self.ledger.slots(), &self.config, slot, None) >= 0
    }

    /// Pending cooldown end for the firewall in `slot`, if it is cooling down.
    pub fn cooldown_ends_at(&self, slot: usize) -> Option<f64> {
        self.timers.due_at(TimerKey::FirewallReactivate(slot))
    }

    pub fn snapshot(&self) -> SimSnapshot {
        SimSnapshot {
            now_ms: self.now_ms,
            resources: *self.resources(),
            production_mode: self.production_mode(),
            capacity: self.capacity(),
            stats: self.stats(),
            slots: self.slots().to_vec(),
            cooldowns: (0..self.slots().len())
                .map(|id| self.cooldown_ends_at(id))
                .collect(),
            viruses: self.viruses().to_vec(),
            nodes: self.nodes().to_vec(),
            computer: self.computer(),
            computer_size: self.config.computer_size,
            engagement_radius: self.config.engagement_radius,
            field_width: self.config.field_width,
            field_height: self.config.field_height,
            paused: self.paused,
        }
    }

    // ---------------- Commands -----------------

    /// Build on a slot, selling what was there. On `Err` nothing changed.
    pub fn build_on_module(
        &mut self,
        slot: usize,
        kind: BuildingKind,
    ) -> Result<BuildReceipt, EconomyError> {
        let receipt = economy::build_on_module(&mut self.ledger, &self.config, slot, kind)
            .inspect_err(|e| debug!("build {} on slot {} rejected: {}", kind, slot, e))?;
        debug!(
            "built {} on slot {} for {} crypto, {} left",
            receipt.kind, receipt.slot, receipt.crypto_cost, receipt.crypto_after
        );
        // The old firewall is gone even when a new one takes its place.
        if receipt.previous == Some(BuildingKind::Firewall) {
            self.timers.cancel(TimerKey::FirewallReactivate(slot));
        }
        self.bus.emit_all(&[
            SimEvent::ModuleChanged {
                slot,
                kind: Some(kind),
            },
            SimEvent::ResourcesChanged(*self.ledger.resources()),
        ]);
        Ok(receipt)
    }

    pub fn remove_module(&mut self, slot: usize) -> Result<RemovalReceipt, EconomyError> {
        let receipt = economy::remove_module(&mut self.ledger, &self.config, slot)
            .inspect_err(|e| debug!("remove on slot {} rejected: {}", slot, e))?;
        debug!(
            "removed {} from slot {} for +{} crypto, {} left",
            receipt.removed, receipt.slot, receipt.refund, receipt.crypto_after
        );
        if receipt.removed == BuildingKind::Firewall {
            self.timers.cancel(TimerKey::FirewallReactivate(slot));
        }
        self.bus.emit_all(&[
            SimEvent::ModuleChanged { slot, kind: None },
            SimEvent::ResourcesChanged(*self.ledger.resources()),
        ]);
        Ok(receipt)
    }

    pub fn set_production_mode(&mut self, mode: ResourceKind) {
        if self.production.mode() == mode {
            return;
        }
        self.production.set_mode(mode);
        self.bus.emit(&SimEvent::ProductionModeChanged(mode));
    }

    /// Debug/test crediting. Debits beyond the balance are refused.
    pub fn add_resource(&mut self, kind: ResourceKind, amount: i64) -> Result<u64, LedgerError> {
        let balance = self
            .ledger
            .add_resource(kind, amount)
            .inspect_err(|e| debug!("add_resource rejected: {}", e))?;
        self.bus
            .emit(&SimEvent::ResourcesChanged(*self.ledger.resources()));
        Ok(balance)
    }

    pub fn unlock_node(&mut self, node: usize) -> Result<(), NodeError> {
        nodes::unlock(&mut self.nodes, &mut self.ledger, &self.config, node)
            .inspect_err(|e| debug!("unlock node {} rejected: {}", node, e))?;
        self.bus.emit_all(&[
            SimEvent::NodeUnlocked { node },
            SimEvent::ResourcesChanged(*self.ledger.resources()),
        ]);
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// One production tick; `advance_production` fires these on the interval.
    pub fn production_tick(&mut self) -> u64 {
        if self.paused {
            return 0;
        }
        let amount = self.production.produce(&mut self.ledger, &self.config);
        self.bus.emit(&SimEvent::ProductionTick {
            resource: self.production.mode(),
            amount,
        });
        amount
    }

    /// Accumulate wall time and run every production tick that fell due.
    pub fn advance_production(&mut self, dt_ms: f64) -> u32 {
        if self.paused {
            return 0;
        }
        let due = self.production.advance(dt_ms);
        for _ in 0..due {
            self.production_tick();
        }
        due
    }

    /// Advance the simulation clock by `dt_ms`. Long frames are split into
    /// steps short enough that no virus crosses the hit radius in one.
    pub fn tick(&mut self, dt_ms: f64) {
        if self.paused || !dt_ms.is_finite() || dt_ms < 0.0 {
            return;
        }
        let max_step = self.max_step_ms();
        let mut events = Vec::new();
        let mut remaining = dt_ms;
        while remaining > 0.0 {
            let step = remaining.min(max_step);
            self.step(step, &mut events);
            remaining -= step;
        }
        self.bus.emit_all(&events);
    }

    /// Half the time a virus needs to cross the hit radius, capped at `MAX_STEP_MS`.
    fn max_step_ms(&self) -> f64 {
        let crossing_ms = self.config.target_hit_radius / self.config.virus_speed * 1000.0;
        (crossing_ms / 2.0).min(MAX_STEP_MS)
    }

    /// One step: fire due timers, spawn, move, then resolve collisions.
    fn step(&mut self, dt_ms: f64, events: &mut Vec<SimEvent>) {
        self.now_ms += dt_ms;
        let now = self.now_ms;

        while let Some(key) = self.timers.pop_due(now) {
            combat::fire_timer(key, &mut self.viruses, &mut self.ledger, events);
        }

        if let Some(v) = self
            .spawner
            .poll(now, &self.config, self.computer, &mut self.rng)
        {
            self.stats.spawned += 1;
            events.push(SimEvent::VirusSpawned {
                virus: v.id,
                position: v.position,
            });
            self.viruses.push(v);
        }

        combat::advance(&mut self.viruses, dt_ms / 1000.0);
        combat::resolve(
            &mut self.viruses,
            &mut self.ledger,
            &mut self.timers,
            &self.config,
            self.computer,
            now,
            &mut self.stats,
            events,
        );
    }

    /// Headless driver: step frames of `frame_ms` until `total_ms` has
    /// elapsed, running production on its own interval alongside.
    pub fn run_for(&mut self, total_ms: f64, frame_ms: f64) {
        if !(frame_ms > 0.0) {
            return;
        }
        let mut remaining = total_ms;
        while remaining > 0.0 {
            let dt = frame_ms.min(remaining);
            self.tick(dt);
            self.advance_production(dt);
            remaining -= dt;
        }
    }

    #[cfg(test)]
    pub(crate) fn insert_virus(&mut self, position: Vec2) -> crate::model::VirusId {
        let id = self.spawner.allocate_id();
        self.viruses.push(Virus {
            id,
            position,
            velocity: position
                .direction_to(self.computer)
                .scale(self.config.virus_speed),
            state: crate::model::VirusState::Alive,
            spawned_at_ms: self.now_ms,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{VirusId, VirusState};
    use crate::sim::events::DestroyCause;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Deterministic session with spawning pushed out of the way.
    fn quiet() -> SimConfig {
        SimConfig {
            seed: Some(11),
            spawn_interval_ms: 1.0e12,
            ..SimConfig::default()
        }
    }

    fn recorder(sim: &mut Simulation) -> Rc<RefCell<Vec<SimEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        sim.subscribe(move |e: &SimEvent| sink.borrow_mut().push(e.clone()));
        log
    }

    #[test]
    fn starts_with_configured_balances() {
        let sim = Simulation::new(quiet()).unwrap();
        assert_eq!(
            *sim.resources(),
            Resources {
                crypto: 2000,
                research: 0,
                scripts: 1000
            }
        );
        assert_eq!(sim.available_ram(), 4);
        assert_eq!(sim.total_ram(), 4);
        assert_eq!(sim.production_mode(), ResourceKind::Scripts);
        assert!(!sim.nodes().is_empty() && sim.nodes().len() <= 8);
    }

    #[test]
    fn invalid_config_is_refused() {
        let cfg = SimConfig {
            production_divisor: 0,
            ..SimConfig::default()
        };
        assert!(Simulation::new(cfg).is_err());
    }

    #[test]
    fn one_production_tick_on_empty_grid() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        assert_eq!(sim.production_tick(), 2);
        assert_eq!(sim.resources().scripts, 1002);
        assert_eq!(
            log.borrow().last(),
            Some(&SimEvent::ProductionTick {
                resource: ResourceKind::Scripts,
                amount: 2
            })
        );
    }

    #[test]
    fn run_for_produces_on_interval() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.set_production_mode(ResourceKind::Crypto);
        sim.run_for(3000.0, 16.0);
        assert_eq!(sim.resources().crypto, 2006);
        assert_eq!(sim.resources().scripts, 1000);
    }

    #[test]
    fn firewall_build_scenario() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        sim.build_on_module(0, BuildingKind::Firewall).unwrap();
        assert_eq!(sim.available_ram(), 2);
        assert_eq!(sim.resources().crypto, 1925);
        sim.build_on_module(1, BuildingKind::Firewall).unwrap();
        assert_eq!(sim.available_ram(), 0);
        assert_eq!(sim.production_rate(), 0);

        let resources = *sim.resources();
        let slots = sim.slots().to_vec();
        let seen = log.borrow().len();
        assert!(sim.build_on_module(2, BuildingKind::Firewall).is_err());
        assert_eq!(*sim.resources(), resources);
        assert_eq!(sim.slots(), &slots[..]);
        assert_eq!(log.borrow().len(), seen);
        assert!(log.borrow().contains(&SimEvent::ModuleChanged {
            slot: 0,
            kind: Some(BuildingKind::Firewall)
        }));
    }

    #[test]
    fn virus_without_defence_reaches_target_on_time() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        let before = *sim.resources();
        // 400 units out on the left: (400 - 100) / 100 = 3 seconds to the hit radius.
        let id = sim.insert_virus(Vec2::new(0.0, 300.0));
        sim.run_for(2900.0, 10.0);
        assert_eq!(sim.viruses().len(), 1);
        sim.run_for(200.0, 10.0);
        assert!(sim.viruses().is_empty());
        assert!(log.borrow().iter().any(|e| matches!(
            e,
            SimEvent::VirusDestroyed { virus, cause: DestroyCause::ReachedTarget, .. } if *virus == id
        )));
        // Production ran alongside; the breach itself cost nothing.
        let produced = sim.resources().scripts - before.scripts;
        assert_eq!(produced, 6);
        assert_eq!(sim.resources().crypto, before.crypto);
        assert_eq!(sim.resources().research, before.research);
        assert_eq!(sim.stats().reached_target, 1);
    }

    #[test]
    fn one_long_frame_still_hits_the_computer() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        // A single 6 s frame would carry this virus 600 units, straight through the computer.
        let id = sim.insert_virus(Vec2::new(0.0, 300.0));
        sim.tick(6000.0);
        assert!(sim.viruses().is_empty());
        assert_eq!(sim.now_ms(), 6000.0);
        assert_eq!(sim.stats().reached_target, 1);
        assert_eq!(sim.stats().left_field, 0);
        assert!(log.borrow().iter().any(|e| matches!(
            e,
            SimEvent::VirusDestroyed { virus, cause: DestroyCause::ReachedTarget, .. } if *virus == id
        )));
    }

    #[test]
    fn long_frame_keeps_spawning_on_schedule() {
        let mut sim = Simulation::new(SimConfig {
            seed: Some(3),
            ..SimConfig::default()
        })
        .unwrap();
        sim.tick(4000.0);
        // Spawns fall due at 1500 and 3000 within the one frame.
        assert_eq!(sim.stats().spawned, 2);
        assert_eq!(sim.stats().left_field, 0);
    }

    #[test]
    fn firewall_lifecycle() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        sim.build_on_module(0, BuildingKind::Firewall).unwrap();
        let id = sim.insert_virus(Vec2::new(362.5, 40.0));
        sim.tick(10.0);
        assert!(!sim.slot(0).unwrap().is_active);
        assert!(matches!(
            sim.viruses()[0].state,
            VirusState::BeingDestroyed { .. }
        ));
        assert_eq!(sim.cooldown_ends_at(0), Some(2510.0));
        let snap = sim.snapshot();
        assert_eq!(snap.cooldowns[0], Some(2510.0));
        assert!(snap.cooldowns[1..].iter().all(Option::is_none));
        assert_eq!(snap.stats.engaged, 1);

        // Frozen in place while the beam runs.
        let frozen = sim.viruses()[0].position;
        sim.run_for(2480.0, 10.0);
        assert_eq!(sim.viruses()[0].position, frozen);
        assert!(!sim.slot(0).unwrap().is_active);

        sim.run_for(30.0, 10.0);
        assert!(sim.slot(0).unwrap().is_active);
        assert!(sim.viruses().is_empty());
        let events = log.borrow();
        assert!(events.contains(&SimEvent::FirewallReactivated { slot: 0 }));
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::VirusDestroyed { virus, cause: DestroyCause::Engaged, .. } if *virus == id
        )));
        assert_eq!(sim.stats().expired, 0);
    }

    #[test]
    fn selling_a_cooling_firewall_cancels_reactivation() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        sim.build_on_module(0, BuildingKind::Firewall).unwrap();
        sim.insert_virus(Vec2::new(362.5, 40.0));
        sim.tick(10.0);
        assert!(sim.cooldown_ends_at(0).is_some());

        sim.build_on_module(0, BuildingKind::Ram).unwrap();
        assert_eq!(sim.cooldown_ends_at(0), None);
        sim.run_for(3000.0, 10.0);
        assert!(!sim.slot(0).unwrap().is_active);
        assert!(!log.borrow().contains(&SimEvent::FirewallReactivated { slot: 0 }));
        // The beam still finishes on the virus it started on.
        assert!(sim.viruses().is_empty());
    }

    #[test]
    fn removing_a_cooling_firewall_cancels_reactivation() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.build_on_module(3, BuildingKind::Firewall).unwrap();
        // Slot 3 sits right of the computer.
        sim.insert_virus(Vec2::new(680.0, 340.0));
        sim.tick(10.0);
        assert!(sim.cooldown_ends_at(3).is_some());
        sim.remove_module(3).unwrap();
        assert_eq!(sim.cooldown_ends_at(3), None);
        sim.build_on_module(3, BuildingKind::Firewall).unwrap();
        // A fresh firewall is ready straight away.
        assert!(sim.slot(3).unwrap().is_active);
    }

    #[test]
    fn safety_net_sweeps_when_beam_outlasts_timeout() {
        let cfg = SimConfig {
            beam_duration_ms: 10_000.0,
            ..quiet()
        };
        let mut sim = Simulation::new(cfg).unwrap();
        let log = recorder(&mut sim);
        sim.build_on_module(0, BuildingKind::Firewall).unwrap();
        let id: VirusId = sim.insert_virus(Vec2::new(362.5, 40.0));
        sim.tick(10.0);
        sim.run_for(3000.0, 10.0);
        assert_eq!(sim.viruses().len(), 1);
        sim.run_for(20.0, 10.0);
        assert!(sim.viruses().is_empty());
        assert_eq!(sim.stats().expired, 1);
        assert!(log.borrow().iter().any(|e| matches!(
            e,
            SimEvent::VirusDestroyed { virus, cause: DestroyCause::Expired, .. } if *virus == id
        )));
    }

    #[test]
    fn spawner_runs_on_its_interval() {
        let cfg = SimConfig {
            seed: Some(4),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(cfg).unwrap();
        let log = recorder(&mut sim);
        sim.run_for(1490.0, 10.0);
        assert_eq!(sim.stats().spawned, 0);
        sim.run_for(20.0, 10.0);
        assert_eq!(sim.stats().spawned, 1);
        sim.run_for(1500.0, 10.0);
        assert_eq!(sim.stats().spawned, 2);
        let spawned = log
            .borrow()
            .iter()
            .filter(|e| matches!(e, SimEvent::VirusSpawned { .. }))
            .count();
        assert_eq!(spawned, 2);
    }

    #[test]
    fn long_session_keeps_invariants() {
        let cfg = SimConfig {
            seed: Some(2024),
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(cfg).unwrap();
        for slot in [0, 2, 4, 6] {
            sim.build_on_module(slot, BuildingKind::Ram).unwrap();
        }
        for slot in [1, 3, 5, 7] {
            sim.build_on_module(slot, BuildingKind::Firewall).unwrap();
        }
        assert_eq!(sim.available_ram(), 4);
        sim.run_for(60_000.0, 16.0);
        let stats = sim.stats();
        assert!(stats.spawned >= 39);
        assert!(stats.engaged > 0);
        assert_eq!(stats.expired, 0);
        assert!(sim.viruses().len() as u64 <= stats.spawned);
        assert!(sim.available_ram() >= 0);
    }

    #[test]
    fn paused_session_stands_still() {
        let mut sim = Simulation::new(SimConfig {
            seed: Some(1),
            ..SimConfig::default()
        })
        .unwrap();
        sim.set_paused(true);
        sim.run_for(5000.0, 16.0);
        assert_eq!(sim.now_ms(), 0.0);
        assert_eq!(sim.production_tick(), 0);
        assert_eq!(sim.resources().scripts, 1000);
        sim.set_paused(false);
        sim.tick(16.0);
        assert_eq!(sim.now_ms(), 16.0);
    }

    #[test]
    fn bad_deltas_are_ignored() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.tick(-5.0);
        sim.tick(f64::NAN);
        sim.tick(f64::INFINITY);
        assert_eq!(sim.now_ms(), 0.0);
    }

    #[test]
    fn node_unlock_emits_event() {
        let mut sim = Simulation::new(quiet()).unwrap();
        let log = recorder(&mut sim);
        sim.unlock_node(0).unwrap();
        assert!(sim.nodes()[0].unlocked);
        assert_eq!(sim.resources().scripts, 800);
        assert!(log.borrow().contains(&SimEvent::NodeUnlocked { node: 0 }));
        assert!(sim.unlock_node(0).is_err());
    }

    #[test]
    fn add_resource_refuses_overdraft() {
        let mut sim = Simulation::new(quiet()).unwrap();
        assert_eq!(sim.add_resource(ResourceKind::Research, 40).unwrap(), 40);
        assert!(sim.add_resource(ResourceKind::Research, -41).is_err());
        assert_eq!(sim.resources().research, 40);
    }

    #[test]
    fn quote_matches_commit() {
        let mut sim = Simulation::new(quiet()).unwrap();
        sim.build_on_module(6, BuildingKind::Ram).unwrap();
        let q = sim.quote_build(6, BuildingKind::Firewall).unwrap();
        assert_eq!(q.crypto_cost, 50);
        assert_eq!(q.refund, 25);
        let before = sim.resources().crypto;
        sim.build_on_module(6, BuildingKind::Firewall).unwrap();
        assert_eq!(sim.resources().crypto, before - 50);
        assert_eq!(sim.available_ram(), q.ram_after);
        assert_eq!(sim.removal_refund(6), Some(37));
        assert!(sim.can_remove(6));
        assert!(!sim.can_remove(5));
        assert!(q.fits);
    }
}
