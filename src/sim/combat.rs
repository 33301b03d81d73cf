//! Per-frame movement, collision and firewall engagement.
//!
//! Firewall state machine, per slot:
//! `Active -> (engage) -> CoolingDown -> (cooldown timer) -> Active`.
//! Selling or replacing the module cancels the pending reactivation; that
//! happens in the engine, which owns both the economy and the timer queue.

use log::{debug, warn};

use super::config::SimConfig;
use super::events::{DestroyCause, SimEvent};
use super::ledger::ResourceLedger;
use super::timers::{TimerKey, TimerQueue};
use crate::model::{CombatStats, Vec2, Virus, VirusState};

/// Move every virus by its velocity. Frozen viruses have zero velocity.
pub fn advance(viruses: &mut [Virus], dt_secs: f64) {
    for v in viruses.iter_mut() {
        v.position = v.position.add(v.velocity.scale(dt_secs));
    }
}

/// Sweep the active set once, newest virus first: expire stuck destroy
/// sequences, remove viruses that reached the computer or left the field,
/// and let idle firewalls engage whatever is in range.
#[allow(clippy::too_many_arguments)]
pub fn resolve(
    viruses: &mut Vec<Virus>,
    ledger: &mut ResourceLedger,
    timers: &mut TimerQueue,
    cfg: &SimConfig,
    computer: Vec2,
    now_ms: f64,
    stats: &mut CombatStats,
    events: &mut Vec<SimEvent>,
) {
    // Walking backward keeps lower indices valid across removals.
    let mut i = viruses.len();
    while i > 0 {
        i -= 1;
        if let VirusState::BeingDestroyed { since_ms } = viruses[i].state {
            if now_ms - since_ms > cfg.destroy_timeout_ms {
                let v = viruses.remove(i);
                timers.cancel(TimerKey::BeamComplete(v.id));
                warn!(
                    "{} destroy sequence exceeded {}ms; beam completion never fired",
                    v.id, cfg.destroy_timeout_ms
                );
                stats.expired += 1;
                events.push(SimEvent::VirusDestroyed {
                    virus: v.id,
                    position: v.position,
                    cause: DestroyCause::Expired,
                });
            }
            continue;
        }

        let pos = viruses[i].position;
        if pos.distance(computer) < cfg.target_hit_radius {
            let v = viruses.remove(i);
            debug!(
                "{} reached the computer after {:.0}ms",
                v.id,
                now_ms - v.spawned_at_ms
            );
            stats.reached_target += 1;
            events.push(SimEvent::VirusDestroyed {
                virus: v.id,
                position: v.position,
                cause: DestroyCause::ReachedTarget,
            });
            continue;
        }
        if viruses[i].is_alive() && !inside_field(pos, cfg) {
            let v = viruses.remove(i);
            debug!("{} left the field at ({:.0}, {:.0})", v.id, pos.x, pos.y);
            stats.left_field += 1;
            events.push(SimEvent::VirusDestroyed {
                virus: v.id,
                position: v.position,
                cause: DestroyCause::LeftField,
            });
            continue;
        }

        // First active firewall in slot order wins.
        let hit = ledger
            .slots()
            .iter()
            .find(|s| s.is_firewall() && s.is_active && s.position.distance(pos) < cfg.engagement_radius)
            .map(|s| (s.id, s.position));
        if let Some((slot, from)) = hit {
            let v = &mut viruses[i];
            v.state = VirusState::BeingDestroyed { since_ms: now_ms };
            v.velocity = Vec2::ZERO;
            ledger.set_firewall_active(slot, false);
            timers.schedule(TimerKey::FirewallReactivate(slot), now_ms + cfg.firewall_cooldown_ms);
            timers.schedule(TimerKey::BeamComplete(v.id), now_ms + cfg.beam_duration_ms);
            debug!("firewall {} engaged {} at {:.0}ms", slot, v.id, now_ms);
            stats.engaged += 1;
            events.push(SimEvent::FirewallEngaged {
                slot,
                virus: v.id,
                from,
                to: pos,
            });
        }
    }
}

/// Edges count as inside; spawn points sit on or within them.
fn inside_field(p: Vec2, cfg: &SimConfig) -> bool {
    (0.0..=cfg.field_width).contains(&p.x) && (0.0..=cfg.field_height).contains(&p.y)
}

/// Apply one expired timer.
pub fn fire_timer(
    key: TimerKey,
    viruses: &mut Vec<Virus>,
    ledger: &mut ResourceLedger,
    events: &mut Vec<SimEvent>,
) {
    match key {
        TimerKey::FirewallReactivate(slot) => {
            // set_firewall_active refuses slots that are no longer firewalls
            if ledger.set_firewall_active(slot, true) {
                events.push(SimEvent::FirewallReactivated { slot });
            }
        }
        TimerKey::BeamComplete(id) => {
            if let Some(idx) = viruses.iter().position(|v| v.id == id) {
                let v = viruses.remove(idx);
                events.push(SimEvent::VirusDestroyed {
                    virus: v.id,
                    position: v.position,
                    cause: DestroyCause::Engaged,
                });
            }
        }
    }
}
