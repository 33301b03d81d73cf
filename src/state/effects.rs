use crate::model::{Vec2, VirusId};
use crate::sim::{DestroyCause, SimEvent};

pub const EXPLOSION_MS: f64 = 1000.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Beam {
    pub slot: usize,
    pub virus: VirusId,
    pub from: Vec2,
    pub to: Vec2,
    pub started_ms: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Explosion {
    pub position: Vec2,
    pub started_ms: f64,
}

/// Short-lived visuals built from simulation events, aged on the sim clock.
#[derive(Clone, Debug, PartialEq)]
pub struct Effects {
    beam_ms: f64,
    beams: Vec<Beam>,
    explosions: Vec<Explosion>,
}

impl Effects {
    pub fn new(beam_ms: f64) -> Self {
        Self {
            beam_ms,
            beams: Vec::new(),
            explosions: Vec::new(),
        }
    }

    pub fn beams(&self) -> &[Beam] {
        &self.beams
    }

    pub fn explosions(&self) -> &[Explosion] {
        &self.explosions
    }

    pub fn apply(&mut self, event: &SimEvent, now_ms: f64) {
        match *event {
            SimEvent::FirewallEngaged {
                slot,
                virus,
                from,
                to,
            } => self.beams.push(Beam {
                slot,
                virus,
                from,
                to,
                started_ms: now_ms,
            }),
            SimEvent::VirusDestroyed {
                virus,
                position,
                cause,
            } => {
                self.beams.retain(|b| b.virus != virus);
                if matches!(cause, DestroyCause::Engaged | DestroyCause::Expired) {
                    self.explosions.push(Explosion {
                        position,
                        started_ms: now_ms,
                    });
                }
            }
            // A sold firewall stops drawing its beam straight away.
            SimEvent::ModuleChanged { slot, .. } => self.beams.retain(|b| b.slot != slot),
            _ => {}
        }
    }

    pub fn prune(&mut self, now_ms: f64) {
        let beam_ms = self.beam_ms;
        self.beams.retain(|b| now_ms - b.started_ms < beam_ms);
        self.explosions
            .retain(|e| now_ms - e.started_ms < EXPLOSION_MS);
    }

    /// 0.0 at the start of an explosion, 1.0 when it is gone.
    pub fn explosion_progress(e: &Explosion, now_ms: f64) -> f64 {
        ((now_ms - e.started_ms) / EXPLOSION_MS).clamp(0.0, 1.0)
    }
}
