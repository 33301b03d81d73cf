use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::trace;

use crate::model::SimSnapshot;
use crate::sim::{SimEvent, Simulation, SubscriptionId};

use super::effects::Effects;

/// Shared handle the components pass around: the simulation, the events it
/// emitted since the last refresh, and the visual effects built from them.
#[derive(Clone)]
pub struct Session {
    sim: Rc<RefCell<Simulation>>,
    pending: Rc<RefCell<Vec<SimEvent>>>,
    effects: Rc<RefCell<Effects>>,
    subscription: SubscriptionId,
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.sim, &other.sim)
    }
}

impl Session {
    pub fn new(mut sim: Simulation) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = pending.clone();
        let subscription = sim.subscribe(move |e: &SimEvent| sink.borrow_mut().push(e.clone()));
        let effects = Effects::new(sim.config().beam_duration_ms);
        Self {
            sim: Rc::new(RefCell::new(sim)),
            pending,
            effects: Rc::new(RefCell::new(effects)),
            subscription,
        }
    }

    /// Catch the simulation and production up on `elapsed_ms` of wall time.
    pub fn advance(&self, elapsed_ms: f64, frame_ms: f64) {
        self.sim.borrow_mut().run_for(elapsed_ms, frame_ms);
    }

    /// Stop collecting events, e.g. when the view unmounts.
    pub fn detach(&self) -> bool {
        self.sim.borrow_mut().unsubscribe(self.subscription)
    }

    /// Run a command against the simulation. The closure must not call back
    /// into the session.
    pub fn command<R>(&self, f: impl FnOnce(&mut Simulation) -> R) -> R {
        f(&mut self.sim.borrow_mut())
    }

    pub fn query<R>(&self, f: impl FnOnce(&Simulation) -> R) -> R {
        f(&self.sim.borrow())
    }

    /// Fold pending events into the effects and take a fresh snapshot.
    pub fn snapshot(&self) -> SimSnapshot {
        let sim = self.sim.borrow();
        let now = sim.now_ms();
        let mut fx = self.effects.borrow_mut();
        for e in self.pending.borrow_mut().drain(..) {
            trace!("{}", e);
            fx.apply(&e, now);
        }
        fx.prune(now);
        sim.snapshot()
    }

    pub fn effects(&self) -> Ref<'_, Effects> {
        self.effects.borrow()
    }
}
