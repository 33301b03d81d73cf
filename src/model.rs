//! Core data models for Mainframe Defence.
//! Plain data shared by the simulation core and the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

/// Number of build sites in the ring around the central computer.
pub const SLOT_COUNT: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Vec2) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Unit vector pointing from `self` towards `other`; zero when the points coincide.
    pub fn direction_to(self, other: Vec2) -> Vec2 {
        let d = self.distance(other);
        if d < 1e-9 {
            return Vec2::ZERO;
        }
        Vec2::new((other.x - self.x) / d, (other.y - self.y) / d)
    }

    pub fn scale(self, k: f64) -> Vec2 {
        Vec2::new(self.x * k, self.y * k)
    }

    pub fn add(self, other: Vec2) -> Vec2 {
        Vec2::new(self.x + other.x, self.y + other.y)
    }
}

/// The three balances. Doubles as the production mode selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Crypto,
    Research,
    Scripts,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Crypto,
        ResourceKind::Research,
        ResourceKind::Scripts,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Crypto => "Crypto",
            ResourceKind::Research => "Research",
            ResourceKind::Scripts => "Scripts",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ResourceKind::Crypto => "⚡",
            ResourceKind::Research => "🔬",
            ResourceKind::Scripts => "📜",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingKind {
    Ram,
    Firewall,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 2] = [BuildingKind::Ram, BuildingKind::Firewall];

    pub fn label(self) -> &'static str {
        match self {
            BuildingKind::Ram => "RAM",
            BuildingKind::Firewall => "Firewall",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub crypto: u64,
    pub research: u64,
    pub scripts: u64,
}

impl Resources {
    pub fn get(&self, kind: ResourceKind) -> u64 {
        match kind {
            ResourceKind::Crypto => self.crypto,
            ResourceKind::Research => self.research,
            ResourceKind::Scripts => self.scripts,
        }
    }

    pub(crate) fn get_mut(&mut self, kind: ResourceKind) -> &mut u64 {
        match kind {
            ResourceKind::Crypto => &mut self.crypto,
            ResourceKind::Research => &mut self.research,
            ResourceKind::Scripts => &mut self.scripts,
        }
    }
}

/// One build site. `kind` only changes through the module economy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleSlot {
    pub id: usize,
    pub kind: Option<BuildingKind>,
    /// World position of the slot, fixed for the session.
    pub position: Vec2,
    /// Firewalls only: `true` = can engage, `false` = cooling down.
    pub is_active: bool,
}

impl ModuleSlot {
    pub fn occupied(&self) -> bool {
        self.kind.is_some()
    }

    pub fn is_firewall(&self) -> bool {
        self.kind == Some(BuildingKind::Firewall)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VirusId(pub u64);

impl fmt::Display for VirusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "virus#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum VirusState {
    Alive,
    /// Frozen in place and waiting for its beam to finish.
    BeingDestroyed { since_ms: f64 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Virus {
    pub id: VirusId,
    pub position: Vec2,
    /// Units per second.
    pub velocity: Vec2,
    pub state: VirusState,
    pub spawned_at_ms: f64,
}

impl Virus {
    pub fn is_alive(&self) -> bool {
        matches!(self.state, VirusState::Alive)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: usize,
    pub position: Vec2,
    pub unlocked: bool,
    /// Connector on the computer edge the trace is drawn to.
    pub connector: Vec2,
}

/// Running counts of how viruses came and went.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatStats {
    pub spawned: u64,
    pub reached_target: u64,
    pub engaged: u64,
    /// Destroy sequences swept by the timeout; non-zero means a beam completion was lost.
    pub expired: u64,
    pub left_field: u64,
}

/// Derived capacity figures; recomputed on every read, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySnapshot {
    pub total_ram: u32,
    pub used_ram: u32,
    pub available_ram: i32,
    pub production_rate: u32,
}

/// Owned view of the simulation handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub now_ms: f64,
    pub resources: Resources,
    pub production_mode: ResourceKind,
    pub capacity: CapacitySnapshot,
    pub stats: CombatStats,
    pub slots: Vec<ModuleSlot>,
    /// Reactivation time per slot, `Some` only for cooling firewalls.
    pub cooldowns: Vec<Option<f64>>,
    pub viruses: Vec<Virus>,
    pub nodes: Vec<NetworkNode>,
    pub computer: Vec2,
    pub computer_size: f64,
    pub engagement_radius: f64,
    pub field_width: f64,
    pub field_height: f64,
    pub paused: bool,
}

// ---------------- Presentation reducer -----------------

/// What the player currently has open over the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    None,
    Slot(usize),
    ProductionMenu,
    Node(usize),
}

#[derive(Clone, Debug, PartialEq)]
pub struct HudState {
    pub snapshot: Option<SimSnapshot>,
    pub selection: Selection,
    /// Bumped on every refresh so effects can key on it.
    pub version: u64,
}

impl Default for HudState {
    fn default() -> Self {
        Self {
            snapshot: None,
            selection: Selection::None,
            version: 0,
        }
    }
}

#[derive(Clone, Debug)]
pub enum HudAction {
    Refresh(SimSnapshot),
    Select(Selection),
    ToggleProductionMenu,
    CloseMenus,
}

impl Reducible for HudState {
    type Action = HudAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use HudAction::*;
        let mut new = (*self).clone();
        match action {
            Refresh(snapshot) => {
                new.snapshot = Some(snapshot);
                new.version = new.version.wrapping_add(1);
            }
            Select(sel) => {
                new.selection = sel;
            }
            ToggleProductionMenu => {
                new.selection = if new.selection == Selection::ProductionMenu {
                    Selection::None
                } else {
                    Selection::ProductionMenu
                };
            }
            CloseMenus => {
                if new.selection == Selection::None {
                    return self;
                }
                new.selection = Selection::None;
            }
        }
        Rc::new(new)
    }
}
