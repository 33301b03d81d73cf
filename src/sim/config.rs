//! Tunable constants for a session. Every field has a default so JSON
//! overrides can be partial.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::model::{BuildingKind, Resources};

/// Static price and RAM effect of one building type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub cost: u64,
    pub provides_ram: u32,
    pub requires_ram: u32,
}

impl BuildingSpec {
    /// Half the cost, rounded down.
    pub fn refund(&self) -> u64 {
        self.cost / 2
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub base_ram: u32,
    pub ram: BuildingSpec,
    pub firewall: BuildingSpec,
    /// RAM units per produced unit (2 units per 4GB).
    pub production_divisor: u32,
    pub production_interval_ms: u64,
    pub initial_resources: Resources,

    pub field_width: f64,
    pub field_height: f64,
    /// Distance of the fixed spawn axis from the field edge.
    pub spawn_edge_inset: f64,
    /// Distance of the random spawn band from the field edge.
    pub spawn_band_inset: f64,
    pub virus_speed: f64,
    pub spawn_interval_ms: f64,
    pub target_hit_radius: f64,
    pub engagement_radius: f64,
    pub firewall_cooldown_ms: f64,
    pub beam_duration_ms: f64,
    pub destroy_timeout_ms: f64,
    /// Side length of the central computer; the slot ring hangs off it.
    pub computer_size: f64,

    pub node_count: usize,
    pub node_unlock_cost: u64,
    pub node_edge_margin: f64,
    pub node_min_distance_from_computer: f64,
    pub node_min_spacing: f64,

    /// Fixed seed for reproducible sessions; random when absent.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            base_ram: 4,
            ram: BuildingSpec {
                cost: 50,
                provides_ram: 2,
                requires_ram: 0,
            },
            firewall: BuildingSpec {
                cost: 75,
                provides_ram: 0,
                requires_ram: 2,
            },
            production_divisor: 2,
            production_interval_ms: 1000,
            initial_resources: Resources {
                crypto: 2000,
                research: 0,
                scripts: 1000,
            },
            field_width: 800.0,
            field_height: 600.0,
            spawn_edge_inset: 50.0,
            spawn_band_inset: 100.0,
            virus_speed: 100.0,
            spawn_interval_ms: 1500.0,
            target_hit_radius: 100.0,
            engagement_radius: 180.0,
            firewall_cooldown_ms: 2500.0,
            beam_duration_ms: 2500.0,
            destroy_timeout_ms: 3000.0,
            computer_size: 150.0,
            node_count: 8,
            node_unlock_cost: 200,
            node_edge_margin: 100.0,
            node_min_distance_from_computer: 200.0,
            node_min_spacing: 100.0,
            seed: None,
        }
    }
}

impl SimConfig {
    pub fn spec(&self, kind: BuildingKind) -> &BuildingSpec {
        match kind {
            BuildingKind::Ram => &self.ram,
            BuildingKind::Firewall => &self.firewall,
        }
    }

    /// Parse a (possibly partial) JSON override and validate the result.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: SimConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.production_divisor == 0 {
            return Err(ConfigError::Invalid("production_divisor must be > 0".into()));
        }
        if self.production_interval_ms == 0 {
            return Err(ConfigError::Invalid("production_interval_ms must be > 0".into()));
        }
        if !(self.spawn_interval_ms > 0.0) {
            return Err(ConfigError::Invalid("spawn_interval_ms must be > 0".into()));
        }
        if !(self.virus_speed > 0.0) {
            return Err(ConfigError::Invalid("virus_speed must be > 0".into()));
        }
        for (name, r) in [
            ("target_hit_radius", self.target_hit_radius),
            ("engagement_radius", self.engagement_radius),
            ("computer_size", self.computer_size),
        ] {
            if !(r > 0.0) {
                return Err(ConfigError::Invalid(format!("{name} must be > 0")));
            }
        }
        for (name, ms) in [
            ("firewall_cooldown_ms", self.firewall_cooldown_ms),
            ("beam_duration_ms", self.beam_duration_ms),
            ("destroy_timeout_ms", self.destroy_timeout_ms),
        ] {
            if !(ms >= 0.0) || ms.is_infinite() {
                return Err(ConfigError::Invalid(format!("{name} must be >= 0 and finite")));
            }
        }
        if self.field_width <= 2.0 * self.spawn_band_inset
            || self.field_height <= 2.0 * self.spawn_band_inset
        {
            return Err(ConfigError::Invalid(
                "play field too small for the spawn band".into(),
            ));
        }
        if self.spawn_edge_inset < 0.0 || self.spawn_band_inset < 0.0 {
            return Err(ConfigError::Invalid("spawn insets must be >= 0".into()));
        }
        if 2.0 * self.spawn_edge_inset >= self.field_width.min(self.field_height) {
            return Err(ConfigError::Invalid(
                "spawn_edge_inset puts spawns outside the field".into(),
            ));
        }
        Ok(())
    }
}
