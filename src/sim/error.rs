use thiserror::Error;

use crate::model::{BuildingKind, ResourceKind};

/// Why a build or remove was refused. State is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyError {
    #[error("slot {0} does not exist")]
    InvalidSlot(usize),
    #[error("slot {0} is empty")]
    SlotEmpty(usize),
    #[error("{kind} needs {needed} crypto, have {available}")]
    InsufficientCrypto {
        kind: BuildingKind,
        needed: i64,
        available: u64,
    },
    #[error("{kind} would leave {available_after}GB RAM")]
    InsufficientRam {
        kind: BuildingKind,
        available_after: i32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("not enough {kind}: need {needed}, have {available}")]
    Insufficient {
        kind: ResourceKind,
        needed: u64,
        available: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("node {0} does not exist")]
    UnknownNode(usize),
    #[error("node {0} is already unlocked")]
    AlreadyUnlocked(usize),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
