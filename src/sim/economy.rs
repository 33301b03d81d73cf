//! Build, replace and remove transactions on the slot ring.
//!
//! Each operation either commits completely or returns an error with the
//! ledger untouched; there is no partially applied state to recover from.

use super::capacity;
use super::config::SimConfig;
use super::error::EconomyError;
use super::ledger::ResourceLedger;
use crate::model::BuildingKind;

/// What a build would cost and leave behind, for menus and pre-checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildQuote {
    pub kind: BuildingKind,
    pub previous: Option<BuildingKind>,
    /// Price of the new building minus the refund for the old one.
    pub crypto_cost: i64,
    pub refund: u64,
    pub ram_after: i32,
    pub affordable: bool,
    pub fits: bool,
}

impl BuildQuote {
    pub fn feasible(&self) -> bool {
        self.affordable && self.fits
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuildReceipt {
    pub slot: usize,
    pub kind: BuildingKind,
    pub previous: Option<BuildingKind>,
    pub crypto_cost: i64,
    pub crypto_after: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovalReceipt {
    pub slot: usize,
    pub removed: BuildingKind,
    pub refund: u64,
    pub crypto_after: u64,
}

fn crypto_after(crypto: u64, cost: i64) -> i128 {
    i128::from(crypto) - i128::from(cost)
}

pub fn quote_build(
    ledger: &ResourceLedger,
    cfg: &SimConfig,
    slot: usize,
    kind: BuildingKind,
) -> Result<BuildQuote, EconomyError> {
    let current = ledger.slot(slot).ok_or(EconomyError::InvalidSlot(slot))?;
    let previous = current.kind;
    let refund = previous.map(|p| cfg.spec(p).refund()).unwrap_or(0);
    let crypto_cost = cfg.spec(kind).cost as i64 - refund as i64;
    let ram_after = capacity::available_ram_after(ledger.slots(), cfg, slot, Some(kind));
    Ok(BuildQuote {
        kind,
        previous,
        crypto_cost,
        refund,
        ram_after,
        affordable: crypto_after(ledger.resources().crypto, crypto_cost) >= 0,
        fits: ram_after >= 0,
    })
}

/// Build `kind` on `slot`, selling whatever is there in the same step.
pub fn build_on_module(
    ledger: &mut ResourceLedger,
    cfg: &SimConfig,
    slot: usize,
    kind: BuildingKind,
) -> Result<BuildReceipt, EconomyError> {
    let quote = quote_build(ledger, cfg, slot, kind)?;
    let crypto = ledger.resources().crypto;
    if !quote.affordable {
        return Err(EconomyError::InsufficientCrypto {
            kind,
            needed: quote.crypto_cost,
            available: crypto,
        });
    }
    if !quote.fits {
        return Err(EconomyError::InsufficientRam {
            kind,
            available_after: quote.ram_after,
        });
    }
    // affordable guarantees the result is in 0..=u64::MAX
    let after = crypto_after(crypto, quote.crypto_cost).min(u64::MAX as i128) as u64;
    ledger.commit_module(slot, Some(kind), after);
    Ok(BuildReceipt {
        slot,
        kind,
        previous: quote.previous,
        crypto_cost: quote.crypto_cost,
        crypto_after: after,
    })
}

pub fn removal_refund(ledger: &ResourceLedger, cfg: &SimConfig, slot: usize) -> Option<u64> {
    ledger
        .slot(slot)
        .and_then(|s| s.kind)
        .map(|k| cfg.spec(k).refund())
}

pub fn remove_module(
    ledger: &mut ResourceLedger,
    cfg: &SimConfig,
    slot: usize,
) -> Result<RemovalReceipt, EconomyError> {
    let current = ledger.slot(slot).ok_or(EconomyError::InvalidSlot(slot))?;
    let removed = current.kind.ok_or(EconomyError::SlotEmpty(slot))?;
    // Selling RAM gives back what it provided; refuse if firewalls still need it.
    let ram_after = capacity::available_ram_after(ledger.slots(), cfg, slot, None);
    if ram_after < 0 {
        return Err(EconomyError::InsufficientRam {
            kind: removed,
            available_after: ram_after,
        });
    }
    let refund = cfg.spec(removed).refund();
    let after = ledger.resources().crypto.saturating_add(refund);
    ledger.commit_module(slot, None, after);
    Ok(RemovalReceipt {
        slot,
        removed,
        refund,
        crypto_after: after,
    })
}
