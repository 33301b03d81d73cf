use crate::model::{BuildingKind, ResourceKind};
use crate::sim::{BuildQuote, BuildingSpec};
use crate::util::format_delta;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct BuildMenuProps {
    pub slot: usize,
    pub current: Option<BuildingKind>,
    /// One quote per building kind, in `BuildingKind::ALL` order, with the
    /// configured spec it was priced from.
    pub options: Vec<(BuildQuote, BuildingSpec)>,
    /// Refund a removal would pay, and whether removal is allowed right now.
    pub removal: Option<(u64, bool)>,
    pub on_build: Callback<(usize, BuildingKind)>,
    pub on_remove: Callback<usize>,
    pub on_close: Callback<()>,
}

fn describe(kind: BuildingKind, spec: &BuildingSpec) -> String {
    let mut parts = Vec::new();
    if spec.provides_ram > 0 {
        parts.push(format!("+{} RAM", spec.provides_ram));
    }
    if spec.requires_ram > 0 {
        parts.push(format!("uses {} RAM", spec.requires_ram));
    }
    if kind == BuildingKind::Firewall {
        parts.push("zaps viruses in range".to_string());
    }
    parts.join(", ")
}

#[function_component]
pub fn BuildMenu(props: &BuildMenuProps) -> Html {
    let slot = props.slot;
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let title = match props.current {
        Some(kind) => format!("Slot {} · {}", slot + 1, kind.label()),
        None => format!("Slot {} · empty", slot + 1),
    };
    html! {<div style="position:absolute; left:50%; bottom:28px; transform:translateX(-50%); background:rgba(22,27,34,0.94); border:1px solid #30363d; border-radius:10px; padding:12px 16px; display:flex; flex-direction:column; gap:8px; min-width:260px;">
        <div style="font-weight:600; text-align:center;">{ title }</div>
        { for props.options.iter().map(|(q, spec)| {
            let kind = q.kind;
            let cb = props.on_build.clone();
            let onclick = Callback::from(move |_| cb.emit((slot, kind)));
            let trade_in = q
                .previous
                .map(|prev| format!("sells {} for +{}", prev.label(), q.refund))
                .unwrap_or_default();
            let reason = if !q.affordable {
                "not enough Crypto"
            } else if !q.fits {
                "not enough RAM"
            } else {
                ""
            };
            html! {
                <button onclick={onclick} disabled={!q.feasible()} title={if reason.is_empty() { trade_in } else { reason.to_string() }} style="display:flex; justify-content:space-between; gap:12px;">
                    <span>{ kind.label() }<span style="font-size:11px; opacity:0.7; margin-left:6px;">{ describe(kind, spec) }</span></span>
                    <span style="color:#d4af37; font-variant-numeric:tabular-nums;">{ format!("{} {}", format_delta(q.crypto_cost), ResourceKind::Crypto.icon()) }</span>
                </button>
            }
        }) }
        { if let Some((refund, allowed)) = props.removal {
            let cb = props.on_remove.clone();
            let onclick = Callback::from(move |_| cb.emit(slot));
            html!{ <button onclick={onclick} disabled={!allowed} style="color:#f85149;">{ format!("Remove (+{} {})", refund, ResourceKind::Crypto.icon()) }</button> }
        } else { html!{} } }
        <button onclick={close_cb}>{"Cancel"}</button>
    </div> }
}
