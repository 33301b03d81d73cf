use crate::model::{CombatStats, ResourceKind, Resources};
use crate::util::{format_amount, format_time};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NavbarProps {
    pub resources: Resources,
    pub stats: CombatStats,
    pub elapsed_secs: u64,
    pub paused: bool,
    pub on_toggle_pause: Callback<()>,
}

fn color(kind: ResourceKind) -> &'static str {
    match kind {
        ResourceKind::Crypto => "#d4af37",
        ResourceKind::Research => "#58a6ff",
        ResourceKind::Scripts => "#3fb950",
    }
}

#[function_component]
pub fn Navbar(props: &NavbarProps) -> Html {
    let item_style = "display:flex; align-items:center; gap:6px;";
    let value_style =
        "min-width:60px; text-align:right; font-variant-numeric:tabular-nums; font-weight:600;";
    let pause_cb = {
        let cb = props.on_toggle_pause.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div id="top-bar" style="display:flex; align-items:center; gap:22px; padding:8px 16px; background:rgba(22,27,34,0.95); border-bottom:1px solid #30363d; font-size:14px;">
            <span style="font-weight:700; color:#58a6ff; margin-right:12px;">{"Mainframe Defence"}</span>
            { for ResourceKind::ALL.iter().map(|&kind| html! {
                <div style={format!("{} color:{};", item_style, color(kind))}>
                    <span>{ kind.icon() }</span>
                    <span style="font-weight:500;">{ kind.label() }</span>
                    <span style={value_style}>{ format_amount(props.resources.get(kind)) }</span>
                </div>
            }) }
            <div style="flex:1;"></div>
            <span style="font-size:12px; opacity:0.75; font-variant-numeric:tabular-nums;" title="spawned / destroyed / breaches / strays / expired">
                { format!("🦠 {} · 💥 {} · ⚠ {} · ↗ {}", props.stats.spawned, props.stats.engaged, props.stats.reached_target, props.stats.left_field) }
                { if props.stats.expired > 0 { format!(" · ⏱ {}", props.stats.expired) } else { String::new() } }
            </span>
            <span style="font-variant-numeric:tabular-nums; opacity:0.8;">{ format_time(props.elapsed_secs) }</span>
            <button onclick={pause_cb}>{ if props.paused { "Resume" } else { "Pause" } }</button>
        </div>
    }
}
