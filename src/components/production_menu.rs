use crate::model::{CapacitySnapshot, ResourceKind};
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProductionMenuProps {
    pub mode: ResourceKind,
    pub capacity: CapacitySnapshot,
    pub on_select: Callback<ResourceKind>,
    pub on_close: Callback<()>,
}

#[function_component]
pub fn ProductionMenu(props: &ProductionMenuProps) -> Html {
    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let cap = props.capacity;
    html! {<div style="position:absolute; top:64px; right:12px; background:rgba(22,27,34,0.92); border:1px solid #30363d; border-radius:8px; padding:10px; min-width:220px; display:flex; flex-direction:column; gap:6px;">
        <div style="font-weight:600;">{"Production"}</div>
        <div style="font-size:12px; opacity:0.8;">{ format!("RAM {}/{} free, {} used · {} per tick", cap.available_ram, cap.total_ram, cap.used_ram, cap.production_rate) }</div>
        { for ResourceKind::ALL.iter().map(|&kind| {
            let cb = props.on_select.clone();
            let onclick = Callback::from(move |_| cb.emit(kind));
            let active = kind == props.mode;
            let style = if active { "border:1px solid #58a6ff; font-weight:600;" } else { "" };
            html! { <button onclick={onclick} style={style}>{ format!("{} {}", kind.icon(), kind.label()) }</button> }
        }) }
        <button onclick={close_cb}>{"Close"}</button>
    </div>}
}
