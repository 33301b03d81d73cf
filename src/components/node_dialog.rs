use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct NodeDialogProps {
    pub node: usize,
    pub cost: u64,
    pub scripts: u64,
    pub on_unlock: Callback<usize>,
    pub on_close: Callback<()>,
}

#[function_component(NodeDialog)]
pub fn node_dialog(props: &NodeDialogProps) -> Html {
    let node = props.node;
    let unlock_btn = {
        let cb = props.on_unlock.clone();
        Callback::from(move |_| cb.emit(node))
    };
    let close_btn = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let affordable = props.scripts >= props.cost;
    html! {
        <div style="position:absolute; top:50%; left:50%; transform:translate(-50%, -50%); background:rgba(0,0,0,0.87); border:2px solid #30363d; padding:22px 30px; border-radius:14px; min-width:300px; text-align:center; font-size:14px;">
            <h3 style="margin:0 0 10px 0; color:#3fb950;">{ format!("Network Node {}", node + 1) }</h3>
            <p style="margin:4px 0 12px 0; opacity:0.85;">{ format!("Hack this node for {} Scripts?", props.cost) }</p>
            { if !affordable {
                html!{ <p style="margin:0 0 10px 0; color:#f85149; font-size:12px;">{ format!("You have {} Scripts.", props.scripts) }</p> }
            } else { html!{} } }
            <div style="display:flex; gap:12px; justify-content:center;">
                <button onclick={unlock_btn} disabled={!affordable}>{"Unlock"}</button>
                <button onclick={close_btn}>{"Cancel"}</button>
            </div>
        </div>
    }
}
