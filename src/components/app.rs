use std::cell::Cell;
use std::rc::Rc;

use super::{
    build_menu::BuildMenu, field_view::FieldView, navbar::Navbar, node_dialog::NodeDialog,
    production_menu::ProductionMenu,
};
use crate::model::{BuildingKind, HudAction, HudState, ResourceKind, Selection};
use crate::sim::{SimConfig, Simulation};
use crate::state::Session;
use log::{info, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::KeyboardEvent;
use yew::prelude::*;

const SIM_TICK_MS: i32 = 16;
const MAX_CATCH_UP_MS: f64 = 5000.0;
const DEBUG_CREDIT: i64 = 500;
/// Developer tuning override, not a save game.
const CONFIG_KEY: &str = "md_sim_config";

fn load_config() -> SimConfig {
    let raw = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|store| store.get_item(CONFIG_KEY).ok().flatten());
    let Some(raw) = raw else {
        return SimConfig::default();
    };
    SimConfig::from_json(&raw).unwrap_or_else(|e| {
        warn!("ignoring {} override: {}", CONFIG_KEY, e);
        SimConfig::default()
    })
}

fn start_session() -> Session {
    let sim = Simulation::new(load_config()).unwrap_or_else(|e| {
        warn!("falling back to default config: {}", e);
        Simulation::default()
    });
    Session::new(sim)
}

#[function_component(App)]
pub fn app() -> Html {
    let session = (*use_memo((), |_| start_session())).clone();
    let hud = use_reducer(HudState::default);

    // Drive the simulation and production from measured wall-clock time.
    {
        let session = session.clone();
        let hud = hud.clone();
        use_effect_with((), move |_| -> Box<dyn FnOnce()> {
            let Some(window) = web_sys::window() else {
                warn!("no window; simulation not started");
                return Box::new(|| ());
            };
            hud.dispatch(HudAction::Refresh(session.snapshot()));

            let sim_tick = {
                let session = session.clone();
                let hud = hud.clone();
                let last = Rc::new(Cell::new(js_sys::Date::now()));
                Closure::wrap(Box::new(move || {
                    let now = js_sys::Date::now();
                    // Background tabs throttle intervals; catch up, but not forever.
                    let elapsed = (now - last.replace(now)).clamp(0.0, MAX_CATCH_UP_MS);
                    session.advance(elapsed, SIM_TICK_MS as f64);
                    hud.dispatch(HudAction::Refresh(session.snapshot()));
                }) as Box<dyn FnMut()>)
            };
            // Space pauses, Escape closes menus, Shift+C credits crypto
            let keydown_cb = {
                let session = session.clone();
                let hud = hud.clone();
                Closure::wrap(Box::new(move |e: KeyboardEvent| match e.key().as_str() {
                    " " => {
                        e.prevent_default();
                        session.command(|s| s.set_paused(!s.is_paused()));
                        hud.dispatch(HudAction::Refresh(session.snapshot()));
                    }
                    "Escape" => hud.dispatch(HudAction::CloseMenus),
                    "C" if e.shift_key() => {
                        if let Ok(balance) =
                            session.command(|s| s.add_resource(ResourceKind::Crypto, DEBUG_CREDIT))
                        {
                            info!("debug credit: crypto now {}", balance);
                        }
                        hud.dispatch(HudAction::Refresh(session.snapshot()));
                    }
                    _ => {}
                }) as Box<dyn FnMut(_)>)
            };

            let sim_tick_id = window
                .set_interval_with_callback_and_timeout_and_arguments_0(
                    sim_tick.as_ref().unchecked_ref(),
                    SIM_TICK_MS,
                )
                .ok();
            window
                .add_event_listener_with_callback("keydown", keydown_cb.as_ref().unchecked_ref())
                .ok();

            Box::new(move || {
                if let Some(id) = sim_tick_id {
                    window.clear_interval_with_handle(id);
                }
                let _ = window.remove_event_listener_with_callback(
                    "keydown",
                    keydown_cb.as_ref().unchecked_ref(),
                );
                session.detach();
                let _keep_alive = (&sim_tick, &keydown_cb);
            })
        });
    }

    let refresh = {
        let session = session.clone();
        let hud = hud.clone();
        move || hud.dispatch(HudAction::Refresh(session.snapshot()))
    };

    let toggle_pause_cb = {
        let session = session.clone();
        let refresh = refresh.clone();
        Callback::from(move |()| {
            session.command(|s| s.set_paused(!s.is_paused()));
            refresh();
        })
    };
    let pick_cb = {
        let hud = hud.clone();
        Callback::from(move |picked: Option<Selection>| match picked {
            Some(Selection::ProductionMenu) => hud.dispatch(HudAction::ToggleProductionMenu),
            Some(sel) => hud.dispatch(HudAction::Select(sel)),
            None => hud.dispatch(HudAction::CloseMenus),
        })
    };
    let close_cb = {
        let hud = hud.clone();
        Callback::from(move |()| hud.dispatch(HudAction::CloseMenus))
    };
    // Rejected commands leave the menu open; the reason is already logged.
    let build_cb = {
        let session = session.clone();
        let hud = hud.clone();
        let refresh = refresh.clone();
        Callback::from(move |(slot, kind): (usize, BuildingKind)| {
            if session.command(|s| s.build_on_module(slot, kind)).is_ok() {
                hud.dispatch(HudAction::CloseMenus);
            }
            refresh();
        })
    };
    let remove_cb = {
        let session = session.clone();
        let hud = hud.clone();
        let refresh = refresh.clone();
        Callback::from(move |slot: usize| {
            if session.command(|s| s.remove_module(slot)).is_ok() {
                hud.dispatch(HudAction::CloseMenus);
            }
            refresh();
        })
    };
    let mode_cb = {
        let session = session.clone();
        let hud = hud.clone();
        let refresh = refresh.clone();
        Callback::from(move |mode: ResourceKind| {
            session.command(|s| s.set_production_mode(mode));
            hud.dispatch(HudAction::CloseMenus);
            refresh();
        })
    };
    let unlock_cb = {
        let session = session.clone();
        let hud = hud.clone();
        let refresh = refresh.clone();
        Callback::from(move |node: usize| {
            if session.command(|s| s.unlock_node(node)).is_ok() {
                hud.dispatch(HudAction::CloseMenus);
            }
            refresh();
        })
    };

    let Some(snap) = hud.snapshot.clone() else {
        return html! { <div style="padding:24px; opacity:0.7;">{"Booting…"}</div> };
    };

    let overlay = match hud.selection {
        Selection::None => html! {},
        Selection::Slot(slot) => {
            let (current, options, removal) = session.query(|s| {
                let options = BuildingKind::ALL
                    .iter()
                    .filter_map(|&k| s.quote_build(slot, k).ok().map(|q| (q, *s.config().spec(k))))
                    .collect::<Vec<_>>();
                let removal = s.removal_refund(slot).map(|r| (r, s.can_remove(slot)));
                (s.slot(slot).and_then(|m| m.kind), options, removal)
            });
            html! { <BuildMenu slot={slot} current={current} options={options} removal={removal}
                on_build={build_cb} on_remove={remove_cb} on_close={close_cb.clone()} /> }
        }
        Selection::ProductionMenu => html! {
            <ProductionMenu mode={snap.production_mode} capacity={snap.capacity}
                on_select={mode_cb} on_close={close_cb.clone()} />
        },
        Selection::Node(node) => {
            let cost = session.query(|s| s.config().node_unlock_cost);
            html! { <NodeDialog node={node} cost={cost} scripts={snap.resources.scripts}
                on_unlock={unlock_cb} on_close={close_cb.clone()} /> }
        }
    };

    html! {<div style="position:relative; width:100vw; height:100vh; background:#0d1117; color:#c9d1d9; font-family:sans-serif;">
        <Navbar resources={snap.resources} stats={snap.stats} elapsed_secs={(snap.now_ms / 1000.0) as u64}
            paused={snap.paused} on_toggle_pause={toggle_pause_cb} />
        <div style="position:relative;">
            <FieldView snapshot={snap.clone()} version={hud.version} session={session.clone()} on_pick={pick_cb} />
            { overlay }
        </div>
    </div>}
}
