use std::f64::consts::PI;

use crate::model::{BuildingKind, Selection, SimSnapshot, Vec2, VirusState};
use crate::state::{Effects, Session};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};
use yew::prelude::*;

pub const SLOT_RADIUS: f64 = 18.0;
pub const NODE_RADIUS: f64 = 14.0;
const VIRUS_RADIUS: f64 = 8.0;
const PICK_SLACK: f64 = 4.0;

#[derive(Properties, PartialEq, Clone)]
pub struct FieldViewProps {
    pub snapshot: SimSnapshot,
    pub version: u64,
    pub session: Session,
    pub on_pick: Callback<Option<Selection>>,
}

/// What sits under a point in field coordinates. Slots win over nodes,
/// nodes over the computer body.
pub fn pick(snap: &SimSnapshot, p: Vec2) -> Option<Selection> {
    if let Some(s) = snap
        .slots
        .iter()
        .find(|s| s.position.distance(p) <= SLOT_RADIUS + PICK_SLACK)
    {
        return Some(Selection::Slot(s.id));
    }
    if let Some(n) = snap
        .nodes
        .iter()
        .find(|n| !n.unlocked && n.position.distance(p) <= NODE_RADIUS + PICK_SLACK)
    {
        return Some(Selection::Node(n.id));
    }
    let half = snap.computer_size / 2.0;
    if (p.x - snap.computer.x).abs() <= half && (p.y - snap.computer.y).abs() <= half {
        return Some(Selection::ProductionMenu);
    }
    None
}

fn circle(ctx: &CanvasRenderingContext2d, c: Vec2, r: f64) {
    ctx.begin_path();
    ctx.arc(c.x, c.y, r, 0.0, PI * 2.0).ok();
}

fn draw(ctx: &CanvasRenderingContext2d, snap: &SimSnapshot, fx: &Effects) {
    let now = snap.now_ms;
    ctx.set_fill_style_str("#0e1116");
    ctx.fill_rect(0.0, 0.0, snap.field_width, snap.field_height);

    // Grid
    ctx.set_stroke_style_str("#161b22");
    ctx.set_line_width(1.0);
    let mut x = 0.0;
    while x <= snap.field_width {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, snap.field_height);
        ctx.stroke();
        x += 50.0;
    }
    let mut y = 0.0;
    while y <= snap.field_height {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(snap.field_width, y);
        ctx.stroke();
        y += 50.0;
    }

    // Traces under everything else
    for n in &snap.nodes {
        ctx.set_stroke_style_str(if n.unlocked { "#3fb950" } else { "#2f3641" });
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(n.position.x, n.position.y);
        ctx.line_to(n.position.x, n.connector.y);
        ctx.line_to(n.connector.x, n.connector.y);
        ctx.stroke();
    }
    for n in &snap.nodes {
        circle(ctx, n.position, NODE_RADIUS);
        ctx.set_fill_style_str(if n.unlocked { "#238636" } else { "#21262d" });
        ctx.fill();
        ctx.set_stroke_style_str(if n.unlocked { "#3fb950" } else { "#484f58" });
        ctx.set_line_width(2.0);
        ctx.stroke();
    }

    // Computer
    let half = snap.computer_size / 2.0;
    let (cx, cy) = (snap.computer.x, snap.computer.y);
    ctx.set_fill_style_str("#161b22");
    ctx.fill_rect(cx - half, cy - half, snap.computer_size, snap.computer_size);
    ctx.set_stroke_style_str("#58a6ff");
    ctx.set_line_width(2.0);
    ctx.stroke_rect(cx - half, cy - half, snap.computer_size, snap.computer_size);
    ctx.set_fill_style_str("#c9d1d9");
    ctx.set_font("14px monospace");
    ctx.set_text_align("center");
    ctx.fill_text(
        &format!("{} {}", snap.production_mode.icon(), snap.production_mode.label()),
        cx,
        cy - 10.0,
    )
    .ok();
    ctx.fill_text(
        &format!("+{}/tick", snap.capacity.production_rate),
        cx,
        cy + 10.0,
    )
    .ok();

    // RAM bar: available out of total
    let cap = snap.capacity;
    let bar_w = snap.computer_size - 20.0;
    let bar_y = cy + half - 22.0;
    ctx.set_fill_style_str("#30363d");
    ctx.fill_rect(cx - bar_w / 2.0, bar_y, bar_w, 10.0);
    if cap.total_ram > 0 && cap.available_ram > 0 {
        let frac = (cap.available_ram as f64 / cap.total_ram as f64).min(1.0);
        ctx.set_fill_style_str("#1f6feb");
        ctx.fill_rect(cx - bar_w / 2.0, bar_y, bar_w * frac, 10.0);
    }
    ctx.set_font("10px monospace");
    ctx.fill_text(
        &format!("RAM {}/{}", cap.available_ram, cap.total_ram),
        cx,
        bar_y - 4.0,
    )
    .ok();

    // Slots
    for s in &snap.slots {
        match s.kind {
            None => {
                circle(ctx, s.position, SLOT_RADIUS);
                let dash = js_sys::Array::of2(&JsValue::from_f64(4.0), &JsValue::from_f64(4.0));
                ctx.set_line_dash(&dash).ok();
                ctx.set_stroke_style_str("#484f58");
                ctx.set_line_width(1.5);
                ctx.stroke();
                ctx.set_line_dash(&js_sys::Array::new()).ok();
            }
            Some(BuildingKind::Ram) => {
                circle(ctx, s.position, SLOT_RADIUS);
                ctx.set_fill_style_str("#1f6feb");
                ctx.fill();
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("10px monospace");
                ctx.fill_text("RAM", s.position.x, s.position.y + 3.0).ok();
            }
            Some(BuildingKind::Firewall) => {
                if s.is_active {
                    circle(ctx, s.position, snap.engagement_radius);
                    ctx.set_stroke_style_str("rgba(248,81,73,0.18)");
                    ctx.set_line_width(1.0);
                    ctx.stroke();
                }
                circle(ctx, s.position, SLOT_RADIUS);
                ctx.set_fill_style_str(if s.is_active { "#a80032" } else { "#4a1f2a" });
                ctx.fill();
                ctx.set_fill_style_str("#ffffff");
                ctx.set_font("10px monospace");
                ctx.fill_text("FW", s.position.x, s.position.y + 3.0).ok();
                if let Some(ends) = snap.cooldowns.get(s.id).copied().flatten() {
                    ctx.set_fill_style_str("#ffa657");
                    ctx.fill_text(
                        &format!("{:.1}s", ((ends - now) / 1000.0).max(0.0)),
                        s.position.x,
                        s.position.y + SLOT_RADIUS + 12.0,
                    )
                    .ok();
                }
            }
        }
    }

    // Beams
    for b in fx.beams() {
        let flicker = 0.55 + 0.45 * ((now - b.started_ms) / 60.0).sin().abs();
        ctx.set_stroke_style_str(&format!("rgba(0,234,255,{:.3})", flicker));
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(b.from.x, b.from.y);
        ctx.line_to(b.to.x, b.to.y);
        ctx.stroke();
    }

    // Viruses
    for v in &snap.viruses {
        circle(ctx, v.position, VIRUS_RADIUS);
        let fill = match v.state {
            VirusState::Alive => "#f85149",
            VirusState::BeingDestroyed { .. } => "#ffa657",
        };
        ctx.set_fill_style_str(fill);
        ctx.fill();
    }

    // Explosions
    for e in fx.explosions() {
        let p = Effects::explosion_progress(e, now);
        circle(ctx, e.position, VIRUS_RADIUS + 32.0 * p);
        ctx.set_fill_style_str(&format!("rgba(255,166,87,{:.3})", 1.0 - p));
        ctx.fill();
    }

    if snap.paused {
        ctx.set_fill_style_str("rgba(0,0,0,0.45)");
        ctx.fill_rect(0.0, 0.0, snap.field_width, snap.field_height);
        ctx.set_fill_style_str("#c9d1d9");
        ctx.set_font("28px sans-serif");
        ctx.fill_text("Paused", snap.field_width / 2.0, 60.0).ok();
    }
}

#[function_component(FieldView)]
pub fn field_view(props: &FieldViewProps) -> Html {
    let canvas_ref = use_node_ref();

    // Redraw whenever a new snapshot lands.
    {
        let canvas_ref = canvas_ref.clone();
        let snapshot = props.snapshot.clone();
        let session = props.session.clone();
        use_effect_with(props.version, move |_| {
            let ctx = canvas_ref
                .cast::<HtmlCanvasElement>()
                .and_then(|c| c.get_context("2d").ok().flatten())
                .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok());
            if let Some(ctx) = ctx {
                draw(&ctx, &snapshot, &session.effects());
            }
            || ()
        });
    }

    let onclick = {
        let canvas_ref = canvas_ref.clone();
        let snapshot = props.snapshot.clone();
        let on_pick = props.on_pick.clone();
        Callback::from(move |e: MouseEvent| {
            let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
                return;
            };
            // The canvas is drawn in field units and scaled by CSS.
            let sx = canvas.width() as f64 / (canvas.client_width().max(1) as f64);
            let sy = canvas.height() as f64 / (canvas.client_height().max(1) as f64);
            let p = Vec2::new(e.offset_x() as f64 * sx, e.offset_y() as f64 * sy);
            on_pick.emit(pick(&snapshot, p));
        })
    };

    html! {
        <canvas ref={canvas_ref}
            id="game-canvas"
            width={props.snapshot.field_width.to_string()}
            height={props.snapshot.field_height.to_string()}
            onclick={onclick}
            style="display:block; margin:0 auto; max-width:100%; max-height:calc(100vh - 48px); aspect-ratio:4 / 3; cursor:pointer;">
        </canvas>
    }
}
