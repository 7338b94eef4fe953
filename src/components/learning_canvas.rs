//! Exploration canvas for the learning phase: overview intro, pan/zoom
//! exploration, hotspot hit-testing and the hand-off to the quiz.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, TouchEvent};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::components::label_strip::LabelStrip;
use crate::components::loading_overlay::LoadingOverlay;
use crate::components::progress_bar::ProgressBar;
use crate::components::tooltip_panel::{choose_vertical_side, TooltipPanel};
use crate::config::CanvasTuning;
use crate::crop;
use crate::geometry::{self, Point, Size};
use crate::model::{Artwork, SessionAction, SessionState, ViewMode};
use crate::state::{TouchState, Viewport};
use crate::util::cwarn;

#[derive(Clone, PartialEq)]
enum ImageStatus {
    Loading,
    Ready,
    Failed(String),
}

/// Whether the completion hand-off should be scheduled. Fires only when
/// every hotspot is found, never for a zero-hotspot artwork, and never a
/// second time within the same level.
fn completion_due(found: usize, total: usize, already_fired: bool) -> bool {
    total > 0 && found == total && !already_fired
}

#[derive(Properties, PartialEq, Clone)]
pub struct LearningCanvasProps {
    pub artwork: Rc<Artwork>,
    pub session: UseReducerHandle<SessionState>,
    pub tuning: CanvasTuning,
    /// Fired once, after the completion delay, when every hotspot is found.
    pub on_complete: Callback<()>,
}

#[function_component(LearningCanvas)]
pub fn learning_canvas(props: &LearningCanvasProps) -> Html {
    let canvas_ref = use_node_ref();
    let viewport = use_mut_ref(Viewport::default);
    let touch_state = use_mut_ref(TouchState::default);
    let draw_ref = use_mut_ref(|| None::<Rc<dyn Fn()>>);
    let session_ref = use_mut_ref(|| props.session.clone());
    let image_cell = use_mut_ref(|| None::<HtmlImageElement>);
    let status = use_state(|| ImageStatus::Loading);
    let retry_nonce = use_state(|| 0u32);
    let completion_fired = use_mut_ref(|| false);
    let tuning = props.tuning;

    // Refresh the handle the listeners read from and repaint on every
    // accepted session action.
    {
        let session_ref = session_ref.clone();
        let session = props.session.clone();
        let draw_ref = draw_ref.clone();
        use_effect_with(props.session.revision, move |_| {
            *session_ref.borrow_mut() = session;
            if let Some(f) = &*draw_ref.borrow() {
                f();
            }
        });
    }

    // Artwork image preload; re-runs on manual retry.
    {
        let image_cell = image_cell.clone();
        let status = status.clone();
        let viewport = viewport.clone();
        let draw_ref = draw_ref.clone();
        let canvas_ref = canvas_ref.clone();
        let url = props.artwork.image_url.clone();
        use_effect_with(
            (props.artwork.image_url.clone(), *retry_nonce),
            move |_| {
                let alive = Rc::new(Cell::new(true));
                status.set(ImageStatus::Loading);
                {
                    let alive = alive.clone();
                    spawn_local(async move {
                        match crop::load_image(&url).await {
                            Ok(img) => {
                                if !alive.get() {
                                    return;
                                }
                                let natural = Size {
                                    width: img.natural_width() as f64,
                                    height: img.natural_height() as f64,
                                };
                                *image_cell.borrow_mut() = Some(img);
                                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                                    let canvas_size = Size {
                                        width: canvas.width() as f64,
                                        height: canvas.height() as f64,
                                    };
                                    viewport.borrow_mut().measure(
                                        canvas_size,
                                        natural,
                                        tuning.zoom_bias,
                                        tuning.pan_clamp_factor,
                                    );
                                }
                                status.set(ImageStatus::Ready);
                                if let Some(f) = &*draw_ref.borrow() {
                                    f();
                                }
                            }
                            Err(e) => {
                                if !alive.get() {
                                    return;
                                }
                                cwarn(&format!("artwork image load failed: {e}"));
                                status.set(ImageStatus::Failed(
                                    "Could not load the artwork image.".to_string(),
                                ));
                            }
                        }
                    });
                }
                move || alive.set(false)
            },
        );
    }

    // Canvas sizing, the draw closure and every DOM listener live in one
    // mount effect so the cleanup can tear them all down together.
    {
        let canvas_ref = canvas_ref.clone();
        let viewport_setup = viewport.clone();
        let touch_state_setup = touch_state.clone();
        let draw_ref_setup = draw_ref.clone();
        let session_ref_setup = session_ref.clone();
        let image_cell_setup = image_cell.clone();
        let artwork = props.artwork.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window().expect("window");
            let canvas: HtmlCanvasElement =
                canvas_ref.cast::<HtmlCanvasElement>().expect("canvas");
            let compute_and_apply_canvas_size = {
                let canvas = canvas.clone();
                let window = window.clone();
                let viewport = viewport_setup.clone();
                let image_cell = image_cell_setup.clone();
                move || {
                    let width = window
                        .inner_width()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(800.0);
                    let height = window
                        .inner_height()
                        .ok()
                        .and_then(|v| v.as_f64())
                        .unwrap_or(600.0);
                    canvas.set_width(width.max(0.0) as u32);
                    canvas.set_height(height.max(0.0) as u32);
                    if let Some(img) = &*image_cell.borrow() {
                        let natural = Size {
                            width: img.natural_width() as f64,
                            height: img.natural_height() as f64,
                        };
                        viewport.borrow_mut().measure(
                            Size { width, height },
                            natural,
                            tuning.zoom_bias,
                            tuning.pan_clamp_factor,
                        );
                    }
                }
            };
            compute_and_apply_canvas_size();

            // Draw closure
            let draw_closure: Rc<dyn Fn()> = {
                let canvas = canvas.clone();
                let viewport = viewport_setup.clone();
                let session_ref = session_ref_setup.clone();
                let image_cell = image_cell_setup.clone();
                let artwork = artwork.clone();
                Rc::new(move || {
                    if !canvas.is_connected() {
                        return;
                    }
                    let ctx = match canvas.get_context("2d").ok().flatten() {
                        Some(c) => match c.dyn_into::<CanvasRenderingContext2d>() {
                            Ok(c) => c,
                            Err(_) => return,
                        },
                        None => return,
                    };
                    let w = canvas.width() as f64;
                    let h = canvas.height() as f64;
                    ctx.set_fill_style_str("#0e1116");
                    ctx.fill_rect(0.0, 0.0, w, h);

                    let image_ref = image_cell.borrow();
                    let img = match &*image_ref {
                        Some(img) => img,
                        None => return,
                    };
                    let vp = viewport.borrow();
                    if !vp.ready() {
                        return;
                    }
                    let session = session_ref.borrow().clone();

                    if session.view_mode == ViewMode::Overview {
                        // Static fitted render behind the intro card.
                        let fw = vp.natural.width * vp.fit;
                        let fh = vp.natural.height * vp.fit;
                        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            img,
                            (w - fw) / 2.0,
                            (h - fh) / 2.0,
                            fw,
                            fh,
                        );
                        return;
                    }

                    let origin = vp.draw_origin();
                    let scaled = vp.scaled_size();
                    let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
                        img,
                        origin.x,
                        origin.y,
                        scaled.width,
                        scaled.height,
                    );

                    // Highlight rings over found hotspots.
                    for hotspot in &artwork.learning_points {
                        if !session.is_found(&hotspot.id) {
                            continue;
                        }
                        let center = vp.screen_from_percent(hotspot.highlight_circle.center());
                        let radius_px = hotspot.highlight_circle.radius / 100.0
                            * scaled.width
                            * (tuning.visual_radius_multiplier / 2.0);
                        ctx.begin_path();
                        ctx.set_stroke_style_str("#ffd33d");
                        ctx.set_line_width(3.0);
                        let _ = ctx.arc(
                            center.x,
                            center.y,
                            radius_px,
                            0.0,
                            std::f64::consts::TAU,
                        );
                        ctx.stroke();
                        ctx.begin_path();
                        ctx.set_stroke_style_str("rgba(255, 255, 255, 0.7)");
                        ctx.set_line_width(1.5);
                        let _ = ctx.arc(
                            center.x,
                            center.y,
                            radius_px * 0.82,
                            0.0,
                            std::f64::consts::TAU,
                        );
                        ctx.stroke();
                    }
                })
            };
            *draw_ref_setup.borrow_mut() = Some(draw_closure);
            if let Some(f) = &*draw_ref_setup.borrow() {
                f();
            }

            // Shared click resolution for mouse-up and touch-tap.
            let hit_test: Rc<dyn Fn(Point)> = {
                let viewport = viewport_setup.clone();
                let session_ref = session_ref_setup.clone();
                let artwork = artwork.clone();
                Rc::new(move |screen: Point| {
                    let pct = match viewport.borrow().percent_from_screen(screen) {
                        Some(p) => p,
                        None => return,
                    };
                    let handle = session_ref.borrow().clone();
                    for hotspot in &artwork.learning_points {
                        if handle.is_found(&hotspot.id) {
                            continue;
                        }
                        if hotspot.is_hit(pct, tuning.hit_radius_multiplier) {
                            handle.dispatch(SessionAction::MarkFound {
                                id: hotspot.id.clone(),
                            });
                            handle.dispatch(SessionAction::SetActiveTooltip(Some(
                                hotspot.id.clone(),
                            )));
                            break;
                        }
                    }
                })
            };

            // An open tooltip locks reading mode: no pan, zoom or new finds.
            let interaction_locked = {
                let session_ref = session_ref_setup.clone();
                move || {
                    let session = session_ref.borrow().clone();
                    session.view_mode != ViewMode::Exploration
                        || session.active_tooltip.is_some()
                }
            };

            let mousedown_cb = {
                let viewport = viewport_setup.clone();
                let locked = interaction_locked.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    if e.button() != 0 || locked() {
                        return;
                    }
                    viewport
                        .borrow_mut()
                        .begin_drag(e.offset_x() as f64, e.offset_y() as f64);
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mousemove_cb = {
                let viewport = viewport_setup.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: web_sys::MouseEvent| {
                    let mut vp = viewport.borrow_mut();
                    if !vp.dragging {
                        return;
                    }
                    vp.drag_to(
                        e.offset_x() as f64,
                        e.offset_y() as f64,
                        tuning.pan_clamp_factor,
                    );
                    drop(vp);
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let mouseup_cb = {
                let viewport = viewport_setup.clone();
                let hit_test = hit_test.clone();
                Closure::wrap(Box::new(move |_e: web_sys::MouseEvent| {
                    let mut vp = viewport.borrow_mut();
                    if !vp.dragging {
                        return;
                    }
                    let tap = vp
                        .is_click(tuning.click_drag_threshold_px)
                        .then(|| vp.drag_start());
                    vp.end_drag();
                    drop(vp);
                    if let Some(point) = tap {
                        hit_test(point);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
                .unwrap();

            let wheel_cb = {
                let viewport = viewport_setup.clone();
                let draw_ref = draw_ref_setup.clone();
                let locked = interaction_locked.clone();
                Closure::wrap(Box::new(move |e: web_sys::WheelEvent| {
                    if !tuning.wheel_zoom_enabled || locked() {
                        return;
                    }
                    e.prevent_default();
                    viewport.borrow_mut().zoom_around(
                        Point {
                            x: e.offset_x() as f64,
                            y: e.offset_y() as f64,
                        },
                        e.delta_y(),
                        tuning.min_zoom_factor,
                        tuning.max_zoom_factor,
                        tuning.pan_clamp_factor,
                    );
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
                .unwrap();

            let touch_start_cb = {
                let canvas_tc = canvas.clone();
                let viewport = viewport_setup.clone();
                let touch_state = touch_state_setup.clone();
                let locked = interaction_locked.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if locked() {
                        return;
                    }
                    let touches = e.touches();
                    let rect = canvas_tc.get_bounding_client_rect();
                    if touches.length() == 2 {
                        e.prevent_default();
                        let (t0, t1) = match (touches.item(0), touches.item(1)) {
                            (Some(a), Some(b)) => (a, b),
                            _ => return,
                        };
                        let p0 = Point {
                            x: t0.client_x() as f64 - rect.left(),
                            y: t0.client_y() as f64 - rect.top(),
                        };
                        let p1 = Point {
                            x: t1.client_x() as f64 - rect.left(),
                            y: t1.client_y() as f64 - rect.top(),
                        };
                        let mid = Point {
                            x: (p0.x + p1.x) / 2.0,
                            y: (p0.y + p1.y) / 2.0,
                        };
                        let mut vp = viewport.borrow_mut();
                        vp.end_drag();
                        let origin = vp.draw_origin();
                        let scale = vp.scale();
                        let mut ts = touch_state.borrow_mut();
                        ts.pinch = true;
                        ts.single_active = false;
                        ts.start_pinch_dist = geometry::euclidean_distance(p0, p1).max(1.0);
                        ts.start_zoom_factor = vp.zoom_factor;
                        ts.image_center_x = (mid.x - origin.x) / scale.max(1e-9);
                        ts.image_center_y = (mid.y - origin.y) / scale.max(1e-9);
                    } else if let Some(t0) = touches.item(0) {
                        let cx = t0.client_x() as f64 - rect.left();
                        let cy = t0.client_y() as f64 - rect.top();
                        let mut ts = touch_state.borrow_mut();
                        ts.single_active = true;
                        ts.pinch = false;
                        ts.last_touch_x = cx;
                        ts.last_touch_y = cy;
                        drop(ts);
                        viewport.borrow_mut().begin_drag(cx, cy);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_move_cb = {
                let canvas_tc = canvas.clone();
                let viewport = viewport_setup.clone();
                let touch_state = touch_state_setup.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    let touches = e.touches();
                    let rect = canvas_tc.get_bounding_client_rect();
                    let mut ts = touch_state.borrow_mut();
                    if ts.pinch && touches.length() >= 2 {
                        e.prevent_default();
                        let (t0, t1) = match (touches.item(0), touches.item(1)) {
                            (Some(a), Some(b)) => (a, b),
                            _ => return,
                        };
                        let p0 = Point {
                            x: t0.client_x() as f64 - rect.left(),
                            y: t0.client_y() as f64 - rect.top(),
                        };
                        let p1 = Point {
                            x: t1.client_x() as f64 - rect.left(),
                            y: t1.client_y() as f64 - rect.top(),
                        };
                        let mid = Point {
                            x: (p0.x + p1.x) / 2.0,
                            y: (p0.y + p1.y) / 2.0,
                        };
                        let ratio =
                            geometry::euclidean_distance(p0, p1) / ts.start_pinch_dist;
                        viewport.borrow_mut().pinch_to(
                            mid,
                            ts.image_center_x,
                            ts.image_center_y,
                            ts.start_zoom_factor,
                            ratio,
                            tuning.min_zoom_factor,
                            tuning.max_zoom_factor,
                            tuning.pan_clamp_factor,
                        );
                    } else if ts.single_active {
                        if let Some(t0) = touches.item(0) {
                            e.prevent_default();
                            let cx = t0.client_x() as f64 - rect.left();
                            let cy = t0.client_y() as f64 - rect.top();
                            ts.last_touch_x = cx;
                            ts.last_touch_y = cy;
                            viewport
                                .borrow_mut()
                                .drag_to(cx, cy, tuning.pan_clamp_factor);
                        }
                    } else {
                        return;
                    }
                    drop(ts);
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let touch_end_cb = {
                let viewport = viewport_setup.clone();
                let touch_state = touch_state_setup.clone();
                let hit_test = hit_test.clone();
                Closure::wrap(Box::new(move |e: TouchEvent| {
                    if e.touches().length() != 0 {
                        return;
                    }
                    let mut ts = touch_state.borrow_mut();
                    let was_single = ts.single_active;
                    ts.single_active = false;
                    ts.pinch = false;
                    drop(ts);
                    let mut vp = viewport.borrow_mut();
                    if !vp.dragging {
                        return;
                    }
                    let tap = (was_single && vp.is_click(tuning.click_drag_threshold_px))
                        .then(|| vp.drag_start());
                    vp.end_drag();
                    drop(vp);
                    if let Some(point) = tap {
                        hit_test(point);
                    }
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();
            canvas
                .add_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                )
                .ok();

            let contextmenu_cb = {
                Closure::wrap(Box::new(move |e: web_sys::Event| {
                    e.prevent_default();
                }) as Box<dyn FnMut(_)>)
            };
            canvas
                .add_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                )
                .unwrap();

            let resize_cb = {
                let compute_and_apply_canvas_size = compute_and_apply_canvas_size.clone();
                let draw_ref = draw_ref_setup.clone();
                Closure::wrap(Box::new(move |_e: web_sys::Event| {
                    compute_and_apply_canvas_size();
                    if let Some(f) = &*draw_ref.borrow() {
                        f();
                    }
                }) as Box<dyn FnMut(_)>)
            };
            window
                .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
                .unwrap();

            // Cleanup
            let window_clone = window.clone();
            move || {
                let _ = canvas.remove_event_listener_with_callback(
                    "mousedown",
                    mousedown_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "mousemove",
                    mousemove_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "mouseup",
                    mouseup_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "wheel",
                    wheel_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchstart",
                    touch_start_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchmove",
                    touch_move_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchend",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "touchcancel",
                    touch_end_cb.as_ref().unchecked_ref(),
                );
                let _ = canvas.remove_event_listener_with_callback(
                    "contextmenu",
                    contextmenu_cb.as_ref().unchecked_ref(),
                );
                let _ = window_clone.remove_event_listener_with_callback(
                    "resize",
                    resize_cb.as_ref().unchecked_ref(),
                );
                let _keep_alive = (
                    &mousedown_cb,
                    &mousemove_cb,
                    &mouseup_cb,
                    &wheel_cb,
                    &touch_start_cb,
                    &touch_move_cb,
                    &touch_end_cb,
                    &contextmenu_cb,
                    &resize_cb,
                );
            }
        });
    }

    // Completion hand-off after the last find, once per level.
    {
        let found = props.session.found_hotspots.len();
        let total = props.artwork.learning_points.len();
        let on_complete = props.on_complete.clone();
        let fired = completion_fired.clone();
        let delay = tuning.completion_delay_ms;
        use_effect_with((found, total), move |&(found, total)| {
            let mut timer_id = None;
            if completion_due(found, total, *fired.borrow()) {
                *fired.borrow_mut() = true;
                if let Some(window) = web_sys::window() {
                    let cb = Closure::once_into_js(move || on_complete.emit(()));
                    timer_id = window
                        .set_timeout_with_callback_and_timeout_and_arguments_0(
                            cb.unchecked_ref(),
                            delay as i32,
                        )
                        .ok();
                }
            }
            move || {
                if let (Some(window), Some(id)) = (web_sys::window(), timer_id) {
                    window.clear_timeout_with_handle(id);
                }
            }
        });
    }

    let session = &props.session;
    let total = props.artwork.learning_points.len();
    let found = session.found_hotspots.len();
    let ready = *status == ImageStatus::Ready;
    let exploring = session.view_mode == ViewMode::Exploration;

    let retry = {
        let retry_nonce = retry_nonce.clone();
        Callback::from(move |_| retry_nonce.set(*retry_nonce + 1))
    };

    let intro = if ready && !exploring {
        let enter = {
            let session = session.clone();
            Callback::from(move |_| session.dispatch(SessionAction::EnterExploration))
        };
        html! {
            <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(14,17,22,0.55); z-index:45;">
                <div style="background:#161b22; border:1px solid #30363d; border-radius:14px; padding:28px 32px; max-width:420px; text-align:center; box-shadow:0 12px 32px rgba(0,0,0,0.6);">
                    <h2 style="margin:0 0 4px 0; color:#e6edf3; font-size:22px;">{ props.artwork.title.clone() }</h2>
                    <div style="color:#8b949e; font-size:14px; margin-bottom:14px;">
                        { format!("{}, {}", props.artwork.artist, props.artwork.era) }
                    </div>
                    <p style="color:#c9d1d9; font-size:14px; line-height:1.5; margin:0 0 18px 0;">
                        { format!("This painting hides {total} details worth a closer look. Pan and zoom to find them all.") }
                    </p>
                    <button onclick={enter}
                        style="padding:10px 26px; background:#238636; color:#fff; border:none; border-radius:8px; font-size:15px; font-weight:600; cursor:pointer;">
                        {"Start Exploring"}
                    </button>
                </div>
            </div>
        }
    } else {
        html! {}
    };

    let tooltip = if exploring && ready {
        session
            .active_tooltip
            .as_ref()
            .and_then(|id| props.artwork.hotspot(id))
            .map(|hotspot| {
                let vp = viewport.borrow();
                let anchor = vp.screen_from_percent(hotspot.highlight_circle.center());
                let canvas_h = vp.canvas.height.max(1.0);
                let side = choose_vertical_side(hotspot.tooltip.position, anchor.y / canvas_h);
                let dismiss = {
                    let session = session.clone();
                    Callback::from(move |_| {
                        session.dispatch(SessionAction::SetActiveTooltip(None))
                    })
                };
                html! {
                    <TooltipPanel
                        text={hotspot.tooltip.text.clone()}
                        anchor_x={anchor.x}
                        anchor_y={anchor.y}
                        side={side}
                        on_dismiss={dismiss}
                    />
                }
            })
            .unwrap_or_default()
    } else {
        html! {}
    };

    let remaining: Vec<String> = props
        .artwork
        .learning_points
        .iter()
        .filter(|h| !session.is_found(&h.id))
        .map(|h| h.label.clone())
        .collect();

    let (loading, error) = match &*status {
        ImageStatus::Loading => (true, None),
        ImageStatus::Ready => (false, None),
        ImageStatus::Failed(msg) => (false, Some(msg.clone())),
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116;">
            <canvas ref={canvas_ref}
                style="display:block; width:100%; height:100%; touch-action:none; cursor:grab;" />
            <LoadingOverlay loading={loading} error={error} on_retry={retry} />
            { intro }
            if exploring && ready {
                <>
                    <ProgressBar found={found} total={total} />
                    <LabelStrip labels={remaining} />
                </>
            }
            { tooltip }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completion_fires_exactly_on_the_last_find() {
        assert!(!completion_due(2, 3, false));
        assert!(completion_due(3, 3, false));
    }

    #[test]
    fn completion_never_refires() {
        assert!(!completion_due(3, 3, true));
    }

    #[test]
    fn completion_skips_zero_hotspot_artwork() {
        assert!(!completion_due(0, 0, false));
    }
}
