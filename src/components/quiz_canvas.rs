//! Quiz phase: the masked artwork with answer overlays, plus a four-option
//! grid whose tiles are rasterized crops of the painting.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::CanvasTuning;
use crate::crop;
use crate::model::{
    Artwork, CropSpec, OptionSource, OverlayRecord, SessionAction, SessionState,
};
use crate::util::cwarn;

/// Inline style that shows the region a [`CropSpec`] describes by scaling the
/// full artwork as a background image. Used for committed answer overlays,
/// where re-rasterizing the crop would be wasted work. `aspect` is the
/// artwork's natural width/height ratio: the crop square's side derives from
/// the natural width on both axes, so the vertical background scale shrinks
/// by the aspect ratio to frame the same region the rasterized tile shows.
pub fn crop_background_style(image_url: &str, spec: &CropSpec, aspect: f64) -> String {
    let zoom = if spec.zoom > 0.0 { spec.zoom } else { 100.0 };
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    let zoom_y = zoom / aspect;
    // Solve background-position so the focal point sits at the tile
    // center: P = (5000 - focal * size) / (100 - size).
    let position = |focal: f64, size: f64| {
        if (size - 100.0).abs() < 1e-9 {
            50.0
        } else {
            (5000.0 - focal * size) / (100.0 - size)
        }
    };
    let px = position(spec.x, zoom);
    let py = position(spec.y, zoom_y);
    format!(
        "background-image:url('{image_url}'); background-size:{zoom:.2}% {zoom_y:.2}%; background-position:{px:.2}% {py:.2}%; background-repeat:no-repeat;"
    )
}

/// Replay of committed answers over the artwork. Shared with the results
/// screen, which shows the same reconstruction. `aspect` is the artwork's
/// natural width/height ratio as reported by the loaded base image.
pub fn render_overlays(artwork: &Artwork, overlays: &[OverlayRecord], aspect: f64) -> Html {
    html! {
        <>
        { for overlays.iter().map(|overlay| {
            let r = overlay.position;
            let base = format!(
                "position:absolute; left:{:.2}%; top:{:.2}%; width:{:.2}%; height:{:.2}%; overflow:hidden; border-radius:50%;",
                r.x, r.y, r.width, r.height
            );
            match &overlay.source {
                OptionSource::Static { image_url } => html! {
                    <div style={base}>
                        <img src={image_url.clone()}
                            style="width:100%; height:100%; object-fit:cover;" />
                    </div>
                },
                OptionSource::Crop(spec) => {
                    let bg = crop_background_style(&artwork.image_url, spec, aspect);
                    html! { <div style={format!("{base} {bg}")}></div> }
                }
            }
        }) }
        </>
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct QuizCanvasProps {
    pub artwork: Rc<Artwork>,
    pub session: UseReducerHandle<SessionState>,
    pub tuning: CanvasTuning,
    /// Fired after the last answer's advance delay.
    pub on_complete: Callback<()>,
}

#[function_component(QuizCanvas)]
pub fn quiz_canvas(props: &QuizCanvasProps) -> Html {
    // option id -> rasterized crop data URI, for the current question only.
    let crops = use_mut_ref(HashMap::<String, String>::new);
    let failed = use_mut_ref(HashSet::<String>::new);
    // Bumped when an async crop lands so the grid re-renders.
    let crops_version = use_state(|| 0u32);
    let version_counter = use_mut_ref(|| 0u32);
    // Invalidates crop tasks started for a previous question.
    let generation = use_mut_ref(|| 0u64);
    let selected = use_state(|| None::<String>);
    let advance_timer = use_mut_ref(|| None::<i32>);
    // Natural width/height ratio of the base image, for overlay framing.
    let aspect = use_state(|| 1.0f64);
    let tuning = props.tuning;

    // Kick off crop rasterization whenever the question changes. Identical
    // crop requests within one question share a single task.
    {
        let crops = crops.clone();
        let failed = failed.clone();
        let crops_version = crops_version.clone();
        let version_counter = version_counter.clone();
        let generation = generation.clone();
        let selected = selected.clone();
        let artwork = props.artwork.clone();
        let index = props.session.current_question_index;
        use_effect_with((props.artwork.id.clone(), index), move |_| {
            let generation_guard = generation.clone();
            let current_gen = {
                let mut g = generation.borrow_mut();
                *g += 1;
                *g
            };
            crops.borrow_mut().clear();
            failed.borrow_mut().clear();
            selected.set(None);

            if let Some(question) = artwork.quiz_questions.get(index) {
                let mut by_key: HashMap<String, (CropSpec, Vec<String>)> = HashMap::new();
                for option in &question.options {
                    if let OptionSource::Crop(spec) = &option.source {
                        by_key
                            .entry(crop::crop_key(&artwork.image_url, spec))
                            .or_insert_with(|| (*spec, Vec::new()))
                            .1
                            .push(option.id.clone());
                    }
                }
                for (spec, ids) in by_key.into_values() {
                    let crops = crops.clone();
                    let failed = failed.clone();
                    let crops_version = crops_version.clone();
                    let version_counter = version_counter.clone();
                    let generation = generation.clone();
                    let url = artwork.image_url.clone();
                    spawn_local(async move {
                        let result =
                            crop::crop_image(&url, spec, tuning.crop_output_px).await;
                        if *generation.borrow() != current_gen {
                            return;
                        }
                        match result {
                            Ok(uri) => {
                                let mut map = crops.borrow_mut();
                                for id in &ids {
                                    map.insert(id.clone(), uri.clone());
                                }
                            }
                            Err(e) => {
                                cwarn(&format!("option crop failed: {e}"));
                                let mut set = failed.borrow_mut();
                                for id in &ids {
                                    set.insert(id.clone());
                                }
                            }
                        }
                        let next = {
                            let mut c = version_counter.borrow_mut();
                            *c = c.wrapping_add(1);
                            *c
                        };
                        crops_version.set(next);
                    });
                }
            }
            move || {
                *generation_guard.borrow_mut() += 1;
            }
        });
    }

    // Clear a pending advance timer on unmount.
    {
        let advance_timer = advance_timer.clone();
        use_effect_with((), move |_| {
            move || {
                if let (Some(window), Some(id)) =
                    (web_sys::window(), advance_timer.borrow_mut().take())
                {
                    window.clear_timeout_with_handle(id);
                }
            }
        });
    }

    let questions = &props.artwork.quiz_questions;
    let index = props.session.current_question_index;
    let question = match questions.get(index) {
        Some(q) => q,
        None => return html! {},
    };

    let on_pick = {
        let session = props.session.clone();
        let selected = selected.clone();
        let advance_timer = advance_timer.clone();
        let on_complete = props.on_complete.clone();
        let artwork = props.artwork.clone();
        Callback::from(move |option_id: String| {
            if selected.is_some() {
                return;
            }
            let index = session.current_question_index;
            let question = match artwork.quiz_questions.get(index) {
                Some(q) => q,
                None => return,
            };
            let option = match question.option(&option_id) {
                Some(o) => o,
                None => return,
            };
            selected.set(Some(option_id.clone()));
            session.dispatch(SessionAction::SubmitAnswer {
                question_id: question.id.clone(),
                option_id,
                source: option.source.clone(),
                position: question.overlay_position,
            });

            let last = index + 1 >= artwork.quiz_questions.len();
            let session = session.clone();
            let selected = selected.clone();
            let on_complete = on_complete.clone();
            let cb = Closure::once_into_js(move || {
                if last {
                    session.dispatch(SessionAction::FinishQuiz {
                        now_ms: js_sys::Date::now(),
                    });
                    on_complete.emit(());
                } else {
                    session.dispatch(SessionAction::NextQuestion);
                    selected.set(None);
                }
            });
            if let Some(window) = web_sys::window() {
                if let Ok(id) = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                    cb.unchecked_ref(),
                    tuning.advance_delay_ms as i32,
                ) {
                    *advance_timer.borrow_mut() = Some(id);
                }
            }
        })
    };

    let on_base_load = {
        let aspect = aspect.clone();
        Callback::from(move |e: Event| {
            if let Some(img) = e.target_dyn_into::<web_sys::HtmlImageElement>() {
                let (w, h) = (img.natural_width() as f64, img.natural_height() as f64);
                if w > 0.0 && h > 0.0 {
                    aspect.set(w / h);
                }
            }
        })
    };

    // Masks for every question, fading once answered.
    let masks = questions.iter().map(|q| {
        let c = q.white_circle;
        let opacity = if props.session.is_answered(&q.id) { 0.0 } else { 1.0 };
        html! {
            <div style={format!(
                "position:absolute; left:{:.2}%; top:{:.2}%; width:{:.2}%; aspect-ratio:1/1; transform:translate(-50%, -50%); border-radius:50%; background:#fff; opacity:{opacity}; transition:opacity 0.6s ease; pointer-events:none;",
                c.x, c.y, c.radius * 2.0
            )}></div>
        }
    });

    let crops_map = crops.borrow();
    let failed_set = failed.borrow();
    let options = question.options.iter().map(|option| {
        let picked = selected.as_deref() == Some(option.id.as_str());
        let reveal = selected.is_some();
        let border = if reveal && option.is_correct {
            "3px solid #2ea043"
        } else if picked {
            "3px solid #f85149"
        } else {
            "3px solid #30363d"
        };
        let opacity = if reveal && !picked && !option.is_correct { 0.55 } else { 1.0 };
        let filter = option
            .filter
            .as_deref()
            .map(|f| format!("filter:{f};"))
            .unwrap_or_default();
        let tile = match &option.source {
            OptionSource::Static { image_url } => html! {
                <img src={image_url.clone()}
                    style={format!("width:100%; height:100%; object-fit:cover; display:block; {filter}")} />
            },
            OptionSource::Crop(_) => {
                if let Some(uri) = crops_map.get(&option.id) {
                    html! {
                        <img src={uri.clone()}
                            style={format!("width:100%; height:100%; object-fit:cover; display:block; {filter}")} />
                    }
                } else if failed_set.contains(&option.id) {
                    html! {
                        <div style="width:100%; height:100%; display:flex; align-items:center; justify-content:center; background:#21262d; color:#8b949e; font-size:13px;">
                            {"unavailable"}
                        </div>
                    }
                } else {
                    html! {
                        <div style="width:100%; height:100%; background:#21262d; animation:pulse 1.2s ease-in-out infinite;"></div>
                    }
                }
            }
        };
        let onclick = {
            let on_pick = on_pick.clone();
            let id = option.id.clone();
            Callback::from(move |_| on_pick.emit(id.clone()))
        };
        html! {
            <button {onclick} disabled={reveal}
                style={format!("width:140px; height:140px; padding:0; overflow:hidden; border-radius:10px; border:{border}; background:#161b22; cursor:pointer; opacity:{opacity}; transition:opacity 0.3s ease;")}>
                { tile }
            </button>
        }
    });

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:auto; background:#0e1116; display:flex; flex-direction:column; align-items:center; padding:24px 16px; box-sizing:border-box;">
            <div style="color:#8b949e; font-size:13px; margin-bottom:4px;">
                { format!("Question {} of {}", index + 1, questions.len()) }
            </div>
            <h2 style="color:#e6edf3; font-size:19px; margin:0 0 16px 0; text-align:center; max-width:640px;">
                { question.question_text.clone() }
            </h2>
            <div style="position:relative; display:inline-block; line-height:0;">
                <img src={props.artwork.image_url.clone()} onload={on_base_load}
                    style="max-width:min(70vw, 680px); max-height:52vh; display:block;" />
                { for masks }
                { render_overlays(&props.artwork, &props.session.overlays, *aspect) }
            </div>
            <div style="display:grid; grid-template-columns:repeat(2, 140px); gap:14px; margin-top:20px;">
                { for options }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crop_background_centers_the_focal_point() {
        let spec = CropSpec { x: 50.0, y: 50.0, zoom: 300.0 };
        let style = crop_background_style("/a.jpg", &spec, 1.0);
        assert!(style.contains("background-size:300.00% 300.00%"));
        assert!(style.contains("background-position:50.00% 50.00%"));
    }

    #[test]
    fn crop_background_off_center_focal_point() {
        // P = (5000 - 30*300) / (100 - 300) = 20.
        let spec = CropSpec { x: 30.0, y: 70.0, zoom: 300.0 };
        let style = crop_background_style("/a.jpg", &spec, 1.0);
        assert!(style.contains("background-position:20.00% 80.00%"));
    }

    #[test]
    fn crop_background_zoom_100_degenerates_to_center() {
        let spec = CropSpec { x: 10.0, y: 90.0, zoom: 100.0 };
        let style = crop_background_style("/a.jpg", &spec, 1.0);
        assert!(style.contains("background-position:50.00% 50.00%"));
    }

    #[test]
    fn crop_background_vertical_scale_follows_aspect_ratio() {
        // 2:1 artwork: the crop square covers twice the height fraction it
        // covers of the width, so the vertical scale halves.
        let spec = CropSpec { x: 50.0, y: 70.0, zoom: 300.0 };
        let style = crop_background_style("/a.jpg", &spec, 2.0);
        assert!(style.contains("background-size:300.00% 150.00%"));
        // P_y = (5000 - 70*150) / (100 - 150) = 110.
        assert!(style.contains("background-position:50.00% 110.00%"));
    }

    #[test]
    fn crop_background_degenerate_aspect_falls_back_to_square() {
        let spec = CropSpec { x: 50.0, y: 50.0, zoom: 300.0 };
        assert_eq!(
            crop_background_style("/a.jpg", &spec, 0.0),
            crop_background_style("/a.jpg", &spec, 1.0)
        );
    }
}
