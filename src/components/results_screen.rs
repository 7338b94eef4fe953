//! Results phase: score summary over the fully reconstructed artwork.

use std::rc::Rc;
use yew::prelude::*;

use crate::components::quiz_canvas::render_overlays;
use crate::model::{Artwork, SessionAction, SessionState};
use crate::util::format_elapsed;

#[derive(Properties, PartialEq, Clone)]
pub struct ResultsScreenProps {
    pub artwork: Rc<Artwork>,
    pub session: UseReducerHandle<SessionState>,
    /// Back to the gallery.
    pub on_continue: Callback<()>,
}

#[function_component(ResultsScreen)]
pub fn results_screen(props: &ResultsScreenProps) -> Html {
    let session = &props.session;
    let aspect = use_state(|| 1.0f64);
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
    let score = session.score_percentage(&props.artwork);
    let correct = session.correct_count(&props.artwork);
    let total = props.artwork.quiz_questions.len();
    let elapsed = format_elapsed(session.elapsed_secs());

    let headline = match score {
        90..=100 => "Masterful!",
        70..=89 => "A fine eye!",
        40..=69 => "A good start.",
        _ => "Worth another look.",
    };

    let replay = {
        let session = session.clone();
        Callback::from(move |_| {
            session.dispatch(SessionAction::Start {
                now_ms: js_sys::Date::now(),
            })
        })
    };
    let back = {
        let cb = props.on_continue.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let stat = |value: String, label: &str| {
        html! {
            <div style="text-align:center; min-width:90px;">
                <div style="color:#e6edf3; font-size:26px; font-weight:700;">{ value }</div>
                <div style="color:#8b949e; font-size:12px; text-transform:uppercase; letter-spacing:0.06em;">{ label.to_string() }</div>
            </div>
        }
    };

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:auto; background:#0e1116; display:flex; flex-direction:column; align-items:center; padding:28px 16px; box-sizing:border-box;">
            <h1 style="color:#e6edf3; font-size:26px; margin:0 0 2px 0;">{ headline }</h1>
            <div style="color:#8b949e; font-size:14px; margin-bottom:18px;">
                { format!("{} \u{2014} {}", props.artwork.title, props.artwork.artist) }
            </div>
            <div style="display:flex; gap:28px; margin-bottom:20px;">
                { stat(format!("{score}%"), "score") }
                { stat(format!("{correct}/{total}"), "correct") }
                { stat(elapsed, "time") }
            </div>
            <div style="position:relative; display:inline-block; line-height:0; margin-bottom:22px;">
                <img src={props.artwork.image_url.clone()} onload={on_base_load}
                    style="max-width:min(70vw, 680px); max-height:50vh; display:block; border-radius:6px;" />
                { render_overlays(&props.artwork, &session.overlays, *aspect) }
            </div>
            <div style="display:flex; gap:12px;">
                <button onclick={replay}
                    style="padding:10px 24px; background:#21262d; color:#c9d1d9; border:1px solid #30363d; border-radius:8px; font-size:14px; font-weight:600; cursor:pointer;">
                    {"Play Again"}
                </button>
                <button onclick={back}
                    style="padding:10px 24px; background:#238636; color:#fff; border:none; border-radius:8px; font-size:14px; font-weight:600; cursor:pointer;">
                    {"Back to Gallery"}
                </button>
            </div>
        </div>
    }
}
