//! Gallery shell: level selection, per-level phase routing and the
//! completed-levels record in localStorage.

use std::rc::Rc;
use yew::prelude::*;

use super::learning_canvas::LearningCanvas;
use super::quiz_canvas::QuizCanvas;
use super::results_screen::ResultsScreen;
use crate::config::CanvasTuning;
use crate::data;
use crate::model::{Artwork, GamePhase, SessionAction, SessionState};
use crate::util::clog;

const COMPLETED_KEY: &str = "ms_completed_levels";

fn load_completed() -> Vec<String> {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            if let Ok(Some(raw)) = store.get_item(COMPLETED_KEY) {
                if let Ok(ids) = serde_json::from_str(&raw) {
                    return ids;
                }
            }
        }
    }
    Vec::new()
}

#[function_component(App)]
pub fn app() -> Html {
    let tuning = CanvasTuning::default();
    let artworks = use_state(|| {
        let mut rng = js_sys::Math::random;
        data::builtin_artworks()
            .into_iter()
            .map(|a| Rc::new(data::ensure_quiz(a, &CanvasTuning::default(), &mut rng)))
            .collect::<Vec<_>>()
    });
    let selected = use_state(|| None::<String>);
    let session = use_reducer(SessionState::default);
    let completed = use_state(load_completed);

    // Persist the completion record.
    {
        let completed = completed.clone();
        use_effect_with((*completed).clone(), move |_| {
            if let Some(win) = web_sys::window() {
                if let Ok(Some(store)) = win.local_storage() {
                    if let Ok(s) = serde_json::to_string(&*completed) {
                        let _ = store.set_item(COMPLETED_KEY, &s);
                    }
                }
            }
            || ()
        });
    }

    let play = {
        let selected = selected.clone();
        let session = session.clone();
        Callback::from(move |id: String| {
            session.dispatch(SessionAction::Start {
                now_ms: js_sys::Date::now(),
            });
            selected.set(Some(id));
        })
    };
    let exit = {
        let selected = selected.clone();
        let session = session.clone();
        Callback::from(move |_: ()| {
            session.dispatch(SessionAction::Reset);
            selected.set(None);
        })
    };
    let mark_completed = {
        let completed = completed.clone();
        Callback::from(move |id: String| {
            if !completed.contains(&id) {
                clog(&format!("level complete: {id}"));
                let mut ids = (*completed).clone();
                ids.push(id);
                completed.set(ids);
            }
        })
    };

    let current: Option<Rc<Artwork>> = selected
        .as_ref()
        .and_then(|id| artworks.iter().find(|a| &a.id == id).cloned());

    let content = match current {
        None => gallery(&artworks, &completed, &play),
        Some(artwork) => {
            let exit_button = {
                let exit = exit.clone();
                html! {
                    <button onclick={Callback::from(move |_| exit.emit(()))}
                        style="position:absolute; top:12px; right:12px; z-index:70; padding:7px 14px; background:rgba(22,27,34,0.9); color:#c9d1d9; border:1px solid #30363d; border-radius:8px; font-size:13px; cursor:pointer;">
                        {"\u{2190} Gallery"}
                    </button>
                }
            };
            let view = match session.phase {
                GamePhase::Learning => {
                    let on_learning_done = {
                        let session = session.clone();
                        let mark_completed = mark_completed.clone();
                        let artwork = artwork.clone();
                        Callback::from(move |_| {
                            if artwork.quiz_questions.is_empty() {
                                // Nothing to quiz on; the level ends here.
                                session.dispatch(SessionAction::FinishQuiz {
                                    now_ms: js_sys::Date::now(),
                                });
                                mark_completed.emit(artwork.id.clone());
                            } else {
                                session.dispatch(SessionAction::BeginQuiz);
                            }
                        })
                    };
                    html! {
                        <LearningCanvas
                            artwork={artwork.clone()}
                            session={session.clone()}
                            tuning={tuning}
                            on_complete={on_learning_done}
                        />
                    }
                }
                GamePhase::Quiz => {
                    let on_quiz_done = {
                        let mark_completed = mark_completed.clone();
                        let id = artwork.id.clone();
                        Callback::from(move |_| mark_completed.emit(id.clone()))
                    };
                    html! {
                        <QuizCanvas
                            artwork={artwork.clone()}
                            session={session.clone()}
                            tuning={tuning}
                            on_complete={on_quiz_done}
                        />
                    }
                }
                GamePhase::Results => html! {
                    <ResultsScreen
                        artwork={artwork.clone()}
                        session={session.clone()}
                        on_continue={exit.clone()}
                    />
                },
            };
            html! {
                <div style="position:relative;">
                    { view }
                    if session.phase != GamePhase::Results {
                        { exit_button }
                    }
                </div>
            }
        }
    };

    html! {
        <>
            <style>
                {"@keyframes spin { to { transform: rotate(360deg); } } \
                  @keyframes pulse { 0%, 100% { opacity: 1; } 50% { opacity: 0.45; } } \
                  body { margin: 0; background: #0e1116; font-family: 'Segoe UI', system-ui, sans-serif; }"}
            </style>
            { content }
        </>
    }
}

fn gallery(
    artworks: &[Rc<Artwork>],
    completed: &[String],
    play: &Callback<String>,
) -> Html {
    if artworks.is_empty() {
        return html! {
            <div style="min-height:100vh; display:flex; align-items:center; justify-content:center; color:#8b949e; font-size:15px;">
                {"No artworks available."}
            </div>
        };
    }
    html! {
        <div style="min-height:100vh; padding:36px 20px; box-sizing:border-box; display:flex; flex-direction:column; align-items:center;">
            <h1 style="color:#e6edf3; font-size:30px; margin:0 0 4px 0;">{"Masterstrokes"}</h1>
            <p style="color:#8b949e; font-size:15px; margin:0 0 28px 0;">
                {"Explore great paintings up close, then test your eye."}
            </p>
            <div style="display:grid; grid-template-columns:repeat(auto-fit, minmax(240px, 280px)); gap:18px; justify-content:center; width:100%; max-width:960px;">
                { for artworks.iter().map(|artwork| {
                    let done = completed.contains(&artwork.id);
                    let onclick = {
                        let play = play.clone();
                        let id = artwork.id.clone();
                        Callback::from(move |_| play.emit(id.clone()))
                    };
                    html! {
                        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; overflow:hidden; display:flex; flex-direction:column;">
                            <img src={artwork.image_url.clone()}
                                style="width:100%; height:160px; object-fit:cover; display:block;" />
                            <div style="padding:14px 16px; display:flex; flex-direction:column; gap:4px;">
                                <div style="display:flex; align-items:center; gap:8px;">
                                    <span style="color:#e6edf3; font-size:16px; font-weight:600;">{ artwork.title.clone() }</span>
                                    if done {
                                        <span style="color:#2ea043; font-size:14px;">{"\u{2713}"}</span>
                                    }
                                </div>
                                <span style="color:#8b949e; font-size:13px;">
                                    { format!("{}, {}", artwork.artist, artwork.era) }
                                </span>
                                <span style="color:#6e7681; font-size:12px;">
                                    { format!("{} details to find", artwork.learning_points.len()) }
                                </span>
                                <button {onclick}
                                    style="margin-top:10px; padding:8px 0; background:#238636; color:#fff; border:none; border-radius:8px; font-size:14px; font-weight:600; cursor:pointer;">
                                    { if done { "Play Again" } else { "Play" } }
                                </button>
                            </div>
                        </div>
                    }
                }) }
            </div>
        </div>
    }
}
