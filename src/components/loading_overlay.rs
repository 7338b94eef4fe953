use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LoadingOverlayProps {
    pub loading: bool,
    /// Load failure message; shown with a manual retry.
    pub error: Option<String>,
    pub on_retry: Callback<()>,
}

#[function_component(LoadingOverlay)]
pub fn loading_overlay(props: &LoadingOverlayProps) -> Html {
    if let Some(message) = &props.error {
        let retry = {
            let cb = props.on_retry.clone();
            Callback::from(move |_| cb.emit(()))
        };
        return html! {
            <div style="position:absolute; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; gap:12px; background:#0e1116; z-index:50;">
                <div style="color:#f85149; font-size:15px;">{ message.clone() }</div>
                <button onclick={retry}>{"Retry"}</button>
            </div>
        };
    }
    if !props.loading {
        return html! {};
    }
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:#0e1116; z-index:50;">
            <div style="width:48px; height:48px; border:4px solid #30363d; border-top-color:#58a6ff; border-radius:50%; animation:spin 1s linear infinite;"></div>
        </div>
    }
}
