use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LabelStripProps {
    /// Labels of hotspots still to be found.
    pub labels: Vec<String>,
}

#[function_component(LabelStrip)]
pub fn label_strip(props: &LabelStripProps) -> Html {
    if props.labels.is_empty() {
        return html! {};
    }
    html! {
        <div style="position:absolute; left:0; right:0; bottom:0; background:rgba(22,27,34,0.92); border-top:1px solid #30363d; padding:12px 16px 20px 16px; display:flex; gap:8px; justify-content:center; flex-wrap:wrap; z-index:40;">
            { for props.labels.iter().map(|label| html! {
                <span style="padding:6px 14px; background:#21262d; color:#c9d1d9; font-size:13px; font-weight:600; border:1px solid #30363d; border-radius:999px;">
                    { label.clone() }
                </span>
            }) }
        </div>
    }
}
