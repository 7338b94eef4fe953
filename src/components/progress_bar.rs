use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressBarProps {
    pub found: usize,
    pub total: usize,
}

#[function_component(ProgressBar)]
pub fn progress_bar(props: &ProgressBarProps) -> Html {
    let pct = if props.total > 0 {
        props.found as f64 / props.total as f64 * 100.0
    } else {
        0.0
    };
    html! {
        <div style="position:absolute; top:12px; left:12px; right:12px; height:10px; background:rgba(22,27,34,0.85); border:1px solid #30363d; border-radius:6px; overflow:hidden; pointer-events:none; z-index:40;">
            <div style={format!("height:100%; width:{pct:.1}%; background:linear-gradient(90deg, #388bfd, #58a6ff); transition:width 0.4s ease;")}></div>
        </div>
    }
}
