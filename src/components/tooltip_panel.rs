use yew::prelude::*;

use crate::model::TooltipPosition;

/// Resolve the authored tooltip side against where the anchor actually sits
/// on screen. `anchor_frac` is the anchor's vertical position as a fraction
/// of the canvas height. Anchors near the edges force the side that keeps
/// the panel on screen; otherwise the authored side wins, with left/right
/// preferences falling back to whichever half has room.
pub fn choose_vertical_side(preferred: TooltipPosition, anchor_frac: f64) -> TooltipPosition {
    if anchor_frac < 0.10 {
        return TooltipPosition::Bottom;
    }
    if anchor_frac > 0.85 {
        return TooltipPosition::Top;
    }
    match preferred {
        TooltipPosition::Top => TooltipPosition::Top,
        TooltipPosition::Bottom => TooltipPosition::Bottom,
        TooltipPosition::Left | TooltipPosition::Right => {
            if anchor_frac <= 0.5 {
                TooltipPosition::Bottom
            } else {
                TooltipPosition::Top
            }
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TooltipPanelProps {
    pub text: String,
    /// Anchor point in canvas pixels.
    pub anchor_x: f64,
    pub anchor_y: f64,
    pub side: TooltipPosition,
    pub on_dismiss: Callback<()>,
}

#[function_component(TooltipPanel)]
pub fn tooltip_panel(props: &TooltipPanelProps) -> Html {
    let dismiss = {
        let cb = props.on_dismiss.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let placement = match props.side {
        TooltipPosition::Top => format!(
            "left:{:.0}px; top:{:.0}px; transform:translate(-50%, calc(-100% - 18px));",
            props.anchor_x, props.anchor_y
        ),
        _ => format!(
            "left:{:.0}px; top:{:.0}px; transform:translate(-50%, 18px);",
            props.anchor_x, props.anchor_y
        ),
    };
    html! {
        <div style={format!("position:absolute; {placement} max-width:320px; min-width:220px; background:#161b22; border:1px solid #388bfd; border-radius:10px; padding:14px 16px; box-shadow:0 8px 24px rgba(0,0,0,0.5); z-index:60;")}>
            <div style="color:#c9d1d9; font-size:14px; line-height:1.5; margin-bottom:12px;">
                { props.text.clone() }
            </div>
            <button onclick={dismiss}
                style="display:block; margin-left:auto; width:34px; height:34px; border-radius:50%; border:none; background:#238636; color:#fff; font-size:16px; cursor:pointer;">
                {"\u{2713}"}
            </button>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_override_authored_side() {
        assert_eq!(
            choose_vertical_side(TooltipPosition::Top, 0.05),
            TooltipPosition::Bottom
        );
        assert_eq!(
            choose_vertical_side(TooltipPosition::Bottom, 0.92),
            TooltipPosition::Top
        );
    }

    #[test]
    fn mid_band_keeps_authored_side() {
        assert_eq!(
            choose_vertical_side(TooltipPosition::Top, 0.5),
            TooltipPosition::Top
        );
        assert_eq!(
            choose_vertical_side(TooltipPosition::Bottom, 0.2),
            TooltipPosition::Bottom
        );
    }

    #[test]
    fn horizontal_preferences_fall_back_by_half() {
        assert_eq!(
            choose_vertical_side(TooltipPosition::Left, 0.3),
            TooltipPosition::Bottom
        );
        assert_eq!(
            choose_vertical_side(TooltipPosition::Right, 0.7),
            TooltipPosition::Top
        );
    }
}
