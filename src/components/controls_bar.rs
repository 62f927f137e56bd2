use web_sys::TouchEvent;
use yew::prelude::*;

use super::app::RemoteContext;
use crate::model::MouseButton;

const BUTTON_STYLE: &str = "padding:24px 0; border-radius:16px; border:1px solid rgba(255,255,255,0.05); border-bottom-width:2px; background:rgba(255,255,255,0.05); color:rgba(255,255,255,0.8); font-weight:700;";

#[function_component]
pub fn ControlsBar() -> Html {
    let remote = use_context::<RemoteContext>();

    // fire on touchstart and keep the touch away from the touchpad
    let click_cb = |button: MouseButton| {
        let remote = remote.clone();
        Callback::from(move |e: TouchEvent| {
            e.stop_propagation();
            if let Some(remote) = &remote {
                remote.mapper.click(button);
            }
        })
    };

    html! {<div style="display:grid; grid-template-columns:repeat(2, minmax(0, 1fr)); gap:16px; margin-bottom:16px;">
        <button ontouchstart={click_cb(MouseButton::Left)} style={BUTTON_STYLE}>{"L-Click"}</button>
        <button ontouchstart={click_cb(MouseButton::Right)} style={BUTTON_STYLE}>{"R-Click"}</button>
    </div>}
}
