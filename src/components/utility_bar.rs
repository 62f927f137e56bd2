use yew::prelude::*;

use super::app::RemoteContext;
use crate::state::SpecialKey;

#[derive(Properties, PartialEq, Clone)]
pub struct UtilityBarProps {
    pub keyboard_open: bool,
    pub on_toggle_keyboard: Callback<()>,
}

#[function_component]
pub fn UtilityBar(props: &UtilityBarProps) -> Html {
    let remote = use_context::<RemoteContext>();

    let keyboard_cb = {
        let cb = props.on_toggle_keyboard.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let key_cb = |key: SpecialKey| {
        let remote = remote.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(remote) = &remote {
                remote.mapper.press(key);
            }
        })
    };

    let key_style = "flex:1; border-radius:16px; border:1px solid rgba(255,255,255,0.1); background:rgba(255,255,255,0.05); color:rgba(255,255,255,0.6);";
    let keyboard_style = if props.keyboard_open {
        "background:rgba(255,255,255,0.1); color:#fff;"
    } else {
        "background:rgba(255,255,255,0.05); color:rgba(255,255,255,0.6);"
    };

    html! {<div style="display:flex; justify-content:space-between; align-items:stretch; gap:16px;">
        <button onclick={keyboard_cb}
            style={format!("flex:1; padding:16px 0; border-radius:16px; border:1px solid rgba(255,255,255,0.1); font-weight:500; {keyboard_style}")}>
            { if props.keyboard_open { "On" } else { "Keys" } }
        </button>
        <div style="flex:2; display:flex; gap:8px;">
            <button onclick={key_cb(SpecialKey::Space)} style={key_style}>{"␣"}</button>
            <button onclick={key_cb(SpecialKey::Backspace)} style={key_style}>{"⌫"}</button>
            <button onclick={key_cb(SpecialKey::Enter)} style={key_style}>{"⏎"}</button>
        </div>
    </div>}
}
