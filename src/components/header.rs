use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub connected: bool,
    pub settings_open: bool,
    pub on_toggle_settings: Callback<()>,
}

#[function_component]
pub fn Header(props: &HeaderProps) -> Html {
    let settings_cb = {
        let cb = props.on_toggle_settings.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let dot = if props.connected {
        "background:#22c55e; box-shadow:0 0 8px #22c55e;"
    } else {
        "background:#ef4444; box-shadow:0 0 8px #ef4444;"
    };
    let settings_style = if props.settings_open {
        "background:rgba(255,255,255,0.2); color:#fff;"
    } else {
        "background:rgba(255,255,255,0.05); color:rgba(255,255,255,0.6);"
    };
    html! {<div style="display:flex; justify-content:space-between; align-items:center; margin-bottom:16px; padding:0 8px;">
        <div style="display:flex; align-items:center; gap:8px;">
            <div title={ if props.connected { "Connected" } else { "Disconnected" } }
                style={format!("width:8px; height:8px; border-radius:9999px; {dot}")}></div>
            <h1 style="margin:0; font-size:18px; font-weight:700; letter-spacing:-0.025em; color:rgba(255,255,255,0.9);">{"Touch Remote"}</h1>
        </div>
        <button onclick={settings_cb}
            style={format!("padding:8px 12px; border-radius:9999px; border:1px solid rgba(255,255,255,0.1); {settings_style}")}>
            {"Settings"}
        </button>
    </div>}
}
