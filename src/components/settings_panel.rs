use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::model::Sensitivity;

#[derive(Properties, PartialEq, Clone)]
pub struct SettingsPanelProps {
    pub show: bool,
    pub sensitivity: Sensitivity,
    pub on_change: Callback<f64>,
}

#[function_component]
pub fn SettingsPanel(props: &SettingsPanelProps) -> Html {
    if !props.show {
        return html! {};
    }

    let slider_cb = {
        let cb = props.on_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            match input.value().parse::<f64>() {
                Ok(v) => cb.emit(v),
                Err(_) => log::debug!("ignoring slider value {:?}", input.value()),
            }
        })
    };

    html! {<div style="background:rgba(255,255,255,0.05); border:1px solid rgba(255,255,255,0.1); border-radius:16px; padding:16px; margin-bottom:16px; display:flex; flex-direction:column; gap:12px;">
        <div style="display:flex; justify-content:space-between; align-items:center;">
            <span style="font-size:14px; font-weight:500; color:rgba(255,255,255,0.6);">{"Sensitivity"}</span>
            <span style="font-size:14px; font-weight:700; color:rgba(255,255,255,0.9);">{ props.sensitivity.to_string() }</span>
        </div>
        <input
            type="range"
            min={Sensitivity::MIN.to_string()}
            max={Sensitivity::MAX.to_string()}
            step={Sensitivity::STEP.to_string()}
            value={props.sensitivity.value().to_string()}
            oninput={slider_cb}
            style="width:100%; height:8px;"
        />
    </div>}
}
