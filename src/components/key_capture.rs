use web_sys::{HtmlInputElement, KeyboardEvent};
use yew::prelude::*;

use super::app::RemoteContext;

#[derive(Properties, PartialEq, Clone)]
pub struct KeyCaptureProps {
    pub input_ref: NodeRef,
}

/// Invisible text field that receives the phone's soft keyboard. Each change
/// is sent as text and the field emptied; Backspace and Enter are caught on
/// key-down because an empty field reports no change for them.
#[function_component]
pub fn KeyCapture(props: &KeyCaptureProps) -> Html {
    let remote = use_context::<RemoteContext>();

    let input_cb = {
        let remote = remote.clone();
        Callback::from(move |e: InputEvent| {
            let Some(remote) = &remote else { return };
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut buffer = input.value();
            if remote.mapper.submit_text(&mut buffer) {
                input.set_value(&buffer);
            }
        })
    };
    let keydown_cb = Callback::from(move |e: KeyboardEvent| {
        if let Some(remote) = &remote {
            remote.mapper.key_down(&e.key());
        }
    });

    html! {<input
        ref={props.input_ref.clone()}
        type="text"
        autocapitalize="none"
        autocorrect="off"
        oninput={input_cb}
        onkeydown={keydown_cb}
        style="position:absolute; opacity:0; pointer-events:none;"
    />}
}
