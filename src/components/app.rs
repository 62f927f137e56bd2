use std::rc::Rc;

use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::{
    controls_bar::ControlsBar, header::Header, key_capture::KeyCapture,
    settings_panel::SettingsPanel, touchpad::Touchpad, utility_bar::UtilityBar,
};
use crate::config::ClientConfig;
use crate::model::{SessionAction, SessionState};
use crate::protocol::Lifecycle;
use crate::state::{InputMapper, load_sensitivity, store_sensitivity};
use crate::transport::{ChannelHandle, SocketChannel};

// Hands the mapper to every control without prop drilling
#[derive(Clone)]
pub struct RemoteContext {
    pub mapper: Rc<InputMapper>,
}

impl PartialEq for RemoteContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.mapper, &other.mapper)
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| ClientConfig::from_build_env());
    let session = {
        let config = config.clone();
        use_reducer(move || {
            SessionState::with_sensitivity(
                load_sensitivity().unwrap_or(config.default_sensitivity),
            )
        })
    };
    let channel = use_state(|| None::<ChannelHandle>);
    let input_ref = use_node_ref();

    // Open the channel once; tear it down when the session ends
    {
        let channel = channel.clone();
        let session = session.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            let on_lifecycle = Callback::from(move |lifecycle: Lifecycle| match lifecycle {
                Lifecycle::Connected => session.dispatch(SessionAction::Connected),
                Lifecycle::Disconnected => session.dispatch(SessionAction::Disconnected),
            });
            let opened = match SocketChannel::for_page(&config, on_lifecycle) {
                Ok(socket) => {
                    let handle = ChannelHandle(Rc::new(socket));
                    channel.set(Some(handle.clone()));
                    Some(handle)
                }
                Err(e) => {
                    log::error!("cannot open channel: {e}");
                    None
                }
            };
            move || {
                if let Some(handle) = opened {
                    handle.0.disconnect();
                }
            }
        });
    }

    // Persist sensitivity changes
    use_effect_with(session.sensitivity, |s| {
        store_sensitivity(*s);
        || ()
    });

    let mapper = use_memo((*channel).clone(), |channel| {
        InputMapper::new(channel.as_ref().map(ChannelHandle::as_transport))
    });

    let toggle_settings = {
        let session = session.clone();
        Callback::from(move |_| session.dispatch(SessionAction::ToggleSettings))
    };
    let set_sensitivity = {
        let session = session.clone();
        Callback::from(move |v: f64| session.dispatch(SessionAction::SetSensitivity(v)))
    };
    // focus must happen inside the tap for mobile keyboards to open
    let toggle_keyboard = {
        let session = session.clone();
        let input_ref = input_ref.clone();
        Callback::from(move |_| {
            if let Some(input) = input_ref.cast::<HtmlInputElement>() {
                if session.show_keyboard {
                    let _ = input.blur();
                } else {
                    let _ = input.focus();
                }
            }
            session.dispatch(SessionAction::ToggleKeyboard);
        })
    };

    let ctx = RemoteContext { mapper };

    html! {
        <ContextProvider<RemoteContext> context={ctx}>
            <div style="display:flex; flex-direction:column; height:100svh; width:100%; max-width:100vw; box-sizing:border-box; padding:16px; overflow:hidden; user-select:none; touch-action:none;">
                <Header
                    connected={session.connected}
                    settings_open={session.show_settings}
                    on_toggle_settings={toggle_settings}
                />
                <SettingsPanel
                    show={session.show_settings}
                    sensitivity={session.sensitivity}
                    on_change={set_sensitivity}
                />
                <Touchpad
                    channel={(*channel).clone()}
                    sensitivity={session.sensitivity}
                    throttle_interval_ms={config.throttle_interval_ms}
                    scroll_strip_px={config.scroll_strip_px}
                />
                <KeyCapture input_ref={input_ref} />
                <ControlsBar />
                <UtilityBar
                    keyboard_open={session.show_keyboard}
                    on_toggle_keyboard={toggle_keyboard}
                />
            </div>
        </ContextProvider<RemoteContext>>
    }
}
