use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CloseEvent, Event, MessageEvent, WebSocket};
use yew::Callback;

use super::{Transport, TransportError};
use crate::config::ClientConfig;
use crate::protocol::{
    Command, Heartbeat, Lifecycle, NAMESPACE_DISCONNECT, Packet, SocketPacket,
};

/// Browser WebSocket speaking Socket.IO to the remote host.
///
/// Emission is allowed only between the namespace acknowledgement and the
/// next disconnect notification. There is no reconnection: once closed the
/// channel stays closed.
pub struct SocketChannel {
    socket: WebSocket,
    connected: Rc<Cell<bool>>,
    closed: Cell<bool>,
    watchdog: Watchdog,
    _on_message: Closure<dyn FnMut(MessageEvent)>,
    _on_close: Closure<dyn FnMut(CloseEvent)>,
    _on_error: Closure<dyn FnMut(Event)>,
}

fn notify(connected: &Cell<bool>, on_lifecycle: &Callback<Lifecycle>, lifecycle: Lifecycle) {
    connected.set(lifecycle == Lifecycle::Connected);
    on_lifecycle.emit(lifecycle);
}

/// Declares the link dead when the server stops pinging. A dropped network
/// can leave the socket open with no close event for minutes.
#[derive(Clone)]
struct Watchdog {
    socket: WebSocket,
    connected: Rc<Cell<bool>>,
    on_lifecycle: Callback<Lifecycle>,
    deadline_ms: Rc<Cell<Option<u32>>>,
    timer: Rc<RefCell<Option<Timeout>>>,
}

impl Watchdog {
    fn apply(&self, heartbeat: Heartbeat) {
        let ms = match heartbeat {
            Heartbeat::Arm { deadline_ms } => {
                self.deadline_ms.set(Some(deadline_ms));
                deadline_ms
            }
            Heartbeat::Rearm => match self.deadline_ms.get() {
                Some(ms) => ms,
                None => return,
            },
        };
        let this = self.clone();
        let timeout = Timeout::new(ms, move || this.expire(ms));
        *self.timer.borrow_mut() = Some(timeout);
    }

    // Runs inside the timer callback, so the slot is left for `stop` to clear.
    fn expire(&self, ms: u32) {
        if self.deadline_ms.take().is_none() {
            return;
        }
        log::warn!("no ping from server in {ms} ms, dropping the channel");
        if let Err(e) = self.socket.close() {
            log::debug!("socket close failed: {e:?}");
        }
        notify(&self.connected, &self.on_lifecycle, Lifecycle::Disconnected);
    }

    fn stop(&self) {
        self.deadline_ms.set(None);
        // dropping the Timeout cancels it
        self.timer.borrow_mut().take();
    }
}

impl SocketChannel {
    /// Dials the event server derived from the page's own location.
    pub fn for_page(
        config: &ClientConfig,
        on_lifecycle: Callback<Lifecycle>,
    ) -> Result<Self, TransportError> {
        let window = web_sys::window().ok_or(TransportError::NoWindow)?;
        let location = window.location();
        let protocol = location.protocol().unwrap_or_default();
        let hostname = location.hostname().unwrap_or_default();
        Self::connect(&config.socket_url(&protocol, &hostname), on_lifecycle)
    }

    /// Starts the connection. Completion is reported through `on_lifecycle`.
    pub fn connect(url: &str, on_lifecycle: Callback<Lifecycle>) -> Result<Self, TransportError> {
        let socket = WebSocket::new(url).map_err(|e| TransportError::Open(format!("{e:?}")))?;
        let connected = Rc::new(Cell::new(false));
        let watchdog = Watchdog {
            socket: socket.clone(),
            connected: connected.clone(),
            on_lifecycle: on_lifecycle.clone(),
            deadline_ms: Rc::new(Cell::new(None)),
            timer: Rc::new(RefCell::new(None)),
        };

        let on_message = {
            let socket = socket.clone();
            let connected = connected.clone();
            let on_lifecycle = on_lifecycle.clone();
            let watchdog = watchdog.clone();
            Closure::wrap(Box::new(move |e: MessageEvent| {
                let Some(frame) = e.data().as_string() else {
                    log::debug!("ignoring non-text frame");
                    return;
                };
                let packet = match Packet::decode(&frame) {
                    Ok(p) => p,
                    Err(err) => {
                        log::warn!("unreadable frame {frame:?}: {err}");
                        return;
                    }
                };
                match &packet {
                    Packet::Open(h) => log::debug!(
                        "engine session {} (ping every {} ms, timeout {} ms)",
                        h.sid,
                        h.ping_interval,
                        h.ping_timeout
                    ),
                    Packet::Message(SocketPacket::ConnectError(reason)) => {
                        log::warn!("namespace refused: {reason}")
                    }
                    Packet::Message(SocketPacket::Event(body)) => {
                        log::debug!("ignoring inbound event {body}")
                    }
                    _ => {}
                }
                let reaction = packet.reaction();
                if let Some(reply) = reaction.reply {
                    if let Err(err) = socket.send_with_str(reply) {
                        log::warn!("failed to answer {packet:?}: {err:?}");
                    }
                }
                if let Some(heartbeat) = reaction.heartbeat {
                    watchdog.apply(heartbeat);
                }
                if let Some(lifecycle) = reaction.lifecycle {
                    log::info!("channel {lifecycle:?}");
                    if lifecycle == Lifecycle::Disconnected {
                        watchdog.stop();
                    }
                    notify(&connected, &on_lifecycle, lifecycle);
                }
            }) as Box<dyn FnMut(MessageEvent)>)
        };
        socket.set_onmessage(Some(on_message.as_ref().unchecked_ref()));

        let on_close = {
            let connected = connected.clone();
            let on_lifecycle = on_lifecycle.clone();
            let watchdog = watchdog.clone();
            Closure::wrap(Box::new(move |e: CloseEvent| {
                log::info!("socket closed (code {}, clean {})", e.code(), e.was_clean());
                watchdog.stop();
                notify(&connected, &on_lifecycle, Lifecycle::Disconnected);
            }) as Box<dyn FnMut(CloseEvent)>)
        };
        socket.set_onclose(Some(on_close.as_ref().unchecked_ref()));

        // a close event always follows, which carries the notification
        let on_error = Closure::wrap(Box::new(move |_e: Event| {
            log::warn!("socket error");
        }) as Box<dyn FnMut(Event)>);
        socket.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        log::info!("connecting to {url}");
        Ok(Self {
            socket,
            connected,
            closed: Cell::new(false),
            watchdog,
            _on_message: on_message,
            _on_close: on_close,
            _on_error: on_error,
        })
    }

    /// Leaves the namespace and closes the socket. Later calls do nothing.
    pub fn disconnect(&self) {
        if self.closed.replace(true) {
            return;
        }
        self.watchdog.stop();
        if self.connected.replace(false) {
            let _ = self.socket.send_with_str(NAMESPACE_DISCONNECT);
        }
        self.socket.set_onmessage(None);
        self.socket.set_onclose(None);
        self.socket.set_onerror(None);
        if let Err(e) = self.socket.close() {
            log::debug!("socket close failed: {e:?}");
        }
        log::info!("channel torn down");
    }
}

impl Drop for SocketChannel {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl Transport for SocketChannel {
    fn emit(&self, command: &Command) -> Result<(), TransportError> {
        if !self.connected.get() {
            return Err(TransportError::NotConnected);
        }
        let frame = command.encode()?;
        self.socket
            .send_with_str(&frame)
            .map_err(|e| TransportError::Send(format!("{e:?}")))
    }
}
