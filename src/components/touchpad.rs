use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use web_sys::{Element, TouchEvent};
use yew::prelude::*;

use super::app::RemoteContext;
use crate::model::{MouseButton, Point, Sensitivity};
use crate::state::{GestureMode, GestureTranslator, TimerRequest};
use crate::transport::{ChannelHandle, Transport};
use crate::util::now_ms;

/// Which translator a touch starting at `x` belongs to. The strip along the
/// surface's right edge scrolls; the rest moves the pointer.
pub fn mode_for(x: f64, surface_right: f64, strip_px: f64) -> GestureMode {
    if surface_right - x <= strip_px {
        GestureMode::Scroll
    } else {
        GestureMode::Pointer
    }
}

/// A tap clicks only on the pointer surface; the scroll strip swallows it.
pub fn tap_clicks(x: f64, surface_right: f64, strip_px: f64) -> bool {
    mode_for(x, surface_right, strip_px) == GestureMode::Pointer
}

fn surface_right(surface: &NodeRef) -> f64 {
    surface
        .cast::<Element>()
        .map(|el| el.get_bounding_client_rect().right())
        .unwrap_or(f64::INFINITY)
}

fn first_touch(e: &TouchEvent) -> Option<Point> {
    let t = e.touches().item(0)?;
    Some(Point::new(t.client_x() as f64, t.client_y() as f64))
}

// A translator plus the timer slot for its trailing edge
struct Lane {
    translator: Rc<RefCell<GestureTranslator>>,
    timer: RefCell<Option<Timeout>>,
}

impl Lane {
    fn new(mode: GestureMode, interval_ms: u32) -> Self {
        Self {
            translator: Rc::new(RefCell::new(GestureTranslator::new(mode, interval_ms))),
            timer: RefCell::new(None),
        }
    }

    fn configure(&self, transport: Option<Rc<dyn Transport>>, sensitivity: Sensitivity) {
        if self.translator.borrow_mut().configure(transport, sensitivity) {
            // dropping the Timeout cancels it
            self.timer.borrow_mut().take();
        }
    }

    fn arm(&self, req: TimerRequest) {
        let translator = self.translator.clone();
        let timeout = Timeout::new(req.delay_ms, move || {
            translator.borrow_mut().on_timer(req.ticket, now_ms());
        });
        *self.timer.borrow_mut() = Some(timeout);
    }

    fn start(&self, p: Point) {
        self.translator.borrow_mut().on_touch_start(p);
    }

    fn move_to(&self, p: Point) {
        let req = self.translator.borrow_mut().on_touch_move(p, now_ms());
        if let Some(req) = req {
            self.arm(req);
        }
    }

    fn end(&self) {
        self.translator.borrow_mut().on_touch_end();
    }

    fn is_dragging(&self) -> bool {
        self.translator.borrow().is_dragging()
    }
}

struct Lanes {
    pointer: Lane,
    scroll: Lane,
}

impl Lanes {
    fn get(&self, mode: GestureMode) -> &Lane {
        match mode {
            GestureMode::Pointer => &self.pointer,
            GestureMode::Scroll => &self.scroll,
        }
    }

    fn dragging(&self) -> Option<&Lane> {
        [&self.pointer, &self.scroll]
            .into_iter()
            .find(|lane| lane.is_dragging())
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct TouchpadProps {
    pub channel: Option<ChannelHandle>,
    pub sensitivity: Sensitivity,
    pub throttle_interval_ms: u32,
    pub scroll_strip_px: f64,
}

#[function_component]
pub fn Touchpad(props: &TouchpadProps) -> Html {
    let remote = use_context::<RemoteContext>();
    let surface_ref = use_node_ref();
    let lanes = {
        let interval = props.throttle_interval_ms;
        use_memo((), move |_| Lanes {
            pointer: Lane::new(GestureMode::Pointer, interval),
            scroll: Lane::new(GestureMode::Scroll, interval),
        })
    };

    // Rebind both translators whenever the channel or sensitivity changes
    {
        let lanes = lanes.clone();
        use_effect_with(
            (props.channel.clone(), props.sensitivity),
            move |(channel, sensitivity)| {
                let transport = channel.as_ref().map(ChannelHandle::as_transport);
                lanes.pointer.configure(transport.clone(), *sensitivity);
                lanes.scroll.configure(transport, *sensitivity);
                || ()
            },
        );
    }

    let touch_start_cb = {
        let lanes = lanes.clone();
        let surface_ref = surface_ref.clone();
        let strip_px = props.scroll_strip_px;
        Callback::from(move |e: TouchEvent| {
            let Some(p) = first_touch(&e) else { return };
            let right = surface_right(&surface_ref);
            // only one drag at a time: a new touch replaces whatever was active
            if let Some(lane) = lanes.dragging() {
                lane.end();
            }
            lanes.get(mode_for(p.x, right, strip_px)).start(p);
        })
    };
    let touch_move_cb = {
        let lanes = lanes.clone();
        Callback::from(move |e: TouchEvent| {
            let (Some(p), Some(lane)) = (first_touch(&e), lanes.dragging()) else {
                return;
            };
            lane.move_to(p);
        })
    };
    let touch_end_cb = {
        let lanes = lanes.clone();
        Callback::from(move |_e: TouchEvent| {
            if let Some(lane) = lanes.dragging() {
                lane.end();
            }
        })
    };
    let tap_cb = {
        let surface_ref = surface_ref.clone();
        let strip_px = props.scroll_strip_px;
        Callback::from(move |e: MouseEvent| {
            if !tap_clicks(e.client_x() as f64, surface_right(&surface_ref), strip_px) {
                return;
            }
            if let Some(remote) = &remote {
                remote.mapper.click(MouseButton::Left);
            }
        })
    };

    html! {<div
        ref={surface_ref}
        ontouchstart={touch_start_cb}
        ontouchmove={touch_move_cb}
        ontouchend={touch_end_cb.clone()}
        ontouchcancel={touch_end_cb}
        onclick={tap_cb}
        style="flex:1; min-height:0; position:relative; margin-bottom:16px; display:flex; flex-direction:column; align-items:center; justify-content:center; border-radius:24px; border:1px solid rgba(255,255,255,0.1); background:rgba(255,255,255,0.05); overflow:hidden; touch-action:none;">
        <p style="margin:8px 0 0; font-size:14px; font-weight:500; color:rgba(255,255,255,0.2);">{"Touchpad"}</p>
        <div style={format!("position:absolute; right:0; top:0; bottom:0; width:{}px; display:flex; flex-direction:column; align-items:center; justify-content:space-between; padding:32px 0; box-sizing:border-box; color:rgba(255,255,255,0.1); pointer-events:none; border-left:1px solid rgba(255,255,255,0.05);", props.scroll_strip_px)}>
            <span>{"▲"}</span>
            <span>{"▼"}</span>
        </div>
    </div>}
}
