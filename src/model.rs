//! Core data models for the touch remote.
//! Session state lives in a Yew reducer; the geometric and input types here
//! are shared by the gesture translator, the input mapper and the wire codec.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use yew::Reducible;

/// A touch position in CSS pixels, relative to the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Relative displacement between two consecutive raw touch samples.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Displacement {
    pub dx: f64,
    pub dy: f64,
}

impl Displacement {
    pub fn between(from: Point, to: Point) -> Self {
        Self {
            dx: to.x - from.x,
            dy: to.y - from.y,
        }
    }

    pub fn scaled(self, sensitivity: Sensitivity) -> Self {
        let s = sensitivity.value();
        Self {
            dx: self.dx * s,
            dy: self.dy * s,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer speed multiplier, always inside `[MIN, MAX]` and quantised to `STEP`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sensitivity(f64);

impl Sensitivity {
    pub const MIN: f64 = 0.5;
    pub const MAX: f64 = 4.0;
    pub const STEP: f64 = 0.1;
    pub const DEFAULT: f64 = 1.5;

    /// Clamps and rounds `raw` onto the slider grid. NaN yields the default.
    pub fn new(raw: f64) -> Self {
        if raw.is_nan() {
            return Self::default();
        }
        let clamped = raw.clamp(Self::MIN, Self::MAX);
        // divide last so 1.5, 2.1, ... come out as the exact literals
        Self((clamped * 10.0).round() / 10.0)
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Sensitivity {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for Sensitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct SessionState {
    /// Mirrors the most recent channel lifecycle notification.
    pub connected: bool,
    pub sensitivity: Sensitivity,
    pub show_keyboard: bool,
    pub show_settings: bool,
}

impl SessionState {
    pub fn with_sensitivity(sensitivity: Sensitivity) -> Self {
        Self {
            sensitivity,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SessionAction {
    Connected,
    Disconnected,
    SetSensitivity(f64),
    ToggleKeyboard,
    ToggleSettings,
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use SessionAction::*;
        let mut new = (*self).clone();
        match action {
            Connected => new.connected = true,
            Disconnected => new.connected = false,
            SetSensitivity(raw) => new.sensitivity = Sensitivity::new(raw),
            ToggleKeyboard => new.show_keyboard = !new.show_keyboard,
            ToggleSettings => new.show_settings = !new.show_settings,
        }
        if new == *self {
            return self;
        }
        Rc::new(new)
    }
}
