pub mod gesture;
pub mod mapper;
pub mod settings;
pub mod throttle;
pub mod touch;

pub use gesture::{GestureMode, GestureTranslator, TimerRequest};
pub use mapper::{InputMapper, SpecialKey};
pub use settings::{load_sensitivity, store_sensitivity};
