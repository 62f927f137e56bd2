// Sensitivity persistence in localStorage
use crate::model::Sensitivity;

pub const SENSITIVITY_KEY: &str = "tr_sensitivity";

pub fn parse_sensitivity(raw: &str) -> Option<Sensitivity> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(Sensitivity::new)
}

pub fn load_sensitivity() -> Option<Sensitivity> {
    let win = web_sys::window()?;
    let store = win.local_storage().ok()??;
    let raw = store.get_item(SENSITIVITY_KEY).ok()??;
    parse_sensitivity(&raw)
}

pub fn store_sensitivity(sensitivity: Sensitivity) {
    if let Some(win) = web_sys::window() {
        if let Ok(Some(store)) = win.local_storage() {
            let _ = store.set_item(SENSITIVITY_KEY, &format!("{:.1}", sensitivity.value()));
        }
    }
}
