//! Client configuration.
//!
//! [`ClientConfig`] is built once at startup. The defaults dial the event
//! server on the same host that served the page. The page can be served from
//! one machine while another is controlled, so the host and port may be
//! overridden at build time:
//!
//! ```text
//! TOUCH_REMOTE_BACKEND_HOST=192.168.1.20 TOUCH_REMOTE_BACKEND_PORT=5001 trunk build
//! ```

use crate::model::Sensitivity;

pub const DEFAULT_BACKEND_PORT: u16 = 5001;
/// Trailing-edge throttle interval for pointer and scroll samples (~60 Hz).
pub const THROTTLE_INTERVAL_MS: u32 = 16;
/// Width of the scroll strip along the touchpad's right edge, in CSS px.
pub const SCROLL_STRIP_PX: f64 = 32.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Host to dial instead of the page's own host.
    pub backend_host: Option<String>,
    pub backend_port: u16,
    pub throttle_interval_ms: u32,
    pub scroll_strip_px: f64,
    pub default_sensitivity: Sensitivity,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_host: None,
            backend_port: DEFAULT_BACKEND_PORT,
            throttle_interval_ms: THROTTLE_INTERVAL_MS,
            scroll_strip_px: SCROLL_STRIP_PX,
            default_sensitivity: Sensitivity::default(),
        }
    }
}

impl ClientConfig {
    /// Defaults overlaid with the build-time environment.
    pub fn from_build_env() -> Self {
        Self::from_overrides(
            option_env!("TOUCH_REMOTE_BACKEND_HOST"),
            option_env!("TOUCH_REMOTE_BACKEND_PORT"),
        )
    }

    fn from_overrides(host: Option<&str>, port: Option<&str>) -> Self {
        let mut cfg = Self::default();
        cfg.backend_host = host
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .map(str::to_string);
        if let Some(raw) = port {
            match raw.trim().parse::<u16>() {
                Ok(p) if p != 0 => cfg.backend_port = p,
                _ => log::warn!("ignoring invalid backend port override {raw:?}"),
            }
        }
        cfg
    }

    /// WebSocket URL of the event server for a page loaded with the given
    /// `location.protocol` (`"http:"` / `"https:"`) and `location.hostname`.
    pub fn socket_url(&self, page_protocol: &str, page_hostname: &str) -> String {
        let scheme = if page_protocol == "https:" { "wss" } else { "ws" };
        let host = self.backend_host.as_deref().unwrap_or(page_hostname);
        let host = if host.is_empty() { "localhost" } else { host };
        format!(
            "{scheme}://{}:{}/socket.io/?EIO=4&transport=websocket",
            bracket_ipv6(host),
            self.backend_port
        )
    }
}

fn bracket_ipv6(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{host}]")
    } else {
        host.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dials_page_host_on_5001() {
        let cfg = ClientConfig::default();
        assert_eq!(
            cfg.socket_url("http:", "192.168.1.7"),
            "ws://192.168.1.7:5001/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_https_page_uses_secure_socket() {
        let cfg = ClientConfig::default();
        assert!(cfg.socket_url("https:", "remote.lan").starts_with("wss://remote.lan:5001/"));
    }

    #[test]
    fn test_overrides_replace_host_and_port() {
        let cfg = ClientConfig::from_overrides(Some(" mac.local "), Some("6001"));
        assert_eq!(cfg.backend_host.as_deref(), Some("mac.local"));
        assert_eq!(
            cfg.socket_url("http:", "ignored"),
            "ws://mac.local:6001/socket.io/?EIO=4&transport=websocket"
        );
    }

    #[test]
    fn test_blank_host_and_bad_port_fall_back_to_defaults() {
        let cfg = ClientConfig::from_overrides(Some("  "), Some("not-a-port"));
        assert_eq!(cfg, ClientConfig::default());
        let cfg = ClientConfig::from_overrides(None, Some("0"));
        assert_eq!(cfg.backend_port, DEFAULT_BACKEND_PORT);
    }

    #[test]
    fn test_ipv6_and_empty_hosts() {
        let cfg = ClientConfig::default();
        assert!(cfg.socket_url("http:", "::1").starts_with("ws://[::1]:5001/"));
        assert!(cfg.socket_url("http:", "").starts_with("ws://localhost:5001/"));
    }
}
