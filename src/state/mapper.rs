//! Discrete UI actions to command events. Unthrottled; every operation is a
//! silent no-op while no channel is bound.

use std::rc::Rc;

use crate::model::MouseButton;
use crate::protocol::Command;
use crate::transport::Transport;

/// Keys the page sends by name rather than as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    Backspace,
    Enter,
    Space,
}

impl SpecialKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SpecialKey::Backspace => "backspace",
            SpecialKey::Enter => "enter",
            SpecialKey::Space => "space",
        }
    }

    /// Control keys whose effect a text-change event would not deliver.
    pub fn intercepted(dom_key: &str) -> Option<Self> {
        match dom_key {
            "Backspace" => Some(SpecialKey::Backspace),
            "Enter" => Some(SpecialKey::Enter),
            _ => None,
        }
    }
}

#[derive(Default)]
pub struct InputMapper {
    transport: Option<Rc<dyn Transport>>,
}

impl InputMapper {
    pub fn new(transport: Option<Rc<dyn Transport>>) -> Self {
        Self { transport }
    }

    pub fn click(&self, button: MouseButton) {
        self.send(Command::MouseClick { button });
    }

    pub fn key_press(&self, key: &str) {
        self.send(Command::KeyPress {
            key: key.to_string(),
        });
    }

    pub fn press(&self, key: SpecialKey) {
        self.key_press(key.as_str());
    }

    /// Sends the whole of `buffer` as literal text and clears it, so the next
    /// change carries only what was typed since. Empty buffers are never sent,
    /// and without a channel the buffer is left as is.
    pub fn submit_text(&self, buffer: &mut String) -> bool {
        if buffer.is_empty() || self.transport.is_none() {
            return false;
        }
        self.send(Command::KeyboardText {
            text: std::mem::take(buffer),
        });
        true
    }

    /// Key-down hook for the capture input. Returns whether the key was
    /// handled as a named key press.
    pub fn key_down(&self, dom_key: &str) -> bool {
        match SpecialKey::intercepted(dom_key) {
            Some(key) => {
                self.press(key);
                true
            }
            None => false,
        }
    }

    fn send(&self, command: Command) {
        let Some(transport) = &self.transport else {
            log::debug!("no channel, {} skipped", command.event_name());
            return;
        };
        if let Err(e) = transport.emit(&command) {
            log::debug!("{} skipped: {e}", command.event_name());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::testing::RecordingTransport;

    fn mapper() -> (InputMapper, Rc<RecordingTransport>) {
        let sink = RecordingTransport::shared();
        let transport: Rc<dyn Transport> = sink.clone();
        (InputMapper::new(Some(transport)), sink)
    }

    #[test]
    fn test_click_carries_button() {
        let (m, sink) = mapper();
        m.click(MouseButton::Left);
        m.click(MouseButton::Right);
        m.click(MouseButton::Middle);
        assert_eq!(
            sink.take(),
            vec![
                Command::MouseClick { button: MouseButton::Left },
                Command::MouseClick { button: MouseButton::Right },
                Command::MouseClick { button: MouseButton::Middle },
            ]
        );
    }

    #[test]
    fn test_key_press_passes_free_form_names() {
        let (m, sink) = mapper();
        m.key_press("tab");
        m.press(SpecialKey::Space);
        assert_eq!(
            sink.take(),
            vec![
                Command::KeyPress { key: "tab".into() },
                Command::KeyPress { key: "space".into() },
            ]
        );
    }

    #[test]
    fn test_text_sent_once_then_buffer_empty() {
        // Arrange
        let (m, sink) = mapper();
        let mut buffer = String::from("hello");

        // Act
        let first = m.submit_text(&mut buffer);
        let second = m.submit_text(&mut buffer);

        // Assert
        assert!(first);
        assert!(!second);
        assert!(buffer.is_empty());
        assert_eq!(
            sink.take(),
            vec![Command::KeyboardText { text: "hello".into() }]
        );
    }

    #[test]
    fn test_successive_changes_send_only_their_delta() {
        let (m, sink) = mapper();
        let mut buffer = String::new();
        for ch in ["h", "i"] {
            buffer.push_str(ch);
            m.submit_text(&mut buffer);
        }
        assert_eq!(
            sink.take(),
            vec![
                Command::KeyboardText { text: "h".into() },
                Command::KeyboardText { text: "i".into() },
            ]
        );
    }

    #[test]
    fn test_backspace_key_down_emits_single_named_press() {
        let (m, sink) = mapper();
        let mut buffer = String::new();

        assert!(m.key_down("Backspace"));
        // the capture input stays empty, so the text path has nothing to send
        assert!(!m.submit_text(&mut buffer));

        assert_eq!(
            sink.take(),
            vec![Command::KeyPress { key: "backspace".into() }]
        );
    }

    #[test]
    fn test_enter_intercepted_other_keys_not() {
        let (m, sink) = mapper();
        assert!(m.key_down("Enter"));
        assert!(!m.key_down("a"));
        assert!(!m.key_down("Shift"));
        assert_eq!(sink.take(), vec![Command::KeyPress { key: "enter".into() }]);
    }

    #[test]
    fn test_without_channel_everything_is_skipped() {
        let m = InputMapper::default();
        let mut buffer = String::from("kept");
        m.click(MouseButton::Left);
        m.key_press("enter");
        assert!(!m.submit_text(&mut buffer));
        assert_eq!(buffer, "kept");
        assert!(m.key_down("Backspace"));
    }

    #[test]
    fn test_offline_channel_still_clears_buffer() {
        let (m, sink) = mapper();
        sink.offline.set(true);
        let mut buffer = String::from("lost");
        assert!(m.submit_text(&mut buffer));
        assert!(buffer.is_empty());
        assert!(sink.take().is_empty());
    }
}
