use cubehunt_common::{ControllerId, Transform};
use serde::{Deserialize, Serialize};

/// A raw host input event, already stripped down to what the game needs.
///
/// Built at the boundary (DOM listeners, XR session callbacks, test scripts)
/// and consumed by [`crate::InputMapper`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Mouse click at pixel coordinates.
    Pointer { x: f32, y: f32 },
    /// First touch point of a touch start, at pixel coordinates.
    Touch { x: f32, y: f32 },
    /// Trigger pressed; `transform` is the controller's world pose at that moment.
    ControllerSelectStart {
        controller: ControllerId,
        transform: Transform,
    },
    /// Trigger released.
    ControllerSelectEnd { controller: ControllerId },
    /// The drawable area changed size.
    Resize { width: f32, height: f32 },
    /// An immersive session began.
    SessionStart,
    /// The immersive session ended. Controllers are gone without a select-end.
    SessionEnd,
}

impl InputEvent {
    /// Whether the host should suppress the browser's default handling
    /// (scroll, zoom) when the game consumes this event.
    pub fn suppresses_default(&self) -> bool {
        matches!(self, Self::Touch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_touch_suppresses_default() {
        assert!(InputEvent::Touch { x: 0.0, y: 0.0 }.suppresses_default());
        assert!(!InputEvent::Pointer { x: 0.0, y: 0.0 }.suppresses_default());
        assert!(
            !InputEvent::ControllerSelectEnd {
                controller: ControllerId(0)
            }
            .suppresses_default()
        );
    }

    #[test]
    fn events_parse_from_tagged_json() {
        let event: InputEvent = serde_json::from_str(r#"{ "type": "touch", "x": 10, "y": 20 }"#).unwrap();
        assert_eq!(event, InputEvent::Touch { x: 10.0, y: 20.0 });
        let event: InputEvent = serde_json::from_str(r#"{ "type": "session_end" }"#).unwrap();
        assert_eq!(event, InputEvent::SessionEnd);
    }
}
