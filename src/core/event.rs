use std::fmt;

use serde::de::{MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::EventError;

/// Inbound event from the remote display, tagged by `event_type`
///
/// Kinds this crate does not know about decode to [`RemoteEvent::Unknown`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum RemoteEvent {
    Resize(ResizeEvent),
    PointerMove(PointerMoveEvent),
    PointerDown(PointerButtonEvent),
    PointerUp(PointerButtonEvent),
    Key(KeyEvent),
    #[serde(other)]
    Unknown,
}

impl RemoteEvent {
    /// Decode a JSON payload
    pub fn from_json(payload: &str) -> Result<Self, EventError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Decode an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, EventError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeEvent {
    /// Logical width
    pub width: f32,
    /// Logical height
    pub height: f32,
    #[serde(default)]
    pub pixel_ratio: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerMoveEvent {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerButtonEvent {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Complete set of currently pressed buttons (1-based); absent leaves buttons alone
    #[serde(default)]
    pub buttons: Option<Vec<u32>>,
    /// Active touches in payload order
    #[serde(default, deserialize_with = "touches_in_order")]
    pub touches: Vec<Touch>,
}

impl PointerButtonEvent {
    /// First touch if any, else the event's own coordinates
    pub fn position(&self) -> (f32, f32) {
        match self.touches.first() {
            Some(touch) => (touch.x, touch.y),
            None => (self.x, self.y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub pressed: bool,
    #[serde(default)]
    pub modifiers: Vec<String>,
}

/// Accepts touches as an object keyed by touch id or as a list, keeping order
fn touches_in_order<'de, D>(deserializer: D) -> Result<Vec<Touch>, D::Error>
where
    D: Deserializer<'de>,
{
    struct TouchesVisitor;

    impl<'de> Visitor<'de> for TouchesVisitor {
        type Value = Vec<Touch>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map or list of touches")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut touches = Vec::new();
            while let Some((_, touch)) = map.next_entry::<serde::de::IgnoredAny, Touch>()? {
                touches.push(touch);
            }
            Ok(touches)
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut touches = Vec::new();
            while let Some(touch) = seq.next_element::<Touch>()? {
                touches.push(touch);
            }
            Ok(touches)
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(TouchesVisitor)
}
