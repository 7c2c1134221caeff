//! Confirmation UI
//!
//! Screens are plain data. The host renders them through a
//! `ConfirmationUi` and reports what the user did.

pub mod format;
pub mod sequencer;

use serde::Serialize;
use std::fmt;

/// Value half of a label/value line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DisplayValue {
    Text(String),
    /// Raw bytes, rendered as hex
    Bytes(#[serde(with = "crate::serde_bytes::hex_vec")] Vec<u8>),
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => write!(f, "{}", text),
            DisplayValue::Bytes(bytes) => write!(f, "{}", hex::encode(bytes)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyItem {
    pub label: String,
    pub value: DisplayValue,
}

impl PropertyItem {
    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: DisplayValue::Text(value.into()),
        }
    }

    pub fn bytes(label: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            label: label.into(),
            value: DisplayValue::Bytes(value),
        }
    }
}

/// One confirmation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Screen {
    Warning {
        id: &'static str,
        message: String,
    },
    Metadata {
        id: &'static str,
        title: String,
        message: String,
    },
    Properties {
        id: &'static str,
        title: String,
        items: Vec<PropertyItem>,
        /// Requires a hold-to-confirm gesture
        hold: bool,
    },
    /// Summary with an optional expansion into `details`
    ShowMore {
        id: &'static str,
        title: String,
        summary: String,
        button: &'static str,
        details: Vec<Screen>,
    },
}

impl Screen {
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Warning { id, .. }
            | Screen::Metadata { id, .. }
            | Screen::Properties { id, .. }
            | Screen::ShowMore { id, .. } => *id,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Screen::Warning { .. } => None,
            Screen::Metadata { title, .. }
            | Screen::Properties { title, .. }
            | Screen::ShowMore { title, .. } => Some(title.as_str()),
        }
    }

    pub fn requires_hold(&self) -> bool {
        matches!(self, Screen::Properties { hold: true, .. })
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Warning { message, .. } => write!(f, "WARNING: {}", message),
            Screen::Metadata { title, message, .. } => write!(f, "{}\n  {}", title, message),
            Screen::Properties {
                title, items, hold, ..
            } => {
                write!(f, "{}", title)?;
                for item in items {
                    write!(f, "\n  {} {}", item.label, item.value)?;
                }
                if *hold {
                    write!(f, "\n  [hold to confirm]")?;
                }
                Ok(())
            }
            Screen::ShowMore {
                title,
                summary,
                button,
                ..
            } => write!(f, "{}\n  {}\n  [{}]", title, summary, button),
        }
    }
}

/// User or host decision for the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UserAction {
    Confirm,
    /// Hold-to-confirm gesture, required on screens with `hold`
    Hold,
    /// Expand a `ShowMore` screen
    ShowDetails,
    Reject,
    HostCancel,
}

/// Rendering and input capability
pub trait ConfirmationUi {
    fn confirm(&mut self, screen: &Screen) -> UserAction;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_json_shape() {
        let screen = Screen::Properties {
            id: "instruction_data",
            title: "1/1: Unsupported program".to_string(),
            items: vec![PropertyItem::bytes("Instruction data:", vec![0xab, 0x01])],
            hold: false,
        };
        let json = serde_json::to_value(&screen).unwrap();
        assert_eq!(json["kind"], "properties");
        assert_eq!(json["items"][0]["value"]["type"], "bytes");
        assert_eq!(json["items"][0]["value"]["value"], "ab01");
    }

    #[test]
    fn test_screen_text_rendering() {
        let screen = Screen::Properties {
            id: "confirm_transaction",
            title: "Confirm transaction".to_string(),
            items: vec![PropertyItem::text("Expected fee:", "5000 lamports")],
            hold: true,
        };
        assert!(screen.requires_hold());
        assert_eq!(
            screen.to_string(),
            "Confirm transaction\n  Expected fee: 5000 lamports\n  [hold to confirm]"
        );
        assert_eq!(screen.title(), Some("Confirm transaction"));
    }
}
