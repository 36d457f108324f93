//! JSON wire format.
//!
//! ```text
//! {"type":"magnifierAction","action":"activate","data":{"x":..,"y":..,"width":..,"height":..}}
//! {"type":"magnifierStateChange","magnified":true}
//! {"success":true}
//! ```

use crate::MagnifierMessage;
use core_types::SelectionRegion;
use serde::{Deserialize, Serialize};

const ACTION_ACTIVATE: &str = "activate";

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
enum WireMessage {
    #[serde(rename = "magnifierAction")]
    Action {
        action: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        data: Option<SelectionRegion>,
    },
    #[serde(rename = "magnifierStateChange")]
    StateChange { magnified: bool },
}

/// Acknowledgement sent back on the request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub success: bool,
}

#[derive(Debug)]
pub enum DecodeError {
    Json(serde_json::Error),
    UnknownAction { action: String },
    MissingRegion,
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Json(e) => write!(f, "malformed message: {e}"),
            DecodeError::UnknownAction { action } => write!(f, "unknown action: {action:?}"),
            DecodeError::MissingRegion => f.write_str("activation request without a region"),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        DecodeError::Json(e)
    }
}

pub fn encode(message: &MagnifierMessage) -> Result<String, serde_json::Error> {
    let wire = match *message {
        MagnifierMessage::ActivationRequest { region } => WireMessage::Action {
            action: ACTION_ACTIVATE.to_string(),
            data: Some(region),
        },
        MagnifierMessage::StateChange { magnified } => WireMessage::StateChange { magnified },
    };
    serde_json::to_string(&wire)
}

pub fn decode(payload: &str) -> Result<MagnifierMessage, DecodeError> {
    match serde_json::from_str::<WireMessage>(payload)? {
        WireMessage::Action { action, data } => {
            if action != ACTION_ACTIVATE {
                return Err(DecodeError::UnknownAction { action });
            }
            let region = data.ok_or(DecodeError::MissingRegion)?;
            Ok(MagnifierMessage::ActivationRequest { region })
        }
        WireMessage::StateChange { magnified } => Ok(MagnifierMessage::StateChange { magnified }),
    }
}

pub fn encode_reply(reply: &Reply) -> Result<String, serde_json::Error> {
    serde_json::to_string(reply)
}

pub fn decode_reply(payload: &str) -> Result<Reply, DecodeError> {
    Ok(serde_json::from_str(payload)?)
}
