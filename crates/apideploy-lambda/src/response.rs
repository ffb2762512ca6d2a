// Response payload for the placeholder function
//
// API Gateway proxy integrations expect `body` to be a string, so the
// structured body is serialised to JSON text.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const NOT_IMPLEMENTED_MSG: &str = "not implemented";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceholderBody {
    pub msg: String,
    pub event: Value,
}

/// Echo `event` back inside a 200 response
pub fn placeholder_response(event: Value) -> serde_json::Result<PlaceholderResponse> {
    let body = PlaceholderBody {
        msg: NOT_IMPLEMENTED_MSG.to_string(),
        event,
    };
    Ok(PlaceholderResponse {
        status_code: 200,
        headers: BTreeMap::new(),
        body: serde_json::to_string(&body)?,
    })
}

impl PlaceholderResponse {
    pub fn parsed_body(&self) -> serde_json::Result<PlaceholderBody> {
        serde_json::from_str(&self.body)
    }
}
