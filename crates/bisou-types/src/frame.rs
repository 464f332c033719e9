//! Farcaster Frame action payloads.
//!
//! A Frame client POSTs a signed message to the frame's `post_url` whenever a
//! button is pressed. The message is split in two halves: `untrustedData`,
//! which is plain JSON the client fills in, and `trustedData`, which carries
//! the signed protobuf bytes. Only the untrusted half is interpreted here.

use serde::{Deserialize, Serialize};

/// A Frame action message as delivered by the Farcaster client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameMessage {
    pub untrusted_data: UntrustedData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trusted_data: Option<TrustedData>,
}

/// Client-reported action data.
///
/// Nothing in here is authenticated; treat every field as user input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UntrustedData {
    /// Farcaster user id of the person who pressed the button.
    pub fid: u64,
    /// 1-based index of the pressed button.
    pub button_index: u8,
    /// Contents of the frame's text input, if it had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<u32>,
    /// The cast the frame was embedded in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast_id: Option<CastId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frame_action_body: Option<String>,
}

impl UntrustedData {
    /// Input text with surrounding whitespace removed, `None` when blank.
    pub fn input(&self) -> Option<&str> {
        self.input_text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Identifies a cast by author fid and hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastId {
    pub fid: u64,
    pub hash: String,
}

/// Signed message bytes (hex), unverified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustedData {
    pub message_bytes: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_message() {
        let value = json!({
            "untrustedData": {
                "fid": 2,
                "url": "https://example.com/frame-entry",
                "messageHash": "0xd2b1ddc6c88e865a33cb1a565e0058d757042974",
                "timestamp": 1706243218,
                "network": 1,
                "buttonIndex": 2,
                "inputText": " 42 ",
                "castId": { "fid": 226, "hash": "0xa48dd46161d8e57725f5e26e34ec19c13ff7f3b9" }
            },
            "trustedData": { "messageBytes": "d2b1ddc6c88e865a33cb1a565e0058d757042974" }
        });

        let msg: FrameMessage = serde_json::from_value(value).unwrap();
        assert_eq!(msg.untrusted_data.fid, 2);
        assert_eq!(msg.untrusted_data.button_index, 2);
        assert_eq!(msg.untrusted_data.input(), Some("42"));
        assert_eq!(msg.untrusted_data.cast_id.as_ref().unwrap().fid, 226);
        assert!(msg.trusted_data.is_some());
    }

    #[test]
    fn test_parse_minimal_message() {
        let msg: FrameMessage =
            serde_json::from_value(json!({ "untrustedData": { "fid": 7, "buttonIndex": 1 } }))
                .unwrap();
        assert_eq!(msg.untrusted_data.fid, 7);
        assert!(msg.untrusted_data.input_text.is_none());
        assert!(msg.trusted_data.is_none());
    }

    #[test]
    fn test_missing_fid_is_rejected() {
        let result: Result<FrameMessage, _> =
            serde_json::from_value(json!({ "untrustedData": { "buttonIndex": 1 } }));
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_input_is_none() {
        let data: UntrustedData =
            serde_json::from_value(json!({ "fid": 1, "buttonIndex": 1, "inputText": "   " }))
                .unwrap();
        assert_eq!(data.input(), None);
    }
}
