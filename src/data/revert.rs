use alloy::rpc::json_rpc::ErrorPayload;
use alloy::transports::{RpcError, TransportErrorKind};

/// Shown when no extractor produces anything usable.
pub const FALLBACK_MESSAGE: &str = "Transaction failed";

type Extractor = fn(&ErrorPayload) -> Option<String>;

/// Extractors tried in order; the first non-empty result wins.
/// Order: ABI-encoded revert reason, first line of the message,
/// message nested in the error data, then the full message.
const EXTRACTORS: &[Extractor] = &[
    revert_reason,
    short_message,
    nested_data_message,
    full_message,
];

/// Turn an RPC failure into a single human-readable line.
pub fn describe(err: &RpcError<TransportErrorKind>) -> String {
    match err {
        RpcError::ErrorResp(payload) => describe_payload(payload),
        other => {
            let text = other.to_string();
            if text.trim().is_empty() {
                FALLBACK_MESSAGE.to_string()
            } else {
                text
            }
        }
    }
}

pub fn describe_payload(payload: &ErrorPayload) -> String {
    EXTRACTORS
        .iter()
        .find_map(|extract| extract(payload).filter(|s| !s.trim().is_empty()))
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

/// The error data often carries the raw revert return data as a hex string,
/// either directly or under a "data" key. Decode `Error(string)` / `Panic(uint)`.
fn revert_reason(payload: &ErrorPayload) -> Option<String> {
    let raw = payload.data.as_ref()?;
    let value: serde_json::Value = serde_json::from_str(raw.get()).ok()?;
    let hex = match &value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Object(map) => map.get("data")?.as_str()?.to_string(),
        _ => return None,
    };
    let bytes = alloy::primitives::hex::decode(hex.trim_start_matches("0x")).ok()?;
    alloy::sol_types::decode_revert_reason(&bytes)
}

fn short_message(payload: &ErrorPayload) -> Option<String> {
    payload
        .message
        .lines()
        .next()
        .map(|line| line.trim().to_string())
}

fn nested_data_message(payload: &ErrorPayload) -> Option<String> {
    let raw = payload.data.as_ref()?;
    let value: serde_json::Value = serde_json::from_str(raw.get()).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::to_string)
}

fn full_message(payload: &ErrorPayload) -> Option<String> {
    Some(payload.message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::hex;
    use alloy::sol_types::SolError;

    fn payload(value: serde_json::Value) -> ErrorPayload {
        serde_json::from_value(value).unwrap()
    }

    fn encoded_revert(reason: &str) -> String {
        let data = alloy::sol_types::Revert::from(reason.to_string()).abi_encode();
        format!("0x{}", hex::encode(data))
    }

    #[test]
    fn test_structured_reason_wins_over_message() {
        let p = payload(serde_json::json!({
            "code": 3,
            "message": "execution reverted",
            "data": encoded_revert("not the owner"),
        }));
        assert_eq!(describe_payload(&p), "revert: not the owner");
    }

    #[test]
    fn test_reason_under_data_key() {
        let p = payload(serde_json::json!({
            "code": 3,
            "message": "execution reverted",
            "data": { "data": encoded_revert("denied") },
        }));
        assert_eq!(describe_payload(&p), "revert: denied");
    }

    #[test]
    fn test_short_message_when_no_reason_data() {
        let p = payload(serde_json::json!({
            "code": -32000,
            "message": "insufficient funds for gas\nsupplied gas 21000",
        }));
        assert_eq!(describe_payload(&p), "insufficient funds for gas");
    }

    #[test]
    fn test_nested_data_message_when_message_empty() {
        let p = payload(serde_json::json!({
            "code": -32000,
            "message": "",
            "data": { "message": "out of gas" },
        }));
        assert_eq!(describe_payload(&p), "out of gas");
    }

    #[test]
    fn test_fallback_when_everything_empty() {
        let p = payload(serde_json::json!({
            "code": -32000,
            "message": "",
        }));
        assert_eq!(describe_payload(&p), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_undecodable_data_falls_through_to_message() {
        let p = payload(serde_json::json!({
            "code": 3,
            "message": "execution reverted",
            "data": "0x00",
        }));
        assert_eq!(describe_payload(&p), "execution reverted");
    }
}
