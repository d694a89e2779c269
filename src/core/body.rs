use crate::domain::model::{json_token_kind, BodyObject, BodyOutcome, BodyUnavailable};
use crate::domain::ports::RequestSource;
use crate::utils::error::IntakeError;
use serde_json::value::RawValue;
use std::collections::BTreeMap;

/// Reads the body once and decodes it. Never retried.
pub async fn load_body<S: RequestSource + ?Sized>(source: &S) -> BodyOutcome {
    match source.read_body().await {
        Ok(Some(bytes)) => decode_body(&bytes),
        Ok(None) => BodyOutcome::Unavailable(BodyUnavailable::Empty),
        Err(e) => BodyOutcome::failed(e),
    }
}

pub fn decode_body(bytes: &[u8]) -> BodyOutcome {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => return BodyOutcome::failed(e),
    };
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    if text.trim().is_empty() {
        return BodyOutcome::Unavailable(BodyUnavailable::Empty);
    }

    let root: &RawValue = match serde_json::from_str(text) {
        Ok(root) => root,
        Err(e) => return BodyOutcome::failed(e),
    };

    // 只接受 JSON 物件；陣列等其他型別視為解析失敗
    if !root.get().trim_start().starts_with('{') {
        return BodyOutcome::failed(IntakeError::NotAnObjectError {
            kind: json_token_kind(root.get()),
        });
    }

    // 屬性值先保留原始文字，需要時才個別解碼
    match serde_json::from_str::<BTreeMap<String, Box<RawValue>>>(root.get()) {
        Ok(properties) => BodyOutcome::Parsed(BodyObject::new(properties)),
        Err(e) => BodyOutcome::failed(e),
    }
}
