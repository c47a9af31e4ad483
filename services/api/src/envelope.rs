use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// `{success: true, data, timestamp}` wrapper for every analytics response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
    pub timestamp: String,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data,
            timestamp: now_timestamp(),
        }
    }
}

/// ISO-8601 UTC with millisecond precision, e.g. `2026-10-19T14:30:00.000Z`.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let json = serde_json::to_value(ApiResponse::success(serde_json::json!({"a": 1}))).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["a"], 1);
        let ts = json["timestamp"].as_str().unwrap();
        assert!(ts.ends_with('Z'));
        assert_eq!(ts.len(), "2026-10-19T14:30:00.000Z".len());
    }
}
