use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// Generic API response wrapper used across all handlers
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response with data
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Create a successful response without data
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        let msg = message.into();
        Self {
            success: false,
            message: msg.clone(),
            data: None,
            error: Some(msg),
        }
    }

    /// Create an error response with custom error message
    pub fn error_with_message(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Render a stored UTC timestamp the way the clients display it
pub fn format_local_timestamp(timestamp: DateTime<Utc>, offset: FixedOffset) -> String {
    timestamp.with_timezone(&offset).format("%d-%m-%Y %H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_error_response_carries_message_twice() {
        let response = ApiResponse::<()>::error("Club not found");
        assert!(!response.success);
        assert_eq!(response.message, "Club not found");
        assert_eq!(response.error.as_deref(), Some("Club not found"));
        assert!(response.data.is_none());
    }

    #[test]
    fn test_local_timestamp_applies_offset() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 1, 20, 30, 5).unwrap();
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        assert_eq!(format_local_timestamp(timestamp, offset), "02-03-2024 03:30:05");
    }
}
