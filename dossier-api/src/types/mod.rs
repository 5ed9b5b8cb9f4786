//! Request and response types for the Dossier API.
//!
//! Every successful response is wrapped in the `ApiResponse` envelope;
//! errors use the matching envelope produced by `ApiError`.

pub mod admin;
pub mod batch;
pub mod investigation;
pub mod job;
pub mod report;
pub mod webhook;

pub use admin::*;
pub use batch::*;
pub use investigation::*;
pub use job::*;
pub use report::*;
pub use webhook::*;

use serde::{Deserialize, Serialize};

/// Standard response envelope for successful operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiResponse<T> {
    /// Always true on the success path
    pub success: bool,
    /// Operation payload
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let envelope = ApiResponse::new(serde_json::json!({"id": 1}));
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["id"], 1);
    }
}
