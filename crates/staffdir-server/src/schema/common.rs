//! Response bodies shared across resources.

use serde::{Deserialize, Serialize};

/// `{"message": ...}` body returned by successful deletes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
