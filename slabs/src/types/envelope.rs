use serde::{Deserialize, Serialize};

use crate::error::{Result, SlabError};

/// Standard backend response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub status_code: u16,
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    pub success: bool,
}

impl<T> ApiResponse<T> {
    /// Wrap `data` as a successful response.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: 200,
            data: Some(data),
            message: message.into(),
            success: true,
        }
    }

    /// Unwrap the payload of a successful response.
    ///
    /// # Errors
    ///
    /// Returns `SlabError::Api` if `success` is false, and
    /// `SlabError::MalformedRecord` if a successful response has no data.
    pub fn into_data(self) -> Result<T> {
        self.payload()?
            .ok_or_else(|| SlabError::MalformedRecord("successful response without data".into()))
    }

    /// Like [`ApiResponse::into_data`], but a missing payload is empty.
    ///
    /// # Errors
    ///
    /// Returns `SlabError::Api` if `success` is false.
    pub fn into_data_or_default(self) -> Result<T>
    where
        T: Default,
    {
        Ok(self.payload()?.unwrap_or_default())
    }

    fn payload(self) -> Result<Option<T>> {
        if !self.success {
            return Err(SlabError::Api {
                status: self.status_code,
                message: self.message,
            });
        }
        Ok(self.data)
    }
}
