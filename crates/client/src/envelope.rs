//! The `{ success, data, error, message }` wrapper every endpoint returns.

use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Normalized outcome of an API call.
pub type ApiResult<T> = Result<ApiSuccess<T>, ApiError>;

/// Page metadata carried by list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// Wire shape of a response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> Envelope<T> {
    /// Interpret a decoded body. `success: false` becomes
    /// [`ApiError::Application`].
    pub fn into_result(self) -> ApiResult<T> {
        if self.success {
            Ok(ApiSuccess {
                data: self.data,
                message: self.message,
                pagination: self.pagination,
            })
        } else {
            let message = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "request failed".to_string());
            Err(ApiError::Application(message))
        }
    }
}

impl<T> From<ApiResult<T>> for Envelope<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(ok) => Envelope {
                success: true,
                data: ok.data,
                error: None,
                message: ok.message,
                pagination: ok.pagination,
            },
            Err(err) => Envelope {
                success: false,
                data: None,
                error: Some(err.message()),
                message: None,
                pagination: None,
            },
        }
    }
}

/// Success half of an [`ApiResult`]; the body as the server sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSuccess<T> {
    pub data: Option<T>,
    pub message: Option<String>,
    pub pagination: Option<Pagination>,
}

impl<T> ApiSuccess<T> {
    /// The payload, treating an absent one as a failure.
    pub fn into_data(self) -> Result<T, ApiError> {
        self.data.ok_or(ApiError::MissingData)
    }
}
