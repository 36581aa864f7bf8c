use serde::Serialize;

use crate::error::TrioError;

/// Boundary payload: either `{"data": ...}` or `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Response<T> {
    Data { data: T },
    Error { error: String },
}

impl<T> Response<T> {
    pub fn data(data: T) -> Self {
        Response::Data { data }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Response::Error {
            error: message.into(),
        }
    }
}

impl<T> From<Result<T, TrioError>> for Response<T> {
    fn from(result: Result<T, TrioError>) -> Self {
        match result {
            Ok(data) => Response::data(data),
            Err(e) => Response::error(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_data_response_shape() {
        let response: Response<bool> = Ok(true).into();
        assert!(matches!(response, Response::Data { data: true }));
        assert_eq!(serde_json::to_value(&response).unwrap(), json!({ "data": true }));
    }

    #[test]
    fn test_error_response_shape() {
        let response: Response<String> = Err(TrioError::Unauthorized).into();
        assert!(matches!(response, Response::Error { .. }));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "error": "you are not allowed to perform this action" })
        );
    }
}
