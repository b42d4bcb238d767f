//! The `{ code, message, data? }` wrapper every endpoint responds with.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The sole application-level success sentinel.
pub const SUCCESS_CODE: i64 = 200;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Success yields `data` (possibly absent); any other code becomes
    /// `ApiError::Application` carrying the server message.
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(ApiError::Application {
                code: self.code,
                message: self.message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_data_is_none() {
        let env: Envelope<Vec<u32>> =
            serde_json::from_str(r#"{"code":200,"message":"ok"}"#).unwrap();
        assert_eq!(env.into_result().unwrap(), None);
    }

    #[test]
    fn non_200_code_is_application_error() {
        let env: Envelope<u32> =
            serde_json::from_str(r#"{"code":1001,"message":"name is required"}"#).unwrap();
        let err = env.into_result().unwrap_err();
        assert!(matches!(
            err,
            ApiError::Application { code: 1001, ref message } if message == "name is required"
        ));
    }
}
