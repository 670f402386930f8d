use crate::errors::{AppError, AppResult};
use serde::Serialize;

pub(crate) fn to_json<T: Serialize + ?Sized>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))
}
