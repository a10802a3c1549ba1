use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use binjip_core::error::BinjipError;
use serde::Serialize;

/// Unified API error type
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, message)
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<BinjipError> for ApiError {
    fn from(err: BinjipError) -> Self {
        match &err {
            BinjipError::MissingColumns { .. } => {
                Self::unprocessable("엑셀 파일에 필수 열이 없습니다.").with_details(err.to_string())
            }
            BinjipError::UnknownDistrict { .. } => {
                Self::unprocessable("시군구 코드를 찾을 수 없는 지역이 있습니다.")
                    .with_details(err.to_string())
            }
            BinjipError::UnsupportedFormat { .. }
            | BinjipError::SpreadsheetParse { .. }
            | BinjipError::EmptyWorkbook => {
                Self::bad_request("엑셀 파일을 읽는 중 오류 발생").with_details(err.to_string())
            }
            BinjipError::BoundaryFetch { .. } | BinjipError::BoundaryInvalid { .. } => {
                Self::unavailable("GeoJSON 파일을 불러오는 데 오류가 발생했습니다.")
                    .with_details(err.to_string())
            }
            _ => Self::internal("지도를 만드는 중 오류가 발생했습니다.").with_details(err.to_string()),
        }
    }
}
