use axum::http::StatusCode;
use thiserror::Error;

/// Ошибки уровня сервисов. Сервисы возвращают anyhow::Result,
/// хендлеры разворачивают AppError обратно для выбора HTTP-статуса.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("duplicate: {0}")]
    Duplicate(String),

    #[error("version conflict: record was modified concurrently")]
    VersionConflict,
}

/// HTTP-статус для ошибки сервиса
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<AppError>() {
        Some(AppError::Validation(_)) => StatusCode::BAD_REQUEST,
        Some(AppError::NotFound(_)) => StatusCode::NOT_FOUND,
        Some(AppError::Duplicate(_)) => StatusCode::CONFLICT,
        Some(AppError::VersionConflict) => StatusCode::CONFLICT,
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: anyhow::Error = AppError::Validation("bad".into()).into();
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);

        let err: anyhow::Error = AppError::NotFound("Employee").into();
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);

        let err: anyhow::Error = AppError::Duplicate("tax id".into()).into();
        assert_eq!(status_for(&err), StatusCode::CONFLICT);

        let err: anyhow::Error = AppError::VersionConflict.into();
        assert_eq!(status_for(&err), StatusCode::CONFLICT);

        let err = anyhow::anyhow!("boom");
        assert_eq!(status_for(&err), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_survives_context() {
        let err: anyhow::Error = AppError::VersionConflict.into();
        let err = err.context("while updating a007_invoice");
        assert_eq!(status_for(&err), StatusCode::CONFLICT);
    }
}
