use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// A textual option that is not one of its enumerated values
    #[error("Invalid {name}: {value}\nChoose one of {choices}", choices = .valid.join(", "))]
    InvalidArgument {
        name: &'static str,
        value: String,
        valid: Vec<&'static str>,
    },

    /// Sort requested on a column the table does not have
    #[error("Column {column} out of range (table has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    /// Malformed line in an endpoint list
    #[error("Endpoint list error at line {line}: {message}")]
    EndpointParse { line: u64, message: String },

    /// Error from I/O operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from the CSV reader
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl AppError {
    pub fn invalid_argument(name: &'static str, value: &str, valid: &[&'static str]) -> Self {
        AppError::InvalidArgument {
            name,
            value: value.to_string(),
            valid: valid.to_vec(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument { .. }
            | AppError::ColumnOutOfRange { .. }
            | AppError::EndpointParse { .. } => StatusCode::BAD_REQUEST,
            AppError::IoError(_) | AppError::CsvError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "status": "error",
            "message": self.to_string()
        }))
    }
}

/// Result type for application
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_lists_choices() {
        let err = AppError::invalid_argument("purpose", "bogus", &["capture", "display"]);
        assert_eq!(err.to_string(), "Invalid purpose: bogus\nChoose one of capture, display");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn io_errors_are_server_errors() {
        let err = AppError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
