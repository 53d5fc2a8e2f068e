use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

#[derive(Debug, Clone)]
pub enum AgencyError {
    DatabaseConfig(String),
    DatabaseConnection(String),
    DatabaseOperation(String),
    FileOperation(String),
    Validation(String),
    NotFound(String),
    Conflict(String),
    InvalidLink(String),
    Serialization(String),
    DateParse(String),
}

impl AgencyError {
    /// Stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AgencyError::DatabaseConfig(_) => "E001",
            AgencyError::DatabaseConnection(_) => "E002",
            AgencyError::DatabaseOperation(_) => "E003",
            AgencyError::FileOperation(_) => "E004",
            AgencyError::Validation(_) => "E005",
            AgencyError::NotFound(_) => "E006",
            AgencyError::Conflict(_) => "E007",
            AgencyError::InvalidLink(_) => "E008",
            AgencyError::Serialization(_) => "E009",
            AgencyError::DateParse(_) => "E010",
        }
    }

    /// Human readable error category
    pub fn error_type(&self) -> &'static str {
        match self {
            AgencyError::DatabaseConfig(_) => "Database Configuration Error",
            AgencyError::DatabaseConnection(_) => "Database Connection Error",
            AgencyError::DatabaseOperation(_) => "Database Operation Error",
            AgencyError::FileOperation(_) => "File Operation Error",
            AgencyError::Validation(_) => "Validation Error",
            AgencyError::NotFound(_) => "Resource Not Found",
            AgencyError::Conflict(_) => "Conflict",
            AgencyError::InvalidLink(_) => "Invalid Link",
            AgencyError::Serialization(_) => "Serialization Error",
            AgencyError::DateParse(_) => "Date Parse Error",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AgencyError::DatabaseConfig(msg) => msg,
            AgencyError::DatabaseConnection(msg) => msg,
            AgencyError::DatabaseOperation(msg) => msg,
            AgencyError::FileOperation(msg) => msg,
            AgencyError::Validation(msg) => msg,
            AgencyError::NotFound(msg) => msg,
            AgencyError::Conflict(msg) => msg,
            AgencyError::InvalidLink(msg) => msg,
            AgencyError::Serialization(msg) => msg,
            AgencyError::DateParse(msg) => msg,
        }
    }

    /// Errors a user can act on (shown as a flash message instead of a 500)
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            AgencyError::Validation(_)
                | AgencyError::NotFound(_)
                | AgencyError::Conflict(_)
                | AgencyError::InvalidLink(_)
        )
    }

    /// Colored output for terminal use
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AgencyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AgencyError {}

impl AgencyError {
    pub fn database_config<T: Into<String>>(msg: T) -> Self {
        AgencyError::DatabaseConfig(msg.into())
    }

    pub fn database_connection<T: Into<String>>(msg: T) -> Self {
        AgencyError::DatabaseConnection(msg.into())
    }

    pub fn database_operation<T: Into<String>>(msg: T) -> Self {
        AgencyError::DatabaseOperation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        AgencyError::FileOperation(msg.into())
    }

    pub fn validation<T: Into<String>>(msg: T) -> Self {
        AgencyError::Validation(msg.into())
    }

    pub fn not_found<T: Into<String>>(msg: T) -> Self {
        AgencyError::NotFound(msg.into())
    }

    pub fn conflict<T: Into<String>>(msg: T) -> Self {
        AgencyError::Conflict(msg.into())
    }

    pub fn invalid_link<T: Into<String>>(msg: T) -> Self {
        AgencyError::InvalidLink(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        AgencyError::Serialization(msg.into())
    }

    pub fn date_parse<T: Into<String>>(msg: T) -> Self {
        AgencyError::DateParse(msg.into())
    }
}

impl From<sea_orm::DbErr> for AgencyError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                AgencyError::Conflict(detail)
            }
            _ => AgencyError::DatabaseOperation(err.to_string()),
        }
    }
}

impl From<std::io::Error> for AgencyError {
    fn from(err: std::io::Error) -> Self {
        AgencyError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AgencyError {
    fn from(err: serde_json::Error) -> Self {
        AgencyError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AgencyError {
    fn from(err: chrono::ParseError) -> Self {
        AgencyError::DateParse(err.to_string())
    }
}

/// Anything that escapes a handler is a server fault; user-facing errors are
/// turned into redirects before they get here.
impl ResponseError for AgencyError {
    fn status_code(&self) -> StatusCode {
        match self {
            AgencyError::Validation(_) | AgencyError::DateParse(_) => StatusCode::BAD_REQUEST,
            AgencyError::NotFound(_) | AgencyError::InvalidLink(_) => StatusCode::NOT_FOUND,
            AgencyError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("Request failed: [{}] {}", self.code(), self);
        HttpResponse::build(self.status_code())
            .content_type("text/plain; charset=utf-8")
            .body(format!("{} ({})", self.error_type(), self.code()))
    }
}

pub type Result<T> = std::result::Result<T, AgencyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let errors = [
            AgencyError::database_config("x"),
            AgencyError::database_connection("x"),
            AgencyError::database_operation("x"),
            AgencyError::file_operation("x"),
            AgencyError::validation("x"),
            AgencyError::not_found("x"),
            AgencyError::conflict("x"),
            AgencyError::invalid_link("x"),
            AgencyError::serialization("x"),
            AgencyError::date_parse("x"),
        ];
        let mut codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
    }

    #[test]
    fn test_format_simple() {
        let err = AgencyError::validation("Please fill in all required fields.");
        assert_eq!(
            err.format_simple(),
            "Validation Error: Please fill in all required fields."
        );
        assert_eq!(err.to_string(), err.format_simple());
    }

    #[test]
    fn test_user_facing_classification() {
        assert!(AgencyError::validation("x").is_user_facing());
        assert!(AgencyError::invalid_link("x").is_user_facing());
        assert!(!AgencyError::database_operation("x").is_user_facing());
    }

    #[test]
    fn test_response_status() {
        assert_eq!(
            AgencyError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AgencyError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: AgencyError = serde_json::from_str::<Vec<String>>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, AgencyError::Serialization(_)));
    }
}
