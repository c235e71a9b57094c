//! Structured Error Handling for mamdani
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured error values (JSON-friendly)
//! - Hints for resolving configuration mistakes
//!
//! # Error Categories
//!
//! - Geometry errors - evaluating a line along the wrong axis
//! - Shape errors - malformed membership functions
//! - Rule errors - unknown labels, incomplete rule maps
//! - Config errors - TOML configuration issues
//!
//! Note that an empty defuzzification result (total area zero) is *not* an
//! error; `FuzzyLogic::determine` reports it as `Ok(None)`.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Geometry errors (1xxx)
    /// Evaluating a vertical line at an x coordinate
    VerticalEvaluation = 1000,
    /// Evaluating a horizontal line at a y coordinate
    HorizontalEvaluation = 1001,

    // Shape errors (2xxx)
    /// Generic malformed membership function
    InvalidShape = 2000,
    /// Trapezoid breakpoints out of order
    InvalidTrapezoid = 2001,
    /// Compound breakpoints violate the partition invariant
    InvalidBreakpoints = 2002,

    // Rule errors (3xxx)
    /// A label that is not part of the referenced fuzzifier
    UnknownLabel = 3000,
    /// Duplicate label inside one fuzzifier
    DuplicateLabel = 3001,
    /// Rule map keys do not match the output fuzzifier's labels
    RuleMapMismatch = 3002,
    /// No intersection resolver registered for a shape-kind pair
    NoResolver = 3003,

    // Config errors (7xxx)
    /// Generic configuration error
    ConfigError = 7000,
    /// Invalid TOML syntax
    InvalidConfigSyntax = 7001,
    /// A config value references something that does not exist
    InvalidConfigValue = 7002,

    // Internal errors (9xxx)
    /// Internal error
    InternalError = 9000,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::VerticalEvaluation => "Cannot evaluate a vertical line at an x coordinate",
            ErrorCode::HorizontalEvaluation => {
                "Cannot evaluate a horizontal line at a y coordinate"
            }
            ErrorCode::InvalidShape => "Malformed membership function",
            ErrorCode::InvalidTrapezoid => "Trapezoid breakpoints out of order",
            ErrorCode::InvalidBreakpoints => "Compound breakpoints violate the partition invariant",
            ErrorCode::UnknownLabel => "Unknown fuzzy value",
            ErrorCode::DuplicateLabel => "Duplicate fuzzy value label",
            ErrorCode::RuleMapMismatch => "Rule map does not match output labels",
            ErrorCode::NoResolver => "No intersection resolver registered",
            ErrorCode::ConfigError => "Configuration error",
            ErrorCode::InvalidConfigSyntax => "Invalid configuration syntax",
            ErrorCode::InvalidConfigValue => "Invalid configuration value",
            ErrorCode::InternalError => "Internal error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for mamdani
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuzzyError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FuzzyError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for common error types
    // ========================================================================

    /// Create a vertical-evaluation geometry error
    pub fn vertical_evaluation() -> Self {
        Self::new(
            ErrorCode::VerticalEvaluation,
            "cannot evaluate a vertical line at a given x coordinate",
        )
    }

    /// Create a horizontal-evaluation geometry error
    pub fn horizontal_evaluation() -> Self {
        Self::new(
            ErrorCode::HorizontalEvaluation,
            "cannot evaluate a horizontal line at a given y coordinate",
        )
    }

    /// Create a malformed-shape error
    pub fn invalid_shape(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidShape, message)
    }

    /// Create an unknown-label error
    pub fn unknown_label(label: &str) -> Self {
        Self::new(
            ErrorCode::UnknownLabel,
            format!("unknown fuzzy value: {}", label),
        )
    }

    /// Create a missing-resolver error
    pub fn no_resolver(kind_a: &str, kind_b: &str) -> Self {
        Self::new(
            ErrorCode::NoResolver,
            format!(
                "no intersection resolver registered for '{}' x '{}'",
                kind_a, kind_b
            ),
        )
        .with_hint("register one via FuzzyLogic::register_intersection_resolver")
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":"INTERNAL_ERROR","message":"{}"}}"#, self.message)
        })
    }
}

impl fmt::Display for FuzzyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref hint) = self.hint {
            write!(f, "\nHint: {}", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for FuzzyError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<toml::de::Error> for FuzzyError {
    fn from(err: toml::de::Error) -> Self {
        FuzzyError::config(err.to_string()).with_code(ErrorCode::InvalidConfigSyntax)
    }
}

// ============================================================================
// Result type alias
// ============================================================================

/// A Result type using FuzzyError
pub type FuzzyResult<T> = Result<T, FuzzyError>;

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FuzzyError::unknown_label("lukewarm");
        assert_eq!(err.code, ErrorCode::UnknownLabel);
        assert!(err.message.contains("lukewarm"));
    }

    #[test]
    fn test_error_with_hint() {
        let err = FuzzyError::config("missing output fuzzifier")
            .with_hint("declare an [output] section");

        assert_eq!(err.hint, Some("declare an [output] section".to_string()));
    }

    #[test]
    fn test_error_display() {
        let err = FuzzyError::no_resolver("trapezoid", "gaussian");

        let display = err.to_string();
        assert!(display.contains("[3003]"));
        assert!(display.contains("trapezoid"));
        assert!(display.contains("Hint:"));
    }

    #[test]
    fn test_error_to_json() {
        let err = FuzzyError::vertical_evaluation();
        let json = err.to_json();
        assert!(json.contains("VERTICAL_EVALUATION"));
    }

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::VerticalEvaluation.code(), 1000);
        assert_eq!(ErrorCode::UnknownLabel.code(), 3000);
        assert_eq!(ErrorCode::ConfigError.code(), 7000);
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("not = = valid").unwrap_err();
        let err: FuzzyError = toml_err.into();
        assert_eq!(err.code, ErrorCode::InvalidConfigSyntax);
    }
}
