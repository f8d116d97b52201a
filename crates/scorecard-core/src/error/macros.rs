//! Error macros for scorecard

/// Macro for rejecting a rubric during validation
#[macro_export]
macro_rules! bail_rubric {
    ($($arg:tt)*) => {
        return Err($crate::error::ScorecardError::invalid_rubric(format!($($arg)*)))
    };
}

/// Macro for creating usage errors
#[macro_export]
macro_rules! bail_usage {
    ($msg:expr) => {
        return Err($crate::error::ScorecardError::UsageError($msg.to_string()))
    };
}
