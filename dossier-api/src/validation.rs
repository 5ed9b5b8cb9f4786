//! Validation Traits
//!
//! Common validation patterns extracted from route handlers.

use crate::error::{ApiError, ApiResult};

/// Trait for validating non-empty strings.
pub trait ValidateNonEmpty {
    /// Validate that the value is non-empty.
    ///
    /// # Errors
    /// Returns `ApiError::missing_field` if the value is empty or
    /// whitespace-only.
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()>;
}

impl ValidateNonEmpty for str {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        if self.trim().is_empty() {
            return Err(ApiError::missing_field(field_name));
        }
        Ok(())
    }
}

impl ValidateNonEmpty for String {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        self.as_str().validate_non_empty(field_name)
    }
}

impl<T: ValidateNonEmpty> ValidateNonEmpty for Option<T> {
    fn validate_non_empty(&self, field_name: &str) -> ApiResult<()> {
        match self {
            Some(value) => value.validate_non_empty(field_name),
            None => Err(ApiError::missing_field(field_name)),
        }
    }
}

/// Trait for validating numeric ranges.
pub trait ValidateRange {
    /// Validate that the value is within an inclusive range.
    fn validate_range(&self, field_name: &str, min: Self, max: Self) -> ApiResult<()>
    where
        Self: Sized;
}

macro_rules! impl_validate_range {
    ($($t:ty),*) => {
        $(
            impl ValidateRange for $t {
                fn validate_range(&self, field_name: &str, min: Self, max: Self) -> ApiResult<()> {
                    if *self < min || *self > max {
                        return Err(ApiError::invalid_range(field_name, min as i64, max as i64));
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_range!(i8, i16, i32, i64);

/// Trait for checking if an update request has any fields set.
///
/// Implemented on PATCH request types so handlers can reject empty
/// updates uniformly.
pub trait HasUpdates {
    fn has_any_updates(&self) -> bool;

    /// Reject the request if no fields are present.
    fn require_updates(&self) -> ApiResult<()> {
        if !self.has_any_updates() {
            return Err(ApiError::validation_failed(
                "At least one field must be provided",
            ));
        }
        Ok(())
    }
}
