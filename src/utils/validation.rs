// Validation utilities
// Author: Gabriel Demetrios Lafis

/// Validate that a numeric value is in range
pub fn validate_range<T: PartialOrd + std::fmt::Display>(
    value: T,
    min: T,
    max: T,
    name: &str,
) -> Result<(), String> {
    if value < min || value > max {
        Err(format!(
            "'{}' must be between {} and {}",
            name, min, max
        ))
    } else {
        Ok(())
    }
}

/// Validate that a string value is not empty
pub fn validate_not_empty(value: &str, name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("'{}' cannot be empty", name))
    } else {
        Ok(())
    }
}
