use crate::errors::TreeError;

/// Create a string of all available items.
pub fn items_to_strings(items: Vec<&str>) -> String {
    let mut s = String::new();
    for i in items {
        s.push_str(i);
        s.push_str(&String::from(", "));
    }
    s
}

// Validation
pub fn validate_positive_parameter(value: usize, parameter: &str) -> Result<(), TreeError> {
    if value == 0 {
        Err(TreeError::InvalidParameter(
            parameter.to_string(),
            "a positive integer".to_string(),
            value.to_string(),
        ))
    } else {
        Ok(())
    }
}
