//! Null value handling for table cells

/// Null value configuration
#[derive(Debug, Clone)]
pub struct NullConfig {
    /// Patterns to treat as null
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,
}

impl Default for NullConfig {
    fn default() -> Self {
        Self {
            patterns: ["", "-", "N/A", "NA", "NaN", "null", "None"]
                .iter()
                .map(|p| p.to_string())
                .collect(),
            trim_whitespace: true,
        }
    }
}

impl NullConfig {
    /// Check if a value should be treated as null
    pub fn is_null(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns
            .iter()
            .any(|pattern| test_value.eq_ignore_ascii_case(pattern))
    }

    /// Parse a numeric cell; nulls and non-finite numbers become `None`
    ///
    /// Returns `Err` with the offending text when the cell is neither null
    /// nor a number.
    pub fn parse_number<'a>(&self, value: &'a str) -> Result<Option<f64>, &'a str> {
        if self.is_null(value) {
            return Ok(None);
        }
        match value.trim().parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Some(number)),
            Ok(_) => Ok(None),
            Err(_) => Err(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_tokens() {
        let config = NullConfig::default();
        assert!(config.is_null(""));
        assert!(config.is_null("  n/a "));
        assert!(config.is_null("nan"));
        assert!(!config.is_null("0"));
    }

    #[test]
    fn test_parse_number() {
        let config = NullConfig::default();
        assert_eq!(config.parse_number(" 7.804 "), Ok(Some(7.804)));
        assert_eq!(config.parse_number("NA"), Ok(None));
        assert_eq!(config.parse_number("inf"), Ok(None));
        assert_eq!(config.parse_number("lots"), Err("lots"));
    }
}
