//! Utility functions for value normalization

/// Normalize region value (e.g., "us_east_1" -> "us-east-1")
pub fn normalize_region(s: &str) -> String {
    s.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_region() {
        assert_eq!(normalize_region("us_east_1"), "us-east-1");
        assert_eq!(normalize_region("us-east-1"), "us-east-1");
    }
}
