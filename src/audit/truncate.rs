// ABOUTME: Truncator - bounds audit content to a character limit and appends
// ABOUTME: a marker recording the limit and the original size.

use crate::error::AuditError;

/// Default maximum logged characters.
pub const DEFAULT_MAX_LOG: usize = 5000;

/// Character-limited truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncator {
    max_len: usize,
}

impl Truncator {
    /// Create a truncator. `max_len` must be positive.
    pub fn new(max_len: usize) -> Result<Self, AuditError> {
        if max_len == 0 {
            return Err(AuditError::InvalidMaxLen(max_len));
        }
        Ok(Self { max_len })
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Return `text` unchanged if it fits, otherwise its first `max_len`
    /// characters followed by `##Truncated, max_log=N, original_size=M]`.
    pub fn truncate(&self, text: &str) -> String {
        let original_size = text.chars().count();
        if original_size <= self.max_len {
            return text.to_string();
        }

        let cut = text
            .char_indices()
            .nth(self.max_len)
            .map_or(text.len(), |(idx, _)| idx);
        format!(
            "{}##Truncated, max_log={}, original_size={}]",
            &text[..cut],
            self.max_len,
            original_size
        )
    }
}

impl Default for Truncator {
    fn default() -> Self {
        Self {
            max_len: DEFAULT_MAX_LOG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        let t = Truncator::new(5).unwrap();
        assert_eq!(t.truncate("final"), "final");
        assert_eq!(t.truncate(""), "");
    }

    #[test]
    fn test_long_text_truncated_with_marker() {
        let t = Truncator::new(5).unwrap();
        assert_eq!(
            t.truncate("final answer"),
            "final##Truncated, max_log=5, original_size=12]"
        );
    }

    #[test]
    fn test_length_is_limit_plus_suffix() {
        let t = Truncator::new(10).unwrap();
        let text = "x".repeat(25);
        let out = t.truncate(&text);
        let suffix = "##Truncated, max_log=10, original_size=25]";
        assert_eq!(out.chars().count(), 10 + suffix.chars().count());
        assert!(out.starts_with(&text[..10]));
        assert!(out.ends_with(suffix));
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let t = Truncator::new(3).unwrap();
        assert_eq!(t.truncate("héé"), "héé");
        assert_eq!(
            t.truncate("日本語です"),
            "日本語##Truncated, max_log=3, original_size=5]"
        );
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert!(matches!(
            Truncator::new(0),
            Err(AuditError::InvalidMaxLen(0))
        ));
    }

    #[test]
    fn test_default_limit() {
        assert_eq!(Truncator::default().max_len(), DEFAULT_MAX_LOG);
    }
}
