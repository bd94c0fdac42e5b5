//! Fixed-capacity text that truncates instead of overflowing.

use core::fmt;

use crate::{TEXT_ADDRESS_LENGTH, TEXT_AMOUNT_LENGTH};

/// Text of at most `MAX` bytes stored inline.
///
/// Construction never fails. Longer input is cut at the last UTF-8 character
/// boundary that still fits, and the cut is remembered so callers can tell.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct BoundedText<const MAX: usize> {
    data: [u8; MAX],
    len: usize,
    truncated: bool,
}

/// Amount of one output, e.g. `"0.01"`.
pub type AmountText = BoundedText<{ TEXT_AMOUNT_LENGTH - 1 }>;

/// Destination address of one output.
pub type AddressText = BoundedText<{ TEXT_ADDRESS_LENGTH - 1 }>;

impl<const MAX: usize> BoundedText<MAX> {
    /// Empty text
    pub const fn new() -> Self {
        Self {
            data: [0; MAX],
            len: 0,
            truncated: false,
        }
    }

    /// Copy `text`, keeping as many whole characters as fit in `MAX` bytes.
    pub fn truncating(text: &str) -> Self {
        let mut end = text.len().min(MAX);
        while !text.is_char_boundary(end) {
            end -= 1;
        }

        let mut data = [0u8; MAX];
        data[..end].copy_from_slice(&text.as_bytes()[..end]);
        Self {
            data,
            len: end,
            truncated: end < text.len(),
        }
    }

    /// Capacity in bytes
    pub const fn capacity(&self) -> usize {
        MAX
    }

    pub fn as_str(&self) -> &str {
        // Only whole characters of a valid &str are ever copied in.
        core::str::from_utf8(&self.data[..self.len]).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the source text was longer than what is stored.
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl<const MAX: usize> Default for BoundedText<MAX> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const MAX: usize> From<&str> for BoundedText<MAX> {
    fn from(text: &str) -> Self {
        Self::truncating(text)
    }
}

impl<const MAX: usize> AsRef<str> for BoundedText<MAX> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<const MAX: usize> fmt::Display for BoundedText<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<const MAX: usize> fmt::Debug for BoundedText<MAX> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_kept_whole() {
        let text = AmountText::truncating("0.01");
        assert_eq!(text.as_str(), "0.01");
        assert_eq!(text.len(), 4);
        assert!(!text.is_truncated());
    }

    #[test]
    fn test_amount_capacity_leaves_room_for_terminator() {
        assert_eq!(AmountText::new().capacity(), 21);
        assert_eq!(AddressText::new().capacity(), 35);
    }

    #[test]
    fn test_long_text_is_truncated_to_capacity() {
        let long = "1RaTTuSEN7jJUDiW1EGogHwtek7g9BiEnEXTRA";
        let text = AddressText::truncating(long);
        assert_eq!(text.len(), 35);
        assert_eq!(text.as_str(), &long[..35]);
        assert!(text.is_truncated());
    }

    #[test]
    fn test_exact_fit_is_not_truncated() {
        let exact = "123456789012345678901";
        let text = AmountText::truncating(exact);
        assert_eq!(text.as_str(), exact);
        assert!(!text.is_truncated());
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'é' is two bytes; the fourth byte would split it.
        let text = BoundedText::<4>::truncating("abcé");
        assert_eq!(text.as_str(), "abc");
        assert!(text.is_truncated());
    }

    #[test]
    fn test_display_and_debug() {
        let text = AmountText::from("1.5");
        assert_eq!(alloc::format!("{text}"), "1.5");
        assert_eq!(alloc::format!("{text:?}"), "\"1.5\"");
    }
}
