/// Input mode for the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Normal mode - navigating the board
    #[default]
    Normal,
    /// Typing into the "New Task" field
    InputTitle,
}

/// Byte offset of the `pos`-th char (or the end of the string)
pub(crate) fn byte_index(s: &str, pos: usize) -> usize {
    s.char_indices().nth(pos).map(|(i, _)| i).unwrap_or(s.len())
}

/// Find the previous word boundary (for Alt+Left), in chars
pub(crate) fn word_boundary_left(s: &str, pos: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let pos = pos.min(chars.len());
    if pos == 0 {
        return 0;
    }
    let mut i = pos - 1;
    // Skip whitespace/punctuation
    while i > 0 && !chars[i].is_alphanumeric() {
        i -= 1;
    }
    // Skip word characters
    while i > 0 && chars[i - 1].is_alphanumeric() {
        i -= 1;
    }
    i
}

/// Find the next word boundary (for Alt+Right), in chars
pub(crate) fn word_boundary_right(s: &str, pos: usize) -> usize {
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();
    if pos >= len {
        return len;
    }
    let mut i = pos;
    // Skip current word characters
    while i < len && chars[i].is_alphanumeric() {
        i += 1;
    }
    // Skip whitespace/punctuation
    while i < len && !chars[i].is_alphanumeric() {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_multibyte() {
        assert_eq!(byte_index("héllo", 0), 0);
        assert_eq!(byte_index("héllo", 2), 3);
        assert_eq!(byte_index("héllo", 99), 6);
    }

    #[test]
    fn test_word_boundary_left_from_end() {
        assert_eq!(word_boundary_left("hello world", 11), 6);
    }

    #[test]
    fn test_word_boundary_left_between_words() {
        assert_eq!(word_boundary_left("hello world", 6), 0);
    }

    #[test]
    fn test_word_boundary_left_mid_word() {
        assert_eq!(word_boundary_left("hello world", 8), 6);
    }

    #[test]
    fn test_word_boundary_left_at_start() {
        assert_eq!(word_boundary_left("hello", 0), 0);
    }

    #[test]
    fn test_word_boundary_left_multiple_spaces() {
        assert_eq!(word_boundary_left("hello   world", 13), 8);
    }

    #[test]
    fn test_word_boundary_right_from_start() {
        assert_eq!(word_boundary_right("hello world", 0), 6);
    }

    #[test]
    fn test_word_boundary_right_at_end() {
        assert_eq!(word_boundary_right("hello", 5), 5);
    }

    #[test]
    fn test_word_boundary_right_non_ascii() {
        assert_eq!(word_boundary_right("café au lait", 0), 5);
    }
}
