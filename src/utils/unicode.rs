/// Byte index of the char boundary before `byte_index`. Expects
/// `byte_index` to sit on a boundary, which holds for cursor positions.
pub fn prev_char_boundary(s: &str, byte_index: usize) -> usize {
    s[..byte_index]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte index of the char boundary after `byte_index`, or the end of
/// the string.
pub fn next_char_boundary(s: &str, byte_index: usize) -> usize {
    match s[byte_index..].chars().next() {
        Some(c) => byte_index + c.len_utf8(),
        None => byte_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prev_char_boundary() {
        let s = "aöb";
        assert_eq!(prev_char_boundary(s, 0), 0);
        assert_eq!(prev_char_boundary(s, 1), 0);
        assert_eq!(prev_char_boundary(s, 3), 1);
        assert_eq!(prev_char_boundary(s, 4), 3);
    }

    #[test]
    fn test_next_char_boundary() {
        let s = "aöb";
        assert_eq!(next_char_boundary(s, 0), 1);
        assert_eq!(next_char_boundary(s, 1), 3);
        assert_eq!(next_char_boundary(s, 3), 4);
        assert_eq!(next_char_boundary(s, 4), 4);
    }

    #[test]
    fn test_emoji() {
        let s = "👋🌍";
        assert_eq!(next_char_boundary(s, 0), 4);
        assert_eq!(prev_char_boundary(s, 8), 4);
    }
}
