//! Text-buffer helpers shared by the time and date variants.
//!
//! Buffers are built one key at a time, so segments may be empty or
//! partially typed. Parsing is deliberately lenient (`""` reads as zero);
//! range checks happen when a separator is pressed or on commit.

use crate::error::CalcError;

/// Appends `digit` to `segment`, pushing extra digits off the front so the
/// segment never exceeds `width`.
pub(crate) fn push_digit(segment: &str, digit: char, width: usize) -> String {
    let mut s = String::with_capacity(segment.len() + 1);
    s.push_str(segment);
    s.push(digit);
    let excess = s.chars().count().saturating_sub(width);
    s.chars().skip(excess).collect()
}

/// Splits `text` on every character matching `is_sep`.
pub(crate) fn split<F>(text: &str, is_sep: F) -> Vec<&str>
where
    F: Fn(char) -> bool,
{
    text.split(is_sep).collect()
}

/// Byte offset where the last segment of `text` starts.
pub(crate) fn last_segment_start<F>(text: &str, is_sep: F) -> usize
where
    F: Fn(char) -> bool,
{
    text.char_indices()
        .filter(|(_, c)| is_sep(*c))
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8())
}

/// Reads the leading digits of a segment; anything else reads as zero.
pub(crate) fn segment_int(segment: &str) -> i64 {
    let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Replaces the last segment of `text` with `digit` appended to it.
pub(crate) fn append_to_last<F>(text: &mut String, digit: char, width: usize, is_sep: F)
where
    F: Fn(char) -> bool,
{
    let start = last_segment_start(text, is_sep);
    let updated = push_digit(&text[start..], digit, width);
    text.truncate(start);
    text.push_str(&updated);
}

/// Zero-pads a one-digit (or empty) last segment to two digits.
pub(crate) fn pad_last<F>(text: &mut String, is_sep: F)
where
    F: Fn(char) -> bool,
{
    let start = last_segment_start(text, is_sep);
    match text.len() - start {
        0 => text.push_str("00"),
        1 => text.insert(start, '0'),
        _ => {}
    }
}

/// Closes the last segment and opens a new one.
///
/// At most three segments exist. The segment being closed must already be
/// in range (`last_ok`); from the second segment on it is zero-padded.
pub(crate) fn append_separator<F>(
    text: &mut String,
    sep: char,
    is_sep: F,
    last_ok: bool,
) -> Result<(), CalcError>
where
    F: Fn(char) -> bool + Copy,
{
    let count = split(text, is_sep).len();
    if count >= 3 {
        return Err(CalcError::rejected("all segments entered"));
    }
    if !last_ok {
        return Err(CalcError::rejected("segment out of range"));
    }
    if count > 1 {
        pad_last(text, is_sep);
    } else if text.is_empty() {
        text.push('0');
    }
    text.push(sep);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn colon(c: char) -> bool {
        c == ':'
    }

    #[test]
    fn push_digit_drops_leading_digits() {
        assert_eq!(push_digit("", '5', 2), "5");
        assert_eq!(push_digit("5", '3', 2), "53");
        assert_eq!(push_digit("53", '7', 2), "37");
        assert_eq!(push_digit("202", '4', 4), "2024");
        assert_eq!(push_digit("2024", '5', 4), "0245");
    }

    #[test]
    fn append_to_last_only_touches_last_segment() {
        let mut s = "12:34".to_string();
        append_to_last(&mut s, '5', 2, colon);
        assert_eq!(s, "12:45");

        let mut s = "12:".to_string();
        append_to_last(&mut s, '5', 2, colon);
        assert_eq!(s, "12:5");
    }

    #[test]
    fn pad_last_pads_short_segments() {
        let mut s = "1:5".to_string();
        pad_last(&mut s, colon);
        assert_eq!(s, "1:05");

        let mut s = "1:".to_string();
        pad_last(&mut s, colon);
        assert_eq!(s, "1:00");

        let mut s = "1:45".to_string();
        pad_last(&mut s, colon);
        assert_eq!(s, "1:45");
    }

    #[test]
    fn append_separator_pads_and_limits() {
        let mut s = "1:5".to_string();
        append_separator(&mut s, ':', colon, true).unwrap();
        assert_eq!(s, "1:05:");

        let mut s = "8".to_string();
        append_separator(&mut s, ':', colon, true).unwrap();
        assert_eq!(s, "8:");

        let mut s = "1:05:30".to_string();
        assert!(append_separator(&mut s, ':', colon, true).is_err());
        assert_eq!(s, "1:05:30");

        let mut s = "1:75".to_string();
        assert!(append_separator(&mut s, ':', colon, false).is_err());
        assert_eq!(s, "1:75");
    }

    #[test]
    fn segment_int_is_lenient() {
        assert_eq!(segment_int("07"), 7);
        assert_eq!(segment_int(""), 0);
        assert_eq!(segment_int("12x"), 12);
    }

    #[test]
    fn split_keeps_empty_trailing_segment() {
        assert_eq!(split("5:", colon), vec!["5", ""]);
        assert_eq!(split("5", colon), vec!["5"]);
    }
}
