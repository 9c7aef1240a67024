//! Plate text normalization and structural parsing.
//!
//! Raw recognizer output is normalized (whitespace stripped, uppercased)
//! before any matching or storage, so "mh 12 ab 1234" and "MH12AB1234" are
//! the same plate. Parsing decomposes a normalized plate into its four
//! sub-fields via a fixed group pattern; a non-matching string is not an
//! error, it is simply an unstructured plate.

/// Structured sub-fields of a plate that matches the standard layout.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlateFields {
    /// Two-letter region code, e.g. "MH"
    pub region_code: String,
    /// One or two digit sequence code, e.g. "12"
    pub sequence_code: String,
    /// One or two letter series, e.g. "AB"
    pub series: String,
    /// Three or four digit serial number, e.g. "1234"
    pub serial_number: String,
}

#[derive(Debug, Clone, Copy)]
enum CharClass {
    Upper,
    Digit,
}

impl CharClass {
    fn matches(self, c: char) -> bool {
        match self {
            CharClass::Upper => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
        }
    }
}

/// One group of the plate pattern: a character class with a length range.
#[derive(Debug, Clone, Copy)]
struct Group {
    class: CharClass,
    min: usize,
    max: usize,
}

/// Standard plate layout: 2 letters, 1-2 digits, 1-2 letters, 3-4 digits,
/// with nothing before, between, or after the groups.
const PLATE_PATTERN: [Group; 4] = [
    Group { class: CharClass::Upper, min: 2, max: 2 },
    Group { class: CharClass::Digit, min: 1, max: 2 },
    Group { class: CharClass::Upper, min: 1, max: 2 },
    Group { class: CharClass::Digit, min: 3, max: 4 },
];

/// Strip all whitespace and uppercase. Total and idempotent.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Match a normalized plate against the standard layout.
///
/// Groups are matched greedily left to right with no slack characters.
/// Adjacent groups use disjoint character classes, so greedy matching never
/// needs to backtrack. Any leftover input or a group below its minimum
/// length fails the whole match.
pub fn parse(normalized: &str) -> Option<PlateFields> {
    let chars: Vec<char> = normalized.chars().collect();
    let mut captures: [String; 4] = Default::default();
    let mut pos = 0;

    for (slot, group) in PLATE_PATTERN.iter().enumerate() {
        let start = pos;
        while pos < chars.len() && pos - start < group.max && group.class.matches(chars[pos]) {
            pos += 1;
        }
        if pos - start < group.min {
            return None;
        }
        captures[slot] = chars[start..pos].iter().collect();
    }

    if pos != chars.len() {
        return None;
    }

    let [region_code, sequence_code, series, serial_number] = captures;
    Some(PlateFields {
        region_code,
        sequence_code,
        series,
        serial_number,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(region: &str, seq: &str, series: &str, serial: &str) -> PlateFields {
        PlateFields {
            region_code: region.to_string(),
            sequence_code: seq.to_string(),
            series: series.to_string(),
            serial_number: serial.to_string(),
        }
    }

    #[test]
    fn test_normalize_strips_whitespace_and_uppercases() {
        assert_eq!(normalize("mh 12 ab 1234"), "MH12AB1234");
        assert_eq!(normalize("AB 12 CD 3456"), "AB12CD3456");
        assert_eq!(normalize("AB12CD3456"), "AB12CD3456");
        assert_eq!(normalize("  \t a b\nc "), "ABC");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["mh 12 ab 1234", "HELLO", "", "  x Y z  "] {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_parse_standard_plate() {
        assert_eq!(
            parse("MH12AB1234"),
            Some(fields("MH", "12", "AB", "1234"))
        );
    }

    #[test]
    fn test_parse_after_normalization_matches_clean_input() {
        let spaced = parse(&normalize("mh 12 ab 1234"));
        let clean = parse("MH12AB1234");
        assert_eq!(spaced, clean);
        assert!(spaced.is_some());
    }

    #[test]
    fn test_parse_short_groups() {
        // 1 digit sequence, 1 letter series, 3 digit serial
        assert_eq!(parse("DL1C123"), Some(fields("DL", "1", "C", "123")));
    }

    #[test]
    fn test_parse_rejects_unstructured_text() {
        assert_eq!(parse("HELLO"), None);
        assert_eq!(parse(""), None);
        assert_eq!(parse("1234567890"), None);
    }

    #[test]
    fn test_parse_rejects_wrong_lengths() {
        // Shorter than 7 or longer than 10 can never satisfy the groups
        assert_eq!(parse("MH12AB"), None); // missing serial
        assert_eq!(parse("MH12AB12345"), None); // serial too long
        assert_eq!(parse("M12AB1234"), None); // region too short
        assert_eq!(parse("MHX12AB1234"), None); // region too long
    }

    #[test]
    fn test_parse_rejects_trailing_characters() {
        assert_eq!(parse("MH12AB1234X"), None);
        assert_eq!(parse("MH12AB1234 "), None);
    }

    #[test]
    fn test_parse_rejects_lowercase() {
        // Lowercase only ever reaches parse when normalization was skipped
        assert_eq!(parse("mh12ab1234"), None);
    }
}
