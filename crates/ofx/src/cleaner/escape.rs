//! Text escaping for the repaired buffer.

/// XML character range per the `Char` production of XML 1.0 §2.2.
///
/// Surrogates are unrepresentable in `char`, so only the control-character
/// and upper-bound exclusions are observable here.
fn in_character_range(c: char) -> bool {
    matches!(c, '\u{09}' | '\u{0A}' | '\u{0D}')
        || ('\u{20}'..='\u{D7FF}').contains(&c)
        || ('\u{E000}'..='\u{FFFD}').contains(&c)
        || ('\u{10000}'..='\u{10FFFF}').contains(&c)
}

/// Escapes `s` so that re-parsing the repaired buffer yields back the same
/// character sequence.
///
/// Reserved characters and the three whitespace controls become entity
/// forms; anything outside the XML character range becomes U+FFFD; all other
/// characters pass through unchanged. Each code point is classified exactly
/// once and never split.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\t' => out.push_str("&#x9;"),
            '\n' => out.push_str("&#xA;"),
            '\r' => out.push_str("&#xD;"),
            c if !in_character_range(c) => out.push('\u{FFFD}'),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_text;

    #[test]
    fn reserved_and_control_characters_are_escaped() {
        let input = "x < > \" ' & \r \t \n \x00";
        let expected = "x &lt; &gt; &#34; &#39; &amp; &#xD; &#x9; &#xA; \u{FFFD}";
        assert_eq!(escape_text(input), expected);
    }

    #[test]
    fn plain_text_passes_through() {
        assert_eq!(escape_text(""), "");
        assert_eq!(escape_text("ACME UTILITIES 123"), "ACME UTILITIES 123");
        assert_eq!(escape_text("café ₤100 😀"), "café ₤100 😀");
    }

    #[test]
    fn out_of_range_code_points_become_replacement() {
        assert_eq!(escape_text("\u{0B}"), "\u{FFFD}");
        assert_eq!(escape_text("\u{1F}a"), "\u{FFFD}a");
        assert_eq!(escape_text("\u{FFFE}"), "\u{FFFD}");
        // Boundary values stay intact.
        assert_eq!(escape_text("\u{20}\u{D7FF}\u{E000}\u{10FFFF}"), "\u{20}\u{D7FF}\u{E000}\u{10FFFF}");
    }

    #[test]
    fn output_never_contains_unescaped_reserved_characters() {
        let input = "a<b>c&d\"e'f";
        let escaped = escape_text(input);
        for c in ['<', '>', '&', '"', '\''] {
            let entity_free: String = escaped
                .replace("&lt;", "")
                .replace("&gt;", "")
                .replace("&amp;", "")
                .replace("&#34;", "")
                .replace("&#39;", "");
            assert!(!entity_free.contains(c), "unescaped {c:?} in {escaped:?}");
        }
    }
}
