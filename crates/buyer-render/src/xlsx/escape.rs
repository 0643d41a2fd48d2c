//! XML escaping for element text and attribute values

/// Escape the five predefined XML entities and drop characters XML 1.0 cannot
/// carry (C0 controls other than tab, LF and CR, plus U+FFFE and U+FFFF).
///
/// Each character is handled once, so an `&` is never escaped twice. The
/// result is safe both as element text and inside a double- or single-quoted
/// attribute.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c if is_xml_char(c) => out.push(c),
            _ => {}
        }
    }
    out
}

/// `Char` production of XML 1.0; surrogates cannot occur in a `char`
pub(crate) fn is_xml_char(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | '\u{20}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn parse_text(escaped: &str) -> String {
        let xml = format!("<t>{escaped}</t>");
        let doc = roxmltree::Document::parse(&xml).expect("escaped text must parse");
        doc.root_element().text().unwrap_or_default().to_string()
    }

    fn parse_attribute(escaped: &str) -> String {
        let xml = format!(r#"<sheet name="{escaped}"/>"#);
        let doc = roxmltree::Document::parse(&xml).expect("escaped attribute must parse");
        doc.root_element().attribute("name").unwrap_or_default().to_string()
    }

    #[test]
    fn escapes_all_entities() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&apos;s&lt;/a&gt;"
        );
    }

    #[test]
    fn ampersand_is_not_double_escaped() {
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
        assert_eq!(escape_xml("<"), "&lt;");
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(escape_xml("Acme Corp 1234.50"), "Acme Corp 1234.50");
        assert_eq!(escape_xml(""), "");
        assert_eq!(escape_xml("Zürich – 東京"), "Zürich – 東京");
    }

    #[test]
    fn round_trips_through_parser() {
        for sample in ["R&D", "a < b > c", r#"say "hi""#, "O'Brien", "&amp;", "]]>"] {
            assert_eq!(parse_text(&escape_xml(sample)), sample);
            assert_eq!(parse_attribute(&escape_xml(sample)), sample);
        }
    }

    #[test]
    fn illegal_characters_are_dropped() {
        assert_eq!(escape_xml("a\u{1}b"), "ab");
        assert_eq!(escape_xml("\u{0}\u{8}\u{b}\u{c}\u{1f}"), "");
        assert_eq!(escape_xml("x\u{FFFE}\u{FFFF}y"), "xy");
        assert_eq!(escape_xml("tab\tnew\nline"), "tab\tnew\nline");
        assert_eq!(escape_xml("\u{1}<&>"), "&lt;&amp;&gt;");
        assert_eq!(parse_text(&escape_xml("a\u{1}b")), "ab");
        assert_eq!(parse_attribute(&escape_xml("R\u{7}&D")), "R&D");
    }

    #[test]
    fn characters_beyond_bmp_are_kept() {
        assert_eq!(escape_xml("𝄞 \u{10FFFF}"), "𝄞 \u{10FFFF}");
        assert_eq!(escape_xml("\u{E000}\u{FFFD}"), "\u{E000}\u{FFFD}");
    }

    proptest! {
        // Printable characters only: parsers normalise line endings, so
        // arbitrary strings cannot round-trip byte for byte.
        #[test]
        fn escaped_text_round_trips(s in "\\PC*") {
            prop_assert_eq!(parse_text(&escape_xml(&s)), s);
        }

        #[test]
        fn escaped_attribute_round_trips(s in "\\PC*") {
            prop_assert_eq!(parse_attribute(&escape_xml(&s)), s);
        }

        #[test]
        fn any_string_escapes_to_well_formed_xml(s in any::<String>()) {
            let escaped = escape_xml(&s);
            let text = format!("<t>{escaped}</t>");
            let attribute = format!(r#"<sheet name="{escaped}"/>"#);
            prop_assert!(roxmltree::Document::parse(&text).is_ok());
            prop_assert!(roxmltree::Document::parse(&attribute).is_ok());
        }
    }
}
