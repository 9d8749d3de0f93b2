//! Entity handling for text and attribute values.

/// Escape text for use in element content or attribute values.
pub fn escape_xml(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}

/// Resolve a predefined entity or numeric character reference.
///
/// `entity` is the name between `&` and `;`.
pub(crate) fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "apos" => return Some('\''),
        "quot" => return Some('"'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "amp" => return Some('&'),
        _ => {}
    }

    if let Some(hex) = entity.strip_prefix("#x") {
        u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
    } else if let Some(dec) = entity.strip_prefix('#') {
        dec.parse::<u32>().ok().and_then(char::from_u32)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_then_unescape_is_identity() {
        let s = r#"Tom & "Jerry" <3 'x'"#;
        assert_eq!(quick_xml::escape::unescape(&escape_xml(s)).unwrap(), s);
    }

    #[test]
    fn numeric_references_resolve() {
        assert_eq!(resolve_entity("#65"), Some('A'));
        assert_eq!(resolve_entity("#x263A"), Some('☺'));
        assert_eq!(resolve_entity("nbsp"), None);
    }
}
