/// Escape text for HTML element content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape, then turn line breaks into `<br/>`.
pub fn escape_multiline(s: &str) -> String {
    escape_html(s).replace("\r\n", "\n").replace('\n', "<br/>")
}
