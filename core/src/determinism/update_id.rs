/// Compact, filesystem- and URL-safe token for a timestamp.
///
/// Colons go away, a fractional-seconds group keeps only its significant
/// digits (an all-zero fraction vanishes), lowercase `t`/`z` separators are
/// upper-cased, and anything other than ASCII digits, `T`, `Z` and `-` is
/// dropped.
pub fn update_id_base(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '.' {
            let mut fraction = String::new();
            while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                fraction.push(d);
                chars.next();
            }
            out.push_str(fraction.trim_end_matches('0'));
        } else if c.is_ascii_digit() || c == '-' {
            out.push(c);
        } else if matches!(c, 'T' | 't' | 'Z' | 'z') {
            out.push(c.to_ascii_uppercase());
        }
    }
    out
}

/// `<timestamp token>-<category>` for a new transparency update.
///
/// The token comes from the draft's `generatedAt` when set, otherwise from
/// the publish timestamp.
pub fn derive_update_id(generated_at: Option<&str>, publish_at: &str, category: &str) -> String {
    let source = generated_at.filter(|s| !s.is_empty()).unwrap_or(publish_at);
    format!("{}-{}", update_id_base(source), category)
}
