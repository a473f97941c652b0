/// Normalizes a phone number for the WhatsApp `to` field.
///
/// Whitespace is stripped (leading, trailing and internal) and a `+` prefix is
/// guaranteed. No digit or length validation happens here.
///
/// ```
/// use qn_core::normalize_phone;
///
/// assert_eq!(normalize_phone("123 456"), "+123456");
/// assert_eq!(normalize_phone("+1 2 3"), "+123");
/// ```
pub fn normalize_phone(raw: &str) -> String {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if compact.starts_with('+') {
        compact
    } else {
        format!("+{compact}")
    }
}

/// Masks all but the last four characters, for logs.
pub fn mask_phone(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    let keep = chars.len().min(4);
    let hidden = chars.len() - keep;
    let mut out = String::with_capacity(chars.len());
    out.extend(std::iter::repeat_n('*', hidden));
    out.extend(&chars[hidden..]);
    out
}
