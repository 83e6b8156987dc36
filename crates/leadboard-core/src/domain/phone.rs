/// Canonical form used to join clients, leads and requirements by phone.
///
/// Keeps digits (and a leading `+`), stops at an extension marker, and folds
/// Indian mobile prefixes (`+91`, `91`, `0`) so `+91 98450 12345`,
/// `098450-12345` and `9845012345` compare equal.
pub fn phone_key(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
            continue;
        }
        if matches!(ch, 'x' | 'X' | '#' | ';' | ',') {
            break;
        }
    }

    if digits.is_empty() {
        return None;
    }

    let national = match digits.len() {
        12 if digits.starts_with("91") => &digits[2..],
        11 if digits.starts_with('0') => &digits[1..],
        _ => digits.as_str(),
    };
    Some(national.to_string())
}
