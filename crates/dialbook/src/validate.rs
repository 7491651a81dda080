//! Input format checks applied before anything reaches the table

/// Ten ASCII digits, the first one 6, 7, 8 or 9
pub fn is_valid_phone(input: &str) -> bool {
    input.len() == 10
        && input.bytes().all(|b| b.is_ascii_digit())
        && matches!(input.as_bytes()[0], b'6'..=b'9')
}

/// `local@label.rest`
///
/// - local: letters, digits and `_ . + -`
/// - label: letters, digits and `-`
/// - rest: letters, digits, `-` and `.`
pub fn is_valid_email(input: &str) -> bool {
    let Some((local, domain)) = input.split_once('@') else {
        return false;
    };
    let Some((label, rest)) = domain.split_once('.') else {
        return false;
    };

    let local_ok = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '+' | '-');
    let label_ok = |c: char| c.is_ascii_alphanumeric() || c == '-';
    let rest_ok = |c: char| label_ok(c) || c == '.';

    !local.is_empty()
        && !label.is_empty()
        && !rest.is_empty()
        && local.chars().all(local_ok)
        && label.chars().all(label_ok)
        && rest.chars().all(rest_ok)
}
