/// Canonicalizes a phone number to its international digit form.
///
/// Non-digits are dropped, then a leading `00` (international prefix) or a
/// single leading `0` (trunk prefix) is removed, and `country_code` is
/// prepended unless the digits already start with it.
///
/// Prefix stripping happens before the country-code check. A number typed as
/// `966` followed by a trunk zero (`9660512345678`) therefore keeps its zero
/// and fails validation later.
pub fn normalize(input: &str, country_code: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();

    let local = if let Some(rest) = digits.strip_prefix("00") {
        rest
    } else if let Some(rest) = digits.strip_prefix('0') {
        rest
    } else {
        digits.as_str()
    };

    if local.starts_with(country_code) {
        local.to_string()
    } else {
        format!("{country_code}{local}")
    }
}

/// True when `input` holds only ASCII digits once whitespace, `+` and `-` are
/// set aside. Expects numerals to be translated already.
pub fn has_only_phone_characters(input: &str) -> bool {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '+' && *c != '-')
        .all(|c| c.is_ascii_digit())
}
