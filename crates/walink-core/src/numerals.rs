/// Arabic-Indic digits (U+0660..=U+0669).
const ARABIC_INDIC_ZERO: u32 = 0x0660;
/// Extended Arabic-Indic digits (U+06F0..=U+06F9), used in Persian and Urdu keyboards.
const EXTENDED_ARABIC_INDIC_ZERO: u32 = 0x06F0;

/// Replaces Arabic-Indic and Extended Arabic-Indic digits with their ASCII
/// equivalents. Every other character is kept as is.
pub fn to_ascii_digits(input: &str) -> String {
    input.chars().map(ascii_digit_for).collect()
}

fn ascii_digit_for(c: char) -> char {
    let code = c as u32;
    let offset = match code {
        0x0660..=0x0669 => code - ARABIC_INDIC_ZERO,
        0x06F0..=0x06F9 => code - EXTENDED_ARABIC_INDIC_ZERO,
        _ => return c,
    };
    char::from_digit(offset, 10).unwrap_or(c)
}
