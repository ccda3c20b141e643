/// Reduce an instrument column name to an element symbol.
///
/// Leading mass numbers and whitespace are stripped (`7Li` → `Li`,
/// `56 Fe` → `Fe`), the first letter is upper-cased and a following lower-case
/// letter is kept (`Fe 259.940` → `Fe`, `cl` → `Cl`). Returns `None` when no
/// letter follows the isotope label.
pub fn normalize_element(column: &str) -> Option<String> {
    let mut chars = column
        .trim_start_matches(|c: char| c.is_ascii_digit() || c.is_whitespace())
        .chars()
        .peekable();

    let first = chars.next().filter(char::is_ascii_alphabetic)?;
    let mut symbol = first.to_ascii_uppercase().to_string();
    if let Some(second) = chars.next_if(char::is_ascii_lowercase) {
        symbol.push(second);
    }
    Some(symbol)
}
