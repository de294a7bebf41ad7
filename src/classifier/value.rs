/// Coerce free text to a number.
///
/// Surrounding whitespace is ignored. Empty text, non-numeric text, and
/// NaN yield `None`. Infinity is kept and compares past any bound.
pub fn parse_number(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| !n.is_nan())
}
