//! Amount parsing, scaling, and formatting
//!
//! Recipe amounts arrive as free-form strings: plain numbers ("2", "1.5"),
//! fractions ("1/2"), mixed numbers ("2 1/4"), ranges ("10-12"), or text
//! with no quantity at all ("to taste"). Every function here is total:
//! anything unrecognizable passes through unchanged instead of failing the
//! caller's render.

/// Multiplier applied to every scalable quantity: target over base servings.
///
/// A base of zero or less disables scaling instead of dividing by zero.
pub fn serving_ratio(base_servings: f64, target_servings: f64) -> f64 {
    if base_servings > 0.0 {
        target_servings / base_servings
    } else {
        1.0
    }
}

/// Parse a free-form amount string into a number
///
/// Examples:
/// - "2 1/4" -> Some(2.25)
/// - "1/2" -> Some(0.5)
/// - "1.5" -> Some(1.5)
/// - "to taste" -> None
///
/// `None` means "no recognizable quantity"; callers must treat it as
/// "pass the original text through unscaled".
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    // Mixed numbers like "2 1/4"
    if let Some(value) = parse_mixed(trimmed) {
        return Some(value);
    }

    // Simple fractions like "1/2"
    if let Some(value) = parse_fraction(trimmed) {
        return Some(value);
    }

    // Decimals / integers, ignoring any stray non-numeric characters
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok()
}

/// Parse a mixed number like "2 1/4"
fn parse_mixed(s: &str) -> Option<f64> {
    let (whole, frac) = s.split_once(char::is_whitespace)?;
    let whole = parse_digits(whole)?;
    let (numerator, denominator) = split_fraction(frac.trim_start())?;
    if denominator == 0.0 {
        return Some(whole);
    }
    Some(whole + numerator / denominator)
}

/// Parse a simple fraction like "1/2"
fn parse_fraction(s: &str) -> Option<f64> {
    let (numerator, denominator) = split_fraction(s)?;
    if denominator == 0.0 {
        return Some(numerator);
    }
    Some(numerator / denominator)
}

/// Split "<int>/<int>" into numerator and denominator
fn split_fraction(s: &str) -> Option<(f64, f64)> {
    let (numerator, denominator) = s.split_once('/')?;
    Some((parse_digits(numerator)?, parse_digits(denominator)?))
}

/// Parse a bare run of ASCII digits
fn parse_digits(s: &str) -> Option<f64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Format a quantity with up to 2 decimals, trimming trailing zeros
///
/// Examples: 2.0 -> "2", 1.5 -> "1.5", 1.556 -> "1.56"
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    if let Some(stripped) = fixed.strip_suffix(".00") {
        return stripped.to_string();
    }
    if fixed.contains('.') && fixed.ends_with('0') {
        return fixed[..fixed.len() - 1].to_string();
    }
    fixed
}

/// Scale an ingredient amount string for a new serving count
///
/// Ranges like "10-12" are scaled on both ends. Text with no recognizable
/// quantity ("to taste", "a pinch") comes back unchanged, whatever the
/// ratio. Callers must always scale from the recipe's base amount; feeding
/// an already-scaled string back in compounds the ratio.
pub fn scale_amount(amount: &str, base_servings: f64, target_servings: f64) -> String {
    let ratio = serving_ratio(base_servings, target_servings);
    let raw = amount.trim();

    // Ranges like "10-12": both ends must parse, or the range stays as-is
    if is_range(raw) {
        if let Some((left_text, right_text)) = raw.split_once('-') {
            if let (Some(left), Some(right)) = (parse_number(left_text), parse_number(right_text))
            {
                return format!(
                    "{}-{}",
                    format_number(left * ratio),
                    format_number(right * ratio)
                );
            }
        }
        return raw.to_string();
    }

    match parse_number(raw) {
        Some(value) => format_number(value * ratio),
        None => raw.to_string(),
    }
}

/// True when the text contains a digit-hyphen-digit span like "10-12" or
/// "10 - 12" (whitespace allowed around the hyphen)
fn is_range(s: &str) -> bool {
    let chars: Vec<char> = s.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if *c != '-' {
            continue;
        }
        let before = chars[..i].iter().rev().find(|c| !c.is_whitespace());
        let after = chars[i + 1..].iter().find(|c| !c.is_whitespace());
        if matches!(before, Some(b) if b.is_ascii_digit())
            && matches!(after, Some(a) if a.is_ascii_digit())
        {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number("1.5"), Some(1.5));
        assert_eq!(parse_number("  2  "), Some(2.0));
        assert_eq!(parse_number("-5"), Some(-5.0));
    }

    #[test]
    fn test_parse_fractions() {
        assert_eq!(parse_number("1/2"), Some(0.5));
        assert_eq!(parse_number("3/4"), Some(0.75));
        // Denominator-zero guard falls back to the numerator
        assert_eq!(parse_number("1/0"), Some(1.0));
    }

    #[test]
    fn test_parse_mixed_numbers() {
        assert_eq!(parse_number("2 1/4"), Some(2.25));
        assert_eq!(parse_number("1 1/2"), Some(1.5));
        // Denominator-zero guard falls back to the whole part
        assert_eq!(parse_number("2 1/0"), Some(2.0));
    }

    #[test]
    fn test_parse_with_unit_noise() {
        // Stray unit characters are stripped before the decimal parse
        assert_eq!(parse_number("2 cups"), Some(2.0));
        assert_eq!(parse_number("about 3"), Some(3.0));
    }

    #[test]
    fn test_parse_rejects_text() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("to taste"), None);
        assert_eq!(parse_number("1.2.3"), None);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2.0), "2");
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(1.55), "1.55");
        assert_eq!(format_number(1.556), "1.56");
        assert_eq!(format_number(0.25), "0.25");
        assert_eq!(format_number(0.0), "0");
    }

    #[test]
    fn test_serving_ratio() {
        assert_eq!(serving_ratio(4.0, 8.0), 2.0);
        assert_eq!(serving_ratio(4.0, 2.0), 0.5);
        // base <= 0 disables scaling
        assert_eq!(serving_ratio(0.0, 8.0), 1.0);
        assert_eq!(serving_ratio(-1.0, 8.0), 1.0);
    }

    #[test]
    fn test_scale_amount_plain() {
        assert_eq!(scale_amount("2", 4.0, 8.0), "4");
        assert_eq!(scale_amount("1.5", 4.0, 8.0), "3");
        assert_eq!(scale_amount("3", 4.0, 4.0), "3");
    }

    #[test]
    fn test_scale_amount_fractions() {
        assert_eq!(scale_amount("1/2", 4.0, 2.0), "0.25");
        assert_eq!(scale_amount("1/2", 4.0, 8.0), "1");
        assert_eq!(scale_amount("2 1/4", 4.0, 8.0), "4.5");
    }

    #[test]
    fn test_scale_amount_ranges() {
        assert_eq!(scale_amount("10-12", 4.0, 8.0), "20-24");
        assert_eq!(scale_amount("10 - 12", 4.0, 2.0), "5-6");
        // A range with an unparseable end stays untouched
        assert_eq!(scale_amount("2-3-4", 4.0, 8.0), "2-3-4");
    }

    #[test]
    fn test_scale_amount_text_passthrough() {
        assert_eq!(scale_amount("to taste", 4.0, 8.0), "to taste");
        assert_eq!(scale_amount("a pinch", 4.0, 2.0), "a pinch");
        assert_eq!(scale_amount("", 4.0, 8.0), "");
    }

    #[test]
    fn test_scale_amount_zero_base_guard() {
        assert_eq!(scale_amount("2", 0.0, 8.0), "2");
        assert_eq!(scale_amount("10-12", 0.0, 8.0), "10-12");
    }

    #[test]
    fn test_identity_ratio_reformats_parsed_value() {
        // Scaling by ratio 1 reproduces the parsed value, reformatted
        for amount in ["2", "1.5", "1/2", "2 1/4", "0.25", "7"] {
            let parsed = parse_number(amount).unwrap();
            for base in [1.0, 3.0, 4.0] {
                assert_eq!(
                    scale_amount(amount, base, base),
                    format_number(parsed),
                    "ratio-1 scaling must reformat {amount:?}"
                );
            }
        }
        // Already-formatted output is stable under further ratio-1 scaling
        let scaled = scale_amount("10-12", 4.0, 4.0);
        assert_eq!(scale_amount(&scaled, 4.0, 4.0), "10-12");
    }

    #[test]
    fn test_non_numeric_text_is_fixed_point() {
        // Strings that fail to parse are fixed points under any ratio
        for text in ["to taste", "pinch", "a handful", "garnish"] {
            let once = scale_amount(text, 4.0, 8.0);
            let twice = scale_amount(&once, 2.0, 6.0);
            assert_eq!(twice, text);
        }
    }
}
