//! Fixed-width real fields for Nastran bulk-data cards.
//!
//! A real must fit its 8 or 16 character field, so the formatter tries the
//! most precise plain-decimal and exponent spellings that fit and keeps the
//! one closest to the value. Exponents are written the Nastran way, without
//! the `e` (`1.5+7`, `-2.-3`), and a leading zero is dropped (`.25`).

/// Format `value` right-justified in exactly `width` characters when possible.
pub fn format_real(value: f64, width: usize) -> String {
    if value == 0.0 {
        return format!("{:>width$}", "0.");
    }
    if !value.is_finite() {
        return format!("{value:>width$}");
    }

    let mut best: Option<(f64, String)> = None;
    let mut consider = |text: String, parsed: Option<f64>| {
        if let Some(parsed) = parsed.filter(|parsed| parsed.is_finite()) {
            let err = (parsed - value).abs();
            if best.as_ref().is_none_or(|(best_err, _)| err < *best_err) {
                best = Some((err, text));
            }
        }
    };

    for precision in (0..width).rev() {
        let text = trim_decimal(&format!("{value:.precision$}"));
        if text.len() <= width {
            let parsed = text.parse::<f64>().ok();
            consider(text, parsed);
            break;
        }
    }
    for precision in (0..width).rev() {
        let (text, parsed) = nastran_exponent(&format!("{value:.precision$e}"));
        if text.len() <= width {
            consider(text, parsed);
            break;
        }
    }

    if let Some((text, parsed)) = truncated_exponent(value, width) {
        if text.len() <= width {
            consider(text, parsed);
        }
    }

    match best {
        Some((_, text)) => format!("{text:>width$}"),
        None => format!("{value:>width$}"),
    }
}

/// Small-field (8 character) real.
pub fn print_float_8(value: f64) -> String {
    format_real(value, 8)
}

/// Large-field (16 character) real.
pub fn print_float_16(value: f64) -> String {
    format_real(value, 16)
}

fn trim_decimal(text: &str) -> String {
    let mut out = if text.contains('.') {
        text.trim_end_matches('0').to_string()
    } else {
        format!("{text}.")
    };
    if let Some(rest) = out.strip_prefix("0.") {
        out = format!(".{rest}");
    } else if let Some(rest) = out.strip_prefix("-0.") {
        out = format!("-.{rest}");
    }
    out
}

/// Exponent form with the mantissa cut rather than rounded, so values next
/// to `f64::MAX` stay finite.
fn truncated_exponent(value: f64, width: usize) -> Option<(String, Option<f64>)> {
    let text = format!("{value:e}");
    let (mantissa, exponent) = text.split_once('e')?;
    let suffix_len = exponent.trim_start_matches('-').len() + 1;
    let keep = width.checked_sub(suffix_len)?.min(mantissa.len());
    Some(nastran_exponent(&format!("{}e{exponent}", &mantissa[..keep])))
}

/// Rewrite Rust's `1.25e-7` as `1.25-7`, returning the text and its value.
fn nastran_exponent(text: &str) -> (String, Option<f64>) {
    let Some((mantissa, exponent)) = text.split_once('e') else {
        return (text.to_string(), None);
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return (text.to_string(), None);
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').to_string()
    } else {
        format!("{mantissa}.")
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    let parsed = format!("{}e{exponent}", mantissa.trim_end_matches('.'))
        .parse::<f64>()
        .ok();
    (format!("{mantissa}{sign}{}", exponent.abs()), parsed)
}
