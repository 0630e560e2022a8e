//! `%g`-style number formatting.

/// Significant digits printed for real numbers.
const PRECISION: i32 = 6;

/// Format `x` the way a default-configured C++ output stream does:
/// 6 significant digits, trailing zeros trimmed, scientific notation when
/// the decimal exponent is below -4 or at least 6.
///
/// ```
/// use lm_output::fmt_g;
/// assert_eq!(fmt_g(48.137154), "48.1372");
/// assert_eq!(fmt_g(0.25), "0.25");
/// assert_eq!(fmt_g(1234567.0), "1.23457e+06");
/// ```
pub fn fmt_g(x: f64) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0".into() } else { "0".into() };
    }

    // Round to PRECISION significant digits first; the exponent of the
    // rounded value decides the notation.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs())
    } else {
        let decimals = (PRECISION - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{x:.decimals$}")).to_string()
    }
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
