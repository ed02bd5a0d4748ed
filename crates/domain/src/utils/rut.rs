//! Chilean RUT formatting and validation
//!
//! RUTs are written `12.345.678-5`: a dotted body plus a check digit that is
//! `0`-`9` or `K`.

use once_cell::sync::Lazy;
use regex::Regex;

static RUT_FORMAT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{1,2}\.[0-9]{3}\.[0-9]{3}-[0-9kK]$").expect("RUT_FORMAT regex should compile")
});

/// Normalize free-form input into `12.345.678-K` form as the user types.
///
/// Everything but digits and `k`/`K` is dropped, a `K` is only kept as the
/// final character, and the check digit is upper-cased. Inputs with fewer than
/// two significant characters are returned cleaned but unformatted.
pub fn format_rut(input: &str) -> String {
    let mut cleaned: String =
        input.chars().filter(|c| c.is_ascii_digit() || matches!(c, 'k' | 'K')).collect();

    if let Some(k_pos) = cleaned.find(['k', 'K']) {
        if k_pos != cleaned.len() - 1 {
            cleaned.truncate(k_pos);
        }
    }

    if cleaned.len() < 2 {
        return cleaned;
    }

    let (body, dv) = cleaned.split_at(cleaned.len() - 1);
    format!("{}-{}", group_thousands(body), dv.to_ascii_uppercase())
}

/// Whether `rut` is in the strict dotted `11.111.111-1` / `1.111.111-K` form.
pub fn is_valid_rut_format(rut: &str) -> bool {
    RUT_FORMAT.is_match(rut)
}

/// Modulo-11 check digit for a RUT body (digits only, dots ignored).
///
/// Returns `None` when the body contains anything but digits and dots or is
/// empty.
pub fn check_digit(body: &str) -> Option<char> {
    let digits: Vec<u32> = body
        .chars()
        .filter(|c| *c != '.')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<_>>>()?;

    if digits.is_empty() {
        return None;
    }

    let sum: u32 = digits
        .iter()
        .rev()
        .zip([2u32, 3, 4, 5, 6, 7].iter().cycle())
        .map(|(digit, factor)| digit * factor)
        .sum();

    match 11 - (sum % 11) {
        11 => Some('0'),
        10 => Some('K'),
        n => char::from_digit(n, 10),
    }
}

/// Format plus check digit validation.
pub fn is_valid_rut(rut: &str) -> bool {
    if !is_valid_rut_format(rut) {
        return false;
    }
    let Some((body, dv)) = rut.rsplit_once('-') else {
        return false;
    };
    check_digit(body).is_some_and(|expected| dv.eq_ignore_ascii_case(&expected.to_string()))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
