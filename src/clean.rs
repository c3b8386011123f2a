use std::sync::LazyLock;

use regex::Regex;

static PRICE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$?([\d,]+\.?\d*)").unwrap());
static RATING_OUT_OF_FIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.?\d*)\s*/\s*5").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+\.?\d*)").unwrap());
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());

/// Default source-to-local conversion: 1 USD in IDR.
pub const DEFAULT_RATE: f64 = 16_000.0;

/// Price text → local-currency amount. The conversion rate applies only to
/// amounts carrying the `$` source symbol; a bare numeric is already local
/// currency and passes through unchanged, so cleaned values are fixed
/// points of this function.
pub fn clean_price(raw: Option<&str>, rate: f64) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() || text.to_lowercase().contains("unavailable") {
        return None;
    }
    let caps = PRICE_RE.captures(text)?;
    let amount: f64 = caps[1].replace(',', "").parse().ok()?;
    if text.contains('$') {
        Some(amount * rate)
    } else {
        Some(amount)
    }
}

/// Rating text → numeric score. Prefers the `N / 5` form, falls back to the
/// first bare numeric token.
pub fn clean_rating(raw: Option<&str>) -> Option<f64> {
    let text = raw?.trim();
    if text.is_empty() || text.contains("Invalid") || text.contains("Not Rated") {
        return None;
    }
    let caps = RATING_OUT_OF_FIVE_RE
        .captures(text)
        .or_else(|| NUMBER_RE.captures(text))?;
    caps[1].parse().ok()
}

/// Colors text → count, from the first run of digits.
pub fn clean_colors(raw: Option<&str>) -> Option<i64> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    let caps = DIGITS_RE.captures(text)?;
    caps[1].parse().ok()
}

pub fn clean_size(raw: Option<&str>) -> Option<String> {
    strip_label(raw, "Size:")
}

pub fn clean_gender(raw: Option<&str>) -> Option<String> {
    strip_label(raw, "Gender:")
}

fn strip_label(raw: Option<&str>, label: &str) -> Option<String> {
    let text = raw?.trim();
    if text.is_empty() {
        return None;
    }
    let value = text.replace(label, "");
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

// ── Tests ──
