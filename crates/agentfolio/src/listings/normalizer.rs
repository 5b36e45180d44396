use crate::profiles::domain::ListingStatus;

const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;

/// Portal exports write prices every way imaginable: "4500000",
/// "₹45,00,000", "Rs. 45 L", "1.2 Cr". Everything normalizes to rupees.
pub(crate) fn normalize_price(value: &str) -> Option<u64> {
    let cleaned = value
        .trim()
        .trim_start_matches('₹')
        .trim()
        .trim_start_matches("Rs.")
        .trim_start_matches("Rs")
        .trim()
        .replace(',', "");
    if cleaned.is_empty() {
        return None;
    }

    let lowered = cleaned.to_ascii_lowercase();
    let (number_part, multiplier) = if let Some(stripped) = strip_suffix_any(&lowered, &["crore", "cr"]) {
        (stripped, CRORE)
    } else if let Some(stripped) = strip_suffix_any(&lowered, &["lakh", "lacs", "lac", "l"]) {
        (stripped, LAKH)
    } else {
        (lowered.as_str(), 1.0)
    };

    let amount: f64 = number_part.trim().parse().ok()?;
    if !amount.is_finite() || amount < 0.0 {
        return None;
    }

    Some((amount * multiplier).round() as u64)
}

fn strip_suffix_any<'a>(value: &'a str, suffixes: &[&str]) -> Option<&'a str> {
    suffixes
        .iter()
        .find_map(|suffix| value.strip_suffix(suffix))
}

pub(crate) fn normalize_status(value: &str) -> ListingStatus {
    match value.trim().to_ascii_lowercase().as_str() {
        "sold" | "closed" | "sold out" => ListingStatus::Sold,
        "delisted" | "hidden" | "inactive" | "withdrawn" | "expired" => ListingStatus::Delisted,
        // Portals label live inventory inconsistently; default to active.
        _ => ListingStatus::Active,
    }
}

#[cfg(test)]
pub(crate) fn normalize_price_for_tests(value: &str) -> Option<u64> {
    normalize_price(value)
}

#[cfg(test)]
pub(crate) fn normalize_status_for_tests(value: &str) -> ListingStatus {
    normalize_status(value)
}
