//! Currency label normalization
//!
//! The raw data set spells currencies as display labels ("Indian Rupees(Rs.)").
//! Downstream code only ever sees ISO-4217 codes.

/// Raw label -> ISO code
const CURRENCY_CODES: &[(&str, &str)] = &[
    ("Philippine Peso (₱)", "PHP"),
    ("Brazilian Real(R$)", "BRL"),
    ("Dollar($)", "USD"),
    ("Emirati Diram(AED)", "AED"),
    ("Indian Rupees(Rs.)", "INR"),
    ("Indonesian Rupiah(IDR)", "IDR"),
    ("NewZealand($)", "NZD"),
    ("Pounds(£)", "GBP"),
    ("Pounds(å£)", "GBP"),
    ("Qatari Rial(QR)", "QAR"),
    ("Rand(R)", "ZAR"),
    ("Sri Lankan Rupee(LKR)", "LKR"),
    ("Turkish Lira(TL)", "TRY"),
    // rows labelled Pula in the source data are Philippine restaurants
    ("Botswana Pula(P)", "PHP"),
];

/// Map a raw currency label to its ISO-4217 code.
///
/// Labels that already look like a code pass through; anything unrecognised
/// is kept verbatim (trimmed).
pub fn normalize_currency(raw: &str) -> String {
    let label = raw.trim();

    if let Some((_, code)) = CURRENCY_CODES.iter().find(|(l, _)| *l == label) {
        return (*code).to_string();
    }

    if is_iso_code(label) || label.is_empty() {
        return label.to_string();
    }

    tracing::warn!(currency = %label, "Unrecognised currency label kept as-is");
    label.to_string()
}

#[inline]
fn is_iso_code(label: &str) -> bool {
    label.len() == 3 && label.bytes().all(|b| b.is_ascii_uppercase())
}
