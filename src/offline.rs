//! Deterministic offline tier — the correctness floor of the chain.
//!
//! A fixed table of common medicines plus a generic message for everything
//! else. Lookup is a substring match over the trimmed, lowercased name; the
//! table order is fixed so the first matching entry always wins, on every
//! call, regardless of how the chain got here.

/// Canned explanations, checked in order.
const DICTIONARY: &[(&str, &str)] = &[
    (
        "paracetamol",
        "Paracetamol is a common painkiller used to treat aches and reduce fever.",
    ),
    (
        "aspirin",
        "Aspirin is used to reduce pain, fever, or inflammation.",
    ),
    (
        "amoxicillin",
        "Amoxicillin is an antibiotic used to treat bacterial infections.",
    ),
    (
        "ibuprofen",
        "Ibuprofen is an anti-inflammatory drug used for pain relief and fever.",
    ),
];

/// Look up a canned sentence for a medicine name.
pub fn lookup(name: &str) -> Option<&'static str> {
    let normalized = name.trim().to_lowercase();
    DICTIONARY
        .iter()
        .find(|(key, _)| normalized.contains(key))
        .map(|(_, sentence)| *sentence)
}

/// Generic floor for medicines outside the table. References the original,
/// untrimmed name so callers can recognise their own input.
pub fn generic_fallback(name: &str) -> String {
    format!("Prescription for {name} recorded. Please consult your doctor for details.")
}
