//! Small helpers.

pub fn sanitize_symbol(sym: &str) -> String {
    sym.trim().to_uppercase()
}

/// Round to 2 decimals for display-facing numbers.
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
