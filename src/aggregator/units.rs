//! Smallest-unit to display-unit conversion.

/// Lamports per SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Format a lamport amount as a human-readable SOL string.
///
/// Formats to 2 decimal places, then strips trailing zeros and a trailing
/// decimal point: `1_500_000_000` becomes `"1.5 SOL"`, `1_000_000_000`
/// becomes `"1 SOL"`.
pub fn lamports_to_sol(lamports: u64) -> String {
    let sol = lamports as f64 / LAMPORTS_PER_SOL as f64;
    let formatted = format!("{:.2}", sol);
    let cleaned = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{} SOL", cleaned)
}
