//! Stable phase identifiers
//!
//! Renderers key DOM nodes, chart series and table rows by phase. Phase names
//! are free-form ("first-contentful-paint", "render/layout"), so they are hashed
//! into a short hex token that is safe to use as a lookup key.

use std::hash::Hasher;

/// Derive a deterministic identifier from a phase name
///
/// Uses FNV-1a (64-bit) and renders the hash as 16 lowercase hex characters.
///
/// # Example
/// ```
/// use veredicto::identifier::phase_identifier;
///
/// let id = phase_identifier("paint");
/// assert_eq!(id.len(), 16);
///
/// // Deterministic - same name produces same identifier
/// assert_eq!(id, phase_identifier("paint"));
/// assert_ne!(id, phase_identifier("layout"));
/// ```
///
/// FNV-1a is not cryptographic. The 64-bit space makes collisions between
/// phase names of a single report vanishingly unlikely, which is all a lookup
/// key needs.
pub fn phase_identifier(phase: &str) -> String {
    let mut hasher = fnv::FnvHasher::default();
    hasher.write(phase.as_bytes());
    hex::encode(hasher.finish().to_be_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_identifier_is_hex() {
        let id = phase_identifier("first-contentful-paint");
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_identifier_known_vector() {
        // FNV-1a 64-bit offset basis for the empty input
        assert_eq!(phase_identifier(""), "cbf29ce484222325");
    }

    #[test]
    fn test_identifiers_distinct_for_common_phases() {
        let names = [
            "duration",
            "load",
            "boot",
            "transition",
            "render",
            "paint",
            "first-contentful-paint",
            "largest-contentful-paint",
            "total-blocking-time",
            "performance-score",
        ];
        let ids: HashSet<_> = names.iter().map(|n| phase_identifier(n)).collect();
        assert_eq!(ids.len(), names.len());
    }
}
