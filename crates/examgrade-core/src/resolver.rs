//! Canonical → physical answer position resolution.
//!
//! Variant A sheets list questions in canonical order. Variant B sheets are
//! shuffled; the course's reference map gives, per canonical question, the
//! 1-based position of that question on the B sheet.
//!
//! A missing, non-numeric or zero reference entry falls back to the canonical
//! index, so a half-filled map degrades to variant-A grading for the affected
//! questions instead of grading them all wrong.

use crate::model::Variant;

/// How a physical index was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Variant A: the canonical index itself.
    Direct(usize),
    /// Variant B with a usable reference entry.
    Mapped(usize),
    /// Variant B without a usable reference entry; canonical index used.
    Fallback(usize),
}

impl Resolution {
    pub fn index(self) -> usize {
        match self {
            Resolution::Direct(i) | Resolution::Mapped(i) | Resolution::Fallback(i) => i,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Resolution::Fallback(_))
    }
}

/// Parse a 1-based reference entry.
///
/// Integral decimals such as `2.0` are positions too. Zero, negative,
/// fractional and non-numeric entries are `None`.
pub fn parse_reference_entry(entry: &str) -> Option<usize> {
    let entry = entry.trim();
    if let Ok(pos) = entry.parse::<usize>() {
        return (pos >= 1).then_some(pos);
    }
    let value = entry.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value >= 1.0 && value <= usize::MAX as f64 {
        Some(value as usize)
    } else {
        None
    }
}

/// Resolve `canonical` for a student of `variant`, reporting the path taken.
pub fn resolve(canonical: usize, variant: Variant, reference_map: &[String]) -> Resolution {
    match variant {
        Variant::A => Resolution::Direct(canonical),
        Variant::B => match reference_map
            .get(canonical)
            .and_then(|entry| parse_reference_entry(entry))
        {
            Some(position) => Resolution::Mapped(position - 1),
            None => Resolution::Fallback(canonical),
        },
    }
}

/// Physical index into the student's raw answers for canonical question `canonical`.
pub fn resolve_physical_index(canonical: usize, variant: Variant, reference_map: &[String]) -> usize {
    resolve(canonical, variant, reference_map).index()
}
