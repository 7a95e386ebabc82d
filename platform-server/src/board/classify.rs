//! Transport-mode classification for journey legs.
//!
//! TfNSW product classes are small integers: 1 = Sydney Trains, 2 = Metro,
//! 4 = light rail, 5 = bus, 7 = coach, 9 = ferry, 11 = school bus, and
//! 99/100 for footpath legs. The board only cares about three buckets.

/// Product class for heavy rail (Sydney Trains).
pub const CLASS_TRAIN: i64 = 1;

/// Product class for Sydney Metro.
pub const CLASS_METRO: i64 = 2;

/// Product classes for walking legs.
pub const CLASS_FOOTPATH: [i64; 2] = [99, 100];

/// Coarse transport-mode bucket for a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegClass {
    /// Footpath leg (product class 99 or 100).
    Walk,
    /// Heavy rail or metro (product class 1 or 2).
    Rail,
    /// Any other mode: bus, light rail, coach, ferry, school bus, or unknown.
    Other,
}

impl LegClass {
    /// True for rail legs (the only legs that contribute line/platform/stop facts).
    pub fn is_rail(self) -> bool {
        self == LegClass::Rail
    }

    /// True for walking legs.
    pub fn is_walk(self) -> bool {
        self == LegClass::Walk
    }
}

/// Classify a product class code.
///
/// Total over all inputs: a missing or unknown code is `Other`, never an
/// error, so a malformed leg can still ride through the normalizer.
pub fn classify(class_code: Option<i64>) -> LegClass {
    match class_code {
        Some(c) if CLASS_FOOTPATH.contains(&c) => LegClass::Walk,
        Some(CLASS_TRAIN) | Some(CLASS_METRO) => LegClass::Rail,
        _ => LegClass::Other,
    }
}
