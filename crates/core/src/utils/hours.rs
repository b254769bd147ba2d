//! Minute to hour conversion.
//!
//! Hours are always reported with one decimal place. Rounding happens on
//! integer tenths of an hour (one tenth is six minutes) so the result never
//! depends on binary floating point representation. Ties round half to even.

const MINUTES_PER_TENTH: u64 = 6;

/// Round `numerator / denominator` to the nearest integer, ties to even
fn div_round_half_even(numerator: u64, denominator: u64) -> u64 {
    let quotient = numerator / denominator;
    let twice_remainder = 2 * (numerator % denominator);

    match twice_remainder.cmp(&denominator) {
        std::cmp::Ordering::Less => quotient,
        std::cmp::Ordering::Greater => quotient + 1,
        std::cmp::Ordering::Equal => quotient + (quotient & 1),
    }
}

/// Number of whole tenths of an hour in `minutes`, rounded half to even
pub fn tenths_of_hour(minutes: u64) -> u64 {
    div_round_half_even(minutes, MINUTES_PER_TENTH)
}

pub fn hours_from_tenths(tenths: u64) -> f64 {
    tenths as f64 / 10.0
}

/// Convert minutes to hours rounded to one decimal place
pub fn minutes_to_hours(minutes: u64) -> f64 {
    hours_from_tenths(tenths_of_hour(minutes))
}

/// Convert a fractional minute value `minutes / divisor` to hours rounded
/// to one decimal place. A zero divisor yields 0.0.
pub fn ratio_to_hours(minutes: u64, divisor: u64) -> f64 {
    if divisor == 0 {
        return 0.0;
    }

    hours_from_tenths(div_round_half_even(minutes, divisor * MINUTES_PER_TENTH))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_and_fractional_hours() {
        assert_eq!(minutes_to_hours(0), 0.0);
        assert_eq!(minutes_to_hours(60), 1.0);
        assert_eq!(minutes_to_hours(90), 1.5);
        assert_eq!(minutes_to_hours(50730), 845.5);
        assert_eq!(minutes_to_hours(37422), 623.7);
        assert_eq!(minutes_to_hours(14046), 234.1);
        assert_eq!(minutes_to_hours(45), 0.8);
    }

    #[test]
    fn test_ties_round_to_even() {
        // 3 minutes is exactly 0.05h
        assert_eq!(minutes_to_hours(3), 0.0);
        // 9 minutes is exactly 0.15h
        assert_eq!(minutes_to_hours(9), 0.2);
        // 15 minutes is exactly 0.25h
        assert_eq!(minutes_to_hours(15), 0.2);
        assert_eq!(minutes_to_hours(4), 0.1);
        assert_eq!(minutes_to_hours(2), 0.0);
    }

    #[test]
    fn test_ratio_to_hours() {
        // median of 60 and 61 minutes is 60.5
        assert_eq!(ratio_to_hours(121, 2), 1.0);
        // 1710 + 738 + 522 over three games is 990 minutes each
        assert_eq!(ratio_to_hours(2970, 3), 16.5);
        assert_eq!(ratio_to_hours(100, 0), 0.0);
    }

    #[test]
    fn test_tenths() {
        assert_eq!(tenths_of_hour(60), 10);
        assert_eq!(tenths_of_hour(6001), 1000);
        assert_eq!(hours_from_tenths(8455), 845.5);
    }
}
