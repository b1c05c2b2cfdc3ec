//! Clock arithmetic and text formatting
//!
//! Splits a second count into hours, minutes and seconds and renders it as
//! the eight-character `HH:MM:SS` field shown on the display. Every function
//! here is total: out-of-range values saturate or clamp, nothing fails.

/// Seconds in one minute
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Seconds in one hour
pub const SECONDS_PER_HOUR: u32 = 60 * 60;

/// Largest hour value that can be shown; longer spans saturate here
pub const MAX_HOURS: u8 = 255;

/// Length of the rendered `HH:MM:SS` field
pub const TIME_TEXT_LEN: usize = 8;

/// Hour component, saturating at [`MAX_HOURS`]
pub fn hours(total: u32) -> u8 {
    (total / SECONDS_PER_HOUR).min(MAX_HOURS as u32) as u8
}

/// Minute component (0-59)
pub fn minutes(total: u32) -> u8 {
    ((total / SECONDS_PER_MINUTE) % 60) as u8
}

/// Second component (0-59)
pub fn seconds(total: u32) -> u8 {
    (total % SECONDS_PER_MINUTE) as u8
}

/// Format a value as exactly two ASCII digits
///
/// Values above 99 keep their units digit and clamp the tens digit to `9`,
/// so 255 renders as `"95"`.
pub fn two_digits(value: u8) -> [u8; 2] {
    let msd = (value / 10).min(9);
    let lsd = value % 10;
    [b'0' + msd, b'0' + lsd]
}

/// Rendered `HH:MM:SS` field
///
/// The separators are either both `:` or both blank, which is how the
/// display blinks the colon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeText {
    bytes: [u8; TIME_TEXT_LEN],
}

impl TimeText {
    /// Render `total` seconds, with or without the colon separators
    pub fn new(total: u32, colon: bool) -> Self {
        let separator = if colon { b':' } else { b' ' };
        let [h1, h0] = two_digits(hours(total));
        let [m1, m0] = two_digits(minutes(total));
        let [s1, s0] = two_digits(seconds(total));

        Self {
            bytes: [h1, h0, separator, m1, m0, separator, s1, s0],
        }
    }

    /// Raw ASCII bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Text view of the field
    pub fn as_str(&self) -> &str {
        // Always ASCII
        core::str::from_utf8(&self.bytes).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_components() {
        let total = 2 * SECONDS_PER_HOUR + 34 * SECONDS_PER_MINUTE + 56;
        assert_eq!(hours(total), 2);
        assert_eq!(minutes(total), 34);
        assert_eq!(seconds(total), 56);
    }

    #[test]
    fn test_hours_saturate() {
        assert_eq!(hours(255 * SECONDS_PER_HOUR + 3599), 255);
        assert_eq!(hours(256 * SECONDS_PER_HOUR), 255);
        assert_eq!(hours(u32::MAX), 255);
    }

    #[test]
    fn test_two_digits_clamps_tens() {
        assert_eq!(&two_digits(0), b"00");
        assert_eq!(&two_digits(7), b"07");
        assert_eq!(&two_digits(99), b"99");
        assert_eq!(&two_digits(100), b"90");
        assert_eq!(&two_digits(255), b"95");
    }

    #[test]
    fn test_time_text() {
        assert_eq!(TimeText::new(0, true).as_str(), "00:00:00");
        assert_eq!(TimeText::new(90, true).as_str(), "00:01:30");
        assert_eq!(TimeText::new(90, false).as_str(), "00 01 30");
        assert_eq!(TimeText::new(3600 * 12 + 61, true).as_str(), "12:01:01");
    }

    #[test]
    fn test_time_text_saturated_hours() {
        // 255 hours clamps to "95" on a two-digit field
        assert_eq!(TimeText::new(u32::MAX, true).as_str(), "95:28:15");
    }

    proptest! {
        #[test]
        fn prop_decomposition_roundtrip(total in 0u32..=(255 * 3600 + 3599)) {
            let rebuilt = hours(total) as u32 * SECONDS_PER_HOUR
                + minutes(total) as u32 * SECONDS_PER_MINUTE
                + seconds(total) as u32;
            prop_assert_eq!(rebuilt, total);
        }

        #[test]
        fn prop_hours_saturate_above_range(total in (256u32 * 3600)..=u32::MAX) {
            prop_assert_eq!(hours(total), MAX_HOURS);
        }

        #[test]
        fn prop_two_digits_exact_below_100(n in 0u8..100) {
            let digits = two_digits(n);
            let expected = [b'0' + n / 10, b'0' + n % 10];
            prop_assert_eq!(digits, expected);
        }

        #[test]
        fn prop_two_digits_clamped_from_100(n in 100u8..=255) {
            let digits = two_digits(n);
            prop_assert_eq!(digits[0], b'9');
            prop_assert_eq!(digits[1], b'0' + n % 10);
        }

        #[test]
        fn prop_time_text_is_ascii_digits(total: u32, colon: bool) {
            let text = TimeText::new(total, colon);
            for (i, b) in text.as_bytes().iter().enumerate() {
                if i == 2 || i == 5 {
                    prop_assert_eq!(*b, if colon { b':' } else { b' ' });
                } else {
                    prop_assert!(b.is_ascii_digit());
                }
            }
        }
    }
}
