use crate::LoggingError;
use time::UtcOffset;

/// Helper function to create a UtcOffset from hours
///
/// # Examples
///
/// ```
/// use logger::utc_offset_hours;
///
/// let utc_plus_7 = utc_offset_hours(7).unwrap();   // UTC+7 (Jakarta, Bangkok)
/// let utc = utc_offset_hours(0).unwrap();          // UTC
/// assert!(utc_offset_hours(30).is_err());
/// ```
pub fn utc_offset_hours(hours: i8) -> Result<UtcOffset, LoggingError> {
    utc_offset_hms(hours, 0, 0)
}

/// Helper function to create a UtcOffset from hours and minutes
///
/// # Examples
///
/// ```
/// use logger::utc_offset_hms;
///
/// let india = utc_offset_hms(5, 30, 0).unwrap();      // UTC+5:30 (India)
/// let nepal = utc_offset_hms(5, 45, 0).unwrap();      // UTC+5:45 (Nepal)
/// ```
pub fn utc_offset_hms(hours: i8, minutes: i8, seconds: i8) -> Result<UtcOffset, LoggingError> {
    UtcOffset::from_hms(hours, minutes, seconds)
        .map_err(|e| LoggingError::InvalidOffset(e.to_string()))
}

/// Resolve an `appCommon.timezone` value to a fixed UTC offset.
///
/// Accepts `UTC`, `GMT`, `Z`, `+7`, `+07`, `+0700`, `+07:00` and the signed
/// forms prefixed with `UTC`/`GMT`. Region names such as `Asia/Jakarta` need a
/// tz database and resolve to `None`.
pub fn resolve_utc_offset(timezone: &str) -> Option<UtcOffset> {
    let timezone = timezone.trim();
    if timezone.is_empty() {
        return None;
    }
    if timezone == "Z" {
        return Some(UtcOffset::UTC);
    }

    let rest = match timezone.get(..3) {
        Some(prefix)
            if prefix.eq_ignore_ascii_case("UTC") || prefix.eq_ignore_ascii_case("GMT") =>
        {
            &timezone[3..]
        }
        _ => timezone,
    };
    if rest.is_empty() {
        return Some(UtcOffset::UTC);
    }

    let (sign, digits) = if let Some(digits) = rest.strip_prefix('+') {
        (1, digits)
    } else if let Some(digits) = rest.strip_prefix('-') {
        (-1, digits)
    } else {
        return None;
    };

    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h, Some(m)),
        None if digits.len() == 4 && digits.is_ascii() => (&digits[..2], Some(&digits[2..])),
        None => (digits, None),
    };

    let hours = parse_digits(hours, 1..=2)?;
    let minutes = match minutes {
        Some(m) => parse_digits(m, 2..=2)?,
        None => 0,
    };
    if minutes >= 60 {
        return None;
    }

    utc_offset_hms(sign * hours, sign * minutes, 0).ok()
}

fn parse_digits(text: &str, len: std::ops::RangeInclusive<usize>) -> Option<i8> {
    if !len.contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}
