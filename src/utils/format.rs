use chrono::{DateTime, NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateStyle {
    /// `Mar 2, 2024`
    Short,
    /// `02 Mar 2024`
    Table,
    /// `March 2, 2024, 09:15 AM`
    Long,
}

/// Formats an API timestamp. Accepts RFC 3339, naive datetimes (the backend
/// omits the offset) and bare dates; anything else is returned as-is.
pub fn format_date(raw: &str, style: DateStyle) -> String {
    let Some(parsed) = parse_timestamp(raw) else {
        return raw.to_string();
    };
    let pattern = match style {
        DateStyle::Short => "%b %-d, %Y",
        DateStyle::Table => "%d %b %Y",
        DateStyle::Long => "%B %-d, %Y, %I:%M %p",
    };
    parsed.format(pattern).to_string()
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.naive_utc());
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// `12345` -> `12,345`
pub fn format_count(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_backend_timestamps() {
        assert_eq!(format_date("2024-03-02T09:15:00", DateStyle::Short), "Mar 2, 2024");
        assert_eq!(format_date("2024-03-02T09:15:00.123456", DateStyle::Table), "02 Mar 2024");
        assert_eq!(format_date("2024-03-02T21:05:00Z", DateStyle::Long), "March 2, 2024, 09:05 PM");
        assert_eq!(format_date("2024-03-02", DateStyle::Short), "Mar 2, 2024");
    }

    #[test]
    fn counts_are_grouped() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn unknown_input_is_passed_through() {
        assert_eq!(format_date("2 hours ago", DateStyle::Short), "2 hours ago");
    }
}
