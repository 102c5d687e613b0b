//! Date presentation helpers.
//!
//! Dates travel as 8-digit `YYYYMMDD` strings. These helpers convert them for
//! display (`DD/MM/YYYY`) and for date pickers (`YYYY-MM-DD`). Anything that
//! does not parse as a calendar date is returned unchanged.

use chrono::NaiveDate;

const COMPACT: &str = "%Y%m%d";
const PICKER: &str = "%Y-%m-%d";
const DISPLAY: &str = "%d/%m/%Y";

fn parse_compact(date: &str) -> Option<NaiveDate> {
    // `%Y` alone would also take signed or longer years
    if date.len() != 8 || !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(date, COMPACT).ok()
}

/// `20240131` → `31/01/2024`.
pub fn to_display(date: &str) -> String {
    parse_compact(date)
        .map(|d| d.format(DISPLAY).to_string())
        .unwrap_or_else(|| date.to_string())
}

/// `20240131` → `2024-01-31`.
pub fn to_picker(date: &str) -> String {
    parse_compact(date)
        .map(|d| d.format(PICKER).to_string())
        .unwrap_or_else(|| date.to_string())
}

/// `2024-01-31` → `20240131`.
///
/// Input that is not a picker date only has its `-` separators removed.
pub fn from_picker(input: &str) -> String {
    NaiveDate::parse_from_str(input, PICKER)
        .map(|d| d.format(COMPACT).to_string())
        .unwrap_or_else(|_| input.replace('-', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(to_display("20240131"), "31/01/2024");
        assert_eq!(to_display(""), "");
        assert_eq!(to_display("2024-01-31"), "2024-01-31");
        assert_eq!(to_display("2024013"), "2024013");
    }

    #[test]
    fn test_picker_round_trip() {
        assert_eq!(to_picker("19991231"), "1999-12-31");
        assert_eq!(from_picker("1999-12-31"), "19991231");
        assert_eq!(from_picker(""), "");
        assert_eq!(to_picker("soon"), "soon");
    }

    #[test]
    fn test_impossible_dates_pass_through() {
        assert_eq!(to_display("20241340"), "20241340");
        assert_eq!(to_picker("20230229"), "20230229");
        assert_eq!(to_display("20240229"), "29/02/2024");
        assert_eq!(to_display("+2024013"), "+2024013");
    }

    #[test]
    fn test_non_ascii_passes_through() {
        // 8 bytes, but not 8 ASCII characters
        assert_eq!(to_display("2024年0"), "2024年0");
    }
}
