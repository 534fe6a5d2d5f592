use chrono::{Datelike, Duration, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Sunday..Saturday bounds (inclusive) of the week containing `anchor`.
pub fn week_bounds(anchor: NaiveDate) -> (NaiveDate, NaiveDate) {
    let days_from_sunday = anchor.weekday().num_days_from_sunday() as i64;
    let start = anchor - Duration::days(days_from_sunday);
    let end = start + Duration::days(6);
    (start, end)
}

/// The remote wire wants MM/DD/YYYY on the submission form.
pub fn to_wire_date(d: NaiveDate) -> String {
    d.format("%m/%d/%Y").to_string()
}

/// The dated info page wants DD/MM/YYYY in its query string.
pub fn to_info_page_date(d: NaiveDate) -> String {
    d.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn week_bounds_cover_sunday_through_saturday() {
        // 2026-08-05 is a Wednesday
        let (start, end) = week_bounds(NaiveDate::from_ymd_opt(2026, 8, 5).unwrap());
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 2).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 8).unwrap());
    }

    #[test]
    fn week_bounds_anchor_on_sunday() {
        let sunday = NaiveDate::from_ymd_opt(2026, 8, 2).unwrap();
        let (start, end) = week_bounds(sunday);
        assert_eq!(start, sunday);
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 8, 8).unwrap());
    }

    #[test]
    fn week_bounds_anchor_on_saturday() {
        let saturday = NaiveDate::from_ymd_opt(2026, 8, 8).unwrap();
        let (start, end) = week_bounds(saturday);
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 8, 2).unwrap());
        assert_eq!(end, saturday);
    }

    #[test]
    fn wire_formats() {
        let d = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        assert_eq!(to_wire_date(d), "08/05/2026");
        assert_eq!(to_info_page_date(d), "05/08/2026");
    }
}
