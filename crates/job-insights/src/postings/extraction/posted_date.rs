use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

fn marker_regex() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"Added\s+(\d{2}/\d{2}/\d{4})").expect("posted date pattern compiles")
    })
}

/// Date following the `Added` marker, read day-first.
pub fn locate_posted_date(description: &str) -> Option<NaiveDate> {
    let captures = marker_regex().captures(description)?;
    NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%d/%m/%Y").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_day_first() {
        assert_eq!(
            locate_posted_date("Permanent Added 15/03/2023 Apply now"),
            NaiveDate::from_ymd_opt(2023, 3, 15)
        );
        assert_eq!(
            locate_posted_date("Added 03/04/2024"),
            NaiveDate::from_ymd_opt(2024, 4, 3)
        );
    }

    #[test]
    fn invalid_date_is_absent() {
        assert_eq!(locate_posted_date("Added 31/02/2023"), None);
        assert_eq!(locate_posted_date("Added 2023-03-15"), None);
        assert_eq!(locate_posted_date("added 15/03/2023"), None);
    }
}
