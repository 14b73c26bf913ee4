use crate::history::{Month, Year};

/// Returns the cache key for the list of available years.
pub fn available_years_key() -> String {
    "years".to_string()
}

/// Returns the cache key for the months available in a year.
pub fn available_months_key(year: Year) -> String {
    format!("months:{}", year)
}

/// Returns the cache key for a year record.
pub fn year_record_key(year: Year) -> String {
    format!("year:{}", year)
}

/// Returns the cache key for a month record.
pub fn month_record_key(year: Year, month: Month) -> String {
    format!("month:{}-{}", year, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn year() -> Year {
        Year::new(1945).unwrap()
    }

    #[test]
    fn test_available_years_key() {
        assert_eq!(available_years_key(), "years");
    }

    #[test]
    fn test_available_months_key() {
        assert_eq!(available_months_key(year()), "months:1945");
    }

    #[test]
    fn test_year_record_key() {
        assert_eq!(year_record_key(year()), "year:1945");
    }

    #[test]
    fn test_month_record_key() {
        assert_eq!(
            month_record_key(year(), Month::new(8).unwrap()),
            "month:1945-8"
        );
    }

    #[test]
    fn test_keys_are_distinct_per_kind() {
        let y = year();
        let m = Month::new(1).unwrap();
        let keys = [
            available_years_key(),
            available_months_key(y),
            year_record_key(y),
            month_record_key(y, m),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in &keys[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
