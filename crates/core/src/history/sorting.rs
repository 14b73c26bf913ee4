use super::types::{HistoryEvent, MonthRecord};

/// Sorts events by date, oldest first.
///
/// The sort is stable: events sharing a date keep their relative order.
pub fn sort_events_by_date(events: &mut [HistoryEvent]) {
    events.sort_by(|a, b| a.date.cmp(&b.date));
}

/// Flattens month records into one date-ordered event list.
///
/// Ties keep month order, then file order within a month.
pub fn flatten_month_events(months: Vec<MonthRecord>) -> Vec<HistoryEvent> {
    let mut events: Vec<HistoryEvent> = months
        .into_iter()
        .flat_map(|month| month.events)
        .collect();
    sort_events_by_date(&mut events);
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{EventCategory, Month, Year};
    use chrono::NaiveDate;

    fn event(date: &str, title: &str) -> HistoryEvent {
        HistoryEvent::new(
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            title,
            EventCategory::Other,
            "description",
        )
    }

    fn month(value: i64, events: Vec<HistoryEvent>) -> MonthRecord {
        MonthRecord::new(Year::new(1945).unwrap(), Month::new(value).unwrap(), events)
    }

    #[test]
    fn test_sort_events_by_date() {
        let mut events = vec![
            event("1945-08-15", "c"),
            event("1945-03-10", "a"),
            event("1945-08-06", "b"),
        ];
        sort_events_by_date(&mut events);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let mut events = vec![
            event("1945-08-15", "first"),
            event("1945-08-06", "early"),
            event("1945-08-15", "second"),
        ];
        sort_events_by_date(&mut events);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["early", "first", "second"]);
    }

    #[test]
    fn test_flatten_sorts_out_of_order_months() {
        // A month file may hold events dated outside its own month.
        let months = vec![
            month(3, vec![event("1945-03-10", "tokyo"), event("1945-09-02", "signing")]),
            month(8, vec![event("1945-08-15", "surrender"), event("1945-08-06", "hiroshima")]),
        ];
        let events = flatten_month_events(months);
        let titles: Vec<&str> = events.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["tokyo", "hiroshima", "surrender", "signing"]);
        assert!(events.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn test_flatten_empty() {
        assert!(flatten_month_events(Vec::new()).is_empty());
    }
}
