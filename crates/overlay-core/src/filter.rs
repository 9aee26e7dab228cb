//! Dashboard event filtering.
//!
//! A filter is an immutable value: the UI builds a new one whenever a
//! control changes and re-runs the query against the current event list.

use chrono::NaiveDate;
use thermwatch_event_model::{Event, EventStatus, UserId};

/// Which events a dashboard tab shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventScope {
    /// Every event.
    #[default]
    All,
    /// Events still awaiting triage.
    Pending,
    /// Events confirmed or discarded by the given user.
    HandledBy(UserId),
}

/// Query over an event list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventFilter {
    pub scope: EventScope,
    /// Restrict to a single calendar day.
    pub date: Option<NaiveDate>,
}

impl EventFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn pending() -> Self {
        Self {
            scope: EventScope::Pending,
            date: None,
        }
    }

    pub fn handled_by(user_id: UserId) -> Self {
        Self {
            scope: EventScope::HandledBy(user_id),
            date: None,
        }
    }

    /// Same scope, restricted to `date`.
    pub fn on_date(self, date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            ..self
        }
    }

    /// Same scope, any date.
    pub fn any_date(self) -> Self {
        Self { date: None, ..self }
    }

    pub fn matches(&self, event: &Event) -> bool {
        let in_scope = match self.scope {
            EventScope::All => true,
            EventScope::Pending => event.status == EventStatus::Pending,
            EventScope::HandledBy(user_id) => {
                event.status != EventStatus::Pending && event.handled_by == Some(user_id)
            }
        };
        let on_date = match self.date {
            None => true,
            Some(date) => event.date() == Some(date),
        };
        in_scope && on_date
    }
}

/// Events matching `filter`, in input order.
pub fn filter_events<'a>(events: &'a [Event], filter: &EventFilter) -> Vec<&'a Event> {
    events.iter().filter(|e| filter.matches(e)).collect()
}

/// Number of events awaiting triage.
pub fn pending_count(events: &[Event]) -> usize {
    events.iter().filter(|e| e.is_pending()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events() -> Vec<Event> {
        let mut handled = Event::new(2, "2025-11-03").with_status(EventStatus::Confirmed);
        handled.handled_by = Some(5);
        let mut other = Event::new(3, "2025-11-04").with_status(EventStatus::Discarded);
        other.handled_by = Some(6);
        vec![
            Event::new(1, "2025-11-03"),
            handled,
            other,
            Event::new(4, "garbled"),
        ]
    }

    fn ids(events: &[&Event]) -> Vec<i64> {
        events.iter().map(|e| e.event_id).collect()
    }

    #[test]
    fn test_all_keeps_everything_in_order() {
        let events = events();
        assert_eq!(ids(&filter_events(&events, &EventFilter::all())), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_pending_scope() {
        let events = events();
        assert_eq!(ids(&filter_events(&events, &EventFilter::pending())), vec![1, 4]);
        assert_eq!(pending_count(&events), 2);
    }

    #[test]
    fn test_handled_by_scope() {
        let events = events();
        assert_eq!(ids(&filter_events(&events, &EventFilter::handled_by(5))), vec![2]);
        assert!(filter_events(&events, &EventFilter::handled_by(99)).is_empty());
    }

    #[test]
    fn test_date_filter_skips_unparseable_dates() {
        let events = events();
        let day = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap();
        let filter = EventFilter::all().on_date(day);
        assert_eq!(ids(&filter_events(&events, &filter)), vec![1, 2]);

        let pending_that_day = EventFilter::pending().on_date(day);
        assert_eq!(ids(&filter_events(&events, &pending_that_day)), vec![1]);

        assert_eq!(filter.any_date(), EventFilter::all());
    }
}
