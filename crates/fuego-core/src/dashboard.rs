//! Presentation logic shared by every front end: KPI counts, the status filter
//! and the price draft used while editing a menu item.

use chrono::{Local, NaiveDate};

use crate::models::{Reservation, ReservationStatus};
use crate::utils::parse_price;

/// How many reservations the overview lists.
pub const RECENT_LIMIT: usize = 5;

/// Date layout of `Reservation::date`.
const RESERVATION_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub today: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub total: usize,
}

impl DashboardStats {
    pub fn compute(reservations: &[Reservation], today: NaiveDate) -> Self {
        let today_str = today.format(RESERVATION_DATE_FORMAT).to_string();
        let count = |status: ReservationStatus| reservations.iter().filter(|r| r.status == status).count();
        Self {
            today: reservations.iter().filter(|r| r.date.trim() == today_str).count(),
            pending: count(ReservationStatus::Pending),
            confirmed: count(ReservationStatus::Confirmed),
            total: reservations.len(),
        }
    }

    /// Stats against the machine's local calendar date.
    pub fn for_today(reservations: &[Reservation]) -> Self {
        Self::compute(reservations, Local::now().date_naive())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Confirmed,
    Cancelled,
}

impl StatusFilter {
    pub fn title(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Pending => "Pending",
            StatusFilter::Confirmed => "Confirmed",
            StatusFilter::Cancelled => "Cancelled",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Confirmed,
            StatusFilter::Confirmed => StatusFilter::Cancelled,
            StatusFilter::Cancelled => StatusFilter::All,
        }
    }

    pub fn matches(&self, status: ReservationStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == ReservationStatus::Pending,
            StatusFilter::Confirmed => status == ReservationStatus::Confirmed,
            StatusFilter::Cancelled => status == ReservationStatus::Cancelled,
        }
    }
}

/// Reservations passing `filter`, newest first.
pub fn filter_reservations<'a>(reservations: &'a [Reservation], filter: StatusFilter) -> Vec<&'a Reservation> {
    let mut filtered: Vec<&Reservation> = reservations.iter().filter(|r| filter.matches(r.status)).collect();
    filtered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    filtered
}

/// The newest `RECENT_LIMIT` reservations.
pub fn recent(reservations: &[Reservation]) -> Vec<&Reservation> {
    let mut list = filter_reservations(reservations, StatusFilter::All);
    list.truncate(RECENT_LIMIT);
    list
}

/// A price being typed for one menu item. Nothing is saved until `commit`.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceDraft {
    pub item_id: String,
    pub text: String,
}

impl PriceDraft {
    pub fn start(item_id: &str, current_price: f64) -> Self {
        Self {
            item_id: item_id.to_string(),
            text: format!("{:.2}", current_price),
        }
    }

    /// Accept digits and one decimal separator (`.` or `,`).
    pub fn push(&mut self, c: char) {
        let has_separator = self.text.contains(['.', ',']);
        if c.is_ascii_digit() || ((c == '.' || c == ',') && !has_separator) {
            self.text.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    /// The parsed price, if the draft is a finite, non-negative number.
    pub fn commit(&self) -> Option<f64> {
        parse_price(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: &str, date: &str, status: ReservationStatus, created_at: i64) -> Reservation {
        Reservation {
            id: id.to_string(),
            client_name: String::new(),
            phone: String::new(),
            pax: "2 Pessoas".to_string(),
            date: date.to_string(),
            time: "20:00".to_string(),
            table_type: "Salão Principal".to_string(),
            status,
            created_at,
        }
    }

    fn sample() -> Vec<Reservation> {
        vec![
            reservation("a", "2024-02-03", ReservationStatus::Pending, 10),
            reservation("b", "2024-02-03", ReservationStatus::Confirmed, 30),
            reservation("c", "2024-02-04", ReservationStatus::Cancelled, 20),
            reservation("d", "2024-02-05", ReservationStatus::Pending, 40),
        ]
    }

    #[test]
    fn test_stats() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 3).expect("valid date");
        let stats = DashboardStats::compute(&sample(), today);
        assert_eq!(
            stats,
            DashboardStats { today: 2, pending: 2, confirmed: 1, total: 4 }
        );
        assert_eq!(DashboardStats::compute(&[], today), DashboardStats::default());
    }

    #[test]
    fn test_filter_is_sorted_newest_first() {
        let list = sample();
        let ids = |filter| filter_reservations(&list, filter).iter().map(|r| r.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(StatusFilter::All), vec!["d", "b", "c", "a"]);
        assert_eq!(ids(StatusFilter::Pending), vec!["d", "a"]);
        assert_eq!(ids(StatusFilter::Cancelled), vec!["c"]);
    }

    #[test]
    fn test_recent_is_capped() {
        let list: Vec<_> = (0..8)
            .map(|i| reservation(&i.to_string(), "2024-02-03", ReservationStatus::Pending, i))
            .collect();
        let recent = recent(&list);
        assert_eq!(recent.len(), RECENT_LIMIT);
        assert_eq!(recent[0].id, "7");
    }

    #[test]
    fn test_filter_cycle() {
        let mut filter = StatusFilter::default();
        for _ in 0..4 {
            filter = filter.next();
        }
        assert_eq!(filter, StatusFilter::All);
    }

    #[test]
    fn test_price_draft() {
        let mut draft = PriceDraft::start("3", 89.9);
        assert_eq!(draft.text, "89.90");
        assert_eq!(draft.commit(), Some(89.9));

        draft.text.clear();
        for c in "42,5,0x".chars() {
            draft.push(c);
        }
        assert_eq!(draft.text, "42,50");
        assert_eq!(draft.commit(), Some(42.5));

        draft.text.clear();
        assert_eq!(draft.commit(), None);
        draft.push('-');
        assert_eq!(draft.text, "");
    }
}
