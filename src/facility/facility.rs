//! Facility availability and slot booking
//!
//! A [`Facility`] pairs a [`FacilityDefinition`] with the holiday calendar and
//! the slots already taken on each date, and resolves requested dates to the
//! best available date under the facility's policy.
//!
//! # Resolution rules
//!
//! - A requested date that is open with free capacity is returned as is.
//! - Otherwise a facility without best effort fails with
//!   [`FacilityError::NoAvailableSlot`].
//! - A best-effort facility scans forward one day at a time and returns the
//!   earliest open date with capacity, giving up after the horizon.

use crate::facility::definition::FacilityDefinition;
use crate::facility::error::{FacilityError, FacilityResult, UnavailableReason};
use crate::facility::holidays::Holidays;
use crate::types::{limits, BookingId, Weekday};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Scheduling state of a facility on one calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayState {
    /// Open with free slots
    OpenWithCapacity {
        /// Slots still free on that date
        remaining: u32,
    },
    /// Open, but every slot is taken
    OpenFull,
    /// Not an open weekday
    Closed,
    /// Open weekday that falls on a holiday
    Holiday,
}

impl DayState {
    /// Whether a slot can be booked
    pub fn has_capacity(&self) -> bool {
        matches!(self, DayState::OpenWithCapacity { .. })
    }

    /// Why the date cannot be booked, `None` if it can
    pub fn unavailable_reason(&self) -> Option<UnavailableReason> {
        match self {
            DayState::OpenWithCapacity { .. } => None,
            DayState::OpenFull => Some(UnavailableReason::Full),
            DayState::Closed => Some(UnavailableReason::Closed),
            DayState::Holiday => Some(UnavailableReason::Holiday),
        }
    }
}

/// Days around a requested date in which an appointment may be placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppointmentWindow {
    /// Days before the requested date
    pub before_days: u32,
    /// Days after the requested date
    pub after_days: u32,
}

impl AppointmentWindow {
    /// Create a window
    pub fn new(before_days: u32, after_days: u32) -> Self {
        Self { before_days, after_days }
    }
}

/// A consumed appointment slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Booking identifier
    pub id: BookingId,
    /// Facility name
    pub facility: String,
    /// Date that was asked for
    pub requested: NaiveDate,
    /// Date the slot was booked on
    pub date: NaiveDate,
    /// Slots still free on `date` after this booking
    pub remaining: u32,
}

impl Booking {
    /// Whether the booking landed on a different date than requested
    pub fn was_moved(&self) -> bool {
        self.date != self.requested
    }
}

/// A clinic schedule that answers availability queries
#[derive(Debug, Clone)]
pub struct Facility {
    definition: FacilityDefinition,
    holidays: Arc<Holidays>,
    horizon_days: u32,
    schedule_on_holidays: bool,
    booked: BTreeMap<NaiveDate, u32>,
}

impl Facility {
    /// Create a facility with no holidays and the default horizon
    pub fn new(definition: FacilityDefinition) -> Self {
        Self {
            definition,
            holidays: Arc::new(Holidays::new()),
            horizon_days: limits::DEFAULT_HORIZON_DAYS,
            schedule_on_holidays: false,
            booked: BTreeMap::new(),
        }
    }

    /// Use a holiday calendar
    pub fn with_holidays(mut self, holidays: Arc<Holidays>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Set how many days a best-effort scan may look ahead
    ///
    /// Values outside `1..=366` are clamped into that range.
    pub fn with_horizon(mut self, days: u32) -> Self {
        self.horizon_days = days.clamp(1, limits::MAX_HORIZON_DAYS);
        self
    }

    /// Allow or refuse appointments on holidays
    pub fn schedule_on_holidays(mut self, allow: bool) -> Self {
        self.schedule_on_holidays = allow;
        self
    }

    /// Mark slots as already taken
    pub fn with_bookings<I>(mut self, taken: I) -> Self
    where
        I: IntoIterator<Item = (NaiveDate, u32)>,
    {
        for (date, count) in taken {
            let booked = self.booked.entry(date).or_insert(0);
            *booked = booked.saturating_add(count);
        }
        self
    }

    /// Facility name
    pub fn name(&self) -> &str {
        self.definition.name()
    }

    /// The underlying definition
    pub fn definition(&self) -> &FacilityDefinition {
        &self.definition
    }

    /// Open weekdays
    pub fn days(&self) -> &[Weekday] {
        self.definition.days()
    }

    /// Per-day capacity, aligned with [`days`](Self::days)
    pub fn slots(&self) -> &[u32] {
        self.definition.slots()
    }

    /// Whether unavailable requests round forward
    pub fn best_effort(&self) -> bool {
        self.definition.best_effort()
    }

    /// Best-effort scan horizon in days
    pub fn horizon_days(&self) -> u32 {
        self.horizon_days
    }

    /// Whether the facility opens on a weekday
    pub fn is_open_on(&self, day: Weekday) -> bool {
        self.definition.capacity_for(day).is_some()
    }

    /// Daily capacity on a weekday, `None` when closed
    pub fn capacity_for(&self, day: Weekday) -> Option<u32> {
        self.definition.capacity_for(day)
    }

    /// Slots taken on a date
    pub fn booked_on(&self, date: NaiveDate) -> u32 {
        self.booked.get(&date).copied().unwrap_or(0)
    }

    /// Slots still free on a date; zero when closed, full or a holiday
    pub fn remaining_on(&self, date: NaiveDate) -> u32 {
        match self.day_state(date) {
            DayState::OpenWithCapacity { remaining } => remaining,
            _ => 0,
        }
    }

    /// Scheduling state on a date
    pub fn day_state(&self, date: NaiveDate) -> DayState {
        let Some(capacity) = self.capacity_for(Weekday::of(date)) else {
            return DayState::Closed;
        };

        if !self.schedule_on_holidays && self.holidays.contains(date) {
            return DayState::Holiday;
        }

        let taken = self.booked_on(date);
        if taken >= capacity {
            DayState::OpenFull
        } else {
            DayState::OpenWithCapacity { remaining: capacity - taken }
        }
    }

    /// Best available date for a request
    #[instrument(skip(self), fields(facility = %self.name()))]
    pub fn available_date(&self, requested: NaiveDate) -> FacilityResult<NaiveDate> {
        let state = self.day_state(requested);
        let Some(reason) = state.unavailable_reason() else {
            return Ok(requested);
        };

        if !self.best_effort() {
            return Err(self.unavailable(requested, reason));
        }

        debug!(
            "{} unavailable ({}), scanning forward {} days",
            requested, reason, self.horizon_days
        );

        for offset in 1..=self.horizon_days {
            // Running off the end of the calendar ends the scan
            let Some(date) = requested.checked_add_days(Days::new(u64::from(offset))) else {
                break;
            };
            if self.day_state(date).has_capacity() {
                debug!("Resolved {} to {}", requested, date);
                return Ok(date);
            }
        }

        Err(self.unavailable(
            requested,
            UnavailableReason::HorizonExceeded { days: self.horizon_days },
        ))
    }

    /// Best available date and time, keeping the requested time of day
    pub fn available_datetime(&self, requested: NaiveDateTime) -> FacilityResult<NaiveDateTime> {
        self.available_date(requested.date()).map(|date| date.and_time(requested.time()))
    }

    /// Best available date inside an appointment window
    ///
    /// The requested date wins when open. A best-effort facility then takes
    /// the earliest open date after it, and failing that the nearest open date
    /// before it, both bounded by the window.
    pub fn available_in_window(
        &self,
        requested: NaiveDate,
        window: AppointmentWindow,
    ) -> FacilityResult<NaiveDate> {
        let state = self.day_state(requested);
        let Some(reason) = state.unavailable_reason() else {
            return Ok(requested);
        };

        if !self.best_effort() {
            return Err(self.unavailable(requested, reason));
        }

        let after = (1..=window.after_days)
            .map_while(|offset| requested.checked_add_days(Days::new(u64::from(offset))));
        let before = (1..=window.before_days)
            .map_while(|offset| requested.checked_sub_days(Days::new(u64::from(offset))));

        after
            .chain(before)
            .find(|date| self.day_state(*date).has_capacity())
            .ok_or_else(|| self.unavailable(requested, UnavailableReason::OutsideWindow))
    }

    /// Consume one slot at the best available date for a request
    pub fn book(&mut self, requested: NaiveDate) -> FacilityResult<Booking> {
        let date = self.available_date(requested)?;
        let capacity = self.capacity_for(Weekday::of(date)).unwrap_or(0);

        let taken = self.booked.entry(date).or_insert(0);
        *taken = taken.saturating_add(1);
        let remaining = capacity.saturating_sub(*taken);

        let booking = Booking {
            id: BookingId::new(),
            facility: self.name().to_string(),
            requested,
            date,
            remaining,
        };

        info!(
            facility = %booking.facility,
            booking = %booking.id,
            requested = %requested,
            date = %date,
            remaining,
            "Booked appointment slot"
        );
        Ok(booking)
    }

    fn unavailable(&self, requested: NaiveDate, reason: UnavailableReason) -> FacilityError {
        FacilityError::NoAvailableSlot { facility: self.name().to_string(), requested, reason }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.definition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday() -> NaiveDate {
        date(2024, 1, 8)
    }

    fn facility(days: Vec<Weekday>, slots: Vec<u32>, best_effort: bool) -> Facility {
        Facility::new(FacilityDefinition::new("test-clinic", days, slots, best_effort).unwrap())
    }

    fn three_day() -> Facility {
        facility(
            vec![Weekday::Tuesday, Weekday::Wednesday, Weekday::Thursday],
            vec![100, 100, 100],
            true,
        )
    }

    #[test]
    fn test_day_states() {
        let clinic = facility(vec![Weekday::Monday], vec![2], false)
            .with_bookings([(monday(), 1)]);

        assert_eq!(clinic.day_state(monday()), DayState::OpenWithCapacity { remaining: 1 });
        assert_eq!(clinic.day_state(date(2024, 1, 9)), DayState::Closed);

        let full = clinic.with_bookings([(monday(), 1)]);
        assert_eq!(full.day_state(monday()), DayState::OpenFull);
        assert_eq!(full.remaining_on(monday()), 0);
    }

    #[test]
    fn test_zero_capacity_day_is_full() {
        let clinic = facility(vec![Weekday::Monday], vec![0], false);
        assert_eq!(clinic.day_state(monday()), DayState::OpenFull);
    }

    #[test]
    fn test_open_day_returned_as_is() {
        let clinic = three_day();
        let tuesday = date(2024, 1, 9);
        assert_eq!(clinic.available_date(tuesday).unwrap(), tuesday);
    }

    #[test]
    fn test_best_effort_monday_rounds_to_tuesday() {
        let clinic = three_day();
        assert_eq!(clinic.available_date(monday()).unwrap(), date(2024, 1, 9));
    }

    #[test]
    fn test_best_effort_skips_full_days() {
        let clinic = three_day().with_bookings([(date(2024, 1, 9), 100), (date(2024, 1, 10), 100)]);
        assert_eq!(clinic.available_date(monday()).unwrap(), date(2024, 1, 11));
    }

    #[test]
    fn test_best_effort_crosses_weekend() {
        let clinic = three_day();
        // Friday rounds to the following Tuesday
        assert_eq!(clinic.available_date(date(2024, 1, 12)).unwrap(), date(2024, 1, 16));
    }

    #[test]
    fn test_not_best_effort_closed_day_fails() {
        let clinic = facility(Weekday::WORKWEEK.to_vec(), vec![100; 5], false);
        let saturday = date(2024, 1, 13);

        match clinic.available_date(saturday) {
            Err(FacilityError::NoAvailableSlot { facility, requested, reason }) => {
                assert_eq!(facility, "test-clinic");
                assert_eq!(requested, saturday);
                assert_eq!(reason, UnavailableReason::Closed);
            }
            other => panic!("Expected NoAvailableSlot, got {:?}", other),
        }
    }

    #[test]
    fn test_not_best_effort_full_day_fails() {
        let clinic = facility(vec![Weekday::Monday], vec![1], false).with_bookings([(monday(), 1)]);

        assert!(matches!(
            clinic.available_date(monday()),
            Err(FacilityError::NoAvailableSlot { reason: UnavailableReason::Full, .. })
        ));
    }

    #[test]
    fn test_horizon_exceeded() {
        // Open only on Mondays; from a Tuesday the next Monday is 6 days out
        let clinic = facility(vec![Weekday::Monday], vec![5], true).with_horizon(5);

        assert!(matches!(
            clinic.available_date(date(2024, 1, 9)),
            Err(FacilityError::NoAvailableSlot {
                reason: UnavailableReason::HorizonExceeded { days: 5 },
                ..
            })
        ));

        let wider = clinic.with_horizon(6);
        assert_eq!(wider.available_date(date(2024, 1, 9)).unwrap(), date(2024, 1, 15));
    }

    #[test]
    fn test_scan_stops_at_calendar_end() {
        // Open and full on the last representable date, so the scan has to run
        let last = NaiveDate::MAX;
        let clinic = facility(vec![Weekday::of(last)], vec![1], true)
            .with_horizon(366)
            .with_bookings([(last, 1)]);

        assert!(matches!(
            clinic.available_date(last),
            Err(FacilityError::NoAvailableSlot {
                reason: UnavailableReason::HorizonExceeded { days: 366 },
                ..
            })
        ));
    }

    #[test]
    fn test_seeded_bookings_saturate() {
        let clinic = facility(vec![Weekday::Monday], vec![5], false)
            .with_bookings([(monday(), u32::MAX), (monday(), 1)]);

        assert_eq!(clinic.booked_on(monday()), u32::MAX);
        assert_eq!(clinic.day_state(monday()), DayState::OpenFull);
    }

    #[test]
    fn test_horizon_clamped() {
        let clinic = facility(vec![Weekday::Monday], vec![5], true);
        assert_eq!(clinic.clone().with_horizon(0).horizon_days(), 1);
        assert_eq!(clinic.clone().with_horizon(10_000).horizon_days(), 366);
        assert_eq!(clinic.with_horizon(14).horizon_days(), 14);
    }

    #[test]
    fn test_holiday_closes_open_day() {
        let mut holidays = Holidays::new();
        holidays.insert(date(2024, 1, 9), "Founders Day");
        let holidays = Arc::new(holidays);

        let clinic = three_day().with_holidays(holidays.clone());
        assert_eq!(clinic.day_state(date(2024, 1, 9)), DayState::Holiday);
        assert_eq!(clinic.available_date(monday()).unwrap(), date(2024, 1, 10));

        let strict =
            facility(vec![Weekday::Tuesday], vec![5], false).with_holidays(holidays.clone());
        assert!(matches!(
            strict.available_date(date(2024, 1, 9)),
            Err(FacilityError::NoAvailableSlot { reason: UnavailableReason::Holiday, .. })
        ));

        let allowed = strict.schedule_on_holidays(true);
        assert_eq!(allowed.available_date(date(2024, 1, 9)).unwrap(), date(2024, 1, 9));
    }

    #[test]
    fn test_holiday_on_closed_day_reports_closed() {
        let mut holidays = Holidays::new();
        holidays.insert(date(2024, 1, 13), "Saturday holiday");
        let clinic = facility(Weekday::WORKWEEK.to_vec(), vec![1; 5], false)
            .with_holidays(Arc::new(holidays));

        assert_eq!(clinic.day_state(date(2024, 1, 13)), DayState::Closed);
    }

    #[test]
    fn test_available_datetime_keeps_time() {
        let clinic = three_day();
        let requested = monday().and_hms_opt(9, 30, 0).unwrap();

        let resolved = clinic.available_datetime(requested).unwrap();
        assert_eq!(resolved, date(2024, 1, 9).and_hms_opt(9, 30, 0).unwrap());
    }

    #[test]
    fn test_window_prefers_forward_then_backward() {
        let clinic = three_day();

        // Monday: Tuesday is one day ahead
        assert_eq!(
            clinic.available_in_window(monday(), AppointmentWindow::new(3, 3)).unwrap(),
            date(2024, 1, 9)
        );

        // Friday with no room ahead falls back to Thursday
        assert_eq!(
            clinic.available_in_window(date(2024, 1, 12), AppointmentWindow::new(2, 2)).unwrap(),
            date(2024, 1, 11)
        );
    }

    #[test]
    fn test_window_exhausted() {
        let clinic = three_day();
        assert!(matches!(
            clinic.available_in_window(date(2024, 1, 13), AppointmentWindow::new(1, 1)),
            Err(FacilityError::NoAvailableSlot { reason: UnavailableReason::OutsideWindow, .. })
        ));
    }

    #[test]
    fn test_window_without_best_effort_is_exact() {
        let clinic = facility(vec![Weekday::Tuesday], vec![5], false);
        assert!(matches!(
            clinic.available_in_window(monday(), AppointmentWindow::new(7, 7)),
            Err(FacilityError::NoAvailableSlot { reason: UnavailableReason::Closed, .. })
        ));
    }

    #[test]
    fn test_booking_consumes_capacity() {
        let mut clinic = facility(vec![Weekday::Monday, Weekday::Tuesday], vec![2, 1], true);

        let first = clinic.book(monday()).unwrap();
        assert_eq!(first.date, monday());
        assert_eq!(first.remaining, 1);
        assert!(!first.was_moved());

        let second = clinic.book(monday()).unwrap();
        assert_eq!(second.remaining, 0);
        assert_ne!(first.id, second.id);

        // Monday is full; rolls to Tuesday
        let third = clinic.book(monday()).unwrap();
        assert_eq!(third.date, date(2024, 1, 9));
        assert_eq!(third.remaining, 0);
        assert!(third.was_moved());

        assert_eq!(clinic.booked_on(monday()), 2);
        assert_eq!(clinic.booked_on(date(2024, 1, 9)), 1);
    }

    #[test]
    fn test_booking_fails_without_capacity() {
        let mut clinic = facility(vec![Weekday::Monday], vec![1], false);
        clinic.book(monday()).unwrap();

        assert!(clinic.book(monday()).is_err());
        assert_eq!(clinic.booked_on(monday()), 1);
    }

    #[test]
    fn test_display() {
        let clinic = facility(vec![Weekday::Monday], vec![3], false);
        assert_eq!(clinic.to_string(), "test-clinic: MO slots=[3]");
    }
}
