#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

    use crate::calendar::SlotCalendar;
    use crate::engine::{EngineConfig, ReservationEngine};
    use crate::error::BookingError;
    use crate::types::{Court, Slot, SlotDate};

    // Facility wall clock is pinned to 2025-06-01 10:00; bookings target
    // 2025-06-02 unless a test exercises the same-day cutoff.
    const TOMORROW: &str = "2025-06-02";

    fn date(s: &str) -> SlotDate {
        SlotDate::parse(s).unwrap()
    }

    fn slot(s: &str) -> Slot {
        Slot::parse(s).unwrap()
    }

    fn slots(labels: &[&str]) -> Vec<Slot> {
        labels.iter().map(|l| slot(l)).collect()
    }

    fn utc(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, h, m, s).unwrap()
    }

    fn local(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_book_returns_accepted_and_expiry() {
        let mut engine = ReservationEngine::new();

        let result = engine
            .book(
                date(TOMORROW),
                Court::One,
                &slots(&["09:30", "09:00"]),
                utc(10, 0, 0),
                local(10, 0),
            )
            .unwrap();

        assert_eq!(result.accepted, slots(&["09:00", "09:30"]));
        assert_eq!(result.court, Court::One);
        assert_eq!(result.date, date(TOMORROW));
        assert_eq!(result.expires_at, utc(10, 10, 0));
        assert_eq!(result.ttl_seconds, 600);
    }

    #[test]
    fn test_empty_selection_rejected() {
        let mut engine = ReservationEngine::new();
        let result = engine.book(date(TOMORROW), Court::One, &[], utc(10, 0, 0), local(10, 0));
        assert_eq!(result, Err(BookingError::EmptySelection));
    }

    #[test]
    fn test_off_grid_slot_rejected() {
        let mut engine = ReservationEngine::new();
        let result = engine.book(
            date(TOMORROW),
            Court::One,
            &[Slot::from_minutes(9 * 60 + 15)],
            utc(10, 0, 0),
            local(10, 0),
        );
        assert_eq!(
            result,
            Err(BookingError::InvalidSlot {
                label: "09:15".to_string()
            })
        );
    }

    #[test]
    fn test_contiguity() {
        let mut engine = ReservationEngine::new();

        // Gap at 09:00 -> rejected.
        let result = engine.book(
            date(TOMORROW),
            Court::One,
            &slots(&["08:00", "08:30", "09:30"]),
            utc(10, 0, 0),
            local(10, 0),
        );
        assert_eq!(result, Err(BookingError::NonContiguous));

        // Unbroken run -> accepted.
        let result = engine.book(
            date(TOMORROW),
            Court::One,
            &slots(&["08:00", "08:30", "09:00"]),
            utc(10, 0, 0),
            local(10, 0),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_slots_rejected() {
        let mut engine = ReservationEngine::new();
        let result = engine.book(
            date(TOMORROW),
            Court::One,
            &slots(&["09:00", "09:00"]),
            utc(10, 0, 0),
            local(10, 0),
        );
        assert_eq!(result, Err(BookingError::NonContiguous));
    }

    #[test]
    fn test_conflict_reports_exact_overlap() {
        let mut engine = ReservationEngine::new();

        engine
            .book(
                date(TOMORROW),
                Court::One,
                &slots(&["09:00", "09:30"]),
                utc(10, 0, 0),
                local(10, 0),
            )
            .unwrap();

        let result = engine.book(
            date(TOMORROW),
            Court::One,
            &slots(&["09:30", "10:00"]),
            utc(10, 1, 0),
            local(10, 1),
        );
        assert_eq!(
            result,
            Err(BookingError::Conflict {
                conflicts: slots(&["09:30"])
            })
        );
    }

    #[test]
    fn test_conflict_is_per_court_and_per_date() {
        let mut engine = ReservationEngine::new();
        let sel = slots(&["09:00", "09:30"]);

        engine
            .book(date(TOMORROW), Court::One, &sel, utc(10, 0, 0), local(10, 0))
            .unwrap();

        // Same slots, other court: fine.
        assert!(
            engine
                .book(date(TOMORROW), Court::Two, &sel, utc(10, 0, 0), local(10, 0))
                .is_ok()
        );
        // Same slots and court, other date: fine.
        assert!(
            engine
                .book(date("2025-06-03"), Court::One, &sel, utc(10, 0, 0), local(10, 0))
                .is_ok()
        );
    }

    #[test]
    fn test_hold_expiry_boundary() {
        let mut engine = ReservationEngine::new();
        let sel = slots(&["09:00"]);

        engine
            .book(date(TOMORROW), Court::One, &sel, utc(10, 0, 0), local(10, 0))
            .unwrap();

        // One second before the TTL elapses the hold is still visible.
        let view = engine.availability(date(TOMORROW), utc(10, 9, 59), local(10, 9));
        assert_eq!(view.busy[&Court::One], sel);

        // At exactly TTL the hold is gone and the slot books again.
        let view = engine.availability(date(TOMORROW), utc(10, 10, 0), local(10, 10));
        assert!(view.busy[&Court::One].is_empty());
        assert!(
            engine
                .book(date(TOMORROW), Court::One, &sel, utc(10, 10, 0), local(10, 10))
                .is_ok()
        );
    }

    #[test]
    fn test_expired_hold_never_causes_phantom_conflict() {
        let mut engine = ReservationEngine::new();
        let sel = slots(&["09:00", "09:30"]);

        engine
            .book(date(TOMORROW), Court::One, &sel, utc(10, 0, 0), local(10, 0))
            .unwrap();

        // Second caller books the same run after expiry without any
        // intervening availability read.
        let result = engine.book(date(TOMORROW), Court::One, &sel, utc(10, 10, 0), local(10, 10));
        assert!(result.is_ok());
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut engine = ReservationEngine::new();

        let result = engine
            .release(date(TOMORROW), Court::One, &slots(&["09:00"]), utc(10, 0, 0))
            .unwrap();
        assert!(result.released.is_empty());
    }

    #[test]
    fn test_release_reports_removed_subset() {
        let mut engine = ReservationEngine::new();

        engine
            .book(
                date(TOMORROW),
                Court::One,
                &slots(&["09:00", "09:30"]),
                utc(10, 0, 0),
                local(10, 0),
            )
            .unwrap();

        let result = engine
            .release(
                date(TOMORROW),
                Court::One,
                &slots(&["09:30", "10:00"]),
                utc(10, 1, 0),
            )
            .unwrap();
        assert_eq!(result.released, slots(&["09:30"]));
    }

    #[test]
    fn test_same_day_cutoff_rejects_too_soon() {
        let mut engine = ReservationEngine::new();
        let today = date("2025-06-01");

        // 10:00 local, 30 min bumper: 10:30 starts exactly at the cutoff.
        let result = engine.book(
            today,
            Court::One,
            &slots(&["10:30", "11:00"]),
            utc(10, 0, 0),
            local(10, 0),
        );
        assert_eq!(
            result,
            Err(BookingError::TooSoon {
                slots: slots(&["10:30"])
            })
        );

        // First slot strictly past the bumper books fine.
        assert!(
            engine
                .book(today, Court::One, &slots(&["11:00", "11:30"]), utc(10, 0, 0), local(10, 0))
                .is_ok()
        );
    }

    #[test]
    fn test_cutoff_does_not_apply_to_other_dates() {
        let mut engine = ReservationEngine::new();

        // Earliest slot of a future day, booked late in the evening.
        let result = engine.book(
            date(TOMORROW),
            Court::One,
            &slots(&["08:00"]),
            utc(20, 45, 0),
            local(20, 45),
        );
        assert!(result.is_ok());

        let view = engine.availability(date(TOMORROW), utc(20, 45, 0), local(20, 45));
        assert!(view.blocked.is_empty());
    }

    #[test]
    fn test_blocked_and_too_soon_agree_exactly() {
        let today = date("2025-06-01");
        let now_utc = utc(9, 5, 0);
        let local_now = local(9, 5);

        let blocked = ReservationEngine::new()
            .availability(today, now_utc, local_now)
            .blocked;

        for grid_slot in SlotCalendar::all_slots() {
            // Fresh engine per probe so holds never mask the cutoff.
            let mut engine = ReservationEngine::new();
            let result = engine.book(today, Court::One, &[*grid_slot], now_utc, local_now);
            let too_soon = matches!(result, Err(BookingError::TooSoon { .. }));
            assert_eq!(
                blocked.contains(grid_slot),
                too_soon,
                "cutoff mismatch for {grid_slot}"
            );
        }
    }

    #[test]
    fn test_blocked_covers_started_slots() {
        // Late in the day every earlier slot is blocked, held or not.
        let view = ReservationEngine::new().availability(date("2025-06-01"), utc(20, 10, 0), local(20, 10));
        assert_eq!(view.blocked, SlotCalendar::all_slots().to_vec());
    }

    #[test]
    fn test_availability_fresh_date() {
        let mut engine = ReservationEngine::new();
        let view = engine.availability(date(TOMORROW), utc(10, 0, 0), local(10, 0));

        assert_eq!(view.slots.len(), 26);
        assert!(view.busy[&Court::One].is_empty());
        assert!(view.busy[&Court::Two].is_empty());
        assert!(view.blocked.is_empty());
    }

    #[test]
    fn test_custom_windows_are_independent() {
        let mut engine = ReservationEngine::with_config(EngineConfig {
            hold_ttl: Duration::minutes(2),
            lead_time: Duration::minutes(60),
        });
        let today = date("2025-06-01");

        // 60 min bumper at 10:00 blocks through 11:00.
        let result = engine.book(today, Court::One, &slots(&["11:00"]), utc(10, 0, 0), local(10, 0));
        assert!(matches!(result, Err(BookingError::TooSoon { .. })));

        // 2 min TTL expires holds well inside the bumper window.
        engine
            .book(today, Court::One, &slots(&["11:30"]), utc(10, 0, 0), local(10, 0))
            .unwrap();
        let view = engine.availability(today, utc(10, 2, 0), local(10, 2));
        assert!(view.busy[&Court::One].is_empty());
    }

    #[test]
    fn test_end_to_end_hold_cycle() {
        let mut engine = ReservationEngine::new();
        let d = date(TOMORROW);

        let view = engine.availability(d, utc(10, 0, 0), local(10, 0));
        assert_eq!(view.slots.len(), 26);
        assert!(view.busy.values().all(Vec::is_empty));

        let booked = engine
            .book(d, Court::One, &slots(&["09:00", "09:30"]), utc(10, 0, 0), local(10, 0))
            .unwrap();
        assert_eq!(booked.accepted, slots(&["09:00", "09:30"]));
        assert_eq!(booked.expires_at, utc(10, 10, 0));

        let conflict = engine.book(
            d,
            Court::One,
            &slots(&["09:30", "10:00"]),
            utc(10, 1, 0),
            local(10, 1),
        );
        assert_eq!(
            conflict,
            Err(BookingError::Conflict {
                conflicts: slots(&["09:30"])
            })
        );

        let released = engine
            .release(d, Court::One, &slots(&["09:00", "09:30"]), utc(10, 2, 0))
            .unwrap();
        assert_eq!(released.released, slots(&["09:00", "09:30"]));

        // Both slots immediately bookable again.
        assert!(
            engine
                .book(d, Court::One, &slots(&["09:00", "09:30"]), utc(10, 2, 0), local(10, 2))
                .is_ok()
        );
    }
}
