use horae_calendar::{Calendar, CalendarKind, created_calendars, live_calendars};

// Kept as the only test in this binary so the live count is not disturbed
// by other tests running in parallel.
#[test]
fn live_count_tracks_create_clone_and_destroy() {
    let live = live_calendars();
    let created = created_calendars();

    let a = Calendar::builtin("a", CalendarKind::Gregorian).unwrap();
    let b = a.clone();
    assert_eq!(live_calendars(), live + 2);
    assert_eq!(created_calendars(), created + 2);
    assert!(b.id() > a.id());

    a.destroy();
    assert_eq!(live_calendars(), live + 1);
    drop(b);
    assert_eq!(live_calendars(), live);
    assert_eq!(created_calendars(), created + 2);
}
