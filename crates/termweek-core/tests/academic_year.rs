//! End-to-end checks over a full 2014/15 academic year.
//!
//! Two calendars are used: the full-term (lecturing) dates that drive week
//! numbers, and the wider term dates used when bucketing a timetable.

use std::fmt::Write;

use chrono::{Duration, NaiveDate};
use insta::assert_snapshot;
use termweek_core::{
    CalendarConfig, CalendarSource, Event, OUT_OF_TERM_LABEL, TermBucket, WeekNumber,
    generate_display_date, get_date_by_week_and_day, get_term, get_week_in_term,
    get_weeks_in_term, order_events_by_term, parse_events, split_events_by_term,
};

const CALENDAR_JSON: &str = r#"{
    "academic_year": "2014",
    "terms": {
        "2014": [
            {"name": "michaelmas", "label": "Michaelmas", "start": "2014-10-09", "end": "2014-12-03"},
            {"name": "lent", "label": "Lent", "start": "2015-01-15", "end": "2015-03-11"},
            {"name": "easter", "label": "Easter", "start": "2015-04-23", "end": "2015-06-10"}
        ],
        "2014-terms": [
            {"name": "michaelmas", "label": "Michaelmas", "start": "2014-10-07", "end": "2014-12-05"},
            {"name": "lent", "label": "Lent", "start": "2015-01-13", "end": "2015-03-13"},
            {"name": "easter", "label": "Easter", "start": "2015-04-21", "end": "2015-06-12"}
        ]
    }
}"#;

fn source() -> CalendarSource {
    serde_json::from_str(CALENDAR_JSON).unwrap()
}

fn full_term() -> CalendarConfig {
    source().active().unwrap()
}

fn term_dates() -> CalendarConfig {
    source().for_year("2014-terms").unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn every_day_of_the_year_maps_consistently() {
    let config = full_term();
    let mut day = date(2014, 9, 1);
    while day <= date(2015, 9, 30) {
        let week = get_week_in_term(&config, day);
        match get_term(&config, day) {
            Some(term) => {
                assert!(term.contains(day));
                assert!(week.get() >= 1 && week.get() <= get_weeks_in_term(term), "{day}");
            }
            None => assert_eq!(week, WeekNumber::OUT_OF_TERM, "{day}"),
        }
        day += Duration::days(1);
    }
}

#[test]
fn lent_boundary_weeks() {
    let config = full_term();
    assert_eq!(get_week_in_term(&config, date(2015, 1, 14)).get(), 0);
    assert_eq!(get_week_in_term(&config, date(2015, 1, 15)).get(), 1);
}

#[test]
fn week_counts_per_term() {
    let config = full_term();
    let counts: Vec<_> = config.terms().iter().map(get_weeks_in_term).collect();
    assert_eq!(counts, vec![8, 8, 7]);
}

#[test]
fn resolved_dates_stay_in_anchor_week() {
    let config = full_term();
    for term in config.terms() {
        for week in 1..=get_weeks_in_term(term) {
            for day in 1..=7 {
                let resolved = get_date_by_week_and_day(&config, &term.name, week, day).unwrap();
                let found = get_week_in_term(&config, resolved).get();
                assert!(
                    found == 0 || found == week || found == week + 1,
                    "{} w{week} d{day} -> {resolved} (week {found})",
                    term.name
                );
            }
        }
    }
}

#[test]
fn display_labels() {
    let config = full_term();
    assert_eq!(
        generate_display_date(&config, "2015-02-18T10:00:00Z", "2015-02-18T17:30:00Z").unwrap(),
        "W5 · Wed 10am-5:30pm"
    );
    assert_eq!(
        generate_display_date(&config, "2015-01-01T10:30:00Z", "2015-01-01T13:30:00Z").unwrap(),
        "OT · Thu 10:30am-1:30pm"
    );
}

fn timetable() -> Vec<Event> {
    parse_events(
        r#"{"results": [
            {"start": "2014-10-06T13:00:00.000Z", "end": "2014-10-06T14:00:00.000Z", "displayName": "Induction"},
            {"start": "2014-10-07T13:00:00.000Z", "end": "2014-10-07T14:00:00.000Z", "displayName": "Algorithms 1"},
            {"start": "2014-12-05T13:00:00.000Z", "end": "2014-12-05T14:00:00.000Z", "displayName": "Algorithms 16"},
            {"start": "2015-01-06T13:00:00.000Z", "end": "2015-01-06T14:00:00.000Z", "displayName": "Revision"},
            {"start": "2015-01-13T10:00:00.000Z", "end": "2015-01-13T11:00:00.000Z", "displayName": "Compilers 1"},
            {"start": "2015-03-13T10:00:00.000Z", "end": "2015-03-13T11:00:00.000Z", "displayName": "Compilers 16"},
            {"start": "2015-03-30T13:00:00.000Z", "end": "2015-03-30T14:00:00.000Z", "displayName": "Easter school"},
            {"start": "2015-04-21T13:00:00.000Z", "end": "2015-04-21T14:00:00.000Z", "displayName": "Networks 1"},
            {"start": "2015-06-12T13:00:00.000Z", "end": "2015-06-12T14:00:00.000Z", "displayName": "Networks 8"},
            {"start": "2015-06-13T13:00:00.000Z", "end": "2015-06-13T14:00:00.000Z", "displayName": "Graduation"}
        ]}"#,
    )
    .unwrap()
}

fn summarize(buckets: &[TermBucket<Event>]) -> String {
    let mut out = String::new();
    for bucket in buckets {
        let names: Vec<&str> = bucket
            .events
            .iter()
            .filter_map(|event| event.fields.get("displayName").and_then(|v| v.as_str()))
            .collect();
        writeln!(out, "{}: {}", bucket.label, names.join(", ")).unwrap();
    }
    out
}

#[test]
fn split_drops_out_of_term_events() {
    let events = timetable();
    let split = split_events_by_term(&events, &term_dates());
    assert_eq!(split.event_count(), 6);
    assert!(split.get(OUT_OF_TERM_LABEL).is_none());
    for bucket in &split {
        assert_eq!(bucket.len(), 2, "{}", bucket.label);
    }
}

#[test]
fn ordered_timeline_keeps_every_event() {
    let config = term_dates();
    let events = timetable();
    let split = split_events_by_term(&events, &config);
    let ordered = order_events_by_term(&split, &events, &config);

    assert_eq!(ordered.len(), 7);
    let total: usize = ordered.iter().map(TermBucket::len).sum();
    assert_eq!(total, events.len());

    assert_snapshot!(summarize(&ordered), @r"
    OT: Induction
    Michaelmas: Algorithms 1, Algorithms 16
    OT: Revision
    Lent: Compilers 1, Compilers 16
    OT: Easter school
    Easter: Networks 1, Networks 8
    OT: Graduation
    ");
}
