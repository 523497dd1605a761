use std::io::Write;

use camino::Utf8Path;
use footprint::observations::display::TraceDisplayExt;
use footprint::{FootprintError, ParseRecordError, TraceFile, TraceSet, TraceStats};

mod common;
use common::ts;

#[test]
fn test_traces_from_csv_file() {
    let traces = TraceSet::new_from_csv(Utf8Path::new("tests/data/visits.csv")).unwrap();

    assert_eq!(traces.number_of_traces(), 3);
    assert_eq!(traces.total_observations(), 6);
    assert!(!traces.contains_key("id"));

    let alice = &traces["alice"];
    let times: Vec<_> = alice.iter().map(|o| o.timestamp).collect();
    assert_eq!(
        times,
        vec![
            ts("2023-04-01 00:00:00"),
            ts("2023-04-01 06:00:00"),
            ts("2023-04-03 08:07:00"),
        ]
    );
    let visit = alice[0].visit.as_ref().unwrap();
    assert_eq!(visit.visit_type, "home");
    assert_eq!(visit.duration, "10");

    let (first, last) = traces.time_span().unwrap();
    assert_eq!(first, ts("2023-04-01 00:00:00"));
    assert_eq!(last, ts("2023-04-10 10:00:00"));

    let stats = traces.obs_count_stats().unwrap();
    assert_eq!((stats.min, stats.max), (1, 3));

    let table = alice.show().to_string();
    assert!(table.contains("2023-04-03 08:07:00"));
}

#[test]
fn test_add_from_csv_tempfile() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "dave,2023-05-01 09:00:00,9,5,cafe,10.0,20.0").unwrap();
    writeln!(file, "alice,2023-03-31 23:00:00,23,5,bar,0.5,99.5").unwrap();
    let path = Utf8Path::from_path(file.path()).unwrap();

    let mut traces = TraceSet::new_from_csv(Utf8Path::new("tests/data/visits.csv")).unwrap();
    traces.add_from_csv(path).unwrap();

    assert_eq!(traces.number_of_traces(), 4);
    assert_eq!(traces["alice"].len(), 4);
    assert_eq!(traces["alice"][0].timestamp, ts("2023-03-31 23:00:00"));
    assert_eq!(traces["dave"].len(), 1);
}

#[test]
fn test_load_rejects_bad_records() {
    let wrong_fields = "u1,2023-04-01 00:00:00,0,10,home,1.0\n";
    match footprint::load(wrong_fields.as_bytes()) {
        Err(FootprintError::RecordParsing {
            line: 1,
            source: ParseRecordError::WrongFieldCount(6),
        }) => {}
        other => panic!("unexpected result: {other:?}"),
    }

    let bad_lat = "id,start_time,hour,duration,type,lat,lon\nu1,2023-04-01 00:00:00,0,10,home,north,1.0\n";
    match footprint::load(bad_lat.as_bytes()) {
        Err(FootprintError::RecordParsing {
            line: 2,
            source: ParseRecordError::InvalidLatitude(_),
        }) => {}
        other => panic!("unexpected result: {other:?}"),
    }

    let header_only = "id,start_time,hour,duration,type,lat,lon\n";
    assert!(matches!(
        footprint::load(header_only.as_bytes()),
        Err(FootprintError::EmptyInput(_))
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = TraceSet::new_from_csv(Utf8Path::new("tests/data/does_not_exist.csv")).unwrap_err();
    assert!(matches!(err, FootprintError::IoError(_)));
}
