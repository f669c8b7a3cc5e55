//! Parsing the ordering and replacements CSV tables.

use codeplug_ingest::{IngestError, parse_ordering, parse_replacements};

#[test]
fn ordering_with_a_single_column() {
    let csv = "zones\nNorth.*\nSouth.*\n";
    let ordering = parse_ordering(csv.as_bytes()).unwrap();
    assert_eq!(ordering.zones, vec!["North.*".to_string(), "South.*".to_string()]);
    assert!(ordering.channels.is_empty());
}

#[test]
fn ordering_columns_are_independent_and_ragged() {
    let csv = "Zones,Contacts\n\
               North.*,Cascade.*\n\
               South.*,\n\
               ,Worldwide\n";
    let ordering = parse_ordering(csv.as_bytes()).unwrap();
    assert_eq!(ordering.zones, vec!["North.*".to_string(), "South.*".to_string()]);
    assert_eq!(
        ordering.contacts,
        vec!["Cascade.*".to_string(), "Worldwide".to_string()]
    );
}

#[test]
fn ordering_headers_are_case_insensitive() {
    let csv = "CHANNELS\nSimplex.*\n";
    let ordering = parse_ordering(csv.as_bytes()).unwrap();
    assert_eq!(ordering.channels, vec!["Simplex.*".to_string()]);
}

#[test]
fn ordering_rejects_unknown_headers() {
    let csv = "zones,talkgroups\nNorth.*,TG\n";
    let err = parse_ordering(csv.as_bytes()).unwrap_err();
    match err {
        IngestError::UnknownColumn { table, column } => {
            assert_eq!(table, "ordering");
            assert_eq!(column, "talkgroups");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn replacements_pair_pattern_and_repl_columns() {
    let csv = "channels_pattern,channels_repl,zones_pattern,zones_repl\n\
               DR,DigitalRepeater,North,N.\n\
               \\s+$,,,\n";
    let replacements = parse_replacements(csv.as_bytes()).unwrap();
    assert_eq!(
        replacements.channels,
        vec![
            ("DR".to_string(), "DigitalRepeater".to_string()),
            ("\\s+$".to_string(), String::new()),
        ]
    );
    assert_eq!(
        replacements.zones,
        vec![("North".to_string(), "N.".to_string())]
    );
}

#[test]
fn replacements_without_a_repl_column_strip_matches() {
    let csv = "contacts_pattern\n^Local \n";
    let replacements = parse_replacements(csv.as_bytes()).unwrap();
    assert_eq!(
        replacements.contacts,
        vec![("^Local".to_string(), String::new())]
    );
}

#[test]
fn replacements_reject_unknown_headers() {
    for bad in ["channels", "channels_replace", "talkgroups_pattern"] {
        let csv = format!("{bad}\nX\n");
        assert!(matches!(
            parse_replacements(csv.as_bytes()),
            Err(IngestError::UnknownColumn { table: "replacements", .. })
        ));
    }
}

#[test]
fn empty_tables_parse_to_empty_directives() {
    assert!(parse_ordering("zones\n".as_bytes()).unwrap().is_empty());
    assert!(
        parse_replacements("zones_pattern,zones_repl\n".as_bytes())
            .unwrap()
            .is_empty()
    );
}
