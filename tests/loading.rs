use chrono::{TimeZone, Utc};
use energy_analyzer::config::LoaderConfig;
use energy_analyzer::data::{
    LoadEvent, NullObserver, RecordingObserver, ELECTRICITY_COLUMN, GAS_COLUMN, GENERIC_COLUMN,
};
use energy_analyzer::session::load_csv;
use energy_analyzer::AnalyzerError;

fn load(text: &str) -> energy_analyzer::Result<energy_analyzer::data::NormalizedTable> {
    load_csv(text.as_bytes(), &LoaderConfig::default(), &NullObserver)
}

#[test]
fn test_canonical_csv() {
    let table = load(
        "date,electricity_consumption,gas_consumption\n\
         2024-12-01,10,100\n\
         2024-12-02,5,\n\
         2024-12-03,20,300\n",
    )
    .unwrap();

    assert_eq!(table.columns(), &[ELECTRICITY_COLUMN, GAS_COLUMN]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.electricity(1), Some(5.0));
    assert_eq!(table.gas(1), None);
    assert_eq!(
        table.records()[0].date,
        Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_header_permutation_gives_same_table() {
    let a = load("date;electricity_consumption;gas_consumption\n2024-12-01;1;2\n2024-12-02;3;4\n")
        .unwrap();
    let b = load("gas_consumption;date;electricity_consumption\n2;2024-12-01;1\n4;2024-12-02;3\n")
        .unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_french_headers_in_any_order_give_same_table() {
    let headers = ["Date", "Consommation électricité (MWh)", "Consommation gaz (MWh)"];
    let rows = [
        ["2024-12-01", "10", "100"],
        ["2024-12-02", "12,5", ""],
        ["2024-12-03", "", "300"],
    ];
    let orders = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let tables: Vec<_> = orders
        .iter()
        .map(|order| {
            let mut text = order.iter().map(|&i| headers[i]).collect::<Vec<_>>().join(";");
            text.push('\n');
            for row in &rows {
                text.push_str(&order.iter().map(|&i| row[i]).collect::<Vec<_>>().join(";"));
                text.push('\n');
            }
            load(&text).unwrap()
        })
        .collect();

    assert_eq!(tables[0].columns(), &[ELECTRICITY_COLUMN, GAS_COLUMN]);
    assert_eq!(tables[0].electricity(1), Some(12.5));
    assert_eq!(tables[0].gas(2), Some(300.0));
    for table in &tables[1..] {
        assert_eq!(table, &tables[0]);
    }
}

#[test]
fn test_ambiguous_slash_dates_read_month_first() {
    let table = load("date,electricity_consumption
01/12/2024,1
13/12/2024,2
").unwrap();
    assert_eq!(
        table.records()[0].date,
        Utc.with_ymd_and_hms(2024, 1, 12, 0, 0, 0).unwrap()
    );
    assert_eq!(
        table.records()[1].date,
        Utc.with_ymd_and_hms(2024, 12, 13, 0, 0, 0).unwrap()
    );
}

#[test]
fn test_odre_style_headers() {
    let table = load(
        "Date;Statut;Consommation brute électricité (MW) - RTE;Consommation brute gaz (MW PCS 0°C) - GRTgaz\n\
         2024-12-01;Définitif;61234;45000\n\
         2024-12-02;Définitif;62000,5;\n",
    )
    .unwrap();

    assert_eq!(table.columns(), &[ELECTRICITY_COLUMN, GAS_COLUMN]);
    assert_eq!(table.electricity(1), Some(62000.5));
    assert_eq!(table.gas(0), Some(45000.0));
}

#[test]
fn test_latin1_input() {
    let text = "Date;Consommation électricité\n12/01/2024;12,5\n";
    let bytes: Vec<u8> = text.chars().map(|c| c as u8).collect();
    let observer = RecordingObserver::new();

    let table = load_csv(&bytes, &LoaderConfig::default(), &observer).unwrap();
    assert_eq!(table.electricity(0), Some(12.5));
    assert_eq!(
        table.records()[0].date,
        Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap()
    );
    assert!(observer.events().contains(&LoadEvent::Latin1Fallback));
}

#[test]
fn test_numeric_fallback_and_generic_column() {
    let numeric = load("day,a,b\n2024-12-01,1,2\n2024-12-02,3,4\n").unwrap();
    assert_eq!(numeric.columns(), &[ELECTRICITY_COLUMN, GAS_COLUMN]);
    assert_eq!(numeric.gas(1), Some(4.0));

    let generic = load("jour,valeur\n2024-12-01,7\n2024-12-02,n/a\n").unwrap();
    assert_eq!(generic.columns(), &[GENERIC_COLUMN]);
    assert_eq!(generic.value(0, 0), Some(7.0));
    assert_eq!(generic.value(1, 0), None);
}

#[test]
fn test_flag_ignore_rows_are_dropped() {
    let observer = RecordingObserver::new();
    let table = load_csv(
        b"date,electricity_consumption,flag_ignore\n2024-12-01,1,\n2024-12-02,2,oui\n2024-12-03,3,non\n",
        &LoaderConfig::default(),
        &observer,
    )
    .unwrap();

    assert_eq!(table.len(), 2);
    assert!(table.records().iter().all(|r| r.values[0] != Some(2.0)));
    assert!(observer.events().iter().any(|e| matches!(
        e,
        LoadEvent::IgnoredRows { dropped: 1, .. }
    )));
}

#[test]
fn test_unparsable_dates_are_dropped() {
    let observer = RecordingObserver::new();
    let table = load_csv(
        b"date,gas_consumption\n2024-12-01,1\nnot a date,2\n,3\n2024-12-04,4\n",
        &LoaderConfig::default(),
        &observer,
    )
    .unwrap();

    assert_eq!(table.len(), 2);
    assert!(observer
        .events()
        .contains(&LoadEvent::UnparsableDates { dropped: 2 }));
}

#[test]
fn test_every_loaded_row_has_a_date() {
    let table = load(
        "date,electricity_consumption\n2024-12-01,1\n2024/12/02,2\n12/03/2024,3\n20241204,4\nbad,5\n",
    )
    .unwrap();
    assert_eq!(table.len(), 4);
    let days: Vec<u32> = table
        .records()
        .iter()
        .map(|r| chrono::Datelike::day(&r.date))
        .collect();
    assert_eq!(days, vec![1, 2, 3, 4]);
}

#[test]
fn test_loading_is_deterministic() {
    let text = "Date;conso gaz;conso électricité\n2024-12-01;1;2\n2024-12-02;;4\n";
    assert_eq!(load(text).unwrap(), load(text).unwrap());
}

#[test]
fn test_format_errors() {
    assert!(matches!(load(""), Err(AnalyzerError::Format(_))));
    assert!(matches!(load("single\n1\n"), Err(AnalyzerError::Format(_))));
    assert!(matches!(
        load("name,label\nfoo,bar\n"),
        Err(AnalyzerError::Format(_))
    ));
}

#[test]
fn test_header_only_file_is_empty_table() {
    let table = load("date,electricity_consumption\n").unwrap();
    assert!(table.is_empty());
    assert!(table.date_span().is_none());
}
