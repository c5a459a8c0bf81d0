//! End-to-end tests for vertex files.

mod helpers;

use gremlin_import::schema::PropertyValue;
use gremlin_import::{run_import_with_client, ComponentKind, ConfigurationError, ImportError};
use helpers::{create_test_config, write_input, RecordingClient};

#[tokio::test]
async fn test_single_city_vertex() {
    let input = write_input("city\tpopulation\ttype\nstring\tnumeric\tlabel\nRome\t2800000\tCity\n");
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let report = run_import_with_client(&config, &client).await.unwrap();

    assert_eq!(report.successful, 1);
    assert_eq!(report.failed, 0);

    let inserts = client.inserts();
    assert_eq!(inserts.len(), 1);
    let query = &inserts[0];
    assert_eq!(
        query.text(),
        "g.addV(_2_).property('city', _0_).property('population', _1_)"
    );
    assert_eq!(query.binding("_2_"), Some(&PropertyValue::Text("City".into())));
    assert_eq!(
        query.binding("_1_"),
        Some(&PropertyValue::Number(2_800_000.0))
    );
}

#[tokio::test]
async fn test_empty_columns_contribute_nothing() {
    let input = write_input(
        "name\tborn\tactive\tkind\nstring\tdate\tboolean\tlabel\n\
         Ada\t1815-12-10\ttrue\tPerson\n\
         Charles\t\t\tPerson\n",
    );
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let report = run_import_with_client(&config, &client).await.unwrap();
    assert_eq!(report.successful, 2);

    let mut texts: Vec<String> = client
        .inserts()
        .iter()
        .map(|q| q.text().to_string())
        .collect();
    texts.sort();
    assert_eq!(
        texts,
        vec![
            "g.addV(_1_).property('name', _0_)".to_string(),
            "g.addV(_3_).property('name', _0_).property('born', _1_).property('active', _2_)"
                .to_string(),
        ]
    );
}

#[tokio::test]
async fn test_transaction_wraps_inserts() {
    let input = write_input("name\tkind\nstring\tlabel\na\tX\nb\tX\n");
    let mut config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    config.prefix = "graph".to_string();
    let client = RecordingClient::new();

    run_import_with_client(&config, &client).await.unwrap();

    let queries = client.queries();
    assert_eq!(queries.len(), 4);
    assert_eq!(queries[0].text(), "graph.tx().open()");
    assert_eq!(queries[3].text(), "graph.tx().commit()");
    assert!(queries[1].text().starts_with("graph.addV("));
}

#[tokio::test]
async fn test_unsupported_type_names_column_and_supported_set() {
    let input = write_input("city\tarea\nstring\tsquare_km\nRome\t1285\n");
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let err = run_import_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(err, ImportError::TypeCoercion(_)));
    let message = err.to_string();
    assert!(message.contains("\"area\""));
    assert!(message.contains("numeric, date, boolean, string, label"));
    assert!(client.inserts().is_empty());

    let texts: Vec<String> = client.tx_events().into_iter().map(|e| e.text).collect();
    assert_eq!(texts, vec!["g.tx().open()", "g.tx().rollback()"]);
}

#[tokio::test]
async fn test_bad_value_aborts_and_rolls_back() {
    let input = write_input("city\tpopulation\nstring\tnumeric\nRome\t2800000\nParis\tmany\n");
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let err = run_import_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(err, ImportError::TypeCoercion(_)));
    assert!(err.to_string().contains("many"));
    // the first row was already in flight and is still awaited
    assert_eq!(client.inserts().len(), 1);
    let last = client.tx_events().pop().unwrap();
    assert_eq!(last.text, "g.tx().rollback()");
    assert_eq!(last.inserts_in_flight, 0);
}

#[tokio::test]
async fn test_columns_differing_only_in_case_are_rejected() {
    let input = write_input("City\tcity\tkind\nstring\tstring\tlabel\nRome\tParis\tX\n");
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let err = run_import_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(
        err,
        ImportError::Configuration(ConfigurationError::DuplicateColumn { ref key, .. })
            if key == "city"
    ));
    assert!(client.inserts().is_empty());
    let texts: Vec<String> = client.tx_events().into_iter().map(|e| e.text).collect();
    assert_eq!(texts, vec!["g.tx().open()", "g.tx().rollback()"]);
}

#[tokio::test]
async fn test_missing_type_row_makes_no_network_call() {
    let input = write_input("city\tpopulation\n\n");
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let err = run_import_with_client(&config, &client).await.unwrap_err();

    assert!(matches!(err, ImportError::Configuration(_)));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_reserved_property_name_is_renamed_with_warning() {
    let input = write_input("class\tname\nstring\tlabel\nfirst\tTicket\nsecond\tTicket\n");
    let config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    let client = RecordingClient::new();

    let report = run_import_with_client(&config, &client).await.unwrap();

    assert!(client
        .inserts()
        .iter()
        .all(|q| q.text() == "g.addV(_1_).property('_class', _0_)"));
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].1, 2);
    assert!(report.warnings[0].0.contains("\"_class\""));
}

#[tokio::test]
async fn test_comma_delimited_input() {
    let input = write_input("city,motto,type\nstring,string,label\nRome,\"veni, vidi, vici\",City\n");
    let mut config = create_test_config(input.path().to_path_buf(), ComponentKind::Vertex);
    config.delimiter = b',';
    let client = RecordingClient::new();

    run_import_with_client(&config, &client).await.unwrap();

    let inserts = client.inserts();
    assert_eq!(
        inserts[0].binding("_1_"),
        Some(&PropertyValue::Text("veni, vidi, vici".into()))
    );
}
