//! Container-backed tests: each case provisions its own throwaway
//! Postgres instance. They require a running Docker daemon:
//!
//! ```bash
//! cargo test --test pg_container_test -- --ignored
//! ```

use std::sync::Arc;

use mooring::application::services::Harness;
use mooring::config::Settings;
use mooring::domain::Document;
use mooring::infrastructure::client::PgConnector;
use mooring::infrastructure::observability::init_test_tracing;
use mooring::infrastructure::provisioning::DockerProvisioner;

fn docker_harness() -> Harness {
    Harness::from_settings(
        Arc::new(DockerProvisioner::new()),
        Arc::new(PgConnector::default()),
        &Settings::default(),
    )
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn given_running_instance_when_inserting_document_then_database_name_is_listed() {
    let _guard = init_test_tracing();
    let harness = docker_harness();

    let names = harness
        .run_case("postgres", |client| async move {
            let document = Document::new().with("name", "MongoDB");
            client.insert("mydb", "testCollection", &document).await?;
            client.list_database_names().await
        })
        .await
        .expect("test case should run");

    assert!(
        names.iter().any(|name| name == "mydb"),
        "Databases: {:?}",
        names
    );
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn given_empty_collection_when_inserting_hundred_documents_then_count_is_hundred() {
    let _guard = init_test_tracing();
    let harness = docker_harness();

    let count = harness
        .run_case("postgres", |client| async move {
            for i in 0..100 {
                let document = Document::new().with("i", i);
                client.insert("mydb", "testCollection", &document).await?;
            }
            client.count("mydb", "testCollection").await
        })
        .await
        .expect("test case should run");

    assert_eq!(count, 100);
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn given_inserted_document_when_reading_one_back_then_fields_round_trip() {
    let _guard = init_test_tracing();
    let harness = docker_harness();

    let read = harness
        .run_case("postgres", |client| async move {
            let document = Document::new()
                .with("name", "MongoDB")
                .with("type", "database")
                .with("count", 1);
            client.insert("mydb", "testCollection", &document).await?;
            client.find_one("mydb", "testCollection").await
        })
        .await
        .expect("test case should run")
        .expect("a document should be present");

    assert_eq!(read.str_field("name"), Some("MongoDB"));
    assert_eq!(read.str_field("type"), Some("database"));
    assert_eq!(read.int_field("count"), Some(1));
}

#[tokio::test]
#[ignore = "requires a running Docker daemon"]
async fn given_two_provisioned_instances_when_writing_to_one_then_other_observes_nothing() {
    let _guard = init_test_tracing();
    let harness = docker_harness();

    let count = harness
        .run_case("postgres", |client| async move {
            let document = Document::new().with("name", "MongoDB");
            client.insert("mydb", "testCollection", &document).await?;
            client.count("mydb", "testCollection").await
        })
        .await
        .expect("first test case should run");
    assert_eq!(count, 1);

    let names = harness
        .run_case("postgres", |client| async move {
            client.list_database_names().await
        })
        .await
        .expect("second test case should run");

    assert!(
        !names.iter().any(|name| name == "mydb"),
        "a fresh instance must not observe another instance's writes: {:?}",
        names
    );
}
