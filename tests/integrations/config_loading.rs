use dynaform_core::config::ENV_STRICT_REFERENCES;
use dynaform_core::{ConfigLoader, EngineConfig, LoadError};
use dynaform_schema::validation::error_codes;
use dynaform_test_utils::data_generators::{
    create_dangling_reference_json, create_nested_form_json, create_newsletter_yaml,
};
use dynaform_test_utils::{init_test_tracing, ConfigServer, RecordingHandler};
use std::io::Write;

#[tokio::test]
async fn test_remote_yaml_form_end_to_end() -> anyhow::Result<()> {
    init_test_tracing();
    let server = ConfigServer::start().await;
    server.serve("/forms/newsletter.yaml", &create_newsletter_yaml("remote")).await;

    let form = ConfigLoader::default()
        .load_controller(&server.url("/forms/newsletter.yaml"))
        .await?;
    assert_eq!(form.config().id, "remote");
    assert_eq!(form.config().submit_label.as_deref(), Some("Sign up"));

    form.set("name", "Grace")?;
    let handler = RecordingHandler::new();
    assert!(form.validate_and_submit(&handler).await?.is_success());
    assert_eq!(handler.count(), 1);
    Ok(())
}

#[tokio::test]
async fn test_remote_failures() {
    init_test_tracing();
    let server = ConfigServer::start().await;
    server.fail("/forms/broken.json", 500).await;
    server.serve("/forms/dangling.json", &create_dangling_reference_json()).await;

    let loader = ConfigLoader::default();
    let err = loader.load(&server.url("/forms/broken.json")).await.unwrap_err();
    assert!(matches!(err, LoadError::Status { status: 500, .. }));

    let err = loader.load(&server.url("/forms/dangling.json")).await.unwrap_err();
    let schema = err.schema_error().expect("schema error");
    assert_eq!(schema.error_code(), error_codes::INVALID_REFERENCE);
    assert!(err.to_string().contains("dangling.json"));
}

#[tokio::test]
async fn test_local_file() -> anyhow::Result<()> {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile()?;
    file.write_all(create_nested_form_json().as_bytes())?;

    let config = ConfigLoader::default()
        .load(file.path().to_str().expect("utf-8 path"))
        .await?;
    assert_eq!(config.id, "profile");
    assert!(config.find("contacts.0.phone").is_some());
    Ok(())
}

#[tokio::test]
async fn test_lenient_references_from_environment() -> anyhow::Result<()> {
    let config = EngineConfig::from_lookup(|key| {
        (key == ENV_STRICT_REFERENCES).then(|| "false".to_string())
    });
    assert!(!config.strict_references);

    let server = ConfigServer::start().await;
    server.serve("/dangling.json", &create_dangling_reference_json()).await;

    let form = ConfigLoader::new(config)
        .load_controller(&server.url("/dangling.json"))
        .await?;

    // the missing target reads as null, which is not equal to ""
    assert!(form.is_visible("name"));
    Ok(())
}
