use anyhow::Result;
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_setup_loading() -> Result<()> {
    let dir = tempdir()?;
    let setup_path = dir.path().join("setup.json");
    let setup = json!({
        "model_output": dir.path().join("out").to_str().unwrap(),
        "model_definitions": ["defs/01-model"],
        "mlrun_version": "1.6.4",
        "variables": { "DIR": "data" }
    });
    fs::write(&setup_path, setup.to_string())?;

    let setup = qgate_report::model::load_setup(&setup_path)?;
    setup.validate()?;
    assert_eq!(setup.project_prefix, "qgate-");
    assert_eq!(setup.model_output, dir.path().join("out"));
    assert_eq!(setup.variables["DIR"], "data");
    Ok(())
}

#[test]
fn test_invalid_setup_json() {
    assert!(qgate_report::model::from_json(r#"{ "variables": [1, 2] }"#).is_err());
}

#[test]
fn test_schema_generation() -> Result<()> {
    let schema = qgate_report::model::generate_schema()?;
    assert!(schema.contains("$schema"));
    assert!(schema.contains("Setup"));
    assert!(schema.contains("model_output"));
    Ok(())
}
