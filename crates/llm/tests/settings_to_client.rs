//! Resolving a configuration file and building a client from it.

use std::fs;

use deepsearch_core::{AppError, ConfigResolver, Profile, Settings};
use deepsearch_llm::{create_client, ModelInfo};
use tempfile::TempDir;

#[test]
fn test_flat_pairs_round_trip_to_model_info() {
    let settings = Settings::from_flat_pairs([
        ("BASE_URL", "https://x"),
        ("API_KEY", "k"),
        ("TAVILY_API_KEY", "t"),
        ("MODEL_NAME", "m"),
    ])
    .unwrap();

    let client = create_client(&settings).unwrap();
    assert_eq!(
        client.model_info(),
        ModelInfo {
            model: "m".to_string(),
            base_url: "https://x".to_string(),
        }
    );
}

#[test]
fn test_env_file_round_trip_to_model_info() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("config.env"),
        "# DeepSeek endpoint\nBASE_URL = https://api.deepseek.com\nAPI_KEY=sk-1\nTAVILY_API_KEY=tvly-1\n",
    )
    .unwrap();

    let settings = ConfigResolver::in_dir(dir.path())
        .resolve(None, Profile::Basic)
        .unwrap();
    let info = create_client(&settings).unwrap().model_info();

    assert_eq!(info.model, "deepseek-chat");
    assert_eq!(info.base_url, "https://api.deepseek.com");
}

#[test]
fn test_script_without_endpoint_resolves_but_client_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("myconfig.py"),
        "OPENAI_API_KEY = \"sk-oa\"\nTAVILY_API_KEY = \"tvly\"\n",
    )
    .unwrap();

    let settings = ConfigResolver::in_dir(dir.path())
        .resolve(None, Profile::Advanced)
        .unwrap();
    assert_eq!(settings.model, "gpt-4o-mini");

    match create_client(&settings) {
        Err(err) => assert!(matches!(err, AppError::MissingEndpoint)),
        Ok(_) => panic!("Expected MissingEndpoint"),
    }
}
