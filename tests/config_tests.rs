use std::fs;
use std::path::PathBuf;

use comicforge::error::{ConfigError, Error};
use comicforge::infrastructure::config::settings::Config;
use tempfile::TempDir;

fn write_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("comicforge.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn full_config_round_trips_every_section() {
    let toml = r#"
[server]
host = "0.0.0.0"
port = 8080

[logging]
level = "debug"
format = "json"

[llm]
base_url = "https://api.openai.com/v1"
model = "gpt-4o-mini"
api_key_env = "OPENAI_API_KEY"
timeout_secs = 30

[story]
premise = "a cat's adventure"
character_name = "Mochi"
subject_token = "Mochi orange cat"
style_suffix = "pastel colors"
panel_count = 4

[image]
model = "someone/flux-mochi:0123abcd"
num_inference_steps = 20
guidance_scale = 3.5
poll_interval_ms = 250
"#;
    let (_dir, path) = write_config(toml);

    let config = Config::load(&path).expect("valid config");

    assert_eq!(config.server.address(), "0.0.0.0:8080");
    assert!(config.logging.is_json());
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert_eq!(config.llm.timeout_secs, Some(30));
    assert_eq!(config.story.character_name, "Mochi");
    assert_eq!(config.story.panel_count, 4);
    assert_eq!(config.image.num_inference_steps, 20);
    assert_eq!(config.image.poll_interval_ms, 250);
    assert_eq!(config.image.base_url, "https://api.replicate.com");
}

#[test]
fn config_rejects_zero_inference_steps() {
    let (_dir, path) = write_config("[image]\nnum_inference_steps = 0\n");

    match Config::load(&path) {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "image.num_inference_steps",
            ..
        })) => {}
        Err(err) => panic!("Expected invalid steps error, got {err}"),
        Ok(_) => panic!("Expected zero steps to be rejected"),
    }
}

#[test]
fn config_rejects_blank_character_name() {
    let (_dir, path) = write_config("[story]\ncharacter_name = \"  \"\n");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::MissingField {
            field: "story.character_name"
        }))
    ));
}

#[test]
fn missing_file_is_a_read_error_for_load() {
    let dir = tempfile::tempdir().expect("temp dir");

    assert!(matches!(
        Config::load(dir.path().join("absent.toml")),
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn missing_file_falls_back_to_defaults_for_load_or_default() {
    let dir = tempfile::tempdir().expect("temp dir");

    let config = Config::load_or_default(dir.path().join("absent.toml")).expect("defaults");

    assert_eq!(config.server.address(), "127.0.0.1:3000");
    assert_eq!(config.llm.api_key_env, "GITHUB_TOKEN");
    assert_eq!(config.image.api_key_env, "REPLICATE_API_TOKEN");
    assert_eq!(config.story.panel_count, 3);
}
