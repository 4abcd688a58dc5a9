use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("staging"), Environment::Development);
}

#[test]
fn build_app_config_uses_defaults_for_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8501");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(
        cfg.model_path,
        Path::new("./models/imdb_sentiment_model.json")
    );
    assert_eq!(cfg.vectorizer_path, Path::new("./models/imdb_vectorizer.json"));
    assert!(cfg.stopwords_path.is_none());
    assert_eq!(cfg.movies_path, Path::new("./config/movies.yaml"));
    assert!(cfg.history_limit.is_none());
    assert_eq!(cfg.rate_limit_per_minute.get(), 120);
}

#[test]
fn build_app_config_reads_artifact_paths() {
    let mut map = HashMap::new();
    map.insert("CINESENT_MODEL_PATH", "/srv/model.json");
    map.insert("CINESENT_VECTORIZER_PATH", "/srv/vectorizer.json");
    map.insert("CINESENT_STOPWORDS_PATH", "/srv/english");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.model_path, Path::new("/srv/model.json"));
    assert_eq!(cfg.vectorizer_path, Path::new("/srv/vectorizer.json"));
    assert_eq!(cfg.stopwords_path.as_deref(), Some(Path::new("/srv/english")));
}

#[test]
fn build_app_config_blank_stopwords_path_is_unset() {
    let mut map = HashMap::new();
    map.insert("CINESENT_STOPWORDS_PATH", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.stopwords_path.is_none());
}

#[test]
fn build_app_config_fails_with_invalid_bind_addr() {
    let mut map = HashMap::new();
    map.insert("CINESENT_BIND_ADDR", "not-a-socket-addr");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CINESENT_BIND_ADDR"),
        "expected InvalidEnvVar(CINESENT_BIND_ADDR), got: {result:?}"
    );
}

#[test]
fn build_app_config_history_limit_override() {
    let mut map = HashMap::new();
    map.insert("CINESENT_HISTORY_LIMIT", "25");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.history_limit.map(NonZeroUsize::get), Some(25));
}

#[test]
fn build_app_config_history_limit_zero_is_invalid() {
    let mut map = HashMap::new();
    map.insert("CINESENT_HISTORY_LIMIT", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CINESENT_HISTORY_LIMIT"),
        "expected InvalidEnvVar(CINESENT_HISTORY_LIMIT), got: {result:?}"
    );
}

#[test]
fn build_app_config_rate_limit_invalid() {
    let mut map = HashMap::new();
    map.insert("CINESENT_RATE_LIMIT_PER_MINUTE", "lots");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "CINESENT_RATE_LIMIT_PER_MINUTE"),
        "expected InvalidEnvVar(CINESENT_RATE_LIMIT_PER_MINUTE), got: {result:?}"
    );
}

#[test]
fn build_app_config_production_env() {
    let mut map = HashMap::new();
    map.insert("CINESENT_ENV", "production");
    map.insert("CINESENT_LOG_LEVEL", "warn");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "warn");
}
