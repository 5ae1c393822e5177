use super::*;

use serial_test::serial;

fn clear_env() {
    for name in [
        "ATTUNE_MODEL_DIR",
        "ATTUNE_LANG",
        "ATTUNE_PRESET",
        "ATTUNE_BATCH_SIZE",
    ] {
        unsafe { env::remove_var(name) };
    }
}

#[test]
#[serial]
fn test_defaults_when_env_is_empty() {
    clear_env();
    let config = Config::from_env().unwrap();
    assert!(config.model_dir.is_none());
    assert_eq!(config.language, "en");
    assert_eq!(config.preset, PresetName::Balanced);
    assert_eq!(config.batch_size, crate::constants::DEFAULT_BATCH_SIZE);
}

#[test]
#[serial]
fn test_env_overrides() {
    clear_env();
    unsafe {
        env::set_var("ATTUNE_MODEL_DIR", "/models/minilm");
        env::set_var("ATTUNE_LANG", "ja");
        env::set_var("ATTUNE_PRESET", "strict");
        env::set_var("ATTUNE_BATCH_SIZE", "32");
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.model_dir, Some(PathBuf::from("/models/minilm")));
    assert_eq!(config.language, "ja");
    assert_eq!(config.preset, PresetName::Strict);
    assert_eq!(config.batch_size, 32);

    clear_env();
}

#[test]
#[serial]
fn test_whitespace_values_fall_back_to_defaults() {
    clear_env();
    unsafe { env::set_var("ATTUNE_LANG", "   ") };
    let config = Config::from_env().unwrap();
    assert_eq!(config.language, "en");
    clear_env();
}

#[test]
#[serial]
fn test_invalid_preset_is_rejected() {
    clear_env();
    unsafe { env::set_var("ATTUNE_PRESET", "mystery") };
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidPreset { .. })
    ));
    clear_env();
}

#[test]
#[serial]
fn test_unparseable_batch_size_is_rejected() {
    clear_env();
    unsafe { env::set_var("ATTUNE_BATCH_SIZE", "lots") };
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::BatchSizeParseError { .. })
    ));
    clear_env();
}

#[test]
#[serial]
fn test_zero_batch_size_is_rejected() {
    clear_env();
    unsafe { env::set_var("ATTUNE_BATCH_SIZE", "0") };
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidBatchSize { .. })
    ));
    clear_env();
}
