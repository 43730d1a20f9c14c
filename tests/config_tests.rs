//! Configuration Environment Tests
//!
//! Environment variables are process-wide, so these run in their own test
//! binary rather than beside the file-backed unit tests in `src/config.rs`.

use object_model_transform::{MapperConfig, OutputFormat};

#[test]
fn test_env_vars_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("omt.toml");
    std::fs::write(&path, "[limits]\nmax_depth = 7\n\n[output]\nformat = \"compact\"\n").unwrap();

    std::env::set_var("OMT__LIMITS__MAX_DEPTH", "9");
    std::env::set_var("OMT__OUTPUT__MODEL_TAG", "kind");
    let loaded = MapperConfig::load_from(path.to_str());
    std::env::remove_var("OMT__LIMITS__MAX_DEPTH");
    std::env::remove_var("OMT__OUTPUT__MODEL_TAG");

    let config = loaded.unwrap();
    assert_eq!(config.limits.max_depth, 9);
    assert_eq!(config.output.model_tag, "kind");
    assert_eq!(config.output.format, OutputFormat::Compact);
    assert_eq!(config.transform_options().max_depth, 9);
}
