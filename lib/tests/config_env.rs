//! Environment overrides mutate process state, so this file holds a single test.

use queue_predictor::{PredictorConfig, ValidationPolicy};
use std::io::Write;

#[test]
fn test_environment_overrides_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(file, "[training]\nmax_epochs = 100\nbatch_size = 16").unwrap();

    std::env::set_var("QUEUE_PREDICTOR__TRAINING__MAX_EPOCHS", "250");
    std::env::set_var("QUEUE_PREDICTOR__VALIDATION", "fill_defaults");
    let loaded = PredictorConfig::load(Some(file.path()));
    std::env::remove_var("QUEUE_PREDICTOR__TRAINING__MAX_EPOCHS");
    std::env::remove_var("QUEUE_PREDICTOR__VALIDATION");

    let config = loaded.unwrap();
    assert_eq!(config.training.max_epochs, 250);
    assert_eq!(config.training.batch_size, 16);
    assert_eq!(config.validation, ValidationPolicy::FillDefaults);
}
