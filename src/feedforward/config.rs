use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Gradient descent settings of a network.
///
/// Fixed for the network's lifetime; build a new network to change them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hyperparams {
    pub learning_rate: f64,
    pub momentum: f64,
}

impl Default for Hyperparams {
    fn default() -> Self {
        Hyperparams {
            learning_rate: 0.3,
            momentum: 0.1,
        }
    }
}

impl Hyperparams {
    /// Reads hyper-parameters from a JSON object, missing fields take their defaults.
    ///
    /// ```
    /// # use dnn::feedforward::Hyperparams;
    /// let params = Hyperparams::from_json(r#"{"learning_rate": 0.5}"#).unwrap();
    /// assert_eq!(params.learning_rate, 0.5);
    /// assert_eq!(params.momentum, 0.1);
    /// ```
    pub fn from_json(json: &str) -> serde_json::Result<Hyperparams> {
        serde_json::from_str(json)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Hyperparams, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(Hyperparams::from_json(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(Hyperparams::from_json("{}").unwrap(), Hyperparams::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Hyperparams::from_json(r#"{"momentum": "high"}"#).is_err());
    }

    #[test]
    fn file_errors_keep_their_cause() {
        let missing = std::env::temp_dir().join(format!(
            "dnn_config_missing_{}.json",
            std::process::id()
        ));
        let _ = fs::remove_file(&missing);
        assert!(matches!(
            Hyperparams::from_file(&missing),
            Err(ConfigError::Io(_))
        ));

        let garbled = std::env::temp_dir().join(format!(
            "dnn_config_garbled_{}.json",
            std::process::id()
        ));
        fs::write(&garbled, "{ learning_rate: ").unwrap();
        let result = Hyperparams::from_file(&garbled);
        fs::remove_file(&garbled).unwrap();
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }
}
