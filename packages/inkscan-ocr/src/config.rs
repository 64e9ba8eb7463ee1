use std::path::PathBuf;

/// Construction parameters for an engine handle.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Language codes the handle must recognize, e.g. `["en"]`.
    pub languages: Vec<String>,
    /// Request GPU execution. Backends without GPU support fall back to CPU.
    pub gpu: bool,
    /// Emit model loading and progress messages at `info` instead of `debug`.
    pub verbose: bool,
    /// Directory holding the model files.
    pub model_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            gpu: false,
            verbose: true,
            model_dir: PathBuf::from("models"),
        }
    }
}

impl EngineConfig {
    pub fn new<I, S>(languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            languages: languages.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_gpu(mut self, gpu: bool) -> Self {
        self.gpu = gpu;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_model_dir(mut self, model_dir: impl Into<PathBuf>) -> Self {
        self.model_dir = model_dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_english_cpu() {
        let config = EngineConfig::default();
        assert_eq!(config.languages, vec!["en"]);
        assert!(!config.gpu);
        assert_eq!(config.model_dir, PathBuf::from("models"));
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new(["en", "fr"])
            .with_gpu(true)
            .with_verbose(false)
            .with_model_dir("/opt/models");
        assert_eq!(config.languages, vec!["en", "fr"]);
        assert!(config.gpu);
        assert!(!config.verbose);
        assert_eq!(config.model_dir, PathBuf::from("/opt/models"));
    }
}
