use super::*;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
  api_base_url: Option<String>,
  pub(crate) theme: Theme,
}

impl Config {
  pub(crate) fn api_base_url(&self) -> &str {
    self
      .api_base_url
      .as_deref()
      .unwrap_or(Client::DEFAULT_API_BASE_URL)
  }

  fn config_path() -> Result<PathBuf> {
    if let Ok(path) = env::var("BSKY_COMMENTS_CONFIG") {
      return Ok(PathBuf::from(path));
    }

    let base_dir = if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
      PathBuf::from(dir)
    } else if let Ok(home) = env::var("HOME") {
      PathBuf::from(home).join(".config")
    } else {
      env::current_dir()?.join(".config")
    };

    Ok(base_dir.join("bsky-comments").join("config.json"))
  }

  pub(crate) fn load() -> Result<Self> {
    let path = Self::config_path()?;

    Self::load_from(&path)
      .with_context(|| format!("could not load config from {}", path.display()))
  }

  fn load_from(path: &Path) -> Result<Self> {
    if !path.exists() {
      tracing::debug!(path = %path.display(), "no config file, using defaults");
      return Ok(Self::default());
    }

    let data = fs::read(path)?;

    if data.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self::default());
    }

    let config = serde_json::from_slice::<Self>(&data)?;

    config.theme.validate()?;

    Ok(config)
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::atomic::{AtomicUsize, Ordering},
  };

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  fn temp_config_file(contents: Option<&str>) -> PathBuf {
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

    let path = env::temp_dir().join(format!(
      "bsky_comments_config_test_{}_{unique}.json",
      process::id()
    ));

    if let Some(contents) = contents {
      fs::write(&path, contents).unwrap();
    }

    path
  }

  fn with_temp_env<F>(contents: Option<&str>, f: F)
  where
    F: FnOnce(&Path),
  {
    let path = temp_config_file(contents);

    // SAFETY: Scoped test code sets env var to isolate the config file.
    unsafe {
      env::set_var("BSKY_COMMENTS_CONFIG", &path);
    }

    f(&path);

    // SAFETY: Test restores original environment variable state before exit.
    unsafe {
      env::remove_var("BSKY_COMMENTS_CONFIG");
    }

    let _ = fs::remove_file(&path);
  }

  #[test]
  fn load_uses_configured_path() {
    with_temp_env(
      Some(r#"{"api_base_url": "http://localhost:2584"}"#),
      |_| {
        let config = Config::load().unwrap();
        assert_eq!(config.api_base_url(), "http://localhost:2584");
      },
    );
  }

  #[test]
  fn missing_file_yields_defaults() {
    let path = temp_config_file(None);

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.api_base_url(), Client::DEFAULT_API_BASE_URL);
    assert_eq!(config.theme, Theme::default());
  }

  #[test]
  fn empty_file_yields_defaults() {
    let path = temp_config_file(Some("  \n"));

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.theme, Theme::default());

    let _ = fs::remove_file(&path);
  }

  #[test]
  fn theme_overrides_are_applied() {
    let path =
      temp_config_file(Some(r#"{"theme": {"background_color": "white"}}"#));

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.theme.background_color, "white");
    assert_eq!(config.theme.link_color, Theme::default().link_color);

    let _ = fs::remove_file(&path);
  }

  #[test]
  fn invalid_theme_values_are_rejected() {
    let path = temp_config_file(Some(
      r#"{"theme": {"text_color": "red</style><script>"}}"#,
    ));

    assert!(Config::load_from(&path).is_err());

    let _ = fs::remove_file(&path);
  }
}
