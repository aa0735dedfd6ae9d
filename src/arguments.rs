use super::*;

#[derive(Debug, Parser)]
#[command(name = "bsky-comments", version)]
#[command(about = "Render a Bluesky post's replies as an embeddable comment thread")]
pub(crate) struct Arguments {
  #[command(subcommand)]
  command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
  /// Browse the comment thread in the terminal
  Preview {
    /// Post to load, as an at:// URI or a bsky.app post URL
    post: String,
  },
  /// Fetch a thread and write the comment widget
  Render {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
    /// Leave out the style element
    #[arg(long)]
    no_css: bool,
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Post to load, as an at:// URI or a bsky.app post URL
    post: String,
    /// Number of top-level replies to show
    #[arg(long, default_value_t = Widget::INITIAL_VISIBLE_COUNT)]
    visible: usize,
    /// Line width for text output
    #[arg(long, default_value_t = 80, value_parser = clap::value_parser!(u16).range(20..))]
    width: u16,
  },
}

struct RenderOptions {
  format: OutputFormat,
  no_css: bool,
  output: Option<PathBuf>,
  visible: usize,
  width: u16,
}

impl Arguments {
  async fn preview(config: Config, post: &str) -> Result {
    let uri = PostUri::parse(post)?;

    let client = Client::new(config.api_base_url());

    let thread = client.fetch_thread(&uri).await.context(LOAD_ERROR)?;

    let widget = Widget::new(thread, config.theme);

    let mut terminal = initialize_terminal()?;

    let mut app = App::new(client, uri, widget);

    let result = app.run(&mut terminal);

    restore_terminal(&mut terminal)?;

    result
  }

  async fn render(config: Config, post: &str, options: RenderOptions) -> Result {
    // A missing post keeps its own message, anything else that stops the
    // thread from loading is reported as a load error.
    let loaded = match PostUri::parse(post) {
      Ok(uri) => Client::new(config.api_base_url())
        .fetch_thread(&uri)
        .await
        .context(LOAD_ERROR),
      Err(error) if post.trim().is_empty() => Err(error),
      Err(error) => Err(error.context(LOAD_ERROR)),
    };

    let thread = match loaded {
      Ok(thread) => thread,
      Err(error) => {
        // Only the outermost message goes into the page, the cause chain
        // is reported on stderr.
        let message = error.to_string();

        let document = match options.format {
          OutputFormat::Html => Widget::render_error(&message),
          OutputFormat::Text => format!("{message}\n"),
        };

        Self::write_document(options.output.as_deref(), &document)?;

        return Err(error);
      }
    };

    let widget = Widget::new(thread, config.theme)
      .with_styles(!options.no_css)
      .with_visible_count(options.visible);

    let document = match options.format {
      OutputFormat::Html => widget.render(),
      OutputFormat::Text => widget.render_text(usize::from(options.width))?,
    };

    tracing::info!(
      replies = widget.reply_count(),
      visible = widget.visible_count(),
      shown = widget.visible_replies().len(),
      "rendered comment thread"
    );

    Self::write_document(options.output.as_deref(), &document)
  }

  pub(crate) async fn run(self) -> Result {
    initialize_logging(matches!(self.command, Command::Preview { .. }));

    let config = Config::load()?;

    match self.command {
      Command::Preview { post } => Self::preview(config, &post).await,
      Command::Render {
        format,
        no_css,
        output,
        post,
        visible,
        width,
      } => {
        Self::render(
          config,
          &post,
          RenderOptions {
            format,
            no_css,
            output,
            visible,
            width,
          },
        )
        .await
      }
    }
  }

  fn write_document(path: Option<&Path>, document: &str) -> Result {
    match path {
      Some(path) => fs::write(path, document)
        .with_context(|| format!("could not write {}", path.display())),
      None => {
        let mut stdout = io::stdout().lock();
        stdout.write_all(document.as_bytes())?;
        stdout.flush()?;
        Ok(())
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use {
    super::*,
    std::sync::atomic::{AtomicUsize, Ordering},
  };

  static COUNTER: AtomicUsize = AtomicUsize::new(0);

  const POST: &str = "at://did:plc:abc/app.bsky.feed.post/3kxyz";

  fn html_options(output: &Path) -> RenderOptions {
    RenderOptions {
      format: OutputFormat::Html,
      no_css: false,
      output: Some(output.to_path_buf()),
      visible: Widget::INITIAL_VISIBLE_COUNT,
      width: 80,
    }
  }

  fn temp_output() -> PathBuf {
    let unique = COUNTER.fetch_add(1, Ordering::Relaxed);

    env::temp_dir().join(format!(
      "bsky_comments_render_test_{}_{unique}.html",
      process::id()
    ))
  }

  fn unreachable_config() -> Config {
    serde_json::from_str(r#"{"api_base_url": "http://127.0.0.1:1"}"#).unwrap()
  }

  #[tokio::test]
  async fn render_writes_load_error_when_fetch_fails() {
    let output = temp_output();

    let result =
      Arguments::render(unreachable_config(), POST, html_options(&output)).await;

    let document = fs::read_to_string(&output).unwrap();

    let _ = fs::remove_file(&output);

    assert_eq!(result.unwrap_err().to_string(), LOAD_ERROR);
    assert!(document.contains("<p class=\"error\">Error loading comments</p>"));
  }

  #[tokio::test]
  async fn render_writes_load_error_for_invalid_post() {
    let output = temp_output();

    let result = Arguments::render(
      unreachable_config(),
      "https://example.com/not-a-post",
      html_options(&output),
    )
    .await;

    let document = fs::read_to_string(&output).unwrap();

    let _ = fs::remove_file(&output);

    assert!(result.is_err());
    assert!(document.contains("Error loading comments"));
  }

  #[tokio::test]
  async fn render_requires_post() {
    let output = temp_output();

    let result =
      Arguments::render(unreachable_config(), "  ", html_options(&output)).await;

    let document = fs::read_to_string(&output).unwrap();

    let _ = fs::remove_file(&output);

    assert_eq!(result.unwrap_err().to_string(), POST_URI_REQUIRED);
    assert!(document.contains("<p class=\"error\">Post URI is required</p>"));
  }

  #[tokio::test]
  async fn preview_requires_post() {
    let error = Arguments::preview(unreachable_config(), "")
      .await
      .unwrap_err();

    assert_eq!(error.to_string(), POST_URI_REQUIRED);
  }

  #[test]
  fn render_defaults() {
    let arguments =
      Arguments::try_parse_from(["bsky-comments", "render", POST]).unwrap();

    match arguments.command {
      Command::Render {
        format,
        no_css,
        output,
        visible,
        width,
        ..
      } => {
        assert_eq!(format, OutputFormat::Html);
        assert!(!no_css);
        assert_eq!(output, None);
        assert_eq!(visible, 3);
        assert_eq!(width, 80);
      }
      Command::Preview { .. } => panic!("expected render command"),
    }
  }

  #[test]
  fn render_rejects_narrow_width() {
    assert!(
      Arguments::try_parse_from([
        "bsky-comments",
        "render",
        "--width",
        "10",
        POST
      ])
      .is_err()
    );
  }

  #[test]
  fn render_requires_post_argument() {
    assert!(Arguments::try_parse_from(["bsky-comments", "render"]).is_err());
  }
}
