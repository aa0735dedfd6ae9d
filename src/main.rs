use {
  action::Action,
  anyhow::{Context, anyhow, bail},
  app::App,
  arguments::Arguments,
  author::Author,
  clap::{Parser, Subcommand, ValueEnum},
  client::Client,
  comment_entry::CommentEntry,
  comment_view::CommentView,
  config::Config,
  crossterm::{
    event as crossterm_event,
    event::{
      Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
    },
    execute,
    style::Stylize,
    terminal::{
      EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
      enable_raw_mode,
    },
  },
  dispatch::Dispatch,
  effect::Effect,
  event::Event,
  help_view::HelpView,
  output_format::OutputFormat,
  post::Post,
  post_uri::PostUri,
  ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
  },
  serde::{
    Deserialize, Deserializer,
    de::{self, Unexpected},
  },
  serde_json::Value,
  state::State,
  std::{
    backtrace::BacktraceStatus,
    collections::HashSet,
    env,
    fmt::{self, Display, Formatter, Write as FmtWrite},
    fs,
    io::{self, IsTerminal, Stdout, Write as IoWrite},
    path::{Path, PathBuf},
    process,
    str::FromStr,
    time::{Duration, Instant},
  },
  theme::Theme,
  thread::{Thread, ThreadNode},
  thread_response::ThreadResponse,
  tokio::{
    runtime::Handle,
    sync::mpsc::{self, UnboundedReceiver, UnboundedSender},
  },
  tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter},
  transient_message::TransientMessage,
  utils::{deserialize_count, format_meta, last_segment, truncate, wrap_text},
  widget::Widget,
};

mod action;
mod app;
mod arguments;
mod author;
mod client;
mod comment_entry;
mod comment_view;
mod config;
mod dispatch;
mod effect;
mod event;
mod help_view;
mod markup;
mod output_format;
mod post;
mod post_uri;
mod state;
mod theme;
mod thread;
mod thread_response;
mod transient_message;
mod utils;
mod widget;

const POST_URI_REQUIRED: &str = "Post URI is required";
const LOAD_ERROR: &str = "Error loading comments";
const NO_COMMENTS: &str = "No comments found";

const REPLY_INFO_PREFIX: &str = "可以在";
const REPLY_INFO_SUFFIX: &str = "回复该博客.";
const SHOW_MORE_LABEL: &str = "显示更多评论";

const COMMENTS_STATUS: &str = "↑/k up • ↓/j down • ←/h collapse • →/l expand • m more • o open • r refresh • q quit • ? help";

const HELP_TITLE: &str = "Help";
const HELP_STATUS: &str = "Press ? or esc to close help";

const LOADING_THREAD_STATUS: &str = "Loading comments...";

const BASE_INDENT: &str = " ";

const HELP_TEXT: &str = "\
Navigation:
  ↑ / k   move selection up
  ↓ / j   move selection down
  pg↓     page down
  pg↑     page up
  ctrl+d  page down
  ctrl+u  page up
  home    jump to first comment
  end     jump to last comment
  ← / h   collapse or go to parent
  → / l   expand or go to first child
  enter   toggle collapse or expand

Actions:
  m       show more comments
  o       open the selected comment in your browser
  p       open the post in your browser
  r       reload the thread
  q       quit
  esc     close help or quit
  ?       toggle this help
";

type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;

fn initialize_logging(quiet: bool) {
  let writer = if quiet {
    BoxMakeWriter::new(io::sink)
  } else {
    BoxMakeWriter::new(io::stderr)
  };

  let filter =
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(writer)
    .try_init();
}

fn initialize_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
  enable_raw_mode()?;

  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen)?;

  Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(
  terminal: &mut Terminal<CrosstermBackend<Stdout>>,
) -> Result {
  disable_raw_mode()?;

  execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

  terminal.show_cursor()?;

  Ok(())
}

async fn run() -> Result {
  Arguments::parse().run().await
}

#[tokio::main]
async fn main() {
  if let Err(error) = run().await {
    let use_color = io::stderr().is_terminal();

    if use_color {
      eprintln!("{} {error}", "error:".bold().red());
    } else {
      eprintln!("error: {error}");
    }

    for (i, error) in error.chain().skip(1).enumerate() {
      if i == 0 {
        eprintln!();

        if use_color {
          eprintln!("{}", "because:".bold().red());
        } else {
          eprintln!("because:");
        }
      }

      if use_color {
        eprintln!("{} {error}", "-".bold().red());
      } else {
        eprintln!("- {error}");
      }
    }

    let backtrace = error.backtrace();

    if backtrace.status() == BacktraceStatus::Captured {
      if use_color {
        eprintln!("{}", "backtrace:".bold().red());
      } else {
        eprintln!("backtrace:");
      }

      eprintln!("{backtrace}");
    }

    process::exit(1);
  }
}
