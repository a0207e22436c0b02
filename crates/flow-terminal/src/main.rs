// crates/flow-terminal/src/main.rs

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use flow_core::FetchRequest;
use flow_terminal::app::{App, InputMode};
use flow_terminal::network::{FetchResponse, TradeFeedConnection};
use flow_terminal::poller::{self, PollTick};
use flow_terminal::{ui, ClientConfig, SettingsStore};

const DEFAULT_LOG_FILE: &str = "flow-terminal.log";

#[derive(Parser)]
#[clap(name = "flow-terminal")]
#[clap(about = "Live option-flow terminal")]
struct Cli {
    /// TOML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Server base URL (overrides config)
    #[clap(short, long)]
    server: Option<String>,

    /// Rows per page (overrides config)
    #[clap(long)]
    page_size: Option<usize>,

    /// Poll period in milliseconds (overrides config)
    #[clap(long)]
    poll_ms: Option<u64>,

    /// Settings file for saved filters and timezone (overrides config)
    #[clap(long)]
    settings: Option<PathBuf>,

    /// Enable debug logging to a file
    #[clap(short, long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> Result<(ClientConfig, bool)> {
        let mut config = ClientConfig::load(self.config.as_deref())?;
        if let Some(server) = self.server {
            config.base_url = server;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(poll_ms) = self.poll_ms {
            config.poll_interval_ms = poll_ms;
        }
        if let Some(settings) = self.settings {
            config.settings_path = settings;
        }
        config.validate()?;
        Ok((config, self.debug))
    }
}

fn init_logging(config: &ClientConfig, debug: bool) -> Result<()> {
    let path = match (&config.log_file, debug) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from(DEFAULT_LOG_FILE),
        (None, false) => return Ok(()),
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let (config, debug) = Cli::parse().into_config()?;

    // Setup logging
    init_logging(&config, debug)?;
    info!("Starting flow-terminal against {}", config.base_url);

    let settings = SettingsStore::open(&config.settings_path)
        .with_context(|| format!("opening settings {}", config.settings_path.display()))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let app = App::new(config.sync_config(), settings);
    let res = run_app(&mut terminal, app, &config).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("Exited with error: {:?}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: App, config: &ClientConfig) -> Result<()> {
    // Channels between the UI loop, the network worker and the poller
    let (tx_to_network, rx_from_app) = mpsc::unbounded_channel::<FetchRequest>();
    let (tx_to_app, mut rx_from_network) = mpsc::unbounded_channel::<FetchResponse>();
    let (tx_tick, mut rx_tick) = mpsc::unbounded_channel::<PollTick>();

    let connection = TradeFeedConnection::new(&config.base_url, config.request_timeout(), tx_to_app)?;
    info!("Fetching from {}", connection.endpoint());

    let network_handle = tokio::spawn(connection.run(rx_from_app));
    let poll_handle = poller::spawn(config.poll_interval(), tx_tick);

    let mut app = app.with_network(tx_to_network);
    app.start(Instant::now());

    loop {
        // Draw UI
        terminal.draw(|f| ui::draw(f, &app))?;

        // Handle events with timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(&mut app, key),
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => app.select_next(Instant::now()),
                    MouseEventKind::ScrollUp => app.select_previous(),
                    _ => {}
                },
                _ => {}
            }
        }

        // Apply finished fetches in arrival order
        while let Ok(response) = rx_from_network.try_recv() {
            app.handle_response(response, Instant::now());
        }

        // Only the latest tick matters; the controller skips it while busy
        let mut ticked = false;
        while rx_tick.try_recv().is_ok() {
            ticked = true;
        }
        if ticked {
            app.on_poll_tick(Instant::now());
        }

        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }

    // Cleanup
    poll_handle.abort();
    network_handle.abort();
    info!("Shutting down");
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    let now = Instant::now();

    if app.show_help {
        if matches!(key.code, KeyCode::F(1) | KeyCode::Esc) {
            app.toggle_help();
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => app.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(now),
            KeyCode::PageUp => app.page_up(),
            KeyCode::PageDown => app.page_down(now),
            KeyCode::Home | KeyCode::Char('g') => app.select_first(),
            KeyCode::End | KeyCode::Char('G') => app.select_last(now),

            KeyCode::Char('/') => app.begin_search(),
            KeyCode::Char('f') | KeyCode::Char('F') => app.open_filters(),
            KeyCode::Char('z') | KeyCode::Char('Z') => app.cycle_timezone(now),
            KeyCode::F(1) => app.toggle_help(),
            _ => {}
        },

        InputMode::Search => match key.code {
            KeyCode::Enter => app.end_search(),
            KeyCode::Esc => app.clear_search(),
            KeyCode::Backspace => app.search_pop(),
            KeyCode::Char(c) => app.search_push(c),
            _ => {}
        },

        InputMode::Filters => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.filter_panel.cursor_up(),
            KeyCode::Down | KeyCode::Char('j') => app.filter_panel.cursor_down(),
            KeyCode::Char(' ') | KeyCode::Enter => app.filter_panel.toggle_current(),
            KeyCode::Char('s') | KeyCode::Char('S') => app.save_filters(now),
            KeyCode::Char('a') | KeyCode::Char('A') => app.apply_filters(now),
            KeyCode::Char('r') | KeyCode::Char('R') => app.reset_filters(now),
            KeyCode::Esc => app.cancel_filters(),
            _ => {}
        },
    }
}
