//! A portfolio page in the terminal whose navigation rail eases toward the
//! top as you scroll down and drifts back as you scroll up.
//!
//! Run the binary to open the page.  Run with `--print-config` to dump the
//! effective configuration in config-file format.

mod app;
mod config;
mod core;
mod ui;

use std::io::stderr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    scroll_source::{attach, Attachment, ScrollSource},
    state::{AppState, ControllerStatus},
};
use crate::config::AppConfig;
use crate::core::{page::Page, target::WatchTarget};
use crate::ui::{
    layout::AppLayout,
    page_widget::PageWidget,
    rail::{self, NavigationRail},
    status,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Scroll-driven margin demo on a portfolio page")]
struct Cli {
    /// Viewport width in px used for activation (defaults to columns × cell width).
    #[arg(long)]
    viewport_width: Option<u32>,

    /// Scroll throttle window in milliseconds.
    #[arg(long)]
    throttle_ms: Option<u64>,

    /// Lowest margin the rail may reach (px).
    #[arg(long, allow_hyphen_values = true)]
    min: Option<i32>,

    /// Highest margin the rail may reach (px).
    #[arg(long, allow_hyphen_values = true)]
    max: Option<i32>,

    /// Margin applied at activation (px).
    #[arg(long, allow_hyphen_values = true)]
    init: Option<i32>,

    /// Margin change per scroll sample (px).
    #[arg(long, allow_hyphen_values = true)]
    step: Option<i32>,

    /// Print the effective configuration and exit.
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Layer command-line overrides on top of the loaded config.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(v) = self.throttle_ms {
            config.throttle_ms = v.clamp(1, 1000);
        }
        if let Some(v) = self.min {
            config.margin.min_margin_top = v;
        }
        if let Some(v) = self.max {
            config.margin.max_margin_top = v;
        }
        if let Some(v) = self.init {
            config.margin.init_margin_top = v;
        }
        if let Some(v) = self.step {
            config.margin.update_steps_in_px = v;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only emits when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::load();
    cli.apply(&mut config);
    let margin_config = config
        .margin_config()
        .with_context(|| format!("invalid margin configuration ({})", config::config_path().display()))?;

    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }

    // ── activation ────────────────────────────────────────────
    // The viewport is sampled once; resizing later never re-activates.
    let (cols, rows) = terminal::size()?;
    let viewport_width = cli
        .viewport_width
        .unwrap_or_else(|| u32::from(cols) * config.cell_width_px);

    let source = ScrollSource::default();
    let (target, mut margin_rx) = WatchTarget::channel();
    let mut subscription = attach(
        &source,
        target,
        Attachment {
            config: margin_config,
            viewport_width,
            min_viewport_width: config.min_viewport_width,
            throttle_window: config.throttle_window(),
        },
    );
    let controller = match subscription {
        Some(_) => ControllerStatus::Active,
        None => ControllerStatus::Inert { viewport_width },
    };

    let page = Page::portfolio(config.cell_height_px);
    let mut state = AppState::new(page, config, source, controller);
    state.resize(cols, rows);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut layout = AppLayout::from_area(Rect::new(0, 0, cols, rows));

    // ── event loop ────────────────────────────────────────────
    loop {
        let margin_px = *margin_rx.borrow_and_update();
        let margin_rows = rail::margin_rows(margin_px, state.config.cell_height_px);

        terminal.draw(|frame| {
            layout = AppLayout::from_area(frame.area());

            frame.render_widget(
                NavigationRail {
                    page: &state.page,
                    current: state.current_section(),
                    margin_rows,
                },
                layout.rail_area,
            );

            let page_block = Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border_style());
            frame.render_widget(
                PageWidget::new(&state.page, state.first_row()).block(page_block),
                layout.page_area,
            );

            frame.render_widget(status::status_bar(&state, margin_px), layout.status_area);
        })?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => {
                        state.status_message = None;
                        handler::handle_key(&mut state, k);
                    }
                    AppEvent::Wheel(w) => handler::handle_wheel(&mut state, w),
                    AppEvent::Mouse(m) => {
                        let entries = state.page.sections().len();
                        let rail_area = layout.rail_area;
                        handler::handle_mouse(&mut state, m, |col, row| {
                            rail::entry_at(rail_area, margin_rows, entries, col, row)
                        });
                    }
                    AppEvent::Resize(w, h) => state.resize(w, h),
                    AppEvent::Tick => {}
                }
            }

            // Redraw as soon as the controller writes a new margin.  Errors
            // once the controller is gone (inert or released), which simply
            // disables this branch.
            Ok(()) = margin_rx.changed() => {}

            // Terminal reader stopped and no controller is left.
            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    if let Some(sub) = subscription.as_mut().filter(|s| s.is_active()) {
        sub.release();
    }
    tracing::debug!(subscribers = state.source.subscriber_count(), "event loop finished");
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    Ok(())
}
