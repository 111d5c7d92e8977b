//! City Weather - current weather and clothing advice for a city
//!
//! A terminal UI application that looks up the weather for a typed city name
//! and suggests what to wear.

use std::io;
use std::panic;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use cityweather::app::App;
use cityweather::cli::{Cli, StartupConfig};
use cityweather::data::WeatherClient;
use cityweather::logging;
use cityweather::lookup::{self, LookupDispatcher};
use cityweather::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    // Parse CLI arguments before touching the terminal
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    match logging::init(config.log_file.as_deref()) {
        Ok(Some(path)) => info!(path = %path.display(), "logging started"),
        Ok(None) => {}
        Err(e) => eprintln!("Warning: could not open log file: {}", e),
    }

    let client = WeatherClient::new(&config.api_base_url)?;
    let mut dispatcher = LookupDispatcher::new(client);

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::with_startup_config(&config);

    // Look up the startup city right away
    dispatcher.dispatch(app.begin_initial_lookup());

    // Main event loop
    loop {
        // Fold in finished lookups
        while let Some(outcome) = lookup::try_recv(&mut dispatcher) {
            app.apply_outcome(outcome);
        }

        // Render UI
        terminal.draw(|f| ui::render(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if let Some(request) = app.take_pending_lookup() {
            dispatcher.dispatch(request);
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    if app.is_loading {
        warn!(city = %app.active_city, "quit with a lookup in flight");
    }
    info!("exiting");

    Ok(())
}
