use clap::Parser;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;

use typer_funnel::cli::Args;
use typer_funnel::config::Config;
use typer_funnel::error::AppError;
use typer_funnel::logging::setup_logging;
use typer_funnel::match_feed::{create_http_client, load_upcoming_matches};
use typer_funnel::ui;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    // Handle configuration display without touching the network
    if args.list_config {
        Config::display().await?;
        return Ok(());
    }

    // Handle configuration updates
    if args.new_api_domain.is_some() || args.new_log_file_path.is_some() || args.clear_log_file_path
    {
        let mut config = Config::load().await.unwrap_or_default();

        if let Some(new_domain) = args.new_api_domain {
            config.api_domain = new_domain;
        }

        if let Some(new_log_path) = args.new_log_file_path {
            config.log_file_path = Some(new_log_path);
        } else if args.clear_log_file_path {
            config.log_file_path = None;
            println!("Custom log file path cleared. Using default location.");
        }

        config.validate()?;
        config.save().await?;
        println!("Config updated successfully!");
        return Ok(());
    }

    // Load config first to fail early if there's an issue
    let config = Config::load().await?;
    let client = create_http_client(config.http_timeout_seconds)?;

    if args.once {
        // Quick view mode - print the fixture list the funnel would present
        let matches = load_upcoming_matches(&client, &config).await;
        for (i, m) in matches.iter().enumerate() {
            println!(
                "{}. {} - {}  [{}]  {}",
                i + 1,
                m.home_team,
                m.away_team,
                m.round,
                m.date
            );
            if let Some(odds) = &m.odds {
                println!("   1 {}  X {}  2 {}", odds.home, odds.draw, odds.away);
            }
        }
        return Ok(());
    }

    // Interactive mode
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, crossterm::terminal::SetTitle("TYPER BONUSOWY"))?;
    execute!(stdout, EnterAlternateScreen)?;

    let result = ui::run_interactive_ui(&client, &config).await;

    // Clean up terminal
    execute!(stdout, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}
