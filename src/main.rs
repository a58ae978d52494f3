//! Entry point: parse CLI and dispatch to command handlers.

use clap::Parser;
use fantasy_golf::{
    cli::{Commands, FantasyGolf},
    commands::{
        common::CommandContext,
        leaderboard::{handle_leaderboard, LeaderboardParams},
        player::{handle_player, PlayerParams},
        rankings::{handle_rankings, RankingsParams},
        teams::{handle_teams, TeamsParams},
        watch::{handle_watch, WatchParams},
    },
    core::{Config, RankingsSource},
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("fantasy_golf=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("fantasy_golf=warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let app = FantasyGolf::parse();
    init_tracing(app.sources.verbose);

    let mut config = Config::from_env()?;
    app.sources.apply(&mut config)?;

    match app.command {
        Commands::Leaderboard {
            search,
            limit,
            json,
        } => {
            let ctx = CommandContext::new(config)?;
            handle_leaderboard(
                &ctx,
                LeaderboardParams {
                    search,
                    limit,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::Rankings {
            feed,
            search,
            limit,
            file,
            json,
        } => {
            if let Some(path) = file {
                config.rankings = RankingsSource::File(path);
            }
            let ctx = CommandContext::new(config)?;
            handle_rankings(
                &ctx,
                RankingsParams {
                    feed,
                    search,
                    limit,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::Teams {
            strategy,
            league,
            search,
            layout,
            json,
        } => {
            if layout.is_some() {
                config.layout_path = layout;
            }
            let ctx = CommandContext::new(config)?;
            handle_teams(
                &ctx,
                TeamsParams {
                    strategy,
                    league,
                    search,
                    as_json: json,
                },
            )
            .await?
        }

        Commands::Player { name, json } => {
            let ctx = CommandContext::new(config)?;
            handle_player(&ctx, PlayerParams { name, as_json: json }).await?
        }

        Commands::Watch {
            interval,
            strategy,
            layout,
        } => {
            if layout.is_some() {
                config.layout_path = layout;
            }
            let ctx = CommandContext::new(config)?;
            handle_watch(
                &ctx,
                WatchParams {
                    interval_secs: interval,
                    strategy,
                },
            )
            .await?
        }
    }

    Ok(())
}
