mod draw;
mod state;

use crate::state::settings::Settings;
use crate::state::watcher::LiveWatcher;
use clap::{Parser, Subcommand, ValueEnum};
use log::warn;
use sportsfeed_api::aggregate::{Aggregator, order_for_scope};
use sportsfeed_api::{CatalogFilter, EventCatalog, Provider};
use std::io;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(version, about = "Live and upcoming sporting events from ESPN and 365scores")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events, soonest first
    List {
        /// Sport slug or name, e.g. soccer, mma-ufc, NFL
        #[arg(long)]
        sport: Option<String>,
        /// League slug or name, e.g. premier-league, "La Liga"
        #[arg(long)]
        league: Option<String>,
        #[arg(long)]
        json: bool,
        /// Bypass the catalog cache and only request the leagues of --sport
        #[arg(long)]
        direct: bool,
    },
    /// Events currently in play
    Live {
        #[arg(long)]
        json: bool,
    },
    /// One event in detail
    Show {
        slug: String,
        #[arg(long)]
        json: bool,
    },
    /// Print the live count every few seconds until ctrl-c
    Watch {
        /// Seconds between polls
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Sports the catalog covers
    Sports {
        #[arg(long)]
        json: bool,
    },
    /// Leagues requested upstream
    Leagues {
        /// Sport slug or name
        #[arg(long)]
        sport: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// A team's details and fixtures
    Team {
        /// Provider-native team id, e.g. 359 (ESPN soccer) or 110 (365scores)
        team_id: String,
        #[arg(long, value_enum, default_value_t = TeamSource::Espn)]
        provider: TeamSource,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TeamSource {
    Espn,
    #[value(name = "365scores")]
    Scores365,
}

impl From<TeamSource> for Provider {
    fn from(source: TeamSource) -> Self {
        match source {
            TeamSource::Espn => Provider::Espn,
            TeamSource::Scores365 => Provider::Scores365,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    better_panic::install();
    let cli = Cli::parse();

    let settings = Settings::load();
    env_logger::Builder::new()
        .parse_filters(&settings.log_filter)
        .target(env_logger::Target::Stderr)
        .init();
    for problem in &settings.problems {
        warn!("{problem}");
    }

    let catalog = EventCatalog::from_config(&settings.feed);
    let mut stdout = io::stdout();

    match cli.command {
        Command::List {
            sport,
            league,
            json,
            direct,
        } => {
            let filter = CatalogFilter { sport, league };
            let events = if direct {
                let mut events = Aggregator::new(&settings.feed)
                    .aggregate(filter.sport.as_deref())
                    .await;
                events.retain(|event| filter.matches(event));
                order_for_scope(&mut events, filter.is_combat_scope());
                events
            } else {
                catalog.combined(&filter).await
            };
            draw::events(&mut stdout, &events, json)?;
        }
        Command::Live { json } => {
            draw::events(&mut stdout, &catalog.live().await, json)?;
        }
        Command::Show { slug, json } => {
            let Some(event) = catalog.by_slug(&slug).await else {
                anyhow::bail!("no event with slug {slug:?}");
            };
            draw::event_detail(&mut stdout, &event, json)?;
        }
        Command::Watch { interval } => {
            LiveWatcher::new(&catalog, Duration::from_secs(interval))
                .run(&mut stdout)
                .await?;
        }
        Command::Sports { json } => {
            draw::sports(&mut stdout, catalog.sports(), json)?;
        }
        Command::Leagues { sport, json } => {
            draw::leagues(&mut stdout, &catalog.leagues(sport.as_deref()), json)?;
        }
        Command::Team {
            team_id,
            provider,
            json,
        } => {
            let schedule = catalog.team_schedule(provider.into(), &team_id).await?;
            draw::team(&mut stdout, &schedule, json)?;
        }
    }
    Ok(())
}
