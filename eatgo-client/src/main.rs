//! eatgo - browse restaurants and post reviews from the terminal
//!
//! Every subcommand runs the same state engine a graphical client would:
//! coordinators fetch, the store applies the resulting actions, and output
//! is rendered from selectors.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use eatgo_client::{
    app::{
        selectors,
        state::{login_field, review_field},
        Action, Effects, Store,
    },
    output::{self, OutputFormat, SessionStatus},
    ClientError, Result,
};
use libeatgo::{
    api::{ApiClient, HttpApiClient},
    logging::LoggingConfig,
    storage::open_session_storage,
    types::{CategoryId, RegionId, RestaurantId},
    Config,
};

#[derive(Parser, Debug)]
#[command(name = "eatgo")]
#[command(about = "Find restaurants by region and category, and review them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List regions
    Regions,

    /// List categories
    Categories,

    /// List restaurants for a region and category
    Restaurants {
        /// Region id (see `eatgo regions`)
        #[arg(short, long)]
        region: RegionId,

        /// Category id (see `eatgo categories`)
        #[arg(short, long)]
        category: CategoryId,
    },

    /// Show one restaurant with its menu and reviews
    Restaurant { id: RestaurantId },

    /// Log in and remember the session
    Login {
        #[arg(short, long, env = "EATGO_EMAIL")]
        email: String,

        #[arg(short, long, env = "EATGO_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Forget the session
    Logout,

    /// Review a restaurant (requires login)
    Review {
        /// Restaurant id
        id: RestaurantId,

        #[arg(short, long)]
        score: String,

        #[arg(short, long)]
        description: String,
    },

    /// Show whether a session is stored
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    LoggingConfig::from_env("warn", cli.verbose).init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    config.validate()?;

    let storage = open_session_storage(&config.session)?;
    let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(&config.api)?);

    let mut store = Store::rehydrate(storage.as_ref())?;
    let effects = Effects::new(api, Arc::clone(&storage), store.dispatcher());
    let format = cli.format;

    let rendered = match cli.command {
        Command::Regions => {
            effects.load_regions().await?;
            store.process_pending();
            output::regions(format, store.select(selectors::regions))?
        }

        Command::Categories => {
            effects.load_categories().await?;
            store.process_pending();
            output::categories(format, store.select(selectors::categories))?
        }

        Command::Restaurants { region, category } => {
            effects.load_filters().await?;
            store.process_pending();

            store.dispatch(Action::SelectRegion(region));
            store.dispatch(Action::SelectCategory(category));

            let query = store.select(selectors::restaurant_query).ok_or_else(|| {
                ClientError::invalid_input(format!(
                    "unknown region {} or category {}",
                    region, category
                ))
            })?;

            effects.load_restaurants(&query).await?;
            store.process_pending();
            output::restaurants(format, store.select(selectors::restaurants))?
        }

        Command::Restaurant { id } => {
            effects.load_restaurant(id).await?;
            store.process_pending();
            let state = store.state();
            let restaurant = selectors::restaurant(&state)
                .ok_or_else(|| ClientError::invalid_input(format!("no restaurant {}", id)))?;
            output::restaurant(format, restaurant)?
        }

        Command::Login { email, password } => {
            store.dispatch(Action::login_field(login_field::EMAIL, email));
            store.dispatch(Action::login_field(login_field::PASSWORD, password));

            let login_fields = store.select(|s| selectors::login_fields(s).clone());
            effects.request_session(&login_fields).await?;
            store.process_pending();

            session_status(&store, storage.backend_name(), format)?
        }

        Command::Logout => {
            effects.clear_session().await?;
            store.process_pending();
            session_status(&store, storage.backend_name(), format)?
        }

        Command::Review {
            id,
            score,
            description,
        } => {
            if !store.select(selectors::is_logged_in) {
                return Err(ClientError::invalid_input(
                    "not logged in; run `eatgo login` first",
                ));
            }

            store.dispatch(Action::review_field(review_field::SCORE, score));
            store.dispatch(Action::review_field(review_field::DESCRIPTION, description));

            let (access_token, review_fields) = store.select(|s| {
                (
                    selectors::access_token(s).to_string(),
                    selectors::review_fields(s).clone(),
                )
            });
            effects
                .submit_review(&access_token, &review_fields, id)
                .await?;

            // The review is stored; a failed refresh only loses the listing
            if let Err(e) = effects.load_restaurant(id).await {
                tracing::warn!("Review submitted, but reloading restaurant {} failed: {}", id, e);
            }
            store.process_pending();
            let state = store.state();
            output::review(format, selectors::restaurant(&state), id)?
        }

        Command::Status => session_status(&store, storage.backend_name(), format)?,
    };

    if !rendered.is_empty() {
        println!("{}", rendered);
    }
    Ok(())
}

fn session_status(store: &Store, backend: &str, format: OutputFormat) -> Result<String> {
    let status = SessionStatus {
        logged_in: store.select(selectors::is_logged_in),
        storage: backend.to_string(),
    };
    output::session(format, &status)
}
