use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use classmatch::{
    config::{BoxError, create_app, make_pool, run_migrations},
    tournaments::{Sport, matches::draw},
};

#[derive(Parser)]
#[command(about = "Score keeping for the school sports day")]
struct Cli {
    /// One of `error`, `warn`, `info`, `debug` or `trace`.
    #[arg(long, env = "CLASSMATCH_LOG", default_value = "info")]
    log_level: tracing::Level,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Database {
    #[arg(long, env = "DATABASE_URL", default_value = "classmatch.db")]
    database_url: String,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the JSON API.
    Serve {
        #[command(flatten)]
        db: Database,
        #[arg(long, env = "CLASSMATCH_BIND", default_value = "127.0.0.1:8000")]
        bind: SocketAddr,
    },
    /// Create the draw of every sport, discarding any existing matches and
    /// rankings.
    Init {
        #[command(flatten)]
        db: Database,
    },
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).init();

    match cli.command {
        Command::Serve { db, bind } => {
            tracing::info!(location = %db.database_url, "opening database");
            let pool = make_pool(&db.database_url)?;
            run_migrations(&pool)?;

            let listener = tokio::net::TcpListener::bind(bind).await?;
            tracing::info!(%bind, "listening");
            axum::serve(listener, create_app(pool)).await?;
        }
        Command::Init { db } => {
            let pool = make_pool(&db.database_url)?;
            run_migrations(&pool)?;
            let mut conn = pool.get()?;
            for sport in Sport::ALL {
                for division in sport.divisions() {
                    let summary = draw::reset(sport, *division, &mut conn)?;
                    tracing::info!(
                        %sport,
                        division = division.as_str(),
                        matches = summary.matches_created,
                        "draw created"
                    );
                }
            }
        }
    }

    Ok(())
}
