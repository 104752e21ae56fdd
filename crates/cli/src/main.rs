use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use model::{Post, UserId};
use recommender::{RecommendStore, Settings};
use scoring::{BoostPipeline, Blacklist, ScoringConfig};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// recsdk - feed ranking toolkit
#[derive(Parser)]
#[command(name = "recsdk")]
#[command(about = "Rank feed candidates with remote weights, stickiness and boosts", long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Overrides for settings read from the environment (see `Settings::from_env`).
#[derive(Args, Debug, Default)]
struct ConnectionArgs {
    /// Base URL of the recommendation service [env: RECOMMENDER_URL]
    #[arg(long, global = true)]
    recommender_url: Option<String>,

    /// Transport timeout for a weight request, in seconds [env: RECOMMENDER_HTTP_TIMEOUT_SECS]
    #[arg(long, global = true)]
    http_timeout_secs: Option<u64>,

    /// How long ranking waits for weights, in milliseconds [env: WEIGHT_TIMEOUT_MS]
    #[arg(long, global = true)]
    weight_timeout_ms: Option<u64>,

    /// Redis instance holding stickiness records and the event stream [env: REDIS_URL]
    #[arg(long, global = true)]
    redis_url: Option<String>,

    /// Postgres database holding the blacklist [env: DATABASE_URL]
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Query returning blacklisted user ids as text [env: BLACKLIST_QUERY]
    #[arg(long, global = true)]
    blacklist_query: Option<String>,
}

impl ConnectionArgs {
    /// Apply the flags that were given on top of `settings`.
    fn apply(self, mut settings: Settings) -> Settings {
        if let Some(url) = self.recommender_url {
            settings.recommender_url = url;
        }
        if let Some(secs) = self.http_timeout_secs {
            settings.recommender_http_timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = self.weight_timeout_ms {
            settings.weight_timeout = Duration::from_millis(ms);
        }
        if self.redis_url.is_some() {
            settings.redis_url = self.redis_url;
        }
        if self.database_url.is_some() {
            settings.database_url = self.database_url;
        }
        if self.blacklist_query.is_some() {
            settings.blacklist_query = self.blacklist_query;
        }
        settings
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a candidate file for a user
    Rank {
        /// User ID to rank for
        #[arg(long)]
        user_id: UserId,

        /// JSON file with an array of posts
        #[arg(long)]
        input: PathBuf,

        /// Number of ranked posts to print
        #[arg(long, default_value = "20")]
        limit: usize,

        /// Show engagement, weight and age for each post
        #[arg(long)]
        explain: bool,
    },

    /// Score a candidate file locally, without remote weights or a blacklist
    Score {
        /// JSON file with an array of posts
        #[arg(long)]
        input: PathBuf,

        /// Apply the rule-based boosts before scoring
        #[arg(long)]
        boost: bool,
    },

    /// Report that a user opened a post
    Notify {
        #[arg(long)]
        user_id: UserId,

        #[arg(long)]
        post_id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = cli
        .connection
        .apply(Settings::from_env().context("Invalid configuration in environment")?);

    match cli.command {
        Commands::Rank {
            user_id,
            input,
            limit,
            explain,
        } => handle_rank(&settings, user_id, &input, limit, explain).await?,
        Commands::Score { input, boost } => handle_score(&settings, &input, boost)?,
        Commands::Notify { user_id, post_id } => handle_notify(&settings, &user_id, &post_id).await?,
    }

    Ok(())
}

/// Handle the 'rank' command
async fn handle_rank(
    settings: &Settings,
    user_id: UserId,
    input: &Path,
    limit: usize,
    explain: bool,
) -> Result<()> {
    let store = RecommendStore::connect(settings)
        .await
        .context("Failed to set up the recommend store")?;

    // Start the weight fetch before reading candidates
    let recommender = store.new_recommender(user_id.clone());
    let mut posts = load_posts(input)?;

    let start = Instant::now();
    recommender.recommend(&mut posts).await;
    println!(
        "{} Ranked {} posts for user {} in {:?}",
        "✓".green(),
        posts.len(),
        user_id,
        start.elapsed()
    );

    print_ranking(&posts, limit, &settings.ranker_config().scoring, explain);
    Ok(())
}

/// Handle the 'score' command
fn handle_score(settings: &Settings, input: &Path, boost: bool) -> Result<()> {
    let config = settings.ranker_config().scoring;
    let mut posts = load_posts(input)?;

    if boost {
        BoostPipeline::from_config(&config).apply(&mut posts, &Blacklist::new());
    }
    scoring::sort_by_score(&mut posts, chrono::Utc::now().timestamp(), &config);

    print_ranking(&posts, posts.len(), &config, true);
    Ok(())
}

/// Handle the 'notify' command
async fn handle_notify(settings: &Settings, user_id: &str, post_id: &str) -> Result<()> {
    let store = RecommendStore::connect(settings)
        .await
        .context("Failed to set up the recommend store")?;

    store
        .notify_stickiness(user_id, post_id)
        .await
        .with_context(|| format!("Failed to notify stickiness for user {}", user_id))?;

    println!("{} Sent stickiness event {} -> {}", "✓".green(), user_id, post_id);
    Ok(())
}

fn load_posts(path: &Path) -> Result<Vec<Post>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Failed to parse posts in {}", path.display()))
}

/// Helper function to format and print ranked posts
fn print_ranking(posts: &[Post], limit: usize, config: &ScoringConfig, explain: bool) {
    let now = chrono::Utc::now().timestamp();
    print!("{}", "Ranked posts:\n".bold().blue());

    for (index, post) in posts.iter().take(limit).enumerate() {
        println!(
            "{}. {} - Score: {:.6}",
            (index + 1).to_string().green(),
            post.id,
            scoring::score(post, now, config)
        );
        if explain {
            let age_hours = (now - post.created_at) as f64 / 3600.0;
            println!(
                "   engagement {:.0}, weight {}, age {:.1}h{}",
                scoring::raw_engagement(post, config),
                post.weight.map_or("-".to_string(), |w| format!("{:.3}", w)),
                age_hours,
                if post.is_anonymous { ", anonymous" } else { "" }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_flags_keep_environment_settings() {
        let cli = parse(&["recsdk", "score", "--input", "posts.json"]);
        let base = Settings {
            redis_url: Some("redis://cache:6379".to_string()),
            ..Settings::default()
        };

        let settings = cli.connection.apply(base.clone());

        assert_eq!(settings, base);
    }

    #[test]
    fn test_flags_override_environment_settings() {
        let cli = parse(&[
            "recsdk",
            "rank",
            "--user-id",
            "u1",
            "--input",
            "posts.json",
            "--weight-timeout-ms",
            "250",
            "--recommender-url",
            "http://scores:9000",
        ]);

        let settings = cli.connection.apply(Settings::default());

        assert_eq!(settings.weight_timeout, Duration::from_millis(250));
        assert_eq!(settings.recommender_url, "http://scores:9000");
        assert_eq!(
            settings.recommender_http_timeout,
            recommender::config::DEFAULT_HTTP_TIMEOUT
        );
    }
}
