use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use jobdesk::applications::{
    board_router, InMemoryJobStore, InMemoryProfiles, Job, JobBoardService, JobId, UserId,
};
use jobdesk::config::AppConfig;
use jobdesk::error::AppError;
use jobdesk::matching::{self, MatchOutcome};
use jobdesk::notifications::{notification_router, InMemoryNotificationStore};
use jobdesk::telemetry;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "jobdesk",
    about = "Run the job board matching service from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score an ad-hoc applicant against an ad-hoc posting
    Score(ScoreArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Job title
    #[arg(long)]
    title: String,
    /// Requirement line (repeatable)
    #[arg(long = "requirement")]
    requirements: Vec<String>,
    /// Tag, included verbatim in the keyword set (repeatable)
    #[arg(long = "tag")]
    tags: Vec<String>,
    /// Applicant skill (repeatable)
    #[arg(long = "skill")]
    skills: Vec<String>,
    /// Free-text resume content
    #[arg(long, default_value = "")]
    resume: String,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Score(args) => {
            run_score(&args);
            Ok(())
        }
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let jobs = Arc::new(InMemoryJobStore::default());
    let notifications = Arc::new(InMemoryNotificationStore::default());
    let profiles = Arc::new(InMemoryProfiles::default());
    let service = Arc::new(JobBoardService::new(
        jobs,
        notifications.clone(),
        profiles,
    ));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(board_router(service))
        .merge(notification_router(
            notifications,
            config.board.notifications_page_limit,
        ))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn score_posting(args: &ScoreArgs) -> (Job, MatchOutcome) {
    let job = Job {
        id: JobId("job-adhoc".to_string()),
        title: args.title.clone(),
        company: String::new(),
        location: None,
        description: String::new(),
        requirements: args.requirements.clone(),
        tags: args.tags.clone(),
        posted_by: UserId("cli".to_string()),
        posted_at: Utc::now(),
        applications: Vec::new(),
    };

    let outcome = matching::score_application(&job, &args.skills, &args.resume);
    (job, outcome)
}

fn run_score(args: &ScoreArgs) {
    let (job, outcome) = score_posting(args);
    let keywords = matching::job_keywords(&job);

    println!("Match score demo");
    println!("Posting: {}", job.title);

    if keywords.is_empty() {
        println!("Job keywords: none");
    } else {
        println!("Job keywords");
        for keyword in &keywords {
            println!("- {keyword}");
        }
    }

    if outcome.matched_keywords.is_empty() {
        println!("\nMatched keywords: none");
    } else {
        println!("\nMatched keywords");
        for keyword in &outcome.matched_keywords {
            println!("- {keyword}");
        }
    }

    println!("\nScore: {}%", outcome.score);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
