mod config;
mod render;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::bail;
use anyhow::Context;
use anyhow::Result;
use bloom_core::actions::UserAction;
use bloom_core::config::BloomConfig;
use bloom_core::export::write_bundle;
use bloom_core::export::write_file;
use bloom_core::export::write_portfolio;
use bloom_core::export::ExportFormat;
use bloom_core::fallback::FallbackResponseEngine;
use bloom_core::state::WorkflowStage;
use bloom_core::state::WorkflowState;
use bloom_exec::AnalysisClient;
use bloom_exec::Assistant;
use bloom_exec::AuthObserver;
use bloom_exec::HttpAnalysisClient;
use bloom_exec::PortfolioBuilder;
use bloom_exec::Registration;
use bloom_exec::ReplySource;
use bloom_exec::SimulatedAnalysisClient;
use bloom_exec::WorkflowDriver;
use clap::Parser;
use clap::Subcommand;
use tracing::info;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// bloom - validate a startup idea from the terminal
#[derive(Parser, Debug)]
#[command(name = "bloom")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Refine, analyze and score startup ideas", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/bloom/config.toml)
    #[arg(global = true, long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Use the offline demo backend instead of the analysis service
    #[arg(global = true, long = "simulate")]
    simulate: bool,

    /// Enable debug logging
    #[arg(global = true, long = "verbose", short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the industry catalogue
    Industries,

    /// Refine an idea, pick a candidate and print its full analysis
    Analyze {
        /// Industry id or name (see `bloom industries`)
        #[arg(long = "industry", short = 'i')]
        industry: String,

        /// Candidate to analyze, 1-based
        #[arg(long = "pick", default_value = "1")]
        pick: usize,

        /// Write the analysis to a JSON or YAML file
        #[arg(long = "export", value_name = "PATH")]
        export: Option<PathBuf>,

        /// Write the server-rendered HTML summary to a file
        #[arg(long = "summary", value_name = "PATH")]
        summary: Option<PathBuf>,

        /// Idea description
        #[arg(value_name = "IDEA", required = true)]
        idea: Vec<String>,
    },

    /// Build a full portfolio in one round trip
    Portfolio {
        /// Write the portfolio record to a JSON or YAML file
        #[arg(long = "export", value_name = "PATH")]
        export: Option<PathBuf>,

        /// Idea description
        #[arg(value_name = "IDEA", required = true)]
        idea: Vec<String>,
    },

    /// Ask the assistant; answers offline when the service is unreachable
    Chat {
        /// Message; omit to see the greeting and suggested questions
        #[arg(value_name = "MESSAGE")]
        message: Vec<String>,
    },

    /// Answer from the offline help rules only
    Ask {
        #[arg(value_name = "MESSAGE", required = true)]
        message: Vec<String>,
    },

    /// Sign in and print an access token
    Login {
        #[arg(long = "email")]
        email: String,

        #[arg(long = "password")]
        password: String,
    },

    /// Create an account and print its access token
    Register {
        #[arg(long = "email")]
        email: String,

        #[arg(long = "password")]
        password: String,

        /// Interest used for partner matching; repeatable
        #[arg(long = "interest", value_name = "TOPIC")]
        interests: Vec<String>,

        /// Skill you bring; repeatable
        #[arg(long = "skill", value_name = "SKILL")]
        skills: Vec<String>,

        #[arg(long = "location")]
        location: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = run(cli).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    if let Commands::Industries = cli.command {
        print!("{}", render::industries());
        return Ok(());
    }
    if let Commands::Ask { message } = &cli.command {
        println!("{}", FallbackResponseEngine.respond(&message.join(" ")));
        return Ok(());
    }

    let config = config::load(cli.config.as_deref())?;
    let client = build_client(&config, cli.simulate)?;

    match cli.command {
        Commands::Industries | Commands::Ask { .. } => Ok(()),
        Commands::Analyze {
            industry,
            pick,
            export,
            summary,
            idea,
        } => {
            run_analyze(
                client,
                &config,
                &industry,
                pick,
                &idea.join(" "),
                export.as_deref(),
                summary.as_deref(),
            )
            .await
        }
        Commands::Portfolio { export, idea } => {
            run_portfolio(client, &config, &idea.join(" "), export.as_deref()).await
        }
        Commands::Chat { message } => run_chat(client, &message.join(" ")).await,
        Commands::Login { email, password } => {
            let session = client
                .login(&email, &password)
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            print_token(session.token());
            Ok(())
        }
        Commands::Register {
            email,
            password,
            interests,
            skills,
            location,
        } => {
            let profile = Registration {
                interests,
                skills,
                location: location.filter(|value| !value.trim().is_empty()),
            };
            let session = client
                .register(&email, &password, &profile)
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            print_token(session.token());
            Ok(())
        }
    }
}

fn print_token(token: &str) {
    println!("{token}");
    eprintln!("store it under [auth] token in your config or export BLOOM_TOKEN");
}

struct SessionExpiredNotice;

impl AuthObserver for SessionExpiredNotice {
    fn session_expired(&self) {
        warn!("session expired; run `bloom login` and update your token");
    }
}

fn build_client(config: &BloomConfig, simulate: bool) -> Result<Arc<dyn AnalysisClient>> {
    if simulate {
        info!("using the offline demo backend");
        return Ok(Arc::new(SimulatedAnalysisClient::new()));
    }
    let session = config.session();
    let client = match &config.api.user_agent {
        Some(agent) => HttpAnalysisClient::with_user_agent(&config.api.base_url, session, agent),
        None => HttpAnalysisClient::new(&config.api.base_url, session),
    }
    .context("failed to build HTTP client")?
    .with_observer(Arc::new(SessionExpiredNotice));
    info!(base_url = client.base_url(), "using analysis service");
    Ok(Arc::new(client))
}

async fn run_analyze(
    client: Arc<dyn AnalysisClient>,
    config: &BloomConfig,
    industry: &str,
    pick: usize,
    text: &str,
    export: Option<&Path>,
    summary: Option<&Path>,
) -> Result<()> {
    let industry = render::parse_industry(industry)
        .ok_or_else(|| anyhow!(render::industry_hint(industry)))?;
    if text.trim().is_empty() {
        bail!("describe your idea before generating");
    }

    let driver = WorkflowDriver::new(Arc::clone(&client));
    let mut state = WorkflowState::new();
    for action in [
        UserAction::SetIdeaText(text.to_string()),
        UserAction::SetIndustry(Some(industry)),
        UserAction::SubmitIdea,
    ] {
        state = driver.dispatch(&state, action.into()).await;
    }
    if let Some(message) = state.error_message() {
        bail!("{message}");
    }
    if state.stage != WorkflowStage::Select {
        bail!("idea was not submitted");
    }
    print!("{}", render::candidates(&state.ideas, state.highlighted));
    println!();

    if pick == 0 || pick > state.ideas.len() {
        bail!("--pick must be between 1 and {}", state.ideas.len());
    }
    let state = driver
        .dispatch(&state, UserAction::Analyze { index: pick - 1 }.into())
        .await;
    if let Some(message) = state.error_message() {
        bail!("{message}");
    }
    let (Some(idea), Some(bundle)) = (&state.selected, &state.bundle) else {
        bail!("analysis did not complete");
    };
    print!("{}", render::insights(idea, bundle));

    if let Some(path) = export {
        let path = config::resolve_export_path(config, path);
        let format = ExportFormat::from_path(&path, config.export.format);
        let written = write_bundle(&path, format, idea, bundle)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!("analysis written to {}", written.display());
    }
    if let Some(path) = summary {
        let html = client
            .render_summary(idea, bundle)
            .await
            .map_err(|err| anyhow!(err.user_message()))?;
        let path = config::resolve_export_path(config, path);
        let written = write_file(&path, html.as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
        println!("summary written to {}", written.display());
    }
    Ok(())
}

async fn run_portfolio(
    client: Arc<dyn AnalysisClient>,
    config: &BloomConfig,
    text: &str,
    export: Option<&Path>,
) -> Result<()> {
    let record = PortfolioBuilder::new(client)
        .build_checked(text)
        .await
        .map_err(|err| match err {
            bloom_exec::PortfolioError::Invalid(invalid) => anyhow!(invalid),
            bloom_exec::PortfolioError::Remote(remote) => anyhow!(remote.user_message()),
        })?;
    print!("{}", render::portfolio(&record));

    if let Some(path) = export {
        let path = config::resolve_export_path(config, path);
        let format = ExportFormat::from_path(&path, config.export.format);
        let written = write_portfolio(&path, format, &record)
            .with_context(|| format!("failed to export {}", path.display()))?;
        println!("portfolio written to {}", written.display());
    }
    Ok(())
}

async fn run_chat(client: Arc<dyn AnalysisClient>, text: &str) -> Result<()> {
    let assistant = Assistant::new(client);
    let Some(reply) = assistant.reply(text).await else {
        println!("{}\n", assistant.greeting());
        for action in assistant.quick_actions() {
            println!("  {:<16} bloom chat \"{}\"", action.label, action.prompt);
        }
        return Ok(());
    };
    if reply.source == ReplySource::Fallback {
        info!("answered from offline help");
    }
    println!("{}", reply.text);
    Ok(())
}
