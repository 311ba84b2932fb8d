//! autocommit - CLI entry point.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use autocommit::commit::{TranscriptStore, Workflow, WorkflowOptions, WorkflowOutcome};
use autocommit::config::{
    DEFAULT_ATTEMPTS, DEFAULT_ENDPOINT, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, DEFAULT_TEMPERATURE,
    DEFAULT_TOP_P, GenerationConfig,
};
use autocommit::git::{GitCli, check_git_installed, discover_repo};
use autocommit::llm::ChatClient;
use autocommit::ui::{TerminalPrompter, wrap_width};

/// Generate commit messages for the staged changes and commit the one you pick.
#[derive(Parser, Debug)]
#[command(name = "autocommit")]
#[command(about = "Generate commit messages for staged changes with an LLM")]
#[command(version)]
struct Cli {
    /// API key for the completion service
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model identifier
    #[arg(long, env = "AUTOCOMMIT_MODEL", default_value = DEFAULT_MODEL)]
    model: String,

    /// Chat-completions endpoint URL
    #[arg(long, env = "AUTOCOMMIT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Number of candidate messages per batch
    #[arg(short = 'n', long, env = "AUTOCOMMIT_ATTEMPTS", default_value_t = DEFAULT_ATTEMPTS)]
    attempts: usize,

    /// Sampling temperature
    #[arg(long, env = "AUTOCOMMIT_TEMPERATURE", default_value_t = DEFAULT_TEMPERATURE)]
    temperature: f32,

    /// Maximum tokens per response
    #[arg(long, env = "AUTOCOMMIT_MAX_TOKENS", default_value_t = DEFAULT_MAX_TOKENS)]
    max_tokens: u32,

    /// Nucleus sampling top-p
    #[arg(long, env = "AUTOCOMMIT_TOP_P", default_value_t = DEFAULT_TOP_P)]
    top_p: f32,

    /// Directory for saved transcripts (defaults to .git/autocommit/transcripts)
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Never ask to save the accepted message
    #[arg(long)]
    no_save: bool,

    /// Pick a message but don't save or commit; print it instead
    #[arg(long)]
    dry_run: bool,

    /// Verbose output for debugging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn generation_config(&self) -> GenerationConfig {
        let mut config = GenerationConfig::new(self.api_key.clone().unwrap_or_default());
        config.model = self.model.clone();
        config.endpoint = self.endpoint.clone();
        config.attempts = self.attempts;
        config.temperature = self.temperature;
        config.max_tokens = self.max_tokens;
        config.top_p = self.top_p;
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Step 1: Resolve configuration before touching the repo or network
    let config = cli.generation_config();
    config.validate().context("Invalid configuration")?;

    // Step 2: Check prerequisites
    check_git_installed()?;
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let repo = discover_repo(&cwd)
        .context("Not a git repository. Run autocommit from within a git repository.")?;

    // Step 3: Wire collaborators
    let git = GitCli::new(&repo.workdir);
    let client = ChatClient::from_config(&config).context("Failed to set up completion client")?;
    let mut prompter = TerminalPrompter;

    let transcripts = if cli.no_save {
        None
    } else {
        Some(TranscriptStore::new(
            cli.save_dir.clone().unwrap_or_else(|| repo.transcript_dir()),
        ))
    };

    let options = WorkflowOptions {
        transcripts,
        dry_run: cli.dry_run,
        wrap_width: wrap_width(),
        show_progress: true,
    };

    // Step 4: Generate, select, save, commit
    let outcome = Workflow::new(&git, &client, &mut prompter, options)
        .run(&config)
        .await?;

    match outcome {
        WorkflowOutcome::Committed { .. } => println!("✓ Committed successfully."),
        WorkflowOutcome::Accepted { message } => {
            println!("\n--- Dry Run Output ---\n");
            println!("{}", message);
        }
        WorkflowOutcome::NoChanges => eprintln!("Warning: No changes staged for commit."),
        WorkflowOutcome::OnlyNoise { raw_lines } => eprintln!(
            "Warning: Staged changes contain only filtered notebook output or image lines ({} lines); nothing to describe.",
            raw_lines
        ),
        WorkflowOutcome::Exited => println!("Exited without committing."),
    }

    Ok(())
}

/// Install the stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "autocommit=debug"
    } else {
        "autocommit=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
