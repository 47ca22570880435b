mod banner;
mod cmd;
mod render;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "specify",
    about = "Spec-Driven Development Toolkit — scaffold a project from the latest spec-kit template",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new Specify project from the latest template
    Init {
        /// Name for your new project directory (omit with --here)
        project_name: Option<String>,

        /// AI assistant to use: claude | gemini | copilot
        #[arg(long)]
        ai: Option<String>,

        /// Skip checks for AI agent tools like Claude Code
        #[arg(long)]
        ignore_agent_tools: bool,

        /// Skip git repository initialization
        #[arg(long)]
        no_git: bool,

        /// Initialize in the current directory instead of creating a new one
        #[arg(long)]
        here: bool,
    },

    /// Check that all required tools are installed
    Check,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Init {
            project_name,
            ai,
            ignore_agent_tools,
            no_git,
            here,
        } => cmd::init::run(cmd::init::InitArgs {
            project_name,
            ai,
            ignore_agent_tools,
            no_git,
            here,
        }),
        Commands::Check => cmd::check::run(),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
