use crate::{banner, render::TrackerRenderer};
use anyhow::{anyhow, bail, Context};
use specify_core::assistant::{Assistant, ASSISTANTS};
use specify_core::git::GitCli;
use specify_core::materialize::Destination;
use specify_core::pipeline::{self, PipelineOptions};
use specify_core::release::GitHubReleases;
use specify_core::tracker::StepTracker;
use specify_core::SpecifyError;
use std::io::Write;

pub struct InitArgs {
    pub project_name: Option<String>,
    pub ai: Option<String>,
    pub ignore_agent_tools: bool,
    pub no_git: bool,
    pub here: bool,
}

pub fn run(args: InitArgs) -> anyhow::Result<()> {
    banner::print();

    if args.here && args.project_name.is_some() {
        bail!("cannot specify both a project name and --here");
    }
    if !args.here
        && args
            .project_name
            .as_deref()
            .map_or(true, |n| n.trim().is_empty())
    {
        bail!("must specify a project name or use --here");
    }

    let destination = if args.here {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let existing = std::fs::read_dir(&cwd)?.count();
        if existing > 0 {
            println!("Warning: current directory is not empty ({existing} items)");
            println!("Template files will be merged and may overwrite existing files");
            if !confirm("Do you want to continue?")? {
                println!("Operation cancelled");
                return Ok(());
            }
        }
        Destination::in_place(cwd)
    } else {
        let name = args.project_name.as_deref().expect("validated above");
        let path = std::env::current_dir()
            .context("cannot determine current directory")?
            .join(name);
        Destination::new_directory(path)
    };

    let assistant = match args.ai.as_deref() {
        Some(id) => id.parse::<Assistant>()?,
        None => prompt_assistant()?,
    };

    let options = PipelineOptions {
        assistant,
        destination,
        no_git: args.no_git,
        ignore_agent_tools: args.ignore_agent_tools,
    };

    if let Err(e) = pipeline::precheck(&options) {
        if matches!(e, SpecifyError::AgentToolMissing { .. }) {
            eprintln!("Tip: use --ignore-agent-tools to skip this check");
        }
        return Err(e.into());
    }

    println!("Specify Project Setup");
    if args.here {
        println!("Initializing in current directory:");
    } else {
        println!("Creating new project:");
    }
    println!("  {}", options.destination.path.display());
    println!();

    let mut tracker = StepTracker::new("Initialize Specify Project");
    let mut renderer = TrackerRenderer::new();
    let source = GitHubReleases::new();
    let result =
        pipeline::run_init_pipeline(&source, &GitCli, &options, &mut tracker, |t| {
            renderer.draw(t)
        });
    renderer.finish(&tracker);
    println!();

    if !result.success {
        return Err(anyhow!(result
            .failure_detail
            .unwrap_or_else(|| "pipeline failed".to_string())));
    }

    println!("Project ready.");
    print_next_steps(assistant, &options.destination, args.here);
    Ok(())
}

fn prompt_assistant() -> anyhow::Result<Assistant> {
    println!("Choose your AI assistant:");
    for (i, a) in ASSISTANTS.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, a.display_name(), a.id());
    }
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if std::io::stdin().read_line(&mut line)? == 0 {
            bail!("no AI assistant selected");
        }
        let line = line.trim();
        if let Ok(n) = line.parse::<usize>() {
            if (1..=ASSISTANTS.len()).contains(&n) {
                return Ok(ASSISTANTS[n - 1]);
            }
        }
        if let Ok(a) = line.parse::<Assistant>() {
            return Ok(a);
        }
        println!("Enter 1-{} or one of: claude, gemini, copilot", ASSISTANTS.len());
    }
}

fn confirm(question: &str) -> anyhow::Result<bool> {
    print!("{question} [y/N] ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    if std::io::stdin().read_line(&mut line)? == 0 {
        return Ok(false);
    }
    let answer = line.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn print_next_steps(assistant: Assistant, destination: &Destination, here: bool) {
    println!();
    println!("Next steps:");
    let mut n = 1;
    if here {
        println!("  {n}. You're already in the project directory!");
    } else {
        let dir = destination
            .path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| destination.path.display().to_string());
        println!("  {n}. cd {dir}");
    }
    n += 1;
    match assistant {
        Assistant::Claude => {
            println!("  {n}. Open in VS Code and start using / commands with Claude Code");
            println!("     - /specify for specifications");
            println!("     - /plan for implementation plans");
            println!("     - /tasks for task generation");
        }
        Assistant::Gemini => {
            println!("  {n}. Use Gemini CLI / commands");
            println!("     - gemini /specify for specifications");
            println!("     - gemini /plan for plans");
            println!("     - See GEMINI.md for more");
        }
        Assistant::Copilot => {
            println!("  {n}. Open in VS Code and use /specify, /plan, /tasks with GitHub Copilot");
        }
    }
    n += 1;
    println!("  {n}. Update CONSTITUTION.md with your project's principles");
}
