mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use todo_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("TODO_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(log_file)
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        clap_complete::generate(shell, &mut Cli::command(), "todo", &mut std::io::stdout());
        return Ok(());
    }

    let config = AppConfig::load();
    if let Err(e) = run(cli, &config).await {
        output::output_error(&format!("{:#}", e));
    }
    Ok(())
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<()> {
    let mut ctx = CliContext::load(config, cli.file, cli.user_id, cli.email).await?;

    match cli.command {
        Commands::List(list_cmd) => handlers::list::handle(&mut ctx, list_cmd.action).await,
        Commands::Task(task_cmd) => handlers::task::handle(&mut ctx, task_cmd.action).await,
        Commands::Reconcile => {
            output::output_list(ctx.controller.duplicates());
            Ok(())
        }
        Commands::Completions { .. } => Ok(()),
    }
}
