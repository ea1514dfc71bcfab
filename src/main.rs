use anyhow::Result;
use clap::Parser;
use rivedi::{
    app,
    cli::{
        handle_add, handle_delete, handle_demo, handle_list, handle_notes, handle_open,
        handle_show, Cli, CliCommand,
    },
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(CliCommand::Version) => {
            println!("Rivedi {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Some(CliCommand::List) => {
            handle_list(cli.server).await?;
            return Ok(());
        }
        Some(CliCommand::Show { id, copy }) => {
            handle_show(cli.server, id, copy).await?;
            return Ok(());
        }
        Some(CliCommand::Add { title, url, notes }) => {
            handle_add(cli.server, title, url, notes).await?;
            return Ok(());
        }
        Some(CliCommand::Delete { id, yes }) => {
            handle_delete(cli.server, id, yes).await?;
            return Ok(());
        }
        Some(CliCommand::Notes { id, set, edit }) => {
            handle_notes(cli.server, id, set, edit).await?;
            return Ok(());
        }
        Some(CliCommand::Open { id }) => {
            handle_open(cli.server, id).await?;
            return Ok(());
        }
        Some(CliCommand::Demo { port, no_seed }) => {
            handle_demo(port, no_seed).await?;
            return Ok(());
        }
        None => {}
    }

    app::run(cli.server).await
}
