mod app;
mod args;
mod commands;
mod render;
mod ui;

use anyhow::Result;
use clap::Parser;

use args::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    tapedeck_core::set_verbose(cli.verbose);
    let server = cli.server.as_deref();

    match cli.command {
        None | Some(Commands::Browse) => commands::browse::run(server).await,
        Some(Commands::List {
            page,
            departments,
            languages,
            filename,
        }) => commands::list::run(server, page, departments, languages, filename).await,
        Some(Commands::Upload {
            file,
            transcript,
            department,
            languages,
        }) => commands::upload::run(server, &file, transcript, department, languages).await,
        Some(Commands::Show { id, play, copy }) => {
            commands::show::run(server, &id, play, copy).await
        }
        Some(Commands::Delete { id, yes }) => commands::delete::run(server, &id, yes).await,
        Some(Commands::Patterns { id, patterns, copy }) => {
            commands::patterns::run(server, &id, patterns, copy).await
        }
        Some(Commands::Download { id, output }) => {
            commands::download::run(server, &id, output).await
        }
        Some(Commands::Config { server_url, show }) => commands::config::run(server_url, show),
    }
}
