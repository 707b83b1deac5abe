use grishex_config::{Loader, PROJECT_CONFIG_FILE};
use grishex_lsp::GrishexLanguageServer;
use std::process::ExitCode;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    grishex_config::logging::init_tracing();

    let config = match Loader::new().with_optional_file(PROJECT_CONFIG_FILE).build() {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            eprintln!("Error: invalid configuration: {}", err);
            return ExitCode::from(2);
        }
    };

    let (service, socket) = LspService::new(move |client| GrishexLanguageServer::new(client, config));
    Server::new(stdin(), stdout(), socket).serve(service).await;
    ExitCode::SUCCESS
}
