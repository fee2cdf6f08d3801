use clap::{Args, Parser, Subcommand};
use engine::{CategoryCatalog, Extractor, ParsedTransaction};

mod api;

#[derive(Parser, Debug)]
#[command(name = "extrato_cli")]
#[command(about = "Try the message parser offline or relay messages to a running server")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a message locally with the built-in rules and catalog.
    Parse(MessageArgs),
    /// Send a message to the server's direct channel.
    ///
    /// Messages without a digit are not relayed, as they cannot carry an amount.
    Send(SendArgs),
}

#[derive(Args, Debug)]
struct MessageArgs {
    /// The message, e.g. `gastei 50 no mercado`.
    #[arg(required = true, num_args = 1..)]
    text: Vec<String>,
}

#[derive(Args, Debug)]
struct SendArgs {
    /// Server base URL (also read from `EXTRATO_SERVER_URL`).
    #[arg(long, env = "EXTRATO_SERVER_URL", default_value = "http://127.0.0.1:3000")]
    server_url: String,

    #[command(flatten)]
    message: MessageArgs,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Engine(#[from] engine::EngineError),
    #[error(transparent)]
    Api(#[from] api::ApiError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("http client error: {0}")]
    Client(#[from] reqwest::Error),
}

fn parse(text: &str) -> Result<ParsedTransaction, CliError> {
    let extractor = Extractor::builder().build()?;
    Ok(extractor.extract(text, &CategoryCatalog::default_seed()))
}

/// Only messages mentioning a number are worth recording.
fn worth_relaying(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
}

/// Line sent back to the user once the server stored their message.
fn confirmation(description: &str, amount: &str) -> String {
    format!("✅ Anotado! {description}: R$ {amount}")
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Parse(args) => {
            let parsed = parse(&args.text.join(" "))?;
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Send(args) => {
            let text = args.message.text.join(" ");
            if !worth_relaying(&text) {
                eprintln!("Nada enviado: a mensagem não tem valor.");
                std::process::exit(2);
            }

            let client = reqwest::Client::builder().build()?;
            let api = api::ApiClient::new(client, args.server_url);
            match api.quick_add(&text).await {
                Ok(created) => println!("{}", confirmation(&created.description, &created.amount)),
                Err(err) => {
                    eprintln!("❌ Erro ao salvar: {err}");
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
