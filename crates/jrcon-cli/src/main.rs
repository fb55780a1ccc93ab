use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use rpassword::read_password;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tokio::net::TcpStream;

use jrcon_tokio::{CommandResponse, RconClient, RconClientConfig};

mod configs;
use crate::configs::{load_config_from_env, ServerConfig};

const HISTORY_FILE: &str = "history.txt";

#[derive(Parser)]
struct Args {
    /// Server address (eg: 127.0.0.1:7777)
    #[arg(short, long)]
    address: Option<String>,

    /// Server password
    #[arg(short, long)]
    password: Option<String>,

    /// The command to execute. Starts an interactive prompt when omitted
    #[arg(short, long)]
    command: Option<String>,

    /// Reconnect and re-authenticate when the server drops the connection
    #[arg(long, action = clap::ArgAction::SetTrue)]
    auto_reconnect: bool,

    /// Connect and read deadline in milliseconds
    #[arg(long, default_value_t = 5000)]
    timeout_ms: u64,

    /// Config name to load from RCON_CONFIG_PATH
    #[arg(long)]
    config_name: Option<String>,
}

fn render(response: &CommandResponse) -> String {
    serde_json::to_string_pretty(response).unwrap_or_else(|e| format!("<unprintable response: {}>", e))
}

async fn run_cli(mut client: RconClient<TcpStream>) -> rustyline::Result<()> {
    log::info!("Connected to {}", client.address());

    let mut rl = DefaultEditor::new()?;

    if rl.load_history(HISTORY_FILE).is_err() {
        log::info!("No previous history.");
    }

    loop {
        match rl.readline("> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);
                match client.write(line).await {
                    Ok(response) => println!("{}", render(&response)),
                    Err(e) => log::error!("{}", e),
                }
            }
            Err(ReadlineError::Interrupted) => {
                log::info!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                log::info!("CTRL-D");
                break;
            }
            Err(err) => {
                log::error!("Error: {:?}", err);
                break;
            }
        }
    }

    rl.save_history(HISTORY_FILE).unwrap_or_else(|e| log::error!("Failed to save history: {}", e));
    Ok(())
}

fn prompt(label: &str) -> Result<()> {
    print!("{}", label);
    std::io::stdout().flush().context("failed to flush stdout")
}

fn get_address(provided: Option<String>) -> Result<String> {
    if let Some(address) = provided {
        return Ok(address);
    }
    prompt("Enter address: ")?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input).context("failed to read address")?;
    Ok(input.trim().to_string())
}

fn get_password(provided: Option<String>) -> Result<String> {
    if let Some(password) = provided {
        return Ok(password);
    }
    prompt("Enter password: ")?;
    read_password().context("failed to read password")
}

fn server_config(args: &mut Args) -> Result<ServerConfig> {
    if let Some(name) = args.config_name.as_deref() {
        log::debug!("Config name provided: {}", name);
        if let Some(config) = load_config_from_env(Some(name))? {
            return Ok(config);
        }
    }

    Ok(ServerConfig {
        address: get_address(args.address.take())?,
        password: get_password(args.password.take())?,
        auto_reconnect: args.auto_reconnect,
    })
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let mut args = Args::parse();
    env_logger::Builder::from_env(Env::default().filter_or("RUST_LOG", "info")).init();

    let server = server_config(&mut args)?;
    let timeout = Duration::from_millis(args.timeout_ms);
    let config = RconClientConfig::new(server.address.as_str(), &server.password)
        .io_timeout(timeout)
        .connect_timeout(timeout)
        .auto_reconnect(server.auto_reconnect || args.auto_reconnect);

    let mut client = RconClient::open_with_config(config)
        .await
        .with_context(|| format!("failed to open session with {}", server.address))?;

    match args.command {
        Some(command) => {
            let response = client.write(&command).await?;
            println!("{}", render(&response));
            Ok(if response.successful { ExitCode::SUCCESS } else { ExitCode::from(2) })
        }
        None => {
            run_cli(client)
                .await
                .map_err(|e| anyhow::anyhow!("interactive prompt failed: {}", e))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
