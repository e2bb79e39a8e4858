use anyhow::{Result, bail};
use bioauth_biometric::{
    AuthState, AuthViewModel, AuthenticatorConfig, CapabilityProber, DEFAULT_REASON,
    SystemPlatform,
};
use clap::{Parser, Subcommand};
use log::info;
use owo_colors::OwoColorize;

#[derive(Parser)]
#[command(name = "bioauth-demo")]
#[command(about = "Check for and run a biometric authentication", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report whether biometrics are usable and which kind
    Status,
    /// Run a single authentication challenge
    Authenticate {
        /// Justification shown by the system prompt
        #[arg(long, default_value = DEFAULT_REASON)]
        reason: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => status().await,
        Commands::Authenticate { reason } => authenticate(reason).await,
    }
}

async fn status() -> Result<()> {
    match CapabilityProber::new(SystemPlatform).detect_modality().await {
        Some(modality) => println!("{} {}", "Supported:".green().bold(), modality),
        None => println!("{}", "Biometrics not available on this machine.".yellow()),
    }
    Ok(())
}

fn print_state(state: AuthState) {
    let authenticated = match state.authenticated {
        None => "unset".dimmed().to_string(),
        Some(true) => "yes".green().to_string(),
        Some(false) => "no".red().to_string(),
    };
    println!("supported: {}  authenticated: {authenticated}", state.supported);
}

async fn authenticate(reason: String) -> Result<()> {
    let config = AuthenticatorConfig::new().reason(reason);
    let model = AuthViewModel::load(SystemPlatform, config).await;
    print_state(model.state());

    let Some(outcome) = model.trigger().await else {
        bail!("authenticate is disabled: no biometric modality available");
    };
    print_state(model.state());

    match outcome {
        Ok(modality) => {
            println!("{} via {modality}", "Authenticated".green().bold());
            Ok(())
        }
        Err(err) => {
            if let Some(diagnostic) = err.diagnostic() {
                info!("platform said: {diagnostic}");
            }
            bail!(err)
        }
    }
}
