use clap::Parser;
use pethotel::cli::{
    ask, build_api, chat, handle_completions, handle_config_init, health, load_config,
    open_storage, questions, stats, ChatArgs, Cli, Commands, ConfigCommands,
};
use pethotel::logging::init_tracing;
use std::io;

/// Print command output, passing errors through.
fn print_output(
    result: Result<String, Box<dyn std::error::Error>>,
) -> Result<(), Box<dyn std::error::Error>> {
    result.map(|output| println!("{}", output))
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let command = cli.command.unwrap_or(Commands::Chat(ChatArgs::default()));

    // These two need no configuration
    if let Commands::Config(ConfigCommands::Init(args)) = &command {
        return handle_config_init(args);
    }
    if let Commands::Completions(args) = &command {
        handle_completions(args, &mut io::stdout());
        return Ok(());
    }

    let config = load_config(&cli.global)?;
    init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    let api = build_api(&config);

    match command {
        Commands::Chat(args) => {
            let storage = open_storage(&config);
            chat::run_chat(&args, config, api, storage).await
        }
        Commands::Ask(args) => {
            let storage = open_storage(&config);
            ask::handle_ask(&args, &config, api, storage, io::stdout()).await
        }
        Commands::Health(args) => {
            print_output(health::handle_health(&args, api, &config.health_check).await)
        }
        Commands::Stats(args) => {
            let storage = open_storage(&config);
            print_output(stats::handle_stats(&args, storage, &config.storage.stats_key))
        }
        Commands::Questions(args) => {
            print_output(questions::handle_questions(&args, api.as_ref()).await)
        }
        Commands::Config(_) | Commands::Completions(_) => Ok(()),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
