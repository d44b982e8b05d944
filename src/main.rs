use clap::Parser;
use sentinel::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Check { ref path, no_fix } => {
            sentinel::cli::commands::check::execute(&cli, path, no_fix)
        }
        Commands::Add { ref key, ref value } => {
            sentinel::cli::commands::add::execute(&cli, key.as_deref(), value.as_deref())
        }
        Commands::List => sentinel::cli::commands::list::execute(&cli),
        Commands::Load { ref key } => sentinel::cli::commands::load::execute(&cli, key),
        Commands::Delete { ref key, force } => {
            sentinel::cli::commands::delete::execute(&cli, key, force)
        }
        Commands::Rotate { ref key, ref value } => {
            sentinel::cli::commands::rotate::execute(&cli, key, value.as_deref())
        }
        Commands::ChangePassword => sentinel::cli::commands::change_password::execute(&cli),
        #[cfg(feature = "ai-agent")]
        Commands::Agent {
            ref endpoint,
            ref model,
            ref api_key_name,
        } => sentinel::cli::commands::agent_cmd::execute(&cli, endpoint, model, api_key_name),
        Commands::Completions { ref shell } => {
            sentinel::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        sentinel::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
