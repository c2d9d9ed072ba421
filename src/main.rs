use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use pgp_blueprints::commands;
use pgp_blueprints::config::{MatchType, OnMultipleMatches, Operation, OperationConfig};
use pgp_blueprints::error::{exit_status, Result};
use pgp_blueprints::key::KeySource;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "pgp-blueprints")]
#[command(version)]
#[command(about = "Encrypt and decrypt files with an OpenPGP key", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt file(s) to the public component of the given private key
    Encrypt(OperationArgs),

    /// Decrypt a file with the given private key
    Decrypt(OperationArgs),
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("key")
        .required(true)
        .args(["pgp_private_key", "pgp_private_key_file"])
))]
struct OperationArgs {
    /// How --source-file-name is interpreted
    #[arg(long, value_enum, default_value_t = MatchType::ExactMatch)]
    source_file_name_match_type: MatchType,

    /// Subfolder of the working directory holding the source file(s)
    #[arg(long, default_value = "")]
    source_folder_name: String,

    /// Literal file name, or a regular expression in regex_match mode
    #[arg(long, allow_hyphen_values = true)]
    source_file_name: String,

    /// Name of the output file
    #[arg(long)]
    destination_file_name: Option<String>,

    /// Subfolder of the working directory to write into (created if missing)
    #[arg(long, default_value = "")]
    destination_folder_name: String,

    /// Armored private key material
    #[arg(long, allow_hyphen_values = true)]
    pgp_private_key: Option<String>,

    /// File containing the private key (armored or binary)
    #[arg(long)]
    pgp_private_key_file: Option<PathBuf>,

    /// Policy when a regex matches several files [default: first-only for
    /// decrypt, last-only for encrypt]
    #[arg(long, value_enum)]
    on_multiple_matches: Option<OnMultipleMatches>,
}

impl OperationArgs {
    fn into_config(self, operation: Operation) -> Result<OperationConfig> {
        let key = KeySource::from_args(self.pgp_private_key, self.pgp_private_key_file)?;
        let working_dir = std::env::current_dir()?;

        let config = OperationConfig::new(operation, working_dir, self.source_file_name, key)
            .with_match_type(self.source_file_name_match_type)
            .with_source_folder(&self.source_folder_name)
            .with_destination(&self.destination_folder_name, self.destination_file_name)
            .with_policy(
                self.on_multiple_matches
                    .unwrap_or_else(|| operation.default_policy()),
            );

        Ok(config)
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command;
    let outcome = std::panic::catch_unwind(move || run(command));
    if let Ok(Err(e)) = &outcome {
        eprintln!("Error: {}", e);
    }
    std::process::exit(exit_status(&outcome));
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: failed to initialize logging: {}", e);
    }
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Encrypt(args) => {
            let config = args.into_config(Operation::Encrypt)?;
            commands::encrypt(&config).map(|_| ())
        }
        Commands::Decrypt(args) => {
            let config = args.into_config(Operation::Decrypt)?;
            commands::decrypt(&config).map(|_| ())
        }
    }
}
