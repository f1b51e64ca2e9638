use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use colored::Colorize;
use secretbundle::{EnvSource, Role, SecretsBundle, Source, TomlSource, ViolationKind};
use std::path::PathBuf;

/// Main CLI structure for the secretbundle application.
#[derive(Parser)]
#[command(name = "secretbundle")]
#[command(about = "Role-scoped secrets validation for node deployments", long_about = None)]
struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that all secrets required for a role are present
    Check {
        /// Deployment role to validate against
        #[arg(short, long, env = "SECRETS_ROLE")]
        role: String,
        /// TOML secrets file(s), merged in order; later files override
        #[arg(short, long)]
        file: Vec<PathBuf>,
        /// Environment variable prefix applied last, overriding files
        #[arg(long, default_value = "SECRETS_")]
        env_prefix: String,
    },
    /// Print the validated bundle as JSON with every value redacted
    Dump {
        /// Deployment role to validate against
        #[arg(short, long, env = "SECRETS_ROLE")]
        role: String,
        /// TOML secrets file(s), merged in order; later files override
        #[arg(short, long)]
        file: Vec<PathBuf>,
        /// Environment variable prefix applied last, overriding files
        #[arg(long, default_value = "SECRETS_")]
        env_prefix: String,
    },
}

/// Builds the source stack: files in the order given, environment last so
/// operators can override any file value.
fn gather_sources(files: &[PathBuf], env_prefix: &str) -> secretbundle::Result<Vec<Box<dyn Source>>> {
    let mut sources: Vec<Box<dyn Source>> = Vec::new();
    for path in files {
        sources.push(Box::new(TomlSource::from_path(path)?));
    }
    sources.push(Box::new(EnvSource::new(env_prefix)));
    Ok(sources)
}

fn check(role: Role, sources: &[Box<dyn Source>]) -> secretbundle::Result<()> {
    let bundle = secretbundle::merge(sources)?;
    println!("Checking secrets for role {}...\n", role.as_str().bold());

    for path in role.required_paths() {
        if bundle.get(path)?.is_some() {
            println!("{} {}", "✓".green(), path);
        } else {
            println!("{} {} {}", "✗".red(), path, "(required)".red());
        }
    }
    print_da_status(&bundle, role);

    match secretbundle::validate(bundle, role) {
        Ok(_) => {
            println!("\n{} All secrets required for {} are present", "✓".green(), role);
            Ok(())
        }
        Err(report) => {
            for violation in &report.violations {
                if violation.reason != ViolationKind::MissingRequiredField {
                    println!(
                        "{} {} {}",
                        "✗".red(),
                        violation.path,
                        format!("({})", violation.reason).red()
                    );
                }
            }
            println!(
                "\nSummary: {} problem(s) found",
                report.violations.len().to_string().red()
            );
            std::process::exit(1);
        }
    }
}

fn print_da_status(bundle: &SecretsBundle, role: Role) {
    if role.requires_data_availability() && !bundle.da.is_empty() {
        println!("{} da (backend credentials supplied)", "○".blue());
    } else if role.requires_data_availability() {
        println!("{} da {}", "✗".red(), "(required)".red());
    }
}

fn dump(role: Role, sources: &[Box<dyn Source>]) -> secretbundle::Result<()> {
    let secrets = secretbundle::load(sources, role)?;
    println!("{}", serde_json::to_string_pretty(&secrets)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            role,
            file,
            env_prefix,
        } => {
            let role: Role = role.parse().wrap_err("Invalid role")?;
            let sources = gather_sources(&file, &env_prefix).wrap_err("Failed to load sources")?;
            check(role, &sources).wrap_err("Failed to check secrets")?;
            Ok(())
        }
        Commands::Dump {
            role,
            file,
            env_prefix,
        } => {
            let role: Role = role.parse().wrap_err("Invalid role")?;
            let sources = gather_sources(&file, &env_prefix).wrap_err("Failed to load sources")?;
            dump(role, &sources).wrap_err("Failed to dump secrets")?;
            Ok(())
        }
    }
}
