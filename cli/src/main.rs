use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use upconst::{generate_all, tree_to_json};
use upconst_compiler::error::ConstGenError;
use upconst_compiler::{compile_schema_to, Target};

#[derive(Parser)]
#[command(name = "upconst")]
#[command(about = "Generate Swift, Kotlin or TypeScript constants from an ERC725Y constants schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate `UpConstants.swift`
    GenSwift {
        /// Input `.json` constants schema
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (if omitted, prints to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate `UpConstants.kt`
    GenKotlin {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate `UpConstants.ts`
    GenTypescript {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate all three files into one directory
    GenAll {
        #[arg(short, long)]
        input: PathBuf,

        /// Directory the files are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Print the validated declaration tree as JSON
    Inspect {
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("upconst=info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn gen_one(input: &Path, output: Option<&Path>, target: Target) -> Result<(), ConstGenError> {
    let text = fs::read_to_string(input)?;
    let code = compile_schema_to(&text, target)?;
    match output {
        Some(out_path) => {
            fs::write(out_path, &code)?;
            info!("{} constants written to {}", target, out_path.display());
        }
        None => print!("{}", code),
    }
    Ok(())
}

fn main() -> Result<(), ConstGenError> {
    init_logging();
    let cli = Cli::parse();

    match &cli.command {
        Commands::GenSwift { input, output } => gen_one(input, output.as_deref(), Target::Swift),
        Commands::GenKotlin { input, output } => gen_one(input, output.as_deref(), Target::Kotlin),
        Commands::GenTypescript { input, output } => gen_one(input, output.as_deref(), Target::TypeScript),

        Commands::GenAll { input, out_dir } => {
            let text = fs::read_to_string(input)?;
            fs::create_dir_all(out_dir)?;

            let mut first_failure = None;
            for generated in generate_all(&text)? {
                match generated.output {
                    Ok(code) => {
                        let out_path = out_dir.join(generated.target.file_name());
                        fs::write(&out_path, &code)?;
                        info!("{} constants written to {}", generated.target, out_path.display());
                    }
                    Err(err) => {
                        error!("{} generation failed: {}", generated.target, err);
                        if first_failure.is_none() {
                            first_failure = Some(err);
                        }
                    }
                }
            }

            match first_failure {
                Some(err) => Err(err),
                None => Ok(()),
            }
        }

        Commands::Inspect { input } => {
            let text = fs::read_to_string(input)?;
            println!("{}", tree_to_json(&text)?);
            Ok(())
        }
    }
}
