//! Garnet CLI: inspect method scopes built by the IR layer.

use clap::{Parser as ClapParser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn red(s: &str) -> String {
    format!("\x1b[31m{}\x1b[0m", s)
}
fn status_label(label: &str) -> String {
    format!("\x1b[1;32m{:>12}\x1b[0m", label)
}

#[derive(ClapParser)]
#[command(name = "garnet", version, about = "Garnet IR method-scope inspector")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the method bodies described in a JSON file and dump their scopes
    Dump {
        /// Path to the unit description (.json)
        #[arg()]
        file: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Config file (default: nearest garnet.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Do not back-link static scopes
        #[arg(long)]
        ir_gen_only: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GARNET_LOG")
                .unwrap_or_else(|_| EnvFilter::new("garnet=info,garnet_cli=info,garnet_ir=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Dump {
            file,
            output,
            format,
            config,
            ir_gen_only,
        } => cmd_dump(&file, output, format, config, ir_gen_only),
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", red("error:"), msg);
    std::process::exit(1);
}

fn cmd_dump(
    file: &Path,
    output: Option<PathBuf>,
    format: Format,
    config: Option<PathBuf>,
    ir_gen_only: bool,
) {
    let source = std::fs::read_to_string(file)
        .unwrap_or_else(|e| fail(format!("cannot read '{}': {}", file.display(), e)));

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut options = garnet_cli::load_options(config.as_deref(), &cwd).unwrap_or_else(|e| fail(e));
    if ir_gen_only {
        options.ir_gen_only = true;
    }

    eprintln!("{} {}", status_label("Building"), file.display());
    let report = garnet_cli::dump(&source, options).unwrap_or_else(|e| fail(e));

    let rendered = match format {
        Format::Text => garnet_cli::render_text(&report),
        Format::Json => serde_json::to_string_pretty(&report).unwrap_or_else(|e| fail(e)),
    };

    match output {
        Some(out_path) => {
            eprintln!("{} scopes to {}", status_label("Writing"), out_path.display());
            std::fs::write(&out_path, &rendered).unwrap_or_else(|e| {
                fail(format!("writing to '{}': {}", out_path.display(), e))
            });
        }
        None => print!("{}", rendered),
    }
}
