use std::{fs, path::PathBuf, process::ExitCode};
use clap::{Parser, Subcommand};
use tracing::error;
use tracing_subscriber::EnvFilter;
use datkit::{infer_file_row_width, json, DatManager, Result, Validity};

#[derive(Parser)]
#[command(name = "datkit", version, about = "Decode and encode schema-described dat tables")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Decode a dat file to JSON
    Parse {
        file: PathBuf,
        /// Schema document (JSON)
        #[arg(short, long)]
        schema: PathBuf,
        /// Schema revision: 1, 2, or 3 for any
        #[arg(long, default_value_t = Validity::Any)]
        validity: Validity,
        /// Write JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode JSON records into a dat file
    Write {
        input: PathBuf,
        file: PathBuf,
        #[arg(short, long)]
        schema: PathBuf,
        #[arg(long, default_value_t = Validity::Any)]
        validity: Validity,
        /// Table name to use instead of the output file's name
        #[arg(short, long)]
        table: Option<String>,
    },
    /// Report the row width the heap marker implies, ignoring any schema
    Infer { file: PathBuf },
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse {
            file,
            schema,
            validity,
            output,
        } => {
            let mgr = DatManager::open(&schema)?;
            let records = mgr.parse_file(&file, validity)?;
            let text = json::to_string_pretty(&records)?;
            match output {
                Some(out) => fs::write(out, text)?,
                None => println!("{}", text),
            }
        }
        Command::Write {
            input,
            file,
            schema,
            validity,
            table,
        } => {
            let mgr = DatManager::open(&schema)?;
            let table_schema = match &table {
                Some(name) => mgr.registry().resolve(name, validity)?,
                None => mgr.registry().resolve_path(&file, validity)?,
            };
            let records = json::from_str(&fs::read_to_string(&input)?, table_schema)?;
            mgr.write_file(&records, &file, validity, table.as_deref())?;
        }
        Command::Infer { file } => match infer_file_row_width(&file)? {
            Some(width) => println!("{}", width),
            None => println!("no consistent row width"),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(target: "datkit", "{}", e);
            ExitCode::FAILURE
        }
    }
}
