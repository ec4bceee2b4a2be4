use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Context, Result};

use pramanik_client::{
    adapters::{Adapters, TracingNotifier},
    config::Config,
    domain::{DocumentType, StagedFile, ports::DocumentBackend},
    form::RequestForm,
    telemetry,
};

#[derive(Parser)]
#[command(name = "pramanik")]
#[command(about = "Request documents from the Pramanik backend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the document types that can be requested
    Types,

    /// List documents already issued to the configured receiver
    Issued,

    /// Fill in and submit a document request
    Request(RequestArgs),
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// Document type, e.g. "Migration Certificate"
    #[arg(short = 't', long = "type")]
    doc_type: String,

    /// Board, only for Migration Certificates (CBSE, MP, Chhattisgarh, Other)
    #[arg(short, long)]
    board: Option<String>,

    /// Additional information sent with the request
    #[arg(short, long, default_value = "")]
    note: String,

    /// Supporting document for an unresolved field, as "<field>=<path>"
    #[arg(short, long = "file", value_parser = parse_file_arg)]
    files: Vec<(String, PathBuf)>,

    /// Print the filled form without submitting
    #[arg(long)]
    dry_run: bool,
}

fn parse_file_arg(raw: &str) -> Result<(String, PathBuf), String> {
    let (field, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected <field>=<path>, got {raw:?}"))?;
    if field.is_empty() || path.is_empty() {
        return Err(format!("expected <field>=<path>, got {raw:?}"));
    }
    Ok((field.to_string(), PathBuf::from(path)))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let cli = Cli::parse();
    let config = Config::load()?;
    tracing::debug!("Loaded configuration: {:?}", config);

    match cli.command {
        Commands::Types => {
            for doc_type in DocumentType::ALL {
                println!("{doc_type}");
                println!("  Issuing authority: {}", doc_type.issuing_authority());
                println!("  Requires: {}", doc_type.required_fields().join(", "));
            }
            Ok(())
        }
        Commands::Issued => {
            let adapters = Adapters::from_config(&config)?;
            let documents = adapters
                .backend
                .issued_documents(&config.backend.receiver)
                .await
                .wrap_err("Failed to fetch issued documents")?;
            for document in documents {
                println!("{}\t{}", document.message, document.cid);
            }
            Ok(())
        }
        Commands::Request(args) => request(config, args).await,
    }
}

async fn request(config: Config, args: RequestArgs) -> Result<()> {
    let adapters = Adapters::from_config(&config)?;
    let mut form = RequestForm::new(
        adapters.wallet,
        adapters.backend,
        adapters.pinning,
        TracingNotifier,
        config.backend.receiver.clone(),
    );
    form.mount().await;

    form.select_document_type_by_name(&args.doc_type)?;
    if let Some(board) = &args.board {
        form.select_board_by_name(board)?;
    }
    form.set_additional_info(args.note);

    for (field, path) in args.files {
        let file = StagedFile::from_path(&path)
            .await
            .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
        form.stage_file(&field, file)?;
    }

    println!("{}", form.view());
    if args.dry_run {
        return Ok(());
    }

    let reply = form
        .submit()
        .await
        .wrap_err("Document request was not submitted")?;
    println!("{}", serde_json::to_string_pretty(&reply)?);
    Ok(())
}
