use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use blendx_composer::{Composer, LogisticModel};
use blendx_core::{EmbeddingStore, IngredientCatalog};
use blendx_rules::RuleSet;

/// Compose a validated beverage formulation
#[derive(Parser, Debug)]
#[command(name = "blendx")]
#[command(about = "Constraint-guided greedy beverage formulation", long_about = None)]
struct Args {
    /// Ingredient node table (CSV: node_id,name,id,node_type,is_hub)
    #[arg(long, default_value = "input/nodes.csv")]
    nodes: PathBuf,

    /// Embedding file (JSON object of node_id -> vector). When omitted,
    /// the most recent export in --embedding-dir is used.
    #[arg(long)]
    embeddings: Option<PathBuf>,

    /// Directory scanned for the latest embedding export
    #[arg(long, default_value = "output")]
    embedding_dir: PathBuf,

    /// Compatibility classifier coefficients (JSON)
    #[arg(long, default_value = "models/compat.json")]
    model: PathBuf,

    /// Constraint rule set (JSON)
    #[arg(long, default_value = "config/constraints.json")]
    constraints: PathBuf,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting BlendX v{}", env!("CARGO_PKG_VERSION"));

    let catalog = IngredientCatalog::from_csv_path(&args.nodes)?;
    info!("Catalog loaded: {} nodes from {:?}", catalog.len(), args.nodes);

    let emb_path = match args.embeddings {
        Some(path) => path,
        None => EmbeddingStore::find_latest(&args.embedding_dir)?,
    };
    let store = EmbeddingStore::load_json(&emb_path)?;
    info!(
        "Embeddings loaded: {} vectors (dim {:?}) from {:?}",
        store.len(),
        store.dim(),
        emb_path
    );

    let model = LogisticModel::load_json(&args.model)?;
    info!("Compatibility model loaded: {} features", model.dim());

    let rules = RuleSet::load(&args.constraints)?;
    info!("Rule set loaded from {:?}", args.constraints);

    let composition = Composer::new(&catalog, &store, &rules, model).compose()?;
    info!(
        "Composed {} ingredients, score {:.4}",
        composition.selection.len(),
        composition.score
    );

    println!("{}", serde_json::to_string_pretty(&composition.recipe)?);

    if !composition.violations.is_empty() {
        for violation in &composition.violations {
            warn!("violation {}: {}", violation.rule, violation.detail);
        }
        anyhow::bail!(
            "final formulation has {} violations",
            composition.violations.len()
        );
    }
    Ok(())
}
