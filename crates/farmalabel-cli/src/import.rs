//! `import` command: parse the legacy exports and write the merged list.
//!
//! Per-file failures on the optional sources degrade to an empty map with a
//! warning so one bad export does not abort the run; only the base product
//! file is required.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use farmalabel_import::{
    map_raw_record, parse_base_products, parse_meson_file, parse_offer_file, reconcile, RawRecord,
};

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Base product export (header-driven TSV)
    #[arg(long)]
    pub products: PathBuf,

    /// Extra products as a JSON array of raw records with arbitrary key
    /// spellings (upload/API shape), appended to the base list
    #[arg(long)]
    pub raw: Option<PathBuf>,

    /// Offer source export (posdpofe TSV)
    #[arg(long)]
    pub offers: Option<PathBuf>,

    /// Merchandising source export (mesón TSV)
    #[arg(long)]
    pub meson: Option<PathBuf>,

    /// Output path for the merged JSON; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: &ImportArgs) -> anyhow::Result<()> {
    let base_content = std::fs::read_to_string(&args.products)
        .with_context(|| format!("reading {}", args.products.display()))?;
    let mut base = parse_base_products(&base_content)
        .with_context(|| format!("parsing {}", args.products.display()))?;

    if let Some(path) = &args.raw {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let records: Vec<RawRecord> = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        let before = base.len();
        base.extend(
            records
                .iter()
                .map(map_raw_record)
                // No SKU means the record can never join the offer or mesón
                // sources; drop it like the TSV parsers do.
                .filter(|p| !p.codigo.is_empty()),
        );
        let kept = base.len() - before;
        if kept < records.len() {
            tracing::warn!(
                dropped = records.len() - kept,
                "raw records without a SKU were dropped"
            );
        }
    }

    let offers = match &args.offers {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => parse_offer_file(&content),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "offer file unreadable, continuing without offers");
                HashMap::new()
            }
        },
        None => HashMap::new(),
    };
    let meson = match &args.meson {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(content) => parse_meson_file(&content),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "meson file unreadable, continuing without meson data");
                HashMap::new()
            }
        },
        None => HashMap::new(),
    };

    let merged = reconcile(&base, &offers, &meson);
    let with_offer = merged.iter().filter(|p| p.oferta.is_some()).count();
    let with_meson = merged.iter().filter(|p| p.meson.is_some()).count();
    tracing::info!(
        products = merged.len(),
        offers = offers.len(),
        meson = meson.len(),
        with_offer,
        with_meson,
        "merged product data"
    );

    let json = serde_json::to_string_pretty(&merged)?;
    match &args.out {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            println!(
                "{} productos ({with_offer} con oferta, {with_meson} en mesón) → {}",
                merged.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}
