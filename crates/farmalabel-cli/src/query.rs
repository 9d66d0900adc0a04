//! `search`, `enrich`, and `upload-excel` commands: the remote-service
//! flows. Excel search hits carry no pricing until enrichment, so their
//! price column renders the placeholder dash.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use clap::Args;
use farmalabel_api::ApiClient;
use farmalabel_core::AppConfig;
use farmalabel_label::format_price;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text search term
    #[arg(long, conflicts_with = "code")]
    pub term: Option<String>,

    /// Exact merchant SKU
    #[arg(long)]
    pub code: Option<String>,

    /// Search the mesón Excel index instead of the product catalog
    #[arg(long, requires = "term")]
    pub excel: bool,
}

fn client(config: &AppConfig) -> anyhow::Result<ApiClient> {
    Ok(ApiClient::new(config.into())?)
}

pub async fn search(config: &AppConfig, args: &SearchArgs) -> anyhow::Result<()> {
    let client = client(config)?;
    let today = Utc::now().date_naive();

    if let Some(code) = &args.code {
        let product = client.get_product(code).await?.into_product(today);
        println!(
            "{}\t{}\t{}",
            product.codigo,
            product.nombre,
            format_price(Some(product.precio))
        );
        if let Some(oferta) = &product.oferta {
            println!(
                "\toferta: {} (-{}%) hasta {}",
                format_price(Some(oferta.precio_oferta)),
                oferta.descuento_porcentaje,
                oferta.vigencia_fin
            );
        }
        return Ok(());
    }

    let term = args
        .term
        .as_deref()
        .context("pass --term <text> or --code <sku>")?;

    if args.excel {
        let items = client.search_excel(term).await?;
        for item in &items {
            println!(
                "{}\t{}\t{}",
                item.sku,
                item.descripcion.as_deref().unwrap_or(""),
                // No pricing until the enrich step.
                format_price(None)
            );
        }
        tracing::info!(hits = items.len(), "excel search done");
    } else {
        let products = client.search_products(term).await?;
        for product in products {
            let product = product.into_product(today);
            println!(
                "{}\t{}\t{}",
                product.codigo,
                product.nombre,
                format_price(Some(product.precio))
            );
        }
    }
    Ok(())
}

pub async fn enrich(config: &AppConfig, sku: &str) -> anyhow::Result<()> {
    let client = client(config)?;
    let response = client.enrich_from_dpofe(sku).await?;

    if !response.found_in_dpofe {
        println!(
            "{}",
            response
                .message
                .unwrap_or_else(|| format!("SKU {sku} sin datos de precio en DPOFE"))
        );
        return Ok(());
    }

    let record = response
        .producto
        .context("servicio reportó foundInDPOFE sin producto")?;
    let product = record.into_product(Utc::now().date_naive());
    println!(
        "{}\t{}\t{}",
        product.codigo,
        product.nombre,
        format_price(Some(product.precio))
    );
    if let Some(oferta) = &product.oferta {
        println!(
            "\toferta: {} (-{}%) {} → {}",
            format_price(Some(oferta.precio_oferta)),
            oferta.descuento_porcentaje,
            oferta.vigencia_inicio,
            oferta.vigencia_fin
        );
    }
    Ok(())
}

pub async fn upload_excel(config: &AppConfig, file: &Path, user: &str) -> anyhow::Result<()> {
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let file_name = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("meson.xlsx");

    let client = client(config)?;
    let summary = client.upload_meson_excel(file_name, bytes, user).await?;
    println!(
        "Excel cargado: {} filas{}",
        summary.count,
        summary
            .last_updated
            .map(|ts| format!(" (actualizado {ts})"))
            .unwrap_or_default()
    );
    Ok(())
}
