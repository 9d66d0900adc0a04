//! `render` command: lay out one product from a merged file and write the
//! label as an SVG preview, a print-ready PDF, or an exported PNG.

use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Args, ValueEnum};
use farmalabel_core::{AppConfig, LabelConfig, Product};
use farmalabel_label::{
    export_file_name, export_png, layout, render_pdf, render_svg, FieldOrder, LabelField,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Svg,
    Pdf,
    Png,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Merged product file produced by `import`
    #[arg(long)]
    pub products: PathBuf,

    /// Merchant SKU of the product to render
    #[arg(long)]
    pub codigo: String,

    /// Label width in millimetres
    #[arg(long, default_value_t = 100)]
    pub width: u32,

    /// Label height in millimetres
    #[arg(long, default_value_t = 60)]
    pub height: u32,

    /// Base font size in pixels
    #[arg(long, default_value_t = 11)]
    pub font_size: u32,

    /// Background color (hex)
    #[arg(long, default_value = "#FFFFFF")]
    pub background: String,

    /// Text color (hex)
    #[arg(long, default_value = "#000000")]
    pub color: String,

    /// Hide a field (repeatable): name, generic, dosage, manufacturer,
    /// batch, expiry, price
    #[arg(long)]
    pub hide: Vec<String>,

    /// Comma-separated custom field order, e.g. "price,name,expiry,…"
    /// (must list all seven fields)
    #[arg(long)]
    pub order: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Png)]
    pub format: Format,

    /// PNG sharpness multiplier; defaults to the configured export scale
    #[arg(long)]
    pub scale: Option<u32>,

    /// Output path; a conventional name in the working directory when
    /// omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(config: &AppConfig, args: &RenderArgs) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(&args.products)
        .with_context(|| format!("reading {}", args.products.display()))?;
    let products: Vec<Product> = serde_json::from_str(&content)
        .with_context(|| format!("parsing {}", args.products.display()))?;
    let product = products
        .into_iter()
        .find(|p| p.codigo == args.codigo)
        .with_context(|| format!("codigo {} not present in the merged file", args.codigo))?;

    let label_config = build_label_config(args)?;
    let order = build_order(args.order.as_deref())?;
    let lines = layout(&product, &label_config, &order);
    tracing::info!(
        codigo = %product.codigo,
        visible_lines = lines.len(),
        "rendering label"
    );

    let (bytes, default_name) = match args.format {
        Format::Svg => (
            render_svg(&product, &label_config, &order).into_bytes(),
            format!("label_{}.svg", product.id),
        ),
        Format::Pdf => (
            render_pdf(&product, &label_config, &order)?,
            format!("label_{}.pdf", product.id),
        ),
        Format::Png => {
            let scale = args.scale.unwrap_or(config.export_scale);
            (
                // No rendered surface to snapshot on the CLI; the draw
                // strategy is the fallback in charge.
                export_png(&product, &label_config, &order, None, scale)?,
                export_file_name(&product.id, Utc::now().timestamp_millis()),
            )
        }
    };

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(default_name));
    std::fs::write(&out, bytes).with_context(|| format!("writing {}", out.display()))?;
    println!("etiqueta → {}", out.display());
    Ok(())
}

fn build_label_config(args: &RenderArgs) -> anyhow::Result<LabelConfig> {
    let mut config = LabelConfig {
        width: args.width,
        height: args.height,
        font_size: args.font_size,
        background_color: args.background.clone(),
        text_color: args.color.clone(),
        ..LabelConfig::default()
    };
    for key in &args.hide {
        let field: LabelField = key.parse()?;
        match field {
            LabelField::ProductName => config.show_product_name = false,
            LabelField::GenericName => config.show_generic_name = false,
            LabelField::Dosage => config.show_dosage = false,
            LabelField::Manufacturer => config.show_manufacturer = false,
            LabelField::Batch => config.show_batch = false,
            LabelField::Expiry => config.show_expiry = false,
            LabelField::Price => config.show_price = false,
        }
    }
    Ok(config)
}

fn build_order(spec: Option<&str>) -> anyhow::Result<FieldOrder> {
    match spec {
        None => Ok(FieldOrder::canonical()),
        Some(spec) => {
            let fields = spec
                .split(',')
                .map(str::parse)
                .collect::<Result<Vec<LabelField>, _>>()?;
            Ok(FieldOrder::from_fields(&fields)?)
        }
    }
}
