use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use crate::catalog::{self, CatalogOptions, ProductPage, SwatchStrategy};
use crate::fetch::{FetchImage, HttpFetcher};
use crate::pipeline::classify::classify;
use crate::pipeline::sample::{self, PixelGrid};

/// Extract and classify swatch colors from product imagery.
#[derive(Parser, Debug)]
#[command(name = "lacq", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sample one image and report its color
    Swatch(SwatchArgs),
    /// Stage records for a whole product catalog
    Batch(BatchArgs),
}

#[derive(clap::Args, Debug)]
pub struct SwatchArgs {
    /// Path to the input image (omit when using --url)
    pub image: Option<PathBuf>,

    /// Fetch the image from a URL instead of a file
    #[arg(long, conflicts_with = "image")]
    pub url: Option<String>,

    /// Sample the pixel at X,Y instead of clustering
    #[arg(short, long, value_name = "X,Y", value_parser = parse_coords)]
    pub pixel: Option<Coords>,

    /// Sample the center pixel instead of clustering
    #[arg(long, conflicts_with = "pixel")]
    pub center: bool,

    /// Number of K-means clusters for dominant-color sampling
    #[arg(short = 'k', long = "clusters", default_value_t = 1)]
    pub clusters: usize,

    /// Product description, scanned for color keywords as an override
    #[arg(short, long)]
    pub description: Option<String>,

    /// Print machine-readable JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct BatchArgs {
    /// JSON file holding the discovered product pages
    pub products: PathBuf,

    /// Sample each swatch's center pixel instead of clustering
    #[arg(long)]
    pub center: bool,

    /// Number of K-means clusters for dominant-color sampling
    #[arg(short = 'k', long = "clusters", default_value_t = 1, conflicts_with = "center")]
    pub clusters: usize,

    /// Brand stamped on every record
    #[arg(long)]
    pub brand: Option<String>,

    /// Product type stamped on every record
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Tidy marketplace listing names (sale markers, SKU tails, casing)
    #[arg(long)]
    pub tidy_names: bool,

    /// Write records to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Zero-based pixel coordinates, parsed from `X,Y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coords {
    pub x: u32,
    pub y: u32,
}

fn parse_coords(value: &str) -> Result<Coords, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{value}`"))?;
    let x = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid x coordinate `{x}`"))?;
    let y = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid y coordinate `{y}`"))?;
    Ok(Coords { x, y })
}

pub fn run_swatch(args: SwatchArgs) -> Result<()> {
    let bytes = match (&args.image, &args.url) {
        (Some(path), None) => {
            fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
        }
        (None, Some(url)) => HttpFetcher::new()?.fetch_image(url)?,
        _ => bail!("provide an image path or --url"),
    };
    let grid = PixelGrid::decode(&bytes)?;

    let color = if let Some(Coords { x, y }) = args.pixel {
        sample::sample_at(&grid, x, y)?
    } else if args.center {
        sample::sample_center(Some(&grid))
    } else {
        sample::sample_dominant(&grid, args.clusters)?
    };
    let hex = color.to_hex();
    let family = classify(&hex, args.description.as_deref());

    if args.json {
        let payload = serde_json::json!({
            "hex": hex,
            "rgb": [color.r, color.g, color.b],
            "family": family.label(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{hex}  rgb({}, {}, {})  {family}",
            color.r, color.g, color.b
        );
    }
    Ok(())
}

pub fn run_batch(args: BatchArgs) -> Result<()> {
    let text = fs::read_to_string(&args.products)
        .with_context(|| format!("failed to read {}", args.products.display()))?;
    let pages: Vec<ProductPage> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a product page listing", args.products.display()))?;

    let strategy = if args.center {
        SwatchStrategy::Center
    } else {
        SwatchStrategy::Dominant { k: args.clusters }
    };
    let options = CatalogOptions {
        brand: args.brand,
        kind: args.kind,
        strategy,
        tidy_names: args.tidy_names,
    };

    let fetcher = HttpFetcher::new()?;
    info!("staging {} products", pages.len());
    let records = catalog::run(pages, &fetcher, &options);

    let json = serde_json::to_string_pretty(&records)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("wrote {} records to {}", records.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
