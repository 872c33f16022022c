//! Catalog flow: product pages in, staged records out.
//!
//! Discovery (crawling, DOM scraping, pagination) and persistence both
//! live outside this crate. This module takes the pages discovery found,
//! reduces each product's swatch image to a color, resolves a family
//! label, and assembles the record the persistence layer stores.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::color::{self, Color};
use crate::fetch::FetchImage;
use crate::pipeline::classify::classify;
use crate::pipeline::sample::{self, PixelGrid};

/// A product page as the discovery layer hands it over.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPage {
    #[serde(default)]
    pub name: Option<String>,
    /// Display image shown on the listing.
    #[serde(default)]
    pub picture: Option<String>,
    /// Dedicated swatch image, when the page offers one apart from the
    /// display picture.
    #[serde(default)]
    pub swatch: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Family label printed on the page itself.
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

/// Staged result record, one per product, shaped for the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub name: String,
    pub picture: String,
    #[serde(rename = "color family")]
    pub color_family: String,
    pub link: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub hex: String,
}

/// How a product's swatch image is reduced to one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwatchStrategy {
    /// Read the pixel at the image midpoint.
    Center,
    /// Cluster the image and take the first centroid.
    Dominant { k: usize },
}

/// Per-run catalog settings, passed in rather than read from globals.
#[derive(Debug, Clone)]
pub struct CatalogOptions {
    /// Brand stamped on every record, when the catalog is single-brand.
    pub brand: Option<String>,
    /// Product type stamped on every record.
    pub kind: Option<String>,
    pub strategy: SwatchStrategy,
    /// Apply marketplace name cleanup (sale markers, SKU tails, casing).
    pub tidy_names: bool,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            brand: None,
            kind: None,
            strategy: SwatchStrategy::Dominant { k: 1 },
            tidy_names: false,
        }
    }
}

/// Reduce a swatch-image URL to a hex color string.
///
/// `"N/A"` passes straight through, and any fetch, decode or sampling
/// failure degrades to `"N/A"` as well; one bad product never stops a
/// catalog run.
pub fn swatch_hex(fetcher: &dyn FetchImage, url: &str, strategy: SwatchStrategy) -> String {
    if url == color::UNAVAILABLE {
        return color::UNAVAILABLE.to_owned();
    }
    match try_swatch_hex(fetcher, url, strategy) {
        Ok(color) => color.to_hex(),
        Err(err) => {
            warn!("swatch unavailable for {url}: {err:#}");
            color::UNAVAILABLE.to_owned()
        }
    }
}

fn try_swatch_hex(
    fetcher: &dyn FetchImage,
    url: &str,
    strategy: SwatchStrategy,
) -> anyhow::Result<Color> {
    let bytes = fetcher.fetch_image(url)?;
    let grid = PixelGrid::decode(&bytes)?;
    let color = match strategy {
        SwatchStrategy::Center => sample::sample_center(Some(&grid)),
        SwatchStrategy::Dominant { k } => sample::sample_dominant(&grid, k)?,
    };
    Ok(color)
}

/// Assemble the staged record for one product page.
///
/// The family printed on the page wins when present; otherwise the swatch
/// hex and the description decide. Missing display image or link are
/// recorded as `"N/A"`.
pub fn build_record(
    fetcher: &dyn FetchImage,
    page: &ProductPage,
    options: &CatalogOptions,
) -> ProductRecord {
    let name = match page.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            if options.tidy_names {
                clean_product_name(name)
            } else {
                name.to_owned()
            }
        }
        _ => "Unknown Product".to_owned(),
    };

    let swatch_url = page
        .swatch
        .as_deref()
        .or(page.picture.as_deref())
        .unwrap_or(color::UNAVAILABLE);
    let hex = swatch_hex(fetcher, swatch_url, options.strategy);

    let color_family = match page.family.as_deref().map(str::trim) {
        Some(listed) if !listed.is_empty() => listed.to_owned(),
        _ => classify(&hex, page.description.as_deref()).label().to_owned(),
    };

    ProductRecord {
        brand: options.brand.clone(),
        name,
        picture: page
            .picture
            .clone()
            .unwrap_or_else(|| color::UNAVAILABLE.to_owned()),
        color_family,
        link: page
            .link
            .clone()
            .unwrap_or_else(|| color::UNAVAILABLE.to_owned()),
        finish: page.finish.clone(),
        kind: options.kind.clone(),
        hex,
    }
}

/// Run the pipeline over every discovered page, in input order.
pub fn run<I>(pages: I, fetcher: &dyn FetchImage, options: &CatalogOptions) -> Vec<ProductRecord>
where
    I: IntoIterator<Item = ProductPage>,
{
    pages
        .into_iter()
        .map(|page| {
            let record = build_record(fetcher, &page, options);
            info!(
                "staged {} ({}, {})",
                record.name, record.color_family, record.hex
            );
            record
        })
        .collect()
}

/// Tidy a marketplace listing name: drop the sale marker and the
/// four-character SKU tail, then normalize to title case.
pub fn clean_product_name(name: &str) -> String {
    let name = name.trim().replace(" - FINAL SALE", "");
    let chars: Vec<char> = name.chars().collect();
    let name: String = if chars.len() > 4 {
        chars[..chars.len() - 4].iter().collect()
    } else {
        name
    };
    title_case(name.trim())
}

/// Capitalize the first letter of every alphabetic run, lowercase the
/// rest, as marketplace names arrive fully uppercased.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut boundary = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if boundary {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            boundary = false;
        } else {
            out.push(c);
            boundary = true;
        }
    }
    out
}
