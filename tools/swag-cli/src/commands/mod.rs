//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod price;
pub mod quote;

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use swag_commerce::cart::VariantSelection;
use swag_commerce::catalog::{Catalog, Product};
use swag_commerce::ProductId;

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Subcommand)]
pub enum CatalogCommand {
    /// List products, filtered and sorted.
    List {
        /// Category slug ("all" for every category).
        #[arg(long)]
        category: Option<String>,

        /// Supplier slug ("all" for every supplier).
        #[arg(long)]
        supplier: Option<String>,

        /// Text to find in the name or SKU.
        #[arg(short, long)]
        search: Option<String>,

        /// Minimum base price.
        #[arg(long)]
        min: Option<i64>,

        /// Maximum base price.
        #[arg(long)]
        max: Option<i64>,

        /// Sort order: name, price or stock.
        #[arg(long, default_value = "name")]
        sort: String,
    },
    /// Show one product with its price tiers.
    Show {
        /// Product ID.
        id: u64,
    },
}

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Product ID.
    pub id: u64,

    /// Quantity to price.
    #[arg(default_value = "1", allow_negative_numbers = true)]
    pub qty: i64,
}

/// Variant flags shared by the cart commands.
#[derive(Args, Clone, Default)]
pub struct VariantArgs {
    /// Selected color.
    #[arg(long)]
    pub color: Option<String>,

    /// Selected size.
    #[arg(long)]
    pub size: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart.
    Show,
    /// Add a product.
    Add {
        /// Product ID.
        id: u64,

        /// Quantity to add.
        #[arg(default_value = "1", allow_negative_numbers = true)]
        qty: i64,

        #[command(flatten)]
        variant: VariantArgs,

        /// Price the units from the product's volume tiers.
        #[arg(long)]
        tiered: bool,
    },
    /// Set the quantity of a line.
    Update {
        /// Product ID.
        id: u64,

        /// New quantity (values below 1 keep one unit).
        #[arg(allow_negative_numbers = true)]
        qty: i64,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Remove a line.
    Remove {
        /// Product ID.
        id: u64,

        #[command(flatten)]
        variant: VariantArgs,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the quote command.
#[derive(Args)]
pub struct QuoteArgs {
    /// Product ID.
    pub id: u64,

    /// Quantity to quote.
    #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
    pub qty: i64,

    #[command(flatten)]
    pub variant: VariantArgs,

    /// Company or person name.
    #[arg(long)]
    pub company: Option<String>,

    /// Contact email or phone.
    #[arg(long)]
    pub contact: Option<String>,

    /// RUT or national ID.
    #[arg(long)]
    pub rut: Option<String>,

    /// Notes for the sales team.
    #[arg(long)]
    pub notes: Option<String>,

    /// Write the quote document to the working directory.
    #[arg(long)]
    pub save: bool,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient, overriding the configured one.
    #[arg(long)]
    pub to: Option<String>,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Print the config file in use.
    Path,
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,

        /// Write swag.json instead of a commented swag.toml.
        #[arg(long = "as-json")]
        as_json: bool,
    },
}

/// Look up a product by ID.
pub(crate) fn find_product(catalog: &Catalog, id: u64) -> Result<&Product> {
    Ok(catalog.require(ProductId::new(id))?)
}

impl VariantArgs {
    /// The selection as given, with unset fields defaulting to the product's
    /// first color and size, like the product page preselects them.
    pub fn resolve(&self, product: &Product) -> VariantSelection {
        VariantSelection::from_parts(
            self.color
                .clone()
                .or_else(|| product.default_color().map(str::to_string)),
            self.size
                .clone()
                .or_else(|| product.default_size().map(str::to_string)),
        )
    }

    /// The selection exactly as given.
    pub fn exact(&self) -> VariantSelection {
        VariantSelection::from_parts(self.color.clone(), self.size.clone())
    }
}

/// Reject colors and sizes the product is not offered in.
pub(crate) fn validate_variant(product: &Product, variant: &VariantSelection) -> Result<()> {
    if let Some(color) = &variant.color {
        if !product.has_color(color) {
            bail!(
                "{} no está disponible en color '{}' (colores: {})",
                product.name,
                color,
                offered(&product.colors)
            );
        }
    }
    if let Some(size) = &variant.size {
        if !product.has_size(size) {
            bail!(
                "{} no está disponible en talla '{}' (tallas: {})",
                product.name,
                size,
                offered(&product.sizes)
            );
        }
    }
    Ok(())
}

fn offered(values: &[String]) -> String {
    if values.is_empty() {
        "ninguna".to_string()
    } else {
        values.join(", ")
    }
}
