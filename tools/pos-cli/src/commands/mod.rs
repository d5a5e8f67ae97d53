//! CLI command implementations.

pub mod categories;
pub mod config;
pub mod locations;
pub mod movements;
pub mod products;
pub mod sell;
pub mod stock;

use anyhow::{anyhow, Result};
use clap::{Args, Subcommand};
use pos_client::{ApiError, MutationReply};

use crate::context::Context;

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    #[command(subcommand)]
    pub command: Option<ProductsCommand>,
}

#[derive(Subcommand)]
pub enum ProductsCommand {
    /// List all products.
    List,
    /// Create a product.
    Create(ProductFields),
    /// Update a product. Omitted fields keep their current value.
    Update {
        /// Product id.
        id: i64,
        #[command(flatten)]
        fields: ProductPatch,
    },
    /// Delete a product.
    Delete {
        /// Product id.
        id: i64,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Every product field, for creation.
#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub description: String,
    #[arg(long)]
    pub brand: String,
    /// Purchase cost per unit.
    #[arg(long)]
    pub unit_cost: f64,
    /// Reference sale price per unit.
    #[arg(long)]
    pub sale_price: f64,
    /// Warranty length in days.
    #[arg(long, default_value = "0")]
    pub warranty_days: i64,
    /// Category id.
    #[arg(long)]
    pub category: i64,
}

/// Optional product fields, for updates.
#[derive(Args)]
pub struct ProductPatch {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub brand: Option<String>,
    #[arg(long)]
    pub unit_cost: Option<f64>,
    #[arg(long)]
    pub sale_price: Option<f64>,
    #[arg(long)]
    pub warranty_days: Option<i64>,
    #[arg(long)]
    pub category: Option<i64>,
}

/// Arguments for the categories command.
#[derive(Args)]
pub struct CategoriesArgs {
    #[command(subcommand)]
    pub command: Option<NamedCommand>,
}

/// Arguments for the locations command.
#[derive(Args)]
pub struct LocationsArgs {
    #[command(subcommand)]
    pub command: Option<NamedCommand>,
}

/// Subcommands for resources that only carry a name.
#[derive(Subcommand)]
pub enum NamedCommand {
    /// List all records.
    List,
    /// Create a record.
    Create {
        /// Display name.
        name: String,
    },
    /// Rename a record.
    Update {
        /// Record id.
        id: i64,
        /// New name.
        name: String,
    },
    /// Delete a record.
    Delete {
        /// Record id.
        id: i64,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the movements command.
#[derive(Args)]
pub struct MovementsArgs {
    #[command(subcommand)]
    pub command: Option<MovementsCommand>,
}

#[derive(Subcommand)]
pub enum MovementsCommand {
    /// List recorded movements.
    List {
        /// Show only the last N movements.
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Record a movement.
    Create {
        /// Movement type, e.g. IN_PURCHASE, TRANSFER, OUT_SALE.
        #[arg(long = "type")]
        movement_type: String,
        /// Units moved.
        #[arg(long)]
        quantity: i64,
        /// Supporting document number.
        #[arg(long)]
        doc_ref: i64,
        /// Product id.
        #[arg(long)]
        product: i64,
        /// Origin location id (OUT_* and TRANSFER).
        #[arg(long)]
        from: Option<i64>,
        /// Destination location id (IN_* and TRANSFER).
        #[arg(long)]
        to: Option<i64>,
    },
}

/// Arguments for the stock command.
#[derive(Args)]
pub struct StockArgs {
    #[command(subcommand)]
    pub command: Option<StockCommand>,

    /// Only show this location id.
    #[arg(short, long, global = true)]
    pub location: Option<i64>,

    /// Hide records with no units.
    #[arg(long, global = true)]
    pub available: bool,
}

#[derive(Subcommand)]
pub enum StockCommand {
    /// List stock records.
    List,
}

/// Arguments for the sell command.
#[derive(Args)]
pub struct SellArgs {
    /// Line to add, as STOCK_ID:QTY or STOCK_ID:QTY@PRICE. Repeatable.
    #[arg(short, long = "line", required = true)]
    pub lines: Vec<String>,

    /// Payment method: CASH, CARD, TRANSFER or CREDIT.
    #[arg(short, long, default_value = "CASH")]
    pub payment: String,

    /// Submit without confirmation.
    #[arg(short, long)]
    pub yes: bool,

    /// Show the summary without submitting.
    #[arg(long)]
    pub dry_run: bool,
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
    /// Initialize a new config file.
    Init {
        /// Force overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate the configuration.
    Validate,
}

/// Turn a client error into the message the user should see.
pub(crate) trait ApiResultExt<T> {
    fn or_user_message(self) -> Result<T>;
}

impl<T> ApiResultExt<T> for std::result::Result<T, ApiError> {
    fn or_user_message(self) -> Result<T> {
        self.map_err(|err| {
            tracing::debug!(error = %err, "request failed");
            anyhow!(err.user_message())
        })
    }
}

/// Ask before a destructive action unless `yes` is set.
pub(crate) fn confirm(prompt: &str, yes: bool, ctx: &Context) -> Result<bool> {
    if yes {
        return Ok(true);
    }

    use dialoguer::Confirm;
    let confirmed = Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;

    if !confirmed {
        ctx.output.warn("Cancelado");
    }
    Ok(confirmed)
}

/// Report the outcome of a create, update or delete.
pub(crate) fn report_reply(reply: &MutationReply, fallback: &str, ctx: &Context) {
    if ctx.output.is_json() {
        let value = match reply {
            MutationReply::Message(text) => serde_json::json!({ "message": text }),
            MutationReply::Record(record) => record.clone(),
            MutationReply::Empty => serde_json::json!({ "message": fallback }),
        };
        ctx.output.json(&value);
        return;
    }
    ctx.output.success(reply.message().unwrap_or(fallback));
}
