//! Point-of-sale flow: build a cart from stock records and submit it.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context as _, Result};
use pos_client::FetchState;
use pos_core::cart::{CartHandle, CartStore, LineItemEntry, PaymentMethod};
use pos_core::catalog::StockRecord;
use pos_core::checkout::{OrderSummary, SubmissionOutcome};
use pos_core::{Currency, StockId};
use thiserror::Error;

use super::{confirm, SellArgs};
use crate::context::Context;
use crate::output::phase_badge;

/// Problems with a `--line` argument.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LineSpecError {
    #[error("expected STOCK_ID:QTY[@PRICE], got '{0}'")]
    Format(String),

    #[error("invalid stock id '{0}'")]
    StockId(String),
}

/// One `--line STOCK_ID:QTY[@PRICE]` argument.
///
/// Quantity and price stay as typed so they go through the same entry
/// rules as interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSpec {
    pub stock_id: StockId,
    pub quantity: String,
    pub price: Option<String>,
}

impl FromStr for LineSpec {
    type Err = LineSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (stock, rest) = s
            .split_once(':')
            .ok_or_else(|| LineSpecError::Format(s.to_string()))?;
        let stock_id = stock
            .parse()
            .map_err(|_| LineSpecError::StockId(stock.trim().to_string()))?;
        let (quantity, price) = match rest.split_once('@') {
            Some((quantity, price)) => (quantity, Some(price.trim().to_string())),
            None => (rest, None),
        };
        if quantity.trim().is_empty() {
            return Err(LineSpecError::Format(s.to_string()));
        }

        Ok(Self {
            stock_id,
            quantity: quantity.trim().to_string(),
            price,
        })
    }
}

/// Run the sell command.
pub async fn run(args: SellArgs, ctx: &Context) -> Result<()> {
    let specs = args
        .lines
        .iter()
        .map(|line| line.parse::<LineSpec>())
        .collect::<Result<Vec<_>, _>>()?;
    let payment: PaymentMethod = args.payment.parse()?;

    let currency = ctx.config.currency()?;
    let store = CartStore::new(currency).with_tax_rule(ctx.config.tax_rule()?)?;
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Cargando stock...");
    let stock: FetchState<Vec<StockRecord>> = client.list_stock().await.into();
    spinner.finish_and_clear();
    let stock = match stock {
        FetchState::Ready(records) => records,
        FetchState::Failed(message) => bail!(message),
        FetchState::Loading => bail!("Stock no disponible"),
    };

    let handle = CartHandle::new(store, Arc::new(client));
    for spec in &specs {
        let entry = build_entry(spec, &stock, currency, ctx)?;
        handle
            .add_entry(&entry)
            .await
            .with_context(|| format!("{} ({})", entry.record().product.name, entry.record().location.name))?;
    }
    handle.set_payment_method(payment).await?;

    let summary = handle.summary().await;
    if ctx.output.is_json() && (args.dry_run || !args.yes) {
        ctx.output.json(&summary);
        if !args.dry_run {
            bail!("Use --yes to submit in JSON mode");
        }
        return Ok(());
    }
    print_summary(&summary, ctx);

    if args.dry_run || !summary.can_submit {
        return Ok(());
    }
    if !confirm(&format!("¿Confirmar venta por {}?", summary.total), args.yes, ctx)? {
        return Ok(());
    }

    let spinner = ctx.output.spinner("Enviando orden...");
    let outcome = handle.submit_order().await;
    spinner.finish_and_clear();
    let outcome = outcome?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "summary": handle.summary().await,
            "outcome": outcome,
        }));
    }

    // Consume the outcome so the cart returns to empty either way.
    handle.acknowledge_outcome().await;

    match outcome {
        SubmissionOutcome::Succeeded(message) => {
            let text = if message.is_empty() { "Orden registrada".to_string() } else { message };
            ctx.output.success(&text);
            Ok(())
        }
        SubmissionOutcome::Failed(message) => bail!(message),
    }
}

/// Feed one `--line` through a fresh entry for its stock record.
fn build_entry(
    spec: &LineSpec,
    stock: &[StockRecord],
    currency: Currency,
    ctx: &Context,
) -> Result<LineItemEntry> {
    let Some(record) = stock.iter().find(|r| r.id == spec.stock_id) else {
        bail!("Stock record {} not found", spec.stock_id);
    };

    let mut entry = LineItemEntry::new(record.clone(), currency);
    if let Some(price) = &spec.price {
        entry.edit_price(price.as_str());
        if !entry.commit_price() {
            ctx.output.warn(&format!(
                "Precio inválido '{}' para {}, se usa {}",
                price,
                record.product.name,
                entry.committed_price()
            ));
        }
    }
    entry.edit_quantity(&spec.quantity);
    if entry.quantity_input() != spec.quantity {
        bail!(pos_core::PosError::InvalidQuantity(spec.quantity.clone()));
    }
    Ok(entry)
}

fn print_summary(summary: &OrderSummary, ctx: &Context) {
    ctx.output.header("Resumen de la orden");

    let widths = [4, 28, 18, 6, 12, 14];
    ctx.output.table_header(
        &["#", "PRODUCTO", "UBICACIÓN", "CANT.", "PRECIO", "TOTAL"],
        &widths,
    );
    for row in &summary.rows {
        ctx.output.table_row(
            &[
                &(row.index + 1).to_string(),
                &row.product_name,
                &row.location_name,
                &row.quantity.to_string(),
                &row.unit_price.display(),
                &row.line_total.display(),
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.kv("Subtotal", &summary.sub_total.display());
    ctx.output.kv("Impuestos", &summary.taxes.display());
    ctx.output.kv("Total", &summary.total.display());
    ctx.output.kv("Pago", summary.payment_method.display_name());
    if ctx.output.is_verbose() {
        ctx.output.kv("Estado", &phase_badge(summary.phase));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity_only() {
        let spec: LineSpec = "12:3".parse().unwrap();
        assert_eq!(spec.stock_id, StockId::new(12));
        assert_eq!(spec.quantity, "3");
        assert_eq!(spec.price, None);
    }

    #[test]
    fn test_parse_with_price() {
        let spec: LineSpec = "1:3@90".parse().unwrap();
        assert_eq!(spec.quantity, "3");
        assert_eq!(spec.price.as_deref(), Some("90"));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "13".parse::<LineSpec>(),
            Err(LineSpecError::Format("13".to_string()))
        );
        assert_eq!(
            "x:1".parse::<LineSpec>(),
            Err(LineSpecError::StockId("x".to_string()))
        );
        assert_eq!(
            "1:@90".parse::<LineSpec>(),
            Err(LineSpecError::Format("1:@90".to_string()))
        );
    }
}
