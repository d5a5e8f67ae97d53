//! Stock listing.

use anyhow::{bail, Result};
use pos_client::FetchState;
use pos_core::catalog::StockRecord;
use pos_core::LocationId;

use super::StockArgs;
use crate::context::Context;
use crate::output::stock_badge;

/// Run the stock command.
pub async fn run(args: StockArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let currency = ctx.config.currency()?;

    let spinner = ctx.output.spinner("Cargando stock...");
    let state: FetchState<Vec<StockRecord>> = client.list_stock().await.into();
    spinner.finish_and_clear();

    let records = match state {
        FetchState::Ready(records) => filter(records, args.location.map(LocationId::new), args.available),
        FetchState::Failed(message) => bail!(message),
        FetchState::Loading => return Ok(()),
    };

    if ctx.output.is_json() {
        ctx.output.json(&records);
        return Ok(());
    }

    ctx.output.header("Stock");
    if records.is_empty() {
        ctx.output.info("No hay stock para mostrar.");
        return Ok(());
    }

    let widths = [6, 28, 20, 10, 12];
    ctx.output.table_header(
        &["ID", "PRODUCTO", "UBICACIÓN", "CANTIDAD", "PRECIO"],
        &widths,
    );
    for record in &records {
        let price = record.reference_price(currency).display();
        ctx.output.table_row(
            &[
                &record.id.to_string(),
                &record.product.name,
                &record.location.name,
                &stock_badge(record.available()),
                &price,
            ],
            &widths,
        );
    }

    let units: i64 = records.iter().map(StockRecord::available).sum();
    ctx.output.blank();
    ctx.output.info(&format!(
        "Total: {} registro(s), {} unidad(es)",
        records.len(),
        units
    ));
    Ok(())
}

fn filter(records: Vec<StockRecord>, location: Option<LocationId>, available_only: bool) -> Vec<StockRecord> {
    records
        .into_iter()
        .filter(|r| location.map_or(true, |id| r.location.id == id))
        .filter(|r| !available_only || !r.is_out_of_stock())
        .collect()
}
