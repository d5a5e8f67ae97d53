//! Stock movement commands.

use anyhow::Result;
use pos_core::catalog::{Movement, MovementForm, MovementType, NamedRef};
use pos_core::{LocationId, ProductId};

use super::{report_reply, ApiResultExt, MovementsArgs, MovementsCommand};
use crate::context::Context;
use crate::output::format_timestamp;

/// Run the movements command.
pub async fn run(args: MovementsArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(MovementsCommand::List { limit: None }) {
        MovementsCommand::List { limit } => list_movements(limit, ctx).await,
        MovementsCommand::Create {
            movement_type,
            quantity,
            doc_ref,
            product,
            from,
            to,
        } => {
            let form = MovementForm {
                movement_type: movement_type.parse()?,
                quantity,
                doc_ref,
                product_id: ProductId::new(product),
                location_origin_id: from.map(LocationId::new),
                location_dest_id: to.map(LocationId::new),
            };
            create_movement(form, ctx).await
        }
    }
}

async fn list_movements(limit: Option<usize>, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    let spinner = ctx.output.spinner("Cargando movimientos...");
    let movements = client.list_movements().await;
    spinner.finish_and_clear();
    let mut movements = movements.or_user_message()?;

    // Newest first
    movements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = limit {
        movements.truncate(limit);
    }

    if ctx.output.is_json() {
        ctx.output.json(&movements);
        return Ok(());
    }

    ctx.output.header("Movimientos");
    if movements.is_empty() {
        ctx.output.info("No hay movimientos registrados.");
        return Ok(());
    }

    let widths = [6, 24, 8, 24, 16, 16, 16];
    ctx.output.table_header(
        &["ID", "TIPO", "CANT.", "PRODUCTO", "ORIGEN", "DESTINO", "FECHA"],
        &widths,
    );
    for movement in &movements {
        ctx.output.table_row(
            &[
                &movement.id.to_string(),
                type_label(movement),
                &movement.quantity.to_string(),
                &movement.product.name,
                location_name(movement.location_origin.as_ref()),
                location_name(movement.location_dest.as_ref()),
                &format_timestamp(&movement.created_at),
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.info(&format!("Total: {} movimiento(s)", movements.len()));
    Ok(())
}

async fn create_movement(form: MovementForm, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let reply = client.create_movement(&form).await.or_user_message()?;
    report_reply(
        &reply,
        &format!("Movimiento {} registrado", form.movement_type.label()),
        ctx,
    );
    Ok(())
}

fn type_label(movement: &Movement) -> &str {
    movement
        .kind()
        .map(|kind| kind.label())
        .unwrap_or(movement.movement_type.as_str())
}

fn location_name(location: Option<&NamedRef>) -> &str {
    location.map_or("-", |l| l.name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_core::MovementId;

    fn movement(kind: &str) -> Movement {
        Movement {
            id: MovementId::new(1),
            movement_type: kind.to_string(),
            quantity: 2,
            doc_ref: 10,
            product: NamedRef {
                name: "Widget".to_string(),
            },
            location_origin: None,
            location_dest: Some(NamedRef {
                name: "Bodega".to_string(),
            }),
            created_at: "2024-03-01T10:00:00Z".to_string(),
            updated_at: "2024-03-01T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_known_type_uses_label() {
        let m = movement("IN_PURCHASE");
        assert_eq!(type_label(&m), MovementType::InPurchase.label());
    }

    #[test]
    fn test_unknown_type_shows_code() {
        assert_eq!(type_label(&movement("IN_GIFT")), "IN_GIFT");
    }

    #[test]
    fn test_missing_location_dash() {
        let m = movement("IN_PURCHASE");
        assert_eq!(location_name(m.location_origin.as_ref()), "-");
        assert_eq!(location_name(m.location_dest.as_ref()), "Bodega");
    }
}
