//! Location commands.

use anyhow::Result;
use pos_core::catalog::LocationForm;
use pos_core::LocationId;

use super::{confirm, report_reply, ApiResultExt, LocationsArgs, NamedCommand};
use crate::context::Context;

/// Run the locations command.
pub async fn run(args: LocationsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command.unwrap_or(NamedCommand::List) {
        NamedCommand::List => {
            let locations = client.list_locations().await.or_user_message()?;
            if ctx.output.is_json() {
                ctx.output.json(&locations);
                return Ok(());
            }

            ctx.output.header("Ubicaciones");
            if locations.is_empty() {
                ctx.output.info("No hay ubicaciones registradas.");
                return Ok(());
            }
            ctx.output.table_header(&["ID", "NOMBRE"], &[6, 32]);
            for location in &locations {
                ctx.output
                    .table_row(&[&location.id.to_string(), &location.name], &[6, 32]);
            }
        }
        NamedCommand::Create { name } => {
            let reply = client
                .create_location(&LocationForm::new(name))
                .await
                .or_user_message()?;
            report_reply(&reply, "Ubicación creada correctamente", ctx);
        }
        NamedCommand::Update { id, name } => {
            let reply = client
                .update_location(LocationId::new(id), &LocationForm::new(name))
                .await
                .or_user_message()?;
            report_reply(&reply, "Ubicación actualizada correctamente", ctx);
        }
        NamedCommand::Delete { id, yes } => {
            if !confirm(&format!("¿Eliminar la ubicación {}?", id), yes, ctx)? {
                return Ok(());
            }
            let reply = client
                .delete_location(LocationId::new(id))
                .await
                .or_user_message()?;
            report_reply(&reply, "Ubicación eliminada", ctx);
        }
    }

    Ok(())
}
