//! Category commands.

use anyhow::Result;
use pos_core::catalog::CategoryForm;
use pos_core::CategoryId;

use super::{confirm, report_reply, ApiResultExt, CategoriesArgs, NamedCommand};
use crate::context::Context;

/// Run the categories command.
pub async fn run(args: CategoriesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;

    match args.command.unwrap_or(NamedCommand::List) {
        NamedCommand::List => {
            let categories = client.list_categories().await.or_user_message()?;
            if ctx.output.is_json() {
                ctx.output.json(&categories);
                return Ok(());
            }

            ctx.output.header("Categorías");
            if categories.is_empty() {
                ctx.output.info("No hay categorías registradas.");
                return Ok(());
            }
            ctx.output.table_header(&["ID", "NOMBRE"], &[6, 32]);
            for category in &categories {
                ctx.output
                    .table_row(&[&category.id.to_string(), &category.name], &[6, 32]);
            }
        }
        NamedCommand::Create { name } => {
            let reply = client
                .create_category(&CategoryForm::new(name))
                .await
                .or_user_message()?;
            report_reply(&reply, "Categoría creada correctamente", ctx);
        }
        NamedCommand::Update { id, name } => {
            let reply = client
                .update_category(CategoryId::new(id), &CategoryForm::new(name))
                .await
                .or_user_message()?;
            report_reply(&reply, "Categoría actualizada correctamente", ctx);
        }
        NamedCommand::Delete { id, yes } => {
            if !confirm(&format!("¿Eliminar la categoría {}?", id), yes, ctx)? {
                return Ok(());
            }
            let reply = client
                .delete_category(CategoryId::new(id))
                .await
                .or_user_message()?;
            report_reply(&reply, "Categoría eliminada", ctx);
        }
    }

    Ok(())
}
