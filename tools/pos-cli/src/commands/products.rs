//! Product commands.

use anyhow::{bail, Result};
use pos_core::catalog::{Product, ProductForm};
use pos_core::{CategoryId, Money, ProductId};

use super::{confirm, report_reply, ApiResultExt, ProductFields, ProductPatch, ProductsArgs, ProductsCommand};
use crate::context::Context;

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(ProductsCommand::List) {
        ProductsCommand::List => list_products(ctx).await,
        ProductsCommand::Create(fields) => create_product(fields, ctx).await,
        ProductsCommand::Update { id, fields } => update_product(ProductId::new(id), fields, ctx).await,
        ProductsCommand::Delete { id, yes } => delete_product(ProductId::new(id), yes, ctx).await,
    }
}

async fn list_products(ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let currency = ctx.config.currency()?;

    let spinner = ctx.output.spinner("Cargando productos...");
    let products = client.list_products().await;
    spinner.finish_and_clear();
    let products = products.or_user_message()?;

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header("Productos");
    if products.is_empty() {
        ctx.output.info("No hay productos registrados.");
        return Ok(());
    }

    let widths = [6, 28, 16, 16, 12, 12, 9];
    ctx.output.table_header(
        &["ID", "NOMBRE", "MARCA", "CATEGORÍA", "COSTO", "PRECIO", "GARANTÍA"],
        &widths,
    );
    for product in &products {
        let cost = Money::from_decimal(product.unit_cost, currency).display();
        let price = Money::from_decimal(product.sale_price, currency).display();
        let warranty = format!("{} d", product.warranty_period_days);
        ctx.output.table_row(
            &[
                &product.id.to_string(),
                &product.name,
                &product.brand,
                &product.category.name,
                &cost,
                &price,
                &warranty,
            ],
            &widths,
        );
    }

    ctx.output.blank();
    ctx.output.info(&format!("Total: {} producto(s)", products.len()));
    Ok(())
}

async fn create_product(fields: ProductFields, ctx: &Context) -> Result<()> {
    let form = ProductForm {
        name: fields.name,
        description: fields.description,
        brand: fields.brand,
        unit_cost: fields.unit_cost,
        sale_price: fields.sale_price,
        warranty_period_days: fields.warranty_days,
        category_id: CategoryId::new(fields.category),
    };

    let client = ctx.client()?;
    let reply = client.create_product(&form).await.or_user_message()?;
    report_reply(&reply, "Producto creado correctamente", ctx);
    Ok(())
}

async fn update_product(id: ProductId, patch: ProductPatch, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let products = client.list_products().await.or_user_message()?;
    let Some(current) = products.iter().find(|p| p.id == id) else {
        bail!("Product {} not found", id);
    };

    let form = apply_patch(current, patch);
    let reply = client.update_product(id, &form).await.or_user_message()?;
    report_reply(&reply, "Producto actualizado correctamente", ctx);
    Ok(())
}

async fn delete_product(id: ProductId, yes: bool, ctx: &Context) -> Result<()> {
    if !confirm(&format!("¿Eliminar el producto {}?", id), yes, ctx)? {
        return Ok(());
    }

    let client = ctx.client()?;
    let reply = client.delete_product(id).await.or_user_message()?;
    report_reply(&reply, "Producto eliminado", ctx);
    Ok(())
}

/// Start from the product's current values and overwrite the given fields.
fn apply_patch(product: &Product, patch: ProductPatch) -> ProductForm {
    let mut form = product.to_form();
    if let Some(name) = patch.name {
        form.name = name;
    }
    if let Some(description) = patch.description {
        form.description = description;
    }
    if let Some(brand) = patch.brand {
        form.brand = brand;
    }
    if let Some(unit_cost) = patch.unit_cost {
        form.unit_cost = unit_cost;
    }
    if let Some(sale_price) = patch.sale_price {
        form.sale_price = sale_price;
    }
    if let Some(days) = patch.warranty_days {
        form.warranty_period_days = days;
    }
    if let Some(category) = patch.category {
        form.category_id = CategoryId::new(category);
    }
    form
}

#[cfg(test)]
mod tests {
    use super::*;
    use pos_core::catalog::Category;

    fn product() -> Product {
        Product {
            id: ProductId::new(3),
            name: "Cable HDMI".to_string(),
            description: "2 metros".to_string(),
            brand: "Acme".to_string(),
            unit_cost: 8000.0,
            sale_price: 15000.0,
            warranty_period_days: 90,
            category_id: CategoryId::new(1),
            category: Category {
                id: CategoryId::new(1),
                name: "Cables".to_string(),
            },
        }
    }

    fn empty_patch() -> ProductPatch {
        ProductPatch {
            name: None,
            description: None,
            brand: None,
            unit_cost: None,
            sale_price: None,
            warranty_days: None,
            category: None,
        }
    }

    #[test]
    fn test_empty_patch_keeps_values() {
        assert_eq!(apply_patch(&product(), empty_patch()), product().to_form());
    }

    #[test]
    fn test_patch_overrides_given_fields() {
        let patch = ProductPatch {
            sale_price: Some(17000.0),
            category: Some(2),
            ..empty_patch()
        };
        let form = apply_patch(&product(), patch);
        assert_eq!(form.sale_price, 17000.0);
        assert_eq!(form.category_id, CategoryId::new(2));
        assert_eq!(form.name, "Cable HDMI");
    }
}
