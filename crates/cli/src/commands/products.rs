//! Catalog inspection commands.

use inventory_server::db::{self, ProductRepository, SchemaOptions};

use super::connect;

/// Print all products as a table, newest first.
///
/// # Errors
///
/// Returns an error if the database cannot be read.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let pool = connect().await?;
    db::ensure_schema(&pool, SchemaOptions { users: false }).await?;

    let products = ProductRepository::new(&pool).list().await?;

    #[allow(clippy::print_stdout)]
    {
        println!(
            "{:>5}  {:<24} {:<16} {:>12}  {:<4} {:<12} {:>6}",
            "ID", "NAME", "SKU", "PRICE", "SIZE", "COLOR", "QTY"
        );
        for p in &products {
            println!(
                "{:>5}  {:<24} {:<16} {:>12}  {:<4} {:<12} {:>6}",
                p.id,
                p.name,
                p.sku,
                p.price.display(),
                p.size,
                p.color.as_deref().unwrap_or("-"),
                p.quantity
            );
        }
    }

    tracing::info!(count = products.len(), "Listed products");
    Ok(())
}
