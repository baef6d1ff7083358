//! Seed the catalog from a YAML file.
//!
//! Each entry is validated exactly like an API submission. Entries whose SKU
//! already exists are skipped, so seeding twice is harmless.

use std::path::Path;

use inventory_core::{ProductSubmission, ValidatedProduct, validate_product_input};
use inventory_server::db::{self, ProductRepository, RepositoryError, SchemaOptions};
use tracing::{info, warn};

use super::connect;

/// Demo catalog used when no file is given.
const DEMO_CATALOG: &str = include_str!("../../seed/products.yaml");

/// Outcome of a seeding run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub created: usize,
    pub skipped: usize,
}

/// Seed products from `file_path`, or the demo catalog when `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, an entry fails
/// validation, or a database operation fails.
pub async fn products(file_path: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let content = match file_path {
        Some(file_path) => {
            let path = Path::new(file_path);
            if !path.exists() {
                return Err(format!("File not found: {file_path}").into());
            }
            info!(path = %file_path, "Loading products from file");
            tokio::fs::read_to_string(path).await?
        }
        None => {
            info!("Loading demo catalog");
            DEMO_CATALOG.to_owned()
        }
    };

    let entries = parse_catalog(&content)?;
    info!(entries = entries.len(), "Parsed catalog");

    let pool = connect().await?;
    db::ensure_schema(&pool, SchemaOptions { users: false }).await?;

    let summary = insert_all(&ProductRepository::new(&pool), &entries).await?;
    info!(
        created = summary.created,
        skipped = summary.skipped,
        "Seeding complete"
    );
    Ok(())
}

/// Parse and validate every entry before touching the database.
fn parse_catalog(
    content: &str,
) -> Result<Vec<ValidatedProduct>, Box<dyn std::error::Error>> {
    let submissions: Vec<ProductSubmission> = serde_yaml::from_str(content)?;

    submissions
        .iter()
        .enumerate()
        .map(|(i, submission)| {
            validate_product_input(submission).map_err(|e| {
                Box::<dyn std::error::Error>::from(format!("entry {}: {e}", i + 1))
            })
        })
        .collect()
}

async fn insert_all(
    repo: &ProductRepository<'_>,
    entries: &[ValidatedProduct],
) -> Result<SeedSummary, RepositoryError> {
    let mut summary = SeedSummary::default();

    for entry in entries {
        match repo.create(entry).await {
            Ok(_) => summary.created += 1,
            Err(RepositoryError::Conflict(_)) => {
                warn!(sku = %entry.sku, "SKU already exists, skipping");
                summary.skipped += 1;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use inventory_server::db::create_memory_pool;

    use super::*;

    #[test]
    fn test_demo_catalog_is_valid() {
        let entries = parse_catalog(DEMO_CATALOG).unwrap();
        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].sku.as_str(), "TS-BASIC-BLK");
        assert_eq!(entries[3].brand, None);
    }

    #[test]
    fn test_invalid_entry_is_reported_by_position() {
        let yaml = "- {name: A, sku: a-1, price: 1, size: M, quantity: 1}\n\
                    - {name: B, sku: b-1, price: 1, size: XXL, quantity: 1}\n";
        let err = parse_catalog(yaml).unwrap_err().to_string();
        assert!(err.starts_with("entry 2:"), "{err}");
    }

    #[tokio::test]
    async fn test_seeding_twice_skips_existing() {
        let pool = create_memory_pool().await.unwrap();
        db::ensure_schema(&pool, SchemaOptions { users: false })
            .await
            .unwrap();
        let repo = ProductRepository::new(&pool);
        let entries = parse_catalog(DEMO_CATALOG).unwrap();

        let first = insert_all(&repo, &entries).await.unwrap();
        assert_eq!(first, SeedSummary { created: 5, skipped: 0 });

        let second = insert_all(&repo, &entries).await.unwrap();
        assert_eq!(second, SeedSummary { created: 0, skipped: 5 });
        assert_eq!(repo.list().await.unwrap().len(), 5);
    }
}
