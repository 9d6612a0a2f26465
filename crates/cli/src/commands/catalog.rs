//! `paw catalog` - browse available products.

use pawstore_core::CategoryId;
use pawstore_storefront::state::Storefront;

/// List available products, optionally filtered by category name.
pub async fn list(
    store: &Storefront,
    category: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let category_id = match category {
        Some(name) => Some(resolve_category(store, &name).await?),
        None => None,
    };

    let products = store.backend().available_products().await?;

    println!("{:>5}  {:<40} {:>12} {:>7}  {}", "ID", "PRODUCT", "PRICE", "STOCK", "TAX");
    for product in products
        .iter()
        .filter(|p| category_id.is_none_or(|c| p.category_id == c))
    {
        println!(
            "{:>5}  {:<40} {:>12} {:>7}  {}",
            product.id.to_string(),
            product.description,
            product.price().display(),
            product.stock_available,
            if product.taxable { "yes" } else { "no" },
        );
    }

    Ok(())
}

/// Find a category by case-insensitive name match.
async fn resolve_category(
    store: &Storefront,
    name: &str,
) -> Result<CategoryId, Box<dyn std::error::Error>> {
    let needle = name.to_lowercase();
    store
        .backend()
        .categories()
        .await?
        .iter()
        .find(|c| c.description.to_lowercase().contains(&needle))
        .map(|c| c.id)
        .ok_or_else(|| format!("no category matching '{name}'").into())
}
