//! Catalog browsing commands.

use clap::Subcommand;

use saffron_core::ProductId;
use saffron_client::Storefront;
use saffron_client::types::Product;

#[derive(Subcommand)]
pub enum ProductsAction {
    /// List products
    List {
        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,

        /// Page size
        #[arg(short, long, default_value_t = 20)]
        size: u32,
    },
    /// Search products
    Search {
        /// Search query
        query: String,

        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,
    },
    /// Show one product
    Show {
        /// Product id
        product_id: String,
    },
    /// List featured products
    Featured,
    /// List categories
    Categories,
}

pub async fn run(
    shop: &Storefront,
    action: ProductsAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProductsAction::List { page, size } => {
            let products = shop.catalog.products(page, size).await?;
            for product in &products.content {
                print_product_line(product);
            }
            println!(
                "page {}/{} ({} products)",
                products.number + 1,
                products.total_pages.max(1),
                products.total_elements
            );
        }
        ProductsAction::Search { query, page } => {
            let products = shop.catalog.search(&query, page, 20).await?;
            for product in &products.content {
                print_product_line(product);
            }
            println!("{} matches", products.total_elements);
        }
        ProductsAction::Show { product_id } => {
            let product = shop.catalog.product(&ProductId::new(product_id)).await?;
            println!("{} [{}]", product.name, product.id);
            if let Some(brand) = &product.brand {
                println!("brand: {brand}");
            }
            println!("price: {}", product.effective_price());
            println!("stock: {}", product.stock_quantity);
            if product.review_count > 0 {
                println!(
                    "rating: {:.1} ({} reviews)",
                    product.average_rating, product.review_count
                );
            }
            if let Some(description) = &product.description {
                println!("\n{description}");
            }
        }
        ProductsAction::Featured => {
            for product in shop.catalog.featured().await? {
                print_product_line(&product);
            }
        }
        ProductsAction::Categories => {
            for category in shop.catalog.categories().await? {
                println!("{:<24} [{}]", category.name, category.id);
            }
        }
    }
    Ok(())
}

fn print_product_line(product: &Product) {
    let sale = if product.discount_price.is_some() {
        " (sale)"
    } else {
        ""
    };
    println!(
        "{:<30} {:>10}{sale}  [{}]",
        product.name,
        product.effective_price(),
        product.id
    );
}
