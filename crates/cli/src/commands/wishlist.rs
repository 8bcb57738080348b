//! Wishlist commands.

use clap::Subcommand;

use saffron_core::ProductId;
use saffron_client::{Storefront, WishlistAdd};

#[derive(Subcommand)]
pub enum WishlistAction {
    /// Show the wishlist
    Show,
    /// Add a product by id
    Add {
        /// Product id
        product_id: String,
    },
    /// Remove a product
    Remove {
        /// Product id
        product_id: String,
    },
    /// Empty the wishlist
    Clear,
}

pub async fn run(
    shop: &mut Storefront,
    action: WishlistAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        WishlistAction::Show => {
            shop.wishlist.fetch_wishlist().await?;
            if shop.wishlist.item_count() == 0 {
                println!("wishlist is empty");
            }
            for product in shop.wishlist.items() {
                println!(
                    "{:<30} {:>10}  [{}]",
                    product.name,
                    product.effective_price(),
                    product.id
                );
            }
        }
        WishlistAction::Add { product_id } => {
            // The wishlist stores product summaries; fetch the product so
            // the persisted entry carries its name and price.
            let product = shop.catalog.product(&ProductId::new(product_id)).await?;
            match shop.wishlist.add_to_wishlist(product).await? {
                WishlistAdd::Added => println!("added to wishlist"),
                WishlistAdd::AlreadyPresent => println!("already in wishlist"),
            }
        }
        WishlistAction::Remove { product_id } => {
            shop.wishlist
                .remove_from_wishlist(&ProductId::new(product_id))
                .await;
            println!("removed ({} items)", shop.wishlist.item_count());
        }
        WishlistAction::Clear => {
            shop.wishlist.clear_wishlist().await;
            println!("wishlist cleared");
        }
    }
    Ok(())
}
