//! Cart commands.

use clap::Subcommand;

use saffron_core::{CouponCode, ProductId};
use saffron_client::Storefront;

#[derive(Subcommand)]
pub enum CartAction {
    /// Show the cart with estimated totals
    Show,
    /// Add a product
    Add {
        /// Product id
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Change a line's quantity
    SetQuantity {
        /// Product id
        product_id: String,

        /// New quantity (at least 1)
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Product id
        product_id: String,
    },
    /// Empty the cart
    Clear,
    /// Apply a coupon code
    ApplyCoupon {
        /// Coupon code
        code: String,
    },
    /// Remove the applied coupon
    RemoveCoupon,
}

pub async fn run(
    shop: &mut Storefront,
    action: CartAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        CartAction::Show => {
            shop.cart.fetch_cart().await?;
            print_cart(shop);
        }
        CartAction::Add {
            product_id,
            quantity,
        } => {
            shop.cart
                .add_to_cart(&ProductId::new(product_id), quantity)
                .await?;
            println!("added to cart ({} items)", shop.cart.item_count());
        }
        CartAction::SetQuantity {
            product_id,
            quantity,
        } => {
            shop.cart
                .update_item_quantity(&ProductId::new(product_id), quantity)
                .await?;
            println!("updated ({} items)", shop.cart.item_count());
        }
        CartAction::Remove { product_id } => {
            shop.cart
                .remove_from_cart(&ProductId::new(product_id))
                .await?;
            println!("removed ({} items)", shop.cart.item_count());
        }
        CartAction::Clear => {
            shop.cart.clear_cart().await?;
            println!("cart cleared");
        }
        CartAction::ApplyCoupon { code } => {
            shop.cart.apply_coupon(&CouponCode::new(code)).await?;
            println!(
                "coupon applied, discount {}",
                shop.cart.discount()
            );
        }
        CartAction::RemoveCoupon => {
            shop.cart.remove_coupon().await?;
            println!("coupon removed");
        }
    }
    Ok(())
}

fn print_cart(shop: &Storefront) {
    let Some(cart) = shop.cart.cart() else {
        println!("cart is empty");
        return;
    };
    if cart.is_empty() {
        println!("cart is empty");
        return;
    }

    for line in &cart.items {
        println!(
            "{:>3} x {:<30} {:>10}  [{}]",
            line.quantity, line.product_name, line.price, line.product_id
        );
    }

    let preview = shop.cart.preview();
    println!("---");
    println!("subtotal  {:>10}", preview.subtotal);
    if let Some(coupon) = shop.cart.applied_coupon() {
        println!("discount  {:>10}  ({coupon})", preview.discount);
    }
    println!("tax       {:>10}", preview.tax);
    println!("shipping  {:>10}", preview.shipping);
    println!("estimated {:>10}  (final total computed at checkout)", preview.total);
}
