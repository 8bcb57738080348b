//! Checkout command.
//!
//! Drives the three-step workflow in one shot from flags: fill the
//! address, pick the payment method, advance through validation, place the
//! order. Online payment cannot complete in a terminal - the gateway
//! checkout runs in a browser - so the gateway order details are printed
//! for the customer to finish there.

use clap::Args;

use saffron_core::PaymentMethod;
use saffron_client::checkout::{AddressField, CheckoutFlow, OrderPlacement};
use saffron_client::Storefront;

#[derive(Args)]
pub struct CheckoutArgs {
    /// Recipient's full name
    #[arg(long)]
    pub full_name: String,

    /// Contact phone number
    #[arg(long)]
    pub phone: String,

    /// Street and house number
    #[arg(long)]
    pub street: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// State or province
    #[arg(long)]
    pub state: String,

    /// Postal code
    #[arg(long = "zip")]
    pub zip_code: String,

    /// Country
    #[arg(long, default_value = "India")]
    pub country: String,

    /// Pay online through Razorpay instead of cash on delivery
    #[arg(long)]
    pub online: bool,
}

pub async fn run(
    shop: &mut Storefront,
    args: CheckoutArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    shop.cart.fetch_cart().await?;
    if shop.cart.item_count() == 0 {
        return Err("cart is empty".into());
    }

    let mut flow = CheckoutFlow::new();
    flow.set_address_field(AddressField::FullName, args.full_name);
    flow.set_address_field(AddressField::Phone, args.phone);
    flow.set_address_field(AddressField::Street, args.street);
    flow.set_address_field(AddressField::City, args.city);
    flow.set_address_field(AddressField::State, args.state);
    flow.set_address_field(AddressField::ZipCode, args.zip_code);
    flow.set_address_field(AddressField::Country, args.country);
    flow.set_payment_method(if args.online {
        PaymentMethod::Razorpay
    } else {
        PaymentMethod::Cod
    });

    flow.advance()?; // address -> payment method
    flow.advance()?; // payment method -> review

    let preview = shop.cart.preview();
    println!("placing order, estimated total {}", preview.total);

    match flow
        .place_order(&mut shop.cart, &shop.orders, &shop.payments)
        .await?
    {
        OrderPlacement::Completed(order) => {
            println!(
                "order {} placed, status {}, total {}",
                order.order_number, order.order_status, order.total_amount
            );
        }
        OrderPlacement::PaymentRequired { order, payment } => {
            println!(
                "order {} placed, awaiting payment of {} {}",
                order.order_number, payment.amount, payment.currency
            );
            println!("gateway order: {}", payment.razorpay_order_id);
            if let Some(key) = shop.payments.key_id() {
                println!("complete the payment in your browser with key {key}");
            }
            println!("the cart stays intact until the payment is verified");
        }
    }
    Ok(())
}
