//! Order history commands.

use clap::Subcommand;

use saffron_core::OrderId;
use saffron_client::Storefront;
use saffron_client::types::Order;

#[derive(Subcommand)]
pub enum OrdersAction {
    /// List your orders
    List {
        /// Zero-based page index
        #[arg(short, long, default_value_t = 0)]
        page: u32,
    },
    /// Show one order with its status timeline
    Show {
        /// Order id
        order_id: String,
    },
    /// Cancel a pending or confirmed order
    Cancel {
        /// Order id
        order_id: String,
    },
    /// Rebuild the cart from a past order
    Reorder {
        /// Order id
        order_id: String,
    },
}

pub async fn run(
    shop: &Storefront,
    action: OrdersAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrdersAction::List { page } => {
            let orders = shop.orders.my_orders(page, 10).await?;
            for order in &orders.content {
                println!(
                    "{}  {:<12} {:>10}  [{}]",
                    order.order_number, order.order_status, order.total_amount, order.id
                );
            }
            println!("{} orders", orders.total_elements);
        }
        OrdersAction::Show { order_id } => {
            let order = shop.orders.get(&OrderId::new(order_id)).await?;
            print_order(&order);
        }
        OrdersAction::Cancel { order_id } => {
            let order = shop.orders.cancel(&OrderId::new(order_id)).await?;
            println!("order {} is now {}", order.order_number, order.order_status);
        }
        OrdersAction::Reorder { order_id } => {
            let cart = shop.orders.reorder(&OrderId::new(order_id)).await?;
            println!("cart rebuilt with {} items", cart.total_items);
        }
    }
    Ok(())
}

fn print_order(order: &Order) {
    println!("{} [{}]", order.order_number, order.id);
    for item in &order.items {
        println!(
            "{:>3} x {:<30} {:>10}",
            item.quantity, item.product_name, item.price
        );
    }
    println!("---");
    println!("total: {} ({})", order.total_amount, order.payment_method);
    if let Some(tracking) = &order.tracking_number {
        println!("tracking: {tracking}");
    }

    let timeline = order.timeline();
    if timeline.cancelled {
        println!("status: CANCELLED");
        return;
    }
    let rendered: Vec<String> = timeline
        .steps
        .iter()
        .map(|step| {
            if step.reached {
                format!("[{}]", step.status)
            } else {
                format!(" {} ", step.status)
            }
        })
        .collect();
    println!("status: {}", rendered.join(" -> "));
}
