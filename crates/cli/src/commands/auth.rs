//! Session commands: login, register, logout, profile.

use clap::Subcommand;

use saffron_client::Storefront;
use saffron_client::types::{LoginRequest, RegisterRequest};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and log in
    Register {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },
    /// Clear the session
    Logout,
    /// Show the logged-in profile
    Whoami,
}

pub async fn run(
    shop: &mut Storefront,
    action: AuthAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login { email, password } => {
            shop.session
                .login(&LoginRequest { email, password })
                .await?;
            shop.sync().await?;
            if let Some(user) = shop.session.user() {
                println!("logged in as {} <{}>", user.full_name(), user.email);
            }
        }
        AuthAction::Register {
            first_name,
            last_name,
            email,
            password,
        } => {
            shop.session
                .register(&RegisterRequest {
                    first_name,
                    last_name,
                    email,
                    password,
                    phone: None,
                })
                .await?;
            println!("account created");
        }
        AuthAction::Logout => {
            shop.session.logout();
            println!("logged out");
        }
        AuthAction::Whoami => {
            shop.session.fetch_profile().await;
            match shop.session.user() {
                Some(user) => {
                    println!("{} <{}>", user.full_name(), user.email);
                    if shop.session.is_admin() {
                        println!("roles: {:?} (admin console access)", user.roles);
                    }
                    for address in &user.addresses {
                        let default = if address.is_default { " (default)" } else { "" };
                        println!(
                            "  {} {}, {} {}{default}",
                            address.street, address.city, address.state, address.zip_code
                        );
                    }
                }
                None => println!("not logged in"),
            }
        }
    }
    Ok(())
}
