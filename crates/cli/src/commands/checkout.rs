//! Checkout command.

use clap::Args;

use feira_storefront::checkout::{self, ShippingDetails};
use feira_storefront::error::Result;
use feira_storefront::state::AppState;

/// Shipping details collected on the command line.
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Contact email
    #[arg(long)]
    pub email: String,

    /// Phone / WhatsApp number
    #[arg(long)]
    pub phone: String,

    /// Street address
    #[arg(long)]
    pub address: String,

    /// City
    #[arg(long)]
    pub city: String,

    /// Two-letter state code
    #[arg(long)]
    pub state: String,

    /// Postal code
    #[arg(long = "zip")]
    pub zip_code: String,
}

/// Validate the details and place a (simulated) order for the cart.
///
/// # Errors
///
/// Returns the checkout error for an empty cart or invalid details, or the
/// cart error if the cart cannot be cleared.
pub fn run(state: &AppState, args: CheckoutArgs) -> Result<()> {
    let details = ShippingDetails {
        name: args.name,
        email: args.email,
        phone: args.phone,
        address: args.address,
        city: args.city,
        state: args.state,
        zip_code: args.zip_code,
    };

    let order = checkout::place_order(state.cart(), details)?;
    let currency = state.config().currency;

    println!("Order {} placed successfully!", order.id);
    for item in &order.items {
        println!(
            "  {:<36} x{:<4} {:>12}",
            item.name,
            item.quantity,
            currency.format(item.line_total())
        );
    }
    println!("  Total: {}", currency.format(order.total));
    println!(
        "We will contact you at {} to arrange payment and delivery.",
        order.contact
    );
    Ok(())
}
