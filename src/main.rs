use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, Instrument};

use cart_manager::config::CartConfig;
use cart_manager::notify::TracingNotifier;
use cart_manager::{setup_tracing, CartSystem, ProductId, UpdateProductAmount};

/// Inspect and change the locally stored shopping cart.
#[derive(Debug, Parser)]
#[command(name = "cart_manager", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the stored cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Remove a product from the cart
    Remove { product_id: ProductId },
    /// Set the quantity of a product already in the cart
    Update {
        product_id: ProductId,
        #[arg(allow_hyphen_values = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let _ = dotenvy::dotenv();
    setup_tracing();

    let cli = Cli::parse();
    let config = CartConfig::from_env().map_err(|e| e.to_string())?;
    info!(api_url = %config.api_url, storage_dir = %config.storage_dir.display(), "Starting cart manager");

    let system = CartSystem::from_config(&config, Arc::new(TracingNotifier));
    let client = system.cart_client.clone();

    let span = tracing::info_span!("cart_command", command = ?cli.command);
    let result = async {
        match cli.command {
            Command::Show => client.snapshot().await,
            Command::Add { product_id } => client.add_product(product_id).await,
            Command::Remove { product_id } => client.remove_product(product_id).await,
            Command::Update { product_id, amount } => {
                client
                    .update_product_amount(UpdateProductAmount::new(product_id, amount))
                    .await
            }
        }
    }
    .instrument(span)
    .await;
    drop(client);

    let outcome = match result {
        Ok(cart) => {
            info!(items = cart.len(), units = cart.total_units(), "Cart ready");
            serde_json::to_string_pretty(&cart)
                .map(|json| println!("{json}"))
                .map_err(|e| e.to_string())
        }
        Err(e) => {
            error!(error = %e, "Cart command failed");
            Err(e.to_string())
        }
    };

    system.shutdown().await?;
    outcome
}
