//! Storefront server
//!
//! Serves the catalog, checkout and admin API. Configuration comes from the
//! YAML file given as the first argument (optional) and `CACAMBA_*`
//! environment variables.
//!
//! ```text
//! CACAMBA_PIX_KEY=suachavepix@email.com CACAMBA_ADMIN_PASSWORD=admin \
//!     cargo run --example storefront -- demos/storefront/store.yaml
//! ```

use cacamba::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = StoreConfig::load(path.as_deref())?;

    println!("🚀 Caçamba Store on http://{}", config.server.bind);
    println!("\n  🛒 Storefront:");
    println!("    GET    /products                 - List products");
    println!("    GET    /products/{{id}}            - Get a product");
    println!("    POST   /checkout/quote           - Price a product and quantity");
    println!("    POST   /checkout/pix             - Generate a PIX charge");
    println!("\n  🔐 Admin:");
    println!("    POST   /admin/login              - Open a session");
    println!("    POST   /admin/logout             - Close a session");
    println!("    GET    /admin/products           - List custom products");
    println!("    POST   /admin/products           - Add a custom product");
    println!("    DELETE /admin/products/{{id}}      - Deactivate a custom product");
    println!();

    ServerBuilder::new().with_config(config).serve().await
}
