//! ChefMate
//!
//! An MCP server for recipe browsing, quantity scaling, and guided cooking.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

mod build_info;
mod config;
mod cooking;
mod mcp;
mod models;
mod scaling;
mod store;
mod tools;

use config::AppConfig;
use mcp::ChefMateService;
use store::RecipeStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (output to stderr to not interfere with MCP stdio)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("chefmate=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // Print startup banner to stderr
    build_info::print_startup_banner();
    eprintln!("Starting MCP server on stdio...");

    // Build configuration (paths come from the environment or defaults)
    let config = AppConfig::from_env();
    eprintln!("Catalog path: {}", config.catalog_path.display());
    eprintln!("State path: {}", config.state_path.display());

    // Load the catalog and user state
    eprintln!("Loading recipe store...");
    let recipe_store = RecipeStore::open(&config)?;
    eprintln!("Loaded {} recipes", recipe_store.count());

    // Create the ChefMate service
    let service = ChefMateService::new(&config, recipe_store);

    // Create stdio transport
    let transport = (stdin(), stdout());

    // Start the MCP server
    let server = service.serve(transport).await?;

    // Wait for the server to complete
    server.waiting().await?;

    Ok(())
}
