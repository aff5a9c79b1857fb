mod agent;
mod cli;
mod config;
mod errors;
mod llm;
mod models;
mod server;

use agent::ProfileAgent;
use clap::Parser;
use cli::Args;
use dotenv::dotenv;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    info!("--- Core Configuration ---");
    info!("Server Address: {}", args.server_addr);
    info!("Knowledge Base Path: {}", args.knowledge_base_path);
    info!("Profile Name: {}", args.profile_name);
    info!("Chat Model: {}", args.chat_model.as_deref().unwrap_or("(provider default)"));
    info!("Max Tokens: {}", args.max_tokens);
    info!("API Key Configured: {}", !args.anthropic_api_key.is_empty());
    info!("-------------------------");

    let agent = Arc::new(ProfileAgent::new(&args)?);
    let addr = args.server_addr.clone();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent);
    server.run().await?;

    Ok(())
}
