// ABOUTME: Server binary for the Vietnamese fitness and nutrition coach API
// ABOUTME: Loads configuration, initialises logging, and serves the HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # PT Coach Server Binary
//!
//! Starts the coaching API: chat, meal photo analysis, and meal finalisation.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pt_coach_server::{config::ServerConfig, logging, resources::ServerResources, server};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pt-coach-server")]
#[command(about = "PT coach API - Vietnamese fitness and nutrition coaching backed by Gemini")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override bind address
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    logging::init_from_env()?;

    info!("Starting PT coach server");
    info!("{}", config.summary());

    let host = config.host.clone();
    let port = config.http_port;
    let resources = Arc::new(ServerResources::new(config));

    if let Err(e) = server::run(resources, &host, port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}
