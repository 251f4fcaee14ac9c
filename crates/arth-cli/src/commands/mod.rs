//! Command implementations

use std::path::Path;

use anyhow::Result;

use arth_core::ai::{AiBackend, AiClient};
use arth_core::{fallback_insights, Profile};
use arth_server::ServerConfig;

/// Start the web server
pub async fn cmd_serve(
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
    allow_origin: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting Arth web server...");
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }
    if !allow_origin.is_empty() {
        println!("   CORS origins: {}", allow_origin.join(", "));
    }

    let config = ServerConfig {
        allowed_origins: allow_origin,
    };

    let static_dir = static_dir.map(|p| p.to_string_lossy().into_owned());
    arth_server::serve(host, port, static_dir.as_deref(), config).await
}

/// Print the bundled user profile as JSON
pub fn cmd_profile() -> Result<()> {
    let profile = Profile::sample();
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}

/// Generate insight cards once and print them
///
/// Mirrors the serving path: service or parse failures degrade to the
/// fixed fallback set rather than aborting.
pub async fn cmd_insights() -> Result<()> {
    let profile = Profile::sample();

    let insights = match AiClient::from_env() {
        Some(ai) => match ai.generate_insights(&profile).await {
            Ok(insights) => {
                println!("✅ Generated {} insights via {}", insights.len(), ai.model());
                insights
            }
            Err(e) => {
                println!("⚠️  Insight generation failed ({}), showing fallback", e);
                fallback_insights()
            }
        },
        None => {
            println!("ℹ️  AI backend not configured (set GEMINI_API_KEY), showing fallback");
            fallback_insights()
        }
    };

    println!("{}", serde_json::to_string_pretty(&insights)?);
    Ok(())
}

/// Check AI backend configuration and reachability
pub async fn cmd_doctor() -> Result<()> {
    println!("Arth doctor");
    println!();

    match AiClient::from_env() {
        Some(client) => {
            println!("   AI backend: {} (model: {})", client.host(), client.model());
            if client.health_check().await {
                println!("   ✅ Backend responding");
            } else {
                println!("   ⚠️  Backend not responding - requests will serve fallback insights");
            }
        }
        None => {
            println!("   ℹ️  AI backend not configured");
            println!("      Set GEMINI_API_KEY (or API_KEY) to enable generated insights.");
            println!("      Requests will serve the fixed fallback set until then.");
        }
    }

    Ok(())
}
