//! CLI command implementations.

use std::path::PathBuf;
use std::sync::Arc;

use color_eyre::eyre::{eyre, Result};

use mathscribe_core::SolveRequest;
use mathscribe_ocr::{Engine, EngineConfig, Recognizer};
use mathscribe_server::{Server, ServerConfig};

/// Builds and loads the recognition engine for the given model string.
async fn load_engine(model: Option<String>) -> Result<Engine> {
    let model = model.ok_or_else(|| {
        eyre!("Model is required. Use --model <model> or `mathscribe config set-model`")
    })?;

    let config = EngineConfig::builder()
        .model(&model)
        .build()
        .map_err(|e| eyre!("Failed to configure engine: {}", e))?;

    Ok(Engine::new(config).await?)
}

/// Start the HTTP server.
pub async fn serve(host: String, port: u16, model: Option<String>) -> Result<()> {
    let engine = load_engine(model).await?;
    tracing::info!(model = %engine.metadata().id, "Model loaded");

    let addr = format!("{host}:{port}").parse()?;
    let config = ServerConfig::builder().addr(addr).build();

    let server = Server::new(config, Arc::new(engine));
    server.run().await?;

    Ok(())
}

/// Recognize the expression in a single image file.
pub async fn recognize(image: PathBuf, model: Option<String>) -> Result<()> {
    let engine = load_engine(model).await?;

    let bytes = std::fs::read(&image)
        .map_err(|e| eyre!("Failed to read {}: {}", image.display(), e))?;
    let latex = engine.recognize(&bytes)?;

    println!("{latex}");
    Ok(())
}

/// Solve an equation and print the response bundle as JSON.
pub fn solve(equation: String, variable: Option<String>) -> Result<()> {
    let request = SolveRequest { equation, variable };
    let response = mathscribe_server::solve_equation(&request)?;

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// Display version and build info.
pub fn version() {
    println!("mathscribe {}", env!("CARGO_PKG_VERSION"));
}
