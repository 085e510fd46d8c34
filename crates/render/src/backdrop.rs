/// Solid fallback used when the backdrop texture cannot be loaded.
pub const SKY_BLUE: u32 = 0x87CEEB;

/// Scene background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Background {
    /// A loaded equirectangular texture, by asset path.
    Texture(String),
    Color(u32),
}

#[derive(Debug, thiserror::Error)]
pub enum BackdropError {
    #[error("asset {path} failed to load: {reason}")]
    Load { path: String, reason: String },
    #[error("asset {0} not found")]
    NotFound(String),
}

/// Background to use given the result of loading the backdrop texture.
pub fn resolve_backdrop(loaded: Result<String, BackdropError>) -> Background {
    match loaded {
        Ok(path) => Background::Texture(path),
        Err(err) => {
            tracing::warn!(%err, "backdrop unavailable, using solid color");
            Background::Color(SKY_BLUE)
        }
    }
}

/// Environment model to show, if it loaded. The scene simply goes without one otherwise.
pub fn resolve_environment(loaded: Result<String, BackdropError>) -> Option<String> {
    loaded
        .inspect_err(|err| tracing::warn!(%err, "environment model unavailable"))
        .ok()
}
