use thiserror::Error;

/// Failures while fetching or decoding a single asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("fetch failed: {0}")]
    Fetch(String),
    #[error("glTF decode failed: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("image decode failed: {0}")]
    Image(#[from] image::ImageError),
    #[error("model contains no triangle meshes")]
    EmptyModel,
}

/// Top-level outcomes the page reacts to.
#[derive(Debug, Error)]
pub enum SceneError {
    /// No usable rendering surface; the static fallback is shown instead.
    #[error("WebGPU is not available")]
    CapabilityUnavailable,
    /// Logged only; the page stays in its loading state.
    #[error("failed to load {url}: {source}")]
    AssetLoad {
        url: String,
        #[source]
        source: AssetError,
    },
}

impl SceneError {
    pub fn asset(url: impl Into<String>, source: AssetError) -> Self {
        SceneError::AssetLoad {
            url: url.into(),
            source,
        }
    }
}
