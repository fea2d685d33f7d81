use std::{fs, path::Path};

use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
};

pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";

/// The icon that eightbot posts with, loaded once when the server starts.
#[derive(Debug, Clone)]
pub struct EightbotIcon {
    bytes: Bytes,
}

impl EightbotIcon {
    /// Loads the icon at the specified path.
    ///
    /// A missing icon is a configuration error, so this fails rather than letting the server
    /// start without it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to load the eightbot icon at {}.", path.display()))?;
        Ok(Self {
            bytes: Bytes::from(bytes),
        })
    }

    #[cfg(test)]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl IntoResponse for EightbotIcon {
    fn into_response(self) -> Response {
        ([(CONTENT_TYPE, SVG_CONTENT_TYPE)], self.bytes).into_response()
    }
}
