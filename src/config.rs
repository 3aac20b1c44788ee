use std::env;
use std::path::Path;

use thiserror::Error;
use validator::{Validate, ValidationErrors};

/// Path prefix under which stored product images are served.
pub const IMAGE_ROUTE: &str = "/image/products";

const DEFAULT_IMAGE_BASE_URL: &str = "http://localhost:8080";
const DEFAULT_IMAGE_UPLOAD_DIR: &str = "./uploads/products";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid image configuration: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Where uploaded product images are written and how their URLs are built.
#[derive(Debug, Clone, Validate)]
pub struct ImageConfig {
    /// Public address prepended to [`IMAGE_ROUTE`] when building image URLs.
    #[validate(url)]
    pub base_url: String,
    /// Directory uploaded files are copied into.
    #[validate(length(min = 1))]
    pub upload_dir: String,
}

impl ImageConfig {
    pub fn new(base_url: impl Into<String>, upload_dir: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            upload_dir: upload_dir.into(),
        }
    }

    /// Read `IMAGE_BASE_URL` and `IMAGE_UPLOAD_DIR`, falling back to local defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url =
            env::var("IMAGE_BASE_URL").unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string());
        let upload_dir =
            env::var("IMAGE_UPLOAD_DIR").unwrap_or_else(|_| DEFAULT_IMAGE_UPLOAD_DIR.to_string());

        let config = Self::new(base_url, upload_dir);
        config.validate()?;
        Ok(config)
    }

    /// Externally servable URL of a stored image file.
    pub fn image_url(&self, filename: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url.trim_end_matches('/'),
            IMAGE_ROUTE,
            filename
        )
    }

    pub fn upload_path(&self) -> &Path {
        Path::new(&self.upload_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_url_joins_base_route_and_filename() {
        let config = ImageConfig::new("https://shop.example.com/", "/tmp");
        assert_eq!(
            config.image_url("1700000000000_2_shoe.png"),
            "https://shop.example.com/image/products/1700000000000_2_shoe.png"
        );
    }

    #[test]
    fn validation_rejects_bad_base_url_and_empty_dir() {
        assert!(ImageConfig::new("http://localhost:3000", "uploads").validate().is_ok());
        assert!(ImageConfig::new("not a url", "uploads").validate().is_err());
        assert!(ImageConfig::new("http://localhost:3000", "").validate().is_err());
    }
}
