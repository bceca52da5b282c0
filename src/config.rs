//! Resolves CLI arguments into the immutable server configuration.

use std::net::SocketAddr;
use std::path::Path;

use anyhow::{Result, bail};
use axum::http::HeaderValue;
use converter_download::artifact::{ArtifactDescriptor, DEFAULT_PUBLIC_DIR};

use crate::cli::ServeArgs;

/// Everything the server needs, fixed at startup.
#[derive(Debug, Clone)]
pub(crate) struct ServeConfig {
    pub(crate) addr: SocketAddr,
    pub(crate) artifact: ArtifactDescriptor,
}

impl ServeConfig {
    /// Builds and validates the configuration. Relative artifact paths are
    /// resolved against `base_dir`.
    pub(crate) fn from_args(args: &ServeArgs, base_dir: &Path) -> Result<Self> {
        let name = args.name.trim();
        if name.is_empty() {
            bail!("Invalid value for `name`: must not be empty");
        }
        if name.contains(['/', '\\']) {
            bail!("Invalid value for `name`: {name:?} must be a bare filename");
        }
        if HeaderValue::from_str(&args.media_type).is_err() || args.media_type.trim().is_empty() {
            bail!(
                "Invalid value for `media_type`: {:?} is not a valid header value",
                args.media_type
            );
        }
        if args.port == 0 {
            bail!("Invalid value for `port`: 0. Expected range: 1..=65535");
        }

        let location = match &args.artifact {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base_dir.join(path),
            None => base_dir.join(DEFAULT_PUBLIC_DIR).join(name),
        };

        Ok(Self {
            addr: SocketAddr::new(args.host, args.port),
            artifact: ArtifactDescriptor::new(
                name,
                location,
                args.media_type.clone(),
                args.declared_size,
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn args() -> ServeArgs {
        ServeArgs {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            artifact: None,
            name: "UnitConverter-v2.1.0.apk".to_string(),
            media_type: "application/vnd.android.package-archive".to_string(),
            declared_size: 15_200_000,
        }
    }

    #[test]
    fn test_default_artifact_lives_under_public() {
        let config = ServeConfig::from_args(&args(), Path::new("/srv/site")).unwrap();
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
        assert_eq!(
            config.artifact.location(),
            Path::new("/srv/site/public/UnitConverter-v2.1.0.apk")
        );
        assert_eq!(config.artifact.declared_size(), 15_200_000);
    }

    #[test]
    fn test_relative_artifact_is_resolved_against_base_dir() {
        let mut a = args();
        a.artifact = Some(PathBuf::from("dist/app.apk"));
        let config = ServeConfig::from_args(&a, Path::new("/srv/site")).unwrap();
        assert_eq!(config.artifact.location(), Path::new("/srv/site/dist/app.apk"));
    }

    #[test]
    fn test_absolute_artifact_is_kept() {
        let mut a = args();
        a.artifact = Some(PathBuf::from("/data/app.apk"));
        let config = ServeConfig::from_args(&a, Path::new("/srv/site")).unwrap();
        assert_eq!(config.artifact.location(), Path::new("/data/app.apk"));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let mut a = args();
        a.name = "  ".to_string();
        assert!(ServeConfig::from_args(&a, Path::new("/")).is_err());

        let mut a = args();
        a.name = "../etc/passwd".to_string();
        assert!(ServeConfig::from_args(&a, Path::new("/")).is_err());

        let mut a = args();
        a.media_type = "text/\nplain".to_string();
        let err = ServeConfig::from_args(&a, Path::new("/")).unwrap_err();
        assert!(err.to_string().contains("media_type"), "{err}");

        let mut a = args();
        a.port = 0;
        assert!(ServeConfig::from_args(&a, Path::new("/")).is_err());
    }
}
