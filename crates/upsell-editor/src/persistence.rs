//! Where the offer list is stored between editing sessions.
//!
//! The stored value is the JSON text produced by
//! [`upsell_core::encode_offers`]. Providers validate a payload before
//! replacing what they hold, so a rejected save never clobbers the last good
//! list.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;
use upsell_core::{decode_offers, encode_offers, OfferRecord};

use crate::error::{GatewayError, SaveError};

/// A persistence provider for the serialized offer list.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    /// Replaces the stored payload with `payload`.
    async fn save(&self, payload: String) -> Result<(), GatewayError>;

    /// Returns the stored payload, or `None` if nothing was ever saved.
    async fn load(&self) -> Result<Option<String>, GatewayError>;
}

/// Keeps the payload in memory. Used by tests and as a scratch store.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    payload: RwLock<Option<String>>,
}

impl InMemoryGateway {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_payload(payload: impl Into<String>) -> Self {
        Self {
            payload: RwLock::new(Some(payload.into())),
        }
    }

    /// The payload currently held.
    pub async fn stored(&self) -> Option<String> {
        self.payload.read().await.clone()
    }
}

#[async_trait]
impl PersistenceGateway for InMemoryGateway {
    async fn save(&self, payload: String) -> Result<(), GatewayError> {
        decode_offers(&payload).map_err(GatewayError::MalformedPayload)?;
        *self.payload.write().await = Some(payload);
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, GatewayError> {
        Ok(self.stored().await)
    }
}

/// Stores the payload as a JSON file on disk.
///
/// Each save writes its own uniquely named temp file next to the target and
/// renames it into place, so readers see either the old list or a complete
/// new one and concurrent saves never share a temp file.
#[derive(Debug, Clone)]
pub struct JsonFileGateway {
    path: PathBuf,
}

impl JsonFileGateway {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> GatewayError {
        GatewayError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    // Removed on drop if anything below fails.
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl PersistenceGateway for JsonFileGateway {
    async fn save(&self, payload: String) -> Result<(), GatewayError> {
        decode_offers(&payload).map_err(GatewayError::MalformedPayload)?;

        let bytes = payload.len();
        let path = self.path.clone();
        let written =
            tokio::task::spawn_blocking(move || write_atomically(&path, payload.as_bytes()))
                .await
                .map_err(|e| self.io_error(std::io::Error::other(e)))?;
        written.map_err(|e| self.io_error(e))?;

        tracing::debug!(path = %self.path.display(), bytes, "offer list written");
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>, GatewayError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// Loads the stored offer list for editing.
///
/// Never fails and never returns an empty list: a missing, unreadable or
/// malformed payload is logged and replaced by a single blank offer.
pub async fn load_offers<G>(gateway: &G) -> Vec<OfferRecord>
where
    G: PersistenceGateway + ?Sized,
{
    let offers = match gateway.load().await {
        Ok(Some(payload)) => decode_offers(&payload).unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                "stored offer list is malformed; starting from a blank offer"
            );
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            tracing::warn!(
                error = %e,
                "failed to read stored offer list; starting from a blank offer"
            );
            Vec::new()
        }
    };

    if offers.is_empty() {
        vec![OfferRecord::blank()]
    } else {
        offers
    }
}

/// Serializes `offers` and hands the payload to `gateway`.
///
/// # Errors
///
/// [`SaveError::Serialization`] if encoding fails, [`SaveError::Provider`]
/// if the provider rejects or cannot store the payload.
pub async fn save_offers<G>(gateway: &G, offers: &[OfferRecord]) -> Result<(), SaveError>
where
    G: PersistenceGateway + ?Sized,
{
    let payload = encode_offers(offers)?;
    gateway.save(payload).await?;
    Ok(())
}
