//! An editing session: a store hydrated from a provider, saved back to it.

use std::sync::Arc;

use upsell_core::{encode_offers, Catalog, OfferRecord};

use crate::error::SaveError;
use crate::persistence::{load_offers, PersistenceGateway};
use crate::store::OfferListStore;

/// Proof that a snapshot reached the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    snapshot: Vec<OfferRecord>,
}

impl SaveReceipt {
    /// The offers that were stored.
    #[must_use]
    pub fn offers(&self) -> &[OfferRecord] {
        &self.snapshot
    }
}

/// A serialized snapshot waiting to be sent.
///
/// Detached from the session so the caller can keep editing while the
/// provider call is in flight.
#[derive(Debug)]
pub struct PendingSave<G: ?Sized> {
    gateway: Arc<G>,
    snapshot: Vec<OfferRecord>,
    payload: String,
}

impl<G> PendingSave<G>
where
    G: PersistenceGateway + ?Sized,
{
    /// The JSON text that will be stored.
    #[must_use]
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Sends the payload to the provider.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Provider`] if the provider rejects the payload or
    /// cannot store it.
    pub async fn submit(self) -> Result<SaveReceipt, SaveError> {
        self.gateway.save(self.payload).await?;
        Ok(SaveReceipt {
            snapshot: self.snapshot,
        })
    }
}

pub struct EditorSession<G: ?Sized> {
    store: OfferListStore,
    gateway: Arc<G>,
    /// The offers as last loaded or saved.
    saved: Vec<OfferRecord>,
}

impl<G> EditorSession<G>
where
    G: PersistenceGateway + ?Sized,
{
    /// Loads the stored offers from `gateway` and builds a store over them.
    pub async fn open(catalog: Catalog, gateway: Arc<G>) -> Self {
        let offers = load_offers(gateway.as_ref()).await;
        tracing::info!(
            offers = offers.len(),
            products = catalog.len(),
            "editor session opened"
        );
        let store = OfferListStore::new(catalog, offers);
        let saved = store.offers().to_vec();
        Self {
            store,
            gateway,
            saved,
        }
    }

    #[must_use]
    pub fn store(&self) -> &OfferListStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut OfferListStore {
        &mut self.store
    }

    /// `true` when the offers differ from what was last loaded or saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.store.offers() != self.saved.as_slice()
    }

    /// Snapshots and serializes the current offers.
    ///
    /// # Errors
    ///
    /// Returns [`SaveError::Serialization`] if the offers cannot be encoded.
    pub fn begin_save(&self) -> Result<PendingSave<G>, SaveError> {
        let snapshot = self.store.offers().to_vec();
        let payload = encode_offers(&snapshot)?;
        Ok(PendingSave {
            gateway: Arc::clone(&self.gateway),
            snapshot,
            payload,
        })
    }

    /// Records a completed save. Receipts are applied in the order given.
    pub fn mark_saved(&mut self, receipt: SaveReceipt) {
        self.saved = receipt.snapshot;
    }

    /// Saves the current offers and waits for the provider.
    ///
    /// On failure the edits stay in the store and the session stays dirty.
    ///
    /// # Errors
    ///
    /// Any [`SaveError`] from serializing or storing the offers.
    pub async fn save(&mut self) -> Result<(), SaveError> {
        let pending = self.begin_save()?;
        match pending.submit().await {
            Ok(receipt) => {
                tracing::info!(offers = receipt.offers().len(), "offer list saved");
                self.mark_saved(receipt);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "offer list save failed; edits kept");
                Err(e)
            }
        }
    }
}
