//! Offer-list state engine for the post-purchase settings editor.
//!
//! [`OfferListStore`] owns the offers being edited and the per-offer picker
//! state; [`resolver`] keeps product, variant and rule fields consistent;
//! [`search`] drives the pickers from the catalog; [`EditorSession`] ties a
//! store to a [`PersistenceGateway`] for hydrate and save.

pub mod error;
pub mod persistence;
pub mod resolver;
pub mod search;
pub mod session;
pub mod store;

pub use error::{GatewayError, SaveError, SelectionError, StoreError};
pub use persistence::{
    load_offers, save_offers, InMemoryGateway, JsonFileGateway, PersistenceGateway,
};
pub use resolver::{variant_label, variant_options_for, NO_VARIANT_LABEL};
pub use search::{distinct_categories, filter_products, SelectOption};
pub use session::{EditorSession, PendingSave, SaveReceipt};
pub use store::{FieldName, FieldUpdate, OfferListStore, OfferUpdate, RecordDraft};
