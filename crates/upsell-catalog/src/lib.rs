pub mod error;
pub mod normalize;
pub mod snapshot;
pub mod types;

pub use error::CatalogError;
pub use normalize::{normalize_catalog, CatalogLimits};
pub use snapshot::{load_catalog, load_catalog_or_empty, parse_catalog_snapshot};
pub use types::{CatalogSnapshot, ProductNode, ProductsQueryResponse, VariantNode};
