//! Catalog workflow stages
//!
//! - [`listing`]: consent dismissal, "load more" pagination and product link collection
//! - [`product`]: product URL parsing, per-product probing and [`ResultRecord`]
//! - [`url`]: resolving listing hrefs into navigable URLs

pub mod listing;
pub mod product;
pub mod url;

pub use listing::{PaginationState, collect_product_urls, dismiss_consent, load_all_products};
pub use product::{ProductPath, ProductTarget, ResultRecord, plan_targets, probe_product};
pub use url::resolve_href;
