pub mod apollo_client;
pub mod csv_export;
pub mod enrichment;

pub use apollo_client::*;
pub use csv_export::*;
pub use enrichment::*;
