pub mod company_domain;
pub mod contact;
pub mod enrichment_request;
pub mod lenient;
pub mod organization;

pub use company_domain::*;
pub use contact::*;
pub use enrichment_request::*;
pub use organization::*;
