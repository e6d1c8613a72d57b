pub mod http;
pub mod traits;

pub use http::HttpDestinationClient;
pub use traits::DestinationApi;
