pub mod data_uri;
pub mod hosted;
pub mod traits;
pub mod types;

pub use data_uri::DataUriEncoder;
pub use hosted::HostedImageUploader;
pub use traits::ImageEncoder;
pub use types::{EncodedImage, ImageFile};
