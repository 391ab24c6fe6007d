pub mod contentful;
pub mod images;
pub mod local;

pub use contentful::ContentfulProvider;
pub use images::HttpImageLoader;
pub use local::LocalProvider;
