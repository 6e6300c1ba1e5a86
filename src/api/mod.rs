pub mod catalog;
pub mod lines;
pub mod resolve;
pub mod router;
pub mod volume;

pub use lines::serve_lines;
pub use resolve::UrlResolver;
pub use router::{ApiRequest, ApiResponse, WellnessService, WellnessServiceBuilder};
pub use volume::{VolumeProbe, VolumeReport};
