pub mod collector;
pub mod cookies;
pub mod crew;
pub mod discovery;
pub mod extractor;
pub mod persist;
pub mod renderer;
pub mod site;
pub mod summary;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use collector::{Collector, CollectorConfig};
pub use crew::{Crew, CrewError, CrewReport};
pub use renderer::{BrowserlessRenderer, PageRenderer, RenderRequest};
pub use site::Site;
