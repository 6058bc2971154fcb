pub mod error;
pub mod memory;
pub mod params;
pub mod track;
pub mod transport;

pub use error::ProviderError;
pub use memory::{MemoryEngagementStore, MemoryParameterStore};
pub use params::ParameterStore;
pub use track::EngagementStore;
pub use transport::{EmailTransport, SendReceipt};
