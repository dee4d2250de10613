//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod invalidation;
pub mod memory_store;
pub mod postgres_store;
pub mod stream_hub;
pub mod test_dependencies;
pub mod traits;

pub use deps::{
    LoggingEmailSender, ResendEmailSender, ServerDeps, ServiceSettings, SupabaseBlobStorage,
};
pub use invalidation::{View, ViewInvalidator, VIEWS_TOPIC};
pub use memory_store::{MemoryStore, StoreOperation};
pub use postgres_store::PostgresStore;
pub use stream_hub::StreamHub;
pub use test_dependencies::{MockBlobStorage, MockEmailSender, TestDependencies, UploadCall};
pub use traits::*;
