pub mod constants;
pub mod error;
pub mod io;
pub mod memory;
pub mod replacement;
pub mod segment;
pub mod shell;
pub mod stats;
pub mod translation;
pub mod vm_manager;

// Re-export commonly used items for convenience
pub use error::{AccessError, ConfigError};
pub use replacement::{PolicyKind, ReplacementPolicy};
pub use stats::Stats;
pub use translation::{LogicalAddress, ToOutput, Translation, TranslationResult};
pub use vm_manager::{ManagerConfig, VMManager};
