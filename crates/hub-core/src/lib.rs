//! DeskHub sync core
//!
//! Optimistic mutation coordination over the keyed query cache:
//! - Speculative local edits with snapshot/rollback
//! - Invalidation-driven background refetch
//! - Per-key view subscriptions with derived counts
//! - Transient notices on mutation settlement
//!
//! # Example
//!
//! ```rust,ignore
//! use hub_client::{HttpStore, StoreConfig};
//! use hub_core::SyncCore;
//! use hub_model::{Scope, UserId};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(HttpStore::new(&StoreConfig::new())?);
//! let core = SyncCore::new(store);
//! let _worker = core.start_refetch();
//!
//! let user = UserId::new("u1");
//! core.coordinator().hydrate(&user, Scope::All).await?;
//! let view = core.view(&user, Scope::All);
//! println!("{} tasks pending", view.totals().pending);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod coordinator;
pub mod edits;
pub mod notices;
pub mod refetch;
pub mod state;
pub mod sync;
pub mod view;

// Re-exports for convenience
pub use coordinator::{MutationCoordinator, MutationOutcome};
pub use sync::SyncCore;
pub use notices::{Notice, NoticeBus, NoticeLevel};
pub use refetch::RefetchWorker;
pub use state::{MutationPhase, PendingMutation, SettledMutation, Settlement};
pub use view::{CollectionView, TaskTotals};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the sync core
    pub use crate::{
        CollectionView, MutationCoordinator, MutationOutcome, Notice, NoticeBus, NoticeLevel,
        SyncCore, TaskTotals,
    };
    pub use hub_cache::{CacheEntry, QueryCache};
    pub use hub_client::{RemoteStore, StoreConfig, StoreError};
    pub use hub_model::{Category, NewTask, QueryKey, Scope, Task, TaskId, ToggleField, UserId};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
