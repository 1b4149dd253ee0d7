//! entrylist: Entry List Reconciliation
//!
//! Marks entries on a page according to their membership in user-maintained
//! lists. Lists live in a persistent key/value store per (site, user); one
//! target site has its entries processed while any number of source sites
//! contribute their own lists to each entry's membership.

pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod logging;
pub mod store;

pub use config::{ConfigLoader, EngineConfig, EntryListConfig};
pub use context::{
    by_id, by_name, qualified_name, Context, ContextRole, Decision, EntryHandle, EntryKey,
    EntryLocator, Identity, IdentityLookup, Membership, PageType, ProcessingType,
    RecordedDecision, SourceSite, TargetSite, UserInfo, UserLookup, UserMapping, DEFAULT_LIST,
    DEFAULT_TYPE, NO_USER,
};
pub use engine::{Engine, EntryMarks, EntryState, PassReport, Session, ToggleAction, ToggleOutcome, ToggleWiring};
pub use error::{ApiError, EngineError, RegistrationError, StorageError, ToggleError};
pub use store::{KvListStore, List, ListStore, Lists, MemoryBackend, SledBackend};
