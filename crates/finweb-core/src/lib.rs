//! Core of the finweb dependent select
//!
//! Modules:
//! - types: option, parent selection, load state and severity
//! - error: load error taxonomy and error logging
//! - control: select control seam and the in-memory control
//! - notify: notification seam
//! - source: option source seam and response decoding
//! - loader: `DependentSelectLoader`

pub mod control;
pub mod error;
pub mod loader;
pub mod notify;
pub mod source;
pub mod types;

pub use control::{MemorySelect, RenderedOption, SelectControl, SelectTarget};
pub use error::{DefaultErrorLogger, ErrorContext, ErrorLogger, LoadError, LoadResult};
pub use loader::{DependentSelectLoader, LoadOutcome};
pub use notify::{LogNotifier, Notifier};
pub use source::{parse_options, OptionSource};
pub use types::{LoadState, OptionId, ParentSelection, SelectOption, Severity};

pub use finweb_config::RacePolicy;
