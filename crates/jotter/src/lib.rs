//! `jotter` - markdown notes with a mock subscription checkout
//!
//! Two independent components make up the core:
//!
//! - [`NoteStore`] owns a collection of markdown notes, supports creating,
//!   editing, deleting and searching them, and persists the collection
//!   through a [`KeyValueStore`].
//! - [`Checkout`] holds plan selection and payment form state, masks and
//!   validates input, and simulates a payment.
//!
//! Around them sit a relative timestamp formatter, a markdown preview
//! renderer, configuration and logging for the `jot` binary.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod checkout;
pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod note;
pub mod notebook;
pub mod storage;
pub mod time;

pub use checkout::{Checkout, CheckoutStatus, Field, FieldErrors, Plan, SubmitOutcome};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use markdown::{CommonMarkRenderer, MarkdownRenderer};
pub use note::Note;
pub use notebook::NoteStore;
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use time::format_relative;
