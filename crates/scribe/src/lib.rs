//! Scribe: interaction recorder core
//!
//! Scribe observes user interactions with a rendered UI, turns each one into
//! a readable Testing Library locator, folds redundant events together and
//! compiles the result into test code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────┐   ┌────────────┐   ┌──────────────┐   ┌─────────┐   ┌──────────┐
//! │ RawEvent │──►│ classify   │──►│ synthesize   │──►│ reducer │──►│ compiler │
//! │ (DOM)    │   │ (semantic) │   │ (locator)    │   │ (log)   │   │ (code)   │
//! └──────────┘   └────────────┘   └──────────────┘   └─────────┘   └──────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use scribe::{compile, CompileOptions, InteractionEvent, InteractionLog, LogEntry};
//! use scribe::{Locator, Query};
//!
//! let log: InteractionLog = vec![LogEntry::new(
//!     Locator::single(Query::role_named("button", "Submit")),
//!     InteractionEvent::Click,
//! )]
//! .into_iter()
//! .collect();
//!
//! let code = compile(&log, &CompileOptions::default());
//! assert_eq!(
//!     code.body()[2].text,
//!     "\tawait userEvent.click(await canvas.findByRole('button', { name: 'Submit' }));"
//! );
//! ```

#![warn(missing_docs)]

pub mod assertion;
pub mod classify;
pub mod compiler;
pub mod config;
pub mod css_path;
pub mod dom;
pub mod element;
pub mod event;
pub mod format;
pub mod locator;
pub mod naming;
pub mod reducer;
mod result;
pub mod session;
pub mod synthesize;

pub use assertion::{applicable_assertions, assertion_for, ApplicableAssertion, AssertionKind};
pub use classify::classify;
pub use compiler::{
    compile, locator_expression, CodeLine, CompileOptions, Dialect, GeneratedCode, Warning,
};
pub use config::RecorderConfig;
pub use css_path::{CssPathError, CssPathFinder};
pub use event::{InteractionEvent, InteractionLog, Key, LogEntry, RawEvent, RawEventKind};
pub use format::{format_arguments, format_literal, quote_string, Literal};
pub use locator::{Locator, Query, Scope, Strategy, TextMatch};
pub use naming::{render_code, story_export_name, story_name_from_export};
pub use reducer::reduce;
pub use result::{RecorderError, RecorderResult};
pub use session::RecordingSession;
pub use synthesize::LocatorSynthesizer;
