//! Companion - personalized prompts for a slide presentation
//!
//! A learner records who they are once (intake), walks through the deck,
//! collects prompts attached to slides and writes notes. At any point the
//! collection can be exported as a Markdown document that instructs an AI
//! tutor how to work through it with them.
//!
//! # Architecture
//!
//! ```text
//! template    raw prompt + profile ──► resolved text
//! collection  (slide, label) ──► ordered, idempotent set of collected prompts
//! export      config + profile + collection + notes ──► Markdown document
//! session     navigation, activation, notes; writes through to storage
//! ```
//!
//! # Example
//!
//! ```ignore
//! use companion::{presentation::Resources, session::Session, storage::FileStore};
//!
//! let resources = Resources::load("site")?;
//! let mut session = Session::open(resources, FileStore::open(".companion")?)?;
//! session.go_to(3)?;
//! let activation = session.activate(3, "Why does this matter?")?;
//! let export = session.export(chrono::Local::now().date_naive());
//! ```

pub mod cli;
pub mod clipboard;
pub mod collection;
pub mod config;
pub mod domain;
pub mod error;
pub mod export;
pub mod presentation;
pub mod session;
pub mod storage;
pub mod template;

pub use collection::PromptCollection;
pub use domain::{CollectedPrompt, CustomNotes, Hotspot, LearnerProfile, PromptDefinition, PromptKind};
pub use error::{CompanionError, Result};
pub use presentation::{PresentationConfig, Resources};
pub use session::{Activation, Direction, NavEntry, NavOutcome, Session, SlideView};
pub use template::resolve;
