//! Session orchestration: intake, navigation, collection, notes and export

mod controller;
mod intake;
mod navigation;

pub use controller::{Activation, MASTER_MARKER, ResolvedPrompt, Session, SlideView};
pub use intake::{load_intake, save_intake};
pub use navigation::{Direction, NavEntry, NavOutcome};
