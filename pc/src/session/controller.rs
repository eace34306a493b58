//! Session controller
//!
//! Owns everything a learner's session touches: the deck configuration, the
//! prompt definitions, the intake profile, collected prompts, notes and the
//! current slide. State changes are written through to the store as they
//! happen, so reopening a session picks up exactly where it left off.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::intake::load_intake;
use super::navigation::{Direction, NavEntry, NavOutcome};
use crate::collection::PromptCollection;
use crate::domain::{CollectedPrompt, CustomNotes, Hotspot, LearnerProfile, PromptDefinition};
use crate::error::{CompanionError, Result};
use crate::export::{self, ExportArtifact};
use crate::presentation::{PresentationConfig, Resources};
use crate::storage::{self, KeyValueStore, Scope, StorageKeys};
use crate::template;

/// Marker shown for a slide's master prompt
pub const MASTER_MARKER: &str = "\u{2605}";

/// A prompt as the learner sees it on the current slide
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedPrompt {
    /// `★` for the master prompt, 1.. for specialized prompts
    pub marker: String,
    pub label: String,
    /// Template text resolved for this learner
    pub text: String,
    pub hotspot: Option<Hotspot>,
    /// Already in the collection
    pub collected: bool,
}

/// What the current slide shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlideView {
    pub number: u32,
    pub total: u32,
    pub title: String,
    /// Image file for this slide, e.g. `slide-03.png`
    pub image: String,
    pub master: Option<ResolvedPrompt>,
    pub specialized: Vec<ResolvedPrompt>,
    pub note: Option<String>,
}

impl SlideView {
    /// All prompts in display order, master first
    pub fn prompts(&self) -> impl Iterator<Item = &ResolvedPrompt> {
        self.master.iter().chain(self.specialized.iter())
    }
}

/// Outcome of activating a prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Resolved prompt text (what gets copied)
    pub text: String,
    /// False if the prompt was already collected
    pub inserted: bool,
    /// Collection size after the activation
    pub collected_count: usize,
}

/// A learner's companion session
pub struct Session<S: KeyValueStore> {
    config: PresentationConfig,
    prompts: Vec<PromptDefinition>,
    profile: LearnerProfile,
    collection: PromptCollection,
    notes: CustomNotes,
    current_slide: u32,
    keys: StorageKeys,
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session from loaded resources and a store.
    ///
    /// Fails with [`CompanionError::MissingIntake`] if the learner has not
    /// completed intake. Unreadable session state is discarded with a warning.
    pub fn open(resources: Resources, store: S) -> Result<Self> {
        let Resources { config, prompts } = resources;
        let keys = StorageKeys::new(config.storage_prefix.clone());
        let profile = load_intake(&store, &keys)?;

        let collection = storage::load_json::<Vec<CollectedPrompt>, _>(&store, Scope::Session, &keys.collected())
            .unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable collected prompts");
                None
            })
            .map(PromptCollection::from)
            .unwrap_or_default();

        let notes = storage::load_json::<CustomNotes, _>(&store, Scope::Session, &keys.custom_notes())
            .unwrap_or_else(|e| {
                warn!(error = %e, "Discarding unreadable custom notes");
                None
            })
            .unwrap_or_default();

        let current_slide = match store.get(Scope::Session, &keys.current_slide())? {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(n) if config.contains_slide(n) => n,
                _ => {
                    warn!(value = %raw, "Ignoring invalid stored slide position");
                    1
                }
            },
            None => 1,
        };

        info!(
            current_slide,
            collected = collection.len(),
            notes = notes.len(),
            prompts = prompts.len(),
            "Session opened"
        );

        Ok(Self {
            config,
            prompts,
            profile,
            collection,
            notes,
            current_slide,
            keys,
            store,
        })
    }

    pub fn config(&self) -> &PresentationConfig {
        &self.config
    }

    pub fn profile(&self) -> &LearnerProfile {
        &self.profile
    }

    pub fn prompts(&self) -> &[PromptDefinition] {
        &self.prompts
    }

    pub fn collection(&self) -> &PromptCollection {
        &self.collection
    }

    pub fn notes(&self) -> &CustomNotes {
        &self.notes
    }

    pub fn current_slide(&self) -> u32 {
        self.current_slide
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    fn check_slide(&self, slide: u32) -> Result<()> {
        if self.config.contains_slide(slide) {
            Ok(())
        } else {
            Err(CompanionError::SlideOutOfRange {
                slide,
                total: self.config.total_slides,
            })
        }
    }

    /// Jump to a slide. Out-of-range requests are ignored and return false.
    pub fn go_to(&mut self, slide: u32) -> Result<bool> {
        if !self.config.contains_slide(slide) {
            debug!(slide, "Session::go_to: out of range, ignored");
            return Ok(false);
        }
        self.current_slide = slide;
        self.store
            .set(Scope::Session, &self.keys.current_slide(), &slide.to_string())?;
        debug!(slide, "Session::go_to: moved");
        Ok(true)
    }

    /// Step one slide. Stepping off either end leaves the companion instead of clamping.
    pub fn step(&mut self, direction: Direction) -> Result<NavOutcome> {
        match direction {
            Direction::Prev if self.current_slide <= 1 => Ok(NavOutcome::LeaveToIntro),
            Direction::Next if self.current_slide >= self.config.total_slides => Ok(NavOutcome::LeaveToHelp),
            Direction::Prev => {
                self.go_to(self.current_slide - 1)?;
                Ok(NavOutcome::Moved(self.current_slide))
            }
            Direction::Next => {
                self.go_to(self.current_slide + 1)?;
                Ok(NavOutcome::Moved(self.current_slide))
            }
        }
    }

    fn resolve_prompt(&self, def: &PromptDefinition, marker: String) -> ResolvedPrompt {
        ResolvedPrompt {
            marker,
            label: def.label.clone(),
            text: template::resolve(&def.prompt, &self.profile),
            hotspot: def.hotspot,
            collected: self.collection.contains(def.slide, &def.label),
        }
    }

    /// What the current slide shows
    pub fn slide_view(&self) -> SlideView {
        let slide = self.current_slide;
        let on_slide = move || self.prompts.iter().filter(move |p| p.slide == slide);

        let master = on_slide()
            .find(|p| p.is_master())
            .map(|p| self.resolve_prompt(p, MASTER_MARKER.to_string()));
        let specialized = on_slide()
            .filter(|p| !p.is_master())
            .enumerate()
            .map(|(i, p)| self.resolve_prompt(p, (i + 1).to_string()))
            .collect();

        SlideView {
            number: slide,
            total: self.config.total_slides,
            title: self.config.slide_title(slide).unwrap_or_default().to_string(),
            image: format!("slide-{:02}.png", slide),
            master,
            specialized,
            note: self.notes.get(slide).map(str::to_string),
        }
    }

    /// Activate a prompt: resolve it and add it to the collection.
    ///
    /// The collection is persisted only when something was inserted.
    pub fn activate(&mut self, slide: u32, label: &str) -> Result<Activation> {
        self.check_slide(slide)?;

        let def = self
            .prompts
            .iter()
            .find(|p| p.slide == slide && p.label == label)
            .ok_or_else(|| CompanionError::UnknownPrompt {
                slide,
                label: label.to_string(),
            })?;

        let text = template::resolve(&def.prompt, &self.profile);
        let title = self.config.slide_title(slide).unwrap_or_default();
        let record = CollectedPrompt::new(slide, title, label, text.clone());

        let inserted = self.collection.add(record);
        if inserted {
            storage::save_json(
                &mut self.store,
                Scope::Session,
                &self.keys.collected(),
                self.collection.as_slice(),
            )?;
            info!(slide, label, count = self.collection.len(), "Prompt collected");
        }

        Ok(Activation {
            text,
            inserted,
            collected_count: self.collection.len(),
        })
    }

    /// Set or clear a slide's note. Returns true if a note remains.
    ///
    /// Clearing the last note removes the stored notes entirely.
    pub fn set_note(&mut self, slide: u32, text: &str) -> Result<bool> {
        self.check_slide(slide)?;
        let kept = self.notes.set(slide, text);
        if self.notes.is_empty() {
            self.store.remove(Scope::Session, &self.keys.custom_notes())?;
        } else {
            storage::save_json(&mut self.store, Scope::Session, &self.keys.custom_notes(), &self.notes)?;
        }
        debug!(slide, kept, "Session::set_note");
        Ok(kept)
    }

    /// Build the export for `date`, or `None` if there is nothing to export yet
    pub fn export(&self, date: NaiveDate) -> Option<ExportArtifact> {
        let body = export::generate(
            &self.config,
            &self.profile,
            self.collection.as_slice(),
            &self.notes,
            date,
        )?;
        Some(ExportArtifact {
            filename: export::export_filename(&self.config.download_prefix, &self.profile),
            body,
        })
    }

    /// Navigation menu: every slide in order, section dividers before the slide they introduce
    pub fn nav_menu(&self) -> Vec<NavEntry> {
        let mut entries = Vec::new();
        for number in 1..=self.config.total_slides {
            if let Some(label) = self.config.section_before(number) {
                entries.push(NavEntry::Section {
                    label: label.to_string(),
                });
            }
            entries.push(NavEntry::Slide {
                number,
                title: self.config.slide_title(number).unwrap_or_default().to_string(),
                active: number == self.current_slide,
            });
        }
        entries
    }

    /// End the session: drop collected prompts, notes and slide position.
    /// The intake profile is kept.
    pub fn reset(&mut self) -> Result<()> {
        self.store.clear(Scope::Session)?;
        self.collection.clear();
        self.notes = CustomNotes::new();
        self.current_slide = 1;
        info!("Session reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PromptKind;
    use crate::presentation::Section;
    use crate::session::save_intake;
    use crate::storage::MemoryStore;

    fn resources() -> Resources {
        let config = PresentationConfig {
            title: "Genomics 101".to_string(),
            total_slides: 4,
            slide_titles: vec!["Welcome".into(), "DNA".into(), "RNA".into(), "Wrap-up".into()],
            sections: vec![Section {
                before_slide: 2,
                label: "Basics".to_string(),
            }],
            storage_prefix: "gen".to_string(),
            download_prefix: "genomics".to_string(),
            ..Default::default()
        };
        let prompts = vec![
            PromptDefinition {
                slide: 2,
                kind: PromptKind::Specialized,
                label: "Helix".to_string(),
                prompt: "As a {{profession}}, why a helix?".to_string(),
                hotspot: None,
            },
            PromptDefinition {
                slide: 2,
                kind: PromptKind::Master,
                label: "Big picture".to_string(),
                prompt: "Explain DNA to {{name}}".to_string(),
                hotspot: None,
            },
            PromptDefinition {
                slide: 2,
                kind: PromptKind::Specialized,
                label: "Pairs".to_string(),
                prompt: "Base pairs for {{curiosity}}".to_string(),
                hotspot: None,
            },
        ];
        Resources { config, prompts }
    }

    fn store_with_intake() -> MemoryStore {
        let mut store = MemoryStore::new();
        let profile = LearnerProfile::new(Some("Ada Lovelace".to_string()), "nurse", "genomics");
        save_intake(&mut store, &StorageKeys::new("gen"), &profile).unwrap();
        store
    }

    fn session() -> Session<MemoryStore> {
        Session::open(resources(), store_with_intake()).unwrap()
    }

    #[test]
    fn test_open_without_intake_fails() {
        let err = Session::open(resources(), MemoryStore::new()).err().unwrap();
        assert!(matches!(err, CompanionError::MissingIntake));
    }

    #[test]
    fn test_go_to_range() {
        let mut s = session();
        assert_eq!(s.current_slide(), 1);

        assert!(s.go_to(3).unwrap());
        assert_eq!(s.current_slide(), 3);
        assert_eq!(
            s.store().get(Scope::Session, "gen-current-slide").unwrap().as_deref(),
            Some("3")
        );

        assert!(!s.go_to(0).unwrap());
        assert!(!s.go_to(5).unwrap());
        assert_eq!(s.current_slide(), 3);
    }

    #[test]
    fn test_step_leaves_at_boundaries() {
        let mut s = session();
        assert_eq!(s.step(Direction::Prev).unwrap(), NavOutcome::LeaveToIntro);
        assert_eq!(s.current_slide(), 1);

        assert_eq!(s.step(Direction::Next).unwrap(), NavOutcome::Moved(2));

        s.go_to(4).unwrap();
        assert_eq!(s.step(Direction::Next).unwrap(), NavOutcome::LeaveToHelp);
        assert_eq!(s.current_slide(), 4);
        assert_eq!(s.step(Direction::Prev).unwrap(), NavOutcome::Moved(3));
    }

    #[test]
    fn test_slide_view() {
        let mut s = session();
        s.go_to(2).unwrap();
        s.set_note(2, "check the diagram").unwrap();

        let view = s.slide_view();
        assert_eq!(view.title, "DNA");
        assert_eq!(view.image, "slide-02.png");

        let master = view.master.as_ref().unwrap();
        assert_eq!(master.marker, MASTER_MARKER);
        assert_eq!(master.text, "Explain DNA to Ada Lovelace");

        let markers: Vec<_> = view.specialized.iter().map(|p| (p.marker.as_str(), p.label.as_str())).collect();
        assert_eq!(markers, vec![("1", "Helix"), ("2", "Pairs")]);
        assert_eq!(view.specialized[0].text, "Given what you know about me, why a helix?");
        assert_eq!(view.note.as_deref(), Some("check the diagram"));
        assert_eq!(view.prompts().count(), 3);
    }

    #[test]
    fn test_slide_view_without_prompts() {
        let view = session().slide_view();
        assert!(view.master.is_none());
        assert!(view.specialized.is_empty());
    }

    #[test]
    fn test_activate_idempotent_and_persisted() {
        let mut s = session();

        let first = s.activate(2, "Helix").unwrap();
        assert!(first.inserted);
        assert_eq!(first.collected_count, 1);
        assert_eq!(first.text, "Given what you know about me, why a helix?");

        let second = s.activate(2, "Helix").unwrap();
        assert!(!second.inserted);
        assert_eq!(second.collected_count, 1);

        let stored: Vec<CollectedPrompt> = storage::load_json(s.store(), Scope::Session, "gen-collected")
            .unwrap()
            .unwrap();
        assert_eq!(stored, s.collection().as_slice());
        assert_eq!(stored[0].title, "DNA");

        s.go_to(2).unwrap();
        assert!(s.slide_view().specialized[0].collected);
    }

    #[test]
    fn test_activate_errors() {
        let mut s = session();
        assert!(matches!(
            s.activate(2, "Nope").unwrap_err(),
            CompanionError::UnknownPrompt { slide: 2, .. }
        ));
        assert!(matches!(
            s.activate(9, "Helix").unwrap_err(),
            CompanionError::SlideOutOfRange { slide: 9, total: 4 }
        ));
        assert!(s.collection().is_empty());
    }

    #[test]
    fn test_notes_persisted_and_cleared() {
        let mut s = session();
        assert!(s.set_note(3, "hmm").unwrap());
        assert_eq!(
            s.store().get(Scope::Session, "gen-custom-notes").unwrap().as_deref(),
            Some(r#"{"3":"hmm"}"#)
        );

        assert!(s.set_note(2, "keep").unwrap());
        assert!(!s.set_note(3, "  ").unwrap());
        assert_eq!(
            s.store().get(Scope::Session, "gen-custom-notes").unwrap().as_deref(),
            Some(r#"{"2":"keep"}"#)
        );

        assert!(!s.set_note(2, "").unwrap());
        assert!(s.store().get(Scope::Session, "gen-custom-notes").unwrap().is_none());
        assert!(s.set_note(7, "x").is_err());
    }

    #[test]
    fn test_export() {
        let mut s = session();
        let today = NaiveDate::from_ymd_opt(2026, 10, 15).unwrap();
        assert!(s.export(today).is_none());

        s.set_note(3, "note").unwrap();
        let artifact = s.export(today).unwrap();
        assert_eq!(artifact.filename, "genomics-ada-lovelace.md");
        assert!(artifact.body.contains("Slide 3: RNA"));
    }

    #[test]
    fn test_nav_menu() {
        let mut s = session();
        s.go_to(2).unwrap();

        let menu = s.nav_menu();
        assert_eq!(menu.len(), 5);
        assert_eq!(
            menu[1],
            NavEntry::Section {
                label: "Basics".to_string()
            }
        );
        assert_eq!(
            menu[2],
            NavEntry::Slide {
                number: 2,
                title: "DNA".to_string(),
                active: true
            }
        );
        assert_eq!(menu[0].to_string(), "1. Welcome");
    }

    #[test]
    fn test_reopen_restores_state() {
        let mut s = session();
        s.go_to(3).unwrap();
        s.activate(2, "Pairs").unwrap();
        s.set_note(1, "first").unwrap();

        let reopened = Session::open(resources(), s.into_store()).unwrap();
        assert_eq!(reopened.current_slide(), 3);
        assert!(reopened.collection().contains(2, "Pairs"));
        assert_eq!(reopened.notes().get(1), Some("first"));
    }

    #[test]
    fn test_invalid_stored_slide_falls_back() {
        let mut store = store_with_intake();
        store.set(Scope::Session, "gen-current-slide", "42").unwrap();
        assert_eq!(Session::open(resources(), store).unwrap().current_slide(), 1);

        let mut store = store_with_intake();
        store.set(Scope::Session, "gen-current-slide", "abc").unwrap();
        assert_eq!(Session::open(resources(), store).unwrap().current_slide(), 1);
    }

    #[test]
    fn test_corrupt_collection_discarded() {
        let mut store = store_with_intake();
        store.set(Scope::Session, "gen-collected", "[{").unwrap();
        assert!(Session::open(resources(), store).unwrap().collection().is_empty());
    }

    #[test]
    fn test_reset_keeps_intake() {
        let mut s = session();
        s.go_to(3).unwrap();
        s.activate(2, "Helix").unwrap();
        s.set_note(2, "x").unwrap();

        s.reset().unwrap();
        assert!(s.collection().is_empty());
        assert!(s.notes().is_empty());
        assert_eq!(s.current_slide(), 1);

        let reopened = Session::open(resources(), s.into_store()).unwrap();
        assert!(reopened.collection().is_empty());
        assert_eq!(reopened.profile().profession, "nurse");
    }
}
