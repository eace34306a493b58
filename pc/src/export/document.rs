//! Markdown export document
//!
//! Builds the document a learner hands to an AI tutor: instructions for the
//! tutor, who the learner is, every collected prompt grouped by slide with the
//! learner's notes, and a continuation prompt. Output depends only on the
//! inputs, the date included.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CollectedPrompt, CustomNotes, LearnerProfile};
use crate::presentation::PresentationConfig;

const NAME_NOT_PROVIDED: &str = "Not provided";
const ANONYMOUS_LEARNER: &str = "a learner";

const TUTOR_INSTRUCTIONS: &str = "\
### How this conversation should work:

1. **One question at a time.** Start with the first prompt below (under \"Collected Prompts\"). \
Address it thoroughly \u{2014} explain concepts clearly, use examples relevant to the learner's profession, \
and invite follow-up questions.

2. **Have a real conversation.** After your initial response to each prompt, wait for the learner to ask \
follow-ups, challenge your answer, or say they're satisfied. Do NOT move to the next prompt until the learner \
explicitly says something like \"next question,\" \"move on,\" or \"let's continue.\"

3. **Tailor everything** to the learner's profession and curiosity (described below). Use concrete examples \
from their field. Avoid generic explanations when you can be specific.

4. **At the end of the conversation**, once all prompts have been discussed (or the learner says they're \
done), generate a **Learning Pack** \u{2014} a nicely formatted document that includes:
   - **Top Takeaways**: 5-7 key insights from the entire conversation
   - **Things to Note**: Important nuances, caveats, or counterarguments that came up
   - **Further Reading**: 5-10 specific books, papers, articles, or resources to explore next
   - **Conversation Summary**: A concise narrative summary of everything discussed, organized by topic

Format the Learning Pack clearly with headers and bullet points so the learner can save it as a reference \
document.

";

/// Prompts and title for one slide section
#[derive(Debug, Clone, PartialEq, Eq)]
struct SlideGroup<'a> {
    title: &'a str,
    prompts: Vec<&'a CollectedPrompt>,
}

/// Group collected prompts by slide and fold in notes-only slides.
///
/// Slides with prompts keep the title captured at collection; notes-only
/// slides take their title from the deck configuration.
fn group_by_slide<'a>(
    config: &'a PresentationConfig,
    collected: &'a [CollectedPrompt],
    notes: &CustomNotes,
) -> BTreeMap<u32, SlideGroup<'a>> {
    let mut grouped: BTreeMap<u32, SlideGroup<'a>> = BTreeMap::new();

    for prompt in collected {
        grouped
            .entry(prompt.slide)
            .or_insert_with(|| SlideGroup {
                title: &prompt.title,
                prompts: Vec::new(),
            })
            .prompts
            .push(prompt);
    }

    for slide in notes.slides() {
        grouped.entry(slide).or_insert_with(|| SlideGroup {
            title: config.slide_title(slide).unwrap_or_default(),
            prompts: Vec::new(),
        });
    }

    grouped
}

/// Generate the export document.
///
/// Returns `None` when there is nothing to export: no collected prompts and
/// no notes.
pub fn generate(
    config: &PresentationConfig,
    profile: &LearnerProfile,
    collected: &[CollectedPrompt],
    notes: &CustomNotes,
    date: NaiveDate,
) -> Option<String> {
    if collected.is_empty() && notes.is_empty() {
        return None;
    }

    let grouped = group_by_slide(config, collected, notes);
    let topics_explored = grouped.values().map(|g| g.title).collect::<Vec<_>>().join(", ");
    let title = &config.title;

    let mut md = String::new();

    md.push_str(&format!("# {} \u{2014} {}\n\n---\n\n", title, config.md_export.header));

    md.push_str("## INSTRUCTIONS FOR THE AI TUTOR\n\n");
    md.push_str("**Please read these instructions carefully before proceeding.**\n\n");
    md.push_str(&format!(
        "You are acting as a **personalized tutor** for the learner described below. They attended a lecture on \
         {} and collected a set of prompts based on topics that caught their interest. Your role is to help them \
         explore these topics deeply, at their own pace.\n\n",
        title
    ));
    md.push_str(
        "**Before you begin**, check whether the learner has also uploaded the original slide deck alongside this \
         document. If they have, use the slide content to provide richer, more specific responses \u{2014} reference \
         specific charts, diagrams, and data points when answering each prompt. If they have NOT uploaded the \
         slides, gently let them know that uploading them will significantly improve the conversation, and ask if \
         they'd like to add them before you start.\n\n",
    );
    md.push_str(TUTOR_INSTRUCTIONS);
    md.push_str("---\n\n");

    md.push_str("## About the Learner\n");
    md.push_str(&format!(
        "- **Name**: {}\n",
        profile.display_name().unwrap_or(NAME_NOT_PROVIDED)
    ));
    md.push_str(&format!("- **Role/Profession**: {}\n", profile.profession));
    md.push_str(&format!("- **Curiosity**: {}\n", profile.curiosity));
    md.push_str(&format!("- **Date**: {}\n\n", date.format("%B %-d, %Y")));
    md.push_str("---\n\n");

    md.push_str("## Collected Prompts\n\n");
    md.push_str(
        "The learner clicked on these prompts during the presentation. Handle them **one at a time**, in order.\n\n",
    );

    for (index, (slide, group)) in grouped.iter().enumerate() {
        md.push_str(&format!("### {}. Slide {}: {}\n\n", index + 1, slide, group.title));
        for prompt in &group.prompts {
            md.push_str(&format!("**{}**\n\n{}\n\n", prompt.label, prompt.prompt));
        }
        if let Some(note) = notes.get(*slide) {
            md.push_str(&format!("**Your Notes**\n\n{}\n\n", note));
        }
        md.push_str("---\n\n");
    }

    md.push_str("## Continue the Learning Journey\n\n");
    md.push_str("Once you've worked through all the prompts above, use this meta-prompt to continue:\n\n");
    md.push_str(&format!(
        "> I'm {}, a {} who is curious about {}. I just went through {}. During the presentation, I explored these \
         specific topics: {}. Based on what I've shown interest in, continue my learning journey. Go deeper on the \
         areas I explored, connect them to each other, and suggest new angles I might not have considered. Frame \
         everything in terms of my profession and my specific curiosity.\n\n",
        profile.display_name().unwrap_or(ANONYMOUS_LEARNER),
        profile.profession,
        profile.curiosity,
        config.md_export.lecture_description,
        topics_explored
    ));
    md.push_str("---\n\n");

    for line in &config.md_export.footer {
        md.push_str(&format!("*{}*\n", line));
    }

    Some(md)
}
