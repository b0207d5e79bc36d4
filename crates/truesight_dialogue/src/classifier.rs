//! Intent classification.
//!
//! Picks a fresh [`Context`] for a question when there is no usable context
//! to continue. Rules are tried in a fixed order and the first match wins.

use std::sync::Arc;

use tracing::debug;
use truesight_foundation::{Error, ErrorContext, Result};
use truesight_parser::{Cue, ParsedQuestion};
use truesight_store::UltimateLookup;

use crate::context::{Aspect, Context, Direction, direction_of};

/// Maps a question to the context that should answer it.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Creates a classifier.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Classifies a question.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::DoNotUnderstand`](truesight_foundation::ErrorKind::DoNotUnderstand)
    /// when no rule matches.
    pub fn classify(&self, question: &ParsedQuestion<'_>) -> Result<Context> {
        let context = Self::rule(question).ok_or_else(|| {
            Error::do_not_understand().with_context(
                ErrorContext::new()
                    .with_source("classifier")
                    .with_question(question.text()),
            )
        })?;
        debug!(%context, question = %question.text(), "classified question");
        Ok(context)
    }

    fn rule(question: &ParsedQuestion<'_>) -> Option<Context> {
        // 1. Nothing said
        if question.is_empty() {
            return Some(Context::Introduction);
        }

        let characters = question.characters();
        let abilities = question.abilities();

        // 2. One ability and a detail keyword
        if let [ability] = abilities {
            if let Some(aspect) = Aspect::asked_in(question) {
                return Some(Context::AbilityDetail {
                    ability: Arc::clone(ability),
                    aspect,
                });
            }
        }

        if let [hero] = characters {
            // 3. One hero and an advantage keyword
            if question.has_cue(Cue::Advantage) {
                let character = Arc::clone(hero);
                return Some(match direction_of(question, hero) {
                    Some(Direction::Subject) => Context::Strengths { subject: character },
                    _ => Context::Counters { enemy: character },
                });
            }

            // 4. One hero and a hero-scoped keyword
            if question.has_cue(Cue::Ultimate) {
                let character = Arc::clone(hero);
                return Some(match question.store().ultimate(&hero.name) {
                    UltimateLookup::Multiple(_) => Context::MultipleUltimates { character },
                    _ => Context::AbilityUltimate { character },
                });
            }
            if question.has_cue(Cue::AbilityList) {
                return Some(Context::AbilityList {
                    character: Arc::clone(hero),
                });
            }
            if question.has_cue(Cue::Hotkey) {
                return Some(Context::AbilityHotkey {
                    character: Arc::clone(hero),
                });
            }
        }

        // 5. Two heroes
        if let [_, enemy] = characters {
            return Some(Context::TwoHeroAdvantage {
                enemy: Arc::clone(enemy),
            });
        }

        // 6. One ability
        if let [ability] = abilities {
            return Some(Context::AbilityDescription {
                ability: Arc::clone(ability),
            });
        }

        // 7. One hero
        if let [hero] = characters {
            return Some(Context::Counters {
                enemy: Arc::clone(hero),
            });
        }

        // 8. Help
        if question.has_cue(Cue::Help) {
            return Some(Context::Description);
        }

        // 9. Feedback
        if question.has_cue(Cue::Feedback) {
            return Some(Context::Feedback);
        }

        None
    }
}
