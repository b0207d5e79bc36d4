//! Standard vocabulary for hero questions.
//!
//! Phrases match anywhere in the lowercased question; words must match a whole
//! word. Every table is loaded by [`Vocabulary::standard`](crate::Vocabulary::standard).

use truesight_foundation::Role;

use crate::vocabulary::Cue;

/// Role keywords. A question naming keywords of two different roles has no role.
pub const ROLES: &[(Role, &[&str])] = &[
    (Role::Carry, &["carry", "carries"]),
    (Role::Support, &["support"]),
    (Role::OffLane, &["offlane", "off lane", "off-lane"]),
    (Role::Jungler, &["jungle", "jungling"]),
    (Role::Mid, &["mid"]),
    (Role::Roaming, &["roaming", "roamer", "roam"]),
];

/// Affirmative answers to a yes/no prompt.
pub const YES_WORDS: &[&str] = &["yes", "yep", "yeah", "sure", "ok", "okay"];

/// Negative answers to a yes/no prompt.
pub const NO_WORDS: &[&str] = &["no", "nope", "nah"];

/// Words referring back to whatever the previous answer was about.
pub const BACK_REFERENCES: &[&str] = &["it", "its", "that", "this", "he", "she", "his", "her"];

/// Intent cues as (cue, phrases, whole words).
pub const CUES: &[(Cue, &[&str], &[&str])] = &[
    (Cue::Cooldown, &["cool down", "cooldown"], &["cd"]),
    (
        Cue::SpellImmunity,
        &["spell immunity", "spell immune", "black king", "king bar", "pierce"],
        &["bkb"],
    ),
    (Cue::DamageType, &["damage"], &[]),
    (
        Cue::Advantage,
        &["strong", "against", "counter", "beat"],
        &["vs", "versus"],
    ),
    (Cue::Ultimate, &["ultimate"], &["ult", "ulti"]),
    (Cue::AbilityList, &["abilities", "spells", "skills"], &[]),
    (
        Cue::Help,
        &["what can you do", "what do you do", "who are you"],
        &["help"],
    ),
    (Cue::Feedback, &["feedback", "report a bug"], &[]),
];
