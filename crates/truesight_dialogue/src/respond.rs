//! Response text.
//!
//! Every function here is pure: it formats records it is handed and never
//! queries the store, so the wording can be tested without a knowledge base.

use std::fmt::Write as _;

use rand::Rng;
use rand::seq::SliceRandom;
use truesight_foundation::{Ability, Character, DamageType, Matchup, Role, SpellImmunity};

use crate::context::Aspect;

/// Who the assistant is and what it can do.
pub const DESCRIPTION: &str = "Hi, I'm the Gem of True Sight. You can ask me about Dota hero \
     counters, and abilities, such as their cooldown or whether they are blocked by BKB.";

/// Trademark notice included in the introduction.
pub const TRADEMARKS: &str = "Dota 2 is a registered trademark of Valve Corporation, all Dota 2 \
     content is property of Valve Corporation, this Application is not affiliated with Valve \
     Corporation.";

/// Questions offered as examples.
pub const SAMPLE_QUESTIONS: &[&str] = &[
    "Which mid heroes are good against Meepo?",
    "What is the cooldown of Disruptor's ultimate?",
    "Does Static Storm go through BKB?",
    "What are Dark Willow's abilities?",
    "Is Lion good against Anti-Mage?",
];

/// Prompt opening a fresh start.
pub const ANYTHING_ELSE: &str = "Is there anything else you'd like to know?";

/// Prompt after the user says they have another question.
pub const WHAT_WOULD_YOU_LIKE: &str = "What would you like to know?";

/// Prompt asking for feedback.
pub const FEEDBACK_PROMPT: &str = "Sure, what feedback would you like to leave?";

/// Acknowledgement once feedback is recorded.
pub const FEEDBACK_THANKS: &str = "Thanks, your feedback has been recorded.";

/// Reply when a turn fails internally.
pub const APOLOGY: &str = "Sorry, something went wrong. Please try again.";

/// Reply when the conversation ends.
pub const GOODBYE: &str = "Goodbye";

/// Descriptions longer than this are left out of ultimate and hotkey answers.
const SHORT_DESCRIPTION: usize = 120;

/// Keyboard order used when listing abilities.
const KEYBOARD_ORDER: &[char] = &['Q', 'W', 'E', 'R', 'T', 'Y', 'D', 'F'];

// =============================================================================
// General
// =============================================================================

/// Joins items with commas and a final "and": "A and B", "A, B, and C".
#[must_use]
pub fn list_with_and<S: AsRef<str>>(items: &[S]) -> String {
    match items {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} and {}", first.as_ref(), second.as_ref()),
        [init @ .., last] => {
            let mut out = String::new();
            for item in init {
                out.push_str(item.as_ref());
                out.push_str(", ");
            }
            out.push_str("and ");
            out.push_str(last.as_ref());
            out
        }
    }
}

/// Picks an example question.
#[must_use]
pub fn sample_question<R: Rng>(rng: &mut R) -> String {
    let question = SAMPLE_QUESTIONS
        .choose(rng)
        .copied()
        .unwrap_or("Who counters Anti-Mage?");
    format!("For example, you could ask me '{question}'")
}

/// The greeting for an empty first turn.
#[must_use]
pub fn introduction(sample: &str) -> String {
    format!("{DESCRIPTION} {TRADEMARKS} {WHAT_WOULD_YOU_LIKE} {sample}")
}

/// The answer to "what can you do".
#[must_use]
pub fn description(sample: &str) -> String {
    format!("{DESCRIPTION} {sample}")
}

/// The opening of a fresh start.
#[must_use]
pub fn fresh_start(sample: &str) -> String {
    format!("{ANYTHING_ELSE} {sample}")
}

/// The reply to a question nothing could answer.
#[must_use]
pub fn not_understood(heard: &str) -> String {
    format!("Sorry, I don't understand. I heard you say: {heard}")
}

// =============================================================================
// Abilities
// =============================================================================

fn seconds(cooldown: &[f64]) -> String {
    cooldown
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn short_description(ability: &Ability) -> Option<&str> {
    ability
        .description
        .as_deref()
        .filter(|d| d.chars().count() <= SHORT_DESCRIPTION)
}

fn append_cooldown(mut response: String, ability: &Ability) -> String {
    if ability.is_passive() {
        return response;
    }
    if response.ends_with('.') {
        let _ = write!(response, " Its cooldown is {} seconds", seconds(&ability.cooldown));
    } else {
        let _ = write!(response, ", its cooldown is {} seconds", seconds(&ability.cooldown));
    }
    response
}

fn append_sentence(mut response: String, sentence: Option<&str>) -> String {
    if let Some(sentence) = sentence {
        let _ = write!(response, ". {sentence}");
    }
    response
}

/// "The cooldown of A is …" or the passive variant.
#[must_use]
pub fn cooldown(ability: &Ability) -> String {
    if ability.is_passive() {
        format!("{} is a passive ability, with no cooldown", ability.name)
    } else {
        format!(
            "The cooldown of {} is {} seconds",
            ability.name,
            seconds(&ability.cooldown)
        )
    }
}

/// Whether an ability goes through spell immunity.
#[must_use]
pub fn spell_immunity(ability: &Ability) -> String {
    let Some(kind) = ability.spell_immunity else {
        return format!(
            "I don't know whether {} pierces spell immunity",
            ability.name
        );
    };
    let verdict = match kind {
        SpellImmunity::Pierces => "does pierce spell immunity",
        SpellImmunity::PartiallyPierces => "partially pierces spell immunity",
        SpellImmunity::DoesNotPierce => "does not pierce spell immunity",
    };
    append_sentence(
        format!("{} {verdict}", ability.name),
        ability.spell_immunity_detail.as_deref(),
    )
}

/// The damage type of an ability, mentioning a different upgraded type.
#[must_use]
pub fn damage_type(ability: &Ability) -> String {
    let Some(damage) = ability.damage_type else {
        return format!("{} does not deal damage", ability.name);
    };
    let mut response = format!("{} does {} damage", ability.name, damage.name());
    if let Some(upgraded) = ability
        .upgraded_damage_type
        .filter(|u: &DamageType| *u != damage)
    {
        let _ = write!(
            response,
            ", and with Aghanim's Scepter it does {} damage",
            upgraded.name()
        );
    }
    response
}

/// One aspect of an ability.
#[must_use]
pub fn detail(ability: &Ability, aspect: Aspect) -> String {
    match aspect {
        Aspect::Cooldown => cooldown(ability),
        Aspect::SpellImmunity => spell_immunity(ability),
        Aspect::DamageType => damage_type(ability),
    }
}

/// A general description of an ability.
#[must_use]
pub fn ability_description(ability: &Ability) -> String {
    let response = format!("{}'s ability {}", ability.character, ability.name);
    let response = append_sentence(response, ability.description.as_deref());
    append_cooldown(response, ability)
}

/// Orders abilities along the keyboard, then the rest in their given order.
#[must_use]
pub fn keyboard_order<'a>(abilities: &'a [std::sync::Arc<Ability>]) -> Vec<&'a Ability> {
    let mut ordered: Vec<&Ability> = Vec::with_capacity(abilities.len());
    for key in KEYBOARD_ORDER {
        if let Some(ability) = abilities
            .iter()
            .find(|a| a.hotkey.is_some_and(|k| k.eq_ignore_ascii_case(key)))
        {
            ordered.push(ability);
        }
    }
    for ability in abilities {
        if !ordered.iter().any(|o| std::ptr::eq(*o, &**ability)) {
            ordered.push(ability);
        }
    }
    ordered
}

/// A character's standard abilities.
#[must_use]
pub fn ability_list(character: &Character, abilities: &[std::sync::Arc<Ability>]) -> String {
    if abilities.is_empty() {
        return format!("I don't know any of {}'s abilities", character.name);
    }
    let names: Vec<&str> = keyboard_order(abilities)
        .into_iter()
        .map(|a| a.name.as_str())
        .collect();
    format!("{}'s abilities are {}", character.name, list_with_and(&names))
}

/// A character's single ultimate.
#[must_use]
pub fn ultimate(character: &Character, ability: &Ability) -> String {
    let response = format!("{}'s ultimate is {}", character.name, ability.name);
    let response = append_cooldown(response, ability);
    append_sentence(response, short_description(ability))
}

/// A character without an ultimate.
#[must_use]
pub fn no_ultimate(character: &Character) -> String {
    format!("{} doesn't have an ultimate", character.name)
}

/// A character with several ultimates.
#[must_use]
pub fn multiple_ultimates(character: &Character, abilities: &[std::sync::Arc<Ability>]) -> String {
    let names: Vec<&str> = abilities.iter().map(|a| a.name.as_str()).collect();
    format!(
        "{} has multiple ultimates: {}",
        character.name,
        list_with_and(&names)
    )
}

/// The ability on a character's hotkey.
#[must_use]
pub fn hotkey(character: &Character, ability: &Ability) -> String {
    let key = ability.hotkey.unwrap_or('?');
    let response = format!("{}'s {key} is {}", character.name, ability.name);
    append_sentence(response, short_description(ability))
}

// =============================================================================
// Advantages
// =============================================================================

fn with_verb(names: &[&str]) -> String {
    let verb = if names.len() == 1 { "is" } else { "are" };
    format!("{} {verb}", list_with_and(names))
}

/// Splits sorted matchups into hard counters (all at or above `strong`) and
/// soft counters (the rest of the first `limit`).
fn split_by_strength(matchups: &[Matchup], strong: f64, limit: usize) -> (Vec<&Matchup>, Vec<&Matchup>) {
    let hard = matchups.iter().filter(|m| m.advantage >= strong).collect();
    let soft = matchups
        .iter()
        .take(limit)
        .filter(|m| m.advantage < strong)
        .collect();
    (hard, soft)
}

/// Heroes good against `enemy`, given its non-negative matchups sorted by
/// advantage descending.
#[must_use]
pub fn counters(
    enemy: &Character,
    role: Option<Role>,
    matchups: &[Matchup],
    strong: f64,
    limit: usize,
) -> String {
    let (hard, soft) = split_by_strength(matchups, strong, limit);
    let hard: Vec<&str> = hard.iter().map(|m| m.subject.as_str()).collect();
    let soft: Vec<&str> = soft.iter().map(|m| m.subject.as_str()).collect();

    match (hard.is_empty(), soft.is_empty()) {
        (true, true) => match role {
            Some(role) => format!(
                "I don't know of any {role} heroes that are good against {}",
                enemy.name
            ),
            None => format!(
                "I don't know of any heroes that are good against {}",
                enemy.name
            ),
        },
        (false, true) => format!("{} very strong against {}", with_verb(&hard), enemy.name),
        (true, false) => format!("{} good against {}", with_verb(&soft), enemy.name),
        (false, false) => format!(
            "{} very strong against {}. {} also good",
            with_verb(&hard),
            enemy.name,
            with_verb(&soft)
        ),
    }
}

/// Heroes `subject` is good against, given its non-negative matchups sorted
/// by advantage descending.
#[must_use]
pub fn strengths(subject: &Character, matchups: &[Matchup], strong: f64, limit: usize) -> String {
    let (hard, soft) = split_by_strength(matchups, strong, limit);
    let hard: Vec<&str> = hard.iter().map(|m| m.enemy.as_str()).collect();
    let soft: Vec<&str> = soft.iter().map(|m| m.enemy.as_str()).collect();

    match (hard.is_empty(), soft.is_empty()) {
        (true, true) => format!("{} isn't particularly strong against anyone", subject.name),
        (false, true) => format!(
            "{} is very strong against {}",
            subject.name,
            list_with_and(&hard)
        ),
        (true, false) => format!("{} is good against {}", subject.name, list_with_and(&soft)),
        (false, false) => format!(
            "{} is very strong against {}, and also counters {}",
            subject.name,
            list_with_and(&hard),
            list_with_and(&soft)
        ),
    }
}

/// Verdict for one hero's advantage over another.
#[must_use]
pub fn advantage_verdict(advantage: f64, strong: f64) -> &'static str {
    if advantage > strong {
        "very strong"
    } else if advantage > 0.0 {
        "not bad"
    } else if advantage > -strong {
        "not great"
    } else {
        "terrible"
    }
}

/// How `hero` fares against `enemy`.
#[must_use]
pub fn two_hero(hero: &Character, enemy: &Character, matchup: Option<&Matchup>, strong: f64) -> String {
    match matchup {
        Some(m) => format!(
            "{hero} is {} against {enemy}. {hero}'s advantage is {:.2}",
            advantage_verdict(m.advantage, strong),
            m.advantage,
            hero = hero.name,
            enemy = enemy.name,
        ),
        None => format!(
            "I don't have any data on {} against {}",
            hero.name, enemy.name
        ),
    }
}
