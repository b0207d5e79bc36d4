//! Conversation contexts.
//!
//! A [`Context`] is what the conversation currently expects. Each variant
//! carries only the entities it needs to resume, and knows how to answer a
//! turn directly, what follow-up question to append, and how to answer a bare
//! "yes".
//!
//! On its first use a context answers about the entities the classifier bound
//! it to. On later uses it re-resolves its target from the new question and
//! refuses when the question is about something else.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;
use truesight_foundation::{Ability, Character};
use truesight_parser::{Cue, ParsedQuestion};
use truesight_store::{MatchupFilter, MatchupSide, UltimateLookup};

use crate::machine::TurnEnv;
use crate::respond;

/// The ability aspect an [`Context::AbilityDetail`] answers about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Aspect {
    /// Cooldown per level.
    Cooldown,
    /// Spell immunity interaction.
    SpellImmunity,
    /// Damage type.
    DamageType,
}

impl Aspect {
    /// Aspects in classification priority order.
    pub const ALL: [Aspect; 3] = [Self::Cooldown, Self::SpellImmunity, Self::DamageType];

    /// The cue that asks for this aspect.
    #[must_use]
    pub const fn cue(self) -> Cue {
        match self {
            Self::Cooldown => Cue::Cooldown,
            Self::SpellImmunity => Cue::SpellImmunity,
            Self::DamageType => Cue::DamageType,
        }
    }

    /// The highest priority aspect the question asks about.
    #[must_use]
    pub fn asked_in(question: &ParsedQuestion<'_>) -> Option<Self> {
        Self::ALL.into_iter().find(|a| question.has_cue(a.cue()))
    }

    /// Returns the aspect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Cooldown => "cooldown",
            Self::SpellImmunity => "spell-immunity",
            Self::DamageType => "damage-type",
        }
    }
}

/// Discriminant of a [`Context`], as carried in conversation tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContextKind {
    /// See [`Context::Introduction`].
    Introduction,
    /// See [`Context::Description`].
    Description,
    /// See [`Context::Feedback`].
    Feedback,
    /// See [`Context::FreshStart`].
    FreshStart,
    /// See [`Context::AbilityDetail`].
    AbilityDetail,
    /// See [`Context::AbilityDescription`].
    AbilityDescription,
    /// See [`Context::AbilityUltimate`].
    AbilityUltimate,
    /// See [`Context::MultipleUltimates`].
    MultipleUltimates,
    /// See [`Context::AbilityList`].
    AbilityList,
    /// See [`Context::AbilityHotkey`].
    AbilityHotkey,
    /// See [`Context::Counters`].
    Counters,
    /// See [`Context::Strengths`].
    Strengths,
    /// See [`Context::TwoHeroAdvantage`].
    TwoHeroAdvantage,
}

impl ContextKind {
    /// Returns the kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Introduction => "introduction",
            Self::Description => "description",
            Self::Feedback => "feedback",
            Self::FreshStart => "fresh-start",
            Self::AbilityDetail => "ability-detail",
            Self::AbilityDescription => "ability-description",
            Self::AbilityUltimate => "ability-ultimate",
            Self::MultipleUltimates => "multiple-ultimates",
            Self::AbilityList => "ability-list",
            Self::AbilityHotkey => "ability-hotkey",
            Self::Counters => "counters",
            Self::Strengths => "strengths",
            Self::TwoHeroAdvantage => "two-hero-advantage",
        }
    }
}

/// What the conversation currently expects.
#[derive(Clone, Debug, PartialEq)]
pub enum Context {
    /// Greets the user. Does not continue.
    Introduction,
    /// Explains what the assistant can do. Does not continue.
    Description,
    /// Prompts for feedback, then records the next turn.
    Feedback,
    /// Asks whether the user has another question.
    FreshStart,
    /// One aspect of one ability.
    AbilityDetail {
        /// The remembered ability.
        ability: Arc<Ability>,
        /// The aspect last asked about.
        aspect: Aspect,
    },
    /// General description of one ability.
    AbilityDescription {
        /// The remembered ability.
        ability: Arc<Ability>,
    },
    /// A hero's ultimate.
    AbilityUltimate {
        /// The remembered hero.
        character: Arc<Character>,
    },
    /// A hero with more than one ultimate, waiting for the user to pick one.
    MultipleUltimates {
        /// The remembered hero.
        character: Arc<Character>,
    },
    /// A hero's ability list.
    AbilityList {
        /// The remembered hero.
        character: Arc<Character>,
    },
    /// The ability on one of a hero's hotkeys.
    AbilityHotkey {
        /// The remembered hero.
        character: Arc<Character>,
    },
    /// Heroes good against an enemy.
    Counters {
        /// The remembered enemy.
        enemy: Arc<Character>,
    },
    /// Heroes a subject is good against.
    Strengths {
        /// The remembered subject.
        subject: Arc<Character>,
    },
    /// One hero against another.
    TwoHeroAdvantage {
        /// The remembered enemy.
        enemy: Arc<Character>,
    },
}

/// A context together with how many turns it has answered.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveContext {
    /// The context.
    pub context: Context,
    /// Number of turns this context has answered.
    pub usage: u32,
}

impl ActiveContext {
    /// Wraps a context that has not answered anything yet.
    #[must_use]
    pub fn fresh(context: Context) -> Self {
        Self { context, usage: 0 }
    }

    /// The follow-up question for the current usage, if the context has one.
    #[must_use]
    pub fn follow_up(&self) -> Option<&'static str> {
        self.context.follow_up(self.usage)
    }
}

/// Where the conversation goes after a direct answer.
#[derive(Clone, Debug, PartialEq)]
pub enum Next {
    /// No follow-up; the conversation token is dropped.
    Close,
    /// Keep going in this context (with possibly updated bindings).
    Continue(Context),
    /// Keep going in a different context, counting this answer as its first use.
    Switch(Context),
}

/// A direct answer.
#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    /// Response text, before punctuation and follow-up are added.
    pub text: String,
    /// The next context.
    pub next: Next,
}

impl Reply {
    fn close(text: String) -> Self {
        Self {
            text,
            next: Next::Close,
        }
    }

    fn continuing(text: String, context: Context) -> Self {
        Self {
            text,
            next: Next::Continue(context),
        }
    }

    fn switching(text: String, context: Context) -> Self {
        Self {
            text,
            next: Next::Switch(context),
        }
    }
}

/// Why a context did not answer directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Refusal {
    /// The question is not for this context.
    Inappropriate,
    /// The user ended the conversation.
    Goodbye,
}

type Answer = std::result::Result<Reply, Refusal>;

const ABILITY_SCOPED_CONFLICTS: &[Cue] = &[Cue::Advantage, Cue::AbilityList, Cue::Help, Cue::Feedback];
const ADVANTAGE_CONFLICTS: &[Cue] = &[
    Cue::Cooldown,
    Cue::SpellImmunity,
    Cue::DamageType,
    Cue::Ultimate,
    Cue::AbilityList,
    Cue::Hotkey,
    Cue::Help,
    Cue::Feedback,
];

impl Context {
    /// Returns the discriminant.
    #[must_use]
    pub const fn kind(&self) -> ContextKind {
        match self {
            Self::Introduction => ContextKind::Introduction,
            Self::Description => ContextKind::Description,
            Self::Feedback => ContextKind::Feedback,
            Self::FreshStart => ContextKind::FreshStart,
            Self::AbilityDetail { .. } => ContextKind::AbilityDetail,
            Self::AbilityDescription { .. } => ContextKind::AbilityDescription,
            Self::AbilityUltimate { .. } => ContextKind::AbilityUltimate,
            Self::MultipleUltimates { .. } => ContextKind::MultipleUltimates,
            Self::AbilityList { .. } => ContextKind::AbilityList,
            Self::AbilityHotkey { .. } => ContextKind::AbilityHotkey,
            Self::Counters { .. } => ContextKind::Counters,
            Self::Strengths { .. } => ContextKind::Strengths,
            Self::TwoHeroAdvantage { .. } => ContextKind::TwoHeroAdvantage,
        }
    }

    /// Returns the kebab-case name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether this context carries over to the next turn after answering.
    #[must_use]
    pub const fn continues(&self) -> bool {
        !matches!(self, Self::Introduction | Self::Description)
    }

    /// The follow-up question appended after an answer, given the usage
    /// count including that answer.
    #[must_use]
    pub const fn follow_up(&self, usage: u32) -> Option<&'static str> {
        let (first, later) = match self {
            Self::Introduction | Self::Description | Self::Feedback | Self::FreshStart => {
                return None;
            }
            Self::AbilityDetail { .. } | Self::AbilityDescription { .. } => {
                ("Any other ability?", "Any others?")
            }
            Self::AbilityUltimate { .. }
            | Self::AbilityList { .. }
            | Self::Counters { .. }
            | Self::Strengths { .. } => ("Any other hero?", "Any others?"),
            Self::MultipleUltimates { .. } => ("Which one would you like to know about?", "Any other?"),
            Self::AbilityHotkey { .. } => ("Any other hotkey?", "Any others?"),
            Self::TwoHeroAdvantage { .. } => ("Any other matchup?", "Any others?"),
        };
        if usage <= 1 { Some(first) } else { Some(later) }
    }

    /// The clarifying prompt given when the user answers a bare "yes".
    #[must_use]
    pub const fn yes_prompt(&self) -> Option<&'static str> {
        match self {
            Self::Introduction | Self::Description | Self::Feedback => None,
            Self::FreshStart => Some(respond::WHAT_WOULD_YOU_LIKE),
            Self::AbilityDetail { .. } | Self::AbilityDescription { .. } => Some("Which ability?"),
            Self::MultipleUltimates { .. } => Some("Which ultimate?"),
            Self::AbilityHotkey { .. } => Some("Which hotkey?"),
            Self::AbilityUltimate { .. }
            | Self::AbilityList { .. }
            | Self::Counters { .. }
            | Self::Strengths { .. }
            | Self::TwoHeroAdvantage { .. } => Some("Which hero?"),
        }
    }

    /// Cues that mark a continued question as belonging to another intent.
    fn conflicting_cues(&self) -> &'static [Cue] {
        match self {
            Self::Introduction | Self::Description | Self::Feedback | Self::FreshStart => &[],
            Self::AbilityDetail { .. } | Self::AbilityDescription { .. } => &[
                Cue::Advantage,
                Cue::Ultimate,
                Cue::AbilityList,
                Cue::Help,
                Cue::Feedback,
            ],
            Self::MultipleUltimates { .. } => ABILITY_SCOPED_CONFLICTS,
            Self::AbilityUltimate { .. } => &[
                Cue::Advantage,
                Cue::AbilityList,
                Cue::Hotkey,
                Cue::Help,
                Cue::Feedback,
            ],
            Self::AbilityList { .. } => &[
                Cue::Advantage,
                Cue::Ultimate,
                Cue::Hotkey,
                Cue::Cooldown,
                Cue::SpellImmunity,
                Cue::DamageType,
                Cue::Help,
                Cue::Feedback,
            ],
            Self::AbilityHotkey { .. } => &[
                Cue::Advantage,
                Cue::Ultimate,
                Cue::AbilityList,
                Cue::Help,
                Cue::Feedback,
            ],
            Self::Counters { .. } | Self::Strengths { .. } | Self::TwoHeroAdvantage { .. } => {
                ADVANTAGE_CONFLICTS
            }
        }
    }

    /// Attempts to answer a turn directly.
    ///
    /// `usage` is the number of turns this context has already answered.
    ///
    /// # Errors
    ///
    /// Returns [`Refusal::Inappropriate`] when the question is not for this
    /// context, and [`Refusal::Goodbye`] when the user ends the conversation.
    pub fn answer(&self, question: &ParsedQuestion<'_>, usage: u32, env: &TurnEnv<'_>) -> Answer {
        let first = usage == 0;
        if !first && self.conflicting_cues().iter().any(|c| question.has_cue(*c)) {
            return Err(Refusal::Inappropriate);
        }

        match self {
            Self::Introduction => Ok(Reply::close(respond::introduction(&env.sample(question)))),
            Self::Description => Ok(Reply::close(respond::description(&env.sample(question)))),
            Self::Feedback => Self::answer_feedback(question, first, env),
            Self::FreshStart => Self::answer_fresh_start(question, first, env),
            Self::AbilityDetail { ability, aspect } => {
                let target = ability_target(question, ability, first)?;
                let aspect = Aspect::asked_in(question).unwrap_or(*aspect);
                Ok(Reply::continuing(
                    respond::detail(&target, aspect),
                    Self::AbilityDetail {
                        ability: target,
                        aspect,
                    },
                ))
            }
            Self::AbilityDescription { ability } => {
                let target = ability_target(question, ability, first)?;
                match Aspect::asked_in(question) {
                    Some(aspect) => Ok(Reply::switching(
                        respond::detail(&target, aspect),
                        Self::AbilityDetail {
                            ability: target,
                            aspect,
                        },
                    )),
                    None => Ok(Reply::continuing(
                        respond::ability_description(&target),
                        Self::AbilityDescription { ability: target },
                    )),
                }
            }
            Self::AbilityUltimate { character } => {
                let hero = hero_target(question, character, first)?;
                Ok(answer_ultimate(question, hero))
            }
            Self::MultipleUltimates { character } => {
                answer_multiple_ultimates(question, character, first)
            }
            Self::AbilityList { character } => {
                let hero = hero_target(question, character, first)?;
                let abilities = question.store().abilities_of(&hero.name, true);
                Ok(Reply::continuing(
                    respond::ability_list(&hero, &abilities),
                    Self::AbilityList { character: hero },
                ))
            }
            Self::AbilityHotkey { character } => answer_hotkey(question, character, first),
            Self::Counters { enemy } => {
                let enemy = advantage_target(question, enemy, first, Direction::Enemy)?;
                let matchups = question.store().matchups(
                    &MatchupFilter::against(enemy.name.clone())
                        .with_min_advantage(0.0)
                        .with_role(MatchupSide::Subject, question.role()),
                );
                Ok(Reply::continuing(
                    respond::counters(
                        &enemy,
                        question.role(),
                        &matchups,
                        env.config.strong_advantage,
                        env.config.soft_counter_limit,
                    ),
                    Self::Counters { enemy },
                ))
            }
            Self::Strengths { subject } => {
                let subject = advantage_target(question, subject, first, Direction::Subject)?;
                let matchups = question.store().matchups(
                    &MatchupFilter::for_subject(subject.name.clone())
                        .with_min_advantage(0.0)
                        .with_role(MatchupSide::Enemy, question.role()),
                );
                Ok(Reply::continuing(
                    respond::strengths(
                        &subject,
                        &matchups,
                        env.config.strong_advantage,
                        env.config.soft_counter_limit,
                    ),
                    Self::Strengths { subject },
                ))
            }
            Self::TwoHeroAdvantage { enemy } => {
                let (hero, enemy) = match question.characters() {
                    [hero, enemy] if first || question.abilities().is_empty() => {
                        (Arc::clone(hero), Arc::clone(enemy))
                    }
                    [hero] if !first && question.abilities().is_empty() && hero.name != enemy.name => {
                        (Arc::clone(hero), Arc::clone(enemy))
                    }
                    _ => return Err(Refusal::Inappropriate),
                };
                let matchup = question.store().matchup(&hero.name, &enemy.name);
                Ok(Reply::continuing(
                    respond::two_hero(&hero, &enemy, matchup.as_ref(), env.config.strong_advantage),
                    Self::TwoHeroAdvantage { enemy },
                ))
            }
        }
    }

    fn answer_feedback(question: &ParsedQuestion<'_>, first: bool, env: &TurnEnv<'_>) -> Answer {
        if first {
            return Ok(Reply::continuing(
                respond::FEEDBACK_PROMPT.to_string(),
                Self::Feedback,
            ));
        }
        if question.is_empty() {
            return Err(Refusal::Inappropriate);
        }
        env.reporter
            .feedback(env.user, env.raw_text.unwrap_or(question.text()));
        Ok(Reply::close(respond::FEEDBACK_THANKS.to_string()))
    }

    fn answer_fresh_start(question: &ParsedQuestion<'_>, first: bool, env: &TurnEnv<'_>) -> Answer {
        if first {
            return Ok(Reply::continuing(
                respond::fresh_start(&env.sample(question)),
                Self::FreshStart,
            ));
        }
        if !question.characters().is_empty()
            || !question.abilities().is_empty()
            || !question.cues().is_empty()
        {
            return Err(Refusal::Inappropriate);
        }
        if question.no() {
            return Err(Refusal::Goodbye);
        }
        if question.yes() {
            return Ok(Reply::continuing(
                respond::WHAT_WOULD_YOU_LIKE.to_string(),
                Self::FreshStart,
            ));
        }
        Err(Refusal::Inappropriate)
    }
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())?;
        match self {
            Self::Introduction | Self::Description | Self::Feedback | Self::FreshStart => Ok(()),
            Self::AbilityDetail { ability, aspect } => {
                write!(f, "({}'s {}, {})", ability.character, ability.name, aspect.name())
            }
            Self::AbilityDescription { ability } => {
                write!(f, "({}'s {})", ability.character, ability.name)
            }
            Self::AbilityUltimate { character }
            | Self::MultipleUltimates { character }
            | Self::AbilityList { character }
            | Self::AbilityHotkey { character } => write!(f, "({character})"),
            Self::Counters { enemy } | Self::TwoHeroAdvantage { enemy } => write!(f, "(vs {enemy})"),
            Self::Strengths { subject } => write!(f, "({subject})"),
        }
    }
}

// =============================================================================
// Target resolution
// =============================================================================

/// Which side of an advantage question a lone hero is on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Direction {
    Subject,
    Enemy,
}

/// Side of a lone hero, judged by whether it is named before the advantage
/// keyword. `None` when the question has no advantage keyword.
pub(crate) fn direction_of(question: &ParsedQuestion<'_>, character: &Character) -> Option<Direction> {
    let cue = question.cue_position(Cue::Advantage)?;
    let at = question.position_of(character)?;
    Some(if at < cue {
        Direction::Subject
    } else {
        Direction::Enemy
    })
}

/// The single hero a question is about, allowing only that hero's abilities.
fn single_hero(question: &ParsedQuestion<'_>) -> Option<Arc<Character>> {
    match question.characters() {
        [hero]
            if question
                .abilities()
                .iter()
                .all(|a| a.character == hero.name) =>
        {
            Some(Arc::clone(hero))
        }
        _ => None,
    }
}

fn hero_target(
    question: &ParsedQuestion<'_>,
    bound: &Arc<Character>,
    first: bool,
) -> std::result::Result<Arc<Character>, Refusal> {
    if first {
        return Ok(Arc::clone(bound));
    }
    single_hero(question).ok_or(Refusal::Inappropriate)
}

fn ability_target(
    question: &ParsedQuestion<'_>,
    bound: &Arc<Ability>,
    first: bool,
) -> std::result::Result<Arc<Ability>, Refusal> {
    if first {
        return Ok(Arc::clone(bound));
    }
    match question.abilities() {
        [only] => Ok(Arc::clone(only)),
        [] => {
            if let (Some(hero), Some(key)) = (question.characters().first(), question.hotkey()) {
                return question
                    .store()
                    .ability_by_hotkey(&hero.name, key)
                    .ok_or(Refusal::Inappropriate);
            }
            if question.characters().is_empty() && question.refers_back() {
                Ok(Arc::clone(bound))
            } else {
                Err(Refusal::Inappropriate)
            }
        }
        _ => Err(Refusal::Inappropriate),
    }
}

fn advantage_target(
    question: &ParsedQuestion<'_>,
    bound: &Arc<Character>,
    first: bool,
    side: Direction,
) -> std::result::Result<Arc<Character>, Refusal> {
    if first {
        return Ok(Arc::clone(bound));
    }
    if !question.abilities().is_empty() {
        return Err(Refusal::Inappropriate);
    }
    match question.characters() {
        [hero] if direction_of(question, hero).is_none_or(|d| d == side) => Ok(Arc::clone(hero)),
        [] if question.role().is_some() || question.refers_back() => Ok(Arc::clone(bound)),
        _ => Err(Refusal::Inappropriate),
    }
}

// =============================================================================
// Hero-scoped answers
// =============================================================================

fn answer_ultimate(question: &ParsedQuestion<'_>, hero: Arc<Character>) -> Reply {
    match question.store().ultimate(&hero.name) {
        UltimateLookup::Single(ability) => Reply::continuing(
            respond::ultimate(&hero, &ability),
            Context::AbilityUltimate { character: hero },
        ),
        UltimateLookup::None => Reply::continuing(
            respond::no_ultimate(&hero),
            Context::AbilityUltimate { character: hero },
        ),
        UltimateLookup::Multiple(all) => {
            warn!(character = %hero.name, count = all.len(), "multiple ultimates");
            Reply::switching(
                respond::multiple_ultimates(&hero, &all),
                Context::MultipleUltimates { character: hero },
            )
        }
    }
}

fn answer_multiple_ultimates(
    question: &ParsedQuestion<'_>,
    character: &Arc<Character>,
    first: bool,
) -> Answer {
    let store = question.store();
    let named: Vec<&Arc<Ability>> = question
        .abilities()
        .iter()
        .filter(|a| a.character == character.name)
        .collect();

    let picked = match named.as_slice() {
        [only] => Some(Arc::clone(*only)),
        [] if question.characters().is_empty() => question
            .hotkey_for(character)
            .and_then(|key| store.ability_by_hotkey(&character.name, key)),
        [] => None,
        _ if first => None,
        _ => return Err(Refusal::Inappropriate),
    };

    let next = Context::MultipleUltimates {
        character: Arc::clone(character),
    };
    if let Some(ability) = picked {
        let text = match Aspect::asked_in(question) {
            Some(aspect) => respond::detail(&ability, aspect),
            None if ability.ultimate => respond::ultimate(character, &ability),
            None => respond::ability_description(&ability),
        };
        return Ok(Reply::continuing(text, next));
    }

    let about_this_hero = match question.characters() {
        [] => question.refers_back() || question.has_cue(Cue::Ultimate),
        [hero] => hero.name == character.name,
        _ => false,
    };
    if !first && (!about_this_hero || !question.abilities().is_empty()) {
        return Err(Refusal::Inappropriate);
    }
    match store.ultimate(&character.name) {
        UltimateLookup::Multiple(all) => {
            warn!(character = %character.name, count = all.len(), "multiple ultimates");
            Ok(Reply::continuing(
                respond::multiple_ultimates(character, &all),
                next,
            ))
        }
        UltimateLookup::Single(ability) => Ok(Reply::continuing(
            respond::ultimate(character, &ability),
            next,
        )),
        UltimateLookup::None => Ok(Reply::continuing(respond::no_ultimate(character), next)),
    }
}

fn answer_hotkey(question: &ParsedQuestion<'_>, character: &Arc<Character>, first: bool) -> Answer {
    let hero = if first {
        Arc::clone(character)
    } else {
        match question.characters() {
            [hero] if question.abilities().is_empty() => Arc::clone(hero),
            [] if question.abilities().is_empty() => Arc::clone(character),
            _ => return Err(Refusal::Inappropriate),
        }
    };
    let ability = question
        .hotkey_for(&hero)
        .and_then(|key| question.store().ability_by_hotkey(&hero.name, key))
        .ok_or(Refusal::Inappropriate)?;
    Ok(Reply::continuing(
        respond::hotkey(&hero, &ability),
        Context::AbilityHotkey { character: hero },
    ))
}
