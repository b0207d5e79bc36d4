//! Conversation tokens.
//!
//! A token is a flat JSON object carrying a format version, the context
//! discriminant, the usage counter and the names of the remembered entities:
//!
//! ```json
//! {"version":1,"context":"ability-detail","usage":1,"character":"Disruptor","ability":"Glimpse","aspect":"cooldown"}
//! ```
//!
//! Entities are referenced by name only, so a token survives a knowledge
//! base reload as long as the names it mentions still exist.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use truesight_foundation::{Ability, Character, Error, Result};
use truesight_store::KnowledgeStore;

use crate::context::{ActiveContext, Aspect, Context, ContextKind};

/// Current token format version.
pub const TOKEN_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TokenData {
    version: u32,
    context: ContextKind,
    #[serde(default)]
    usage: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    character: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    aspect: Option<Aspect>,
}

/// Serializes an active context into an opaque token.
///
/// # Errors
///
/// Returns a token error if JSON encoding fails.
pub fn encode_token(active: &ActiveContext) -> Result<String> {
    let (character, ability, aspect) = match &active.context {
        Context::Introduction | Context::Description | Context::Feedback | Context::FreshStart => {
            (None, None, None)
        }
        Context::AbilityDetail { ability, aspect } => (
            Some(ability.character.clone()),
            Some(ability.name.clone()),
            Some(*aspect),
        ),
        Context::AbilityDescription { ability } => (
            Some(ability.character.clone()),
            Some(ability.name.clone()),
            None,
        ),
        Context::AbilityUltimate { character }
        | Context::MultipleUltimates { character }
        | Context::AbilityList { character }
        | Context::AbilityHotkey { character }
        | Context::Counters { enemy: character }
        | Context::Strengths { subject: character }
        | Context::TwoHeroAdvantage { enemy: character } => {
            (Some(character.name.clone()), None, None)
        }
    };

    let data = TokenData {
        version: TOKEN_VERSION,
        context: active.context.kind(),
        usage: active.usage,
        character,
        ability,
        aspect,
    };
    serde_json::to_string(&data).map_err(|e| Error::token(e.to_string()))
}

/// Restores an active context from a token.
///
/// Returns `Ok(None)` for an absent, blank or `null` token.
///
/// # Errors
///
/// Returns an error if the token is not valid JSON, has an unknown version,
/// lacks a field its context needs, or names an entity the store does not
/// know.
pub fn decode_token(token: Option<&str>, store: &dyn KnowledgeStore) -> Result<Option<ActiveContext>> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty() && *t != "null") else {
        return Ok(None);
    };

    let data: TokenData = serde_json::from_str(token).map_err(|e| Error::token(e.to_string()))?;
    if data.version != TOKEN_VERSION {
        return Err(Error::token(format!(
            "unsupported token version {}",
            data.version
        )));
    }

    let context = match data.context {
        ContextKind::Introduction => Context::Introduction,
        ContextKind::Description => Context::Description,
        ContextKind::Feedback => Context::Feedback,
        ContextKind::FreshStart => Context::FreshStart,
        ContextKind::AbilityDetail => Context::AbilityDetail {
            ability: ability(&data, store)?,
            aspect: data
                .aspect
                .ok_or_else(|| Error::token("ability-detail token without aspect"))?,
        },
        ContextKind::AbilityDescription => Context::AbilityDescription {
            ability: ability(&data, store)?,
        },
        ContextKind::AbilityUltimate => Context::AbilityUltimate {
            character: character(&data, store)?,
        },
        ContextKind::MultipleUltimates => Context::MultipleUltimates {
            character: character(&data, store)?,
        },
        ContextKind::AbilityList => Context::AbilityList {
            character: character(&data, store)?,
        },
        ContextKind::AbilityHotkey => Context::AbilityHotkey {
            character: character(&data, store)?,
        },
        ContextKind::Counters => Context::Counters {
            enemy: character(&data, store)?,
        },
        ContextKind::Strengths => Context::Strengths {
            subject: character(&data, store)?,
        },
        ContextKind::TwoHeroAdvantage => Context::TwoHeroAdvantage {
            enemy: character(&data, store)?,
        },
    };

    Ok(Some(ActiveContext {
        context,
        usage: data.usage,
    }))
}

fn character(data: &TokenData, store: &dyn KnowledgeStore) -> Result<Arc<Character>> {
    let name = data
        .character
        .as_deref()
        .ok_or_else(|| Error::token(format!("{} token without character", data.context.name())))?;
    store
        .character(name)
        .ok_or_else(|| Error::unknown_character(name))
}

fn ability(data: &TokenData, store: &dyn KnowledgeStore) -> Result<Arc<Ability>> {
    let owner = character(data, store)?;
    let name = data
        .ability
        .as_deref()
        .ok_or_else(|| Error::token(format!("{} token without ability", data.context.name())))?;
    store
        .ability(&owner.name, name)
        .ok_or_else(|| Error::unknown_ability(&owner.name, name))
}
