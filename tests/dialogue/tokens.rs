//! Conversation token tests

use std::sync::Arc;

use proptest::prelude::*;
use truesight_dialogue::{ActiveContext, Aspect, Context, ContextKind, decode_token, encode_token};
use truesight_foundation::ErrorKind;
use truesight_store::KnowledgeStore;

use crate::{Chat, heroes};

fn build(kind: usize, hero: usize, ability: usize, aspect: usize, store: &dyn KnowledgeStore) -> Context {
    let characters = store.characters();
    let abilities = store.abilities();
    let character = Arc::clone(&characters[hero % characters.len()]);
    let ability = Arc::clone(&abilities[ability % abilities.len()]);
    let aspect = Aspect::ALL[aspect % Aspect::ALL.len()];
    match kind % 13 {
        0 => Context::Introduction,
        1 => Context::Description,
        2 => Context::Feedback,
        3 => Context::FreshStart,
        4 => Context::AbilityDetail { ability, aspect },
        5 => Context::AbilityDescription { ability },
        6 => Context::AbilityUltimate { character },
        7 => Context::MultipleUltimates { character },
        8 => Context::AbilityList { character },
        9 => Context::AbilityHotkey { character },
        10 => Context::Counters { enemy: character },
        11 => Context::Strengths { subject: character },
        _ => Context::TwoHeroAdvantage { enemy: character },
    }
}

proptest! {
    #[test]
    fn token_restores_context(
        kind in 0usize..13,
        hero in any::<usize>(),
        ability in any::<usize>(),
        aspect in 0usize..3,
        usage in 0u32..1000,
    ) {
        let store = heroes();
        let active = ActiveContext {
            context: build(kind, hero, ability, aspect, &store),
            usage,
        };
        let token = encode_token(&active).unwrap();
        let restored = decode_token(Some(token.as_str()), &store).unwrap();
        prop_assert_eq!(restored, Some(active));
    }
}

#[test]
fn blank_tokens_are_absent() {
    let store = heroes();
    for token in [None, Some(""), Some("  "), Some("null")] {
        assert!(decode_token(token, &store).unwrap().is_none());
    }
}

#[test]
fn broken_tokens_are_rejected() {
    let store = heroes();
    let cases = [
        "{not json",
        r#"{"version":2,"context":"counters","usage":1,"character":"Lion"}"#,
        r#"{"version":1,"context":"counters","usage":1}"#,
        r#"{"version":1,"context":"counters","usage":1,"character":"Pudge"}"#,
        r#"{"version":1,"context":"ability-detail","usage":1,"character":"Disruptor","ability":"Glimpse"}"#,
        r#"{"version":1,"context":"weather","usage":1}"#,
    ];
    for token in cases {
        let err = decode_token(Some(token), &store).unwrap_err();
        assert!(
            matches!(err.kind, ErrorKind::Token(_) | ErrorKind::UnknownCharacter(_) | ErrorKind::UnknownAbility { .. }),
            "{token}: {err}"
        );
    }
}

#[test]
fn broken_token_falls_back_to_classification() {
    let mut chat = Chat::new();
    chat.token = Some(r#"{"version":1,"context":"counters","usage":3,"character":"Pudge"}"#.into());
    assert_eq!(
        chat.ask("Who counters Lion?"),
        "Lifestealer and Queen of Pain are good against Lion. Any other hero?"
    );
    let restored = decode_token(chat.token.as_deref(), &heroes()).unwrap().unwrap();
    assert_eq!(restored.context.kind(), ContextKind::Counters);
    assert_eq!(restored.usage, 1);
}

#[test]
fn token_carries_across_engines() {
    let mut first = Chat::new();
    first.ask("Who counters Meepo?");

    // Any engine over the same names can continue the conversation.
    let mut second = Chat::new();
    second.token = first.token.clone();
    assert_eq!(
        second.ask("What about Lion?"),
        "Lifestealer and Queen of Pain are good against Lion. Any others?"
    );
}
