//! One engine serving many conversations at once

use std::sync::Arc;
use std::thread;

use truesight_dialogue::{NullReporter, UsageCounters};
use truesight_runtime::Session;

use crate::engine;

#[test]
fn interleaved_conversations_do_not_mix() {
    let engine = engine();
    let counters = Arc::new(UsageCounters::new());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = engine.clone();
            let counters = Arc::clone(&counters);
            thread::spawn(move || {
                let mut session = Session::new(engine)
                    .with_user(Some(format!("user-{i}")))
                    .with_counters(counters);
                if i % 2 == 0 {
                    session.ask("Who counters Meepo?");
                    session.ask("What about Lion?").text()
                } else {
                    session.ask("What is the cooldown of Glimpse?");
                    session.ask("What about Hex?").text()
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let text = handle.join().unwrap();
        if i % 2 == 0 {
            assert_eq!(text, "Lifestealer and Queen of Pain are good against Lion. Any others?");
        } else {
            assert_eq!(text, "The cooldown of Hex is 30, 24, 18, 12 seconds. Any others?");
        }
    }

    let stats = counters.snapshot();
    assert_eq!(stats.answered, 16);
    assert_eq!(stats.users.len(), 8);
    assert_eq!(stats.responders.get("counters"), Some(&8));
    assert_eq!(stats.responders.get("ability-detail"), Some(&8));
}

#[test]
fn shared_engine_answers_identically_across_threads() {
    let engine = Arc::new(engine());
    let expected = engine
        .respond(Some("what can you do"), None, None, &NullReporter)
        .text();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .respond(Some("what can you do"), None, None, &NullReporter)
                    .text()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
