//! Integration tests for Error types
//!
//! Tests error construction, display, context, and signal classification.

use truesight_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_unknown_character() {
    let err = Error::unknown_character("Pudge");
    assert!(matches!(err.kind, ErrorKind::UnknownCharacter(_)));
    assert_eq!(format!("{err}"), "unknown character: Pudge");
}

#[test]
fn error_unknown_ability() {
    let err = Error::unknown_ability("Disruptor", "Hookshot");
    assert!(matches!(err.kind, ErrorKind::UnknownAbility { .. }));
    let msg = format!("{err}");
    assert!(msg.contains("Hookshot"));
    assert!(msg.contains("Disruptor"));
}

#[test]
fn error_token() {
    let err = Error::token("unsupported token version 9");
    assert!(matches!(err.kind, ErrorKind::Token(_)));
    assert!(format!("{err}").contains("version 9"));
}

#[test]
fn error_unusable_context() {
    let err = Error::unusable_context("counters(vs Lion)");
    assert!(format!("{err}").contains("counters(vs Lion)"));
}

// =============================================================================
// Signals
// =============================================================================

#[test]
fn only_two_kinds_are_signals() {
    assert!(Error::do_not_understand().is_signal());
    assert!(Error::goodbye().is_signal());
    assert!(!Error::token("bad").is_signal());
    assert!(!Error::new(ErrorKind::Internal("boom".into())).is_signal());
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn context_display() {
    let ctx = ErrorContext::new()
        .with_source("classifier")
        .with_question("who counters lion")
        .with_frame("counters")
        .with_frame("fresh-start");
    let text = ctx.to_string();
    assert!(text.starts_with("at classifier while answering 'who counters lion'"));
    assert!(text.contains("  in counters\n"));
    assert!(text.contains("  in fresh-start\n"));
}

#[test]
fn context_attached_to_error() {
    let err = Error::do_not_understand().with_context(ErrorContext::new().with_source("classifier"));
    let ctx = err.context.expect("context attached");
    assert_eq!(ctx.source.as_deref(), Some("classifier"));
    assert!(ctx.stack.is_empty());
}

#[test]
fn empty_context_displays_nothing() {
    assert_eq!(ErrorContext::new().to_string(), "");
}
