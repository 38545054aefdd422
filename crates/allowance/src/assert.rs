//! Panicking assertions for use inside `#[test]` functions.

use crate::matcher::Matcher;
use crate::model::Model;

/// Panics with the matcher's failure message unless it holds for `instance`.
#[track_caller]
pub fn should<M: Matcher>(instance: &mut dyn Model, mut matcher: M) {
    match matcher.matches(instance) {
        Ok(true) => {}
        Ok(false) => panic!("{}", matcher.failure_message()),
        Err(e) => panic!("could not evaluate matcher to {}: {}", matcher.description(), e),
    }
}

/// Panics with the matcher's negated failure message if it holds for `instance`.
#[track_caller]
pub fn should_not<M: Matcher>(instance: &mut dyn Model, mut matcher: M) {
    match matcher.matches(instance) {
        Ok(false) => {}
        Ok(true) => panic!("{}", matcher.failure_message_when_negated()),
        Err(e) => panic!("could not evaluate matcher to {}: {}", matcher.description(), e),
    }
}
