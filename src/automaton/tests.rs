use std::sync::Arc;

use super::*;
use crate::Pattern;
use MatchResult::{InProgress, Match, NoMatch};

fn matcher(pattern: &Pattern) -> Matcher {
    Matcher::new(pattern)
}

fn feed(m: &mut Matcher, input: &str) -> Vec<MatchResult> {
    input.chars().map(|c| m.process_char(c)).collect()
}

#[test]
fn test_single_char_pattern_matches_immediately() {
    let p = Pattern::literal(">").unwrap();
    let mut m = matcher(&p);
    // No InProgress observation for a one-character pattern
    assert_eq!(m.process_char('>'), Match);
}

#[test]
fn test_literal_progression() {
    let p = Pattern::literal("abc").unwrap();
    let mut m = matcher(&p);
    assert_eq!(feed(&mut m, "abc"), vec![InProgress, InProgress, Match]);
}

#[test]
fn test_no_match_falls_back_to_start() {
    let p = Pattern::literal("abc").unwrap();
    let mut m = matcher(&p);
    assert_eq!(feed(&mut m, "ab"), vec![InProgress, InProgress]);
    assert_eq!(m.process_char('x'), NoMatch);
    assert_eq!(m.partial_len(), 0);
    // Progress restarts cleanly after the failure
    assert_eq!(feed(&mut m, "abc"), vec![InProgress, InProgress, Match]);
}

#[test]
fn test_start_state_accepting_is_in_progress_not_no_match() {
    // Falling all the way back and re-entering on the same character is a
    // partial match, not a failure.
    let p = Pattern::literal("<plan>").unwrap();
    let mut m = matcher(&p);
    assert_eq!(m.process_char('<'), InProgress);
    assert_eq!(m.process_char('<'), InProgress);
    assert_eq!(m.partial_len(), 1);
}

#[test]
fn test_overlap_retained_not_naive_restart() {
    // "aab" against "aaab": the middle fallback keeps two characters of
    // partial match instead of restarting from scratch.
    let p = Pattern::literal("aab").unwrap();
    let mut m = matcher(&p);
    assert_eq!(m.process_char('a'), InProgress);
    assert_eq!(m.process_char('a'), InProgress);
    assert_eq!(m.process_char('a'), InProgress);
    assert_eq!(m.partial_len(), 2);
    assert_eq!(m.process_char('b'), Match);
}

#[test]
fn test_reset_after_match_gives_one_match_per_occurrence() {
    let p = Pattern::literal("aa").unwrap();
    let mut m = matcher(&p);
    assert_eq!(m.process_char('a'), InProgress);
    assert_eq!(m.process_char('a'), Match);
    m.reset();
    assert_eq!(m.process_char('a'), InProgress);
}

#[test]
fn test_unreset_matcher_continues_through_terminal_failure_link() {
    // Overlapped matching for callers that never reset
    let p = Pattern::literal("aa").unwrap();
    let mut m = matcher(&p);
    assert_eq!(feed(&mut m, "aaa"), vec![InProgress, Match, Match]);
}

#[test]
fn test_not_ch() {
    let p = Pattern::builder().ch('<').not_ch('/').build().unwrap();
    let mut m = matcher(&p);
    assert_eq!(feed(&mut m, "<a"), vec![InProgress, Match]);

    let mut m = matcher(&p);
    assert_eq!(m.process_char('<'), InProgress);
    assert_eq!(m.process_char('/'), NoMatch);
}

#[test]
fn test_greedy_span_skips_until_anchor() {
    // "<" then anything until ">"
    let p = Pattern::builder()
        .literal("<")
        .greedy_star(|p| p.literal(">"))
        .build()
        .unwrap();
    let mut m = matcher(&p);
    assert_eq!(
        feed(&mut m, "<ab>"),
        vec![InProgress, InProgress, InProgress, Match]
    );
}

#[test]
fn test_greedy_span_multichar_anchor_overlap() {
    // Skip until "-->"; "--->" must not lose the partial anchor on the
    // extra dash.
    let p = Pattern::builder()
        .greedy_star(|p| p.literal("-->"))
        .build()
        .unwrap();
    let mut m = matcher(&p);
    assert_eq!(
        feed(&mut m, "a--->"),
        vec![InProgress, InProgress, InProgress, InProgress, Match]
    );
}

#[test]
fn test_greedy_span_absorbs_failed_anchor_into_partial() {
    let p = Pattern::builder()
        .literal("<!--")
        .greedy_star(|p| p.literal("-->"))
        .build()
        .unwrap();
    let mut m = matcher(&p);
    // "--x" inside the comment body: the anchor attempt fails but the
    // characters stay inside the span's partial match.
    for c in "<!--a--x".chars() {
        assert_eq!(m.process_char(c), InProgress);
    }
    assert_eq!(m.partial_len(), 8);
    assert_eq!(feed(&mut m, "-->"), vec![InProgress, InProgress, Match]);
}

#[test]
fn test_partial_len_tracks_fallback_depth() {
    let p = Pattern::literal("<plan>").unwrap();
    let mut m = matcher(&p);
    assert_eq!(feed(&mut m, "<pl"), vec![InProgress; 3]);
    assert_eq!(m.partial_len(), 3);
    // '<' drops the old partial and starts a fresh one
    assert_eq!(m.process_char('<'), InProgress);
    assert_eq!(m.partial_len(), 1);
}

#[test]
fn test_partial_len_bounded_by_pattern_on_long_input() {
    let p = Pattern::literal("<plan>").unwrap();
    let mut m = matcher(&p);
    let unit_count = m.automaton().unit_count();
    for c in "<pl<pl<pl".chars().cycle().take(10_000) {
        let _ = m.process_char(c);
        assert!(m.partial_len() <= unit_count);
    }
}

#[test]
fn test_sessions_share_no_mutable_state() {
    let p = Pattern::literal("ab").unwrap();
    let automaton = Arc::new(Automaton::compile(&p));
    let mut m1 = Matcher::with_automaton(automaton.clone());
    let mut m2 = Matcher::with_automaton(automaton);
    assert_eq!(m1.process_char('a'), InProgress);
    // m2 is unaffected by m1's progress
    assert_eq!(m2.process_char('b'), NoMatch);
    assert_eq!(m1.process_char('b'), Match);
}

#[test]
fn test_unit_count() {
    let p = Pattern::builder()
        .literal("<!--")
        .greedy_star(|p| p.literal("-->"))
        .build()
        .unwrap();
    // 4 literal units + 1 span marker + 3 anchor units
    assert_eq!(Automaton::compile(&p).unit_count(), 8);
}
