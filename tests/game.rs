use shannon_core::core::engine::{GuessEngine, GuessPhase, KnownSymbol, FALLBACK_ALPHABET};
use shannon_core::core::types::Context;
use shannon_core::persistence::Corpus;
use shannon_core::session::{play, play_auto, GameSession, PlayMode};
use shannon_core::{index, ShannonError};
use std::time::Duration;

const CORPUS: &str = "the dead war was a dead end for the weary warden who dreaded a war";

#[test]
fn dead_war_is_rebuilt_exactly() {
    let corpus = Corpus::from_raw(CORPUS);
    assert_eq!(corpus.distinct_symbols, 13);
    let table = index(&corpus.text, corpus.distinct_symbols).expect("indexed");

    let outcome = play_auto(&table, "dead war").expect("solvable");
    assert_eq!(outcome.progress, "dead war");
    assert_eq!(outcome.total_guesses, 6);
    assert!(outcome.total_guesses >= "dead war".len() as u64 - 2);
}

#[test]
fn longer_phrase_uses_ranked_and_fallback_guesses() {
    let table = index(CORPUS, 13).expect("indexed");
    let outcome = play_auto(&table, "the warden").expect("solvable");
    assert_eq!(outcome.progress, "the warden");
    assert_eq!(outcome.total_guesses, 12);

    let outcome = play_auto(&index("riff raff", 5).expect("indexed"), "rare").expect("solvable");
    assert_eq!(outcome.progress, "rare");
    assert_eq!(outcome.total_guesses, 23);
}

#[test]
fn steps_report_each_symbol() {
    let table = index("riff raff", 5).expect("indexed");
    let mut session = GameSession::new(&table, "riff raff", PlayMode::Automatic).expect("session");
    let mut unused = KnownSymbol('\0');
    let mut per_step = Vec::new();
    while let Some(outcome) = session.step(&mut unused).expect("step") {
        per_step.push(outcome.guesses);
    }
    assert_eq!(session.progress(), "riff raff");
    assert_eq!(per_step.len(), 7);
    assert_eq!(per_step.iter().sum::<u64>(), session.total_guesses());
    assert!(session.is_finished());
}

#[test]
fn interactive_play_asks_until_length_reached() {
    let table = index(CORPUS, 13).expect("indexed");
    let answer: Vec<char> = "dead end".chars().collect();
    let mut pos = 2;
    let mut asked = 0;
    let mut oracle = |c: char| {
        asked += 1;
        let hit = c == answer[pos];
        if hit {
            pos += 1;
        }
        hit
    };
    let outcome = play(&table, "de", 8, &mut oracle).expect("solvable");
    assert_eq!(outcome.progress, "dead end");
    assert_eq!(outcome.elapsed, Duration::ZERO);
    assert_eq!(outcome.total_guesses, asked);
}

#[test]
fn unseen_context_and_foreign_symbol_exhaust() {
    let table = index(CORPUS, 13).expect("indexed");
    let engine = GuessEngine::new(&table);
    let outcome = engine.guess(&Context::new('q', 'x'), &mut KnownSymbol('@'));
    assert_eq!(outcome.phase, GuessPhase::Exhausted);
    assert_eq!(outcome.symbol, None);
    assert_eq!(outcome.guesses, FALLBACK_ALPHABET.len() as u64);

    let err = play_auto(&table, "qx@").unwrap_err();
    assert!(matches!(err, ShannonError::GuessesExhausted { ref progress, .. } if progress == "qx"));
    assert!(err.to_string().starts_with("phrase not solvable"));
}

#[test]
fn custom_fallback_alphabet() {
    let table = index("riff raff", 5).expect("indexed");
    let engine = GuessEngine::with_fallback(&table, &['#', '@']);
    let mut session =
        GameSession::with_engine(engine, "ff@", PlayMode::Automatic).expect("session");
    let outcome = session.play(&mut KnownSymbol('\0')).expect("solvable");
    assert_eq!(outcome.progress, "ff@");
    // ' ' from the table, then '#', then '@'.
    assert_eq!(outcome.total_guesses, 3);
}
