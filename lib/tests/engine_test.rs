#[macro_use]
extern crate assert_matches;

use wordle_assist::*;

fn bank(words: Vec<(&str, u64)>) -> WordBank {
    WordBank::from_entries(5, words)
}

fn words(candidates: &[Candidate]) -> Vec<&str> {
    candidates
        .iter()
        .map(|candidate| candidate.word.as_ref())
        .collect()
}

#[test]
fn all_words_are_candidates_before_any_feedback() {
    let bank = bank(vec![("CRANE", 100), ("SALAD", 90), ("ABYSS", 50)]);
    let session = Session::new(&bank);

    assert_eq!(words(&session.candidates()), vec!["CRANE", "SALAD", "ABYSS"]);
}

#[test]
fn round_with_yellow_and_black_letters() -> Result<(), SolverError> {
    let bank = bank(vec![
        ("CRATE", 100),
        ("SALAD", 90),
        ("ABYSS", 50),
        ("SPARE", 40),
    ]);
    let mut session = Session::new(&bank);

    // C, R, N, E are absent; A is present but not third.
    let candidates =
        session.apply_feedback(&GuessFeedback::from_strings("CRANE", "bbybb")?)?;

    assert_eq!(words(&candidates), vec!["SALAD", "ABYSS"]);
    let model = session.model();
    assert_eq!(model.skeleton().to_string(), "_____");
    assert_eq!(model.letter('A').unwrap().min_count(), 1);
    for letter in ['C', 'R', 'N', 'E'] {
        assert_eq!(model.letter(letter).unwrap().max_count(), 0);
    }
    Ok(())
}

#[test]
fn round_with_green_and_duplicate_letter() -> Result<(), SolverError> {
    let bank = bank(vec![
        ("APACE", 100),
        ("UPPER", 90),
        ("SPEED", 80),
        ("OPENS", 70),
    ]);
    let mut session = Session::new(&bank);

    // P is pinned second; the first E is present elsewhere, the second E is
    // black, so exactly one E exists beyond the pinned letters.
    let candidates =
        session.apply_feedback(&GuessFeedback::from_strings("SPEED", "bgybb")?)?;

    assert_eq!(words(&candidates), vec!["APACE"]);
    let model = session.model();
    assert_eq!(model.skeleton().to_string(), "_P___");
    let e = model.letter('E').unwrap();
    assert_eq!(e.min_count(), 1);
    assert_eq!(e.max_count(), 1);
    Ok(())
}

#[test]
fn candidate_sets_shrink_monotonically() -> Result<(), SolverError> {
    let bank = bank(vec![
        ("CRATE", 100),
        ("SALAD", 90),
        ("ABYSS", 80),
        ("SPARE", 70),
        ("ALOFT", 60),
        ("GHOST", 50),
    ]);
    let mut session = Session::new(&bank);
    let initial = session.candidates();

    let first = session.apply_feedback(&GuessFeedback::from_strings("CRANE", "bbybb")?)?;
    let second = session.apply_feedback(&GuessFeedback::from_strings("SALON", "yybbb")?)?;

    assert!(!second.is_empty());
    assert!(first.iter().all(|candidate| initial.contains(candidate)));
    assert!(second.iter().all(|candidate| first.contains(candidate)));
    Ok(())
}

#[test]
fn filter_depends_only_on_the_model() -> Result<(), SolverError> {
    let bank = bank(vec![
        ("CRATE", 100),
        ("SALAD", 90),
        ("ABYSS", 80),
        ("SPARE", 70),
    ]);
    let mut threaded = EligibilityModel::new(5);
    threaded = threaded.with_feedback(&GuessFeedback::from_strings("CRANE", "bbybb")?)?;
    threaded = threaded.with_feedback(&GuessFeedback::from_strings("ABYSS", "ybbyb")?)?;

    let once = filter_candidates(&bank, &threaded);
    let again = filter_candidates(&bank, &threaded);

    assert_eq!(once, again);
    Ok(())
}

#[test]
fn replaying_the_same_feedback_yields_the_same_candidates() -> Result<(), SolverError> {
    let bank = bank(vec![
        ("CRATE", 100),
        ("SALAD", 90),
        ("ABYSS", 80),
        ("SPARE", 70),
        ("ALOFT", 60),
    ]);
    let rounds = [("CRANE", "bbybb"), ("SALON", "yybbb")];

    let mut first_session = Session::new(&bank);
    let mut second_session = Session::new(&bank);
    let mut first_result = Vec::new();
    let mut second_result = Vec::new();
    for (guess, colors) in rounds {
        first_result = first_session.apply_feedback(&GuessFeedback::from_strings(guess, colors)?)?;
        second_result =
            second_session.apply_feedback(&GuessFeedback::from_strings(guess, colors)?)?;
    }

    assert_eq!(first_result, second_result);
    Ok(())
}

#[test]
fn pinned_positions_survive_later_feedback() -> Result<(), SolverError> {
    let bank = bank(vec![("SPARE", 100), ("SPEND", 90), ("SPINE", 80)]);
    let mut session = Session::new(&bank);

    session.apply_feedback(&GuessFeedback::from_strings("SPEED", "ggbbb")?)?;
    assert_eq!(session.model().skeleton().to_string(), "SP___");

    session.apply_feedback(&GuessFeedback::from_strings("SPARE", "ggybb")?)?;
    assert_eq!(session.model().skeleton().get(0), Some('S'));
    assert_eq!(session.model().skeleton().get(1), Some('P'));
    Ok(())
}

#[test]
fn bounds_only_tighten_across_rounds() -> Result<(), SolverError> {
    let mut model = EligibilityModel::new(5);

    model = model.with_feedback(&GuessFeedback::from_strings("ALOFT", "ybbbb")?)?;
    let after_one = model.letter('A').unwrap().clone();
    model = model.with_feedback(&GuessFeedback::from_strings("ALLAY", "ybbyb")?)?;
    let after_two = model.letter('A').unwrap().clone();

    assert!(after_two.min_count() >= after_one.min_count());
    assert!(after_two.max_count() <= after_one.max_count());
    Ok(())
}

#[test]
fn session_narrows_to_a_unique_solution() -> Result<(), SolverError> {
    let bank = bank(vec![("CRATE", 100), ("SALAD", 90), ("SPARE", 80)]);
    let mut session = Session::new(&bank);

    let candidates =
        session.apply_feedback(&GuessFeedback::from_strings("CRATE", "bygbg")?)?;

    assert_eq!(words(&candidates), vec!["SPARE"]);
    Ok(())
}

#[test]
fn feedback_can_eliminate_every_candidate() -> Result<(), SolverError> {
    let bank = bank(vec![("CRATE", 100), ("SALAD", 90)]);
    let mut session = Session::new(&bank);

    let candidates =
        session.apply_feedback(&GuessFeedback::from_strings("ZZZZZ", "yyyyy")?)?;

    assert!(candidates.is_empty());
    Ok(())
}

#[test]
fn contradictory_feedback_leaves_the_session_model_intact() -> Result<(), SolverError> {
    let bank = bank(vec![("CRATE", 100), ("SALAD", 90)]);
    let mut session = Session::new(&bank);
    session.apply_feedback(&GuessFeedback::from_strings("ALLAY", "ybbyb")?)?;
    let before = session.model().clone();

    let result = session.apply_feedback(&GuessFeedback::from_strings("ABACK", "ybbbb")?);

    assert_matches!(result, Err(SolverError::ContradictoryFeedback('A', 2, 1)));
    assert_eq!(*session.model(), before);
    Ok(())
}
