use quiz_core::model::{AnswerKey, Correctness, OptionLabel, OptionMark, QuestionId};
use quiz_core::time::fixed_clock;
use services::{QuizSession, SessionError, SharedQuizSession};

fn qid(id: u64) -> QuestionId {
    QuestionId::new(id).unwrap()
}

#[test]
fn visitor_works_through_the_banca_exata_page() {
    let mut session = QuizSession::new(AnswerKey::banca_exata());

    // Answers the first three, gets one wrong, peeks at the fourth.
    session.record_selection(qid(1), "B").unwrap();
    session.record_selection(qid(2), "A").unwrap();
    session.record_selection(qid(3), "D").unwrap();
    for id in 1..=4 {
        assert!(session.toggle_reveal(qid(id)).unwrap());
    }

    let stats = session.stats();
    assert_eq!(stats.total, 8);
    assert_eq!(stats.answered_count, 3);
    assert_eq!(stats.correct_count, 2);
    assert_eq!(stats.viewed_count, 4);
    assert_eq!(stats.accuracy_percent, 66.7);

    let peeked = session.display_state(qid(4)).unwrap();
    assert!(!peeked.answered);
    assert_eq!(peeked.correct, Correctness::Unknown);
    assert_eq!(peeked.answer, Some(OptionLabel::from("C")));

    assert_eq!(
        session
            .option_feedback(qid(2), &OptionLabel::from("A"))
            .unwrap(),
        OptionMark::Incorrect
    );

    // Fixes question 2 while it is still shown: grade is stale until re-shown.
    session.record_selection(qid(2), "D").unwrap();
    assert_eq!(session.stats().correct_count, 2);
    session.toggle_reveal(qid(2)).unwrap();
    session.toggle_reveal(qid(2)).unwrap();
    assert_eq!(session.stats().correct_count, 3);
    assert_eq!(session.stats().accuracy_percent, 100.0);

    // Show everything, then hide everything: viewed sticks.
    assert_eq!(session.set_all_revealed(true), 4);
    assert_eq!(session.set_all_revealed(true), 0);
    assert_eq!(session.set_all_revealed(false), 8);
    assert_eq!(session.stats().viewed_count, 8);

    let export = session.export(&fixed_clock());
    assert_eq!(export.questions().len(), 8);
    assert_eq!(export.stats(), &session.stats());

    session.reset_all();
    let stats = session.stats();
    assert_eq!(stats.answered_count, 0);
    assert_eq!(stats.viewed_count, 0);
    assert_eq!(stats.accuracy_percent, 0.0);
}

#[test]
fn unknown_questions_are_reported_not_ignored() {
    let mut session = QuizSession::new("1=B,2=D".parse().unwrap());
    let err = session.toggle_reveal(qid(3)).unwrap_err();
    assert_eq!(err.to_string(), "question 3 is not part of the answer key");
    assert!(matches!(err, SessionError::UnknownQuestion(id) if id == qid(3)));
    assert_eq!(session.stats().viewed_count, 0);
}

#[test]
fn shared_handle_exposes_the_same_operations() {
    let shared = SharedQuizSession::new("1=B,2=D".parse().unwrap());
    shared.record_selection(qid(1), "B").unwrap();
    shared.toggle_reveal(qid(1)).unwrap();
    shared.record_selection(qid(2), "A").unwrap();

    let stats = shared.stats();
    assert_eq!(stats.answered_count, 2);
    assert_eq!(stats.correct_count, 1);
    assert_eq!(stats.viewed_count, 1);
    assert_eq!(stats.accuracy_percent, 50.0);

    assert_eq!(shared.set_all_revealed(true), 1);
    assert_eq!(shared.snapshot().len(), 2);
    shared.reset_all();
    assert_eq!(shared.stats().answered_count, 0);
}
