//! Chain scenarios: several resources driven as one logical transaction.

use std::cell::RefCell;
use std::rc::Rc;

use tandem_chain::{ChainTransactional, SharedTransactional};
use tandem_core::{TransactionError, TransactionResult, Transactional};
use tandem_resource::NestedTransactional;
use tandem_tests::{event_log, EventLog, RecordingDriver, RecordingTransactional};

fn two_member_chain(
    log: &EventLog,
) -> (
    ChainTransactional,
    Rc<RefCell<RecordingTransactional>>,
    Rc<RefCell<RecordingTransactional>>,
) {
    let a = RecordingTransactional::shared("a", log);
    let b = RecordingTransactional::shared("b", log);
    let members: Vec<SharedTransactional> = vec![a.clone(), b.clone()];
    (ChainTransactional::with_members(members), a, b)
}

#[test]
fn test_begin_forward_commit_and_rollback_reversed() {
    // GIVEN
    let log = event_log();
    let (mut chain, _a, _b) = two_member_chain(&log);

    // WHEN
    chain.begin().unwrap();
    chain.commit().unwrap();
    chain.begin().unwrap();
    chain.rollback().unwrap();

    // THEN
    assert_eq!(
        *log.borrow(),
        vec![
            "a.begin",
            "b.begin",
            "b.commit",
            "a.commit",
            "a.begin",
            "b.begin",
            "b.rollback",
            "a.rollback",
        ]
    );
}

#[test]
fn test_execute_on_a_chain_wraps_every_member() {
    // GIVEN
    let log = event_log();
    let (mut chain, _a, _b) = two_member_chain(&log);

    // WHEN
    let result = chain.execute(|_| Ok("value"));

    // THEN
    assert_eq!(result.unwrap(), "value");
    assert_eq!(
        *log.borrow(),
        vec!["a.begin", "b.begin", "b.commit", "a.commit"]
    );
}

#[test]
fn test_failed_work_rolls_back_every_member() {
    // GIVEN
    let log = event_log();
    let (mut chain, _a, _b) = two_member_chain(&log);

    // WHEN
    let result: TransactionResult<()> = chain.execute(|_| Err(TransactionError::work("x")));

    // THEN
    assert!(matches!(result, Err(TransactionError::Work(_))));
    assert_eq!(
        *log.borrow(),
        vec!["a.begin", "b.begin", "b.rollback", "a.rollback"]
    );
}

#[test]
fn test_member_commit_failure_rolls_the_rest_back() {
    // GIVEN - b commits first in the pass and refuses
    let log = event_log();
    let (mut chain, _a, b) = two_member_chain(&log);
    b.borrow_mut().fail_commit = true;
    chain.begin().unwrap();

    // WHEN
    let result = chain.commit();

    // THEN - a is driven to rollback and b's failure surfaces
    assert_eq!(
        *log.borrow(),
        vec!["a.begin", "b.begin", "b.commit", "a.rollback"]
    );
    match result {
        Err(TransactionError::Resource(source)) => {
            assert_eq!(source.to_string(), "b commit refused");
        }
        other => panic!("expected b's commit failure, got {other:?}"),
    }
}

#[test]
fn test_first_commit_failure_wins_over_later_ones() {
    // GIVEN - b's commit and a's fallback rollback both refuse
    let log = event_log();
    let (mut chain, a, b) = two_member_chain(&log);
    b.borrow_mut().fail_commit = true;
    a.borrow_mut().fail_rollback = true;
    chain.begin().unwrap();

    // WHEN
    let result = chain.commit();

    // THEN - b's failure (the first of the pass) is the one raised;
    // a's goes to the audit trail
    match result {
        Err(TransactionError::Resource(source)) => {
            assert_eq!(source.to_string(), "b commit refused");
        }
        other => panic!("expected b's commit failure, got {other:?}"),
    }
    assert_eq!(chain.errors().len(), 1);
    assert_eq!(
        chain.errors()[0].to_string(),
        "resource failure: a rollback refused"
    );
}

#[test]
fn test_member_rollback_failure_does_not_stop_the_unwind() {
    // GIVEN - b rolls back first in the pass and refuses
    let log = event_log();
    let (mut chain, _a, b) = two_member_chain(&log);
    b.borrow_mut().fail_rollback = true;
    chain.begin().unwrap();

    // WHEN
    let result = chain.rollback();

    // THEN - a still rolled back, b's failure propagates
    assert_eq!(
        *log.borrow(),
        vec!["a.begin", "b.begin", "b.rollback", "a.rollback"]
    );
    match result {
        Err(TransactionError::Resource(source)) => {
            assert_eq!(source.to_string(), "b rollback refused");
        }
        other => panic!("expected b's rollback failure, got {other:?}"),
    }
}

#[test]
fn test_chains_nest_inside_chains() {
    // GIVEN - an inner chain [b, c] sitting after a in the outer chain
    let log = event_log();
    let a = RecordingTransactional::shared("a", &log);
    let b = RecordingTransactional::shared("b", &log);
    let c = RecordingTransactional::shared("c", &log);

    let inner_members: Vec<SharedTransactional> = vec![b.clone(), c.clone()];
    let inner = Rc::new(RefCell::new(ChainTransactional::with_members(
        inner_members,
    )));
    let outer_members: Vec<SharedTransactional> = vec![a.clone(), inner];
    let mut outer = ChainTransactional::with_members(outer_members);

    // WHEN
    outer.begin().unwrap();
    outer.commit().unwrap();

    // THEN - the inner chain opens after a and closes before it,
    // reversing its own members as well
    assert_eq!(
        *log.borrow(),
        vec![
            "a.begin",
            "b.begin",
            "c.begin",
            "c.commit",
            "b.commit",
            "a.commit",
        ]
    );
}

#[test]
fn test_chain_error_handler_observes_the_work_failure() {
    // GIVEN
    let log = event_log();
    let (mut chain, _a, _b) = two_member_chain(&log);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    chain.set_error_handler(Box::new(move |error, _| {
        sink.borrow_mut().push(error.to_string());
    }));

    // WHEN
    let _ = chain.execute(|_| -> TransactionResult<()> { Err(TransactionError::work("x")) });

    // THEN
    assert_eq!(*seen.borrow(), vec!["unit of work failed: x"]);
}

#[test]
fn test_chain_over_nested_adapters_end_to_end() {
    // GIVEN - a message bus and a database, each behind its own
    // nesting-aware adapter, composed into one chain
    let log = event_log();
    let bus = Rc::new(RefCell::new(NestedTransactional::new(
        RecordingDriver::new("bus", &log),
    )));
    let db = Rc::new(RefCell::new(NestedTransactional::new(RecordingDriver::new(
        "db", &log,
    ))));
    let members: Vec<SharedTransactional> = vec![bus.clone(), db.clone()];
    let mut chain = ChainTransactional::with_members(members);

    // WHEN
    chain
        .execute(|_| Ok(()))
        .expect("both resources should commit");

    // THEN - bus opened first, db closed first
    assert_eq!(
        *log.borrow(),
        vec!["bus.start", "db.start", "db.commit", "bus.commit"]
    );
    assert!(!bus.borrow().is_active());
    assert!(!db.borrow().is_active());
}
