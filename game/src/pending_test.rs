use super::*;

fn join() -> PendingKind {
    PendingKind::Join {
        session_code: "ABC123".to_owned(),
    }
}

#[test]
fn push_assigns_distinct_ids() {
    let mut queue = PendingQueue::default();
    let a = queue.push(PendingKind::Guess);
    let b = queue.push(PendingKind::Guess);
    assert_ne!(a, b);
    assert_eq!(queue.len(), 2);
}

#[test]
fn acknowledge_removes_oldest_matching_only() {
    let mut queue = PendingQueue::default();
    queue.push(join());
    let first_guess = queue.push(PendingKind::Guess);
    queue.push(PendingKind::Guess);

    let acked = queue
        .acknowledge(|kind| matches!(kind, PendingKind::Guess))
        .expect("guess pending");
    assert_eq!(acked.id, first_guess);
    assert_eq!(queue.len(), 2);
    assert!(matches!(queue.iter().next().map(|c| &c.kind), Some(PendingKind::Join { .. })));
}

#[test]
fn acknowledge_without_match_is_none() {
    let mut queue = PendingQueue::default();
    queue.push(PendingKind::Guess);
    assert!(queue.acknowledge(|kind| matches!(kind, PendingKind::Join { .. })).is_none());
    assert_eq!(queue.len(), 1);
}

#[test]
fn settle_all_drops_every_match() {
    let mut queue = PendingQueue::default();
    queue.push(PendingKind::Guess);
    queue.push(join());
    queue.push(PendingKind::Guess);
    assert_eq!(queue.settle_all(|kind| matches!(kind, PendingKind::Guess)), 2);
    assert_eq!(queue.len(), 1);
}

#[test]
fn reject_oldest_is_fifo() {
    let mut queue = PendingQueue::default();
    queue.push(join());
    queue.push(PendingKind::Guess);
    assert_eq!(queue.reject_oldest().map(|c| c.kind), Some(join()));
    assert_eq!(queue.reject_oldest().map(|c| c.kind), Some(PendingKind::Guess));
    assert!(queue.reject_oldest().is_none());
    assert!(queue.is_empty());
}

#[test]
fn reject_newest_takes_last_emitted() {
    let mut queue = PendingQueue::default();
    queue.push(join());
    let guess = queue.push(PendingKind::Guess);
    assert_eq!(queue.reject_newest().map(|c| c.id), Some(guess));
    assert_eq!(queue.iter().map(|c| c.kind.clone()).collect::<Vec<_>>(), vec![join()]);
}
