use std::cmp::Ordering;
use trellis::{Error, PriorityQueue};

fn queue_of(items: &[i32]) -> PriorityQueue<i32, i32> {
    items.iter().map(|&x| (x, x)).collect()
}

#[test]
fn test_count_tracks_enqueue_and_dequeue() -> anyhow::Result<()> {
    let mut queue = PriorityQueue::new();
    assert_eq!(queue.len(), 0);
    for (i, x) in [5, 1, 9].into_iter().enumerate() {
        queue.enqueue(x, x);
        assert_eq!(queue.len(), i + 1);
    }
    queue.dequeue()?;
    assert_eq!(queue.len(), 2);
    queue.clear();
    assert!(queue.is_empty());
    Ok(())
}

#[test]
fn test_dequeue_is_ascending() {
    let mut queue = queue_of(&[3, 7, -4, 6, 5]);
    let mut out = Vec::new();
    while let Ok(x) = queue.dequeue() {
        out.push(x);
    }
    assert_eq!(out, vec![-4, 3, 5, 6, 7]);
}

#[test]
fn test_ties_leave_in_insertion_order() {
    let mut queue = PriorityQueue::new();
    queue.enqueue(1, "A");
    queue.enqueue(2, "B");
    queue.enqueue(2, "C");
    queue.enqueue(2, "D");
    assert_eq!(queue.into_sorted_vec(), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_ties_survive_interleaving() -> anyhow::Result<()> {
    let mut queue = PriorityQueue::new();
    queue.enqueue(0, "first zero");
    queue.enqueue(-1, "minus one");
    queue.enqueue(0, "second zero");
    assert_eq!(queue.dequeue()?, "minus one");
    queue.enqueue(0, "third zero");
    assert_eq!(queue.dequeue()?, "first zero");
    assert_eq!(queue.dequeue()?, "second zero");
    assert_eq!(queue.dequeue()?, "third zero");
    Ok(())
}

#[test]
fn test_enumeration_matches_dequeue_order_and_leaves_queue_intact() {
    let queue = queue_of(&[6, -4, 6, -3, -7, 18, -3]);
    let seen: Vec<i32> = (&queue).into_iter().copied().collect();
    assert_eq!(seen, vec![-7, -4, -3, -3, 6, 6, 18]);
    assert_eq!(queue.len(), 7);
    assert_eq!(queue.into_sorted_vec(), seen);
}

#[test]
fn test_cursor_fails_after_enqueue() {
    let mut queue = queue_of(&[1, 2]);
    let mut cursor = queue.cursor();
    queue.enqueue(0, 0);
    assert_eq!(cursor.next(&queue), Err(Error::ConcurrentModification));
}

#[test]
fn test_cursor_fails_after_dequeue() -> anyhow::Result<()> {
    let mut queue = queue_of(&[1, 2]);
    let mut cursor = queue.cursor();
    assert_eq!(cursor.next(&queue)?, Some(&1));
    queue.dequeue()?;
    assert_eq!(cursor.next(&queue), Err(Error::ConcurrentModification));
    Ok(())
}

#[test]
fn test_cursor_fails_after_clear() {
    let mut queue = queue_of(&[1]);
    let mut cursor = queue.cursor();
    queue.clear();
    assert_eq!(cursor.next(&queue), Err(Error::ConcurrentModification));
}

#[test]
fn test_cursor_walks_unmodified_queue() -> anyhow::Result<()> {
    let queue = queue_of(&[4, 2, 3]);
    let mut cursor = queue.cursor();
    let mut seen = Vec::new();
    while let Some(&x) = cursor.next(&queue)? {
        seen.push(x);
    }
    assert_eq!(seen, vec![2, 3, 4]);
    assert_eq!(cursor.remaining(), 0);
    Ok(())
}

#[test]
fn test_empty_queue_errors() {
    let mut queue: PriorityQueue<u8, ()> = PriorityQueue::default();
    assert!(matches!(queue.peek(), Err(Error::Empty(_))));
    assert!(matches!(queue.dequeue(), Err(Error::Empty(_))));
    assert!(queue.try_dequeue().is_none());
}

#[test]
fn test_comparer_over_non_ord_priorities() {
    let mut queue = PriorityQueue::with_comparer(|a: &f64, b: &f64| a.total_cmp(b));
    queue.extend([(2.5, 'c'), (-1.0, 'a'), (0.5, 'b')]);
    assert_eq!(queue.peek_entry(), Some((&-1.0, &'a')));
    assert_eq!(queue.into_sorted_vec(), vec!['a', 'b', 'c']);
}

#[test]
fn test_reverse_comparer() {
    let mut queue = PriorityQueue::with_capacity_and_comparer(3, |a: &i32, b: &i32| -> Ordering { b.cmp(a) });
    queue.extend([(1, 1), (3, 3), (2, 2)]);
    assert_eq!(queue.try_peek(), Some(&3));
    assert_eq!(queue.into_sorted_vec(), vec![3, 2, 1]);
}

#[test]
fn test_cursor_rejects_another_queue() {
    let mut first = PriorityQueue::new();
    first.enqueue(1, "first");
    let mut second = PriorityQueue::new();
    second.enqueue(1, "second");

    let mut cursor = first.cursor();
    assert_eq!(cursor.next(&second), Err(Error::ConcurrentModification));
    assert_eq!(cursor.next(&first), Ok(Some(&"first")));
}
