use std::cell::RefCell;
use std::rc::Rc;
use trellis::collections::{MutableSet, ObservableSet, Set, SetChanged};

fn sorted<'a>(items: impl Iterator<Item = &'a i32>) -> Vec<i32> {
    let mut v: Vec<i32> = items.copied().collect();
    v.sort_unstable();
    v
}

#[test]
fn test_set_behaves_like_a_set() {
    let mut set: Set<i32> = [1, 2, 2, 3].into_iter().collect();
    assert_eq!(set.len(), 3);
    assert!(set.insert(4));
    assert!(!set.insert(4));
    assert!(set.remove(&1));
    assert!(set.contains(&2));
    assert_eq!(sorted(set.iter()), vec![2, 3, 4]);
    assert_eq!(set, [4, 3, 2].into_iter().collect::<Set<i32>>());
}

#[test]
fn test_remove_where_and_except_with() {
    let mut set: Set<i32> = (1..=10).collect();
    assert_eq!(set.remove_where(|x| x % 2 == 1), Ok(5));
    assert_eq!(set.except_with([2, 4, 11]), Ok(2));
    assert_eq!(sorted(set.iter()), vec![6, 8, 10]);
}

#[test]
fn test_observable_set_reports_bulk_operations() {
    let mut set = ObservableSet::new();
    let log = Rc::new(RefCell::new(Vec::<SetChanged<i32>>::new()));
    let sink = Rc::clone(&log);
    set.on_changed(move |e| sink.borrow_mut().push(e.clone()));

    set.union_with([1, 2, 2]).unwrap();
    set.except_with([2, 3]).unwrap();
    set.clear();

    let log = log.borrow();
    let added: Vec<i32> = log.iter().flat_map(|e| e.added.iter().copied()).collect();
    let removed: Vec<i32> = log.iter().flat_map(|e| e.removed.iter().copied()).collect();
    assert_eq!(added, vec![1, 2]);
    assert_eq!(removed, vec![2, 1]);
    assert_eq!(log.len(), 4);
    assert!(set.as_set().is_empty());
}
