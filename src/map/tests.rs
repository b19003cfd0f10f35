use crate::handle::{Handle, FaceHandle};
use super::Arena;


#[test]
fn push_get_remove() {
    let mut arena = Arena::<FaceHandle, &str>::new();
    assert!(arena.is_empty());

    let a = arena.push("anna");
    let b = arena.push("bob");
    assert_eq!(arena.num_elements(), 2);
    assert_eq!(arena[a], "anna");
    assert_eq!(arena.get(b), Some(&"bob"));

    assert_eq!(arena.remove(a), Some("anna"));
    assert_eq!(arena.remove(a), None);
    assert!(!arena.contains_handle(a));
    assert_eq!(arena.num_elements(), 1);
}

#[test]
fn reused_slot_has_new_generation() {
    let mut arena = Arena::<FaceHandle, u32>::new();
    let a = arena.push(1);
    arena.remove(a);
    let b = arena.push(2);

    assert_eq!(a.idx(), b.idx());
    assert_ne!(a, b);
    assert_eq!(arena.get(a), None);
    assert_eq!(arena.get(b), Some(&2));
}

#[test]
fn clear_invalidates_everything() {
    let mut arena = Arena::<FaceHandle, u32>::new();
    let handles = (0..5).map(|i| arena.push(i)).collect::<Vec<_>>();
    arena.clear();

    assert_eq!(arena.num_elements(), 0);
    assert!(arena.handles().next().is_none());
    for &h in &handles {
        assert!(!arena.contains_handle(h));
    }

    // Slots are reused in index order after `clear`.
    let fresh = arena.push(10);
    assert_eq!(fresh.idx(), 0);
    assert_ne!(fresh, handles[0]);
}

#[test]
fn iteration_skips_holes() {
    let mut arena = Arena::<FaceHandle, char>::new();
    let a = arena.push('a');
    let b = arena.push('b');
    let c = arena.push('c');
    arena.remove(b);

    assert_eq!(arena.handles().collect::<Vec<_>>(), vec![a, c]);
    assert_eq!(arena.iter().map(|(_, &v)| v).collect::<String>(), "ac");
    assert_eq!(arena.values().count(), 2);
}

#[test]
#[should_panic(expected = "stale or foreign handle")]
fn index_with_stale_handle_panics() {
    let mut arena = Arena::<FaceHandle, u32>::new();
    let a = arena.push(3);
    arena.remove(a);
    let _ = arena[a];
}
