use vixen::Set;

#[test]
fn test_add_is_idempotent() {
    let mut set = Set::new();
    set.add("a");
    set.add("a");

    assert_eq!(set.len(), 1);
    assert!(set.has(&"a"));
}

#[test]
fn test_delete_is_idempotent() {
    let mut set: Set<&str> = ["a", "b"].into_iter().collect();

    set.delete(&"a");
    set.delete(&"a");
    set.delete(&"never-there");

    assert!(!set.has(&"a"));
    assert!(set.has(&"b"));
    assert_eq!(set.len(), 1);
}

#[test]
fn test_iterates_current_members() {
    let mut set: Set<u32> = (0..5).collect();
    set.delete(&3);
    set.extend([10, 11]);

    let mut members: Vec<u32> = set.iter().copied().collect();
    members.sort();
    assert_eq!(members, vec![0, 1, 2, 4, 10, 11]);

    let mut owned: Vec<u32> = set.into_iter().collect();
    owned.sort();
    assert_eq!(owned, vec![0, 1, 2, 4, 10, 11]);
}

#[test]
fn test_empty() {
    let set: Set<String> = Set::default();

    assert!(set.is_empty());
    assert_eq!(set.iter().count(), 0);
}
