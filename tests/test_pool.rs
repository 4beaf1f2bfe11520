use arcade_shooter::pool::{Pool, SlotIndex};

#[test]
fn new_pool_is_empty() {
    let pool: Pool<u32> = Pool::with_capacity(4);
    assert_eq!(pool.capacity(), 4);
    assert_eq!(pool.active_count(), 0);
    assert_eq!(pool.free_count(), 4);
    assert!(!pool.is_full());
    assert_eq!(pool.iter().count(), 0);
}

#[test]
fn spawn_is_first_fit() {
    let mut pool = Pool::with_capacity(3);
    assert_eq!(pool.spawn('a'), Some(SlotIndex(0)));
    assert_eq!(pool.spawn('b'), Some(SlotIndex(1)));
    assert_eq!(pool.spawn('c'), Some(SlotIndex(2)));

    pool.despawn(SlotIndex(1));
    assert_eq!(pool.spawn('d'), Some(SlotIndex(1)));
    assert_eq!(pool.get(SlotIndex(1)), Some(&'d'));
}

#[test]
fn spawn_into_full_pool_is_dropped() {
    let mut pool = Pool::with_capacity(2);
    pool.spawn(1);
    pool.spawn(2);
    let before = pool.clone();
    assert_eq!(pool.spawn(3), None);
    assert_eq!(pool, before);
    assert!(pool.is_full());
}

#[test]
fn zero_capacity_pool_never_spawns() {
    let mut pool = Pool::with_capacity(0);
    assert_eq!(pool.spawn(1), None);
    assert!(pool.is_full());
}

#[test]
fn despawn_returns_the_entity() {
    let mut pool = Pool::with_capacity(2);
    let slot = pool.spawn("ship").unwrap();
    assert!(pool.is_active(slot));
    assert_eq!(pool.despawn(slot), Some("ship"));
    assert!(!pool.is_active(slot));
    assert_eq!(pool.despawn(slot), None);
}

#[test]
fn despawn_out_of_range_is_a_no_op() {
    let mut pool: Pool<u8> = Pool::with_capacity(2);
    assert_eq!(pool.despawn(SlotIndex(7)), None);
    assert_eq!(pool.get(SlotIndex(7)), None);
}

#[test]
fn iter_skips_inactive_slots() {
    let mut pool = Pool::with_capacity(4);
    for v in [10, 20, 30, 40] {
        pool.spawn(v);
    }
    pool.despawn(SlotIndex(0));
    pool.despawn(SlotIndex(2));
    let live: Vec<(SlotIndex, i32)> = pool.iter().map(|(s, v)| (s, *v)).collect();
    assert_eq!(live, vec![(SlotIndex(1), 20), (SlotIndex(3), 40)]);
}

#[test]
fn iter_mut_updates_in_place() {
    let mut pool = Pool::with_capacity(3);
    pool.spawn(1);
    pool.spawn(2);
    for (_, v) in pool.iter_mut() {
        *v *= 10;
    }
    assert_eq!(pool.get(SlotIndex(0)), Some(&10));
    assert_eq!(pool.get(SlotIndex(1)), Some(&20));
}

#[test]
fn despawn_while_walking_slot_indices() {
    let mut pool = Pool::with_capacity(5);
    for v in 0..5 {
        pool.spawn(v);
    }
    for slot in pool.slot_indices() {
        if pool.get(slot).is_some_and(|v| v % 2 == 0) {
            pool.despawn(slot);
        }
    }
    let live: Vec<i32> = pool.iter().map(|(_, v)| *v).collect();
    assert_eq!(live, vec![1, 3]);
    assert_eq!(pool.capacity(), 5);
}
