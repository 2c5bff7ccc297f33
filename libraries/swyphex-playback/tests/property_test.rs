//! Property-based tests for queue navigation and the transport controller
//!
//! Uses proptest to verify invariants across many random inputs.

mod common;

use common::{controller, create_item, finish_current, start_playing};
use proptest::prelude::*;
use std::collections::HashSet;
use swyphex_playback::{
    AdapterEvent, PlayableItem, Queue, QueueMove, RepeatMode, TransportState,
};

// ===== Helpers =====

fn items(count: usize) -> Vec<PlayableItem> {
    (0..count).map(|i| create_item(&format!("t{}", i))).collect()
}

fn arbitrary_repeat() -> impl Strategy<Value = RepeatMode> {
    prop_oneof![
        Just(RepeatMode::Off),
        Just(RepeatMode::All),
        Just(RepeatMode::One),
    ]
}

// ===== Property Tests =====

proptest! {
    /// Property: sequential advance never wraps without repeat
    #[test]
    fn sequential_advance_visits_in_order_then_stops(len in 1usize..40) {
        let mut queue = Queue::new(None);
        queue.set_queue(items(len), None).unwrap();

        let mut visited = vec![queue.current_index().unwrap()];
        loop {
            match queue.advance().unwrap() {
                QueueMove::Moved(i) => visited.push(i),
                QueueMove::Exhausted(i) => {
                    prop_assert_eq!(i, len - 1);
                    break;
                }
                QueueMove::Unchanged(_) => prop_assert!(false, "unchanged without repeat one"),
            }
        }

        prop_assert_eq!(visited, (0..len).collect::<Vec<_>>());
    }

    /// Property: repeat all cycles forever
    #[test]
    fn repeat_all_never_exhausts(len in 1usize..20, steps in 1usize..200, shuffle in any::<bool>(), seed in any::<u64>()) {
        let mut queue = Queue::new(Some(seed));
        queue.set_queue(items(len), None).unwrap();
        queue.set_repeat_mode(RepeatMode::All);
        queue.set_shuffle(shuffle);

        for _ in 0..steps {
            let step = queue.advance().unwrap();
            prop_assert!(matches!(step, QueueMove::Moved(_)), "got {:?}", step);
            prop_assert!(step.index() < len);
        }
    }

    /// Property: shuffle visits every index exactly once per cycle
    #[test]
    fn shuffle_full_cycle(len in 1usize..30, start in 0usize..30, seed in any::<u64>()) {
        let start = start % len;
        let mut queue = Queue::new(Some(seed));
        queue.set_queue(items(len), Some(start)).unwrap();
        queue.toggle_shuffle();

        let mut seen = HashSet::from([start]);
        let mut previous = start;
        for _ in 1..len {
            let step = queue.advance().unwrap();
            prop_assert!(matches!(step, QueueMove::Moved(_)));
            prop_assert_ne!(step.index(), previous);
            prop_assert!(seen.insert(step.index()), "index {} repeated", step.index());
            previous = step.index();
        }
        prop_assert_eq!(seen.len(), len);
    }

    /// Property: shuffle with repeat all never repeats the immediate prior index
    #[test]
    fn shuffle_no_immediate_repeat(len in 2usize..12, steps in 1usize..100, seed in any::<u64>()) {
        let mut queue = Queue::new(Some(seed));
        queue.set_queue(items(len), None).unwrap();
        queue.set_repeat_mode(RepeatMode::All);
        queue.toggle_shuffle();

        let mut previous = 0;
        for _ in 0..steps {
            let next = queue.advance().unwrap().index();
            prop_assert_ne!(next, previous);
            previous = next;
        }
    }

    /// Property: current index stays in bounds under any operation mix
    #[test]
    fn current_index_in_bounds(
        len in 1usize..15,
        repeat in arbitrary_repeat(),
        ops in prop::collection::vec(0u8..6, 1..60),
        seed in any::<u64>()
    ) {
        let mut queue = Queue::new(Some(seed));
        queue.set_queue(items(len), None).unwrap();
        queue.set_repeat_mode(repeat);

        for op in ops {
            match op {
                0 => { queue.advance().unwrap(); }
                1 => { queue.retreat().unwrap(); }
                2 => { queue.skip_forward().unwrap(); }
                3 => { queue.skip_backward().unwrap(); }
                4 => { queue.toggle_shuffle(); }
                _ => { queue.select(len / 2).unwrap(); }
            }
            let current = queue.current_index().unwrap();
            prop_assert!(current < len);
        }
    }

    /// Property: toggling shuffle never changes the current item or the order
    #[test]
    fn toggle_shuffle_preserves_current(len in 1usize..20, start in 0usize..20, toggles in 1usize..6) {
        let start = start % len;
        let mut queue = Queue::new(None);
        let original = items(len);
        queue.set_queue(original.clone(), Some(start)).unwrap();

        for _ in 0..toggles {
            queue.toggle_shuffle();
            prop_assert_eq!(queue.current_index(), Some(start));
        }
        prop_assert_eq!(queue.items(), original.as_slice());
    }

    /// Property: every item switch resets position and duration
    #[test]
    fn switching_resets_position(len in 2usize..10, target in 0usize..10, position in 0.0f64..500.0) {
        let target = target % len;
        let mut ctl = controller();
        ctl.play_queue(items(len), None).unwrap();
        start_playing(&mut ctl, 600.0);
        let generation = ctl.generation();
        ctl.handle_event(AdapterEvent::time_progressed(generation, position));

        ctl.select(target).unwrap();
        prop_assert_eq!(ctl.position(), 0.0);
        prop_assert_eq!(ctl.duration(), None);
        prop_assert_eq!(ctl.state(), TransportState::Loading);
        prop_assert!(ctl.generation() > generation);
    }

    /// Property: a stale ended never moves the queue
    #[test]
    fn stale_ended_never_advances(len in 6usize..12, skips in 1usize..5) {
        let mut ctl = controller();
        ctl.play_queue(items(len), None).unwrap();
        start_playing(&mut ctl, 60.0);

        let mut stale = Vec::new();
        for _ in 0..skips {
            stale.push(ctl.generation());
            ctl.next().ok();
        }

        let index = ctl.queue().current_index();
        for generation in stale {
            ctl.handle_event(AdapterEvent::ended(generation));
        }
        prop_assert_eq!(ctl.queue().current_index(), index);
    }

    /// Property: playing through a queue with repeat one never leaves the first item
    #[test]
    fn repeat_one_pins_natural_end(len in 1usize..8, ends in 1usize..20) {
        let mut ctl = controller();
        ctl.set_repeat_mode(RepeatMode::One);
        ctl.play_queue(items(len), None).unwrap();
        start_playing(&mut ctl, 30.0);

        for _ in 0..ends {
            finish_current(&mut ctl);
            ctl.handle_event(AdapterEvent::playback_started(ctl.generation()));
        }
        prop_assert_eq!(ctl.queue().current_index(), Some(0));
        prop_assert!(ctl.is_playing());
    }
}
