//! Property tests for the pull protocol and the combinator chain.

use proptest::prelude::*;

use crate::{
    build::{from_iter, fuse},
    error::PullError,
    iterate::iterate,
    producer::{Controllable, Producer, ProducerState},
    step::Step,
    testing::{Naturals, TestError},
};

proptest! {
    #[test]
    fn prop_finished_producer_stays_finished(len in 0_usize..8, extra in 1_usize..6) {
        let mut source = fuse(from_iter(0..len));
        for _ in 0..len {
            prop_assert!(source.pull().unwrap().is_yield());
        }
        for _ in 0..extra {
            prop_assert_eq!(source.pull().unwrap(), Step::Done(()));
            prop_assert_eq!(source.close(()).unwrap(), Step::Done(()));
        }
        prop_assert_eq!(source.state(), ProducerState::Completed);
    }

    #[test]
    fn prop_take_yields_at_most_n(len in 0_usize..20, n in 0_usize..20) {
        let taken = fuse(from_iter(0..len)).take(n).iter_collect().unwrap();
        prop_assert_eq!(taken.len(), len.min(n));
    }

    #[test]
    fn prop_skip_then_take_is_a_window(n in 0_u64..30, m in 0_usize..30) {
        let window = Naturals::generator().skip(n as usize).take(m).iter_collect().unwrap();
        let expected: Vec<u64> = (n..n + m as u64).collect();
        prop_assert_eq!(window, expected);
    }

    #[test]
    fn prop_transform_preserves_order_and_count(items in prop::collection::vec(any::<i32>(), 0..32)) {
        let mapped = fuse(from_iter(items.clone()))
            .transform(|x| i64::from(x) * 3)
            .iter_collect()
            .unwrap();
        let expected: Vec<i64> = items.iter().map(|&x| i64::from(x) * 3).collect();
        prop_assert_eq!(mapped, expected);
    }

    #[test]
    fn prop_early_exit_closes_exactly_once(stop in 0_usize..10, skip in 0_usize..5) {
        let (naturals, probe) = Naturals::probed();
        let mut chain = naturals.skip(skip).transform(|x| x * 2).take(10);

        for (i, item) in iterate(&mut chain).enumerate() {
            prop_assert!(item.is_ok());
            if i == stop {
                break;
            }
        }
        prop_assert_eq!(probe.closes(), 1);
        prop_assert_eq!(chain.close(()).unwrap(), Step::Done(()));
        prop_assert_eq!(probe.closes(), 1);
    }

    #[test]
    fn prop_unhandled_inject_completes(pulls in 1_usize..10) {
        let (mut naturals, probe) = Naturals::probed();
        for _ in 0..pulls {
            naturals.pull().unwrap();
        }

        prop_assert_eq!(
            naturals.inject(TestError::Boom).unwrap_err(),
            PullError::Injected(TestError::Boom)
        );
        prop_assert_eq!(naturals.state(), ProducerState::Completed);
        prop_assert_eq!(naturals.pull().unwrap(), Step::Done(()));
        prop_assert_eq!(probe.closes(), 0);
    }
}
