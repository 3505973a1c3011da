mod common;

use common::*;
use proptest::prelude::*;

const POOL: usize = 8;

#[derive(Clone, Debug)]
enum Step {
    /// Play pool track `i % POOL` at queue index `i`, which may be out of range
    Play(usize),
    Next,
    Previous,
    Finish,
    Toggle,
    /// Replace the queue with the last `n` pool tracks
    SetQueue(usize),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0usize..12).prop_map(Step::Play),
        Just(Step::Next),
        Just(Step::Previous),
        Just(Step::Finish),
        Just(Step::Toggle),
        (1usize..=POOL).prop_map(Step::SetQueue),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn never_more_than_one_live_sound(
        len in 1usize..=POOL,
        silent in prop::collection::vec(any::<bool>(), POOL),
        steps in prop::collection::vec(step_strategy(), 1..24),
    ) {
        let (max_live, live) = runtime().block_on(async {
            let h = harness();
            let pool: Vec<_> = (0..POOL)
                .map(|i| {
                    let id = format!("t{i}");
                    if silent[i] { silent_track(&id) } else { track(&id) }
                })
                .collect();
            h.session.set_queue(pool[..len].to_vec()).await;

            for step in steps {
                match step {
                    Step::Play(i) => {
                        h.session.play(pool[i % POOL].clone(), i).await;
                    }
                    Step::Next => h.session.play_next().await,
                    Step::Previous => h.session.play_previous().await,
                    Step::Toggle => h.session.toggle_play_pause().await,
                    Step::Finish => {
                        if let Some(sink) = h.engine.last_sink() {
                            h.session.handle_status(finished(&sink)).await;
                        }
                    }
                    Step::SetQueue(n) => h.session.set_queue(pool[POOL - n..].to_vec()).await,
                }
                assert!(h.engine.live() <= 1);

                let info = h.session.snapshot().await;
                let index = info.current_index.expect("queue is never empty");
                assert!(index < info.queue_len, "index {index} past queue of {}", info.queue_len);
            }
            (h.engine.max_live(), h.engine.live())
        });

        prop_assert!(max_live <= 1);
        prop_assert!(live <= 1);
    }

    #[test]
    fn next_wraps_previous_clamps(len in 1usize..10, start_seed in 0usize..10) {
        let start = start_seed % len;
        let (after_next, after_previous) = runtime().block_on(async {
            let h = harness();
            let queue: Vec<_> = (0..len).map(|i| track(&format!("t{i}"))).collect();
            h.session.set_queue(queue.clone()).await;

            h.session.play(queue[start].clone(), start).await;
            h.session.play_next().await;
            let after_next = h.session.snapshot().await.current_index;

            h.session.play(queue[start].clone(), start).await;
            h.session.play_previous().await;
            let after_previous = h.session.snapshot().await.current_index;

            (after_next, after_previous)
        });

        prop_assert_eq!(after_next, Some((start + 1) % len));
        prop_assert_eq!(after_previous, Some(start.saturating_sub(1)));
    }
}
