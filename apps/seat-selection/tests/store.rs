//! End-to-end session tests through the tokio store.

#![allow(clippy::unwrap_used)] // Test code

use seat_selection::{
    CoachType, PartySize, RecordingPresenter, RenderInstruction, SeatCatalog, SeatId,
    SessionAction, SessionEnvironment, SessionReducer, SessionState,
};
use seating_runtime::{Store, StoreError};
use seating_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

const TTL: Duration = Duration::from_millis(20);
const WAIT: Duration = Duration::from_secs(2);

type SessionStore = Store<SessionState, SessionAction, SessionEnvironment, SessionReducer>;

fn store(coach: CoachType, party: u32) -> (SessionStore, RecordingPresenter) {
    store_with_ttl(coach, party, TTL)
}

fn store_with_ttl(coach: CoachType, party: u32, ttl: Duration) -> (SessionStore, RecordingPresenter) {
    let presenter = RecordingPresenter::new();
    let catalog = Arc::new(SeatCatalog::standard());
    let state = SessionState::new(&catalog, coach, PartySize::new(party).unwrap());
    let env = SessionEnvironment::new(Arc::new(test_clock()), Arc::new(presenter.clone()), catalog)
        .with_notification_ttl(ttl);
    (Store::new(state, SessionReducer::new(), env), presenter)
}

async fn send_and_settle(store: &SessionStore, action: SessionAction) {
    let mut handle = store.send(action).await.unwrap();
    handle.wait_with_timeout(WAIT).await.unwrap();
}

async fn eventually<F: Fn() -> bool>(condition: F) {
    tokio::time::timeout(WAIT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn initialize_draws_the_form() {
    let (store, presenter) = store(CoachType::SecondSitting, 2);
    send_and_settle(&store, SessionAction::Initialize).await;

    let instructions = presenter.instructions();
    assert!(matches!(
        &instructions[0],
        RenderInstruction::RenderSeatMap { seat_map, .. } if seat_map.len() == 108
    ));
    assert!(instructions.contains(&RenderInstruction::RenderSelectionCount { selected: 0, max: 2 }));
    assert!(instructions.contains(&RenderInstruction::SetConfirmEnabled(false)));
}

#[tokio::test]
async fn full_booking_flow() {
    let (store, presenter) = store(CoachType::AcTwoTier, 2);
    send_and_settle(&store, SessionAction::Initialize).await;
    for action in [
        SessionAction::PassengerNameChanged {
            name: "Kiran".to_string(),
        },
        SessionAction::SeatClicked {
            seat_id: SeatId::from("2LB"),
        },
        SessionAction::SeatClicked {
            seat_id: SeatId::from("4UB"),
        },
    ] {
        send_and_settle(&store, action).await;
    }
    assert!(presenter
        .instructions()
        .iter()
        .rev()
        .find(|i| matches!(i, RenderInstruction::SetConfirmEnabled(_)))
        .is_some_and(|i| *i == RenderInstruction::SetConfirmEnabled(true)));

    presenter.take();
    send_and_settle(&store, SessionAction::ConfirmRequested).await;

    let booked = store.state(|s| s.booked(CoachType::AcTwoTier)).await;
    assert_eq!(booked, [SeatId::from("2LB"), SeatId::from("4UB")]);
    assert!(store.state(|s| s.selection().is_empty()).await);
    assert!(presenter.instructions().iter().any(|i| matches!(
        i,
        RenderInstruction::ShowReceipt(receipt)
            if receipt.to_string().ends_with("Seats: 2LB (LB), 4UB (UB)")
    )));
}

#[tokio::test]
async fn notification_expires_through_the_store() {
    let (store, presenter) = store(CoachType::ChairCar, 1);
    send_and_settle(&store, SessionAction::Initialize).await;

    let expired = store
        .send_and_wait_for(
            SessionAction::ClearRequested,
            |action| matches!(action, SessionAction::NotificationExpired { .. }),
            WAIT,
        )
        .await
        .unwrap();
    let SessionAction::NotificationExpired { id } = expired else {
        unreachable!("predicate only matches expiries");
    };

    eventually(|| {
        presenter
            .instructions()
            .contains(&RenderInstruction::DismissNotification(id))
    })
    .await;
    assert!(store.state(|s| s.notification().is_none()).await);
}

#[tokio::test]
async fn stale_expiry_does_not_dismiss_newer_notification() {
    let (store, presenter) = store_with_ttl(CoachType::ChairCar, 1, Duration::from_millis(500));
    send_and_settle(&store, SessionAction::Initialize).await;

    let mut cleared = store.send(SessionAction::ClearRequested).await.unwrap();
    let first = store.state(|s| s.notification().map(|n| n.id)).await.unwrap();
    let _ = store
        .send(SessionAction::SeatClicked {
            seat_id: SeatId::from("1C"),
        })
        .await
        .unwrap();
    let mut warned = store
        .send(SessionAction::SeatClicked {
            seat_id: SeatId::from("1D"),
        })
        .await
        .unwrap();
    let second = store.state(|s| s.notification().map(|n| n.id)).await.unwrap();
    assert_ne!(first, second);

    cleared.wait_with_timeout(WAIT).await.unwrap();
    warned.wait_with_timeout(WAIT).await.unwrap();
    eventually(|| {
        presenter
            .instructions()
            .contains(&RenderInstruction::DismissNotification(second))
    })
    .await;

    assert!(
        !presenter
            .instructions()
            .contains(&RenderInstruction::DismissNotification(first))
    );
    assert!(store.state(|s| s.notification().is_none()).await);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn render_batches_follow_intent_order() {
    for _ in 0..10 {
        let (store, presenter) = store(CoachType::ChairCar, 1);
        send_and_settle(&store, SessionAction::Initialize).await;
        presenter.take();

        let names: Vec<String> = (0..200).map(|i| format!("n{i}")).collect();
        for name in &names {
            let _ = store
                .send(SessionAction::PassengerNameChanged { name: name.clone() })
                .await
                .unwrap();
        }
        store.shutdown(WAIT).await.unwrap();

        let rendered: Vec<String> = presenter
            .instructions()
            .into_iter()
            .filter_map(|instruction| match instruction {
                RenderInstruction::RenderSummary(summary) => Some(summary.passenger),
                _ => None,
            })
            .collect();
        assert_eq!(rendered, names);
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn coach_switch_does_not_overwrite_later_selection() {
    for _ in 0..20 {
        let (store, presenter) = store(CoachType::ChairCar, 1);
        let _ = store.send(SessionAction::Initialize).await.unwrap();
        let _ = store
            .send(SessionAction::CoachTypeChanged {
                coach: CoachType::AcTwoTier,
            })
            .await
            .unwrap();
        let _ = store
            .send(SessionAction::SeatClicked {
                seat_id: SeatId::from("2LB"),
            })
            .await
            .unwrap();
        store.shutdown(WAIT).await.unwrap();

        let last_selection = presenter
            .instructions()
            .into_iter()
            .rev()
            .find(|i| {
                matches!(
                    i,
                    RenderInstruction::RenderSelection { .. } | RenderInstruction::RenderSeatMap { .. }
                )
            });
        assert_eq!(
            last_selection,
            Some(RenderInstruction::RenderSelection {
                selected: vec![SeatId::from("2LB")]
            })
        );
    }
}

#[tokio::test]
async fn store_rejects_intents_after_shutdown() {
    let (store, _presenter) = store(CoachType::ChairCar, 1);
    send_and_settle(&store, SessionAction::Initialize).await;
    store.shutdown(WAIT).await.unwrap();

    let result = store.send(SessionAction::ClearRequested).await;
    assert!(matches!(result, Err(StoreError::ShutdownInProgress)));
}
