//! Property tests for layout, selection and focus invariants.

#![allow(clippy::unwrap_used)] // Test code

use proptest::prelude::*;
use seat_selection::{
    CoachType, FocusDirection, PartySize, SeatAvailability, SeatCatalog, SeatId, Selection,
    SessionAction, SessionEnvironment, SessionReducer, SessionState, generate, move_focus,
    summary,
};
use seating_core::reducer::Reducer;
use seating_testing::test_clock;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

fn coach() -> impl Strategy<Value = CoachType> {
    prop::sample::select(CoachType::ALL.to_vec())
}

fn direction() -> impl Strategy<Value = FocusDirection> {
    prop::sample::select(vec![
        FocusDirection::Left,
        FocusDirection::Right,
        FocusDirection::Up,
        FocusDirection::Down,
    ])
}

fn party() -> impl Strategy<Value = PartySize> {
    (1u32..=8).prop_map(|n| PartySize::new(n).unwrap())
}

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    Resize(PartySize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..12).prop_map(Op::Toggle),
        1 => party().prop_map(Op::Resize),
    ]
}

fn pool(index: usize) -> SeatId {
    SeatId::new(format!("{}A", index + 1))
}

proptest! {
    #[test]
    fn layout_emits_every_seat_once(coach in coach(), total in 0usize..200) {
        let map = generate(coach, total, &BTreeSet::new());
        prop_assert_eq!(map.len(), total);

        let ids: HashSet<_> = map.seats().iter().map(|s| s.seat_id.clone()).collect();
        prop_assert_eq!(ids.len(), total);

        for (index, seat) in map.seats().iter().enumerate() {
            prop_assert_eq!(seat.number, index + 1);
            prop_assert_eq!(seat.berth.is_some(), coach.is_sleeper());
        }
    }

    #[test]
    fn rows_partition_the_seats(coach in coach(), total in 1usize..200) {
        let map = generate(coach, total, &BTreeSet::new());
        let mut next = 0;
        for row in map.rows() {
            prop_assert_eq!(row.seats().start, next);
            prop_assert!(!row.seats().is_empty());
            next = row.seats().end;
        }
        prop_assert_eq!(next, total);
    }

    #[test]
    fn prebooked_flag_matches_membership(
        coach in coach(),
        total in 1usize..120,
        picks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let all = generate(coach, total, &BTreeSet::new());
        let mut prebooked: BTreeSet<SeatId> = picks
            .iter()
            .map(|pick| all.seats()[pick.index(total)].seat_id.clone())
            .collect();
        prebooked.insert(SeatId::from("999ZZ"));

        let map = generate(coach, total, &prebooked);
        for seat in map.seats() {
            prop_assert_eq!(seat.is_prebooked, prebooked.contains(&seat.seat_id));
        }
    }

    #[test]
    fn selection_stays_bounded_and_unique(start in party(), ops in prop::collection::vec(op(), 0..60)) {
        let mut selection = Selection::new(start);
        for op in ops {
            match op {
                Op::Toggle(index) => {
                    let _ = selection.toggle(&pool(index), SeatAvailability::Available);
                },
                Op::Resize(size) => {
                    let before = selection.seats().to_vec();
                    let dropped = selection.set_party_size(size);
                    let kept = before.len().min(size.as_usize());
                    prop_assert_eq!(selection.seats(), &before[..kept]);
                    prop_assert_eq!(dropped, before[kept..].to_vec());
                },
            }
            prop_assert!(selection.len() <= selection.max_people().as_usize());
            let unique: HashSet<_> = selection.seats().iter().collect();
            prop_assert_eq!(unique.len(), selection.len());
        }
    }

    #[test]
    fn double_toggle_restores_selection(
        size in party(),
        prior in prop::collection::vec(0usize..12, 0..8),
        seat in 0usize..12,
    ) {
        let mut selection = Selection::new(size);
        for index in prior {
            let _ = selection.toggle(&pool(index), SeatAvailability::Available);
        }
        let before = selection.clone();
        let first = selection.toggle(&pool(seat), SeatAvailability::Available);
        if first.is_ok() {
            let mut restored = selection.clone();
            let _ = restored.toggle(&pool(seat), SeatAvailability::Available);
            // Deselect-then-reselect moves the seat to the end, so only
            // a selection that started without it round-trips exactly.
            if !before.contains(&pool(seat)) {
                prop_assert_eq!(restored, before);
            }
        } else {
            prop_assert_eq!(selection, before);
        }
    }

    #[test]
    fn can_confirm_iff_named_and_exact(name in "[ a-z]{0,6}", selected in 0usize..6, max in 1usize..6) {
        prop_assert_eq!(
            summary::can_confirm(&name, selected, max),
            !name.trim().is_empty() && selected == max
        );
    }

    #[test]
    fn focus_never_leaves_the_map(
        coach in coach(),
        start in 0usize..200,
        moves in prop::collection::vec(direction(), 0..40),
    ) {
        let map = SeatCatalog::standard().seat_map(coach);
        let mut focus = Some(start);
        for direction in moves {
            focus = move_focus(&map, focus, direction);
            prop_assert!(focus.is_some_and(|index| index < map.len()));
        }
    }

    #[test]
    fn coach_change_always_empties_selection(
        from in coach(),
        to in coach(),
        clicks in prop::collection::vec(any::<prop::sample::Index>(), 0..10),
    ) {
        let catalog = Arc::new(SeatCatalog::standard());
        let env = SessionEnvironment::new(
            Arc::new(test_clock()),
            Arc::new(seat_selection::RecordingPresenter::new()),
            Arc::clone(&catalog),
        );
        let mut state = SessionState::new(&catalog, from, PartySize::new(4).unwrap());
        let reducer = SessionReducer::new();
        for click in clicks {
            let seat_id = state.seat_map().at(click.index(state.seat_map().len())).unwrap().seat_id.clone();
            let _ = reducer.reduce(&mut state, SessionAction::SeatClicked { seat_id }, &env);
        }
        let _ = reducer.reduce(&mut state, SessionAction::CoachTypeChanged { coach: to }, &env);
        prop_assert!(state.selection().is_empty());
        prop_assert_eq!(state.coach(), to);
    }
}
