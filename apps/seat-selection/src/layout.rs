//! Seat map generation for the four coach layouts.
//!
//! Seats are numbered `1..=total_seats` in generation order. Chair layouts
//! (chair-car, 2s) are bus-style rows with a left and right block; sleeper
//! layouts (2a, 3a) are bays of berth stacks followed by an aisle and a
//! side bay. Generation stops as soon as `total_seats` seats exist, so a
//! trailing row or bay may be partially filled.

use crate::types::{BerthType, CoachType, SeatId};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::ops::Range;

// ============================================================================
// Descriptors
// ============================================================================

/// One seat or berth of a generated seat map
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatDescriptor {
    /// Identifier (`12C`, `3LB`)
    pub seat_id: SeatId,
    /// 1-based generation number
    pub number: usize,
    /// Berth position, `None` for chair layouts
    pub berth: Option<BerthType>,
    /// Sold before the session started; fixed at generation
    pub is_prebooked: bool,
}

impl SeatDescriptor {
    /// Label drawn on the seat
    #[must_use]
    pub fn display_number(&self) -> String {
        self.number.to_string()
    }

    /// Hover text (`Seat 12C`, `Seat 3LB (LB)`)
    #[must_use]
    pub fn tooltip(&self) -> String {
        match self.berth {
            Some(berth) => format!("Seat {} ({berth})", self.seat_id),
            None => format!("Seat {}", self.seat_id),
        }
    }
}

// ============================================================================
// Geometry
// ============================================================================

/// Physical grouping a block of seats belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    /// Left of the aisle in a chair row
    Left,
    /// Right of the aisle in a chair row
    Right,
    /// Lower berth stack of a bay
    Lower,
    /// Middle berth stack of a three tier bay
    Middle,
    /// Upper berth stack of a bay
    Upper,
    /// Side berths across the aisle
    Side,
}

/// A piece of one row: a run of seats or the aisle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RowSegment {
    /// Seats `seats` of [`SeatMap::seats`]
    Block {
        /// Grouping of the block
        kind: BlockKind,
        /// Indices into the flattened seat order
        seats: Range<usize>,
    },
    /// Aisle break
    Aisle,
}

/// A chair row or a sleeper bay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatRow {
    segments: Vec<RowSegment>,
    seats: Range<usize>,
}

impl SeatRow {
    /// Blocks and aisles, left to right
    #[must_use]
    pub fn segments(&self) -> &[RowSegment] {
        &self.segments
    }

    /// Indices of every seat in the row
    #[must_use]
    pub fn seats(&self) -> Range<usize> {
        self.seats.clone()
    }

    /// Whether the row contains an aisle break
    #[must_use]
    pub fn has_aisle(&self) -> bool {
        self.segments.iter().any(|s| matches!(s, RowSegment::Aisle))
    }
}

/// Generated seat map of one coach type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatMap {
    coach: CoachType,
    seats: Vec<SeatDescriptor>,
    rows: Vec<SeatRow>,
    #[serde(skip)]
    positions: HashMap<SeatId, usize>,
    #[serde(skip)]
    row_of_seat: Vec<usize>,
}

impl SeatMap {
    /// Coach type the map was generated for
    #[must_use]
    pub const fn coach(&self) -> CoachType {
        self.coach
    }

    /// Every seat in generation order
    #[must_use]
    pub fn seats(&self) -> &[SeatDescriptor] {
        &self.seats
    }

    /// Rows (chair layouts) or bays (sleeper layouts)
    #[must_use]
    pub fn rows(&self) -> &[SeatRow] {
        &self.rows
    }

    /// Number of seats
    #[must_use]
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    /// Whether the map holds no seats
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Looks a seat up by identifier
    #[must_use]
    pub fn get(&self, seat_id: &SeatId) -> Option<&SeatDescriptor> {
        self.position(seat_id).and_then(|index| self.seats.get(index))
    }

    /// Seat at a flattened index
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&SeatDescriptor> {
        self.seats.get(index)
    }

    /// Flattened index of a seat
    #[must_use]
    pub fn position(&self, seat_id: &SeatId) -> Option<usize> {
        self.positions.get(seat_id).copied()
    }

    /// Whether the map has a seat with this identifier
    #[must_use]
    pub fn contains(&self, seat_id: &SeatId) -> bool {
        self.positions.contains_key(seat_id)
    }

    /// Row holding the seat at `index`
    #[must_use]
    pub fn row_of(&self, index: usize) -> Option<usize> {
        self.row_of_seat.get(index).copied()
    }

    /// Index of the first seat of `row`
    #[must_use]
    pub fn row_start(&self, row: usize) -> Option<usize> {
        self.rows.get(row).map(|r| r.seats.start)
    }
}

// ============================================================================
// Generation
// ============================================================================

#[derive(Clone, Copy)]
enum Slot {
    Column(char),
    Berth(BerthType),
}

struct ChairTemplate {
    left: &'static [Slot],
    right: &'static [Slot],
}

struct BayTemplate {
    stacks: &'static [(BlockKind, &'static [Slot])],
    side: &'static [Slot],
}

const CHAIR_CAR: ChairTemplate = ChairTemplate {
    left: &[Slot::Column('A'), Slot::Column('B'), Slot::Column('C')],
    right: &[Slot::Column('D'), Slot::Column('E')],
};

const SECOND_SITTING: ChairTemplate = ChairTemplate {
    left: &[Slot::Column('A'), Slot::Column('B'), Slot::Column('C')],
    right: &[Slot::Column('D'), Slot::Column('E'), Slot::Column('F')],
};

const LOWER_PAIR: &[Slot] = &[Slot::Berth(BerthType::Lower), Slot::Berth(BerthType::Lower)];
const MIDDLE_PAIR: &[Slot] = &[Slot::Berth(BerthType::Middle), Slot::Berth(BerthType::Middle)];
const UPPER_PAIR: &[Slot] = &[Slot::Berth(BerthType::Upper), Slot::Berth(BerthType::Upper)];
const SIDE_PAIR: &[Slot] = &[
    Slot::Berth(BerthType::SideLower),
    Slot::Berth(BerthType::SideUpper),
];

const AC_TWO_TIER: BayTemplate = BayTemplate {
    stacks: &[(BlockKind::Lower, LOWER_PAIR), (BlockKind::Upper, UPPER_PAIR)],
    side: SIDE_PAIR,
};

const AC_THREE_TIER: BayTemplate = BayTemplate {
    stacks: &[
        (BlockKind::Lower, LOWER_PAIR),
        (BlockKind::Middle, MIDDLE_PAIR),
        (BlockKind::Upper, UPPER_PAIR),
    ],
    side: SIDE_PAIR,
};

/// Generates the seat map of `coach` with `total_seats` seats
///
/// `is_prebooked` is set for every generated id found in `prebooked`;
/// entries of `prebooked` that name no generated seat are ignored.
#[must_use]
pub fn generate(coach: CoachType, total_seats: usize, prebooked: &BTreeSet<SeatId>) -> SeatMap {
    let mut builder = Builder::new(coach, total_seats, prebooked);
    match coach {
        CoachType::ChairCar => builder.chair_rows(&CHAIR_CAR),
        CoachType::SecondSitting => builder.chair_rows(&SECOND_SITTING),
        CoachType::AcTwoTier => builder.bays(&AC_TWO_TIER),
        CoachType::AcThreeTier => builder.bays(&AC_THREE_TIER),
    }
    let map = builder.finish();
    tracing::debug!(
        coach = %coach,
        seats = map.len(),
        rows = map.rows().len(),
        "Generated seat map"
    );
    map
}

struct Builder<'a> {
    coach: CoachType,
    total: usize,
    prebooked: &'a BTreeSet<SeatId>,
    seats: Vec<SeatDescriptor>,
    rows: Vec<SeatRow>,
}

impl<'a> Builder<'a> {
    fn new(coach: CoachType, total: usize, prebooked: &'a BTreeSet<SeatId>) -> Self {
        Self {
            coach,
            total,
            prebooked,
            seats: Vec::with_capacity(total),
            rows: Vec::new(),
        }
    }

    fn remaining(&self) -> bool {
        self.seats.len() < self.total
    }

    fn chair_rows(&mut self, template: &ChairTemplate) {
        let width = template.left.len() + template.right.len();
        let rows = self.total.div_ceil(width);
        for row in 1..=rows {
            if !self.remaining() {
                break;
            }
            let start = self.seats.len();
            let mut segments = Vec::with_capacity(3);
            segments.extend(self.block(row, BlockKind::Left, template.left));
            if self.remaining() {
                segments.push(RowSegment::Aisle);
            }
            segments.extend(self.block(row, BlockKind::Right, template.right));
            self.close_row(start, segments);
        }
    }

    fn bays(&mut self, template: &BayTemplate) {
        let capacity = template.stacks.iter().map(|(_, s)| s.len()).sum::<usize>()
            + template.side.len();
        let bays = self.total.div_ceil(capacity);
        for bay in 1..=bays {
            if !self.remaining() {
                break;
            }
            let start = self.seats.len();
            let mut segments = Vec::with_capacity(template.stacks.len() + 2);
            for (kind, slots) in template.stacks {
                segments.extend(self.block(bay, *kind, slots));
            }
            segments.push(RowSegment::Aisle);
            segments.extend(self.block(bay, BlockKind::Side, template.side));
            self.close_row(start, segments);
        }
    }

    fn block(&mut self, row: usize, kind: BlockKind, slots: &[Slot]) -> Option<RowSegment> {
        let start = self.seats.len();
        for slot in slots {
            if !self.remaining() {
                break;
            }
            let number = self.seats.len() + 1;
            let (seat_id, berth) = match *slot {
                Slot::Column(letter) => (SeatId::new(format!("{row}{letter}")), None),
                Slot::Berth(berth) => (SeatId::new(format!("{number}{}", berth.code())), Some(berth)),
            };
            let is_prebooked = self.prebooked.contains(&seat_id);
            self.seats.push(SeatDescriptor {
                seat_id,
                number,
                berth,
                is_prebooked,
            });
        }
        let end = self.seats.len();
        (end > start).then_some(RowSegment::Block {
            kind,
            seats: start..end,
        })
    }

    fn close_row(&mut self, start: usize, segments: Vec<RowSegment>) {
        self.rows.push(SeatRow {
            segments,
            seats: start..self.seats.len(),
        });
    }

    fn finish(self) -> SeatMap {
        let positions = self
            .seats
            .iter()
            .enumerate()
            .map(|(index, seat)| (seat.seat_id.clone(), index))
            .collect();
        let row_of_seat = self
            .rows
            .iter()
            .enumerate()
            .flat_map(|(row, r)| r.seats.clone().map(move |_| row))
            .collect();
        SeatMap {
            coach: self.coach,
            seats: self.seats,
            rows: self.rows,
            positions,
            row_of_seat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(map: &SeatMap, range: Range<usize>) -> Vec<&str> {
        map.seats()[range].iter().map(|s| s.seat_id.as_str()).collect()
    }

    fn none() -> BTreeSet<SeatId> {
        BTreeSet::new()
    }

    #[test]
    fn chair_car_first_row() {
        let map = generate(CoachType::ChairCar, 78, &none());
        let first = &map.rows()[0];
        assert_eq!(ids(&map, first.seats()), ["1A", "1B", "1C", "1D", "1E"]);
        assert_eq!(
            first.segments(),
            [
                RowSegment::Block { kind: BlockKind::Left, seats: 0..3 },
                RowSegment::Aisle,
                RowSegment::Block { kind: BlockKind::Right, seats: 3..5 },
            ]
        );
    }

    #[test]
    fn chair_car_trailing_row_drops_aisle_and_right_block() {
        let map = generate(CoachType::ChairCar, 78, &none());
        assert_eq!(map.rows().len(), 16);
        let last = &map.rows()[15];
        assert_eq!(ids(&map, last.seats()), ["16A", "16B", "16C"]);
        assert!(!last.has_aisle());
        assert_eq!(last.segments().len(), 1);
    }

    #[test]
    fn aisle_kept_when_a_seat_follows() {
        let map = generate(CoachType::ChairCar, 4, &none());
        assert_eq!(
            map.rows()[0].segments(),
            [
                RowSegment::Block { kind: BlockKind::Left, seats: 0..3 },
                RowSegment::Aisle,
                RowSegment::Block { kind: BlockKind::Right, seats: 3..4 },
            ]
        );
    }

    #[test]
    fn second_sitting_rows_of_six() {
        let map = generate(CoachType::SecondSitting, 108, &none());
        assert_eq!(map.rows().len(), 18);
        assert_eq!(
            ids(&map, map.rows()[17].seats()),
            ["18A", "18B", "18C", "18D", "18E", "18F"]
        );
    }

    #[test]
    fn two_tier_bay_order() {
        let map = generate(CoachType::AcTwoTier, 54, &none());
        assert_eq!(map.rows().len(), 9);
        assert_eq!(
            ids(&map, map.rows()[0].seats()),
            ["1LB", "2LB", "3UB", "4UB", "5SL", "6SU"]
        );
        assert_eq!(map.seats()[2].berth, Some(BerthType::Upper));
    }

    #[test]
    fn three_tier_bay_order() {
        let map = generate(CoachType::AcThreeTier, 72, &none());
        assert_eq!(map.rows().len(), 9);
        assert_eq!(
            ids(&map, map.rows()[1].seats()),
            ["9LB", "10LB", "11MB", "12MB", "13UB", "14UB", "15SL", "16SU"]
        );
        let kinds: Vec<_> = map.rows()[1]
            .segments()
            .iter()
            .map(|segment| match segment {
                RowSegment::Block { kind, .. } => Some(*kind),
                RowSegment::Aisle => None,
            })
            .collect();
        assert_eq!(
            kinds,
            [
                Some(BlockKind::Lower),
                Some(BlockKind::Middle),
                Some(BlockKind::Upper),
                None,
                Some(BlockKind::Side),
            ]
        );
    }

    #[test]
    fn partial_bay_keeps_aisle_and_omits_empty_blocks() {
        let map = generate(CoachType::AcTwoTier, 8, &none());
        let last = &map.rows()[1];
        assert_eq!(ids(&map, last.seats()), ["7LB", "8LB"]);
        assert_eq!(
            last.segments(),
            [
                RowSegment::Block { kind: BlockKind::Lower, seats: 6..8 },
                RowSegment::Aisle,
            ]
        );
    }

    #[test]
    fn prebooked_flag_follows_the_list() {
        let prebooked: BTreeSet<SeatId> = ["1B", "2C", "99Z"].into_iter().map(SeatId::from).collect();
        let map = generate(CoachType::ChairCar, 10, &prebooked);
        let flagged: Vec<_> = map
            .seats()
            .iter()
            .filter(|s| s.is_prebooked)
            .map(|s| s.seat_id.as_str())
            .collect();
        assert_eq!(flagged, ["1B", "2C"]);
    }

    #[test]
    fn lookups_agree() {
        let map = generate(CoachType::AcThreeTier, 20, &none());
        let seat = SeatId::from("11MB");
        let index = map.position(&seat);
        assert_eq!(index, Some(10));
        assert_eq!(map.get(&seat).map(|s| s.number), Some(11));
        assert_eq!(map.row_of(10), Some(1));
        assert_eq!(map.row_start(2), Some(16));
        assert_eq!(map.row_start(3), None);
        assert!(!map.contains(&SeatId::from("11LB")));
    }

    #[test]
    fn zero_seats_yield_empty_map() {
        let map = generate(CoachType::SecondSitting, 0, &none());
        assert!(map.is_empty());
        assert!(map.rows().is_empty());
    }

    #[test]
    fn tooltips_and_labels() {
        let map = generate(CoachType::AcTwoTier, 6, &none());
        assert_eq!(map.seats()[2].tooltip(), "Seat 3UB (UB)");
        assert_eq!(map.seats()[2].display_number(), "3");
        let chairs = generate(CoachType::ChairCar, 2, &none());
        assert_eq!(chairs.seats()[1].tooltip(), "Seat 1B");
    }
}
