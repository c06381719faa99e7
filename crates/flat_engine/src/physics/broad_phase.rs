//! Broad-phase candidate pair enumeration
//!
//! Based on Game Engine Architecture 3rd Edition, Section 13.3.2:
//! "Spatial partitioning schemes... allow us to quickly cull out pairs of
//! objects that cannot possibly be colliding."
//!
//! Two implementations share one contract: an exhaustive all-pairs walk used
//! as the correctness baseline, and a static uniform grid with an "outside"
//! sentinel cell for bodies beyond the covered region. Pairs within one cell
//! are enumerated uniquely; pairs across two cells are reported once from
//! each side's neighborhood scan, so callers see them twice per pass.

use std::any::Any;
use std::collections::BTreeSet;

use crate::foundation::math::Vec2;
use crate::physics::body::{BodyArena, BodyHandle};

/// Candidate pair enumeration over the body registry
///
/// `update_body` and `remove_body` maintain the spatial classification and
/// default to no-ops for implementations that do not keep one. The registry
/// is passed into [`BroadPhase::each`] by the caller rather than stored.
pub trait BroadPhase {
    /// Drop all spatial classification state
    fn clear_bodies(&mut self) {}

    /// Reclassify one body after its position changed
    fn update_body(&mut self, handle: BodyHandle, position: Vec2) {
        let _ = (handle, position);
    }

    /// Remove one body from the classification
    fn remove_body(&mut self, handle: BodyHandle) {
        let _ = handle;
    }

    /// Invoke `visit` for every candidate colliding pair
    fn each(&self, bodies: &BodyArena, visit: &mut dyn FnMut(BodyHandle, BodyHandle));

    /// Downcast support for implementation-specific access
    fn as_any(&self) -> &dyn Any;
}

/// All-pairs baseline enumeration, O(n²)
///
/// Keeps no state; every unordered pair of live bodies is visited exactly
/// once.
#[derive(Debug, Default)]
pub struct ExhaustiveBroadPhase;

impl ExhaustiveBroadPhase {
    /// Create the stateless all-pairs enumerator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BroadPhase for ExhaustiveBroadPhase {
    fn each(&self, bodies: &BodyArena, visit: &mut dyn FnMut(BodyHandle, BodyHandle)) {
        let count = bodies.len();
        for i in 0..count {
            if let Some(a) = bodies.handle_at(i) {
                for j in (i + 1)..count {
                    if let Some(b) = bodies.handle_at(j) {
                        visit(a, b);
                    }
                }
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Identifies one cell of the grid, or the shared outside sentinel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellId {
    Grid(usize),
    Outside,
}

/// Fixed uniform grid over a finite region centered on the origin
///
/// Each body is classified into exactly one cell by its position; positions
/// beyond the covered region fall into the outside sentinel cell. The cell
/// layout is fixed at construction.
pub struct StaticGridBroadPhase {
    cells: Vec<BTreeSet<BodyHandle>>,
    outside_cell: BTreeSet<BodyHandle>,
    cell_by_body: Vec<Option<CellId>>,
    cell_count_x: i32,
    cell_count_y: i32,
    cell_size: Vec2,
    offset: Vec2,
}

impl StaticGridBroadPhase {
    /// Create a grid of `cell_count_x` by `cell_count_y` cells of `cell_size`
    #[must_use]
    pub fn new(cell_size: Vec2, cell_count_x: i32, cell_count_y: i32) -> Self {
        let counts = Vec2::new(cell_count_x as f32, cell_count_y as f32);
        let offset = (-cell_size * 0.5).component_mul(&counts);
        let cell_total = usize::try_from(cell_count_x.max(0))
            .unwrap_or(0)
            .saturating_mul(usize::try_from(cell_count_y.max(0)).unwrap_or(0));

        Self {
            cells: vec![BTreeSet::new(); cell_total],
            outside_cell: BTreeSet::new(),
            cell_by_body: Vec::new(),
            cell_count_x,
            cell_count_y,
            cell_size,
            offset,
        }
    }

    /// Map a world position to its cell
    ///
    /// A negative relative coordinate is shifted down by one cell size before
    /// the truncating division so truncation toward zero cannot fold the
    /// first out-of-range column or row back onto index zero.
    fn cell_id_at(&self, position: Vec2) -> CellId {
        let mut rel = position - self.offset;
        if rel.x < 0.0 {
            rel.x -= self.cell_size.x;
        }
        if rel.y < 0.0 {
            rel.y -= self.cell_size.y;
        }

        let x = (rel.x / self.cell_size.x) as i32;
        let y = (rel.y / self.cell_size.y) as i32;
        self.cell_id_of_coords(x, y)
    }

    fn cell_id_of_coords(&self, x: i32, y: i32) -> CellId {
        if x >= 0 && x < self.cell_count_x && y >= 0 && y < self.cell_count_y {
            CellId::Grid((x + y * self.cell_count_x) as usize)
        } else {
            CellId::Outside
        }
    }

    fn cell_set(&self, id: CellId) -> &BTreeSet<BodyHandle> {
        match id {
            CellId::Grid(index) => &self.cells[index],
            CellId::Outside => &self.outside_cell,
        }
    }

    fn cell_set_mut(&mut self, id: CellId) -> &mut BTreeSet<BodyHandle> {
        match id {
            CellId::Grid(index) => &mut self.cells[index],
            CellId::Outside => &mut self.outside_cell,
        }
    }

    /// Pair the contents of two cells
    ///
    /// The same cell paired with itself yields each unordered pair once; two
    /// distinct cells yield the full cross product.
    fn each_cell(&self, a: CellId, b: CellId, visit: &mut dyn FnMut(BodyHandle, BodyHandle)) {
        if a == b {
            let set = self.cell_set(a);
            for (i, handle_a) in set.iter().enumerate() {
                for handle_b in set.iter().skip(i + 1) {
                    visit(*handle_a, *handle_b);
                }
            }
        } else {
            for handle_a in self.cell_set(a) {
                for handle_b in self.cell_set(b) {
                    visit(*handle_a, *handle_b);
                }
            }
        }
    }
}

impl BroadPhase for StaticGridBroadPhase {
    fn clear_bodies(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
        self.outside_cell.clear();
        self.cell_by_body.clear();
    }

    fn update_body(&mut self, handle: BodyHandle, position: Vec2) {
        let index = handle.index as usize;
        if self.cell_by_body.len() <= index {
            self.cell_by_body.resize(index + 1, None);
        }

        let current = self.cell_by_body[index];
        let next = self.cell_id_at(position);
        if current != Some(next) {
            if let Some(current) = current {
                self.cell_set_mut(current).remove(&handle);
            }
            self.cell_set_mut(next).insert(handle);
            self.cell_by_body[index] = Some(next);
        }
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        let index = handle.index as usize;
        if self.cell_by_body.len() <= index {
            return;
        }
        if let Some(current) = self.cell_by_body[index] {
            self.cell_set_mut(current).remove(&handle);
        }
    }

    fn each(&self, _bodies: &BodyArena, visit: &mut dyn FnMut(BodyHandle, BodyHandle)) {
        self.each_cell(CellId::Outside, CellId::Outside, visit);

        for x in 0..self.cell_count_x {
            for y in 0..self.cell_count_y {
                let a = self.cell_id_of_coords(x, y);

                let mut outside_hit = false;
                for i in -1..=1 {
                    for j in -1..=1 {
                        let b = self.cell_id_of_coords(x + i, y + j);
                        if b == CellId::Outside {
                            outside_hit = true;
                        } else {
                            self.each_cell(a, b, visit);
                        }
                    }
                }

                // The sentinel neighbors a border cell more than once but is
                // paired against it a single time per pass
                if outside_hit {
                    self.each_cell(a, CellId::Outside, visit);
                }
            }
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
