use futuboard_core_types::{ColumnId, ScopeId};
use std::collections::BTreeMap;

/// Scope dimension of the grid. `Total` covers every ticket on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScopeKey {
    Total,
    Specific(ScopeId),
}

impl ScopeKey {
    pub fn for_filter(scope: Option<ScopeId>) -> Self {
        scope.map(ScopeKey::Specific).unwrap_or(ScopeKey::Total)
    }
}

pub type ColumnSizes = BTreeMap<ColumnId, i64>;

/// Accumulated size per scope and column.
///
/// The `Total` slice always holds every board column, so it doubles as the
/// set of columns deltas may target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SizeGrid {
    slices: BTreeMap<ScopeKey, ColumnSizes>,
}

impl SizeGrid {
    pub fn zero<C, S>(columns: C, scopes: S) -> Self
    where
        C: IntoIterator<Item = ColumnId>,
        S: IntoIterator<Item = ScopeId>,
    {
        let zeroed: ColumnSizes = columns.into_iter().map(|column| (column, 0)).collect();
        let mut slices = BTreeMap::new();
        for scope in scopes {
            slices.insert(ScopeKey::Specific(scope), zeroed.clone());
        }
        slices.insert(ScopeKey::Total, zeroed);
        Self { slices }
    }

    pub fn knows_column(&self, column: &ColumnId) -> bool {
        self.slices
            .get(&ScopeKey::Total)
            .is_some_and(|total| total.contains_key(column))
    }

    /// Adds `delta` to one cell. Returns false, changing nothing, when the
    /// column is not on the board. Scopes first seen here get a zeroed slice.
    pub fn add(&mut self, key: ScopeKey, column: ColumnId, delta: i64) -> bool {
        if !self.knows_column(&column) {
            return false;
        }
        if !self.slices.contains_key(&key) {
            let zeroed = self.zeroed_slice();
            self.slices.insert(key, zeroed);
        }
        if let Some(cell) = self
            .slices
            .get_mut(&key)
            .and_then(|slice| slice.get_mut(&column))
        {
            *cell += delta;
        }
        true
    }

    pub fn slice(&self, key: &ScopeKey) -> Option<&ColumnSizes> {
        self.slices.get(key)
    }

    /// Slice for `key`, or all zeroes when no delta ever reached that scope.
    pub fn slice_or_zero(&self, key: &ScopeKey) -> ColumnSizes {
        self.slices
            .get(key)
            .cloned()
            .unwrap_or_else(|| self.zeroed_slice())
    }

    pub fn get(&self, key: &ScopeKey, column: &ColumnId) -> i64 {
        self.slices
            .get(key)
            .and_then(|slice| slice.get(column))
            .copied()
            .unwrap_or(0)
    }

    pub fn sum<'a, I>(&self, key: &ScopeKey, columns: I) -> i64
    where
        I: IntoIterator<Item = &'a ColumnId>,
    {
        columns
            .into_iter()
            .map(|column| self.get(key, column))
            .sum()
    }

    pub fn total(&self, key: &ScopeKey) -> i64 {
        self.slices
            .get(key)
            .map(|slice| slice.values().sum())
            .unwrap_or(0)
    }

    fn zeroed_slice(&self) -> ColumnSizes {
        self.slices
            .get(&ScopeKey::Total)
            .map(|total| total.keys().map(|column| (*column, 0)).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_grid_covers_columns_and_scopes() {
        let (a, b) = (ColumnId::new(), ColumnId::new());
        let scope = ScopeId::new();
        let grid = SizeGrid::zero([a, b], [scope]);
        assert_eq!(grid.slice(&ScopeKey::Total).unwrap().len(), 2);
        assert_eq!(grid.get(&ScopeKey::Specific(scope), &b), 0);
        assert_eq!(grid.total(&ScopeKey::Total), 0);
    }

    #[test]
    fn add_skips_unknown_columns_and_opens_new_scopes() {
        let column = ColumnId::new();
        let scope = ScopeId::new();
        let mut grid = SizeGrid::zero([column], []);

        assert!(!grid.add(ScopeKey::Total, ColumnId::new(), 4));
        assert_eq!(grid.total(&ScopeKey::Total), 0);

        assert!(grid.add(ScopeKey::Specific(scope), column, -3));
        assert_eq!(grid.get(&ScopeKey::Specific(scope), &column), -3);
        assert_eq!(grid.get(&ScopeKey::Total, &column), 0);
    }

    #[test]
    fn clones_do_not_share_cells() {
        let column = ColumnId::new();
        let mut grid = SizeGrid::zero([column], []);
        grid.add(ScopeKey::Total, column, 5);
        let recorded = grid.clone();
        grid.add(ScopeKey::Total, column, 5);
        assert_eq!(recorded.get(&ScopeKey::Total, &column), 5);
        assert_eq!(grid.get(&ScopeKey::Total, &column), 10);
    }
}
