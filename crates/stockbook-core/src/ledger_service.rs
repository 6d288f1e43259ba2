//! Read-side helpers over the append-only transaction ledger.

use stockbook_domain::{Direction, LedgerEntry};

use crate::{
    records::decode_entry,
    storage::{TabularStore, TRANSACTIONS_TABLE},
    CoreError,
};

/// Loads the ledger and derives the per-direction movement views from it.
pub struct LedgerService;

impl LedgerService {
    /// Decodes every ledger row in storage order.
    pub fn entries(store: &dyn TabularStore) -> Result<Vec<LedgerEntry>, CoreError> {
        let rows = store.read_all(TRANSACTIONS_TABLE)?;
        Ok(rows.iter().map(decode_entry).collect())
    }

    /// Returns the stock-in or stock-out view, recomputed from the ledger.
    pub fn movements(entries: &[LedgerEntry], direction: Direction) -> Vec<LedgerEntry> {
        entries
            .iter()
            .filter(|entry| entry.direction() == Some(direction))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        records::{COL_PRODUCT_ID, COL_QUANTITY, COL_TYPE},
        storage::{MemoryStore, Record},
    };

    #[test]
    fn movements_split_by_direction() {
        let store = MemoryStore::new();
        for (kind, id) in [("in", "A"), ("out", "A"), ("In", "B"), ("return", "B")] {
            store
                .append(
                    TRANSACTIONS_TABLE,
                    Record::new()
                        .with(COL_TYPE, kind)
                        .with(COL_PRODUCT_ID, id)
                        .with(COL_QUANTITY, "1"),
                )
                .unwrap();
        }
        let entries = LedgerService::entries(&store).unwrap();
        assert_eq!(entries.len(), 4);
        let ins = LedgerService::movements(&entries, Direction::In);
        assert_eq!(
            ins.iter().map(|e| e.product_id.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
        assert_eq!(LedgerService::movements(&entries, Direction::Out).len(), 1);
    }
}
