//! Bulk input capability.

use crate::Record;

/// Anything that can present itself as an ordered list of records.
///
/// Dataframe-style adapters implement this outside the core; the client
/// only ever asks for the rows and whether there are any.
pub trait TabularSource {
    /// Rows in order, one record per row.
    fn to_records(&self) -> Vec<Record>;

    /// True when there are no rows.
    fn is_empty(&self) -> bool;
}

impl TabularSource for [Record] {
    fn to_records(&self) -> Vec<Record> {
        self.to_vec()
    }

    fn is_empty(&self) -> bool {
        <[Record]>::is_empty(self)
    }
}

impl TabularSource for Vec<Record> {
    fn to_records(&self) -> Vec<Record> {
        self.clone()
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}
