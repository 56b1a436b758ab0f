//! Raw record input port trait.

use crate::domain::error::TickstatsError;
use crate::domain::record::{RawRecord, Record};
use crate::domain::record_set::RecordSet;

pub trait RecordSource {
    /// Every raw row of the input, in input order.
    fn load(&self) -> Result<Vec<RawRecord>, TickstatsError>;

    /// Load all rows and build the full record set. Stops at the first malformed row.
    fn load_record_set(&self) -> Result<RecordSet, TickstatsError> {
        self.load()?
            .iter()
            .map(Record::from_raw)
            .collect::<Result<Vec<_>, _>>()
            .map(RecordSet::new)
    }
}
