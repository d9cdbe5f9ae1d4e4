//! Collaborator interface supplying decoded records.

use ndfd_common::ForecastRecord;

use crate::error::{IngestError, Result};

/// One archive member as delivered by the upstream decoder.
///
/// The id is the member name from the source tarball (e.g.
/// `YEUZ98_KWBN_201901010300`) and is what failed records are reported
/// under. A member the decoder could not turn into a usable record carries
/// `IngestError::DecodeRejected` instead of a record.
#[derive(Debug)]
pub struct SourceRecord {
    pub id: String,
    pub decoded: Result<ForecastRecord>,
}

impl SourceRecord {
    /// A successfully decoded member.
    pub fn decoded(id: impl Into<String>, record: ForecastRecord) -> Self {
        Self {
            id: id.into(),
            decoded: Ok(record),
        }
    }

    /// A member the upstream decoder rejected (corrupt or empty message).
    pub fn rejected(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            decoded: Err(IngestError::DecodeRejected(reason.into())),
        }
    }
}

/// A lazy, finite stream of decoded archive members.
///
/// Iteration order is archive-member order, not time order; the driver
/// never reorders. Implemented for free by any iterator of
/// [`SourceRecord`].
pub trait ArchiveSource: Iterator<Item = SourceRecord> {}

impl<T: Iterator<Item = SourceRecord>> ArchiveSource for T {}
