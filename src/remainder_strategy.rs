use crate::error::{Error, Result};
use log::warn;

/// Enum with possible strategies for a centroid stream, whose length is not a multiple of the cluster count.
/// The trailing records of such a stream do not form a complete iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemainderStrategy {
	/// Silently drop the trailing records.
	Drop,
	/// Drop the trailing records, and report a warning.
	Warn,
	/// Abort with [`Error::StructuralMismatch`].
	Reject
}
impl Default for RemainderStrategy {
	fn default() -> Self { RemainderStrategy::Reject }
}
impl RemainderStrategy {
	/// Check a stream of **len** records against the cluster count **k**.
	/// ## Returns
	/// - **Ok** if the stream may be segmented (possibly dropping records)
	/// - **Err** if the stream has to be rejected
	pub(crate) fn check(&self, len: usize, k: usize) -> Result<()> {
		if k == 0 {
			return Err(Error::invalid("k", "cluster count must be > 0"));
		}
		let remainder = len % k;
		if remainder == 0 {
			return Ok(());
		}
		match *self {
			RemainderStrategy::Drop => Ok(()),
			RemainderStrategy::Warn => {
				warn!("Centroid stream of {} records is not a multiple of {}, dropping the last {} records", len, k, remainder);
				Ok(())
			},
			RemainderStrategy::Reject => Err(Error::StructuralMismatch { len, k })
		}
	}
}
