//! Bounded sequential-number allocation over caller-supplied snapshots.

use tracing::warn;

use crate::core::errors::{CampusError, NumberParseError, Result, SequenceError};
use crate::domain::sequence::{IssuedNumber, NumberRegistry, SequenceStats};

/// Upper bound on a single batch allocation.
pub const MAX_BATCH: usize = 100;

/// Formats, parses, and advances bounded sequential identifiers.
///
/// The allocator owns no storage. Callers feed it the persisted maximum (or a
/// [`NumberRegistry`] snapshot) and must enforce true uniqueness downstream
/// with a unique constraint plus retry-on-conflict; [`Self::next`] is only
/// safe under external serialization per prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceAllocator {
    prefix: String,
    width: usize,
}

impl SequenceAllocator {
    /// Width must be at least 1; anything smaller is widened to 1.
    pub fn new(prefix: impl Into<String>, width: usize) -> Self {
        Self {
            prefix: prefix.into(),
            width: width.max(1),
        }
    }

    /// The CU registration application-number scheme: prefix `017`, four
    /// sequential digits (`0170001`..`0179999`).
    pub fn cu_registration() -> Self {
        Self::new("017", 4)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Greatest suffix the configured width can represent.
    pub fn max_value(&self) -> u32 {
        10u32.pow(self.width as u32) - 1
    }

    fn total_length(&self) -> usize {
        self.prefix.len() + self.width
    }

    /// Formats a suffix into a full identifier.
    pub fn format(&self, n: u32) -> Result<IssuedNumber> {
        let max = self.max_value();
        if n < 1 || n > max {
            return Err(SequenceError::OutOfRange { value: n, max }.into());
        }
        Ok(IssuedNumber::new_unchecked(format!(
            "{}{:0width$}",
            self.prefix,
            n,
            width = self.width
        )))
    }

    /// Extracts the numeric suffix from an identifier.
    pub fn parse(&self, s: &str) -> std::result::Result<u32, NumberParseError> {
        let expected = self.total_length();
        if s.len() != expected {
            return Err(NumberParseError::WrongLength {
                expected,
                actual: s.len(),
            });
        }
        let Some(suffix) = s.strip_prefix(self.prefix.as_str()) else {
            return Err(NumberParseError::WrongPrefix {
                expected: self.prefix.clone(),
            });
        };
        if !suffix.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NumberParseError::NonDigitSuffix);
        }
        let n: u32 = suffix
            .parse()
            .map_err(|_| NumberParseError::NonDigitSuffix)?;
        if n == 0 {
            return Err(NumberParseError::ZeroSuffix);
        }
        Ok(n)
    }

    pub fn is_valid_format(&self, s: &str) -> bool {
        self.parse(s).is_ok()
    }

    /// Next identifier after the persisted maximum; `None` starts the range.
    ///
    /// A malformed stored maximum is surfaced as a parse error rather than a
    /// panic, since the column's integrity is outside the allocator.
    pub fn next(&self, current_max: Option<&str>) -> Result<IssuedNumber> {
        let Some(current) = current_max else {
            return self.format(1);
        };
        let n = self.parse(current)?;
        if n >= self.max_value() {
            return Err(SequenceError::Exhausted {
                max: self.max_value(),
            }
            .into());
        }
        self.format(n + 1)
    }

    /// [`Self::next`] over a registry snapshot.
    pub fn next_from(&self, registry: &impl NumberRegistry) -> Result<IssuedNumber> {
        self.next(registry.current_max().as_deref())
    }

    /// Whether the candidate is well-formed and not yet issued.
    pub fn is_available(&self, candidate: &str, registry: &impl NumberRegistry) -> bool {
        self.is_valid_format(candidate) && !registry.contains(candidate)
    }

    /// Claims a specific identifier, failing if malformed or already issued.
    pub fn reserve(&self, candidate: &str, registry: &impl NumberRegistry) -> Result<IssuedNumber> {
        let n = self.parse(candidate)?;
        if registry.contains(candidate) {
            return Err(CampusError::Unavailable(candidate.to_string()));
        }
        self.format(n)
    }

    /// The first `count` unissued identifiers in ascending order.
    pub fn next_n_available(
        &self,
        count: usize,
        registry: &impl NumberRegistry,
    ) -> Result<Vec<IssuedNumber>> {
        if count < 1 || count > MAX_BATCH {
            return Err(CampusError::InvalidInput(format!(
                "batch size must be between 1 and {MAX_BATCH}, got {count}"
            )));
        }
        let mut numbers = Vec::with_capacity(count);
        for n in 1..=self.max_value() {
            let candidate = self.format(n)?;
            if !registry.contains(candidate.as_str()) {
                numbers.push(candidate);
                if numbers.len() == count {
                    return Ok(numbers);
                }
            }
        }
        warn!(
            prefix = %self.prefix,
            requested = count,
            found = numbers.len(),
            "issuable range exhausted during batch allocation"
        );
        Err(SequenceError::InsufficientRange {
            requested: count,
            found: numbers.len(),
        }
        .into())
    }

    /// Formatted inclusive bounds for a storage-layer `BETWEEN` query.
    pub fn range_bounds(&self, start: u32, end: u32) -> Result<(IssuedNumber, IssuedNumber)> {
        if start > end {
            return Err(CampusError::InvalidInput(format!(
                "range start {start} exceeds end {end}"
            )));
        }
        Ok((self.format(start)?, self.format(end)?))
    }

    /// Allocation statistics over a registry snapshot.
    ///
    /// An empty registry reports the first identifier for both range bounds,
    /// matching what the operator dashboard expects before the first issue.
    pub fn stats(&self, registry: &impl NumberRegistry) -> Result<SequenceStats> {
        let next_available = self.next_from(registry)?;
        let floor = self.format(1)?;
        let last_issued = match registry.current_max() {
            Some(raw) => Some(self.format(self.parse(&raw)?)?),
            None => None,
        };
        let range_min = match registry.current_min() {
            Some(raw) => self.format(self.parse(&raw)?)?,
            None => floor.clone(),
        };
        let range_max = last_issued.clone().unwrap_or(floor);
        Ok(SequenceStats {
            total_issued: registry.total_issued(),
            next_available,
            last_issued,
            range_min,
            range_max,
        })
    }
}
