//! `Range` header parsing and resolution against the artifact's real size.
//!
//! Only single `bytes` ranges are honoured. Anything the parser does not
//! understand is ignored and the whole artifact is served, which HTTP allows.
//! Well-formed ranges that cannot be satisfied produce
//! [`RangeOutcome::NotSatisfiable`] so the handler can answer `416`.

use std::fmt;

/// Inclusive byte interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    start: u64,
    end: u64,
}

impl ByteRange {
    /// Returns `None` when `start > end`.
    #[must_use]
    pub fn new(start: u64, end: u64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First byte offset.
    #[must_use]
    pub fn start(self) -> u64 {
        self.start
    }

    /// Last byte offset, inclusive.
    #[must_use]
    pub fn end(self) -> u64 {
        self.end
    }

    /// Number of bytes covered. Never zero.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for this range within an artifact of `total` bytes.
    #[must_use]
    pub fn content_range(self, total: u64) -> String {
        format!("bytes {}-{}/{total}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// What the handler should send for a given `Range` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeOutcome {
    /// No usable range: send the whole artifact with `200`.
    Full,
    /// Send this slice with `206`.
    Partial(ByteRange),
    /// Well-formed but unsatisfiable: answer `416`.
    NotSatisfiable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RangeSpec {
    /// `bytes=N-` or `bytes=N-M`
    FromTo(u64, Option<u64>),
    /// `bytes=-K`
    Suffix(u64),
}

fn parse_range_spec(header: &str) -> Option<RangeSpec> {
    let (unit, spec) = header.trim().split_once('=')?;
    if !unit.trim().eq_ignore_ascii_case("bytes") {
        return None;
    }
    // Multipart byteranges are not supported.
    if spec.contains(',') {
        return None;
    }

    let (first, last) = spec.trim().split_once('-')?;
    let (first, last) = (first.trim(), last.trim());

    if first.is_empty() {
        return last.parse().ok().map(RangeSpec::Suffix);
    }

    let start = first.parse().ok()?;
    let end = if last.is_empty() {
        None
    } else {
        Some(last.parse().ok()?)
    };
    Some(RangeSpec::FromTo(start, end))
}

/// Resolves an optional `Range` header value against an artifact of `size` bytes.
#[must_use]
pub fn resolve_range(header: Option<&str>, size: u64) -> RangeOutcome {
    let Some(spec) = header.and_then(parse_range_spec) else {
        return RangeOutcome::Full;
    };
    if size == 0 {
        return RangeOutcome::NotSatisfiable;
    }
    let last = size - 1;

    let range = match spec {
        RangeSpec::FromTo(start, _) if start > last => None,
        RangeSpec::FromTo(start, Some(end)) if end < start => None,
        RangeSpec::FromTo(start, end) => ByteRange::new(start, end.map_or(last, |e| e.min(last))),
        RangeSpec::Suffix(0) => None,
        RangeSpec::Suffix(count) => ByteRange::new(size.saturating_sub(count), last),
    };

    range.map_or(RangeOutcome::NotSatisfiable, RangeOutcome::Partial)
}
