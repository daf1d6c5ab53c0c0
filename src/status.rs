// status: PHP-FPM status report parsing
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use crate::errors::ExporterError;

/// Number of newline-separated segments a status page body must split
/// into. The page itself is 14 lines; the trailing newline contributes
/// the 15th, empty, segment.
pub const REPORT_LINES: usize = 15;

/// The fields extracted from the status report.
///
/// Lines 0 to 3 (pool, process manager, start time, start since) carry no
/// counters and are never examined. Line 14 is the reserved "current
/// connections" line, which is deliberately not extracted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field {
    AcceptedConnection,
    ListenQueue,
    MaxListenQueue,
    ListenQueueLength,
    IdleProcesses,
    ActiveProcesses,
    TotalProcesses,
    MaxActiveProcesses,
    MaxChildrenReached,
    SlowRequest,
}

impl Field {
    /// Every extracted field, in report order.
    pub const ALL: [Self; 10] = [
        Self::AcceptedConnection,
        Self::ListenQueue,
        Self::MaxListenQueue,
        Self::ListenQueueLength,
        Self::IdleProcesses,
        Self::ActiveProcesses,
        Self::TotalProcesses,
        Self::MaxActiveProcesses,
        Self::MaxChildrenReached,
        Self::SlowRequest,
    ];

    // Fixed 0-based line index of this field within the report.
    pub const fn line(self) -> usize {
        match self {
            Self::AcceptedConnection => 4,
            Self::ListenQueue        => 5,
            Self::MaxListenQueue     => 6,
            Self::ListenQueueLength  => 7,
            Self::IdleProcesses      => 8,
            Self::ActiveProcesses    => 9,
            Self::TotalProcesses     => 10,
            Self::MaxActiveProcesses => 11,
            Self::MaxChildrenReached => 12,
            Self::SlowRequest        => 13,
        }
    }

    // Field name as it appears on the status page.
    pub const fn name(self) -> &'static str {
        match self {
            Self::AcceptedConnection => "accepted conn",
            Self::ListenQueue        => "listen queue",
            Self::MaxListenQueue     => "max listen queue",
            Self::ListenQueueLength  => "listen queue len",
            Self::IdleProcesses      => "idle processes",
            Self::ActiveProcesses    => "active processes",
            Self::TotalProcesses     => "total processes",
            Self::MaxActiveProcesses => "max active processes",
            Self::MaxChildrenReached => "max children reached",
            Self::SlowRequest        => "slow requests",
        }
    }

    // Label value the field is published under.
    pub const fn label(self) -> &'static str {
        match self {
            Self::AcceptedConnection => "accepted_connection",
            Self::ListenQueue        => "listen_queue",
            Self::MaxListenQueue     => "max_listen_queue",
            Self::ListenQueueLength  => "listen_queue_length",
            Self::IdleProcesses      => "idle_processes",
            Self::ActiveProcesses    => "active_processes",
            Self::TotalProcesses     => "total_processes",
            Self::MaxActiveProcesses => "max_active_processes",
            Self::MaxChildrenReached => "max_children_reached",
            Self::SlowRequest        => "slow_request",
        }
    }
}

/// A fully parsed status report.
///
/// Parsing is all-or-nothing: a report either yields all ten values or an
/// error, so callers never publish a half-extracted scrape.
#[derive(Debug)]
pub struct StatusReport {
    values: [i64; 10],
}

impl StatusReport {
    /// Parses a status page body.
    ///
    /// The body must split into exactly [`REPORT_LINES`] segments, and
    /// each required line must carry the expected field name at its
    /// fixed position. Both the position and the name are validated so
    /// that upstream format drift fails loudly rather than publishing
    /// values under the wrong label.
    pub fn parse(body: &str) -> Result<Self, ExporterError> {
        let lines: Vec<&str> = body.split('\n').collect();

        if lines.len() != REPORT_LINES {
            let lines = lines.iter().map(ToString::to_string).collect();
            return Err(ExporterError::MalformedReport(lines));
        }

        let mut values = [0; 10];
        for field in Field::ALL {
            values[field as usize] = Self::extract(field, lines[field.line()])?;
        }

        Ok(Self {
            values,
        })
    }

    // Splits a single `name: value` line and parses the value.
    fn extract(field: Field, line: &str) -> Result<i64, ExporterError> {
        let parts: Vec<&str> = line.split(':').collect();

        if parts.len() != 2 || parts[0] != field.name() {
            return Err(ExporterError::LineMismatch {
                expected: field.name(),
                line:     line.to_owned(),
            });
        }

        parts[1]
            .trim()
            .parse()
            .map_err(|source| ExporterError::ParseValue {
                field: field.name(),
                source,
            })
    }

    /// Returns the parsed value for the given field.
    pub fn value(&self, field: Field) -> i64 {
        self.values[field as usize]
    }
}
