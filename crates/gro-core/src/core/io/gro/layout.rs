use super::error::RecordErrorKind;
use std::fmt;
use std::ops::Range;

/// Column at which the first coordinate field starts.
pub const COORD_START: usize = 20;

/// Characters of a coordinate field that are not decimals: sign, integer digits, point.
const LEADING_CHARS: usize = 5;

/// The fixed-width scheme of a file's coordinate columns.
///
/// GRO files do not declare their field widths. The layout is inferred once from
/// the first atom line, from the distance between its first two decimal points,
/// and then applied unchanged to every other atom line of the same file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Where the first decimal point was found, for diagnostics only. Field offsets
    /// are anchored at [`COORD_START`] and never derived from this column.
    first_decimal: usize,
    decimals: usize,
}

impl ColumnLayout {
    /// Infers the layout from a representative atom line.
    ///
    /// Decimal points are searched from [`COORD_START`] on, so names containing a
    /// `.` do not disturb the inference.
    ///
    /// # Errors
    ///
    /// Returns [`RecordErrorKind::MissingDecimalPoint`] if fewer than two points are
    /// found, or [`RecordErrorKind::InvalidLayout`] if they are closer together than
    /// a coordinate field can be.
    pub fn derive(line: &str) -> Result<Self, RecordErrorKind> {
        let mut points = line
            .bytes()
            .enumerate()
            .skip(COORD_START)
            .filter(|&(_, b)| b == b'.')
            .map(|(i, _)| i);

        let first = points.next().ok_or(RecordErrorKind::MissingDecimalPoint)?;
        let second = points.next().ok_or(RecordErrorKind::MissingDecimalPoint)?;
        let spacing = second - first;
        let decimals = spacing
            .checked_sub(LEADING_CHARS)
            .ok_or(RecordErrorKind::InvalidLayout { spacing })?;

        Ok(Self {
            first_decimal: first,
            decimals,
        })
    }

    /// The layout a writer produces for the given number of decimals.
    pub fn with_precision(decimals: usize) -> Self {
        Self {
            first_decimal: COORD_START + LEADING_CHARS - 1,
            decimals,
        }
    }

    /// Number of digits after the decimal point in position fields.
    pub fn decimals(&self) -> usize {
        self.decimals
    }

    pub fn field_width(&self) -> usize {
        self.decimals + LEADING_CHARS
    }

    /// Column range of coordinate field `index`: 0-2 are positions, 3-5 velocities.
    pub fn field(&self, index: usize) -> Range<usize> {
        let width = self.field_width();
        let start = COORD_START + index * width;
        start..start + width
    }
}

impl fmt::Display for ColumnLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} decimals, {}-column fields (first point at column {})",
            self.decimals,
            self.field_width(),
            self.first_decimal + 1
        )
    }
}
