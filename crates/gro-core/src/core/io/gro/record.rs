use super::error::{GroError, RecordErrorKind, columns};
use super::layout::ColumnLayout;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::ops::Range;
use std::str::FromStr;

/// Nanometers (file units) to Angstroms (in-memory units).
pub const NM_TO_ANGSTROM: f64 = 10.0;

const RESIDUE_NUMBER_COLUMNS: Range<usize> = 0..5;
const RESIDUE_NAME_COLUMNS: Range<usize> = 5..10;
const ATOM_NAME_COLUMNS: Range<usize> = 10..15;
const SERIAL_COLUMNS: Range<usize> = 15..20;

/// Width of the residue number, residue name, atom name, and serial columns.
pub const ID_FIELD_WIDTH: usize = 5;

/// One atom line of a GRO file, in Angstroms and Angstroms per picosecond.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    pub residue_number: isize,
    pub residue_name: String,
    pub atom_name: String,
    pub serial: usize,
    pub position: Point3<f64>,
    pub velocity: Option<Vector3<f64>>,
}

/// Returns the characters of `line` in `range`, clipped to the line's end.
///
/// Out-of-range or non-boundary slices read as empty.
fn slice(line: &str, range: Range<usize>) -> &str {
    let end = range.end.min(line.len());
    let start = range.start.min(end);
    line.get(start..end).unwrap_or("")
}

fn parse_number<T: FromStr>(line: &str, range: Range<usize>) -> Result<T, RecordErrorKind> {
    let raw = slice(line, range.clone());
    raw.trim().parse().map_err(|_| RecordErrorKind::InvalidInt {
        columns: columns(&range),
        value: raw.to_string(),
    })
}

fn parse_name(line: &str, range: Range<usize>) -> Result<String, RecordErrorKind> {
    let name = slice(line, range.clone()).trim();
    if name.is_empty() {
        return Err(RecordErrorKind::MissingField {
            columns: columns(&range),
        });
    }
    Ok(name.to_string())
}

fn parse_coordinate(line: &str, range: Range<usize>) -> Result<f64, RecordErrorKind> {
    let raw = slice(line, range.clone());
    let value: f64 = raw.trim().parse().map_err(|_| RecordErrorKind::InvalidFloat {
        columns: columns(&range),
        value: raw.to_string(),
    })?;
    Ok(value * NM_TO_ANGSTROM)
}

fn parse_triplet(
    line: &str,
    layout: &ColumnLayout,
    first_field: usize,
) -> Result<Vector3<f64>, RecordErrorKind> {
    Ok(Vector3::new(
        parse_coordinate(line, layout.field(first_field))?,
        parse_coordinate(line, layout.field(first_field + 1))?,
        parse_coordinate(line, layout.field(first_field + 2))?,
    ))
}

/// Decodes one atom line using a layout inferred earlier in the same file.
///
/// Velocities are read only when the first velocity field holds something other
/// than whitespace.
///
/// # Errors
///
/// Returns the [`RecordErrorKind`] describing the first field that failed to parse.
pub fn decode_atom_line(line: &str, layout: &ColumnLayout) -> Result<AtomRecord, RecordErrorKind> {
    let line = line.trim_end_matches(['\r', '\n']);

    let residue_number = parse_number(line, RESIDUE_NUMBER_COLUMNS)?;
    let residue_name = parse_name(line, RESIDUE_NAME_COLUMNS)?;
    let atom_name = parse_name(line, ATOM_NAME_COLUMNS)?;
    let serial = parse_number(line, SERIAL_COLUMNS)?;
    let position = Point3::from(parse_triplet(line, layout, 0)?);

    let velocity = if slice(line, layout.field(3)).trim().is_empty() {
        None
    } else {
        Some(parse_triplet(line, layout, 3)?)
    };

    Ok(AtomRecord {
        residue_number,
        residue_name,
        atom_name,
        serial,
        position,
        velocity,
    })
}

/// Formatting policy for text that is wider than its fixed column.
///
/// The rendered text is cut to its first `width` characters, the way the format's
/// own writers do it. Column positions therefore never shift, at the price of losing
/// the trailing digits of out-of-range values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedWidthTruncate {
    width: usize,
}

impl FixedWidthTruncate {
    pub const fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn apply<'a>(&self, rendered: &'a str) -> &'a str {
        match rendered.char_indices().nth(self.width) {
            Some((cut, _)) => &rendered[..cut],
            None => rendered,
        }
    }
}

/// What to do with a residue number or serial that needs more than five columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexOverflow {
    /// Write the value modulo 100000, as GROMACS does.
    #[default]
    Wrap,
    /// Fail with [`GroError::FieldOverflow`].
    Error,
}

const INDEX_MODULUS: i64 = 100_000;
const INDEX_RANGE: std::ops::RangeInclusive<i64> = -9_999..=99_999;

impl IndexOverflow {
    fn fit(self, field: &'static str, value: i64) -> Result<i64, GroError> {
        if INDEX_RANGE.contains(&value) {
            return Ok(value);
        }
        match self {
            IndexOverflow::Wrap => Ok(value.rem_euclid(INDEX_MODULUS)),
            IndexOverflow::Error => Err(GroError::FieldOverflow {
                field,
                value,
                width: ID_FIELD_WIDTH,
            }),
        }
    }
}

/// Renders [`AtomRecord`]s as GRO atom lines.
///
/// Positions use `precision` decimals in `precision + 5` columns and velocities one
/// more decimal in the same width, both converted back to nanometers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AtomLineEncoder {
    precision: usize,
    with_velocities: bool,
    index_overflow: IndexOverflow,
}

impl AtomLineEncoder {
    pub fn new(precision: usize, with_velocities: bool) -> Self {
        Self {
            precision,
            with_velocities,
            index_overflow: IndexOverflow::default(),
        }
    }

    pub fn index_overflow(mut self, policy: IndexOverflow) -> Self {
        self.index_overflow = policy;
        self
    }

    pub fn layout(&self) -> ColumnLayout {
        ColumnLayout::with_precision(self.precision)
    }

    fn push_value(&self, line: &mut String, value: f64, decimals: usize) {
        let policy = FixedWidthTruncate::new(self.layout().field_width());
        let rendered = format!(
            "{:>width$.decimals$}",
            value / NM_TO_ANGSTROM,
            width = policy.width(),
            decimals = decimals
        );
        line.push_str(policy.apply(&rendered));
    }

    /// Encodes one record without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`GroError::FieldOverflow`] only under [`IndexOverflow::Error`], when
    /// the residue number or serial does not fit five columns.
    pub fn encode(&self, record: &AtomRecord) -> Result<String, GroError> {
        let id_policy = FixedWidthTruncate::new(ID_FIELD_WIDTH);
        let residue_number = self
            .index_overflow
            .fit("residue number", record.residue_number as i64)?;
        let serial = self.index_overflow.fit("atom serial", record.serial as i64)?;

        let mut line = format!(
            "{:>5}{:<5}{:>5}{:>5}",
            residue_number,
            id_policy.apply(&record.residue_name),
            id_policy.apply(&record.atom_name),
            serial
        );

        for value in record.position.iter() {
            self.push_value(&mut line, *value, self.precision);
        }
        if self.with_velocities {
            let velocity = record.velocity.unwrap_or_else(Vector3::zeros);
            for value in velocity.iter() {
                self.push_value(&mut line, *value, self.precision + 1);
            }
        }
        Ok(line)
    }
}
