use super::GroFile;
use super::layout::ColumnLayout;
use super::record::decode_atom_line;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::trace;

/// Longest line the probe reads before giving up on the input.
const MAX_PROBE_LINE: u64 = 4096;

fn next_line(reader: &mut impl BufRead) -> Option<String> {
    let mut line = String::new();
    match reader.by_ref().take(MAX_PROBE_LINE).read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(n) if n as u64 == MAX_PROBE_LINE && !line.ends_with('\n') => None,
        Ok(_) => Some(line),
    }
}

fn looks_like_gro(reader: &mut impl BufRead) -> Option<()> {
    next_line(reader)?;
    next_line(reader)?.trim().parse::<usize>().ok()?;
    let first_atom = next_line(reader)?;
    let layout = ColumnLayout::derive(&first_atom).ok()?;
    decode_atom_line(&first_atom, &layout).ok()?;
    Some(())
}

impl GroFile {
    /// Checks whether a stream starts like a GRO file.
    ///
    /// Only the title, atom count, and first atom line are consumed. The first atom
    /// line goes through the same decoder the parser uses, so any file the parser
    /// accepts is recognized. Never fails: unreadable or malformed input is `false`.
    pub fn probe(reader: &mut impl BufRead) -> bool {
        let matched = looks_like_gro(reader).is_some();
        trace!("GRO probe result: {}", matched);
        matched
    }

    /// Checks whether the file at `path` starts like a GRO file.
    ///
    /// A file that cannot be opened is reported as `false`.
    pub fn probe_path<P: AsRef<Path>>(path: P) -> bool {
        match File::open(path) {
            Ok(file) => Self::probe(&mut BufReader::new(file)),
            Err(_) => false,
        }
    }
}
