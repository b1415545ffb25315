//! File I/O for saving and loading generated levels.
//!
//! Binary format for `levels.bin` (little endian):
//! - u32: level count
//! - repeat per level:
//!   - u16: rows
//!   - u16: cols
//!   - rows * cols bytes: markers, row-major (0 empty, 1 floor, 2 start, 3 goal)
//!   - u32: solution length
//!   - one byte per solution entry (0 initial state, 1 up, 2 down, 3 left, 4 right)

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::engine::Move;
use crate::error::PersistenceError;
use crate::grid::{Grid, Marker};
use crate::level::{format_level, Level};

const LEVELS_BIN: &str = "levels.bin";
const LEVELS_TXT: &str = "levels.txt";

/// Saves levels to both binary and text files inside `dir`.
pub fn save(dir: &Path, levels: &[Level]) -> Result<(), PersistenceError> {
    fs::create_dir_all(dir)?;
    save_text(&dir.join(LEVELS_TXT), levels)?;

    let mut file = BufWriter::new(File::create(dir.join(LEVELS_BIN))?);
    write_binary(&mut file, levels)?;
    file.flush()?;
    Ok(())
}

/// Saves levels in human-readable text format.
fn save_text(path: &Path, levels: &[Level]) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "Generated {} levels:\n", levels.len())?;
    for (i, level) in levels.iter().enumerate() {
        writeln!(file, "Level {}:", i + 1)?;
        write!(file, "{}", format_level(level))?;
        writeln!(file)?;
    }
    file.flush()
}

/// Writes levels in the compact binary format.
pub fn write_binary<W: Write>(writer: &mut W, levels: &[Level]) -> io::Result<()> {
    writer.write_all(&len_u32(levels.len())?.to_le_bytes())?;

    for level in levels {
        let grid = level.grid();
        writer.write_all(&dimension_u16(grid.rows())?.to_le_bytes())?;
        writer.write_all(&dimension_u16(grid.cols())?.to_le_bytes())?;
        let markers: Vec<u8> = grid.markers().iter().map(|&m| marker_to_byte(m)).collect();
        writer.write_all(&markers)?;

        writer.write_all(&len_u32(level.solution().len())?.to_le_bytes())?;
        let moves: Vec<u8> = level.solution().iter().map(|&mv| move_to_byte(mv)).collect();
        writer.write_all(&moves)?;
    }

    Ok(())
}

/// Reads levels written by [`write_binary`], checking that each solution replays.
pub fn read_binary<R: Read>(reader: &mut R) -> Result<Vec<Level>, PersistenceError> {
    let level_count = read_u32(reader)? as usize;
    // the count is untrusted; let the vector grow past this if it must
    let mut levels = Vec::with_capacity(level_count.min(1024));

    for index in 0..level_count {
        let rows = read_u16(reader)? as usize;
        let cols = read_u16(reader)? as usize;

        let marker_bytes = read_bytes(reader, rows * cols)?;
        let markers = marker_bytes
            .iter()
            .map(|&byte| {
                marker_from_byte(byte).ok_or_else(|| PersistenceError::Corrupt {
                    reason: format!("level {index}: unknown marker byte {byte}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let grid = Grid::from_markers(rows, cols, markers).ok_or_else(|| {
            PersistenceError::Corrupt {
                reason: format!("level {index}: marker count does not match {rows}x{cols}"),
            }
        })?;

        let move_count = read_u32(reader)? as usize;
        let move_bytes = read_bytes(reader, move_count)?;
        let solution = move_bytes
            .iter()
            .map(|&byte| {
                move_from_byte(byte).ok_or_else(|| PersistenceError::Corrupt {
                    reason: format!("level {index}: unknown move byte {byte}"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let level = Level::new(grid, solution);
        level.replay()?;
        levels.push(level);
    }

    Ok(levels)
}

/// Loads all levels from the binary file in `dir`.
pub fn load_all(dir: &Path) -> Result<Vec<Level>, PersistenceError> {
    let mut file = BufReader::new(File::open(dir.join(LEVELS_BIN))?);
    read_binary(&mut file)
}

/// Returns the number of saved levels without loading them all.
pub fn count(dir: &Path) -> Result<usize, PersistenceError> {
    let mut file = File::open(dir.join(LEVELS_BIN))?;
    Ok(read_u32(&mut file)? as usize)
}

/// Reads exactly `len` bytes without trusting `len` for the allocation.
fn read_bytes<R: Read>(reader: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::with_capacity(len.min(4096));
    (&mut *reader).take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(io::Error::from(io::ErrorKind::UnexpectedEof));
    }
    Ok(bytes)
}

fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buffer = [0u8; 4];
    reader.read_exact(&mut buffer)?;
    Ok(u32::from_le_bytes(buffer))
}

fn read_u16<R: Read>(reader: &mut R) -> io::Result<u16> {
    let mut buffer = [0u8; 2];
    reader.read_exact(&mut buffer)?;
    Ok(u16::from_le_bytes(buffer))
}

fn len_u32(len: usize) -> io::Result<u32> {
    u32::try_from(len).map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "too many entries"))
}

fn dimension_u16(dimension: usize) -> io::Result<u16> {
    u16::try_from(dimension)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "board dimension exceeds u16"))
}

const fn marker_to_byte(marker: Marker) -> u8 {
    match marker {
        Marker::Empty => 0,
        Marker::Floor => 1,
        Marker::Start => 2,
        Marker::Goal => 3,
    }
}

const fn marker_from_byte(byte: u8) -> Option<Marker> {
    match byte {
        0 => Some(Marker::Empty),
        1 => Some(Marker::Floor),
        2 => Some(Marker::Start),
        3 => Some(Marker::Goal),
        _ => None,
    }
}

const fn move_to_byte(mv: Option<Move>) -> u8 {
    match mv {
        None => 0,
        Some(Move::Up) => 1,
        Some(Move::Down) => 2,
        Some(Move::Left) => 3,
        Some(Move::Right) => 4,
    }
}

/// Outer `None` means the byte is invalid; inner `None` is the initial state.
const fn move_from_byte(byte: u8) -> Option<Option<Move>> {
    match byte {
        0 => Some(None),
        1 => Some(Some(Move::Up)),
        2 => Some(Some(Move::Down)),
        3 => Some(Some(Move::Left)),
        4 => Some(Some(Move::Right)),
        _ => None,
    }
}
