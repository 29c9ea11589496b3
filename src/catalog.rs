//! The fixed piece catalog the game draws hands from.
//!
//! The catalog ships as an embedded text table (`pieces.txt`): one block of
//! `1`/`0` rows per piece, blank-line separated, with all rotations of the
//! canonical shapes already expanded and deduplicated. The engine performs
//! no shape generation or rotation of its own; it only samples this set.

use std::sync::OnceLock;

use crate::piece::Piece;

static PIECE_TABLE: &str = include_str!("pieces.txt");

static PIECES: OnceLock<Vec<Piece>> = OnceLock::new();

/// All catalog pieces, parsed once on first use.
pub fn pieces() -> &'static [Piece] {
    PIECES.get_or_init(|| {
        parse_table(PIECE_TABLE).expect("embedded piece table is well-formed")
    })
}

/// Draw one catalog piece uniformly at random.
pub fn draw(rng: &mut fastrand::Rng) -> Piece {
    let all = pieces();
    all[rng.usize(..all.len())].clone()
}

fn parse_table(table: &str) -> Result<Vec<Piece>, crate::piece::PieceError> {
    let mut out = Vec::new();
    let mut block: Vec<Vec<bool>> = Vec::new();

    for line in table.lines() {
        let line = line.trim();
        if line.is_empty() {
            if !block.is_empty() {
                out.push(Piece::new(&block)?);
                block.clear();
            }
        } else {
            block.push(line.bytes().map(|b| b == b'1').collect());
        }
    }
    if !block.is_empty() {
        out.push(Piece::new(&block)?);
    }

    Ok(out)
}
