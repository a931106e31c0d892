//! Save/load codecs.
//!
//! Binary layout (little endian):
//!
//! | offset | size | field                         |
//! |--------|------|-------------------------------|
//! | 0      | 4    | magic `HSSG`                  |
//! | 4      | 4    | format version                |
//! | 8      | 4    | payload length                |
//! | 12     | 4    | CRC32 of the payload          |
//! | 16     | 85   | payload                       |
//!
//! Payload: 81 cell codes (row-major), player code, black captures,
//! white captures, capture threshold.
//!
//! The text format is the single line the desktop shell has always written:
//! `[["B",...],...];B;0;0`.

use tracing::{info, instrument, warn};

use crate::board::Board;
use crate::config::RuleConfig;
use crate::error::CorruptSave;
use crate::game::GameState;
use crate::types::{BOARD_SIZE, Captures, Cell, NUM_SQUARES, Player, Snapshot};

const MAGIC: &[u8; 4] = b"HSSG";
const VERSION: u32 = 1;
const HEADER_SIZE: usize = 16;
const PAYLOAD_SIZE: usize = NUM_SQUARES + 4;

pub fn encode(state: &GameState) -> Vec<u8> {
    let mut payload = Vec::with_capacity(PAYLOAD_SIZE);
    payload.extend_from_slice(&state.board().to_array());
    payload.push(state.current_player().code());
    let captures = state.captures();
    payload.push(captures.black);
    payload.push(captures.white);
    payload.push(state.rules().capture_threshold());

    let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(&crc32fast::hash(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    out
}

/// Rebuilds a game from [`encode`] output. Nothing is constructed unless
/// every field checks out.
#[instrument(level = "debug", skip(data), fields(len = data.len()))]
pub fn decode(data: &[u8]) -> Result<GameState, CorruptSave> {
    let state = decode_binary(data).inspect_err(|err| warn!(%err, "rejected binary save"))?;
    info!("binary save loaded");
    Ok(state)
}

fn decode_binary(data: &[u8]) -> Result<GameState, CorruptSave> {
    if data.len() < HEADER_SIZE {
        return Err(CorruptSave::Truncated {
            expected: HEADER_SIZE,
            got: data.len(),
        });
    }

    if &data[0..4] != MAGIC {
        return Err(CorruptSave::BadMagic);
    }

    let version = read_u32_le(data, 4)?;
    if version != VERSION {
        return Err(CorruptSave::UnsupportedVersion {
            expected: VERSION,
            got: version,
        });
    }

    let declared = read_u32_le(data, 8)? as usize;
    let payload = &data[HEADER_SIZE..];
    if declared != payload.len() {
        return Err(CorruptSave::LengthMismatch {
            declared,
            actual: payload.len(),
        });
    }

    let expected_crc = read_u32_le(data, 12)?;
    let actual_crc = crc32fast::hash(payload);
    if actual_crc != expected_crc {
        return Err(CorruptSave::ChecksumMismatch {
            expected: expected_crc,
            actual: actual_crc,
        });
    }

    if payload.len() != PAYLOAD_SIZE {
        return Err(CorruptSave::Truncated {
            expected: HEADER_SIZE + PAYLOAD_SIZE,
            got: data.len(),
        });
    }

    let mut grid: Snapshot = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (index, &code) in payload[..NUM_SQUARES].iter().enumerate() {
        grid[index / BOARD_SIZE][index % BOARD_SIZE] =
            Cell::from_code(code).ok_or_else(|| CorruptSave::InvalidCell {
                index,
                value: code.to_string(),
            })?;
    }

    let tail = &payload[NUM_SQUARES..];
    let player = Player::from_code(tail[0])
        .ok_or_else(|| CorruptSave::InvalidPlayer(tail[0].to_string()))?;
    let captures = Captures {
        black: tail[1],
        white: tail[2],
    };
    let rules = RuleConfig::new(tail[3])?;

    assemble(&grid, player, captures, rules)
}

/// Writes the desktop shell's one-line text format.
pub fn encode_text(state: &GameState) -> String {
    let rows: Vec<String> = state
        .snapshot()
        .iter()
        .map(|row| {
            let cells: Vec<&str> = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => "\"E\"",
                    Cell::Black => "\"B\"",
                    Cell::White => "\"W\"",
                })
                .collect();
            format!("[{}]", cells.join(","))
        })
        .collect();

    let player = match state.current_player() {
        Player::Black => "B",
        Player::White => "W",
    };
    let captures = state.captures();
    format!(
        "[{}];{};{};{}",
        rows.join(","),
        player,
        captures.black,
        captures.white
    )
}

/// Reads the text format. Text saves carry no rules, so the defaults apply.
#[instrument(level = "debug", skip(text), fields(len = text.len()))]
pub fn decode_text(text: &str) -> Result<GameState, CorruptSave> {
    let state = parse_text(text).inspect_err(|err| warn!(%err, "rejected text save"))?;
    info!("text save loaded");
    Ok(state)
}

fn parse_text(text: &str) -> Result<GameState, CorruptSave> {
    let fields: Vec<&str> = text.trim().split(';').collect();
    let [board, player, black, white] = fields.as_slice() else {
        return Err(CorruptSave::Malformed(format!(
            "expected 4 ';'-separated fields, got {}",
            fields.len()
        )));
    };

    let rows: Vec<Vec<String>> = serde_json::from_str(board)
        .map_err(|err| CorruptSave::Malformed(format!("board is not a grid: {err}")))?;
    if rows.len() != BOARD_SIZE || rows.iter().any(|row| row.len() != BOARD_SIZE) {
        return Err(CorruptSave::Malformed(format!(
            "board must be {BOARD_SIZE}x{BOARD_SIZE}"
        )));
    }

    let mut grid: Snapshot = [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE];
    for (r, row) in rows.iter().enumerate() {
        for (c, symbol) in row.iter().enumerate() {
            grid[r][c] = match symbol.as_str() {
                "E" => Cell::Empty,
                "B" => Cell::Black,
                "W" => Cell::White,
                _ => {
                    return Err(CorruptSave::InvalidCell {
                        index: r * BOARD_SIZE + c,
                        value: symbol.clone(),
                    });
                }
            };
        }
    }

    let player = match player.trim() {
        "B" => Player::Black,
        "W" => Player::White,
        other => return Err(CorruptSave::InvalidPlayer(other.to_string())),
    };
    let captures = Captures {
        black: parse_counter(black)?,
        white: parse_counter(white)?,
    };

    assemble(&grid, player, captures, RuleConfig::default())
}

fn parse_counter(field: &str) -> Result<u8, CorruptSave> {
    field
        .trim()
        .parse()
        .map_err(|_| CorruptSave::InvalidCounter(field.to_string()))
}

/// Every piece not on the board must have been captured by the other side,
/// and a finished game must have exactly one winner who has already moved.
fn assemble(
    grid: &Snapshot,
    player: Player,
    captures: Captures,
    rules: RuleConfig,
) -> Result<GameState, CorruptSave> {
    let full = BOARD_SIZE as u8;
    for counter in [captures.black, captures.white] {
        if counter > full {
            return Err(CorruptSave::InvalidCounter(counter.to_string()));
        }
    }

    let board = Board::from_snapshot(grid);
    let (black_on_board, white_on_board) = board.count();
    if black_on_board + captures.white != full {
        return Err(CorruptSave::PieceCountMismatch {
            color: "black",
            on_board: black_on_board,
            captured: captures.white,
        });
    }
    if white_on_board + captures.black != full {
        return Err(CorruptSave::PieceCountMismatch {
            color: "white",
            on_board: white_on_board,
            captured: captures.black,
        });
    }

    let threshold = rules.capture_threshold();
    if captures.black >= threshold && captures.white >= threshold {
        return Err(CorruptSave::BothSidesWon {
            black: captures.black,
            white: captures.white,
            threshold,
        });
    }

    let state = GameState::from_parts(board, player, captures, rules);
    if state.winner() == Some(player) {
        return Err(CorruptSave::WinnerToMove(player));
    }
    Ok(state)
}

fn read_u32_le(data: &[u8], offset: usize) -> Result<u32, CorruptSave> {
    if offset + 4 > data.len() {
        return Err(CorruptSave::Truncated {
            expected: offset + 4,
            got: data.len(),
        });
    }
    let mut bytes = [0u8; 4];
    bytes.copy_from_slice(&data[offset..offset + 4]);
    Ok(u32::from_le_bytes(bytes))
}
