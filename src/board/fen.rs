use crate::board::{Board, CastlingRights, Color, GameState, Piece, PieceKind, Square};
use crate::errors::{ChessError, Result};
use crate::movegen::attacks::is_square_attacked;

pub const STARTPOS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl GameState {
    /// Parse a FEN record. The halfmove and fullmove fields may be omitted.
    /// The resulting position must have one king per side and the side not
    /// to move must not be in check.
    pub fn from_fen(fen: &str) -> Result<GameState> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 || fields.len() > 6 {
            return Err(ChessError::fen(fen, "expected 4 to 6 fields"));
        }

        let board = parse_placement(fen, fields[0])?;
        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(ChessError::fen(fen, format!("bad side to move '{other}'"))),
        };
        let castling = parse_castling(fen, fields[2])?;
        let en_passant = match fields[3] {
            "-" => None,
            s => {
                let sq = Square::from_algebraic(s)
                    .ok_or_else(|| ChessError::fen(fen, format!("bad en-passant square '{s}'")))?;
                check_en_passant(&board, sq, side_to_move).map_err(|why| ChessError::fen(fen, why))?;
                Some(sq)
            }
        };
        let halfmove_clock = match fields.get(4) {
            Some(s) => s.parse().map_err(|_| ChessError::fen(fen, "bad halfmove clock"))?,
            None => 0,
        };
        let fullmove_number = match fields.get(5) {
            Some(s) => s.parse().map_err(|_| ChessError::fen(fen, "bad fullmove number"))?,
            None => 1,
        };

        for color in Color::BOTH {
            if board.count_kings(color) != 1 {
                return Err(ChessError::fen(fen, format!("{color} must have exactly one king")));
            }
        }
        let waiting = !side_to_move;
        if let Some(k) = board.king_square(waiting) {
            if is_square_attacked(&board, k, side_to_move) {
                return Err(ChessError::fen(fen, "side not to move is in check"));
            }
        }

        Ok(GameState {
            board,
            side_to_move,
            castling,
            en_passant,
            halfmove_clock,
            fullmove_number,
            history: Vec::new(),
        })
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::with_capacity(90);
        for row in 0..8u8 {
            let mut empty = 0;
            for col in 0..8u8 {
                match self.board.get(Square::at(row, col)) {
                    Some(p) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(p.to_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if row < 7 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        out.push(' ');
        let mut rights = String::new();
        for (color, kingside, letter) in [
            (Color::White, true, 'K'),
            (Color::White, false, 'Q'),
            (Color::Black, true, 'k'),
            (Color::Black, false, 'q'),
        ] {
            if self.castling.can_castle(color, kingside) {
                rights.push(letter);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        out.push_str(&rights);

        out.push(' ');
        match self.en_passant {
            Some(sq) => out.push_str(&sq.to_algebraic()),
            None => out.push('-'),
        }
        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

/// The target must be empty, sit on the rank just crossed by the side that
/// moved last, and have that side's pawn directly behind it.
fn check_en_passant(board: &Board, sq: Square, side_to_move: Color) -> std::result::Result<(), &'static str> {
    let (target_row, pawn_row) = match side_to_move {
        Color::White => (2, 3),
        Color::Black => (5, 4),
    };
    if sq.row() != target_row {
        return Err("en-passant square is on the wrong rank for the side to move");
    }
    if !board.is_empty(sq) {
        return Err("en-passant square is occupied");
    }
    match board.get(Square::at(pawn_row, sq.col())) {
        Some(p) if p.kind == PieceKind::Pawn && p.color != side_to_move => Ok(()),
        _ => Err("no pawn behind the en-passant square"),
    }
}

fn parse_placement(fen: &str, placement: &str) -> Result<Board> {
    let rows: Vec<&str> = placement.split('/').collect();
    if rows.len() != 8 {
        return Err(ChessError::fen(fen, "placement must have 8 ranks"));
    }
    let mut board = Board::empty();
    for (row, text) in rows.iter().enumerate() {
        let mut col = 0u8;
        for c in text.chars() {
            if let Some(skip) = c.to_digit(10) {
                if !(1..=8).contains(&skip) {
                    return Err(ChessError::fen(fen, format!("bad empty run '{c}'")));
                }
                col += skip as u8;
            } else {
                let piece = Piece::from_char(c)
                    .ok_or_else(|| ChessError::fen(fen, format!("bad piece '{c}'")))?;
                if col >= 8 {
                    return Err(ChessError::fen(fen, format!("rank {} too long", 8 - row)));
                }
                if piece.kind == PieceKind::Pawn && (row == 0 || row == 7) {
                    return Err(ChessError::fen(fen, "pawn on a back rank"));
                }
                let mut piece = piece;
                piece.has_moved = piece.kind == PieceKind::Pawn && row as u8 != piece.color.pawn_row();
                board.set(Square::at(row as u8, col), Some(piece));
                col += 1;
            }
            if col > 8 {
                return Err(ChessError::fen(fen, format!("rank {} too long", 8 - row)));
            }
        }
        if col != 8 {
            return Err(ChessError::fen(fen, format!("rank {} has {col} squares", 8 - row)));
        }
    }
    Ok(board)
}

fn parse_castling(fen: &str, field: &str) -> Result<CastlingRights> {
    let mut rights = CastlingRights::NONE;
    if field == "-" {
        return Ok(rights);
    }
    for c in field.chars() {
        let (color, kingside) = match c {
            'K' => (Color::White, true),
            'Q' => (Color::White, false),
            'k' => (Color::Black, true),
            'q' => (Color::Black, false),
            _ => return Err(ChessError::fen(fen, format!("bad castling flag '{c}'"))),
        };
        match color {
            Color::White => rights.white_king_moved = false,
            Color::Black => rights.black_king_moved = false,
        }
        match (color, kingside) {
            (Color::White, true) => rights.white_rook_h_moved = false,
            (Color::White, false) => rights.white_rook_a_moved = false,
            (Color::Black, true) => rights.black_rook_h_moved = false,
            (Color::Black, false) => rights.black_rook_a_moved = false,
        }
    }
    Ok(rights)
}
