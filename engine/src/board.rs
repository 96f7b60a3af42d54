use std::collections::HashSet;
use std::fmt;

use crate::geometry::{self, Position, BOARD_SIZE, SQUARES_PER_ROW, SQUARE_COUNT};
use crate::movegen;
use crate::{log_debug, Action, Capture, ChainCapture, EngineError, Move, Piece, Team, MEN_PER_TEAM};

/// 보드 스냅샷
///
/// 한 번 만들어진 보드는 바뀌지 않는다. [`Board::apply_action`]은 항상 새 보드를
/// 돌려준다. 기물은 위치 순으로 정렬되어 있고 한 칸에 하나만 있다.
/// 비교는 기물 배치만 본다.
#[derive(Debug, Clone)]
pub struct Board {
    pieces: Vec<Piece>,
    /// 디버그 모드 (파생된 보드로 이어짐)
    debug_mode: bool,
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.pieces == other.pieces
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Board {
    /// 시작 배치: 레드 0~11번, 블랙 20~31번
    pub fn initial() -> Self {
        let red = (0..MEN_PER_TEAM).map(|p| Piece::man(p, Team::Red));
        let black = (SQUARE_COUNT - MEN_PER_TEAM..SQUARE_COUNT).map(|p| Piece::man(p, Team::Black));
        Self {
            pieces: red.chain(black).collect(),
            debug_mode: false,
        }
    }

    pub fn empty() -> Self {
        Self {
            pieces: Vec::new(),
            debug_mode: false,
        }
    }

    /// 임의 배치로 보드 생성 (범위와 중복 검사)
    pub fn from_pieces(mut pieces: Vec<Piece>) -> Result<Self, EngineError> {
        if let Some(piece) = pieces.iter().find(|p| !geometry::is_valid(p.position)) {
            return Err(EngineError::PositionOutOfRange { position: piece.position });
        }

        pieces.sort_by_key(|p| p.position);
        if let Some(pair) = pieces.windows(2).find(|w| w[0].position == w[1].position) {
            return Err(EngineError::DuplicatePosition { position: pair[0].position });
        }

        Ok(Self {
            pieces,
            debug_mode: false,
        })
    }

    pub fn with_debug(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// 같은 설정을 가진 새 보드
    fn derive(&self, mut pieces: Vec<Piece>) -> Board {
        pieces.sort_by_key(|p| p.position);
        Board {
            pieces,
            debug_mode: self.debug_mode,
        }
    }

    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn team_pieces(&self, team: Team) -> impl Iterator<Item = &Piece> + '_ {
        self.pieces.iter().filter(move |p| p.team == team)
    }

    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        movegen::piece_at(position, &self.pieces)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.piece_at(position).is_some()
    }

    pub fn moves_for(&self, piece: &Piece) -> Vec<Move> {
        movegen::moves_for(piece, &self.pieces)
    }

    pub fn captures_for(&self, piece: &Piece) -> Vec<Capture> {
        movegen::captures_for(piece, &self.pieces)
    }

    pub fn chain_captures_for(&self, piece: &Piece) -> Vec<ChainCapture> {
        movegen::collect_chain_captures(piece, &self.pieces, self.debug_mode)
    }

    /// 기물의 합법 행동 목록
    ///
    /// 잡기가 가능하면 연속 잡기만, 아니면 일반 이동을 돌려준다.
    pub fn legal_actions_for(&self, piece: &Piece) -> Vec<Action> {
        let chains = self.chain_captures_for(piece);
        if !chains.is_empty() {
            return chains.into_iter().map(Action::ChainCapture).collect();
        }

        self.moves_for(piece).into_iter().map(Action::Move).collect()
    }

    /// 특정 칸 기물의 합법 행동 (빈 칸이면 빈 목록)
    pub fn legal_actions_at(&self, position: Position) -> Vec<Action> {
        match self.piece_at(position) {
            Some(piece) => self.legal_actions_for(piece),
            None => Vec::new(),
        }
    }

    /// 행동 적용
    ///
    /// 이 보드는 그대로 두고 결과 보드를 새로 만든다. 에러가 나면 아무 보드도
    /// 만들어지지 않는다.
    pub fn apply_action(&self, action: &Action) -> Result<Board, EngineError> {
        if self.debug_mode {
            log_debug(&format!("apply {:?}", action));
        }

        match action {
            Action::Move(mv) => self.move_piece(mv),
            Action::Capture(capture) => self.capture_piece(capture),
            Action::ChainCapture(chain) => self.capture_pieces(chain),
        }
    }

    fn acting_piece(&self, origin: Position) -> Result<Piece, EngineError> {
        self.piece_at(origin)
            .copied()
            .ok_or(EngineError::NoPieceAtOrigin { origin })
    }

    fn move_piece(&self, mv: &Move) -> Result<Board, EngineError> {
        let acting = self.acting_piece(mv.origin)?;
        self.relocate(acting, &[], mv.destination, |team| team.is_kingmaker_square(mv.destination))
    }

    fn capture_piece(&self, capture: &Capture) -> Result<Board, EngineError> {
        let acting = self.acting_piece(capture.origin)?;
        self.relocate(acting, &[capture.captured_position], capture.destination, |team| {
            team.is_kingmaker_square(capture.destination)
        })
    }

    fn capture_pieces(&self, chain: &ChainCapture) -> Result<Board, EngineError> {
        let (first, last) = match (chain.first(), chain.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(EngineError::EmptyChainCapture),
        };
        let acting = self.acting_piece(first.origin)?;

        let captured: Vec<Position> = chain.captures().iter().map(|c| c.captured_position).collect();
        // 경로 중 한 번이라도 승격 행을 지나면 킹
        self.relocate(acting, &captured, last.destination, |team| {
            chain.captures().iter().any(|c| team.is_kingmaker_square(c.destination))
        })
    }

    /// 행동하는 기물과 잡힌 기물을 빼고 도착 칸에 다시 놓는다
    fn relocate(
        &self,
        acting: Piece,
        captured: &[Position],
        destination: Position,
        crowns: impl Fn(Team) -> bool,
    ) -> Result<Board, EngineError> {
        let removed: HashSet<Position> = captured
            .iter()
            .copied()
            .chain(std::iter::once(acting.position))
            .collect();

        let mut remaining: Vec<Piece> = self
            .pieces
            .iter()
            .filter(|p| !removed.contains(&p.position))
            .copied()
            .collect();

        if movegen::is_occupied(destination, &remaining) {
            return Err(EngineError::DestinationOccupied { destination });
        }

        remaining.push(Piece {
            position: destination,
            team: acting.team,
            is_king: acting.is_king || crowns(acting.team),
        });

        Ok(self.derive(remaining))
    }

    /// 텍스트 도식에서 보드 생성
    ///
    /// 공백과 `-`(흰 칸)는 무시한다. 한 줄에 검은 칸 기호 4개씩 8줄이 있어야 한다.
    /// `.` 빈 칸, `r`/`R` 레드 맨/킹, `b`/`B` 블랙 맨/킹.
    pub fn from_diagram(diagram: &str) -> Result<Self, EngineError> {
        let mut pieces = Vec::new();
        let mut rows = 0;

        for line in diagram.lines() {
            let symbols: Vec<char> = line
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '-')
                .collect();
            if symbols.is_empty() {
                continue;
            }
            if rows == BOARD_SIZE {
                return Err(EngineError::InvalidDiagram(format!(
                    "more than {} rows",
                    BOARD_SIZE
                )));
            }
            if symbols.len() != SQUARES_PER_ROW {
                return Err(EngineError::InvalidDiagram(format!(
                    "row {} has {} squares, expected {}",
                    rows,
                    symbols.len(),
                    SQUARES_PER_ROW
                )));
            }

            for (column, symbol) in symbols.into_iter().enumerate() {
                let position = rows * SQUARES_PER_ROW + column;
                let piece = match symbol {
                    '.' => continue,
                    'r' => Piece::man(position, Team::Red),
                    'R' => Piece::king(position, Team::Red),
                    'b' => Piece::man(position, Team::Black),
                    'B' => Piece::king(position, Team::Black),
                    other => {
                        return Err(EngineError::InvalidDiagram(format!(
                            "unknown symbol '{}' in row {}",
                            other, rows
                        )))
                    }
                };
                pieces.push(piece);
            }
            rows += 1;
        }

        if rows != BOARD_SIZE {
            return Err(EngineError::InvalidDiagram(format!(
                "found {} rows, expected {}",
                rows, BOARD_SIZE
            )));
        }

        Self::from_pieces(pieces)
    }
}

fn symbol(piece: Option<&Piece>) -> char {
    match piece {
        None => '.',
        Some(Piece { team: Team::Red, is_king: false, .. }) => 'r',
        Some(Piece { team: Team::Red, is_king: true, .. }) => 'R',
        Some(Piece { team: Team::Black, is_king: false, .. }) => 'b',
        Some(Piece { team: Team::Black, is_king: true, .. }) => 'B',
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let c = match geometry::from_coords(x, y) {
                    Some(position) => symbol(self.piece_at(position)),
                    None => '-',
                };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
