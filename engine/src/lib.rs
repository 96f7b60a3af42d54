//! 8×8 체커 규칙 엔진 (검은 칸 32개 인덱스 기준)
//!
//! [`Board`]는 불변 스냅샷이다. [`Board::legal_actions_for`]로 기물의 합법 행동을
//! 구하고 [`Board::apply_action`]으로 다음 보드를 얻는다. 턴 관리, 승패 판정,
//! 화면 표시는 호출자 몫이다.

pub mod board;
pub mod geometry;
pub mod movegen;

pub use board::Board;
pub use geometry::{Direction, Position};

// 디버그 로그 출력 (WASM 환경에서는 JS console.log로 전달)
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[cfg(target_arch = "wasm32")]
pub(crate) fn log_debug(msg: &str) {
    log(msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn log_debug(msg: &str) {
    println!("DEBUG: {}", msg);
}

/// 진영별 시작 기물 수
pub const MEN_PER_TEAM: usize = 12;

/// 진영
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Team {
    /// 0~11번 칸에서 시작, 아래로 전진
    Red,
    /// 20~31번 칸에서 시작, 위로 전진
    Black,
}

impl Team {
    pub fn opponent(self) -> Team {
        match self {
            Team::Red => Team::Black,
            Team::Black => Team::Red,
        }
    }

    /// 일반 기물(맨)의 전진 방향
    pub fn forward_directions(self) -> &'static [Direction] {
        match self {
            Team::Red => &[Direction::DownRight, Direction::DownLeft],
            Team::Black => &[Direction::UpRight, Direction::UpLeft],
        }
    }

    /// 킹 승격 행
    pub fn kingmaker_row(self) -> usize {
        match self {
            Team::Red => geometry::BOARD_SIZE - 1,
            Team::Black => 0,
        }
    }

    /// 해당 칸이 킹 승격 행인지
    pub fn is_kingmaker_square(self, position: Position) -> bool {
        match self {
            Team::Red => !geometry::exists_down_one(position),
            Team::Black => !geometry::exists_up_one(position),
        }
    }
}

/// 기물 (식별자는 보드 위 위치)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub position: Position,
    pub team: Team,
    pub is_king: bool,
}

impl Piece {
    pub fn man(position: Position, team: Team) -> Self {
        Self { position, team, is_king: false }
    }

    pub fn king(position: Position, team: Team) -> Self {
        Self { position, team, is_king: true }
    }

    /// 이동/잡기 가능한 방향 (킹은 네 방향 모두)
    pub fn directions(&self) -> &'static [Direction] {
        if self.is_king {
            &Direction::ALL
        } else {
            self.team.forward_directions()
        }
    }

    /// 킹 여부를 유지한 채 위치만 바꾼 기물
    pub fn relocated(&self, position: Position) -> Self {
        Self { position, ..*self }
    }
}

/// 빈 칸으로 대각선 한 칸 이동
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Position,
    pub destination: Position,
}

/// 인접한 적 기물을 넘어 뒤의 빈 칸에 착지하는 잡기
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capture {
    pub origin: Position,
    pub captured_position: Position,
    pub destination: Position,
}

/// 한 기물이 한 턴에 이어서 하는 연속 잡기
///
/// [`ChainCapture::new`]나 생성기로 만든 값은 비어 있지 않고,
/// 모든 단계에서 `captures[i + 1].origin == captures[i].destination`이다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChainCapture {
    captures: Vec<Capture>,
}

impl ChainCapture {
    /// 빈 시퀀스면 `None`
    pub fn new(captures: Vec<Capture>) -> Option<Self> {
        if captures.is_empty() {
            None
        } else {
            Some(Self { captures })
        }
    }

    pub(crate) fn from_unchecked(captures: Vec<Capture>) -> Self {
        Self { captures }
    }

    pub fn captures(&self) -> &[Capture] {
        &self.captures
    }

    pub fn len(&self) -> usize {
        self.captures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_empty()
    }

    pub fn first(&self) -> Option<&Capture> {
        self.captures.first()
    }

    pub fn last(&self) -> Option<&Capture> {
        self.captures.last()
    }
}

/// 플레이어가 기물로 수행할 수 있는 행동
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    Move(Move),
    Capture(Capture),
    ChainCapture(ChainCapture),
}

impl Action {
    /// 행동하는 기물의 출발 칸
    pub fn origin(&self) -> Option<Position> {
        match self {
            Action::Move(mv) => Some(mv.origin),
            Action::Capture(capture) => Some(capture.origin),
            Action::ChainCapture(chain) => chain.first().map(|c| c.origin),
        }
    }

    /// 행동하는 기물의 최종 도착 칸
    pub fn final_destination(&self) -> Option<Position> {
        match self {
            Action::Move(mv) => Some(mv.destination),
            Action::Capture(capture) => Some(capture.destination),
            Action::ChainCapture(chain) => chain.last().map(|c| c.destination),
        }
    }

    /// 기물이 착지하는 모든 칸 (순서대로, 하이라이트용)
    pub fn destinations(&self) -> Vec<Position> {
        match self {
            Action::Move(mv) => vec![mv.destination],
            Action::Capture(capture) => vec![capture.destination],
            Action::ChainCapture(chain) => chain.captures().iter().map(|c| c.destination).collect(),
        }
    }

    pub fn captured_positions(&self) -> Vec<Position> {
        match self {
            Action::Move(_) => Vec::new(),
            Action::Capture(capture) => vec![capture.captured_position],
            Action::ChainCapture(chain) => chain.captures().iter().map(|c| c.captured_position).collect(),
        }
    }
}

/// 보드 생성 및 행동 적용 에러
///
/// 행동 관련 에러는 적용 대상 보드에서 생성되지 않은 행동을 썼다는 뜻이다.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no piece at origin position {origin}")]
    NoPieceAtOrigin { origin: Position },

    #[error("chain capture has no captures")]
    EmptyChainCapture,

    #[error("destination position {destination} is occupied")]
    DestinationOccupied { destination: Position },

    #[error("position {position} is outside the board")]
    PositionOutOfRange { position: Position },

    #[error("more than one piece at position {position}")]
    DuplicatePosition { position: Position },

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),
}
