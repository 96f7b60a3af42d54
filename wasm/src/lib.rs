use wasm_bindgen::prelude::*;
use serde::{Serialize, Deserialize};
use checkers_engine::{geometry, Action, Board, Capture, ChainCapture, Move, Position, Team};

/// JS에서 사용할 게임 래퍼 (현재 보드 하나만 보관)
#[wasm_bindgen]
pub struct Game {
    board: Board,
}

/// JS로 전달할 기물 정보
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsPiece {
    pub position: usize,
    pub x: usize,
    pub y: usize,
    pub team: String, // "red", "black"
    pub is_king: bool,
}

/// 잡기 한 번
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsCapture {
    pub origin: usize,
    pub captured_position: usize,
    pub destination: usize,
}

/// JS와 주고받는 행동 (`kind`: "move", "capture", "chainCapture")
///
/// 엔진은 잡기를 항상 `chainCapture`로 내준다. 한 번짜리 `capture`는
/// 같은 한 단계 연속 잡기가 합법일 때만 받는다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum JsAction {
    Move { origin: usize, destination: usize },
    Capture { origin: usize, captured_position: usize, destination: usize },
    ChainCapture { captures: Vec<JsCapture> },
}

/// 하이라이트용 정보를 붙인 합법 행동
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsLegalAction {
    pub action: JsAction,
    pub destinations: Vec<usize>,
    pub captured_positions: Vec<usize>,
}

/// JS로 전달할 보드 상태
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsBoardState {
    pub pieces: Vec<JsPiece>,
    pub red_count: usize,
    pub black_count: usize,
}

impl From<Capture> for JsCapture {
    fn from(capture: Capture) -> Self {
        JsCapture {
            origin: capture.origin,
            captured_position: capture.captured_position,
            destination: capture.destination,
        }
    }
}

impl From<JsCapture> for Capture {
    fn from(capture: JsCapture) -> Self {
        Capture {
            origin: capture.origin,
            captured_position: capture.captured_position,
            destination: capture.destination,
        }
    }
}

impl From<&Action> for JsAction {
    fn from(action: &Action) -> Self {
        match action {
            Action::Move(mv) => JsAction::Move {
                origin: mv.origin,
                destination: mv.destination,
            },
            Action::Capture(capture) => JsAction::Capture {
                origin: capture.origin,
                captured_position: capture.captured_position,
                destination: capture.destination,
            },
            Action::ChainCapture(chain) => JsAction::ChainCapture {
                captures: chain.captures().iter().map(|&c| c.into()).collect(),
            },
        }
    }
}

impl JsAction {
    /// 엔진 행동으로 변환 (빈 연속 잡기는 `None`)
    pub fn into_action(self) -> Option<Action> {
        match self {
            JsAction::Move { origin, destination } => Some(Action::Move(Move { origin, destination })),
            JsAction::Capture { origin, captured_position, destination } => Some(Action::Capture(Capture {
                origin,
                captured_position,
                destination,
            })),
            JsAction::ChainCapture { captures } => {
                ChainCapture::new(captures.into_iter().map(Capture::from).collect()).map(Action::ChainCapture)
            }
        }
    }
}

#[wasm_bindgen]
impl Game {
    /// 새 게임 생성 (시작 배치)
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game {
            board: Board::initial(),
        }
    }

    /// 시작 배치로 되돌리기 (디버그 설정은 유지)
    #[wasm_bindgen]
    pub fn reset(&mut self) {
        let debug = self.board.debug_mode();
        self.board = Board::initial().with_debug(debug);
    }

    /// 디버그 모드 설정 (연속 잡기 탐색, 행동 적용 추적)
    #[wasm_bindgen]
    pub fn set_debug(&mut self, enabled: bool) {
        self.board = self.board.clone().with_debug(enabled);
    }

    /// 현재 보드 상태
    #[wasm_bindgen]
    pub fn get_state(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.build_js_state()).unwrap_or(JsValue::NULL)
    }

    /// 특정 칸 기물의 합법 행동 목록
    #[wasm_bindgen]
    pub fn get_legal_actions(&self, position: usize) -> JsValue {
        serde_wasm_bindgen::to_value(&self.legal_actions(position)).unwrap_or(JsValue::NULL)
    }

    /// 8×8 좌표로 합법 행동 조회 (흰 칸이면 빈 목록)
    #[wasm_bindgen]
    pub fn get_legal_actions_at(&self, x: usize, y: usize) -> JsValue {
        serde_wasm_bindgen::to_value(&self.legal_actions_at_coords(x, y)).unwrap_or(JsValue::NULL)
    }

    /// 행동 실행 (현재 보드에서 생성된 행동만 받는다)
    #[wasm_bindgen]
    pub fn apply_action(&mut self, action: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<JsAction>(action) {
            Ok(js_action) => self.apply(js_action),
            Err(err) => {
                warn(&format!("malformed action: {}", err));
                false
            }
        }
    }

    /// 텍스트 도식
    #[wasm_bindgen]
    pub fn render(&self) -> String {
        self.board.to_string()
    }

    // === Private helpers ===

    fn apply(&mut self, js_action: JsAction) -> bool {
        let action = match js_action.into_action() {
            Some(action) => action,
            None => {
                warn("chain capture without captures");
                return false;
            }
        };

        if !self.is_offered(&action) {
            warn(&format!("not a legal action on the current board: {:?}", action));
            return false;
        }

        match self.board.apply_action(&action) {
            Ok(next) => {
                self.board = next;
                true
            }
            Err(err) => {
                warn(&format!("action rejected: {}", err));
                false
            }
        }
    }

    /// 현재 보드가 내주는 행동인지 (단일 잡기는 한 단계 연속 잡기와 같게 본다)
    fn is_offered(&self, action: &Action) -> bool {
        let origin = match action.origin() {
            Some(origin) => origin,
            None => return false,
        };
        let offered = self.board.legal_actions_at(origin);
        match action {
            Action::Capture(capture) => offered.iter().any(|legal| match legal {
                Action::ChainCapture(chain) => chain.captures() == std::slice::from_ref(capture),
                _ => false,
            }),
            _ => offered.contains(action),
        }
    }

    fn legal_actions_at_coords(&self, x: usize, y: usize) -> Vec<JsLegalAction> {
        match geometry::from_coords(x, y) {
            Some(position) => self.legal_actions(position),
            None => Vec::new(),
        }
    }

    fn legal_actions(&self, position: Position) -> Vec<JsLegalAction> {
        self.board
            .legal_actions_at(position)
            .iter()
            .map(|action| JsLegalAction {
                action: action.into(),
                destinations: action.destinations(),
                captured_positions: action.captured_positions(),
            })
            .collect()
    }

    fn build_js_state(&self) -> JsBoardState {
        let pieces: Vec<JsPiece> = self.board.pieces().iter().map(|p| {
            let (x, y) = geometry::coords(p.position);
            JsPiece {
                position: p.position,
                x,
                y,
                team: team_to_string(p.team).to_string(),
                is_king: p.is_king,
            }
        }).collect();

        JsBoardState {
            pieces,
            red_count: self.board.team_pieces(Team::Red).count(),
            black_count: self.board.team_pieces(Team::Black).count(),
        }
    }
}

fn team_to_string(team: Team) -> &'static str {
    match team {
        Team::Red => "red",
        Team::Black => "black",
    }
}

#[cfg(target_arch = "wasm32")]
fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
fn warn(msg: &str) {
    eprintln!("WARN: {}", msg);
}

/// 콘솔 로그 (디버깅용)
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

#[wasm_bindgen(start)]
pub fn main() {
    log("Checkers WASM initialized!");
}
