//! 32칸 인덱스 좌표계
//!
//! 검은 칸만 위에서부터 행 우선으로 번호를 매긴다. 짝수 행은 홀수 x에,
//! 홀수 행은 짝수 x에 검은 칸이 있어서 행마다 반 칸씩 어긋난다.
//!
//! ```text
//!   x: 0  1  2  3  4  5  6  7
//! y=0  -  0  -  1  -  2  -  3
//! y=1  4  -  5  -  6  -  7  -
//! y=2  -  8  -  9  - 10  - 11
//! y=3 12  - 13  - 14  - 15  -
//! y=4  - 16  - 17  - 18  - 19
//! y=5 20  - 21  - 22  - 23  -
//! y=6  - 24  - 25  - 26  - 27
//! y=7 28  - 29  - 30  - 31  -
//! ```
//!
//! 모든 함수는 칸 번호만 보고 계산하며 기물 배치는 보지 않는다.

/// 검은 칸 인덱스 (0..32)
pub type Position = usize;

/// 보드 한 변의 칸 수
pub const BOARD_SIZE: usize = 8;

/// 행당 검은 칸 수
pub const SQUARES_PER_ROW: usize = BOARD_SIZE / 2;

/// 검은 칸 총 수
pub const SQUARE_COUNT: usize = SQUARES_PER_ROW * BOARD_SIZE;

/// 대각선 방향 (y는 아래로 증가)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    UpRight,
    UpLeft,
    DownRight,
    DownLeft,
}

impl Direction {
    /// 생성기가 방향을 순회하는 순서
    pub const ALL: [Direction; 4] = [
        Direction::UpRight,
        Direction::UpLeft,
        Direction::DownRight,
        Direction::DownLeft,
    ];

    pub fn is_up(self) -> bool {
        matches!(self, Direction::UpRight | Direction::UpLeft)
    }

    pub fn is_left(self) -> bool {
        matches!(self, Direction::UpLeft | Direction::DownLeft)
    }
}

pub fn is_valid(position: Position) -> bool {
    position < SQUARE_COUNT
}

pub fn row(position: Position) -> usize {
    position / SQUARES_PER_ROW
}

/// 행 안에서 몇 번째 검은 칸인지 (0..4)
pub fn column(position: Position) -> usize {
    position % SQUARES_PER_ROW
}

fn is_even_row(position: Position) -> bool {
    row(position) % 2 == 0
}

/// 8×8 보드 좌표 (x, y), y = 0이 맨 윗줄
pub fn coords(position: Position) -> (usize, usize) {
    let offset = if is_even_row(position) { 1 } else { 0 };
    (column(position) * 2 + offset, row(position))
}

/// 8×8 좌표를 칸 번호로 변환 (흰 칸이나 보드 밖이면 `None`)
pub fn from_coords(x: usize, y: usize) -> Option<Position> {
    if x >= BOARD_SIZE || y >= BOARD_SIZE {
        return None;
    }
    // 검은 칸은 x + y가 홀수
    if (x + y) % 2 == 0 {
        return None;
    }
    Some(y * SQUARES_PER_ROW + x / 2)
}

pub fn exists_up_one(position: Position) -> bool {
    row(position) > 0
}

pub fn exists_down_one(position: Position) -> bool {
    row(position) < BOARD_SIZE - 1
}

/// 짝수 행은 x가 홀수라 왼쪽 칸이 항상 있다
pub fn exists_left_one(position: Position) -> bool {
    is_even_row(position) || column(position) > 0
}

/// 홀수 행은 x가 짝수라 오른쪽 칸이 항상 있다
pub fn exists_right_one(position: Position) -> bool {
    !is_even_row(position) || column(position) < SQUARES_PER_ROW - 1
}

pub fn exists_up_two(position: Position) -> bool {
    row(position) > 1
}

pub fn exists_down_two(position: Position) -> bool {
    row(position) < BOARD_SIZE - 2
}

pub fn exists_left_two(position: Position) -> bool {
    column(position) > 0
}

pub fn exists_right_two(position: Position) -> bool {
    column(position) < SQUARES_PER_ROW - 1
}

/// 해당 방향으로 한 칸 떨어진 칸이 보드 위에 있는지
pub fn exists_one_diagonal(position: Position, direction: Direction) -> bool {
    let vertical = if direction.is_up() {
        exists_up_one(position)
    } else {
        exists_down_one(position)
    };
    let horizontal = if direction.is_left() {
        exists_left_one(position)
    } else {
        exists_right_one(position)
    };
    vertical && horizontal
}

/// 해당 방향으로 두 칸 떨어진 칸이 보드 위에 있는지
pub fn exists_two_diagonal(position: Position, direction: Direction) -> bool {
    let vertical = if direction.is_up() {
        exists_up_two(position)
    } else {
        exists_down_two(position)
    };
    let horizontal = if direction.is_left() {
        exists_left_two(position)
    } else {
        exists_right_two(position)
    };
    vertical && horizontal
}

/// 한 칸 대각선 이웃의 번호. 먼저 [`exists_one_diagonal`]로 확인해야 한다.
pub fn position_one_diagonal(position: Position, direction: Direction) -> Position {
    debug_assert!(exists_one_diagonal(position, direction));
    let even = is_even_row(position);
    match direction {
        Direction::UpLeft if even => position - SQUARES_PER_ROW,
        Direction::UpLeft => position - SQUARES_PER_ROW - 1,
        Direction::UpRight if even => position - SQUARES_PER_ROW + 1,
        Direction::UpRight => position - SQUARES_PER_ROW,
        Direction::DownLeft if even => position + SQUARES_PER_ROW,
        Direction::DownLeft => position + SQUARES_PER_ROW - 1,
        Direction::DownRight if even => position + SQUARES_PER_ROW + 1,
        Direction::DownRight => position + SQUARES_PER_ROW,
    }
}

/// 두 칸 대각선 칸의 번호. 먼저 [`exists_two_diagonal`]로 확인해야 한다.
pub fn position_two_diagonal(position: Position, direction: Direction) -> Position {
    position_one_diagonal(position_one_diagonal(position, direction), direction)
}

pub fn neighbor(position: Position, direction: Direction) -> Option<Position> {
    if exists_one_diagonal(position, direction) {
        Some(position_one_diagonal(position, direction))
    } else {
        None
    }
}

pub fn jump(position: Position, direction: Direction) -> Option<Position> {
    if exists_two_diagonal(position, direction) {
        Some(position_two_diagonal(position, direction))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 8×8 좌표로 직접 한 칸 이동해 본 결과
    fn diagram_step(position: Position, direction: Direction, distance: i32) -> Option<Position> {
        let (x, y) = coords(position);
        let dx = if direction.is_left() { -distance } else { distance };
        let dy = if direction.is_up() { -distance } else { distance };
        let (nx, ny) = (x as i32 + dx, y as i32 + dy);
        if nx < 0 || ny < 0 {
            return None;
        }
        from_coords(nx as usize, ny as usize)
    }

    #[test]
    fn test_row_and_column() {
        assert_eq!(row(0), 0);
        assert_eq!(row(9), 2);
        assert_eq!(row(31), 7);
        assert_eq!(column(9), 1);
        assert_eq!(column(12), 0);
        assert_eq!(column(31), 3);
    }

    #[test]
    fn test_coords_match_diagram() {
        assert_eq!(coords(0), (1, 0));
        assert_eq!(coords(3), (7, 0));
        assert_eq!(coords(4), (0, 1));
        assert_eq!(coords(7), (6, 1));
        assert_eq!(coords(9), (3, 2));
        assert_eq!(coords(14), (4, 3));
        assert_eq!(coords(28), (0, 7));
        assert_eq!(coords(31), (6, 7));

        for position in 0..SQUARE_COUNT {
            let (x, y) = coords(position);
            assert_eq!(from_coords(x, y), Some(position));
        }
        assert_eq!(from_coords(0, 0), None);
        assert_eq!(from_coords(1, 1), None);
        assert_eq!(from_coords(8, 1), None);
    }

    #[test]
    fn test_edges() {
        // 짝수 행 왼쪽 끝(x=1)에도 왼쪽 칸이 있다
        assert!(exists_left_one(8));
        assert!(!exists_left_one(12));
        assert!(exists_right_one(15));
        assert!(!exists_right_one(11));
        assert!(!exists_up_one(3));
        assert!(!exists_down_one(28));
        assert!(!exists_left_two(8));
        assert!(!exists_right_two(15));
        assert!(!exists_up_two(7));
        assert!(!exists_down_two(24));
    }

    #[test]
    fn test_one_step_neighbors() {
        use Direction::*;

        assert_eq!(neighbor(0, UpLeft), None);
        assert_eq!(neighbor(0, DownLeft), Some(4));
        assert_eq!(neighbor(0, DownRight), Some(5));
        assert_eq!(neighbor(3, DownRight), None);
        assert_eq!(neighbor(4, UpRight), Some(0));
        assert_eq!(neighbor(4, DownLeft), None);
        assert_eq!(neighbor(4, DownRight), Some(8));
        assert_eq!(neighbor(7, UpLeft), Some(2));
        assert_eq!(neighbor(7, UpRight), Some(3));
        assert_eq!(neighbor(7, DownLeft), Some(10));
        assert_eq!(neighbor(7, DownRight), Some(11));
        assert_eq!(neighbor(14, UpLeft), Some(9));
        assert_eq!(neighbor(14, UpRight), Some(10));
        assert_eq!(neighbor(14, DownLeft), Some(17));
        assert_eq!(neighbor(14, DownRight), Some(18));
        assert_eq!(neighbor(11, UpRight), None);
        assert_eq!(neighbor(11, UpLeft), Some(7));
        assert_eq!(neighbor(11, DownLeft), Some(15));
    }

    #[test]
    fn test_two_step_jumps() {
        use Direction::*;

        assert_eq!(jump(9, UpLeft), Some(0));
        assert_eq!(jump(9, UpRight), Some(2));
        assert_eq!(jump(9, DownLeft), Some(16));
        assert_eq!(jump(9, DownRight), Some(18));
        assert_eq!(jump(12, UpLeft), None);
        assert_eq!(jump(12, UpRight), Some(5));
        assert_eq!(jump(12, DownRight), Some(21));
        assert_eq!(jump(15, UpRight), None);
        assert_eq!(jump(15, UpLeft), Some(6));
        assert_eq!(jump(8, UpLeft), None);
        assert_eq!(jump(4, UpRight), None);
        assert_eq!(jump(27, DownLeft), None);
    }

    #[test]
    fn test_every_square_agrees_with_diagram() {
        for position in 0..SQUARE_COUNT {
            for direction in Direction::ALL {
                assert_eq!(
                    neighbor(position, direction),
                    diagram_step(position, direction, 1),
                    "one step {:?} from {}",
                    direction,
                    position
                );
                assert_eq!(
                    jump(position, direction),
                    diagram_step(position, direction, 2),
                    "two steps {:?} from {}",
                    direction,
                    position
                );
            }
        }
    }
}
