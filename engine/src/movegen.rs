//! 기물별 이동/잡기 생성과 연속 잡기 탐색
//!
//! 모든 함수는 기물 목록만 읽는다. 연속 잡기 탐색도 단계마다 새 기물 목록을
//! 만들 뿐 인자를 바꾸지 않는다.

use crate::geometry::{self, Direction, Position};
use crate::{log_debug, Capture, ChainCapture, Move, Piece};

pub fn piece_at(position: Position, pieces: &[Piece]) -> Option<&Piece> {
    pieces.iter().find(|p| p.position == position)
}

pub fn is_occupied(position: Position, pieces: &[Piece]) -> bool {
    piece_at(position, pieces).is_some()
}

/// 잡기를 고려하지 않은 한 칸 이동 목록
pub fn moves_for(piece: &Piece, pieces: &[Piece]) -> Vec<Move> {
    piece
        .directions()
        .iter()
        .filter_map(|&direction| move_in_direction(piece, pieces, direction))
        .collect()
}

fn move_in_direction(piece: &Piece, pieces: &[Piece], direction: Direction) -> Option<Move> {
    let destination = geometry::neighbor(piece.position, direction)?;
    if is_occupied(destination, pieces) {
        return None;
    }
    Some(Move {
        origin: piece.position,
        destination,
    })
}

/// 한 번의 잡기 목록 (방향당 최대 하나)
pub fn captures_for(piece: &Piece, pieces: &[Piece]) -> Vec<Capture> {
    piece
        .directions()
        .iter()
        .filter_map(|&direction| capture_in_direction(piece, pieces, direction))
        .collect()
}

fn capture_in_direction(piece: &Piece, pieces: &[Piece], direction: Direction) -> Option<Capture> {
    let destination = geometry::jump(piece.position, direction)?;
    let over = geometry::position_one_diagonal(piece.position, direction);

    let captured = piece_at(over, pieces).filter(|p| p.team != piece.team)?;
    if is_occupied(destination, pieces) {
        return None;
    }

    Some(Capture {
        origin: piece.position,
        captured_position: captured.position,
        destination,
    })
}

/// 끝까지 이어지는 모든 연속 잡기 경로
///
/// 가장 긴 경로만 고르지 않는다. 더 이어질 수 있는 경로의 앞부분은 결과에 넣지 않는다.
pub fn chain_captures_for(piece: &Piece, pieces: &[Piece]) -> Vec<ChainCapture> {
    collect_chain_captures(piece, pieces, false)
}

pub(crate) fn collect_chain_captures(piece: &Piece, pieces: &[Piece], debug: bool) -> Vec<ChainCapture> {
    let mut found = Vec::new();
    let mut branch = Vec::new();
    search_chains(*piece, pieces, &mut branch, &mut found, debug);
    found
}

fn search_chains(
    piece: Piece,
    pieces: &[Piece],
    branch: &mut Vec<Capture>,
    found: &mut Vec<ChainCapture>,
    debug: bool,
) {
    let captures = captures_for(&piece, pieces);

    if captures.is_empty() {
        if !branch.is_empty() {
            if debug {
                log_debug(&format!(
                    "chain capture from {} ends at {} after {} captures",
                    branch[0].origin,
                    piece.position,
                    branch.len()
                ));
            }
            found.push(ChainCapture::from_unchecked(branch.clone()));
        }
        return;
    }

    for capture in captures {
        // 승격은 경로 전체를 적용할 때만 판정한다
        let moved = piece.relocated(capture.destination);
        let scratch = intermediate_capture(&capture, moved, pieces);

        branch.push(capture);
        search_chains(moved, &scratch, branch, found, debug);
        branch.pop();
    }
}

/// 잡기 한 번을 적용한 임시 기물 목록 (킹 여부 유지)
fn intermediate_capture(capture: &Capture, moved: Piece, pieces: &[Piece]) -> Vec<Piece> {
    pieces
        .iter()
        .filter(|p| p.position != capture.origin && p.position != capture.captured_position)
        .copied()
        .chain(std::iter::once(moved))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;
    use std::collections::HashSet;

    fn chain_paths(chains: &[ChainCapture]) -> HashSet<Vec<(Position, Position, Position)>> {
        chains
            .iter()
            .map(|chain| {
                chain
                    .captures()
                    .iter()
                    .map(|c| (c.origin, c.captured_position, c.destination))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_men_move_forward_only() {
        let black = Piece::man(21, Team::Black);
        let red = Piece::man(9, Team::Red);
        let pieces = vec![black, red];

        assert_eq!(
            moves_for(&black, &pieces),
            vec![
                Move { origin: 21, destination: 17 },
                Move { origin: 21, destination: 16 },
            ]
        );
        assert_eq!(
            moves_for(&red, &pieces),
            vec![
                Move { origin: 9, destination: 14 },
                Move { origin: 9, destination: 13 },
            ]
        );
    }

    #[test]
    fn test_king_moves_all_directions() {
        let king = Piece::king(14, Team::Red);
        let destinations: Vec<Position> = moves_for(&king, &[king]).iter().map(|m| m.destination).collect();
        assert_eq!(destinations, vec![10, 9, 18, 17]);
    }

    #[test]
    fn test_moves_blocked_by_any_piece_and_edge() {
        // 20번(x=0)은 왼쪽 위 칸이 없다
        let black = Piece::man(20, Team::Black);
        assert_eq!(moves_for(&black, &[black]), vec![Move { origin: 20, destination: 16 }]);

        let blocked = vec![black, Piece::man(16, Team::Red)];
        assert!(moves_for(&black, &blocked).is_empty());

        let friendly = vec![black, Piece::man(16, Team::Black)];
        assert!(moves_for(&black, &friendly).is_empty());
    }

    #[test]
    fn test_single_capture() {
        let red = Piece::man(9, Team::Red);
        let pieces = vec![red, Piece::man(13, Team::Black)];
        assert_eq!(
            captures_for(&red, &pieces),
            vec![Capture { origin: 9, captured_position: 13, destination: 16 }]
        );

        let black = Piece::man(17, Team::Black);
        let pieces = vec![black, Piece::man(13, Team::Red)];
        assert_eq!(
            captures_for(&black, &pieces),
            vec![Capture { origin: 17, captured_position: 13, destination: 8 }]
        );
    }

    #[test]
    fn test_capture_requirements() {
        let red = Piece::man(9, Team::Red);

        // 착지 칸이 막힘
        let landing_blocked = vec![red, Piece::man(13, Team::Black), Piece::man(16, Team::Black)];
        assert!(captures_for(&red, &landing_blocked).is_empty());

        // 같은 편은 잡을 수 없다
        let friendly = vec![red, Piece::man(13, Team::Red)];
        assert!(captures_for(&red, &friendly).is_empty());

        // 맨은 뒤로 잡을 수 없다
        let behind = vec![red, Piece::man(5, Team::Black)];
        assert!(captures_for(&red, &behind).is_empty());

        // 보드 끝: 8번에서 왼쪽 아래로 두 칸은 보드 밖
        let edge = Piece::man(8, Team::Red);
        assert!(captures_for(&edge, &[edge, Piece::man(12, Team::Black)]).is_empty());
    }

    #[test]
    fn test_king_captures_every_direction() {
        let king = Piece::king(14, Team::Black);
        let pieces = vec![
            king,
            Piece::man(9, Team::Red),
            Piece::man(10, Team::Red),
            Piece::man(17, Team::Red),
            Piece::man(18, Team::Red),
        ];
        assert_eq!(
            captures_for(&king, &pieces),
            vec![
                Capture { origin: 14, captured_position: 10, destination: 7 },
                Capture { origin: 14, captured_position: 9, destination: 5 },
                Capture { origin: 14, captured_position: 18, destination: 23 },
                Capture { origin: 14, captured_position: 17, destination: 21 },
            ]
        );
    }

    #[test]
    fn test_chain_returns_every_maximal_branch() {
        let black = Piece::man(29, Team::Black);
        let pieces = vec![
            black,
            Piece::man(25, Team::Red),
            Piece::man(18, Team::Red),
            Piece::man(17, Team::Red),
        ];

        let chains = chain_captures_for(&black, &pieces);
        assert_eq!(chains.len(), 2);

        let expected: HashSet<_> = [
            vec![(29, 25, 22), (22, 18, 15)],
            vec![(29, 25, 22), (22, 17, 13)],
        ]
        .into_iter()
        .collect();
        assert_eq!(chain_paths(&chains), expected);
    }

    #[test]
    fn test_chain_of_different_lengths() {
        let black = Piece::man(29, Team::Black);
        let pieces = vec![
            black,
            Piece::man(25, Team::Red),
            Piece::man(18, Team::Red),
            Piece::man(24, Team::Red),
        ];

        // 24를 넘는 한 번짜리와 25, 18을 넘는 두 번짜리 모두 반환
        let expected: HashSet<_> = [
            vec![(29, 24, 20)],
            vec![(29, 25, 22), (22, 18, 15)],
        ]
        .into_iter()
        .collect();
        assert_eq!(chain_paths(&chain_captures_for(&black, &pieces)), expected);
    }

    #[test]
    fn test_chain_stops_when_man_reaches_kingmaker_row() {
        // 1번에 도착해도 탐색 중에는 맨이므로 아래로 잡을 수 없다
        let black = Piece::man(10, Team::Black);
        let pieces = vec![black, Piece::man(6, Team::Red), Piece::man(5, Team::Red)];

        let chains = chain_captures_for(&black, &pieces);
        assert_eq!(chains.len(), 1);
        assert_eq!(
            chains[0].captures(),
            &[Capture { origin: 10, captured_position: 6, destination: 1 }]
        );

        let king = Piece::king(10, Team::Black);
        let pieces = vec![king, Piece::man(6, Team::Red), Piece::man(5, Team::Red)];
        let chains = chain_captures_for(&king, &pieces);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 2);
        assert_eq!(chains[0].last().map(|c| c.destination), Some(8));
    }

    #[test]
    fn test_king_chain_can_return_to_origin() {
        let king = Piece::king(25, Team::Black);
        let pieces = vec![
            king,
            Piece::man(22, Team::Red),
            Piece::man(14, Team::Red),
            Piece::man(13, Team::Red),
            Piece::man(21, Team::Red),
        ];

        let expected: HashSet<_> = [
            vec![(25, 22, 18), (18, 14, 9), (9, 13, 16), (16, 21, 25)],
            vec![(25, 21, 16), (16, 13, 9), (9, 14, 18), (18, 22, 25)],
        ]
        .into_iter()
        .collect();
        assert_eq!(chain_paths(&chain_captures_for(&king, &pieces)), expected);
    }

    #[test]
    fn test_no_capture_means_no_chain() {
        let black = Piece::man(21, Team::Black);
        assert!(chain_captures_for(&black, &[black]).is_empty());
    }

    #[test]
    fn test_search_leaves_input_untouched() {
        let black = Piece::man(29, Team::Black);
        let pieces = vec![black, Piece::man(25, Team::Red), Piece::man(18, Team::Red)];
        let before = pieces.clone();
        let _ = chain_captures_for(&black, &pieces);
        assert_eq!(pieces, before);
    }
}
