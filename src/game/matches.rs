use itertools::Itertools;
use log::trace;

use super::board::TileBoard;
use crate::model::{KindId, MatchReport, TileId};

/// Scans rows and columns for runs of identical, non-air kind of at least
/// `min_run_length`. Air always breaks a run; it never chains with anything,
/// other air included.
pub struct MatchDetector {
    min_run_length: usize,
    air: KindId,
}

impl MatchDetector {
    pub fn new(min_run_length: usize, air: KindId) -> Self {
        Self {
            min_run_length,
            air,
        }
    }

    pub fn find_matches(&self, board: &TileBoard) -> MatchReport {
        let mut report = MatchReport::default();
        for line in board.row_views().iter().chain(board.column_views().iter()) {
            self.scan_line(board, line, &mut report);
        }
        trace!(target: "matches", "Detection pass found {} matched tiles", report.match_count());
        report
    }

    /// Groups one line into maximal same-kind runs. Grouping flushes the
    /// final run of the line and keeps back-to-back qualifying runs apart.
    fn scan_line(&self, board: &TileBoard, line: &[TileId], report: &mut MatchReport) {
        for (kind, run) in &line.iter().chunk_by(|&&id| board.tile(id).kind) {
            if kind == self.air {
                continue;
            }
            let run: Vec<TileId> = run.copied().collect();
            if run.len() >= self.min_run_length {
                trace!(target: "matches", "Run of {} x {:?} matched", run.len(), kind);
                report.extend(run);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoardPos;

    const AIR: KindId = KindId(9);

    /// Builds a board from rows listed bottom to top, `rows[y][x]`.
    fn board_from_rows(rows: &[&[usize]]) -> TileBoard {
        let row_count = rows.len();
        let column_count = rows[0].len();
        let mut kinds = Vec::new();
        for x in 0..column_count {
            for row in rows {
                kinds.push(KindId(row[x]));
            }
        }
        TileBoard::from_kinds(column_count, row_count, 0, kinds)
    }

    fn detector(min_run_length: usize) -> MatchDetector {
        MatchDetector::new(min_run_length, AIR)
    }

    fn matched_positions(board: &TileBoard, report: &MatchReport) -> Vec<BoardPos> {
        report.iter().map(|id| board.tile(id).pos).collect()
    }

    #[test]
    fn test_three_in_a_row_matches_and_rest_do_not() {
        // Row [A, A, A, B, B]: cells 0..3 match, cells 3 and 4 do not.
        let board = board_from_rows(&[&[0, 0, 0, 1, 1]]);
        let report = detector(3).find_matches(&board);
        assert_eq!(
            matched_positions(&board, &report),
            vec![
                BoardPos::new(0, 0),
                BoardPos::new(1, 0),
                BoardPos::new(2, 0)
            ]
        );
    }

    #[test]
    fn test_below_threshold_is_no_match() {
        let board = board_from_rows(&[&[0, 0, 1, 1, 2]]);
        let report = detector(3).find_matches(&board);
        assert!(report.is_empty());
    }

    #[test]
    fn test_exact_threshold_matches_whole_run() {
        let board = board_from_rows(&[&[2, 0, 0, 0, 2]]);
        let report = detector(3).find_matches(&board);
        assert_eq!(report.match_count(), 3);
    }

    #[test]
    fn test_final_run_of_line_is_flushed() {
        // The qualifying run ends exactly at the end of the line.
        let board = board_from_rows(&[&[1, 2, 0, 0, 0]]);
        let report = detector(3).find_matches(&board);
        assert_eq!(
            matched_positions(&board, &report),
            vec![
                BoardPos::new(2, 0),
                BoardPos::new(3, 0),
                BoardPos::new(4, 0)
            ]
        );
    }

    #[test]
    fn test_back_to_back_runs_both_match_without_double_count() {
        let board = board_from_rows(&[&[0, 0, 0, 1, 1, 1]]);
        let report = detector(3).find_matches(&board);
        assert_eq!(report.match_count(), 6);
    }

    #[test]
    fn test_air_never_matches_regardless_of_length() {
        let board = board_from_rows(&[&[9, 9, 9, 9, 9]]);
        let report = detector(3).find_matches(&board);
        assert!(report.is_empty());
    }

    #[test]
    fn test_air_breaks_a_run() {
        let board = board_from_rows(&[&[0, 0, 9, 0, 0]]);
        let report = detector(3).find_matches(&board);
        assert!(report.is_empty());
    }

    #[test]
    fn test_intersection_tile_reported_once() {
        // Column 0 and row 0 both match in kind 0; the corner appears once.
        let board = board_from_rows(&[
            &[0, 0, 0], // y = 0
            &[0, 1, 2], // y = 1
            &[0, 2, 1], // y = 2
        ]);
        let report = detector(3).find_matches(&board);
        assert_eq!(report.match_count(), 5);
    }

    #[test]
    fn test_column_runs_are_detected() {
        let board = board_from_rows(&[
            &[0, 1, 2], // y = 0
            &[0, 2, 1], // y = 1
            &[0, 1, 2], // y = 2
        ]);
        let report = detector(3).find_matches(&board);
        assert_eq!(
            matched_positions(&board, &report),
            vec![
                BoardPos::new(0, 0),
                BoardPos::new(0, 1),
                BoardPos::new(0, 2)
            ]
        );
    }
}
