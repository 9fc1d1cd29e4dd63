//! Reading-order solver (§4.6): topological sort over spatial "must-precede"
//! constraints, adapted from the teacher's `graph`-module adjacency queries
//! into a repair-loop topological sort.

use crate::geom::{left_row_neighbors, right_row_neighbors, top_neighbor, Panel};

/// Page reading direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

fn must_precede(panels: &[Panel], i: usize, direction: Direction) -> Vec<usize> {
    let mut preds = Vec::new();
    if let Some(t) = top_neighbor(panels, i) {
        preds.push(t);
    }
    preds.extend(match direction {
        Direction::Ltr => left_row_neighbors(panels, i),
        Direction::Rtl => right_row_neighbors(panels, i),
    });
    preds
}

/// Produces a reading-order permutation of panel indices `0..panels.len()`.
///
/// Starts from a stable sort by `(y, x)` (LTR) or `(y, -x)` (RTL), then
/// repeatedly moves any index that appears before one of its must-precede
/// predecessors to just after that predecessor, until a fixed point or the
/// `n²` iteration bound is reached.
pub fn solve(panels: &[Panel], direction: Direction) -> Vec<usize> {
    let n = panels.len();
    if n == 0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![0];
    }

    let predecessors: Vec<Vec<usize>> = (0..n).map(|i| must_precede(panels, i, direction)).collect();

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| {
        let p = &panels[i];
        let x_key = match direction {
            Direction::Ltr => p.x,
            Direction::Rtl => -p.x,
        };
        (p.y, x_key)
    });

    let max_iterations = n * n;
    for _ in 0..max_iterations {
        let mut moved = false;

        'scan: for pos in 0..order.len() {
            let idx = order[pos];
            for &pred in &predecessors[idx] {
                let pred_pos = order.iter().position(|&v| v == pred).unwrap();
                if pred_pos > pos {
                    order.remove(pos);
                    let insert_at = order.iter().position(|&v| v == pred).unwrap() + 1;
                    order.insert(insert_at, idx);
                    moved = true;
                    break 'scan;
                }
            }
        }

        if !moved {
            break;
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Panel;

    fn panel(x: i64, y: i64, w: i64, h: i64) -> Panel {
        Panel::from_rect(x, y, x + w, y + h, 800, 600, 0.02)
    }

    #[test]
    fn empty_input_returns_empty() {
        assert_eq!(solve(&[], Direction::Ltr), Vec::<usize>::new());
    }

    #[test]
    fn single_panel_returns_zero() {
        let panels = vec![panel(0, 0, 100, 100)];
        assert_eq!(solve(&panels, Direction::Ltr), vec![0]);
    }

    #[test]
    fn ltr_prefers_left_panel_in_same_row() {
        let panels = vec![panel(300, 100, 200, 200), panel(50, 100, 200, 200)];
        assert_eq!(solve(&panels, Direction::Ltr), vec![1, 0]);
    }

    #[test]
    fn rtl_prefers_right_panel_in_same_row() {
        let panels = vec![panel(300, 100, 200, 200), panel(50, 100, 200, 200)];
        assert_eq!(solve(&panels, Direction::Rtl), vec![0, 1]);
    }

    #[test]
    fn row_major_order_across_two_rows() {
        let panels = vec![panel(50, 10, 100, 100), panel(200, 10, 100, 100), panel(100, 200, 100, 100)];
        assert_eq!(solve(&panels, Direction::Ltr), vec![0, 1, 2]);
    }

    #[test]
    fn every_predecessor_comes_before_its_successor() {
        let panels = vec![
            panel(0, 0, 100, 100),
            panel(100, 0, 100, 100),
            panel(0, 100, 100, 100),
            panel(100, 100, 100, 100),
        ];
        let order = solve(&panels, Direction::Ltr);
        let position_of = |idx: usize| order.iter().position(|&v| v == idx).unwrap();
        for i in 0..panels.len() {
            for &pred in &must_precede(&panels, i, Direction::Ltr) {
                assert!(position_of(pred) < position_of(i));
            }
        }
    }
}
