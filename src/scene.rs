use crate::math::Color;

/// One map tile: traversable, or a solid wall with a base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell {
    Empty,
    Wall(Color),
}

/// Rectangular grid of cells, fixed for its lifetime. Rows may be ragged
/// in storage; the logical width is the longest row and short rows read
/// as `Empty` inside that width.
///
/// A world point `(x, y)` lies in cell `(row, col) = (floor(x), floor(y))`.
pub struct Scene {
    rows: Vec<Vec<Cell>>,
    width: usize,
}

impl Scene {
    pub fn new(rows: Vec<Vec<Cell>>) -> Scene {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        Scene { rows, width }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// `None` outside the grid; inside it, a read past a short row is
    /// `Empty` rather than an out-of-bounds access.
    pub fn cell(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= self.height() as isize || col >= self.width as isize {
            return None;
        }
        Some(
            self.rows[row as usize]
                .get(col as usize)
                .copied()
                .unwrap_or(Cell::Empty),
        )
    }
}

/// The walled layout the binary starts in; also exercised by tests.
pub fn starter_scene() -> Scene {
    let mut rows = vec![vec![Cell::Empty; 8]; 7];
    rows[0][2] = Cell::Wall(Color::CYAN);
    rows[0][3] = Cell::Wall(Color::MAGENTA);
    rows[1][3] = Cell::Wall(Color::YELLOW);
    rows[2][1] = Cell::Wall(Color::RED);
    rows[2][2] = Cell::Wall(Color::GREEN);
    rows[2][3] = Cell::Wall(Color::BLUE);
    Scene::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn width_is_longest_row() {
        let scene = Scene::new(vec![
            vec![Cell::Empty; 3],
            vec![Cell::Wall(Color::RED)],
            vec![Cell::Empty; 2],
        ]);
        assert_eq!(scene.width(), 3);
        assert_eq!(scene.height(), 3);
    }

    #[test]
    fn short_rows_read_empty_inside_logical_width() {
        let scene = Scene::new(vec![vec![Cell::Empty; 3], vec![Cell::Wall(Color::RED)]]);
        assert_eq!(scene.cell(1, 0), Some(Cell::Wall(Color::RED)));
        assert_eq!(scene.cell(1, 2), Some(Cell::Empty));
    }

    #[test]
    fn out_of_bounds_reads_are_none() {
        let scene = starter_scene();
        assert_eq!(scene.cell(-1, 0), None);
        assert_eq!(scene.cell(0, -1), None);
        assert_eq!(scene.cell(7, 0), None);
        assert_eq!(scene.cell(0, 8), None);
    }

    #[test]
    fn starter_layout_places_the_six_walls() {
        let scene = starter_scene();
        assert_eq!(scene.cell(2, 1), Some(Cell::Wall(Color::RED)));
        assert_eq!(scene.cell(2, 2), Some(Cell::Wall(Color::GREEN)));
        assert_eq!(scene.cell(2, 3), Some(Cell::Wall(Color::BLUE)));
        assert_eq!(scene.cell(0, 2), Some(Cell::Wall(Color::CYAN)));
        assert_eq!(scene.cell(0, 3), Some(Cell::Wall(Color::MAGENTA)));
        assert_eq!(scene.cell(1, 3), Some(Cell::Wall(Color::YELLOW)));
        assert_eq!(scene.cell(4, 4), Some(Cell::Empty));
    }
}
