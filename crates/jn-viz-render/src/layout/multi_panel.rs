use crate::layout::margins::PlotArea;

/// `rows x cols` grid of equally sized panel cells.
///
/// `pad` is the spacing (in points) kept between cells and around the
/// figure border, like matplotlib's `tight_layout(pad=...)` once the
/// font-size factor has been applied.
#[derive(Debug, Clone)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
    cells: Vec<PlotArea>,
}

impl GridLayout {
    pub fn new(width: f64, height: f64, rows: usize, cols: usize, pad: f64) -> Self {
        let rows = rows.max(1);
        let cols = cols.max(1);
        let cell_w = (width - pad * (cols + 1) as f64) / cols as f64;
        let cell_h = (height - pad * (rows + 1) as f64) / rows as f64;

        let mut cells = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                cells.push(PlotArea::manual(
                    pad + c as f64 * (cell_w + pad),
                    pad + r as f64 * (cell_h + pad),
                    cell_w.max(0.0),
                    cell_h.max(0.0),
                ));
            }
        }
        Self { rows, cols, cells }
    }

    /// Cell in row-major order (`index = row * cols + col`), matching
    /// 1-based subplot numbering minus one.
    pub fn cell(&self, index: usize) -> Option<&PlotArea> {
        self.cells.get(index)
    }

    pub fn cells(&self) -> &[PlotArea] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cells_tile_the_figure() {
        let grid = GridLayout::new(1584.0, 576.0, 1, 3, 32.0);
        assert_eq!(grid.cells().len(), 3);
        let first = grid.cell(0).unwrap();
        let last = grid.cell(2).unwrap();
        assert_relative_eq!(first.left, 32.0);
        assert_relative_eq!(last.right(), 1584.0 - 32.0, epsilon = 1e-9);
        assert_relative_eq!(first.bottom(), 576.0 - 32.0, epsilon = 1e-9);
        assert!(grid.cell(3).is_none());
    }

    #[test]
    fn row_major_order() {
        let grid = GridLayout::new(600.0, 400.0, 2, 3, 10.0);
        let c = grid.cell(4).unwrap();
        let above = grid.cell(1).unwrap();
        assert_relative_eq!(c.left, above.left);
        assert!(c.top > above.top);
    }
}
