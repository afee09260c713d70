use crate::config::Config;
use crate::types::{Crate, LumberPiece, Vec3};

const MAX_WIDTH: f64 = 80.0;
const MAX_HEIGHT: f64 = 40.0;

/// ASCII end elevation of a crate: across the pallet left to right, up the
/// page. Lumber is drawn as `#`, items as outlined boxes labelled with a
/// letter per manifest group. Diagonals are hidden behind their posts.
pub fn render_crate(config: &Config, packed: &Crate) -> String {
    let extent = packed
        .lumber
        .iter()
        .filter_map(|l| match l {
            LumberPiece::Axial { dims, position, .. } => Some(position.y + dims.y / 2.0),
            LumberPiece::Diagonal { .. } => None,
        })
        .chain(packed.items.iter().map(|p| p.top()))
        .fold(packed.height, f64::max);

    if config.pallet_width <= 0.0 || extent <= 0.0 {
        return String::new();
    }

    let scale = f64::min(MAX_WIDTH / config.pallet_width, MAX_HEIGHT / extent);
    let grid_w = (config.pallet_width * scale).round() as usize;
    let grid_h = (extent * scale).round() as usize;

    if grid_w == 0 || grid_h == 0 {
        return String::new();
    }

    // Row 0 is the floor; rows are flipped on output.
    let mut grid = vec![vec![' '; grid_w + 1]; grid_h + 1];

    for piece in &packed.lumber {
        if let LumberPiece::Axial { dims, position, .. } = piece {
            let (sx, sy, sw, sh) = project(*position, *dims, scale);
            fill_rect(&mut grid, sx, sy, sw, sh, '#');
        }
    }

    for p in &packed.items {
        let (sx, sy, sw, sh) = project(p.position, p.dims, scale);
        if sw == 0 || sh == 0 {
            continue;
        }

        draw_rect(&mut grid, sx, sy, sw, sh);

        if sw > 1 && sh > 1 {
            let label = group_label(p.item.group);
            let cx = sx + sw / 2;
            let cy = sy + sh / 2;
            if cx > sx && cx < sx + sw && cy > sy && cy < sy + sh {
                grid[cy][cx] = label;
            }
        }
    }

    let mut result = String::new();
    for row in grid.iter().rev() {
        let line: String = row.iter().collect();
        result.push_str(line.trim_end());
        result.push('\n');
    }
    result
}

fn group_label(group: usize) -> char {
    (b'A' + (group % 26) as u8) as char
}

/// Grid rectangle (left, bottom, width, height) of a box seen end-on.
fn project(position: Vec3, dims: Vec3, scale: f64) -> (usize, usize, usize, usize) {
    let left = (position.x - dims.x / 2.0).max(0.0);
    let bottom = (position.y - dims.y / 2.0).max(0.0);
    (
        (left * scale).round() as usize,
        (bottom * scale).round() as usize,
        (dims.x * scale).round() as usize,
        (dims.y * scale).round() as usize,
    )
}

fn fill_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize, ch: char) {
    let rows = grid.len();
    for j in y..=(y + h).min(rows.saturating_sub(1)) {
        let cols = grid[j].len();
        for i in x..=(x + w).min(cols.saturating_sub(1)) {
            grid[j][i] = ch;
        }
    }
}

#[allow(clippy::needless_range_loop)]
fn draw_rect(grid: &mut [Vec<char>], x: usize, y: usize, w: usize, h: usize) {
    let rows = grid.len();
    let cols = if rows > 0 { grid[0].len() } else { return };

    // Horizontal edges
    for i in x..=x + w {
        if i < cols {
            if y < rows {
                grid[y][i] = if grid[y][i] == '|' || grid[y][i] == '+' {
                    '+'
                } else {
                    '-'
                };
            }
            if y + h < rows {
                grid[y + h][i] = if grid[y + h][i] == '|' || grid[y + h][i] == '+' {
                    '+'
                } else {
                    '-'
                };
            }
        }
    }

    // Vertical edges
    for j in y..=y + h {
        if j < rows {
            if x < cols {
                grid[j][x] = if grid[j][x] == '-' || grid[j][x] == '+' {
                    '+'
                } else {
                    '|'
                };
            }
            if x + w < cols {
                grid[j][x + w] = if grid[j][x + w] == '-' || grid[j][x + w] == '+' {
                    '+'
                } else {
                    '|'
                };
            }
        }
    }

    // Corners
    for &cx in &[x, x + w] {
        for &cy in &[y, y + h] {
            if cy < rows && cx < cols {
                grid[cy][cx] = '+';
            }
        }
    }
}
