use crate::board::{
    board_to_screen, Board, Color, Point, Shape, BOARD_COLS, BOARD_ROWS, CELL_SIZE,
};
use crate::display::PixelBuffer;
use crate::input::PALETTE;
use crate::util::additive_blend;

/// Draw the orthogonal board: grid, plates, drag handles and the palette.
/// `armed` outlines the palette button whose color is waiting to be applied.
pub fn render_flat(buffer: &mut PixelBuffer, board: &Board, armed: Option<Color>) {
    let colors: Vec<Color> = PALETTE.iter().map(|b| b.color).collect();
    let bg = additive_blend(&colors);
    buffer.clear(bg.r, bg.g, bg.b);

    draw_grid(buffer);

    for plate in board.plates() {
        let c = plate.color;
        match &plate.shape {
            Shape::Polygon { .. } => {
                buffer.fill_polygon_blend(&plate.flat_vertices(), c.r, c.g, c.b, c.a);
            },
            Shape::Circle { radius } => {
                let center = board_to_screen(plate.location);
                buffer.fill_circle_blend(
                    center.x as i32,
                    center.y as i32,
                    (radius * CELL_SIZE) as i32,
                    c.r,
                    c.g,
                    c.b,
                    c.a,
                );
            },
        }

        let (hx, hy, w, h) = plate.handle_rect();
        let k = Color::BLACK;
        buffer.fill_rect(hx as i32, hy as i32, w as u32, h as u32, k.r, k.g, k.b);
    }

    for button in &PALETTE {
        let c = button.color;
        buffer.fill_rect(button.x, button.y, button.size, button.size, c.r, c.g, c.b);
        if armed == Some(c) {
            outline(buffer, button.x - 3, button.y - 3, button.size as i32 + 6);
        }
    }
}

fn draw_grid(buffer: &mut PixelBuffer) {
    let g = Color::GRID;
    let top_left = board_to_screen(Point::new(0.0, 0.0));
    let bottom_right = board_to_screen(Point::new(BOARD_COLS as f32, BOARD_ROWS as f32));
    let (x0, y0) = (top_left.x as i32, top_left.y as i32);
    let (x1, y1) = (bottom_right.x as i32, bottom_right.y as i32);

    for col in 0..=BOARD_COLS {
        let x = board_to_screen(Point::new(col as f32, 0.0)).x as i32;
        buffer.line(x, y0, x, y1, g.r, g.g, g.b);
    }
    for row in 0..=BOARD_ROWS {
        let y = board_to_screen(Point::new(0.0, row as f32)).y as i32;
        buffer.line(x0, y, x1, y, g.r, g.g, g.b);
    }
}

fn outline(buffer: &mut PixelBuffer, x: i32, y: i32, size: i32) {
    let k = Color::BLACK;
    let (x1, y1) = (x + size - 1, y + size - 1);
    buffer.line(x, y, x1, y, k.r, k.g, k.b);
    buffer.line(x1, y, x1, y1, k.r, k.g, k.b);
    buffer.line(x1, y1, x, y1, k.r, k.g, k.b);
    buffer.line(x, y1, x, y, k.r, k.g, k.b);
}
