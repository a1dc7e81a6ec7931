use crate::board::{Board, Color, Point, BOARD_COLS, BOARD_ROWS};
use crate::config::Config;
use crate::display::PixelBuffer;
use crate::iso::{composite, resolve_all, CompositeMode, Projection};

/// Screen position the light beam is cast from
pub const LIGHT_SOURCE: Point = Point::new(80.0, 300.0);
pub const LIGHT_COLOR: Color = Color::rgba(255, 255, 100, 80);

/// Spacing of the isometric grid lines, in cells
const GRID_STEP: usize = 5;

/// Draw the isometric frame: the averaged board view, its grid, the additive
/// light view beside it, and the beam connecting the light to the plates.
pub fn render_isometric(buffer: &mut PixelBuffer, board: &Board, config: &Config) {
    let (width, height) = (buffer.width(), buffer.height());

    let board_shapes = resolve_all(board.plates(), &config.board_view);
    let board_frame = composite(&board_shapes, width, height, CompositeMode::Average);
    buffer.blit(&board_frame, 0, 0);

    draw_grid(buffer, &config.board_view);

    let light_shapes = resolve_all(board.plates(), &config.light_view);
    let light_frame = composite(&light_shapes, width, height, CompositeMode::Additive);
    let origin = config.light_view_origin;
    buffer.blit(&light_frame, origin.x as i32, origin.y as i32);

    // Beam spans from the light to the highest and lowest projected points
    let mut points = board_shapes.iter().flat_map(|s| s.points.iter().copied());
    if let Some(first) = points.next() {
        let (top, bottom) = points.fold((first, first), |(top, bottom), p| {
            (
                if p.y < top.y { p } else { top },
                if p.y > bottom.y { p } else { bottom },
            )
        });
        let beam = [LIGHT_SOURCE.as_tuple(), top.as_tuple(), bottom.as_tuple()];
        let c = LIGHT_COLOR;
        buffer.fill_polygon_blend(&beam, c.r, c.g, c.b, c.a);
    }
}

fn draw_grid(buffer: &mut PixelBuffer, view: &Projection) {
    let g = Color::GRID;
    let (cols, rows) = (BOARD_COLS as f32, BOARD_ROWS as f32);

    for x in (0..=BOARD_COLS as usize).step_by(GRID_STEP) {
        let a = view.project(Point::new(x as f32, 0.0));
        let b = view.project(Point::new(x as f32, rows));
        buffer.line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, g.r, g.g, g.b);
    }
    for y in (0..=BOARD_ROWS as usize).step_by(GRID_STEP) {
        let a = view.project(Point::new(0.0, y as f32));
        let b = view.project(Point::new(cols, y as f32));
        buffer.line(a.x as i32, a.y as i32, b.x as i32, b.y as i32, g.r, g.g, g.b);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Plate, Shape};

    fn red_square() -> Board {
        let mut board = Board::new();
        board.add_plate(Plate::new(
            Shape::polygon([(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]),
            Point::new(10.0, 10.0),
            Color::RED,
        ));
        board
    }

    #[test]
    fn test_board_and_light_views() {
        let mut buffer = PixelBuffer::with_size(800, 600);
        render_isometric(&mut buffer, &red_square(), &Config::default());

        // inside the projected square, right of the beam
        assert_eq!(buffer.get_pixel(233, 290), Some((255, 0, 0)));
        // same plate in the light view, blitted at x = 400
        assert_eq!(buffer.get_pixel(528, 252), Some((255, 0, 0)));
        // nothing drawn: opaque black from the compositor
        assert_eq!(buffer.get_pixel(5, 5), Some((0, 0, 0)));
    }

    #[test]
    fn test_light_beam_tints_background() {
        let mut buffer = PixelBuffer::with_size(800, 600);
        render_isometric(&mut buffer, &red_square(), &Config::default());
        assert_eq!(buffer.get_pixel(150, 290), Some((80, 80, 31)));
    }

    #[test]
    fn test_empty_board_has_no_beam() {
        let mut buffer = PixelBuffer::with_size(800, 600);
        render_isometric(&mut buffer, &Board::new(), &Config::default());
        assert_eq!(buffer.get_pixel(150, 290), Some((0, 0, 0)));
        // grid line through the projected origin
        assert_eq!(buffer.get_pixel(160, 180), Some((200, 200, 200)));
    }
}
