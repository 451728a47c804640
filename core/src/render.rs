// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering of a game for terminals and the `render_state` call.

use crate::{board::BoxCoord, board::Direction, GameSession, Seat};

const GRID_DOT: char = '·';
const EMPTY_SPACE: char = ' ';
const VERTICAL_LINE: char = '|';
const HORIZONTAL_LINE: char = '―';

/// Render the board followed by scores, status and whose turn it is
pub fn render_session(session: &GameSession) -> String {
    let mut output = String::from("\n");
    output.push_str(&render_board(session));
    output.push('\n');

    let (p1, p2) = session.scores();
    output.push_str(&format!("Player 1 boxes completed:{}\n", p1));
    output.push_str(&format!("Player 2 boxes completed:{}\n", p2));
    output.push_str(&format!("Game Status:{}\n", session.status));
    output.push_str(&format!("Next Player's Turn:{}\n", session.current_turn.number()));

    output
}

/// Render only the grid. Row 0 is printed last so the origin sits bottom left.
pub fn render_board(session: &GameSession) -> String {
    let board = &session.board;
    let size = board.size() as usize;
    let cells = size * 2;

    // Indexed [column][row]
    let mut grid = vec![vec![EMPTY_SPACE; cells]; cells];

    // Axis labels
    for i in 0..size {
        grid[0][2 * i + 1] = digit_to_char(i);
        grid[2 * i + 1][0] = digit_to_char(i);
    }

    // Dots on every vertex
    for x in 0..size {
        for y in 0..size {
            grid[2 * x + 1][2 * y + 1] = GRID_DOT;
        }
    }

    for line in board.lines() {
        let (x, y) = (line.x as usize, line.y as usize);
        match line.direction {
            Direction::Right => grid[2 * x + 2][2 * y + 1] = HORIZONTAL_LINE,
            Direction::Up => grid[2 * x + 1][2 * y + 2] = VERTICAL_LINE,
        }
    }

    // Owner digit in the middle of each completed box
    let per_side = board.boxes_per_side();
    for x in 0..per_side {
        for y in 0..per_side {
            if let Some(seat) = board.owner(BoxCoord::new(x, y)) {
                grid[2 * x as usize + 2][2 * y as usize + 2] = seat_to_char(seat);
            }
        }
    }

    let mut output = String::new();
    for row in (0..cells).rev() {
        for column in grid.iter() {
            output.push(column[row]);
        }
        output.push('\n');
    }
    output
}

fn digit_to_char(number: usize) -> char {
    char::from_digit(number as u32, 10).unwrap_or(EMPTY_SPACE)
}

fn seat_to_char(seat: Seat) -> char {
    digit_to_char(seat.number() as usize)
}
