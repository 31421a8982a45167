//! Integer line rasterization used to dig tunnels.

/// Cells on the line from `start` to `end`, both endpoints included.
#[derive(Debug, Clone)]
pub struct Bresenham {
    x: i32,
    y: i32,
    end: (i32, i32),
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl Bresenham {
    pub fn new(start: (i32, i32), end: (i32, i32)) -> Self {
        let dx = (end.0 - start.0).abs();
        let dy = -(end.1 - start.1).abs();
        Self {
            x: start.0,
            y: start.1,
            end,
            dx,
            dy,
            sx: if start.0 < end.0 { 1 } else { -1 },
            sy: if start.1 < end.1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let point = (self.x, self.y);
        if point == self.end {
            self.done = true;
            return Some(point);
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(point)
    }
}

pub fn line(start: (i32, i32), end: (i32, i32)) -> Bresenham {
    Bresenham::new(start, end)
}
