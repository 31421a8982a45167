//! Room and corridor dungeon generator.
//!
//! Greedy rejection sampling: a fixed number of attempts, each proposing a
//! random room. Rooms overlapping an accepted room are skipped; accepted rooms
//! are carved and joined to the previously accepted room by an L-shaped
//! tunnel. The result is a chain of connected rooms over a field of wall.
//! Fewer rooms than attempts is a normal outcome.

use rand::Rng;
use tracing::{debug, info, trace};

use super::bresenham::line;
use super::{GameMap, Rect, TileType};
use crate::config::GeneratorParams;
use crate::constants::{ROOM_SIZE_FLOOR, TUNNEL_HORIZONTAL_FIRST};
use crate::error::{CoreError, CoreResult};
use crate::logging::TimingSpan;

impl GameMap {
    /// Generate a `width` x `height` map, drawing every random decision from
    /// `rng`. The same RNG state always yields the same map.
    pub fn generate<R: Rng + ?Sized>(
        rng: &mut R,
        width: i32,
        height: i32,
        params: &GeneratorParams,
    ) -> CoreResult<Self> {
        let _span = TimingSpan::new("generate_map");
        let (max_w, max_h) = room_bounds(width, height, params)?;

        let mut map = GameMap::new(width, height);
        for attempt in 0..params.max_rooms {
            let w = rng.gen_range(params.room_min_size..=max_w);
            let h = rng.gen_range(params.room_min_size..=max_h);
            let x = rng.gen_range(0..=width - w - 1);
            let y = rng.gen_range(0..=height - h - 1);

            let candidate = Rect::new(x, y, w, h);
            if map.rooms.iter().any(|room| candidate.intersects(room)) {
                trace!(attempt, x, y, w, h, "room rejected");
                continue;
            }

            map.carve_room(&candidate);
            if let Some(previous) = map.rooms.last().copied() {
                map.carve_tunnel(rng, previous.center(), candidate.center());
            }
            debug!(attempt, x, y, w, h, "room accepted");
            map.rooms.push(candidate);
        }

        map.populate_blocked();
        info!(
            width,
            height,
            rooms = map.rooms.len(),
            attempts = params.max_rooms,
            "generated map"
        );
        Ok(map)
    }

    fn carve_room(&mut self, room: &Rect) {
        let (xs, ys) = room.inner();
        for y in ys {
            for x in xs.clone() {
                self.set_tile(x, y, TileType::Floor);
            }
        }
    }

    fn carve_tunnel<R: Rng + ?Sized>(&mut self, rng: &mut R, start: (i32, i32), end: (i32, i32)) {
        for (x, y) in tunnel_between(rng, start, end) {
            self.set_tile(x, y, TileType::Floor);
        }
    }
}

/// L-shaped path from `start` to `end`. The bend goes horizontal-first or
/// vertical-first with equal odds.
pub fn tunnel_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: (i32, i32),
    end: (i32, i32),
) -> impl Iterator<Item = (i32, i32)> {
    let (x1, y1) = start;
    let (x2, y2) = end;
    let corner = if rng.gen_bool(TUNNEL_HORIZONTAL_FIRST) {
        (x2, y1)
    } else {
        (x1, y2)
    };
    line(start, corner).chain(line(corner, end))
}

/// Largest room width and height that still fit, or an error when not even a
/// minimum room does.
fn room_bounds(width: i32, height: i32, params: &GeneratorParams) -> CoreResult<(i32, i32)> {
    let invalid = |reason: String| CoreError::InvalidDimensions {
        width,
        height,
        reason,
    };

    if params.room_min_size < ROOM_SIZE_FLOOR {
        return Err(invalid(format!(
            "room_min_size {} is below {}",
            params.room_min_size, ROOM_SIZE_FLOOR
        )));
    }
    if params.room_min_size > params.room_max_size {
        return Err(invalid(format!(
            "room_min_size {} exceeds room_max_size {}",
            params.room_min_size, params.room_max_size
        )));
    }

    let max_w = params.room_max_size.min(width - 1);
    let max_h = params.room_max_size.min(height - 1);
    if max_w < params.room_min_size || max_h < params.room_min_size {
        return Err(invalid(format!(
            "cannot fit a {0}x{0} room",
            params.room_min_size
        )));
    }
    Ok((max_w, max_h))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn generate(seed: u64, width: i32, height: i32) -> GameMap {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        GameMap::generate(&mut rng, width, height, &GeneratorParams::default()).unwrap()
    }

    #[test]
    fn test_generate_deterministic() {
        let a = generate(42, 80, 43);
        let b = generate(42, 80, 43);
        assert_eq!(a.tiles(), b.tiles(), "Same seed must produce same layout");
        assert_eq!(a.rooms(), b.rooms());
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(1, 80, 43);
        let b = generate(2, 80, 43);
        assert_ne!(a.tiles(), b.tiles(), "Different seeds should differ");
    }

    #[test]
    fn test_rooms_fit_and_do_not_overlap() {
        let map = generate(7, 80, 43);
        assert!(!map.rooms().is_empty());
        assert!(map.rooms().len() <= 30);
        for (i, a) in map.rooms().iter().enumerate() {
            assert!(a.x1 >= 0 && a.y1 >= 0);
            assert!(a.x2 < map.width() && a.y2 < map.height());
            for b in &map.rooms()[i + 1..] {
                assert!(!a.intersects(b), "{a:?} overlaps {b:?}");
            }
        }
    }

    #[test]
    fn test_room_inner_is_floor_and_border_outside_rooms_is_wall() {
        let map = generate(99, 60, 40);
        for room in map.rooms() {
            let (xs, ys) = room.inner();
            for y in ys {
                for x in xs.clone() {
                    assert_eq!(map.tile(x, y), TileType::Floor);
                }
            }
        }
        for x in 0..map.width() {
            assert_eq!(map.tile(x, 0), TileType::Wall);
            assert_eq!(map.tile(x, map.height() - 1), TileType::Wall);
        }
    }

    #[test]
    fn test_blocked_layer_is_derived() {
        let map = generate(5, 50, 30);
        for (blocked, tile) in map.blocked().iter().zip(map.tiles()) {
            assert_eq!(*blocked, *tile == TileType::Wall);
        }
    }

    #[test]
    fn test_tunnel_is_l_shaped() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(3);
        let path: Vec<_> = tunnel_between(&mut rng, (2, 2), (8, 6)).collect();
        assert_eq!(path.first(), Some(&(2, 2)));
        assert_eq!(path.last(), Some(&(8, 6)));
        assert!(path.contains(&(8, 2)) || path.contains(&(2, 6)));
        for pair in path.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert!((a.0 - b.0).abs() + (a.1 - b.1).abs() <= 1);
        }
    }

    #[test]
    fn test_small_map_rejected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let result = GameMap::generate(&mut rng, 6, 40, &GeneratorParams::default());
        assert!(matches!(result, Err(CoreError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_narrow_map_clamps_room_size() {
        // 8 wide: rooms are at most 7 wide
        let map = generate(11, 8, 40);
        assert!(!map.rooms().is_empty());
        assert!(map.rooms().iter().all(|r| r.width() <= 7 && r.x2 <= 7));
    }

    #[test]
    fn test_inconsistent_params_rejected() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(0);
        let params = GeneratorParams {
            max_rooms: 10,
            room_min_size: 9,
            room_max_size: 6,
        };
        assert!(GameMap::generate(&mut rng, 80, 43, &params).is_err());
    }
}
