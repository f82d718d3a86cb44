// cursor.rs
//
// Copyright (c) 2019-2024  Minnesota Department of Transportation
//
//! Cursor for Mapbox Vector Tile (MVT) geometry.
//!
use num_traits::NumCast;
use pointy::{Float, Pt};
use std::iter::Copied;
use std::slice::Iter;

/// Path commands
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Command {
    /// Move to new position
    MoveTo = 1,

    /// Line to new position
    LineTo = 2,

    /// Close current path
    ClosePath = 7,
}

/// Integer command
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct CommandInt {
    /// Path command
    id: Command,

    /// Command count
    count: u32,
}

/// Integer parameter
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct ParamInt {
    /// Parameter value
    value: i32,
}

/// One step of a geometry command stream
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GeomStep<F>
where
    F: Float,
{
    /// Start a new subpath at a point
    MoveTo(Pt<F>),

    /// Extend the current subpath to a point
    LineTo(Pt<F>),

    /// Close the current subpath, yielding its start point
    Close(Pt<F>),
}

impl Command {
    /// Look up a command from its ID
    fn from_id(id: u32) -> Option<Self> {
        match id {
            1 => Some(Command::MoveTo),
            2 => Some(Command::LineTo),
            7 => Some(Command::ClosePath),
            _ => None,
        }
    }
}

impl CommandInt {
    /// Decode an integer command
    fn decode(code: u32) -> Option<Self> {
        let id = Command::from_id(code & 0x7)?;
        let count = code >> 3;
        Some(CommandInt { id, count })
    }
}

impl ParamInt {
    /// Decode a zig-zag encoded parameter
    fn decode(code: u32) -> Self {
        let value = ((code >> 1) as i32) ^ -((code & 1) as i32);
        ParamInt { value }
    }

    /// Get the value converted to a float type
    fn to_float<F>(self) -> F
    where
        F: Float,
    {
        // i32 to f32 / f64 cannot fail
        NumCast::from(self.value).unwrap_or_else(F::zero)
    }
}

impl<F> GeomStep<F>
where
    F: Float,
{
    /// Get the decoded point.
    pub fn pt(&self) -> Pt<F> {
        match self {
            GeomStep::MoveTo(pt) | GeomStep::LineTo(pt) | GeomStep::Close(pt) => {
                *pt
            }
        }
    }
}

/// Cursor for the geometry of one [Feature](https://github.com/mapbox/vector-tile-spec/tree/master/2.1#42-features).
///
/// An [Iterator] of [GeomStep]s, decoding one command repetition at a time
/// into an absolute position in output coördinates.
///
/// The cursor is for one-time use.  Once it has returned `None`, it yields
/// nothing more; decoding again requires a new cursor.
///
/// # Example
/// ```
/// use mvt_decode::{GeomCursor, GeomStep};
///
/// let geom = [9, 50, 34];
/// let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
/// if let Some(GeomStep::MoveTo(pt)) = cursor.next() {
///     assert_eq!((pt.x, pt.y), (25.0, 17.0));
/// }
/// ```
pub struct GeomCursor<F, I>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    /// Remaining geometry data
    geom: I,

    /// Divisor from tile deltas to output X units
    scale_x: F,

    /// Divisor from tile deltas to output Y units
    scale_y: F,

    /// Current command
    cmd: Command,

    /// Remaining repetitions of the current command
    length: u32,

    /// Count from the most recent command header
    run_len: u32,

    /// Current position
    pos: Pt<F>,

    /// Position of the most recent MoveTo
    origin: Pt<F>,

    /// Stream exhausted flag
    done: bool,
}

/// Cursor over a slice of geometry data
pub type SliceCursor<'a, F> = GeomCursor<F, Copied<Iter<'a, u32>>>;

impl<F, I> GeomCursor<F, I>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    /// Create a new geometry cursor.
    ///
    /// * `geom` Stream of command / parameter integers.
    /// * `tile_x` X origin of the tile in output coördinates.
    /// * `tile_y` Y origin of the tile in output coördinates.
    /// * `scale_x` Divisor from tile deltas to output X units.
    /// * `scale_y` Divisor from tile deltas to output Y units.
    pub fn new(geom: I, tile_x: F, tile_y: F, scale_x: F, scale_y: F) -> Self {
        debug_assert!(scale_x > F::zero());
        debug_assert!(scale_y > F::zero());
        GeomCursor {
            geom,
            scale_x,
            scale_y,
            cmd: Command::MoveTo,
            length: 0,
            run_len: 0,
            pos: Pt::from((tile_x, tile_y)),
            origin: Pt::from((F::zero(), F::zero())),
            done: false,
        }
    }

    /// Get the count from the most recent command header.
    ///
    /// Useful for reserving buffers, but untrustworthy for anything else;
    /// some encoders write counts which do not match the stream.
    pub fn run_len(&self) -> u32 {
        self.run_len
    }

    /// Consume the next integer from the stream.
    fn take(&mut self) -> Option<u32> {
        let v = self.geom.next();
        if v.is_none() {
            self.done = true;
        }
        v
    }
}

impl<'a, F> GeomCursor<F, Copied<Iter<'a, u32>>>
where
    F: Float,
{
    /// Create a cursor over a slice of geometry data.
    ///
    /// Parameters are as in [GeomCursor::new].
    pub fn from_slice(
        geom: &'a [u32],
        tile_x: F,
        tile_y: F,
        scale_x: F,
        scale_y: F,
    ) -> Self {
        GeomCursor::new(geom.iter().copied(), tile_x, tile_y, scale_x, scale_y)
    }
}

impl<F, I> Iterator for GeomCursor<F, I>
where
    F: Float,
    I: Iterator<Item = u32>,
{
    type Item = GeomStep<F>;

    fn next(&mut self) -> Option<GeomStep<F>> {
        if self.done {
            return None;
        }
        if self.length == 0 {
            let code = self.take()?;
            match CommandInt::decode(code) {
                Some(cmd) => {
                    self.cmd = cmd.id;
                    self.length = cmd.count;
                    self.run_len = cmd.count;
                }
                None => {
                    log::warn!("unknown command: {}", code & 0x7);
                    self.done = true;
                    return None;
                }
            }
        }
        // a zero-count header wraps; the run consumes the rest of the stream
        self.length = self.length.wrapping_sub(1);
        match self.cmd {
            Command::MoveTo | Command::LineTo => {
                let dx: F = ParamInt::decode(self.take()?).to_float();
                let dy: F = ParamInt::decode(self.take()?).to_float();
                let x = self.pos.x + dx / self.scale_x;
                let y = self.pos.y + dy / self.scale_y;
                self.pos = Pt::from((x, y));
                if self.cmd == Command::MoveTo {
                    self.origin = self.pos;
                    Some(GeomStep::MoveTo(self.pos))
                } else {
                    Some(GeomStep::LineTo(self.pos))
                }
            }
            Command::ClosePath => Some(GeomStep::Close(self.origin)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn zigzag(value: i32) -> u32 {
        ((value << 1) ^ (value >> 31)) as u32
    }

    #[test]
    fn test_param_decode() {
        assert_eq!(ParamInt::decode(0).value, 0);
        assert_eq!(ParamInt::decode(1).value, -1);
        assert_eq!(ParamInt::decode(2).value, 1);
        assert_eq!(ParamInt::decode(3).value, -2);
        assert_eq!(ParamInt::decode(50).value, 25);
        assert_eq!(ParamInt::decode(34).value, 17);
        assert_eq!(ParamInt::decode(8191).value, -4096);
        assert_eq!(ParamInt::decode(8192).value, 4096);
    }

    #[test]
    fn test_param_round_trip() {
        let values = [
            i32::MIN,
            -65536,
            -4096,
            -2,
            -1,
            0,
            1,
            2,
            25,
            4096,
            i32::MAX,
        ];
        for value in values {
            assert_eq!(ParamInt::decode(zigzag(value)).value, value);
        }
    }

    #[test]
    fn test_command_decode() {
        let cmd = CommandInt::decode(9).unwrap();
        assert_eq!(cmd.id, Command::MoveTo);
        assert_eq!(cmd.count, 1);
        let cmd = CommandInt::decode(26).unwrap();
        assert_eq!(cmd.id, Command::LineTo);
        assert_eq!(cmd.count, 3);
        let cmd = CommandInt::decode(15).unwrap();
        assert_eq!(cmd.id, Command::ClosePath);
        assert_eq!(cmd.count, 1);
        assert_eq!(CommandInt::decode(11), None);
    }

    #[test]
    fn test_single_point() {
        let geom = [9, 50, 34];
        let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            cursor.next(),
            Some(GeomStep::MoveTo(Pt::from((25.0, 17.0))))
        );
        assert_eq!(cursor.run_len(), 1);
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_multipoint_run_len() {
        let geom = [25, 0, 0, 10, 10, 20, 20];
        let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(cursor.next(), Some(GeomStep::MoveTo(Pt::from((0.0, 0.0)))));
        assert_eq!(cursor.run_len(), 3);
        assert_eq!(cursor.next(), Some(GeomStep::MoveTo(Pt::from((5.0, 5.0)))));
        assert_eq!(
            cursor.next(),
            Some(GeomStep::MoveTo(Pt::from((15.0, 15.0))))
        );
        assert_eq!(cursor.run_len(), 3);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_linestring_steps() {
        let geom = [9, 4, 4, 18, 0, 16, 16, 0];
        let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(cursor.next(), Some(GeomStep::MoveTo(Pt::from((2.0, 2.0)))));
        assert_eq!(cursor.run_len(), 1);
        assert_eq!(
            cursor.next(),
            Some(GeomStep::LineTo(Pt::from((2.0, 10.0))))
        );
        assert_eq!(cursor.run_len(), 2);
        assert_eq!(
            cursor.next(),
            Some(GeomStep::LineTo(Pt::from((10.0, 10.0))))
        );
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_close_yields_start() {
        let geom = [9, 6, 12, 18, 10, 12, 24, 44, 15];
        let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(cursor.next(), Some(GeomStep::MoveTo(Pt::from((3.0, 6.0)))));
        assert_eq!(
            cursor.next(),
            Some(GeomStep::LineTo(Pt::from((8.0, 12.0))))
        );
        assert_eq!(
            cursor.next(),
            Some(GeomStep::LineTo(Pt::from((20.0, 34.0))))
        );
        assert_eq!(cursor.next(), Some(GeomStep::Close(Pt::from((3.0, 6.0)))));
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_scale_and_origin() {
        let geom = [9, 50, 34];
        let mut cursor = GeomCursor::from_slice(&geom, 100.0, 200.0, 2.0, 4.0);
        assert_eq!(
            cursor.next(),
            Some(GeomStep::MoveTo(Pt::from((112.5, 204.25))))
        );
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_unknown_command() {
        // command ID 3 ends the stream
        let geom = [9, 50, 34, 11, 2, 2];
        let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            cursor.next(),
            Some(GeomStep::MoveTo(Pt::from((25.0, 17.0))))
        );
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_truncated_stream() {
        // LineTo run promises two points; stream ends after one
        let geom = [9, 4, 4, 18, 0, 16];
        let mut cursor = GeomCursor::from_slice(&geom, 0.0, 0.0, 1.0, 1.0);
        assert_eq!(cursor.next(), Some(GeomStep::MoveTo(Pt::from((2.0, 2.0)))));
        assert_eq!(
            cursor.next(),
            Some(GeomStep::LineTo(Pt::from((2.0, 10.0))))
        );
        assert_eq!(cursor.next(), None);
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_iterator_input() {
        let geom = vec![9u32, 50, 34];
        let mut cursor = GeomCursor::new(geom.into_iter(), 0.0, 0.0, 1.0, 1.0);
        assert_eq!(
            cursor.next(),
            Some(GeomStep::MoveTo(Pt::from((25.0, 17.0))))
        );
        assert_eq!(cursor.next(), None);
    }
}
