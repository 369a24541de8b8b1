//! Paths and Vertices

use crate::arc::BezierArcSvg;
use crate::clip::Rectangle;
use crate::error::Error;
use crate::transform::Transform;
use crate::VertexSource;

/// Distance below which two vertices are considered coincident
pub const VERTEX_DIST_EPSILON : f64 = 1e-14;

/// Polygon winding direction
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PathOrientation {
    Clockwise,
    CounterClockwise
}

/// Path command attached to every vertex
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
pub enum PathCommand {
    /// End of a path, also used as a separator between paths
    Stop,
    MoveTo,
    LineTo,
    /// Quadratic curve; control point followed by end point
    Curve3,
    /// Cubic curve; two control points followed by end point
    Curve4,
    /// End of polygon, optionally closing it
    EndPoly { close: bool, orientation: Option<PathOrientation> },
}

const CMD_STOP     : u32 = 0;
const CMD_MOVE_TO  : u32 = 1;
const CMD_LINE_TO  : u32 = 2;
const CMD_CURVE3   : u32 = 3;
const CMD_CURVE4   : u32 = 4;
const CMD_END_POLY : u32 = 0x0F;
const CMD_MASK     : u32 = 0x0F;
const FLAG_CCW     : u32 = 0x10;
const FLAG_CW      : u32 = 0x20;
const FLAG_CLOSE   : u32 = 0x40;

impl Default for PathCommand {
    fn default() -> PathCommand {
        PathCommand::MoveTo
    }
}

impl PathCommand {
    /// Closing end of polygon without orientation
    pub fn close() -> Self {
        PathCommand::EndPoly { close: true, orientation: None }
    }
    /// Command carries a coordinate (move_to, line_to or a curve point)
    pub fn is_vertex(&self) -> bool {
        match *self {
            PathCommand::MoveTo | PathCommand::LineTo |
            PathCommand::Curve3 | PathCommand::Curve4 => true,
            _ => false,
        }
    }
    pub fn is_move_to(&self) -> bool {
        *self == PathCommand::MoveTo
    }
    pub fn is_stop(&self) -> bool {
        *self == PathCommand::Stop
    }
    pub fn is_curve(&self) -> bool {
        *self == PathCommand::Curve3 || *self == PathCommand::Curve4
    }
    pub fn is_end_poly(&self) -> bool {
        matches!(*self, PathCommand::EndPoly { .. })
    }
    pub fn is_close(&self) -> bool {
        matches!(*self, PathCommand::EndPoly { close: true, .. })
    }
    /// Command starts the next polygon
    pub fn is_next_poly(&self) -> bool {
        self.is_stop() || self.is_move_to() || self.is_end_poly()
    }
    /// Replace the orientation of an end_poly command
    pub fn with_orientation(self, o: PathOrientation) -> Self {
        match self {
            PathCommand::EndPoly { close, .. } =>
                PathCommand::EndPoly { close, orientation: Some(o) },
            cmd => cmd,
        }
    }
    /// Command word as stored in serialized paths
    pub fn to_u32(&self) -> u32 {
        match *self {
            PathCommand::Stop   => CMD_STOP,
            PathCommand::MoveTo => CMD_MOVE_TO,
            PathCommand::LineTo => CMD_LINE_TO,
            PathCommand::Curve3 => CMD_CURVE3,
            PathCommand::Curve4 => CMD_CURVE4,
            PathCommand::EndPoly { close, orientation } => {
                let mut v = CMD_END_POLY;
                if close {
                    v |= FLAG_CLOSE;
                }
                match orientation {
                    Some(PathOrientation::Clockwise)        => v |= FLAG_CW,
                    Some(PathOrientation::CounterClockwise) => v |= FLAG_CCW,
                    None => {},
                }
                v
            }
        }
    }
    /// Decode a serialized command word
    pub fn from_u32(v: u32) -> Option<Self> {
        let cmd = match v & CMD_MASK {
            CMD_STOP     => PathCommand::Stop,
            CMD_MOVE_TO  => PathCommand::MoveTo,
            CMD_LINE_TO  => PathCommand::LineTo,
            CMD_CURVE3   => PathCommand::Curve3,
            CMD_CURVE4   => PathCommand::Curve4,
            CMD_END_POLY => {
                if v & !(CMD_MASK | FLAG_CCW | FLAG_CW | FLAG_CLOSE) != 0 ||
                    v & (FLAG_CCW | FLAG_CW) == (FLAG_CCW | FLAG_CW) {
                        return None;
                    }
                let orientation = if v & FLAG_CW != 0 {
                    Some(PathOrientation::Clockwise)
                } else if v & FLAG_CCW != 0 {
                    Some(PathOrientation::CounterClockwise)
                } else {
                    None
                };
                return Some(PathCommand::EndPoly { close: v & FLAG_CLOSE != 0,
                                                   orientation });
            },
            _ => return None,
        };
        if v & !CMD_MASK != 0 {
            return None;
        }
        Some(cmd)
    }
}

/// Point with an associated command
#[derive(Debug,Default,Copy,Clone,PartialEq)]
pub struct Vertex<T> {
    pub x: T,
    pub y: T,
    pub cmd: PathCommand
}

impl<T> Vertex<T> {
    pub fn new(x: T, y: T, cmd: PathCommand) -> Self {
        Self { x, y, cmd }
    }
    pub fn move_to(x: T, y: T) -> Self {
        Self { x, y, cmd: PathCommand::MoveTo }
    }
    pub fn line_to(x: T, y: T) -> Self {
        Self { x, y, cmd: PathCommand::LineTo }
    }
}

/// Distance between two points
pub fn calc_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2-x1).powi(2) + (y2-y1).powi(2)).sqrt()
}

/// Vertex container
///
/// Stores one or more paths as a sequence of vertices and commands. Paths
/// are separated by [Stop] commands (see [start_new_path]) and read back
/// through [VertexSource].
///
/// [Stop]: enum.PathCommand.html
/// [start_new_path]: #method.start_new_path
/// [VertexSource]: ../trait.VertexSource.html
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Path {
    vertices: Vec<Vertex<f64>>,
    iterator: usize,
}

impl VertexSource for Path {
    fn rewind(&mut self, path_id: usize) {
        self.iterator = path_id;
    }
    fn vertex(&mut self) -> Option<Vertex<f64>> {
        let v = *self.vertices.get(self.iterator)?;
        self.iterator += 1;
        if v.cmd.is_stop() {
            None
        } else {
            Some(v)
        }
    }
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self { vertices: Vec::with_capacity(8), iterator: 0 }
    }
    /// Remove all vertices and reset the cursor
    pub fn remove_all(&mut self) {
        self.vertices.clear();
        self.iterator = 0;
    }
    /// Begin a new path, returning its id for use with `rewind`
    pub fn start_new_path(&mut self) -> usize {
        if ! self.last_command().is_stop() {
            self.add_vertex(0.0, 0.0, PathCommand::Stop);
        }
        self.total_vertices()
    }
    /// Append a raw vertex
    pub fn add_vertex(&mut self, x: f64, y: f64, cmd: PathCommand) {
        self.vertices.push( Vertex::new(x, y, cmd) );
    }
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.add_vertex(x, y, PathCommand::MoveTo);
    }
    pub fn move_rel(&mut self, dx: f64, dy: f64) {
        let (x,y) = self.rel_to_abs(dx, dy);
        self.add_vertex(x, y, PathCommand::MoveTo);
    }
    pub fn line_to(&mut self, x: f64, y: f64) {
        self.add_vertex(x, y, PathCommand::LineTo);
    }
    pub fn line_rel(&mut self, dx: f64, dy: f64) {
        let (x,y) = self.rel_to_abs(dx, dy);
        self.add_vertex(x, y, PathCommand::LineTo);
    }
    /// Horizontal line to `x`
    pub fn hline_to(&mut self, x: f64) {
        let y = self.last_y();
        self.add_vertex(x, y, PathCommand::LineTo);
    }
    pub fn hline_rel(&mut self, dx: f64) {
        let (x,y) = self.rel_to_abs(dx, 0.0);
        self.add_vertex(x, y, PathCommand::LineTo);
    }
    /// Vertical line to `y`
    pub fn vline_to(&mut self, y: f64) {
        let x = self.last_x();
        self.add_vertex(x, y, PathCommand::LineTo);
    }
    pub fn vline_rel(&mut self, dy: f64) {
        let (x,y) = self.rel_to_abs(0.0, dy);
        self.add_vertex(x, y, PathCommand::LineTo);
    }
    /// Elliptical arc from the last vertex to (`x`,`y`), SVG style
    ///
    /// Zero radii produce a straight line, coincident end points produce
    /// nothing, and a path without a current vertex starts at (`x`,`y`).
    pub fn arc_to(&mut self, rx: f64, ry: f64, angle: f64,
                  large_arc: bool, sweep: bool, x: f64, y: f64) {
        if self.total_vertices() == 0 || ! self.last_command().is_vertex() {
            self.move_to(x, y);
            return;
        }
        let epsilon = 1e-30;
        let (x0, y0) = (self.last_x(), self.last_y());
        let rx = rx.abs();
        let ry = ry.abs();
        if rx < epsilon || ry < epsilon {
            self.line_to(x, y);
            return;
        }
        if calc_distance(x0, y0, x, y) < epsilon {
            return;
        }
        let mut a = BezierArcSvg::new(x0, y0, rx, ry, angle, large_arc, sweep, x, y);
        if a.radii_ok() {
            self.join_path(&mut a, 0);
        } else {
            self.line_to(x, y);
        }
    }
    pub fn arc_rel(&mut self, rx: f64, ry: f64, angle: f64,
                   large_arc: bool, sweep: bool, dx: f64, dy: f64) {
        let (x,y) = self.rel_to_abs(dx, dy);
        self.arc_to(rx, ry, angle, large_arc, sweep, x, y);
    }
    /// Quadratic curve with control point (`x_ctrl`,`y_ctrl`)
    pub fn curve3(&mut self, x_ctrl: f64, y_ctrl: f64, x_to: f64, y_to: f64) {
        self.add_vertex(x_ctrl, y_ctrl, PathCommand::Curve3);
        self.add_vertex(x_to, y_to, PathCommand::Curve3);
    }
    pub fn curve3_rel(&mut self, dx_ctrl: f64, dy_ctrl: f64, dx_to: f64, dy_to: f64) {
        let (xc,yc) = self.rel_to_abs(dx_ctrl, dy_ctrl);
        let (xt,yt) = self.rel_to_abs(dx_to, dy_to);
        self.curve3(xc, yc, xt, yt);
    }
    /// Quadratic curve whose control point reflects the previous one
    pub fn curve3_smooth(&mut self, x_to: f64, y_to: f64) {
        if let Some((xc, yc)) = self.reflected_ctrl() {
            self.curve3(xc, yc, x_to, y_to);
        }
    }
    pub fn curve3_smooth_rel(&mut self, dx_to: f64, dy_to: f64) {
        let (x,y) = self.rel_to_abs(dx_to, dy_to);
        self.curve3_smooth(x, y);
    }
    /// Cubic curve with control points 1 and 2
    pub fn curve4(&mut self, x_ctrl1: f64, y_ctrl1: f64,
                  x_ctrl2: f64, y_ctrl2: f64,
                  x_to: f64, y_to: f64) {
        self.add_vertex(x_ctrl1, y_ctrl1, PathCommand::Curve4);
        self.add_vertex(x_ctrl2, y_ctrl2, PathCommand::Curve4);
        self.add_vertex(x_to, y_to, PathCommand::Curve4);
    }
    pub fn curve4_rel(&mut self, dx_ctrl1: f64, dy_ctrl1: f64,
                      dx_ctrl2: f64, dy_ctrl2: f64,
                      dx_to: f64, dy_to: f64) {
        let (x1,y1) = self.rel_to_abs(dx_ctrl1, dy_ctrl1);
        let (x2,y2) = self.rel_to_abs(dx_ctrl2, dy_ctrl2);
        let (xt,yt) = self.rel_to_abs(dx_to, dy_to);
        self.curve4(x1, y1, x2, y2, xt, yt);
    }
    /// Cubic curve whose first control point reflects the previous one
    pub fn curve4_smooth(&mut self, x_ctrl2: f64, y_ctrl2: f64, x_to: f64, y_to: f64) {
        if let Some((x1, y1)) = self.reflected_ctrl() {
            self.curve4(x1, y1, x_ctrl2, y_ctrl2, x_to, y_to);
        }
    }
    pub fn curve4_smooth_rel(&mut self, dx_ctrl2: f64, dy_ctrl2: f64, dx_to: f64, dy_to: f64) {
        let (x2,y2) = self.rel_to_abs(dx_ctrl2, dy_ctrl2);
        let (xt,yt) = self.rel_to_abs(dx_to, dy_to);
        self.curve4_smooth(x2, y2, xt, yt);
    }
    fn reflected_ctrl(&self) -> Option<(f64, f64)> {
        let last = self.last_vertex().filter(|v| v.cmd.is_vertex())?;
        match self.prev_vertex() {
            Some(p) if p.cmd.is_curve() => Some((last.x + last.x - p.x,
                                                 last.y + last.y - p.y)),
            _ => Some((last.x, last.y)),
        }
    }
    /// End the current polygon
    ///
    /// Nothing is added unless the last command is a vertex
    pub fn end_poly(&mut self, close: bool, orientation: Option<PathOrientation>) {
        if self.last_command().is_vertex() {
            self.add_vertex(0.0, 0.0, PathCommand::EndPoly { close, orientation });
        }
    }
    /// Close the current polygon
    pub fn close_polygon(&mut self) {
        self.end_poly(true, None);
    }
    /// Number of stored vertices, including commands without coordinates
    pub fn total_vertices(&self) -> usize {
        self.vertices.len()
    }
    /// Size of the vertex and command data, 12 bytes per vertex
    pub fn total_byte_size(&self) -> usize {
        self.vertices.len() * 12
    }
    pub fn vertices(&self) -> &[Vertex<f64>] {
        &self.vertices
    }
    /// Last command, [Stop] if empty
    ///
    /// [Stop]: enum.PathCommand.html
    pub fn last_command(&self) -> PathCommand {
        self.vertices.last().map(|v| v.cmd).unwrap_or(PathCommand::Stop)
    }
    pub fn last_vertex(&self) -> Option<Vertex<f64>> {
        self.vertices.last().copied()
    }
    pub fn prev_vertex(&self) -> Option<Vertex<f64>> {
        let n = self.vertices.len();
        if n < 2 {
            None
        } else {
            Some(self.vertices[n-2])
        }
    }
    pub fn last_x(&self) -> f64 {
        self.vertices.last().map(|v| v.x).unwrap_or(0.0)
    }
    pub fn last_y(&self) -> f64 {
        self.vertices.last().map(|v| v.y).unwrap_or(0.0)
    }
    /// Convert a relative offset to an absolute position
    ///
    /// The offset is taken from the last vertex if it is a vertex command
    pub fn rel_to_abs(&self, x: f64, y: f64) -> (f64, f64) {
        match self.last_vertex() {
            Some(v) if v.cmd.is_vertex() => (x + v.x, y + v.y),
            _ => (x, y),
        }
    }
    /// Vertex at index `idx`
    pub fn vertex_at(&self, idx: usize) -> Option<Vertex<f64>> {
        self.vertices.get(idx).copied()
    }
    /// Command at index `idx`, [Stop] past the end
    ///
    /// [Stop]: enum.PathCommand.html
    pub fn command(&self, idx: usize) -> PathCommand {
        self.vertices.get(idx).map(|v| v.cmd).unwrap_or(PathCommand::Stop)
    }
    /// Change the coordinates of vertex `idx`
    pub fn modify_vertex(&mut self, idx: usize, x: f64, y: f64) {
        if let Some(v) = self.vertices.get_mut(idx) {
            v.x = x;
            v.y = y;
        }
    }
    /// Change the command of vertex `idx`
    pub fn modify_command(&mut self, idx: usize, cmd: PathCommand) {
        if let Some(v) = self.vertices.get_mut(idx) {
            v.cmd = cmd;
        }
    }
    /// Exchange vertices, coordinates and commands, `i` and `j`
    pub fn swap_vertices(&mut self, i: usize, j: usize) {
        self.vertices.swap(i, j);
    }

    /// Orientation of the polygon made by vertices `start .. end`
    ///
    /// Uses the signed area (shoelace formula); a negative area is clockwise
    pub fn perceive_polygon_orientation(&self, start: usize, end: usize) -> PathOrientation {
        let np = end - start;
        let mut area = 0.0;
        for i in 0 .. np {
            let v1 = &self.vertices[start + i];
            let v2 = &self.vertices[start + (i + 1) % np];
            area += v1.x * v2.y - v1.y * v2.x;
        }
        if area < 0.0 {
            PathOrientation::Clockwise
        } else {
            PathOrientation::CounterClockwise
        }
    }
    /// Reverse vertices `start .. end` in place
    ///
    /// Commands are rotated so the first command (usually move_to) lands on
    /// the new first vertex
    pub fn invert_polygon(&mut self, start: usize, end: usize) {
        if end <= start + 1 {
            return;
        }
        let first = self.vertices[start].cmd;
        let end = end - 1;
        for i in start .. end {
            self.vertices[i].cmd = self.vertices[i+1].cmd;
        }
        self.vertices[end].cmd = first;
        self.vertices[start ..= end].reverse();
    }
    /// Find the polygon at or after `start`, returning its vertex range
    fn polygon_range(&self, start: usize) -> (usize, usize) {
        let n = self.total_vertices();
        let mut start = start;
        while start < n && ! self.vertices[start].cmd.is_vertex() {
            start += 1;
        }
        while start + 1 < n &&
            self.vertices[start].cmd.is_move_to() &&
            self.vertices[start+1].cmd.is_move_to() {
                start += 1;
            }
        let mut end = start + 1;
        while end < n && ! self.vertices[end].cmd.is_next_poly() {
            end += 1;
        }
        (start, end)
    }
    /// Reverse the polygon starting at or after `start`
    pub fn invert_polygon_at(&mut self, start: usize) {
        let (start, end) = self.polygon_range(start);
        if end <= self.total_vertices() {
            self.invert_polygon(start, end);
        }
    }
    /// Give the polygon at or after `start` orientation `o`
    ///
    /// Returns the index following the polygon
    pub fn arrange_polygon_orientation(&mut self, start: usize, o: PathOrientation) -> usize {
        let (start, mut end) = self.polygon_range(start);
        if end > self.total_vertices() {
            return self.total_vertices();
        }
        if end - start > 2 && self.perceive_polygon_orientation(start, end) != o {
            self.invert_polygon(start, end);
            while end < self.total_vertices() && self.vertices[end].cmd.is_end_poly() {
                let cmd = self.vertices[end].cmd.with_orientation(o);
                self.vertices[end].cmd = cmd;
                end += 1;
            }
        }
        end
    }
    /// Give every polygon of the path starting at `start` orientation `o`
    ///
    /// Returns the index of the next path
    pub fn arrange_orientations(&mut self, start: usize, o: PathOrientation) -> usize {
        let mut start = start;
        while start < self.total_vertices() {
            start = self.arrange_polygon_orientation(start, o);
            if self.command(start).is_stop() {
                start += 1;
                break;
            }
        }
        start
    }
    /// Give every polygon of every path orientation `o`
    pub fn arrange_orientations_all_paths(&mut self, o: PathOrientation) {
        let mut start = 0;
        while start < self.total_vertices() {
            start = self.arrange_orientations(start, o);
        }
        debug!("arrange orientations: {} vertices to {:?}", self.total_vertices(), o);
    }
    /// Mirror vertices horizontally within `x1` to `x2`
    pub fn flip_x(&mut self, x1: f64, x2: f64) {
        for v in self.vertices.iter_mut().filter(|v| v.cmd.is_vertex()) {
            v.x = x2 - v.x + x1;
        }
    }
    /// Mirror vertices vertically within `y1` to `y2`
    pub fn flip_y(&mut self, y1: f64, y2: f64) {
        for v in self.vertices.iter_mut().filter(|v| v.cmd.is_vertex()) {
            v.y = y2 - v.y + y1;
        }
    }
    /// Translate the path starting at `path_id`
    pub fn translate(&mut self, dx: f64, dy: f64, path_id: usize) {
        let tail = self.vertices.iter_mut().skip(path_id);
        for v in tail.take_while(|v| ! v.cmd.is_stop()) {
            if v.cmd.is_vertex() {
                v.x += dx;
                v.y += dy;
            }
        }
    }
    /// Translate every path
    pub fn translate_all_paths(&mut self, dx: f64, dy: f64) {
        for v in self.vertices.iter_mut().filter(|v| v.cmd.is_vertex()) {
            v.x += dx;
            v.y += dy;
        }
    }
    /// Transform the path starting at `path_id`
    pub fn transform(&mut self, trans: &Transform, path_id: usize) {
        let tail = self.vertices.iter_mut().skip(path_id);
        for v in tail.take_while(|v| ! v.cmd.is_stop()) {
            if v.cmd.is_vertex() {
                let (x,y) = trans.transform(v.x, v.y);
                v.x = x;
                v.y = y;
            }
        }
    }
    /// Transform every path
    pub fn transform_all_paths(&mut self, trans: &Transform) {
        for v in self.vertices.iter_mut().filter(|v| v.cmd.is_vertex()) {
            let (x,y) = trans.transform(v.x, v.y);
            v.x = x;
            v.y = y;
        }
    }
    /// Append path `path_id` of `vs`, continuing the current polygon
    ///
    /// A leading move_to becomes a line_to, or is dropped if it coincides
    /// with the last vertex. Later move_to commands become line_to.
    pub fn join_path<VS: VertexSource>(&mut self, vs: &mut VS, path_id: usize) {
        vs.rewind(path_id);
        let first = match vs.vertex() {
            None => return,
            Some(v) => v,
        };
        if first.cmd.is_vertex() {
            let mut cmd = first.cmd;
            match self.last_vertex() {
                Some(last) if last.cmd.is_vertex() => {
                    if calc_distance(first.x, first.y, last.x, last.y) > VERTEX_DIST_EPSILON {
                        if cmd.is_move_to() {
                            cmd = PathCommand::LineTo;
                        }
                        self.add_vertex(first.x, first.y, cmd);
                    }
                },
                last => {
                    let last_cmd = last.map(|v| v.cmd).unwrap_or(PathCommand::Stop);
                    if last_cmd.is_stop() {
                        cmd = PathCommand::MoveTo;
                    } else if cmd.is_move_to() {
                        cmd = PathCommand::LineTo;
                    }
                    self.add_vertex(first.x, first.y, cmd);
                }
            }
        }
        while let Some(v) = vs.vertex() {
            let cmd = if v.cmd.is_move_to() { PathCommand::LineTo } else { v.cmd };
            self.add_vertex(v.x, v.y, cmd);
        }
    }
    /// Append path `path_id` of `vs` unchanged
    pub fn concat_path<VS: VertexSource>(&mut self, vs: &mut VS, path_id: usize) {
        vs.rewind(path_id);
        while let Some(v) = vs.vertex() {
            self.add_vertex(v.x, v.y, v.cmd);
        }
    }

    /// Serialize to bytes
    ///
    /// Layout, little-endian: `[count: u32][count x (x: f32, y: f32)][count x cmd: u32]`
    pub fn serialize(&self) -> Vec<u8> {
        let n = self.vertices.len();
        let mut buf = Vec::with_capacity(4 + n * 12);
        buf.extend_from_slice(&(n as u32).to_le_bytes());
        for v in &self.vertices {
            buf.extend_from_slice(&(v.x as f32).to_le_bytes());
            buf.extend_from_slice(&(v.y as f32).to_le_bytes());
        }
        for v in &self.vertices {
            buf.extend_from_slice(&v.cmd.to_u32().to_le_bytes());
        }
        buf
    }
    /// Replace the contents of the path from serialized bytes
    ///
    /// See [serialize](#method.serialize) for the layout
    pub fn serialize_from(&mut self, buf: &[u8]) -> Result<(), Error> {
        let n = read_u32(buf, 0)? as usize;
        let needed = 4 + n * 12;
        if buf.len() < needed {
            return Err(Error::Truncated { needed, available: buf.len() });
        }
        let mut vertices = Vec::with_capacity(n);
        let cmds = 4 + n * 8;
        for i in 0 .. n {
            let x = f32::from_bits(read_u32(buf, 4 + i * 8)?);
            let y = f32::from_bits(read_u32(buf, 8 + i * 8)?);
            let word = read_u32(buf, cmds + i * 4)?;
            let cmd = PathCommand::from_u32(word).ok_or(Error::BadCommand(word))?;
            vertices.push(Vertex::new(f64::from(x), f64::from(y), cmd));
        }
        self.vertices = vertices;
        self.iterator = 0;
        Ok(())
    }
    /// Create a path from serialized bytes
    pub fn deserialize(buf: &[u8]) -> Result<Path, Error> {
        let mut path = Path::new();
        path.serialize_from(buf)?;
        Ok(path)
    }
}

fn read_u32(buf: &[u8], offset: usize) -> Result<u32, Error> {
    let bytes = buf.get(offset .. offset + 4)
        .ok_or(Error::Truncated { needed: offset + 4, available: buf.len() })?;
    let mut word = [0u8; 4];
    word.copy_from_slice(bytes);
    Ok(u32::from_le_bytes(word))
}

/// Bounding rectangle of the vertices of path `path_id`
///
/// Returns None if the path has no vertices
pub fn bounding_rect<VS: VertexSource>(vs: &mut VS, path_id: usize) -> Option<Rectangle<f64>> {
    vs.rewind(path_id);
    let mut r : Option<Rectangle<f64>> = None;
    while let Some(v) = vs.vertex() {
        if ! v.cmd.is_vertex() {
            continue;
        }
        match r {
            None => r = Some(Rectangle::new(v.x, v.y, v.x, v.y)),
            Some(ref mut r) => r.expand(v.x, v.y),
        }
    }
    r
}
