//! Structures written the way the IDL code generator emits them.
//!
//! ```text
//! struct Point  { int x; int y; }
//! struct Header { readonly uint id; byte flags; }
//! struct Matrix { ushort rows; ushort cols; double values[rows][cols]; }
//! struct Tile   { byte id; int cells[3][3]; byte mask[4] max 8; }
//! struct Packet {
//!   Header header;
//!   Point origin;
//!   uint count;
//!   short samples[count];
//!   byte path_len;
//!   Point path[path_len];
//!   byte side;
//!   byte grid[side][side] max 16;
//!   bool valid;
//!   float scale;
//! }
//! ```

#![allow(dead_code)]

use idlattr::{
    Attribute, AutomaticArrayAttribute, DynamicArrayAttribute, MetaInfo, Owner, ReadOnlyAttribute, Result,
    Structure, Visitor, VisitorMut,
};

// ---------------------------------------------------------------- Point

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Point {
    pub x: Attribute<i32>,
    pub y: Attribute<i32>,
}

const POINT_X: MetaInfo = MetaInfo::raw_scalar("int", "x");
const POINT_Y: MetaInfo = MetaInfo::raw_scalar("int", "y");

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point {
            x: Attribute::new(x),
            y: Attribute::new(y),
        }
    }
}

impl Structure for Point {
    const TYPE_NAME: &'static str = "Point";

    fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar(&POINT_X, self, self.x.get())?;
        v.visit_raw_scalar(&POINT_Y, self, self.y.get())
    }

    fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar_mut::<Self, _>(&POINT_X, self.x.get_mut())?;
        v.visit_raw_scalar_mut::<Self, _>(&POINT_Y, self.y.get_mut())
    }
}

// ---------------------------------------------------------------- Header

pub struct HeaderKey(());
const HEADER_KEY: HeaderKey = HeaderKey(());

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub id: ReadOnlyAttribute<Header, u32>,
    pub flags: Attribute<u8>,
}

const HEADER_ID: MetaInfo = MetaInfo::raw_scalar("uint", "id");
const HEADER_FLAGS: MetaInfo = MetaInfo::raw_scalar("byte", "flags");

impl Owner for Header {
    type Key = HeaderKey;
}

impl Default for Header {
    fn default() -> Self {
        Header::new(0, 0)
    }
}

impl Header {
    pub fn new(id: u32, flags: u8) -> Self {
        Header {
            id: ReadOnlyAttribute::new(&HEADER_KEY, id),
            flags: Attribute::new(flags),
        }
    }

    pub fn renumber(&mut self, id: u32) {
        self.id.set(&HEADER_KEY, id);
    }
}

impl Structure for Header {
    const TYPE_NAME: &'static str = "Header";

    fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar(&HEADER_ID, self, self.id.get())?;
        v.visit_raw_scalar(&HEADER_FLAGS, self, self.flags.get())
    }

    fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar_mut::<Self, _>(&HEADER_ID, self.id.get_mut(&HEADER_KEY))?;
        v.visit_raw_scalar_mut::<Self, _>(&HEADER_FLAGS, self.flags.get_mut())
    }
}

// ---------------------------------------------------------------- Matrix

pub struct MatrixKey(());
const MATRIX_KEY: MatrixKey = MatrixKey(());

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    pub rows: Attribute<u16>,
    pub cols: Attribute<u16>,
    pub values: DynamicArrayAttribute<Matrix, f64, 2>,
}

const MATRIX_ROWS: MetaInfo = MetaInfo::raw_scalar("ushort", "rows");
const MATRIX_COLS: MetaInfo = MetaInfo::raw_scalar("ushort", "cols");
const MATRIX_VALUES: MetaInfo = MetaInfo::raw_array("double", "values");

fn matrix_rows(m: &Matrix) -> usize {
    *m.rows.get() as usize
}

fn matrix_cols(m: &Matrix) -> usize {
    *m.cols.get() as usize
}

impl Owner for Matrix {
    type Key = MatrixKey;
}

impl Default for Matrix {
    fn default() -> Self {
        let mut m = Matrix {
            rows: Attribute::default(),
            cols: Attribute::default(),
            values: DynamicArrayAttribute::new([matrix_rows, matrix_cols]),
        };
        m.reshape_arrays().expect("default matrix sizes fit");
        m
    }
}

impl Matrix {
    pub fn new(rows: u16, cols: u16) -> Result<Self> {
        let mut m = Matrix::default();
        m.rows.set(rows);
        m.cols.set(cols);
        m.reshape_arrays()?;
        Ok(m)
    }

    pub fn reshape_arrays(&mut self) -> Result<()> {
        DynamicArrayAttribute::reshape(self, &MATRIX_KEY, |m| &mut m.values)
    }

    pub fn set_values(&mut self, values: Vec<f64>) -> Result<()> {
        DynamicArrayAttribute::assign(self, |m| &mut m.values, values)
    }
}

impl Structure for Matrix {
    const TYPE_NAME: &'static str = "Matrix";

    fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar(&MATRIX_ROWS, self, self.rows.get())?;
        v.visit_raw_scalar(&MATRIX_COLS, self, self.cols.get())?;
        v.visit_raw_array(&MATRIX_VALUES, self, self.values.checked_slice(self)?)
    }

    fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar_mut::<Self, _>(&MATRIX_ROWS, self.rows.get_mut())?;
        v.visit_raw_scalar_mut::<Self, _>(&MATRIX_COLS, self.cols.get_mut())?;
        self.reshape_arrays()?;
        v.visit_raw_array_mut::<Self, _>(&MATRIX_VALUES, self.values.as_mut_slice())
    }
}

// ---------------------------------------------------------------- Tile

pub struct TileKey(());
const TILE_KEY: TileKey = TileKey(());

pub const TILE_MASK_MAX: usize = 8;

/// Fixed-dimension arrays: every size function is a constant.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub id: Attribute<u8>,
    pub cells: DynamicArrayAttribute<Tile, i32, 2>,
    pub mask: AutomaticArrayAttribute<Tile, u8, 1, TILE_MASK_MAX>,
}

const TILE_ID: MetaInfo = MetaInfo::raw_scalar("byte", "id");
const TILE_CELLS: MetaInfo = MetaInfo::raw_array("int", "cells");
const TILE_MASK: MetaInfo = MetaInfo::raw_array("byte", "mask");

fn tile_three(_: &Tile) -> usize {
    3
}

fn tile_four(_: &Tile) -> usize {
    4
}

impl Owner for Tile {
    type Key = TileKey;
}

impl Default for Tile {
    fn default() -> Self {
        let mut t = Tile {
            id: Attribute::default(),
            cells: DynamicArrayAttribute::new([tile_three, tile_three]),
            mask: AutomaticArrayAttribute::new([tile_four]),
        };
        t.reshape_arrays().expect("default tile sizes fit");
        t
    }
}

impl Tile {
    pub fn reshape_arrays(&mut self) -> Result<()> {
        DynamicArrayAttribute::reshape(self, &TILE_KEY, |t| &mut t.cells)?;
        AutomaticArrayAttribute::reshape(self, &TILE_KEY, |t| &mut t.mask)
    }

    pub fn set_cells(&mut self, values: Vec<i32>) -> Result<()> {
        DynamicArrayAttribute::assign(self, |t| &mut t.cells, values)
    }

    pub fn set_mask(&mut self, values: &[u8]) -> Result<()> {
        AutomaticArrayAttribute::assign(self, |t| &mut t.mask, values)
    }
}

impl Structure for Tile {
    const TYPE_NAME: &'static str = "Tile";

    fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar(&TILE_ID, self, self.id.get())?;
        v.visit_raw_array(&TILE_CELLS, self, self.cells.checked_slice(self)?)?;
        v.visit_raw_array(&TILE_MASK, self, self.mask.checked_slice(self)?)
    }

    fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar_mut::<Self, _>(&TILE_ID, self.id.get_mut())?;
        self.reshape_arrays()?;
        v.visit_raw_array_mut::<Self, _>(&TILE_CELLS, self.cells.as_mut_slice())?;
        v.visit_raw_array_mut::<Self, _>(&TILE_MASK, self.mask.as_mut_slice())
    }
}

// ---------------------------------------------------------------- Packet

pub struct PacketKey(());
const PACKET_KEY: PacketKey = PacketKey(());

pub const GRID_MAX: usize = 16;

#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub header: Attribute<Header>,
    pub origin: Attribute<Point>,
    pub count: Attribute<u32>,
    pub samples: DynamicArrayAttribute<Packet, i16, 1>,
    pub path_len: Attribute<u8>,
    pub path: DynamicArrayAttribute<Packet, Point, 1>,
    pub side: Attribute<u8>,
    pub grid: AutomaticArrayAttribute<Packet, u8, 2, GRID_MAX>,
    pub valid: Attribute<bool>,
    pub scale: Attribute<f32>,
}

const PACKET_HEADER: MetaInfo = MetaInfo::structured_scalar("Header", "header");
const PACKET_ORIGIN: MetaInfo = MetaInfo::structured_scalar("Point", "origin");
const PACKET_COUNT: MetaInfo = MetaInfo::raw_scalar("uint", "count");
const PACKET_SAMPLES: MetaInfo = MetaInfo::raw_array("short", "samples");
const PACKET_PATH_LEN: MetaInfo = MetaInfo::raw_scalar("byte", "path_len");
const PACKET_PATH: MetaInfo = MetaInfo::structured_array("Point", "path");
const PACKET_SIDE: MetaInfo = MetaInfo::raw_scalar("byte", "side");
const PACKET_GRID: MetaInfo = MetaInfo::raw_array("byte", "grid");
const PACKET_VALID: MetaInfo = MetaInfo::raw_scalar("bool", "valid");
const PACKET_SCALE: MetaInfo = MetaInfo::raw_scalar("float", "scale");

fn packet_samples_len(p: &Packet) -> usize {
    *p.count.get() as usize
}

fn packet_path_len(p: &Packet) -> usize {
    *p.path_len.get() as usize
}

fn packet_side(p: &Packet) -> usize {
    *p.side.get() as usize
}

impl Owner for Packet {
    type Key = PacketKey;
}

impl Default for Packet {
    fn default() -> Self {
        let mut p = Packet {
            header: Attribute::default(),
            origin: Attribute::default(),
            count: Attribute::default(),
            samples: DynamicArrayAttribute::new([packet_samples_len]),
            path_len: Attribute::default(),
            path: DynamicArrayAttribute::new([packet_path_len]),
            side: Attribute::default(),
            grid: AutomaticArrayAttribute::new([packet_side, packet_side]),
            valid: Attribute::default(),
            scale: Attribute::default(),
        };
        p.reshape_arrays().expect("default packet sizes fit");
        p
    }
}

impl Packet {
    pub fn reshape_samples(&mut self) -> Result<()> {
        DynamicArrayAttribute::reshape(self, &PACKET_KEY, |p| &mut p.samples)
    }

    pub fn reshape_path(&mut self) -> Result<()> {
        DynamicArrayAttribute::reshape(self, &PACKET_KEY, |p| &mut p.path)
    }

    pub fn reshape_grid(&mut self) -> Result<()> {
        AutomaticArrayAttribute::reshape(self, &PACKET_KEY, |p| &mut p.grid)
    }

    pub fn reshape_arrays(&mut self) -> Result<()> {
        self.reshape_samples()?;
        self.reshape_path()?;
        self.reshape_grid()
    }

    pub fn set_samples(&mut self, values: Vec<i16>) -> Result<()> {
        DynamicArrayAttribute::assign(self, |p| &mut p.samples, values)
    }

    pub fn set_path(&mut self, values: Vec<Point>) -> Result<()> {
        DynamicArrayAttribute::assign(self, |p| &mut p.path, values)
    }

    pub fn set_grid(&mut self, values: &[u8]) -> Result<()> {
        AutomaticArrayAttribute::assign(self, |p| &mut p.grid, values)
    }
}

impl Structure for Packet {
    const TYPE_NAME: &'static str = "Packet";

    fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
        v.visit_structured_scalar(&PACKET_HEADER, self, self.header.get())?;
        v.visit_structured_scalar(&PACKET_ORIGIN, self, self.origin.get())?;
        v.visit_raw_scalar(&PACKET_COUNT, self, self.count.get())?;
        v.visit_raw_array(&PACKET_SAMPLES, self, self.samples.checked_slice(self)?)?;
        v.visit_raw_scalar(&PACKET_PATH_LEN, self, self.path_len.get())?;
        v.visit_structured_array(&PACKET_PATH, self, self.path.checked_slice(self)?)?;
        v.visit_raw_scalar(&PACKET_SIDE, self, self.side.get())?;
        v.visit_raw_array(&PACKET_GRID, self, self.grid.checked_slice(self)?)?;
        v.visit_raw_scalar(&PACKET_VALID, self, self.valid.get())?;
        v.visit_raw_scalar(&PACKET_SCALE, self, self.scale.get())
    }

    fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
        v.visit_structured_scalar_mut::<Self, _>(&PACKET_HEADER, self.header.get_mut())?;
        v.visit_structured_scalar_mut::<Self, _>(&PACKET_ORIGIN, self.origin.get_mut())?;
        v.visit_raw_scalar_mut::<Self, _>(&PACKET_COUNT, self.count.get_mut())?;
        self.reshape_samples()?;
        v.visit_raw_array_mut::<Self, _>(&PACKET_SAMPLES, self.samples.as_mut_slice())?;
        v.visit_raw_scalar_mut::<Self, _>(&PACKET_PATH_LEN, self.path_len.get_mut())?;
        self.reshape_path()?;
        v.visit_structured_array_mut::<Self, _>(&PACKET_PATH, self.path.as_mut_slice())?;
        v.visit_raw_scalar_mut::<Self, _>(&PACKET_SIDE, self.side.get_mut())?;
        self.reshape_grid()?;
        v.visit_raw_array_mut::<Self, _>(&PACKET_GRID, self.grid.as_mut_slice())?;
        v.visit_raw_scalar_mut::<Self, _>(&PACKET_VALID, self.valid.get_mut())?;
        v.visit_raw_scalar_mut::<Self, _>(&PACKET_SCALE, self.scale.get_mut())
    }
}

/// A packet touching every field kind: nested structures, dynamic raw and structured arrays,
/// a bounded 2-D array.
pub fn sample_packet() -> Packet {
    let mut p = Packet::default();
    p.header.set(Header::new(0xDEAD_BEEF, 0x5A));
    p.origin.set(Point::new(3, -4));
    p.count.set(5);
    p.set_samples(vec![1, -2, 300, -32768, 32767]).expect("samples");
    p.path_len.set(3);
    p.set_path(vec![Point::new(0, 0), Point::new(10, 20), Point::new(-7, 7)]).expect("path");
    p.side.set(3);
    p.set_grid(&[1, 2, 3, 4, 5, 6, 7, 8, 9]).expect("grid");
    p.valid.set(true);
    p.scale.set(0.25);
    p
}

/// Declaration-order field paths of [`sample_packet`], depth first.
pub const SAMPLE_PACKET_PATHS: &[&str] = &[
    "header",
    "header.id",
    "header.flags",
    "origin",
    "origin.x",
    "origin.y",
    "count",
    "samples",
    "path_len",
    "path",
    "path[0].x",
    "path[0].y",
    "path[1].x",
    "path[1].y",
    "path[2].x",
    "path[2].y",
    "side",
    "grid",
    "valid",
    "scale",
];
