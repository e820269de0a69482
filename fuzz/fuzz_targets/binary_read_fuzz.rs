//! Binary read fuzz target: feed arbitrary bytes to `binary_read` for a structure with a
//! length-driven dynamic array and a bounded 2-D array.
//! Reading must not panic; it returns the structure or an Io / CapacityOverflow / Allocation error.
//! Build with: cargo fuzz run binary_read_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]
#![cfg_attr(not(fuzzing), allow(dead_code))]

use idlattr::{
    AutomaticArrayAttribute, Attribute, DynamicArrayAttribute, MetaInfo, Owner, Result, Structure, Visitor,
    VisitorMut,
};

const SIDE_MAX: usize = 64;

pub struct FrameKey(());
const KEY: FrameKey = FrameKey(());

pub struct Frame {
    count: Attribute<u16>,
    samples: DynamicArrayAttribute<Frame, i32, 1>,
    side: Attribute<u8>,
    tiles: AutomaticArrayAttribute<Frame, u8, 2, SIDE_MAX>,
    gain: Attribute<f64>,
}

const COUNT: MetaInfo = MetaInfo::raw_scalar("ushort", "count");
const SAMPLES: MetaInfo = MetaInfo::raw_array("int", "samples");
const SIDE: MetaInfo = MetaInfo::raw_scalar("byte", "side");
const TILES: MetaInfo = MetaInfo::raw_array("byte", "tiles");
const GAIN: MetaInfo = MetaInfo::raw_scalar("double", "gain");

fn frame_count(f: &Frame) -> usize {
    *f.count.get() as usize
}

fn frame_side(f: &Frame) -> usize {
    *f.side.get() as usize
}

impl Owner for Frame {
    type Key = FrameKey;
}

impl Frame {
    fn new() -> Result<Self> {
        let mut f = Frame {
            count: Attribute::default(),
            samples: DynamicArrayAttribute::new([frame_count]),
            side: Attribute::default(),
            tiles: AutomaticArrayAttribute::new([frame_side, frame_side]),
            gain: Attribute::default(),
        };
        f.reshape_samples()?;
        f.reshape_tiles()?;
        Ok(f)
    }

    fn reshape_samples(&mut self) -> Result<()> {
        DynamicArrayAttribute::reshape(self, &KEY, |f| &mut f.samples)
    }

    fn reshape_tiles(&mut self) -> Result<()> {
        AutomaticArrayAttribute::reshape(self, &KEY, |f| &mut f.tiles)
    }
}

impl Structure for Frame {
    const TYPE_NAME: &'static str = "Frame";

    fn accept<V: Visitor>(&self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar(&COUNT, self, self.count.get())?;
        v.visit_raw_array(&SAMPLES, self, self.samples.checked_slice(self)?)?;
        v.visit_raw_scalar(&SIDE, self, self.side.get())?;
        v.visit_raw_array(&TILES, self, self.tiles.checked_slice(self)?)?;
        v.visit_raw_scalar(&GAIN, self, self.gain.get())
    }

    fn accept_and_init<V: VisitorMut>(&mut self, v: &mut V) -> Result<()> {
        v.visit_raw_scalar_mut::<Self, _>(&COUNT, self.count.get_mut())?;
        self.reshape_samples()?;
        v.visit_raw_array_mut::<Self, _>(&SAMPLES, self.samples.as_mut_slice())?;
        v.visit_raw_scalar_mut::<Self, _>(&SIDE, self.side.get_mut())?;
        self.reshape_tiles()?;
        v.visit_raw_array_mut::<Self, _>(&TILES, self.tiles.as_mut_slice())?;
        v.visit_raw_scalar_mut::<Self, _>(&GAIN, self.gain.get_mut())
    }
}

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let mut frame = match Frame::new() {
        Ok(f) => f,
        Err(_) => return,
    };
    let mut cursor = std::io::Cursor::new(data);
    if idlattr::binary_read(&mut frame, &mut cursor).is_ok() {
        let consumed = cursor.position() as usize;
        assert!(consumed <= data.len());
        assert!(frame.tiles.len() <= SIDE_MAX);
        // What was read writes back to the same prefix.
        let again = idlattr::to_bytes(&frame).expect("write to Vec");
        assert_eq!(&again[..], &data[..consumed]);
        let _ = idlattr::to_pretty_string(&frame);
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run binary_read_fuzz");
}
