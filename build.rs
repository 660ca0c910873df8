//! This build script generates the compiled-in bitmap tables (`bitmaps.rs`)
//! and embeds the build-time UTC epoch (`utc.rs`) used by the simulator to
//! seed its wall clock.

use std::{env, fs::File, io::Write, path::PathBuf};

/// Classic 5x7 digit glyphs, one bit row per byte (MSB unused).
const DIGIT_FONT: [[u8; 7]; 10] = [
    [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
    [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
    [0b01110, 0b10001, 0b00001, 0b00010, 0b00100, 0b01000, 0b11111],
    [0b11111, 0b00010, 0b00100, 0b00010, 0b00001, 0b10001, 0b01110],
    [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
    [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
    [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
    [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
    [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
];

/// Charging bolt, 16x16, scaled x2 into the tile format.
const ART_CHARGING: [&str; 16] = [
    "................",
    "........###.....",
    ".......###......",
    "......###.......",
    ".....####.......",
    "....####........",
    "...#########....",
    "....#######.....",
    ".....######.....",
    "........###.....",
    ".......###......",
    "......###.......",
    ".....###........",
    "....###.........",
    "...###..........",
    "................",
];

/// Bluetooth rune with a strike-through, 16x16, scaled x2.
const ART_NO_BLUETOOTH: [&str; 16] = [
    "#......##.......",
    ".#.....#.#......",
    "..#....#..#.....",
    "...#...#...#....",
    "....#..#..#.....",
    ".....#.#.#......",
    "......###.......",
    ".......#........",
    "......###.......",
    ".....#.#.#......",
    "....#..#..#.....",
    "...#...#...#....",
    "..#....#..#.....",
    ".#.....#.#......",
    "#......##.......",
    "................",
];

/// In-memory 1-bpp raster, packed into MSB-first byte rows on emit.
struct Raster {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Raster {
    fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width * height],
        }
    }

    fn set(&mut self, x: usize, y: usize, on: bool) {
        self.bits[y * self.width + x] = on;
    }

    /// Pack into byte rows, MSB first, each row padded to a whole byte.
    fn packed(&self) -> Vec<u8> {
        let row_bytes = (self.width + 7) / 8;
        let mut out = vec![0u8; row_bytes * self.height];
        for y in 0..self.height {
            for x in 0..self.width {
                if self.bits[y * self.width + x] {
                    out[y * row_bytes + x / 8] |= 0x80 >> (x % 8);
                }
            }
        }
        out
    }

    /// `ImageData` struct literal for inclusion in `resources.rs`.
    fn literal(&self) -> String {
        let bytes: Vec<String> = self.packed().iter().map(|b| format!("{:#04x}", b)).collect();
        format!(
            "ImageData {{ width: {}, data: &[{}] }}",
            self.width,
            bytes.join(", ")
        )
    }
}

/// Scale a 5x7 glyph by an integer factor.
fn digit(value: usize, scale: usize) -> Raster {
    let mut r = Raster::new(5 * scale, 7 * scale);
    for row in 0..7 {
        for col in 0..5 {
            if DIGIT_FONT[value][row] >> (4 - col) & 1 == 1 {
                for dy in 0..scale {
                    for dx in 0..scale {
                        r.set(col * scale + dx, row * scale + dy, true);
                    }
                }
            }
        }
    }
    r
}

/// 32x32 decorative tile. Five pattern families, four pitches each,
/// so all twenty tiles come out distinct.
fn tile(index: usize) -> Raster {
    let mut r = Raster::new(32, 32);
    let family = index % 5;
    let pitch = index / 5 + 2;
    for y in 0..32 {
        for x in 0..32 {
            let on = match family {
                0 => (x / pitch + y / pitch) % 2 == 0,
                1 => (x + y) / pitch % 2 == 0,
                2 => x / pitch % 2 == 0,
                3 => y / pitch % 2 == 0,
                _ => x % (pitch + 1) == 0 && y % (pitch + 1) == 0,
            };
            let frame = x == 0 || y == 0 || x == 31 || y == 31;
            r.set(x, y, on || frame);
        }
    }
    r
}

/// Scale 16x16 string art by 2 into a 32x32 icon.
fn icon(art: &[&str; 16]) -> Raster {
    let mut r = Raster::new(32, 32);
    for (y, row) in art.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            if c == '#' {
                for dy in 0..2 {
                    for dx in 0..2 {
                        r.set(x * 2 + dx, y * 2 + dy, true);
                    }
                }
            }
        }
    }
    r
}

/// 144x168 backdrop: a 2px border and the rail the gauge slides along.
fn background() -> Raster {
    let mut r = Raster::new(144, 168);
    for y in 0..168 {
        for x in 0..144 {
            let border = x < 2 || y < 2 || x >= 142 || y >= 166;
            let rail = (95..=96).contains(&y) && (22..141).contains(&x) && x % 2 == 0;
            r.set(x, y, border || rail);
        }
    }
    r
}

/// 119x16 gauge bar, a plain dither fill.
fn gauge() -> Raster {
    let mut r = Raster::new(119, 16);
    for y in 0..16 {
        for x in 0..119 {
            r.set(x, y, (x + y) % 2 == 0);
        }
    }
    r
}

fn main() {
    let out = &PathBuf::from(env::var_os("OUT_DIR").unwrap());

    // create rs file with current UTC time
    File::create(out.join("utc.rs"))
        .unwrap()
        .write_fmt(format_args!(
            "const UTC_TIME: i64 = {:?};",
            chrono::offset::Local::now().timestamp()
        ))
        .unwrap();

    // Bitmap tables, included by `resources.rs`
    let mut f = File::create(out.join("bitmaps.rs")).unwrap();

    let hours: Vec<String> = (0..10).map(|d| digit(d, 4).literal()).collect();
    writeln!(f, "static HOUR_DIGITS: [ImageData; 10] = [{}];", hours.join(",\n")).unwrap();

    let minutes: Vec<String> = (0..10).map(|d| digit(d, 2).literal()).collect();
    writeln!(f, "static MINUTE_DIGITS: [ImageData; 10] = [{}];", minutes.join(",\n")).unwrap();

    let tiles: Vec<String> = (0..20).map(tile).map(|r| r.literal()).collect();
    writeln!(f, "static TILES: [ImageData; 20] = [{}];", tiles.join(",\n")).unwrap();

    writeln!(f, "static ICON_CHARGING: ImageData = {};", icon(&ART_CHARGING).literal()).unwrap();
    writeln!(f, "static ICON_NO_BLUETOOTH: ImageData = {};", icon(&ART_NO_BLUETOOTH).literal()).unwrap();
    writeln!(f, "static BACKGROUND: ImageData = {};", background().literal()).unwrap();
    writeln!(f, "static GAUGE: ImageData = {};", gauge().literal()).unwrap();

    println!("cargo:rerun-if-changed=build.rs");
}
