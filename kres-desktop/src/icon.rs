use image::{Rgba, RgbaImage};

/// Side length of the tray icon bitmap.
pub const ICON_SIZE: u32 = 32;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const BEZEL: Rgba<u8> = Rgba([0x2b, 0x2b, 0x2b, 0xff]);
const SCREEN: Rgba<u8> = Rgba([0x3d, 0x8b, 0xe0, 0xff]);

/// A small monitor glyph, drawn on a 32-unit grid and scaled to `size`.
pub fn render(size: u32) -> RgbaImage {
    let unit = size as f32 / 32.0;

    RgbaImage::from_fn(size, size, |x, y| {
        let x = (x as f32 + 0.5) / unit;
        let y = (y as f32 + 0.5) / unit;
        let within = |x0: f32, y0: f32, x1: f32, y1: f32| x >= x0 && x < x1 && y >= y0 && y < y1;

        if within(4.0, 6.0, 28.0, 20.0) {
            SCREEN
        } else if within(2.0, 4.0, 30.0, 22.0)
            || within(14.0, 22.0, 18.0, 26.0)
            || within(9.0, 26.0, 23.0, 28.0)
        {
            BEZEL
        } else {
            CLEAR
        }
    })
}
