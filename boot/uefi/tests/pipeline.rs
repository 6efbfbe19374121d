//! One boot frame end to end against the test doubles

use helix_uefi_gfx::font::{self, GLYPH_HEIGHT, GLYPH_WIDTH};
use helix_uefi_gfx::graphics::blend_channel;
use helix_uefi_gfx::prelude::*;
use helix_uefi_gfx::testing::{MockDisplay, MockMemory};

const BACKGROUND: u32 = 0x00FF_0000;
const WHITE: u32 = 0x00FF_FFFF;

fn three_modes() -> MockDisplay {
    MockDisplay::new(&[
        ModeInfo::new(800, 600, 800, ColorLayout::FixedBgr),
        ModeInfo::new(1920, 1080, 1920, ColorLayout::FixedBgr),
        ModeInfo::new(640, 480, 640, ColorLayout::FixedBgr),
    ])
}

#[test_log::test]
fn test_full_frame() {
    let mut display = three_modes();
    let mut memory = MockMemory::new();

    let mode = select_best_mode(Some(&mut display));
    assert_eq!(mode.index, 1);
    assert_eq!(display.current_mode(), Some(1));

    let mut frame = Backbuffer::allocate(mode, &mut memory).unwrap();
    fill(&mut frame, BACKGROUND);
    draw_glyph(&mut frame, mode.format, b'A', WHITE, 0, 0, 1);

    let mut changed = 0;
    for y in 0..1080 {
        for x in 0..1920 {
            let pixel = frame.pixel(x, y).unwrap();
            let coverage = if x < GLYPH_WIDTH && y < GLYPH_HEIGHT {
                font::ASCII.coverage(b'A', x, y).unwrap()
            } else {
                0
            };

            if coverage == 0 {
                assert_eq!(pixel, BACKGROUND, "pixel ({}, {})", x, y);
                continue;
            }

            changed += 1;
            let red = u32::from(blend_channel(0xFF, 0xFF, coverage));
            let other = u32::from(blend_channel(0, 0xFF, coverage));
            assert_eq!(pixel, (red << 16) | (other << 8) | other, "pixel ({}, {})", x, y);
        }
    }
    assert!(changed > 0);

    blit(Some(&frame), Some(&mut display));

    assert_eq!(display.blits.len(), 1);
    let presented = &display.blits[0];
    assert_eq!((presented.width, presented.height, presented.stride), (1920, 1080, 1920));
    assert_eq!(presented.pixels, frame.pixels());

    frame.release();
    assert_eq!(memory.requests, [1920 * 1080 * 4]);
    assert_eq!(memory.frees, 1);
    assert_eq!(memory.live(), 0);
}

#[test_log::test]
fn test_allocation_failure_skips_frame() {
    let mut display = three_modes();
    let mut memory = MockMemory::with_budget(1024);

    let mode = select_best_mode(Some(&mut display));

    match Backbuffer::allocate(mode, &mut memory) {
        Ok(_) => panic!("allocation should not fit the budget"),
        Err(err) => {
            assert_eq!(err.size, 1920 * 1080 * 4);
            assert_eq!(err.cause, Error::OutOfResources);
        }
    }

    // Nothing to present without a backbuffer
    blit(None, Some(&mut display));
    release(None);

    assert!(display.blits.is_empty());
    assert_eq!(memory.frees, 0);
    assert_eq!(memory.live(), 0);
}

#[test_log::test]
fn test_headless_frame() {
    let mut memory = MockMemory::new();

    let mode = select_best_mode(None);
    assert!(mode.is_zero());

    // A zero mode still yields a (zero-sized) buffer; drawing into it is a no-op
    let mut frame = Backbuffer::allocate(mode, &mut memory).unwrap();
    fill(&mut frame, BACKGROUND);
    draw_glyph(&mut frame, mode.format, b'A', WHITE, 0, 0, 4);
    blit(Some(&frame), None);
    release(Some(frame));

    assert_eq!(memory.requests, [0]);
    assert_eq!(memory.frees, 1);
}

#[test_log::test]
fn test_scaled_text_line() {
    let mut display = MockDisplay::new(&[ModeInfo::new(
        320,
        200,
        320,
        ColorLayout::BitMask { red: 0xFF, green: 0xFF00, blue: 0xFF_0000 },
    )]);
    let mut memory = MockMemory::new();

    let mode = select_best_mode(Some(&mut display));
    assert_eq!(mode.format, PixelFormat::new(0, 8, 16));

    let mut frame = Backbuffer::allocate(mode, &mut memory).unwrap();
    let background = mode.format.pack(0, 0, 0x40);
    fill(&mut frame, background);

    for (i, &code) in b"HELIX".iter().enumerate() {
        let x = 8 + i as i32 * (GLYPH_WIDTH as i32 * 2);
        draw_glyph(&mut frame, mode.format, code, mode.format.pack(0xFF, 0xFF, 0xFF), x, 8, 2);
    }

    let touched = frame.pixels().iter().filter(|&&p| p != background).count();
    assert!(touched > 0);
    // Nothing drawn outside the text line
    for y in (8 + 2 * GLYPH_HEIGHT)..200 {
        for x in 0..320 {
            assert_eq!(frame.pixel(x, y), Some(background));
        }
    }

    blit(Some(&frame), Some(&mut display));
    assert_eq!(display.blits.len(), 1);
}
