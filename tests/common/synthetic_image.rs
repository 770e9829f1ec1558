/// RGBA raster where every pixel is the neutral gray `value(x, y)`.
///
/// Neutral grays map to exactly the same luminance.
pub fn gray_rgba(width: usize, height: usize, value: impl Fn(usize, usize) -> u8) -> Vec<u8> {
    let mut img = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let v = value(x, y);
            img.extend_from_slice(&[v, v, v, 255]);
        }
    }
    img
}

/// Left columns black, the rest white.
pub fn vertical_step_rgba(width: usize, height: usize, split: usize) -> Vec<u8> {
    gray_rgba(width, height, |x, _| if x < split { 0 } else { 255 })
}

/// Per-pixel luminance noise in 0..64 from a fixed-seed LCG.
pub fn noise_rgba(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    let mut values = Vec::with_capacity(width * height);
    for _ in 0..width * height {
        state = (state * 1_103_515_245 + 12_345) % (1 << 31);
        values.push(((state >> 16) % 64) as u8);
    }
    gray_rgba(width, height, |x, y| values[y * width + x])
}

/// Black field with isolated white single-pixel spikes (about 1 in 16).
pub fn spikes_rgba(width: usize, height: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    let mut values = Vec::with_capacity(width * height);
    for _ in 0..width * height {
        state = (state * 1_103_515_245 + 12_345) % (1 << 31);
        values.push(if (state >> 16) % 16 == 0 { 255 } else { 0 });
    }
    gray_rgba(width, height, |x, y| values[y * width + x])
}

/// Colored blocks on a white background, exercising all three channels.
pub fn color_blocks_rgba(width: usize, height: usize) -> Vec<u8> {
    let mut img = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let px = match (x * 3 / width, y * 2 / height) {
                (0, 0) => [220, 30, 30, 255],
                (1, 0) => [30, 200, 40, 255],
                (2, 1) => [20, 40, 210, 255],
                _ => [255, 255, 255, 255],
            };
            img.extend_from_slice(&px);
        }
    }
    img
}
