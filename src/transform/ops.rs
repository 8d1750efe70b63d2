// Pixel operations - 画像バッファに対する変換の実装
// すべて RGB8 バッファを入力とし、新しいバッファを返す

use image::{imageops, Rgb, RgbImage};
use rand::Rng;

/// BT.601 輝度（グレースケール・彩度調整で共用）
pub fn luma(pixel: &Rgb<u8>) -> f32 {
    0.299 * pixel[0] as f32 + 0.587 * pixel[1] as f32 + 0.114 * pixel[2] as f32
}

/// 長辺が `limit` を超える場合のみ縮小した画像を返す
///
/// 縦横比は整数演算で維持し、長辺はちょうど `limit` になる。
/// 制限内の画像は `None`（呼び出し側はそのまま使う）。
pub fn resize_to_limit(image: &RgbImage, limit: u32) -> Option<RgbImage> {
    let (w, h) = image.dimensions();
    let longest = w.max(h);
    if longest <= limit {
        return None;
    }

    let new_w = ((w as u64 * limit as u64) / longest as u64).max(1) as u32;
    let new_h = ((h as u64 * limit as u64) / longest as u64).max(1) as u32;
    Some(imageops::resize(
        image,
        new_w,
        new_h,
        imageops::FilterType::Lanczos3,
    ))
}

/// 幅・高さの比率で決まるサイズの矩形を、ランダムな位置で切り出す
pub fn crop_random(image: &RgbImage, w_p: f32, h_p: f32, rng: &mut impl Rng) -> RgbImage {
    let (w, h) = image.dimensions();
    let crop_w = ((w as f32 * w_p) as u32).clamp(1, w);
    let crop_h = ((h as f32 * h_p) as u32).clamp(1, h);
    let x = rng.random_range(0..=w - crop_w);
    let y = rng.random_range(0..=h - crop_h);
    imageops::crop_imm(image, x, y, crop_w, crop_h).to_image()
}

/// `[min_deg, max_deg]` から一様に選んだ角度で回転する
pub fn rotate_random(image: &RgbImage, min_deg: f32, max_deg: f32, rng: &mut impl Rng) -> RgbImage {
    let angle = if min_deg < max_deg {
        rng.random_range(min_deg..=max_deg)
    } else {
        min_deg
    };
    rotate_about_center(image, angle)
}

/// 画像中心周りに反時計回りへ回転する
///
/// 出力サイズは入力と同じで、回転ではみ出した領域は黒。
/// 出力画素ごとに逆回転で入力座標を求める最近傍サンプリング。
pub fn rotate_about_center(image: &RgbImage, angle_deg: f32) -> RgbImage {
    let (w, h) = image.dimensions();
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let cx = w as f32 / 2.0;
    let cy = h as f32 / 2.0;

    let mut out = RgbImage::new(w, h);
    for (x, y, pixel) in out.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        let sx = (cos * dx - sin * dy + cx - 0.5).round();
        let sy = (sin * dx + cos * dy + cy - 0.5).round();
        if sx >= 0.0 && sy >= 0.0 && (sx as u32) < w && (sy as u32) < h {
            *pixel = *image.get_pixel(sx as u32, sy as u32);
        }
    }
    out
}

/// 3チャンネルグレースケール（全チャンネルに輝度を複製）
pub fn grayscale(image: &RgbImage) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let v = luma(pixel).round().clamp(0.0, 255.0) as u8;
        *pixel = Rgb([v, v, v]);
    }
    out
}

/// 明度調整 - 各チャンネルを係数倍する
pub fn adjust_brightness(image: &RgbImage, factor: f32) -> RgbImage {
    map_channels(image, |v| v * factor)
}

/// コントラスト調整 - 画像全体の平均輝度へ向けてブレンドする
pub fn adjust_contrast(image: &RgbImage, factor: f32) -> RgbImage {
    let mean = mean_luma(image);
    map_channels(image, |v| factor * v + (1.0 - factor) * mean)
}

/// 彩度調整 - 画素ごとの輝度へ向けてブレンドする
pub fn adjust_saturation(image: &RgbImage, factor: f32) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let gray = luma(pixel);
        for channel in pixel.0.iter_mut() {
            let v = factor * *channel as f32 + (1.0 - factor) * gray;
            *channel = v.round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

fn mean_luma(image: &RgbImage) -> f32 {
    let total: f64 = image.pixels().map(|p| luma(p) as f64).sum();
    let count = image.width() as f64 * image.height() as f64;
    (total / count) as f32
}

fn map_channels(image: &RgbImage, f: impl Fn(f32) -> f32) -> RgbImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        for channel in pixel.0.iter_mut() {
            *channel = f(*channel as f32).round().clamp(0.0, 255.0) as u8;
        }
    }
    out
}
