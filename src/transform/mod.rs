// Transform vocabulary - func 記号と画像変換の対応
// 設定ファイルに書ける変換は閉じた列挙型で表現し、未知の記号は読み込み時に拒否する

pub mod ops;

use crate::core::{AugmentError, AugmentResult};
use image::RgbImage;
use rand::Rng;

/// 設定ファイルの `func` 記号
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    HorizontalFlip,
    Crop,
    Rotate,
    Grayscale,
    BrightnessUp,
    BrightnessDown,
    ContrastUp,
    ContrastDown,
    SaturationUp,
    SaturationDown,
}

impl TransformKind {
    /// 認識する全記号
    pub const ALL: [TransformKind; 10] = [
        Self::HorizontalFlip,
        Self::Crop,
        Self::Rotate,
        Self::Grayscale,
        Self::BrightnessUp,
        Self::BrightnessDown,
        Self::ContrastUp,
        Self::ContrastDown,
        Self::SaturationUp,
        Self::SaturationDown,
    ];

    /// 記号から変換種別を引く（未知の記号は `None`）
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "h" => Some(Self::HorizontalFlip),
            "c" => Some(Self::Crop),
            "r" => Some(Self::Rotate),
            "g" => Some(Self::Grayscale),
            "bu" => Some(Self::BrightnessUp),
            "bd" => Some(Self::BrightnessDown),
            "cu" => Some(Self::ContrastUp),
            "cd" => Some(Self::ContrastDown),
            "su" => Some(Self::SaturationUp),
            "sd" => Some(Self::SaturationDown),
            _ => None,
        }
    }

    /// ファイル名サフィックスとして使う記号
    pub fn tag(&self) -> &'static str {
        match self {
            Self::HorizontalFlip => "h",
            Self::Crop => "c",
            Self::Rotate => "r",
            Self::Grayscale => "g",
            Self::BrightnessUp => "bu",
            Self::BrightnessDown => "bd",
            Self::ContrastUp => "cu",
            Self::ContrastDown => "cd",
            Self::SaturationUp => "su",
            Self::SaturationDown => "sd",
        }
    }

    /// plan 表示用の短い説明
    pub fn description(&self) -> &'static str {
        match self {
            Self::HorizontalFlip => "horizontal flip",
            Self::Crop => "random crop",
            Self::Rotate => "random rotation",
            Self::Grayscale => "grayscale",
            Self::BrightnessUp => "brightness up",
            Self::BrightnessDown => "brightness down",
            Self::ContrastUp => "contrast up",
            Self::ContrastDown => "contrast down",
            Self::SaturationUp => "saturation up",
            Self::SaturationDown => "saturation down",
        }
    }
}

/// `func` 記号に付随する生のパラメータ
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JobParams {
    pub w_p: Option<f32>,
    pub h_p: Option<f32>,
    pub min: Option<f32>,
    pub max: Option<f32>,
}

/// パラメータ検証済みの変換
///
/// ジョブごとに一度構築し、ファイル間・繰り返し間で再利用する。
/// 確率的なパラメータ（切り出し位置、回転角、係数）は適用のたびに抽選する。
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    HorizontalFlip,
    Crop { w_p: f32, h_p: f32 },
    Rotate { min_deg: f32, max_deg: f32 },
    Grayscale,
    Brightness { min: f32, max: f32 },
    Contrast { min: f32, max: f32 },
    Saturation { min: f32, max: f32 },
}

impl TransformOp {
    /// 記号とパラメータから変換を構築する
    ///
    /// 必須パラメータの欠落や範囲外の値は設定エラー。
    pub fn build(kind: TransformKind, params: JobParams) -> AugmentResult<Self> {
        match kind {
            TransformKind::HorizontalFlip => Ok(Self::HorizontalFlip),
            TransformKind::Grayscale => Ok(Self::Grayscale),
            TransformKind::Crop => {
                let w_p = require(kind, "w_p", params.w_p)?;
                let h_p = require(kind, "h_p", params.h_p)?;
                if w_p <= 0.0 || w_p > 1.0 {
                    return Err(invalid(kind, "w_p は 0 より大きく 1 以下である必要があります"));
                }
                if h_p <= 0.0 || h_p > 1.0 {
                    return Err(invalid(kind, "h_p は 0 より大きく 1 以下である必要があります"));
                }
                Ok(Self::Crop { w_p, h_p })
            }
            TransformKind::Rotate => {
                let min_deg = require(kind, "min", params.min)?;
                let max_deg = require(kind, "max", params.max)?;
                if min_deg > max_deg {
                    return Err(invalid(kind, "min は max 以下である必要があります"));
                }
                Ok(Self::Rotate { min_deg, max_deg })
            }
            TransformKind::BrightnessUp | TransformKind::BrightnessDown => {
                let (min, max) = factor_range(kind, params)?;
                Ok(Self::Brightness { min, max })
            }
            TransformKind::ContrastUp | TransformKind::ContrastDown => {
                let (min, max) = factor_range(kind, params)?;
                Ok(Self::Contrast { min, max })
            }
            TransformKind::SaturationUp | TransformKind::SaturationDown => {
                let (min, max) = factor_range(kind, params)?;
                Ok(Self::Saturation { min, max })
            }
        }
    }

    /// 変換を 1 回適用する
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        let mut rng = rand::rng();
        match self {
            Self::HorizontalFlip => image::imageops::flip_horizontal(image),
            Self::Crop { w_p, h_p } => ops::crop_random(image, *w_p, *h_p, &mut rng),
            Self::Rotate { min_deg, max_deg } => {
                ops::rotate_random(image, *min_deg, *max_deg, &mut rng)
            }
            Self::Grayscale => ops::grayscale(image),
            Self::Brightness { min, max } => {
                ops::adjust_brightness(image, sample(&mut rng, *min, *max))
            }
            Self::Contrast { min, max } => {
                ops::adjust_contrast(image, sample(&mut rng, *min, *max))
            }
            Self::Saturation { min, max } => {
                ops::adjust_saturation(image, sample(&mut rng, *min, *max))
            }
        }
    }
}

fn require(kind: TransformKind, name: &str, value: Option<f32>) -> AugmentResult<f32> {
    value.ok_or_else(|| {
        AugmentError::configuration(format!(
            "ジョブ '{}' にはパラメータ {name} が必要です",
            kind.tag()
        ))
    })
}

fn invalid(kind: TransformKind, reason: &str) -> AugmentError {
    AugmentError::configuration(format!("ジョブ '{}': {reason}", kind.tag()))
}

fn factor_range(kind: TransformKind, params: JobParams) -> AugmentResult<(f32, f32)> {
    let min = require(kind, "min", params.min)?;
    let max = require(kind, "max", params.max)?;
    if min < 0.0 {
        return Err(invalid(kind, "min は 0 以上である必要があります"));
    }
    if min > max {
        return Err(invalid(kind, "min は max 以下である必要があります"));
    }
    Ok((min, max))
}

fn sample(rng: &mut impl Rng, min: f32, max: f32) -> f32 {
    if min < max {
        rng.random_range(min..=max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn params(w_p: Option<f32>, h_p: Option<f32>, min: Option<f32>, max: Option<f32>) -> JobParams {
        JobParams { w_p, h_p, min, max }
    }

    #[test]
    fn test_tag_round_trip() {
        // 全記号が一意に往復する
        for kind in TransformKind::ALL {
            assert_eq!(TransformKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert_eq!(TransformKind::from_tag("x"), None);
        assert_eq!(TransformKind::from_tag(""), None);
        assert_eq!(TransformKind::from_tag("hh"), None);
    }

    #[test]
    fn test_build_parameterless_kinds() {
        let flip = TransformOp::build(TransformKind::HorizontalFlip, JobParams::default());
        assert_eq!(flip.unwrap(), TransformOp::HorizontalFlip);

        let gray = TransformOp::build(TransformKind::Grayscale, JobParams::default());
        assert_eq!(gray.unwrap(), TransformOp::Grayscale);
    }

    #[test]
    fn test_build_crop_requires_ratios() {
        let missing = TransformOp::build(TransformKind::Crop, JobParams::default());
        assert!(missing.is_err());

        let zero = TransformOp::build(
            TransformKind::Crop,
            params(Some(0.0), Some(0.5), None, None),
        );
        assert!(zero.is_err());

        let too_big = TransformOp::build(
            TransformKind::Crop,
            params(Some(0.5), Some(1.5), None, None),
        );
        assert!(too_big.is_err());

        let ok = TransformOp::build(
            TransformKind::Crop,
            params(Some(0.8), Some(0.8), None, None),
        );
        assert_eq!(
            ok.unwrap(),
            TransformOp::Crop { w_p: 0.8, h_p: 0.8 }
        );
    }

    #[test]
    fn test_build_rotate_range_order() {
        let inverted = TransformOp::build(
            TransformKind::Rotate,
            params(None, None, Some(15.0), Some(-15.0)),
        );
        assert!(inverted.is_err());

        // 負の角度自体は有効
        let ok = TransformOp::build(
            TransformKind::Rotate,
            params(None, None, Some(-15.0), Some(15.0)),
        );
        assert_eq!(
            ok.unwrap(),
            TransformOp::Rotate {
                min_deg: -15.0,
                max_deg: 15.0
            }
        );
    }

    #[test]
    fn test_build_factor_kinds() {
        let negative = TransformOp::build(
            TransformKind::BrightnessUp,
            params(None, None, Some(-0.5), Some(1.0)),
        );
        assert!(negative.is_err());

        let ok = TransformOp::build(
            TransformKind::SaturationDown,
            params(None, None, Some(0.3), Some(0.7)),
        );
        assert_eq!(
            ok.unwrap(),
            TransformOp::Saturation { min: 0.3, max: 0.7 }
        );

        // min == max の退化した範囲も許す
        let fixed = TransformOp::build(
            TransformKind::ContrastUp,
            params(None, None, Some(1.2), Some(1.2)),
        );
        assert!(fixed.is_ok());
    }

    #[test]
    fn test_apply_flip() {
        let mut image = RgbImage::from_pixel(2, 1, Rgb([0, 0, 0]));
        image.put_pixel(0, 0, Rgb([255, 255, 255]));

        let flipped = TransformOp::HorizontalFlip.apply(&image);
        assert_eq!(flipped.get_pixel(1, 0), &Rgb([255, 255, 255]));
        assert_eq!(flipped.get_pixel(0, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_apply_preserves_dimensions_for_non_crop() {
        let image = RgbImage::from_pixel(8, 6, Rgb([50, 100, 150]));

        for op in [
            TransformOp::HorizontalFlip,
            TransformOp::Rotate {
                min_deg: -10.0,
                max_deg: 10.0,
            },
            TransformOp::Grayscale,
            TransformOp::Brightness { min: 0.5, max: 1.5 },
            TransformOp::Contrast { min: 0.5, max: 1.5 },
            TransformOp::Saturation { min: 0.5, max: 1.5 },
        ] {
            assert_eq!(op.apply(&image).dimensions(), (8, 6));
        }
    }

    #[test]
    fn test_apply_crop_dimensions() {
        let image = RgbImage::from_pixel(100, 60, Rgb([1, 1, 1]));
        let op = TransformOp::Crop { w_p: 0.5, h_p: 0.5 };

        let cropped = op.apply(&image);
        assert_eq!(cropped.dimensions(), (50, 30));
    }

    #[test]
    fn test_fixed_factor_sample() {
        // min == max の範囲は常にその値を返す
        let image = RgbImage::from_pixel(2, 2, Rgb([100, 100, 100]));
        let op = TransformOp::Brightness { min: 2.0, max: 2.0 };

        let doubled = op.apply(&image);
        assert_eq!(doubled.get_pixel(0, 0), &Rgb([200, 200, 200]));
    }
}
