// src/segmenter.rs

use anyhow::Result;
use image::{Rgb, RgbImage};

use crate::selection::Rectangle;

/// 分割迭代次数的默认值
pub const DEFAULT_ITERATIONS: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
/// 掩码中每个像素的标签
pub enum MaskLabel {
    Background = 0,
    Foreground = 1,
    ProbableBackground = 2,
    ProbableForeground = 3,
}

impl MaskLabel {
    /// 确定前景和可能前景都算前景
    pub fn is_foreground(self) -> bool {
        matches!(self, MaskLabel::Foreground | MaskLabel::ProbableForeground)
    }
}

/// 按像素存放标签的掩码，新建时全部为背景
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    labels: Vec<MaskLabel>,
}

impl Mask {
    pub fn new(width: u32, height: u32) -> Self {
        Mask {
            width,
            height,
            labels: vec![MaskLabel::Background; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> MaskLabel {
        self.labels[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, label: MaskLabel) {
        self.labels[(y * self.width + x) as usize] = label;
    }

    /// 折叠成 0/1：背景与可能背景为 0，其余为 1
    pub fn to_binary(&self) -> Vec<u8> {
        self.labels.iter().map(|l| l.is_foreground() as u8).collect()
    }

    /// 把掩码套到同尺寸图像上，背景像素清零
    pub fn apply(&self, image: &RgbImage) -> RgbImage {
        RgbImage::from_fn(image.width(), image.height(), |x, y| {
            if self.get(x, y).is_foreground() {
                *image.get_pixel(x, y)
            } else {
                Rgb([0, 0, 0])
            }
        })
    }
}

/// 接收一幅图像、种子矩形和迭代次数，返回前景/背景标签掩码。
///
/// 选区工具本身不调用它；交互循环退出后由下游拿着
/// [`SelectionSession::finalize`] 的结果来喂。是否拒绝退化或越界的
/// 种子矩形由实现自行决定。
///
/// [`SelectionSession::finalize`]: crate::selection::SelectionSession::finalize
pub trait Segmenter {
    fn segment(&self, image: &RgbImage, seed: &Rectangle, iterations: u32) -> Result<Mask>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;

    /// Marks everything inside the seed rectangle as probable foreground.
    struct SeedFill;

    impl Segmenter for SeedFill {
        fn segment(&self, image: &RgbImage, seed: &Rectangle, _iterations: u32) -> Result<Mask> {
            let Some(((ax, ay), (bx, by))) = seed.corners() else {
                bail!("seed rectangle is incomplete");
            };
            let (x0, x1) = (ax.min(bx).max(0), ax.max(bx).min(image.width() as i32 - 1));
            let (y0, y1) = (ay.min(by).max(0), ay.max(by).min(image.height() as i32 - 1));
            let mut mask = Mask::new(image.width(), image.height());
            for y in y0..=y1 {
                for x in x0..=x1 {
                    mask.set(x as u32, y as u32, MaskLabel::ProbableForeground);
                }
            }
            Ok(mask)
        }
    }

    #[test]
    fn label_values_match_the_mask_convention() {
        assert_eq!(MaskLabel::Background as u8, 0);
        assert_eq!(MaskLabel::Foreground as u8, 1);
        assert_eq!(MaskLabel::ProbableBackground as u8, 2);
        assert_eq!(MaskLabel::ProbableForeground as u8, 3);
    }

    #[test]
    fn binary_collapse_keeps_only_foreground_labels() {
        let mut mask = Mask::new(2, 2);
        mask.set(0, 0, MaskLabel::Foreground);
        mask.set(1, 0, MaskLabel::ProbableForeground);
        mask.set(0, 1, MaskLabel::ProbableBackground);
        assert_eq!(mask.to_binary(), vec![1, 1, 0, 0]);
    }

    #[test]
    fn apply_zeroes_background_pixels() {
        let img = RgbImage::from_pixel(2, 1, Rgb([9, 8, 7]));
        let mut mask = Mask::new(2, 1);
        mask.set(1, 0, MaskLabel::Foreground);
        let out = mask.apply(&img);
        assert_eq!(out.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(out.get_pixel(1, 0), &Rgb([9, 8, 7]));
    }

    #[test]
    fn stub_segmenter_labels_the_seed_interior() {
        let img = RgbImage::new(10, 10);
        let mut seed = Rectangle::default();
        seed.arm((2, 2));
        seed.push((5, 4));
        let mask = SeedFill.segment(&img, &seed, DEFAULT_ITERATIONS).unwrap();
        assert_eq!(mask.get(3, 3), MaskLabel::ProbableForeground);
        assert_eq!(mask.get(0, 0), MaskLabel::Background);
        assert_eq!(mask.get(6, 5), MaskLabel::Background);
    }

    #[test]
    fn stub_segmenter_rejects_an_incomplete_seed() {
        let img = RgbImage::new(10, 10);
        let mut seed = Rectangle::default();
        seed.push((2, 2));
        assert!(SeedFill.segment(&img, &seed, DEFAULT_ITERATIONS).is_err());
    }
}
