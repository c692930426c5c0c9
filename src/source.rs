// src/source.rs

use std::path::Path;

use image::RgbImage;
use thiserror::Error;

/// 图片解码失败：路径不存在、不可读或格式不支持
#[derive(Debug, Error)]
#[error("无法解码图片 {path}: {source}")]
pub struct DecodeError {
    path: String,
    #[source]
    source: image::ImageError,
}

/// 从磁盘读取图片并解码成 8 位 RGB 像素缓冲。
///
/// # 返回
/// - `Ok(RgbImage)`: 解码成功，高 × 宽 × 3 的像素缓冲。
/// - `Err(DecodeError)`: 路径缺失或格式不支持。
pub fn load_rgb<P: AsRef<Path>>(path: P) -> Result<RgbImage, DecodeError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| DecodeError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(img.to_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn missing_path_yields_decode_error_naming_the_path() {
        let err = load_rgb("definitely/not/here.png").unwrap_err();
        assert!(err.to_string().contains("definitely/not/here.png"));
    }

    #[test]
    fn decodes_a_written_png_back_to_rgb() {
        let path = std::env::temp_dir().join("rsgc_source_roundtrip.png");
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 1, Rgb([0, 255, 0]));
        img.save(&path).unwrap();
        let loaded = load_rgb(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded.dimensions(), (2, 2));
        assert_eq!(loaded.get_pixel(0, 0), &Rgb([255, 0, 0]));
        assert_eq!(loaded.get_pixel(1, 1), &Rgb([0, 255, 0]));
    }
}
