use ab_glyph::{Font, FontArc, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_ellipse_mut, draw_filled_rect_mut};
use rust_embed::Embed;
use thiserror::Error;

use crate::layout::Rect;

#[derive(Embed)]
#[folder = "assets/fonts/"]
struct FontAssets;

const REGULAR_FONT: &str = "DejaVuSans.ttf";
const BOLD_FONT: &str = "DejaVuSans-Bold.ttf";

#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("embedded font {0} is missing")]
    MissingFont(&'static str),
    #[error("embedded font {0} could not be parsed")]
    InvalidFont(&'static str),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSpec {
    pub size: i32,
    pub bold: bool,
}

impl FontSpec {
    pub fn regular(size: i32) -> Self {
        Self { size, bold: false }
    }

    pub fn bold(size: i32) -> Self {
        Self { size, bold: true }
    }
}

/// Minimal painting vocabulary the widget renderer needs. Text is anchored at
/// its top-left corner; implementations translate to their own baselines.
pub trait DrawSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>);
    fn fill_ellipse(&mut self, rect: Rect, color: Rgba<u8>);
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: FontSpec, color: Rgba<u8>);
    fn text_width(&self, text: &str, font: FontSpec) -> f32;

    /// Right-align `text` inside `rect`.
    fn draw_text_right(&mut self, rect: Rect, text: &str, font: FontSpec, color: Rgba<u8>) {
        let width = self.text_width(text, font).min(rect.w as f32);
        let x = rect.x + rect.w - width.ceil() as i32;
        self.draw_text(x, rect.y, text, font, color);
    }
}

/// PNG-backed surface: an RGBA canvas with embedded DejaVu fonts.
pub struct RasterSurface {
    canvas: RgbaImage,
    regular: FontArc,
    bold: FontArc,
}

fn load_font(name: &'static str) -> Result<FontArc, SurfaceError> {
    let file = FontAssets::get(name).ok_or(SurfaceError::MissingFont(name))?;
    FontArc::try_from_vec(file.data.into_owned()).map_err(|_| SurfaceError::InvalidFont(name))
}

impl RasterSurface {
    pub fn new(width: u32, height: u32, background: Rgba<u8>) -> Result<Self, SurfaceError> {
        Ok(Self {
            canvas: RgbaImage::from_pixel(width, height, background),
            regular: load_font(REGULAR_FONT)?,
            bold: load_font(BOLD_FONT)?,
        })
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    fn font(&self, spec: FontSpec) -> &FontArc {
        if spec.bold { &self.bold } else { &self.regular }
    }
}

impl DrawSurface for RasterSurface {
    fn fill_rect(&mut self, rect: Rect, color: Rgba<u8>) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        draw_filled_rect_mut(
            &mut self.canvas,
            imageproc::rect::Rect::at(rect.x, rect.y).of_size(rect.w as u32, rect.h as u32),
            color,
        );
    }

    fn fill_ellipse(&mut self, rect: Rect, color: Rgba<u8>) {
        if rect.w <= 0 || rect.h <= 0 {
            return;
        }
        let center = (rect.x + rect.w / 2, rect.y + rect.h / 2);
        draw_filled_ellipse_mut(&mut self.canvas, center, rect.w / 2, rect.h / 2, color);
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: FontSpec, color: Rgba<u8>) {
        let face = self.font(font).clone();
        let scale = PxScale::from(font.size as f32);
        let scaled = face.as_scaled(scale);

        let baseline = y as f32 + scaled.ascent();
        let mut caret_x = x as f32;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                caret_x += scaled.kern(prev, id);
            }

            let glyph = id.with_scale_and_position(scale, point(caret_x, baseline));
            if let Some(outlined) = face.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                outlined.draw(|gx, gy, coverage| {
                    let px = bounds.min.x as i32 + gx as i32;
                    let py = bounds.min.y as i32 + gy as i32;
                    blend_pixel_with_coverage(&mut self.canvas, px, py, color, coverage);
                });
            }

            caret_x += scaled.h_advance(id);
            prev = Some(id);
        }
    }

    fn text_width(&self, text: &str, font: FontSpec) -> f32 {
        let scale = PxScale::from(font.size as f32);
        let scaled = self.font(font).as_scaled(scale);
        let mut width = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }
}

fn blend_pixel_with_coverage(
    canvas: &mut RgbaImage,
    x: i32,
    y: i32,
    color: Rgba<u8>,
    coverage: f32,
) {
    let mut src = color;
    src.0[3] = ((src.0[3] as f32) * coverage.clamp(0.0, 1.0)).round() as u8;
    blend_pixel(canvas, x, y, src);
}

fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, src: Rgba<u8>) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }

    let src_alpha = src.0[3] as f32 / 255.0;
    if src_alpha <= 0.0 {
        return;
    }

    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let dst_alpha = dst.0[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    if out_alpha <= 0.0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }

    for channel in 0..3 {
        let src_channel = src.0[channel] as f32 / 255.0;
        let dst_channel = dst.0[channel] as f32 / 255.0;
        let out_channel =
            (src_channel * src_alpha + dst_channel * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        dst.0[channel] = (out_channel * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    dst.0[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
}
