//! QR code rendering for the panel's display region.
//!
//! A [`QrRegion`] stands in for the host element that shows the code. It owns
//! at most one [`QrSurface`]: the first render creates it, later renders wipe
//! and redraw the same surface, and a clear destroys it. The rendered
//! [`QrImage`] is what the host drops into an `<img>` tag.

use std::fmt;
use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

pub const QR_DEFAULT_SIZE: u32 = 256;
pub const QR_MAX_SIZE: u32 = 2048;

/// Error-correction level, named the way QR generators label them.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum CorrectionLevel {
    L,
    #[default]
    M,
    Q,
    H,
}

impl CorrectionLevel {
    fn ec_level(self) -> EcLevel {
        match self {
            Self::L => EcLevel::L,
            Self::M => EcLevel::M,
            Self::Q => EcLevel::Q,
            Self::H => EcLevel::H,
        }
    }
}

#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    #[default]
    Png,
    Svg,
}

impl QrFormat {
    fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    fn mime(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
        }
    }
}

/// Rendering options supplied by the host; every field is optional.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase")]
pub struct QrOptions {
    /// Output width in pixels (default 256).
    pub width: u32,
    /// Output height in pixels (default 256).
    pub height: u32,
    pub ec_level: CorrectionLevel,
    pub format: QrFormat,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: QR_DEFAULT_SIZE,
            height: QR_DEFAULT_SIZE,
            ec_level: CorrectionLevel::M,
            format: QrFormat::Png,
        }
    }
}

impl QrOptions {
    pub fn validate(&self) -> Result<(), String> {
        let in_range = |v: u32| (1..=QR_MAX_SIZE).contains(&v);
        if in_range(self.width) && in_range(self.height) {
            Ok(())
        } else {
            Err(format!("QR size must be between 1 and {QR_MAX_SIZE} pixels"))
        }
    }
}

/// Rendered code handed to the host.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QrImage {
    pub format: String,
    pub mime: String,
    pub width: u32,
    pub height: u32,
    /// Text encoded in the code.
    pub payload: String,
    pub data_base64: String,
    pub data_url: String,
}

struct Drawn {
    text: String,
    code: QrCode,
}

impl fmt::Debug for Drawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Drawn")
            .field("text", &self.text)
            .field("modules", &self.code.width())
            .finish()
    }
}

/// Rendering handle bound to one display region.
#[derive(Debug)]
pub struct QrSurface {
    options: QrOptions,
    drawn: Option<Drawn>,
}

impl QrSurface {
    /// Builds a surface already showing `text`.
    pub fn create(options: QrOptions, text: &str) -> Result<Self, String> {
        let mut surface = Self {
            options,
            drawn: None,
        };
        surface.draw(text)?;
        tracing::debug!(
            width = options.width,
            height = options.height,
            "created QR surface"
        );
        Ok(surface)
    }

    /// Wipes the current code and draws `text` on the same surface.
    /// On failure the surface is left blank.
    pub fn redraw(&mut self, text: &str) -> Result<(), String> {
        self.clear();
        self.draw(text)?;
        tracing::debug!(bytes = text.len(), "redrew QR surface");
        Ok(())
    }

    pub fn clear(&mut self) {
        self.drawn = None;
    }

    /// Releases the surface, clearing it first if it still holds a code.
    pub fn destroy(mut self) {
        if !self.is_blank() {
            self.clear();
        }
        tracing::debug!("destroyed QR surface");
    }

    pub fn is_blank(&self) -> bool {
        self.drawn.is_none()
    }

    /// Text currently encoded, if any.
    pub fn text(&self) -> Option<&str> {
        self.drawn.as_ref().map(|d| d.text.as_str())
    }

    pub fn options(&self) -> QrOptions {
        self.options
    }

    /// Renders the current code at the configured size and format.
    pub fn image(&self) -> Result<QrImage, String> {
        let drawn = self.drawn.as_ref().ok_or("QR surface is blank")?;
        let QrOptions {
            width,
            height,
            format,
            ..
        } = self.options;
        let bytes = match format {
            QrFormat::Png => render_png(&drawn.code, width, height)?,
            QrFormat::Svg => render_svg(&drawn.code, width, height).into_bytes(),
        };
        let data_base64 = STANDARD.encode(&bytes);
        let data_url = format!("data:{};base64,{}", format.mime(), data_base64);
        Ok(QrImage {
            format: format.extension().into(),
            mime: format.mime().into(),
            width,
            height,
            payload: drawn.text.clone(),
            data_base64,
            data_url,
        })
    }

    fn draw(&mut self, text: &str) -> Result<(), String> {
        let level = self.options.ec_level.ec_level();
        let code = QrCode::with_error_correction_level(text.as_bytes(), level)
            .map_err(|err| format!("failed to encode QR code: {err}"))?;
        self.drawn = Some(Drawn {
            text: text.to_string(),
            code,
        });
        Ok(())
    }
}

fn render_png(code: &QrCode, width: u32, height: u32) -> Result<Vec<u8>, String> {
    // Largest whole module size that fits, so every module keeps the same width.
    let rendered = code
        .render::<Luma<u8>>()
        .max_dimensions(width, height)
        .build();
    let (drawn_w, drawn_h) = rendered.dimensions();
    let fitted = if (drawn_w, drawn_h) == (width, height) {
        rendered
    } else if drawn_w <= width && drawn_h <= height {
        // Widen the quiet zone out to the requested box.
        let mut canvas = GrayImage::from_pixel(width, height, Luma([255]));
        let x = i64::from((width - drawn_w) / 2);
        let y = i64::from((height - drawn_h) / 2);
        imageops::overlay(&mut canvas, &rendered, x, y);
        canvas
    } else {
        // Box smaller than one pixel per module: nothing scannable fits, squeeze it.
        imageops::resize(&rendered, width, height, FilterType::Nearest)
    };
    let mut bytes = Vec::new();
    DynamicImage::ImageLuma8(fitted)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| err.to_string())?;
    Ok(bytes)
}

fn render_svg(code: &QrCode, width: u32, height: u32) -> String {
    let rendered = code
        .render::<svg::Color<'_>>()
        .min_dimensions(width, height)
        .build();
    // viewBox keeps the drawing coordinates; only the outer box is resized.
    let rendered = set_svg_attr(&rendered, "width", width);
    set_svg_attr(&rendered, "height", height)
}

fn set_svg_attr(svg: &str, name: &str, value: u32) -> String {
    let needle = format!(" {name}=\"");
    let Some(start) = svg.find(&needle).map(|idx| idx + needle.len()) else {
        return svg.to_string();
    };
    let Some(len) = svg[start..].find('"') else {
        return svg.to_string();
    };
    format!("{}{}{}", &svg[..start], value, &svg[start + len..])
}

/// The host element a QR code is drawn into.
#[derive(Debug, Default)]
pub struct QrRegion {
    options: QrOptions,
    surface: Option<QrSurface>,
    displayed: Option<QrImage>,
}

impl QrRegion {
    pub fn new(options: QrOptions) -> Result<Self, String> {
        options.validate()?;
        Ok(Self {
            options,
            surface: None,
            displayed: None,
        })
    }

    /// Shows `text` as a QR code. Empty text clears the region and yields `None`.
    ///
    /// # Example
    /// ```
    /// use panel_core::qr::QrRegion;
    /// let mut region = QrRegion::default();
    /// let image = region.render("hello")?.expect("drawn");
    /// assert_eq!((image.width, image.height), (256, 256));
    /// assert!(region.render("")?.is_none());
    /// assert!(!region.has_surface());
    /// # Ok::<(), String>(())
    /// ```
    pub fn render(&mut self, text: &str) -> Result<Option<&QrImage>, String> {
        if text.is_empty() {
            self.clear();
            return Ok(None);
        }
        self.displayed = None;
        match self.surface.as_mut() {
            Some(surface) => surface.redraw(text)?,
            None => self.surface = Some(QrSurface::create(self.options, text)?),
        }
        let Some(surface) = self.surface.as_ref() else {
            return Ok(None);
        };
        let image = surface.image()?;
        Ok(Some(&*self.displayed.insert(image)))
    }

    /// Empties the region and drops its surface.
    pub fn clear(&mut self) {
        if let Some(surface) = self.surface.take() {
            surface.destroy();
        }
        self.displayed = None;
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&QrSurface> {
        self.surface.as_ref()
    }

    /// Image currently shown, if any.
    pub fn displayed(&self) -> Option<&QrImage> {
        self.displayed.as_ref()
    }

    pub fn options(&self) -> QrOptions {
        self.options
    }
}
