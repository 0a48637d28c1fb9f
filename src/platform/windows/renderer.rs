//! Direct2D/DirectWrite text rendering.
//!
//! Owns the device-independent factories and the window-bound resources
//! (render target, text format, solid brush). The factories survive device
//! loss; the window-bound resources are released and recreated.

use log::debug;
use windows::core::{w, PCWSTR};
use windows::Win32::Graphics::Direct2D::Common::{
    D2D1_ALPHA_MODE_PREMULTIPLIED, D2D1_COLOR_F, D2D1_PIXEL_FORMAT, D2D_RECT_F, D2D_SIZE_U,
};
use windows::Win32::Graphics::Direct2D::{
    D2D1CreateFactory, ID2D1Factory, ID2D1HwndRenderTarget, ID2D1SolidColorBrush,
    D2D1_DRAW_TEXT_OPTIONS_NONE, D2D1_FACTORY_TYPE_SINGLE_THREADED,
    D2D1_HWND_RENDER_TARGET_PROPERTIES, D2D1_PRESENT_OPTIONS_IMMEDIATELY,
    D2D1_RENDER_TARGET_PROPERTIES, D2D1_RENDER_TARGET_TYPE_DEFAULT,
    D2D1_RENDER_TARGET_USAGE_NONE, D2DERR_RECREATE_TARGET,
};
use windows::Win32::Graphics::DirectWrite::{
    DWriteCreateFactory, IDWriteFactory, IDWriteTextFormat, DWRITE_FACTORY_TYPE_SHARED,
    DWRITE_FONT_STRETCH_NORMAL, DWRITE_FONT_STYLE_NORMAL, DWRITE_FONT_WEIGHT,
    DWRITE_MEASURING_MODE_NATURAL, DWRITE_PARAGRAPH_ALIGNMENT_NEAR,
    DWRITE_TEXT_ALIGNMENT_LEADING,
};
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_B8G8R8A8_UNORM;

use crate::error::{OverlayError, OverlayResult};
use crate::model::constants::DEFAULT_FONT_FAMILY;
use crate::model::{Color, FontWeight, RenderConfig};
use crate::overlay::DrawStatus;

use super::window::OverlayWindow;

const TRANSPARENT_CLEAR: D2D1_COLOR_F = D2D1_COLOR_F {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 0.0,
};

fn color_f(color: Color) -> D2D1_COLOR_F {
    D2D1_COLOR_F {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

/// Direct2D resources for one overlay window.
pub struct TextRenderer {
    d2d: ID2D1Factory,
    dwrite: IDWriteFactory,
    target: Option<ID2D1HwndRenderTarget>,
    text_format: Option<IDWriteTextFormat>,
    brush: Option<ID2D1SolidColorBrush>,
}

impl TextRenderer {
    /// Create the device-independent factories.
    pub fn new() -> OverlayResult<Self> {
        unsafe {
            let d2d: ID2D1Factory = D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)?;
            let dwrite: IDWriteFactory = DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED)?;
            Ok(Self {
                d2d,
                dwrite,
                target: None,
                text_format: None,
                brush: None,
            })
        }
    }

    /// Create the window-bound resources: render target, brush, and the
    /// initial text format from the front config.
    pub fn initialize(
        &mut self,
        window: &OverlayWindow,
        config: &RenderConfig,
    ) -> OverlayResult<()> {
        let (width, height) = window.size();
        unsafe {
            let rt_props = D2D1_RENDER_TARGET_PROPERTIES {
                r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
                pixelFormat: D2D1_PIXEL_FORMAT {
                    format: DXGI_FORMAT_B8G8R8A8_UNORM,
                    alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
                },
                dpiX: 96.0,
                dpiY: 96.0,
                usage: D2D1_RENDER_TARGET_USAGE_NONE,
                minLevel: Default::default(),
            };
            let hwnd_props = D2D1_HWND_RENDER_TARGET_PROPERTIES {
                hwnd: window.hwnd(),
                pixelSize: D2D_SIZE_U { width, height },
                presentOptions: D2D1_PRESENT_OPTIONS_IMMEDIATELY,
            };

            let target = self.d2d.CreateHwndRenderTarget(&rt_props, &hwnd_props)?;
            let brush = target.CreateSolidColorBrush(&color_f(config.color), None)?;
            self.target = Some(target);
            self.brush = Some(brush);
        }
        self.rebuild_text_format(config.font_size, config.font_weight)?;
        debug!("render target initialized at {width}x{height}");
        Ok(())
    }

    /// Drop and recreate the text format.
    ///
    /// Only invoked when a drained config carries a style change; position
    /// and color updates never come through here.
    pub fn rebuild_text_format(
        &mut self,
        font_size: f32,
        weight: FontWeight,
    ) -> OverlayResult<()> {
        self.text_format = None;

        let family: Vec<u16> = format!("{DEFAULT_FONT_FAMILY}\0").encode_utf16().collect();
        unsafe {
            let format = self.dwrite.CreateTextFormat(
                PCWSTR(family.as_ptr()),
                None,
                DWRITE_FONT_WEIGHT(weight.value()),
                DWRITE_FONT_STYLE_NORMAL,
                DWRITE_FONT_STRETCH_NORMAL,
                font_size,
                w!("en-US"),
            )?;
            format.SetTextAlignment(DWRITE_TEXT_ALIGNMENT_LEADING)?;
            format.SetParagraphAlignment(DWRITE_PARAGRAPH_ALIGNMENT_NEAR)?;
            self.text_format = Some(format);
        }
        Ok(())
    }

    /// Render one frame: clear to transparent, draw the text anchored at
    /// the config position, extending to the remaining surface.
    pub fn draw_frame(&mut self, config: &RenderConfig) -> OverlayResult<DrawStatus> {
        let (Some(target), Some(format), Some(brush)) =
            (&self.target, &self.text_format, &self.brush)
        else {
            return Err(OverlayError::Graphics("draw before initialization".into()));
        };

        unsafe {
            target.BeginDraw();
            target.Clear(Some(&TRANSPARENT_CLEAR));

            let size = target.GetSize();
            let layout = D2D_RECT_F {
                left: config.x,
                top: config.y,
                right: size.width,
                bottom: size.height,
            };

            brush.SetColor(&color_f(config.color));
            target.DrawText(
                &config.text,
                format,
                &layout,
                brush,
                D2D1_DRAW_TEXT_OPTIONS_NONE,
                DWRITE_MEASURING_MODE_NATURAL,
            );

            match target.EndDraw(None, None) {
                Ok(()) => Ok(DrawStatus::Presented),
                Err(err) if err.code() == D2DERR_RECREATE_TARGET => Ok(DrawStatus::DeviceLost),
                Err(err) => Err(err.into()),
            }
        }
    }

    /// Release the window-bound resources, keeping the factories alive for
    /// recreation.
    pub fn release_graphics(&mut self) {
        self.brush = None;
        self.text_format = None;
        self.target = None;
    }
}
