//! The layered overlay window.
//!
//! A borderless popup covering one display, with layered, click-through,
//! topmost, no-activate extended styles set at creation and never changed.
//! The window is owned by the render thread for its entire lifetime.

use std::sync::Once;

use log::debug;
use windows::core::w;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, WPARAM};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, DispatchMessageW, PeekMessageW,
    RegisterClassW, SetLayeredWindowAttributes, ShowWindow, TranslateMessage, LWA_ALPHA, MSG,
    PM_REMOVE, SW_SHOWNA, WNDCLASSW, WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW,
    WS_EX_TOPMOST, WS_EX_TRANSPARENT, WS_POPUP,
};

use crate::error::{OverlayError, OverlayResult};
use crate::model::constants::WINDOW_ALPHA;
use crate::model::Rect;

static REGISTER_CLASS: Once = Once::new();

// The window never responds to input; everything goes to the default
// procedure.
extern "system" fn wndproc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    unsafe { DefWindowProcW(hwnd, msg, wparam, lparam) }
}

/// Owning handle to the overlay window. Dropping destroys the window.
pub struct OverlayWindow {
    hwnd: HWND,
    width: u32,
    height: u32,
}

impl OverlayWindow {
    /// Create the window covering `bounds` and show it without activation.
    pub fn create(bounds: &Rect) -> OverlayResult<Self> {
        unsafe {
            let instance = GetModuleHandleW(None)
                .map_err(|e| OverlayError::WindowCreation(e.to_string()))?;
            let class_name = w!("TextveilOverlay");

            REGISTER_CLASS.call_once(|| {
                let wc = WNDCLASSW {
                    lpfnWndProc: Some(wndproc),
                    hInstance: instance.into(),
                    lpszClassName: class_name,
                    ..Default::default()
                };
                RegisterClassW(&wc);
            });

            // Layered + transparent: alpha-composited and click-through.
            // Topmost + no-activate: stays above normal windows without
            // ever stealing focus.
            let ex_style = WS_EX_LAYERED
                | WS_EX_TRANSPARENT
                | WS_EX_TOPMOST
                | WS_EX_NOACTIVATE
                | WS_EX_TOOLWINDOW;

            let hwnd = CreateWindowExW(
                ex_style,
                class_name,
                w!("Textveil Overlay"),
                WS_POPUP,
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height(),
                None,
                None,
                Some(instance.into()),
                None,
            )
            .map_err(|e| OverlayError::WindowCreation(e.to_string()))?;

            let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), WINDOW_ALPHA, LWA_ALPHA);
            let _ = ShowWindow(hwnd, SW_SHOWNA);

            debug!(
                "overlay window created at ({}, {}) size {}x{}",
                bounds.left,
                bounds.top,
                bounds.width(),
                bounds.height()
            );

            Ok(Self {
                hwnd,
                width: bounds.width() as u32,
                height: bounds.height() as u32,
            })
        }
    }

    pub fn hwnd(&self) -> HWND {
        self.hwnd
    }

    /// Surface size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Drain all pending messages without blocking.
    ///
    /// The queue must be serviced every loop iteration or the OS marks the
    /// window unresponsive, even though it never handles input.
    pub fn pump_messages(&self) {
        unsafe {
            let mut msg = MSG::default();
            while PeekMessageW(&mut msg, None, 0, 0, PM_REMOVE).as_bool() {
                let _ = TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
        }
    }
}

impl Drop for OverlayWindow {
    fn drop(&mut self) {
        unsafe {
            let _ = DestroyWindow(self.hwnd);
        }
    }
}
