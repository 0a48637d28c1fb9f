//! Physical display enumeration.

use windows::core::BOOL;
use windows::Win32::Foundation::{LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITORINFO, MONITORINFOEXW,
};

use crate::error::{OverlayError, OverlayResult};
use crate::model::{DisplayInfo, Rect};

/// Enumerate all attached displays in OS enumeration order.
///
/// Returns a fresh list on every call; topology may change between starts,
/// so nothing is cached and indices are only meaningful for the list they
/// came from.
pub fn enumerate() -> OverlayResult<Vec<DisplayInfo>> {
    unsafe extern "system" fn monitor_enum_proc(
        hmonitor: HMONITOR,
        _hdc: HDC,
        _clip: *mut RECT,
        lparam: LPARAM,
    ) -> BOOL {
        let monitors = unsafe { &mut *(lparam.0 as *mut Vec<HMONITOR>) };
        monitors.push(hmonitor);
        BOOL(1)
    }

    let mut monitors: Vec<HMONITOR> = Vec::new();
    unsafe {
        let _ = EnumDisplayMonitors(
            None,
            None,
            Some(monitor_enum_proc),
            LPARAM(std::ptr::addr_of_mut!(monitors) as isize),
        );
    }

    let mut displays: Vec<DisplayInfo> = Vec::with_capacity(monitors.len());
    for hmonitor in monitors {
        let mut info = MONITORINFOEXW::default();
        info.monitorInfo.cbSize = std::mem::size_of::<MONITORINFOEXW>() as u32;
        let ok = unsafe { GetMonitorInfoW(hmonitor, &mut info as *mut _ as *mut MONITORINFO) };
        if !ok.as_bool() {
            continue;
        }
        let rect = info.monitorInfo.rcMonitor;
        displays.push(DisplayInfo {
            index: displays.len(),
            bounds: Rect {
                left: rect.left,
                top: rect.top,
                right: rect.right,
                bottom: rect.bottom,
            },
            handle: hmonitor.0 as isize,
        });
    }

    if displays.is_empty() {
        return Err(OverlayError::NoDisplays);
    }
    Ok(displays)
}
