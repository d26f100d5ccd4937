/// DOM hooks and input tuning for the web host.
///
/// Element ids are the contract with the host page; any of them may be
/// missing, in which case the matching overlay piece is simply not driven.
// Canvas and its inbound props
pub const CANVAS_ID: &str = "arch-canvas";
pub const ATTR_ACTIVE_TOOTH: &str = "data-active-tooth";
pub const ATTR_STATUS: &str = "data-status";
pub const ATTR_SEED: &str = "data-seed";

// Fallback shown when the GPU backend cannot be brought up
pub const PLACEHOLDER_ID: &str = "arch-placeholder";
pub const PLACEHOLDER_REASON_ID: &str = "arch-placeholder-reason";

// Scanning overlay and its animated pieces
pub const SCAN_OVERLAY_ID: &str = "scan-overlay";
pub const SCAN_RING_ID: &str = "scan-ring";
pub const SCAN_RING_PULSE_ID: &str = "scan-ring-pulse";
pub const REFRESH_SPINNER_ID: &str = "refresh-spinner";
pub const PROGRESS_SWEEP_ID: &str = "progress-sweep";
pub const STATUS_PULSE_ID: &str = "status-pulse";
pub const BADGE_SPINNER_ID: &str = "badge-spinner";

// Pointer drag: pixels are measured against the canvas CSS height
pub const DRAG_MIN_VIEWPORT_PX: f32 = 1.0;

// Wheel deltas are normalized to notches; one notch is one zoom step
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;
pub const WHEEL_NOTCH_PX: f32 = 100.0;
pub const WHEEL_MAX_NOTCHES_PER_EVENT: f32 = 4.0;

// Frame pacing: long stalls (tab in background) are replayed as one short step
pub const MAX_FRAME_DT_MS: u64 = 100;
