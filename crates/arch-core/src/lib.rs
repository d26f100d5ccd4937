pub mod arch;
pub mod camera;
pub mod constants;
pub mod error;
pub mod loading;
pub mod mesh;
pub mod overlay;
pub mod scene;
pub mod viewer;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use arch::{generate, ArchLayout, ArchSpec, GumBase, ToothPlacement};
pub use camera::{Camera, OrbitConfig, OrbitRig};
pub use error::{Result, ViewerError};
pub use loading::{LoadingConfig, LoadingState, LoadingStateMachine};
pub use overlay::{OverlayAnimator, OverlayFrame, OverlayTrack};
pub use scene::{assemble, DrawBatches, InstanceRaw, Light, MeshKind, Scene};
pub use viewer::{
    FrameSnapshot, Lifecycle, ToothStatus, Viewer, ViewerConfig, ViewerProps, ViewerSurface,
};
