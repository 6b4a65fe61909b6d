pub mod surface;
pub mod recording;
pub mod collector;

pub use collector::channel::{ChannelFactory, DeliveryHandle, TransmissionChannel};
pub use collector::config::CollectorConfig;
pub use recording::session::RecordingSession;
pub use recording::snapshot::FrameSnapshot;
pub use recording::types::{FrameEnvelope, ImageDataFormat, RecorderError};
pub use surface::{DrawableSurface, PixelSurface, SurfaceRegistry};
