//! Roundscope Frame Source
//!
//! Seekable frame access and the gauge sampler. The sampler walks a fixed
//! tick grid over any [`FrameSource`], so the decoded-video path and test
//! scripts exercise identical code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                FrameSampler                   │
//! │   tick ──▶ seek ──▶ capture ──▶ estimate      │
//! │    ▲        │ watchdog skip      │            │
//! │    └────────┴── yield ◀──────────┘            │
//! └───────────────┬──────────────────────────────┘
//!                 │ FrameSource trait
//!        ┌────────┴─────────┐
//!        ▼                  ▼
//!  VideoFrameSource   ScriptedFrameSource
//!  (GStreamer seek)      (test script)
//! ```

pub mod sampler;
pub mod source;
pub mod video;

pub use sampler::{FrameSampler, SamplerConfig, SamplerState, SamplerStats};
pub use source::{FrameSource, ScriptedFrame, ScriptedFrameSource, SeekStatus};
pub use video::VideoFrameSource;
