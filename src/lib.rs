//! svgstep animates pre-authored SVG diagrams one narrative step at a time.
//!
//! The flow is:
//!
//! - Parse markup into an owned [`SvgDocument`]
//! - Bind an [`Animator`] and schedule operations through the [`Stage`] trait (or replay a
//!   JSON [`Script`])
//! - Drive the [`Timeline`] with an external clock ([`Animator::advance`]) or jump between
//!   labelled steps ([`Animator::next_step`], [`Animator::previous_step`])
//! - Read the animated state back as SVG text or pixels ([`write_svg`], [`rasterize`])
//!
//! Every playhead move is reversible: entries capture the values they overwrite the first time
//! they run, so seeking backwards restores the document exactly, text included.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod animator;
pub(crate) mod document;
pub(crate) mod host;
pub(crate) mod render;
pub(crate) mod script;
pub(crate) mod timeline;

pub use crate::foundation::core::{BezPath, Point, Rect, Secs, SlideFrom, Vec2};
pub use crate::foundation::error::{SvgStepError, SvgStepResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::props::PropertyMap;
pub use crate::animation::value::{Color, Prop, Value, interpolate};
pub use crate::animator::core::Animator;
pub use crate::animator::navigator::StepNavigator;
pub use crate::animator::options::AnimationOptions;
pub use crate::animator::stage::{Group, Stage};
pub use crate::document::geometry::{
    GEOMETRY_TAGS, SHAFT_TAGS, arrow_shaft, bounding_box, is_geometry, outline, total_length,
};
pub use crate::document::select::{matches, select};
pub use crate::document::tree::{NodeId, NodeKind, SvgDocument};
pub use crate::document::write::to_svg_string;
pub use crate::host::diagram::{Control, DiagramHost, HostOpts, LoadTicket, Sequence};
pub use crate::render::snapshot::{Snapshot, SnapshotOpts, rasterize, write_svg};
pub use crate::script::model::{DurationRef, Script, Step, StepOptions};
pub use crate::script::palette::{Durations, Palette};
pub use crate::script::presets::{highlight_flow, sequential_reveal};
pub use crate::timeline::engine::{Playback, SeekTarget, Timeline};
pub use crate::timeline::entry::{
    Callback, Callbacks, Entry, EntryKind, MorphRecord, Payload, Placement, Span, Timing,
};
