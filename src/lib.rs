pub mod annotations;
pub mod calendar;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod scene;

pub use annotations::{Annotation, AnnotationStore};
pub use calendar::Today;
pub use config::{load_config, Config};
pub use geometry::Viewport;
pub use layout::{apply_drag, refresh_visibility, run_label_pipeline, LabelData};
