/// User interface module
///
/// - Gallery column with lazily loaded thumbnails (gallery.rs)
/// - Modal lightbox overlay (lightbox.rs)
/// - Image load states (images.rs)
/// - Animated programmatic scrolling (scroll.rs)

pub mod gallery;
pub mod images;
pub mod lightbox;
pub mod scroll;
