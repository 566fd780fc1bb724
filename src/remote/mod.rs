/// Remote data module
///
/// This module handles:
/// - Fetching the photo manifest and the imprint
/// - Downloading image bytes from the image host
/// - Decoding and downscaling gallery thumbnails

pub mod client;
pub mod thumbnail;

pub use client::RemoteClient;
