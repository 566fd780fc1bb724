use iced::widget::{
    button, center, column, container, horizontal_space, mouse_area, opaque, row, text, Image,
};
use iced::{Alignment, Color, ContentFit, Element, Length};

use super::images::{ImageCache, ImageState, Rendition};
use crate::state::data::Photo;
use crate::Message;

/// Which image state the lightbox shows for a photo: the full image once
/// ready, the gallery thumbnail meanwhile, a full-image failure otherwise.
/// `None` means still loading.
fn displayed<'a>(images: &'a ImageCache, file: &str) -> Option<&'a ImageState> {
    let full = images.get(Rendition::Full, file);
    let thumb = images.get(Rendition::Thumbnail, file);

    match (full, thumb) {
        (Some(ready @ ImageState::Ready(_)), _) | (_, Some(ready @ ImageState::Ready(_))) => {
            Some(ready)
        }
        (Some(failed @ ImageState::Failed(_)), _) => Some(failed),
        _ => None,
    }
}

/// Lightbox content for one photo: close button, prev/next around the
/// image, and the single-line caption
///
/// Only the controls, the picture itself and the caption swallow clicks.
/// Everything else in the stage is backdrop.
pub fn view<'a>(photo: &'a Photo, images: &'a ImageCache) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match displayed(images, &photo.file) {
        Some(ImageState::Ready(handle)) => opaque(
            // Shrink-sized so the opaque area matches the picture
            Image::new(handle.clone()).content_fit(ContentFit::Contain),
        ),
        Some(ImageState::Failed(reason)) => opaque(
            text(format!("{} (failed to load: {})", photo.alt_text(), reason)).size(16),
        ),
        _ => text("Loading…").size(16).into(),
    };

    let close = row![
        horizontal_space(),
        opaque(
            button(text("✕").size(24))
                .on_press(Message::CloseLightbox)
                .style(button::text)
        ),
    ];

    let stage = row![
        opaque(
            button(text("‹").size(48))
                .on_press(Message::PrevPhoto)
                .style(button::text)
        ),
        container(picture).center(Length::Fill),
        opaque(
            button(text("›").size(48))
                .on_press(Message::NextPhoto)
                .style(button::text)
        ),
    ]
    .spacing(16)
    .align_y(Alignment::Center)
    .height(Length::Fill);

    column![close, stage, opaque(text(photo.lightbox_caption()).size(16))]
        .spacing(12)
        .align_x(Alignment::Center)
        .into()
}

/// Dim the page and float `content` above it. Clicking the dimmed
/// backdrop closes the lightbox; the content marks its own click targets.
pub fn overlay<'a>(content: Element<'a, Message>) -> Element<'a, Message> {
    let backdrop = center(content)
        .padding(32)
        .style(|_theme| container::Style {
            background: Some(
                Color {
                    a: 0.92,
                    ..Color::BLACK
                }
                .into(),
            ),
            ..container::Style::default()
        });

    opaque(mouse_area(backdrop).on_press(Message::CloseLightbox))
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::image::Handle;

    fn pixel() -> Handle {
        Handle::from_rgba(1, 1, vec![0, 0, 0, 255])
    }

    #[test]
    fn test_thumbnail_stands_in_until_full_image_arrives() {
        let mut images = ImageCache::default();
        images.request(Rendition::Thumbnail, "a.jpg");
        images.request(Rendition::Full, "a.jpg");
        assert!(displayed(&images, "a.jpg").is_none());

        images.finish(Rendition::Thumbnail, "a.jpg".to_string(), Ok(pixel()));
        assert!(matches!(displayed(&images, "a.jpg"), Some(ImageState::Ready(_))));
    }

    #[test]
    fn test_thumbnail_beats_full_image_failure() {
        let mut images = ImageCache::default();
        images.request(Rendition::Thumbnail, "a.jpg");
        images.request(Rendition::Full, "a.jpg");
        images.finish(Rendition::Full, "a.jpg".to_string(), Err("HTTP 500".to_string()));
        assert!(matches!(
            displayed(&images, "a.jpg"),
            Some(ImageState::Failed(reason)) if reason == "HTTP 500"
        ));

        images.finish(Rendition::Thumbnail, "a.jpg".to_string(), Ok(pixel()));
        assert!(matches!(displayed(&images, "a.jpg"), Some(ImageState::Ready(_))));
    }

    #[test]
    fn test_view_builds_for_every_image_state() {
        let photo = Photo {
            file: "a.jpg".to_string(),
            artist: "Jane Doe".to_string(),
            location: "Park".to_string(),
            date: None,
        };

        let mut images = ImageCache::default();
        let _ = overlay(view(&photo, &images));

        images.request(Rendition::Full, "a.jpg");
        images.finish(Rendition::Full, "a.jpg".to_string(), Err("timeout".to_string()));
        let _ = overlay(view(&photo, &images));

        images.request(Rendition::Thumbnail, "a.jpg");
        images.finish(Rendition::Thumbnail, "a.jpg".to_string(), Ok(pixel()));
        let _ = overlay(view(&photo, &images));
    }
}
