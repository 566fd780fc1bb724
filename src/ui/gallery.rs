use iced::widget::{column, container, mouse_area, scrollable, text, Column, Image};
use iced::{ContentFit, Element, Length};
use std::sync::Arc;

use super::images::{ImageCache, ImageState, Rendition};
use crate::state::data::Photo;
use crate::state::layout::GalleryLayout;
use crate::Message;

/// Build the gallery column from scratch for `photos`
///
/// Every call produces the complete list in the given order; clicking an
/// item opens the lightbox at that item's position in `photos`.
pub fn view<'a>(
    photos: &'a [Arc<Photo>],
    images: &'a ImageCache,
    layout: GalleryLayout,
    scroll_id: scrollable::Id,
) -> Element<'a, Message> {
    if photos.is_empty() {
        return container(text("No photos match your search.").size(18))
            .center(Length::Fill)
            .into();
    }

    let items = photos
        .iter()
        .enumerate()
        .map(|(index, photo)| item(index, photo, images, layout));

    let content = Column::with_children(items)
        .spacing(layout.item_spacing)
        .padding([0, 32])
        .width(Length::Fill);

    scrollable(content)
        .id(scroll_id)
        .on_scroll(Message::GalleryScrolled)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// One figure: image (or its placeholder) above a multi-line caption
fn item<'a>(
    index: usize,
    photo: &'a Photo,
    images: &'a ImageCache,
    layout: GalleryLayout,
) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match images.get(Rendition::Thumbnail, &photo.file) {
        Some(ImageState::Ready(handle)) => Image::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        // Still loading, failed, or never requested: show the alt text
        _ => container(text(photo.alt_text()).size(14))
            .center(Length::Fill)
            .into(),
    };

    let caption = photo
        .caption_lines()
        .into_iter()
        .enumerate()
        .fold(Column::new().spacing(2), |caption, (line_no, line)| {
            // Artist first and larger, then location and date
            let size = if line_no == 0 { 18 } else { 14 };
            caption.push(text(line).size(size))
        });

    let figure = container(column![picture, caption].spacing(8))
        .width(Length::Fill)
        .height(layout.item_height);

    mouse_area(figure)
        .on_press(Message::OpenLightbox(index))
        .into()
}
