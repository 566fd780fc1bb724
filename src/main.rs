use iced::keyboard::{self, key::Named, Key};
use iced::widget::image::Handle;
use iced::widget::{center, column, row, scrollable, stack, text, text_input, Column};
use iced::{event, window, Alignment, Element, Event, Length, Size, Subscription, Task, Theme};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

mod config;
mod error;
mod remote;
mod state;
mod ui;

use config::Config;
use remote::RemoteClient;
use state::carousel::{Carousel, CarouselSettings};
use state::data::{Imprint, Photo};
use state::layout::{GalleryLayout, ScrollPosition};
use state::lightbox::LightboxKey;
use state::scheduler::SystemClock;
use state::session::Session;
use ui::images::{ImageCache, Rendition};
use ui::scroll::SmoothScroll;

/// Height taken by the header, footer and page padding around the gallery.
/// Only used until the gallery reports its real viewport.
const CHROME_HEIGHT: f32 = 150.0;

/// Tick rate while a smooth scroll is animating
const FRAME: Duration = Duration::from_millis(16);

/// Thumbnails kept decoded on either side of the visible range
const THUMBNAIL_MARGIN: usize = 8;

/// Manifest load progress, shown instead of the gallery until loaded
#[derive(Debug, Clone, PartialEq)]
enum LoadState {
    Loading,
    Loaded,
    Failed(String),
}

/// Main application state
struct Gallery {
    config: Config,
    client: RemoteClient,
    /// Photos, search, lightbox and carousel
    session: Session,
    layout: GalleryLayout,
    images: ImageCache,
    scroll: SmoothScroll,
    scroll_id: scrollable::Id,
    load: LoadState,
    imprint: Option<Imprint>,
    /// Set once the gallery has reported its real viewport size
    viewport_measured: bool,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Manifest fetch finished
    ManifestLoaded(Result<Vec<Photo>, String>),
    /// Imprint fetch finished (best effort)
    ImprintLoaded(Result<Imprint, String>),
    /// Search box content changed
    SearchChanged(String),
    /// Gallery item clicked
    OpenLightbox(usize),
    CloseLightbox,
    PrevPhoto,
    NextPhoto,
    /// Navigation key while the lightbox is open
    KeyPressed(LightboxKey),
    /// Gallery scrolled, by the user or programmatically
    GalleryScrolled(scrollable::Viewport),
    WindowResized(Size),
    /// Runtime tick driving timers and animation
    Tick(Instant),
    /// An image finished loading (or failed)
    ImageLoaded(Rendition, String, Result<Handle, String>),
}

impl Gallery {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let gallery = Self::with_config(Config::load());

        // Both fetches are independent; only the manifest gates the gallery
        let manifest = {
            let client = gallery.client.clone();
            Task::perform(
                async move { client.fetch_manifest().await.map_err(|e| e.to_string()) },
                Message::ManifestLoaded,
            )
        };
        let imprint = {
            let client = gallery.client.clone();
            Task::perform(
                async move { client.fetch_imprint().await.map_err(|e| e.to_string()) },
                Message::ImprintLoaded,
            )
        };

        (gallery, Task::batch([manifest, imprint]))
    }

    fn with_config(config: Config) -> Self {
        let client = RemoteClient::new(&config);
        let layout = GalleryLayout::from_config(&config);

        let mut carousel = Carousel::new(SystemClock, CarouselSettings::from_config(&config), layout);
        carousel.set_viewport(Self::initial_viewport_height(), 0.0);

        Gallery {
            session: Session::new(carousel),
            layout,
            images: ImageCache::default(),
            scroll: SmoothScroll::default(),
            scroll_id: scrollable::Id::unique(),
            load: LoadState::Loading,
            imprint: None,
            viewport_measured: false,
            client,
            config,
        }
    }

    fn initial_viewport_height() -> f32 {
        window::Settings::default().size.height - CHROME_HEIGHT
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(Ok(photos)) => {
                self.session.load(photos);
                self.load = LoadState::Loaded;
                self.rendered()
            }
            Message::ManifestLoaded(Err(e)) => {
                tracing::error!("❌ Failed to load manifest: {}", e);
                self.load = LoadState::Failed(e);
                Task::none()
            }
            Message::ImprintLoaded(Ok(imprint)) => {
                self.imprint = Some(imprint);
                Task::none()
            }
            Message::ImprintLoaded(Err(e)) => {
                tracing::warn!("⚠️  Imprint unavailable: {}", e);
                Task::none()
            }
            Message::SearchChanged(query) => {
                self.session.search(&query);
                if self.session.is_loaded() {
                    self.rendered()
                } else {
                    Task::none()
                }
            }
            Message::OpenLightbox(index) => {
                // A running carousel scroll finishes behind the lightbox so
                // the settled position matches the carousel cursor
                if self.session.open(index) {
                    self.request_full_image()
                } else {
                    Task::none()
                }
            }
            Message::CloseLightbox => {
                self.session.close();
                self.release_full_images();
                Task::none()
            }
            Message::PrevPhoto => {
                self.session.prev();
                self.release_full_images();
                self.request_full_image()
            }
            Message::NextPhoto => {
                self.session.next();
                self.release_full_images();
                self.request_full_image()
            }
            Message::KeyPressed(key) => {
                if self.session.handle_key(key) {
                    self.release_full_images();
                    self.request_full_image()
                } else {
                    Task::none()
                }
            }
            Message::GalleryScrolled(viewport) => {
                let position = ScrollPosition {
                    offset: viewport.absolute_offset().y,
                    viewport_height: viewport.bounds().height,
                    content_height: viewport.content_bounds().height,
                };

                // The user grabbed the gallery mid-animation
                if self.scroll.is_active() && !self.scroll.is_own_offset(position.offset) {
                    self.scroll.cancel();
                }

                self.viewport_measured = true;
                self.session.scrolled(position);
                self.request_visible_thumbnails()
            }
            Message::WindowResized(size) => {
                let content_height = self.layout.content_height(self.session.active().len());
                // A measured viewport beats the estimate; the next scroll
                // event corrects it for the new window size
                let viewport_height = if self.viewport_measured {
                    self.session.carousel().position().viewport_height
                } else {
                    (size.height - CHROME_HEIGHT).max(0.0)
                };
                self.session
                    .carousel_mut()
                    .set_viewport(viewport_height, content_height);
                self.request_visible_thumbnails()
            }
            Message::Tick(now) => self.tick(now),
            Message::ImageLoaded(rendition, file, result) => {
                self.images.finish(rendition, file, result);
                Task::none()
            }
        }
    }

    /// The gallery was rebuilt: back to the top, load what is now visible
    fn rendered(&mut self) -> Task<Message> {
        self.scroll.cancel();

        let content_height = self.layout.content_height(self.session.active().len());
        let viewport_height = self.session.carousel().position().viewport_height;
        self.session
            .carousel_mut()
            .set_viewport(viewport_height, content_height);

        Task::batch([
            scrollable::scroll_to(
                self.scroll_id.clone(),
                scrollable::AbsoluteOffset { x: 0.0, y: 0.0 },
            ),
            self.request_visible_thumbnails(),
        ])
    }

    /// Poll the carousel and step any running scroll animation
    fn tick(&mut self, now: Instant) -> Task<Message> {
        if let Some(index) = self.session.tick() {
            let position = self.session.carousel().position();
            let target = self.layout.scroll_target(index, &position);
            self.scroll
                .start(position.offset, target, now, self.config.smooth_scroll());
        }

        let Some(offset) = self.scroll.step(now) else {
            return Task::none();
        };

        // Programmatic scrolling counts as scrolling, like any other
        let mut position = self.session.carousel().position();
        position.offset = offset;
        self.session.scrolled(position);

        Task::batch([
            scrollable::scroll_to(
                self.scroll_id.clone(),
                scrollable::AbsoluteOffset { x: 0.0, y: offset },
            ),
            self.request_visible_thumbnails(),
        ])
    }

    /// Lazy loading: fetch thumbnails for items intersecting the viewport
    fn request_visible_thumbnails(&mut self) -> Task<Message> {
        let position = self.session.carousel().position();
        let active = self.session.active();
        let range = self
            .layout
            .visible_range(position.offset, position.viewport_height, active.len());

        // Drop decoded thumbnails that scrolled far away
        let keep = range.start.saturating_sub(THUMBNAIL_MARGIN)
            ..(range.end + THUMBNAIL_MARGIN).min(active.len());
        let nearby: HashSet<&str> = active[keep].iter().map(|p| p.file.as_str()).collect();
        self.images
            .retain(Rendition::Thumbnail, |file| nearby.contains(file));

        let mut tasks = Vec::new();
        for photo in &active[range] {
            if !self.images.request(Rendition::Thumbnail, &photo.file) {
                continue;
            }
            let file = photo.file.clone();
            tasks.push(Task::perform(
                load_thumbnail(self.client.clone(), photo.clone(), self.config.thumbnail_width),
                move |result| Message::ImageLoaded(Rendition::Thumbnail, file.clone(), result),
            ));
        }

        Task::batch(tasks)
    }

    /// Fetch the full-size image for the photo in the lightbox
    fn request_full_image(&mut self) -> Task<Message> {
        let Some(photo) = self.session.lightbox_photo().cloned() else {
            return Task::none();
        };
        if !self.images.request(Rendition::Full, &photo.file) {
            return Task::none();
        }

        let file = photo.file.clone();
        Task::perform(load_full_image(self.client.clone(), photo), move |result| {
            Message::ImageLoaded(Rendition::Full, file.clone(), result)
        })
    }

    /// Only the photo on display keeps its full-size image
    fn release_full_images(&mut self) {
        let current = self.session.lightbox_photo().map(|photo| photo.file.clone());
        self.images
            .retain(Rendition::Full, |file| current.as_deref() == Some(file));
    }

    /// Text shown in place of the gallery while it cannot be displayed
    fn status_message(&self) -> Option<String> {
        match &self.load {
            LoadState::Loading => Some("Loading photos…".to_string()),
            LoadState::Failed(e) => Some(format!("Failed to load photos: {}", e)),
            LoadState::Loaded => None,
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let header = row![
            text("Festival Shot").size(32),
            text(format!(
                "{} of {} photos",
                self.session.active().len(),
                self.session.total_count()
            ))
            .size(14),
            text_input("Search artist…", self.session.query())
                .on_input(Message::SearchChanged)
                .padding(10)
                .size(18)
                .width(Length::FillPortion(1)),
        ]
        .spacing(24)
        .align_y(Alignment::Center);

        let body: Element<Message> = match self.status_message() {
            Some(status) => center(text(status).size(18)).into(),
            None => ui::gallery::view(
                self.session.active(),
                &self.images,
                self.layout,
                self.scroll_id.clone(),
            ),
        };

        let footer = self
            .imprint
            .iter()
            .flat_map(|imprint| imprint.lines())
            .fold(Column::new().spacing(2), |footer, line| {
                footer.push(text(line).size(12))
            });

        let page = column![header, body, footer]
            .spacing(16)
            .padding(24)
            .width(Length::Fill)
            .height(Length::Fill);

        match self.session.lightbox_photo() {
            Some(photo) => stack![
                page,
                ui::lightbox::overlay(ui::lightbox::view(photo, &self.images)),
            ]
            .into(),
            None => page.into(),
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        let period = if self.scroll.is_active() {
            FRAME
        } else {
            self.config.tick()
        };

        let mut subscriptions = vec![
            iced::time::every(period).map(Message::Tick),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ];

        // Keyboard only matters while the lightbox is up
        if self.session.lightbox().is_open() {
            subscriptions.push(event::listen_with(lightbox_key_handler));
        }

        Subscription::batch(subscriptions)
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn lightbox_key_handler(
    event: Event,
    _status: event::Status,
    _window: window::Id,
) -> Option<Message> {
    let Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) = event else {
        return None;
    };

    lightbox_key(&key).map(Message::KeyPressed)
}

/// Keys the lightbox navigates with
fn lightbox_key(key: &Key) -> Option<LightboxKey> {
    match key {
        Key::Named(Named::Escape) => Some(LightboxKey::Escape),
        Key::Named(Named::ArrowLeft) => Some(LightboxKey::ArrowLeft),
        Key::Named(Named::ArrowRight) => Some(LightboxKey::ArrowRight),
        _ => None,
    }
}

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("festival_gallery=info")),
        )
        .init();

    iced::application("Festival Gallery", Gallery::update, Gallery::view)
        .subscription(Gallery::subscription)
        .theme(Gallery::theme)
        .centered()
        .run_with(Gallery::new)
}

/// Download a photo and shrink it for the gallery column
async fn load_thumbnail(client: RemoteClient, photo: Arc<Photo>, width: u32) -> Result<Handle, String> {
    let bytes = client.fetch_image(&photo).await.map_err(|e| e.to_string())?;
    let thumbnail = remote::thumbnail::generate_thumbnail(bytes, width)
        .await
        .map_err(|e| e.to_string())?;

    Ok(Handle::from_rgba(thumbnail.width, thumbnail.height, thumbnail.pixels))
}

/// Download a photo at full size for the lightbox; the renderer decodes it
async fn load_full_image(client: RemoteClient, photo: Arc<Photo>) -> Result<Handle, String> {
    let bytes = client.fetch_image(&photo).await.map_err(|e| e.to_string())?;
    Ok(Handle::from_bytes(bytes))
}
