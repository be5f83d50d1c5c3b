//! Artists: per-particle draw callbacks.
//!
//! Kindle does no pixel work itself. A [`Canvas`] is whatever the host
//! renders into (a window surface, a sprite batch, an off-screen texture);
//! an [`Artist`] decides what to blit on it for one particle.
//!
//! ```ignore
//! struct Screen { /* host renderer */ }
//!
//! impl Canvas for Screen {
//!     type Image = MySprite;
//!     fn blit(&mut self, image: &MySprite, position: IVec2, blend: BlendMode) {
//!         // hand off to the renderer
//!     }
//! }
//!
//! let artist = ArtistFadeOverlay::new(spark, Anchor::Center, vec![
//!     [255, 255, 200, 255], // white-hot at launch
//!     [255, 80, 0, 0],      // faded orange at death
//! ])?;
//! ```

use crate::error::ConfigError;
use crate::particle::{spent_fraction, Particle};
use glam::{IVec2, UVec2, Vec2};
use image::GenericImageView;

/// RGBA color, 0-255 per channel.
pub type Rgba = [u8; 4];

/// How source pixels combine with the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlendMode {
    /// Alpha blending.
    #[default]
    Normal,
    /// Additive, for glows.
    Add,
    /// Subtractive.
    Subtract,
    /// Multiplicative, the usual way to tint.
    Multiply,
    /// Per-channel minimum.
    Min,
    /// Per-channel maximum.
    Max,
}

/// Something with pixel dimensions.
pub trait ImageSize {
    /// Width and height in pixels.
    fn size(&self) -> UVec2;
}

impl ImageSize for image::RgbaImage {
    fn size(&self) -> UVec2 {
        let (w, h) = self.dimensions();
        UVec2::new(w, h)
    }
}

impl ImageSize for image::DynamicImage {
    fn size(&self) -> UVec2 {
        let (w, h) = GenericImageView::dimensions(self);
        UVec2::new(w, h)
    }
}

impl ImageSize for UVec2 {
    fn size(&self) -> UVec2 {
        *self
    }
}

/// Drawing target handed through to artists untouched.
pub trait Canvas {
    /// Image handle type the canvas can draw.
    type Image: ImageSize;

    /// Draw `image` with its top-left corner at `position`.
    fn blit(&mut self, image: &Self::Image, position: IVec2, blend: BlendMode);

    /// Draw a copy of `image` tinted by `tint` (combined with `tint_blend`).
    ///
    /// Canvases that cannot tint fall back to a plain blit.
    fn blit_tinted(
        &mut self,
        image: &Self::Image,
        position: IVec2,
        _tint: Rgba,
        _tint_blend: BlendMode,
        blend: BlendMode,
    ) {
        self.blit(image, position, blend);
    }
}

/// Draws one particle on a canvas.
///
/// Closures taking `(&mut C, &Particle)` are artists too.
pub trait Artist<C: ?Sized>: Send {
    /// Draw `particle` on `canvas`.
    fn draw(&mut self, canvas: &mut C, particle: &Particle);
}

impl<C: ?Sized, F> Artist<C> for F
where
    F: FnMut(&mut C, &Particle) + Send,
{
    fn draw(&mut self, canvas: &mut C, particle: &Particle) {
        self(canvas, particle)
    }
}

/// Which point of the image sits on the particle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Anchor {
    /// The image center (integer halves of its size).
    #[default]
    Center,
    /// A pixel offset from the top-left corner.
    Offset(Vec2),
}

impl Anchor {
    fn resolve(self, image: &impl ImageSize) -> Vec2 {
        match self {
            Anchor::Center => (image.size() / 2).as_vec2(),
            Anchor::Offset(offset) => offset,
        }
    }
}

fn blit_position(particle: &Particle, origin: Vec2) -> IVec2 {
    (particle.position() - origin).round().as_ivec2()
}

/// Stamp the same image at every particle.
#[derive(Clone, Debug)]
pub struct ArtistSimple<I> {
    image: I,
    origin: Vec2,
    blend: BlendMode,
}

impl<I: ImageSize> ArtistSimple<I> {
    /// Draw `image` anchored at `anchor` with normal blending.
    pub fn new(image: I, anchor: Anchor) -> Self {
        let origin = anchor.resolve(&image);
        Self {
            image,
            origin,
            blend: BlendMode::Normal,
        }
    }

    /// Use a different blend mode.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Pixel offset subtracted from particle positions.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }
}

impl<C> Artist<C> for ArtistSimple<C::Image>
where
    C: Canvas,
    C::Image: Send,
{
    fn draw(&mut self, canvas: &mut C, particle: &Particle) {
        canvas.blit(&self.image, blit_position(particle, self.origin), self.blend);
    }
}

/// Draw an image tinted by how much of its life a particle has spent.
///
/// With two tints the particle fades from the first to the second. With
/// more, its lifetime is divided equally between consecutive pairs: for four
/// tints a third of the life is spent blending each pair.
#[derive(Clone, Debug)]
pub struct ArtistFadeOverlay<I> {
    image: I,
    origin: Vec2,
    tints: Vec<Rgba>,
    blend: BlendMode,
    tint_blend: BlendMode,
}

impl<I: ImageSize> ArtistFadeOverlay<I> {
    /// Fade `image` through `tints`, multiplying the tint into the image.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NoTints`] if `tints` is empty.
    pub fn new(image: I, anchor: Anchor, tints: Vec<Rgba>) -> Result<Self, ConfigError> {
        if tints.is_empty() {
            return Err(ConfigError::NoTints);
        }
        let origin = anchor.resolve(&image);
        Ok(Self {
            image,
            origin,
            tints,
            blend: BlendMode::Normal,
            tint_blend: BlendMode::Multiply,
        })
    }

    /// Blend mode for drawing the tinted image on the canvas.
    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    /// Blend mode for applying the tint to the image.
    pub fn with_tint_blend(mut self, tint_blend: BlendMode) -> Self {
        self.tint_blend = tint_blend;
        self
    }

    /// Tint for a particle with `life` left out of `initial_life`.
    pub fn calculate_tint(&self, life: f32, initial_life: f32) -> Rgba {
        let index = spent_fraction(life, initial_life) * (self.tints.len() - 1) as f32;
        let floor = index.floor() as usize;
        let remainder = index - floor as f32;

        if remainder <= 0.0 {
            return self.tints[floor];
        }
        let (from, to) = (self.tints[floor], self.tints[floor + 1]);
        std::array::from_fn(|i| {
            let (a, b) = (from[i] as f32, to[i] as f32);
            (a + (b - a) * remainder).round() as u8
        })
    }
}

impl<C> Artist<C> for ArtistFadeOverlay<C::Image>
where
    C: Canvas,
    C::Image: Send,
{
    fn draw(&mut self, canvas: &mut C, particle: &Particle) {
        let tint = self.calculate_tint(particle.life, particle.initial_life);
        canvas.blit_tinted(
            &self.image,
            blit_position(particle, self.origin),
            tint,
            self.tint_blend,
            self.blend,
        );
    }
}
