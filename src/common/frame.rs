use base64::prelude::*;
use chrono::{DateTime, Utc};
use image::{DynamicImage, RgbImage};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::DecodeError;

/// A decoded webcam frame tagged with the session it belongs to.
#[derive(Clone)]
pub struct Frame {
    session_id: Uuid,
    image: Arc<DynamicImage>,
    captured_at: DateTime<Utc>,
    frame_id: Uuid,
}

impl Frame {
    pub fn new(
        session_id: Uuid,
        image: DynamicImage,
        captured_at: DateTime<Utc>,
        frame_id: Uuid,
    ) -> Self {
        Self {
            session_id,
            image: Arc::new(image),
            captured_at,
            frame_id,
        }
    }

    /// Decodes a base64 (optionally data-URL) payload into a frame stamped now.
    pub fn from_payload(session_id: Uuid, payload: &ImagePayload) -> Result<Self, DecodeError> {
        let image = payload.decode()?;
        Ok(Self::new(session_id, image, Utc::now(), Uuid::new_v4()))
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Pixel buffer in RGB channel order, as the landmark detector expects.
    pub fn rgb(&self) -> RgbImage {
        self.image.to_rgb8()
    }

    pub fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    pub fn frame_id(&self) -> Uuid {
        self.frame_id
    }
}

/// Base64 image as sent by the browser, e.g. `data:image/jpeg;base64,/9j/...`.
#[derive(Debug, Clone)]
pub struct ImagePayload<'a> {
    raw: &'a str,
}

impl<'a> ImagePayload<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self { raw }
    }

    /// The base64 body with any data-URL header (everything up to the
    /// first comma) removed.
    pub fn encoded(&self) -> &'a str {
        match self.raw.split_once(',') {
            Some((_header, encoded)) => encoded,
            None => self.raw,
        }
    }

    /// Line-wrapped base64 (MIME style) is accepted; ASCII whitespace is
    /// dropped before decoding.
    pub fn decode(&self) -> Result<DynamicImage, DecodeError> {
        let encoded: String = self
            .encoded()
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        if encoded.is_empty() {
            return Err(DecodeError::EmptyPayload);
        }
        let bytes = BASE64_STANDARD.decode(&encoded)?;
        Ok(image::load_from_memory(&bytes)?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageBuffer, ImageFormat, Rgb};
    use std::io::Cursor;

    pub(crate) fn png_base64(width: u32, height: u32, color: [u8; 3]) -> String {
        let img: DynamicImage = DynamicImage::ImageRgb8(ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(
            width,
            height,
            Rgb(color),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        BASE64_STANDARD.encode(bytes)
    }

    #[test]
    fn cloning_frame_shares_image_buffer() {
        let img: DynamicImage = DynamicImage::ImageRgb8(
            ImageBuffer::<Rgb<u8>, Vec<u8>>::from_pixel(16, 16, Rgb([1, 2, 3])),
        );
        let f1 = Frame::new(Uuid::new_v4(), img, Utc::now(), Uuid::new_v4());
        let f2 = f1.clone();
        assert!(Arc::ptr_eq(&f1.image, &f2.image));
    }

    #[test]
    fn data_url_header_is_stripped() {
        let payload = ImagePayload::new("data:image/png;base64,AAAA");
        assert_eq!(payload.encoded(), "AAAA");

        let payload = ImagePayload::new("AAAA");
        assert_eq!(payload.encoded(), "AAAA");
    }

    #[test]
    fn decodes_png_with_and_without_header() {
        let encoded = png_base64(8, 4, [10, 20, 30]);

        let bare = ImagePayload::new(&encoded).decode().unwrap();
        assert_eq!((bare.width(), bare.height()), (8, 4));

        let with_header = format!("data:image/png;base64,{encoded}");
        let frame = Frame::from_payload(Uuid::nil(), &ImagePayload::new(&with_header)).unwrap();
        assert_eq!(frame.session_id(), Uuid::nil());
        assert_eq!(frame.rgb().get_pixel(0, 0), &Rgb([10, 20, 30]));
    }

    #[test]
    fn rejects_garbage_payloads() {
        assert!(matches!(
            ImagePayload::new("data:image/png;base64,").decode(),
            Err(DecodeError::EmptyPayload)
        ));
        assert!(matches!(
            ImagePayload::new("not base64 at all!").decode(),
            Err(DecodeError::Base64(_))
        ));
        // valid base64, but not an image
        assert!(matches!(
            ImagePayload::new("aGVsbG8gd29ybGQ=").decode(),
            Err(DecodeError::Image(_))
        ));
    }

    #[test]
    fn line_wrapped_base64_decodes() {
        let encoded = png_base64(4, 4, [200, 10, 10]);
        let (head, tail) = encoded.split_at(20);
        let wrapped = format!("data:image/png;base64,{head}\n{tail}\r\n");
        let image = ImagePayload::new(&wrapped).decode().unwrap();
        assert_eq!(image.to_rgb8().get_pixel(3, 3), &Rgb([200, 10, 10]));
    }

    #[test]
    fn blank_payload_is_rejected() {
        let result = ImagePayload::new("data:image/png;base64, \n ").decode();
        assert!(matches!(result, Err(DecodeError::EmptyPayload)));
    }
}
