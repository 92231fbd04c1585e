use crate::core::errors::ValidationError;
use crate::core::models::ImageMimeType;
use crate::global_constants;

/// An uploaded image as the user selected it. Immutable once built. Nothing
/// is checked at construction; call [`ImageAsset::validate`] before handing
/// it to a backend.
#[derive(Clone)]
pub struct ImageAsset {
    file_name: String,
    declared_mime: String,
    bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAsset")
            .field("file_name", &self.file_name)
            .field("declared_mime", &self.declared_mime)
            .field("byte_len", &self.bytes.len())
            .finish()
    }
}

impl ImageAsset {
    pub fn from_bytes(
        file_name: impl Into<String>,
        declared_mime: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let asset = Self {
            file_name: file_name.into(),
            declared_mime: declared_mime.into(),
            bytes,
        };

        log::debug!(
            "[IMAGE_ASSET] created '{}' ({}, {} bytes)",
            asset.file_name,
            asset.declared_mime,
            asset.bytes.len()
        );

        asset
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn declared_mime(&self) -> &str {
        &self.declared_mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    /// Checks the declared type and the size ceiling.
    pub fn validate(&self) -> Result<ImageMimeType, ValidationError> {
        let mime_type = ImageMimeType::from_mime(&self.declared_mime)
            .ok_or_else(|| ValidationError::UnsupportedType(self.declared_mime.clone()))?;

        if self.bytes.is_empty() {
            return Err(ValidationError::Empty(self.file_name.clone()));
        }

        if self.bytes.len() > global_constants::MAX_IMAGE_BYTES {
            return Err(ValidationError::TooLarge {
                size: self.bytes.len(),
                limit: global_constants::MAX_IMAGE_BYTES,
            });
        }

        Ok(mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_of_size(mime: &str, size: usize) -> ImageAsset {
        ImageAsset::from_bytes("problem.png", mime, vec![0u8; size])
    }

    #[test]
    fn test_validate_accepts_image_at_exact_size_limit() {
        let asset = asset_of_size("image/png", global_constants::MAX_IMAGE_BYTES);

        assert_eq!(asset.validate(), Ok(ImageMimeType::Png));
    }

    #[test]
    fn test_validate_rejects_image_one_byte_over_limit() {
        let asset = asset_of_size("image/png", global_constants::MAX_IMAGE_BYTES + 1);

        assert_eq!(
            asset.validate(),
            Err(ValidationError::TooLarge {
                size: global_constants::MAX_IMAGE_BYTES + 1,
                limit: global_constants::MAX_IMAGE_BYTES,
            })
        );
    }

    #[test]
    fn test_validate_rejects_unsupported_type() {
        let asset = asset_of_size("image/webp", 100);

        assert_eq!(
            asset.validate(),
            Err(ValidationError::UnsupportedType("image/webp".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_empty_payload() {
        let asset = asset_of_size("image/jpeg", 0);

        assert_eq!(
            asset.validate(),
            Err(ValidationError::Empty("problem.png".to_string()))
        );
    }

    #[test]
    fn test_accessors_expose_construction_values() {
        let asset = ImageAsset::from_bytes("two_sum.jpg", "image/jpeg", vec![1, 2, 3]);

        assert_eq!(asset.file_name(), "two_sum.jpg");
        assert_eq!(asset.declared_mime(), "image/jpeg");
        assert_eq!(asset.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_debug_output_omits_payload_bytes() {
        let asset = ImageAsset::from_bytes("a.gif", "image/gif", vec![7u8; 3]);

        let rendered = format!("{:?}", asset);

        assert!(rendered.contains("byte_len: 3"));
        assert!(!rendered.contains("[7, 7, 7]"));
    }
}
