use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use imageto_ico_core::container::read_directory;
use imageto_ico_core::{
    ConvertOptions, Converter, IconSize, ImagePayload, InputFormat, PayloadFormat, SourceImage,
    encode,
};
use proptest::prelude::*;

fn payloads_strategy() -> impl Strategy<Value = Vec<ImagePayload>> {
    prop::collection::vec(
        (1u32..=256, prop::collection::vec(any::<u8>(), 1..200)),
        1..12,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(size, data)| ImagePayload::new(IconSize::new(size).unwrap(), data))
            .collect()
    })
}

proptest! {
    #[test]
    fn every_entry_points_at_its_payload(payloads in payloads_strategy()) {
        let bytes = encode(&payloads).unwrap();
        let directory = read_directory(&bytes).unwrap();

        prop_assert_eq!(directory.entries.len(), payloads.len());
        for (index, payload) in payloads.iter().enumerate() {
            let entry = &directory.entries[index];
            prop_assert_eq!(directory.payload(&bytes, index), Some(payload.data()));
            prop_assert_eq!(entry.pixel_width(), payload.size().get());
            prop_assert_eq!(entry.pixel_height(), payload.size().get());
        }
    }

    #[test]
    fn length_is_header_plus_directory_plus_payloads(payloads in payloads_strategy()) {
        let bytes = encode(&payloads).unwrap();
        let expected = 6 + 16 * payloads.len() + payloads.iter().map(|p| p.len()).sum::<usize>();
        prop_assert_eq!(bytes.len(), expected);
    }

    #[test]
    fn encoding_is_deterministic(payloads in payloads_strategy()) {
        prop_assert_eq!(encode(&payloads).unwrap(), encode(&payloads).unwrap());
    }
}

fn png_source(width: u32, height: u32) -> SourceImage {
    let img = RgbaImage::from_pixel(width, height, Rgba([240, 160, 20, 255]));
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png).unwrap();
    SourceImage::from_bytes(&buf, InputFormat::Png).unwrap()
}

fn build(payload_format: PayloadFormat, sizes: &[u32]) -> Vec<u8> {
    let converter = Converter::new(ConvertOptions {
        sizes: sizes.iter().map(|&s| IconSize::new(s).unwrap()).collect(),
        payload_format,
    });
    converter.build(&png_source(120, 80)).unwrap()
}

#[test]
fn png_frames_are_readable_by_the_ico_crate() {
    let bytes = build(PayloadFormat::Png, &[16, 48, 256]);
    let icon_dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();

    assert_eq!(icon_dir.resource_type(), ico::ResourceType::Icon);
    let widths: Vec<u32> = icon_dir.entries().iter().map(|e| e.width()).collect();
    assert_eq!(widths, vec![16, 48, 256]);

    for entry in icon_dir.entries() {
        assert!(entry.is_png());
        let image = entry.decode().unwrap();
        assert_eq!(image.width(), entry.width());
        assert_eq!(image.height(), entry.height());
    }
}

#[test]
fn bmp_frames_are_readable_by_the_ico_crate() {
    let bytes = build(PayloadFormat::Bmp, &[32, 16]);
    let icon_dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();

    assert_eq!(icon_dir.entries().len(), 2);
    for entry in icon_dir.entries() {
        assert!(!entry.is_png());
        let image = entry.decode().unwrap();
        // 120x80 fitted into a square leaves the top row transparent.
        let top = &image.rgba_data()[..4];
        assert_eq!(top[3], 0);
    }
}

#[test]
fn image_crate_opens_the_largest_frame() {
    let bytes = build(PayloadFormat::Png, &[16, 32, 64]);
    let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Ico).unwrap();

    assert_eq!((decoded.width(), decoded.height()), (64, 64));
}
